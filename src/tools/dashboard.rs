use super::doc::{GRANT, PERMISSIONS, REVOKE, TAGS};
use super::{Action, Fallback, FieldSpec, FieldType, Output, Pick, ToolSpec};

const DASHBOARD_ID: FieldSpec = FieldSpec::required(
    "dashboard_id",
    "DashboardId",
    FieldType::String,
    "ID of the dashboard",
);
const NAME: FieldSpec = FieldSpec::required("name", "Name", FieldType::String, "Display name");
const SOURCE_ENTITY: FieldSpec = FieldSpec::required(
    "source_entity",
    "SourceEntity",
    FieldType::Object,
    "Template the dashboard is published from, {\"SourceTemplate\": {..}}",
);
const VERSION_DESCRIPTION: FieldSpec = FieldSpec::optional(
    "version_description",
    "VersionDescription",
    FieldType::String,
    "Description of this dashboard version",
);
const PUBLISH_OPTIONS: FieldSpec = FieldSpec::optional(
    "dashboard_publish_options",
    "DashboardPublishOptions",
    FieldType::Object,
    "Ad hoc filtering, export and sheet controls options",
);
const THEME_ARN: FieldSpec =
    FieldSpec::optional("theme_arn", "ThemeArn", FieldType::String, "ARN of the theme to apply");

pub(super) const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "list_dashboards",
        description: "List dashboards in the QuickSight account with pagination",
        fields: &[],
        action: Action::List {
            operation: "ListDashboards",
            source: "DashboardSummaryList",
            key: "dashboards",
            echo: &[],
            project: None,
        },
    },
    ToolSpec {
        name: "describe_dashboard",
        description: "Get detailed information about a specific dashboard",
        fields: &[DASHBOARD_ID],
        action: Action::Call {
            operation: "DescribeDashboard",
            output: Output::Envelope {
                source: "Dashboard",
                key: "dashboard",
            },
        },
    },
    ToolSpec {
        name: "describe_dashboard_definition",
        description: "Get the definition (structure) of a dashboard",
        fields: &[
            DASHBOARD_ID,
            FieldSpec::optional(
                "version_number",
                "VersionNumber",
                FieldType::Integer,
                "Dashboard version to describe (latest when omitted)",
            ),
        ],
        action: Action::Call {
            operation: "DescribeDashboardDefinition",
            output: Output::Fields(&[
                Pick::new("DashboardId", "dashboard_id", Fallback::Arg("dashboard_id")),
                Pick::new("Name", "name", Fallback::Null),
                Pick::new("ResourceStatus", "resource_status", Fallback::Null),
                Pick::new("Definition", "definition", Fallback::EmptyObject),
                Pick::new("Errors", "errors", Fallback::EmptyArray),
            ]),
        },
    },
    ToolSpec {
        name: "list_dashboard_versions",
        description: "List all versions of a specific dashboard with pagination",
        fields: &[DASHBOARD_ID],
        action: Action::List {
            operation: "ListDashboardVersions",
            source: "DashboardVersionSummaryList",
            key: "versions",
            echo: &["dashboard_id"],
            project: None,
        },
    },
    ToolSpec {
        name: "create_dashboard",
        description: "Create a new QuickSight dashboard",
        fields: &[
            DASHBOARD_ID,
            NAME,
            SOURCE_ENTITY,
            FieldSpec::optional("permissions", "Permissions", FieldType::Array, PERMISSIONS),
            VERSION_DESCRIPTION,
            PUBLISH_OPTIONS,
            THEME_ARN,
            FieldSpec::optional("tags", "Tags", FieldType::Array, TAGS),
        ],
        action: Action::Call {
            operation: "CreateDashboard",
            output: Output::Fields(&[
                Pick::new("Arn", "arn", Fallback::Str("")),
                Pick::new("DashboardId", "dashboard_id", Fallback::Arg("dashboard_id")),
                Pick::new("VersionArn", "version_arn", Fallback::Str("")),
                Pick::new("CreationStatus", "creation_status", Fallback::Str("CREATION_IN_PROGRESS")),
            ]),
        },
    },
    ToolSpec {
        name: "update_dashboard",
        description: "Update an existing QuickSight dashboard",
        fields: &[
            DASHBOARD_ID,
            NAME,
            SOURCE_ENTITY,
            VERSION_DESCRIPTION,
            PUBLISH_OPTIONS,
            THEME_ARN,
        ],
        action: Action::Call {
            operation: "UpdateDashboard",
            output: Output::Fields(&[
                Pick::new("Arn", "arn", Fallback::Str("")),
                Pick::new("DashboardId", "dashboard_id", Fallback::Arg("dashboard_id")),
                Pick::new("VersionArn", "version_arn", Fallback::Str("")),
                Pick::new("CreationStatus", "update_status", Fallback::Str("UPDATE_IN_PROGRESS")),
            ]),
        },
    },
    ToolSpec {
        name: "update_dashboard_published_version",
        description: "Publish a specific version of a dashboard",
        fields: &[
            DASHBOARD_ID,
            FieldSpec::required(
                "version_number",
                "VersionNumber",
                FieldType::Integer,
                "Version number to publish",
            ),
        ],
        action: Action::Call {
            operation: "UpdateDashboardPublishedVersion",
            output: Output::Fields(&[
                Pick::new("DashboardId", "dashboard_id", Fallback::Arg("dashboard_id")),
                Pick::new("DashboardArn", "dashboard_arn", Fallback::Str("")),
            ]),
        },
    },
    ToolSpec {
        name: "update_dashboard_permissions",
        description: "Update permissions for a QuickSight dashboard",
        fields: &[
            DASHBOARD_ID,
            FieldSpec::optional("grant_permissions", "GrantPermissions", FieldType::Array, GRANT),
            FieldSpec::optional("revoke_permissions", "RevokePermissions", FieldType::Array, REVOKE),
            FieldSpec::optional(
                "grant_link_permissions",
                "GrantLinkPermissions",
                FieldType::Array,
                "Link sharing permissions to grant",
            ),
            FieldSpec::optional(
                "revoke_link_permissions",
                "RevokeLinkPermissions",
                FieldType::Array,
                "Link sharing permissions to revoke",
            ),
        ],
        action: Action::Call {
            operation: "UpdateDashboardPermissions",
            output: Output::Fields(&[
                Pick::new("DashboardArn", "dashboard_arn", Fallback::Str("")),
                Pick::new("DashboardId", "dashboard_id", Fallback::Arg("dashboard_id")),
                Pick::new("Permissions", "permissions", Fallback::EmptyArray),
                Pick::new("LinkSharingConfiguration", "link_sharing_configuration", Fallback::Null),
            ]),
        },
    },
];
