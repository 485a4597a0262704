use super::doc::{PERMISSIONS, TAGS};
use super::{Action, Fallback, FieldSpec, FieldType, Output, Pick, ToolSpec};

const THEME_ID: FieldSpec =
    FieldSpec::required("theme_id", "ThemeId", FieldType::String, "ID of the theme");
const BASE_THEME_ID: FieldSpec = FieldSpec::required(
    "base_theme_id",
    "BaseThemeId",
    FieldType::String,
    "Theme to inherit from, e.g. CLASSIC, MIDNIGHT, SEASIDE",
);
const CONFIGURATION_DOC: &str =
    "Theme configuration: DataColorPalette, UIColorPalette, Sheet, Typography";
const VERSION_DESCRIPTION: FieldSpec = FieldSpec::optional(
    "version_description",
    "VersionDescription",
    FieldType::String,
    "Description of the new theme version",
);

const WRITE_OUTPUT: &[Pick] = &[
    Pick::new("Arn", "arn", Fallback::Str("")),
    Pick::new("ThemeId", "theme_id", Fallback::Arg("theme_id")),
    Pick::new("VersionArn", "version_arn", Fallback::Str("")),
    Pick::new("CreationStatus", "creation_status", Fallback::Null),
    Pick::new("RequestId", "request_id", Fallback::Null),
];

pub(super) const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "list_themes",
        description: "List themes in the QuickSight account with pagination",
        fields: &[],
        action: Action::List {
            operation: "ListThemes",
            source: "ThemeSummaryList",
            key: "themes",
            echo: &[],
            project: Some(&[
                Pick::new("ThemeId", "ThemeId", Fallback::Null),
                Pick::new("Name", "Name", Fallback::Source("ThemeId")),
            ]),
        },
    },
    ToolSpec {
        name: "describe_theme",
        description: "Get detailed information about a specific theme, including colors and typography",
        fields: &[
            THEME_ID,
            FieldSpec::optional(
                "version_number",
                "VersionNumber",
                FieldType::Integer,
                "Theme version (latest when omitted)",
            ),
            FieldSpec::optional("alias_name", "AliasName", FieldType::String, "Theme alias"),
        ],
        action: Action::Call {
            operation: "DescribeTheme",
            output: Output::Envelope {
                source: "Theme",
                key: "theme",
            },
        },
    },
    ToolSpec {
        name: "create_theme",
        description: "Create a new custom QuickSight theme",
        fields: &[
            THEME_ID,
            FieldSpec::required("name", "Name", FieldType::String, "Display name"),
            BASE_THEME_ID,
            FieldSpec::required("configuration", "Configuration", FieldType::Object, CONFIGURATION_DOC),
            FieldSpec::optional("permissions", "Permissions", FieldType::Array, PERMISSIONS),
            VERSION_DESCRIPTION,
            FieldSpec::optional("tags", "Tags", FieldType::Array, TAGS),
        ],
        action: Action::Call {
            operation: "CreateTheme",
            output: Output::Fields(WRITE_OUTPUT),
        },
    },
    ToolSpec {
        name: "update_theme",
        description: "Update an existing QuickSight theme, creating a new version",
        fields: &[
            THEME_ID,
            BASE_THEME_ID,
            FieldSpec::optional("configuration", "Configuration", FieldType::Object, CONFIGURATION_DOC),
            FieldSpec::optional("name", "Name", FieldType::String, "New display name"),
            VERSION_DESCRIPTION,
        ],
        action: Action::Call {
            operation: "UpdateTheme",
            output: Output::Fields(WRITE_OUTPUT),
        },
    },
];
