use super::doc::{PERMISSIONS, TAGS};
use super::{Action, Fallback, FieldSpec, FieldType, Output, Pick, ToolSpec};

const TEMPLATE_ID: FieldSpec = FieldSpec::required(
    "template_id",
    "TemplateId",
    FieldType::String,
    "ID of the template",
);
const VERSION_NUMBER: FieldSpec = FieldSpec::optional(
    "version_number",
    "VersionNumber",
    FieldType::Integer,
    "Template version (latest when omitted)",
);
const ALIAS_NAME: FieldSpec = FieldSpec::optional(
    "alias_name",
    "AliasName",
    FieldType::String,
    "Template alias, e.g. $LATEST or $PUBLISHED",
);
const VERSION_DESCRIPTION: FieldSpec = FieldSpec::optional(
    "version_description",
    "VersionDescription",
    FieldType::String,
    "Description of the new template version",
);

pub(super) const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "list_templates",
        description: "List templates in the QuickSight account with pagination",
        fields: &[],
        action: Action::List {
            operation: "ListTemplates",
            source: "TemplateSummaryList",
            key: "templates",
            echo: &[],
            project: Some(&[
                Pick::new("TemplateId", "TemplateId", Fallback::Null),
                Pick::new("Name", "Name", Fallback::Source("TemplateId")),
            ]),
        },
    },
    ToolSpec {
        name: "describe_template",
        description: "Get detailed information about a specific template",
        fields: &[TEMPLATE_ID, VERSION_NUMBER, ALIAS_NAME],
        action: Action::Call {
            operation: "DescribeTemplate",
            output: Output::Envelope {
                source: "Template",
                key: "template",
            },
        },
    },
    ToolSpec {
        name: "describe_template_definition",
        description: "Get the definition (structure) of a template",
        fields: &[TEMPLATE_ID, VERSION_NUMBER, ALIAS_NAME],
        action: Action::Call {
            operation: "DescribeTemplateDefinition",
            output: Output::Fields(&[
                Pick::new("TemplateId", "template_id", Fallback::Arg("template_id")),
                Pick::new("Definition", "definition", Fallback::EmptyObject),
                Pick::new("Errors", "errors", Fallback::EmptyArray),
            ]),
        },
    },
    ToolSpec {
        name: "create_template",
        description: "Create a new QuickSight template from an analysis or another template",
        fields: &[
            TEMPLATE_ID,
            FieldSpec::required("name", "Name", FieldType::String, "Display name"),
            FieldSpec::required(
                "source_entity",
                "SourceEntity",
                FieldType::Object,
                "{\"SourceAnalysis\": {..}} or {\"SourceTemplate\": {..}}",
            ),
            FieldSpec::optional("permissions", "Permissions", FieldType::Array, PERMISSIONS),
            VERSION_DESCRIPTION,
            FieldSpec::optional("tags", "Tags", FieldType::Array, TAGS),
        ],
        action: Action::Call {
            operation: "CreateTemplate",
            output: Output::Fields(&[
                Pick::new("Arn", "arn", Fallback::Str("")),
                Pick::new("TemplateId", "template_id", Fallback::Arg("template_id")),
                Pick::new("VersionArn", "version_arn", Fallback::Str("")),
                Pick::new("CreationStatus", "creation_status", Fallback::Str("CREATION_IN_PROGRESS")),
            ]),
        },
    },
    ToolSpec {
        name: "update_template",
        description: "Update an existing QuickSight template, creating a new version",
        fields: &[
            TEMPLATE_ID,
            FieldSpec::required(
                "source_entity",
                "SourceEntity",
                FieldType::Object,
                "{\"SourceAnalysis\": {..}} or {\"SourceTemplate\": {..}}",
            ),
            FieldSpec::optional("name", "Name", FieldType::String, "New display name"),
            VERSION_DESCRIPTION,
        ],
        action: Action::Call {
            operation: "UpdateTemplate",
            output: Output::Fields(&[
                Pick::new("Arn", "arn", Fallback::Str("")),
                Pick::new("TemplateId", "template_id", Fallback::Arg("template_id")),
                Pick::new("VersionArn", "version_arn", Fallback::Str("")),
                Pick::new("CreationStatus", "update_status", Fallback::Str("UPDATE_IN_PROGRESS")),
            ]),
        },
    },
];
