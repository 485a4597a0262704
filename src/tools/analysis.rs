use super::doc::{GRANT, PERMISSIONS, REVOKE, TAGS};
use super::{Action, Fallback, FieldSpec, FieldType, Output, Pick, ToolSpec};

const ANALYSIS_ID: FieldSpec = FieldSpec::required(
    "analysis_id",
    "AnalysisId",
    FieldType::String,
    "ID of the analysis",
);

pub(super) const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "list_analyses",
        description: "List analyses in the QuickSight account with pagination",
        fields: &[],
        action: Action::List {
            operation: "ListAnalyses",
            source: "AnalysisSummaryList",
            key: "analyses",
            echo: &[],
            project: None,
        },
    },
    ToolSpec {
        name: "describe_analysis",
        description: "Get detailed information about a specific analysis",
        fields: &[ANALYSIS_ID],
        action: Action::Call {
            operation: "DescribeAnalysis",
            output: Output::Envelope {
                source: "Analysis",
                key: "analysis",
            },
        },
    },
    ToolSpec {
        name: "describe_analysis_definition",
        description: "Get the definition (structure) of an analysis",
        fields: &[ANALYSIS_ID],
        action: Action::Call {
            operation: "DescribeAnalysisDefinition",
            output: Output::Fields(&[
                Pick::new("AnalysisId", "analysis_id", Fallback::Arg("analysis_id")),
                Pick::new("Name", "name", Fallback::Null),
                Pick::new("ResourceStatus", "resource_status", Fallback::Null),
                Pick::new("Definition", "definition", Fallback::EmptyObject),
                Pick::new("Errors", "errors", Fallback::EmptyArray),
            ]),
        },
    },
    ToolSpec {
        name: "create_analysis",
        description: "Create a new QuickSight analysis",
        fields: &[
            ANALYSIS_ID,
            FieldSpec::required("name", "Name", FieldType::String, "Display name"),
            FieldSpec::optional(
                "definition",
                "Definition",
                FieldType::Object,
                "Analysis definition (sheets, visuals, dataset declarations)",
            ),
            FieldSpec::optional(
                "source_entity",
                "SourceEntity",
                FieldType::Object,
                "Template to create the analysis from",
            ),
            FieldSpec::optional("permissions", "Permissions", FieldType::Array, PERMISSIONS),
            FieldSpec::optional("theme_arn", "ThemeArn", FieldType::String, "ARN of the theme to apply"),
            FieldSpec::optional("tags", "Tags", FieldType::Array, TAGS),
        ],
        action: Action::Call {
            operation: "CreateAnalysis",
            output: Output::Fields(&[
                Pick::new("Arn", "arn", Fallback::Str("")),
                Pick::new("AnalysisId", "analysis_id", Fallback::Arg("analysis_id")),
                Pick::new("CreationStatus", "creation_status", Fallback::Str("CREATION_IN_PROGRESS")),
            ]),
        },
    },
    ToolSpec {
        name: "update_analysis",
        description: "Update an existing QuickSight analysis",
        fields: &[
            ANALYSIS_ID,
            FieldSpec::required("name", "Name", FieldType::String, "Display name"),
            FieldSpec::optional(
                "definition",
                "Definition",
                FieldType::Object,
                "Analysis definition (sheets, visuals, dataset declarations)",
            ),
            FieldSpec::optional(
                "source_entity",
                "SourceEntity",
                FieldType::Object,
                "Template to update the analysis from",
            ),
            FieldSpec::optional("theme_arn", "ThemeArn", FieldType::String, "ARN of the theme to apply"),
        ],
        action: Action::Call {
            operation: "UpdateAnalysis",
            output: Output::Fields(&[
                Pick::new("Arn", "arn", Fallback::Str("")),
                Pick::new("AnalysisId", "analysis_id", Fallback::Arg("analysis_id")),
                Pick::new("UpdateStatus", "update_status", Fallback::Str("UPDATE_IN_PROGRESS")),
            ]),
        },
    },
    ToolSpec {
        name: "update_analysis_permissions",
        description: "Update permissions for a QuickSight analysis",
        fields: &[
            ANALYSIS_ID,
            FieldSpec::optional("grant_permissions", "GrantPermissions", FieldType::Array, GRANT),
            FieldSpec::optional("revoke_permissions", "RevokePermissions", FieldType::Array, REVOKE),
        ],
        action: Action::Call {
            operation: "UpdateAnalysisPermissions",
            output: Output::Fields(&[
                Pick::new("AnalysisArn", "analysis_arn", Fallback::Str("")),
                Pick::new("AnalysisId", "analysis_id", Fallback::Arg("analysis_id")),
                Pick::new("Permissions", "permissions", Fallback::EmptyArray),
            ]),
        },
    },
];
