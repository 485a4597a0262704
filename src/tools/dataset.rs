use super::doc::{GRANT, PERMISSIONS, REVOKE, TAGS};
use super::{Action, DefaultValue, Fallback, FieldSpec, FieldType, Output, Pick, ToolSpec};

const DATASET_ID: FieldSpec = FieldSpec::required(
    "dataset_id",
    "DataSetId",
    FieldType::String,
    "ID of the dataset",
);

const DEFINITION_FIELDS: [FieldSpec; 8] = [
    FieldSpec::required("name", "Name", FieldType::String, "Display name"),
    FieldSpec::required(
        "physical_table_map",
        "PhysicalTableMap",
        FieldType::Object,
        "Physical tables keyed by table ID (relational, custom SQL or S3 sources)",
    ),
    FieldSpec::required(
        "import_mode",
        "ImportMode",
        FieldType::String,
        "SPICE or DIRECT_QUERY",
    )
    .defaulted(DefaultValue::Str("SPICE")),
    FieldSpec::optional(
        "logical_table_map",
        "LogicalTableMap",
        FieldType::Object,
        "Logical tables keyed by ID (joins, transforms)",
    ),
    FieldSpec::optional("column_groups", "ColumnGroups", FieldType::Array, "Column groupings"),
    FieldSpec::optional("field_folders", "FieldFolders", FieldType::Object, "Folders for fields"),
    FieldSpec::optional(
        "row_level_permission_data_set",
        "RowLevelPermissionDataSet",
        FieldType::Object,
        "Dataset holding row-level security rules",
    ),
    FieldSpec::optional(
        "column_level_permission_rules",
        "ColumnLevelPermissionRules",
        FieldType::Array,
        "Column-level security rules",
    ),
];

const WRITE_OUTPUT: &[Pick] = &[
    Pick::new("Arn", "arn", Fallback::Str("")),
    Pick::new("DataSetId", "dataset_id", Fallback::Arg("dataset_id")),
    Pick::new("IngestionArn", "ingestion_arn", Fallback::Null),
    Pick::new("IngestionId", "ingestion_id", Fallback::Null),
];

pub(super) const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "list_datasets",
        description: "List datasets in the QuickSight account with pagination",
        fields: &[],
        action: Action::List {
            operation: "ListDataSets",
            source: "DataSetSummaries",
            key: "datasets",
            echo: &[],
            project: Some(&[
                Pick::new("DataSetId", "DataSetId", Fallback::Null),
                Pick::new("Name", "Name", Fallback::Null),
            ]),
        },
    },
    ToolSpec {
        name: "describe_dataset",
        description: "Get detailed information about a specific dataset, including its tables and columns",
        fields: &[DATASET_ID],
        action: Action::Call {
            operation: "DescribeDataSet",
            output: Output::Envelope {
                source: "DataSet",
                key: "dataset",
            },
        },
    },
    ToolSpec {
        name: "create_data_set",
        description: "Create a new QuickSight dataset",
        fields: &[
            DATASET_ID,
            DEFINITION_FIELDS[0],
            DEFINITION_FIELDS[1],
            DEFINITION_FIELDS[2],
            DEFINITION_FIELDS[3],
            DEFINITION_FIELDS[4],
            DEFINITION_FIELDS[5],
            DEFINITION_FIELDS[6],
            DEFINITION_FIELDS[7],
            FieldSpec::optional("permissions", "Permissions", FieldType::Array, PERMISSIONS),
            FieldSpec::optional("tags", "Tags", FieldType::Array, TAGS),
        ],
        action: Action::Call {
            operation: "CreateDataSet",
            output: Output::Fields(WRITE_OUTPUT),
        },
    },
    ToolSpec {
        name: "update_data_set",
        description: "Update an existing QuickSight dataset",
        fields: &[
            DATASET_ID,
            DEFINITION_FIELDS[0],
            DEFINITION_FIELDS[1],
            DEFINITION_FIELDS[2],
            DEFINITION_FIELDS[3],
            DEFINITION_FIELDS[4],
            DEFINITION_FIELDS[5],
            DEFINITION_FIELDS[6],
            DEFINITION_FIELDS[7],
        ],
        action: Action::Call {
            operation: "UpdateDataSet",
            output: Output::Fields(WRITE_OUTPUT),
        },
    },
    ToolSpec {
        name: "update_data_set_permissions",
        description: "Update permissions for a QuickSight dataset",
        fields: &[
            DATASET_ID,
            FieldSpec::optional("grant_permissions", "GrantPermissions", FieldType::Array, GRANT),
            FieldSpec::optional("revoke_permissions", "RevokePermissions", FieldType::Array, REVOKE),
        ],
        action: Action::Call {
            operation: "UpdateDataSetPermissions",
            output: Output::Fields(&[
                Pick::new("DataSetArn", "dataset_arn", Fallback::Str("")),
                Pick::new("DataSetId", "dataset_id", Fallback::Arg("dataset_id")),
            ]),
        },
    },
];
