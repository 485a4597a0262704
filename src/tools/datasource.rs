use super::doc::{GRANT, PERMISSIONS, REVOKE, TAGS};
use super::{Action, Fallback, FieldSpec, FieldType, Output, Pick, ToolSpec};

const DATASOURCE_ID: FieldSpec = FieldSpec::required(
    "datasource_id",
    "DataSourceId",
    FieldType::String,
    "ID of the data source",
);
const CREDENTIALS: FieldSpec = FieldSpec::optional(
    "credentials",
    "Credentials",
    FieldType::Object,
    "Credential pair or secret ARN used to connect",
);
const VPC: FieldSpec = FieldSpec::optional(
    "vpc_connection_properties",
    "VpcConnectionProperties",
    FieldType::Object,
    "VPC connection to use, {\"VpcConnectionArn\": ..}",
);
const SSL: FieldSpec = FieldSpec::optional(
    "ssl_properties",
    "SslProperties",
    FieldType::Object,
    "SSL settings, {\"DisableSsl\": bool}",
);

pub(super) const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "list_datasources",
        description: "List data sources in the QuickSight account with pagination",
        fields: &[],
        action: Action::List {
            operation: "ListDataSources",
            source: "DataSources",
            key: "datasources",
            echo: &[],
            project: Some(&[
                Pick::new("DataSourceId", "DataSourceId", Fallback::Null),
                Pick::new("Name", "Name", Fallback::Null),
                Pick::new("Type", "Type", Fallback::Null),
            ]),
        },
    },
    ToolSpec {
        name: "describe_datasource",
        description: "Get detailed information about a specific data source",
        fields: &[DATASOURCE_ID],
        action: Action::Call {
            operation: "DescribeDataSource",
            output: Output::Envelope {
                source: "DataSource",
                key: "datasource",
            },
        },
    },
    ToolSpec {
        name: "create_data_source",
        description: "Create a new QuickSight data source",
        fields: &[
            DATASOURCE_ID,
            FieldSpec::required("name", "Name", FieldType::String, "Display name"),
            FieldSpec::required(
                "type",
                "Type",
                FieldType::String,
                "Data source type, e.g. ATHENA, REDSHIFT, POSTGRESQL, S3",
            ),
            FieldSpec::required(
                "data_source_parameters",
                "DataSourceParameters",
                FieldType::Object,
                "Connection parameters for the data source type",
            ),
            CREDENTIALS,
            VPC,
            SSL,
            FieldSpec::optional("permissions", "Permissions", FieldType::Array, PERMISSIONS),
            FieldSpec::optional("tags", "Tags", FieldType::Array, TAGS),
        ],
        action: Action::Call {
            operation: "CreateDataSource",
            output: Output::Fields(&[
                Pick::new("Arn", "arn", Fallback::Str("")),
                Pick::new("DataSourceId", "datasource_id", Fallback::Arg("datasource_id")),
                Pick::new("CreationStatus", "creation_status", Fallback::Str("CREATION_IN_PROGRESS")),
            ]),
        },
    },
    ToolSpec {
        name: "update_data_source",
        description: "Update an existing QuickSight data source",
        fields: &[
            DATASOURCE_ID,
            FieldSpec::required("name", "Name", FieldType::String, "Display name"),
            FieldSpec::optional(
                "data_source_parameters",
                "DataSourceParameters",
                FieldType::Object,
                "Connection parameters for the data source type",
            ),
            CREDENTIALS,
            VPC,
            SSL,
        ],
        action: Action::Call {
            operation: "UpdateDataSource",
            output: Output::Fields(&[
                Pick::new("Arn", "arn", Fallback::Str("")),
                Pick::new("DataSourceId", "datasource_id", Fallback::Arg("datasource_id")),
                Pick::new("UpdateStatus", "update_status", Fallback::Str("UPDATE_IN_PROGRESS")),
            ]),
        },
    },
    ToolSpec {
        name: "update_data_source_permissions",
        description: "Update permissions for a QuickSight data source",
        fields: &[
            DATASOURCE_ID,
            FieldSpec::optional("grant_permissions", "GrantPermissions", FieldType::Array, GRANT),
            FieldSpec::optional("revoke_permissions", "RevokePermissions", FieldType::Array, REVOKE),
        ],
        action: Action::Call {
            operation: "UpdateDataSourcePermissions",
            output: Output::Fields(&[
                Pick::new("DataSourceArn", "datasource_arn", Fallback::Str("")),
                Pick::new("DataSourceId", "datasource_id", Fallback::Arg("datasource_id")),
            ]),
        },
    },
];
