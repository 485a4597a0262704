use super::{Action, DefaultValue, Fallback, FieldSpec, FieldType, Output, Pick, ToolSpec};

const DATASET_ID: FieldSpec = FieldSpec::required(
    "dataset_id",
    "DataSetId",
    FieldType::String,
    "ID of the SPICE dataset",
);
const INGESTION_ID: FieldSpec = FieldSpec::required(
    "ingestion_id",
    "IngestionId",
    FieldType::String,
    "ID of the ingestion job",
);

const SCHEDULE_FIELDS: &[FieldSpec] = &[
    DATASET_ID,
    FieldSpec::required("schedule_id", "ScheduleId", FieldType::String, "ID of the refresh schedule")
        .nested_in("Schedule"),
    FieldSpec::required(
        "schedule_frequency",
        "ScheduleFrequency",
        FieldType::Object,
        "Frequency settings: Interval, RefreshOnDay, Timezone, TimeOfTheDay",
    )
    .nested_in("Schedule"),
    FieldSpec::optional(
        "start_after_date_time",
        "StartAfterDateTime",
        FieldType::String,
        "ISO 8601 time after which the schedule starts",
    )
    .nested_in("Schedule"),
    FieldSpec::required(
        "refresh_type",
        "RefreshType",
        FieldType::String,
        "FULL_REFRESH or INCREMENTAL_REFRESH",
    )
    .defaulted(DefaultValue::Str("FULL_REFRESH"))
    .nested_in("Schedule"),
];

const SCHEDULE_OUTPUT: &[Pick] = &[
    Pick::new("Arn", "arn", Fallback::Null),
    Pick::new("ScheduleId", "schedule_id", Fallback::Arg("schedule_id")),
    Pick::new("RequestId", "request_id", Fallback::Null),
];

pub(super) const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "create_ingestion",
        description: "Create a data ingestion job for a SPICE dataset",
        fields: &[
            DATASET_ID,
            INGESTION_ID,
            FieldSpec::required(
                "ingestion_type",
                "IngestionType",
                FieldType::String,
                "FULL_REFRESH or INCREMENTAL_REFRESH",
            )
            .defaulted(DefaultValue::Str("FULL_REFRESH")),
        ],
        action: Action::Call {
            operation: "CreateIngestion",
            output: Output::Fields(&[
                Pick::new("Arn", "arn", Fallback::Str("")),
                Pick::new("IngestionId", "ingestion_id", Fallback::Arg("ingestion_id")),
                Pick::new("IngestionStatus", "ingestion_status", Fallback::Str("INITIALIZED")),
                Pick::new("RequestId", "request_id", Fallback::Null),
            ]),
        },
    },
    ToolSpec {
        name: "describe_ingestion",
        description: "Get status and details of a data ingestion job",
        fields: &[DATASET_ID, INGESTION_ID],
        action: Action::Call {
            operation: "DescribeIngestion",
            output: Output::Fields(&[
                Pick::new("Ingestion.Arn", "arn", Fallback::Null),
                Pick::new("Ingestion.IngestionId", "ingestion_id", Fallback::Arg("ingestion_id")),
                Pick::new("Ingestion.IngestionStatus", "ingestion_status", Fallback::Null),
                Pick::new("Ingestion.RequestSource", "request_source", Fallback::Null),
                Pick::new("Ingestion.RequestType", "ingestion_type", Fallback::Null),
                Pick::new("Ingestion.CreatedTime", "created_time", Fallback::Null),
                Pick::new("Ingestion.IngestionTimeInSeconds", "ingestion_time_in_seconds", Fallback::Null),
                Pick::new("Ingestion.IngestionSizeInBytes", "ingestion_size_in_bytes", Fallback::Null),
                Pick::new("Ingestion.RowInfo", "row_info", Fallback::EmptyObject),
                Pick::new("Ingestion.ErrorInfo", "error_info", Fallback::EmptyObject),
                Pick::new("RequestId", "request_id", Fallback::Null),
            ]),
        },
    },
    ToolSpec {
        name: "cancel_ingestion",
        description: "Cancel a running data ingestion job",
        fields: &[DATASET_ID, INGESTION_ID],
        action: Action::Call {
            operation: "CancelIngestion",
            output: Output::Fields(&[
                Pick::new("Arn", "arn", Fallback::Null),
                Pick::new("IngestionId", "ingestion_id", Fallback::Arg("ingestion_id")),
                Pick::new("RequestId", "request_id", Fallback::Null),
            ]),
        },
    },
    ToolSpec {
        name: "list_refresh_schedules",
        description: "List the refresh schedules of a dataset with pagination",
        fields: &[DATASET_ID],
        action: Action::List {
            operation: "ListRefreshSchedules",
            source: "RefreshSchedules",
            key: "refresh_schedules",
            echo: &[],
            project: Some(&[
                Pick::new("ScheduleId", "ScheduleId", Fallback::Null),
                Pick::new("ScheduleFrequency", "ScheduleFrequency", Fallback::EmptyObject),
                Pick::new("StartAfterDateTime", "StartAfterDateTime", Fallback::Null),
                Pick::new("RefreshType", "RefreshType", Fallback::Null),
                Pick::new("Arn", "Arn", Fallback::Null),
            ]),
        },
    },
    ToolSpec {
        name: "create_refresh_schedule",
        description: "Create a refresh schedule for automatic SPICE data updates",
        fields: SCHEDULE_FIELDS,
        action: Action::Call {
            operation: "CreateRefreshSchedule",
            output: Output::Fields(SCHEDULE_OUTPUT),
        },
    },
    ToolSpec {
        name: "update_refresh_schedule",
        description: "Update an existing refresh schedule",
        fields: SCHEDULE_FIELDS,
        action: Action::Call {
            operation: "UpdateRefreshSchedule",
            output: Output::Fields(SCHEDULE_OUTPUT),
        },
    },
];
