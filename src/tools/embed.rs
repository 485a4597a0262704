use super::{Action, DefaultValue, Fallback, FieldSpec, FieldType, Output, Pick, ToolSpec};

const SESSION_LIFETIME: FieldSpec = FieldSpec::optional(
    "session_lifetime_in_minutes",
    "SessionLifetimeInMinutes",
    FieldType::Integer,
    "Session duration in minutes (15-600)",
)
.defaulted(DefaultValue::Int(600));
const ALLOWED_DOMAINS: FieldSpec = FieldSpec::optional(
    "allowed_domains",
    "AllowedDomains",
    FieldType::StringArray,
    "Domains allowed to host the embedded content",
);
const EXPERIENCE: FieldSpec = FieldSpec::required(
    "experience_configuration",
    "ExperienceConfiguration",
    FieldType::Object,
    "What to embed, e.g. {\"Dashboard\": {\"InitialDashboardId\": ..}}",
);

const URL_OUTPUT: &[Pick] = &[
    Pick::new("EmbedUrl", "embed_url", Fallback::Str("")),
    Pick::new("Status", "http_status", Fallback::Null),
    Pick::new("RequestId", "request_id", Fallback::Null),
];

pub(super) const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: "generate_embed_url_for_anonymous_user",
        description: "Generate an embed URL for anonymous users (public dashboards)",
        fields: &[
            FieldSpec::required("namespace", "Namespace", FieldType::String, "QuickSight namespace"),
            FieldSpec::required(
                "authorized_resource_arns",
                "AuthorizedResourceArns",
                FieldType::StringArray,
                "ARNs of the resources the anonymous user may access",
            ),
            EXPERIENCE,
            SESSION_LIFETIME,
            ALLOWED_DOMAINS,
            FieldSpec::optional(
                "session_tags",
                "SessionTags",
                FieldType::Array,
                "Row-level security tags, each {\"Key\": .., \"Value\": ..}",
            ),
        ],
        action: Action::Call {
            operation: "GenerateEmbedUrlForAnonymousUser",
            output: Output::Fields(URL_OUTPUT),
        },
    },
    ToolSpec {
        name: "generate_embed_url_for_registered_user",
        description: "Generate an embed URL for registered QuickSight users",
        fields: &[
            FieldSpec::required("user_arn", "UserArn", FieldType::String, "ARN of the QuickSight user"),
            EXPERIENCE,
            SESSION_LIFETIME,
            ALLOWED_DOMAINS,
        ],
        action: Action::Call {
            operation: "GenerateEmbedUrlForRegisteredUser",
            output: Output::Fields(URL_OUTPUT),
        },
    },
    ToolSpec {
        name: "get_dashboard_embed_url",
        description: "Get an embed URL for a specific dashboard (legacy API)",
        fields: &[
            FieldSpec::required("dashboard_id", "DashboardId", FieldType::String, "Dashboard to embed"),
            FieldSpec::required(
                "identity_type",
                "IdentityType",
                FieldType::String,
                "QUICKSIGHT, IAM or ANONYMOUS",
            ),
            SESSION_LIFETIME,
            FieldSpec::optional(
                "undo_redo_disabled",
                "UndoRedoDisabled",
                FieldType::Boolean,
                "Hide the undo/redo buttons",
            ),
            FieldSpec::optional("reset_disabled", "ResetDisabled", FieldType::Boolean, "Hide the reset button"),
            FieldSpec::optional(
                "user_arn",
                "UserArn",
                FieldType::String,
                "User ARN, for the QUICKSIGHT identity type",
            ),
            FieldSpec::optional("namespace", "Namespace", FieldType::String, "QuickSight namespace"),
            FieldSpec::optional(
                "additional_dashboard_ids",
                "AdditionalDashboardIds",
                FieldType::StringArray,
                "Further dashboards the session may open",
            ),
        ],
        action: Action::Call {
            operation: "GetDashboardEmbedUrl",
            output: Output::Fields(URL_OUTPUT),
        },
    },
    ToolSpec {
        name: "get_session_embed_url",
        description: "Get an embed URL for a QuickSight console session",
        fields: &[
            FieldSpec::optional(
                "entry_point",
                "EntryPoint",
                FieldType::String,
                "Console path to open first, e.g. /start/dashboards",
            ),
            SESSION_LIFETIME,
            FieldSpec::optional(
                "user_arn",
                "UserArn",
                FieldType::String,
                "User ARN (the caller identity when omitted)",
            ),
        ],
        action: Action::Call {
            operation: "GetSessionEmbedUrl",
            output: Output::Fields(URL_OUTPUT),
        },
    },
];
