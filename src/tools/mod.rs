//! Tool catalogue.
//!
//! Every tool is a row in a static table: its arguments, the QuickSight
//! operation it calls and how the response is reshaped. Marshalling and
//! schema generation are driven entirely by those rows.

use std::io::Write;

use crossterm::{queue, style};
use serde_json::{json, Map, Value};

use crate::error::{McpError, Result};
use crate::pagination::{PageRequest, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

mod analysis;
mod dashboard;
mod dataset;
mod datasource;
mod discovery;
mod embed;
mod ingestion;
mod search;
mod template;
mod theme;

const READONLY_OPS: [&str; 5] = ["List", "Describe", "Search", "Get", "Generate"];

/// Request parameter naming the account every call is scoped to.
pub const ACCOUNT_PARAM: &str = "AwsAccountId";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Boolean,
    Object,
    Array,
    StringArray,
}

impl FieldType {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::StringArray => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }

    fn schema(self) -> Value {
        match self {
            Self::String => json!({ "type": "string" }),
            Self::Integer => json!({ "type": "integer" }),
            Self::Boolean => json!({ "type": "boolean" }),
            Self::Object => json!({ "type": "object" }),
            Self::Array => json!({ "type": "array", "items": { "type": "object" } }),
            Self::StringArray => json!({ "type": "array", "items": { "type": "string" } }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Str(&'static str),
    Int(i64),
}

impl DefaultValue {
    fn to_value(self) -> Value {
        match self {
            Self::Str(s) => Value::from(s),
            Self::Int(n) => Value::from(n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// Dropped from the call when absent or empty.
    Optional,
    /// Filled in when absent or empty.
    Default(DefaultValue),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Top,
    Nested(&'static str),
}

/// Maps one tool argument onto one QuickSight request parameter.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub arg: &'static str,
    pub param: &'static str,
    pub ty: FieldType,
    pub presence: Presence,
    pub placement: Placement,
    pub description: &'static str,
}

impl FieldSpec {
    pub const fn required(
        arg: &'static str,
        param: &'static str,
        ty: FieldType,
        description: &'static str,
    ) -> Self {
        Self {
            arg,
            param,
            ty,
            presence: Presence::Required,
            placement: Placement::Top,
            description,
        }
    }

    pub const fn optional(
        arg: &'static str,
        param: &'static str,
        ty: FieldType,
        description: &'static str,
    ) -> Self {
        Self {
            presence: Presence::Optional,
            ..Self::required(arg, param, ty, description)
        }
    }

    pub const fn defaulted(mut self, value: DefaultValue) -> Self {
        self.presence = Presence::Default(value);
        self
    }

    pub const fn nested_in(mut self, parent: &'static str) -> Self {
        self.placement = Placement::Nested(parent);
        self
    }
}

/// Value used for an output key when the response does not carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Null,
    Str(&'static str),
    EmptyObject,
    EmptyArray,
    /// Echo the named tool argument.
    Arg(&'static str),
    /// Another path of the same response.
    Source(&'static str),
}

/// Copies `source` (a dotted path into the response) to output key `key`.
#[derive(Debug, Clone, Copy)]
pub struct Pick {
    pub source: &'static str,
    pub key: &'static str,
    pub fallback: Fallback,
}

impl Pick {
    pub const fn new(source: &'static str, key: &'static str, fallback: Fallback) -> Self {
        Self {
            source,
            key,
            fallback,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Output {
    /// `response[source]` (or `{}`) under `key`.
    Envelope {
        source: &'static str,
        key: &'static str,
    },
    Fields(&'static [Pick]),
}

#[derive(Debug, Clone, Copy)]
pub enum Action {
    Call {
        operation: &'static str,
        output: Output,
    },
    /// Drains `operation`, reading items from `source`, and returns one page
    /// of them under `key`. Arguments named in `echo` are copied into the
    /// body under their own names.
    List {
        operation: &'static str,
        source: &'static str,
        key: &'static str,
        project: Option<&'static [Pick]>,
        echo: &'static [&'static str],
    },
    /// Counts the items of each named list tool.
    Overview(&'static [(&'static str, &'static str)]),
}

#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
    pub action: Action,
}

/// Arguments of a tool call after validation and marshalling.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedCall {
    /// QuickSight request parameters, `AwsAccountId` included.
    pub params: Map<String, Value>,
    /// Raw tool arguments, used for output fallbacks.
    pub args: Map<String, Value>,
    pub page: Option<PageRequest>,
}

impl ToolSpec {
    pub fn operation(&self) -> Option<&'static str> {
        match self.action {
            Action::Call { operation, .. } | Action::List { operation, .. } => Some(operation),
            Action::Overview(_) => None,
        }
    }

    pub fn is_paginated(&self) -> bool {
        matches!(self.action, Action::List { .. })
    }

    pub fn is_read_only(&self) -> bool {
        match self.operation() {
            Some(operation) => READONLY_OPS.iter().any(|op| operation.starts_with(op)),
            None => true,
        }
    }

    /// Validates `arguments` and turns them into QuickSight request parameters.
    pub fn prepare(&self, arguments: &Value, account_id: &str) -> Result<PreparedCall> {
        let args = match arguments {
            Value::Null => Map::new(),
            Value::Object(map) => map.clone(),
            other => {
                return Err(McpError::InvalidRequest(format!(
                    "Arguments for '{}' must be an object, got {}",
                    self.name, other
                )))
            }
        };

        for name in args.keys() {
            let known = self.fields.iter().any(|f| f.arg == name)
                || (self.is_paginated() && (name == "offset" || name == "limit"));
            if !known {
                tracing::debug!(tool = self.name, argument = %name, "ignoring unknown argument");
            }
        }

        let mut params = Map::new();
        params.insert(ACCOUNT_PARAM.to_string(), Value::from(account_id));

        for field in self.fields {
            let provided = args.get(field.arg).filter(|v| !v.is_null());
            if let Some(value) = provided {
                if !field.ty.accepts(value) {
                    return Err(McpError::InvalidRequest(format!(
                        "Argument '{}' of '{}' has the wrong type: {}",
                        field.arg, self.name, value
                    )));
                }
            }

            let value = match (field.presence, provided.filter(|v| is_present(v))) {
                (_, Some(value)) => value.clone(),
                (Presence::Default(default), None) => default.to_value(),
                (Presence::Optional, None) => continue,
                (Presence::Required, None) => {
                    // Falsy but present values are still passed through when required
                    match provided {
                        Some(value) => value.clone(),
                        None => {
                            return Err(McpError::InvalidRequest(format!(
                                "Missing required argument '{}' for '{}'",
                                field.arg, self.name
                            )))
                        }
                    }
                }
            };

            match field.placement {
                Placement::Top => {
                    params.insert(field.param.to_string(), value);
                }
                Placement::Nested(parent) => {
                    let entry = params
                        .entry(parent.to_string())
                        .or_insert_with(|| Value::Object(Map::new()));
                    if let Value::Object(nested) = entry {
                        nested.insert(field.param.to_string(), value);
                    }
                }
            }
        }

        let page = if self.is_paginated() {
            let window = json!({
                "offset": args.get("offset").cloned().unwrap_or(Value::Null),
                "limit": args.get("limit").cloned().unwrap_or(Value::Null),
            });
            let request: PageRequest = serde_json::from_value(window).map_err(|e| {
                McpError::InvalidRequest(format!("Invalid offset/limit for '{}': {}", self.name, e))
            })?;
            Some(request)
        } else {
            None
        };

        Ok(PreparedCall { params, args, page })
    }

    /// JSON schema of the tool's arguments.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in self.fields {
            let mut schema = field.ty.schema();
            if let Value::Object(ref mut obj) = schema {
                obj.insert("description".to_string(), Value::from(field.description));
                if let Presence::Default(default) = field.presence {
                    obj.insert("default".to_string(), default.to_value());
                }
            }
            properties.insert(field.arg.to_string(), schema);
            if field.presence == Presence::Required {
                required.push(Value::from(field.arg));
            }
        }

        if self.is_paginated() {
            properties.insert(
                "offset".to_string(),
                json!({
                    "type": "integer",
                    "minimum": 0,
                    "default": 0,
                    "description": "Zero-based index of the first item to return"
                }),
            );
            properties.insert(
                "limit".to_string(),
                json!({
                    "type": "integer",
                    "minimum": 1,
                    "maximum": MAX_PAGE_LIMIT,
                    "default": DEFAULT_PAGE_LIMIT,
                    "description": "Number of items per page"
                }),
            );
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Entry for the `tools/list` response.
    pub fn listing(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
            "annotations": {
                "readOnlyHint": self.is_read_only(),
            },
        })
    }

    /// Writes a human-readable summary of the call about to be made.
    pub fn queue_description(&self, call: &PreparedCall, updates: &mut impl Write) -> std::io::Result<()> {
        queue!(
            updates,
            style::Print("Calling QuickSight:\n\n"),
            style::Print(format!("Tool: {}\n", self.name)),
        )?;
        match self.operation() {
            Some(operation) => queue!(updates, style::Print(format!("Operation: {}\n", operation)))?,
            None => queue!(updates, style::Print("Operation: overview\n"))?,
        }

        let parameters: Vec<_> = call
            .params
            .iter()
            .filter(|(name, _)| name.as_str() != ACCOUNT_PARAM)
            .collect();
        if !parameters.is_empty() {
            queue!(updates, style::Print("Parameters: \n"))?;
            for (name, value) in parameters {
                match value {
                    Value::String(s) => queue!(updates, style::Print(format!("- {}: {}\n", name, s)))?,
                    Value::Object(_) | Value::Array(_) => {
                        queue!(updates, style::Print(format!("- {}: {}\n", name, summarize(value))))?
                    }
                    _ => queue!(updates, style::Print(format!("- {}: {}\n", name, value)))?,
                }
            }
        }

        if let Some(page) = call.page {
            queue!(
                updates,
                style::Print(format!("Page: offset {}, limit {}\n", page.offset(), page.limit()))
            )?;
        }

        let access = if self.is_read_only() { "read-only" } else { "modifies resources" };
        queue!(updates, style::Print(format!("Access: {}", access)))?;
        Ok(())
    }
}

/// Mirrors the "truthy" checks QuickSight callers expect: null, empty
/// strings and collections, zero and `false` count as not given.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn summarize(value: &Value) -> String {
    match value {
        Value::Array(items) => format!("[{} item(s)]", items.len()),
        Value::Object(map) => {
            let keys: Vec<_> = map.keys().map(String::as_str).collect();
            format!("{{{}}}", keys.join(", "))
        }
        other => other.to_string(),
    }
}

/// Every tool the server exposes, in listing order.
pub fn registry() -> impl Iterator<Item = &'static ToolSpec> {
    [
        discovery::TOOLS,
        datasource::TOOLS,
        dataset::TOOLS,
        analysis::TOOLS,
        dashboard::TOOLS,
        ingestion::TOOLS,
        embed::TOOLS,
        search::TOOLS,
        template::TOOLS,
        theme::TOOLS,
    ]
    .into_iter()
    .flatten()
}

pub fn find(name: &str) -> Option<&'static ToolSpec> {
    registry().find(|tool| tool.name == name)
}

/// Shared descriptions for the permission fields most tools carry.
pub(crate) mod doc {
    pub const PERMISSIONS: &str =
        "Resource permissions, each {\"Principal\": ARN, \"Actions\": [..]}";
    pub const GRANT: &str = "Permissions to grant, each {\"Principal\": ARN, \"Actions\": [..]}";
    pub const REVOKE: &str = "Permissions to revoke, each {\"Principal\": ARN, \"Actions\": [..]}";
    pub const TAGS: &str = "Tags, each {\"Key\": .., \"Value\": ..}";
    pub const FILTERS: &str =
        "Search filters, each {\"Operator\": .., \"Name\": .., \"Value\": ..}";
}
