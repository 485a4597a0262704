use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::client::{aws_error_code, QuickSightApi};
use crate::pagination::{drain, list_page, DrainLimitExceeded, PageChunk, PaginationInfo};
use crate::tools::{self, Action, Fallback, Output, Pick, PreparedCall, ToolSpec};

const NEXT_TOKEN: &str = "NextToken";

/// Why a QuickSight call did not produce a result.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct Failure {
    pub message: String,
    /// AWS error code such as `ResourceNotFoundException`, when recognisable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let code = aws_error_code(&message).map(str::to_string);
        Self { message, code }
    }
}

impl From<eyre::Report> for Failure {
    fn from(report: eyre::Report) -> Self {
        Self::new(format!("{:#}", report))
    }
}

impl From<DrainLimitExceeded> for Failure {
    fn from(err: DrainLimitExceeded) -> Self {
        Self::new(err.to_string())
    }
}

/// Runs tool calls against one QuickSight account.
#[derive(Clone)]
pub struct QuickSightService {
    client: Arc<dyn QuickSightApi>,
    account_id: String,
}

impl QuickSightService {
    pub fn new(client: Arc<dyn QuickSightApi>, account_id: impl Into<String>) -> Self {
        Self {
            client,
            account_id: account_id.into(),
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub async fn call(&self, operation: &str, params: Map<String, Value>) -> Result<Value, Failure> {
        self.client
            .call(operation, params)
            .await
            .map_err(Failure::from)
    }

    /// Follows `NextToken` through every page of `operation`, collecting the
    /// array found under `source` in each response.
    pub async fn list_all(
        &self,
        operation: &str,
        params: &Map<String, Value>,
        source: &str,
    ) -> Result<Vec<Value>, Failure> {
        drain(|token| {
            let mut request = params.clone();
            if let Some(token) = token {
                request.insert(NEXT_TOKEN.to_string(), Value::String(token));
            }
            async move {
                let response = self.call(operation, request).await?;
                Ok(chunk(response, source))
            }
        })
        .await
    }

    /// Executes `spec` and returns the success body without its status.
    pub async fn execute(&self, spec: &ToolSpec, call: &PreparedCall) -> Result<Value, Failure> {
        let outcome = self.dispatch(spec, call).await;
        match &outcome {
            Ok(_) => tracing::info!(tool = spec.name, "tool call succeeded"),
            Err(failure) => tracing::error!(
                tool = spec.name,
                code = failure.code.as_deref().unwrap_or("-"),
                "tool call failed: {}",
                failure.message
            ),
        }
        outcome
    }

    async fn dispatch(&self, spec: &ToolSpec, call: &PreparedCall) -> Result<Value, Failure> {
        match spec.action {
            Action::Call { operation, output } => {
                let response = self.call(operation, call.params.clone()).await?;
                Ok(shape(output, &response, &call.args))
            }
            Action::List {
                operation,
                source,
                key,
                project,
                echo,
            } => {
                let request = call.page.unwrap_or_default();
                let page = list_page(|| self.list_all(operation, &call.params, source), request).await?;
                let items: Vec<Value> = match project {
                    Some(picks) => page
                        .items
                        .iter()
                        .map(|item| Value::Object(pick_all(picks, item, &call.args)))
                        .collect(),
                    None => page.items,
                };

                let mut body = echoed(echo, &call.args);
                body.insert(key.to_string(), Value::Array(items));
                body.insert("pagination".to_string(), json!(page.info));
                Ok(Value::Object(body))
            }
            Action::Overview(counts) => {
                let mut body = Map::new();
                for (count_key, list_tool) in counts {
                    let Some(Action::List { operation, source, .. }) =
                        tools::find(list_tool).map(|tool| tool.action)
                    else {
                        return Err(Failure::new(format!("{} is not a list tool", list_tool)));
                    };
                    let all = self.list_all(operation, &call.params, source).await?;
                    body.insert(count_key.to_string(), Value::from(all.len()));
                }
                Ok(Value::Object(body))
            }
        }
    }
}

/// Wraps an execution outcome in the uniform tool body. The flag is true
/// when the body reports a failure.
pub fn render(spec: &ToolSpec, call: &PreparedCall, outcome: Result<Value, Failure>) -> (Value, bool) {
    let mut body = Map::new();
    match outcome {
        Ok(result) => {
            body.insert("status".to_string(), Value::from("SUCCESS"));
            match result {
                Value::Object(fields) => body.extend(fields),
                other => {
                    body.insert("result".to_string(), other);
                }
            }
            (Value::Object(body), false)
        }
        Err(failure) => {
            body.insert("status".to_string(), Value::from("FAILED"));
            if let Action::List { key, echo, .. } = spec.action {
                let request = call.page.unwrap_or_default();
                body.extend(echoed(echo, &call.args));
                body.insert(key.to_string(), Value::Array(Vec::new()));
                body.insert("pagination".to_string(), json!(PaginationInfo::empty(request)));
            }
            body.insert("error".to_string(), json!(failure));
            (Value::Object(body), true)
        }
    }
}

fn echoed(names: &[&str], args: &Map<String, Value>) -> Map<String, Value> {
    names
        .iter()
        .map(|name| (name.to_string(), args.get(*name).cloned().unwrap_or(Value::Null)))
        .collect()
}

fn chunk(mut response: Value, source: &str) -> PageChunk<Value> {
    let items = match response.get_mut(source).map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };
    let next_token = response
        .get(NEXT_TOKEN)
        .and_then(Value::as_str)
        .map(str::to_string);
    PageChunk::new(items, next_token)
}

fn shape(output: Output, response: &Value, args: &Map<String, Value>) -> Value {
    match output {
        Output::Envelope { source, key } => {
            let inner = lookup(response, source)
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new()));
            json!({ key: inner })
        }
        Output::Fields(picks) => Value::Object(pick_all(picks, response, args)),
    }
}

fn pick_all(picks: &[Pick], response: &Value, args: &Map<String, Value>) -> Map<String, Value> {
    picks
        .iter()
        .map(|pick| {
            let value = lookup(response, pick.source)
                .cloned()
                .unwrap_or_else(|| fallback(pick.fallback, response, args));
            (pick.key.to_string(), value)
        })
        .collect()
}

fn fallback(fallback: Fallback, response: &Value, args: &Map<String, Value>) -> Value {
    match fallback {
        Fallback::Null => Value::Null,
        Fallback::Str(s) => Value::from(s),
        Fallback::EmptyObject => Value::Object(Map::new()),
        Fallback::EmptyArray => Value::Array(Vec::new()),
        Fallback::Arg(name) => args.get(name).cloned().unwrap_or(Value::Null),
        Fallback::Source(path) => lookup(response, path).cloned().unwrap_or(Value::Null),
    }
}

/// Resolves a dotted path such as `Ingestion.RowInfo`. Null counts as missing.
fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, key| current.get(key))
        .filter(|found| !found.is_null())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    const ACCOUNT: &str = "123456789012";

    #[derive(Default)]
    struct FakeClient {
        responses: Mutex<VecDeque<std::result::Result<Value, String>>>,
        calls: Mutex<Vec<(String, Map<String, Value>)>>,
    }

    impl FakeClient {
        fn scripted(responses: Vec<std::result::Result<Value, String>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::default(),
            })
        }

        fn calls(&self) -> Vec<(String, Map<String, Value>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QuickSightApi for FakeClient {
        async fn call(&self, operation: &str, params: Map<String, Value>) -> eyre::Result<Value> {
            self.calls.lock().unwrap().push((operation.to_string(), params));
            match self.responses.lock().unwrap().pop_front() {
                Some(Ok(value)) => Ok(value),
                Some(Err(message)) => Err(eyre::eyre!(message)),
                None => Err(eyre::eyre!("no scripted response for {}", operation)),
            }
        }
    }

    fn service(client: &Arc<FakeClient>) -> QuickSightService {
        QuickSightService::new(client.clone(), ACCOUNT)
    }

    async fn run(client: &Arc<FakeClient>, tool: &str, args: Value) -> (Value, bool) {
        let spec = tools::find(tool).unwrap();
        let call = spec.prepare(&args, ACCOUNT).unwrap();
        let outcome = service(client).execute(spec, &call).await;
        render(spec, &call, outcome)
    }

    fn analyses(range: std::ops::Range<usize>) -> Vec<Value> {
        range.map(|i| json!({ "AnalysisId": format!("a{i}") })).collect()
    }

    #[tokio::test]
    async fn test_list_all_follows_next_token() {
        let client = FakeClient::scripted(vec![
            Ok(json!({ "AnalysisSummaryList": analyses(0..2), "NextToken": "t1" })),
            Ok(json!({ "AnalysisSummaryList": analyses(2..3) })),
        ]);
        let mut params = Map::new();
        params.insert("AwsAccountId".to_string(), Value::from(ACCOUNT));

        let all = service(&client)
            .list_all("ListAnalyses", &params, "AnalysisSummaryList")
            .await
            .unwrap();

        assert_eq!(all, analyses(0..3));
        let calls = client.calls();
        assert_eq!(calls.len(), 2);
        assert!(!calls[0].1.contains_key("NextToken"));
        assert_eq!(calls[1].1["NextToken"], "t1");
        assert_eq!(calls[1].1["AwsAccountId"], ACCOUNT);
    }

    #[tokio::test]
    async fn test_list_tool_returns_requested_window() {
        let client = FakeClient::scripted(vec![
            Ok(json!({ "AnalysisSummaryList": analyses(0..10), "NextToken": "t1" })),
            Ok(json!({ "AnalysisSummaryList": analyses(10..20), "NextToken": "t2" })),
            Ok(json!({ "AnalysisSummaryList": analyses(20..25), "NextToken": "" })),
        ]);

        let (body, is_error) = run(&client, "list_analyses", json!({ "offset": 20, "limit": 10 })).await;

        assert!(!is_error);
        assert_eq!(body["status"], "SUCCESS");
        assert_eq!(body["analyses"], json!(analyses(20..25)));
        assert_eq!(
            body["pagination"],
            json!({ "limit": 10, "offset": 20, "total": 25, "has_more": false })
        );
    }

    #[tokio::test]
    async fn test_list_tool_first_page_has_next_offset() {
        let client = FakeClient::scripted(vec![Ok(json!({ "DataSetSummaries": [
            { "DataSetId": "d1", "Name": "Orders", "ImportMode": "SPICE" },
            { "DataSetId": "d2", "Name": "Returns", "ImportMode": "SPICE" },
            { "DataSetId": "d3", "ImportMode": "DIRECT_QUERY" }
        ] }))]);

        let (body, _) = run(&client, "list_datasets", json!({ "limit": 2 })).await;

        assert_eq!(
            body["datasets"],
            json!([{ "DataSetId": "d1", "Name": "Orders" }, { "DataSetId": "d2", "Name": "Returns" }])
        );
        assert_eq!(body["pagination"]["next_offset"], 2);
        assert_eq!(body["pagination"]["has_more"], true);
    }

    #[tokio::test]
    async fn test_list_failure_discards_partial_results() {
        let client = FakeClient::scripted(vec![
            Ok(json!({ "AnalysisSummaryList": analyses(0..10), "NextToken": "t1" })),
            Err("An error occurred (ThrottlingException) when calling the ListAnalyses operation: Rate exceeded".to_string()),
        ]);

        let (body, is_error) = run(&client, "list_analyses", json!({ "offset": 5 })).await;

        assert!(is_error);
        assert_eq!(body["status"], "FAILED");
        assert_eq!(body["analyses"], json!([]));
        assert_eq!(
            body["pagination"],
            json!({ "limit": 10, "offset": 5, "total": 0, "has_more": false })
        );
        assert_eq!(body["error"]["code"], "ThrottlingException");
        assert!(body["error"]["message"].as_str().unwrap().contains("Rate exceeded"));
    }

    #[tokio::test]
    async fn test_list_template_name_falls_back_to_id() {
        let client = FakeClient::scripted(vec![Ok(json!({ "TemplateSummaryList": [
            { "TemplateId": "monthly", "Name": "Monthly report" },
            { "TemplateId": "weekly" }
        ] }))]);

        let (body, _) = run(&client, "list_templates", json!({})).await;

        assert_eq!(
            body["templates"],
            json!([
                { "TemplateId": "monthly", "Name": "Monthly report" },
                { "TemplateId": "weekly", "Name": "weekly" }
            ])
        );
    }

    #[tokio::test]
    async fn test_list_dashboard_versions_echoes_dashboard_id() {
        let client = FakeClient::scripted(vec![
            Ok(json!({ "DashboardVersionSummaryList": [{ "VersionNumber": 1 }, { "VersionNumber": 2 }] })),
            Err("An error occurred (ResourceNotFoundException) when calling the ListDashboardVersions operation: missing".to_string()),
        ]);

        let (body, _) = run(&client, "list_dashboard_versions", json!({ "dashboard_id": "sales" })).await;

        assert_eq!(body["dashboard_id"], "sales");
        assert_eq!(body["versions"], json!([{ "VersionNumber": 1 }, { "VersionNumber": 2 }]));
        assert_eq!(client.calls()[0].1["DashboardId"], "sales");

        let (body, is_error) = run(&client, "list_dashboard_versions", json!({ "dashboard_id": "gone" })).await;

        assert!(is_error);
        assert_eq!(body["dashboard_id"], "gone");
        assert_eq!(body["versions"], json!([]));
    }

    #[tokio::test]
    async fn test_envelope_output() {
        let client = FakeClient::scripted(vec![
            Ok(json!({ "Status": 200, "DataSet": { "DataSetId": "orders", "ImportMode": "SPICE" } })),
            Ok(json!({ "Status": 200 })),
        ]);

        let (body, _) = run(&client, "describe_dataset", json!({ "dataset_id": "orders" })).await;
        assert_eq!(
            body,
            json!({ "status": "SUCCESS", "dataset": { "DataSetId": "orders", "ImportMode": "SPICE" } })
        );

        let (body, _) = run(&client, "describe_dataset", json!({ "dataset_id": "orders" })).await;
        assert_eq!(body, json!({ "status": "SUCCESS", "dataset": {} }));

        assert_eq!(client.calls()[0].0, "DescribeDataSet");
        assert_eq!(client.calls()[0].1["DataSetId"], "orders");
    }

    #[tokio::test]
    async fn test_fields_output_uses_fallbacks() {
        let client = FakeClient::scripted(vec![Ok(json!({ "Status": 202 }))]);

        let (body, _) = run(&client, "create_analysis", json!({ "analysis_id": "sales", "name": "Sales" })).await;

        assert_eq!(
            body,
            json!({
                "status": "SUCCESS",
                "arn": "",
                "analysis_id": "sales",
                "creation_status": "CREATION_IN_PROGRESS"
            })
        );
    }

    #[tokio::test]
    async fn test_fields_output_reads_nested_paths() {
        let client = FakeClient::scripted(vec![Ok(json!({
            "Ingestion": {
                "Arn": "arn:ingestion",
                "IngestionId": "run-1",
                "IngestionStatus": "COMPLETED",
                "RowInfo": { "RowsIngested": 42, "RowsDropped": 0 }
            },
            "RequestId": "req-1"
        }))]);

        let (body, _) = run(
            &client,
            "describe_ingestion",
            json!({ "dataset_id": "orders", "ingestion_id": "run-1" }),
        )
        .await;

        assert_eq!(body["ingestion_status"], "COMPLETED");
        assert_eq!(body["row_info"]["RowsIngested"], 42);
        assert_eq!(body["error_info"], json!({}));
        assert_eq!(body["created_time"], Value::Null);
        assert_eq!(body["request_id"], "req-1");
    }

    #[tokio::test]
    async fn test_call_failure_is_rendered() {
        let client = FakeClient::scripted(vec![Err(
            "An error occurred (ResourceNotFoundException) when calling the DescribeDashboard operation: Dashboard missing not found".to_string(),
        )]);

        let (body, is_error) = run(&client, "describe_dashboard", json!({ "dashboard_id": "missing" })).await;

        assert!(is_error);
        assert_eq!(
            body,
            json!({
                "status": "FAILED",
                "error": {
                    "message": "An error occurred (ResourceNotFoundException) when calling the DescribeDashboard operation: Dashboard missing not found",
                    "code": "ResourceNotFoundException"
                }
            })
        );
    }

    #[tokio::test]
    async fn test_overview_counts_every_listing() {
        let client = FakeClient::scripted(vec![
            Ok(json!({ "DataSetSummaries": [{}, {}], "NextToken": "more" })),
            Ok(json!({ "DataSetSummaries": [{}] })),
            Ok(json!({ "DataSources": [{}, {}] })),
            Ok(json!({ "AnalysisSummaryList": [] })),
            Ok(json!({ "DashboardSummaryList": [{}] })),
        ]);

        let (body, is_error) = run(&client, "quicksight_overview", Value::Null).await;

        assert!(!is_error);
        assert_eq!(
            body,
            json!({
                "status": "SUCCESS",
                "datasets_count": 3,
                "datasources_count": 2,
                "analyses_count": 0,
                "dashboards_count": 1
            })
        );
        let operations: Vec<_> = client.calls().into_iter().map(|(op, _)| op).collect();
        assert_eq!(
            operations,
            ["ListDataSets", "ListDataSets", "ListDataSources", "ListAnalyses", "ListDashboards"]
        );
    }

    #[test]
    fn test_failure_from_report_keeps_context() {
        let report = eyre::eyre!("An error occurred (AccessDeniedException) when calling ListThemes")
            .wrap_err("ListThemes failed");

        let failure = Failure::from(report);

        assert_eq!(failure.code.as_deref(), Some("AccessDeniedException"));
        assert!(failure.message.starts_with("ListThemes failed: "));
    }

    #[test]
    fn test_failure_without_code() {
        let failure = Failure::new("Unable to spawn 'aws'");

        assert_eq!(failure.code, None);
        assert_eq!(json!(failure), json!({ "message": "Unable to spawn 'aws'" }));
    }
}
