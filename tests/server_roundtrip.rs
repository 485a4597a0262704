//! End-to-end tests of the stdio loop against a scripted QuickSight client.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quicksight_mcp::{QuickSightApi, QuickSightMcpServer, QuickSightService};
use serde_json::{json, Map, Value};
use tokio::io::BufReader;

const ACCOUNT: &str = "123456789012";

/// Answers each operation from its own queue and records every call.
#[derive(Default)]
struct ScriptedClient {
    responses: Mutex<HashMap<String, VecDeque<Result<Value, String>>>>,
    calls: Mutex<Vec<(String, Map<String, Value>)>>,
}

impl ScriptedClient {
    fn respond(self, operation: &str, response: Result<Value, String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(operation.to_string())
            .or_default()
            .push_back(response);
        self
    }

    fn calls_to(&self, operation: &str) -> Vec<Map<String, Value>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(op, _)| op == operation)
            .map(|(_, params)| params.clone())
            .collect()
    }
}

#[async_trait]
impl QuickSightApi for ScriptedClient {
    async fn call(&self, operation: &str, params: Map<String, Value>) -> eyre::Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((operation.to_string(), params));
        let next = self
            .responses
            .lock()
            .unwrap()
            .get_mut(operation)
            .and_then(VecDeque::pop_front);
        match next {
            Some(Ok(value)) => Ok(value),
            Some(Err(message)) => Err(eyre::eyre!(message)),
            None => Err(eyre::eyre!("unexpected call to {}", operation)),
        }
    }
}

/// Feeds `lines` to the server and returns every response line, parsed.
async fn exchange(client: Arc<ScriptedClient>, lines: &[Value]) -> Vec<Value> {
    let mut reader = tokio_test::io::Builder::new();
    for line in lines {
        reader.read(format!("{}\n", line).as_bytes());
    }
    let reader = BufReader::new(reader.build());

    let server = QuickSightMcpServer::new(QuickSightService::new(client, ACCOUNT));
    let mut output = Vec::new();
    server.serve(reader, &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn tool_call(id: u64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    })
}

/// The JSON body carried in the second content block of a tool result.
fn body(response: &Value) -> Value {
    let text = response["result"]["content"][1]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn test_session_handshake_and_listing() {
    let client = Arc::new(ScriptedClient::default());

    let responses = exchange(
        client,
        &[
            json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} }),
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
            json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }),
        ],
    )
    .await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "quicksight-mcp");

    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 48);
    let list_dashboards = tools.iter().find(|t| t["name"] == "list_dashboards").unwrap();
    assert_eq!(list_dashboards["annotations"]["readOnlyHint"], true);
    assert_eq!(list_dashboards["inputSchema"]["properties"]["limit"]["maximum"], 100);
}

#[tokio::test]
async fn test_list_tool_drains_then_pages() {
    let client = Arc::new(
        ScriptedClient::default()
            .respond(
                "ListDashboards",
                Ok(json!({
                    "DashboardSummaryList": [{ "DashboardId": "d1" }, { "DashboardId": "d2" }],
                    "NextToken": "page-2"
                })),
            )
            .respond(
                "ListDashboards",
                Ok(json!({ "DashboardSummaryList": [{ "DashboardId": "d3" }] })),
            ),
    );

    let responses = exchange(
        client.clone(),
        &[tool_call(3, "list_dashboards", json!({ "offset": 1, "limit": 1 }))],
    )
    .await;

    assert_eq!(responses[0]["result"]["isError"], false);
    assert_eq!(
        body(&responses[0]),
        json!({
            "status": "SUCCESS",
            "dashboards": [{ "DashboardId": "d2" }],
            "pagination": { "limit": 1, "offset": 1, "total": 3, "has_more": true, "next_offset": 2 }
        })
    );

    let calls = client.calls_to("ListDashboards");
    assert_eq!(calls.len(), 2);
    assert_eq!(Value::Object(calls[0].clone()), json!({ "AwsAccountId": ACCOUNT }));
    assert_eq!(
        Value::Object(calls[1].clone()),
        json!({ "AwsAccountId": ACCOUNT, "NextToken": "page-2" })
    );
}

#[tokio::test]
async fn test_upstream_failure_is_a_tool_error() {
    let client = Arc::new(ScriptedClient::default().respond(
        "DescribeDashboard",
        Err("An error occurred (ResourceNotFoundException) when calling the DescribeDashboard operation: not found".to_string()),
    ));

    let responses = exchange(
        client,
        &[tool_call(4, "describe_dashboard", json!({ "dashboard_id": "gone" }))],
    )
    .await;

    assert!(responses[0].get("error").is_none());
    assert_eq!(responses[0]["result"]["isError"], true);
    let body = body(&responses[0]);
    assert_eq!(body["status"], "FAILED");
    assert_eq!(body["error"]["code"], "ResourceNotFoundException");
}

#[tokio::test]
async fn test_write_tool_marshals_nested_parameters() {
    let client = Arc::new(ScriptedClient::default().respond(
        "CreateRefreshSchedule",
        Ok(json!({ "Status": 200, "Arn": "arn:schedule", "RequestId": "req-7" })),
    ));

    let responses = exchange(
        client.clone(),
        &[tool_call(
            5,
            "create_refresh_schedule",
            json!({
                "dataset_id": "orders",
                "schedule_id": "hourly",
                "schedule_frequency": { "Interval": "HOURLY" },
                "refresh_type": "INCREMENTAL_REFRESH"
            }),
        )],
    )
    .await;

    assert_eq!(
        body(&responses[0]),
        json!({ "status": "SUCCESS", "arn": "arn:schedule", "schedule_id": "hourly", "request_id": "req-7" })
    );
    assert_eq!(
        Value::Object(client.calls_to("CreateRefreshSchedule").remove(0)),
        json!({
            "AwsAccountId": ACCOUNT,
            "DataSetId": "orders",
            "Schedule": {
                "ScheduleId": "hourly",
                "ScheduleFrequency": { "Interval": "HOURLY" },
                "RefreshType": "INCREMENTAL_REFRESH"
            }
        })
    );
}

#[tokio::test]
async fn test_bad_lines_do_not_stop_the_loop() {
    let client = Arc::new(ScriptedClient::default());
    let mut reader = tokio_test::io::Builder::new();
    reader
        .read(b"this is not json\n")
        .read(b"{\"jsonrpc\":\"2.0\",\"id\":6,\"method\":\"tools/call\",\"params\":{\"name\":\"describe_theme\",\"arguments\":{\"theme_id\":7}}}\n")
        .read(b"{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"ping\"}\n");

    let server = QuickSightMcpServer::new(QuickSightService::new(client.clone(), ACCOUNT));
    let mut output = Vec::new();
    server
        .serve(BufReader::new(reader.build()), &mut output)
        .await
        .unwrap();

    let responses: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["id"], 6);
    assert_eq!(responses[1]["error"]["code"], -32602);
    assert_eq!(responses[2], json!({ "jsonrpc": "2.0", "id": 7, "result": {} }));
    assert!(client.calls_to("DescribeTheme").is_empty());
}
