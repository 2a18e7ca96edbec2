//! Integration tests for the MCP endpoint, using a stub disclosure backend
//! so no network is involved.

use std::sync::Arc;

use actix_web::{test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};

use rongda_disclosure_server::mcp::tools::ToolRegistry;
use rongda_disclosure_server::mcp::{self, McpService, McpState};
use rongda_disclosure_server::rongda::{
    DisclosureSource, FinancialReport, RetrievalRequest, RongdaError,
};

/// Backend stub returning a fixed report list.
struct StubSource {
    reports: Vec<FinancialReport>,
}

#[async_trait]
impl DisclosureSource for StubSource {
    async fn search_disclosures(
        &self,
        _request: RetrievalRequest,
    ) -> Result<Vec<FinancialReport>, RongdaError> {
        Ok(self.reports.clone())
    }
}

/// Backend stub that always fails authentication.
struct LockedOutSource;

#[async_trait]
impl DisclosureSource for LockedOutSource {
    async fn search_disclosures(
        &self,
        _request: RetrievalRequest,
    ) -> Result<Vec<FinancialReport>, RongdaError> {
        Err(RongdaError::authentication("credentials rejected"))
    }
}

fn sample_report() -> FinancialReport {
    FinancialReport {
        title: "平安银行2024年年度报告".to_string(),
        content: "本行财报显示".to_string(),
        downpath: "https://example.com/annual.pdf".to_string(),
        htmlpath: None,
        date_str: "2025-03-28".to_string(),
        security_code: "000001 平安银行".to_string(),
        notice_type_name: vec!["年报".to_string()],
    }
}

fn state_with(source: Arc<dyn DisclosureSource>) -> web::Data<Arc<McpState>> {
    let registry = ToolRegistry::new(source);
    web::Data::new(Arc::new(McpState::new(McpService::new(registry))))
}

async fn rpc_call(state: web::Data<Arc<McpState>>, body: Value) -> Value {
    let app = test::init_service(App::new().app_data(state).configure(mcp::config)).await;
    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(body)
        .to_request();
    test::call_and_read_body_json(&app, req).await
}

#[actix_web::test]
async fn ping_answers_ok() {
    let state = state_with(Arc::new(StubSource { reports: vec![] }));
    let response = rpc_call(state, json!({ "jsonrpc": "2.0", "method": "ping", "id": 1 })).await;

    assert_eq!(response["result"]["ok"], true);
    assert_eq!(response["id"], 1);
}

#[actix_web::test]
async fn initialize_reports_protocol_and_tools_capability() {
    let state = state_with(Arc::new(StubSource { reports: vec![] }));
    let response = rpc_call(
        state,
        json!({
            "jsonrpc": "2.0",
            "method": "initialize",
            "id": 1,
            "params": {
                "protocolVersion": "2024-11-05",
                "clientInfo": { "name": "test-client", "version": "0.1.0" }
            }
        }),
    )
    .await;

    assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
    assert!(response["result"]["serverInfo"]["name"].is_string());
    assert_eq!(response["result"]["capabilities"]["tools"]["listChanged"], false);
}

#[actix_web::test]
async fn unsupported_jsonrpc_version_is_rejected() {
    let state = state_with(Arc::new(StubSource { reports: vec![] }));
    let response =
        rpc_call(state, json!({ "jsonrpc": "1.0", "method": "ping", "id": 1 })).await;

    assert_eq!(response["error"]["code"], -32600);
}

#[actix_web::test]
async fn unknown_method_is_method_not_found() {
    let state = state_with(Arc::new(StubSource { reports: vec![] }));
    let response =
        rpc_call(state, json!({ "jsonrpc": "2.0", "method": "resources/list", "id": 7 })).await;

    assert_eq!(response["error"]["code"], -32601);
    assert_eq!(response["id"], 7);
}

#[actix_web::test]
async fn notifications_get_202_and_no_body() {
    let state = state_with(Arc::new(StubSource { reports: vec![] }));
    let app = test::init_service(App::new().app_data(state).configure(mcp::config)).await;

    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 202);
}

#[actix_web::test]
async fn tools_list_contains_the_disclosure_tool() {
    let state = state_with(Arc::new(StubSource { reports: vec![] }));
    let response =
        rpc_call(state, json!({ "jsonrpc": "2.0", "method": "tools/list", "id": 2 })).await;

    let tools = response["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "search_disclosure_documents");
    assert!(tools[0]["inputSchema"]["properties"]["company_name"].is_object());
}

#[actix_web::test]
async fn tool_call_returns_reports_as_json_text() {
    let state = state_with(Arc::new(StubSource {
        reports: vec![sample_report()],
    }));
    let response = rpc_call(
        state,
        json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "id": 3,
            "params": {
                "name": "search_disclosure_documents",
                "arguments": { "company_name": "平安银行", "key_words": ["财报"] }
            }
        }),
    )
    .await;

    let result = &response["result"];
    assert_eq!(result["isError"], false);

    let text = result["content"][0]["text"].as_str().unwrap();
    let reports: Value = serde_json::from_str(text).unwrap();
    assert_eq!(reports[0]["title"], "平安银行2024年年度报告");
    assert_eq!(reports[0]["security_code"], "000001 平安银行");
    assert_eq!(reports[0]["dateStr"], "2025-03-28");
}

#[actix_web::test]
async fn tool_call_with_blank_company_name_is_a_tool_error() {
    let state = state_with(Arc::new(StubSource { reports: vec![] }));
    let response = rpc_call(
        state,
        json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "id": 4,
            "params": {
                "name": "search_disclosure_documents",
                "arguments": { "company_name": "  ", "key_words": [] }
            }
        }),
    )
    .await;

    assert_eq!(response["result"]["isError"], true);
}

#[actix_web::test]
async fn tool_call_with_missing_arguments_is_a_tool_error() {
    let state = state_with(Arc::new(StubSource { reports: vec![] }));
    let response = rpc_call(
        state,
        json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "id": 5,
            "params": { "name": "search_disclosure_documents" }
        }),
    )
    .await;

    assert_eq!(response["result"]["isError"], true);
}

#[actix_web::test]
async fn unknown_tool_name_is_a_tool_error() {
    let state = state_with(Arc::new(StubSource { reports: vec![] }));
    let response = rpc_call(
        state,
        json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "id": 6,
            "params": { "name": "download_documents", "arguments": {} }
        }),
    )
    .await;

    assert_eq!(response["result"]["isError"], true);
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("search_disclosure_documents"));
}

#[actix_web::test]
async fn authentication_failure_surfaces_as_tool_error() {
    let state = state_with(Arc::new(LockedOutSource));
    let response = rpc_call(
        state,
        json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "id": 8,
            "params": {
                "name": "search_disclosure_documents",
                "arguments": { "company_name": "平安银行", "key_words": ["财报"] }
            }
        }),
    )
    .await;

    assert_eq!(response["result"]["isError"], true);
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("authentication failed"));
}
