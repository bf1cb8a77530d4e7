//! End-to-end runs of the echo / send / check script against a mock
//! smshinetd endpoint.

use std::time::Duration;

use mockito::{Matcher, Mock, Server, ServerGuard};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use url::Url;

use smshinet_cli::demo::{self, DemoOptions};
use smshinet_cli::rpc::{CallError, RpcClient};
use smshinet_cli::sms::SmsClient;

fn sms_client(server: &ServerGuard) -> SmsClient {
    let endpoint = Url::parse(&format!("{}/jsonrpc", server.url())).unwrap();
    SmsClient::new(RpcClient::new(endpoint))
}

fn options(recipient: &str, message: &str) -> DemoOptions {
    DemoOptions {
        recipient: recipient.to_string(),
        message: message.to_string(),
        dry_run: false,
        status_delay: Duration::ZERO,
    }
}

/// Mock one method call, matched by method name and params.
async fn mock_method(
    server: &mut ServerGuard,
    method: &str,
    params: Value,
    response: Value,
) -> Mock {
    server
        .mock("POST", "/jsonrpc")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(response.to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn test_send_then_check_status() {
    let mut server = Server::new_async().await;
    let echo = mock_method(
        &mut server,
        "Echo.Echo",
        json!({"in": "TEST"}),
        json!({"jsonrpc": "2.0", "id": 0, "result": "TEST"}),
    )
    .await;
    let send = mock_method(
        &mut server,
        "SMSHiNet.SendTextSMS",
        json!({"recipient": "0912345678", "message": "hello"}),
        json!({"jsonrpc": "2.0", "id": 1, "result": "MSGID123"}),
    )
    .await;
    let check = mock_method(
        &mut server,
        "SMSHiNet.CheckTextStatus",
        json!("MSGID123"),
        json!({"jsonrpc": "2.0", "id": 2, "result": {"status": "DELIVERED"}}),
    )
    .await;

    let client = sms_client(&server);
    let mut out = Vec::new();
    demo::run(&client, &options("0912345678", "hello"), &mut out)
        .await
        .unwrap();

    echo.assert_async().await;
    send.assert_async().await;
    check.assert_async().await;
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "\"TEST\"\n\"MSGID123\", wait for 0 secs to check\n{\"status\":\"DELIVERED\"}\n"
    );
}

#[tokio::test]
async fn test_message_id_object_is_fed_back_verbatim() {
    let mut server = Server::new_async().await;
    let _echo = mock_method(
        &mut server,
        "Echo.Echo",
        json!({"in": "TEST"}),
        json!({"jsonrpc": "2.0", "id": 0, "result": "TEST"}),
    )
    .await;
    let _send = mock_method(
        &mut server,
        "SMSHiNet.SendTextSMS",
        json!({"recipient": "0912345678", "message": "jsonrpc test"}),
        json!({"jsonrpc": "2.0", "id": 1, "result": {"MessageID": "0A1B2C"}}),
    )
    .await;
    let check = mock_method(
        &mut server,
        "SMSHiNet.CheckTextStatus",
        json!({"MessageID": "0A1B2C"}),
        json!({"jsonrpc": "2.0", "id": 2, "result": {"Success": true, "Error": ""}}),
    )
    .await;

    let client = sms_client(&server);
    let mut out = Vec::new();
    let run = DemoOptions {
        status_delay: Duration::ZERO,
        ..DemoOptions::new("0912345678")
    };
    demo::run(&client, &run, &mut out).await.unwrap();

    check.assert_async().await;
    let printed = String::from_utf8(out).unwrap();
    let last: Value = serde_json::from_str(printed.lines().last().unwrap()).unwrap();
    assert_eq!(last, json!({"Success": true, "Error": ""}));
}

#[tokio::test]
async fn test_dry_run_only_echoes() {
    let mut server = Server::new_async().await;
    let echo = mock_method(
        &mut server,
        "Echo.Echo",
        json!({"in": "TEST"}),
        json!({"jsonrpc": "2.0", "id": 0, "result": "TEST"}),
    )
    .await;
    let send = server
        .mock("POST", "/jsonrpc")
        .match_body(Matcher::PartialJson(json!({"method": "SMSHiNet.SendTextSMS"})))
        .expect(0)
        .create_async()
        .await;

    let client = sms_client(&server);
    let mut run = options("0912345678", "hello");
    run.dry_run = true;
    let mut out = Vec::new();
    demo::run(&client, &run, &mut out).await.unwrap();

    echo.assert_async().await;
    send.assert_async().await;
    assert_eq!(String::from_utf8(out).unwrap(), "\"TEST\"\n");
}

#[tokio::test]
async fn test_send_failure_stops_before_status_check() {
    let mut server = Server::new_async().await;
    let _echo = mock_method(
        &mut server,
        "Echo.Echo",
        json!({"in": "TEST"}),
        json!({"jsonrpc": "2.0", "id": 0, "result": "TEST"}),
    )
    .await;
    let _send = mock_method(
        &mut server,
        "SMSHiNet.SendTextSMS",
        json!({"recipient": "12", "message": "hello"}),
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32000, "message": "Telphone number format error"}
        }),
    )
    .await;
    let check = server
        .mock("POST", "/jsonrpc")
        .match_body(Matcher::PartialJson(json!({"method": "SMSHiNet.CheckTextStatus"})))
        .expect(0)
        .create_async()
        .await;

    let client = sms_client(&server);
    let mut out = Vec::new();
    let err = demo::run(&client, &options("12", "hello"), &mut out)
        .await
        .unwrap_err();

    check.assert_async().await;
    match err.downcast_ref::<CallError>() {
        Some(CallError::Rpc { code, message, .. }) => {
            assert_eq!(*code, -32000);
            assert_eq!(message, "Telphone number format error");
        }
        other => panic!("Expected Rpc error, got {:?}", other),
    }
    assert_eq!(String::from_utf8(out).unwrap(), "\"TEST\"\n");
}
