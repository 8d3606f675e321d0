//! Entity change stream over a real WebSocket connection.

#![allow(clippy::panic)]

mod common;

use std::time::Duration;

use common::{SVSN, VSN, account, app_state, envelope, mint_params, reader};
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;
use vsn_indexer::api::build_app;
use vsn_indexer::domain::Deployment;

type Socket =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

async fn next_json(socket: &mut Socket) -> serde_json::Value {
    loop {
        let Ok(Some(Ok(msg))) = tokio::time::timeout(Duration::from_secs(5), socket.next()).await
        else {
            panic!("expected a websocket message");
        };
        if let Message::Text(text) = msg {
            let Ok(json) = serde_json::from_str(text.as_str()) else {
                panic!("message should be JSON");
            };
            return json;
        }
    }
}

#[tokio::test]
async fn subscribers_receive_only_matching_changes() {
    let state = app_state(reader(1_000, 0));
    let ingest = std::sync::Arc::clone(&state.ingest);
    let app = build_app(state);

    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("should bind an ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener should have an address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let Ok((mut socket, _)) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws")).await
    else {
        panic!("websocket handshake should succeed");
    };

    let subscribe = serde_json::json!({
        "id": "sub-1",
        "type": "command",
        "timestamp": "2026-01-01T00:00:00Z",
        "payload": { "command": "subscribe", "entity_types": ["SupplySnapshot"] }
    });
    let sent = socket.send(Message::text(subscribe.to_string())).await;
    assert!(sent.is_ok());

    let response = next_json(&mut socket).await;
    assert_eq!(response["type"], "response");
    assert_eq!(response["id"], "sub-1");

    let processed = ingest
        .ingest(
            Deployment::Vsn,
            vec![envelope(VSN, 1, 0x01, 0, "Mint", mint_params(1000))],
        )
        .await;
    assert!(processed.is_ok());

    let event = next_json(&mut socket).await;
    assert_eq!(event["type"], "event");
    assert_eq!(event["payload"]["deployment"], "vsn");
    assert_eq!(event["payload"]["entity_type"], "SupplySnapshot");
    assert_eq!(event["payload"]["data"]["amount"], "1000");
    assert_eq!(event["payload"]["data"]["allTimeMinted"], "1000");
}

#[tokio::test]
async fn scoped_subscription_skips_other_namespace() {
    let state = app_state(reader(0, 0));
    let ingest = std::sync::Arc::clone(&state.ingest);
    let app = build_app(state);
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("should bind an ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener should have an address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let Ok((mut socket, _)) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws")).await
    else {
        panic!("websocket handshake should succeed");
    };
    let subscribe = serde_json::json!({
        "id": "sub-svsn",
        "type": "command",
        "timestamp": "2026-01-01T00:00:00Z",
        "payload": { "command": "subscribe", "deployment": "svsn", "entity_types": ["Approval"] }
    });
    assert!(socket.send(Message::text(subscribe.to_string())).await.is_ok());
    let response = next_json(&mut socket).await;
    assert_eq!(response["payload"]["deployment"], "svsn");

    let approval = serde_json::json!({
        "owner": account(1),
        "spender": account(2),
        "amount": "7"
    });
    let token = ingest
        .ingest(
            Deployment::Vsn,
            vec![envelope(VSN, 1, 0x01, 0, "Approval", approval.clone())],
        )
        .await;
    assert!(token.is_ok());
    let vault = ingest
        .ingest(
            Deployment::Svsn,
            vec![envelope(SVSN, 2, 0x02, 0, "Approval", approval)],
        )
        .await;
    assert!(vault.is_ok());

    let event = next_json(&mut socket).await;
    assert_eq!(event["payload"]["deployment"], "svsn");
    assert_eq!(event["payload"]["entity_type"], "Approval");
}

#[tokio::test]
async fn malformed_command_gets_error_message() {
    let app = build_app(app_state(reader(0, 0)));
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("should bind an ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener should have an address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let Ok((mut socket, _)) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws")).await
    else {
        panic!("websocket handshake should succeed");
    };
    assert!(socket.send(Message::text("not json")).await.is_ok());

    let error = next_json(&mut socket).await;
    assert_eq!(error["type"], "error");
    assert_eq!(error["payload"]["code"], 400);
}
