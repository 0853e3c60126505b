//! End-to-end tests exercising the full coordinator over real sockets:
//! node construction → axum server → WebSocket clients registering, voting,
//! and observing tally broadcasts.
//!
//! These tests wire together components that are normally only connected
//! inside `node.rs`, verifying the system works end-to-end — not just in
//! isolation.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use hustings_node::{ElectionNode, NodeConfig};
use hustings_websocket::router;

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Start a node's hub on an ephemeral local port and return its address.
async fn start_hub(config: NodeConfig) -> SocketAddr {
    let node = ElectionNode::new(config).expect("config is valid");
    let app = router(node.state(), false);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

async fn connect(addr: SocketAddr) -> WsClient {
    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws"))
        .await
        .expect("connect");
    ws
}

/// Receive the next text frame as JSON, skipping protocol-level ping/pong.
async fn recv_frame(ws: &mut WsClient) -> Value {
    loop {
        let msg = timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("stream ended")
            .expect("websocket error");
        match msg {
            Message::Text(text) => return serde_json::from_str(&text).expect("frame is JSON"),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("unexpected frame: {other:?}"),
        }
    }
}

async fn send_json(ws: &mut WsClient, payload: Value) {
    ws.send(Message::Text(payload.to_string()))
        .await
        .expect("send");
}

// ---------------------------------------------------------------------------
// 1. Connect handshake
// ---------------------------------------------------------------------------

#[tokio::test]
async fn initial_state_sent_on_connect() {
    let addr = start_hub(NodeConfig::default()).await;
    let mut ws = connect(addr).await;

    let frame = recv_frame(&mut ws).await;
    assert_eq!(frame["type"], "initial_state");
    assert_eq!(frame["data"]["total_votes"], 0);
    assert_eq!(frame["data"]["registered_voters"], 0);
    assert_eq!(frame["data"]["candidates"].as_array().unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// 2. Full voting flow over one session
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_vote_and_audit_flow() {
    let addr = start_hub(NodeConfig::default()).await;
    let mut ws = connect(addr).await;
    recv_frame(&mut ws).await; // initial_state

    send_json(
        &mut ws,
        json!({"action": "register", "voter_id": "TEST123", "name": "Tester"}),
    )
    .await;
    let frame = recv_frame(&mut ws).await;
    assert_eq!(frame["type"], "register_result");
    assert_eq!(frame["data"]["success"], true);

    // A successful vote produces both the direct reply and the broadcast;
    // their relative order on the voter's own socket is not fixed.
    send_json(
        &mut ws,
        json!({"action": "vote", "voter_id": "TEST123", "candidate_id": "c1"}),
    )
    .await;
    let first = recv_frame(&mut ws).await;
    let second = recv_frame(&mut ws).await;
    let (result, update) = if first["type"] == "vote_result" {
        (first, second)
    } else {
        (second, first)
    };
    assert_eq!(result["type"], "vote_result");
    assert_eq!(result["data"]["success"], true);
    assert_eq!(update["type"], "results_update");
    assert_eq!(update["data"]["total_votes"], 1);
    assert_eq!(update["data"]["voters_who_voted"], 1);
    assert_eq!(update["data"]["candidates"][0]["votes"], 1);

    // Second vote by the same voter is rejected and broadcasts nothing:
    // the next frame after its reply must be the audit response.
    send_json(
        &mut ws,
        json!({"action": "vote", "voter_id": "TEST123", "candidate_id": "c2"}),
    )
    .await;
    let rejected = recv_frame(&mut ws).await;
    assert_eq!(rejected["type"], "vote_result");
    assert_eq!(rejected["data"]["success"], false);

    send_json(&mut ws, json!({"action": "get_audit"})).await;
    let audit = recv_frame(&mut ws).await;
    assert_eq!(audit["type"], "audit");
    let entries = audit["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["candidate_id"], "c1");
    assert_eq!(entries[0]["real_voter_id"], "TEST123");
    assert_eq!(entries[0]["voter_name"], "Tester");
    assert_eq!(entries[0]["hashed_voter"].as_str().unwrap().len(), 16);
}

// ---------------------------------------------------------------------------
// 3. Broadcast fan-out across sessions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn successful_vote_updates_every_session() {
    let addr = start_hub(NodeConfig::default()).await;
    let mut voter = connect(addr).await;
    let mut observer = connect(addr).await;
    recv_frame(&mut voter).await; // initial_state
    recv_frame(&mut observer).await; // initial_state

    send_json(
        &mut voter,
        json!({"action": "register", "voter_id": "A", "name": "Alice"}),
    )
    .await;
    recv_frame(&mut voter).await; // register_result

    send_json(
        &mut voter,
        json!({"action": "vote", "voter_id": "A", "candidate_id": "c2"}),
    )
    .await;

    // The observer sent nothing, so its next frame can only be the broadcast.
    let update = recv_frame(&mut observer).await;
    assert_eq!(update["type"], "results_update");
    assert_eq!(update["data"]["total_votes"], 1);
    assert_eq!(update["data"]["candidates"][1]["votes"], 1);

    // The voter's own session receives the same broadcast alongside its reply.
    let mut saw_update = false;
    for _ in 0..2 {
        let frame = recv_frame(&mut voter).await;
        if frame["type"] == "results_update" {
            assert_eq!(frame["data"]["total_votes"], 1);
            saw_update = true;
        }
    }
    assert!(saw_update, "voter session never received the broadcast");
}

#[tokio::test]
async fn registration_is_shared_across_sessions() {
    let addr = start_hub(NodeConfig::default()).await;
    let mut first = connect(addr).await;
    let mut second = connect(addr).await;
    recv_frame(&mut first).await;
    recv_frame(&mut second).await;

    send_json(
        &mut first,
        json!({"action": "register", "voter_id": "A", "name": "Alice"}),
    )
    .await;
    assert_eq!(recv_frame(&mut first).await["data"]["success"], true);

    // The same id through another session hits the same ledger.
    send_json(
        &mut second,
        json!({"action": "register", "voter_id": "A", "name": "Alice"}),
    )
    .await;
    let frame = recv_frame(&mut second).await;
    assert_eq!(frame["type"], "register_result");
    assert_eq!(frame["data"]["success"], false);
}

// ---------------------------------------------------------------------------
// 4. Envelope rejection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_and_unknown_requests_get_error_replies() {
    let addr = start_hub(NodeConfig::default()).await;
    let mut ws = connect(addr).await;
    recv_frame(&mut ws).await;

    ws.send(Message::Text("not json at all".to_string()))
        .await
        .expect("send");
    let frame = recv_frame(&mut ws).await;
    assert_eq!(frame["type"], "error");

    send_json(&mut ws, json!({"action": "revoke_vote", "voter_id": "A"})).await;
    let frame = recv_frame(&mut ws).await;
    assert_eq!(frame["type"], "error");

    // The session survives rejection; a well-formed request still works.
    send_json(
        &mut ws,
        json!({"action": "register", "voter_id": "A", "name": "Alice"}),
    )
    .await;
    assert_eq!(recv_frame(&mut ws).await["data"]["success"], true);
}

// ---------------------------------------------------------------------------
// 5. Audit capability gating
// ---------------------------------------------------------------------------

#[tokio::test]
async fn audit_gated_by_config() {
    let config = NodeConfig {
        expose_audit: false,
        ..NodeConfig::default()
    };
    let addr = start_hub(config).await;
    let mut ws = connect(addr).await;
    recv_frame(&mut ws).await;

    send_json(&mut ws, json!({"action": "get_audit"})).await;
    let frame = recv_frame(&mut ws).await;
    assert_eq!(frame["type"], "error");
    assert!(frame["data"]["message"]
        .as_str()
        .unwrap()
        .contains("disabled"));
}
