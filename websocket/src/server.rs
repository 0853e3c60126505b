//! WebSocket session hub.
//!
//! Accepts observer connections at `/ws`. Each session is greeted with the
//! current tally, then serviced one request at a time. Every successful vote
//! publishes a fresh tally on the broadcast channel; a per-session forwarder
//! task delivers it to every connected observer, the voter's own session
//! included.

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::IntoResponse,
    routing::get,
    Router,
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{debug, info, warn};

use hustings_ledger::ElectionLedger;
use hustings_types::Timestamp;

use crate::error::HubError;
use crate::metrics::HubMetrics;
use crate::protocol::{ClientRequest, ServerMessage};
use crate::registry::{SessionId, SessionRegistry};

/// Capacity of the tally broadcast channel. A session that falls further
/// behind than this skips ahead; the next update carries the full tally.
const BROADCAST_CAPACITY: usize = 256;

/// Shared state for the session hub.
///
/// The ledger sits behind a single `RwLock`: the write half linearizes
/// every register/vote, the read half lets snapshot and audit reads run
/// concurrently without ever observing a half-applied vote.
pub struct HubState {
    ledger: RwLock<ElectionLedger>,
    updates_tx: broadcast::Sender<String>,
    sessions: RwLock<SessionRegistry>,
    /// Whether `get_audit` is answered. The audit view exposes raw voter
    /// identifiers, so deployments can switch it off.
    expose_audit: bool,
    pub metrics: HubMetrics,
}

impl HubState {
    /// Create hub state around an election ledger.
    pub fn new(ledger: ElectionLedger, expose_audit: bool) -> Self {
        let (updates_tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            ledger: RwLock::new(ledger),
            updates_tx,
            sessions: RwLock::new(SessionRegistry::new()),
            expose_audit,
            metrics: HubMetrics::new(),
        }
    }

    /// Number of currently connected sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Subscribe to tally update frames.
    pub fn subscribe_updates(&self) -> broadcast::Receiver<String> {
        self.updates_tx.subscribe()
    }
}

/// The session hub server, configured with a port and shared state.
pub struct WebSocketServer {
    pub port: u16,
    pub state: Arc<HubState>,
    pub serve_metrics: bool,
}

impl WebSocketServer {
    /// Create a server for the given shared state.
    pub fn new(port: u16, state: Arc<HubState>) -> Self {
        Self {
            port,
            state,
            serve_metrics: false,
        }
    }

    /// Also serve Prometheus metrics at `/metrics`.
    pub fn with_metrics(mut self) -> Self {
        self.serve_metrics = true;
        self
    }

    /// Start listening for WebSocket connections. Runs until the server
    /// fails or is shut down.
    pub async fn start(&self) -> Result<(), HubError> {
        let app = router(self.state.clone(), self.serve_metrics);
        let addr = format!("0.0.0.0:{}", self.port);
        info!("session hub listening on {addr}");
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(HubError::Bind)?;
        axum::serve(listener, app).await.map_err(HubError::Serve)?;
        Ok(())
    }
}

/// Build the hub router: the `/ws` route, plus `/metrics` when enabled.
pub fn router(state: Arc<HubState>, serve_metrics: bool) -> Router {
    let mut app = Router::new().route("/ws", get(ws_handler));
    if serve_metrics {
        app = app.route("/metrics", get(metrics_handler));
    }
    app.with_state(state)
}

/// Axum handler that upgrades an HTTP request to a WebSocket session.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<HubState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_session(socket, state))
}

async fn metrics_handler(State(state): State<Arc<HubState>>) -> String {
    state.metrics.encode()
}

/// Drive one observer session from accept to disconnect.
async fn handle_session(socket: WebSocket, state: Arc<HubState>) {
    let (ws_sender, mut ws_receiver) = socket.split();

    // Forwarder tasks share the sender with the request loop.
    let ws_sender = Arc::new(Mutex::new(ws_sender));

    let session_id = {
        let mut sessions = state.sessions.write().await;
        let id = sessions.insert();
        state.metrics.sessions_connected.set(sessions.len() as i64);
        id
    };
    debug!(session = session_id, "session connected");

    // Greet the session with the current tally.
    let initial = {
        let ledger = state.ledger.read().await;
        ServerMessage::InitialState(ledger.snapshot())
    };

    if send_frame(&ws_sender, &initial).await.is_ok() {
        // Deliver tally broadcasts to this session until its socket breaks.
        let forwarder = tokio::spawn(forward_updates(
            state.subscribe_updates(),
            ws_sender.clone(),
            session_id,
        ));

        while let Some(frame) = ws_receiver.next().await {
            let msg = match frame {
                Ok(msg) => msg,
                Err(e) => {
                    warn!(session = session_id, error = %e, "receive error");
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let reply = match serde_json::from_str::<ClientRequest>(&text) {
                        Ok(request) => dispatch(&state, request).await,
                        Err(e) => {
                            debug!(session = session_id, error = %e, "rejected malformed request");
                            state.metrics.rejections_total.inc();
                            ServerMessage::Error {
                                message: format!("invalid request: {e}"),
                            }
                        }
                    };
                    if send_frame(&ws_sender, &reply).await.is_err() {
                        break;
                    }
                }
                Message::Close(_) => {
                    debug!(session = session_id, "session sent close frame");
                    break;
                }
                Message::Ping(data) => {
                    let mut sender = ws_sender.lock().await;
                    let _ = sender.send(Message::Pong(data)).await;
                }
                _ => {}
            }
        }

        forwarder.abort();
    }

    {
        let mut sessions = state.sessions.write().await;
        sessions.remove(session_id);
        state.metrics.sessions_connected.set(sessions.len() as i64);
    }
    debug!(session = session_id, "session disconnected");
}

/// Process one request against the ledger and produce the direct reply.
///
/// A successful vote additionally publishes a fresh snapshot on the
/// broadcast channel for every connected session.
pub async fn dispatch(state: &HubState, request: ClientRequest) -> ServerMessage {
    match request {
        ClientRequest::Register { voter_id, name } => {
            let result = state.ledger.write().await.register(voter_id.clone(), &name);
            match &result {
                Ok(_) => {
                    state.metrics.registrations_total.inc();
                    info!(voter = %voter_id, "voter registered");
                }
                Err(e) => {
                    state.metrics.rejections_total.inc();
                    debug!(voter = %voter_id, error = %e, "registration rejected");
                }
            }
            ServerMessage::RegisterResult(result.into())
        }
        ClientRequest::Vote {
            voter_id,
            candidate_id,
        } => {
            let result = {
                let mut ledger = state.ledger.write().await;
                let result = ledger.vote(&voter_id, &candidate_id, Timestamp::now());
                if result.is_ok() {
                    // Published under the write guard, so observers see
                    // updates in tally order.
                    let frame = ServerMessage::ResultsUpdate(ledger.snapshot()).to_json();
                    if state.updates_tx.send(frame).is_ok() {
                        state.metrics.broadcasts_total.inc();
                    }
                }
                result
            };
            match &result {
                Ok(_) => {
                    state.metrics.votes_total.inc();
                    info!(voter = %voter_id, candidate = %candidate_id, "vote recorded");
                }
                Err(e) => {
                    state.metrics.rejections_total.inc();
                    debug!(voter = %voter_id, candidate = %candidate_id, error = %e, "vote rejected");
                }
            }
            ServerMessage::VoteResult(result.into())
        }
        ClientRequest::GetAudit => {
            if !state.expose_audit {
                debug!("audit request rejected: audit view disabled");
                return ServerMessage::Error {
                    message: "audit view is disabled on this node".to_string(),
                };
            }
            let entries = state.ledger.read().await.audit_log().to_vec();
            ServerMessage::Audit(entries)
        }
    }
}

/// Send one message on a shared socket sink. `Err` means the socket is gone.
async fn send_frame(
    sender: &Arc<Mutex<SplitSink<WebSocket, Message>>>,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    let mut guard = sender.lock().await;
    guard.send(Message::Text(message.to_json())).await
}

/// Forwarder task: relay tally broadcasts to one session.
///
/// A send failure ends only this session's delivery; other recipients each
/// have their own forwarder and are unaffected.
async fn forward_updates(
    mut rx: broadcast::Receiver<String>,
    ws_sender: Arc<Mutex<SplitSink<WebSocket, Message>>>,
    session_id: SessionId,
) {
    loop {
        match rx.recv().await {
            Ok(frame) => {
                let mut sender = ws_sender.lock().await;
                if sender.send(Message::Text(frame)).await.is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(session = session_id, missed = n, "session lagged behind tally updates");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
