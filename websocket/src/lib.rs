//! Live session hub for the election coordinator.
//!
//! Observers connect over a persistent WebSocket at `/ws` and:
//! - receive the current tally immediately on connect
//! - submit register / vote / audit requests
//! - receive a fresh tally broadcast after every successful vote

pub mod error;
pub mod metrics;
pub mod protocol;
pub mod registry;
pub mod server;

pub use error::HubError;
pub use metrics::HubMetrics;
pub use protocol::{ActionResult, ClientRequest, ServerMessage};
pub use registry::{SessionId, SessionRegistry};
pub use server::{router, HubState, WebSocketServer};
