//! Election node — configuration, logging, and hub wiring.
//!
//! The node is the construction site for a running election: it loads
//! configuration (TOML file plus overrides), initializes structured
//! logging, builds the election ledger from the configured roster, and
//! hands the shared hub state to the WebSocket server. There is exactly
//! one node per process, constructed explicitly and passed down; nothing
//! is reached through ambient globals.

pub mod config;
pub mod error;
pub mod logging;
pub mod node;

pub use config::{CandidateSpec, NodeConfig};
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use node::ElectionNode;
