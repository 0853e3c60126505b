//! Node wiring — builds the ledger from config and runs the session hub.

use std::sync::Arc;
use tracing::info;

use hustings_ledger::ElectionLedger;
use hustings_websocket::{HubState, WebSocketServer};

use crate::config::NodeConfig;
use crate::error::NodeError;

/// One running election: the ledger plus the hub that serves it.
///
/// Explicitly constructed and lifetime-scoped. There is exactly one per
/// process, but nothing about it is a global.
pub struct ElectionNode {
    config: NodeConfig,
    state: Arc<HubState>,
}

impl ElectionNode {
    /// Build a node from configuration. Fails on an invalid roster.
    pub fn new(config: NodeConfig) -> Result<Self, NodeError> {
        config.validate()?;
        let ledger = ElectionLedger::new(config.roster());
        let state = Arc::new(HubState::new(ledger, config.expose_audit));
        Ok(Self { config, state })
    }

    /// Shared hub state, for serving or inspection.
    pub fn state(&self) -> Arc<HubState> {
        self.state.clone()
    }

    /// Run the session hub until it fails or the process receives ctrl-c.
    pub async fn run(&self) -> Result<(), NodeError> {
        let mut server = WebSocketServer::new(self.config.port, self.state.clone());
        if self.config.enable_metrics {
            server = server.with_metrics();
        }

        info!(
            port = self.config.port,
            candidates = self.config.candidates.len(),
            audit = self.config.expose_audit,
            "election open"
        );

        tokio::select! {
            result = server.start() => Ok(result?),
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received, closing the election");
                Ok(())
            }
        }
    }
}
