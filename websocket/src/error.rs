use thiserror::Error;

/// Failures of the hub server itself (not of individual requests —
/// those are reported in-band as structured results).
#[derive(Debug, Error)]
pub enum HubError {
    #[error("failed to bind WebSocket listener: {0}")]
    Bind(std::io::Error),

    #[error("WebSocket server error: {0}")]
    Serve(std::io::Error),
}
