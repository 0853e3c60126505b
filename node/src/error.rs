use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("config error: {0}")]
    Config(String),

    #[error("session hub error: {0}")]
    Hub(#[from] hustings_websocket::HubError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
