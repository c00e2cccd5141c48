use thiserror::Error;

/// Failures reported by a [`Transport`](crate::repository::Transport).
///
/// The submission controller does not inspect the variant: every failure is
/// routed to the error notification the same way.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("payload rejected with status {status}")]
    Rejected { status: u16 },
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("submit handler is already installed on this form")]
    HandlerAlreadyInstalled,
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
