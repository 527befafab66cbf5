//! Error types for the ZXArt browser

use zxsource::MediaSourceError;

/// Result type alias for lifecycle and flow operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised outside of browse/resolve
///
/// Browse and resolve return [`MediaSourceError`] directly, as the host
/// expects.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Source(#[from] MediaSourceError),

    /// Configuration error (from zxconfig/anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),
}
