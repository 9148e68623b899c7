//! Error types for the clip player

use thiserror::Error;

/// Player errors
///
/// Range and readiness problems are never reported here; they degrade the
/// display instead (slider pinned to 0, range features disabled).
#[derive(Debug, Error)]
pub enum PlayerError {
    /// No media URL was configured
    #[error("No media source configured")]
    MissingSource,

    /// Fullscreen was requested but the element does not allow it
    #[error("Fullscreen is not allowed for this player")]
    FullscreenNotAllowed,

    /// Host refused a fullscreen request or exit
    #[error("Fullscreen error: {0}")]
    Fullscreen(String),

    /// Media element rejected a command
    #[error("Media error: {0}")]
    Media(String),

    /// DOM construction or wiring failed
    #[error("DOM error: {0}")]
    Dom(String),
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;
