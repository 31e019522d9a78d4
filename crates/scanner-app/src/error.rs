//! Host-side errors.

/// Failures in starting, driving or stopping the scanner loop.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("scanner already running")]
    AlreadyRunning,
    #[error("scanner not started")]
    NotStarted,
    #[error("scanner loop has stopped")]
    ChannelClosed,
    #[error("shared state lock poisoned")]
    LockPoisoned,
    #[error("failed to spawn scanner loop: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("scanner loop panicked")]
    LoopPanicked,
}

impl<T> From<std::sync::PoisonError<T>> for AppError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        AppError::LockPoisoned
    }
}
