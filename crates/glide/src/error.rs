//! Error types for the animation coordinator.

use thiserror::Error;

/// Result type for animation operations.
pub type Result<T, E = AnimError> = std::result::Result<T, E>;

/// Errors that can surface from animation sequencing.
///
/// `Canceled` is a control-flow signal, not a fault: it is produced when a
/// timer is torn down out of band and is suppressed by the agent at the point
/// an animation's lifecycle resolves. Everything else propagates to the host
/// unchanged.
#[derive(Error, Debug)]
pub enum AnimError {
    /// The timer sequence was canceled before it could run to completion.
    #[error("animate timer canceled")]
    Canceled,

    /// A user-supplied animation strategy failed.
    #[error("animation strategy failed: {0}")]
    Strategy(#[from] anyhow::Error),
}

impl AnimError {
    /// Returns true for the expected, silent cancellation outcome.
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }
}
