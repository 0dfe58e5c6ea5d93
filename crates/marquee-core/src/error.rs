use thiserror::Error;

/// Everything here is recoverable where it happens; none of these surface to
/// the host as a user-visible failure.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MotionError {
    /// A host capability (preference query, geometry, decoration widget) is
    /// unavailable. Callers fall back to the motion-allowed defaults.
    #[error("host capability unavailable: {0}")]
    MissingCapability(&'static str),

    /// The drawer holds no focusable elements; focus operations become no-ops.
    #[error("drawer has no focusable elements")]
    EmptyFocusSet,

    /// Cancel was invoked on an already-settled handle.
    #[error("handle already settled")]
    StaleHandle,
}
