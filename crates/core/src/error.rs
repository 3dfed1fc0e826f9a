/// Domain errors raised by the portal core.
///
/// Network and file-system failures live in `portal_client`; this type only
/// covers shape validation and illegal state transitions.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}
