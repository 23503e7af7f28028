//! Command utility types shared by the command crate and the binary.

/// Silent error - triggers exit 1 without message.
///
/// Returned by commands that already reported the failure (with any
/// status-specific hint) on stderr.
#[derive(Debug, thiserror::Error)]
#[error("")]
pub struct SilentError;

/// Check if an error was already reported to the operator.
pub fn is_silent(err: &anyhow::Error) -> bool {
    err.downcast_ref::<SilentError>().is_some()
}
