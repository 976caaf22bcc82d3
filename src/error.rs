//! Error types returned across the shell's compositor-facing hooks.

use thiserror::Error;

/// Errors the shell can report back to its caller.
///
/// Protocol-level misuse is never fatal to the compositor: the offending
/// client resource is destroyed and the shell keeps running. Only
/// [`ShellError::Allocation`] should be surfaced to the client as an
/// out-of-memory protocol error.
#[derive(Debug, Error)]
pub enum ShellError {
    /// A client tried to attach a second role to a surface that already has one.
    #[error("surface already has a shell role assigned")]
    AlreadyHasRole,

    /// A client requested a role change on a surface currently locked into
    /// the `lock` or `screensaver` role.
    #[error("cannot reassign surface type")]
    CannotReassignRole,

    /// A non-helper client attempted to bind a privileged protocol.
    #[error("permission to bind {0} denied")]
    PermissionDenied(&'static str),

    /// A client attempted to bind the screensaver global a second time.
    #[error("interface object already bound")]
    AlreadyBound,

    /// Resize was requested with an edge combination that makes no sense
    /// (no edges, or both edges of the same axis).
    #[error("invalid resize edges")]
    InvalidResizeEdges,

    /// An allocation needed to service a request failed. This is the one
    /// variant that should be turned into a client-visible out-of-memory
    /// protocol error rather than just logged.
    #[error("allocation failure: {0}")]
    Allocation(&'static str),

    /// Spawning a supervised helper process failed.
    #[error("failed to launch helper process: {0}")]
    HelperLaunch(#[source] std::io::Error),

    /// The switcher grab was asked to install with no eligible surfaces to
    /// cycle through (§9).
    #[error("no eligible surfaces to switch between")]
    EmptySwitcherList,
}

pub type Result<T> = std::result::Result<T, ShellError>;
