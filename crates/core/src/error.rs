use std::path::PathBuf;

/// Result alias that carries the custom [`ResourceError`] type.
pub type Result<T> = std::result::Result<T, ResourceError>;

/// The kind of native resource an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Font,
    Sfx,
    Music,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Font => "font",
            Self::Sfx => "sfx",
            Self::Music => "music",
        };
        f.write_str(name)
    }
}

/// Failure taxonomy for the resource layer.
///
/// Every variant is raised at the point of detection and propagated to the
/// immediate caller; nothing in this crate catches and retries. Whether a
/// failed load is fatal to the whole process or only to one scene is the
/// surrounding application's call.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// A construction path did not resolve to an existing file. Always fatal
    /// to that construction attempt.
    #[error("{kind} asset not found at `{path}` ({context})")]
    AssetNotFound {
        kind: ResourceKind,
        path: PathBuf,
        context: &'static str,
    },

    /// An in-memory buffer could not be decoded as the claimed format.
    #[error("could not decode `{format}` buffer: {reason}")]
    InvalidEncoding { format: String, reason: String },

    /// The native handle behind a resource is no longer sound. Raised by the
    /// pre-operation validity check and on use after disposal; the operation
    /// that triggered the check did not execute.
    #[error("stream for `{path}` is not valid")]
    StreamNotValid { path: String },

    /// The handle is recognized but not currently controllable (for example,
    /// still loading). Deliberately distinct from [`Self::StreamNotValid`];
    /// no code path produces it today, future backends may.
    #[error("stream for `{path}` is not ready")]
    StreamNotReady { path: String },

    /// The resource kind structurally cannot support the requested operation,
    /// e.g. seeking a one-shot sound.
    #[error("`{operation}` is not supported on {kind} resources")]
    UnsupportedOperation {
        operation: &'static str,
        kind: ResourceKind,
    },

    /// Wrapper around standard IO errors raised while probing the filesystem.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
