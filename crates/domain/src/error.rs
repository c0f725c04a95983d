//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into these via
//! `#[from]`. Gateway read failures are grouped under [`ReadError`]; the
//! poll scheduler treats every variant the same way.

/// Boxed error used where the concrete source type belongs to an adapter.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error for the bridge.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A gateway read failed.
    #[error("gateway read failed")]
    Read(#[from] ReadError),

    /// Publishing on the message bus failed.
    #[error("message bus error")]
    Bus(#[from] BusError),

    /// A requested record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The device identity could not be loaded or was invalid; polling
    /// cannot start.
    #[error("failed to load device identity")]
    FatalInit(#[source] Box<BridgeError>),

    /// The message bus connection is gone and will not come back.
    #[error("message bus connection lost: {reason}")]
    BusConnectionLost {
        /// Human readable cause reported by the bus adapter.
        reason: String,
    },
}

impl BridgeError {
    /// Wrap the cause of a failed identity load.
    pub fn fatal_init(cause: impl Into<BridgeError>) -> Self {
        Self::FatalInit(Box::new(cause.into()))
    }

    /// Whether this error must terminate the process.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::FatalInit(_) | Self::BusConnectionLost { .. })
    }
}

/// Failure of a single gateway read.
///
/// Transport, remote and parse failures are folded into one outcome by the
/// caller; the variants exist for logging.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// Connection refused, DNS failure, timeout, TLS failure.
    #[error("transport error on {path}")]
    Transport {
        /// Gateway path being read.
        path: String,
        #[source]
        source: BoxError,
    },

    /// The gateway answered with a non-success status.
    #[error("gateway answered HTTP {status} on {path}")]
    Remote {
        /// Gateway path being read.
        path: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("malformed response on {path}")]
    Parse {
        /// Gateway path being read.
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ReadError {
    /// Gateway path the failed read was addressed to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Transport { path, .. } | Self::Remote { path, .. } | Self::Parse { path, .. } => {
                path
            }
        }
    }
}

/// Failure to hand a message to the bus.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    /// The change event could not be serialized.
    #[error("failed to serialize change event")]
    Serialize(#[source] serde_json::Error),

    /// The bus refused the message (queue full, client gone, …).
    #[error("message bus unavailable")]
    Unavailable(#[source] BoxError),
}

/// A lookup found nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// Kind of record (e.g. `"Status"`).
    pub entity: &'static str,
    /// Identifier that was looked up.
    pub id: String,
}

/// Domain invariant violations.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// An identifier was empty.
    #[error("id must not be empty")]
    EmptyId,
}
