//! The error taxonomy shared by every session operation.

use crate::session::State;
use std::{fmt, io};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// What the underlying compression library complained about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendErrorKind {
    /// The input is not a valid stream for the algorithm (bad framing, checksum or bitstream).
    CorruptData,
    /// The library could not obtain the memory it needed to proceed.
    OutOfMemory,
}

impl fmt::Display for BackendErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CorruptData => f.write_str("corrupt data"),
            Self::OutOfMemory => f.write_str("out of memory"),
        }
    }
}

/// Failure of a session operation.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value was outside its valid range. Nothing was constructed.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Which value was rejected and why.
        message: String,
    },

    /// The operation is not allowed in the session's current state.
    #[error("cannot {operation} a session in the {state:?} state")]
    InvalidState {
        /// The operation that was attempted.
        operation: &'static str,
        /// The state the session was in.
        state: State,
    },

    /// The compression library rejected the input or could not proceed.
    #[error("{kind}: {message}")]
    Backend {
        /// Broad category of the failure.
        kind: BackendErrorKind,
        /// The library's own diagnostic.
        message: String,
    },

    /// The library reported a status that cannot occur under correct operation, or the byte
    /// accounting between the library and the session stopped adding up.
    #[error("internal invariant violated: {message}")]
    InternalInvariant {
        /// Description of the contradiction.
        message: String,
    },

    /// Growing the output buffer failed.
    #[error("out of memory growing output buffer to {requested} bytes")]
    OutOfMemory {
        /// Capacity that could not be allocated.
        requested: usize,
    },
}

impl Error {
    /// Whether this error ended the session.
    ///
    /// Fatal errors release the backend and leave the session `Failed`; the others leave the
    /// session exactly as it was.
    pub fn is_fatal(&self) -> bool {
        crate::classify::requires_release(self)
    }

    /// The backend failure category, if this is a backend error.
    pub fn backend_kind(&self) -> Option<BackendErrorKind> {
        match self {
            Self::Backend { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        let kind = match &error {
            Error::InvalidArgument { .. } => io::ErrorKind::InvalidInput,
            Error::Backend {
                kind: BackendErrorKind::CorruptData,
                ..
            } => io::ErrorKind::InvalidData,
            Error::Backend {
                kind: BackendErrorKind::OutOfMemory,
                ..
            }
            | Error::OutOfMemory { .. } => io::ErrorKind::OutOfMemory,
            Error::InvalidState { .. } | Error::InternalInvariant { .. } => io::ErrorKind::Other,
        };
        io::Error::new(kind, error)
    }
}
