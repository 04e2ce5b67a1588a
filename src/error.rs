//! Error types for the IMAP protocol engine.

use thiserror::Error;

use crate::types::{Capability, ResponseCode};

/// Errors that can occur while driving the protocol engine.
///
/// This engine has no opinion about transport security: it consumes an
/// already-connected stream, so there is no TLS-specific error variant here.
#[derive(Debug, Error)]
pub enum Error {
    /// The connection was closed, by either side, and no command is pending.
    #[error("connection disconnected")]
    Disconnected,

    /// The server sent something that does not conform to the grammar the
    /// engine expects (malformed tagged/untagged response, bad literal
    /// framing, and so on).
    #[error("protocol error: {0}")]
    ProtocolError(String),

    /// The server completed a command with a tagged NO.
    #[error("command failed: {text}")]
    CommandFailed {
        /// Response codes attached to the NO, if any.
        codes: Vec<ResponseCode>,
        /// Human-readable text from the server.
        text: String,
    },

    /// The server completed a command with a tagged BAD.
    #[error("command rejected: {text}")]
    CommandError {
        /// Response codes attached to the BAD, if any.
        codes: Vec<ResponseCode>,
        /// Human-readable text from the server.
        text: String,
    },

    /// The operation requires a capability the server did not advertise.
    #[error("server does not support required capability: {0:?}")]
    NotSupported(Capability),

    /// The operation was canceled before it completed, e.g. by dropping its
    /// cancellation token or ending an IDLE early.
    #[error("operation canceled")]
    Canceled,

    /// Underlying I/O error from the transport.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Low-level lexer/parser failure, with position and description baked
    /// into the message since this variant carries no structured fields.
    #[error("parse error: {0}")]
    ParseError(String),
}

impl Error {
    /// Builds a [`Error::ParseError`] from a byte position and message, the
    /// shape every parser call site in this crate needs.
    #[must_use]
    pub fn parse_at(position: usize, message: impl std::fmt::Display) -> Self {
        Self::ParseError(format!("at position {position}: {message}"))
    }
}

/// Result type alias using this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
