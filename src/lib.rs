//! # imap-engine
//!
//! An IMAP4rev1 protocol engine (RFC 3501), with support for the IDLE
//! (RFC 2177), NAMESPACE (RFC 2342), UIDPLUS (RFC 4315), CONDSTORE and
//! QRESYNC (RFC 7162), LITERAL+/LITERAL- (RFC 7888), and Gmail IMAP
//! extensions. The parser and command/state machine core are sans-I/O;
//! [`stream::FramedStream`] is the async transport layer built on top of
//! them.
//!
//! ## Features
//!
//! - **Sans-I/O core**: [`protocol::Protocol`] is a pure state machine — feed
//!   it bytes, drain bytes to send, and it has no opinion about sockets,
//!   TLS, or async runtimes.
//! - **Capability-aware negotiation**: [`types::CapabilitySet`] tracks the
//!   server's advertised extensions (including side-channel data like
//!   `AUTH=` mechanisms and `APPENDLIMIT`) behind a packed bitset.
//! - **Command pipelining**: [`pipeline::Pipeline`] batches pipeline-safe
//!   commands to reduce round trips.
//! - **Server quirks handling**: [`quirks::ServerQuirks`] carries built-in
//!   workarounds for Gmail, Outlook, Dovecot, and other common servers.
//!
//! ## Example
//!
//! ```no_run
//! use imap_engine::protocol::Protocol;
//! use imap_engine::handler::NoopHandler;
//!
//! let mut protocol = Protocol::new();
//! let mut handler = NoopHandler;
//!
//! let _handle = protocol.login("user@example.com", "password");
//!
//! while let Some(transmit) = protocol.poll_transmit() {
//!     // send transmit.data over your own socket
//!     let _ = transmit;
//! }
//!
//! // feed bytes read from the socket back in
//! let _events = protocol.handle_input(b"", &mut handler);
//! ```
//!
//! ## Modules
//!
//! - [`command`]: IMAP command builders and serialization
//! - [`config`]: engine-wide configuration (buffer sizes, timeouts, literal
//!   ceilings)
//! - [`handler`]: callbacks for unsolicited server responses
//! - [`mime`]: the `BodyLiteralSink` handoff for streaming FETCH body literals
//! - [`parser`]: sans-I/O response lexer and parser
//! - [`pipeline`]: command pipelining policy
//! - [`protocol`]: the sans-I/O protocol state machine
//! - [`qresync`]: CONDSTORE/QRESYNC (RFC 7162) support types
//! - [`quirks`]: server-specific workarounds
//! - [`stream`]: the framed, read-ahead byte stream (L1) sitting under the
//!   protocol state machine
//! - [`time`]: a `Clock` abstraction for deterministic timeout testing
//! - [`types`]: core IMAP types (flags, mailboxes, sequences, capabilities)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod config;
mod error;
pub mod handler;
pub mod mime;
pub mod parser;
pub mod pipeline;
pub mod protocol;
pub mod qresync;
pub mod quirks;
pub mod stream;
pub mod time;
pub mod types;

pub use command::{
    Command, FetchAttribute, FetchItems, SearchCriteria, StatusAttribute, StoreAction,
    TagGenerator,
};
pub use config::{EngineConfig, EngineConfigBuilder};
pub use error::{Error, Result};
pub use mime::{BodyLiteralSink, VecSink, read_literal_into_sink};
pub use parser::{Response, ResponseParser, UntaggedResponse};
pub use protocol::{
    CommandHandle, CommandResult, Protocol, ProtocolEvent, ProtocolState, StoreHandle,
    aggregate_store_results,
};
pub use quirks::{ServerQuirks, ServerType};
pub use types::{
    Capability, CapabilitySet, Flag, Flags, ListResponse, Mailbox, MailboxAttribute,
    MailboxStatus, ResponseCode, SeqNum, SequenceSet, Status, Tag, Uid, UidSet, UidValidity,
};

/// IMAP protocol version supported.
pub const IMAP_VERSION: &str = "IMAP4rev1";
