//! Sans-I/O IMAP protocol implementation.
//!
// Allow missing_const_for_fn since many functions can't be const in stable Rust.
#![allow(clippy::missing_const_for_fn)]
//!
//! This module provides a pure state machine implementation of the IMAP protocol,
//! completely separated from I/O operations. This design enables:
//!
//! - Deterministic testing without network mocks
//! - Time manipulation in tests
//! - Reuse across different async runtimes
//! - Clear separation between protocol logic and I/O
//!
//! # Architecture
//!
//! The protocol is implemented as a state machine that:
//! - Receives bytes via `handle_input()`
//! - Produces bytes to send via `poll_transmit()`
//! - Reports timeouts via `poll_timeout()`
//! - Handles timeouts via `handle_timeout()`
//!
//! # Example
//!
//! ```ignore
//! use imap_engine::protocol::{Protocol, ProtocolEvent};
//!
//! let mut protocol = Protocol::new();
//!
//! // Queue a command
//! let handle = protocol.login("user", "pass");
//!
//! // Get bytes to send
//! while let Some(transmit) = protocol.poll_transmit() {
//!     send_to_server(&transmit.data);
//! }
//!
//! // Feed response bytes
//! let events = protocol.handle_input(response_bytes);
//! for event in events {
//!     match event {
//!         ProtocolEvent::CommandComplete { tag, result } => { /* ... */ }
//!         ProtocolEvent::Unsolicited(resp) => { /* ... */ }
//!     }
//! }
//! ```

mod state;
mod transmit;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub use state::{ProtocolState, SelectedState};
pub use transmit::Transmit;

use crate::command::{
    Command, FetchItems, SearchCriteria, StatusAttribute, StoreAction, TagGenerator,
};
use crate::config::EngineConfig;
use crate::handler::ResponseHandler;
use crate::parser::{Response, ResponseParser, UntaggedResponse};
use crate::types::{
    Capability, CapabilitySet, Flag, MailboxStatus, ResponseCode, SequenceSet, Status, Tag, UidSet,
};
use crate::{Error, Result};

/// A handle to a pending command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandHandle {
    tag: Tag,
}

impl CommandHandle {
    /// Returns the tag associated with this command.
    #[must_use]
    pub fn tag(&self) -> &Tag {
        &self.tag
    }
}

/// Result of a completed command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub status: Status,
    /// Optional response code.
    pub code: Option<ResponseCode>,
    /// Human-readable text.
    pub text: String,
    /// Collected untagged responses for this command.
    pub responses: Vec<UntaggedResponse>,
}

impl CommandResult {
    /// Returns true if the command succeeded (OK status).
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self.status, Status::Ok | Status::PreAuth)
    }

    /// Converts to a Result, returning an error if the command failed.
    ///
    /// # Errors
    ///
    /// Returns an error if the status is NO, BAD, or BYE.
    pub fn into_result(self) -> Result<Vec<UntaggedResponse>> {
        let codes = self.code.into_iter().collect();
        match self.status {
            Status::Ok | Status::PreAuth => Ok(self.responses),
            Status::No => Err(Error::CommandFailed { codes, text: self.text }),
            Status::Bad => Err(Error::CommandError { codes, text: self.text }),
            Status::Bye => Err(Error::Disconnected),
        }
    }
}

/// A handle to a STORE command, possibly split into several sub-commands.
///
/// A STORE whose encoded UID or sequence set would exceed
/// [`EngineConfig::max_command_line_len`] is sent as multiple
/// `Command::Store` sub-commands (§4.5). `StoreHandle` tracks every
/// sub-command's tag so the caller can recognize their completions and
/// recover the union of `MODIFIED` UIDs across all of them via
/// [`aggregate_store_results`].
#[derive(Debug, Clone)]
pub struct StoreHandle {
    handles: Vec<CommandHandle>,
}

impl StoreHandle {
    /// The sub-command handles making up this STORE.
    #[must_use]
    pub fn handles(&self) -> &[CommandHandle] {
        &self.handles
    }

    /// Returns `true` if `handle` is one of this STORE's sub-commands.
    #[must_use]
    pub fn contains(&self, handle: &CommandHandle) -> bool {
        self.handles.contains(handle)
    }

    /// Number of sub-commands this STORE was split into.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns `true` if no sub-commands were queued (an empty sequence
    /// set).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// Combines the results of every sub-command of a (possibly split) STORE
/// into the union of `MODIFIED` UIDs reported via CONDSTORE.
///
/// Fails with the first sub-command error encountered (a `NO`/`BAD`/`BYE`
/// aborts the whole STORE, matching RFC 7162's per-command failure
/// semantics). When `UNCHANGEDSINCE` was not used, or no UID was rejected,
/// the returned set is empty.
///
/// # Errors
///
/// Returns an error if any sub-command's result was not `OK`.
pub fn aggregate_store_results(
    results: impl IntoIterator<Item = CommandResult>,
) -> Result<UidSet> {
    let mut modified: Option<UidSet> = None;
    for result in results {
        let code = result.code.clone();
        result.into_result()?;
        if let Some(ResponseCode::Modified(uids)) = code {
            modified = Some(match modified {
                Some(existing) => union_uid_sets(existing, uids),
                None => uids,
            });
        }
    }
    Ok(modified.unwrap_or_else(|| UidSet::Set(Vec::new())))
}

/// Unions two UID sets by flattening both into a single `Set`.
fn union_uid_sets(a: UidSet, b: UidSet) -> UidSet {
    let mut items = match a {
        UidSet::Set(items) => items,
        other => vec![other],
    };
    match b {
        UidSet::Set(more) => items.extend(more),
        other => items.push(other),
    }
    UidSet::Set(items)
}

/// Splits `set` into chunks whose `Display`-encoded length stays within
/// `max_len`, each returned as its own `SequenceSet`.
///
/// A single element (range, `RangeFrom`, `All`, or already-atomic `Single`)
/// that alone exceeds `max_len` is returned as its own oversized chunk —
/// there is no further way to shrink it without changing its meaning.
fn split_sequence_set(set: &SequenceSet, max_len: usize) -> Vec<SequenceSet> {
    let mut elements = Vec::new();
    flatten_sequence_set(set, &mut elements);

    let mut chunks: Vec<Vec<SequenceSet>> = Vec::new();
    let mut current: Vec<SequenceSet> = Vec::new();
    let mut current_len = 0usize;

    for element in elements {
        let element_len = element.to_string().len();
        let sep_len = usize::from(!current.is_empty());
        if !current.is_empty() && current_len + sep_len + element_len > max_len {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current_len += 1; // joining comma
        }
        current_len += element_len;
        current.push(element);
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
        .into_iter()
        .map(|mut items| {
            if items.len() == 1 {
                items.pop().unwrap_or(SequenceSet::All)
            } else {
                SequenceSet::Set(items)
            }
        })
        .collect()
}

/// Flattens nested `SequenceSet::Set` entries into their atomic elements.
fn flatten_sequence_set(set: &SequenceSet, out: &mut Vec<SequenceSet>) {
    match set {
        SequenceSet::Set(items) => {
            for item in items {
                flatten_sequence_set(item, out);
            }
        }
        other => out.push(other.clone()),
    }
}

/// Events produced by the protocol state machine.
#[derive(Debug)]
pub enum ProtocolEvent {
    /// A command completed.
    CommandComplete {
        /// The command handle.
        handle: CommandHandle,
        /// The result.
        result: CommandResult,
    },
    /// Server greeting received (initial connection).
    Greeting {
        /// Greeting status.
        status: Status,
        /// Optional response code.
        code: Option<ResponseCode>,
        /// Greeting text.
        text: String,
    },
    /// Continuation request from server (for literals, IDLE, etc.).
    Continuation {
        /// Continuation text.
        text: String,
    },
    /// Connection closed by server.
    Disconnected {
        /// BYE message text.
        text: String,
    },
}

/// A pending command waiting for completion.
struct PendingCommand {
    handle: CommandHandle,
    responses: Vec<UntaggedResponse>,
}

/// Sans-I/O IMAP protocol state machine.
///
/// This struct manages the IMAP protocol state without performing any I/O.
/// Feed it bytes, and it will produce bytes to send and events to process.
pub struct Protocol {
    /// Current protocol state.
    state: ProtocolState,
    /// Tag generator for commands.
    tag_gen: TagGenerator,
    /// Server capabilities.
    capabilities: CapabilitySet,
    /// Pending commands awaiting responses.
    pending: VecDeque<PendingCommand>,
    /// Outbound data queue.
    outbound: VecDeque<Transmit>,
    /// Inbound buffer for partial data.
    inbound: Vec<u8>,
    /// Whether we've received the initial greeting.
    greeting_received: bool,
    /// IDLE state tracking.
    idle_tag: Option<Tag>,
    /// Last activity time (for timeout tracking).
    last_activity: Option<Instant>,
    /// Current mailbox status (when selected).
    mailbox_status: Option<MailboxStatus>,
    /// Maximum encoded command-line length before a STORE's sequence/UID
    /// set is split into several sub-commands.
    max_command_line_len: usize,
}

impl Default for Protocol {
    fn default() -> Self {
        Self::new()
    }
}

impl Protocol {
    /// Creates a new protocol instance in the not-authenticated state, using
    /// the default engine configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates a new protocol instance configured per `config`.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            state: ProtocolState::NotAuthenticated,
            tag_gen: TagGenerator::default(),
            capabilities: CapabilitySet::default(),
            pending: VecDeque::new(),
            outbound: VecDeque::new(),
            inbound: Vec::new(),
            greeting_received: false,
            idle_tag: None,
            last_activity: None,
            mailbox_status: None,
            max_command_line_len: config.max_command_line_len,
        }
    }

    /// Returns the current protocol state.
    #[must_use]
    pub fn state(&self) -> &ProtocolState {
        &self.state
    }

    /// Returns the server capabilities.
    #[must_use]
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Checks if the server has a specific capability.
    #[must_use]
    pub fn has_capability(&self, cap: Capability) -> bool {
        self.capabilities.supports(cap)
    }

    /// Returns the current mailbox status (when selected).
    #[must_use]
    pub fn mailbox_status(&self) -> Option<&MailboxStatus> {
        self.mailbox_status.as_ref()
    }

    /// Returns whether we're in IDLE mode.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.idle_tag.is_some()
    }

    /// Returns the next timeout, if any.
    ///
    /// Returns `None` if no timeout is pending.
    /// The caller should call `handle_timeout()` when this instant is reached.
    #[must_use]
    pub fn poll_timeout(&self) -> Option<Instant> {
        // IDLE should be refreshed every 29 minutes per RFC 2177
        if self.idle_tag.is_some() {
            self.last_activity.map(|t| t + Duration::from_secs(29 * 60))
        } else {
            None
        }
    }

    /// Handles a timeout expiration.
    ///
    /// Call this when `poll_timeout()` returns an instant that has passed.
    pub fn handle_timeout(&mut self, _now: Instant) {
        // Currently only used for IDLE timeout tracking
        // The actual timeout handling is done by the caller
    }

    /// Returns the next data to transmit, if any.
    pub fn poll_transmit(&mut self) -> Option<Transmit> {
        self.outbound.pop_front()
    }

    /// Feeds received data into the protocol.
    ///
    /// Returns a list of events produced by processing the data.
    pub fn handle_input(
        &mut self,
        data: &[u8],
        handler: &mut dyn ResponseHandler,
    ) -> Vec<ProtocolEvent> {
        self.inbound.extend_from_slice(data);
        self.last_activity = Some(Instant::now());

        let mut events = Vec::new();

        // Process complete lines
        while let Some(line_end) = self.find_complete_response() {
            let response_data: Vec<u8> = self.inbound.drain(..=line_end).collect();

            if let Some(event) = self.process_response(&response_data, handler) {
                events.push(event);
            }
        }

        events
    }

    /// Finds the end of a complete response in the inbound buffer.
    fn find_complete_response(&self) -> Option<usize> {
        // Look for CRLF
        for i in 0..self.inbound.len().saturating_sub(1) {
            if self.inbound[i] == b'\r' && self.inbound[i + 1] == b'\n' {
                // Check for literal
                if let Some(literal_len) = self.parse_literal_at_end(&self.inbound[..=i + 1]) {
                    // Need more data for the literal
                    let total_needed = i + 2 + literal_len;
                    if self.inbound.len() >= total_needed {
                        // Have the literal, look for the next CRLF
                        for j in total_needed..self.inbound.len().saturating_sub(1) {
                            if self.inbound[j] == b'\r' && self.inbound[j + 1] == b'\n' {
                                return Some(j + 1);
                            }
                        }
                    }
                    return None;
                }
                return Some(i + 1);
            }
        }
        None
    }

    /// Parses a literal length from the end of a line.
    #[allow(clippy::unused_self)] // Method for potential future use of self
    fn parse_literal_at_end(&self, line: &[u8]) -> Option<usize> {
        if !line.ends_with(b"\r\n") {
            return None;
        }
        let line = &line[..line.len() - 2];

        let open = line.iter().rposition(|&b| b == b'{')?;
        if !line.ends_with(b"}") && !line.ends_with(b"+}") {
            return None;
        }

        let num_start = open + 1;
        let num_end = if line.ends_with(b"+}") {
            line.len() - 2
        } else {
            line.len() - 1
        };

        let num_str = std::str::from_utf8(&line[num_start..num_end]).ok()?;
        num_str.parse().ok()
    }

    /// Processes a complete response.
    fn process_response(
        &mut self,
        data: &[u8],
        handler: &mut dyn ResponseHandler,
    ) -> Option<ProtocolEvent> {
        let Ok(response) = ResponseParser::parse(data) else {
            return None;
        };

        match response {
            Response::Tagged {
                tag,
                status,
                code,
                text,
            } => self.handle_tagged(tag, status, code, text),

            Response::Untagged(untagged) => {
                self.handle_untagged(untagged, handler);
                None
            }

            Response::Continuation { text } => Some(ProtocolEvent::Continuation {
                text: text.unwrap_or_default(),
            }),
        }
    }

    /// Handles a tagged response.
    #[allow(clippy::needless_pass_by_value)] // Tag is small and consumed in comparisons
    fn handle_tagged(
        &mut self,
        tag: Tag,
        status: Status,
        code: Option<ResponseCode>,
        text: String,
    ) -> Option<ProtocolEvent> {
        // Check for IDLE completion
        if self.idle_tag.as_ref() == Some(&tag) {
            self.idle_tag = None;
        }

        // Find the pending command
        let position = self.pending.iter().position(|p| p.handle.tag == tag)?;

        let pending = self.pending.remove(position)?;

        // Update state based on command result
        if status == Status::Ok {
            self.update_state_on_success(&pending.handle.tag);
        }

        Some(ProtocolEvent::CommandComplete {
            handle: pending.handle,
            result: CommandResult {
                status,
                code,
                text,
                responses: pending.responses,
            },
        })
    }

    /// Updates protocol state after a successful command.
    #[allow(clippy::needless_pass_by_ref_mut, clippy::unused_self)]
    fn update_state_on_success(&mut self, _tag: &Tag) {
        // State transitions are handled by the specific command methods
    }

    /// Handles an untagged response.
    fn handle_untagged(&mut self, response: UntaggedResponse, handler: &mut dyn ResponseHandler) {
        // First, notify the handler
        match &response {
            UntaggedResponse::Exists(n) => handler.on_exists(*n),
            UntaggedResponse::Recent(n) => handler.on_recent(*n),
            UntaggedResponse::Expunge(seq) => handler.on_expunge(*seq),
            UntaggedResponse::Fetch { seq, items } => handler.on_fetch(*seq, items),
            UntaggedResponse::Flags(flags) => handler.on_flags(flags),
            UntaggedResponse::Bye { text, .. } => handler.on_bye(text),
            UntaggedResponse::Ok { code, text } => {
                if matches!(code, Some(ResponseCode::Alert)) {
                    handler.on_alert(text);
                } else {
                    handler.on_ok(text);
                }
            }
            UntaggedResponse::No { text, .. } => handler.on_no(text),
            UntaggedResponse::Bad { text, .. } => handler.on_bad(text),
            UntaggedResponse::Capability(caps) => {
                self.capabilities.clone_from(caps);
            }
            _ => {}
        }

        // Update mailbox status
        if let Some(status) = &mut self.mailbox_status {
            match &response {
                UntaggedResponse::Exists(n) => status.exists = *n,
                UntaggedResponse::Recent(n) => status.recent = *n,
                UntaggedResponse::Flags(flags) => status.flags = flags.clone(),
                _ => {}
            }
        }

        // Add to pending command responses (if any command is pending)
        if let Some(pending) = self.pending.back_mut() {
            pending.responses.push(response);
        }
    }

    /// Queues a command for sending.
    fn queue_command(&mut self, cmd: &Command) -> CommandHandle {
        let tag = self.tag_gen.next();
        let data = cmd.serialize(&tag);

        self.outbound.push_back(Transmit { data });

        let handle = CommandHandle {
            tag: Tag::new(&tag),
        };

        self.pending.push_back(PendingCommand {
            handle: handle.clone(),
            responses: Vec::new(),
        });

        handle
    }

    // === Command Methods ===

    /// Queues a LOGIN command.
    pub fn login(&mut self, username: &str, password: &str) -> CommandHandle {
        // State transition happens on successful response
        self.queue_command(&Command::Login {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Queues a CAPABILITY command.
    pub fn capability(&mut self) -> CommandHandle {
        self.queue_command(&Command::Capability)
    }

    /// Queues a NOOP command.
    pub fn noop(&mut self) -> CommandHandle {
        self.queue_command(&Command::Noop)
    }

    /// Queues a LOGOUT command.
    pub fn logout(&mut self) -> CommandHandle {
        self.queue_command(&Command::Logout)
    }

    /// Queues a SELECT command.
    pub fn select(&mut self, mailbox: &str) -> CommandHandle {
        use crate::types::Mailbox;
        self.mailbox_status = Some(MailboxStatus::default());
        self.queue_command(&Command::Select {
            mailbox: Mailbox::new(mailbox),
            condstore: self.has_capability(Capability::CONDSTORE),
        })
    }

    /// Queues an EXAMINE command.
    pub fn examine(&mut self, mailbox: &str) -> CommandHandle {
        use crate::types::Mailbox;
        self.mailbox_status = Some(MailboxStatus::default());
        self.queue_command(&Command::Examine {
            mailbox: Mailbox::new(mailbox),
        })
    }

    /// Queues a LIST command.
    pub fn list(&mut self, reference: &str, pattern: &str) -> CommandHandle {
        self.queue_command(&Command::List {
            reference: reference.to_string(),
            pattern: pattern.to_string(),
        })
    }

    /// Queues a CLOSE command.
    pub fn close(&mut self) -> CommandHandle {
        self.mailbox_status = None;
        self.queue_command(&Command::Close)
    }

    /// Queues an IDLE command.
    pub fn idle(&mut self) -> CommandHandle {
        let handle = self.queue_command(&Command::Idle);
        self.idle_tag = Some(handle.tag.clone());
        self.last_activity = Some(Instant::now());
        handle
    }

    /// Queues a DONE command (to exit IDLE).
    pub fn done(&mut self) {
        self.outbound.push_back(Transmit {
            data: b"DONE\r\n".to_vec(),
        });
        // idle_tag will be cleared when we receive the tagged response
    }

    /// Queues an UNSELECT command (RFC 3691).
    pub fn unselect(&mut self) -> CommandHandle {
        self.mailbox_status = None;
        self.queue_command(&Command::Unselect)
    }

    /// Queues a NAMESPACE command (RFC 2342).
    pub fn namespace(&mut self) -> CommandHandle {
        self.queue_command(&Command::Namespace)
    }

    /// Queues a STATUS command.
    pub fn status(&mut self, mailbox: &str, items: Vec<StatusAttribute>) -> CommandHandle {
        use crate::types::Mailbox;
        self.queue_command(&Command::Status {
            mailbox: Mailbox::new(mailbox),
            items,
        })
    }

    /// Queues a FETCH command.
    pub fn fetch(&mut self, sequence: SequenceSet, items: FetchItems, uid: bool) -> CommandHandle {
        self.queue_command(&Command::Fetch {
            sequence,
            items,
            uid,
        })
    }

    /// Queues a SEARCH command.
    pub fn search(&mut self, criteria: SearchCriteria, uid: bool) -> CommandHandle {
        self.queue_command(&Command::Search { criteria, uid })
    }

    /// Queues a STORE command.
    ///
    /// Returns `NotSupported` without queuing anything if `action` carries an
    /// `UNCHANGEDSINCE` modifier and the server has not advertised CONDSTORE.
    ///
    /// When the encoded sequence/UID set would exceed
    /// [`EngineConfig::max_command_line_len`], the set is split across
    /// several `Command::Store` sub-commands (§4.5); the returned
    /// [`StoreHandle`] tracks all of them. Feed their `CommandResult`s to
    /// [`aggregate_store_results`] to recover the union of `MODIFIED` UIDs.
    pub fn store(
        &mut self,
        sequence: SequenceSet,
        action: StoreAction,
        uid: bool,
        silent: bool,
    ) -> Result<StoreHandle> {
        let requires_condstore = matches!(
            action,
            StoreAction::SetFlagsUnchangedSince { .. }
                | StoreAction::AddFlagsUnchangedSince { .. }
                | StoreAction::RemoveFlagsUnchangedSince { .. }
        );
        if requires_condstore && !self.has_capability(Capability::CONDSTORE) {
            return Err(Error::NotSupported(Capability::CONDSTORE));
        }

        let handles = split_sequence_set(&sequence, self.max_command_line_len)
            .into_iter()
            .map(|chunk| {
                self.queue_command(&Command::Store {
                    sequence: chunk,
                    action: action.clone(),
                    uid,
                    silent,
                })
            })
            .collect();

        Ok(StoreHandle { handles })
    }

    /// Queues a COPY command.
    pub fn copy(&mut self, sequence: SequenceSet, mailbox: &str, uid: bool) -> CommandHandle {
        use crate::types::Mailbox;
        self.queue_command(&Command::Copy {
            sequence,
            mailbox: Mailbox::new(mailbox),
            uid,
        })
    }

    /// Queues a MOVE command (RFC 6851).
    ///
    /// Returns `NotSupported` without queuing anything if the server has not
    /// advertised the MOVE capability.
    pub fn mv(&mut self, sequence: SequenceSet, mailbox: &str, uid: bool) -> Result<CommandHandle> {
        use crate::types::Mailbox;
        if !self.has_capability(Capability::MOVE) {
            return Err(Error::NotSupported(Capability::MOVE));
        }
        Ok(self.queue_command(&Command::Move {
            sequence,
            mailbox: Mailbox::new(mailbox),
            uid,
        }))
    }

    /// Queues an APPEND command.
    pub fn append(
        &mut self,
        mailbox: &str,
        flags: Option<Vec<Flag>>,
        message: Vec<u8>,
    ) -> CommandHandle {
        use crate::types::Mailbox;
        self.queue_command(&Command::Append {
            mailbox: Mailbox::new(mailbox),
            flags,
            message,
        })
    }

    /// Queues an EXPUNGE command.
    pub fn expunge(&mut self) -> CommandHandle {
        self.queue_command(&Command::Expunge)
    }

    /// Queues a UID EXPUNGE command (RFC 4315 UIDPLUS).
    ///
    /// Returns `NotSupported` without queuing anything if the server has not
    /// advertised UIDPLUS.
    pub fn uid_expunge(&mut self, uids: SequenceSet) -> Result<CommandHandle> {
        if !self.has_capability(Capability::UIDPLUS) {
            return Err(Error::NotSupported(Capability::UIDPLUS));
        }
        Ok(self.queue_command(&Command::UidExpunge { uids }))
    }

    /// Transitions to authenticated state.
    pub fn set_authenticated(&mut self) {
        self.state = ProtocolState::Authenticated;
    }

    /// Transitions to selected state.
    pub fn set_selected(&mut self, mailbox: String, read_only: bool) {
        self.state = ProtocolState::Selected(SelectedState { mailbox, read_only });
    }

    /// Transitions back to authenticated state (from selected).
    pub fn set_unselected(&mut self) {
        if matches!(self.state, ProtocolState::Selected(_)) {
            self.state = ProtocolState::Authenticated;
            self.mailbox_status = None;
        }
    }
}

impl std::fmt::Debug for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Protocol")
            .field("state", &self.state)
            .field("capabilities", &self.capabilities)
            .field("pending_count", &self.pending.len())
            .field("outbound_count", &self.outbound.len())
            .field("greeting_received", &self.greeting_received)
            .field("is_idle", &self.idle_tag.is_some())
            .finish_non_exhaustive()
    }
}
