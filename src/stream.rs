//! The framed, read-ahead byte stream (L1) that sits under the sans-I/O
//! protocol state machine.
//!
//! IMAP responses are CRLF-terminated lines that may carry a literal
//! (`{n}` or `{n+}`) whose `n` raw bytes follow immediately and can contain
//! anything, including bare CR/LF. [`FramedStream`] knows how to read lines
//! in `Token` mode and raw literal payloads in `Literal` mode, and leaves the
//! mode switch to its caller (the parser knows, from the grammar, when a
//! literal is coming and how long it is).
//!
//! ```ignore
//! use imap_engine::stream::FramedStream;
//!
//! let mut framed = FramedStream::new(socket);
//! let mut line = Vec::new();
//! while !framed.read_line(&mut line).await? {}
//! ```

#![allow(clippy::missing_errors_doc)]

use bytes::BytesMut;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::config::EngineConfig;
use crate::{Error, Result};

/// Maximum line length to prevent memory exhaustion from a server that never
/// sends CRLF.
const MAX_LINE_LENGTH: usize = 1024 * 1024;

/// The stream's current framing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamMode {
    /// Reading CRLF-terminated lines (atoms, responses, tagged status).
    Token,

    /// Reading raw literal bytes; `remaining` counts down to zero as
    /// [`FramedStream::read`] consumes them.
    Literal {
        /// Bytes of the literal not yet read.
        remaining: usize,
    },
}

/// A buffered, mode-switching byte stream over an async transport.
///
/// Reading happens in two modes (see [`StreamMode`]): `Token` mode reads
/// CRLF-terminated lines, and `Literal` mode reads a fixed number of raw
/// bytes announced by a preceding `{n}` token. The caller drives the
/// transition between the two — `FramedStream` itself has no opinion about
/// IMAP grammar.
pub struct FramedStream<S> {
    reader: BufReader<S>,
    write_buffer: BytesMut,
    mode: StreamMode,
    read_buffer_size: usize,
    max_literal_size: usize,
}

impl<S> FramedStream<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a new framed stream using the default [`EngineConfig`].
    pub fn new(stream: S) -> Self {
        Self::with_config(stream, &EngineConfig::default())
    }

    /// Creates a new framed stream using the given configuration's buffer
    /// sizes and literal ceiling.
    pub fn with_config(stream: S, config: &EngineConfig) -> Self {
        Self {
            reader: BufReader::with_capacity(config.read_buffer_size, stream),
            write_buffer: BytesMut::with_capacity(config.write_buffer_size),
            mode: StreamMode::Token,
            read_buffer_size: config.read_buffer_size,
            max_literal_size: config.max_literal_size,
        }
    }

    /// Returns the current framing mode.
    #[must_use]
    pub fn mode(&self) -> StreamMode {
        self.mode
    }

    /// Returns the number of literal bytes not yet read, or `0` outside
    /// `Literal` mode.
    #[must_use]
    pub fn literal_data_left(&self) -> usize {
        match self.mode {
            StreamMode::Literal { remaining } => remaining,
            StreamMode::Token => 0,
        }
    }

    /// Switches to `Literal` mode to read `len` raw bytes.
    ///
    /// Returns an error without changing mode if `len` exceeds the
    /// configured literal ceiling.
    pub fn enter_literal_mode(&mut self, len: usize) -> Result<()> {
        if len > self.max_literal_size {
            return Err(Error::ProtocolError(format!(
                "literal too large: {len} bytes (max {})",
                self.max_literal_size
            )));
        }
        self.mode = StreamMode::Literal { remaining: len };
        Ok(())
    }

    /// Ensures at least `at_least` bytes are buffered (or the stream has
    /// reached EOF), without consuming them.
    ///
    /// Returns the buffered slice. Used by callers that need to peek ahead
    /// before deciding how much to consume, e.g. to check whether a full
    /// tagged response is already available.
    pub async fn read_ahead(&mut self, at_least: usize) -> Result<&[u8]> {
        loop {
            let available = self.reader.buffer().len();
            if available >= at_least {
                break;
            }
            let filled = self.reader.fill_buf().await?;
            if filled.is_empty() {
                break;
            }
        }
        Ok(self.reader.buffer())
    }

    /// Reads literal bytes into `buf`, returning the number of bytes read.
    ///
    /// Only valid in `Literal` mode (see [`FramedStream::enter_literal_mode`]);
    /// reads at most `buf.len()` bytes and never more than
    /// [`FramedStream::literal_data_left`]. Automatically returns to `Token`
    /// mode once the literal is fully consumed.
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let StreamMode::Literal { remaining } = self.mode else {
            return Err(Error::ProtocolError(
                "read() called outside Literal mode".to_string(),
            ));
        };
        if remaining == 0 {
            self.mode = StreamMode::Token;
            return Ok(0);
        }

        let want = buf.len().min(remaining);
        let n = self.reader.read(&mut buf[..want]).await?;
        if n == 0 {
            return Err(Error::Disconnected);
        }

        let remaining = remaining - n;
        self.mode = if remaining == 0 {
            StreamMode::Token
        } else {
            StreamMode::Literal { remaining }
        };
        Ok(n)
    }

    /// Reads literal bytes until `literal_data_left()` reaches zero,
    /// appending them to `sink`.
    pub async fn read_literal_to_end(&mut self, sink: &mut Vec<u8>) -> Result<()> {
        let mut buf = vec![0u8; self.read_buffer_size];
        while self.literal_data_left() > 0 {
            let n = self.read(&mut buf).await?;
            sink.extend_from_slice(&buf[..n]);
        }
        Ok(())
    }

    /// Reads towards the next CRLF, appending bytes to `sink` as they
    /// arrive.
    ///
    /// Returns `Ok(true)` once `sink` ends with a complete CRLF-terminated
    /// line, `Ok(false)` if more data is needed — callers loop until `true`:
    ///
    /// ```ignore
    /// let mut line = Vec::new();
    /// while !framed.read_line(&mut line).await? {}
    /// ```
    ///
    /// Only valid in `Token` mode.
    pub async fn read_line(&mut self, sink: &mut Vec<u8>) -> Result<bool> {
        let buf = self.reader.fill_buf().await?;
        if buf.is_empty() {
            return Err(Error::Disconnected);
        }

        if let Some(pos) = find_crlf(buf) {
            sink.extend_from_slice(&buf[..pos + 2]);
            let consumed = pos + 2;
            self.reader.consume(consumed);
            return Ok(true);
        }

        let len = buf.len();
        sink.extend_from_slice(buf);
        self.reader.consume(len);

        if sink.len() > MAX_LINE_LENGTH {
            return Err(Error::ProtocolError("line too long".to_string()));
        }
        Ok(false)
    }

    /// Buffers `data` for sending; call [`FramedStream::flush`] to write it
    /// out.
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        self.write_buffer.extend_from_slice(data);
        Ok(())
    }

    /// Flushes any buffered writes to the underlying transport.
    pub async fn flush(&mut self) -> Result<()> {
        if self.write_buffer.is_empty() {
            return Ok(());
        }
        let stream = self.reader.get_mut();
        stream.write_all(&self.write_buffer).await?;
        stream.flush().await?;
        self.write_buffer.clear();
        Ok(())
    }

    /// Swaps the underlying transport for a new one, returning the old one.
    ///
    /// Any bytes the old transport had buffered but not yet consumed are
    /// discarded. This is meant for protocol upgrades (STARTTLS,
    /// compression) where the old transport's plaintext framing ends at a
    /// tagged response boundary and nothing of interest remains buffered.
    pub fn set_stream(&mut self, stream: S) -> S {
        let old = std::mem::replace(
            &mut self.reader,
            BufReader::with_capacity(self.read_buffer_size, stream),
        );
        old.into_inner()
    }

    /// Returns a reference to the underlying transport.
    pub fn get_ref(&self) -> &S {
        self.reader.get_ref()
    }

    /// Returns a mutable reference to the underlying transport.
    pub fn get_mut(&mut self) -> &mut S {
        self.reader.get_mut()
    }

    /// Consumes the framed stream, returning the underlying transport.
    ///
    /// Any buffered, unconsumed data is lost.
    pub fn into_inner(self) -> S {
        self.reader.into_inner()
    }
}

/// Finds the position of the first CRLF in `buf`.
fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

/// Parses a literal length announcement (`{n}` or `{n+}`) trailing a line,
/// if present.
///
/// `line` must include its terminating CRLF.
#[must_use]
pub fn parse_literal_length(line: &[u8]) -> Option<usize> {
    if !line.ends_with(b"\r\n") {
        return None;
    }
    let line = &line[..line.len() - 2];

    let open = line.iter().rposition(|&b| b == b'{')?;
    if !line.ends_with(b"}") {
        return None;
    }

    let num_end = if line.ends_with(b"+}") {
        line.len() - 2
    } else {
        line.len() - 1
    };
    let num_str = std::str::from_utf8(&line[open + 1..num_end]).ok()?;
    num_str.parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    #[test]
    fn test_find_crlf() {
        assert_eq!(find_crlf(b"hello\r\n"), Some(5));
        assert_eq!(find_crlf(b"\r\n"), Some(0));
        assert_eq!(find_crlf(b"no newline"), None);
    }

    #[test]
    fn test_parse_literal_length() {
        assert_eq!(parse_literal_length(b"BODY {123}\r\n"), Some(123));
        assert_eq!(parse_literal_length(b"BODY {123+}\r\n"), Some(123));
        assert_eq!(parse_literal_length(b"{0}\r\n"), Some(0));
        assert_eq!(parse_literal_length(b"no literal\r\n"), None);
        assert_eq!(parse_literal_length(b"wrong {abc}\r\n"), None);
    }

    #[tokio::test]
    async fn test_read_line_simple() {
        let mock = Builder::new().read(b"* OK ready\r\n").build();
        let mut framed = FramedStream::new(mock);

        let mut line = Vec::new();
        while !framed.read_line(&mut line).await.unwrap() {}
        assert_eq!(line, b"* OK ready\r\n");
    }

    #[tokio::test]
    async fn test_read_line_split_across_reads() {
        let mock = Builder::new()
            .read(b"* 1 FETCH (BODY {5}")
            .read(b"\r\n")
            .build();
        let mut framed = FramedStream::new(mock);

        let mut line = Vec::new();
        while !framed.read_line(&mut line).await.unwrap() {}
        assert_eq!(line, b"* 1 FETCH (BODY {5}\r\n");
    }

    #[tokio::test]
    async fn test_literal_mode_roundtrip() {
        let mock = Builder::new()
            .read(b"* 1 FETCH (BODY {5}\r\n")
            .read(b"hello")
            .read(b")\r\n")
            .build();
        let mut framed = FramedStream::new(mock);

        let mut line = Vec::new();
        while !framed.read_line(&mut line).await.unwrap() {}
        let len = parse_literal_length(&line).unwrap();
        assert_eq!(len, 5);

        framed.enter_literal_mode(len).unwrap();
        assert_eq!(framed.literal_data_left(), 5);

        let mut body = Vec::new();
        framed.read_literal_to_end(&mut body).await.unwrap();
        assert_eq!(body, b"hello");
        assert_eq!(framed.mode(), StreamMode::Token);

        let mut trailer = Vec::new();
        while !framed.read_line(&mut trailer).await.unwrap() {}
        assert_eq!(trailer, b")\r\n");
    }

    #[tokio::test]
    async fn test_literal_size_validation() {
        let mock = Builder::new().build();
        let mut framed = FramedStream::new(mock);
        let result = framed.enter_literal_mode(200 * 1024 * 1024);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("literal too large"));
    }

    #[tokio::test]
    async fn test_write_and_flush() {
        let mock = Builder::new().write(b"A001 LOGIN user pass\r\n").build();
        let mut framed = FramedStream::new(mock);

        framed.write(b"A001 LOGIN user pass\r\n").unwrap();
        framed.flush().await.unwrap();
    }

    #[tokio::test]
    async fn test_read_past_eof_is_disconnected() {
        let mock = Builder::new().build();
        let mut framed = FramedStream::new(mock);

        let mut line = Vec::new();
        let result = framed.read_line(&mut line).await;
        assert!(matches!(result, Err(Error::Disconnected)));
    }

    #[tokio::test]
    async fn test_line_length_limit() {
        let long_line = vec![b'A'; MAX_LINE_LENGTH + 100];
        let mock = Builder::new().read(&long_line).build();
        let mut framed = FramedStream::new(mock);

        let mut line = Vec::new();
        let mut result = Ok(false);
        while matches!(result, Ok(false)) {
            result = framed.read_line(&mut line).await;
        }
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("line too long"));
    }
}
