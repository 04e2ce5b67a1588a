//! The handoff point between the IMAP engine and a message/MIME decoder.
//!
//! When a FETCH response returns a BODY section as a literal, the bytes are
//! exactly the literal's declared length and nothing else — they don't need
//! to pass through the response parser at all. [`BodyLiteralSink`] lets a
//! caller stream those bytes straight out of [`crate::stream::FramedStream`]
//! in `Literal` mode, without the engine copying them through an
//! intermediate buffer first. Use [`read_literal_into_sink`] once the stream
//! has been switched into `Literal` mode for a BODY literal.
//!
//! Callers who just want the whole body in memory (the common case for
//! small messages) can pass a [`VecSink`] instead of writing their own.

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::stream::FramedStream;
use crate::{Error, Result};

/// A streaming consumer of literal body bytes.
///
/// Any `AsyncWrite` target — a file, a MIME parser's input pipe, an
/// in-memory buffer — can serve as a sink; this is a marker trait over
/// `AsyncWrite` rather than a bespoke API so existing `AsyncWrite`
/// implementations need no adapter.
pub trait BodyLiteralSink: AsyncWrite + Unpin {}

impl<T: AsyncWrite + Unpin> BodyLiteralSink for T {}

/// Drains `framed`'s current literal directly into `sink`, chunk by chunk.
///
/// `framed` must already be in `Literal` mode (see
/// [`FramedStream::enter_literal_mode`]); this returns once
/// `literal_data_left()` reaches zero.
pub async fn read_literal_into_sink<S, W>(framed: &mut FramedStream<S>, sink: &mut W) -> Result<()>
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin,
    W: BodyLiteralSink,
{
    let mut buf = vec![0u8; 8192];
    while framed.literal_data_left() > 0 {
        let n = framed.read(&mut buf).await?;
        sink.write_all(&buf[..n])
            .await
            .map_err(Error::IoError)?;
    }
    sink.flush().await.map_err(Error::IoError)?;
    Ok(())
}

/// A [`BodyLiteralSink`] that buffers the whole body in memory.
///
/// This is what whole-message FETCH uses: the simplicity of an owned
/// `Vec<u8>` is worth more than streaming for bodies small enough to fetch
/// in one shot.
#[derive(Debug, Default)]
pub struct VecSink {
    buf: Vec<u8>,
}

impl VecSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the sink, returning the bytes written to it.
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

impl AsyncWrite for VecSink {
    fn poll_write(
        mut self: std::pin::Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
        buf: &[u8],
    ) -> std::task::Poll<std::result::Result<usize, std::io::Error>> {
        self.buf.extend_from_slice(buf);
        std::task::Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(
        self: std::pin::Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), std::io::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn poll_shutdown(
        self: std::pin::Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), std::io::Error>> {
        std::task::Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    #[tokio::test]
    async fn test_read_literal_into_vec_sink() {
        let mock = Builder::new().read(b"hello").build();
        let mut framed = FramedStream::new(mock);
        framed.enter_literal_mode(5).unwrap();

        let mut sink = VecSink::new();
        read_literal_into_sink(&mut framed, &mut sink).await.unwrap();

        assert_eq!(sink.into_inner(), b"hello");
    }

    #[tokio::test]
    async fn test_read_literal_into_sink_large_chunked() {
        let body = vec![b'x'; 20_000];
        let mock = Builder::new().read(&body).build();
        let mut framed = FramedStream::new(mock);
        framed.enter_literal_mode(body.len()).unwrap();

        let mut sink = VecSink::new();
        read_literal_into_sink(&mut framed, &mut sink).await.unwrap();

        assert_eq!(sink.into_inner(), body);
    }
}
