//! Line-based codec for tokio.
//!
//! Inbound, the codec splits the byte stream on `\r\n` and yields each line
//! without its terminator. Outbound, it sanitizes a line (first line only,
//! at most [`MAX_OUTBOUND_PAYLOAD`] bytes) and appends the terminator, so an
//! encoded line never exceeds the 512-byte wire limit.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error;
use crate::util::truncate_utf8_safe;

/// Maximum inbound line length (8191 bytes as per modern IRC conventions).
pub const MAX_IRC_LINE_LEN: usize = 8191;

/// Maximum outbound payload before the `\r\n` terminator.
pub const MAX_OUTBOUND_PAYLOAD: usize = 500;

const TERMINATOR: &[u8] = b"\r\n";

/// Line-based codec that handles `\r\n`-terminated messages.
#[derive(Debug, Clone)]
pub struct LineCodec {
    /// Index of next byte to check for a terminator
    next_index: usize,
    /// Maximum inbound line length
    max_len: usize,
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl LineCodec {
    /// Create a codec with the default inbound limit.
    pub fn new() -> Self {
        Self::with_max_len(MAX_IRC_LINE_LEN)
    }

    /// Create a codec with a custom inbound line limit.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
        }
    }

    /// Sanitize an outgoing line.
    ///
    /// - Cuts at the first line break (`\r` or `\n`)
    /// - Truncates to [`MAX_OUTBOUND_PAYLOAD`] bytes on a character boundary
    pub fn sanitize(data: &str) -> &str {
        let first = match data.find(['\r', '\n']) {
            Some(pos) => &data[..pos],
            None => data,
        };
        truncate_utf8_safe(first, MAX_OUTBOUND_PAYLOAD)
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        // A '\r' may have been the last byte of the previous scan
        let start = self.next_index.saturating_sub(1);

        if let Some(offset) = src[start..]
            .windows(TERMINATOR.len())
            .position(|w| w == TERMINATOR)
        {
            let end = start + offset;
            let line = src.split_to(end + TERMINATOR.len());
            self.next_index = 0;

            if end > self.max_len {
                return Err(error::ProtocolError::MessageTooLong {
                    actual: end,
                    limit: self.max_len,
                });
            }

            // Undecodable bytes become U+FFFD rather than killing the link
            let data = String::from_utf8_lossy(&line[..end]).into_owned();
            Ok(Some(data))
        } else {
            self.next_index = src.len();

            if src.len() > self.max_len {
                return Err(error::ProtocolError::MessageTooLong {
                    actual: src.len(),
                    limit: self.max_len,
                });
            }

            Ok(None)
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        // An unterminated tail at EOF is discarded; the caller sees end-of-stream.
        match self.decode(src)? {
            Some(line) => Ok(Some(line)),
            None => {
                src.clear();
                self.next_index = 0;
                Ok(None)
            }
        }
    }
}

impl Encoder<String> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: String, dst: &mut BytesMut) -> error::Result<()> {
        <Self as Encoder<&str>>::encode(self, msg.as_str(), dst)
    }
}

impl Encoder<&str> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: &str, dst: &mut BytesMut) -> error::Result<()> {
        let payload = Self::sanitize(msg);
        dst.reserve(payload.len() + TERMINATOR.len());
        dst.put_slice(payload.as_bytes());
        dst.put_slice(TERMINATOR);
        Ok(())
    }
}
