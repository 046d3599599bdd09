//! Server-Sent Events framing.
//!
//! One event on the wire:
//!
//! ```text
//! event:<name>\n
//! data:<line 1>\n
//! data:<line 2>\n
//! \n
//! ```
//!
//! Field values are written without a space after the colon. A payload with
//! embedded line breaks becomes one `data:` line per payload line, so a
//! client reassembles it with `\n` joins.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, SysfeedError};

/// A named event with a text payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    name: String,
    data: String,
}

impl Event {
    /// Build an event, rejecting names that would break the framing.
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(SysfeedError::InvalidEvent("event name must not be empty".into()));
        }
        if name.contains(['\r', '\n', ':']) {
            return Err(SysfeedError::InvalidEvent(format!(
                "event name contains a reserved character: {name:?}"
            )));
        }
        Ok(Self { name, data: data.into() })
    }

    /// Names known valid at compile time.
    pub(crate) fn trusted(name: &'static str, data: String) -> Self {
        Self { name: name.to_string(), data }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    /// Number of bytes `encode` will produce.
    pub fn encoded_len(&self) -> usize {
        let data_len: usize = data_lines(&self.data)
            .map(|l| "data:".len() + l.len() + 1)
            .sum();
        "event:".len() + self.name.len() + 1 + data_len + 1
    }

    /// Encode into a freshly allocated buffer.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf.freeze()
    }

    /// Append the wire form to `buf`.
    pub fn encode_into(&self, buf: &mut BytesMut) {
        buf.reserve(self.encoded_len());
        buf.put_slice(b"event:");
        buf.put_slice(self.name.as_bytes());
        buf.put_u8(b'\n');
        for line in data_lines(&self.data) {
            buf.put_slice(b"data:");
            buf.put_slice(line.as_bytes());
            buf.put_u8(b'\n');
        }
        buf.put_u8(b'\n');
    }
}

// CRLF, LF and lone CR all terminate a line in SSE.
fn data_lines(data: &str) -> impl Iterator<Item = &str> {
    data.split("\r\n").flat_map(|chunk| chunk.split(['\n', '\r']))
}
