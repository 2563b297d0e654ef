//! Protocol codec
//!
//! Encoding of requests and decoding of replies on the wire.
//!
//! ## Wire Format
//!
//! ### Request Format
//! ```text
//! *<argc>\r\n
//! $<len>\r\n<command id>\r\n
//! $<len>\r\n<token>\r\n      (repeated per argument)
//! ```
//!
//! ### Reply Types
//! ```text
//! ┌────────┬──────────────────────┬────────┬──────────────────────┐
//! │ Prefix │ RESP2                │ Prefix │ RESP3 only           │
//! ├────────┼──────────────────────┼────────┼──────────────────────┤
//! │   +    │ simple string        │   _    │ null                 │
//! │   -    │ error                │   #    │ boolean              │
//! │   :    │ integer              │   ,    │ double               │
//! │   $    │ bulk string          │   (    │ big number           │
//! │   *    │ array                │   =    │ verbatim string      │
//! │        │                      │   %    │ map                  │
//! │        │                      │   ~    │ set                  │
//! │        │                      │   >    │ push                 │
//! │        │                      │   |    │ attribute (skipped)  │
//! │        │                      │   !    │ blob error           │
//! └────────┴──────────────────────┴────────┴──────────────────────┘
//! ```

use std::io::{BufRead, Write};

use bytes::{BufMut, Bytes, BytesMut};

use super::{Reply, Token};
use crate::error::{Result, StackError};

/// Line terminator
const CRLF: &[u8] = b"\r\n";

/// Maximum bulk string size accepted by default (512 MB)
pub const MAX_BULK_LEN: usize = 512 * 1024 * 1024;

/// Maximum nesting depth of aggregate replies
pub const MAX_NESTING_DEPTH: usize = 64;

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a request to bytes
///
/// The command id is sent as the first bulk string, followed by one bulk
/// string per token.
pub fn encode_command(id: &str, tokens: &[Token]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(16 + id.len() + tokens.len() * 16);

    write_header(&mut buf, b'*', tokens.len() + 1);
    write_bulk(&mut buf, id.as_bytes());
    for token in tokens {
        write_bulk(&mut buf, &token.to_bytes());
    }

    buf
}

fn write_header(buf: &mut BytesMut, kind: u8, len: usize) {
    buf.put_u8(kind);
    buf.put_slice(len.to_string().as_bytes());
    buf.put_slice(CRLF);
}

fn write_bulk(buf: &mut BytesMut, data: &[u8]) {
    write_header(buf, b'$', data.len());
    buf.put_slice(data);
    buf.put_slice(CRLF);
}

// =============================================================================
// Reply Decoding
// =============================================================================

/// Decode one reply from bytes using the default bulk limit
///
/// Returns the reply and the number of bytes consumed.
pub fn decode_reply(bytes: &[u8]) -> Result<(Reply, usize)> {
    ReplyDecoder::new(MAX_BULK_LEN).decode(bytes)
}

/// Reply decoder with a configurable bulk size limit
#[derive(Debug, Clone, Copy)]
pub struct ReplyDecoder {
    max_bulk_len: usize,
}

impl ReplyDecoder {
    pub fn new(max_bulk_len: usize) -> Self {
        Self { max_bulk_len }
    }

    /// Decode one complete reply, returning it with the consumed byte count
    ///
    /// Returns `StackError::Incomplete` when more bytes are needed.
    pub fn decode(&self, bytes: &[u8]) -> Result<(Reply, usize)> {
        let mut cursor = Cursor { bytes, pos: 0 };
        let reply = self.decode_value(&mut cursor, 0)?;
        tracing::trace!("Decoded {} reply ({} bytes)", reply.type_name(), cursor.pos);
        Ok((reply, cursor.pos))
    }

    fn decode_value(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<Reply> {
        if depth > MAX_NESTING_DEPTH {
            return Err(StackError::Protocol(format!(
                "Reply nesting exceeds {} levels",
                MAX_NESTING_DEPTH
            )));
        }

        let kind = cursor.next_byte()?;
        match kind {
            b'+' => Ok(Reply::Status(cursor.line_str()?.to_string())),
            b'-' => Ok(Reply::Error(cursor.line_str()?.to_string())),
            b':' => Ok(Reply::Int(cursor.line_int()?)),
            b'$' => match self.length(cursor)? {
                None => Ok(Reply::Nil),
                Some(len) => Ok(Reply::Bulk(cursor.take_bulk(len)?)),
            },
            b'*' => match self.length(cursor)? {
                None => Ok(Reply::Nil),
                Some(len) => Ok(Reply::Array(self.decode_items(cursor, len, depth)?)),
            },
            b'_' => {
                cursor.line()?;
                Ok(Reply::Nil)
            }
            b'#' => match cursor.line()? {
                b"t" => Ok(Reply::Bool(true)),
                b"f" => Ok(Reply::Bool(false)),
                other => Err(StackError::Protocol(format!(
                    "Invalid boolean: {}",
                    String::from_utf8_lossy(other)
                ))),
            },
            b',' => Ok(Reply::Double(parse_double(cursor.line_str()?)?)),
            b'(' => Ok(Reply::Bulk(Bytes::copy_from_slice(cursor.line()?))),
            b'=' => {
                let len = self.required_length(cursor)?;
                let data = cursor.take_bulk(len)?;
                // Verbatim strings carry a "txt:" style format header
                if data.len() >= 4 && data[3] == b':' {
                    Ok(Reply::Bulk(data.slice(4..)))
                } else {
                    Ok(Reply::Bulk(data))
                }
            }
            b'!' => {
                let len = self.required_length(cursor)?;
                let data = cursor.take_bulk(len)?;
                Ok(Reply::Error(String::from_utf8_lossy(&data).into_owned()))
            }
            b'%' => {
                let len = self.required_length(cursor)?;
                let mut pairs = Vec::with_capacity(len.min(1024));
                for _ in 0..len {
                    let key = self.decode_value(cursor, depth + 1)?;
                    let value = self.decode_value(cursor, depth + 1)?;
                    pairs.push((key, value));
                }
                Ok(Reply::Map(pairs))
            }
            b'~' => {
                let len = self.required_length(cursor)?;
                Ok(Reply::Set(self.decode_items(cursor, len, depth)?))
            }
            b'>' => {
                let len = self.required_length(cursor)?;
                Ok(Reply::Array(self.decode_items(cursor, len, depth)?))
            }
            b'|' => {
                // Attributes annotate the reply that follows them
                let len = self.required_length(cursor)?;
                for _ in 0..len.saturating_mul(2) {
                    self.decode_value(cursor, depth + 1)?;
                }
                self.decode_value(cursor, depth + 1)
            }
            other => Err(StackError::Protocol(format!(
                "Unknown reply type: 0x{:02x}",
                other
            ))),
        }
    }

    fn decode_items(&self, cursor: &mut Cursor<'_>, len: usize, depth: usize) -> Result<Vec<Reply>> {
        let mut items = Vec::with_capacity(len.min(1024));
        for _ in 0..len {
            items.push(self.decode_value(cursor, depth + 1)?);
        }
        Ok(items)
    }

    /// Length header; `-1` denotes a null
    fn length(&self, cursor: &mut Cursor<'_>) -> Result<Option<usize>> {
        let len = cursor.line_int()?;
        if len == -1 {
            return Ok(None);
        }
        if len < 0 {
            return Err(StackError::Protocol(format!("Invalid length: {}", len)));
        }
        let len = len as usize;
        if len > self.max_bulk_len {
            return Err(StackError::Protocol(format!(
                "Length too large: {} (max {})",
                len, self.max_bulk_len
            )));
        }
        Ok(Some(len))
    }

    fn required_length(&self, cursor: &mut Cursor<'_>) -> Result<usize> {
        self.length(cursor)?
            .ok_or_else(|| StackError::Protocol("Unexpected null length".to_string()))
    }
}

impl Default for ReplyDecoder {
    fn default() -> Self {
        Self::new(MAX_BULK_LEN)
    }
}

fn parse_double(s: &str) -> Result<f64> {
    match s {
        "inf" => Ok(f64::INFINITY),
        "-inf" => Ok(f64::NEG_INFINITY),
        "nan" => Ok(f64::NAN),
        _ => s
            .parse()
            .map_err(|_| StackError::Protocol(format!("Invalid double: {}", s))),
    }
}

/// Read position over a byte slice
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn next_byte(&mut self) -> Result<u8> {
        let byte = *self.bytes.get(self.pos).ok_or(StackError::Incomplete)?;
        self.pos += 1;
        Ok(byte)
    }

    /// Bytes up to the next CRLF, which is consumed
    fn line(&mut self) -> Result<&'a [u8]> {
        let rest = &self.bytes[self.pos..];
        let end = rest
            .windows(2)
            .position(|w| w == CRLF)
            .ok_or(StackError::Incomplete)?;
        self.pos += end + 2;
        Ok(&rest[..end])
    }

    fn line_str(&mut self) -> Result<&'a str> {
        let line = self.line()?;
        std::str::from_utf8(line)
            .map_err(|_| StackError::Protocol("Reply line is not valid UTF-8".to_string()))
    }

    fn line_int(&mut self) -> Result<i64> {
        let line = self.line_str()?;
        line.parse()
            .map_err(|_| StackError::Protocol(format!("Invalid integer: {}", line)))
    }

    fn take_bulk(&mut self, len: usize) -> Result<Bytes> {
        let end = self.pos + len;
        if self.bytes.len() < end + 2 {
            return Err(StackError::Incomplete);
        }
        if &self.bytes[end..end + 2] != CRLF {
            return Err(StackError::Protocol(
                "Bulk string not terminated by CRLF".to_string(),
            ));
        }
        let data = Bytes::copy_from_slice(&self.bytes[self.pos..end]);
        self.pos = end + 2;
        Ok(data)
    }
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write a request to a stream
pub fn write_command<W: Write>(writer: &mut W, id: &str, tokens: &[Token]) -> Result<()> {
    let bytes = encode_command(id, tokens);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read one complete reply from a buffered stream
///
/// Blocks until a complete reply is received or an error occurs.
pub fn read_reply<R: BufRead>(reader: &mut R) -> Result<Reply> {
    read_reply_with(reader, &ReplyDecoder::default())
}

/// Read one complete reply with a specific decoder
pub fn read_reply_with<R: BufRead>(reader: &mut R, decoder: &ReplyDecoder) -> Result<Reply> {
    let mut pending = Vec::new();

    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            return Err(StackError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "stream closed before a complete reply was read",
            )));
        }

        let already = pending.len();
        let chunk_len = chunk.len();
        pending.extend_from_slice(chunk);

        match decoder.decode(&pending) {
            Ok((reply, consumed)) => {
                // Only consume what belongs to this reply
                reader.consume(consumed - already);
                return Ok(reply);
            }
            Err(StackError::Incomplete) => reader.consume(chunk_len),
            Err(e) => return Err(e),
        }
    }
}
