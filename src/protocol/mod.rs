//! Protocol Module
//!
//! Request tokens, reply values and the wire codec.
//!
//! ## Request Format
//! Every request is a multi-bulk array: the command id followed by one bulk
//! string per argument token.
//!
//! ```text
//! *3\r\n$10\r\nBF.MEXISTS\r\n$3\r\nkey\r\n$5\r\nitem1\r\n
//! ```
//!
//! ## Reply Encodings
//! - RESP2 (legacy): integers stand in for booleans, maps arrive as flat
//!   alternating key/value arrays
//! - RESP3 (typed): native booleans, doubles, maps and sets
//!
//! The negotiated encoding is passed explicitly to reply parsing as a
//! [`ProtocolVersion`].

mod codec;
mod reply;
mod token;

pub use codec::{
    decode_reply, encode_command, read_reply, read_reply_with, write_command, ReplyDecoder,
    MAX_BULK_LEN, MAX_NESTING_DEPTH,
};
pub use reply::{ProtocolVersion, Reply};
pub use token::Token;
