//! Argument tokens
//!
//! A token is one scalar element of a request's argument list.

use std::fmt;

use bytes::Bytes;

/// A single request argument
#[derive(Debug, Clone)]
pub enum Token {
    /// UTF-8 text
    Str(String),

    /// Signed integer, sent in decimal form
    Int(i64),

    /// Floating point number, sent in shortest round-trip form
    Float(f64),

    /// Binary blob (vector payloads, dump chunks)
    Bytes(Bytes),
}

impl Token {
    /// Wire representation of the token
    pub fn to_bytes(&self) -> Bytes {
        match self {
            Token::Str(s) => Bytes::copy_from_slice(s.as_bytes()),
            Token::Int(i) => Bytes::from(i.to_string()),
            Token::Float(f) => Bytes::from(f.to_string()),
            Token::Bytes(b) => b.clone(),
        }
    }

    /// Returns a copy of this token with `prefix` prepended to its wire form.
    ///
    /// Strings stay strings and blobs stay blobs; numbers become strings.
    pub fn with_prefix(&self, prefix: &str) -> Token {
        match self {
            Token::Bytes(b) => {
                let mut joined = Vec::with_capacity(prefix.len() + b.len());
                joined.extend_from_slice(prefix.as_bytes());
                joined.extend_from_slice(b);
                Token::Bytes(Bytes::from(joined))
            }
            Token::Str(s) => Token::Str(format!("{prefix}{s}")),
            Token::Int(i) => Token::Str(format!("{prefix}{i}")),
            Token::Float(f) => Token::Str(format!("{prefix}{f}")),
        }
    }

    /// Text view, if the token is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Token::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view; accepts integer tokens and decimal strings
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Token::Int(i) => Some(*i),
            Token::Str(s) => s.parse().ok(),
            Token::Bytes(b) => std::str::from_utf8(b).ok()?.parse().ok(),
            Token::Float(_) => None,
        }
    }

    /// Case-insensitive comparison against a protocol keyword
    pub fn eq_keyword(&self, keyword: &str) -> bool {
        match self {
            Token::Str(s) => s.eq_ignore_ascii_case(keyword),
            Token::Bytes(b) => b.eq_ignore_ascii_case(keyword.as_bytes()),
            _ => false,
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Token::Str(a), Token::Str(b)) => a == b,
            (Token::Int(a), Token::Int(b)) => a == b,
            (Token::Float(a), Token::Float(b)) => a == b,
            (Token::Bytes(a), Token::Bytes(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Str(s) => f.write_str(s),
            Token::Int(i) => write!(f, "{i}"),
            Token::Float(v) => write!(f, "{v}"),
            Token::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token::Str(value.to_string())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token::Str(value)
    }
}

impl From<&String> for Token {
    fn from(value: &String) -> Self {
        Token::Str(value.clone())
    }
}

macro_rules! int_token {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Token {
                fn from(value: $ty) -> Self {
                    Token::Int(value as i64)
                }
            }
        )*
    };
}

int_token!(i8, i16, i32, i64, u8, u16, u32, usize, isize);

impl From<f64> for Token {
    fn from(value: f64) -> Self {
        Token::Float(value)
    }
}

impl From<f32> for Token {
    fn from(value: f32) -> Self {
        Token::Float(value as f64)
    }
}

impl From<Bytes> for Token {
    fn from(value: Bytes) -> Self {
        Token::Bytes(value)
    }
}

impl From<Vec<u8>> for Token {
    fn from(value: Vec<u8>) -> Self {
        Token::Bytes(Bytes::from(value))
    }
}

impl From<&[u8]> for Token {
    fn from(value: &[u8]) -> Self {
        Token::Bytes(Bytes::copy_from_slice(value))
    }
}
