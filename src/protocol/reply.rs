//! Reply values
//!
//! One type covers both the legacy (RESP2) and typed (RESP3) encodings.
//! Parsed results are expressed with the same type.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::StackError;

/// Reply encoding negotiated with the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProtocolVersion {
    /// Legacy encoding: integers for booleans, flat lists for maps
    #[default]
    Resp2,

    /// Typed encoding: native booleans, doubles, maps and sets
    Resp3,
}

impl ProtocolVersion {
    pub fn is_resp3(self) -> bool {
        matches!(self, ProtocolVersion::Resp3)
    }
}

impl FromStr for ProtocolVersion {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "2" | "resp2" => Ok(ProtocolVersion::Resp2),
            "3" | "resp3" => Ok(ProtocolVersion::Resp3),
            other => Err(StackError::invalid_argument(format!(
                "Unknown protocol version '{other}', expected 2 or 3"
            ))),
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolVersion::Resp2 => f.write_str("RESP2"),
            ProtocolVersion::Resp3 => f.write_str("RESP3"),
        }
    }
}

/// A raw or parsed reply
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Null bulk, null array or RESP3 null
    Nil,

    /// Simple string, e.g. `OK`
    Status(String),

    /// Error reply with the server's message
    Error(String),

    Int(i64),

    Double(f64),

    Bool(bool),

    /// Bulk string (binary safe)
    Bulk(Bytes),

    Array(Vec<Reply>),

    Set(Vec<Reply>),

    /// Ordered key/value pairs
    Map(Vec<(Reply, Reply)>),
}

impl Reply {
    /// Bulk reply from text
    pub fn bulk(s: impl AsRef<str>) -> Reply {
        Reply::Bulk(Bytes::copy_from_slice(s.as_ref().as_bytes()))
    }

    /// Map reply from `(key, value)` pairs with text keys
    pub fn map<K, I>(pairs: I) -> Reply
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Reply)>,
    {
        Reply::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (Reply::bulk(k), v))
                .collect(),
        )
    }

    /// Text view for status and bulk replies
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Reply::Status(s) => Some(s),
            Reply::Bulk(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    /// Integer view; bulk strings holding decimals are accepted
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Reply::Int(i) => Some(*i),
            Reply::Bulk(_) => self.as_str()?.parse().ok(),
            _ => None,
        }
    }

    /// Double view; integers and numeric bulk strings are accepted
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Reply::Double(d) => Some(*d),
            Reply::Int(i) => Some(*i as f64),
            Reply::Bulk(_) | Reply::Status(_) => self.as_str()?.parse().ok(),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Reply]> {
        match self {
            Reply::Array(items) | Reply::Set(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Reply::Nil)
    }

    /// True for the `OK` acknowledgement
    pub fn is_ok(&self) -> bool {
        matches!(self, Reply::Status(s) if s == "OK")
    }

    /// Looks up a value by text key in a map reply
    pub fn map_get(&self, key: &str) -> Option<&Reply> {
        match self {
            Reply::Map(pairs) => pairs
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Short type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Reply::Nil => "nil",
            Reply::Status(_) => "status",
            Reply::Error(_) => "error",
            Reply::Int(_) => "integer",
            Reply::Double(_) => "double",
            Reply::Bool(_) => "boolean",
            Reply::Bulk(_) => "bulk",
            Reply::Array(_) => "array",
            Reply::Set(_) => "set",
            Reply::Map(_) => "map",
        }
    }
}

impl From<&str> for Reply {
    fn from(value: &str) -> Self {
        Reply::bulk(value)
    }
}

impl From<i64> for Reply {
    fn from(value: i64) -> Self {
        Reply::Int(value)
    }
}

impl From<bool> for Reply {
    fn from(value: bool) -> Self {
        Reply::Bool(value)
    }
}

impl From<Vec<Reply>> for Reply {
    fn from(value: Vec<Reply>) -> Self {
        Reply::Array(value)
    }
}

// =============================================================================
// JSON rendering
// =============================================================================

impl Serialize for Reply {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reply::Nil => serializer.serialize_none(),
            Reply::Status(s) => serializer.serialize_str(s),
            Reply::Error(e) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", e)?;
                map.end()
            }
            Reply::Int(i) => serializer.serialize_i64(*i),
            Reply::Double(d) => serializer.serialize_f64(*d),
            Reply::Bool(b) => serializer.serialize_bool(*b),
            Reply::Bulk(b) => match std::str::from_utf8(b) {
                Ok(s) => serializer.serialize_str(s),
                Err(_) => serializer.serialize_bytes(b),
            },
            Reply::Array(items) | Reply::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Reply::Map(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (k, v) in pairs {
                    let key = match k.as_str() {
                        Some(s) => s.to_string(),
                        None => k.as_int().map(|i| i.to_string()).unwrap_or_default(),
                    };
                    map.serialize_entry(&key, v)?;
                }
                map.end()
            }
        }
    }
}
