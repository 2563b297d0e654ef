//! Reply shapes
//!
//! Per-kind transforms from a raw reply to the normalized result. The
//! protocol version is passed in explicitly; nothing here reads ambient
//! state.
//!
//! ## Shapes
//! - `Identity`: counts, acknowledgements, documents
//! - `FlatMap`: `[k1, v1, k2, v2]` becomes `{k1: v1, k2: v2}`
//! - `Boolean` / `BooleanList`: existence flags, native booleans under RESP3
//! - `Spellcheck`: RESP2 triplets kept; RESP3 keyed `results` map
//! - `SetToArray`: RESP3 sets returned as arrays

use tracing::trace;

use crate::error::{Result, StackError};
use crate::protocol::{ProtocolVersion, Reply, Token};

/// Normalization applied to a successful reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyShape {
    Identity,

    /// Alternating key/value list to map
    FlatMap,

    /// Introspection reply that may be narrowed to one field by a selector
    /// argument after the key
    InfoField,

    Boolean,

    BooleanList,

    Spellcheck,

    SetToArray,
}

impl ReplyShape {
    /// Transform `raw` for a command sent with `args`
    pub fn parse(&self, raw: Reply, protocol: ProtocolVersion, args: &[Token]) -> Result<Reply> {
        if let Reply::Error(message) = raw {
            return Err(StackError::Server(message));
        }

        trace!(shape = ?self, %protocol, reply = raw.type_name(), "Parsing reply");

        match self {
            ReplyShape::Identity => Ok(raw),
            ReplyShape::FlatMap => flat_map(raw),
            ReplyShape::InfoField => {
                if args.len() > 1 {
                    Ok(single_field(raw))
                } else {
                    flat_map(raw)
                }
            }
            ReplyShape::Boolean => Ok(match protocol {
                ProtocolVersion::Resp2 => raw,
                ProtocolVersion::Resp3 => to_bool(raw),
            }),
            ReplyShape::BooleanList => Ok(match (protocol, raw) {
                (ProtocolVersion::Resp3, Reply::Array(items)) => {
                    Reply::Array(items.into_iter().map(to_bool).collect())
                }
                (_, raw) => raw,
            }),
            ReplyShape::Spellcheck => match protocol {
                ProtocolVersion::Resp2 => spellcheck_resp2(raw),
                ProtocolVersion::Resp3 => spellcheck_resp3(raw),
            },
            ReplyShape::SetToArray => Ok(match raw {
                Reply::Set(items) => Reply::Array(items),
                other => other,
            }),
        }
    }
}

// =============================================================================
// Transforms
// =============================================================================

fn flat_map(raw: Reply) -> Result<Reply> {
    match raw {
        Reply::Map(_) => Ok(raw),
        Reply::Array(items) => pairs(items).map(Reply::Map),
        other => Err(StackError::unexpected_reply(format!(
            "expected a key/value list, got {}",
            other.type_name()
        ))),
    }
}

fn pairs(items: Vec<Reply>) -> Result<Vec<(Reply, Reply)>> {
    if items.len() % 2 != 0 {
        return Err(StackError::unexpected_reply(format!(
            "key/value list has odd length {}",
            items.len()
        )));
    }

    let mut out = Vec::with_capacity(items.len() / 2);
    let mut iter = items.into_iter();
    while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
        out.push((key, value));
    }
    Ok(out)
}

/// `[v]` or `{field: v}` to `v`
fn single_field(raw: Reply) -> Reply {
    match raw {
        Reply::Array(mut items) if items.len() == 1 => items.remove(0),
        Reply::Map(mut pairs) if pairs.len() == 1 => pairs.remove(0).1,
        other => other,
    }
}

fn to_bool(reply: Reply) -> Reply {
    match reply {
        Reply::Int(0) => Reply::Bool(false),
        Reply::Int(1) => Reply::Bool(true),
        other => other,
    }
}

/// Checks the `[[TERM, term, [[score, suggestion], ..]], ..]` layout.
/// Non-array replies pass through.
fn spellcheck_resp2(raw: Reply) -> Result<Reply> {
    let Reply::Array(entries) = &raw else {
        return Ok(raw);
    };

    for entry in entries {
        let valid = match entry.as_array() {
            Some([tag, term, Reply::Array(suggestions)]) => {
                tag.as_str().is_some()
                    && term.as_str().is_some()
                    && suggestions
                        .iter()
                        .all(|s| matches!(s.as_array(), Some([_, _])))
            }
            _ => false,
        };
        if !valid {
            return Err(StackError::unexpected_reply(
                "spellcheck entry must be [TERM, term, [[score, suggestion], ..]]",
            ));
        }
    }

    Ok(raw)
}

/// Produces `{results: {term: [{suggestion: score}, ..]}}`
fn spellcheck_resp3(raw: Reply) -> Result<Reply> {
    let results = match raw {
        Reply::Map(pairs) => find_results(pairs)?,
        // Flat `["results", {...}]`
        Reply::Array(items) if items.first().and_then(Reply::as_str) == Some("results") => {
            find_results(pairs(items)?)?
        }
        // Legacy triplets delivered on a RESP3 connection
        Reply::Array(items) => {
            let mut terms = Vec::with_capacity(items.len());
            for item in items {
                terms.push(triplet_to_term(item)?);
            }
            return Ok(Reply::map([("results", Reply::Map(terms))]));
        }
        other => {
            return Err(StackError::unexpected_reply(format!(
                "spellcheck reply must be a map, got {}",
                other.type_name()
            )))
        }
    };

    let terms = match results {
        Reply::Map(terms) => terms,
        Reply::Array(items) => pairs(items)?,
        other => {
            return Err(StackError::unexpected_reply(format!(
                "spellcheck results must be a map, got {}",
                other.type_name()
            )))
        }
    };

    let mut normalized = Vec::with_capacity(terms.len());
    for (term, suggestions) in terms {
        normalized.push((term, suggestion_list(suggestions)?));
    }

    Ok(Reply::map([("results", Reply::Map(normalized))]))
}

fn find_results(pairs: Vec<(Reply, Reply)>) -> Result<Reply> {
    pairs
        .into_iter()
        .find(|(k, _)| k.as_str() == Some("results"))
        .map(|(_, v)| v)
        .ok_or_else(|| StackError::unexpected_reply("spellcheck reply has no results entry"))
}

/// Each suggestion as a single-entry `{suggestion: score}` map
fn suggestion_list(reply: Reply) -> Result<Reply> {
    let items = match reply {
        Reply::Array(items) | Reply::Set(items) => items,
        other => {
            return Err(StackError::unexpected_reply(format!(
                "suggestions must be a list, got {}",
                other.type_name()
            )))
        }
    };

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let entries = match item {
            Reply::Map(entries) => entries,
            Reply::Array(items) => pairs(items)?,
            other => {
                return Err(StackError::unexpected_reply(format!(
                    "suggestion must be a map, got {}",
                    other.type_name()
                )))
            }
        };
        let entries = entries
            .into_iter()
            .map(|(suggestion, score)| Ok((suggestion, score_value(score)?)))
            .collect::<Result<Vec<_>>>()?;
        out.push(Reply::Map(entries));
    }
    Ok(Reply::Array(out))
}

fn triplet_to_term(item: Reply) -> Result<(Reply, Reply)> {
    let Reply::Array(parts) = item else {
        return Err(StackError::unexpected_reply("spellcheck entry must be an array"));
    };
    let [_, term, Reply::Array(suggestions)] = <[Reply; 3]>::try_from(parts)
        .map_err(|_| StackError::unexpected_reply("spellcheck entry must have three parts"))?
    else {
        return Err(StackError::unexpected_reply("spellcheck suggestions must be an array"));
    };

    let mut out = Vec::with_capacity(suggestions.len());
    for suggestion in suggestions {
        match suggestion {
            Reply::Array(mut pair) if pair.len() == 2 => {
                let name = pair.pop().unwrap_or(Reply::Nil);
                let score = pair.pop().unwrap_or(Reply::Nil);
                out.push(Reply::Map(vec![(name, score_value(score)?)]));
            }
            _ => {
                return Err(StackError::unexpected_reply(
                    "suggestion must be a [score, suggestion] pair",
                ))
            }
        }
    }
    Ok((term, Reply::Array(out)))
}

fn score_value(score: Reply) -> Result<Reply> {
    match score {
        Reply::Double(_) => Ok(score),
        other => other.as_double().map(Reply::Double).ok_or_else(|| {
            StackError::unexpected_reply(format!(
                "suggestion score must be numeric, got {}",
                other.type_name()
            ))
        }),
    }
}
