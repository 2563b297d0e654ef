//! Key positions
//!
//! Each command kind names the argument positions that hold routable keys.
//! Only those positions are rewritten by key prefixing; query text, numeric
//! literals and modifier keywords are never touched.

use crate::error::{Result, StackError};
use crate::protocol::Token;

/// Rule selecting the key positions of an argument list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPolicy {
    /// Argument 0 only
    First,

    /// Argument `first`, plus the `n` arguments after `count_at`, where `n`
    /// is the integer stored at `count_at`
    CountedAfter { first: usize, count_at: usize },

    /// Every argument except the trailing one
    AllButLast,

    /// The command addresses no keys
    None,
}

impl KeyPolicy {
    /// Indices of key arguments in `args`, ascending.
    ///
    /// Positions past the end of `args` are dropped.
    pub fn positions(&self, args: &[Token]) -> Result<Vec<usize>> {
        let positions = match *self {
            KeyPolicy::First => vec![0],
            KeyPolicy::None => Vec::new(),
            KeyPolicy::AllButLast => (0..args.len().saturating_sub(1)).collect(),
            KeyPolicy::CountedAfter { first, count_at } => {
                let mut positions = vec![first];
                if let Some(token) = args.get(count_at) {
                    let count = token
                        .as_int()
                        .filter(|n| *n >= 0)
                        .ok_or_else(|| {
                            StackError::invalid_argument(format!(
                                "Expected a key count at position {count_at}, got '{token}'"
                            ))
                        })?;
                    let available = args.len().saturating_sub(count_at + 1);
                    let count = usize::try_from(count).unwrap_or(usize::MAX).min(available);
                    positions.extend((count_at + 1..).take(count));
                }
                positions
            }
        };

        Ok(positions.into_iter().filter(|i| *i < args.len()).collect())
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeyPolicy::First => "first",
            KeyPolicy::CountedAfter { .. } => "counted",
            KeyPolicy::AllButLast => "all-but-last",
            KeyPolicy::None => "none",
        }
    }
}

/// Rewrite the tokens at `positions` with `prefix`
pub(crate) fn apply_prefix(args: &mut [Token], positions: &[usize], prefix: &str) {
    for &i in positions {
        if let Some(token) = args.get_mut(i) {
            *token = token.with_prefix(prefix);
        }
    }
}
