//! Argument fragments
//!
//! One argument slot may hold a scalar, a nested list, a JSON document, a
//! builder or a schema. [`Arg::flatten_into`] is the single walk that turns
//! any of them into flat tokens, preserving order.

use bytes::Bytes;

use crate::arguments::{CreateArguments, Field, SearchArguments, SpellcheckArguments};
use crate::protocol::Token;

/// A heterogeneous command argument
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Token(Token),

    /// Variadic items passed as one logical argument
    List(Vec<Arg>),

    /// JSON document, sent as compact text
    Json(serde_json::Value),

    Search(SearchArguments),

    Spellcheck(SpellcheckArguments),

    Create(CreateArguments),

    /// Schema clause: `SCHEMA` followed by each field definition
    Schema(Vec<Field>),
}

impl Arg {
    /// Append this argument's tokens to `out`
    pub fn flatten_into(&self, out: &mut Vec<Token>) {
        match self {
            Arg::Token(token) => out.push(token.clone()),
            Arg::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
            Arg::Json(value) => out.push(Token::Str(value.to_string())),
            Arg::Search(args) => out.extend(args.build()),
            Arg::Spellcheck(args) => out.extend(args.build()),
            Arg::Create(args) => out.extend(args.build()),
            Arg::Schema(fields) => {
                out.push(Token::from("SCHEMA"));
                for field in fields {
                    out.extend(field.to_tokens());
                }
            }
        }
    }

    /// Flatten a sequence of arguments
    pub fn flatten(args: &[Arg]) -> Vec<Token> {
        let mut out = Vec::with_capacity(args.len());
        for arg in args {
            arg.flatten_into(&mut out);
        }
        out
    }

    /// True if this argument (or a nested one) emits its own `DIALECT`
    pub fn carries_dialect(&self) -> bool {
        match self {
            Arg::Search(_) | Arg::Spellcheck(_) => true,
            Arg::List(items) => items.iter().any(Arg::carries_dialect),
            _ => false,
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

macro_rules! token_arg {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Arg::Token(Token::from(value))
                }
            }
        )*
    };
}

token_arg!(&str, String, &String, i32, i64, u32, usize, f64, Bytes);

impl From<Token> for Arg {
    fn from(value: Token) -> Self {
        Arg::Token(value)
    }
}

impl From<serde_json::Value> for Arg {
    fn from(value: serde_json::Value) -> Self {
        Arg::Json(value)
    }
}

impl From<SearchArguments> for Arg {
    fn from(value: SearchArguments) -> Self {
        Arg::Search(value)
    }
}

impl From<&mut SearchArguments> for Arg {
    fn from(value: &mut SearchArguments) -> Self {
        Arg::Search(value.clone())
    }
}

impl From<SpellcheckArguments> for Arg {
    fn from(value: SpellcheckArguments) -> Self {
        Arg::Spellcheck(value)
    }
}

impl From<&mut SpellcheckArguments> for Arg {
    fn from(value: &mut SpellcheckArguments) -> Self {
        Arg::Spellcheck(value.clone())
    }
}

impl From<CreateArguments> for Arg {
    fn from(value: CreateArguments) -> Self {
        Arg::Create(value)
    }
}

impl From<&mut CreateArguments> for Arg {
    fn from(value: &mut CreateArguments) -> Self {
        Arg::Create(value.clone())
    }
}

impl From<Vec<Field>> for Arg {
    fn from(value: Vec<Field>) -> Self {
        Arg::Schema(value)
    }
}

macro_rules! list_arg {
    ($($ty:ty),*) => {
        $(
            impl From<Vec<$ty>> for Arg {
                fn from(value: Vec<$ty>) -> Self {
                    Arg::List(value.into_iter().map(Arg::from).collect())
                }
            }
        )*
    };
}

list_arg!(Arg, Token, &str, String, i32, i64, f64, Bytes, serde_json::Value);

impl<T: Into<Arg>, const N: usize> From<[T; N]> for Arg {
    fn from(value: [T; N]) -> Self {
        Arg::List(value.into_iter().map(Into::into).collect())
    }
}

/// Builds a `Vec<Arg>` from heterogeneous values
///
/// ```
/// use stackcmd::args;
/// use stackcmd::arguments::SpellcheckArguments;
///
/// let mut modifiers = SpellcheckArguments::new();
/// modifiers.distance(2);
/// let args = args!["index", "query", modifiers];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::command::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        vec![$($crate::command::Arg::from($arg)),+]
    };
}
