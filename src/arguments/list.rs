//! Ordered modifier list shared by the argument builders

use crate::protocol::Token;

/// Dialect appended when the caller never sets one
pub const DEFAULT_DIALECT: i64 = 2;

/// One modifier and the tokens it serializes to (keyword included)
#[derive(Debug, Clone, PartialEq)]
struct Fragment {
    modifier: &'static str,
    tokens: Vec<Token>,
}

/// Modifiers in call order plus an optional explicit dialect
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ArgumentList {
    fragments: Vec<Fragment>,
    dialect: Option<Token>,
}

impl ArgumentList {
    /// Keyword-only modifier, e.g. `NOCONTENT`
    pub(crate) fn flag(&mut self, modifier: &'static str) {
        self.push(modifier, Vec::new());
    }

    /// Keyword followed by its values
    pub(crate) fn push(&mut self, modifier: &'static str, values: Vec<Token>) {
        let mut tokens = Vec::with_capacity(values.len() + 1);
        tokens.push(Token::from(modifier));
        tokens.extend(values);
        self.fragments.push(Fragment { modifier, tokens });
    }

    /// Keyword, value count, then the values (`INKEYS 2 a b`)
    pub(crate) fn counted(&mut self, modifier: &'static str, values: Vec<Token>) {
        let mut with_count = Vec::with_capacity(values.len() + 1);
        with_count.push(Token::from(values.len()));
        with_count.extend(values);
        self.push(modifier, with_count);
    }

    /// Explicit dialect; a later call replaces an earlier one
    pub(crate) fn set_dialect(&mut self, dialect: Token) {
        self.dialect = Some(dialect);
    }

    /// Modifier keywords in call order
    pub(crate) fn modifiers(&self) -> Vec<&'static str> {
        self.fragments.iter().map(|f| f.modifier).collect()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.fragments.is_empty() && self.dialect.is_none()
    }

    /// Fragments in call order, without any dialect
    pub(crate) fn tokens(&self) -> Vec<Token> {
        self.fragments
            .iter()
            .flat_map(|f| f.tokens.iter().cloned())
            .collect()
    }

    /// Fragments in call order followed by the explicit or default dialect
    pub(crate) fn tokens_with_dialect(&self) -> Vec<Token> {
        let mut tokens = self.tokens();
        tokens.push(Token::from("DIALECT"));
        tokens.push(
            self.dialect
                .clone()
                .unwrap_or(Token::Int(DEFAULT_DIALECT)),
        );
        tokens
    }
}

/// Uppercased value if it belongs to `allowed` (case-insensitive)
pub(crate) fn enumerated(value: &str, allowed: &[&'static str]) -> Option<&'static str> {
    allowed
        .iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(value))
}

/// Collects anything token-like into a vector
pub(crate) fn collect_tokens<I, T>(values: I) -> Vec<Token>
where
    I: IntoIterator<Item = T>,
    T: Into<Token>,
{
    values.into_iter().map(Into::into).collect()
}
