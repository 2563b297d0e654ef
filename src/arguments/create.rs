//! FT.CREATE index options
//!
//! Everything that precedes the `SCHEMA` clause. Index creation takes no
//! dialect, so nothing is appended at build time.

use super::list::{collect_tokens, enumerated, ArgumentList};
use crate::error::{Result, StackError};
use crate::protocol::Token;

const INDEX_TARGETS: &[&str] = &["HASH", "JSON"];

/// Builder for index creation options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateArguments {
    list: ArgumentList,
}

impl CreateArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document type to index, `HASH` or `JSON`
    pub fn on(&mut self, target: &str) -> Result<&mut Self> {
        let target = enumerated(target, INDEX_TARGETS)
            .ok_or_else(|| StackError::wrong_modifier(INDEX_TARGETS))?;
        self.list.push("ON", vec![target.into()]);
        Ok(self)
    }

    /// Key prefixes of the documents to index
    pub fn prefix<I, T>(&mut self, prefixes: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        self.list.counted("PREFIX", collect_tokens(prefixes));
        self
    }

    /// Aggregation-style filter expression applied to documents
    pub fn filter(&mut self, expression: &str) -> &mut Self {
        self.list.push("FILTER", vec![expression.into()]);
        self
    }

    pub fn language(&mut self, language: &str) -> &mut Self {
        self.list.push("LANGUAGE", vec![language.into()]);
        self
    }

    pub fn language_field(&mut self, field: &str) -> &mut Self {
        self.list.push("LANGUAGE_FIELD", vec![field.into()]);
        self
    }

    /// Default document score between 0 and 1
    pub fn score(&mut self, score: f64) -> &mut Self {
        self.list.push("SCORE", vec![score.into()]);
        self
    }

    pub fn score_field(&mut self, field: &str) -> &mut Self {
        self.list.push("SCORE_FIELD", vec![field.into()]);
        self
    }

    pub fn payload_field(&mut self, field: &str) -> &mut Self {
        self.list.push("PAYLOAD_FIELD", vec![field.into()]);
        self
    }

    pub fn max_text_fields(&mut self) -> &mut Self {
        self.list.flag("MAXTEXTFIELDS");
        self
    }

    /// Expire the index after the given idle period in seconds
    pub fn temporary(&mut self, seconds: u64) -> &mut Self {
        self.list.push("TEMPORARY", vec![Token::Int(seconds as i64)]);
        self
    }

    pub fn no_offsets(&mut self) -> &mut Self {
        self.list.flag("NOOFFSETS");
        self
    }

    pub fn no_highlight(&mut self) -> &mut Self {
        self.list.flag("NOHL");
        self
    }

    pub fn no_fields(&mut self) -> &mut Self {
        self.list.flag("NOFIELDS");
        self
    }

    pub fn no_freqs(&mut self) -> &mut Self {
        self.list.flag("NOFREQS");
        self
    }

    /// Custom stop word list; an empty list disables stop words
    pub fn stop_words<I, T>(&mut self, words: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        self.list.counted("STOPWORDS", collect_tokens(words));
        self
    }

    pub fn skip_initial_scan(&mut self) -> &mut Self {
        self.list.flag("SKIPINITIALSCAN");
        self
    }

    pub fn modifiers(&self) -> Vec<&'static str> {
        self.list.modifiers()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Serialize to tokens in call order
    pub fn build(&self) -> Vec<Token> {
        self.list.tokens()
    }
}
