//! FT.SPELLCHECK modifiers

use super::list::{collect_tokens, enumerated, ArgumentList};
use crate::error::{Result, StackError};
use crate::protocol::Token;

const TERMS_MODIFIERS: &[&str] = &["INCLUDE", "EXCLUDE"];

/// Builder for the modifiers of a spellcheck query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpellcheckArguments {
    list: ArgumentList,
}

impl SpellcheckArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum Levenshtein distance for suggestions
    pub fn distance(&mut self, distance: u32) -> &mut Self {
        self.list.push("DISTANCE", vec![distance.into()]);
        self
    }

    /// Include or exclude suggestions from a custom dictionary
    ///
    /// `modifier` must be `INCLUDE` or `EXCLUDE`; anything else fails without
    /// touching the builder.
    pub fn terms<I, T>(&mut self, dictionary: &str, modifier: &str, terms: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        let modifier = enumerated(modifier, TERMS_MODIFIERS)
            .ok_or_else(|| StackError::wrong_modifier(TERMS_MODIFIERS))?;

        let mut values = vec![Token::from(modifier), Token::from(dictionary)];
        values.extend(collect_tokens(terms));
        self.list.push("TERMS", values);
        Ok(self)
    }

    /// Shorthand for `terms(dictionary, "INCLUDE", terms)`
    pub fn include_terms<I, T>(&mut self, dictionary: &str, terms: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        let mut values = vec![Token::from("INCLUDE"), Token::from(dictionary)];
        values.extend(collect_tokens(terms));
        self.list.push("TERMS", values);
        self
    }

    /// Explicit query dialect; suppresses the default one
    pub fn dialect(&mut self, dialect: impl Into<Token>) -> &mut Self {
        self.list.set_dialect(dialect.into());
        self
    }

    pub fn modifiers(&self) -> Vec<&'static str> {
        self.list.modifiers()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Serialize to tokens, dialect last
    pub fn build(&self) -> Vec<Token> {
        self.list.tokens_with_dialect()
    }
}
