//! FT.SEARCH modifiers

use super::list::{collect_tokens, enumerated, ArgumentList};
use crate::error::{Result, StackError};
use crate::protocol::Token;

const SORT_ORDERS: &[&str] = &["ASC", "DESC"];
const GEO_UNITS: &[&str] = &["m", "km", "mi", "ft"];

/// Attribute returned by `RETURN`, optionally renamed with `AS`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnField {
    pub identifier: String,
    pub alias: Option<String>,
}

impl ReturnField {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

impl From<&str> for ReturnField {
    fn from(value: &str) -> Self {
        ReturnField::new(value)
    }
}

impl From<(&str, &str)> for ReturnField {
    fn from((identifier, alias): (&str, &str)) -> Self {
        ReturnField::new(identifier).with_alias(alias)
    }
}

/// Builder for the modifiers of a search query
///
/// Modifiers serialize in the order their setters were called, followed by
/// `DIALECT` with the explicit value or [`DEFAULT_DIALECT`](super::DEFAULT_DIALECT).
///
/// ```
/// use stackcmd::arguments::SearchArguments;
///
/// let mut args = SearchArguments::new();
/// args.with_scores().limit(0, 10);
/// assert_eq!(args.build().len(), 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchArguments {
    list: ArgumentList,
}

impl SearchArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return document ids only
    pub fn no_content(&mut self) -> &mut Self {
        self.list.flag("NOCONTENT");
        self
    }

    /// Disable stemming of query terms
    pub fn verbatim(&mut self) -> &mut Self {
        self.list.flag("VERBATIM");
        self
    }

    pub fn no_stop_words(&mut self) -> &mut Self {
        self.list.flag("NOSTOPWORDS");
        self
    }

    pub fn with_scores(&mut self) -> &mut Self {
        self.list.flag("WITHSCORES");
        self
    }

    pub fn with_payloads(&mut self) -> &mut Self {
        self.list.flag("WITHPAYLOADS");
        self
    }

    pub fn with_sort_keys(&mut self) -> &mut Self {
        self.list.flag("WITHSORTKEYS");
        self
    }

    /// Numeric range filter; bounds accept `-inf`, `+inf` and `(` exclusion
    pub fn search_filter(
        &mut self,
        field: &str,
        min: impl Into<Token>,
        max: impl Into<Token>,
    ) -> &mut Self {
        self.list
            .push("FILTER", vec![field.into(), min.into(), max.into()]);
        self
    }

    /// Radius filter around a longitude/latitude point
    ///
    /// `unit` must be one of `m`, `km`, `mi`, `ft`.
    pub fn geo_filter(
        &mut self,
        field: &str,
        longitude: f64,
        latitude: f64,
        radius: impl Into<Token>,
        unit: &str,
    ) -> Result<&mut Self> {
        let unit = enumerated(unit, GEO_UNITS).ok_or_else(|| StackError::wrong_modifier(GEO_UNITS))?;
        self.list.push(
            "GEOFILTER",
            vec![
                field.into(),
                longitude.into(),
                latitude.into(),
                radius.into(),
                unit.into(),
            ],
        );
        Ok(self)
    }

    /// Limit results to the given document keys
    pub fn in_keys<I, T>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        self.list.counted("INKEYS", collect_tokens(keys));
        self
    }

    /// Limit matching to the given fields
    pub fn in_fields<I, T>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        self.list.counted("INFIELDS", collect_tokens(fields));
        self
    }

    /// Fields to return; `count` is sent as given
    pub fn add_return<I, F>(&mut self, count: usize, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = F>,
        F: Into<ReturnField>,
    {
        let mut values = vec![Token::from(count)];
        for field in fields {
            let field = field.into();
            values.push(field.identifier.into());
            if let Some(alias) = field.alias {
                values.push("AS".into());
                values.push(alias.into());
            }
        }
        self.list.push("RETURN", values);
        self
    }

    /// Return text fragments around matches
    pub fn summarize<I, T>(&mut self, fields: I, frags: usize, len: usize, separator: &str) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        let mut values = fields_clause(collect_tokens(fields));
        values.extend([
            Token::from("FRAGS"),
            Token::from(frags),
            Token::from("LEN"),
            Token::from(len),
            Token::from("SEPARATOR"),
            Token::from(separator),
        ]);
        self.list.push("SUMMARIZE", values);
        self
    }

    /// Wrap matched terms in the given tags
    pub fn highlight<I, T>(&mut self, fields: I, open_tag: &str, close_tag: &str) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        let mut values = fields_clause(collect_tokens(fields));
        values.extend([
            Token::from("TAGS"),
            Token::from(open_tag),
            Token::from(close_tag),
        ]);
        self.list.push("HIGHLIGHT", values);
        self
    }

    /// Allowed number of intervening terms between phrase terms
    pub fn slop(&mut self, slop: i64) -> &mut Self {
        self.list.push("SLOP", vec![slop.into()]);
        self
    }

    /// Query timeout in milliseconds
    pub fn timeout(&mut self, millis: u32) -> &mut Self {
        self.list.push("TIMEOUT", vec![millis.into()]);
        self
    }

    pub fn in_order(&mut self) -> &mut Self {
        self.list.flag("INORDER");
        self
    }

    pub fn language(&mut self, language: &str) -> &mut Self {
        self.list.push("LANGUAGE", vec![language.into()]);
        self
    }

    pub fn expander(&mut self, expander: &str) -> &mut Self {
        self.list.push("EXPANDER", vec![expander.into()]);
        self
    }

    pub fn scorer(&mut self, scorer: &str) -> &mut Self {
        self.list.push("SCORER", vec![scorer.into()]);
        self
    }

    pub fn explain_score(&mut self) -> &mut Self {
        self.list.flag("EXPLAINSCORE");
        self
    }

    pub fn payload(&mut self, payload: &str) -> &mut Self {
        self.list.push("PAYLOAD", vec![payload.into()]);
        self
    }

    /// Sort by an attribute; `order` must be `ASC` or `DESC`
    pub fn sort_by(&mut self, attribute: &str, order: &str) -> Result<&mut Self> {
        let order = enumerated(order, SORT_ORDERS).ok_or_else(|| StackError::wrong_modifier(SORT_ORDERS))?;
        self.list.push("SORTBY", vec![attribute.into(), order.into()]);
        Ok(self)
    }

    pub fn limit(&mut self, offset: usize, num: usize) -> &mut Self {
        self.list.push("LIMIT", vec![offset.into(), num.into()]);
        self
    }

    /// Query parameters as alternating name/value items
    ///
    /// An odd number of items is rejected.
    pub fn params<I, T>(&mut self, params: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        let values = collect_tokens(params);
        if values.len() % 2 != 0 {
            return Err(StackError::invalid_argument(format!(
                "PARAMS expects name/value pairs, got {} items",
                values.len()
            )));
        }
        self.list.counted("PARAMS", values);
        Ok(self)
    }

    /// Explicit query dialect; suppresses the default one
    pub fn dialect(&mut self, dialect: impl Into<Token>) -> &mut Self {
        self.list.set_dialect(dialect.into());
        self
    }

    /// Modifier keywords in call order
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

/// `FIELDS <n> <field>...`, or nothing when no fields are given
fn fields_clause(fields: Vec<Token>) -> Vec<Token> {
    if fields.is_empty() {
        return Vec::new();
    }
    let mut values = Vec::with_capacity(fields.len() + 2);
    values.push(Token::from("FIELDS"));
    values.push(Token::from(fields.len()));
    values.extend(fields);
    values
}
