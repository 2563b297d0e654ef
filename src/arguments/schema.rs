//! Index schema fields
//!
//! Value objects rendered into the `SCHEMA` clause of FT.CREATE. Each field
//! renders as
//!
//! ```text
//! identifier [AS alias] KIND [kind options] [INDEXEMPTY] [SORTABLE [UNF]] [NOINDEX]
//! ```

use crate::protocol::Token;

/// Sorting support for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sortable {
    #[default]
    No,
    Yes,
    /// Sortable without normalizing the stored value
    Unf,
}

/// Options shared by every field kind
#[derive(Debug, Clone, PartialEq, Default)]
struct Common {
    identifier: String,
    alias: Option<String>,
    sortable: Sortable,
    no_index: bool,
    index_empty: bool,
}

impl Common {
    fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    fn head(&self, kind: &'static str) -> Vec<Token> {
        let mut tokens = vec![Token::from(self.identifier.as_str())];
        if let Some(alias) = &self.alias {
            tokens.push("AS".into());
            tokens.push(alias.into());
        }
        tokens.push(kind.into());
        tokens
    }

    fn tail(&self, tokens: &mut Vec<Token>) {
        if self.index_empty {
            tokens.push("INDEXEMPTY".into());
        }
        match self.sortable {
            Sortable::No => {}
            Sortable::Yes => tokens.push("SORTABLE".into()),
            Sortable::Unf => {
                tokens.push("SORTABLE".into());
                tokens.push("UNF".into());
            }
        }
        if self.no_index {
            tokens.push("NOINDEX".into());
        }
    }
}

/// Setters available on every field kind
macro_rules! common_setters {
    ($ty:ty) => {
        impl $ty {
            /// Name the field is queried by
            pub fn alias(mut self, alias: impl Into<String>) -> Self {
                self.common.alias = Some(alias.into());
                self
            }

            pub fn sortable(mut self, sortable: Sortable) -> Self {
                self.common.sortable = sortable;
                self
            }

            /// Store the field for sorting/returning only
            pub fn no_index(mut self) -> Self {
                self.common.no_index = true;
                self
            }

            /// Allow matching documents whose value is an empty string
            pub fn index_empty(mut self) -> Self {
                self.common.index_empty = true;
                self
            }

            pub fn identifier(&self) -> &str {
                &self.common.identifier
            }
        }
    };
}

// =============================================================================
// Text
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    common: Common,
    no_stem: bool,
    weight: f64,
    phonetic: Option<String>,
    with_suffix_trie: bool,
}

impl TextField {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            common: Common::new(identifier),
            no_stem: false,
            weight: 1.0,
            phonetic: None,
            with_suffix_trie: false,
        }
    }

    pub fn no_stem(mut self) -> Self {
        self.no_stem = true;
        self
    }

    /// Importance of the field in scoring; 1.0 is not sent
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Phonetic matcher, e.g. `dm:en`
    pub fn phonetic(mut self, matcher: impl Into<String>) -> Self {
        self.phonetic = Some(matcher.into());
        self
    }

    pub fn with_suffix_trie(mut self) -> Self {
        self.with_suffix_trie = true;
        self
    }

    fn to_tokens(&self) -> Vec<Token> {
        let mut tokens = self.common.head("TEXT");
        if self.no_stem {
            tokens.push("NOSTEM".into());
        }
        if self.weight != 1.0 {
            tokens.push("WEIGHT".into());
            tokens.push(self.weight.into());
        }
        if let Some(phonetic) = &self.phonetic {
            tokens.push("PHONETIC".into());
            tokens.push(phonetic.into());
        }
        if self.with_suffix_trie {
            tokens.push("WITHSUFFIXTRIE".into());
        }
        self.common.tail(&mut tokens);
        tokens
    }
}

common_setters!(TextField);

// =============================================================================
// Tag
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TagField {
    common: Common,
    separator: Option<char>,
    case_sensitive: bool,
    with_suffix_trie: bool,
}

impl TagField {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            common: Common::new(identifier),
            separator: None,
            case_sensitive: false,
            with_suffix_trie: false,
        }
    }

    /// Tag separator; the server default is `,`
    pub fn separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }

    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }

    pub fn with_suffix_trie(mut self) -> Self {
        self.with_suffix_trie = true;
        self
    }

    fn to_tokens(&self) -> Vec<Token> {
        let mut tokens = self.common.head("TAG");
        if let Some(separator) = self.separator {
            tokens.push("SEPARATOR".into());
            tokens.push(separator.to_string().into());
        }
        if self.case_sensitive {
            tokens.push("CASESENSITIVE".into());
        }
        if self.with_suffix_trie {
            tokens.push("WITHSUFFIXTRIE".into());
        }
        self.common.tail(&mut tokens);
        tokens
    }
}

common_setters!(TagField);

// =============================================================================
// Numeric and Geo
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct NumericField {
    common: Common,
}

impl NumericField {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            common: Common::new(identifier),
        }
    }

    fn to_tokens(&self) -> Vec<Token> {
        let mut tokens = self.common.head("NUMERIC");
        self.common.tail(&mut tokens);
        tokens
    }
}

common_setters!(NumericField);

#[derive(Debug, Clone, PartialEq)]
pub struct GeoField {
    common: Common,
}

impl GeoField {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            common: Common::new(identifier),
        }
    }

    fn to_tokens(&self) -> Vec<Token> {
        let mut tokens = self.common.head("GEO");
        self.common.tail(&mut tokens);
        tokens
    }
}

common_setters!(GeoField);

/// Coordinate system of a geo-shape field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordSystem {
    /// Cartesian X/Y
    Flat,
    /// Geographic longitude/latitude
    Spherical,
}

impl CoordSystem {
    pub fn as_str(self) -> &'static str {
        match self {
            CoordSystem::Flat => "FLAT",
            CoordSystem::Spherical => "SPHERICAL",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoShapeField {
    common: Common,
    coord_system: Option<CoordSystem>,
}

impl GeoShapeField {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            common: Common::new(identifier),
            coord_system: None,
        }
    }

    /// Coordinate system; the server default is spherical
    pub fn coord_system(mut self, coord_system: CoordSystem) -> Self {
        self.coord_system = Some(coord_system);
        self
    }

    fn to_tokens(&self) -> Vec<Token> {
        let mut tokens = self.common.head("GEOSHAPE");
        if let Some(coord_system) = self.coord_system {
            tokens.push(coord_system.as_str().into());
        }
        self.common.tail(&mut tokens);
        tokens
    }
}

common_setters!(GeoShapeField);

// =============================================================================
// Vector
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorAlgorithm {
    Flat,
    Hnsw,
}

impl VectorAlgorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            VectorAlgorithm::Flat => "FLAT",
            VectorAlgorithm::Hnsw => "HNSW",
        }
    }
}

/// Element type of stored vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorType {
    Float32,
    Float64,
    BFloat16,
    Float16,
    Int8,
    UInt8,
}

impl VectorType {
    pub fn as_str(self) -> &'static str {
        match self {
            VectorType::Float32 => "FLOAT32",
            VectorType::Float64 => "FLOAT64",
            VectorType::BFloat16 => "BFLOAT16",
            VectorType::Float16 => "FLOAT16",
            VectorType::Int8 => "INT8",
            VectorType::UInt8 => "UINT8",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMetric {
    L2,
    Ip,
    Cosine,
}

impl DistanceMetric {
    pub fn as_str(self) -> &'static str {
        match self {
            DistanceMetric::L2 => "L2",
            DistanceMetric::Ip => "IP",
            DistanceMetric::Cosine => "COSINE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VectorField {
    common: Common,
    algorithm: VectorAlgorithm,
    data_type: VectorType,
    dim: usize,
    metric: DistanceMetric,
    attributes: Vec<(String, Token)>,
}

impl VectorField {
    pub fn new(
        identifier: impl Into<String>,
        algorithm: VectorAlgorithm,
        data_type: VectorType,
        dim: usize,
        metric: DistanceMetric,
    ) -> Self {
        Self {
            common: Common::new(identifier),
            algorithm,
            data_type,
            dim,
            metric,
            attributes: Vec::new(),
        }
    }

    /// Algorithm tuning attribute such as `M` or `EF_CONSTRUCTION`
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Token>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    fn to_tokens(&self) -> Vec<Token> {
        let mut tokens = self.common.head("VECTOR");
        tokens.push(self.algorithm.as_str().into());
        tokens.push((6 + self.attributes.len() * 2).into());
        tokens.extend([
            Token::from("TYPE"),
            Token::from(self.data_type.as_str()),
            Token::from("DIM"),
            Token::from(self.dim),
            Token::from("DISTANCE_METRIC"),
            Token::from(self.metric.as_str()),
        ]);
        for (name, value) in &self.attributes {
            tokens.push(name.into());
            tokens.push(value.clone());
        }
        self.common.tail(&mut tokens);
        tokens
    }
}

common_setters!(VectorField);

// =============================================================================
// Field
// =============================================================================

/// Closed set of schema field kinds
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Text(TextField),
    Tag(TagField),
    Numeric(NumericField),
    Geo(GeoField),
    GeoShape(GeoShapeField),
    Vector(VectorField),
}

impl Field {
    pub fn identifier(&self) -> &str {
        match self {
            Field::Text(f) => f.identifier(),
            Field::Tag(f) => f.identifier(),
            Field::Numeric(f) => f.identifier(),
            Field::Geo(f) => f.identifier(),
            Field::GeoShape(f) => f.identifier(),
            Field::Vector(f) => f.identifier(),
        }
    }

    /// Field definition tokens, without the `SCHEMA` keyword
    pub fn to_tokens(&self) -> Vec<Token> {
        match self {
            Field::Text(f) => f.to_tokens(),
            Field::Tag(f) => f.to_tokens(),
            Field::Numeric(f) => f.to_tokens(),
            Field::Geo(f) => f.to_tokens(),
            Field::GeoShape(f) => f.to_tokens(),
            Field::Vector(f) => f.to_tokens(),
        }
    }
}

macro_rules! field_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Field {
                fn from(value: $ty) -> Self {
                    Field::$variant(value)
                }
            }
        )*
    };
}

field_from!(
    Text => TextField,
    Tag => TagField,
    Numeric => NumericField,
    Geo => GeoField,
    GeoShape => GeoShapeField,
    Vector => VectorField,
);
