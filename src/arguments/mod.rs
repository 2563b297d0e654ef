//! Argument Builders
//!
//! Fluent accumulators for commands with many modifiers. Each setter appends
//! one modifier fragment; `build()` emits the fragments in call order.
//!
//! ## Dialect
//! Query builders ([`SearchArguments`], [`SpellcheckArguments`]) always end
//! with a `DIALECT` fragment: the explicit value if `dialect()` was called,
//! otherwise [`DEFAULT_DIALECT`].
//!
//! ## Validation
//! Setters with an enumerated domain (`terms`, `sort_by`, `geo_filter`, `on`)
//! validate before mutating and return `Result`, so a rejected value never
//! leaves a partial fragment behind.

mod create;
mod list;
mod schema;
mod search;
mod spellcheck;

pub use create::CreateArguments;
pub use list::DEFAULT_DIALECT;
pub use schema::{
    CoordSystem, DistanceMetric, Field, GeoField, GeoShapeField, NumericField, Sortable, TagField,
    TextField, VectorAlgorithm, VectorField, VectorType,
};
pub use search::{ReturnField, SearchArguments};
pub use spellcheck::SpellcheckArguments;
