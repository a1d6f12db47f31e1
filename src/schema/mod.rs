//! Stream output schemas
//!
//! Every stream declares a JSON Schema (draft-07) for its records,
//! emitted in SCHEMA messages and in the discovery catalog. Properties
//! are nullable by default, matching how the source API omits fields.

mod types;

pub use types::{JsonSchema, JsonType, JsonTypeOrArray, SchemaProperty};

#[cfg(test)]
mod tests;
