//! Value module - In-memory representation of JSON/YAML documents.
//!
//! Both compared documents and the payloads carried by diff nodes use
//! this type.

mod value;

pub use value::*;
