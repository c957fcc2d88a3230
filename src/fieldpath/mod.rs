//! Field path module - Addresses fields and list items in nested documents.
//!
//! A [`Path`] renders in dot/bracket notation (`spec.disks[0].type`), which
//! is the form ignore rules are written in and the form diff nodes carry.

mod path;

pub use path::*;
