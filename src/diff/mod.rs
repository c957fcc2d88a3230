//! Diff module - Structural comparison of documents.
//!
//! [`Differ`] turns two documents into a tree of [`DiffNode`]s, [`flatten`]
//! lists its differing leaves in a stable order, and [`record`] encodes the
//! tree for machine consumers.

mod differ;
mod node;
pub mod record;


pub use differ::*;
pub use node::*;
