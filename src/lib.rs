//! # gcdiff
//!
//! Structural comparison of cloud resource descriptions and other JSON/YAML
//! documents.
//!
//! Two documents are compared field by field into a tree of differences,
//! skipping fields that always differ between resources (identifiers,
//! timestamps, fingerprints). The tree can be rendered as a text report or
//! serialized as JSON.
//!
//! ## Modules
//!
//! - [`value`] - In-memory representation of JSON/YAML documents
//! - [`fieldpath`] - Addresses of fields and list items inside a document
//! - [`config`] - Ignore rules and their configuration file
//! - [`diff`] - The differ and the difference tree it produces
//! - [`render`] - Text reports of a difference tree
//! - [`source`] - Loading documents from files or the `gcloud` command line

pub mod config;
pub mod diff;
pub mod fieldpath;
pub mod render;
pub mod source;
pub mod value;

pub use config::{Config, ConfigError, RuleSet};
pub use diff::{flatten, DiffKind, DiffNode, DiffSummary, Differ};
pub use fieldpath::{Path, PathElement};
pub use render::{DiffRenderer, GroupedRenderer, HierarchicalRenderer, Palette, Style};
pub use source::{DocumentSource, FileSource, GcloudSource, SourceError};
pub use value::{Map, Value, ValueKind};
