//! Source module - Obtaining the documents to compare.
//!
//! A [`DocumentSource`] turns a resource name into a document. Local files
//! are read by [`FileSource`]; live resources are described through the
//! `gcloud` command line by [`GcloudSource`].

mod file;
mod gcloud;

pub use file::*;
pub use gcloud::*;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::value::{Map, Value, ValueKind};

/// SourceError represents a failure to obtain a document.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to run {program}: {source}")]
    Spawn { program: String, source: io::Error },

    #[error("command `{command}` failed ({status}): {stderr}")]
    Command {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("failed to parse {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("{origin} is a {kind}, expected an object")]
    NotAnObject { origin: String, kind: ValueKind },
}

/// DocumentSource fetches one document by name.
pub trait DocumentSource {
    fn fetch(&self, name: &str) -> Result<Map, SourceError>;
}

/// Checks that a parsed document is an object.
fn expect_object(value: Value, origin: &str) -> Result<Map, SourceError> {
    let kind = value.kind();
    value.into_map().ok_or_else(|| SourceError::NotAnObject {
        origin: origin.to_string(),
        kind,
    })
}
