//! Documents stored in local JSON or YAML files.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{expect_object, DocumentSource, SourceError};
use crate::value::{self, Map};

/// FileSource reads documents from files.
///
/// Names are paths, resolved against `base` when relative. Files ending in
/// `.json` are parsed as JSON, anything else as YAML (which also accepts
/// JSON). YAML mapping keys must be strings.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    base: Option<PathBuf>,
}

impl FileSource {
    pub fn new() -> Self {
        FileSource { base: None }
    }

    /// Resolves relative names against `base`.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        FileSource {
            base: Some(base.into()),
        }
    }

    fn resolve(&self, name: &str) -> PathBuf {
        match &self.base {
            Some(base) => base.join(name),
            None => PathBuf::from(name),
        }
    }

    /// Parses document text, choosing the format from the path.
    pub fn parse(path: &Path, content: &str) -> Result<Map, SourceError> {
        let origin = path.display().to_string();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            value::from_json(content).map_err(|e| e.to_string())
        } else {
            value::from_yaml(content).map_err(|e| e.to_string())
        };

        let value = parsed.map_err(|message| SourceError::Parse {
            origin: origin.clone(),
            message,
        })?;
        expect_object(value, &origin)
    }
}

impl DocumentSource for FileSource {
    fn fetch(&self, name: &str) -> Result<Map, SourceError> {
        let path = self.resolve(name);
        info!(path = %path.display(), "reading document");

        let content = fs::read_to_string(&path).map_err(|e| SourceError::Io {
            path: path.clone(),
            source: e,
        })?;
        Self::parse(&path, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use tempfile::TempDir;

    #[test]
    fn test_fetch_json_and_yaml() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), r#"{"name": "a", "size": 10}"#).unwrap();
        fs::write(dir.path().join("b.yaml"), "name: b\nsize: 10\n").unwrap();

        let source = FileSource::with_base(dir.path());
        let a = source.fetch("a.json").unwrap();
        let b = source.fetch("b.yaml").unwrap();

        assert_eq!(a.get("name"), Some(&Value::String("a".into())));
        assert_eq!(a.get("size"), b.get("size"));
    }

    #[test]
    fn test_fetch_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = FileSource::with_base(dir.path()).fetch("nope.json").unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn test_parse_errors() {
        let err = FileSource::parse(Path::new("broken.json"), "{").unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));

        let err = FileSource::parse(Path::new("list.yaml"), "- a\n- b\n").unwrap_err();
        assert!(matches!(err, SourceError::NotAnObject { .. }));
    }

    #[test]
    fn test_parse_names_non_string_keys() {
        let err = FileSource::parse(Path::new("svc.yaml"), "ports:\n  443: https\n").unwrap_err();
        match err {
            SourceError::Parse { origin, message } => {
                assert_eq!(origin, "svc.yaml");
                assert!(message.contains("mapping key 443 is not a string"));
            }
            other => panic!("expected a parse error, got {:?}", other),
        }
    }
}
