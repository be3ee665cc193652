//! CLI command implementations.

mod build;
mod render;

use std::path::Path;

use sc_doctree::{Document, Element};

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use render::RenderArgs;

/// Read a serialized document tree; the document name is the file stem.
pub(crate) fn load_document(path: &Path) -> Result<Document, CliError> {
    let docname = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| {
            CliError::Validation(format!("Cannot derive a document name from {}", path.display()))
        })?;

    let content = std::fs::read_to_string(path)?;
    let element: Element = serde_json::from_str(&content).map_err(|source| CliError::Json {
        path: path.display().to_string(),
        source,
    })?;
    tracing::debug!(path = %path.display(), docname, "Loaded document tree");
    Ok(Document::from_element(docname, &element)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("install.json");
        std::fs::write(
            &path,
            r##"{"kind": "document", "children": [{"kind": "paragraph", "children": [{"kind": "#text", "text": "Hi"}]}]}"##,
        )
        .unwrap();

        let document = load_document(&path).unwrap();

        assert_eq!(document.id().as_str(), "install");
        assert_eq!(document.node(document.root()).astext(), "Hi");
    }

    #[test]
    fn test_load_document_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{").unwrap();

        let err = load_document(&path).unwrap_err();

        assert!(matches!(err, CliError::Json { .. }));
    }

    #[test]
    fn test_load_document_rejects_non_document_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("para.json");
        std::fs::write(&path, r#"{"kind": "paragraph"}"#).unwrap();

        let err = load_document(&path).unwrap_err();

        assert!(matches!(err, CliError::Tree(_)));
    }
}
