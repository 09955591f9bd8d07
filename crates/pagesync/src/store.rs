//! Documents on disk.
//!
//! A document is a file; its editor settings, including the attached page,
//! live in a JSON sidecar named `<file>.confluence.json`.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use pagesync_editor::{DocumentSession, NewDocument};
use pagesync_markup::HTML_SYNTAX;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::CliError;

const SIDECAR_SUFFIX: &str = ".confluence.json";

/// Syntax of documents with an unknown extension.
const PLAIN_TEXT: &str = "Plain Text";

/// Path of the settings sidecar for `path`.
pub(crate) fn sidecar_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(SIDECAR_SUFFIX);
    PathBuf::from(name)
}

/// Syntax identifier for a file extension.
pub(crate) fn syntax_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "md" | "markdown" => Some("Markdown"),
        "rst" => Some("reStructuredText"),
        "html" | "htm" => Some(HTML_SYNTAX),
        _ => None,
    }
}

/// Open a document with its saved settings.
///
/// `syntax` overrides the syntax derived from the extension.
pub(crate) fn load(path: &Path, syntax: Option<&str>) -> Result<DocumentSession, CliError> {
    let text = fs::read_to_string(path)?;
    let syntax = syntax
        .or_else(|| syntax_for_path(path))
        .unwrap_or(PLAIN_TEXT);
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    let sidecar = sidecar_path(path);
    let settings: Map<String, Value> = if sidecar.exists() {
        debug!("Loading settings from {}", sidecar.display());
        serde_json::from_str(&fs::read_to_string(&sidecar)?)?
    } else {
        Map::new()
    };

    Ok(DocumentSession::new(name, text, syntax).with_settings(settings))
}

/// Save the document settings next to it.
pub(crate) fn save_settings(path: &Path, doc: &DocumentSession) -> Result<(), CliError> {
    if doc.settings().is_empty() {
        return Ok(());
    }
    let json = serde_json::to_string_pretty(doc.settings())?;
    fs::write(sidecar_path(path), json)?;
    Ok(())
}

/// Write a fetched page into `dir` and attach it.
pub(crate) fn write_new(dir: &Path, document: NewDocument) -> Result<PathBuf, CliError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.html", file_stem(&document.name)));
    fs::write(&path, &document.text)?;

    let mut doc = DocumentSession::new(document.name, document.text, document.syntax);
    doc.attach(&document.page);
    save_settings(&path, &doc)?;
    Ok(path)
}

/// File name for a page title.
fn file_stem(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_matches('.').trim();
    if stem.is_empty() {
        "page".to_owned()
    } else {
        stem.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesync_confluence::Page;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn page() -> Page {
        serde_json::from_value(json!({
            "id": "42",
            "type": "page",
            "title": "Release Notes",
            "space": {"key": "TST"},
            "version": {"number": 2}
        }))
        .unwrap()
    }

    #[test]
    fn test_sidecar_path() {
        assert_eq!(
            sidecar_path(Path::new("docs/notes.md")),
            PathBuf::from("docs/notes.md.confluence.json")
        );
    }

    #[test]
    fn test_syntax_for_path() {
        assert_eq!(syntax_for_path(Path::new("a.md")), Some("Markdown"));
        assert_eq!(syntax_for_path(Path::new("a.MARKDOWN")), Some("Markdown"));
        assert_eq!(syntax_for_path(Path::new("a.rst")), Some("reStructuredText"));
        assert_eq!(syntax_for_path(Path::new("a.htm")), Some(HTML_SYNTAX));
        assert_eq!(syntax_for_path(Path::new("a.txt")), None);
        assert_eq!(syntax_for_path(Path::new("README")), None);
    }

    #[test]
    fn test_load_untracked_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "Title: T\n\nbody").unwrap();

        let doc = load(&path, None).unwrap();
        assert_eq!(doc.name, "notes.md");
        assert_eq!(doc.syntax, "Markdown");
        assert_eq!(doc.text, "Title: T\n\nbody");
        assert_eq!(doc.attached_page(), None);
    }

    #[test]
    fn test_syntax_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "text").unwrap();

        assert_eq!(load(&path, None).unwrap().syntax, PLAIN_TEXT);
        assert_eq!(
            load(&path, Some("Markdown Extended")).unwrap().syntax,
            "Markdown Extended"
        );
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "text").unwrap();

        let mut doc = load(&path, None).unwrap();
        save_settings(&path, &doc).unwrap();
        assert!(!sidecar_path(&path).exists());

        doc.attach(&page());
        save_settings(&path, &doc).unwrap();
        assert_eq!(load(&path, None).unwrap().attached_page(), Some(page()));
    }

    #[test]
    fn test_write_new_attaches_page() {
        let dir = tempfile::tempdir().unwrap();
        let document = NewDocument {
            name: "Release Notes".to_owned(),
            text: "<p>x</p>".to_owned(),
            syntax: HTML_SYNTAX.to_owned(),
            page: page(),
        };

        let path = write_new(dir.path(), document).unwrap();
        assert_eq!(path, dir.path().join("Release Notes.html"));

        let doc = load(&path, None).unwrap();
        assert_eq!(doc.text, "<p>x</p>");
        assert_eq!(doc.syntax, HTML_SYNTAX);
        assert_eq!(doc.attached_page().map(|p| p.id), Some("42".to_owned()));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("Q3: Plan/Review"), "Q3_ Plan_Review");
        assert_eq!(file_stem(" .. "), "page");
    }
}
