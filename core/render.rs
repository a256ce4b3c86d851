use crate::classify::CandidateFile;
use log;
use serde_json::Value;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

const MANIFEST_NAME: &str = "package.json";

/// Source of file contents for the renderer.
pub trait SourceReader {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Reads straight from disk; each call owns its handle for the duration of one read.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = fs::read(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

pub fn language_for(name: &str) -> &'static str {
    match extension_of(name) {
        Some("js") => "javascript",
        Some("jsx") => "jsx",
        Some("json") => "json",
        Some("css") => "css",
        Some("html") => "html",
        _ => "text",
    }
}

pub fn icon_for(name: &str) -> &'static str {
    match extension_of(name) {
        Some("jsx") => "⚛️",
        Some("js") => "📜",
        Some("json") => "📋",
        Some("css") => "🎨",
        Some("html") => "🌐",
        _ => "📄",
    }
}

fn extension_of(name: &str) -> Option<&str> {
    Path::new(name).extension().and_then(|ext| ext.to_str())
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("manifest root is not an object")]
    NotAnObject,
    #[error("'{0}' is not a collection")]
    NotACollection(&'static str),
}

/// Headline facts pulled out of a `package.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSummary {
    pub name: String,
    pub version: String,
    pub dependencies: Option<usize>,
    pub dev_dependencies: Option<usize>,
}

impl ManifestSummary {
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_json::from_str(content)?;
        let manifest = value.as_object().ok_or(ManifestError::NotAnObject)?;

        let display = |key: &str| match manifest.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "N/A".to_string(),
        };
        let count = |key: &'static str| -> Result<Option<usize>, ManifestError> {
            match manifest.get(key) {
                None => Ok(None),
                Some(Value::Object(entries)) => Ok(Some(entries.len())),
                Some(Value::Array(entries)) => Ok(Some(entries.len())),
                Some(_) => Err(ManifestError::NotACollection(key)),
            }
        };

        Ok(Self {
            name: display("name"),
            version: display("version"),
            dependencies: count("dependencies")?,
            dev_dependencies: count("devDependencies")?,
        })
    }

    fn write_to(&self, out: &mut String) {
        out.push_str("**Package Information:**\n");
        let _ = writeln!(out, "- **Name:** {}", self.name);
        let _ = writeln!(out, "- **Version:** {}", self.version);
        if let Some(count) = self.dependencies {
            let _ = writeln!(out, "- **Dependencies:** {} packages", count);
        }
        if let Some(count) = self.dev_dependencies {
            let _ = writeln!(out, "- **Dev Dependencies:** {} packages", count);
        }
        out.push('\n');
    }
}

/// Fenced block with the language tag; the closing fence always starts a new line.
pub fn fenced(content: &str, language: &str) -> String {
    let mut block = String::with_capacity(content.len() + language.len() + 10);
    let _ = writeln!(block, "```{}", language);
    block.push_str(content);
    if !content.ends_with('\n') {
        block.push('\n');
    }
    block.push_str("```\n\n");
    block
}

/// Renders one file. Read failures become an inline notice, never an error.
pub fn render(file: &CandidateFile, reader: &dyn SourceReader) -> String {
    let mut fragment = String::new();
    let _ = write!(fragment, "##### {} {}\n\n", icon_for(&file.name), file.name);
    let _ = write!(fragment, "**Path:** `{}`\n\n", file.relative_path);

    match reader.read_to_string(&file.absolute_path) {
        Ok(content) => {
            if file.name == MANIFEST_NAME {
                match ManifestSummary::parse(&content) {
                    Ok(summary) => summary.write_to(&mut fragment),
                    Err(e) => log::debug!("No summary for {}: {}", file.relative_path, e),
                }
            }
            fragment.push_str(&fenced(&content, language_for(&file.name)));
        }
        Err(e) => {
            log::warn!("Could not read {}: {}", file.absolute_path.display(), e);
            let _ = write!(fragment, "*Error reading file: {}*\n\n", e);
        }
    }

    fragment.push_str("---\n\n");
    fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct MemoryReader(HashMap<PathBuf, String>);

    impl SourceReader for MemoryReader {
        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing from fixture"))
        }
    }

    fn file(relative_path: &str) -> CandidateFile {
        CandidateFile {
            name: relative_path.rsplit('/').next().unwrap().to_string(),
            absolute_path: PathBuf::from("/p").join(relative_path),
            relative_path: relative_path.to_string(),
        }
    }

    fn reader(entries: &[(&str, &str)]) -> MemoryReader {
        MemoryReader(
            entries
                .iter()
                .map(|(p, c)| (PathBuf::from("/p").join(p), c.to_string()))
                .collect(),
        )
    }

    #[test]
    fn languages_follow_extension() {
        assert_eq!(language_for("App.jsx"), "jsx");
        assert_eq!(language_for("api.js"), "javascript");
        assert_eq!(language_for("index.html"), "html");
        assert_eq!(language_for("notes.txt"), "text");
        assert_eq!(language_for(".json"), "text");
    }

    #[test]
    fn appends_missing_newline_once() {
        assert_eq!(fenced("a", "css"), "```css\na\n```\n\n");
        assert_eq!(fenced("a\n", "css"), "```css\na\n```\n\n");
        assert_eq!(fenced("", "text"), "```text\n\n```\n\n");
    }

    #[test]
    fn renders_heading_path_and_block() {
        let fragment = render(
            &file("src/App.jsx"),
            &reader(&[("src/App.jsx", "export default App;")]),
        );
        assert_eq!(
            fragment,
            "##### ⚛️ App.jsx\n\n**Path:** `src/App.jsx`\n\n```jsx\nexport default App;\n```\n\n---\n\n"
        );
    }

    #[test]
    fn summarizes_package_manifest() {
        let content = r#"{"name":"demo","version":"1.0.0","dependencies":{"a":"1","b":"2"}}"#;
        let fragment = render(&file("package.json"), &reader(&[("package.json", content)]));
        assert!(fragment.contains("- **Name:** demo\n"));
        assert!(fragment.contains("- **Version:** 1.0.0\n"));
        assert!(fragment.contains("- **Dependencies:** 2 packages\n"));
        assert!(!fragment.contains("Dev Dependencies"));
        assert!(fragment.contains(&format!("```json\n{}\n```", content)));
    }

    #[test]
    fn malformed_manifest_renders_raw_content() {
        let content = r#"{"name":"demo","version""#;
        let fragment = render(&file("package.json"), &reader(&[("package.json", content)]));
        assert!(!fragment.contains("Package Information"));
        assert!(fragment.contains(content));
    }

    #[test]
    fn manifest_summary_defaults() {
        let summary = ManifestSummary::parse(r#"{"devDependencies":{"x":"1"},"version":2}"#).unwrap();
        assert_eq!(summary.name, "N/A");
        assert_eq!(summary.version, "2");
        assert_eq!(summary.dependencies, None);
        assert_eq!(summary.dev_dependencies, Some(1));
    }

    #[test]
    fn manifest_rejects_non_objects() {
        assert!(matches!(ManifestSummary::parse("[1]"), Err(ManifestError::NotAnObject)));
        assert!(matches!(
            ManifestSummary::parse(r#"{"dependencies":3}"#),
            Err(ManifestError::NotACollection("dependencies"))
        ));
    }

    #[test]
    fn summary_only_for_exact_manifest_name() {
        let content = r#"{"name":"demo"}"#;
        let fragment = render(&file("src/package.json.js"), &reader(&[("src/package.json.js", content)]));
        assert!(!fragment.contains("Package Information"));
    }

    #[test]
    fn unreadable_file_becomes_notice() {
        let fragment = render(&file("src/gone.js"), &reader(&[]));
        assert!(fragment.contains("*Error reading file: missing from fixture*"));
        assert!(!fragment.contains("```"));
        assert!(fragment.ends_with("---\n\n"));
    }
}
