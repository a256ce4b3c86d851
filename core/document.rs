use crate::classify::{self, CandidateFile, FileStructure};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::order::{self, DocumentPlan};
use crate::render::{self, FsReader, SourceReader};
use crate::select::{self, Selector};
use chrono::{DateTime, SecondsFormat, Utc};
use log;
use std::fmt::Write as _;
use std::fs;
use std::path::{Component, Path};
use walkdir::WalkDir;

const CONFIGURATION_HEADING: &str = "⚙️ Configuration Files";
const PUBLIC_TOC_HEADING: &str = "📁 Public Files";
const PUBLIC_BODY_HEADING: &str = "📁 Public Directory";
const SOURCE_HEADING: &str = "📦 Source Files";

fn header(level: usize, text: &str) -> String {
    format!("{} {}\n\n", "#".repeat(level), text)
}

fn to_slash_path(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Walks `root` once, pruning dependency and VCS directories, and buckets
/// every selected file by its directory.
pub fn scan(root: &Path, selector: &Selector) -> Result<FileStructure> {
    if !root.is_dir() {
        return Err(AppError::Traversal(format!(
            "Root directory does not exist or is not a directory: {}",
            root.display()
        )));
    }
    log::info!("Walking project directory: {}", root.display());

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let pruned = entry.depth() > 0
                && entry.file_type().is_dir()
                && entry.file_name().to_str().is_some_and(select::is_pruned_dir);
            if pruned {
                log::trace!("Pruning directory: {}", entry.path().display());
            }
            !pruned
        });

    let mut structure = FileStructure::new();
    let mut visited = 0usize;
    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                log::warn!("Error walking directory: {}", e);
                continue;
            }
        };
        if entry.file_type().is_dir() || !entry.path().is_file() {
            continue;
        }
        visited += 1;

        let Some(relative) = pathdiff::diff_paths(entry.path(), root) else {
            log::warn!("Could not get relative path for: {}", entry.path().display());
            continue;
        };
        let relative_path = to_slash_path(&relative);
        if !selector.is_included(&relative_path) {
            log::trace!("Excluding file: {}", relative_path);
            continue;
        }

        let candidate = CandidateFile {
            name: entry.file_name().to_string_lossy().into_owned(),
            absolute_path: entry.path().to_path_buf(),
            relative_path,
        };
        classify::classify(candidate, &mut structure, selector.mode());
    }

    log::info!(
        "Directory walk complete. Selected files in {} directories out of {} files seen.",
        structure.len(),
        visited
    );
    Ok(structure)
}

/// Scan plus ordering, without reading any file contents.
pub fn plan_project(root: &Path, config: &Config) -> Result<DocumentPlan> {
    let selector = Selector::new(config.general.match_mode, &config.filters.exclude)?;
    let structure = scan(root, &selector)?;
    Ok(order::plan(&structure, selector.mode()))
}

pub fn compile(root: &Path, config: &Config) -> Result<String> {
    compile_with_reader(root, config, &FsReader)
}

pub fn compile_with_reader(
    root: &Path,
    config: &Config,
    reader: &dyn SourceReader,
) -> Result<String> {
    let document_plan = plan_project(root, config)?;
    let generated_at = config.output.include_timestamp.then(Utc::now);
    let root_label = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    log::info!("Rendering {} files...", document_plan.file_count());
    Ok(assemble(&document_plan, &root_label, config, generated_at, reader))
}

/// Title block, table of contents, then the body in plan order.
pub fn assemble(
    document_plan: &DocumentPlan,
    root_label: &str,
    config: &Config,
    generated_at: Option<DateTime<Utc>>,
    reader: &dyn SourceReader,
) -> String {
    let mut doc = String::new();
    write_title(&mut doc, root_label, config, generated_at);
    write_table_of_contents(&mut doc, document_plan);

    doc.push_str(&header(2, "📝 Source Code"));
    if !document_plan.configuration.is_empty() {
        doc.push_str(&header(3, CONFIGURATION_HEADING));
        for file in &document_plan.configuration {
            doc.push_str(&render::render(file, reader));
        }
    }
    if !document_plan.public.is_empty() {
        doc.push_str(&header(3, PUBLIC_BODY_HEADING));
        for file in &document_plan.public {
            doc.push_str(&render::render(file, reader));
        }
    }
    if !document_plan.source.is_empty() {
        doc.push_str(&header(3, SOURCE_HEADING));
        for section in &document_plan.source {
            if let Some(label) = section.heading() {
                doc.push_str(&header(4, &format!("📂 {}", label)));
            }
            for file in &section.files {
                doc.push_str(&render::render(file, reader));
            }
        }
    }
    doc
}

fn write_title(
    doc: &mut String,
    root_label: &str,
    config: &Config,
    generated_at: Option<DateTime<Utc>>,
) {
    let general = &config.general;
    doc.push_str(&header(1, &general.title));
    let _ = write!(doc, "{}\n\n", general.description);
    let _ = writeln!(doc, "**Project Type:** {}", general.project_type);
    let _ = writeln!(doc, "**Project Root:** `{}`", root_label);
    if let Some(timestamp) = generated_at {
        let _ = writeln!(
            doc,
            "**Generated on:** {}",
            timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }
    doc.push_str("\n---\n\n");
}

fn write_table_of_contents(doc: &mut String, document_plan: &DocumentPlan) {
    doc.push_str(&header(2, "📑 Table of Contents"));
    if !document_plan.configuration.is_empty() {
        let _ = writeln!(doc, "### {}", CONFIGURATION_HEADING);
        for file in &document_plan.configuration {
            let _ = writeln!(doc, "- `{}`", file.name);
        }
        doc.push('\n');
    }
    if !document_plan.public.is_empty() {
        let _ = writeln!(doc, "### {}", PUBLIC_TOC_HEADING);
        for file in &document_plan.public {
            let _ = writeln!(doc, "- `{}`", file.relative_path);
        }
        doc.push('\n');
    }
    if !document_plan.source.is_empty() {
        let _ = writeln!(doc, "### {}", SOURCE_HEADING);
        for section in &document_plan.source {
            let _ = writeln!(doc, "**{}/**", section.directory);
            for file in &section.files {
                let _ = writeln!(doc, "  - `{}`", file.name);
            }
            doc.push('\n');
        }
    }
    doc.push_str("---\n\n");
}

/// Persists the document, replacing any existing file.
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AppError::FileWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, text).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    log::info!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}
