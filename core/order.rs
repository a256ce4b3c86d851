use crate::classify::{CandidateFile, FileStructure, Group};
use crate::select::MatchMode;
use log;

const SOURCE_DIR_ORDER: [&str; 5] = [
    "src",
    "src/styles",
    "src/services",
    "src/pages",
    "src/components",
];

/// Priority for a file name, lower sorts first.
pub fn file_priority(name: &str) -> u8 {
    match name {
        "package.json" => 1,
        "tailwind.config.js" => 2,
        "postcss.config.js" => 3,
        "index.html" => 4,
        "manifest.json" => 5,
        "App.jsx" => 6,
        "index.js" => 7,
        "globals.css" => 8,
        _ => 99,
    }
}

/// Position in the preferred source directory list, or one past its end.
pub fn directory_rank(directory: &str) -> usize {
    SOURCE_DIR_ORDER
        .iter()
        .position(|d| *d == directory)
        .unwrap_or(SOURCE_DIR_ORDER.len())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSection {
    pub directory: String,
    pub files: Vec<CandidateFile>,
}

impl SourceSection {
    /// Heading label, or `None` for the bare `src` directory.
    pub fn heading(&self) -> Option<String> {
        (self.directory != "src").then(|| self.directory.replace("src/", ""))
    }
}

/// Final sequencing shared by the table of contents and the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPlan {
    pub configuration: Vec<CandidateFile>,
    pub public: Vec<CandidateFile>,
    pub source: Vec<SourceSection>,
}

impl DocumentPlan {
    pub fn file_count(&self) -> usize {
        self.configuration.len()
            + self.public.len()
            + self.source.iter().map(|s| s.files.len()).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.file_count() == 0
    }

    /// Every planned file with its group, in document order.
    pub fn iter(&self) -> impl Iterator<Item = (Group, &CandidateFile)> {
        let configuration = self.configuration.iter().map(|f| (Group::Configuration, f));
        let public = self.public.iter().map(|f| (Group::Public, f));
        let source = self.source.iter().flat_map(|section| {
            section
                .files
                .iter()
                .map(move |f| (Group::Source(section.directory.clone()), f))
        });
        configuration.chain(public).chain(source)
    }
}

fn sort_by_priority(files: &mut [CandidateFile]) {
    // stable: equal priorities keep scan order
    files.sort_by_key(|f| file_priority(&f.name));
}

pub fn plan(structure: &FileStructure, mode: MatchMode) -> DocumentPlan {
    let mut directories: Vec<&String> = structure.keys().collect();
    directories.sort();

    let mut document_plan = DocumentPlan::default();
    for directory in directories {
        let files = &structure[directory.as_str()];
        match mode.group_for(directory) {
            Group::Configuration => document_plan.configuration.extend(files.iter().cloned()),
            Group::Public => document_plan.public.extend(files.iter().cloned()),
            Group::Source(directory) => document_plan.source.push(SourceSection {
                directory,
                files: files.clone(),
            }),
        }
    }

    sort_by_priority(&mut document_plan.configuration);
    sort_by_priority(&mut document_plan.public);
    for section in &mut document_plan.source {
        sort_by_priority(&mut section.files);
    }
    document_plan.source.sort_by(|a, b| {
        directory_rank(&a.directory)
            .cmp(&directory_rank(&b.directory))
            .then_with(|| a.directory.cmp(&b.directory))
    });

    log::debug!(
        "Planned {} configuration, {} public and {} source directories",
        document_plan.configuration.len(),
        document_plan.public.len(),
        document_plan.source.len()
    );
    document_plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use std::path::PathBuf;

    fn structure_from(paths: &[&str]) -> FileStructure {
        let mut structure = FileStructure::new();
        for path in paths {
            let candidate = CandidateFile {
                name: path.rsplit('/').next().unwrap().to_string(),
                absolute_path: PathBuf::from(path),
                relative_path: path.to_string(),
            };
            classify(candidate, &mut structure, MatchMode::Legacy);
        }
        structure
    }

    fn names(files: &[CandidateFile]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn priority_table() {
        assert_eq!(file_priority("package.json"), 1);
        assert_eq!(file_priority("globals.css"), 8);
        assert_eq!(file_priority("Button.jsx"), 99);
    }

    #[test]
    fn configuration_files_follow_priority() {
        let structure = structure_from(&[
            "eslint.config.js",
            "postcss.config.js",
            "package.json",
            "tailwind.config.js",
        ]);
        let plan = plan(&structure, MatchMode::Legacy);
        assert_eq!(
            names(&plan.configuration),
            ["package.json", "tailwind.config.js", "postcss.config.js", "eslint.config.js"]
        );
    }

    #[test]
    fn unlisted_names_keep_scan_order() {
        let structure = structure_from(&["src/b.js", "src/a.js", "src/App.jsx"]);
        let plan = plan(&structure, MatchMode::Legacy);
        assert_eq!(names(&plan.source[0].files), ["App.jsx", "b.js", "a.js"]);
    }

    #[test]
    fn public_directories_are_merged() {
        let structure = structure_from(&[
            "public/icons/site.json",
            "public/manifest.json",
            "public/index.html",
        ]);
        let plan = plan(&structure, MatchMode::Legacy);
        assert_eq!(names(&plan.public), ["index.html", "manifest.json", "site.json"]);
        assert!(plan.source.is_empty());
    }

    #[test]
    fn source_directories_use_preference_list() {
        let structure = structure_from(&[
            "src/components/Button.jsx",
            "src/utils/format.js",
            "src/pages/Home.jsx",
            "src/App.jsx",
            "lib/helpers.js",
            "src/styles/globals.css",
            "src/services/api.js",
        ]);
        let plan = plan(&structure, MatchMode::Legacy);
        let directories: Vec<_> = plan.source.iter().map(|s| s.directory.as_str()).collect();
        assert_eq!(
            directories,
            [
                "src",
                "src/styles",
                "src/services",
                "src/pages",
                "src/components",
                "lib",
                "src/utils"
            ]
        );
    }

    #[test]
    fn section_headings_drop_src_prefix() {
        let section = |directory: &str| SourceSection {
            directory: directory.to_string(),
            files: Vec::new(),
        };
        assert_eq!(section("src").heading(), None);
        assert_eq!(section("src/components/Layout").heading().as_deref(), Some("components/Layout"));
        assert_eq!(section("lib").heading().as_deref(), Some("lib"));
    }

    #[test]
    fn iter_walks_document_order() {
        let structure = structure_from(&["src/App.jsx", "public/index.html", "package.json"]);
        let plan = plan(&structure, MatchMode::Legacy);
        let order: Vec<_> = plan.iter().map(|(_, f)| f.relative_path.as_str()).collect();
        assert_eq!(order, ["package.json", "public/index.html", "src/App.jsx"]);
        assert_eq!(plan.file_count(), 3);
    }
}
