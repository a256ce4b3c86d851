use crate::select::MatchMode;
use indexmap::IndexMap;
use log;
use std::path::PathBuf;

const PUBLIC_DIR: &str = "public";

/// A file discovered by the scan that passed the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub absolute_path: PathBuf,
    /// Relative to the project root, always `/`-separated.
    pub relative_path: String,
}

impl CandidateFile {
    pub fn directory(&self) -> &str {
        directory_of(&self.relative_path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Group {
    Configuration,
    Public,
    Source(String),
}

/// Directory path to the files found in it, in scan order.
pub type FileStructure = IndexMap<String, Vec<CandidateFile>>;

/// The relative path minus its final segment; empty for root-level files.
pub fn directory_of(relative_path: &str) -> &str {
    relative_path
        .rsplit_once('/')
        .map_or("", |(directory, _)| directory)
}

impl MatchMode {
    pub fn is_public_dir(self, directory: &str) -> bool {
        match self {
            MatchMode::Legacy => directory.starts_with(PUBLIC_DIR),
            MatchMode::Segment => directory.split('/').next() == Some(PUBLIC_DIR),
        }
    }

    pub fn group_for(self, directory: &str) -> Group {
        if directory.is_empty() {
            Group::Configuration
        } else if self.is_public_dir(directory) {
            Group::Public
        } else {
            Group::Source(directory.to_string())
        }
    }
}

/// Files the candidate into its directory bucket and reports its group.
pub fn classify(candidate: CandidateFile, structure: &mut FileStructure, mode: MatchMode) -> Group {
    let directory = candidate.directory().to_string();
    let group = mode.group_for(&directory);
    log::trace!("Classified {} as {:?}", candidate.relative_path, group);
    structure.entry(directory).or_default().push(candidate);
    group
}
