pub mod classify;
pub mod config;
pub mod document;
pub mod error;
pub mod order;
pub mod render;
pub mod select;

pub use classify::{CandidateFile, FileStructure, Group, classify, directory_of};
pub use config::Config;
pub use document::{assemble, compile, compile_with_reader, plan_project, scan, write_document};
pub use error::{AppError, Result};
pub use order::{DocumentPlan, SourceSection, file_priority, plan};
pub use render::{FsReader, ManifestSummary, SourceReader, render};
pub use select::{MatchMode, Selector};
