use crate::error::{AppError, Result};
use crate::select::MatchMode;
use log;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILENAME: &str = "frontdoc.toml";
pub const DEFAULT_OUTPUT_FILENAME: &str = "frontend_documentation.md";
pub const DEFAULT_TITLE: &str = "Frontend Project Documentation";
pub const DEFAULT_DESCRIPTION: &str =
    "This document contains all the source code from the React frontend project.";
pub const DEFAULT_PROJECT_TYPE: &str = "React with Tailwind CSS";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub filters: FiltersConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_project_type")]
    pub project_type: String,
    #[serde(default)]
    pub match_mode: MatchMode,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct FiltersConfig {
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_output_file")]
    pub file: PathBuf,
    #[serde(default)]
    pub include_timestamp: bool,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}
fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}
fn default_project_type() -> String {
    DEFAULT_PROJECT_TYPE.to_string()
}
fn default_output_file() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILENAME)
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            project_type: default_project_type(),
            match_mode: MatchMode::default(),
        }
    }
}
impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: default_output_file(),
            include_timestamp: false,
        }
    }
}

impl Config {
    pub fn determine_project_root(cli_project_root: Option<&PathBuf>) -> Result<PathBuf> {
        let path_str_opt = cli_project_root
            .map(|p| p.to_string_lossy().to_string())
            .or_else(|| env::var("PROJECT_ROOT").ok().filter(|s| !s.is_empty()));

        let path_to_resolve = match path_str_opt {
            Some(p_str) => PathBuf::from(shellexpand::tilde(&p_str).as_ref()),
            None => env::current_dir().map_err(AppError::Io)?,
        };

        let resolved = path_to_resolve.canonicalize().map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to canonicalize project root '{}': {}",
                    path_to_resolve.display(),
                    e
                ),
            ))
        })?;
        if !resolved.is_dir() {
            return Err(AppError::InvalidArgument(format!(
                "Project root is not a directory: {}",
                resolved.display()
            )));
        }
        Ok(resolved)
    }

    pub fn resolve_config_path(
        project_root: &Path,
        cli_config_file: Option<&PathBuf>,
        cli_disable_config: bool,
    ) -> Result<Option<PathBuf>> {
        if cli_disable_config {
            log::debug!("Config file loading disabled via CLI flag.");
            return Ok(None);
        }

        match cli_config_file {
            Some(p) => {
                let expanded = PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).as_ref());
                let candidates = if expanded.is_absolute() {
                    vec![expanded.clone()]
                } else {
                    vec![expanded.clone(), project_root.join(&expanded)]
                };
                let found = candidates.into_iter().find(|c| c.is_file()).ok_or_else(|| {
                    AppError::Config(format!(
                        "Specified config file not found: {}",
                        expanded.display()
                    ))
                })?;
                log::debug!("Using specified config file path: {}", found.display());
                Ok(Some(found))
            }
            None => {
                let default_path = project_root.join(DEFAULT_CONFIG_FILENAME);
                if default_path.is_file() {
                    log::debug!("Using default config file path: {}", default_path.display());
                    Ok(Some(default_path))
                } else {
                    log::debug!(
                        "No config file specified and default not found at: {}",
                        default_path.display()
                    );
                    Ok(None)
                }
            }
        }
    }

    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        log::info!("Loading configuration from: {}", config_path.display());
        let toml_content = fs::read_to_string(config_path).map_err(|e| AppError::FileRead {
            path: config_path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&toml_content).map_err(|e| {
            AppError::TomlParse(format!(
                "Error parsing config file '{}': {}. Check TOML syntax and structure.",
                config_path.display(),
                e
            ))
        })
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str::<Config>(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output.file, PathBuf::from("frontend_documentation.md"));
        assert_eq!(config.general.match_mode, MatchMode::Legacy);
    }

    #[test]
    fn reads_all_sections() {
        let config = Config::from_toml_str(
            r#"
            [general]
            title = "Shop UI"
            match_mode = "segment"

            [filters]
            exclude = ["src/legacy/"]

            [output]
            file = "docs/ui.md"
            include_timestamp = true
            "#,
        )
        .unwrap();
        assert_eq!(config.general.title, "Shop UI");
        assert_eq!(config.general.project_type, DEFAULT_PROJECT_TYPE);
        assert_eq!(config.general.match_mode, MatchMode::Segment);
        assert_eq!(config.filters.exclude, ["src/legacy/"]);
        assert_eq!(config.output.file, PathBuf::from("docs/ui.md"));
        assert!(config.output.include_timestamp);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(Config::from_toml_str("[general]\nfoo = 1\n").is_err());
        assert!(Config::from_toml_str("[general]\nmatch_mode = \"fuzzy\"\n").is_err());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = Config::resolve_config_path(
            Path::new("/definitely/not/here"),
            Some(&PathBuf::from("nope.toml")),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn disabled_config_resolves_to_none() {
        let resolved =
            Config::resolve_config_path(Path::new("/tmp"), Some(&PathBuf::from("x.toml")), true)
                .unwrap();
        assert!(resolved.is_none());
    }
}
