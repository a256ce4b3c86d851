use crate::cli_args::ListArgs;
use crate::load_config_for_command;
use anyhow::{Context, Result};
use colored::*;
use frontdoc_core::{self as core, Config, DocumentPlan, Group};
use log;

pub fn handle_list_command(args: ListArgs, quiet: bool) -> Result<()> {
    let project_root = Config::determine_project_root(args.project_config.project_root.as_ref())
        .context("Failed to determine project root")?;
    let config =
        load_config_for_command(&project_root, &args.project_config, &args.selection, None)
            .context("Failed to load configuration")?;

    let document_plan = core::plan_project(&project_root, &config)
        .context("Failed to scan project files")?;
    log::debug!("Planned {} files.", document_plan.file_count());

    print!("{}", format_plan(&document_plan));
    if !quiet {
        println!(
            "\n{} {}",
            "Total files:".green(),
            document_plan.file_count().to_string().cyan()
        );
    }
    Ok(())
}

fn group_label(group: &Group) -> String {
    match group {
        Group::Configuration => "Configuration".to_string(),
        Group::Public => "Public".to_string(),
        Group::Source(directory) => format!("Source: {}", directory),
    }
}

/// One heading per group (or source directory), then its files in document order.
fn format_plan(document_plan: &DocumentPlan) -> String {
    let mut out = String::new();
    let mut current: Option<Group> = None;
    for (group, file) in document_plan.iter() {
        if current.as_ref() != Some(&group) {
            out.push_str(&format!("{}\n", group_label(&group).bold()));
            current = Some(group);
        }
        out.push_str(&format!("  {}\n", file.relative_path));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontdoc_core::{CandidateFile, SourceSection};
    use std::path::PathBuf;

    fn file(relative_path: &str) -> CandidateFile {
        CandidateFile {
            name: relative_path.rsplit('/').next().unwrap().to_string(),
            absolute_path: PathBuf::from(relative_path),
            relative_path: relative_path.to_string(),
        }
    }

    #[test]
    fn lists_groups_in_document_order() {
        colored::control::set_override(false);
        let document_plan = DocumentPlan {
            configuration: vec![file("package.json")],
            public: Vec::new(),
            source: vec![
                SourceSection {
                    directory: "src".to_string(),
                    files: vec![file("src/App.jsx")],
                },
                SourceSection {
                    directory: "src/pages".to_string(),
                    files: vec![file("src/pages/Home.jsx"), file("src/pages/About.jsx")],
                },
            ],
        };
        assert_eq!(
            format_plan(&document_plan),
            "Configuration\n  package.json\nSource: src\n  src/App.jsx\nSource: src/pages\n  src/pages/Home.jsx\n  src/pages/About.jsx\n"
        );
    }
}
