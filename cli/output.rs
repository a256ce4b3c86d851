use anyhow::{Context, Result};
use byte_unit::{Byte, UnitType};
use colored::*;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Human-readable size of a file on disk, e.g. `12.5 KiB`.
pub fn readable_size(path: &Path) -> Result<String> {
    let bytes = fs::metadata(path)
        .with_context(|| format!("Failed to read metadata for {}", path.display()))?
        .len();
    let byte = Byte::from_u128(bytes as u128).unwrap_or_default();
    Ok(byte.get_appropriate_unit(UnitType::Binary).to_string())
}

pub fn report_saved(path: &Path, quiet: bool) -> Result<()> {
    if quiet {
        return Ok(());
    }
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let size = readable_size(path)?;
    println!("{} Documentation successfully generated!", "✅".green());
    println!(
        "{} Output file: {}",
        "📄".blue(),
        absolute.display().to_string().blue()
    );
    println!("{} File size: {}", "📊".blue(), size.cyan());
    Ok(())
}

pub fn write_to_stdout(content: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(content.as_bytes())
        .context("Failed to write to stdout")?;
    if !content.ends_with('\n') {
        handle
            .write_all(b"\n")
            .context("Failed to write newline to stdout")?;
    }
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}
