//! Output formatting utilities
//!
//! Handles JSON, YAML, and table output formats, plus reading and writing
//! the JSON documents exchanged with the extractor and the placement step.

use std::fs;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tabled::settings::{object::Rows, Remove, Style};
use tabled::{Table, Tabled};

use crate::cli::OutputFormat;
use crate::config::RuntimeContext;

/// Format and print data according to the configured output format
pub fn print_output<T: Serialize>(ctx: &RuntimeContext, data: &T) -> Result<()> {
    let output = format_output(ctx, data)?;
    println!("{output}");
    Ok(())
}

/// Format data according to the configured output format
pub fn format_output<T: Serialize>(ctx: &RuntimeContext, data: &T) -> Result<String> {
    let format = ctx.output_format();
    let is_tty = std::io::stdout().is_terminal();

    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputFormat::Json | OutputFormat::Table | OutputFormat::Auto => {
            if is_tty {
                Ok(serde_json::to_string_pretty(data)?)
            } else {
                Ok(serde_json::to_string(data)?)
            }
        }
    }
}

/// Serialize `data` for json/yaml, or run `human` for table output.
///
/// `auto` renders for humans on a terminal and as JSON when piped.
pub fn output_for_format<T, F>(ctx: &RuntimeContext, data: &T, human: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce() -> Result<()>,
{
    let format = ctx.output_format();
    let is_tty = std::io::stdout().is_terminal();

    match format {
        OutputFormat::Table => human(),
        OutputFormat::Auto if is_tty => human(),
        _ => print_output(ctx, data),
    }
}

/// Print a table from items that implement Tabled
pub fn print_table<T: Tabled>(ctx: &RuntimeContext, items: &[T]) -> Result<()> {
    let table = build_table(ctx, items);
    println!("{table}");
    Ok(())
}

fn build_table<T: Tabled>(ctx: &RuntimeContext, items: &[T]) -> Table {
    let mut table = Table::new(items);
    table.with(Style::sharp());

    if ctx.config.output.no_headers {
        table.with(Remove::row(Rows::first()));
    }

    table
}

/// Read a JSON document from a file, or from stdin when the path is `-`
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = read_input(path)?;
    serde_json::from_str(&content).with_context(|| format!("parsing JSON from {}", display(path)))
}

/// Read a file, or stdin when the path is `-`
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("reading stdin")?;
        return Ok(buffer);
    }

    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Write `data` as pretty JSON to `dir/file_name`, creating `dir` if needed
pub fn write_json<T: Serialize>(dir: &Path, file_name: &str, data: &T) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating directory {}", dir.display()))?;

    let path = dir.join(file_name);
    let mut content = serde_json::to_string_pretty(data)?;
    content.push('\n');
    fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;

    log::info!("wrote {}", path.display());
    Ok(path)
}

fn display(path: &Path) -> String {
    if path.as_os_str() == "-" {
        "stdin".to_string()
    } else {
        path.display().to_string()
    }
}
