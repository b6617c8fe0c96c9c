use crate::error::TabularResult;
use crate::generate::generate;
use crate::header::{to_field_name, to_header};
use crate::mapper::RecordSource;
use crate::read::read_from_path;
use crate::sink::FileSink;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name component used to pick the output format
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Execute the export command: JSON records → .xlsx/.csv
pub fn export(input: PathBuf, output: PathBuf, verbose: bool) -> TabularResult<()> {
    println!("{}", "📊 Tabular - Export".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    if verbose {
        println!("{}", "📖 Reading JSON records...".cyan());
    }

    let payload: serde_json::Value = serde_json::from_str(&fs::read_to_string(&input)?)?;
    let source = RecordSource::from_json(payload)?;

    if verbose {
        match &source {
            RecordSource::Sequence(records) => println!("   Found {} records\n", records.len()),
            RecordSource::Mapping(mapping) => {
                println!("   Found a single mapping with {} fields\n", mapping.len())
            }
        }
    }

    let mut sink = FileSink::new(&output);
    generate(&mut sink, &file_name(&output), source)?;

    println!("{}", "✅ Export Complete!".bold().green());
    if let Some(content_type) = sink.content_type() {
        println!("   Content type: {}", content_type);
    }
    println!("   File: {}\n", output.display());

    Ok(())
}

/// Execute the import command: .xlsx/.csv → JSON rows
///
/// Without an output path the JSON goes to stdout and nothing else is printed.
pub fn import(input: PathBuf, output: Option<PathBuf>, verbose: bool) -> TabularResult<()> {
    let doc = read_from_path(&input)?;
    let json = serde_json::to_string_pretty(&doc)?;

    let Some(output) = output else {
        println!("{}", json);
        return Ok(());
    };

    println!("{}", "📊 Tabular - Import".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    if verbose {
        println!("   Found {} rows", doc.len());
        println!("   Columns: {}\n", doc.columns().join(", ").bright_blue());
    }

    fs::write(&output, json)?;

    println!("{}", "✅ Import Complete!".bold().green());
    println!("   JSON file: {}\n", output.display());

    Ok(())
}

/// Convert names between field names and column headers
pub fn header_lines(names: &[String], reverse: bool) -> Vec<String> {
    names
        .iter()
        .map(|name| {
            if reverse {
                to_field_name(name)
            } else {
                to_header(name)
            }
        })
        .collect()
}

/// Execute the header command
pub fn header(names: Vec<String>, reverse: bool) -> TabularResult<()> {
    for (name, converted) in names.iter().zip(header_lines(&names, reverse)) {
        println!("{} → {}", name, converted.bold());
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
