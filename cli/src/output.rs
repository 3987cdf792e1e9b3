//! Output formatting

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use p2p_forms::{FormNotice, NoticeKind, ValidationResult};
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Print a list; table output renders one row per item
    pub fn print_rows<T: Serialize + Tabled>(&self, rows: &[T]) -> Result<()> {
        match self {
            OutputFormat::Table => println!("{}", Table::new(rows)),
            _ => self.print(&rows)?,
        }
        Ok(())
    }

    pub fn print<T: Serialize + ?Sized>(&self, data: &T) -> Result<()> {
        match self {
            OutputFormat::Json | OutputFormat::Table => {
                println!("{}", serde_json::to_string_pretty(data)?);
            }
            OutputFormat::Yaml => {
                print!("{}", serde_yaml::to_string(data)?);
            }
        }
        Ok(())
    }
}

#[derive(Tabled)]
struct ErrorRow<'a> {
    field: &'a str,
    kind: String,
    message: &'a str,
}

/// Field errors as a table, or a single line when there are none
pub fn print_validation(format: OutputFormat, result: &ValidationResult) -> Result<()> {
    if !matches!(format, OutputFormat::Table) {
        return format.print(result);
    }

    if result.is_valid() {
        println!("{}", "valid".green());
        return Ok(());
    }

    let rows: Vec<ErrorRow> = result
        .errors()
        .map(|(field, error)| ErrorRow {
            field,
            kind: format!("{:?}", error.kind),
            message: &error.message,
        })
        .collect();
    println!("{}", Table::new(rows));
    Ok(())
}

pub fn print_notice(notice: &FormNotice) {
    let title = match notice.kind {
        NoticeKind::Success => notice.title.green().bold(),
        NoticeKind::Warning => notice.title.yellow().bold(),
        NoticeKind::Error => notice.title.red().bold(),
    };
    eprintln!("{}: {}", title, notice.message);
}
