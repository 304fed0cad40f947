use std::io::{self, Write};

use carsales_model::DisplayTable;
use clap::ValueEnum;
use serde::Serialize;

use crate::session::View;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct JsonView<'a> {
    view: &'static str,
    #[serde(flatten)]
    table: &'a DisplayTable,
}

pub fn write_view<W: Write>(
    out: &mut W,
    format: OutputFormat,
    view: View,
    table: &DisplayTable,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => write_text(out, view, table),
        OutputFormat::Json => {
            serde_json::to_writer(
                &mut *out,
                &JsonView {
                    view: view.key(),
                    table,
                },
            )?;
            out.write_all(b"\n")
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonError<'a> {
    error: &'a str,
}

/// Report a failed request on the same stream as the views, in the same format.
pub fn write_error<W: Write>(out: &mut W, format: OutputFormat, message: &str) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "error: {message}"),
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &JsonError { error: message })?;
            out.write_all(b"\n")
        }
    }
}

fn write_text<W: Write>(out: &mut W, view: View, table: &DisplayTable) -> io::Result<()> {
    writeln!(out, "== {} ==", view.title())?;

    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (idx, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(idx) {
                Some(width) => *width = (*width).max(len),
                None => widths.push(len),
            }
        }
    }

    write_line(out, &table.headers, &widths)?;
    for row in &table.rows {
        write_line(out, row, &widths)?;
    }
    writeln!(out)
}

fn write_line<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let mut line = String::new();
    for (idx, cell) in cells.iter().enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        let width = widths.get(idx).copied().unwrap_or(0);
        line.push_str(&format!("{cell:<width$}"));
    }
    writeln!(out, "{}", line.trim_end())
}
