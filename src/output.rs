//! Output formats for a rendered grid.

use crate::render::CharGrid;
use crate::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const DEFAULT_HTML_FONT: &str = "Courier New";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Plain text, one line per row
    #[default]
    Console,
    /// Standalone HTML page
    Html,
    /// JSON array of row strings
    Json,
}

pub fn format_grid(grid: &CharGrid, format: OutputFormat, html_font: &str) -> Result<String> {
    Ok(match format {
        OutputFormat::Console => format!("{grid}\n"),
        OutputFormat::Html => to_html(grid, html_font),
        OutputFormat::Json => serde_json::to_string_pretty(grid)? + "\n",
    })
}

pub fn to_html(grid: &CharGrid, font_family: &str) -> String {
    let mut body = String::with_capacity(grid.rows() * (grid.cols() + 1));
    for row in grid.iter_rows() {
        for &c in row {
            push_escaped(&mut body, c);
        }
        body.push('\n');
    }

    let mut font = String::new();
    font_family.chars().for_each(|c| push_escaped(&mut font, c));

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>picascii</title>\n</head>\n\
         <body style=\"margin:0\">\n\
         <pre style=\"font-family:'{font}', monospace; \
         font-size:8px; line-height:1; letter-spacing:2px\">\n\
         {body}</pre>\n</body>\n</html>\n"
    )
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(c),
    }
}
