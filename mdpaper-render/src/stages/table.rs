//! Pipe table conversion.
//!
//! A table is a run of lines bounded by `|` on both ends containing a
//! header/body separator line (`|---|---|`, colons allowed). A run without
//! a separator is not a table and passes through unchanged.

use crate::options::RenderOptions;
use crate::pipeline::Document;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TABLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(?:^\|.+\|$\n?)+").expect("valid regex for table blocks"));

static SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\|[\s\-:|]+\|$").expect("valid regex for table separators"));

pub(crate) fn tables(doc: &mut Document, _options: &RenderOptions) {
    doc.text = TABLE_BLOCK
        .replace_all(&doc.text, |caps: &Captures| convert_block(&caps[0]))
        .into_owned();
}

fn convert_block(block: &str) -> String {
    let rows: Vec<&str> = block
        .trim()
        .lines()
        .filter(|row| !row.trim().is_empty())
        .collect();
    if rows.len() < 2 {
        return block.to_string();
    }

    let Some(separator_index) = rows.iter().position(|row| SEPARATOR.is_match(row)) else {
        return block.to_string();
    };

    let mut html = String::from("<table class=\"md-table\">");

    if separator_index > 0 {
        html.push_str("<thead><tr>");
        for cell in split_row(rows[0]) {
            html.push_str(&format!("<th>{cell}</th>"));
        }
        html.push_str("</tr></thead>");
    }

    let body = &rows[separator_index + 1..];
    if !body.is_empty() {
        html.push_str("<tbody>");
        for row in body {
            html.push_str("<tr>");
            for cell in split_row(row) {
                html.push_str(&format!("<td>{cell}</td>"));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody>");
    }

    html.push_str("</table>");
    html
}

/// Strip the bounding delimiters and split on the interior ones, trimming
/// each cell. Ragged rows keep their own cell count.
fn split_row(row: &str) -> Vec<String> {
    let row = row.trim();
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = row.strip_suffix('|').unwrap_or(row);
    row.split('|').map(|cell| cell.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> String {
        let mut doc = Document::new(input);
        tables(&mut doc, &RenderOptions::default());
        doc.text
    }

    #[test]
    fn test_header_and_body() {
        let html = run("| A | B |\n|---|---|\n| 1 | 2 |\n");
        assert_eq!(
            html,
            "<table class=\"md-table\"><thead><tr><th>A</th><th>B</th></tr></thead>\
             <tbody><tr><td>1</td><td>2</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_without_separator_passes_through() {
        let input = "| A | B |\n| 1 | 2 |\n";
        assert_eq!(run(input), input);
    }

    #[test]
    fn test_single_row_passes_through() {
        let input = "| lonely |\n";
        assert_eq!(run(input), input);
    }

    #[test]
    fn test_cell_count_matches_per_row() {
        let html = run("| A | B | C |\n|---|---|---|\n| 1 | 2 | 3 |\n| x | y | z |\n");
        assert_eq!(html.matches("<th>").count(), 3);
        assert_eq!(html.matches("<td>").count(), 6);
    }

    #[test]
    fn test_ragged_row_kept_positionally() {
        let html = run("| A | B |\n|---|---|\n| only |\n");
        assert!(html.contains("<tr><td>only</td></tr>"));
    }

    #[test]
    fn test_cells_are_trimmed() {
        let html = run("|  A  |  B  |\n|---|---|\n|  1  |  2  |\n");
        assert!(html.contains("<th>A</th><th>B</th>"));
        assert!(html.contains("<td>1</td><td>2</td>"));
    }

    #[test]
    fn test_alignment_colons_count_as_separator() {
        let html = run("| A |\n|:---:|\n| 1 |\n");
        assert!(html.contains("<table class=\"md-table\">"));
    }
}
