//! Tables of named text fields: tab-delimited and fixed-width column layouts.
//!
//! A [`Table`] is format-agnostic: each [`Row`] maps header names to
//! trimmed cell values. Mapping cells to world attributes happens in
//! [`crate::fields`].

use std::fmt;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::error::{FormatError, RowError};
use crate::options::LineEnding;

/// Layout of a world table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// One row per line, cells separated by tabs.
    Tab,
    /// Fixed-width columns under a header and a dash rule (Second Survey).
    Column,
    /// Fixed-width legacy SEC rows with no header.
    Sec,
}

impl TableKind {
    /// Display name of the layout.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tab => "TabDelimited",
            Self::Column => "SecondSurvey",
            Self::Sec => "SEC",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lines a table reader looks at: 1-based number plus text, with blank
/// lines and `#` comments removed.
pub(crate) fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
}

/// Whether `line` is a rule of dashes separated by spaces.
pub(crate) fn is_dash_rule(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.contains('-') && line.chars().all(|c| c == '-' || c == ' ')
}

/// Guess the layout of a world table from its first content lines.
///
/// A header with tabs is [`TableKind::Tab`], a header followed by a dash
/// rule is [`TableKind::Column`], anything else is [`TableKind::Sec`].
/// A tabbed header that is also column-aligned (runs of spaces, or a dash
/// rule underneath) is rejected as ambiguous.
///
/// Only the header and the line after it are looked at: the first content
/// line must be the header, and tabs or dash rules further down do not
/// change the verdict. Files with a preamble above the header should have
/// it commented out with `#`.
pub fn sniff_table(text: &str) -> Result<TableKind, FormatError> {
    let mut lines = content_lines(text);
    let (number, header) = lines.next().ok_or_else(|| FormatError::MissingHeader {
        detail: "document has no content lines".into(),
    })?;
    let ruled = lines.next().is_some_and(|(_, l)| is_dash_rule(l));
    if header.contains('\t') {
        if ruled || header.contains("  ") {
            return Err(FormatError::AmbiguousDelimiter { line: number });
        }
        debug!("line {number}: tabbed header, reading as {}", TableKind::Tab);
        return Ok(TableKind::Tab);
    }
    let kind = if ruled { TableKind::Column } else { TableKind::Sec };
    debug!("line {number}: reading as {kind}");
    Ok(kind)
}

// ── Parsed tables ───────────────────────────────────────────────

/// One data row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// 1-based line number in the source.
    pub line_number: usize,
    /// The raw line.
    pub line: String,
    /// Header name to trimmed cell value, in header order.
    pub fields: IndexMap<String, String>,
}

impl Row {
    /// Value of `field`, if the table has that column.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// A parsed table: header names, good rows, and per-row problems.
#[derive(Debug)]
pub struct Table {
    /// Layout the table was read from.
    pub kind: TableKind,
    /// 1-based line number of the header.
    pub header_line: usize,
    /// Header names, in column order.
    pub fields: Vec<String>,
    /// Rows that split cleanly.
    pub rows: Vec<Row>,
    /// Rows that did not.
    pub errors: Vec<RowError>,
}

impl Table {
    /// Read a tab-delimited table. The first content line is the header.
    pub fn parse_tab(text: &str) -> Result<Self, FormatError> {
        let mut lines = content_lines(text);
        let (header_line, header) = lines.next().ok_or_else(|| FormatError::MissingHeader {
            detail: "document has no header line".into(),
        })?;
        let fields: Vec<String> = header.split('\t').map(|f| f.trim().to_string()).collect();

        let mut rows = Vec::new();
        let mut errors = Vec::new();
        for (number, line) in lines {
            let cells: Vec<&str> = line.split('\t').collect();
            if cells.len() != fields.len() {
                let detail = format!("expected {} fields, found {}", fields.len(), cells.len());
                errors.push(RowError::new(number, line, FormatError::invalid(number, detail)));
                continue;
            }
            rows.push(Row {
                line_number: number,
                line: line.to_string(),
                fields: fields
                    .iter()
                    .cloned()
                    .zip(cells.iter().map(|c| c.trim().to_string()))
                    .collect(),
            });
        }
        Ok(Self {
            kind: TableKind::Tab,
            header_line,
            fields,
            rows,
            errors,
        })
    }

    /// Read a fixed-width table laid out under a header and a dash rule.
    ///
    /// Each run of dashes in the rule is one column; its header name is the
    /// header text above the run. Cells are sliced by character position and
    /// trimmed, and rows shorter than the rule read as empty cells. Text
    /// between columns is a row error when `strict`, a warning otherwise.
    pub fn parse_columns(text: &str, strict: bool) -> Result<Self, FormatError> {
        let mut lines = content_lines(text);
        let (header_line, header) = lines.next().ok_or_else(|| FormatError::MissingHeader {
            detail: "document has no header line".into(),
        })?;
        let (rule_line, rule) = lines.next().ok_or_else(|| FormatError::MissingHeader {
            detail: "no dash rule under the header".into(),
        })?;
        if !is_dash_rule(rule) {
            return Err(FormatError::MissingHeader {
                detail: format!("line {rule_line} is not a dash rule"),
            });
        }
        let spans = column_spans(header, rule);
        let fields: Vec<String> = spans.iter().map(|s| s.name.clone()).collect();

        let mut rows = Vec::new();
        let mut errors = Vec::new();
        for (number, line) in lines {
            let (cells, stray) = split_columns(line, &spans);
            if let Some(stray) = stray {
                let detail = format!("data {stray:?} outside column boundaries");
                if strict {
                    errors.push(RowError::new(number, line, FormatError::invalid(number, detail)));
                    continue;
                }
                warn!("line {number}: {detail}");
            }
            rows.push(Row {
                line_number: number,
                line: line.to_string(),
                fields: fields.iter().cloned().zip(cells).collect(),
            });
        }
        Ok(Self {
            kind: TableKind::Column,
            header_line,
            fields,
            rows,
            errors,
        })
    }

    fn cells(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                self.fields
                    .iter()
                    .map(|f| row.get(f).unwrap_or_default().to_string())
                    .collect()
            })
            .collect()
    }

    /// Write the table back out tab-delimited.
    pub fn to_tab_text(&self, include_header: bool, line_ending: LineEnding) -> String {
        write_tab(&self.fields, &self.cells(), include_header, line_ending)
    }

    /// Write the table back out in fixed-width columns.
    pub fn to_column_text(&self, include_header: bool, line_ending: LineEnding) -> String {
        let mut out = ColumnSerializer::new(self.fields.iter().cloned());
        for row in self.cells() {
            out.push_cells(row);
        }
        out.write(include_header, line_ending)
    }
}

// ── Column splitting ────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
struct ColumnSpan {
    name: String,
    start: usize,
    end: usize,
}

fn slice(chars: &[char], start: usize, end: usize) -> String {
    let end = end.min(chars.len());
    let start = start.min(end);
    chars[start..end].iter().collect()
}

fn column_spans(header: &str, rule: &str) -> Vec<ColumnSpan> {
    let header: Vec<char> = header.chars().collect();
    let mut spans = Vec::new();
    let mut open = None;
    for (i, c) in rule.chars().chain(std::iter::once(' ')).enumerate() {
        match (c == '-', open) {
            (true, None) => open = Some(i),
            (false, Some(start)) => {
                spans.push(ColumnSpan {
                    name: slice(&header, start, i).trim().to_string(),
                    start,
                    end: i,
                });
                open = None;
            }
            _ => {}
        }
    }
    spans
}

/// Trimmed cells, plus the first stray non-blank text found between or
/// after the columns.
fn split_columns(line: &str, spans: &[ColumnSpan]) -> (Vec<String>, Option<String>) {
    let chars: Vec<char> = line.chars().collect();
    let mut stray = None;
    let mut previous_end = 0;
    let mut cells = Vec::with_capacity(spans.len());
    for span in spans {
        let gap = slice(&chars, previous_end, span.start);
        if stray.is_none() && !gap.trim().is_empty() {
            stray = Some(gap.trim().to_string());
        }
        cells.push(slice(&chars, span.start, span.end).trim().to_string());
        previous_end = span.end;
    }
    let tail = slice(&chars, previous_end, chars.len());
    if stray.is_none() && !tail.trim().is_empty() {
        stray = Some(tail.trim().to_string());
    }
    (cells, stray)
}

// ── Writers ─────────────────────────────────────────────────────

/// Write rows tab-delimited, one line per row.
pub fn write_tab<S: AsRef<str>>(
    header: &[S],
    rows: &[Vec<String>],
    include_header: bool,
    line_ending: LineEnding,
) -> String {
    let eol = line_ending.as_str();
    let mut out = String::new();
    if include_header {
        let names: Vec<&str> = header.iter().map(AsRef::as_ref).collect();
        out.push_str(&names.join("\t"));
        out.push_str(eol);
    }
    for row in rows {
        out.push_str(&row.join("\t"));
        out.push_str(eol);
    }
    out
}

/// Lays rows out in fixed-width columns.
///
/// Each column is as wide as its widest value (header included), or its
/// minimum width if larger. Every cell is left-aligned and padded,
/// including the last one, and columns are separated by one space.
#[derive(Clone, Debug, Default)]
pub struct ColumnSerializer {
    header: Vec<String>,
    minimums: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl ColumnSerializer {
    /// A serializer with the given column names.
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header: Vec<String> = header.into_iter().map(|h| h.into().trim().to_string()).collect();
        let minimums = vec![0; header.len()];
        Self {
            header,
            minimums,
            rows: Vec::new(),
        }
    }

    /// Require `column` to be at least `width` characters wide.
    /// Returns `false` if there is no such column.
    pub fn set_minimum_width(&mut self, column: &str, width: usize) -> bool {
        match self.header.iter().position(|h| h == column) {
            Some(i) => {
                self.minimums[i] = width;
                true
            }
            None => false,
        }
    }

    /// Append a row. Values are trimmed.
    pub fn add_row<I, S>(&mut self, row: I) -> Result<(), FormatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let row: Vec<String> = row.into_iter().map(|v| v.as_ref().trim().to_string()).collect();
        if row.len() != self.header.len() {
            return Err(FormatError::invalid_document(format!(
                "row has {} values for {} columns",
                row.len(),
                self.header.len()
            )));
        }
        self.push_cells(row);
        Ok(())
    }

    /// Append a row known to have one value per column.
    fn push_cells(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.header.len(), "row arity");
        self.rows.push(row);
    }

    /// Number of rows added so far.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows have been added.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Current column widths, in characters.
    pub fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .header
            .iter()
            .zip(&self.minimums)
            .map(|(h, &min)| h.chars().count().max(min))
            .collect();
        for row in &self.rows {
            for (width, value) in widths.iter_mut().zip(row) {
                *width = (*width).max(value.chars().count());
            }
        }
        widths
    }

    /// Render the table, optionally preceded by the header and dash rule.
    pub fn write(&self, include_header: bool, line_ending: LineEnding) -> String {
        let widths = self.widths();
        let eol = line_ending.as_str();
        let mut out = String::new();
        if include_header {
            out.push_str(&pad_cells(self.header.iter().cloned(), &widths));
            out.push_str(eol);
            out.push_str(&pad_cells(widths.iter().map(|&w| "-".repeat(w)), &widths));
            out.push_str(eol);
        }
        for row in &self.rows {
            out.push_str(&pad_cells(row.iter().cloned(), &widths));
            out.push_str(eol);
        }
        out
    }
}

fn pad_cells(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect();
    padded.join(" ")
}
