//! File import: CSV and Excel parent lists.
//!
//! Files arrive from school information systems in loose shapes, so import
//! sniffs everything it can: the file type from the extension, the CSV
//! delimiter from character counts, and the header row by looking for the
//! well-known Slovak column names in the first few rows.

use crate::models::{ImportedRecord, Recipient};
use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};
use std::fs;
use std::path::Path;

/// Recognized column headers, in canonical order.
pub const STUDENT_FIRSTNAME_COLUMN: &str = "Meno";
pub const STUDENT_LASTNAME_COLUMN: &str = "Priezvisko";
pub const PARENT1_NAME_COLUMN: &str = "Rodič 1.";
pub const PARENT2_NAME_COLUMN: &str = "Rodič 2.";
pub const ADDRESS1_COLUMN: &str = "Adresa 1.";
pub const ADDRESS2_COLUMN: &str = "Adresa 2.";

const EXPECTED_COLUMNS: [&str; 6] = [
    STUDENT_FIRSTNAME_COLUMN,
    STUDENT_LASTNAME_COLUMN,
    PARENT1_NAME_COLUMN,
    PARENT2_NAME_COLUMN,
    ADDRESS1_COLUMN,
    ADDRESS2_COLUMN,
];

/// How many leading rows may precede the header row.
const MAX_HEADER_SEARCH_ROWS: usize = 5;

/// Supported import file types, detected from the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Xls,
    Xlsx,
}

impl FileKind {
    pub fn detect(path: &Path) -> Option<FileKind> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(FileKind::Csv),
            "xls" => Some(FileKind::Xls),
            "xlsx" => Some(FileKind::Xlsx),
            _ => None,
        }
    }
}

/// Sniff the CSV delimiter by counting candidate bytes over the first ten
/// lines; the most frequent wins, comma by default. Sniffing works on raw
/// bytes, so legacy single-byte encodings do not break it.
pub fn detect_delimiter(path: &Path) -> Result<u8> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let candidates: [u8; 4] = [b',', b';', b'\t', b'|'];
    let mut counts = [0usize; 4];
    for line in bytes.split(|&b| b == b'\n').take(10) {
        for (i, &delim) in candidates.iter().enumerate() {
            counts[i] += line.iter().filter(|&&b| b == delim).count();
        }
    }
    let best = counts
        .iter()
        .enumerate()
        .max_by_key(|&(_, &c)| c)
        .map(|(i, &c)| if c > 0 { candidates[i] } else { b',' })
        .unwrap_or(b',');
    Ok(best)
}

fn clean_value(value: &str) -> String {
    value.replace('"', "").trim().to_string()
}

fn is_expected_column(header: &str) -> bool {
    let clean = clean_value(header).to_lowercase();
    EXPECTED_COLUMNS.iter().any(|c| clean == c.to_lowercase())
}

/// Find the header row within the first [`MAX_HEADER_SEARCH_ROWS`] rows:
/// a row counts as the header when at least two expected columns appear.
fn find_header_row(rows: &[Vec<String>]) -> Option<usize> {
    rows.iter()
        .take(MAX_HEADER_SEARCH_ROWS)
        .position(|row| row.iter().filter(|h| is_expected_column(h)).count() >= 2)
}

/// Whether the file starts with a recognizable header row.
pub fn has_header_row(path: impl AsRef<Path>) -> Result<bool> {
    let rows = read_rows(path.as_ref())?;
    Ok(find_header_row(&rows).is_some())
}

/// Map header names to the six record columns. `None` marks a column the
/// file does not carry.
fn find_column_indexes(headers: &[String]) -> [Option<usize>; 6] {
    let mut indexes = [None; 6];
    for (i, header) in headers.iter().enumerate() {
        let clean = clean_value(header);
        for (slot, expected) in EXPECTED_COLUMNS.iter().enumerate() {
            if clean.to_lowercase() == expected.to_lowercase() {
                indexes[slot] = Some(i);
            }
        }
    }
    indexes
}

/// Read a parent list from a CSV/XLS/XLSX file, skipping rows without a
/// student name.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<ImportedRecord>> {
    let path = path.as_ref();
    let rows = read_rows(path)?;
    if rows.is_empty() {
        bail!("file is empty: {}", path.display());
    }
    Ok(records_from_rows(&rows))
}

/// All recipients from a file: one per parent with a non-empty name.
pub fn read_recipients(path: impl AsRef<Path>) -> Result<Vec<Recipient>> {
    let records = read_file(path)?;
    Ok(records.iter().flat_map(|r| r.recipients()).collect())
}

/// Raw cell matrix from whichever format the file is in.
fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    match FileKind::detect(path) {
        Some(FileKind::Csv) => {
            let delimiter = detect_delimiter(path)?;
            read_csv_rows(path, delimiter)
        }
        Some(FileKind::Xls) | Some(FileKind::Xlsx) => read_excel_rows(path),
        None => bail!("unsupported file type: {}", path.display()),
    }
}

fn read_csv_rows(path: &Path, delimiter: u8) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;

    // Byte records with lossy decoding: exports in legacy single-byte
    // encodings still import, with mangled diacritics at worst.
    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.context("read csv row")?;
        let row: Vec<String> = record
            .iter()
            .map(|v| String::from_utf8_lossy(v).trim().to_string())
            .collect();
        if row.iter().all(|v| v.is_empty()) {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

fn read_excel_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("open {}", path.display()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .with_context(|| format!("no worksheets in {}", path.display()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("read worksheet {sheet_name:?}"))?;

    let mut rows = Vec::new();
    for row in range.rows() {
        let values: Vec<String> = row.iter().map(cell_to_string).collect();
        if values.iter().all(|v| v.is_empty()) {
            continue;
        }
        rows.push(values);
    }
    Ok(rows)
}

/// Spreadsheet cells become trimmed strings; numeric cells render without a
/// fractional part so postal codes and house numbers survive as typed.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(_) => cell.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
        Data::Error(_) => String::new(),
    }
}

/// Turn a raw cell matrix into records. When no header row is found the
/// canonical column order is assumed.
fn records_from_rows(rows: &[Vec<String>]) -> Vec<ImportedRecord> {
    let (indexes, first_data_row) = match find_header_row(rows) {
        Some(header_row) => (find_column_indexes(&rows[header_row]), header_row + 1),
        // Headerless exports use the canonical column order.
        None => (std::array::from_fn(Some), 0),
    };

    let mut records = Vec::new();
    for row in &rows[first_data_row.min(rows.len())..] {
        let value = |slot: usize| -> String {
            indexes[slot]
                .and_then(|i| row.get(i))
                .map(|v| clean_value(v))
                .unwrap_or_default()
        };
        let record = ImportedRecord {
            student_first_name: value(0),
            student_last_name: value(1),
            parent1_name: value(2),
            parent2_name: value(3),
            address1: value(4),
            address2: value(5),
        };
        if !record.is_empty() {
            records.push(record);
        }
    }
    records
}
