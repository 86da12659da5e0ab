//! Postal submission sheets ("podací hárok") as XLSX workbooks.
//!
//! Each workbook holds a sender block, a mail-type checklist and up to
//! twelve recipients; longer lists are split across numbered files.

use crate::models::Recipient;
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, FormatAlign, Workbook};
use std::fs;
use std::path::{Path, PathBuf};

/// Recipients per submission sheet.
pub const RECIPIENTS_PER_SHEET: usize = 12;

/// Mail types offered on the checklist.
pub const MAIL_TYPES: [&str; 6] = [
    "Doporučený list",
    "Poistený list",
    "Úradná zasielka",
    "Balík",
    "Expresná zasielka",
    "Poštový poukaz",
];

const TITLE: &str = "PODACÍ HÁROK";
const CHECKBOX: &str = "☐";

/// Fixed layout positions, 0-based: sender block from Excel row 10,
/// recipient table from row 22, addresses split over columns C/E/H.
const SENDER_LABEL_ROW: u32 = 8;
const SENDER_FIRST_ROW: u32 = 9;
const RECIPIENT_HEADER_ROW: u32 = 21;
const RECIPIENT_FIRST_ROW: u32 = 22;
const RECIPIENT_NAME_COL: u16 = 2;
const RECIPIENT_STREET_COL: u16 = 4;
const RECIPIENT_CITY_COL: u16 = 7;
const MAIL_TYPE_COL: u16 = 5;
const MAIL_CHECKBOX_COL: u16 = 6;

/// Sender block printed on every sheet.
#[derive(Debug, Clone)]
pub struct Sender {
    pub name: String,
    pub street: String,
    pub city: String,
}

/// Write submission sheets for `recipients` into `out_dir`.
///
/// Returns the paths of the created workbooks, one per group of
/// [`RECIPIENTS_PER_SHEET`] recipients.
pub fn create_submission_sheets(
    recipients: &[Recipient],
    sender: &Sender,
    out_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create {}", out_dir.display()))?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    let mut paths = Vec::new();

    for (sheet_no, group) in recipients.chunks(RECIPIENTS_PER_SHEET).enumerate() {
        let path = out_dir.join(format!("Podaci_harok_{}_{}.xlsx", sheet_no + 1, timestamp));
        write_sheet(group, sender, &path)
            .with_context(|| format!("write {}", path.display()))?;
        paths.push(path);
    }

    Ok(paths)
}

fn write_sheet(group: &[Recipient], sender: &Sender, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let title_format = Format::new().set_bold().set_align(FormatAlign::Center);
    let label_format = Format::new().set_bold();
    let merged = Format::new();

    sheet.merge_range(0, 0, 0, 7, TITLE, &title_format)?;

    sheet.write_string_with_format(SENDER_LABEL_ROW, 0, "Odosielateľ:", &label_format)?;
    // The sender block merges B:E; column F belongs to the checklist.
    for (i, value) in [&sender.name, &sender.street, &sender.city]
        .into_iter()
        .enumerate()
    {
        let row = SENDER_FIRST_ROW + i as u32;
        sheet.merge_range(row, 1, row, 4, value, &merged)?;
    }

    sheet.write_string_with_format(SENDER_LABEL_ROW, MAIL_TYPE_COL, "Druh zásielky:", &label_format)?;
    for (i, mail_type) in MAIL_TYPES.iter().enumerate() {
        let row = SENDER_FIRST_ROW + i as u32;
        sheet.write_string(row, MAIL_TYPE_COL, *mail_type)?;
        sheet.write_string(row, MAIL_CHECKBOX_COL, CHECKBOX)?;
    }

    sheet.write_string_with_format(
        RECIPIENT_HEADER_ROW,
        RECIPIENT_NAME_COL,
        "Meno príjemcu",
        &label_format,
    )?;
    sheet.write_string_with_format(
        RECIPIENT_HEADER_ROW,
        RECIPIENT_STREET_COL,
        "Ulica a číslo",
        &label_format,
    )?;
    sheet.write_string_with_format(
        RECIPIENT_HEADER_ROW,
        RECIPIENT_CITY_COL,
        "PSČ a mesto",
        &label_format,
    )?;

    for (i, recipient) in group.iter().enumerate() {
        let row = RECIPIENT_FIRST_ROW + i as u32;
        let [name, street, city] = recipient.label_lines();
        sheet.write_string(row, 1, format!("{}.", i + 1))?;
        sheet.write_string(row, RECIPIENT_NAME_COL, name)?;
        sheet.write_string(row, RECIPIENT_STREET_COL, street)?;
        sheet.write_string(row, RECIPIENT_CITY_COL, city)?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Number of workbooks produced for `count` recipients.
pub fn sheet_count(count: usize) -> usize {
    count.div_ceil(RECIPIENTS_PER_SHEET)
}
