//! PDF label sheet generation.
//!
//! Labels are laid out on A4 pages as a grid described by a
//! [`LabelFormat`]: walk columns left to right, rows top to bottom, new page
//! when the grid is full. Text is 10pt Helvetica with 12pt leading, inset
//! 2pt from the cell edges. The fit check in [`crate::layout`] is advisory
//! only; oversized text is still emitted.

use crate::fonts::{FONT_SIZE, LINE_HEIGHT, POINTS_PER_MM};
use crate::models::{LabelFormat, Recipient};
use anyhow::{Context, Result};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary, xref::XrefType};
use std::path::Path;

/// A4 in points.
const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;

/// Inset between the cell edge and the text block, in points.
const CELL_INSET: f64 = 2.0;

/// Placeholder for a recipient whose label lines are all empty.
const EMPTY_LABEL_TEXT: &str = "Prázdny štítok";

/// Number of pages needed for `count` labels in the given format.
pub fn page_count(count: usize, format: &LabelFormat) -> usize {
    let per_page = format.labels_per_page() as usize;
    count.div_ceil(per_page)
}

/// Timestamped default file name for a label PDF.
pub fn default_labels_filename() -> String {
    format!("Stitky_{}.pdf", chrono::Local::now().format("%Y%m%d_%H%M%S"))
}

/// Generate the label PDF for `recipients` and write it to `path`.
pub fn generate_labels(
    recipients: &[Recipient],
    format: &LabelFormat,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let mut doc = Document::with_version("1.4");
    doc.reference_table.cross_reference_type = XrefType::CrossReferenceTable;

    let id_pages = doc.new_object_id();

    let id_font = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let per_page = format.labels_per_page() as usize;
    let mut pages: Vec<Object> = vec![];

    for group in recipients.chunks(per_page.max(1)) {
        let ops = page_operations(group, format);
        let content = Content { operations: ops };
        let id_content = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().context("encode page content")?,
        ));
        let id_resources = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => id_font },
        });
        let id_page = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => id_pages,
            "Contents" => id_content,
            "Resources" => id_resources,
        });
        pages.push(id_page.into());
    }

    let page_node = dictionary! {
        "Type" => "Pages",
        "Count" => pages.len() as i32,
        "Kids" => pages,
        "MediaBox" => vec![
            0.into(), 0.into(),
            (PAGE_WIDTH as f32).into(), (PAGE_HEIGHT as f32).into(),
        ],
    };
    doc.set_object(id_pages, page_node);

    let id_catalog = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => id_pages,
    });
    doc.trailer.set("Root", id_catalog);

    let s_date = format!("D:{}", chrono::Local::now().format("%Y%m%d%H%M%S"));
    let id_info = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Adresné štítky"),
        "Creator" => Object::string_literal("adresko"),
        "CreationDate" => Object::string_literal(s_date.clone()),
        "ModDate" => Object::string_literal(s_date),
    });
    doc.trailer.set("Info", id_info);
    doc.compress();

    doc.save(path)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Content stream for one page of labels.
fn page_operations(group: &[Recipient], format: &LabelFormat) -> Vec<Operation> {
    let label_width = format.width * POINTS_PER_MM;
    let label_height = format.height * POINTS_PER_MM;

    let mut ops: Vec<Operation> = Vec::new();
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec!["F1".into(), (FONT_SIZE as f32).into()],
    ));

    for (index, recipient) in group.iter().enumerate() {
        let column = (index % format.columns as usize) as f64;
        let row = (index / format.columns as usize) as f64;

        // Cell origin: PDF y runs bottom-up, labels are placed top-down.
        let x = format.left_margin * POINTS_PER_MM
            + column * (label_width + format.horizontal_gap * POINTS_PER_MM);
        let y = PAGE_HEIGHT
            - format.top_margin * POINTS_PER_MM
            - row * (label_height + format.vertical_gap * POINTS_PER_MM)
            - label_height;

        let lines: Vec<String> = recipient
            .label_lines()
            .iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        let lines = if lines.is_empty() {
            vec![EMPTY_LABEL_TEXT.to_string()]
        } else {
            lines
        };

        let text_x = x + CELL_INSET;
        let top = y + label_height - CELL_INSET;
        for (i, line) in lines.iter().enumerate() {
            let baseline = top - FONT_SIZE - i as f64 * LINE_HEIGHT;
            ops.push(Operation::new(
                "Tm",
                vec![
                    1.0f32.into(),
                    0.0f32.into(),
                    0.0f32.into(),
                    1.0f32.into(),
                    (text_x as f32).into(),
                    (baseline as f32).into(),
                ],
            ));
            ops.push(Operation::new(
                "Tj",
                vec![Object::String(
                    encode_win_ansi(line),
                    StringFormat::Literal,
                )],
            ));
        }
    }

    ops.push(Operation::new("ET", vec![]));
    ops
}

/// Encode text for a WinAnsi (CP1252) Type1 font.
///
/// Latin-1 characters pass through byte-for-byte; the few Slovak letters
/// CP1252 carries outside Latin-1 get their CP1252 code; everything else
/// falls back to the base letter without its diacritic.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        let code = c as u32;
        if code <= 0xFF {
            out.push(code as u8);
            continue;
        }
        match c {
            'Š' => out.push(0x8A),
            'š' => out.push(0x9A),
            'Ž' => out.push(0x8E),
            'ž' => out.push(0x9E),
            _ => {
                let folded = crate::fonts::fold_diacritic(c);
                if (folded as u32) <= 0xFF {
                    out.push(folded as u8);
                } else {
                    out.push(b'?');
                }
            }
        }
    }
    out
}
