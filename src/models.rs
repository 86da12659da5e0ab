use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

/// Validation failure when constructing a [`LabelFormat`].
#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    #[error("format name must not be empty")]
    EmptyName,
    #[error("label dimensions must be positive")]
    NonPositiveDimensions,
    #[error("column and row counts must be positive")]
    NonPositiveGrid,
    #[error("margins must not be negative")]
    NegativeMargin,
    #[error("gaps must not be negative")]
    NegativeGap,
    #[error("maximum address length must be positive")]
    NonPositiveMaxLength,
}

/// Geometry of one sheet of labels. All dimensions are millimeters.
///
/// Instances are validated on construction and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelFormat {
    pub name: String,
    /// Width of a single label in mm.
    pub width: f64,
    /// Height of a single label in mm.
    pub height: f64,
    pub columns: u32,
    pub rows: u32,
    pub left_margin: f64,
    pub right_margin: f64,
    pub top_margin: f64,
    pub bottom_margin: f64,
    pub horizontal_gap: f64,
    pub vertical_gap: f64,
    /// Maximum address length in characters, used by the address review step.
    pub max_address_len: usize,
}

impl LabelFormat {
    /// Build a format, validating every dimension.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        width: f64,
        height: f64,
        columns: u32,
        rows: u32,
        left_margin: f64,
        right_margin: f64,
        top_margin: f64,
        bottom_margin: f64,
        horizontal_gap: f64,
        vertical_gap: f64,
        max_address_len: usize,
    ) -> Result<Self, FormatError> {
        if name.trim().is_empty() {
            return Err(FormatError::EmptyName);
        }
        if !(width > 0.0) || !(height > 0.0) {
            return Err(FormatError::NonPositiveDimensions);
        }
        if columns == 0 || rows == 0 {
            return Err(FormatError::NonPositiveGrid);
        }
        if left_margin < 0.0 || right_margin < 0.0 || top_margin < 0.0 || bottom_margin < 0.0 {
            return Err(FormatError::NegativeMargin);
        }
        if horizontal_gap < 0.0 || vertical_gap < 0.0 {
            return Err(FormatError::NegativeGap);
        }
        if max_address_len == 0 {
            return Err(FormatError::NonPositiveMaxLength);
        }
        Ok(Self {
            name: name.to_string(),
            width,
            height,
            columns,
            rows,
            left_margin,
            right_margin,
            top_margin,
            bottom_margin,
            horizontal_gap,
            vertical_gap,
            max_address_len,
        })
    }

    pub fn labels_per_page(&self) -> u32 {
        self.columns * self.rows
    }

    /// Total width of the grid including page margins and gaps, in mm.
    pub fn total_width(&self) -> f64 {
        self.left_margin
            + self.right_margin
            + self.columns as f64 * self.width
            + (self.columns.saturating_sub(1)) as f64 * self.horizontal_gap
    }

    /// Total height of the grid including page margins and gaps, in mm.
    pub fn total_height(&self) -> f64 {
        self.top_margin
            + self.bottom_margin
            + self.rows as f64 * self.height
            + (self.rows.saturating_sub(1)) as f64 * self.vertical_gap
    }

    /// Advisory check against a standard A4 page (210 x 297 mm).
    pub fn fits_on_a4(&self) -> bool {
        self.total_width() <= 210.0 && self.total_height() <= 297.0
    }

    /// The built-in Avery-style sheet formats.
    pub fn predefined() -> Vec<LabelFormat> {
        // Values validated above, so unwrap cannot fire here.
        vec![
            LabelFormat::new(
                "A4 - 48,3 x 16,9 mm (64 ks)",
                48.3,
                16.9,
                4,
                16,
                8.4,
                8.4,
                13.3,
                13.3,
                0.0,
                0.0,
                24,
            )
            .unwrap(),
            LabelFormat::new(
                "A4 - 70 x 37 mm (24 ks)",
                70.0,
                37.0,
                3,
                8,
                5.0,
                5.0,
                15.0,
                15.0,
                0.0,
                0.0,
                50,
            )
            .unwrap(),
            LabelFormat::new(
                "A4 - 105 x 148 mm (4 ks)",
                105.0,
                148.0,
                2,
                2,
                0.0,
                0.0,
                0.5,
                0.5,
                0.0,
                0.0,
                100,
            )
            .unwrap(),
            LabelFormat::new(
                "A4 - 99,1 x 67,7 mm (8 ks)",
                99.1,
                67.7,
                2,
                4,
                5.95,
                5.95,
                21.15,
                21.15,
                0.0,
                0.0,
                80,
            )
            .unwrap(),
        ]
    }
}

fn zip_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Slovak postal code: "123 45" or "12345".
    RE.get_or_init(|| Regex::new(r"\b(\d{3}\s?\d{2})\b").expect("valid zip regex"))
}

fn zip_in_city_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{3}\s?\d{2})\s+(.+)$").expect("valid zip-city regex"))
}

/// One label recipient: a name plus a postal address, decomposed into
/// street / city / postal code where the address allows it.
///
/// Produces a fixed 3-line label: name, street line, "ZIP city" line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub zip_code: String,
    /// Verbatim name as imported, when the recipient came from a single
    /// full-name column.
    full_name: Option<String>,
    /// Verbatim address as imported, preferred by [`Recipient::full_address`].
    raw_address: Option<String>,
}

impl Recipient {
    /// Build a recipient from already-decomposed fields.
    pub fn from_parts(
        first_name: &str,
        last_name: &str,
        street: &str,
        city: &str,
        zip_code: &str,
    ) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            street: street.to_string(),
            city: city.to_string(),
            zip_code: zip_code.to_string(),
            full_name: None,
            raw_address: None,
        }
    }

    /// Build a recipient from a full name and an unstructured address line,
    /// splitting both into components on a best-effort basis.
    pub fn from_full(full_name: &str, full_address: &str) -> Self {
        let mut parts = full_name.splitn(2, ' ');
        let first_name = parts.next().unwrap_or("").to_string();
        let last_name = parts.next().unwrap_or("").to_string();

        let (street, city, zip_code) = split_address(full_address);
        Self {
            first_name,
            last_name,
            street,
            city,
            zip_code,
            full_name: Some(full_name.to_string()),
            raw_address: Some(full_address.to_string()),
        }
    }

    pub fn full_name(&self) -> String {
        match &self.full_name {
            Some(n) => n.clone(),
            None => format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string(),
        }
    }

    /// The one-line address, preferring the verbatim imported form.
    pub fn full_address(&self) -> String {
        if let Some(raw) = &self.raw_address {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }

        let mut out = String::new();
        if !self.street.is_empty() {
            out.push_str(&self.street);
        }
        if !self.zip_code.is_empty() || !self.city.is_empty() {
            if !out.is_empty() {
                out.push_str(", ");
            }
            if !self.zip_code.is_empty() {
                out.push_str(&self.zip_code);
                if !self.city.is_empty() {
                    out.push(' ');
                }
            }
            out.push_str(&self.city);
        }
        out
    }

    /// The fixed 3-line label form: `[name, street, "ZIP city"]`.
    /// Lines may be empty; callers decide what to do with them.
    pub fn label_lines(&self) -> [String; 3] {
        let mut line3 = String::new();
        if !self.zip_code.is_empty() {
            line3.push_str(&self.zip_code);
            if !self.city.is_empty() {
                line3.push(' ');
            }
        }
        line3.push_str(&self.city);
        [self.full_name(), self.street.clone(), line3]
    }

    /// Replace the address with an edited/abbreviated one-liner, re-splitting
    /// it into components.
    pub fn set_address(&mut self, address: &str) {
        let (street, city, zip_code) = split_address(address);
        self.street = street;
        self.city = city;
        self.zip_code = zip_code;
        self.raw_address = Some(address.to_string());
    }
}

/// Split an unstructured address into (street, city, zip).
///
/// Strategy mirrors how Slovak addresses are commonly written: look for a
/// postal code first, then fall back to comma separation, then give up and
/// treat the whole string as the street.
fn split_address(full_addr: &str) -> (String, String, String) {
    let trimmed = full_addr.trim();
    if trimmed.is_empty() {
        return (String::new(), String::new(), String::new());
    }

    if let Some(m) = zip_regex().find(trimmed) {
        let zip = m.as_str().trim().to_string();
        let before = trimmed[..m.start()].trim();
        let after = trimmed[m.end()..].trim();
        let street = before.strip_suffix(',').unwrap_or(before).trim().to_string();
        return (street, after.to_string(), zip);
    }

    let parts: Vec<&str> = trimmed.split(',').collect();
    if parts.len() >= 2 {
        let street = parts[0].trim().to_string();
        let last = parts[parts.len() - 1].trim();
        // The last segment may still start with a postal code.
        if let Some(caps) = zip_in_city_regex().captures(last) {
            return (street, caps[2].to_string(), caps[1].to_string());
        }
        return (street, last.to_string(), String::new());
    }

    (trimmed.to_string(), String::new(), String::new())
}

/// Raw imported row before conversion into recipients: one student with up
/// to two parents and their addresses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportedRecord {
    pub student_first_name: String,
    pub student_last_name: String,
    pub parent1_name: String,
    pub parent2_name: String,
    pub address1: String,
    pub address2: String,
}

impl ImportedRecord {
    /// True when neither student name field carries data; such rows are
    /// dropped at import.
    pub fn is_empty(&self) -> bool {
        self.student_first_name.trim().is_empty() && self.student_last_name.trim().is_empty()
    }

    /// Expand the row into recipients: one per non-empty parent name, paired
    /// with the matching address column.
    pub fn recipients(&self) -> Vec<Recipient> {
        let mut out = Vec::new();
        if !self.parent1_name.trim().is_empty() {
            out.push(Recipient::from_full(
                self.parent1_name.trim(),
                self.address1.trim(),
            ));
        }
        if !self.parent2_name.trim().is_empty() {
            out.push(Recipient::from_full(
                self.parent2_name.trim(),
                self.address2.trim(),
            ));
        }
        out
    }
}
