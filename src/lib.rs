//! adresko
//!
//! A library for preparing postal address labels. Pairs with the `adresko`
//! CLI.
//!
//! ### Features
//! - Import recipients from CSV, XLS or XLSX class lists
//! - Check whether addresses fit a label format, with Slovak street-type
//!   abbreviations to reclaim space
//! - Render label sheets as PDF on A4 pages
//! - Generate postal submission sheets as XLSX workbooks
//!
//! ### Example
//! ```no_run
//! use adresko::{AbbreviationDictionary, LabelFormat};
//!
//! let recipients = adresko::import::read_recipients("class_list.csv")?;
//! let format = LabelFormat::predefined().remove(0);
//! let dict = AbbreviationDictionary::load_default();
//! for review in adresko::abbrev::review_addresses(&recipients, &format, &dict) {
//!     println!("{}: {}", review.name, review.status());
//! }
//! adresko::pdf::generate_labels(&recipients, &format, "stitky.pdf")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod abbrev;
pub mod fonts;
pub mod import;
pub mod layout;
pub mod models;
pub mod pdf;
pub mod sheets;
pub mod storage;

pub use abbrev::AbbreviationDictionary;
pub use models::{ImportedRecord, LabelFormat, Recipient};
pub use sheets::Sender;
