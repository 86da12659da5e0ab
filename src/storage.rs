//! Saving recipient lists to disk and the default output directory.

use crate::models::Recipient;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default directory for generated files, `~/Documents/AdreskoBox`.
///
/// Falls back to the current directory when no home directory is known.
pub fn default_output_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("AdreskoBox")
}

/// Save recipients as CSV with header.
pub fn save_csv<P: AsRef<Path>>(recipients: &[Recipient], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("name", "street", "zip_code", "city"))?;
    for r in recipients {
        wtr.serialize((r.full_name(), &r.street, &r.zip_code, &r.city))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save recipients as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(recipients: &[Recipient], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(recipients)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recipient;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let list = vec![Recipient::from_parts(
            "Ján", "Novák", "Hlavná 12", "Bratislava", "851 01",
        )];
        save_csv(&list, &csvp).unwrap();
        save_json(&list, &jsonp).unwrap();
        let csv = std::fs::read_to_string(&csvp).unwrap();
        assert!(csv.contains("Ján Novák"));
        let json = std::fs::read_to_string(&jsonp).unwrap();
        assert!(json.contains("Hlavná 12"));
    }
}
