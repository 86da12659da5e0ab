//! User-maintained abbreviation dictionary for compressing long addresses.
//!
//! Entries map a lowercased original phrase to its short form and are kept in
//! a flat `key=value` file (one entry per line), rewritten in full on every
//! mutation. When the file cannot be read the built-in defaults take over;
//! persistence failures are logged and never surfaced to abbreviation
//! callers.

use crate::models::{LabelFormat, Recipient};
use anyhow::{Context, Result};
use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// File name used when no explicit dictionary path is given.
pub const DEFAULT_DICTIONARY_FILE: &str = "abbreviations.properties";

const DEFAULT_ENTRIES: [(&str, &str); 3] =
    [("námestie", "nám."), ("ulica", "ul."), ("trieda", "tr.")];

/// Phrase -> abbreviation mapping, optionally synced to a properties file.
///
/// Keys are stored lowercased and trimmed. A `BTreeMap` keeps iteration
/// deterministic: single-word replacements apply in lexicographic key order.
#[derive(Debug, Clone)]
pub struct AbbreviationDictionary {
    entries: BTreeMap<String, String>,
    path: Option<PathBuf>,
}

impl Default for AbbreviationDictionary {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl AbbreviationDictionary {
    /// In-memory dictionary seeded with the built-in Slovak street phrases.
    pub fn with_defaults() -> Self {
        let entries = DEFAULT_ENTRIES
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            entries,
            path: None,
        }
    }

    /// In-memory dictionary from explicit pairs; keys are normalized.
    pub fn from_entries<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut dict = Self {
            entries: BTreeMap::new(),
            path: None,
        };
        for (k, v) in pairs {
            dict.entries.insert(
                k.as_ref().trim().to_lowercase(),
                v.as_ref().trim().to_string(),
            );
        }
        dict
    }

    /// Load the dictionary from `path`, creating it with the default entries
    /// when missing. An unreadable file logs a warning and falls back to the
    /// in-memory defaults, so abbreviation keeps working.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if !path.exists() {
            let mut dict = Self::with_defaults();
            dict.path = Some(path);
            dict.persist();
            return dict;
        }

        match fs::read_to_string(&path) {
            Ok(text) => {
                let mut entries = BTreeMap::new();
                for line in text.lines() {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Some((key, value)) = line.split_once('=') {
                        let key = key.trim().to_lowercase();
                        let value = value.trim().to_string();
                        if !key.is_empty() && !value.is_empty() {
                            entries.insert(key, value);
                        }
                    }
                }
                Self {
                    entries,
                    path: Some(path),
                }
            }
            Err(e) => {
                warn!("failed to read {}: {e}; using default entries", path.display());
                let mut dict = Self::with_defaults();
                dict.path = Some(path);
                dict
            }
        }
    }

    /// Load from [`DEFAULT_DICTIONARY_FILE`] in the working directory.
    pub fn load_default() -> Self {
        Self::load(DEFAULT_DICTIONARY_FILE)
    }

    /// Write all entries back to the backing file.
    pub fn save(&self) -> Result<()> {
        let path = self
            .path
            .as_deref()
            .context("dictionary has no backing file")?;
        let mut out = String::from("# Address abbreviations\n");
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        fs::write(path, out).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    fn persist(&self) {
        if self.path.is_none() {
            return;
        }
        if let Err(e) = self.save() {
            warn!("failed to persist abbreviation dictionary: {e:#}");
        }
    }

    /// Add or replace an entry and rewrite the backing file. Blank originals
    /// or abbreviations are ignored.
    pub fn insert(&mut self, original: &str, abbreviation: &str) {
        let key = original.trim().to_lowercase();
        let value = abbreviation.trim().to_string();
        if key.is_empty() || value.is_empty() {
            return;
        }
        self.entries.insert(key, value);
        self.persist();
    }

    /// Remove an entry and rewrite the backing file.
    pub fn remove(&mut self, original: &str) {
        let key = original.trim().to_lowercase();
        if key.is_empty() {
            return;
        }
        self.entries.remove(&key);
        self.persist();
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite `address` using the dictionary.
    ///
    /// An exact whole-address match (case-insensitive) wins outright.
    /// Otherwise multi-word phrases are replaced first, longest phrase first,
    /// then single words in lexicographic key order; all replacements are
    /// case-insensitive and respect word boundaries. Text without any match
    /// comes back unchanged.
    pub fn abbreviate(&self, address: &str) -> String {
        if address.trim().is_empty() {
            return address.to_string();
        }

        if let Some(abbr) = self.entries.get(&address.to_lowercase()) {
            return abbr.clone();
        }

        let mut result = address.to_string();

        let mut multi_word: Vec<(&str, &str)> = self
            .entries
            .iter()
            .filter(|(k, _)| k.contains(' '))
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        // Longest phrase first; the map already yields ties lexicographically.
        multi_word.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
        for (key, value) in multi_word {
            result = replace_whole_words(&result, key, value);
        }

        for (key, value) in &self.entries {
            if !key.contains(' ') {
                result = replace_whole_words(&result, key, value);
            }
        }

        result
    }

    /// Best-effort abbreviation against a character budget.
    ///
    /// Returns the address unchanged when it already fits, the whole-address
    /// abbreviation when one exists and fits, otherwise the generic
    /// [`Self::abbreviate`] result even when that still exceeds the budget.
    /// The result is not guaranteed to fit `max_len`; callers wanting a hard
    /// cut can follow up with [`shorten_if_needed`].
    pub fn best_abbreviation(&self, address: &str, max_len: usize) -> String {
        if address.chars().count() <= max_len {
            return address.to_string();
        }

        if let Some(abbr) = self.entries.get(&address.to_lowercase()) {
            if abbr.chars().count() <= max_len {
                return abbr.clone();
            }
        }

        self.abbreviate(address)
    }
}

/// Case-insensitive whole-word replacement of `key` in `text`.
fn replace_whole_words(text: &str, key: &str, value: &str) -> String {
    let pattern = format!(r"(?i)\b{}\b", regex::escape(key));
    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(text, regex::NoExpand(value)).into_owned(),
        // An unbuildable pattern leaves the text alone; keys come from user
        // input and must never break abbreviation.
        Err(_) => text.to_string(),
    }
}

/// Aggressive shortening for addresses the dictionary cannot compress: apply
/// the standard street abbreviations, then drop trailing comma-separated
/// segments that no longer fit. Unlike [`AbbreviationDictionary`], this can
/// lose information; it is an explicit, opt-in step.
pub fn shorten_if_needed(address: &str, max_len: usize) -> String {
    if address.chars().count() <= max_len {
        return address.to_string();
    }

    let mut result = address
        .replace("ulica", "ul.")
        .replace("Ulica", "Ul.")
        .replace("námestie", "nám.")
        .replace("Námestie", "Nám.")
        .replace("trieda", "tr.")
        .replace("Trieda", "Tr.");

    if result.chars().count() > max_len {
        let mut shortened = String::new();
        for part in result.split(',') {
            let trimmed = part.trim();
            if shortened.chars().count() + trimmed.chars().count() + 2 <= max_len {
                if !shortened.is_empty() {
                    shortened.push_str(", ");
                }
                shortened.push_str(trimmed);
            } else {
                break;
            }
        }
        result = shortened;
    }

    result
}

/// One row of the address review step: the best abbreviation for a recipient
/// plus whether it fits the format's character budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressReview {
    pub name: String,
    pub original_address: String,
    pub abbreviated_address: String,
    pub fits: bool,
}

impl AddressReview {
    /// Status text shown to the user.
    pub fn status(&self) -> &'static str {
        if self.fits {
            "Vyhovuje"
        } else {
            "Nevyhovuje - príliš dlhá"
        }
    }
}

/// Evaluate every recipient against the format's maximum address length,
/// producing the review table the abbreviation step works from.
pub fn review_addresses(
    recipients: &[Recipient],
    format: &LabelFormat,
    dictionary: &AbbreviationDictionary,
) -> Vec<AddressReview> {
    recipients
        .iter()
        .map(|r| {
            let original = r.full_address();
            let abbreviated = dictionary.best_abbreviation(&original, format.max_address_len);
            let fits = abbreviated.chars().count() <= format.max_address_len;
            AddressReview {
                name: r.full_name(),
                original_address: original,
                abbreviated_address: abbreviated,
                fits,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_replacement() {
        let dict = AbbreviationDictionary::from_entries([("ulica", "ul.")]);
        assert_eq!(dict.abbreviate("Hlavná ulica 5"), "Hlavná ul. 5");
    }

    #[test]
    fn replacement_is_case_insensitive() {
        let dict = AbbreviationDictionary::from_entries([("ulica", "ul.")]);
        assert_eq!(dict.abbreviate("Hlavná Ulica 5"), "Hlavná ul. 5");
    }

    #[test]
    fn no_match_returns_input_unchanged() {
        let dict = AbbreviationDictionary::with_defaults();
        assert_eq!(dict.abbreviate("Krátka 3"), "Krátka 3");
        assert_eq!(dict.abbreviate(""), "");
    }

    #[test]
    fn whole_address_match_wins() {
        let dict =
            AbbreviationDictionary::from_entries([("hlavná ulica 5", "HU5"), ("ulica", "ul.")]);
        assert_eq!(dict.abbreviate("Hlavná ulica 5"), "HU5");
    }

    #[test]
    fn multi_word_phrase_takes_precedence() {
        let dict = AbbreviationDictionary::from_entries([
            ("hlavné námestie", "Hl. nám."),
            ("námestie", "nám."),
        ]);
        let out = dict.abbreviate("Hlavné námestie 1");
        assert!(out.contains("Hl. nám."), "got {out:?}");
        assert_eq!(out, "Hl. nám. 1");
    }

    #[test]
    fn word_boundaries_are_respected() {
        let dict = AbbreviationDictionary::from_entries([("tr", "t.")]);
        // "tr" must not fire inside "trieda" or "Bratislava".
        assert_eq!(dict.abbreviate("trieda Bratislava"), "trieda Bratislava");
    }

    #[test]
    fn best_abbreviation_short_input_unchanged() {
        let dict = AbbreviationDictionary::with_defaults();
        assert_eq!(dict.best_abbreviation("Krátka 3", 24), "Krátka 3");
    }

    #[test]
    fn best_abbreviation_uses_whole_address_entry() {
        let dict = AbbreviationDictionary::from_entries([(
            "námestie slovenského národného povstania 1",
            "Nám. SNP 1",
        )]);
        let out = dict.best_abbreviation("Námestie slovenského národného povstania 1", 24);
        assert_eq!(out, "Nám. SNP 1");
    }

    #[test]
    fn best_abbreviation_may_exceed_budget() {
        let dict = AbbreviationDictionary::with_defaults();
        // Nothing matches: the input comes back as-is even though it exceeds
        // the budget. No silent truncation.
        let long = "Podunajské Biskupice 999";
        let out = dict.best_abbreviation(long, 10);
        assert_eq!(out, long);
    }

    #[test]
    fn shorten_drops_trailing_segments() {
        let out = shorten_if_needed("Dlhá ulica 47, 949 01 Nitra, Slovensko", 20);
        assert_eq!(out, "Dlhá ul. 47");
    }

    #[test]
    fn review_marks_overlong_addresses() {
        let format = LabelFormat::predefined().into_iter().next().unwrap();
        let dict = AbbreviationDictionary::with_defaults();
        let recipients = vec![
            Recipient::from_full("Ján Novák", "Krátka 3, 949 01 Nitra"),
            Recipient::from_full(
                "Eva Malá",
                "Veľmi dlhé sídlisko pri severnom nábreží 123, 851 01 Bratislava",
            ),
        ];
        let reviews = review_addresses(&recipients, &format, &dict);
        assert_eq!(reviews.len(), 2);
        assert!(reviews[0].fits);
        assert_eq!(reviews[0].status(), "Vyhovuje");
        assert!(!reviews[1].fits);
        assert_eq!(reviews[1].status(), "Nevyhovuje - príliš dlhá");
    }
}
