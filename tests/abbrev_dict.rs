use adresko::AbbreviationDictionary;
use tempfile::tempdir;

#[test]
fn missing_file_is_created_with_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("abbreviations.properties");

    let dict = AbbreviationDictionary::load(&path);
    assert!(path.exists());
    assert_eq!(dict.entries().get("ulica").map(String::as_str), Some("ul."));
    assert_eq!(dict.entries().get("námestie").map(String::as_str), Some("nám."));
    assert_eq!(dict.entries().get("trieda").map(String::as_str), Some("tr."));
}

#[test]
fn inserted_entries_survive_a_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("abbreviations.properties");

    let mut dict = AbbreviationDictionary::load(&path);
    dict.insert("Sídlisko", "sídl.");

    let reloaded = AbbreviationDictionary::load(&path);
    // Keys are stored lowercased.
    assert_eq!(
        reloaded.entries().get("sídlisko").map(String::as_str),
        Some("sídl.")
    );
}

#[test]
fn removed_entries_stay_removed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("abbreviations.properties");

    let mut dict = AbbreviationDictionary::load(&path);
    dict.remove("trieda");

    let reloaded = AbbreviationDictionary::load(&path);
    assert!(!reloaded.entries().contains_key("trieda"));
    assert_eq!(reloaded.len(), 2);
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("abbreviations.properties");
    std::fs::write(&path, "# komentár\n\nulica=ul.\n  sídlisko = sídl.  \n").unwrap();

    let dict = AbbreviationDictionary::load(&path);
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.entries().get("sídlisko").map(String::as_str), Some("sídl."));
}

#[test]
fn whole_address_entries_apply_before_word_replacement() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("abbreviations.properties");

    let mut dict = AbbreviationDictionary::load(&path);
    dict.insert("Dlhá ulica 47, 949 01 Nitra", "Dlhá 47, Nitra");

    assert_eq!(
        dict.abbreviate("Dlhá ulica 47, 949 01 Nitra"),
        "Dlhá 47, Nitra"
    );
    // Other addresses still go through word replacement.
    assert_eq!(dict.abbreviate("Krátka ulica 3"), "Krátka ul. 3");
}
