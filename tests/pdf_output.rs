use adresko::models::{LabelFormat, Recipient};
use adresko::pdf;
use tempfile::tempdir;

fn sample(n: usize) -> Vec<Recipient> {
    (0..n)
        .map(|i| {
            Recipient::from_full(
                &format!("Rodič {}", i + 1),
                &format!("Hlavná {}, 851 01 Bratislava", i + 1),
            )
        })
        .collect()
}

#[test]
fn one_page_for_a_partial_grid() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stitky.pdf");
    let format = LabelFormat::predefined().remove(0); // 64 per page

    pdf::generate_labels(&sample(10), &format, &path).unwrap();

    let doc = lopdf::Document::load(&path).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn grid_overflow_starts_a_new_page() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stitky.pdf");
    let format = LabelFormat::predefined().remove(0);

    pdf::generate_labels(&sample(65), &format, &path).unwrap();

    let doc = lopdf::Document::load(&path).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
    assert_eq!(pdf::page_count(65, &format), 2);
}

#[test]
fn nameless_recipient_gets_a_placeholder() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stitky.pdf");
    let format = LabelFormat::predefined().remove(1);

    let empty = Recipient::from_full("", "");
    pdf::generate_labels(&[empty], &format, &path).unwrap();

    let doc = lopdf::Document::load(&path).unwrap();
    let page = *doc.get_pages().values().next().unwrap();
    let content = doc.get_page_content(page).unwrap();
    let text = String::from_utf8_lossy(&content).into_owned();
    // WinAnsi bytes for "Prázdny" survive the lossy decode except for á.
    assert!(text.contains("Pr"));
    assert!(text.contains("zdny"));
}
