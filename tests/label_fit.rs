use adresko::layout;
use adresko::models::{LabelFormat, Recipient};

fn small_format() -> LabelFormat {
    // 48.3 x 16.9 mm, 64 per page.
    LabelFormat::predefined().remove(0)
}

#[test]
fn typical_address_fits_the_small_label() {
    let format = small_format();
    assert!(layout::fits(
        "Ján Novák",
        "Hlavná 12",
        "851 01 Bratislava",
        &format
    ));
}

#[test]
fn overlong_street_does_not_fit() {
    let format = small_format();
    let street = "Dlhočizná ulica pomenovaná po významnom dejateľovi 1234/56";
    assert!(!layout::fits("Ján Novák", street, "851 01 Bratislava", &format));
}

#[test]
fn recipient_fit_matches_line_fit() {
    let format = small_format();
    let r = Recipient::from_full("Ján Novák", "Hlavná 12, 851 01 Bratislava");
    assert!(layout::recipient_fits(&r, &format));
}

#[test]
fn three_lines_do_not_fit_a_shallow_label() {
    // 11 mm is 31.2 pt; minus the 4 pt reserve that takes two 12 pt lines
    // but not three.
    let shallow = LabelFormat::new(
        "nízky", 48.3, 11.0, 4, 16, 8.4, 8.4, 13.3, 13.3, 0.0, 0.0, 24,
    )
    .unwrap();
    assert!(!layout::fits("Ján Novák", "Hlavná 12", "851 01 Bratislava", &shallow));
    // Two lines still do.
    assert!(layout::fits("Ján Novák", "", "851 01 Bratislava", &shallow));
}

#[test]
fn longest_line_is_measured_not_counted() {
    // Width comparison uses font metrics, so a string of wide capitals
    // beats a longer string of narrow letters.
    let wide = "WWWWWWWW";
    let narrow = "iiiiiiiiiiiiiiii";
    let r_wide = Recipient::from_full("A B", &format!("{wide}, 851 01 X"));
    let r_narrow = Recipient::from_full("A B", &format!("{narrow}, 851 01 X"));
    assert!(layout::longest_line_width(&r_wide) > layout::longest_line_width(&r_narrow));
}
