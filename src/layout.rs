//! Label fit checking: does a 3-line address block fit inside one label cell?
//!
//! The decision is purely geometric: line widths are measured with the
//! Helvetica metrics from [`crate::fonts`] and compared against the label's
//! printable area, leaving a small reserve inside the cell edges. The check
//! is advisory; PDF emission never refuses oversized text.

use crate::fonts::{self, LINE_HEIGHT, POINTS_PER_MM};
use crate::models::{LabelFormat, Recipient};

/// Horizontal slack kept inside the label cell, in points.
const WIDTH_RESERVE: f64 = 2.0;

/// Vertical slack kept inside the label cell, in points.
const HEIGHT_RESERVE: f64 = 4.0;

/// Check whether three text lines fit on a label of the given format.
///
/// Empty lines measure zero width and do not count toward the height. Any
/// degenerate format value (NaN/infinite dimensions) fails the check rather
/// than erroring; "does not fit" is the safe answer.
pub fn fits(line1: &str, line2: &str, line3: &str, format: &LabelFormat) -> bool {
    let label_width_pt = format.width * POINTS_PER_MM;
    let label_height_pt = format.height * POINTS_PER_MM;
    if !label_width_pt.is_finite() || !label_height_pt.is_finite() {
        return false;
    }

    let max_line_width = fonts::line_width(line1)
        .max(fonts::line_width(line2))
        .max(fonts::line_width(line3));
    if max_line_width > label_width_pt - WIDTH_RESERVE {
        return false;
    }

    let non_empty = [line1, line2, line3]
        .iter()
        .filter(|l| !l.trim().is_empty())
        .count();
    let total_height = non_empty as f64 * LINE_HEIGHT;
    if total_height > label_height_pt - HEIGHT_RESERVE {
        return false;
    }

    true
}

/// Check a recipient's formatted 3-line label against a format.
pub fn recipient_fits(recipient: &Recipient, format: &LabelFormat) -> bool {
    let [l1, l2, l3] = recipient.label_lines();
    fits(&l1, &l2, &l3, format)
}

/// The widest of the recipient's label lines, for diagnostic messages.
/// Never used for the fit decision itself.
pub fn longest_line(recipient: &Recipient) -> String {
    let lines = recipient.label_lines();
    let mut longest = lines[0].clone();
    for line in &lines[1..] {
        if fonts::line_width(line) > fonts::line_width(&longest) {
            longest = line.clone();
        }
    }
    longest
}

/// Width in points of the widest label line.
pub fn longest_line_width(recipient: &Recipient) -> f64 {
    recipient
        .label_lines()
        .iter()
        .map(|l| fonts::line_width(l))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_format() -> LabelFormat {
        // 48.3 x 16.9 mm, the 64-per-page sheet.
        LabelFormat::predefined().into_iter().next().unwrap()
    }

    #[test]
    fn realistic_address_fits() {
        let f = small_format();
        assert!(fits("Ján Novák", "Hlavná 12", "851 01 Bratislava", &f));
    }

    #[test]
    fn overlong_line_fails_regardless_of_others() {
        let f = small_format();
        let street = "Námestie slovenského národného povstania 1234567890";
        assert!(!fits("A", street, "B", &f));
        assert!(!fits("", street, "", &f));
    }

    #[test]
    fn empty_lines_do_not_count_toward_height() {
        let f = small_format();
        // 16.9 mm is ~47.9 pt; 3 lines need 36 pt + reserve, 2 need 24 pt.
        assert!(fits("Ján Novák", "", "851 01 Bratislava", &f));
    }

    #[test]
    fn too_many_lines_for_a_shallow_label() {
        let shallow = LabelFormat::new(
            "shallow", 48.3, 9.0, 4, 16, 8.4, 8.4, 13.3, 13.3, 0.0, 0.0, 24,
        )
        .unwrap();
        // 9 mm is ~25.5 pt; three 12 pt lines cannot fit.
        assert!(!fits("a", "b", "c", &shallow));
        assert!(fits("a", "", "", &shallow));
    }

    #[test]
    fn longest_line_is_the_city_line() {
        let r = Recipient::from_full("Ján Novák", "Hlavná 12, 851 01 Bratislava");
        assert_eq!(longest_line(&r), "851 01 Bratislava");
        assert!(longest_line_width(&r) > 0.0);
    }
}
