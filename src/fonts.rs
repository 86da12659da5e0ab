//! Helvetica text measurement for label layout.
//!
//! Label geometry is specified in millimeters; PDF text lives in PostScript
//! points. Widths come from the standard Helvetica AFM advance table (in
//! 1/1000 em), so measuring needs no font file at runtime.

/// Conversion factor from millimeters to PostScript points.
pub const POINTS_PER_MM: f64 = 2.834645669;

/// Point size used for label text.
pub const FONT_SIZE: f64 = 10.0;

/// Line height (leading) for label text, in points.
pub const LINE_HEIGHT: f64 = 12.0;

/// Advance width used for characters missing from the table, mirroring the
/// 0.55 em per-character estimate the layout falls back to without metrics.
const FALLBACK_WIDTH: f64 = 550.0;

/// Measure the rendered width of `text` at the given point size.
/// Empty text measures zero.
pub fn text_width(text: &str, size: f64) -> f64 {
    text.chars().map(char_width).sum::<f64>() * size / 1000.0
}

/// Width of a line at the fixed label font size.
pub fn line_width(text: &str) -> f64 {
    text_width(text, FONT_SIZE)
}

/// Helvetica advance width of one character in 1/1000 em.
///
/// Accented letters share the advance of their base letter, which matches
/// the AFM composite definitions, so Slovak diacritics measure correctly.
fn char_width(c: char) -> f64 {
    let c = fold_diacritic(c);
    match c {
        ' ' => 278.0,
        '!' => 278.0,
        '"' => 355.0,
        '#' => 556.0,
        '$' => 556.0,
        '%' => 889.0,
        '&' => 667.0,
        '\'' => 191.0,
        '(' | ')' => 333.0,
        '*' => 389.0,
        '+' => 584.0,
        ',' => 278.0,
        '-' => 333.0,
        '.' => 278.0,
        '/' => 278.0,
        '0'..='9' => 556.0,
        ':' | ';' => 278.0,
        '<' | '>' | '=' => 584.0,
        '?' => 556.0,
        '@' => 1015.0,
        'A' => 667.0,
        'B' => 667.0,
        'C' => 722.0,
        'D' => 722.0,
        'E' => 667.0,
        'F' => 611.0,
        'G' => 778.0,
        'H' => 722.0,
        'I' => 278.0,
        'J' => 500.0,
        'K' => 667.0,
        'L' => 556.0,
        'M' => 833.0,
        'N' => 722.0,
        'O' => 778.0,
        'P' => 667.0,
        'Q' => 778.0,
        'R' => 722.0,
        'S' => 667.0,
        'T' => 611.0,
        'U' => 722.0,
        'V' => 667.0,
        'W' => 944.0,
        'X' => 667.0,
        'Y' => 667.0,
        'Z' => 611.0,
        '[' | ']' => 278.0,
        '\\' => 278.0,
        '^' => 469.0,
        '_' => 556.0,
        '`' => 333.0,
        'a' => 556.0,
        'b' => 556.0,
        'c' => 500.0,
        'd' => 556.0,
        'e' => 556.0,
        'f' => 278.0,
        'g' => 556.0,
        'h' => 556.0,
        'i' => 222.0,
        'j' => 222.0,
        'k' => 500.0,
        'l' => 222.0,
        'm' => 833.0,
        'n' => 556.0,
        'o' => 556.0,
        'p' => 556.0,
        'q' => 556.0,
        'r' => 333.0,
        's' => 500.0,
        't' => 278.0,
        'u' => 556.0,
        'v' => 500.0,
        'w' => 722.0,
        'x' => 500.0,
        'y' => 500.0,
        'z' => 500.0,
        '{' | '}' => 334.0,
        '|' => 260.0,
        '~' => 584.0,
        _ => FALLBACK_WIDTH,
    }
}

/// Strip the diacritic from letters used in Slovak (and the rest of the
/// Latin-1/Latin-2 accent range), returning the base letter.
pub fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ă' | 'ą' => 'a',
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' | 'Ă' | 'Ą' => 'A',
        'č' | 'ç' | 'ć' => 'c',
        'Č' | 'Ç' | 'Ć' => 'C',
        'ď' => 'd',
        'Ď' => 'D',
        'é' | 'è' | 'ê' | 'ë' | 'ě' | 'ę' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' | 'Ě' | 'Ę' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ĺ' | 'ľ' | 'ł' => 'l',
        'Ĺ' | 'Ľ' | 'Ł' => 'L',
        'ň' | 'ñ' | 'ń' => 'n',
        'Ň' | 'Ñ' | 'Ń' => 'N',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ő' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' | 'Ő' => 'O',
        'ŕ' | 'ř' => 'r',
        'Ŕ' | 'Ř' => 'R',
        'š' | 'ś' => 's',
        'Š' | 'Ś' => 'S',
        'ť' => 't',
        'Ť' => 'T',
        'ú' | 'ù' | 'û' | 'ü' | 'ů' | 'ű' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' | 'Ů' | 'Ű' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        'ž' | 'ź' | 'ż' => 'z',
        'Ž' | 'Ź' | 'Ż' => 'Z',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_measures_zero() {
        assert_eq!(text_width("", FONT_SIZE), 0.0);
    }

    #[test]
    fn accented_letter_matches_base() {
        assert_eq!(text_width("á", 10.0), text_width("a", 10.0));
        assert_eq!(text_width("Šťastie", 10.0), text_width("Stastie", 10.0));
    }

    #[test]
    fn width_scales_with_size() {
        let w10 = text_width("Hlavná 12", 10.0);
        let w20 = text_width("Hlavná 12", 20.0);
        assert!((w20 - 2.0 * w10).abs() < 1e-9);
    }

    #[test]
    fn realistic_name_is_narrower_than_small_label() {
        // 48.3 mm label is ~136.9 pt wide; a short name is well inside it.
        let w = line_width("Ján Novák");
        assert!(w > 0.0 && w < 48.3 * POINTS_PER_MM);
    }
}
