//! Base-14 Helvetica glyph widths and text measurement.

/// Advance widths (1/1000 em) for `Helvetica`, codes 32..=126.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Advance widths (1/1000 em) for `Helvetica-Bold`, codes 32..=126.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

/// Width used for characters outside the tables.
const FALLBACK_WIDTH: u16 = 556;

/// Font face used by the exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// `Helvetica`
    Regular,
    /// `Helvetica-Bold`
    Bold,
    /// `Helvetica-Oblique` (same metrics as regular)
    Oblique,
}

impl Font {
    /// Every face, in resource order.
    pub const ALL: [Self; 3] = [Self::Regular, Self::Bold, Self::Oblique];

    /// PostScript base font name.
    #[must_use]
    pub const fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
            Self::Oblique => "Helvetica-Oblique",
        }
    }

    /// Resource name used inside content streams (`F1`..`F3`).
    #[must_use]
    pub const fn resource(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Oblique => "F3",
        }
    }

    fn glyph_width(self, ch: char) -> u16 {
        let table = match self {
            Self::Regular | Self::Oblique => &HELVETICA,
            Self::Bold => &HELVETICA_BOLD,
        };
        u32::from(ch)
            .checked_sub(32)
            .and_then(|i| table.get(usize::try_from(i).ok()?))
            .copied()
            .unwrap_or(FALLBACK_WIDTH)
    }

    /// What: Width of `text` in points at `size`.
    ///
    /// Details:
    /// - No kerning; characters outside printable ASCII use an average width
    #[must_use]
    pub fn text_width(self, text: &str, size: f64) -> f64 {
        let units: u32 = text.chars().map(|c| u32::from(self.glyph_width(c))).sum();
        f64::from(units) * size / 1000.0
    }
}

/// What: Break text into lines no wider than `max_width`.
///
/// Inputs:
/// - `text`: Text to wrap; `\n` forces a break
/// - `font`, `size`: Face and size used for measuring
/// - `max_width`: Available width in points
///
/// Output:
/// - At least one line (an empty string for empty input)
///
/// Details:
/// - Breaks on spaces; a single word wider than the limit is split between
///   characters
#[must_use]
pub fn wrap_text(text: &str, font: Font, size: f64, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if font.text_width(&candidate, size) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if font.text_width(word, size) <= max_width {
                current = word.to_string();
            } else {
                for ch in word.chars() {
                    current.push(ch);
                    if font.text_width(&current, size) > max_width && current.chars().count() > 1 {
                        current.pop();
                        lines.push(std::mem::take(&mut current));
                        current.push(ch);
                    }
                }
            }
        }
        lines.push(current.trim_end_matches('\r').to_string());
    }
    lines
}
