//! Minimal PDF 1.4 document model and writer.
//!
//! Pages hold a flat list of drawing operations in top-down coordinates (the
//! origin is the top-left corner, `y` grows downwards). The writer flips them
//! into PDF user space and emits uncompressed content streams with the three
//! Helvetica faces, so identical documents always serialize to identical bytes.

use std::fmt::Write as _;

use chrono::NaiveDateTime;

use crate::export::metrics::Font;

/// US Letter width in points.
pub const PAGE_WIDTH: f64 = 612.0;
/// US Letter height in points.
pub const PAGE_HEIGHT: f64 = 792.0;

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// What: Parse `#rrggbb`.
    ///
    /// Output:
    /// - `None` for anything that is not six hex digits after `#`
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }

    fn components(self) -> String {
        format!(
            "{} {} {}",
            fmt_num(f64::from(self.0) / 255.0),
            fmt_num(f64::from(self.1) / 255.0),
            fmt_num(f64::from(self.2) / 255.0)
        )
    }
}

/// Single drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text run with its baseline at `(x, y)`.
    Text {
        /// Left edge.
        x: f64,
        /// Baseline.
        y: f64,
        /// Face.
        font: Font,
        /// Size in points.
        size: f64,
        /// Fill colour.
        color: Rgb,
        /// Content; characters outside Latin-1 are written as `?`.
        text: String,
    },
    /// Filled rectangle with its top-left corner at `(x, y)`.
    FillRect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Fill colour.
        color: Rgb,
    },
    /// Stroked line segment.
    Line {
        /// Start x.
        x1: f64,
        /// Start y.
        y1: f64,
        /// End x.
        x2: f64,
        /// End y.
        y2: f64,
        /// Stroke width.
        width: f64,
        /// Stroke colour.
        color: Rgb,
    },
}

/// One page of drawing operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Operations in paint order.
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text runs on the page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Laid-out document ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Document title (Info dictionary).
    pub title: String,
    /// Creation timestamp (Info dictionary).
    pub created: NaiveDateTime,
    /// Pages in order; never empty once laid out.
    pub pages: Vec<Page>,
}

impl Document {
    /// Every text run in the document, page by page.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(Page::texts)
    }

    /// What: Serialize to PDF bytes.
    ///
    /// Output:
    /// - Complete PDF 1.4 file
    ///
    /// Details:
    /// - Object layout: catalog, page tree, three fonts, info, then a page
    ///   object and a content stream per page
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ObjectWriter::new();
        let page_count = self.pages.len().max(1);
        let first_page_id = 7;
        let kids: Vec<String> = (0..page_count)
            .map(|i| format!("{} 0 R", first_page_id + i * 2))
            .collect();

        writer.object(1, b"<< /Type /Catalog /Pages 2 0 R >>");
        writer.object(
            2,
            format!(
                "<< /Type /Pages /Kids [{}] /Count {page_count} >>",
                kids.join(" ")
            )
            .as_bytes(),
        );
        for (offset, font) in Font::ALL.iter().enumerate() {
            writer.object(
                3 + offset,
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    font.base_font()
                )
                .as_bytes(),
            );
        }
        let mut info = b"<< /Title ".to_vec();
        info.extend(pdf_string(&self.title));
        info.extend(b" /Producer ");
        info.extend(pdf_string(concat!("menuboard ", env!("CARGO_PKG_VERSION"))));
        info.extend(
            format!(
                " /CreationDate (D:{}) >>",
                self.created.format("%Y%m%d%H%M%S")
            )
            .as_bytes(),
        );
        writer.object(6, &info);

        let empty = Page::default();
        for i in 0..page_count {
            let page = self.pages.get(i).unwrap_or(&empty);
            let page_id = first_page_id + i * 2;
            let content = content_stream(page);
            writer.object(
                page_id,
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources << /Font << /F1 3 0 R /F2 4 0 R /F3 5 0 R >> >> /Contents {} 0 R >>",
                    fmt_num(PAGE_WIDTH),
                    fmt_num(PAGE_HEIGHT),
                    page_id + 1
                )
                .as_bytes(),
            );
            let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
            stream.extend(&content);
            stream.extend(b"\nendstream");
            writer.object(page_id + 1, &stream);
        }
        writer.finish(6)
    }
}

/// Accumulates numbered objects and their byte offsets.
struct ObjectWriter {
    out: Vec<u8>,
    offsets: Vec<(usize, usize)>,
}

impl ObjectWriter {
    fn new() -> Self {
        Self {
            out: b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec(),
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, id: usize, body: &[u8]) {
        self.offsets.push((id, self.out.len()));
        self.out.extend(format!("{id} 0 obj\n").as_bytes());
        self.out.extend(body);
        self.out.extend(b"\nendobj\n");
    }

    fn finish(mut self, info_id: usize) -> Vec<u8> {
        self.offsets.sort_unstable();
        let size = self.offsets.last().map_or(0, |(id, _)| *id) + 1;
        let xref_at = self.out.len();
        let mut xref = format!("xref\n0 {size}\n0000000000 65535 f \n");
        let mut next = 1;
        for (id, offset) in &self.offsets {
            while next < *id {
                xref.push_str("0000000000 65535 f \n");
                next += 1;
            }
            let _ = writeln!(xref, "{offset:010} 00000 n ");
            next += 1;
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {size} /Root 1 0 R /Info {info_id} 0 R >>\nstartxref\n{xref_at}\n%%EOF\n"
        );
        self.out.extend(xref.as_bytes());
        self.out
    }
}

/// Render one page's operations as content stream bytes.
fn content_stream(page: &Page) -> Vec<u8> {
    let mut out = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                font,
                size,
                color,
                text,
            } => {
                out.extend(
                    format!(
                        "BT /{} {} Tf {} rg {} {} Td ",
                        font.resource(),
                        fmt_num(*size),
                        color.components(),
                        fmt_num(*x),
                        fmt_num(PAGE_HEIGHT - y)
                    )
                    .as_bytes(),
                );
                out.extend(pdf_string(text));
                out.extend(b" Tj ET\n");
            }
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                out.extend(
                    format!(
                        "{} rg {} {} {} {} re f\n",
                        color.components(),
                        fmt_num(*x),
                        fmt_num(PAGE_HEIGHT - y - height),
                        fmt_num(*width),
                        fmt_num(*height)
                    )
                    .as_bytes(),
                );
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                out.extend(
                    format!(
                        "{} w {} RG {} {} m {} {} l S\n",
                        fmt_num(*width),
                        color.components(),
                        fmt_num(*x1),
                        fmt_num(PAGE_HEIGHT - y1),
                        fmt_num(*x2),
                        fmt_num(PAGE_HEIGHT - y2)
                    )
                    .as_bytes(),
                );
            }
        }
    }
    out
}

/// What: Encode a PDF literal string.
///
/// Details:
/// - Backslash and parentheses are escaped, control characters become octal
///   escapes, Latin-1 characters map to their WinAnsi byte and anything else is
///   written as `?`
fn pdf_string(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 2);
    out.push(b'(');
    for ch in text.chars() {
        match ch {
            '\\' | '(' | ')' => {
                out.push(b'\\');
                out.push(u8::try_from(ch).unwrap_or(b'?'));
            }
            ' '..='~' | '\u{A0}'..='\u{FF}' | '\0'..='\u{1F}' => {
                let byte = u8::try_from(ch).unwrap_or(b'?');
                if byte < 0x20 {
                    out.extend(format!("\\{byte:03o}").as_bytes());
                } else {
                    out.push(byte);
                }
            }
            _ => out.push(b'?'),
        }
    }
    out.push(b')');
    out
}

/// Format a coordinate with at most two decimals and no trailing zeros.
fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let mut text = format!("{rounded:.2}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let created = chrono::NaiveDate::from_ymd_opt(2024, 12, 1)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .expect("valid timestamp");
        Document {
            title: "Tacos (Menu)".to_string(),
            created,
            pages: vec![Page {
                ops: vec![
                    DrawOp::Text {
                        x: 48.0,
                        y: 64.0,
                        font: Font::Bold,
                        size: 24.0,
                        color: Rgb(0, 0, 0),
                        text: "Tacos (Menu)".to_string(),
                    },
                    DrawOp::FillRect {
                        x: 48.0,
                        y: 100.0,
                        width: 516.0,
                        height: 30.5,
                        color: Rgb(224, 193, 118),
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(612.0), "612");
        assert_eq!(fmt_num(0.4), "0.4");
        assert_eq!(fmt_num(12.3456), "12.35");
        assert_eq!(fmt_num(-0.001), "0");
    }

    #[test]
    fn test_pdf_string_escapes() {
        assert_eq!(pdf_string(r"a(b)\c"), br"(a\(b\)\\c)".to_vec());
        assert_eq!(pdf_string("\u{d3}\u{1F32E}"), vec![b'(', 0xD3, b'?', b')']);
        assert_eq!(pdf_string("a\tb"), b"(a\\011b)".to_vec());
    }

    #[test]
    fn test_rgb_from_hex() {
        assert_eq!(Rgb::from_hex("#2f2a1f"), Some(Rgb(0x2f, 0x2a, 0x1f)));
        assert_eq!(Rgb::from_hex("2f2a1f"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_document_structure() {
        let bytes = sample().to_bytes();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-1.4\n"));
        assert!(text.ends_with("%%EOF\n"));
        assert!(text.contains("/MediaBox [0 0 612 792]"));
        assert!(text.contains("/BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding"));
        assert!(text.contains("/CreationDate (D:20241201093000)"));
        assert!(text.contains("BT /F2 24 Tf 0 0 0 rg 48 728 Td (Tacos \\(Menu\\)) Tj ET"));
        // rectangle bottom edge: 792 - 100 - 30.5
        assert!(text.contains("48 661.5 516 30.5 re f"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let bytes = sample().to_bytes();
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let xref_at: usize = text
            .rsplit("startxref\n")
            .next()
            .and_then(|tail| tail.lines().next())
            .and_then(|n| n.parse().ok())
            .expect("startxref offset");
        assert!(bytes[xref_at..].starts_with(b"xref\n"));
        let table = std::str::from_utf8(&bytes[xref_at..]).expect("xref section is ASCII");
        let entries: Vec<&str> = table.lines().skip(3).take(8).collect();
        for (i, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().expect("numeric offset");
            let header = format!("{} 0 obj", i + 1);
            assert!(bytes[offset..].starts_with(header.as_bytes()), "object {}", i + 1);
        }
    }

    #[test]
    fn test_serialization_is_deterministic() {
        assert_eq!(sample().to_bytes(), sample().to_bytes());
    }
}
