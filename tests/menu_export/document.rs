//! Exported document content built from the bundled site content.

use chrono::{NaiveDate, NaiveDateTime};
use menuboard::content::{DietaryTag, SiteContent};
use menuboard::export::layout::{
    CATERING_TITLE, EVENTS_TITLE, LEGEND_TITLE, MAIN_MENU_TITLE, SEASONAL_TITLE,
    SPECIAL_ORDERS_TITLE,
};
use menuboard::export::{MenuPdfData, export_menu, layout_menu, sanitize_text, used_dietary_tags};

/// `%PDF-1.4` line plus the binary marker comment, which is non-ASCII by convention.
const PDF_HEADER_LEN: usize = 15;

fn generated() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 11, 28)
        .and_then(|d| d.and_hms_opt(18, 45, 0))
        .expect("valid timestamp")
}

fn bundled_data() -> MenuPdfData {
    SiteContent::bundled()
        .expect("bundled content parses")
        .menu_pdf_data()
}

#[test]
fn sections_appear_in_fixed_order() {
    let doc = layout_menu(&bundled_data(), generated());
    let texts: Vec<&str> = doc.texts().collect();
    let position = |title: &str| {
        texts
            .iter()
            .position(|t| *t == title)
            .unwrap_or_else(|| panic!("missing section {title}"))
    };
    let order = [
        MAIN_MENU_TITLE,
        SEASONAL_TITLE,
        CATERING_TITLE,
        SPECIAL_ORDERS_TITLE,
        EVENTS_TITLE,
        LEGEND_TITLE,
    ]
    .map(position);
    assert!(order.windows(2).all(|w| w[0] < w[1]), "sections out of order: {order:?}");
    assert_eq!(texts[1], "Generated on 11/28/2024");
    assert!(doc.pages.len() > 1, "the bundled menu spans several pages");
}

#[test]
fn menu_without_extras_has_no_extra_headers() {
    let data = MenuPdfData {
        seasonal: Vec::new(),
        catering: Vec::new(),
        special_orders: Vec::new(),
        events: Vec::new(),
        ..bundled_data()
    };
    let doc = layout_menu(&data, generated());
    for title in [SEASONAL_TITLE, CATERING_TITLE, SPECIAL_ORDERS_TITLE, EVENTS_TITLE] {
        assert!(!doc.texts().any(|t| t == title), "{title} should be omitted");
    }
    assert!(doc.texts().any(|t| t == MAIN_MENU_TITLE));
}

#[test]
fn all_drawn_text_is_printable() {
    let data = bundled_data();
    let doc = layout_menu(&data, generated());
    for text in doc.texts() {
        assert_eq!(sanitize_text(text), text, "unsanitized text: {text}");
    }
}

#[test]
fn exported_bytes_stay_within_ascii() {
    let mut data = bundled_data();
    data.vendor_name = "Pupusería Mi Bendición \u{2014} “Casa”".to_string();
    let exported = export_menu(&data, generated());
    let offending: Vec<(usize, u8)> = exported
        .bytes
        .iter()
        .enumerate()
        .skip(PDF_HEADER_LEN)
        .filter(|(_, b)| **b > 0x7E || (**b < 0x20 && !matches!(**b, b'\n' | b'\r' | b'\t')))
        .map(|(i, b)| (i, *b))
        .collect();
    assert!(offending.is_empty(), "non-ASCII bytes in output: {offending:?}");
    let expected_title: &[u8] = b"(Pupusera Mi Bendicin - \"Casa\" Menu)";
    assert!(
        exported
            .bytes
            .windows(expected_title.len())
            .any(|w| w == expected_title)
    );
}

#[test]
fn legend_lists_each_used_tag_once_in_identifier_order() {
    let data = bundled_data();
    let used = used_dietary_tags(&data);
    let ids: Vec<&str> = used.iter().map(DietaryTag::id).collect();
    let mut expected = ids.clone();
    expected.sort_unstable();
    expected.dedup();
    assert_eq!(ids, expected);

    let doc = layout_menu(&data, generated());
    let entries: Vec<&str> = doc.texts().filter(|t| t.contains(" = ")).collect();
    assert_eq!(entries.len(), used.len());
    for (entry, tag) in entries.iter().zip(&used) {
        assert_eq!(*entry, format!("{} = {}", tag.short_label(), tag.display_name()));
    }
}

#[test]
fn identical_input_gives_identical_bytes() {
    let data = bundled_data();
    let first = export_menu(&data, generated());
    let second = export_menu(&data, generated());
    assert_eq!(first.bytes, second.bytes);
    assert_eq!(first.file_name, "pupuseria-mi-bendici-n-menu.pdf");

    let later = generated() + chrono::TimeDelta::days(1);
    assert_ne!(export_menu(&data, later).bytes, first.bytes);
}
