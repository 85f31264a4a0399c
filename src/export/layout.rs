//! Page layout for the exported menu.
//!
//! Turns [`MenuPdfData`] into a [`Document`]: header, menu tables, free-form
//! catering/special-order/event blocks and the dietary legend, breaking pages
//! as the cursor runs down the sheet.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};

use crate::content::{CateringPackage, DietaryTag, Event, MenuItem, SpecialOrder};
use crate::export::MenuPdfData;
use crate::export::metrics::{Font, wrap_text};
use crate::export::pdf::{Document, DrawOp, PAGE_HEIGHT, PAGE_WIDTH, Page, Rgb};
use crate::export::sanitize::sanitize_text;

/// Left and right page margin.
pub const MARGIN_X: f64 = 48.0;
/// Cursor position at the top of a fresh page.
pub const TOP_Y: f64 = 64.0;
/// A table section starts a new page past `PAGE_HEIGHT - TABLE_BREAK`.
pub const TABLE_BREAK: f64 = 100.0;
/// Free-form sections and the legend start a new page past `PAGE_HEIGHT - BLOCK_BREAK`.
pub const BLOCK_BREAK: f64 = 150.0;
/// Space kept free at the bottom of every page.
const BOTTOM_MARGIN: f64 = 40.0;
/// Where a table continues after a page break.
const TABLE_CONTINUE_Y: f64 = 40.0;

/// Table column widths; the last one takes the remaining width.
const FIXED_COLUMNS: [f64; 3] = [140.0, 110.0, 60.0];
const CELL_PADDING: f64 = 8.0;
const TABLE_FONT_SIZE: f64 = 11.0;
const LINE_HEIGHT_FACTOR: f64 = 1.15;
const GRID_WIDTH: f64 = 0.4;
const TABLE_HEAD: [&str; 4] = ["Name", "Style", "Price", "Description"];

const LEGEND_SIZE: f64 = 10.0;
const LEGEND_LINE_HEIGHT: f64 = 14.0;
const LEGEND_SEPARATOR: &str = " | ";

const BLACK: Rgb = Rgb(0, 0, 0);
const TABLE_TEXT: Rgb = Rgb(0x2f, 0x2a, 0x1f);
const HEAD_FILL: Rgb = Rgb(224, 193, 118);
const GRID_LINE: Rgb = Rgb(0xf1, 0xe3, 0xb2);

/// Section headings, in render order.
pub const MAIN_MENU_TITLE: &str = "Main Menu";
/// Heading for seasonal and limited items.
pub const SEASONAL_TITLE: &str = "Seasonal & Limited Items";
/// Heading for catering packages.
pub const CATERING_TITLE: &str = "Catering Packages";
/// Heading for special orders.
pub const SPECIAL_ORDERS_TITLE: &str = "Special Orders & Preorders";
/// Heading for events.
pub const EVENTS_TITLE: &str = "Upcoming Events";
/// Heading for the dietary legend.
pub const LEGEND_TITLE: &str = "Dietary Information";

/// What: Lay out the menu document.
///
/// Inputs:
/// - `data`: Menu content
/// - `generated`: Timestamp printed under the title and stored as creation date
///
/// Output:
/// - Document with at least one page
///
/// Details:
/// - Sections with no entries are skipped, heading included
/// - Output depends only on the inputs
#[must_use]
pub fn layout_menu(data: &MenuPdfData, generated: NaiveDateTime) -> Document {
    let title = sanitize_text(&format!("{} Menu", data.vendor_name));
    let mut composer = Composer::new();

    composer.text(MARGIN_X, composer.cursor, Font::Bold, 24.0, BLACK, &title);
    composer.cursor += 24.0;
    let date_line = format!("Generated on {}", generated.format("%-m/%-d/%Y"));
    composer.text(MARGIN_X, composer.cursor, Font::Regular, 11.0, BLACK, &date_line);
    composer.cursor += 32.0;

    composer.menu_table(MAIN_MENU_TITLE, &data.menu);
    composer.menu_table(SEASONAL_TITLE, &data.seasonal);

    if !data.catering.is_empty() {
        composer.block_section(CATERING_TITLE);
        for package in &data.catering {
            composer.catering_block(package);
        }
    }
    if !data.special_orders.is_empty() {
        composer.block_section(SPECIAL_ORDERS_TITLE);
        for order in &data.special_orders {
            composer.special_order_block(order);
        }
    }
    if !data.events.is_empty() {
        composer.block_section(EVENTS_TITLE);
        for event in &data.events {
            composer.event_block(event);
        }
    }

    let used = used_dietary_tags(data);
    if !used.is_empty() {
        composer.legend(&used);
    }

    Document {
        title,
        created: generated,
        pages: composer.pages,
    }
}

/// What: Collect the distinct dietary tags used by menu, seasonal, catering and
/// special order entries.
///
/// Output:
/// - Tags sorted by identifier, each once
#[must_use]
pub fn used_dietary_tags(data: &MenuPdfData) -> Vec<DietaryTag> {
    let mut used = BTreeSet::new();
    let menu_tags = data.menu.iter().chain(&data.seasonal).flat_map(|i| &i.dietary);
    let catering_tags = data.catering.iter().flat_map(|p| &p.dietary);
    let order_tags = data.special_orders.iter().flat_map(|o| &o.dietary);
    for tag in menu_tags.chain(catering_tags).chain(order_tags) {
        used.insert(tag.clone());
    }
    used.into_iter().collect()
}

/// Name followed by the bracketed dietary abbreviations, sanitized.
fn name_with_tags(name: &str, tags: &[DietaryTag]) -> String {
    let labels = DietaryTag::format_labels(tags);
    if labels.is_empty() {
        sanitize_text(name)
    } else {
        sanitize_text(&format!("{name} {labels}"))
    }
}

/// Format a `YYYY-MM-DD` date with `pattern`; unparseable input is shown as-is.
fn format_date(raw: &str, pattern: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_or_else(
        |_| {
            tracing::debug!(date = raw, "Unparseable date in menu data, printing verbatim");
            sanitize_text(raw)
        },
        |date| date.format(pattern).to_string(),
    )
}

/// Table column widths including the auto column.
fn column_widths() -> [f64; 4] {
    let fixed: f64 = FIXED_COLUMNS.iter().sum();
    [
        FIXED_COLUMNS[0],
        FIXED_COLUMNS[1],
        FIXED_COLUMNS[2],
        PAGE_WIDTH - 2.0 * MARGIN_X - fixed,
    ]
}

/// Row of wrapped cell lines.
struct TableRow {
    cells: [Vec<String>; 4],
    height: f64,
}

impl TableRow {
    fn new(values: [String; 4], font: Font) -> Self {
        let widths = column_widths();
        let cells: [Vec<String>; 4] = std::array::from_fn(|i| {
            wrap_text(
                &values[i],
                font,
                TABLE_FONT_SIZE,
                widths[i] - 2.0 * CELL_PADDING,
            )
        });
        Self::from_cells(cells)
    }

    fn from_cells(cells: [Vec<String>; 4]) -> Self {
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let height = line_count_height(lines) + 2.0 * CELL_PADDING;
        Self { cells, height }
    }

    /// What: Cut the row so the first part fits in `max_height`.
    ///
    /// Output:
    /// - `(Some(first), rest)` with each cell split at the same line index, or
    ///   `(None, self)` when not even one line fits
    fn split(self, max_height: f64) -> (Option<Self>, Self) {
        let fit = lines_fitting(max_height);
        if fit == 0 {
            return (None, self);
        }
        let mut first = self.cells;
        let rest: [Vec<String>; 4] = std::array::from_fn(|i| {
            let cut = fit.min(first[i].len());
            first[i].split_off(cut)
        });
        (Some(Self::from_cells(first)), Self::from_cells(rest))
    }
}

/// Number of wrapped lines a row of at most `max_height` can hold.
fn lines_fitting(max_height: f64) -> usize {
    let mut lines = 0;
    while line_count_height(lines + 1) + 2.0 * CELL_PADDING <= max_height {
        lines += 1;
    }
    lines
}

fn line_count_height(lines: usize) -> f64 {
    let lines = u32::try_from(lines).unwrap_or(u32::MAX);
    f64::from(lines) * TABLE_FONT_SIZE * LINE_HEIGHT_FACTOR
}

/// Page list plus the vertical cursor.
struct Composer {
    pages: Vec<Page>,
    cursor: f64,
}

impl Composer {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            cursor: TOP_Y,
        }
    }

    fn new_page(&mut self, cursor: f64) {
        self.pages.push(Page::default());
        self.cursor = cursor;
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn text(&mut self, x: f64, y: f64, font: Font, size: f64, color: Rgb, text: &str) {
        self.push(DrawOp::Text {
            x,
            y,
            font,
            size,
            color,
            text: text.to_string(),
        });
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            width: GRID_WIDTH,
            color: GRID_LINE,
        });
    }

    /// Bold 16 section heading; the cursor advances by 20.
    fn heading(&mut self, title: &str) {
        self.text(MARGIN_X, self.cursor, Font::Bold, 16.0, BLACK, title);
        self.cursor += 20.0;
    }

    fn menu_table(&mut self, title: &str, items: &[MenuItem]) {
        if items.is_empty() {
            return;
        }
        if self.cursor > PAGE_HEIGHT - TABLE_BREAK {
            self.new_page(TOP_Y);
        }
        self.heading(title);

        let head = TableRow::new(TABLE_HEAD.map(str::to_string), Font::Bold);
        self.table_row(&head, true);
        for item in items {
            let row = TableRow::new(
                [
                    name_with_tags(&item.name, &item.dietary),
                    sanitize_text(&item.style),
                    sanitize_text(&item.price),
                    sanitize_text(&item.description),
                ],
                Font::Regular,
            );
            self.body_row(row, &head);
        }
        self.cursor += 20.0;
    }

    /// What: Draw a body row, breaking pages as needed.
    ///
    /// Details:
    /// - A row that fits on a fresh page moves there whole
    /// - A row taller than a fresh page fills the current page and continues
    ///   on the next ones, the head repeated each time
    fn body_row(&mut self, mut row: TableRow, head: &TableRow) {
        let fresh_capacity = PAGE_HEIGHT - BOTTOM_MARGIN - TABLE_CONTINUE_Y - head.height;
        loop {
            let available = PAGE_HEIGHT - BOTTOM_MARGIN - self.cursor;
            if row.height <= available {
                self.table_row(&row, false);
                return;
            }
            if row.height > fresh_capacity {
                let (part, rest) = row.split(available);
                if let Some(part) = part {
                    self.table_row(&part, false);
                }
                row = rest;
            }
            self.new_page(TABLE_CONTINUE_Y);
            self.table_row(head, true);
        }
    }

    fn table_row(&mut self, row: &TableRow, is_head: bool) {
        let widths = column_widths();
        let top = self.cursor;
        let bottom = top + row.height;
        let right = PAGE_WIDTH - MARGIN_X;
        if is_head {
            self.push(DrawOp::FillRect {
                x: MARGIN_X,
                y: top,
                width: right - MARGIN_X,
                height: row.height,
                color: HEAD_FILL,
            });
        }
        let font = if is_head { Font::Bold } else { Font::Regular };
        let line_height = TABLE_FONT_SIZE * LINE_HEIGHT_FACTOR;

        let mut x = MARGIN_X;
        for (col, lines) in row.cells.iter().enumerate() {
            let width = widths[col];
            let block = line_count_height(lines.len());
            let text_top = top + (row.height - block) / 2.0;
            for (i, line) in lines.iter().enumerate() {
                let offset = u32::try_from(i).map_or(0.0, f64::from);
                let baseline = text_top + offset * line_height + TABLE_FONT_SIZE * 0.85;
                let text_x = if col == 2 {
                    x + width - CELL_PADDING - font.text_width(line, TABLE_FONT_SIZE)
                } else {
                    x + CELL_PADDING
                };
                if !line.is_empty() {
                    self.text(text_x, baseline, font, TABLE_FONT_SIZE, TABLE_TEXT, line);
                }
            }
            self.line(x, top, x, bottom);
            x += width;
        }
        self.line(right, top, right, bottom);
        self.line(MARGIN_X, top, right, top);
        self.line(MARGIN_X, bottom, right, bottom);
        self.cursor = bottom;
    }

    fn block_section(&mut self, title: &str) {
        if self.cursor > PAGE_HEIGHT - BLOCK_BREAK {
            self.new_page(TOP_Y);
        }
        self.heading(title);
    }

    /// Draw wrapped text at the cursor, then advance by `advance`.
    fn paragraph(&mut self, text: &str, font: Font, size: f64, advance: f64) {
        let lines = wrap_text(text, font, size, PAGE_WIDTH - 2.0 * MARGIN_X);
        let count = lines.len();
        for (i, line) in lines.iter().enumerate() {
            if self.cursor > PAGE_HEIGHT - BOTTOM_MARGIN {
                self.new_page(TOP_Y);
            }
            self.text(MARGIN_X, self.cursor, font, size, BLACK, line);
            self.cursor += if i + 1 == count {
                advance
            } else {
                size * LINE_HEIGHT_FACTOR
            };
        }
    }

    fn catering_block(&mut self, package: &CateringPackage) {
        self.paragraph(&name_with_tags(&package.name, &package.dietary), Font::Bold, 12.0, 14.0);
        let price = sanitize_text(&package.price.to_string());
        self.paragraph(
            &format!("Serves: {} | Price: {price}", package.serves_count),
            Font::Regular,
            10.0,
            12.0,
        );
        self.paragraph(
            &format!("Lead time: {} days", package.lead_time_days),
            Font::Regular,
            10.0,
            12.0,
        );
        self.paragraph(&sanitize_text(&package.description), Font::Regular, 10.0, 14.0);
        if let Some(notes) = package.notes.as_deref().filter(|n| !n.is_empty()) {
            self.paragraph(&format!("Note: {}", sanitize_text(notes)), Font::Oblique, 9.0, 12.0);
        }
        self.cursor += 8.0;
    }

    fn special_order_block(&mut self, order: &SpecialOrder) {
        self.paragraph(&name_with_tags(&order.name, &order.dietary), Font::Bold, 12.0, 14.0);
        let cutoff = format_date(&order.cutoff_date, "%b %-d, %Y");
        let price = sanitize_text(&order.price.to_string());
        self.paragraph(
            &format!("Order by: {cutoff} | Price: {price}"),
            Font::Regular,
            10.0,
            12.0,
        );
        self.paragraph(&sanitize_text(&order.description), Font::Regular, 10.0, 14.0);
        if let Some(notes) = order.customization_notes.as_deref().filter(|n| !n.is_empty()) {
            self.paragraph(&format!("Note: {}", sanitize_text(notes)), Font::Oblique, 9.0, 12.0);
        }
        self.cursor += 8.0;
    }

    fn event_block(&mut self, event: &Event) {
        self.paragraph(&sanitize_text(&event.name), Font::Bold, 12.0, 14.0);
        let date = format_date(&event.date, "%a, %b %-d, %Y");
        self.paragraph(&format!("Date: {date}"), Font::Regular, 10.0, 12.0);
        self.paragraph(
            &format!("Location: {}", sanitize_text(&event.location)),
            Font::Regular,
            10.0,
            12.0,
        );
        if let Some(description) = event.description.as_deref().filter(|d| !d.is_empty()) {
            self.paragraph(&sanitize_text(description), Font::Regular, 10.0, 12.0);
        }
        if !event.menu_items.is_empty() {
            let featured: Vec<String> = event.menu_items.iter().map(|m| sanitize_text(m)).collect();
            self.paragraph(
                &format!("Featured: {}", featured.join(", ")),
                Font::Regular,
                10.0,
                12.0,
            );
        }
        self.cursor += 8.0;
    }

    /// Legend entries run left to right separated by ` | `, wrapping with a
    /// running line width.
    fn legend(&mut self, tags: &[DietaryTag]) {
        if self.cursor > PAGE_HEIGHT - BLOCK_BREAK {
            self.new_page(TOP_Y);
        }
        let legend_y = self.cursor + 20.0;
        self.text(MARGIN_X, legend_y, Font::Bold, 12.0, BLACK, LEGEND_TITLE);

        let max_width = PAGE_WIDTH - 2.0 * MARGIN_X;
        let mut x = MARGIN_X;
        let mut y = legend_y + 16.0;
        let mut line_width = 0.0;
        for tag in tags {
            let entry = format!(
                "{} = {}",
                sanitize_text(&tag.short_label()),
                sanitize_text(tag.display_name())
            );
            let width = Font::Regular.text_width(&entry, LEGEND_SIZE);
            if line_width > 0.0 && line_width + width + 20.0 > max_width {
                y += LEGEND_LINE_HEIGHT;
                x = MARGIN_X;
                line_width = 0.0;
            }
            if line_width > 0.0 {
                self.text(x, y, Font::Regular, LEGEND_SIZE, BLACK, LEGEND_SEPARATOR);
                x += Font::Regular.text_width(LEGEND_SEPARATOR, LEGEND_SIZE);
            }
            self.text(x, y, Font::Regular, LEGEND_SIZE, BLACK, &entry);
            x += width;
            line_width = x - MARGIN_X;
        }
        self.cursor = y + LEGEND_LINE_HEIGHT;
    }
}
