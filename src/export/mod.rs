//! Printable menu export.
//!
//! [`export_menu`] is a pure function from [`MenuPdfData`] plus a generation
//! timestamp to PDF bytes and a file name. [`ExportSession`] wraps it for
//! interactive callers: it publishes an "exporting" flag that is lowered when
//! the export ends, however it ends.

pub mod layout;
pub mod metrics;
pub mod pdf;
mod sanitize;

pub use layout::{layout_menu, used_dietary_tags};
pub use sanitize::sanitize_text;

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::content::{CateringPackage, Event, MenuItem, SpecialOrder};

/// Pause before rendering so observers can show the busy state.
pub const PREPARATION_DELAY: Duration = Duration::from_millis(100);

/// Everything printed in the exported menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuPdfData {
    /// Standard menu rows.
    pub menu: Vec<MenuItem>,
    /// Seasonal and limited rows.
    #[serde(default)]
    pub seasonal: Vec<MenuItem>,
    /// Catering packages.
    #[serde(default)]
    pub catering: Vec<CateringPackage>,
    /// Pre-order items.
    #[serde(default)]
    pub special_orders: Vec<SpecialOrder>,
    /// Upcoming events.
    #[serde(default)]
    pub events: Vec<Event>,
    /// Vendor name used in the title and file name.
    pub vendor_name: String,
}

/// Rendered document and its suggested file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedMenu {
    /// `<vendor-slug>-menu.pdf`
    pub file_name: String,
    /// PDF bytes.
    pub bytes: Vec<u8>,
}

/// What: Render the menu document.
///
/// Inputs:
/// - `data`: Menu content
/// - `generated`: Generation timestamp (printed and stored in the metadata)
///
/// Output:
/// - File name and PDF bytes; identical inputs give identical bytes
#[must_use]
pub fn export_menu(data: &MenuPdfData, generated: NaiveDateTime) -> ExportedMenu {
    let document = layout_menu(data, generated);
    let bytes = document.to_bytes();
    tracing::debug!(
        vendor = %data.vendor_name,
        pages = document.pages.len(),
        bytes = bytes.len(),
        "Rendered menu document"
    );
    ExportedMenu {
        file_name: file_name_for(&data.vendor_name),
        bytes,
    }
}

/// What: Derive the download file name from the vendor name.
///
/// Details:
/// - Lowercase, runs of characters outside `[a-z0-9]` collapse to one `-`,
///   leading and trailing hyphens are dropped, then `-menu.pdf` is appended
/// - An empty slug yields `menu.pdf`
#[must_use]
pub fn file_name_for(vendor_name: &str) -> String {
    let mut slug = String::with_capacity(vendor_name.len());
    for ch in vendor_name.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "menu.pdf".to_string()
    } else {
        format!("{slug}-menu.pdf")
    }
}

/// Lowers the exporting flag when dropped.
struct ExportingGuard<'a> {
    state: &'a watch::Sender<bool>,
}

impl Drop for ExportingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_replace(false);
    }
}

/// Interactive export wrapper with an observable busy flag.
#[derive(Debug)]
pub struct ExportSession {
    state: watch::Sender<bool>,
    delay: Duration,
}

impl Default for ExportSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportSession {
    /// Session with the default preparation delay.
    #[must_use]
    pub fn new() -> Self {
        Self::with_delay(PREPARATION_DELAY)
    }

    /// Session with a custom preparation delay.
    #[must_use]
    pub fn with_delay(delay: Duration) -> Self {
        let (state, _) = watch::channel(false);
        Self { state, delay }
    }

    /// Whether an export is in progress.
    #[must_use]
    pub fn is_exporting(&self) -> bool {
        *self.state.borrow()
    }

    /// Receiver that observes the exporting flag.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state.subscribe()
    }

    /// What: Render the menu and write it into `out_dir`.
    ///
    /// Inputs:
    /// - `data`: Menu content
    /// - `generated`: Generation timestamp
    /// - `out_dir`: Target directory (created when missing)
    ///
    /// Output:
    /// - Path of the written file
    ///
    /// # Errors
    /// - Returns `Err` when another export is already running
    /// - Returns `Err` when the directory or file cannot be written
    ///
    /// Details:
    /// - The flag is raised before the preparation delay and lowered on every
    ///   exit path, including cancellation of the returned future
    pub async fn export(
        &self,
        data: &MenuPdfData,
        generated: NaiveDateTime,
        out_dir: &Path,
    ) -> Result<PathBuf, String> {
        let raised = self.state.send_if_modified(|exporting| {
            if *exporting {
                false
            } else {
                *exporting = true;
                true
            }
        });
        if !raised {
            return Err("An export is already in progress".to_string());
        }
        let _guard = ExportingGuard { state: &self.state };

        tokio::time::sleep(self.delay).await;
        let exported = export_menu(data, generated);
        let path = out_dir.join(&exported.file_name);
        tokio::fs::create_dir_all(out_dir)
            .await
            .map_err(|e| format!("Failed to create {}: {e}", out_dir.display()))?;
        tokio::fs::write(&path, &exported.bytes).await.map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to write menu PDF");
            format!("Failed to write {}: {e}", path.display())
        })?;
        tracing::info!(path = %path.display(), bytes = exported.bytes.len(), "Menu exported");
        Ok(path)
    }
}
