//! Command-line menu export.

use std::path::Path;

use menuboard::export::ExportSession;

use crate::args::utils::load_content;

/// What: Export the PDF menu from the content bundle.
///
/// Inputs:
/// - `content`: Optional content override file
/// - `out_dir`: Directory the PDF is written to
///
/// # Errors
/// - Returns `Err` when the content cannot be loaded or the file cannot be written
///
/// Details:
/// - Uses the local time as generation timestamp
pub async fn handle_export(content: Option<&Path>, out_dir: &Path) -> Result<(), String> {
    let content = load_content(content)?;
    let data = content.menu_pdf_data();
    let generated = chrono::Local::now().naive_local();
    tracing::info!(
        vendor = %data.vendor_name,
        menu = data.menu.len(),
        seasonal = data.seasonal.len(),
        "Menu export requested from CLI"
    );
    let path = ExportSession::new().export(&data, generated, out_dir).await?;
    println!("{}", path.display());
    Ok(())
}
