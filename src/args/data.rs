//! Command-line data endpoint payload.

use std::path::Path;

use crate::args::utils::load_content;

/// What: Print the data endpoint payload as JSON.
///
/// Inputs:
/// - `content`: Optional content override file
/// - `url`: When set, the payload is fetched from this endpoint instead
///
/// # Errors
/// - Returns `Err` when loading, fetching or serializing fails
pub async fn handle_data(content: Option<&Path>, url: Option<&str>) -> Result<(), String> {
    let response = match url {
        Some(url) => menuboard::content::fetch_remote(url).await?,
        None => load_content(content)?.data_response(),
    };
    println!("{}", response.to_json()?);
    Ok(())
}
