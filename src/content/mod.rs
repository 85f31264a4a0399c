//! Static site content: navigation, features, gallery, menu, catering,
//! special orders, events and vendor metadata.
//!
//! The bundle ships as `config/site_content.yml` and is compiled in; an
//! override file can be loaded from disk. [`SiteContent::data_response`] builds
//! the read-only payload served to the site, and [`fetch_remote`] reads that
//! payload back from a running endpoint.

pub mod dietary;
mod types;

pub use dietary::DietaryTag;
pub use types::{
    Availability, CateringPackage, ContactInfo, Coordinates, Event, ExpertChief, Feature,
    FooterLink, GalleryImage, HeaderItem, MenuItem, Price, SpecialOrder, VendorMetadata,
};

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::export::MenuPdfData;

/// Bundled `config/site_content.yml`.
const BUNDLED_CONTENT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/config/site_content.yml"
));

/// Everything the site renders that is not a translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    /// Navigation links.
    #[serde(default)]
    pub header: Vec<HeaderItem>,
    /// Feature tiles.
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Kitchen team cards.
    #[serde(default)]
    pub expert_chiefs: Vec<ExpertChief>,
    /// Gallery entries.
    #[serde(default)]
    pub gallery_images: Vec<GalleryImage>,
    /// Every menu row, standard and seasonal alike.
    #[serde(default)]
    pub full_menu: Vec<MenuItem>,
    /// Footer link groups.
    #[serde(default)]
    pub footer_links: Vec<FooterLink>,
    /// Catering packages.
    #[serde(default)]
    pub catering_packages: Vec<CateringPackage>,
    /// Pre-order items.
    #[serde(default)]
    pub special_orders: Vec<SpecialOrder>,
    /// Upcoming appearances.
    #[serde(default)]
    pub events: Vec<Event>,
    /// Vendor metadata.
    pub vendor: VendorMetadata,
}

/// Payload of the read-only data endpoint.
///
/// Key names are fixed by the site templates that consume them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse {
    /// Navigation links.
    #[serde(rename = "HeaderData")]
    pub header: Vec<HeaderItem>,
    /// Feature tiles.
    #[serde(rename = "FeaturesData")]
    pub features: Vec<Feature>,
    /// Kitchen team cards.
    #[serde(rename = "ExpertChiefData")]
    pub expert_chiefs: Vec<ExpertChief>,
    /// Gallery entries.
    #[serde(rename = "GalleryImagesData")]
    pub gallery_images: Vec<GalleryImage>,
    /// Every menu row.
    #[serde(rename = "FullMenuData")]
    pub full_menu: Vec<MenuItem>,
    /// Footer link groups.
    #[serde(rename = "FooterLinkData")]
    pub footer_links: Vec<FooterLink>,
}

impl DataResponse {
    /// What: Serialize the payload as pretty-printed JSON.
    ///
    /// # Errors
    /// - Returns `Err` when serialization fails
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize data response: {e}"))
    }
}

impl SiteContent {
    /// What: Parse a content bundle from YAML.
    ///
    /// # Errors
    /// - Returns `Err` when the YAML is malformed or misses required fields
    pub fn parse(contents: &str) -> Result<Self, String> {
        serde_norway::from_str(contents).map_err(|e| format!("Failed to parse site content: {e}"))
    }

    /// What: Content bundle compiled into the binary.
    ///
    /// # Errors
    /// - Returns `Err` only if the bundled file is broken
    pub fn bundled() -> Result<Self, String> {
        Self::parse(BUNDLED_CONTENT)
    }

    /// What: Read a content bundle from disk.
    ///
    /// Inputs:
    /// - `path`: YAML file (`.json` is accepted as well, JSON being valid YAML)
    ///
    /// # Errors
    /// - Returns `Err` when the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        let content = Self::parse(&contents)?;
        tracing::debug!(
            path = %path.display(),
            menu_items = content.full_menu.len(),
            "Loaded site content"
        );
        Ok(content)
    }

    /// Payload for the data endpoint.
    #[must_use]
    pub fn data_response(&self) -> DataResponse {
        DataResponse {
            header: self.header.clone(),
            features: self.features.clone(),
            expert_chiefs: self.expert_chiefs.clone(),
            gallery_images: self.gallery_images.clone(),
            full_menu: self.full_menu.clone(),
            footer_links: self.footer_links.clone(),
        }
    }

    /// What: Assemble exporter input from the bundle.
    ///
    /// Details:
    /// - Items without availability (or `standard`) go to the main menu; seasonal
    ///   and limited items go to their own section, both keeping bundle order
    #[must_use]
    pub fn menu_pdf_data(&self) -> MenuPdfData {
        let (menu, seasonal): (Vec<MenuItem>, Vec<MenuItem>) =
            self.full_menu.iter().cloned().partition(MenuItem::is_standard);
        MenuPdfData {
            menu,
            seasonal,
            catering: self.catering_packages.clone(),
            special_orders: self.special_orders.clone(),
            events: self.events.clone(),
            vendor_name: self.vendor.vendor_name.clone(),
        }
    }
}

/// What: Fetch the data endpoint payload from a running site.
///
/// Inputs:
/// - `url`: Full endpoint URL (e.g., `https://example.com/api/data`)
///
/// Output:
/// - Decoded [`DataResponse`]
///
/// # Errors
/// - Returns `Err` when the request fails, the status is not successful or the
///   body is not a valid payload
pub async fn fetch_remote(url: &str) -> Result<DataResponse, String> {
    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .user_agent(format!("menuboard/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| format!("Failed to create HTTP client: {e}"))?;
    tracing::debug!("Fetching site data from: {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("HTTP request failed: {e}"))?;
    if !response.status().is_success() {
        return Err(format!(
            "HTTP request failed with status: {}",
            response.status()
        ));
    }
    response
        .json::<DataResponse>()
        .await
        .map_err(|e| format!("Failed to decode data response: {e}"))
}
