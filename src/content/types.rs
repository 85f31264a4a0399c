//! Static content records.
//!
//! Field names serialize in camelCase so the data endpoint payload matches what
//! the site templates read.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::content::dietary::DietaryTag;

/// Navigation link; `label` is a translation key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderItem {
    /// Translation key for the link text.
    pub label: String,
    /// Target anchor or URL.
    pub href: String,
}

/// Feature tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// Illustration path.
    pub img_src: String,
    /// Translation key for the heading.
    pub heading: String,
    /// Translation key for the sub heading.
    pub subheading: String,
}

/// Kitchen team member card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertChief {
    /// Role shown under the name.
    pub profession: String,
    /// Display name.
    pub name: String,
    /// Portrait path.
    pub img_src: String,
}

/// Gallery entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Image path.
    pub src: String,
    /// Dish name.
    pub name: String,
    /// Price in dollars.
    pub price: f64,
}

/// Group of footer links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLink {
    /// Section heading.
    pub section: String,
    /// Links listed in the section.
    #[serde(default)]
    pub links: Vec<HeaderItem>,
}

/// Price given either as free text or as a dollar amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    /// Rendered as-is (`"$4.10 each + tax"`, `"Price TBD"`).
    Text(String),
    /// Rendered as `$<amount>`.
    Amount(f64),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Amount(amount) => write!(f, "${amount}"),
        }
    }
}

/// Menu availability window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    /// Always on the menu.
    #[default]
    Standard,
    /// Offered for a season.
    Seasonal,
    /// Limited run.
    Limited,
}

/// Menu row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Dish name.
    pub name: String,
    /// Course or category (`Main Dish`, `Side`, ...).
    pub style: String,
    /// Price text.
    pub price: String,
    /// Ingredients or description.
    pub description: String,
    /// Dietary tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary: Vec<DietaryTag>,
    /// Availability window; absent means standard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    /// Last day a seasonal item is offered (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_until: Option<String>,
    /// Short badge text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

impl MenuItem {
    /// Whether the item belongs on the regular menu (no availability or `standard`).
    #[must_use]
    pub const fn is_standard(&self) -> bool {
        matches!(self.availability, None | Some(Availability::Standard))
    }
}

/// Catering package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CateringPackage {
    /// Package name.
    pub name: String,
    /// What is included.
    pub description: String,
    /// Number of guests served.
    pub serves_count: u32,
    /// Package price.
    pub price: Price,
    /// Days of notice required.
    pub lead_time_days: u32,
    /// Extra notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Dietary tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary: Vec<DietaryTag>,
}

/// Pre-orderable special item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialOrder {
    /// Item name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Price.
    pub price: Price,
    /// Last day to order (`YYYY-MM-DD`).
    pub cutoff_date: String,
    /// Notes on customization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization_notes: Option<String>,
    /// Dietary tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary: Vec<DietaryTag>,
}

/// Map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

/// Market, popup or festival appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event name.
    pub name: String,
    /// Event day (`YYYY-MM-DD`).
    pub date: String,
    /// Venue.
    pub location: String,
    /// Embeddable map URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_embed_url: Option<String>,
    /// Venue coordinates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Dishes featured at the event.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub menu_items: Vec<String>,
}

/// Vendor contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContactInfo {
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// E-mail address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Vendor metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorMetadata {
    /// Business name.
    pub vendor_name: String,
    /// Contact details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ContactInfo>,
    /// Ordering instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordering_info: Option<String>,
}
