//! Dietary tags attached to menu entries.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Dietary label drawn from a closed set.
///
/// Unknown identifiers found in content files are kept as [`DietaryTag::Other`]
/// so they still render (as `[<raw>]`) instead of failing the whole bundle.
/// Equality, hashing and ordering all go through [`DietaryTag::id`], so an
/// `Other` carrying a known identifier is the same tag as the known variant.
#[derive(Debug, Clone)]
pub enum DietaryTag {
    /// `vegetarian`
    Vegetarian,
    /// `vegan`
    Vegan,
    /// `gluten-free`
    GlutenFree,
    /// `spicy`
    Spicy,
    /// `halal`
    Halal,
    /// `kosher`
    Kosher,
    /// `nut-free`
    NutFree,
    /// `dairy-free`
    DairyFree,
    /// `organic`
    Organic,
    /// `low-calorie`
    LowCalorie,
    /// `chefs-pick`
    ChefsPick,
    /// Identifier outside the known set.
    Other(String),
}

impl DietaryTag {
    /// Every known tag.
    pub const KNOWN: [Self; 11] = [
        Self::Vegetarian,
        Self::Vegan,
        Self::GlutenFree,
        Self::Spicy,
        Self::Halal,
        Self::Kosher,
        Self::NutFree,
        Self::DairyFree,
        Self::Organic,
        Self::LowCalorie,
        Self::ChefsPick,
    ];

    /// What: Parse a tag identifier.
    ///
    /// Output:
    /// - Known variant, or [`DietaryTag::Other`] carrying the raw identifier
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|t| t.id() == id)
            .unwrap_or_else(|| Self::Other(id.to_string()))
    }

    /// Identifier as written in content files (`gluten-free`).
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::GlutenFree => "gluten-free",
            Self::Spicy => "spicy",
            Self::Halal => "halal",
            Self::Kosher => "kosher",
            Self::NutFree => "nut-free",
            Self::DairyFree => "dairy-free",
            Self::Organic => "organic",
            Self::LowCalorie => "low-calorie",
            Self::ChefsPick => "chefs-pick",
            Self::Other(raw) => raw,
        }
    }

    /// Bracketed abbreviation used in text-only output (`[GF]`).
    #[must_use]
    pub fn short_label(&self) -> String {
        let label = match self {
            Self::Vegetarian => "[Veg]",
            Self::Vegan => "[Vgn]",
            Self::GlutenFree => "[GF]",
            Self::Spicy => "[Spicy]",
            Self::Halal => "[H]",
            Self::Kosher => "[K]",
            Self::NutFree => "[NF]",
            Self::DairyFree => "[DF]",
            Self::Organic => "[Org]",
            Self::LowCalorie => "[LC]",
            Self::ChefsPick => "[CP]",
            Self::Other(raw) => return format!("[{raw}]"),
        };
        label.to_string()
    }

    /// Full display name (`Gluten-Free`); unknown tags show their identifier.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::GlutenFree => "Gluten-Free",
            Self::Spicy => "Spicy",
            Self::Halal => "Halal",
            Self::Kosher => "Kosher",
            Self::NutFree => "Nut-Free",
            Self::DairyFree => "Dairy-Free",
            Self::Organic => "Organic",
            Self::LowCalorie => "Low-Calorie",
            Self::ChefsPick => "Chef's Pick",
            Self::Other(raw) => raw,
        }
    }

    /// What: Format a tag list as space-separated abbreviations.
    ///
    /// Output:
    /// - e.g. `"[Vgn] [Veg] [GF]"`, empty string for no tags
    #[must_use]
    pub fn format_labels(tags: &[Self]) -> String {
        tags.iter()
            .map(Self::short_label)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl PartialEq for DietaryTag {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for DietaryTag {}

impl Hash for DietaryTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl PartialOrd for DietaryTag {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DietaryTag {
    /// Ordered by identifier, matching the legend ordering.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id().cmp(other.id())
    }
}

impl fmt::Display for DietaryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl Serialize for DietaryTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for DietaryTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_id(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id_roundtrips_known_tags() {
        for tag in DietaryTag::KNOWN {
            assert_eq!(DietaryTag::from_id(tag.id()), tag);
        }
        assert_eq!(
            DietaryTag::from_id("keto"),
            DietaryTag::Other("keto".to_string())
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(DietaryTag::GlutenFree.short_label(), "[GF]");
        assert_eq!(DietaryTag::ChefsPick.display_name(), "Chef's Pick");
        assert_eq!(DietaryTag::from_id("keto").short_label(), "[keto]");
        assert_eq!(
            DietaryTag::format_labels(&[DietaryTag::Vegan, DietaryTag::Spicy]),
            "[Vgn] [Spicy]"
        );
        assert_eq!(DietaryTag::format_labels(&[]), "");
    }

    #[test]
    fn test_ordering_is_by_identifier() {
        let mut tags = vec![
            DietaryTag::Vegetarian,
            DietaryTag::ChefsPick,
            DietaryTag::from_id("keto"),
            DietaryTag::GlutenFree,
        ];
        tags.sort();
        let ids: Vec<&str> = tags.iter().map(DietaryTag::id).collect();
        assert_eq!(ids, ["chefs-pick", "gluten-free", "keto", "vegetarian"]);
    }

    #[test]
    fn test_equality_agrees_with_ordering() {
        use std::collections::{BTreeSet, HashSet};

        let raw_vegan = DietaryTag::Other("vegan".to_string());
        assert_eq!(raw_vegan, DietaryTag::Vegan);
        assert_eq!(raw_vegan.cmp(&DietaryTag::Vegan), std::cmp::Ordering::Equal);
        assert_ne!(DietaryTag::from_id("keto"), DietaryTag::from_id("paleo"));

        let tree: BTreeSet<DietaryTag> = [raw_vegan.clone(), DietaryTag::Vegan].into_iter().collect();
        let hashed: HashSet<DietaryTag> = [raw_vegan, DietaryTag::Vegan].into_iter().collect();
        assert_eq!(tree.len(), 1);
        assert_eq!(hashed.len(), 1);
    }

    #[test]
    fn test_serde_uses_identifier() {
        let tags: Vec<DietaryTag> =
            serde_json::from_str(r#"["dairy-free", "mystery"]"#).expect("parse tags");
        assert_eq!(
            tags,
            vec![DietaryTag::DairyFree, DietaryTag::Other("mystery".to_string())]
        );
        assert_eq!(
            serde_json::to_string(&tags).expect("serialize tags"),
            r#"["dairy-free","mystery"]"#
        );
    }
}
