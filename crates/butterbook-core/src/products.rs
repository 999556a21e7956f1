use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lenient::{lenient, lenient_vec};
use crate::stores::Store;

/// Salt classification of a butter product.
///
/// Lightly salted is its own variant everywhere (slugs, display names, image
/// lookup); it is never folded into `Unsalted`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButterType {
    #[default]
    Salted,
    Unsalted,
    LightlySalted,
}

impl ButterType {
    /// Token used in slugs, e.g. `"lightly_salted"`.
    #[must_use]
    pub fn slug_token(self) -> &'static str {
        match self {
            ButterType::Salted => "salted",
            ButterType::Unsalted => "unsalted",
            ButterType::LightlySalted => "lightly_salted",
        }
    }

    /// Human-readable label, e.g. `"Lightly Salted"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ButterType::Salted => "Salted",
            ButterType::Unsalted => "Unsalted",
            ButterType::LightlySalted => "Lightly Salted",
        }
    }

    /// `true` for any butter containing added salt, lightly salted included.
    #[must_use]
    pub fn is_salted(self) -> bool {
        !matches!(self, ButterType::Unsalted)
    }
}

impl std::fmt::Display for ButterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The brand/size/type identity used to group listings of the same product
/// across stores and feeds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalProduct {
    /// Trimmed brand in source casing, or [`CanonicalProduct::UNKNOWN_BRAND`].
    pub brand: String,
    /// Pack size in grams. `None` when no size could be determined.
    pub size_g: Option<u32>,
    #[serde(rename = "type")]
    pub kind: ButterType,
}

impl CanonicalProduct {
    pub const UNKNOWN_BRAND: &'static str = "Unknown";

    /// Builds a canonical product, trimming the brand and mapping blank
    /// brands to `"Unknown"` and a zero size to `None`.
    #[must_use]
    pub fn new(brand: &str, size_g: Option<u32>, kind: ButterType) -> Self {
        let brand = brand.trim();
        Self {
            brand: if brand.is_empty() {
                Self::UNKNOWN_BRAND.to_string()
            } else {
                brand.to_string()
            },
            size_g: size_g.filter(|&g| g > 0),
            kind,
        }
    }

    #[must_use]
    pub fn has_known_brand(&self) -> bool {
        self.brand != Self::UNKNOWN_BRAND
    }

    /// Display title such as `"Anchor Salted Butter 500g"`.
    ///
    /// The brand is title-cased for display. A product with nothing known
    /// renders as `"Unknown Butter"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        if !self.has_known_brand() && self.size_g.is_none() && self.kind == ButterType::Salted {
            return "Unknown Butter".to_string();
        }

        let mut parts = Vec::with_capacity(4);
        if self.has_known_brand() {
            parts.push(title_case(&self.brand));
        }
        parts.push(self.kind.label().to_string());
        parts.push("Butter".to_string());
        if let Some(size) = self.size_g {
            parts.push(format!("{size}g"));
        }
        parts.join(" ")
    }
}

/// Capitalizes the first letter of each whitespace-separated word and
/// lowercases the rest. Whitespace runs collapse to a single space.
#[must_use]
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A numeric field that upstream feeds send either as a JSON number or as a
/// string (`500`, `"500"`, `"£2.50"`, `"1kg"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    /// The value as a finite `f64`, if it is a number or a string that
    /// parses cleanly as one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LooseNumber::Number(n) => Some(*n),
            LooseNumber::Text(s) => s.trim().parse::<f64>().ok(),
        }
        .filter(|n| n.is_finite())
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            LooseNumber::Text(s) => Some(s),
            LooseNumber::Number(_) => None,
        }
    }
}

/// A brand as sent by the backend: either a plain name or a nested object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BrandRef {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        display_name: Option<String>,
    },
}

impl BrandRef {
    /// The trimmed brand name, if non-blank.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        let raw = match self {
            BrandRef::Name(name) => Some(name.as_str()),
            BrandRef::Object { name, display_name } => display_name
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .or(name.as_deref()),
        };
        raw.map(str::trim).filter(|s| !s.is_empty())
    }
}

/// An image field: a bare URL string or an object carrying one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    Url(String),
    Object(ImageObject),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

impl ImageRef {
    /// The URL this reference points at, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            ImageRef::Url(url) => Some(url),
            ImageRef::Object(obj) => obj
                .url
                .as_deref()
                .or(obj.image_url.as_deref())
                .or(obj.src.as_deref()),
        }
    }
}

/// The store a price was observed at: a name, a numeric id, or an embedded
/// store object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoreRef {
    Name(String),
    Id(i64),
    Object(Store),
}

/// A product/price record exactly as received from the REST backend, mock
/// data, or a scan payload.
///
/// Every field is optional and tolerant of the wrong JSON type; fields this
/// struct does not model are kept in [`RawProductRecord::extra`]. Records are
/// never mutated after parsing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProductRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub brand: Option<BrandRef>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub brand_display_name: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name_with_brand: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub size_text: Option<String>,

    #[serde(
        default,
        alias = "sizeG",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub size_g: Option<LooseNumber>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub weight_grams: Option<LooseNumber>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub size: Option<LooseNumber>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub weight: Option<LooseNumber>,

    #[serde(
        default,
        rename = "type",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub price: Option<LooseNumber>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub current_price: Option<LooseNumber>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<LooseNumber>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreRef>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,

    #[serde(
        default,
        alias = "imageUrl",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<ImageRef>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(
        default,
        alias = "photoUrl",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_url: Option<ImageRef>,
    #[serde(
        default,
        alias = "thumbnailUrl",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbnail_url: Option<ImageRef>,
    #[serde(
        default,
        alias = "primaryImage",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub primary_image: Option<ImageRef>,
    #[serde(default, deserialize_with = "lenient_vec", skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageRef>,
    #[serde(
        default,
        alias = "imageAssets",
        deserialize_with = "lenient_vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub image_assets: Vec<ImageRef>,

    /// Wrapped source record, as attached by feeds that re-shape products.
    #[serde(
        default,
        rename = "originalProduct",
        alias = "original_product",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_product: Option<Arc<RawProductRecord>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub raw: Option<Arc<RawProductRecord>>,
    #[serde(
        default,
        alias = "primaryProduct",
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub primary_product: Option<Arc<RawProductRecord>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawProductRecord {
    /// Wrapped records in search order: `originalProduct`, `raw`,
    /// `primary_product`.
    pub fn wrapped(&self) -> impl Iterator<Item = &Arc<RawProductRecord>> {
        [&self.original_product, &self.raw, &self.primary_product]
            .into_iter()
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: serde_json::Value) -> RawProductRecord {
        serde_json::from_value(value).expect("record should deserialize")
    }

    #[test]
    fn canonical_new_trims_brand() {
        let c = CanonicalProduct::new("  Anchor ", Some(500), ButterType::Salted);
        assert_eq!(c.brand, "Anchor");
    }

    #[test]
    fn canonical_new_blank_brand_is_unknown() {
        let c = CanonicalProduct::new("   ", None, ButterType::Salted);
        assert_eq!(c.brand, "Unknown");
        assert!(!c.has_known_brand());
    }

    #[test]
    fn canonical_new_zero_size_is_none() {
        let c = CanonicalProduct::new("Anchor", Some(0), ButterType::Salted);
        assert!(c.size_g.is_none());
    }

    #[test]
    fn display_name_full() {
        let c = CanonicalProduct::new("anchor", Some(500), ButterType::Salted);
        assert_eq!(c.display_name(), "Anchor Salted Butter 500g");
    }

    #[test]
    fn display_name_lightly_salted() {
        let c = CanonicalProduct::new("Lurpak", Some(250), ButterType::LightlySalted);
        assert_eq!(c.display_name(), "Lurpak Lightly Salted Butter 250g");
    }

    #[test]
    fn display_name_nothing_known() {
        let c = CanonicalProduct::new("", None, ButterType::Salted);
        assert_eq!(c.display_name(), "Unknown Butter");
    }

    #[test]
    fn title_case_collapses_whitespace() {
        assert_eq!(title_case("  country   LIFE "), "Country Life");
    }

    #[test]
    fn butter_type_is_salted() {
        assert!(ButterType::Salted.is_salted());
        assert!(ButterType::LightlySalted.is_salted());
        assert!(!ButterType::Unsalted.is_salted());
    }

    #[test]
    fn butter_type_serializes_as_slug_token() {
        let json = serde_json::to_string(&ButterType::LightlySalted).unwrap();
        assert_eq!(json, "\"lightly_salted\"");
    }

    #[test]
    fn loose_number_parses_strings() {
        assert_eq!(LooseNumber::Text(" 250 ".into()).as_f64(), Some(250.0));
        assert_eq!(LooseNumber::Text("250g".into()).as_f64(), None);
        assert_eq!(LooseNumber::Number(f64::NAN).as_f64(), None);
    }

    #[test]
    fn brand_ref_prefers_display_name() {
        let brand = BrandRef::Object {
            name: Some("anchor".into()),
            display_name: Some("Anchor".into()),
        };
        assert_eq!(brand.as_name(), Some("Anchor"));
    }

    #[test]
    fn record_accepts_mixed_field_types() {
        let r = record(json!({
            "id": 7,
            "brand": { "name": "Kerrygold" },
            "size_g": "250",
            "weight": 250,
            "price": "£2.50",
            "images": ["https://cdn.example.com/a.jpg", { "url": "/media/b.jpg" }],
        }));
        assert_eq!(r.brand.as_ref().and_then(BrandRef::as_name), Some("Kerrygold"));
        assert_eq!(r.size_g.as_ref().and_then(LooseNumber::as_f64), Some(250.0));
        assert_eq!(r.weight.as_ref().and_then(LooseNumber::as_f64), Some(250.0));
        assert_eq!(r.images.len(), 2);
        assert_eq!(r.images[1].url(), Some("/media/b.jpg"));
    }

    #[test]
    fn record_drops_fields_of_the_wrong_shape() {
        let r = record(json!({
            "name": 42,
            "size_g": { "value": 250 },
            "images": "not-a-list",
            "brand_name": "Anchor",
        }));
        assert!(r.name.is_none());
        assert!(r.size_g.is_none());
        assert!(r.images.is_empty());
        assert_eq!(r.brand_name.as_deref(), Some("Anchor"));
    }

    #[test]
    fn record_keeps_unknown_fields() {
        let r = record(json!({ "name": "Anchor 500g", "store_id": 12 }));
        assert_eq!(r.extra.get("store_id"), Some(&json!(12)));
    }

    #[test]
    fn record_store_ref_shapes() {
        let by_name = record(json!({ "store": "Tesco" }));
        assert_eq!(by_name.store, Some(StoreRef::Name("Tesco".into())));

        let by_id = record(json!({ "store": 10 }));
        assert_eq!(by_id.store, Some(StoreRef::Id(10)));

        let embedded = record(json!({ "store": { "id": 10, "name": "Asda" } }));
        let Some(StoreRef::Object(store)) = embedded.store else {
            panic!("expected embedded store");
        };
        assert_eq!(store.name.as_deref(), Some("Asda"));
    }

    #[test]
    fn record_reads_wrappers_in_order() {
        let r = record(json!({
            "raw": { "name": "raw" },
            "originalProduct": { "name": "original" },
        }));
        let names: Vec<_> = r.wrapped().filter_map(|w| w.name.as_deref()).collect();
        assert_eq!(names, vec!["original", "raw"]);
    }
}
