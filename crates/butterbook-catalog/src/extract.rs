//! Canonical field extraction from raw product records.
//!
//! Structured fields always win over free text; text heuristics live in
//! [`crate::parse`]. Nothing here fails: every missing or malformed input
//! degrades to the documented default.

use butterbook_core::{BrandRef, ButterType, CanonicalProduct, LooseNumber, RawProductRecord};

use crate::parse::{
    classify_butter_type, grams_from_f64, leading_brand, parse_price_text, parse_size_grams,
};

/// Derives the canonical brand/size/type identity of a record.
///
/// - Brand: `brand`, `brand_name`, `brand_display_name`, then the leading
///   words of `name_with_brand`, `name`, or `title`, else `"Unknown"`.
/// - Size: `size_g`, `weight_grams`, `size`, `weight` in grams, then a
///   text scan of `name_with_brand`, `name`, `title`, `description`,
///   `size_text`.
/// - Type: `type`, `variant`, then the same text scan, else `Salted`.
#[must_use]
pub fn extract_canonical(record: &RawProductRecord) -> CanonicalProduct {
    let brand = extract_brand(record);
    let size_g = extract_size_g(record);
    let kind = extract_type(record);

    CanonicalProduct::new(
        brand.as_deref().unwrap_or(CanonicalProduct::UNKNOWN_BRAND),
        size_g,
        kind,
    )
}

/// The record's brand, if any field yields one.
#[must_use]
pub(crate) fn extract_brand(record: &RawProductRecord) -> Option<String> {
    let explicit = record
        .brand
        .as_ref()
        .and_then(BrandRef::as_name)
        .or_else(|| non_blank(record.brand_name.as_deref()))
        .or_else(|| non_blank(record.brand_display_name.as_deref()));

    if let Some(brand) = explicit {
        return Some(brand.to_owned());
    }

    [&record.name_with_brand, &record.name, &record.title]
        .into_iter()
        .flatten()
        .find_map(|name| leading_brand(name))
}

fn extract_size_g(record: &RawProductRecord) -> Option<u32> {
    [
        &record.size_g,
        &record.weight_grams,
        &record.size,
        &record.weight,
    ]
    .into_iter()
    .flatten()
    .find_map(grams_from_field)
    .or_else(|| parse_size_grams(&text_blob(record)))
}

/// Converts an explicit size field to grams. Numeric values are taken as
/// grams; strings that are not plain numbers (`"1kg"`) go through the text
/// scan.
fn grams_from_field(value: &LooseNumber) -> Option<u32> {
    match value.as_f64() {
        Some(grams) => grams_from_f64(grams),
        None => value.as_text().and_then(parse_size_grams),
    }
}

fn extract_type(record: &RawProductRecord) -> ButterType {
    [&record.kind, &record.variant]
        .into_iter()
        .flatten()
        .find_map(|explicit| classify_butter_type(explicit))
        .or_else(|| classify_butter_type(&text_blob(record)))
        .unwrap_or_default()
}

/// Extracts the shelf price from `price`, `current_price`, or `unit_price`.
///
/// Accepts numbers and strings such as `"£2.50"` or `"85p"`. Negative
/// prices are ignored.
#[must_use]
pub fn extract_price(record: &RawProductRecord) -> Option<f64> {
    [&record.price, &record.current_price, &record.unit_price]
        .into_iter()
        .flatten()
        .find_map(|value| {
            value
                .as_f64()
                .or_else(|| value.as_text().and_then(parse_price_text))
                .filter(|price| *price >= 0.0)
        })
}

/// Space-joined free-text fields scanned for size and type.
fn text_blob(record: &RawProductRecord) -> String {
    [
        &record.name_with_brand,
        &record.name,
        &record.title,
        &record.description,
        &record.size_text,
    ]
    .into_iter()
    .flatten()
    .map(String::as_str)
    .collect::<Vec<_>>()
    .join(" ")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
