//! Parsing of product and store feeds.
//!
//! Feeds arrive in three shapes:
//!
//! - a bare JSON array of records (mock data, scan payloads);
//! - a Django REST Framework page, `{"count": .., "next": .., "results": [...]}`;
//! - a named envelope, `{"products": [...]}` or `{"stores": [...]}`.
//!
//! Entries that are not objects are skipped with a warning rather than
//! failing the whole feed.

use butterbook_core::{RawProductRecord, Store};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CatalogError;

const PRODUCT_ENVELOPES: &[&str] = &["results", "products"];
const STORE_ENVELOPES: &[&str] = &["results", "stores"];

/// Parses a product feed into raw records.
///
/// # Errors
///
/// Returns [`CatalogError::Deserialize`] if `json` is not valid JSON and
/// [`CatalogError::UnexpectedShape`] if it is neither an array nor a known
/// envelope.
pub fn parse_records(json: &str) -> Result<Vec<RawProductRecord>, CatalogError> {
    parse_feed(json, "product feed", PRODUCT_ENVELOPES)
}

/// Parses a store feed.
///
/// # Errors
///
/// Same as [`parse_records`].
pub fn parse_stores(json: &str) -> Result<Vec<Store>, CatalogError> {
    parse_feed(json, "store feed", STORE_ENVELOPES)
}

fn parse_feed<T: DeserializeOwned>(
    json: &str,
    context: &str,
    envelopes: &[&str],
) -> Result<Vec<T>, CatalogError> {
    let value: Value = serde_json::from_str(json).map_err(|source| CatalogError::Deserialize {
        context: context.to_string(),
        source,
    })?;

    let unexpected = || CatalogError::UnexpectedShape {
        context: context.to_string(),
        keys: envelopes.join(", "),
    };

    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut map) => envelopes
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(entries)) => Some(entries),
                _ => None,
            })
            .ok_or_else(unexpected)?,
        _ => return Err(unexpected()),
    };

    let total = entries.len();
    let parsed: Vec<T> = entries
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();

    if parsed.len() < total {
        tracing::warn!(
            context,
            skipped = total - parsed.len(),
            total,
            "skipped feed entries that are not records"
        );
    }

    Ok(parsed)
}
