//! Store-name normalization for matching supermarkets across feeds.

use butterbook_core::{RawProductRecord, Store, StoreRef};
use serde_json::Value;

/// Trailing words that do not distinguish one chain from another.
const STORE_SUFFIXES: &[&str] = &[
    "supermarket",
    "supermarkets",
    "superstore",
    "stores",
    "ltd",
    "limited",
    "plc",
];

/// Normalizes a store name for comparison.
///
/// Lowercases, spells `&` as `and`, drops punctuation (`Sainsbury's` becomes
/// `sainsburys`), collapses whitespace, and strips trailing corporate or
/// format suffixes such as `Superstore` or `Ltd`. A name made only of
/// suffixes keeps its first word.
#[must_use]
pub fn normalize_store_name(name: &str) -> String {
    let cleaned: String = name
        .to_lowercase()
        .replace('&', " and ")
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let mut words: Vec<&str> = cleaned.split_whitespace().collect();
    while words.len() > 1 && words.last().is_some_and(|w| STORE_SUFFIXES.contains(w)) {
        words.pop();
    }
    words.join(" ")
}

/// `true` when two store names normalize to the same value.
#[must_use]
pub fn same_store_name(a: &str, b: &str) -> bool {
    let a = normalize_store_name(a);
    !a.is_empty() && a == normalize_store_name(b)
}

/// Finds the first store whose name matches `name` after normalization.
#[must_use]
pub fn find_store_by_name<'a>(stores: &'a [Store], name: &str) -> Option<&'a Store> {
    stores
        .iter()
        .find(|store| store.name.as_deref().is_some_and(|n| same_store_name(n, name)))
}

/// Finds the store a record's price was observed at.
///
/// Numeric and embedded-object references match by id first; names match
/// after normalization. A record with no store reference matches nothing.
#[must_use]
pub fn match_record_store<'a>(record: &RawProductRecord, stores: &'a [Store]) -> Option<&'a Store> {
    match record.store.as_ref() {
        Some(StoreRef::Id(id)) => find_store_by_id(stores, *id),
        Some(StoreRef::Name(name)) => find_store_by_name(stores, name),
        Some(StoreRef::Object(embedded)) => embedded
            .id
            .as_ref()
            .and_then(id_as_i64)
            .and_then(|id| find_store_by_id(stores, id))
            .or_else(|| {
                embedded
                    .name
                    .as_deref()
                    .and_then(|name| find_store_by_name(stores, name))
            }),
        None => None,
    }
    .or_else(|| {
        record
            .store_name
            .as_deref()
            .and_then(|name| find_store_by_name(stores, name))
    })
}

fn find_store_by_id(stores: &[Store], id: i64) -> Option<&Store> {
    stores
        .iter()
        .find(|store| store.id.as_ref().and_then(id_as_i64) == Some(id))
}

/// Store ids arrive as numbers or numeric strings.
fn id_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn store(id: i64, name: &str) -> Store {
        Store {
            id: Some(json!(id)),
            name: Some(name.into()),
            ..Store::default()
        }
    }

    fn record(value: serde_json::Value) -> RawProductRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn lowercases_and_drops_apostrophes() {
        assert_eq!(normalize_store_name("Sainsbury's"), "sainsburys");
        assert_eq!(normalize_store_name("SAINSBURY’S"), "sainsburys");
    }

    #[test]
    fn ampersand_becomes_and() {
        assert_eq!(normalize_store_name("Marks & Spencer"), "marks and spencer");
        assert_eq!(normalize_store_name("M&S"), "m and s");
    }

    #[test]
    fn strips_trailing_suffixes() {
        assert_eq!(normalize_store_name("Tesco Superstore"), "tesco");
        assert_eq!(normalize_store_name("Morrisons Supermarkets PLC"), "morrisons");
    }

    #[test]
    fn keeps_format_names() {
        assert_eq!(normalize_store_name("Tesco Express"), "tesco express");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize_store_name("  Co-op   Food "), "coop food");
    }

    #[test]
    fn suffix_only_name_keeps_one_word() {
        assert_eq!(normalize_store_name("Superstore Ltd"), "superstore");
    }

    #[test]
    fn same_store_name_matches_variants() {
        assert!(same_store_name("ASDA Superstore", "Asda"));
        assert!(!same_store_name("Aldi", "Lidl"));
        assert!(!same_store_name("", "  "));
    }

    #[test]
    fn find_store_by_normalized_name() {
        let stores = vec![
            Store {
                name: Some("Aldi".into()),
                ..Store::default()
            },
            Store {
                name: Some("Sainsbury's Superstore".into()),
                ..Store::default()
            },
        ];
        let found = find_store_by_name(&stores, "sainsburys").expect("should match");
        assert_eq!(found.name.as_deref(), Some("Sainsbury's Superstore"));
        assert!(find_store_by_name(&stores, "Waitrose").is_none());
    }

    #[test]
    fn record_store_matches_by_id() {
        let stores = vec![store(10, "Tesco"), store(11, "Asda")];
        let found = match_record_store(&record(json!({ "store": 11 })), &stores);
        assert_eq!(found.map(Store::label), Some("Asda"));
    }

    #[test]
    fn record_store_matches_embedded_object_by_id_then_name() {
        let stores = vec![store(10, "Tesco"), store(11, "Asda")];

        let by_id = record(json!({ "store": { "id": "10", "name": "Somewhere Else" } }));
        assert_eq!(match_record_store(&by_id, &stores).map(Store::label), Some("Tesco"));

        let by_name = record(json!({ "store": { "name": "ASDA Superstore" } }));
        assert_eq!(match_record_store(&by_name, &stores).map(Store::label), Some("Asda"));
    }

    #[test]
    fn record_store_falls_back_to_store_name() {
        let stores = vec![store(10, "Tesco")];
        let r = record(json!({ "store": 99, "store_name": "tesco" }));
        assert_eq!(match_record_store(&r, &stores).map(Store::label), Some("Tesco"));
    }

    #[test]
    fn record_without_store_matches_nothing() {
        let stores = vec![store(10, "Tesco")];
        assert!(match_record_store(&RawProductRecord::default(), &stores).is_none());
    }
}
