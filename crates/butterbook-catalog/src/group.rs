//! Grouping of raw records into comparable line items.

use std::cmp::Ordering;
use std::collections::HashMap;

use butterbook_core::{CanonicalProduct, RawProductRecord};
use serde::Serialize;

use crate::extract::{extract_canonical, extract_price};
use crate::image::resolve_group_image_url;
use crate::slug;

/// How records without a determinable size are grouped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnsizedPolicy {
    /// Size-less records share a group with other records of the same
    /// brand and type (key `<brand>_0_<type>`).
    #[default]
    Shared,
    /// Every size-less record gets its own group.
    PerRecord,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GroupingOptions {
    pub unsized_policy: UnsizedPolicy,
}

/// Records sharing one grouping key (the slug of their canonical product).
///
/// Members share the slug, not necessarily the full canonical value: brand
/// casing may differ between them (`ANCHOR` and `Anchor`). `canonical` is
/// the sample's value. `sample` is the first record observed for the key and
/// is always `items[0]`. Items keep input order.
#[derive(Debug, Clone, Serialize)]
pub struct ProductGroup<'a> {
    pub key: String,
    pub canonical: CanonicalProduct,
    pub sample: &'a RawProductRecord,
    pub items: Vec<&'a RawProductRecord>,
}

/// Lowest, highest, and count of the prices found in a group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceSummary {
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl ProductGroup<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        self.canonical.display_name()
    }

    /// Price range across members that carry a price, or `None` when no
    /// member does.
    #[must_use]
    pub fn price_summary(&self) -> Option<PriceSummary> {
        let mut prices = self.items.iter().filter_map(|item| extract_price(item));
        let first = prices.next()?;
        let summary = prices.fold(
            PriceSummary {
                min: first,
                max: first,
                count: 1,
            },
            |acc, price| PriceSummary {
                min: acc.min.min(price),
                max: acc.max.max(price),
                count: acc.count + 1,
            },
        );
        Some(summary)
    }

    /// Best image for the group: the first real photo among its members,
    /// else the sample's fallback.
    #[must_use]
    pub fn image_url(&self, base_origin: &str) -> String {
        resolve_group_image_url(self.items.iter().copied(), base_origin)
    }
}

/// Groups records by canonical identity with the default options.
///
/// Groups come out in first-seen order of their key; the first record seen
/// for a key is its sample. Runs in O(n).
#[must_use]
pub fn group_records(records: &[RawProductRecord]) -> Vec<ProductGroup<'_>> {
    group_records_with(records, GroupingOptions::default())
}

/// Groups records by canonical identity.
#[must_use]
pub fn group_records_with(
    records: &[RawProductRecord],
    options: GroupingOptions,
) -> Vec<ProductGroup<'_>> {
    let mut groups: Vec<ProductGroup<'_>> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::with_capacity(records.len());

    for (position, record) in records.iter().enumerate() {
        let canonical = extract_canonical(record);
        let mut key = slug::encode(&canonical);
        if canonical.size_g.is_none() && options.unsized_policy == UnsizedPolicy::PerRecord {
            key = format!("{key}#{position}");
        }

        if let Some(&idx) = index_by_key.get(&key) {
            groups[idx].items.push(record);
            continue;
        }

        index_by_key.insert(key.clone(), groups.len());
        groups.push(ProductGroup {
            key,
            canonical,
            sample: record,
            items: vec![record],
        });
    }

    tracing::debug!(
        records = records.len(),
        groups = groups.len(),
        "grouped product records"
    );
    groups
}

/// Presentation sort: brand (case-insensitive), then size ascending with
/// unknown sizes last. Stable, so ties keep first-seen order.
pub fn sort_groups_by_brand_then_size(groups: &mut [ProductGroup<'_>]) {
    groups.sort_by(|a, b| {
        let brand = a
            .canonical
            .brand
            .to_lowercase()
            .cmp(&b.canonical.brand.to_lowercase());
        brand.then_with(|| compare_sizes(a.canonical.size_g, b.canonical.size_g))
    });
}

fn compare_sizes(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: serde_json::Value) -> RawProductRecord {
        serde_json::from_value(value).expect("record should deserialize")
    }

    fn butter(id: u32, brand: &str, size: u32) -> RawProductRecord {
        record(json!({ "id": id, "brand": brand, "size_g": size, "type": "salted" }))
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_records(&[]).is_empty());
    }

    #[test]
    fn brand_casing_variants_share_a_group_with_sample_canonical() {
        let records = vec![butter(1, "Anchor", 500), butter(2, "ANCHOR", 500)];
        let groups = group_records(&records);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "anchor_500_salted");
        assert_eq!(groups[0].canonical.brand, "Anchor");
        assert_eq!(extract_canonical(groups[0].items[1]).brand, "ANCHOR");
    }

    #[test]
    fn first_seen_record_is_sample() {
        let records = vec![
            butter(1, "X", 500),
            butter(2, "X", 500),
            butter(3, "Y", 500),
        ];
        let groups = group_records(&records);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "x_500_salted");
        assert!(std::ptr::eq(groups[0].sample, &records[0]));
        assert_eq!(groups[0].len(), 2);
        assert!(std::ptr::eq(groups[0].items[1], &records[1]));
        assert_eq!(groups[1].key, "y_500_salted");
        assert!(std::ptr::eq(groups[1].sample, &records[2]));
        assert_eq!(groups[1].len(), 1);
    }

    #[test]
    fn distinct_keys_stay_in_input_order() {
        let records = vec![
            butter(1, "Lurpak", 250),
            butter(2, "Anchor", 500),
            butter(3, "Anchor", 250),
        ];
        let groups = group_records(&records);
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["lurpak_250_salted", "anchor_500_salted", "anchor_250_salted"]
        );
        assert!(groups.iter().all(|g| g.len() == 1));
    }

    #[test]
    fn later_records_join_earlier_group_across_feeds() {
        let records = vec![
            record(json!({ "brand": "Anchor", "size_g": 500 })),
            record(json!({ "name": "Lurpak Unsalted 250g" })),
            record(json!({ "name": "Anchor Salted Butter 500g", "price": "£2.10" })),
        ];
        let groups = group_records(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1].key, "lurpak_250_unsalted");
    }

    #[test]
    fn unresolvable_records_share_a_group() {
        let records = vec![
            record(json!({})),
            record(json!({ "description": "n/a" })),
        ];
        let groups = group_records(&records);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "unknown_0_salted");
        assert_eq!(groups[0].display_name(), "Unknown Butter");
    }

    #[test]
    fn per_record_policy_splits_unsized_records() {
        let records = vec![
            record(json!({ "brand": "Anchor" })),
            record(json!({ "brand": "Anchor" })),
            butter(3, "Anchor", 250),
            butter(4, "Anchor", 250),
        ];
        let options = GroupingOptions {
            unsized_policy: UnsizedPolicy::PerRecord,
        };
        let groups = group_records_with(&records, options);
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["anchor_0_salted#0", "anchor_0_salted#1", "anchor_250_salted"]
        );
    }

    #[test]
    fn price_summary_spans_members() {
        let records = vec![
            record(json!({ "brand": "Anchor", "size_g": 500, "price": 2.5 })),
            record(json!({ "brand": "Anchor", "size_g": 500 })),
            record(json!({ "brand": "Anchor", "size_g": 500, "price": "£1.95" })),
        ];
        let groups = group_records(&records);
        let summary = groups[0].price_summary().expect("two members have prices");
        assert_eq!(summary.min, 1.95);
        assert_eq!(summary.max, 2.5);
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn price_summary_none_without_prices() {
        let records = vec![butter(1, "Anchor", 500)];
        assert!(group_records(&records)[0].price_summary().is_none());
    }

    #[test]
    fn sort_by_brand_then_size_puts_unknown_sizes_last() {
        let records = vec![
            butter(1, "lurpak", 250),
            record(json!({ "brand": "Anchor" })),
            butter(3, "Anchor", 500),
            butter(4, "Anchor", 250),
        ];
        let mut groups = group_records(&records);
        sort_groups_by_brand_then_size(&mut groups);
        let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "anchor_250_salted",
                "anchor_500_salted",
                "anchor_0_salted",
                "lurpak_250_salted"
            ]
        );
    }
}
