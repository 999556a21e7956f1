//! `group` and `image` command handlers.

use std::path::PathBuf;

use butterbook_catalog::{
    extract_canonical, group_records_with, is_fallback_image_url, resolve_image_url,
    sort_groups_by_brand_then_size, GroupingOptions, PriceSummary, UnsizedPolicy,
};
use butterbook_core::{ButterType, RawProductRecord};
use serde::Serialize;
use serde_json::Value;

use crate::feeds::FeedReader;

/// One line item of `group` output.
#[derive(Debug, Serialize)]
pub(crate) struct GroupRow {
    key: String,
    name: String,
    brand: String,
    size_g: Option<u32>,
    #[serde(rename = "type")]
    kind: ButterType,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    prices: Option<PriceSummary>,
    image_url: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    name: String,
    image_url: String,
    fallback: bool,
}

pub(crate) fn group_rows(
    records: &[RawProductRecord],
    options: GroupingOptions,
    sort: bool,
    origin: &str,
) -> Vec<GroupRow> {
    let mut groups = group_records_with(records, options);
    if sort {
        sort_groups_by_brand_then_size(&mut groups);
    }

    groups
        .iter()
        .map(|group| GroupRow {
            key: group.key.clone(),
            name: group.display_name(),
            brand: group.canonical.brand.clone(),
            size_g: group.canonical.size_g,
            kind: group.canonical.kind,
            count: group.len(),
            prices: group.price_summary(),
            image_url: group.image_url(origin),
        })
        .collect()
}

pub(crate) fn image_rows(records: &[RawProductRecord], origin: &str) -> Vec<ImageRow> {
    records
        .iter()
        .map(|record| {
            let image_url = resolve_image_url(record, origin);
            ImageRow {
                id: record.id.clone(),
                name: extract_canonical(record).display_name(),
                fallback: is_fallback_image_url(&image_url),
                image_url,
            }
        })
        .collect()
}

/// Prints the grouped line items of every feed as JSON.
///
/// # Errors
///
/// Returns an error if a feed cannot be loaded.
pub(crate) async fn run_group(
    reader: &FeedReader,
    files: &[PathBuf],
    sort: bool,
    per_record: bool,
    origin: &str,
) -> anyhow::Result<()> {
    let records = reader.read_records(files).await?;
    let options = GroupingOptions {
        unsized_policy: if per_record {
            UnsizedPolicy::PerRecord
        } else {
            UnsizedPolicy::Shared
        },
    };

    let rows = group_rows(&records, options, sort, origin);
    tracing::info!(records = records.len(), groups = rows.len(), "grouped feeds");
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

/// Prints the resolved image of every record as JSON.
///
/// # Errors
///
/// Returns an error if a feed cannot be loaded.
pub(crate) async fn run_image(
    reader: &FeedReader,
    files: &[PathBuf],
    origin: &str,
) -> anyhow::Result<()> {
    let records = reader.read_records(files).await?;
    let rows = image_rows(&records, origin);
    let fallbacks = rows.iter().filter(|row| row.fallback).count();
    tracing::info!(records = rows.len(), fallbacks, "resolved images");
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
