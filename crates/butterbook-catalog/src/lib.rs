pub mod columns;
pub mod compare;
pub mod error;
pub mod extract;
pub mod feed;
pub mod group;
pub mod image;
pub mod inflight;
pub mod origin;
mod parse;
pub mod slug;
pub mod stores;

pub use columns::{compute_visible, ColumnState, ColumnWindow, VisibleColumns};
pub use compare::{cheapest_column, store_prices};
pub use error::CatalogError;
pub use extract::{extract_canonical, extract_price};
pub use feed::{parse_records, parse_stores};
pub use group::{
    group_records, group_records_with, sort_groups_by_brand_then_size, GroupingOptions,
    PriceSummary, ProductGroup, UnsizedPolicy,
};
pub use image::{
    find_real_image, is_fallback_image_url, resolve_group_image_url, resolve_image_url,
    PLACEHOLDER_IMAGE_PATH,
};
pub use inflight::InflightCache;
pub use origin::absolutize_image_url;
pub use stores::{
    find_store_by_name, match_record_store, normalize_store_name, same_store_name,
};

/// Classifies a free-text salt label (`"Lightly Salted"`, `"unsalted"`, ...).
///
/// Returns `None` when the text names no salt type.
#[must_use]
pub fn classify_butter_type(text: &str) -> Option<butterbook_core::ButterType> {
    parse::classify_butter_type(text)
}
