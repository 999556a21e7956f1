//! Product image resolution.
//!
//! Candidate fields are searched in a fixed priority order, then wrapped
//! source records (`originalProduct`, `raw`, `primary_product`) are searched
//! recursively. Fallback and placeholder images are never returned as a
//! "real" photo; when nothing real is found the result is a brand asset or
//! the generic placeholder.

use std::collections::HashSet;

use butterbook_core::{ImageRef, RawProductRecord};

use crate::extract::extract_brand;
use crate::origin::absolutize_image_url;
use crate::slug::brand_asset_slug;

/// Generic placeholder shown when no photo or brand asset applies.
pub const PLACEHOLDER_IMAGE_PATH: &str = "/static/images/placeholder.png";

/// Substrings that mark a URL as a stand-in rather than a product photo.
const FALLBACK_MARKERS: &[&str] = &["placeholder", "/static/brands/", "/assets/brands/"];

/// Deepest wrapper nesting searched for an image.
const MAX_WRAPPER_DEPTH: usize = 4;

/// Returns `true` for placeholder and brand-tile URLs.
#[must_use]
pub fn is_fallback_image_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    FALLBACK_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Resolves the display image for a record.
///
/// Returns the first real photo found, absolutized against `base_origin`;
/// otherwise `/static/brands/<brand>.png` when the brand is known; otherwise
/// [`PLACEHOLDER_IMAGE_PATH`].
#[must_use]
pub fn resolve_image_url(record: &RawProductRecord, base_origin: &str) -> String {
    find_real_image(record).map_or_else(
        || fallback_image_path(record),
        |url| absolutize_image_url(base_origin, url),
    )
}

/// Resolves one image for a set of records describing the same product:
/// the first real photo among them, else the first record's fallback.
#[must_use]
pub fn resolve_group_image_url<'a, I>(records: I, base_origin: &str) -> String
where
    I: IntoIterator<Item = &'a RawProductRecord>,
{
    let mut first = None;
    for record in records {
        if let Some(url) = find_real_image(record) {
            return absolutize_image_url(base_origin, url);
        }
        first.get_or_insert(record);
    }
    first.map_or_else(|| PLACEHOLDER_IMAGE_PATH.to_string(), fallback_image_path)
}

/// The first usable, non-fallback image URL on the record or its wrapped
/// source records, as written in the feed (not yet absolutized).
#[must_use]
pub fn find_real_image(record: &RawProductRecord) -> Option<&str> {
    let mut seen = HashSet::new();
    search_record(record, 0, &mut seen)
}

fn search_record<'r>(
    record: &'r RawProductRecord,
    depth: usize,
    seen: &mut HashSet<*const RawProductRecord>,
) -> Option<&'r str> {
    if !seen.insert(std::ptr::from_ref(record)) {
        return None;
    }

    if let Some(url) = direct_candidates(record).find(|url| is_usable(url)) {
        return Some(url);
    }

    if depth >= MAX_WRAPPER_DEPTH {
        if record.wrapped().next().is_some() {
            tracing::warn!(depth, "image search stopped at maximum wrapper depth");
        }
        return None;
    }

    record
        .wrapped()
        .find_map(|inner| search_record(inner, depth + 1, seen))
}

/// Image fields in priority order: `image_url`, `image`, `photo_url`,
/// `thumbnail_url`, `primary_image`, then the first of `images` and of
/// `image_assets`.
fn direct_candidates(record: &RawProductRecord) -> impl Iterator<Item = &str> {
    [
        &record.image_url,
        &record.image,
        &record.photo_url,
        &record.thumbnail_url,
        &record.primary_image,
    ]
    .into_iter()
    .flatten()
    .chain(record.images.first())
    .chain(record.image_assets.first())
    .filter_map(ImageRef::url)
}

fn is_usable(url: &str) -> bool {
    !url.trim().is_empty() && !is_fallback_image_url(url)
}

fn fallback_image_path(record: &RawProductRecord) -> String {
    extract_brand(record)
        .map(|brand| brand_asset_slug(&brand))
        .filter(|slug| !slug.is_empty())
        .map_or_else(
            || PLACEHOLDER_IMAGE_PATH.to_string(),
            |slug| format!("/static/brands/{slug}.png"),
        )
}
