//! Slug codec for canonical products.
//!
//! A slug is `<brand>_<size_g>_<type>`, e.g. `anchor_500_salted` or
//! `lurpak_250_lightly_salted`. Slugs are used as grouping keys and URL
//! segments. Decoding restores size and type exactly; the brand comes back
//! title-cased, so original casing is not preserved.

use butterbook_core::{title_case, ButterType, CanonicalProduct};

/// Encodes a canonical product as a slug.
///
/// The brand is lowercased with whitespace and underscores turned into word
/// separators and anything other than ASCII letters, digits, and `-`
/// dropped. An unknown size encodes as `0`.
#[must_use]
pub fn encode(canonical: &CanonicalProduct) -> String {
    format!(
        "{}_{}_{}",
        brand_token(&canonical.brand),
        canonical.size_g.unwrap_or(0),
        canonical.kind.slug_token()
    )
}

/// Decodes a slug back into a canonical product.
///
/// Returns `None` when the slug has fewer than three `_`-separated segments.
/// The type comes from the presence of an `unsalted` or `lightly_salted`
/// token anywhere in the slug, `unsalted` first, else `Salted`. Type tokens
/// are removed, the last all-digit segment left is the size, and the
/// remaining segments form the brand.
#[must_use]
pub fn decode(slug: &str) -> Option<CanonicalProduct> {
    let lower = slug.trim().to_ascii_lowercase();
    let segments: Vec<&str> = lower.split('_').collect();
    if segments.len() < 3 {
        return None;
    }

    let (kind, mut rest) = strip_type_tokens(&segments);

    let size_pos = rest
        .iter()
        .rposition(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()));
    let size_g = size_pos.and_then(|pos| rest.remove(pos).parse::<u32>().ok());

    let brand = title_case(&rest.join(" "));
    Some(CanonicalProduct::new(&brand, size_g, kind))
}

/// Removes every salt-type token from the segment list and reports the type
/// they name. `unsalted` wins over `lightly salted`; `salted` alone, or no
/// token at all, means `Salted`.
fn strip_type_tokens<'a>(segments: &[&'a str]) -> (ButterType, Vec<&'a str>) {
    let mut unsalted = false;
    let mut lightly = false;
    let mut rest = Vec::with_capacity(segments.len());

    let mut i = 0;
    while i < segments.len() {
        match &segments[i..] {
            ["unsalted", ..] => {
                unsalted = true;
                i += 1;
            }
            ["lightly", "salted", ..] => {
                lightly = true;
                i += 2;
            }
            ["salted", ..] => i += 1,
            [segment, ..] => {
                rest.push(*segment);
                i += 1;
            }
            [] => break,
        }
    }

    let kind = if unsalted {
        ButterType::Unsalted
    } else if lightly {
        ButterType::LightlySalted
    } else {
        ButterType::Salted
    };
    (kind, rest)
}

fn brand_token(brand: &str) -> String {
    let token = brand
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_')
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    if token.is_empty() {
        "unknown".to_string()
    } else {
        token
    }
}

/// URL-safe, dash-separated brand slug used for static brand assets,
/// e.g. `"Country Life"` becomes `"country-life"`.
#[must_use]
pub fn brand_asset_slug(brand: &str) -> String {
    brand
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else if c.is_whitespace() || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
