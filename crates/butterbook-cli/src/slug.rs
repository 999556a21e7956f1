//! `slug` command handlers.

use butterbook_catalog::{classify_butter_type, slug as codec};
use butterbook_core::{ButterType, CanonicalProduct};
use clap::Subcommand;
use serde::Serialize;

/// Sub-commands available under `slug`.
#[derive(Debug, Subcommand)]
pub enum SlugCommands {
    /// Build the slug for a brand, size, and salt type
    Encode {
        #[arg(long)]
        brand: String,

        /// Pack size in grams; omit when unknown
        #[arg(long)]
        size: Option<u32>,

        /// Salted, unsalted, or lightly salted
        #[arg(long = "type", default_value = "salted", value_parser = parse_butter_type)]
        kind: ButterType,
    },
    /// Parse a slug back into brand, size, and type
    Decode { slug: String },
}

#[derive(Debug, Serialize)]
struct DecodedSlug<'a> {
    #[serde(flatten)]
    product: &'a CanonicalProduct,
    name: String,
    slug: String,
}

fn parse_butter_type(value: &str) -> Result<ButterType, String> {
    classify_butter_type(value).ok_or_else(|| {
        format!("unknown butter type '{value}' (expected salted, unsalted, or lightly salted)")
    })
}

/// # Errors
///
/// Returns an error if a slug to decode is malformed.
pub(crate) fn run_slug(command: SlugCommands) -> anyhow::Result<()> {
    match command {
        SlugCommands::Encode { brand, size, kind } => {
            println!("{}", codec::encode(&CanonicalProduct::new(&brand, size, kind)));
        }
        SlugCommands::Decode { slug } => {
            let product = codec::decode(&slug)
                .ok_or_else(|| anyhow::anyhow!("'{slug}' is not a product slug"))?;
            let decoded = DecodedSlug {
                name: product.display_name(),
                slug: codec::encode(&product),
                product: &product,
            };
            println!("{}", serde_json::to_string_pretty(&decoded)?);
        }
    }
    Ok(())
}
