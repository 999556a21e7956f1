mod columns;
mod feeds;
mod group;
mod slug;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::feeds::FeedReader;
use crate::slug::SlugCommands;

#[derive(Debug, Parser)]
#[command(name = "butterbook")]
#[command(about = "Group butter listings across stores and inspect product slugs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Group product records into comparable line items
    Group {
        /// Product feed files (JSON array, paginated page, or products envelope)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Order groups by brand, then size
        #[arg(long)]
        sort: bool,

        /// Give every record without a known size its own group
        #[arg(long)]
        per_record: bool,

        /// Origin for relative image paths (defaults to `BUTTERBOOK_BASE_ORIGIN`)
        #[arg(long)]
        origin: Option<String>,
    },
    /// Resolve the display image of every record
    Image {
        /// Product feed files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Origin for relative image paths (defaults to `BUTTERBOOK_BASE_ORIGIN`)
        #[arg(long)]
        origin: Option<String>,
    },
    /// Encode or decode product slugs
    Slug {
        #[command(subcommand)]
        command: SlugCommands,
    },
    /// Show the store columns of the comparison table
    Columns {
        /// Store feed file
        stores: PathBuf,

        /// Product feed to fill the table with per-store prices
        #[arg(long)]
        products: Option<PathBuf>,

        /// Columns shown while collapsed (defaults to `BUTTERBOOK_MAX_COLUMNS`)
        #[arg(long)]
        max: Option<usize>,

        /// Show every store column
        #[arg(long)]
        expanded: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = butterbook_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, base_origin = %config.base_origin, "config loaded");

    let reader = FeedReader::default();
    let origin_or_default =
        |origin: Option<String>| origin.unwrap_or_else(|| config.base_origin.clone());

    match cli.command {
        Some(Commands::Group {
            files,
            sort,
            per_record,
            origin,
        }) => {
            let origin = origin_or_default(origin);
            group::run_group(&reader, &files, sort, per_record, &origin).await?;
        }
        Some(Commands::Image { files, origin }) => {
            let origin = origin_or_default(origin);
            group::run_image(&reader, &files, &origin).await?;
        }
        Some(Commands::Slug { command }) => slug::run_slug(command)?,
        Some(Commands::Columns {
            stores,
            products,
            max,
            expanded,
        }) => {
            let max_columns = max.unwrap_or(config.max_columns);
            columns::run_columns(&reader, &stores, products.as_deref(), max_columns, expanded)
                .await?;
        }
        None => Cli::command().print_help()?,
    }

    Ok(())
}
