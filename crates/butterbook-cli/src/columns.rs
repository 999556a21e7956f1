//! `columns` command: the store comparison table as fixed-width text.

use std::path::Path;

use butterbook_catalog::{cheapest_column, group_records, store_prices, ColumnWindow};
use butterbook_core::{RawProductRecord, Store};

use crate::feeds::FeedReader;

const NAME_WIDTH: usize = 34;
const CELL_WIDTH: usize = 12;

/// Renders the table header and one row per product group.
///
/// Only the window's visible stores get a column; a collapsed window with
/// more stores ends the header with `+N more`. The cheapest visible cell in
/// a row is starred.
pub(crate) fn render_table(
    stores: &[Store],
    records: &[RawProductRecord],
    window: &ColumnWindow,
) -> Vec<String> {
    let view = window.view(stores);

    let mut header = format!("{:<width$}", "PRODUCT", width = NAME_WIDTH);
    for store in view.visible {
        header.push_str(&cell(store.label()));
    }
    if view.has_overflow() {
        header.push_str(&format!("+{} more", view.overflow_count));
    }

    let mut lines = vec![header.trim_end().to_string()];
    for group in group_records(records) {
        let prices = store_prices(&group, stores);
        let visible = &prices[..view.visible.len()];
        let cheapest = cheapest_column(visible);

        let mut line = cell_with_width(&group.display_name(), NAME_WIDTH);
        for (column, price) in visible.iter().enumerate() {
            let text = match price {
                Some(price) if cheapest == Some(column) => format!("£{price:.2}*"),
                Some(price) => format!("£{price:.2}"),
                None => "-".to_string(),
            };
            line.push_str(&cell(&text));
        }
        lines.push(line.trim_end().to_string());
    }

    lines
}

fn cell(text: &str) -> String {
    cell_with_width(text, CELL_WIDTH)
}

/// Pads `text` to `width` characters, truncating so at least one space
/// separates it from the next column.
fn cell_with_width(text: &str, width: usize) -> String {
    let clipped: String = text.chars().take(width - 1).collect();
    format!("{clipped:<width$}")
}

/// Prints the comparison table for a store feed and, optionally, a product
/// feed. Both feeds are loaded concurrently.
///
/// # Errors
///
/// Returns an error if either feed cannot be loaded.
pub(crate) async fn run_columns(
    reader: &FeedReader,
    stores_path: &Path,
    products_path: Option<&Path>,
    max_columns: usize,
    expanded: bool,
) -> anyhow::Result<()> {
    let (stores, records) = match products_path {
        Some(products_path) => {
            let product_paths = [products_path];
            let (stores, records) = tokio::join!(
                reader.read_stores(stores_path),
                reader.read_records(&product_paths)
            );
            (stores?, records?)
        }
        None => (reader.read_stores(stores_path).await?, Vec::new()),
    };

    if stores.is_empty() {
        println!("no stores found in {}", stores_path.display());
        return Ok(());
    }

    let mut window = ColumnWindow::new(max_columns);
    if expanded {
        window.expand();
    }

    for line in render_table(&stores, &records, &window) {
        println!("{line}");
    }
    Ok(())
}
