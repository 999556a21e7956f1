//! Per-store price cells for the comparison table.

use butterbook_core::Store;

use crate::extract::extract_price;
use crate::group::ProductGroup;
use crate::stores::match_record_store;

/// Lowest price the group's members report at each store, aligned with
/// `stores`. Stores no member was priced at get `None`; members whose store
/// cannot be matched are left out.
#[must_use]
pub fn store_prices(group: &ProductGroup<'_>, stores: &[Store]) -> Vec<Option<f64>> {
    let mut cells: Vec<Option<f64>> = vec![None; stores.len()];

    for item in &group.items {
        let Some(price) = extract_price(item) else {
            continue;
        };
        let Some(store) = match_record_store(item, stores) else {
            tracing::trace!(key = %group.key, "price without a matching store");
            continue;
        };
        let Some(column) = stores.iter().position(|s| std::ptr::eq(s, store)) else {
            continue;
        };
        let cell = &mut cells[column];
        *cell = Some(cell.map_or(price, |current| current.min(price)));
    }

    cells
}

/// Index of the store with the lowest price in a row, first wins on ties.
#[must_use]
pub fn cheapest_column(cells: &[Option<f64>]) -> Option<usize> {
    cells
        .iter()
        .enumerate()
        .filter_map(|(i, cell)| cell.map(|price| (i, price)))
        .fold(None, |best: Option<(usize, f64)>, (i, price)| match best {
            Some((_, lowest)) if lowest <= price => best,
            _ => Some((i, price)),
        })
        .map(|(i, _)| i)
}
