//! Synthetic sales data.
//!
//! Output is random, so callers and tests can only rely on its shape: `count` rows labeled
//! `Salesperson 1..=count`, each with one whole number in `0..=MAX_UNITS` per category. Use
//! [`generate_with_rng`] with a seeded generator for reproducible tables.

use rand::Rng;

use crate::error::{TableError, TableResult};
use crate::table::{CategorySet, SalesRow, SalesTable};

/// Largest number of units a single salesperson can sell in one category.
pub const MAX_UNITS: u32 = 20;

/// Upper bound on generated rows unless the caller configures another one.
pub const DEFAULT_MAX_COUNT: usize = 10_000;

/// Generate `count` salespeople over the default categories using the thread-local generator.
pub fn generate(count: usize) -> TableResult<SalesTable> {
    generate_with_rng(
        count,
        &CategorySet::default(),
        DEFAULT_MAX_COUNT,
        &mut rand::rng(),
    )
}

pub fn generate_with_rng<R: Rng>(
    count: usize,
    categories: &CategorySet,
    max_count: usize,
    rng: &mut R,
) -> TableResult<SalesTable> {
    if count == 0 {
        return Err(TableError::InvalidCount(count.to_string()));
    }
    if count > max_count {
        log::warn!("refusing to generate {count} rows (max {max_count})");
        return Err(TableError::CountTooLarge {
            count,
            max: max_count,
        });
    }

    let rows = (1..=count).map(|i| {
        let values = (0..categories.len())
            .map(|_| f64::from(rng.random_range(0..=MAX_UNITS)))
            .collect();
        SalesRow::new(format!("Salesperson {i}"), values)
    });
    let table = SalesTable::from_rows(categories.len(), rows)?;

    log::debug!(
        "generated {} salespeople across {} categories",
        table.len(),
        categories.len()
    );
    Ok(table)
}
