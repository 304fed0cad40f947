//! Aggregate views over a [`SalesTable`].
//!
//! Every function here borrows the base table and returns a freshly built result; the table is
//! never modified. Descending orderings use `sort_by`, which is stable, so entities with equal
//! totals keep their relative input order.

use std::cmp::Ordering;

use serde::Serialize;

use crate::error::{TableError, TableResult};
use crate::table::{CategorySet, SalesTable};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntityTotal {
    pub label: String,
    pub total: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedEntity {
    pub rank: usize,
    pub label: String,
    pub total: f64,
}

/// Result of [`filter_above_threshold`].
///
/// `Empty` is the "no results" state; it is not a row and carries no total.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum FilterOutcome {
    Empty,
    Rows(Vec<EntityTotal>),
}

impl FilterOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, FilterOutcome::Empty)
    }

    pub fn rows(&self) -> &[EntityTotal] {
        match self {
            FilterOutcome::Empty => &[],
            FilterOutcome::Rows(rows) => rows,
        }
    }
}

/// Row sums, in input order.
pub fn entity_totals(table: &SalesTable) -> Vec<EntityTotal> {
    table
        .rows()
        .iter()
        .map(|row| EntityTotal {
            label: row.label.clone(),
            total: row.total(),
        })
        .collect()
}

/// Column sums, labeled and ordered by `categories`.
pub fn category_totals(
    table: &SalesTable,
    categories: &CategorySet,
) -> TableResult<Vec<CategoryTotal>> {
    if categories.len() != table.category_count() {
        return Err(TableError::CategoryCountMismatch {
            expected: table.category_count(),
            actual: categories.len(),
        });
    }

    let mut sums = vec![0.0; table.category_count()];
    for row in table.rows() {
        for (sum, value) in sums.iter_mut().zip(&row.values) {
            *sum += value;
        }
    }

    Ok(categories
        .names()
        .iter()
        .zip(sums)
        .map(|(category, total)| CategoryTotal {
            category: category.clone(),
            total,
        })
        .collect())
}

/// Entities ordered by total, highest first, numbered `1..=N` with no shared ranks.
pub fn rank(table: &SalesTable) -> Vec<RankedEntity> {
    sorted_descending(entity_totals(table))
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| RankedEntity {
            rank: idx + 1,
            label: entry.label,
            total: entry.total,
        })
        .collect()
}

/// Entities whose total is strictly greater than `threshold`, highest first.
pub fn filter_above_threshold(table: &SalesTable, threshold: f64) -> TableResult<FilterOutcome> {
    if !threshold.is_finite() {
        return Err(TableError::InvalidThreshold(threshold.to_string()));
    }

    let kept: Vec<EntityTotal> = entity_totals(table)
        .into_iter()
        .filter(|entry| entry.total > threshold)
        .collect();
    if kept.is_empty() {
        return Ok(FilterOutcome::Empty);
    }
    Ok(FilterOutcome::Rows(sorted_descending(kept)))
}

fn sorted_descending(mut totals: Vec<EntityTotal>) -> Vec<EntityTotal> {
    totals.sort_by(|a, b| cmp_total_desc(a.total, b.total));
    totals
}

// Totals are finite, so `partial_cmp` never returns `None`. `-0.0` and `0.0` must compare equal.
fn cmp_total_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
