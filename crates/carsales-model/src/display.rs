//! Shaping of tables and derived results into header + string-cell grids for rendering.

use serde::Serialize;

use crate::error::{TableError, TableResult};
use crate::table::{CategorySet, SalesTable};
use crate::transforms::{CategoryTotal, EntityTotal, FilterOutcome, RankedEntity};

pub const ENTITY_HEADER: &str = "Salesperson";
pub const CATEGORY_HEADER: &str = "Category";
pub const RANK_HEADER: &str = "Rank";
pub const TOTAL_HEADER: &str = "Total Units";

/// Label shown in place of rows when a filter keeps nothing.
pub const NO_RESULTS_LABEL: &str = "No results";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisplayTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DisplayTable {
    fn new(headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }
}

pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid rendering `-0`.
        return "0".to_string();
    }
    value.to_string()
}

pub fn base_table(table: &SalesTable, categories: &CategorySet) -> TableResult<DisplayTable> {
    if categories.len() != table.category_count() {
        return Err(TableError::CategoryCountMismatch {
            expected: table.category_count(),
            actual: categories.len(),
        });
    }

    let mut headers = Vec::with_capacity(categories.len() + 1);
    headers.push(ENTITY_HEADER.to_string());
    headers.extend(categories.names().iter().cloned());

    let rows = table
        .rows()
        .iter()
        .map(|row| {
            std::iter::once(row.label.clone())
                .chain(row.values.iter().map(|v| format_number(*v)))
                .collect()
        })
        .collect();
    Ok(DisplayTable { headers, rows })
}

pub fn entity_totals(totals: &[EntityTotal]) -> DisplayTable {
    DisplayTable::new(&[ENTITY_HEADER, TOTAL_HEADER], entity_rows(totals))
}

pub fn category_totals(totals: &[CategoryTotal]) -> DisplayTable {
    let rows = totals
        .iter()
        .map(|c| vec![c.category.clone(), format_number(c.total)])
        .collect();
    DisplayTable::new(&[CATEGORY_HEADER, TOTAL_HEADER], rows)
}

pub fn ranking(ranked: &[RankedEntity]) -> DisplayTable {
    let rows = ranked
        .iter()
        .map(|r| vec![r.rank.to_string(), r.label.clone(), format_number(r.total)])
        .collect();
    DisplayTable::new(&[RANK_HEADER, ENTITY_HEADER, TOTAL_HEADER], rows)
}

pub fn filtered(outcome: &FilterOutcome) -> DisplayTable {
    let rows = match outcome {
        FilterOutcome::Empty => vec![vec![NO_RESULTS_LABEL.to_string(), String::new()]],
        FilterOutcome::Rows(rows) => entity_rows(rows),
    };
    DisplayTable::new(&[ENTITY_HEADER, TOTAL_HEADER], rows)
}

fn entity_rows(totals: &[EntityTotal]) -> Vec<Vec<String>> {
    totals
        .iter()
        .map(|e| vec![e.label.clone(), format_number(e.total)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn numbers_drop_trailing_zero_fraction() {
        assert_eq!(format_number(15.0), "15");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn empty_filter_renders_sentinel_row() {
        let table = filtered(&FilterOutcome::Empty);
        assert_eq!(table.headers, vec!["Salesperson", "Total Units"]);
        assert_eq!(table.rows, vec![vec!["No results".to_string(), String::new()]]);
    }

    #[test]
    fn base_table_headers_follow_categories() {
        let table = SalesTable::new(3).unwrap();
        let view = base_table(&table, &CategorySet::default()).unwrap();
        assert_eq!(view.headers, vec!["Salesperson", "SUV", "Sedan", "Hatchback"]);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn base_table_rejects_mismatched_categories() {
        let table = SalesTable::new(2).unwrap();
        assert_eq!(
            base_table(&table, &CategorySet::default()).unwrap_err(),
            TableError::CategoryCountMismatch {
                expected: 2,
                actual: 3
            }
        );
    }
}
