use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::coerce::json_number;
use crate::error::{TableError, TableResult};

/// Category names used by the stock analyzer, in column order.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["SUV", "Sedan", "Hatchback"];

/// One entity (salesperson): an opaque display label plus one value per category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SalesRow {
    pub label: String,
    pub values: Vec<f64>,
}

impl SalesRow {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Ordered rows sharing a fixed number of numeric value columns.
///
/// The width of every row is checked on insertion, so transforms can index value columns
/// without re-validating.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SalesTable {
    category_count: usize,
    rows: Vec<SalesRow>,
}

impl SalesTable {
    pub fn new(category_count: usize) -> TableResult<Self> {
        if category_count == 0 {
            return Err(TableError::EmptyCategories);
        }
        Ok(Self {
            category_count,
            rows: Vec::new(),
        })
    }

    pub fn from_rows(
        category_count: usize,
        rows: impl IntoIterator<Item = SalesRow>,
    ) -> TableResult<Self> {
        let mut table = Self::new(category_count)?;
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Build a table from loosely typed cells, as handed over by a data grid widget.
    ///
    /// The first cell of each row is the label; every remaining cell must coerce to a number.
    pub fn from_grid(rows: &[Vec<JsonValue>], category_count: usize) -> TableResult<Self> {
        let mut table = Self::new(category_count)?;
        for (row_idx, cells) in rows.iter().enumerate() {
            let Some((label_cell, value_cells)) = cells.split_first() else {
                return Err(TableError::MissingLabel { row: row_idx });
            };
            let label = match label_cell {
                JsonValue::String(s) => s.clone(),
                JsonValue::Number(n) => n.to_string(),
                JsonValue::Bool(b) => b.to_string(),
                JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => {
                    return Err(TableError::MissingLabel { row: row_idx })
                }
            };
            if value_cells.len() != category_count {
                return Err(TableError::RowWidthMismatch {
                    row: row_idx,
                    label,
                    expected: category_count,
                    actual: value_cells.len(),
                });
            }

            let values = value_cells
                .iter()
                .enumerate()
                .map(|(col_idx, cell)| {
                    json_number(cell).ok_or_else(|| TableError::NonNumericCell {
                        row: row_idx,
                        column: col_idx + 1,
                        value: cell.to_string(),
                    })
                })
                .collect::<TableResult<Vec<f64>>>()?;
            table.push_row(SalesRow { label, values })?;
        }

        log::debug!(
            "loaded table from grid: {} rows x {} categories",
            table.len(),
            category_count
        );
        Ok(table)
    }

    /// Inverse of [`SalesTable::from_grid`].
    pub fn to_grid(&self) -> Vec<Vec<JsonValue>> {
        self.rows
            .iter()
            .map(|row| {
                let mut cells = Vec::with_capacity(row.values.len() + 1);
                cells.push(JsonValue::String(row.label.clone()));
                cells.extend(row.values.iter().map(|v| number_cell(*v)));
                cells
            })
            .collect()
    }

    pub fn push_row(&mut self, row: SalesRow) -> TableResult<()> {
        let row_idx = self.rows.len();
        if row.values.len() != self.category_count {
            return Err(TableError::RowWidthMismatch {
                row: row_idx,
                label: row.label,
                expected: self.category_count,
                actual: row.values.len(),
            });
        }
        if let Some(col_idx) = row.values.iter().position(|v| !v.is_finite()) {
            return Err(TableError::NonNumericCell {
                row: row_idx,
                column: col_idx + 1,
                value: row.values[col_idx].to_string(),
            });
        }

        self.rows.push(row);
        Ok(())
    }

    pub fn category_count(&self) -> usize {
        self.category_count
    }

    pub fn rows(&self) -> &[SalesRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// Integral values go back out as JSON integers so a grid round trip keeps `5` rather than `5.0`.
fn number_cell(value: f64) -> JsonValue {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        JsonValue::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null)
    }
}

/// Ordered category names labeling the value columns of a [`SalesTable`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet(Vec<String>);

impl CategorySet {
    pub fn new(names: Vec<impl Into<String>>) -> TableResult<Self> {
        if names.is_empty() {
            return Err(TableError::EmptyCategories);
        }
        Ok(Self(names.into_iter().map(Into::into).collect()))
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self(DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect())
    }
}
