//! Sales table model and aggregate transforms for the Car Sales Analyzer.
//!
//! The crate covers:
//! - A typed table of salespeople (`label` + one value per vehicle category).
//! - Synthetic data generation.
//! - Pure transforms: per-entity totals, per-category totals, ranking and threshold filtering.
//! - Boundary coercion and display shaping for a UI that works with loosely typed grids.
//!
//! No transform holds state. The caller owns the current table and passes it in on every call.

#![forbid(unsafe_code)]

mod coerce;
mod config;
pub mod display;
mod error;
mod generate;
mod table;
mod transforms;

pub use crate::coerce::{json_number, parse_count, parse_threshold};
pub use crate::config::{AnalyzerConfig, ConfigError};
pub use crate::display::DisplayTable;
pub use crate::error::{ErrorKind, TableError, TableResult};
pub use crate::generate::{generate, generate_with_rng, DEFAULT_MAX_COUNT, MAX_UNITS};
pub use crate::table::{CategorySet, SalesRow, SalesTable, DEFAULT_CATEGORIES};
pub use crate::transforms::{
    category_totals, entity_totals, filter_above_threshold, rank, CategoryTotal, EntityTotal,
    FilterOutcome, RankedEntity,
};
