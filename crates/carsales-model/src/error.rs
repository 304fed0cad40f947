pub type TableResult<T> = Result<T, TableError>;

/// Coarse classification of [`TableError`].
///
/// Every transform is a pure function of its arguments, so the only way one can fail is by being
/// handed something it cannot work with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("invalid count: {0:?} (expected a positive integer)")]
    InvalidCount(String),

    #[error("count {count} exceeds the maximum of {max}")]
    CountTooLarge { count: usize, max: usize },

    #[error("invalid threshold: {0:?} (expected a finite number)")]
    InvalidThreshold(String),

    #[error("row {row}, column {column}: {value} is not a number")]
    NonNumericCell {
        row: usize,
        column: usize,
        value: String,
    },

    #[error("row {row} ({label:?}): expected {expected} values, got {actual}")]
    RowWidthMismatch {
        row: usize,
        label: String,
        expected: usize,
        actual: usize,
    },

    #[error("category count mismatch: table has {expected} value columns, got {actual} category names")]
    CategoryCountMismatch { expected: usize, actual: usize },

    #[error("a table needs at least one category column")]
    EmptyCategories,

    #[error("row {row} has no label cell")]
    MissingLabel { row: usize },
}

impl TableError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TableError::InvalidCount(_)
            | TableError::CountTooLarge { .. }
            | TableError::InvalidThreshold(_)
            | TableError::NonNumericCell { .. }
            | TableError::RowWidthMismatch { .. }
            | TableError::CategoryCountMismatch { .. }
            | TableError::EmptyCategories
            | TableError::MissingLabel { .. } => ErrorKind::InvalidArgument,
        }
    }
}
