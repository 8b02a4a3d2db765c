/// Error taxonomy for ferroframe.
///
/// Every fallible operation in the crate returns one of these variants by
/// value. Failures are deterministic (the data is already resident), so there
/// is no retry machinery and nothing is swallowed internally; each variant
/// carries enough context (column name, index, expected/actual type) to build
/// a precise message for the caller.

use crate::value::PrimitiveType;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A value's primitive type does not match the type expected by a column
    /// or accessor.
    #[error("wrong type: expected {expected}, given {given}")]
    WrongType {
        expected: PrimitiveType,
        given: PrimitiveType,
    },

    /// A typed bulk extraction was requested from a column of a different
    /// declared type.
    #[error("column '{column}' is of type {actual}, not {requested}")]
    WrongColumnType {
        column: String,
        requested: PrimitiveType,
        actual: PrimitiveType,
    },

    /// A type name outside the closed {string, int, int64, float64} set.
    #[error("unsupported column type '{name}'")]
    UnsupportedType { name: String },

    #[error("table has no column named '{column}'")]
    MissingColumn { column: String },

    /// A column's length disagrees with the table's established row count.
    #[error("column '{column}' has {found} rows, but the table requires {expected}")]
    RowCountMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("column '{column}' already exists in the table")]
    ColumnAlreadyExists { column: String },

    /// Positional access outside `[0, max_index]`. `max_index` is `None` for
    /// an empty column, where no index is valid.
    #[error("index {index} is out of bounds for column '{column}' (max index {})",
            .max_index.map(|m| m.to_string()).unwrap_or_else(|| String::from("none, column is empty")))]
    IndexOutOfBounds {
        column: String,
        index: usize,
        max_index: Option<usize>,
    },

    /// String-to-typed-value conversion failure. The column is left
    /// unmodified when this is returned from an append.
    #[error("cannot parse '{raw}' as {target}")]
    Parse {
        raw: String,
        target: PrimitiveType,
        #[source]
        source: ParseSource,
    },

    #[error("column '{column}' is empty, cannot compute {operation}")]
    EmptyColumn { column: String, operation: &'static str },

    #[error("column '{column}' is not numeric, cannot compute {operation}")]
    NotNumeric { column: String, operation: &'static str },

    /// A position-anchored filter found no element equal to its probe value.
    #[error("value not found in column '{column}'")]
    ValueNotFound { column: String },

    /// Two columns could not be concatenated because their names or types
    /// disagree.
    #[error("cannot concatenate column '{other_name}' ({other_type}) onto '{name}' ({column_type})")]
    ConcatMismatch {
        name: String,
        column_type: PrimitiveType,
        other_name: String,
        other_type: PrimitiveType,
    },

    /// A CSV data record failed to ingest; `row` is zero-based over the data
    /// rows (the header, when present, is not counted).
    #[error("csv row {row}: {source}")]
    CsvRecord {
        row: usize,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A row could not be materialized into the caller's record type.
    #[error("cannot map row into target struct: {reason}")]
    RowMapping { reason: String },

    /// Schema construction or reordering failure.
    #[error("invalid schema: {reason}")]
    SchemaMismatch { reason: String },
}

/// Underlying numeric parse failure wrapped by [`Error::Parse`].
#[derive(Debug, Error)]
pub enum ParseSource {
    #[error(transparent)]
    Int(#[from] ParseIntError),
    #[error(transparent)]
    Float(#[from] ParseFloatError),
}

pub type Result<T> = std::result::Result<T, Error>;
