/// Table: an ordered collection of equal-length typed columns.
///
/// Columns live in a name-keyed map; a separate order list defines display
/// and iteration order. The two structures are kept consistent on every
/// mutation: the order list is always a duplicate-free permutation of the
/// map's key set.
///
/// A table has two effective states. It starts Empty (no columns, zero
/// rows); the first successful [`Table::add_column`] fixes the row count,
/// and every later add or bulk append must match it. Tables do not shrink
/// back to zero columns.
///
/// # Examples
///
/// ```
/// use ferroframe::{Column, Table};
///
/// let mut table = Table::new();
/// table
///     .add_column(Column::from_ints("id".to_string(), vec![1, 2, 3]))
///     .unwrap();
/// table
///     .add_column(Column::from_floats("score".to_string(), vec![9.5, 7.0, 8.25]))
///     .unwrap();
///
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.get_float_value("score", 1).unwrap(), 7.0);
/// assert_eq!(table.column("score").unwrap().mean().unwrap(), 8.25);
/// ```

use crate::column::Column;
use crate::error::{Error, Result};
use crate::value::{PrimitiveType, Value};
use log::debug;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;

/// An ordered collection of named, equal-length columns.
#[derive(Default)]
pub struct Table {
    columns: HashMap<String, Column>,
    column_order: Vec<String>,
    number_rows: usize,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Table {
            columns: HashMap::new(),
            column_order: Vec::new(),
            number_rows: 0,
        }
    }

    /// Number of rows shared by every column.
    pub fn len(&self) -> usize {
        self.number_rows
    }

    /// Alias for [`Table::len`], matching the row/column vocabulary.
    pub fn number_rows(&self) -> usize {
        self.number_rows
    }

    pub fn is_empty(&self) -> bool {
        self.number_rows == 0
    }

    /// Column names in display order.
    pub fn names(&self) -> &[String] {
        &self.column_order
    }

    /// Add a column, taking ownership. The first column fixes the table's
    /// row count; later columns must match it or the add fails with
    /// [`Error::RowCountMismatch`]. Duplicate names fail with
    /// [`Error::ColumnAlreadyExists`]. The table is unmodified on failure.
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        if self.columns.contains_key(column.name()) {
            return Err(Error::ColumnAlreadyExists {
                column: column.name().to_string(),
            });
        }
        if self.columns.is_empty() {
            self.number_rows = column.len();
        } else if column.len() != self.number_rows {
            return Err(Error::RowCountMismatch {
                column: column.name().to_string(),
                expected: self.number_rows,
                found: column.len(),
            });
        }
        self.column_order.push(column.name().to_string());
        self.columns.insert(column.name().to_string(), column);
        Ok(())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns.get(name).ok_or_else(|| Error::MissingColumn {
            column: name.to_string(),
        })
    }

    fn column_mut(&mut self, name: &str) -> Result<&mut Column> {
        self.columns
            .get_mut(name)
            .ok_or_else(|| Error::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Declared type of the named column.
    pub fn column_type(&self, name: &str) -> Result<PrimitiveType> {
        Ok(self.column(name)?.dtype())
    }

    /// The value at `ndx` in the named column.
    pub fn value_at(&self, column_name: &str, ndx: usize) -> Result<Value> {
        self.column(column_name)?.value(ndx)
    }

    pub fn get_string_value(&self, column_name: &str, ndx: usize) -> Result<String> {
        Ok(self.value_at(column_name, ndx)?.as_str()?.to_string())
    }

    pub fn get_int_value(&self, column_name: &str, ndx: usize) -> Result<i32> {
        self.value_at(column_name, ndx)?.as_int()
    }

    pub fn get_int64_value(&self, column_name: &str, ndx: usize) -> Result<i64> {
        self.value_at(column_name, ndx)?.as_int64()
    }

    pub fn get_float_value(&self, column_name: &str, ndx: usize) -> Result<f64> {
        self.value_at(column_name, ndx)?.as_float()
    }

    /// Append a typed value to one named column. The table-wide row count is
    /// only refreshed by [`Table::validate`], so interleave appends across
    /// all columns and validate when a whole row has been placed.
    pub fn append_to(&mut self, column_name: &str, value: Value) -> Result<()> {
        self.column_mut(column_name)?.append(value)
    }

    /// Parse `raw` against the named column's type and append it. This is
    /// the per-cell ingestion point used by the CSV reader.
    pub fn append_from_string(&mut self, column_name: &str, raw: &str) -> Result<()> {
        self.column_mut(column_name)?.append_from_string(raw)
    }

    /// Check that every column's length equals the table row count, adopting
    /// the common length first if the table has not established one. Used as
    /// a post-condition after bulk per-column appends.
    pub fn validate(&mut self) -> Result<()> {
        for name in &self.column_order {
            // column_order and columns are kept consistent, so the lookup
            // cannot miss.
            let len = self.columns[name].len();
            if self.number_rows == 0 {
                self.number_rows = len;
            }
            if len != self.number_rows {
                return Err(Error::RowCountMismatch {
                    column: name.clone(),
                    expected: self.number_rows,
                    found: len,
                });
            }
        }
        Ok(())
    }

    /// Slice every column to `[start, stop)` and reassemble a new table.
    /// Fails without producing a partial table if any column slice fails.
    pub fn slice(&self, start: usize, stop: usize) -> Result<Table> {
        let mut out = Table::new();
        for name in &self.column_order {
            let sliced = self.columns[name].slice(start, stop)?;
            out.add_column(sliced)?;
        }
        Ok(out)
    }

    /// Build a new table containing only the named columns, each gathered at
    /// `indices` in order.
    pub fn select_for_indices(&self, column_names: &[&str], indices: &[usize]) -> Result<Table> {
        let mut out = Table::new();
        for &name in column_names {
            let gathered = self.column(name)?.indices(indices)?;
            out.add_column(gathered)?;
        }
        Ok(out)
    }

    /// Append every row of `other` to this table, column by column. Both
    /// tables are checked column-for-column before anything is mutated, so a
    /// failed concatenate leaves the receiver untouched; `other` is never
    /// modified.
    pub fn concatenate(&mut self, other: &Table) -> Result<()> {
        // Validation pass: every receiver column must have a same-named,
        // same-typed counterpart in other.
        for name in &self.column_order {
            let ours = &self.columns[name];
            let theirs = other.column(name)?;
            if theirs.dtype() != ours.dtype() {
                return Err(Error::ConcatMismatch {
                    name: name.clone(),
                    column_type: ours.dtype(),
                    other_name: theirs.name().to_string(),
                    other_type: theirs.dtype(),
                });
            }
        }
        // Mutation pass: cannot fail after the checks above.
        let order = self.column_order.clone();
        for name in &order {
            let theirs = &other.columns[name];
            let ours = self.column_mut(name)?;
            ours.concatenate(theirs)?;
            self.number_rows = self.columns[name].len();
        }
        debug!(
            "concatenated {} rows onto table, now {} rows",
            other.number_rows, self.number_rows
        );
        Ok(())
    }

    /// The row at `ndx` as a name-to-value map.
    pub fn row_map(&self, ndx: usize) -> Result<HashMap<String, Value>> {
        if ndx >= self.number_rows {
            return Err(Error::IndexOutOfBounds {
                column: "<row>".to_string(),
                index: ndx,
                max_index: self.number_rows.checked_sub(1),
            });
        }
        let mut row = HashMap::new();
        for name in &self.column_order {
            row.insert(name.clone(), self.columns[name].value(ndx)?);
        }
        Ok(row)
    }

    /// Materialize the row at `ndx` into a caller struct via serde.
    ///
    /// Each struct field named after a table column receives that column's
    /// value for the row; columns the struct does not name are ignored.
    /// Fields with no matching column must carry `#[serde(default)]`. A
    /// value that cannot be coerced into the field's declared type fails
    /// with [`Error::RowMapping`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ferroframe::{Column, Table};
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Star {
    ///     name: String,
    ///     mass: f64,
    /// }
    ///
    /// let mut table = Table::new();
    /// table
    ///     .add_column(Column::from_strings(
    ///         "name".to_string(),
    ///         vec!["Sol".to_string()],
    ///     ))
    ///     .unwrap();
    /// table
    ///     .add_column(Column::from_floats("mass".to_string(), vec![1.0]))
    ///     .unwrap();
    ///
    /// let star: Star = table.map_row(0).unwrap();
    /// assert_eq!(star.name, "Sol");
    /// assert_eq!(star.mass, 1.0);
    /// ```
    pub fn map_row<T: DeserializeOwned>(&self, ndx: usize) -> Result<T> {
        let row = self.row_map(ndx)?;
        let mut object = serde_json::Map::with_capacity(row.len());
        for (name, value) in row {
            object.insert(name, value.to_json());
        }
        serde_json::from_value(serde_json::Value::Object(object)).map_err(|e| Error::RowMapping {
            reason: e.to_string(),
        })
    }

    pub fn iter_rows(&self) -> TableRowIterator<'_> {
        TableRowIterator {
            table: self,
            index: 0,
        }
    }
}

pub struct TableRowIterator<'a> {
    table: &'a Table,
    index: usize,
}

impl<'a> Iterator for TableRowIterator<'a> {
    type Item = HashMap<String, Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.table.number_rows {
            None
        } else {
            let result = self.table.row_map(self.index).ok();
            self.index += 1;
            result
        }
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Table {{ columns: {}, rows: {} }}",
            self.column_order.len(),
            self.number_rows
        )
    }
}
