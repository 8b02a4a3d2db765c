/// Typed column storage.
///
/// A Column is a named, homogeneously-typed, ordered sequence of scalars.
/// Storage is one `Vec<T>` per primitive type behind a tagged union, so the
/// declared type and the element type can never diverge; heterogeneous data
/// is rejected at construction and at every append.
///
/// Slicing, gathering, and filtering all produce brand-new owned columns and
/// never mutate their receiver. The only in-place bulk operation is
/// [`Column::concatenate`], which leaves its argument unmodified.

use crate::error::{Error, Result};
use crate::value::{PrimitiveType, Value};
use std::fmt;

/// Comparison anchor for [`Column::filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Equal,
    Greater,
    GreaterEq,
    Lesser,
    LesserEq,
}

/// The underlying typed storage of a column: exactly one vector, whose
/// element type is the column's declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    String(Vec<String>),
    Int(Vec<i32>),
    Int64(Vec<i64>),
    Float64(Vec<f64>),
}

impl ColumnData {
    fn empty(dtype: PrimitiveType) -> Self {
        match dtype {
            PrimitiveType::String => ColumnData::String(Vec::new()),
            PrimitiveType::Int => ColumnData::Int(Vec::new()),
            PrimitiveType::Int64 => ColumnData::Int64(Vec::new()),
            PrimitiveType::Float64 => ColumnData::Float64(Vec::new()),
        }
    }

    fn dtype(&self) -> PrimitiveType {
        match self {
            ColumnData::String(_) => PrimitiveType::String,
            ColumnData::Int(_) => PrimitiveType::Int,
            ColumnData::Int64(_) => PrimitiveType::Int64,
            ColumnData::Float64(_) => PrimitiveType::Float64,
        }
    }

    fn len(&self) -> usize {
        match self {
            ColumnData::String(v) => v.len(),
            ColumnData::Int(v) => v.len(),
            ColumnData::Int64(v) => v.len(),
            ColumnData::Float64(v) => v.len(),
        }
    }
}

/// A named, single-type ordered sequence of scalar values.
#[derive(Clone)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Create an empty column of the given type.
    pub fn new(name: String, dtype: PrimitiveType) -> Self {
        Column {
            name,
            data: ColumnData::empty(dtype),
        }
    }

    /// Create a column from existing typed data. The declared type is the
    /// data's element type, so a mismatched construction cannot be expressed.
    pub fn with_data(name: String, data: ColumnData) -> Self {
        Column { name, data }
    }

    pub fn from_strings(name: String, data: Vec<String>) -> Self {
        Column::with_data(name, ColumnData::String(data))
    }

    pub fn from_ints(name: String, data: Vec<i32>) -> Self {
        Column::with_data(name, ColumnData::Int(data))
    }

    pub fn from_int64s(name: String, data: Vec<i64>) -> Self {
        Column::with_data(name, ColumnData::Int64(data))
    }

    pub fn from_floats(name: String, data: Vec<f64>) -> Self {
        Column::with_data(name, ColumnData::Float64(data))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> PrimitiveType {
        self.data.dtype()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a single value. Fails with [`Error::WrongType`] if the value's
    /// primitive type does not match the column's; the column is unmodified
    /// on failure. Storage order is insertion order.
    pub fn append(&mut self, value: Value) -> Result<()> {
        let expected = self.dtype();
        match (&mut self.data, value) {
            (ColumnData::String(v), Value::String(s)) => v.push(s),
            (ColumnData::Int(v), Value::Int(x)) => v.push(x),
            (ColumnData::Int64(v), Value::Int64(x)) => v.push(x),
            (ColumnData::Float64(v), Value::Float64(x)) => v.push(x),
            (_, value) => {
                return Err(Error::WrongType {
                    expected,
                    given: value.dtype(),
                })
            }
        }
        Ok(())
    }

    /// Parse `raw` according to the column's type and append the result.
    /// On parse failure the column is not mutated.
    pub fn append_from_string(&mut self, raw: &str) -> Result<()> {
        match &mut self.data {
            ColumnData::String(v) => v.push(raw.to_string()),
            ColumnData::Int(v) => v.push(raw.parse::<i32>().map_err(|e| Error::Parse {
                raw: raw.to_string(),
                target: PrimitiveType::Int,
                source: e.into(),
            })?),
            ColumnData::Int64(v) => v.push(raw.parse::<i64>().map_err(|e| Error::Parse {
                raw: raw.to_string(),
                target: PrimitiveType::Int64,
                source: e.into(),
            })?),
            ColumnData::Float64(v) => v.push(raw.parse::<f64>().map_err(|e| Error::Parse {
                raw: raw.to_string(),
                target: PrimitiveType::Float64,
                source: e.into(),
            })?),
        }
        Ok(())
    }

    /// Bounds-checked access; returns the element at `ndx` boxed as a
    /// [`Value`].
    pub fn value(&self, ndx: usize) -> Result<Value> {
        self.check_bounds(ndx)?;
        let value = match &self.data {
            ColumnData::String(v) => Value::String(v[ndx].clone()),
            ColumnData::Int(v) => Value::Int(v[ndx]),
            ColumnData::Int64(v) => Value::Int64(v[ndx]),
            ColumnData::Float64(v) => Value::Float64(v[ndx]),
        };
        Ok(value)
    }

    /// Return a new column of the same name and type holding elements
    /// `[start, stop)`. Out-of-range bounds fail with
    /// [`Error::IndexOutOfBounds`]; the same policy applies to
    /// [`Column::indices`] and [`Column::filter`].
    pub fn slice(&self, start: usize, stop: usize) -> Result<Column> {
        if start > stop || stop > self.len() {
            return Err(Error::IndexOutOfBounds {
                column: self.name.clone(),
                index: if start > stop { start } else { stop },
                max_index: self.len().checked_sub(1),
            });
        }
        let data = match &self.data {
            ColumnData::String(v) => ColumnData::String(v[start..stop].to_vec()),
            ColumnData::Int(v) => ColumnData::Int(v[start..stop].to_vec()),
            ColumnData::Int64(v) => ColumnData::Int64(v[start..stop].to_vec()),
            ColumnData::Float64(v) => ColumnData::Float64(v[start..stop].to_vec()),
        };
        Ok(Column::with_data(self.name.clone(), data))
    }

    /// Gather elements at each position in `index_list`, preserving the
    /// list's order. Fails at the first invalid position with no partial
    /// column returned.
    pub fn indices(&self, index_list: &[usize]) -> Result<Column> {
        for &ndx in index_list {
            self.check_bounds(ndx)?;
        }
        let data = match &self.data {
            ColumnData::String(v) => {
                ColumnData::String(index_list.iter().map(|&i| v[i].clone()).collect())
            }
            ColumnData::Int(v) => ColumnData::Int(index_list.iter().map(|&i| v[i]).collect()),
            ColumnData::Int64(v) => ColumnData::Int64(index_list.iter().map(|&i| v[i]).collect()),
            ColumnData::Float64(v) => {
                ColumnData::Float64(index_list.iter().map(|&i| v[i]).collect())
            }
        };
        Ok(Column::with_data(self.name.clone(), data))
    }

    /// First index holding an element equal to `value`, or `None`.
    /// Fails with [`Error::WrongType`] if the probe value's type does not
    /// match the column's.
    pub fn first_index_of(&self, value: &Value) -> Result<Option<usize>> {
        match (&self.data, value) {
            (ColumnData::String(v), Value::String(x)) => Ok(v.iter().position(|e| e == x)),
            (ColumnData::Int(v), Value::Int(x)) => Ok(v.iter().position(|e| e == x)),
            (ColumnData::Int64(v), Value::Int64(x)) => Ok(v.iter().position(|e| e == x)),
            (ColumnData::Float64(v), Value::Float64(x)) => Ok(v.iter().position(|e| e == x)),
            _ => Err(Error::WrongType {
                expected: self.dtype(),
                given: value.dtype(),
            }),
        }
    }

    /// Position-anchored filter: locates the *first* element equal to
    /// `value` and returns the contiguous range of the column relative to
    /// that position. This is not a predicate scan; it assumes the column is
    /// sorted, or that the caller only cares about the first match. With
    /// anchor index `i` and length `n` the returned ranges are:
    ///
    /// | op        | range       |
    /// |-----------|-------------|
    /// | Equal     | `[i, i+1)`  |
    /// | Greater   | `[i+1, n)`  |
    /// | GreaterEq | `[i, n)`    |
    /// | Lesser    | `[0, i)`    |
    /// | LesserEq  | `[0, i+1)`  |
    pub fn filter(&self, op: FilterOp, value: &Value) -> Result<Column> {
        let ndx = self
            .first_index_of(value)?
            .ok_or_else(|| Error::ValueNotFound {
                column: self.name.clone(),
            })?;
        let (start, stop) = filter_bounds(op, ndx, self.len());
        self.slice(start, stop)
    }

    /// Append every element of `other` to this column, in order. Fails with
    /// [`Error::ConcatMismatch`] unless the names and types agree; `other`
    /// is never modified.
    pub fn concatenate(&mut self, other: &Column) -> Result<()> {
        if self.name != other.name {
            return Err(self.concat_mismatch(other));
        }
        match (&mut self.data, &other.data) {
            (ColumnData::String(a), ColumnData::String(b)) => a.extend(b.iter().cloned()),
            (ColumnData::Int(a), ColumnData::Int(b)) => a.extend_from_slice(b),
            (ColumnData::Int64(a), ColumnData::Int64(b)) => a.extend_from_slice(b),
            (ColumnData::Float64(a), ColumnData::Float64(b)) => a.extend_from_slice(b),
            _ => return Err(self.concat_mismatch(other)),
        }
        Ok(())
    }

    fn concat_mismatch(&self, other: &Column) -> Error {
        Error::ConcatMismatch {
            name: self.name.clone(),
            column_type: self.dtype(),
            other_name: other.name.clone(),
            other_type: other.dtype(),
        }
    }

    /// Arithmetic mean over all elements cast to `f64`.
    pub fn mean(&self) -> Result<f64> {
        self.check_numeric("mean")?;
        let mut sum = 0.0;
        self.fold_numeric(|x| sum += x);
        Ok(sum / self.len() as f64)
    }

    /// Population standard deviation: `sqrt(sum((x - mean)^2) / n)`.
    pub fn std_dev(&self) -> Result<f64> {
        self.check_numeric("standard deviation")?;
        let mean = self.mean()?;
        let mut sum_sq = 0.0;
        self.fold_numeric(|x| sum_sq += (x - mean) * (x - mean));
        Ok((sum_sq / self.len() as f64).sqrt())
    }

    fn check_numeric(&self, operation: &'static str) -> Result<()> {
        if !self.dtype().is_numeric() {
            return Err(Error::NotNumeric {
                column: self.name.clone(),
                operation,
            });
        }
        if self.is_empty() {
            return Err(Error::EmptyColumn {
                column: self.name.clone(),
                operation,
            });
        }
        Ok(())
    }

    /// Feed every element, widened to `f64`, into `f`. String columns feed
    /// nothing; callers go through `check_numeric` first.
    fn fold_numeric<F: FnMut(f64)>(&self, mut f: F) {
        match &self.data {
            ColumnData::String(_) => {}
            ColumnData::Int(v) => v.iter().for_each(|&x| f(x as f64)),
            ColumnData::Int64(v) => v.iter().for_each(|&x| f(x as f64)),
            ColumnData::Float64(v) => v.iter().for_each(|&x| f(x)),
        }
    }

    /// The full underlying sequence as an owned copy, preserving the
    /// no-aliasing invariant. Fails with [`Error::WrongColumnType`] if the
    /// column's declared type is not `String`.
    pub fn as_string_slice(&self) -> Result<Vec<String>> {
        match &self.data {
            ColumnData::String(v) => Ok(v.clone()),
            _ => Err(self.wrong_column_type(PrimitiveType::String)),
        }
    }

    pub fn as_int_slice(&self) -> Result<Vec<i32>> {
        match &self.data {
            ColumnData::Int(v) => Ok(v.clone()),
            _ => Err(self.wrong_column_type(PrimitiveType::Int)),
        }
    }

    pub fn as_int64_slice(&self) -> Result<Vec<i64>> {
        match &self.data {
            ColumnData::Int64(v) => Ok(v.clone()),
            _ => Err(self.wrong_column_type(PrimitiveType::Int64)),
        }
    }

    pub fn as_float_slice(&self) -> Result<Vec<f64>> {
        match &self.data {
            ColumnData::Float64(v) => Ok(v.clone()),
            _ => Err(self.wrong_column_type(PrimitiveType::Float64)),
        }
    }

    fn wrong_column_type(&self, requested: PrimitiveType) -> Error {
        Error::WrongColumnType {
            column: self.name.clone(),
            requested,
            actual: self.dtype(),
        }
    }

    fn check_bounds(&self, ndx: usize) -> Result<()> {
        if ndx >= self.len() {
            return Err(Error::IndexOutOfBounds {
                column: self.name.clone(),
                index: ndx,
                max_index: self.len().checked_sub(1),
            });
        }
        Ok(())
    }

    pub fn iter(&self) -> ColumnIterator<'_> {
        ColumnIterator {
            column: self,
            index: 0,
        }
    }
}

/// Half-open `[start, stop)` range for a position-anchored filter with
/// anchor `ndx` in a column of length `len`.
fn filter_bounds(op: FilterOp, ndx: usize, len: usize) -> (usize, usize) {
    match op {
        FilterOp::Equal => (ndx, ndx + 1),
        FilterOp::Greater => (ndx + 1, len),
        FilterOp::GreaterEq => (ndx, len),
        FilterOp::Lesser => (0, ndx),
        FilterOp::LesserEq => (0, ndx + 1),
    }
}

pub struct ColumnIterator<'a> {
    column: &'a Column,
    index: usize,
}

impl<'a> Iterator for ColumnIterator<'a> {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.column.len() {
            None
        } else {
            let result = self.column.value(self.index).ok();
            self.index += 1;
            result
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Column {{ name: '{}', type: {}, len: {} }}",
            self.name,
            self.dtype(),
            self.len()
        )
    }
}
