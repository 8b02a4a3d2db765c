/// Schema: an ordered list of (column name, primitive type) pairs.
///
/// The schema is a thin collaborator: it pre-allocates empty typed columns
/// for a new table and maps CSV column positions to column names. It holds
/// no data.

use crate::column::Column;
use crate::error::{Error, Result};
use crate::table::Table;
use crate::value::PrimitiveType;

/// A single schema entry, for bulk construction via [`Schema::from_defs`].
#[derive(Debug, Clone)]
pub struct SchemaDef {
    pub column_name: String,
    pub column_type: PrimitiveType,
}

#[derive(Debug, Clone, Default)]
pub struct Schema {
    column_order: Vec<String>,
    column_types: Vec<PrimitiveType>,
}

impl Schema {
    pub fn new() -> Self {
        Schema::default()
    }

    /// Build a schema from a list of definitions.
    pub fn from_defs(defs: &[SchemaDef]) -> Result<Self> {
        let mut schema = Schema::new();
        for def in defs {
            schema.add_column(&def.column_name, def.column_type)?;
        }
        Ok(schema)
    }

    /// Append a (name, type) pair. Duplicate names are rejected since they
    /// could not coexist in the table the schema describes.
    pub fn add_column(&mut self, column_name: &str, column_type: PrimitiveType) -> Result<()> {
        if self.column_order.iter().any(|n| n == column_name) {
            return Err(Error::SchemaMismatch {
                reason: format!("duplicate column name '{}'", column_name),
            });
        }
        self.column_order.push(column_name.to_string());
        self.column_types.push(column_type);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.column_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.column_order.is_empty()
    }

    /// Column names in order.
    pub fn names(&self) -> &[String] {
        &self.column_order
    }

    /// The column name at CSV position `ndx`.
    pub fn column_from_index(&self, ndx: usize) -> Result<&str> {
        self.column_order
            .get(ndx)
            .map(|s| s.as_str())
            .ok_or_else(|| Error::IndexOutOfBounds {
                column: "<schema>".to_string(),
                index: ndx,
                max_index: self.column_order.len().checked_sub(1),
            })
    }

    /// Replace the column ordering. `new_order` must be a permutation of the
    /// current names: same count, every existing name present exactly once.
    pub fn reorder_columns(&mut self, new_order: &[&str]) -> Result<()> {
        if new_order.len() != self.column_order.len() {
            return Err(Error::SchemaMismatch {
                reason: format!(
                    "expected new order to have {} entries, found {}",
                    self.column_order.len(),
                    new_order.len()
                ),
            });
        }
        let mut reordered_names = Vec::with_capacity(new_order.len());
        let mut reordered_types = Vec::with_capacity(new_order.len());
        for &name in new_order {
            match self.column_order.iter().position(|n| n == name) {
                Some(ndx) if !reordered_names.contains(&self.column_order[ndx]) => {
                    reordered_names.push(self.column_order[ndx].clone());
                    reordered_types.push(self.column_types[ndx]);
                }
                _ => {
                    return Err(Error::SchemaMismatch {
                        reason: format!("column '{}' does not exist exactly once", name),
                    })
                }
            }
        }
        self.column_order = reordered_names;
        self.column_types = reordered_types;
        Ok(())
    }

    /// Construct an empty table with one typed column per schema entry.
    pub fn build_table(&self) -> Result<Table> {
        let mut table = Table::new();
        for (name, &dtype) in self.column_order.iter().zip(self.column_types.iter()) {
            table.add_column(Column::new(name.clone(), dtype))?;
        }
        Ok(table)
    }
}
