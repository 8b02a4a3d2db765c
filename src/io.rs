/// CSV import and export.
///
/// Ingestion is schema-driven: the caller supplies a [`Schema`] mapping CSV
/// column positions to column names and types, each cell is parsed through
/// [`Table::append_from_string`], and the assembled table is validated
/// before it is returned. A failure anywhere drops the partially built
/// table; the caller never sees it.
///
/// File handles are plain scoped values, released on every exit path.

use crate::error::{Error, Result};
use crate::schema::Schema;
use crate::table::Table;
use log::debug;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Build a table by reading CSV from `reader`.
///
/// If `has_header` is true the first row is discarded; the schema alone
/// names the columns. A data record whose field count disagrees with the
/// schema fails with [`Error::CsvRecord`] naming the zero-based data row.
pub fn from_csv_reader<R: Read>(reader: R, schema: &Schema, has_header: bool) -> Result<Table> {
    let mut table = schema.build_table()?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .from_reader(reader);

    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        if record.len() != schema.len() {
            return Err(Error::CsvRecord {
                row,
                source: Box::new(Error::SchemaMismatch {
                    reason: format!(
                        "record has {} fields, schema expects {}",
                        record.len(),
                        schema.len()
                    ),
                }),
            });
        }
        for (ndx, field) in record.iter().enumerate() {
            let column_name = schema.column_from_index(ndx)?;
            table
                .append_from_string(column_name, field)
                .map_err(|e| Error::CsvRecord {
                    row,
                    source: Box::new(e),
                })?;
        }
    }

    table.validate()?;
    debug!(
        "ingested {} rows across {} columns from csv",
        table.len(),
        schema.len()
    );
    Ok(table)
}

/// Build a table from the CSV file at `path`.
pub fn from_csv_path<P: AsRef<Path>>(path: P, schema: &Schema, has_header: bool) -> Result<Table> {
    let file = File::open(path)?;
    from_csv_reader(file, schema, has_header)
}

impl Table {
    /// Write the table as CSV: a header row of [`Table::names`], then one
    /// record per row with each cell in its `Display` form.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.names())?;
        let mut record = Vec::with_capacity(self.names().len());
        for ndx in 0..self.len() {
            record.clear();
            for name in self.names() {
                record.push(self.value_at(name, ndx)?.to_string());
            }
            csv_writer.write_record(&record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Create (or truncate) the file at `path` and write the table to it.
    pub fn write_csv_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_csv(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use crate::value::PrimitiveType;
    use pretty_assertions::assert_eq;

    fn ab_schema() -> Schema {
        let mut schema = Schema::new();
        schema.add_column("a", PrimitiveType::Int).unwrap();
        schema.add_column("b", PrimitiveType::String).unwrap();
        schema
    }

    #[test]
    fn test_from_csv_with_header() {
        let csv_data = "a,b\n1,x\n2,y\n";
        let table = from_csv_reader(csv_data.as_bytes(), &ab_schema(), true).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get_int_value("a", 0).unwrap(), 1);
        assert_eq!(table.get_string_value("b", 1).unwrap(), "y");
    }

    #[test]
    fn test_from_csv_without_header() {
        let csv_data = "1,x\n2,y\n3,z\n";
        let table = from_csv_reader(csv_data.as_bytes(), &ab_schema(), false).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get_string_value("b", 2).unwrap(), "z");
    }

    #[test]
    fn test_from_csv_parse_failure_names_row() {
        let csv_data = "a,b\n1,x\nnope,y\n";
        match from_csv_reader(csv_data.as_bytes(), &ab_schema(), true) {
            Err(Error::CsvRecord { row, source }) => {
                assert_eq!(row, 1);
                assert!(matches!(*source, Error::Parse { .. }));
            }
            other => panic!("expected CsvRecord, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn test_from_csv_ragged_record() {
        let csv_data = "a,b\n1,x\n2,y,extra\n";
        match from_csv_reader(csv_data.as_bytes(), &ab_schema(), true) {
            Err(Error::CsvRecord { row, .. }) => assert_eq!(row, 1),
            other => panic!("expected CsvRecord, got {:?}", other.map(|t| t.len())),
        }

        let csv_data = "a,b\n1\n";
        assert!(matches!(
            from_csv_reader(csv_data.as_bytes(), &ab_schema(), true),
            Err(Error::CsvRecord { row: 0, .. })
        ));
    }

    #[test]
    fn test_from_csv_empty_input() {
        let table = from_csv_reader("a,b\n".as_bytes(), &ab_schema(), true).unwrap();
        assert_eq!(table.len(), 0);
        assert_eq!(table.names(), &["a", "b"]);
    }

    #[test]
    fn test_write_csv() {
        let mut table = Table::new();
        table
            .add_column(Column::from_ints("a".to_string(), vec![1, 2]))
            .unwrap();
        table
            .add_column(Column::from_strings(
                "b".to_string(),
                vec!["x".to_string(), "y".to_string()],
            ))
            .unwrap();

        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a,b\n1,x\n2,y\n");
    }

    #[test]
    fn test_write_csv_quotes_embedded_separators() {
        let mut table = Table::new();
        table
            .add_column(Column::from_strings(
                "b".to_string(),
                vec!["x,y".to_string()],
            ))
            .unwrap();

        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "b\n\"x,y\"\n");
    }

    #[test]
    fn test_csv_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.csv");

        let mut table = Table::new();
        table
            .add_column(Column::from_ints("a".to_string(), vec![1, 2, 3]))
            .unwrap();
        table
            .add_column(Column::from_floats(
                "c".to_string(),
                vec![1.5, 2.5, 3.5],
            ))
            .unwrap();
        table.write_csv_path(&path).unwrap();

        let mut schema = Schema::new();
        schema.add_column("a", PrimitiveType::Int).unwrap();
        schema.add_column("c", PrimitiveType::Float64).unwrap();
        let back = from_csv_path(&path, &schema, true).unwrap();

        assert_eq!(back.len(), 3);
        assert_eq!(back.get_int_value("a", 2).unwrap(), 3);
        assert_eq!(back.get_float_value("c", 0).unwrap(), 1.5);
    }

    #[test]
    fn test_from_csv_missing_file() {
        let schema = ab_schema();
        assert!(matches!(
            from_csv_path("/nonexistent/frame.csv", &schema, true),
            Err(Error::Io(_))
        ));
    }
}
