/// FerroFrame - In-Memory Columnar Table Library
///
/// Named, typed columns grouped into tables with a common row count, with
/// indexing, slicing, position-anchored filtering, concatenation, aggregate
/// statistics, and schema-driven CSV import/export. Storage is strictly
/// typed: each column holds exactly one primitive type, enforced at
/// construction and at every append.

pub mod column;
pub mod error;
pub mod io;
pub mod schema;
pub mod table;
pub mod value;

pub use column::{Column, ColumnData, ColumnIterator, FilterOp};
pub use error::{Error, Result};
pub use io::{from_csv_path, from_csv_reader};
pub use schema::{Schema, SchemaDef};
pub use table::Table;
pub use value::{PrimitiveType, Value};

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_complete_workflow() {
        // Ingest a small CSV of measurements.
        let csv_data = "\
station,reading,count
alpha,1.5,10
bravo,2.5,20
charlie,3.5,30
delta,4.5,40
";
        let mut schema = Schema::new();
        schema.add_column("station", PrimitiveType::String).unwrap();
        schema.add_column("reading", PrimitiveType::Float64).unwrap();
        schema.add_column("count", PrimitiveType::Int).unwrap();

        let table = from_csv_reader(csv_data.as_bytes(), &schema, true).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.names(), &["station", "reading", "count"]);

        // Aggregate statistics over a numeric column.
        let reading = table.column("reading").unwrap();
        assert_eq!(reading.mean().unwrap(), 3.0);
        assert!((reading.std_dev().unwrap() - 1.118034).abs() < 1e-6);

        // Position-anchored filtering on the sorted reading column.
        let upper = reading
            .filter(FilterOp::GreaterEq, &Value::Float64(2.5))
            .unwrap();
        assert_eq!(upper.as_float_slice().unwrap(), vec![2.5, 3.5, 4.5]);

        // Row selection across columns.
        let picked = table
            .select_for_indices(&["station", "count"], &[3, 0])
            .unwrap();
        assert_eq!(picked.get_string_value("station", 0).unwrap(), "delta");
        assert_eq!(picked.get_int_value("count", 1).unwrap(), 10);

        // Concatenate a second table of the same shape.
        let mut combined = table.slice(0, 2).unwrap();
        let tail = table.slice(2, 4).unwrap();
        combined.concatenate(&tail).unwrap();
        assert_eq!(combined.len(), 4);
        assert_eq!(
            combined.get_string_value("station", 3).unwrap(),
            "delta"
        );

        // Export comes back byte-for-byte ingestible.
        let mut out = Vec::new();
        combined.write_csv(&mut out).unwrap();
        let reparsed = from_csv_reader(out.as_slice(), &schema, true).unwrap();
        assert_eq!(reparsed.len(), 4);
        assert_eq!(reparsed.get_float_value("reading", 2).unwrap(), 3.5);
    }

    #[test]
    fn test_schema_built_table_is_appendable() {
        let mut schema = Schema::new();
        schema.add_column("id", PrimitiveType::Int64).unwrap();
        schema.add_column("label", PrimitiveType::String).unwrap();

        let mut table = schema.build_table().unwrap();
        table.append_from_string("id", "12").unwrap();
        table.append_from_string("label", "first").unwrap();
        table.validate().unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get_int64_value("id", 0).unwrap(), 12);
        assert_eq!(table.get_string_value("label", 0).unwrap(), "first");
    }
}
