//! Sparse benchmark result tables, persisted as CSV.
//!
//! Every table is keyed by an `attributes` column: one row per attribute
//! count (or composite key such as `"5 x 5"`), one column per measured
//! operation. Missing cells are empty strings. Tables are accumulated across
//! runs through [`update_csv`], which upserts a single cell and rewrites the
//! whole file, so repeated and partial benchmark runs extend one another
//! instead of clobbering earlier results.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::BenchError;

/// Name of the row key column every result table starts with.
pub const INDEX_COLUMN: &str = "attributes";

/// An in-memory result table: one header row plus data rows keyed by their
/// first cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// An empty table holding only the index header.
    pub fn new() -> Table {
        Table {
            headers: vec![INDEX_COLUMN.to_string()],
            rows: Vec::new(),
        }
    }

    /// Loads the table stored at `path`. A missing or empty file is not an
    /// error, it yields the empty table.
    pub fn load(path: &Path) -> Result<Table, BenchError> {
        if !path.exists() {
            return Ok(Table::new());
        }
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_reader(BufReader::new(file));
        let mut records: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            records.push(record?.iter().map(|cell| cell.to_string()).collect());
        }
        if records.is_empty() {
            return Ok(Table::new());
        }
        let headers = records.remove(0);
        Ok(Table { headers, rows: records })
    }

    /// Writes the whole table back to `path`.
    pub fn store(&self, path: &Path) -> Result<(), BenchError> {
        let file = File::create(path)?;
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Sets the cell at (`index`, `column`), appending the row and the column
    /// on demand. All other cells are left untouched.
    pub fn set(&mut self, index: &str, column: &str, value: &str) {
        let column = self.column_position(column);
        let row = self.row_position(index);
        let cells = &mut self.rows[row];
        if cells.len() <= column {
            cells.resize(column + 1, String::new());
        }
        cells[column] = value.to_string();
    }

    /// The cell at (`index`, `column`), if present and non-empty.
    pub fn get(&self, index: &str, column: &str) -> Option<&str> {
        let column = self.headers.iter().position(|header| header == column)?;
        self.find_row(index)?
            .get(column)
            .map(|cell| cell.as_str())
            .filter(|cell| !cell.is_empty())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// `(row key, value)` pairs of `column`, restricted to rows where both
    /// sides parse as numbers. This is the read path of the line charts: a
    /// table that never measured `column` yields an empty series.
    pub fn numeric_series(&self, column: &str) -> Vec<(f64, f64)> {
        let column = match self.headers.iter().position(|header| header == column) {
            Some(position) => position,
            None => return Vec::new(),
        };
        self.rows
            .iter()
            .filter_map(|row| {
                let x: f64 = row.first()?.parse().ok()?;
                let y: f64 = row.get(column)?.parse().ok()?;
                Some((x, y))
            })
            .collect()
    }

    /// `(column name, cell)` pairs of the row keyed `index`, skipping the
    /// index column and empty cells.
    pub fn row_cells(&self, index: &str) -> Vec<(String, String)> {
        match self.find_row(index) {
            Some(row) => self
                .headers
                .iter()
                .zip(row.iter())
                .skip(1)
                .filter(|(_, cell)| !cell.is_empty())
                .map(|(header, cell)| (header.clone(), cell.clone()))
                .collect(),
            None => Vec::new(),
        }
    }

    fn find_row(&self, index: &str) -> Option<&Vec<String>> {
        self.rows
            .iter()
            .find(|row| row.first().map(|cell| cell.as_str()) == Some(index))
    }

    /// Position of `column`, appending it to the header and padding every
    /// data row if it does not exist yet.
    fn column_position(&mut self, column: &str) -> usize {
        match self.headers.iter().position(|header| header == column) {
            Some(position) => position,
            None => {
                self.headers.push(column.to_string());
                let width = self.headers.len();
                for row in self.rows.iter_mut() {
                    row.resize(width, String::new());
                }
                width - 1
            }
        }
    }

    /// Position of the row keyed `index`, appending a padded row if it does
    /// not exist yet.
    fn row_position(&mut self, index: &str) -> usize {
        let found = self
            .rows
            .iter()
            .position(|row| row.first().map(|cell| cell.as_str()) == Some(index));
        match found {
            Some(position) => position,
            None => {
                let mut row = vec![index.to_string()];
                row.resize(self.headers.len(), String::new());
                self.rows.push(row);
                self.rows.len() - 1
            }
        }
    }
}

impl Default for Table {
    fn default() -> Table {
        Table::new()
    }
}

/// Upserts a single cell of the result table stored at `path`: loads the
/// table (a missing file starts empty), sets the cell at (`index`, `column`)
/// and writes the whole table back.
pub fn update_csv(path: &Path, index: &str, column: &str, value: &str) -> Result<(), BenchError> {
    let mut table = Table::load(path)?;
    table.set(index, column, value);
    table.store(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_table(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("abe_bench_{}_{}.csv", name, std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn upsert_creates_a_well_formed_table() {
        let path = temp_table("create");
        update_csv(&path, "5", "keygen", "0.012").unwrap();

        let table = Table::load(&path).unwrap();
        assert_eq!(table.headers(), &["attributes", "keygen"]);
        assert_eq!(table.rows(), &[vec!["5".to_string(), "0.012".to_string()]]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn accumulates_rows_and_columns() {
        let path = temp_table("accumulate");
        update_csv(&path, "5", "keygen", "0.012").unwrap();
        update_csv(&path, "5", "encrypt", "0.031").unwrap();
        update_csv(&path, "10", "keygen", "0.050").unwrap();

        let table = Table::load(&path).unwrap();
        assert_eq!(table.headers(), &["attributes", "keygen", "encrypt"]);
        assert_eq!(
            table.rows(),
            &[
                vec!["5".to_string(), "0.012".to_string(), "0.031".to_string()],
                vec!["10".to_string(), "0.050".to_string(), String::new()],
            ]
        );
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn last_write_wins_per_cell() {
        let path = temp_table("overwrite");
        update_csv(&path, "5", "keygen", "0.012").unwrap();
        update_csv(&path, "5", "keygen", "0.999").unwrap();

        let table = Table::load(&path).unwrap();
        assert_eq!(table.get("5", "keygen"), Some("0.999"));
        assert_eq!(table.rows().len(), 1);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn new_column_preserves_existing_cells() {
        let path = temp_table("new_column");
        update_csv(&path, "5", "keygen", "0.012").unwrap();
        update_csv(&path, "10", "keygen", "0.050").unwrap();
        update_csv(&path, "5", "decrypt", "0.200").unwrap();

        let table = Table::load(&path).unwrap();
        assert_eq!(table.get("5", "keygen"), Some("0.012"));
        assert_eq!(table.get("10", "keygen"), Some("0.050"));
        assert_eq!(table.get("10", "decrypt"), None);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn new_row_preserves_other_rows() {
        let path = temp_table("new_row");
        update_csv(&path, "5", "keygen", "0.012").unwrap();
        update_csv(&path, "5 x 5", "key merging", "0.001").unwrap();

        let table = Table::load(&path).unwrap();
        assert_eq!(table.get("5", "keygen"), Some("0.012"));
        assert_eq!(table.get("5 x 5", "key merging"), Some("0.001"));
        assert_eq!(table.get("5 x 5", "keygen"), None);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn upserts_are_idempotent() {
        let path = temp_table("idempotent");
        update_csv(&path, "5", "keygen", "0.012").unwrap();
        let once = fs::read_to_string(&path).unwrap();
        update_csv(&path, "5", "keygen", "0.012").unwrap();
        let twice = fs::read_to_string(&path).unwrap();

        assert_eq!(once, twice);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn numeric_series_skips_unparsable_rows() {
        let path = temp_table("series");
        update_csv(&path, "1", "keygen", "0.1").unwrap();
        update_csv(&path, "5", "keygen", "0.5").unwrap();
        update_csv(&path, "5 x 5", "keygen", "0.9").unwrap();
        update_csv(&path, "10", "encrypt", "0.2").unwrap();

        let table = Table::load(&path).unwrap();
        assert_eq!(table.numeric_series("keygen"), [(1.0, 0.1), (5.0, 0.5)]);
        assert!(table.numeric_series("missing").is_empty());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn row_cells_skips_empty_cells() {
        let path = temp_table("row_cells");
        update_csv(&path, "5", "single 1024", "2048").unwrap();
        update_csv(&path, "5", "hybrid 1024", "1500").unwrap();
        update_csv(&path, "10", "single 1024", "2100").unwrap();
        update_csv(&path, "10", "hybrid 2048", "2600").unwrap();

        let table = Table::load(&path).unwrap();
        assert_eq!(
            table.row_cells("10"),
            [
                ("single 1024".to_string(), "2100".to_string()),
                ("hybrid 2048".to_string(), "2600".to_string()),
            ]
        );
        assert!(table.row_cells("42").is_empty());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_loads_as_empty_table() {
        let path = temp_table("missing");
        let table = Table::load(&path).unwrap();
        assert_eq!(table.headers(), &[INDEX_COLUMN]);
        assert!(table.rows().is_empty());
    }
}
