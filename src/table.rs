use bitvec::prelude::*;

use crate::column::Column;
use crate::error::{Error, Result};
use crate::value::{Cell, NULL};

/// One row of a table. Always holds exactly one cell per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn get(&self, col_idx: usize) -> Option<&str> {
        self.cells.get(col_idx).map(|cell| &**cell)
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    pub name: Cell,
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table.
    ///
    /// # Errors
    /// Returns an error if no column is given, if there are more than
    /// `max_columns` columns or if a column name is repeated.
    pub fn new<S: AsRef<str>>(name: &str, column_names: &[S], max_columns: usize) -> Result<Self> {
        if column_names.is_empty() {
            return Err(Error::MissingColumns);
        }
        if column_names.len() > max_columns {
            return Err(Error::TooManyColumns {
                table: name.to_string(),
                max: max_columns,
            });
        }

        let mut columns: Vec<Column> = Vec::with_capacity(column_names.len());
        for column in column_names {
            let column = column.as_ref();
            if columns.iter().any(|c| &*c.name == column) {
                return Err(Error::DuplicateColumn {
                    table: name.to_string(),
                    column: column.to_string(),
                });
            }
            columns.push(Column::new(column.into()));
        }

        Ok(Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn get_row(&self, row_idx: usize) -> Option<&Row> {
        self.rows.get(row_idx)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| &*col.name == name)
    }

    /// Same as [Table::column_index] but a missing column is an error.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Appends a row, padding missing trailing cells with [NULL].
    ///
    /// # Errors
    /// Returns an error if there are more cells than columns. The table is
    /// left untouched in that case.
    pub fn insert(&mut self, mut cells: Vec<Cell>) -> Result<()> {
        if cells.len() > self.columns.len() {
            return Err(Error::RowTooWide {
                table: self.name.to_string(),
                values: cells.len(),
                columns: self.columns.len(),
            });
        }
        cells.resize(self.columns.len(), NULL.into());

        for (column, cell) in self.columns.iter_mut().zip(&cells) {
            column.widen(cell);
        }
        self.rows.push(Row { cells });
        Ok(())
    }

    /// Overwrites the given `(column, value)` pairs on every row set in `mask`.
    /// Returns how many rows were touched.
    pub fn update(&mut self, mask: &BitSlice, assignments: &[(usize, Cell)]) -> usize {
        if assignments.is_empty() || mask.not_any() {
            return 0;
        }
        for (col_idx, value) in assignments {
            self.columns[*col_idx].widen(value);
        }

        let mut updated = 0;
        for row_idx in mask.iter_ones() {
            let row = &mut self.rows[row_idx];
            for (col_idx, value) in assignments {
                row.cells[*col_idx] = value.clone();
            }
            updated += 1;
        }
        updated
    }

    /// Removes every row set in `mask`, keeping the others in order.
    /// Returns how many rows were removed.
    pub fn delete(&mut self, mask: &BitSlice) -> usize {
        let before = self.rows.len();
        let mut row_idx = 0;
        self.rows.retain(|_| {
            let keep = !mask[row_idx];
            row_idx += 1;
            keep
        });
        before - self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Cell> {
        values.iter().map(|v| Cell::from(*v)).collect()
    }

    fn users() -> Table {
        let mut table = Table::new("users", &["id", "name"], 32).unwrap();
        table.insert(cells(&["1", "Alice"])).unwrap();
        table.insert(cells(&["2", "Bob"])).unwrap();
        table.insert(cells(&["3", "Charlie"])).unwrap();
        table
    }

    #[test]
    fn test_table_creation() {
        let table = Table::new("users", &["id", "name"], 32).unwrap();
        assert_eq!(&*table.name, "users");
        assert_eq!(table.columns().len(), 2);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.columns()[1].width, 4);
    }

    #[test]
    fn test_column_bounds() {
        let result = Table::new("wide", &["a", "b", "c"], 2);
        assert!(matches!(result, Err(Error::TooManyColumns { max: 2, .. })));

        let result = Table::new::<&str>("none", &[], 2);
        assert!(matches!(result, Err(Error::MissingColumns)));

        let result = Table::new("twice", &["a", "a"], 2);
        assert!(matches!(result, Err(Error::DuplicateColumn { .. })));
    }

    #[test]
    fn test_insert_pads_with_null() {
        let mut table = Table::new("t", &["a", "b", "c"], 32).unwrap();
        table.insert(cells(&["x"])).unwrap();

        let row = table.get_row(0).unwrap();
        assert_eq!(row.cells, cells(&["x", NULL, NULL]));
    }

    #[test]
    fn test_insert_too_many_cells() {
        let mut table = Table::new("t", &["a"], 32).unwrap();
        assert!(table.insert(cells(&["x", "y"])).is_err());
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_insert_widens_columns() {
        let mut table = Table::new("t", &["a", "b"], 32).unwrap();
        table.insert(cells(&["long value", "b"])).unwrap();
        assert_eq!(table.columns()[0].width, 10);
        assert_eq!(table.columns()[1].width, 1);
    }

    #[test]
    fn test_get_col() {
        let table = users();
        assert_eq!(table.column_index("id"), Some(0));
        assert_eq!(table.column_index("name"), Some(1));
        assert!(table.column_index("age").is_none());
        assert!(matches!(
            table.require_column("age"),
            Err(Error::ColumnNotFound(name)) if name == "age"
        ));
    }

    #[test]
    fn test_update_masked_rows() {
        let mut table = users();
        let mask = bitvec![0, 1, 1];

        let updated = table.update(&mask, &[(1, Cell::from("Zed"))]);

        assert_eq!(updated, 2);
        assert_eq!(table.get_row(0).unwrap().get(1), Some("Alice"));
        assert_eq!(table.get_row(1).unwrap().get(1), Some("Zed"));
        assert_eq!(table.get_row(2).unwrap().get(1), Some("Zed"));
    }

    #[test]
    fn test_update_without_match_keeps_width() {
        let mut table = users();
        let mask = bitvec![0, 0, 0];

        let updated = table.update(&mask, &[(1, Cell::from("Bartholomew"))]);

        assert_eq!(updated, 0);
        assert_eq!(table.columns()[1].width, 7);
        assert_eq!(table.get_row(0).unwrap().get(1), Some("Alice"));
    }

    #[test]
    fn test_delete_keeps_order() {
        let mut table = users();
        let mask = bitvec![0, 1, 0];

        assert_eq!(table.delete(&mask), 1);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get_row(0).unwrap().get(0), Some("1"));
        assert_eq!(table.get_row(1).unwrap().get(0), Some("3"));
    }
}
