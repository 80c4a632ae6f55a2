use tracing::info;

use crate::error::{Error, Result};
use crate::table::Table;

/// Every table owned by one database, in creation order.
///
/// Tables are addressed by their position. Positions stay valid until a
/// table is dropped, which shifts the tables created after it.
#[derive(Debug, Default)]
pub struct Catalog {
    tables: Vec<Table>,
}

impl Catalog {
    /// Creates a new, empty catalog.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds a table and returns its position.
    ///
    /// # Errors
    /// Returns an error if a table with the same name already exists.
    pub fn create_table(&mut self, table: Table) -> Result<usize> {
        if self.position(&table.name).is_some() {
            return Err(Error::TableExists(table.name.to_string()));
        }
        info!(
            table = &*table.name,
            columns = table.columns().len(),
            "table created"
        );
        self.tables.push(table);
        Ok(self.tables.len() - 1)
    }

    /// Removes the table at `idx` and returns it.
    pub fn drop_table(&mut self, idx: usize) -> Table {
        let table = self.tables.remove(idx);
        info!(table = &*table.name, rows = table.row_count(), "table dropped");
        table
    }

    /// Removes every table, returning how many there were.
    pub fn drop_all(&mut self) -> usize {
        let dropped = self.tables.len();
        self.tables.clear();
        info!(tables = dropped, "all tables dropped");
        dropped
    }

    /// Position of the table named exactly `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.tables.iter().position(|t| &*t.name == name)
    }

    pub fn table(&self, idx: usize) -> &Table {
        &self.tables[idx]
    }

    pub fn table_mut(&mut self, idx: usize) -> &mut Table {
        &mut self.tables[idx]
    }

    /// Retrieves a reference to a table by name.
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.position(name).map(|idx| &self.tables[idx])
    }

    /// Retrieves a mutable reference to a table by name.
    pub fn get_table_mut(&mut self, name: &str) -> Option<&mut Table> {
        self.position(name).map(|idx| &mut self.tables[idx])
    }

    /// Returns the names of all tables in creation order.
    pub fn list_tables(&self) -> Vec<&str> {
        self.tables.iter().map(|t| &*t.name).collect()
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
