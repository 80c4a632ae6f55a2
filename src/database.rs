use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::codec::{self, LoadSummary};
use crate::error::{Error, IoOp, Result};
use crate::executor::Executor;
use crate::settings::EngineConfig;
use crate::tokenizer::Tokenizer;
use crate::value::Cell;

/// The main entry point of the engine.
///
/// Owns a [Catalog] and runs commands against it. Each instance is an
/// independent database. Commands run one at a time; embedders sharing a
/// database between threads must hold one lock for the whole command.
#[derive(Debug, Default)]
pub struct Database {
    catalog: Catalog,
    config: EngineConfig,
}

/// One row emitted by `SELECT` or `INFO`.
#[derive(Debug, Clone, Copy)]
pub struct ResultRow<'r> {
    /// Position among the rows emitted by the same keyword, starting at 0.
    pub index: usize,
    /// Column names, in the order of `values`.
    pub columns: &'r [Cell],
    pub values: &'r [Cell],
}

/// What [Database::submit] hands to its callback.
#[derive(Debug)]
pub enum Output<'r> {
    Row(ResultRow<'r>),
    /// The command failed. Nothing is emitted after this.
    Error(&'r Error),
}

/// Rows collected by [Database::query].
#[derive(Debug, Default, PartialEq)]
pub struct QueryResult {
    /// Column names of the last emitted row, empty when nothing was emitted.
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Database {
    /// Creates a new, empty database with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            catalog: Catalog::new(),
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs a command, streaming its rows to `on_output`.
    ///
    /// On failure the error is passed to `on_output` exactly once, after any
    /// rows already emitted. Returns how many rows were emitted.
    ///
    /// # Example
    /// ```
    /// use stackdb::{Database, Output};
    ///
    /// let mut db = Database::new();
    /// db.submit("users TABLE name CREATE", |_| {});
    ///
    /// let mut errors = Vec::new();
    /// db.submit("ghosts TABLE * SELECT", |out| {
    ///     if let Output::Error(e) = out {
    ///         errors.push(e.to_string());
    ///     }
    /// });
    /// assert_eq!(errors, vec!["Table ghosts don't exist"]);
    /// ```
    pub fn submit<F>(&mut self, command: &str, on_output: F) -> usize
    where
        F: FnMut(Output<'_>),
    {
        self.submit_to(command, &mut io::stdout(), on_output)
    }

    /// Same as [Database::submit], but a `SAVE` without a path writes to
    /// `export` instead of standard output.
    ///
    /// # Example
    /// ```
    /// use stackdb::Database;
    ///
    /// let mut db = Database::new();
    /// db.execute("users TABLE name CREATE").unwrap();
    /// db.execute("users TABLE Ada name INSERT").unwrap();
    ///
    /// let mut export = Vec::new();
    /// db.submit_to("SAVE", &mut export, |_| {});
    /// assert_eq!(export, b"users\nname  \nAda   \n\n");
    /// ```
    pub fn submit_to<W, F>(&mut self, command: &str, export: &mut W, mut on_output: F) -> usize
    where
        W: Write,
        F: FnMut(Output<'_>),
    {
        let mut emitted = 0;
        let result = self.run(command, export, |row| {
            emitted += 1;
            on_output(Output::Row(row));
        });
        if let Err(e) = result {
            on_output(Output::Error(&e));
        }
        emitted
    }

    /// Runs a command and discards any emitted rows.
    ///
    /// # Example
    /// ```
    /// use stackdb::Database;
    ///
    /// let mut db = Database::new();
    /// db.execute("users TABLE id name CREATE").unwrap();
    /// db.execute("users TABLE 1 id Ada name INSERT").unwrap();
    /// assert_eq!(db.catalog().get_table("users").unwrap().row_count(), 1);
    /// ```
    pub fn execute(&mut self, command: &str) -> Result<()> {
        self.run(command, &mut io::stdout(), |_| {}).map(|_| ())
    }

    /// Runs a command and collects every emitted row.
    ///
    /// # Example
    /// ```
    /// use stackdb::Database;
    ///
    /// let mut db = Database::new();
    /// db.execute("products TABLE name price CREATE").unwrap();
    /// db.execute("products TABLE Laptop name 1200 price INSERT").unwrap();
    /// db.execute("products TABLE Mouse name 25 price INSERT").unwrap();
    ///
    /// let result = db.query("products TABLE price name SELECT").unwrap();
    /// assert_eq!(result.columns, vec!["price", "name"]);
    /// assert_eq!(result.rows[0], vec!["1200", "Laptop"]);
    /// assert_eq!(result.rows[1], vec!["25", "Mouse"]);
    /// ```
    pub fn query(&mut self, command: &str) -> Result<QueryResult> {
        let mut result = QueryResult::default();
        self.run(command, &mut io::stdout(), |row| {
            if result.columns.len() != row.columns.len()
                || result.columns.iter().zip(row.columns).any(|(a, b)| **a != **b)
            {
                result.columns = row.columns.iter().map(|c| c.to_string()).collect();
            }
            result
                .rows
                .push(row.values.iter().map(|v| v.to_string()).collect());
        })?;
        Ok(result)
    }

    /// Tokenizes `command` and runs it word by word.
    fn run<F>(&mut self, command: &str, export: &mut dyn Write, emit: F) -> Result<usize>
    where
        F: FnMut(ResultRow<'_>),
    {
        if command.len() > self.config.max_command_len {
            let err = Error::CommandTooLong {
                len: command.len(),
                max: self.config.max_command_len,
            };
            warn!(kind = ?err.kind(), error = %err, "command rejected");
            return Err(err);
        }

        debug!(command, "command");
        let executor = Executor::new(&mut self.catalog, &self.config, export, emit);
        executor.run(Tokenizer::new(command)).inspect_err(|err| {
            warn!(kind = ?err.kind(), error = %err, "command failed");
        })
    }

    /// Adds the tables of a database file, like `LOAD`.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadSummary> {
        codec::load(&mut self.catalog, path.as_ref(), self.config.max_columns)
    }

    /// Saves every table to a file, like `SAVE`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        codec::save(&self.catalog, path.as_ref())
    }

    /// Writes every table in file format to `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        codec::check_writable(&self.catalog)?;
        codec::write(&self.catalog, out)
            .map_err(|e| Error::io(IoOp::Write, "<writer>", e))
    }
}
