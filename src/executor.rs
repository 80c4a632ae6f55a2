use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use tracing::debug;

use crate::catalog::Catalog;
use crate::codec;
use crate::context::QueryContext;
use crate::database::ResultRow;
use crate::error::{Error, IoOp, Result};
use crate::settings::EngineConfig;
use crate::table::Table;
use crate::value::{self, Cell, NULL};
use crate::word::Word;

/// Runs the words of one command against a catalog.
///
/// Words are handled left to right with no lookahead. Keywords run at once,
/// anything else is pushed on the stack. The first error stops the command;
/// changes made by earlier words are kept.
pub(crate) struct Executor<'e, 'a, F> {
    catalog: &'e mut Catalog,
    config: &'e EngineConfig,
    /// Where `SAVE` writes when no path is given.
    export: &'e mut dyn Write,
    ctx: QueryContext<'a>,
    emit: F,
    emitted: usize,
}

impl<'e, 'a, F> Executor<'e, 'a, F>
where
    F: FnMut(ResultRow<'_>),
{
    pub fn new(
        catalog: &'e mut Catalog,
        config: &'e EngineConfig,
        export: &'e mut dyn Write,
        emit: F,
    ) -> Self {
        Self {
            catalog,
            config,
            export,
            ctx: QueryContext::new(config.stack_capacity),
            emit,
            emitted: 0,
        }
    }

    /// Runs every word and returns how many rows were emitted.
    pub fn run(mut self, words: impl IntoIterator<Item = &'a str>) -> Result<usize> {
        for word in words {
            match Word::parse(word) {
                Some(keyword) => self.execute(keyword)?,
                None => self.ctx.stack.push(word)?,
            }
        }
        Ok(self.emitted)
    }

    fn execute(&mut self, word: Word) -> Result<()> {
        debug!(word = word.as_str(), stack = self.ctx.stack.len(), "keyword");
        match word {
            Word::Table => self.table(),
            Word::Info => self.info(),
            Word::Create => self.create(),
            Word::Drop => self.drop_table(),
            Word::Insert => self.insert(),
            Word::Select => self.select(),
            Word::Set => self.set(),
            Word::Del => self.del(),
            Word::Eq => self.filter(true),
            Word::Neq => self.filter(false),
            Word::Skip => {
                self.ctx.skip = self.pop_number()?;
                Ok(())
            }
            Word::Limit => {
                self.ctx.limit = Some(self.pop_number()?);
                Ok(())
            }
            Word::Load => self.load(),
            Word::Save => self.save(),
            Word::Null => self.ctx.stack.push(NULL),
            Word::Now => {
                let today = Local::now().format("%Y-%m-%d").to_string();
                self.ctx.stack.push(today)
            }
        }
    }

    fn emit_row(&mut self, index: usize, columns: &[Cell], values: &[Cell]) {
        (self.emit)(ResultRow {
            index,
            columns,
            values,
        });
        self.emitted += 1;
    }

    // --- Operands ---

    fn pop_number(&mut self) -> Result<usize> {
        let word = self.ctx.stack.pop().ok_or(Error::MissingNumber)?;
        word.parse()
            .map_err(|_| Error::InvalidNumber(word.into_owned()))
    }

    /// Pops `value column` pairs until the stack is empty.
    ///
    /// Each column is checked against the selected table before its value is
    /// popped. Pairs come back in command order.
    fn pop_pairs(&mut self, table: usize) -> Result<Vec<(usize, Cow<'a, str>)>> {
        let table = self.catalog.table(table);
        let mut pairs = Vec::new();

        while let Some(column) = self.ctx.stack.pop() {
            let col_idx = table.require_column(&column)?;
            let value = self.ctx.stack.pop().ok_or_else(|| Error::MissingValue {
                column: column.to_string(),
            })?;
            pairs.push((col_idx, value));
        }

        pairs.reverse();
        Ok(pairs)
    }

    // --- Context ---

    fn table(&mut self) -> Result<()> {
        let name = self.ctx.stack.pop().ok_or(Error::MissingTableName)?;
        let selected = self.catalog.position(&name);
        let columns = selected.map_or(0, |idx| self.catalog.table(idx).columns().len());
        self.ctx.select(name, selected, columns);
        Ok(())
    }

    /// Columns of the selected table, or every table when none was requested.
    fn info(&mut self) -> Result<()> {
        if self.ctx.requested.is_some() {
            let idx = self.ctx.selected_table()?;
            let header: [Cell; 2] = ["column".into(), "width".into()];
            let columns = self.catalog.table(idx).columns().to_vec();
            for (i, column) in columns.iter().enumerate() {
                let values = [column.name.clone(), column.width.to_string().into()];
                self.emit_row(i, &header, &values);
            }
            return Ok(());
        }

        if self.catalog.is_empty() {
            return Err(Error::NoTables);
        }
        let header: [Cell; 3] = ["table".into(), "columns".into(), "rows".into()];
        let listing: Vec<[Cell; 3]> = self
            .catalog
            .tables()
            .iter()
            .map(|t| {
                [
                    t.name.clone(),
                    t.columns().len().to_string().into(),
                    t.row_count().to_string().into(),
                ]
            })
            .collect();
        for (i, values) in listing.iter().enumerate() {
            self.emit_row(i, &header, values);
        }
        Ok(())
    }

    // --- Schema ---

    fn create(&mut self) -> Result<()> {
        let Some(name) = self.ctx.requested.clone() else {
            return Err(Error::MissingTableName);
        };
        if self.ctx.selected.is_some() {
            return Err(Error::TableExists(name.into_owned()));
        }

        let columns = self.ctx.stack.drain_pushed_order();
        let table = Table::new(&name, columns.as_slice(), self.config.max_columns)?;
        let width = table.columns().len();
        let idx = self.catalog.create_table(table)?;
        self.ctx.select(name, Some(idx), width);
        Ok(())
    }

    /// Drops the selected table, or every table when none was requested and
    /// the stack is empty.
    fn drop_table(&mut self) -> Result<()> {
        match self.ctx.selected {
            Some(idx) => {
                self.catalog.drop_table(idx);
                self.ctx.selected = None;
                self.ctx.filter = Default::default();
            }
            None => match &self.ctx.requested {
                Some(name) => return Err(Error::TableNotFound(name.to_string())),
                None => {
                    if let Some(word) = self.ctx.stack.pop() {
                        return Err(Error::UnexpectedOperand(word.into_owned()));
                    }
                    self.catalog.drop_all();
                }
            },
        }
        Ok(())
    }

    // --- Rows ---

    fn insert(&mut self) -> Result<()> {
        let idx = self.ctx.selected_table()?;
        let pairs = self.pop_pairs(idx)?;

        let table = self.catalog.table_mut(idx);
        let mut cells: Vec<Cell> = vec![Cell::from(NULL); table.columns().len()];
        for (col_idx, value) in pairs {
            cells[col_idx] = value::cell(&value);
        }
        table.insert(cells)
    }

    fn filter(&mut self, equal: bool) -> Result<()> {
        let idx = self.ctx.selected_table()?;
        for (col_idx, value) in self.pop_pairs(idx)? {
            if equal {
                self.ctx.filter.set_eq(col_idx, value);
            } else {
                self.ctx.filter.set_neq(col_idx, value);
            }
        }
        Ok(())
    }

    /// Emits the filtered rows of the selected table with the requested columns.
    fn select(&mut self) -> Result<()> {
        let idx = self.ctx.selected_table()?;
        let table = self.catalog.table(idx);

        let mut words = Vec::new();
        while let Some(word) = self.ctx.stack.pop() {
            words.push(word);
        }
        words.reverse();

        let mut projection = Vec::with_capacity(words.len());
        for word in &words {
            if word == "*" {
                projection.extend(0..table.columns().len());
            } else {
                projection.push(table.require_column(word)?);
            }
        }
        if projection.is_empty() {
            return Err(Error::MissingColumns);
        }

        let header: Vec<Cell> = projection
            .iter()
            .map(|&i| table.columns()[i].name.clone())
            .collect();

        let matching = table
            .rows()
            .iter()
            .filter(|row| self.ctx.filter.matches(row))
            .skip(self.ctx.skip)
            .take(self.ctx.limit.unwrap_or(usize::MAX));

        let mut values = Vec::with_capacity(projection.len());
        for (i, row) in matching.enumerate() {
            values.clear();
            values.extend(projection.iter().map(|&c| row.cells[c].clone()));
            (self.emit)(ResultRow {
                index: i,
                columns: &header,
                values: &values,
            });
            self.emitted += 1;
        }
        Ok(())
    }

    fn set(&mut self) -> Result<()> {
        let idx = self.ctx.selected_table()?;
        let assignments: Vec<(usize, Cell)> = self
            .pop_pairs(idx)?
            .into_iter()
            .map(|(col_idx, value)| (col_idx, value::cell(&value)))
            .collect();

        let mask = self.ctx.filter.mask(self.catalog.table(idx));
        let updated = self.catalog.table_mut(idx).update(&mask, &assignments);
        debug!(rows = updated, "rows updated");
        Ok(())
    }

    fn del(&mut self) -> Result<()> {
        let idx = self.ctx.selected_table()?;
        let mask = self.ctx.filter.mask(self.catalog.table(idx));
        let deleted = self.catalog.table_mut(idx).delete(&mask);
        debug!(rows = deleted, "rows deleted");
        Ok(())
    }

    // --- File ---

    fn load(&mut self) -> Result<()> {
        let path = self.ctx.stack.pop().ok_or(Error::MissingPath)?;
        let loaded = codec::load(self.catalog, Path::new(&*path), self.config.max_columns);

        // A table requested before LOAD may exist now.
        if self.ctx.selected.is_none() {
            if let Some(name) = self.ctx.requested.clone() {
                if let Some(idx) = self.catalog.position(&name) {
                    let columns = self.catalog.table(idx).columns().len();
                    self.ctx.select(name, Some(idx), columns);
                }
            }
        }

        loaded.map(|_| ())
    }

    /// Saves to the popped path, or to the export writer when the stack is empty.
    fn save(&mut self) -> Result<()> {
        match self.ctx.stack.pop() {
            Some(path) => codec::save(self.catalog, Path::new(&*path)),
            None => {
                codec::check_writable(self.catalog)?;
                codec::write(self.catalog, &mut self.export)
                    .and_then(|()| self.export.flush())
                    .map_err(|e| Error::io(IoOp::Write, "<export>", e))
            }
        }
    }
}
