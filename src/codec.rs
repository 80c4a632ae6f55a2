//! Plain-text database files.
//!
//! A file is a list of blocks separated by blank lines. The first line of a
//! block is the table name, the second holds the column names and every
//! following line is a row. Cells on a line are separated by two or more
//! spaces, so a value can't itself contain two consecutive spaces.
//!
//! ```text
//! users
//! name  age
//! Ada   36
//!
//! ```

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::{Error, IoOp, Result};
use crate::table::Table;
use crate::value::{self, Cell};

/// Counts of what a LOAD added to the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub tables: usize,
    pub rows: usize,
}

/// Reads the file at `path` and adds its tables to `catalog`.
///
/// # Errors
/// I/O failures are reported by the step that failed (stat, open, read,
/// short read). Parse failures are described in [parse]. Tables parsed
/// before a failure stay in the catalog.
pub fn load(catalog: &mut Catalog, path: &Path, max_columns: usize) -> Result<LoadSummary> {
    let expected = fs::metadata(path)
        .map_err(|e| Error::io(IoOp::Stat, path, e))?
        .len();

    let mut file = File::open(path).map_err(|e| Error::io(IoOp::Open, path, e))?;
    let mut bytes = Vec::with_capacity(expected as usize);
    file.read_to_end(&mut bytes)
        .map_err(|e| Error::io(IoOp::Read, path, e))?;
    drop(file);

    if bytes.len() as u64 != expected {
        let short = io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("read {} of {} bytes", bytes.len(), expected),
        );
        return Err(Error::io(IoOp::ShortRead, path, short));
    }

    let text = String::from_utf8(bytes).map_err(|e| Error::InvalidUtf8 {
        path: path.to_path_buf(),
        offset: e.utf8_error().valid_up_to(),
    })?;

    let summary = parse(catalog, &text, max_columns)?;
    info!(path = %path.display(), tables = summary.tables, rows = summary.rows, "database loaded");
    Ok(summary)
}

/// Parser position inside the current block.
enum State<'t> {
    /// Start of a block, next line names a table.
    TableName,
    /// Table named, its column line is next.
    Columns { name: &'t str, line: usize },
    /// Reading rows into the table at this catalog position.
    Rows { table: usize },
}

/// Parses database text into `catalog`.
///
/// # Errors
/// - a table name line holding more than one cell,
/// - a table name followed by a blank line or the end of the text,
/// - a table that already exists in the catalog,
/// - a header over `max_columns` columns or with a repeated column,
/// - a row with more cells than its table has columns.
pub fn parse(catalog: &mut Catalog, text: &str, max_columns: usize) -> Result<LoadSummary> {
    let mut summary = LoadSummary::default();
    let mut state = State::TableName;

    for (line_idx, line) in text.lines().enumerate() {
        let line_no = line_idx + 1;
        let cells = split_cells(line);

        if cells.is_empty() {
            if let State::Columns { name, line } = state {
                return Err(Error::MissingHeader {
                    table: name.to_string(),
                    line,
                });
            }
            state = State::TableName;
            continue;
        }

        state = match state {
            State::TableName => {
                if cells.len() > 1 {
                    return Err(Error::CellAfterTableName {
                        table: cells[0].to_string(),
                        line: line_no,
                    });
                }
                if catalog.position(cells[0]).is_some() {
                    return Err(Error::TableExists(cells[0].to_string()));
                }
                State::Columns {
                    name: cells[0],
                    line: line_no,
                }
            }
            State::Columns { name, .. } => {
                let table = catalog.create_table(Table::new(name, cells.as_slice(), max_columns)?)?;
                summary.tables += 1;
                State::Rows { table }
            }
            State::Rows { table } => {
                let target = catalog.table_mut(table);
                if cells.len() > target.columns().len() {
                    return Err(Error::TooManyCells {
                        table: target.name.to_string(),
                        line: line_no,
                    });
                }
                target.insert(cells.into_iter().map(value::cell).collect())?;
                summary.rows += 1;
                State::Rows { table }
            }
        };
    }

    if let State::Columns { name, line } = state {
        return Err(Error::MissingHeader {
            table: name.to_string(),
            line,
        });
    }

    debug!(tables = summary.tables, rows = summary.rows, "database parsed");
    Ok(summary)
}

/// Splits a line on runs of two or more spaces.
///
/// Leading and trailing whitespace is dropped, as is any whitespace following
/// a separator. A blank line has no cells.
fn split_cells(line: &str) -> Vec<&str> {
    let is_blank = |c: char| c <= ' ';
    let mut cells = Vec::new();
    let mut rest = line.trim_matches(is_blank);

    while !rest.is_empty() {
        match rest.find("  ") {
            Some(end) => {
                cells.push(&rest[..end]);
                rest = rest[end..].trim_start_matches(is_blank);
            }
            None => {
                cells.push(rest);
                break;
            }
        }
    }
    cells
}

/// Saves the whole catalog to `path`, replacing the file.
///
/// # Errors
/// Returns a format error, before the file is touched, if a cell can't be
/// represented. Otherwise reports the failing open, write or close step.
pub fn save(catalog: &Catalog, path: &Path) -> Result<()> {
    check_writable(catalog)?;

    let file = File::create(path).map_err(|e| Error::io(IoOp::Open, path, e))?;
    let mut out = BufWriter::new(file);
    write(catalog, &mut out).map_err(|e| Error::io(IoOp::Write, path, e))?;

    let file = out
        .into_inner()
        .map_err(|e| Error::io(IoOp::Write, path, e.into_error()))?;
    file.sync_all()
        .map_err(|e| Error::io(IoOp::Close, path, e))?;

    info!(path = %path.display(), tables = catalog.len(), "database saved");
    Ok(())
}

/// Writes the catalog in file format.
///
/// Each cell is padded to its column's cached width plus a two-space gutter.
/// Padding counts code points, so multi-byte text stays aligned.
pub fn write<W: Write>(catalog: &Catalog, out: &mut W) -> io::Result<()> {
    for table in catalog.tables() {
        writeln!(out, "{}", table.name)?;
        write_line(out, table, table.columns().iter().map(|col| &col.name))?;
        for row in table.rows() {
            write_line(out, table, row.cells.iter())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_line<'c, W: Write>(
    out: &mut W,
    table: &Table,
    cells: impl Iterator<Item = &'c Cell>,
) -> io::Result<()> {
    for (cell, column) in cells.zip(table.columns()) {
        // `{:<w$}` pads by chars, which is the code point width
        write!(out, "{:<width$}  ", cell, width = column.width)?;
    }
    writeln!(out)
}

/// Rejects catalogs whose text the parser would read back differently.
pub fn check_writable(catalog: &Catalog) -> Result<()> {
    for table in catalog.tables() {
        let names = table.columns().iter().map(|col| &col.name);
        let cells = table.rows().iter().flat_map(|row| row.cells.iter());

        for cell in std::iter::once(&table.name).chain(names).chain(cells) {
            if !is_writable(cell) {
                return Err(Error::Unwritable {
                    table: table.name.to_string(),
                    cell: cell.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn is_writable(cell: &str) -> bool {
    let blank = |b: u8| b <= b' ';
    let bytes = cell.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(&first), Some(&last)) => {
            !blank(first) && !blank(last) && !cell.contains("  ") && !cell.contains('\n')
        }
        _ => false,
    }
}
