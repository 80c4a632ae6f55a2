use std::path::PathBuf;

use thiserror::Error;

/// Broad category of an [Error], so callers can branch without matching messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The command itself is malformed (too long).
    Syntax,
    /// A keyword needed an operand the stack did not hold.
    Stack,
    /// Table or column lookups and schema bounds.
    Schema,
    /// File access during LOAD or SAVE.
    Io,
    /// Malformed database file, or data the file format cannot hold.
    Format,
    /// Engine settings could not be read.
    Config,
}

/// The file operation that failed during LOAD or SAVE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    Stat,
    Open,
    Read,
    ShortRead,
    Write,
    Close,
}

impl IoOp {
    fn describe(self) -> &'static str {
        match self {
            Self::Stat => "Failed to read file stats",
            Self::Open => "Failed to open file",
            Self::Read => "Failed to read file",
            Self::ShortRead => "Failed to read entire file",
            Self::Write => "Failed to write file",
            Self::Close => "Failed to close file",
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Command length exceeded")]
    CommandTooLong { len: usize, max: usize },

    #[error("Stack overflow")]
    StackOverflow { capacity: usize },
    #[error("Missing table name")]
    MissingTableName,
    #[error("Missing column names")]
    MissingColumns,
    #[error("Missing value for column {column}")]
    MissingValue { column: String },
    #[error("Missing file path")]
    MissingPath,
    #[error("Missing number")]
    MissingNumber,
    #[error("Invalid number {0}")]
    InvalidNumber(String),
    #[error("Unexpected operand {0}")]
    UnexpectedOperand(String),

    #[error("No tables")]
    NoTables,
    #[error("Table {0} already exists")]
    TableExists(String),
    #[error("Table {0} don't exist")]
    TableNotFound(String),
    #[error("Column {0} don't exist")]
    ColumnNotFound(String),
    #[error("Column {column} already exists in table {table}")]
    DuplicateColumn { table: String, column: String },
    #[error("Too many columns in table {table}, limit is {max}")]
    TooManyColumns { table: String, max: usize },

    #[error("{} {}: {}", .op.describe(), .path.display(), .source)]
    Io {
        op: IoOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File {} is not valid UTF-8 at byte {offset}", .path.display())]
    InvalidUtf8 { path: PathBuf, offset: usize },
    #[error("Unexpected cell after table name {table} (line {line})")]
    CellAfterTableName { table: String, line: usize },
    #[error("Missing column names for table {table} (line {line})")]
    MissingHeader { table: String, line: usize },
    #[error("Too many cells in row of table {table} (line {line})")]
    TooManyCells { table: String, line: usize },
    #[error("Row of {values} values doesn't fit table {table} of {columns} columns")]
    RowTooWide {
        table: String,
        values: usize,
        columns: usize,
    },
    #[error("Cell {cell:?} of table {table} can't be written")]
    Unwritable { table: String, cell: String },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CommandTooLong { .. } => ErrorKind::Syntax,
            Self::StackOverflow { .. }
            | Self::MissingTableName
            | Self::MissingColumns
            | Self::MissingValue { .. }
            | Self::MissingPath
            | Self::MissingNumber
            | Self::InvalidNumber(_)
            | Self::UnexpectedOperand(_) => ErrorKind::Stack,
            Self::NoTables
            | Self::TableExists(_)
            | Self::TableNotFound(_)
            | Self::ColumnNotFound(_)
            | Self::DuplicateColumn { .. }
            | Self::TooManyColumns { .. } => ErrorKind::Schema,
            Self::Io { .. } => ErrorKind::Io,
            Self::InvalidUtf8 { .. }
            | Self::CellAfterTableName { .. }
            | Self::MissingHeader { .. }
            | Self::TooManyCells { .. }
            | Self::RowTooWide { .. }
            | Self::Unwritable { .. } => ErrorKind::Format,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn io(op: IoOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

impl From<::config::ConfigError> for Error {
    fn from(e: ::config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(Error::NoTables.to_string(), "No tables");
        assert_eq!(
            Error::ColumnNotFound("X".into()).to_string(),
            "Column X don't exist"
        );
        assert_eq!(
            Error::MissingValue {
                column: "col1".into()
            }
            .to_string(),
            "Missing value for column col1"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            Error::CommandTooLong { len: 10, max: 5 }.kind(),
            ErrorKind::Syntax
        );
        assert_eq!(Error::MissingTableName.kind(), ErrorKind::Stack);
        assert_eq!(Error::TableExists("a".into()).kind(), ErrorKind::Schema);
        assert_eq!(
            Error::CellAfterTableName {
                table: "a".into(),
                line: 1
            }
            .kind(),
            ErrorKind::Format
        );
        let io = Error::io(
            IoOp::Open,
            "/nope",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert_eq!(io.kind(), ErrorKind::Io);
        assert_eq!(
            Error::UnexpectedOperand("typo".into()).to_string(),
            "Unexpected operand typo"
        );
        assert_eq!(
            Error::UnexpectedOperand("typo".into()).kind(),
            ErrorKind::Stack
        );
        assert!(io.to_string().starts_with("Failed to open file /nope"));
    }
}
