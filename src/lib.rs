//! An embeddable table store driven by a small stack language.
//!
//! A command is a list of words separated by spaces. Words that are not
//! keywords are pushed on a stack; keywords pop what they need and run at
//! once. There is no separate parse step: `users TABLE Ada name 36 age INSERT`
//! pushes `users`, selects it with `TABLE`, pushes two `value column` pairs
//! and inserts them as a row.
//!
//! ```
//! use stackdb::Database;
//!
//! let mut db = Database::new();
//! db.execute("users TABLE name age CREATE").unwrap();
//! db.execute("users TABLE Ada name 36 age INSERT").unwrap();
//!
//! let result = db.query("users TABLE Ada name EQ age SELECT").unwrap();
//! assert_eq!(result.rows, vec![vec!["36"]]);
//! ```
//!
//! Every value is a string. Columns left out of an `INSERT` hold [value::NULL].
//! Tables are saved and loaded as aligned plain text, see [codec].

pub mod catalog;
pub mod codec;
pub mod column;
pub mod context;
pub mod database;
pub mod error;
mod executor;
pub mod filter;
pub mod settings;
pub mod stack;
pub mod table;
pub mod tokenizer;
pub mod value;
pub mod word;

pub use catalog::Catalog;
pub use column::Column;
pub use database::{Database, Output, QueryResult, ResultRow};
pub use error::{Error, ErrorKind, Result};
pub use settings::EngineConfig;
pub use table::{Row, Table};
pub use value::{Cell, NULL};
