use serde::Deserialize;

use crate::error::Result;

/// Bounds the engine enforces on every submitted command.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Longest command accepted, in bytes.
    pub max_command_len: usize,
    /// Operand stack entries available to a single command.
    pub stack_capacity: usize,
    /// Columns a table may declare.
    pub max_columns: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_command_len: 8192,
            stack_capacity: 128,
            max_columns: 32,
        }
    }
}

impl EngineConfig {
    /// Reads `stackdb.toml` from the working directory when present, then
    /// `STACKDB_*` environment variables (e.g. `STACKDB_MAX_COLUMNS=64`).
    /// Anything not given keeps its default.
    pub fn load() -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name("stackdb").required(false))
            .add_source(::config::Environment::with_prefix("STACKDB").try_parsing(true))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_command_len, 8192);
        assert_eq!(config.stack_capacity, 128);
        assert_eq!(config.max_columns, 32);
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: EngineConfig = ::config::Config::builder()
            .set_override("max_columns", 4)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.max_columns, 4);
        assert_eq!(config.stack_capacity, 128);
    }
}
