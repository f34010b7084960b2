//! Configuration errors.

use thiserror::Error;

/// Error type for dvar configuration and session setup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A `.cfg` line starts with something other than `set`/`seta`/`sets`
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },
    /// A `set` line without a name or value
    #[error("line {line}: `{command}` needs a name and a value")]
    MissingArgument { line: usize, command: String },
    /// Value isn't a number, or is out of range for its use
    #[error("invalid value `{value}` for {name}")]
    InvalidValue { name: String, value: String },
    /// I/O error reading a config file
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
