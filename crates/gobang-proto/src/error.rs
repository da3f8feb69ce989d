//! Protocol errors.

use gobang_core::CellParseError;

/// Errors that can occur during protocol handling.
#[derive(Debug, thiserror::Error)]
pub enum ProtoError {
    /// A `position` token appeared before any `engine` or `opponent` keyword.
    #[error("malformed position command: unexpected token {token:?}")]
    MalformedPosition {
        /// The offending token.
        token: String,
    },

    /// A cell in the `position` command could not be parsed.
    #[error("invalid cell: {0}")]
    InvalidCell(#[from] CellParseError),

    /// The `setoption` command is missing its `name` or `value` part.
    #[error("malformed setoption command: expected `setoption name <name> value <value>`")]
    MalformedOption,

    /// `setoption` named an option the engine does not have.
    #[error("unknown option: {name}")]
    UnknownOption {
        /// The option name as given.
        name: String,
    },

    /// An option value could not be parsed.
    #[error("invalid value {value:?} for option {name}")]
    InvalidOptionValue {
        /// The option name.
        name: String,
        /// The value that failed to parse.
        value: String,
    },

    /// A `go` parameter is missing its value.
    #[error("missing value for go parameter {param}")]
    MissingGoValue {
        /// The parameter name.
        param: String,
    },

    /// A `go` parameter value could not be parsed.
    #[error("invalid value {value:?} for go parameter {param}")]
    InvalidGoValue {
        /// The parameter name.
        param: String,
        /// The value that failed to parse.
        value: String,
    },

    /// An I/O error occurred while reading commands or writing replies.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
