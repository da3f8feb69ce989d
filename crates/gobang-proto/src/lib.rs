//! Line-oriented text protocol for gobang.

pub mod command;
pub mod engine;
pub mod error;

pub use command::{Command, EngineOption, GoParams, parse_command};
pub use engine::ProtoEngine;
pub use error::ProtoError;
