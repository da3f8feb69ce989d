//! Protocol command parsing.

use std::str::FromStr;
use std::time::Duration;

use gobang_core::Cell;

use crate::error::ProtoError;

/// Parameters for the `go` command.
///
/// All fields are optional; a bare `go` uses the configured values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoParams {
    /// Search to this depth instead of the configured one.
    pub depth: Option<u8>,
    /// Time budget for this move.
    pub movetime: Option<Duration>,
}

/// A value set through `setoption`.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineOption {
    Width(u16),
    Height(u16),
    Depth(u8),
    AttackRatio(f64),
    Threads(usize),
    /// Per-move budget; `0` clears it.
    MoveTime(Option<Duration>),
}

/// A parsed protocol command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `isready` -- synchronization ping.
    IsReady,
    /// `newgame` -- clear the stored position.
    NewGame,
    /// `setoption name <name> value <value>`.
    SetOption(EngineOption),
    /// `position [engine <x,y>...] [opponent <x,y>...]`.
    Position {
        engine: Vec<Cell>,
        opponent: Vec<Cell>,
    },
    /// `go` -- search the stored position.
    Go(GoParams),
    /// `quit` -- exit the loop.
    Quit,
    /// Unrecognized command.
    Unknown(String),
}

/// Parse a single line of input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, ProtoError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = tokens.split_first() else {
        return Ok(Command::Unknown(String::new()));
    };

    match head {
        "isready" => Ok(Command::IsReady),
        "newgame" => Ok(Command::NewGame),
        "quit" => Ok(Command::Quit),
        "setoption" => parse_setoption(rest),
        "position" => parse_position(rest),
        "go" => parse_go(rest),
        _ => Ok(Command::Unknown(head.to_string())),
    }
}

/// Parse the `position` command arguments.
///
/// Cells follow the side keyword they belong to; either section may be
/// missing, repeated, or empty.
fn parse_position(tokens: &[&str]) -> Result<Command, ProtoError> {
    let mut engine = Vec::new();
    let mut opponent = Vec::new();
    let mut target: Option<&mut Vec<Cell>> = None;

    for &token in tokens {
        match token {
            "engine" => target = Some(&mut engine),
            "opponent" => target = Some(&mut opponent),
            _ => {
                let Some(list) = target.as_deref_mut() else {
                    return Err(ProtoError::MalformedPosition {
                        token: token.to_string(),
                    });
                };
                list.push(token.parse::<Cell>()?);
            }
        }
    }

    Ok(Command::Position { engine, opponent })
}

/// Parse the `setoption` command arguments.
///
/// Option names are case-insensitive.
fn parse_setoption(tokens: &[&str]) -> Result<Command, ProtoError> {
    let (name, value) = match tokens {
        ["name", name, "value", value] => (*name, *value),
        _ => return Err(ProtoError::MalformedOption),
    };

    let option = match name.to_ascii_lowercase().as_str() {
        "width" => EngineOption::Width(parse_option(name, value)?),
        "height" => EngineOption::Height(parse_option(name, value)?),
        "depth" => EngineOption::Depth(parse_option(name, value)?),
        "attackratio" => EngineOption::AttackRatio(parse_option(name, value)?),
        "threads" => EngineOption::Threads(parse_option(name, value)?),
        "movetime" => {
            let ms: u64 = parse_option(name, value)?;
            EngineOption::MoveTime((ms > 0).then(|| Duration::from_millis(ms)))
        }
        _ => {
            return Err(ProtoError::UnknownOption {
                name: name.to_string(),
            });
        }
    };
    Ok(Command::SetOption(option))
}

fn parse_option<T: FromStr>(name: &str, value: &str) -> Result<T, ProtoError> {
    value.parse().map_err(|_| ProtoError::InvalidOptionValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Parse the `go` command arguments. Unknown tokens are skipped.
fn parse_go(tokens: &[&str]) -> Result<Command, ProtoError> {
    let mut params = GoParams::default();

    let mut i = 0;
    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                params.depth = Some(parse_int(tokens.get(i + 1), "depth")?);
                i += 2;
            }
            "movetime" => {
                let ms: u64 = parse_int(tokens.get(i + 1), "movetime")?;
                params.movetime = Some(Duration::from_millis(ms));
                i += 2;
            }
            _ => i += 1,
        }
    }

    Ok(Command::Go(params))
}

fn parse_int<T: FromStr>(token: Option<&&str>, param: &str) -> Result<T, ProtoError> {
    let value = token.ok_or_else(|| ProtoError::MissingGoValue {
        param: param.to_string(),
    })?;
    value.parse().map_err(|_| ProtoError::InvalidGoValue {
        param: param.to_string(),
        value: value.to_string(),
    })
}
