//! Synchronous protocol loop: one command per line, one search at a time.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use tracing::{debug, info, warn};

use gobang_core::Cell;
use gobang_engine::{EngineConfig, SearchError, Searcher};

use crate::command::{Command, EngineOption, GoParams, parse_command};
use crate::error::ProtoError;

/// The protocol front end, holding the configuration and the stored
/// position.
pub struct ProtoEngine {
    config: EngineConfig,
    engine: Vec<Cell>,
    opponent: Vec<Cell>,
}

impl ProtoEngine {
    /// Create a front end with the default configuration and an empty
    /// position.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            engine: Vec::new(),
            opponent: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run on stdin/stdout until `quit` or end of input.
    pub fn run(self) -> Result<(), ProtoError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the loop over arbitrary input and output.
    pub fn run_with<R: BufRead, W: Write>(mut self, input: R, mut out: W) -> Result<(), ProtoError> {
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received command");

            let command = match parse_command(trimmed) {
                Ok(command) => command,
                Err(e) => {
                    warn!(error = %e, "parse error");
                    writeln!(out, "error {e}")?;
                    out.flush()?;
                    continue;
                }
            };

            match command {
                Command::IsReady => writeln!(out, "readyok")?,
                Command::NewGame => self.handle_newgame(),
                Command::SetOption(option) => self.handle_setoption(option, &mut out)?,
                Command::Position { engine, opponent } => {
                    self.engine = engine;
                    self.opponent = opponent;
                }
                Command::Go(params) => self.handle_go(params, &mut out)?,
                Command::Quit => break,
                Command::Unknown(name) => debug!(cmd = %name, "ignoring unknown command"),
            }
            out.flush()?;
        }

        info!("gobang shutting down");
        Ok(())
    }

    fn handle_newgame(&mut self) {
        self.engine.clear();
        self.opponent.clear();
    }

    /// Apply an option to a copy of the configuration and keep it only if it
    /// validates.
    fn handle_setoption(&mut self, option: EngineOption, out: &mut impl Write) -> Result<(), ProtoError> {
        let mut config = self.config.clone();
        let applied = match option {
            EngineOption::Width(width) => config.set_dimensions(width, config.size.height()),
            EngineOption::Height(height) => config.set_dimensions(config.size.width(), height),
            EngineOption::Depth(depth) => {
                config.depth = depth;
                Ok(())
            }
            EngineOption::AttackRatio(ratio) => {
                config.attack_ratio = ratio;
                Ok(())
            }
            EngineOption::Threads(threads) => {
                config.threads = threads;
                Ok(())
            }
            EngineOption::MoveTime(move_time) => {
                config.move_time = move_time;
                Ok(())
            }
        }
        .and_then(|()| config.validate());

        match applied {
            Ok(()) => {
                debug!(?config, "configuration updated");
                self.config = config;
            }
            Err(e) => {
                warn!(error = %e, "option rejected");
                writeln!(out, "error {e}")?;
            }
        }
        Ok(())
    }

    fn handle_go(&mut self, params: GoParams, out: &mut impl Write) -> Result<(), ProtoError> {
        let mut config = self.config.clone();
        if let Some(depth) = params.depth {
            config.depth = depth;
        }
        if let Some(movetime) = params.movetime {
            config.move_time = Some(movetime);
        }

        let start = Instant::now();
        let outcome = Searcher::new(config).and_then(|searcher| searcher.best_move(&self.engine, &self.opponent));

        match outcome {
            Ok(result) => {
                writeln!(
                    out,
                    "info depth {} score {} cuts {} searched {} nodes {} time {}",
                    result.depth,
                    result.score,
                    result.stats.cut_count,
                    result.stats.search_count,
                    result.nodes,
                    start.elapsed().as_millis(),
                )?;
                writeln!(out, "bestmove {}", result.best_move)?;
            }
            Err(SearchError::NoLegalMove) if self.engine.is_empty() && self.opponent.is_empty() => {
                let center = self.config.size.center();
                info!(cell = %center, "empty board, opening in the center");
                writeln!(out, "bestmove {center}")?;
            }
            Err(e) => {
                warn!(error = %e, "search failed");
                writeln!(out, "error {e}")?;
            }
        }
        Ok(())
    }
}

impl Default for ProtoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProtoEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtoEngine")
            .field("config", &self.config)
            .field("engine", &self.engine)
            .field("opponent", &self.opponent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(engine: ProtoEngine, script: &str) -> Vec<String> {
        let mut out = Vec::new();
        engine.run_with(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn run(script: &str) -> Vec<String> {
        run_script(ProtoEngine::new(), script)
    }

    #[test]
    fn isready_replies_readyok() {
        assert_eq!(run("isready\n"), vec!["readyok"]);
    }

    #[test]
    fn empty_board_opens_in_center() {
        assert_eq!(run("go\n"), vec!["bestmove 6,6"]);
    }

    #[test]
    fn center_follows_board_size() {
        let lines = run("setoption name Width value 15\nsetoption name Height value 9\ngo\n");
        assert_eq!(lines, vec!["bestmove 7,4"]);
    }

    #[test]
    fn go_completes_five() {
        let lines = run("setoption name Depth value 1\nposition engine 2,2 2,3 2,4 2,5\ngo\n");
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("info depth 1 score "), "got {}", lines[0]);
        assert!(
            lines[1] == "bestmove 2,1" || lines[1] == "bestmove 2,6",
            "got {}",
            lines[1]
        );
    }

    #[test]
    fn go_depth_overrides_config() {
        let lines = run("position engine 5,5 opponent 6,6\ngo depth 1\n");
        assert!(lines[0].starts_with("info depth 1 "), "got {}", lines[0]);
    }

    #[test]
    fn newgame_clears_position() {
        let lines = run("position engine 3,3\nnewgame\ngo\n");
        assert_eq!(lines, vec!["bestmove 6,6"]);
    }

    #[test]
    fn rejected_option_keeps_config() {
        let mut engine = ProtoEngine::new();
        let mut out = Vec::new();
        engine
            .handle_setoption(EngineOption::Depth(0), &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("error invalid search depth 0"), "got {text}");
        assert_eq!(engine.config().depth, 3);

        let mut out = Vec::new();
        engine
            .handle_setoption(EngineOption::Depth(5), &mut out)
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(engine.config().depth, 5);
    }

    #[test]
    fn width_keeps_height() {
        let mut engine = ProtoEngine::new();
        engine
            .handle_setoption(EngineOption::Width(19), &mut io::sink())
            .unwrap();
        assert_eq!(engine.config().size.width(), 19);
        assert_eq!(engine.config().size.height(), 12);
    }

    #[test]
    fn invalid_position_reports_error() {
        let lines = run("position engine 1,1 opponent 1,1\ngo\n");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("error invalid position"), "got {}", lines[0]);
    }

    #[test]
    fn finished_game_reports_error() {
        let lines = run("position opponent 0,0 1,1 2,2 3,3 4,4\ngo\n");
        assert_eq!(lines, vec!["error game is over: opponent has five in a row"]);
    }

    #[test]
    fn parse_errors_are_reported_and_loop_continues() {
        let lines = run("position 1,1\nisready\n");
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("error malformed position"), "got {}", lines[0]);
        assert_eq!(lines[1], "readyok");
    }

    #[test]
    fn quit_stops_processing() {
        assert_eq!(run("quit\nisready\n"), Vec::<String>::new());
    }

    #[test]
    fn unknown_commands_are_ignored() {
        assert_eq!(run("hello\nisready\n"), vec!["readyok"]);
    }
}
