//! Line-oriented console front end
//!
//! One command per line, processed to completion before the next is read.
//! Board taps can be given as squares (`tap e2`) or as pointer positions
//! (`click 330 90`) resolved through the session's board geometry.

use crate::core::{save_settings_to, GameSettings};
use crate::game::systems::TapOutcome;
use crate::game::types::{PieceKind, Square};
use crate::game::ChessSession;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, error};

pub const HELP_TEXT: &str = "\
Commands:
  tap <square>      tap a board square, e.g. `tap e2`
  click <x> <y>     tap a screen position
  promote <q|r|b|n> choose the pending promotion piece
  cancel            drop the current selection
  undo / redo       step back or forward one move
  reset             start a new game
  fen               print the current position
  load <fen>        set up a position
  moves             list the moves played so far
  flip              rotate the board
  status            print the board snapshot as JSON
  board             draw the board
  save              save settings
  help              show this text
  quit              exit";

/// A parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Tap(Square),
    Click { x: f32, y: f32 },
    Promote(PieceKind),
    Cancel,
    Undo,
    Redo,
    Reset,
    Fen,
    Load(String),
    Moves,
    Flip,
    Status,
    Board,
    Save,
    Help,
    Quit,
}

/// Why a console line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command {0:?}, try `help`")]
    Unknown(String),

    #[error("`{command}` needs an argument: {usage}")]
    MissingArgument {
        command: &'static str,
        usage: &'static str,
    },

    #[error("Invalid argument for `{command}`: {message}")]
    InvalidArgument {
        command: &'static str,
        message: String,
    },
}

impl FromStr for ConsoleCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let trimmed = line.trim();
        let mut parts = trimmed.splitn(2, char::is_whitespace);
        let word = parts.next().unwrap_or_default().to_lowercase();
        let argument = parts.next().unwrap_or_default().trim();

        let command = match word.as_str() {
            "" => return Err(CommandError::Empty),
            "tap" => ConsoleCommand::Tap(parse_square(argument)?),
            "click" => parse_click(argument)?,
            "promote" => ConsoleCommand::Promote(parse_promotion(argument)?),
            "cancel" => ConsoleCommand::Cancel,
            "undo" => ConsoleCommand::Undo,
            "redo" => ConsoleCommand::Redo,
            "reset" | "new" => ConsoleCommand::Reset,
            "fen" => ConsoleCommand::Fen,
            "load" if argument.is_empty() => {
                return Err(CommandError::MissingArgument {
                    command: "load",
                    usage: "load <fen>",
                })
            }
            "load" => ConsoleCommand::Load(argument.to_string()),
            "moves" | "history" => ConsoleCommand::Moves,
            "flip" => ConsoleCommand::Flip,
            "status" => ConsoleCommand::Status,
            "board" => ConsoleCommand::Board,
            "save" => ConsoleCommand::Save,
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" => ConsoleCommand::Quit,
            // A bare square is shorthand for `tap`
            other => match Square::from_algebraic(other) {
                Some(square) if argument.is_empty() => ConsoleCommand::Tap(square),
                _ => return Err(CommandError::Unknown(trimmed.to_string())),
            },
        };
        Ok(command)
    }
}

fn parse_square(argument: &str) -> Result<Square, CommandError> {
    if argument.is_empty() {
        return Err(CommandError::MissingArgument {
            command: "tap",
            usage: "tap <square>",
        });
    }
    argument
        .parse()
        .map_err(|e: crate::game::error::GameError| CommandError::InvalidArgument {
            command: "tap",
            message: e.to_string(),
        })
}

fn parse_click(argument: &str) -> Result<ConsoleCommand, CommandError> {
    let mut coords = argument.split_whitespace();
    let (Some(x), Some(y), None) = (coords.next(), coords.next(), coords.next()) else {
        return Err(CommandError::MissingArgument {
            command: "click",
            usage: "click <x> <y>",
        });
    };
    let parse = |value: &str| {
        value
            .parse::<f32>()
            .map_err(|e| CommandError::InvalidArgument {
                command: "click",
                message: format!("{value:?}: {e}"),
            })
    };
    Ok(ConsoleCommand::Click {
        x: parse(x)?,
        y: parse(y)?,
    })
}

fn parse_promotion(argument: &str) -> Result<PieceKind, CommandError> {
    let mut chars = argument.chars();
    match (chars.next().and_then(PieceKind::from_char), chars.next()) {
        (Some(kind @ (PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight)), None) => {
            Ok(kind)
        }
        _ if argument.is_empty() => Err(CommandError::MissingArgument {
            command: "promote",
            usage: "promote <q|r|b|n>",
        }),
        _ => Err(CommandError::InvalidArgument {
            command: "promote",
            message: format!("{argument:?} is not one of q, r, b, n"),
        }),
    }
}

/// Human-readable line for a tap result
pub fn describe_tap(outcome: &TapOutcome) -> String {
    match outcome {
        TapOutcome::Ignored => "Nothing to select there".to_string(),
        TapOutcome::Selected { square, targets } => {
            let targets: Vec<String> = targets.iter().map(ToString::to_string).collect();
            if targets.is_empty() {
                format!("Selected {square} (no legal moves)")
            } else {
                format!("Selected {square}: {}", targets.join(" "))
            }
        }
        TapOutcome::Deselected => "Selection cleared".to_string(),
        TapOutcome::Moved(moved) => {
            let mut line = format!("{} played {}", moved.mover, moved.mv);
            if let Some(captured) = moved.captured {
                line.push_str(&format!(", capturing {:?}", captured.kind));
            }
            if moved.game_over.is_game_over() {
                line.push_str(&format!(". {}", moved.game_over.message()));
            } else if moved.status.check {
                line.push_str(", check");
            }
            line
        }
        TapOutcome::Rejected { from, to, .. } => format!("{from}{to} is not legal"),
        TapOutcome::PromotionPending(pending) => format!(
            "Promote on {}: choose with `promote <q|r|b|n>`",
            pending.to
        ),
        TapOutcome::PromotionCancelled => "Promotion cancelled".to_string(),
    }
}

/// Draw the board in screen order, the same orientation `click` uses
///
/// The selected square is bracketed and legal targets are marked with `*`
/// (or `x` when occupied).
pub fn render_board(session: &ChessSession) -> String {
    let snapshot = session.snapshot();
    let geometry = session.geometry();
    let game = session.game();

    let mut rows = Vec::with_capacity(10);
    for row in 0..8u8 {
        let mut line = String::new();
        let mut label = ' ';
        for col in 0..8u8 {
            let center_x = geometry.origin_x + (f32::from(col) + 0.5) * geometry.tile_size;
            let center_y = geometry.origin_y + (f32::from(row) + 0.5) * geometry.tile_size;
            let Some(square) = geometry.square_at(center_x, center_y) else {
                line.push_str(" ? ");
                continue;
            };
            if col == 0 {
                label = char::from(b'0' + square.rank().to_number());
            }

            let symbol = game.piece_at(square).map_or('.', |piece| piece.symbol());
            let is_target = snapshot.legal_targets.contains(&square);
            let cell = if snapshot.selected == Some(square) {
                format!("[{symbol}]")
            } else if is_target && symbol == '.' {
                " * ".to_string()
            } else if is_target {
                format!("x{symbol} ")
            } else {
                format!(" {symbol} ")
            };
            line.push_str(&cell);
        }
        rows.push(format!("{label} {line}"));
    }

    let files: String = if geometry.flipped {
        "hgfedcba".chars().map(|c| format!(" {c} ")).collect()
    } else {
        "abcdefgh".chars().map(|c| format!(" {c} ")).collect()
    };
    rows.push(format!("  {files}"));
    rows.push(format!(
        "{} to move{}",
        snapshot.side_to_move,
        if snapshot.check { " (check)" } else { "" }
    ));
    rows.join("\n")
}

/// Console front end state: the session plus the settings it was built from
pub struct Console {
    session: ChessSession,
    settings: GameSettings,
    settings_path: PathBuf,
}

impl Console {
    pub fn new(session: ChessSession, settings: GameSettings, settings_path: PathBuf) -> Self {
        Self {
            session,
            settings,
            settings_path,
        }
    }

    pub fn session(&self) -> &ChessSession {
        &self.session
    }

    /// Parse and run one line; returns `Ok(true)` when the user quits
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        match line.parse::<ConsoleCommand>() {
            Ok(command) => self.execute(command, out),
            Err(CommandError::Empty) => Ok(false),
            Err(e) => {
                debug!("[CONSOLE] Rejected input {:?}: {}", line.trim(), e);
                writeln!(out, "{e}")?;
                Ok(false)
            }
        }
    }

    /// Run one parsed command; returns `Ok(true)` when the user quits
    pub fn execute(&mut self, command: ConsoleCommand, out: &mut impl Write) -> io::Result<bool> {
        match command {
            ConsoleCommand::Tap(square) => {
                let outcome = self.session.tap_square(Some(square));
                writeln!(out, "{}", describe_tap(&outcome))?;
            }
            ConsoleCommand::Click { x, y } => {
                let outcome = self.session.tap_point(x, y);
                writeln!(out, "{}", describe_tap(&outcome))?;
            }
            ConsoleCommand::Promote(kind) => match self.session.choose_promotion(kind) {
                Ok(moved) => writeln!(out, "{}", describe_tap(&TapOutcome::Moved(moved)))?,
                Err(e) => writeln!(out, "{e}")?,
            },
            ConsoleCommand::Cancel => {
                if self.session.cancel_selection() {
                    writeln!(out, "Selection cleared")?;
                }
            }
            ConsoleCommand::Undo => match self.session.undo() {
                Some(mv) => writeln!(out, "Undid {mv}")?,
                None => writeln!(out, "Nothing to undo")?,
            },
            ConsoleCommand::Redo => match self.session.redo() {
                Some(mv) => writeln!(out, "Redid {mv}")?,
                None => writeln!(out, "Nothing to redo")?,
            },
            ConsoleCommand::Reset => {
                self.session.reset();
                writeln!(out, "New game")?;
            }
            ConsoleCommand::Fen => writeln!(out, "{}", self.session.game().fen())?,
            ConsoleCommand::Load(fen) => match self.session.load_fen(&fen) {
                Ok(()) => writeln!(out, "{}", render_board(&self.session))?,
                Err(e) => writeln!(out, "{e}")?,
            },
            ConsoleCommand::Moves => {
                let moves = self.session.game().played_moves();
                if moves.is_empty() {
                    writeln!(out, "No moves played")?;
                }
                for (number, pair) in moves.chunks(2).enumerate() {
                    match pair {
                        [white, black] => writeln!(out, "{}. {} {}", number + 1, white, black)?,
                        [white] => writeln!(out, "{}. {}", number + 1, white)?,
                        _ => {}
                    }
                }
            }
            ConsoleCommand::Flip => {
                self.session.flip_board();
                writeln!(out, "{}", render_board(&self.session))?;
            }
            ConsoleCommand::Status => match serde_json::to_string_pretty(&self.session.snapshot()) {
                Ok(json) => writeln!(out, "{json}")?,
                Err(e) => {
                    error!("[CONSOLE] Failed to serialize snapshot: {}", e);
                    writeln!(out, "Failed to serialize snapshot: {e}")?;
                }
            },
            ConsoleCommand::Board => writeln!(out, "{}", render_board(&self.session))?,
            ConsoleCommand::Save => {
                self.settings.board = *self.session.geometry();
                self.settings.promotion = self.session.interaction().policy();
                match save_settings_to(&self.settings_path, &self.settings) {
                    Ok(()) => writeln!(out, "Settings saved to {}", self.settings_path.display())?,
                    Err(e) => {
                        error!("[SETTINGS] Failed to save settings: {}", e);
                        writeln!(out, "Failed to save settings: {e}")?;
                    }
                }
            }
            ConsoleCommand::Help => writeln!(out, "{HELP_TEXT}")?,
            ConsoleCommand::Quit => return Ok(true),
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn console() -> Console {
        Console::new(
            ChessSession::default(),
            GameSettings::default(),
            std::env::temp_dir().join("tapchess-console-unit.json"),
        )
    }

    fn run(console: &mut Console, line: &str) -> String {
        let mut out = Vec::new();
        console.handle_line(line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    // ========================================================================
    // Parsing
    // ========================================================================

    #[test]
    fn test_parse_commands() {
        assert_eq!("tap e2".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Tap(sq("e2"))));
        assert_eq!("  E4 ".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Tap(sq("e4"))));
        assert_eq!(
            "click 10 20.5".parse::<ConsoleCommand>(),
            Ok(ConsoleCommand::Click { x: 10.0, y: 20.5 })
        );
        assert_eq!("promote N".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Promote(PieceKind::Knight)));
        assert_eq!("UNDO".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Undo));
        assert_eq!(
            "load 8/8/8/8/8/8/8/K6k w - - 0 1".parse::<ConsoleCommand>(),
            Ok(ConsoleCommand::Load("8/8/8/8/8/8/8/K6k w - - 0 1".to_string()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<ConsoleCommand>(), Err(CommandError::Empty));
        assert!(matches!(
            "castle".parse::<ConsoleCommand>(),
            Err(CommandError::Unknown(_))
        ));
        assert!(matches!(
            "tap".parse::<ConsoleCommand>(),
            Err(CommandError::MissingArgument { command: "tap", .. })
        ));
        assert!(matches!(
            "tap z9".parse::<ConsoleCommand>(),
            Err(CommandError::InvalidArgument { command: "tap", .. })
        ));
        assert!(matches!(
            "promote k".parse::<ConsoleCommand>(),
            Err(CommandError::InvalidArgument { command: "promote", .. })
        ));
        assert!(matches!(
            "click 1".parse::<ConsoleCommand>(),
            Err(CommandError::MissingArgument { command: "click", .. })
        ));
    }

    // ========================================================================
    // Execution
    // ========================================================================

    #[test]
    fn test_tap_tap_moves() {
        let mut console = console();
        assert!(run(&mut console, "tap e2").starts_with("Selected e2: e3 e4"));
        assert_eq!(run(&mut console, "tap e4"), "White played e2e4\n");
        assert_eq!(run(&mut console, "moves"), "1. e2e4\n");
    }

    #[test]
    fn test_undo_redo_messages() {
        let mut console = console();
        assert_eq!(run(&mut console, "undo"), "Nothing to undo\n");
        run(&mut console, "e2");
        run(&mut console, "e4");
        assert_eq!(run(&mut console, "undo"), "Undid e2e4\n");
        assert_eq!(run(&mut console, "redo"), "Redid e2e4\n");
        assert_eq!(run(&mut console, "redo"), "Nothing to redo\n");
    }

    #[test]
    fn test_quit_stops_loop() {
        let mut console = console();
        let mut out = Vec::new();
        assert!(console.handle_line("quit", &mut out).unwrap());
        assert!(!console.handle_line("board", &mut out).unwrap());
    }

    #[test]
    fn test_render_marks_selection_and_targets() {
        let mut console = console();
        run(&mut console, "tap g1");
        let board = render_board(console.session());

        assert!(board.contains("[N]"));
        assert_eq!(board.matches(" * ").count(), 2);
        assert!(board.ends_with("White to move"));
    }
}
