//! Line-oriented front end for terminals without raw mode and for scripting.
//!
//! Reads one command per line: `1`-`4` drops in that column, `t` retries the
//! remote move, `n` starts a new game, `q` quits.

use std::io::{self, BufRead, Write};

use tokio::runtime::Handle;

use crate::game::{Cell, GameState, COLS};
use crate::remote::MoveSource;
use crate::session::Session;

/// Plain-text board, top row first, with column numbers underneath.
pub fn render_text(state: &GameState) -> String {
    let mut out = String::new();
    for row in state.snapshot() {
        out.push('|');
        for cell in row {
            out.push(match cell {
                Cell::Empty => '.',
                Cell::PlayerOne => 'X',
                Cell::PlayerTwo => 'O',
            });
        }
        out.push_str("|\n");
    }
    out.push(' ');
    for col in 0..COLS {
        out.push_str(&(col + 1).to_string());
    }
    out.push('\n');
    out
}

pub fn run_headless<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    source: &dyn MoveSource,
    runtime: &Handle,
) -> io::Result<()> {
    let mut session = Session::new();
    write!(output, "{}", render_text(session.state()))?;
    writeln!(output, "{}", session.message())?;

    for line in input.lines() {
        let line = line?;
        let command = line.trim();

        let result = match command {
            "q" => break,
            "" => continue,
            "n" => {
                session.reset();
                Ok(())
            }
            "t" => runtime.block_on(session.run_remote_turn(source)).map(|_| ()),
            other => match other.parse::<usize>() {
                Ok(col) if (1..=COLS).contains(&col) => runtime
                    .block_on(session.play_and_respond(col - 1, source))
                    .map(|_| ()),
                _ => {
                    writeln!(output, "Unknown command '{}'", other)?;
                    continue;
                }
            },
        };

        if let Err(err) = result {
            writeln!(output, "Error: {}", err)?;
        }
        write!(output, "{}", render_text(session.state()))?;
        writeln!(output, "{}", session.message())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::ScriptedMoveSource;

    #[test]
    fn test_render_text() {
        let state = GameState::replay([0, 3]).unwrap();
        assert_eq!(render_text(&state), "|....|\n|....|\n|....|\n|X..O|\n 1234\n");
    }

    #[test]
    fn test_headless_game_to_win() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let source = ScriptedMoveSource::columns([2, 2, 2]);
        let input = io::Cursor::new("1\n1\n1\n1\n1\nq\n");
        let mut output = Vec::new();

        run_headless(input, &mut output, &source, runtime.handle()).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Player 1 wins"), "output was:\n{}", text);
        assert!(text.contains("Error: game is over, start a new game"));
    }

    #[test]
    fn test_headless_reports_unknown_command() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let source = ScriptedMoveSource::columns(Vec::new());
        let mut output = Vec::new();

        run_headless(io::Cursor::new("9\nq\n"), &mut output, &source, runtime.handle()).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Unknown command '9'"));
    }
}
