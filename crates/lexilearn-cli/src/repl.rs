//! Line-oriented play loop shared by the rearrangement games.
//!
//! Every input modality ends up as one of these commands; here they are
//! typed. `move tray 0 board 2` is the same move a drag-and-drop would make.

use std::io::{BufRead, Write};

use anyhow::{bail, Result};

use lexilearn_core::model::{Location, Token, Zone};
use lexilearn_core::session::{Outcome, Session};
use lexilearn_core::tiles::{Move, MoveOutcome};

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(Move),
    Check,
    Reset,
    Show,
    Next,
    Help,
    Quit,
}

const HELP: &str = "\
Commands:
  move <from-zone> <index> <to-zone> <index>   e.g. move tray 0 board 2
  check                                        check the board
  reset                                        put every tile back in the tray
  show                                         show the board and tray
  next                                         skip to the next puzzle
  quit                                         stop playing";

fn parse_location(zone: &str, index: &str) -> Result<Location> {
    let zone: Zone = zone.parse().map_err(anyhow::Error::msg)?;
    let index: usize = index
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid index: '{index}'"))?;
    Ok(Location { zone, index })
}

/// Parse one input line. Blank lines are `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match (head.to_lowercase().as_str(), args) {
        ("move" | "m", [from_zone, from_index, to_zone, to_index]) => Command::Move(Move::new(
            parse_location(from_zone, from_index)?,
            parse_location(to_zone, to_index)?,
        )),
        ("move" | "m", _) => bail!("usage: move <zone> <index> <zone> <index>"),
        ("check" | "c", []) => Command::Check,
        ("reset", []) => Command::Reset,
        ("show" | "s", []) => Command::Show,
        ("next" | "n", []) => Command::Next,
        ("help" | "h" | "?", []) => Command::Help,
        ("quit" | "q" | "exit", []) => Command::Quit,
        (other, _) => bail!("unknown command: '{other}' (type 'help')"),
    };
    Ok(Some(command))
}

fn render_zone(name: &str, slots: &[Option<Token>]) -> String {
    let cell = |slot: &Option<Token>| match slot {
        Some(token) => token.to_string(),
        None => "_".to_string(),
    };

    if slots.iter().flatten().all(|t| t.as_str().chars().count() <= 2) {
        let cells: Vec<String> = slots
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{i}:{}", cell(s)))
            .collect();
        format!("{name:<6} {}", cells.join("  "))
    } else {
        let mut out = format!("{name}:");
        for (i, slot) in slots.iter().enumerate() {
            out.push_str(&format!("\n  {i}: {}", cell(slot)));
        }
        out
    }
}

/// The current puzzle, board and tray.
pub fn render(session: &Session) -> String {
    let tiles = session.tiles();
    format!(
        "Puzzle {}/{} ({})\n{}\n{}",
        session.index() + 1,
        session.puzzles().count(),
        session.puzzle().id,
        render_zone("board", tiles.board().slots()),
        render_zone("tray", tiles.tray().slots()),
    )
}

/// Play until `quit` or end of input. Returns the number of puzzles solved.
pub async fn play<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
) -> Result<u32> {
    writeln!(out, "{}", render(session))?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        match command {
            Command::Move(mv) => match session.apply_move(mv) {
                Ok(MoveOutcome::Unchanged) => {}
                Ok(MoveOutcome::Placed(_)) => writeln!(out, "{}", render(session))?,
                Ok(MoveOutcome::Displaced { token, to }) => {
                    writeln!(out, "{token} went back to {to}")?;
                    writeln!(out, "{}", render(session))?;
                }
                // Invalid moves change nothing and are not reported as errors.
                Err(e) => tracing::debug!("ignored move: {e}"),
            },
            Command::Check => {
                match session.check() {
                    Outcome::Success => {
                        writeln!(out, "Correct! Well done.")?;
                        tokio::time::sleep(session.success_delay()).await;
                    }
                    Outcome::Failure => writeln!(out, "Not quite. Try again!")?,
                }
                session.resume();
                writeln!(out, "{}", render(session))?;
            }
            Command::Reset => {
                session.reset();
                writeln!(out, "{}", render(session))?;
            }
            Command::Show => writeln!(out, "{}", render(session))?,
            Command::Next => {
                session.advance();
                writeln!(out, "{}", render(session))?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
        }
    }

    writeln!(out, "Solved {} puzzle(s).", session.solved())?;
    Ok(session.solved())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexilearn_core::puzzles::spelling_words;
    use lexilearn_core::session::SessionConfig;
    use std::io::Cursor;
    use std::time::Duration;

    fn session() -> Session {
        Session::new(
            spelling_words(),
            SessionConfig {
                success_delay: Duration::ZERO,
                ..SessionConfig::default()
            },
        )
    }

    #[test]
    fn parse_move() {
        let cmd = parse_command("move tray 0 board 2").unwrap().unwrap();
        assert_eq!(
            cmd,
            Command::Move(Move::new(Location::tray(0), Location::board(2)))
        );
        let short = parse_command("m t 1 b 0").unwrap().unwrap();
        assert_eq!(
            short,
            Command::Move(Move::new(Location::tray(1), Location::board(0)))
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_command("move tray x board 0").is_err());
        assert!(parse_command("move sky 0 board 0").is_err());
        assert!(parse_command("move tray 0").is_err());
        assert!(parse_command("dance").is_err());
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn render_short_tokens_inline() {
        let text = render(&session());
        assert!(text.contains("Puzzle 1/5 (was)"));
        assert!(text.contains("board  0:_  1:_  2:_"));
        assert!(text.contains("tray   0:S  1:W  2:A"));
    }

    #[tokio::test]
    async fn solve_first_word() {
        let mut session = session();
        // Tray is S W A; target is W A S.
        let input = "move tray 1 board 0\nmove tray 2 board 1\nmove tray 0 board 2\ncheck\nquit\n";
        let mut out = Vec::new();
        let solved = play(&mut session, Cursor::new(input), &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(solved, 1);
        assert!(text.contains("Correct!"));
        assert!(text.contains("Puzzle 2/5 (bed)"));
    }

    #[tokio::test]
    async fn wrong_answer_stays_on_puzzle() {
        let mut session = session();
        let input = "move tray 0 board 0\nmove tray 1 board 1\nmove tray 2 board 2\ncheck\n";
        let mut out = Vec::new();
        play(&mut session, Cursor::new(input), &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Not quite"));
        assert_eq!(session.index(), 0);
        assert_eq!(session.tiles().board().tokens().count(), 3);
    }

    #[tokio::test]
    async fn invalid_moves_are_silent() {
        let mut session = session();
        let input = "move board 0 tray 0\nmove tray 9 board 0\n";
        let mut out = Vec::new();
        play(&mut session, Cursor::new(input), &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.to_lowercase().contains("error"));
        assert_eq!(session.tiles().tray().tokens().count(), 3);
    }
}
