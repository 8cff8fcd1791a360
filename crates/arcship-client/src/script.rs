//! Line-based control script read from stdin.
//!
//! One command per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! down Up          # key pressed
//! up Control       # key released
//! color            # one step of the color walk
//! move 120 80      # teleport
//! quit             # start the destroy fade
//! ```

use arcship_core::KeyEvent;
use glam::Vec2;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Key(KeyEvent),
    Color,
    MoveTo(Vec2),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("`{0}` expects {1}")]
    MissingArgument(&'static str, &'static str),

    #[error("`{0}` is not a coordinate")]
    BadCoordinate(String),
}

/// Parses one script line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let command = match verb {
        "down" => Command::Key(KeyEvent::down(
            words
                .next()
                .ok_or(ParseError::MissingArgument("down", "a key"))?,
        )),
        "up" => Command::Key(KeyEvent::up(
            words
                .next()
                .ok_or(ParseError::MissingArgument("up", "a key"))?,
        )),
        "color" => Command::Color,
        "move" => {
            let x = coordinate(words.next())?;
            let y = coordinate(words.next())?;
            Command::MoveTo(Vec2::new(x, y))
        }
        "quit" => Command::Quit,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn coordinate(word: Option<&str>) -> Result<f32, ParseError> {
    let word = word.ok_or(ParseError::MissingArgument("move", "two coordinates"))?;
    word.parse()
        .map_err(|_| ParseError::BadCoordinate(word.to_string()))
}
