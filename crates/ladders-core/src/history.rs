//! Move history and its flat-file format.
//!
//! One line per move: `<player> moved to <position> after rolling <roll>`.

use crate::board::Position;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed history line {line}: {content:?}")]
    Malformed { line: usize, content: String },
}

/// A resolved move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub player: String,
    /// Square after the move
    pub position: Position,
    pub roll: u8,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} moved to {} after rolling {}",
            self.player, self.position, self.roll
        )
    }
}

impl FromStr for HistoryEntry {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Split from the right: player names may contain spaces
        let (rest, roll) = s.rsplit_once(" after rolling ").ok_or(())?;
        let (player, position) = rest.rsplit_once(" moved to ").ok_or(())?;
        if player.is_empty() {
            return Err(());
        }

        Ok(Self {
            player: player.to_string(),
            position: position.trim().parse().map_err(|_| ())?,
            roll: roll.trim().parse().map_err(|_| ())?,
        })
    }
}

/// Overwrite `path` with the given history
pub fn write_history(path: impl AsRef<Path>, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
    let mut contents = String::new();
    for entry in entries {
        contents.push_str(&entry.to_string());
        contents.push('\n');
    }
    fs::write(path, contents)?;
    Ok(())
}

/// Read a history file. A missing file is an empty history.
pub fn read_history(path: impl AsRef<Path>) -> Result<Vec<HistoryEntry>, HistoryError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            line.parse().map_err(|_| HistoryError::Malformed {
                line: i + 1,
                content: line.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(player: &str, position: Position, roll: u8) -> HistoryEntry {
        HistoryEntry {
            player: player.to_string(),
            position,
            roll,
        }
    }

    #[test]
    fn test_line_format() {
        assert_eq!(
            entry("Player 1", 14, 2).to_string(),
            "Player 1 moved to 14 after rolling 2"
        );
    }

    #[test]
    fn test_parse_name_with_keywords() {
        let parsed: HistoryEntry = "Sir moved to Town moved to 40 after rolling 6".parse().unwrap();
        assert_eq!(parsed, entry("Sir moved to Town", 40, 6));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let history = read_history(dir.path().join("nope.txt")).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.txt");
        let entries = vec![entry("Ana", 3, 3), entry("Bo", 14, 4), entry("Ana", 3, 6)];

        write_history(&path, &entries).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert_eq!(read_history(&path).unwrap(), entries);

        // Overwritten, not appended
        write_history(&path, &entries[..1]).unwrap();
        assert_eq!(read_history(&path).unwrap(), entries[..1].to_vec());
    }

    #[test]
    fn test_malformed_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.txt");
        fs::write(&path, "Ana moved to 3 after rolling 3\ngarbage\n").unwrap();

        match read_history(&path) {
            Err(HistoryError::Malformed { line, content }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "garbage");
            }
            other => panic!("expected malformed error, got {other:?}"),
        }
    }
}
