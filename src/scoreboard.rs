#![cfg(feature = "std")]

//! Win/loss tallies per difficulty, fed by [`MatchConcluded`] events and
//! kept in a JSON file between runs.

use std::{fmt, fs, io, path::Path};

use anyhow::Context;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{ai::Difficulty, game::MatchConcluded, game::Side};

/// Wins and losses from the player's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tally {
    pub wins: u32,
    pub losses: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoreboard {
    pub easy: Tally,
    pub medium: Tally,
    pub hard: Tally,
}

impl Scoreboard {
    /// Read tallies from `path`. A missing file gives an empty board; an
    /// unreadable one is logged and replaced by an empty board.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(err).with_context(|| format!("reading scores from {}", path.display()))
            }
        };
        match serde_json::from_str(&text) {
            Ok(board) => Ok(board),
            Err(err) => {
                warn!("ignoring corrupt score file {}: {}", path.display(), err);
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating score directory {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing scores to {}", path.display()))?;
        debug!("scores saved to {}", path.display());
        Ok(())
    }

    /// Count one finished match.
    pub fn record(&mut self, event: &MatchConcluded) {
        let tally = self.tally_mut(event.difficulty);
        match event.winner {
            Side::Player => tally.wins += 1,
            Side::Ai => tally.losses += 1,
        }
    }

    pub fn tally(&self, difficulty: Difficulty) -> Tally {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    fn tally_mut(&mut self, difficulty: Difficulty) -> &mut Tally {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }

    pub fn totals(&self) -> Tally {
        Difficulty::ALL
            .iter()
            .map(|&d| self.tally(d))
            .fold(Tally::default(), |acc, t| Tally {
                wins: acc.wins + t.wins,
                losses: acc.losses + t.losses,
            })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.totals();
        writeln!(f, "{:<8} {:>4} {:>4}", "", "W", "L")?;
        writeln!(f, "{:<8} {:>4} {:>4}", "total", total.wins, total.losses)?;
        for d in Difficulty::ALL {
            let t = self.tally(d);
            write!(f, "{:<8} {:>4} {:>4}", d.as_str(), t.wins, t.losses)?;
            if d != Difficulty::Hard {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
