//! Common types: coordinates, shot outcomes and the error enums shared by
//! the placement engine, the shot resolver and the match controller.

use core::fmt;

use crate::ship::ShipId;

/// Board coordinate as `(row, col)`, zero based.
pub type Coord = (usize, usize);

/// Result of a legal shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The shot landed in open water.
    Miss,
    /// The shot struck a ship. `sunk` carries the ship's id when this hit
    /// was its last intact segment.
    Hit { sunk: Option<ShipId> },
}

impl Outcome {
    /// `true` for any hit, sinking or not.
    pub fn is_hit(&self) -> bool {
        matches!(self, Outcome::Hit { .. })
    }

    /// Id of the ship sunk by this shot, if any.
    pub fn sunk(&self) -> Option<ShipId> {
        match self {
            Outcome::Hit { sunk } => *sunk,
            Outcome::Miss => None,
        }
    }
}

/// Reasons a shot is rejected. A rejected shot never mutates the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotError {
    /// The cell already reads `Miss`, `Hit` or `Sunk`.
    AlreadyTargeted,
    /// The coordinate lies outside the grid.
    OutOfBounds { row: usize, col: usize },
}

impl fmt::Display for ShotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotError::AlreadyTargeted => write!(f, "cell was already targeted"),
            ShotError::OutOfBounds { row, col } => {
                write!(f, "coordinate ({}, {}) is off the board", row, col)
            }
        }
    }
}

/// Reasons a ship placement is rejected. Nothing is placed on error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Part of the ship would hang off the board.
    OutOfBounds,
    /// The ship would cross a cell that is not empty.
    Overlap,
    /// A ship with this id is already in the fleet.
    AlreadyPlaced,
    /// Every roster ship has been placed.
    FleetComplete,
    /// No legal position is left for the ship.
    NoRoom,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "ship placement is out of bounds"),
            PlacementError::Overlap => write!(f, "ship placement overlaps another ship"),
            PlacementError::AlreadyPlaced => write!(f, "ship is already placed"),
            PlacementError::FleetComplete => write!(f, "all ships are already placed"),
            PlacementError::NoRoom => write!(f, "no room left on the board for the ship"),
        }
    }
}

/// Rejected match settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Random placement is only guaranteed to finish on boards at least
    /// `min` cells wide.
    BoardTooSmall { size: usize, min: usize },
    /// Columns are lettered, so boards stop at `max`.
    BoardTooLarge { size: usize, max: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardTooSmall { size, min } => {
                write!(f, "board size {} is below the minimum of {}", size, min)
            }
            ConfigError::BoardTooLarge { size, max } => {
                write!(f, "board size {} is above the maximum of {}", size, max)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ShotError {}
#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
