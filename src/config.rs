use core::time::Duration;

use crate::common::ConfigError;
use crate::ship::{ShipDef, ShipId};

pub const DEFAULT_BOARD_SIZE: usize = 10;

/// Smallest board on which random placement of the full roster can never
/// paint itself into a corner.
pub const MIN_BOARD_SIZE: usize = 7;

/// One column per letter `A`-`Z`.
pub const MAX_BOARD_SIZE: usize = 26;

/// Pause between chained AI shots.
pub const DEFAULT_AI_DELAY: Duration = Duration::from_millis(350);

pub const NUM_SHIPS: usize = 5;
pub const ROSTER: [ShipDef; NUM_SHIPS] = [
    ShipDef::new("Carrier", 5),
    ShipDef::new("Battleship", 4),
    ShipDef::new("Cruiser", 3),
    ShipDef::new("Submarine", 3),
    ShipDef::new("Destroyer", 2),
];

/// Total number of ship segments in the standard roster.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Roster entries paired with the id their ship receives.
pub fn roster() -> impl Iterator<Item = (ShipId, ShipDef)> {
    ROSTER
        .iter()
        .copied()
        .enumerate()
        .map(|(i, def)| (ShipId(i), def))
}

/// Roster entry for `id`, if there is one.
pub fn ship_def(id: ShipId) -> Option<ShipDef> {
    ROSTER.get(id.0).copied()
}

pub(crate) fn check_board_size(size: usize) -> Result<(), ConfigError> {
    if size < MIN_BOARD_SIZE {
        return Err(ConfigError::BoardTooSmall {
            size,
            min: MIN_BOARD_SIZE,
        });
    }
    if size > MAX_BOARD_SIZE {
        return Err(ConfigError::BoardTooLarge {
            size,
            max: MAX_BOARD_SIZE,
        });
    }
    Ok(())
}

/// Settings fixed for the lifetime of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    board_size: usize,
    ai_delay: Duration,
}

impl GameConfig {
    /// Validate a board size against [`MIN_BOARD_SIZE`] and [`MAX_BOARD_SIZE`].
    pub fn new(board_size: usize) -> Result<Self, ConfigError> {
        check_board_size(board_size)?;
        Ok(Self {
            board_size,
            ai_delay: DEFAULT_AI_DELAY,
        })
    }

    pub fn with_ai_delay(mut self, delay: Duration) -> Self {
        self.ai_delay = delay;
        self
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn ai_delay(&self) -> Duration {
        self.ai_delay
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            ai_delay: DEFAULT_AI_DELAY,
        }
    }
}
