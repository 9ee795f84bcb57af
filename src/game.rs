use alloc::collections::VecDeque;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use log::{debug, info};
use rand::{rngs::SmallRng, Rng};

use crate::{
    ai::{Difficulty, Targeting},
    common::{Coord, Outcome, PlacementError, ShotError},
    config::{roster, ship_def, GameConfig, ROSTER},
    grid::Grid,
    placement::{can_place, place_remaining, place_specific, placement_preview, seed_fleet},
    shot::{fleet_defeated, resolve_shot},
    ship::{Fleet, Orientation, ShipDef, ShipId},
};

/// One of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => f.pad("player"),
            Side::Ai => f.pad("ai"),
        }
    }
}

/// Where a match currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchState {
    /// The player is still laying out ships.
    Placement,
    PlayerTurn,
    AiTurn,
    GameOver { winner: Side },
}

/// Emitted once per match when a fleet is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchConcluded {
    pub winner: Side,
    pub difficulty: Difficulty,
}

/// Errors returned by [`Match`] operations. None of them change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    Shot(ShotError),
    Placement(PlacementError),
    /// The move belongs to the other side.
    NotYourTurn,
    /// Placement and difficulty changes are only allowed before battle.
    NotPlacing,
    /// Shots are refused until the player's fleet is complete.
    FleetNotPlaced,
    GameOver,
    /// The AI ticket predates a reset.
    StaleTurn,
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::Shot(e) => write!(f, "shot rejected: {}", e),
            MatchError::Placement(e) => write!(f, "placement rejected: {}", e),
            MatchError::NotYourTurn => write!(f, "it is not this side's turn"),
            MatchError::NotPlacing => write!(f, "ship placement is over"),
            MatchError::FleetNotPlaced => write!(f, "all ships must be placed first"),
            MatchError::GameOver => write!(f, "the match is over"),
            MatchError::StaleTurn => write!(f, "the AI turn was cancelled by a reset"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatchError {}

impl From<ShotError> for MatchError {
    fn from(err: ShotError) -> Self {
        MatchError::Shot(err)
    }
}

impl From<PlacementError> for MatchError {
    fn from(err: PlacementError) -> Self {
        MatchError::Placement(err)
    }
}

/// Grid and fleet owned by one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideBoard {
    grid: Grid,
    fleet: Fleet,
}

impl SideBoard {
    fn empty(size: usize) -> Self {
        Self {
            grid: Grid::new(size),
            fleet: Fleet::new(),
        }
    }

    fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let (grid, fleet) = seed_fleet(size, rng);
        Self { grid, fleet }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    fn fire(&mut self, (row, col): Coord) -> Result<Outcome, ShotError> {
        resolve_shot(&mut self.grid, &mut self.fleet, row, col)
    }
}

/// Permission for one chain of AI shots, bound to the match epoch it was
/// issued in. A reset bumps the epoch and voids every outstanding ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTicket {
    epoch: u64,
}

/// What happened on one AI step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiShot {
    Fired { coord: Coord, outcome: Outcome },
    /// The strategy found nothing to target; the turn went back to the player.
    NoLegalMove,
}

/// Cells a placement would cover and whether it is currently legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementPreview {
    pub cells: Vec<Coord>,
    pub valid: bool,
}

/// Turn sequencing, win detection and strategy dispatch for one
/// player-versus-computer match.
pub struct Match {
    config: GameConfig,
    auto_place: bool,
    player: SideBoard,
    ai: SideBoard,
    state: MatchState,
    difficulty: Difficulty,
    targeting: Targeting,
    placing: usize,
    orientation: Orientation,
    last_event: String,
    epoch: u64,
    concluded: VecDeque<MatchConcluded>,
}

impl Match {
    /// Start a match in [`MatchState::Placement`]: the computer's fleet is
    /// placed at random, the player's board is empty.
    pub fn new<R: Rng + ?Sized>(config: GameConfig, difficulty: Difficulty, rng: &mut R) -> Self {
        let mut game = Self::blank(config, difficulty, false, rng);
        game.begin_placement();
        game
    }

    /// Start a match with both fleets placed at random, skipping
    /// [`MatchState::Placement`]. The player shoots first.
    pub fn with_random_fleets<R: Rng + ?Sized>(
        config: GameConfig,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Self {
        let mut game = Self::blank(config, difficulty, true, rng);
        game.player = SideBoard::random(config.board_size(), rng);
        game.state = MatchState::PlayerTurn;
        game.last_event = "Fleets deployed. Your turn.".to_string();
        game
    }

    fn blank<R: Rng + ?Sized>(
        config: GameConfig,
        difficulty: Difficulty,
        auto_place: bool,
        rng: &mut R,
    ) -> Self {
        let size = config.board_size();
        Self {
            config,
            auto_place,
            player: SideBoard::empty(size),
            ai: SideBoard::random(size, rng),
            state: MatchState::Placement,
            difficulty,
            targeting: Targeting::new(difficulty),
            placing: 0,
            orientation: Orientation::Horizontal,
            last_event: String::new(),
            epoch: 0,
            concluded: VecDeque::new(),
        }
    }

    fn begin_placement(&mut self) {
        self.state = MatchState::Placement;
        self.placing = 0;
        self.orientation = Orientation::Horizontal;
        let first = ROSTER[0];
        self.last_event = format!("Place your {} ({}).", first.name(), first.length());
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn winner(&self) -> Option<Side> {
        match self.state {
            MatchState::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Strategy state of the computer side.
    pub fn targeting(&self) -> &Targeting {
        &self.targeting
    }

    /// Human-readable description of the latest event.
    pub fn last_event(&self) -> &str {
        &self.last_event
    }

    /// Board of `side`. Whether ships are shown is up to the renderer.
    pub fn board(&self, side: Side) -> &SideBoard {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai,
        }
    }

    /// Change the computer's tier. Only allowed during placement.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), MatchError> {
        if self.state != MatchState::Placement {
            return Err(MatchError::NotPlacing);
        }
        self.difficulty = difficulty;
        self.targeting = Targeting::new(difficulty);
        info!("difficulty set to {}", difficulty);
        Ok(())
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Flip the orientation used by the next manual placement.
    pub fn rotate(&mut self) -> Result<Orientation, MatchError> {
        if self.state != MatchState::Placement {
            return Err(MatchError::NotPlacing);
        }
        self.orientation = self.orientation.rotated();
        Ok(self.orientation)
    }

    /// Ship the player places next, while in placement.
    pub fn next_ship(&self) -> Option<(ShipId, ShipDef)> {
        if self.state != MatchState::Placement {
            return None;
        }
        let id = ShipId(self.placing);
        ship_def(id).map(|def| (id, def))
    }

    /// Cells the next ship would cover from (`row`, `col`) in the current
    /// orientation.
    pub fn preview(&self, row: usize, col: usize) -> Option<PlacementPreview> {
        let (_, def) = self.next_ship()?;
        let size = self.config.board_size();
        let cells = placement_preview(row, col, def.length(), self.orientation, size);
        let valid = cells.len() == def.length()
            && can_place(&self.player.grid, row, col, def.length(), self.orientation);
        Some(PlacementPreview { cells, valid })
    }

    /// Place the next ship at (`row`, `col`). The sequence only advances on
    /// success; placing the last ship starts the battle.
    pub fn place_next(&mut self, row: usize, col: usize) -> Result<ShipId, MatchError> {
        let (id, def) = match self.state {
            MatchState::Placement => self.next_ship().ok_or(PlacementError::FleetComplete)?,
            _ => return Err(MatchError::NotPlacing),
        };
        let board = &mut self.player;
        if let Err(err) = place_specific(
            &mut board.grid,
            &mut board.fleet,
            id,
            def,
            row,
            col,
            self.orientation,
        ) {
            self.last_event = "Invalid placement. Try another spot/orientation.".to_string();
            return Err(err.into());
        }
        self.placing += 1;
        match ship_def(ShipId(self.placing)) {
            Some(next) => {
                self.last_event = format!(
                    "Placed {}. Next: {} ({}).",
                    def.name(),
                    next.name(),
                    next.length()
                );
            }
            None => self.start_battle(),
        }
        Ok(id)
    }

    /// Randomly place every ship the player has not placed yet.
    pub fn place_rest<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), MatchError> {
        if self.state != MatchState::Placement {
            return Err(MatchError::NotPlacing);
        }
        let board = &mut self.player;
        place_remaining(&mut board.grid, &mut board.fleet, rng)?;
        self.placing = ROSTER.len();
        self.start_battle();
        Ok(())
    }

    fn start_battle(&mut self) {
        self.state = MatchState::PlayerTurn;
        self.last_event = "All ships placed! Your turn.".to_string();
        info!("battle started against {} computer", self.difficulty);
    }

    /// Fire the player's shot at the computer's board.
    pub fn fire(&mut self, row: usize, col: usize) -> Result<Outcome, MatchError> {
        match self.state {
            MatchState::PlayerTurn => {}
            MatchState::AiTurn => return Err(MatchError::NotYourTurn),
            MatchState::Placement => return Err(MatchError::FleetNotPlaced),
            MatchState::GameOver { .. } => return Err(MatchError::GameOver),
        }
        let outcome = self.ai.fire((row, col))?;
        debug!("player fired at ({}, {}): {:?}", row, col, outcome);
        self.after_shot(Side::Player, outcome);
        Ok(outcome)
    }

    /// Ticket for the computer's current turn, if it is the computer's turn.
    pub fn ai_ticket(&self) -> Option<AiTicket> {
        match self.state {
            MatchState::AiTurn => Some(AiTicket { epoch: self.epoch }),
            _ => None,
        }
    }

    /// Let the computer take one shot. After a hit the turn stays with the
    /// computer and the same ticket may be used again.
    pub fn ai_fire(&mut self, ticket: AiTicket, rng: &mut SmallRng) -> Result<AiShot, MatchError> {
        if ticket.epoch != self.epoch {
            return Err(MatchError::StaleTurn);
        }
        match self.state {
            MatchState::AiTurn => {}
            MatchState::GameOver { .. } => return Err(MatchError::GameOver),
            _ => return Err(MatchError::NotYourTurn),
        }

        let Some(coord) = self
            .targeting
            .choose_move(&self.player.grid, &self.player.fleet, rng)
        else {
            self.state = MatchState::PlayerTurn;
            self.last_event = "Enemy has no valid shots left. Your turn.".to_string();
            return Ok(AiShot::NoLegalMove);
        };

        let outcome = self.player.fire(coord)?;
        debug!("ai fired at {:?}: {:?}", coord, outcome);
        self.targeting
            .update_memory(&self.player.grid, coord, outcome);
        self.after_shot(Side::Ai, outcome);
        Ok(AiShot::Fired { coord, outcome })
    }

    fn after_shot(&mut self, shooter: Side, outcome: Outcome) {
        let target = self.board(shooter.opponent());
        if fleet_defeated(&target.fleet) {
            self.state = MatchState::GameOver { winner: shooter };
            self.last_event = match shooter {
                Side::Player => "You win! All enemy ships sunk.",
                Side::Ai => "Defeat. All your ships are sunk.",
            }
            .to_string();
            let event = MatchConcluded {
                winner: shooter,
                difficulty: self.difficulty,
            };
            info!("match over: {} won on {}", shooter, self.difficulty);
            self.concluded.push_back(event);
            return;
        }

        let sunk_name = outcome
            .sunk()
            .and_then(|id| target.fleet.get(id))
            .map(|ship| ship.name());
        self.last_event = match (shooter, outcome, sunk_name) {
            (Side::Player, Outcome::Hit { .. }, Some(name)) => format!("You sunk the enemy's {}!", name),
            (Side::Player, Outcome::Hit { .. }, None) => "Hit!".to_string(),
            (Side::Player, Outcome::Miss, _) => "Miss. Enemy turn.".to_string(),
            (Side::Ai, Outcome::Hit { .. }, Some(name)) => format!("Enemy sunk your {}!", name),
            (Side::Ai, Outcome::Hit { .. }, None) => "Enemy hit!".to_string(),
            (Side::Ai, Outcome::Miss, _) => "Enemy missed. Your turn.".to_string(),
        };
        if !outcome.is_hit() {
            self.state = match shooter {
                Side::Player => MatchState::AiTurn,
                Side::Ai => MatchState::PlayerTurn,
            };
        }
    }

    /// Take the next unreported [`MatchConcluded`] event.
    pub fn take_concluded(&mut self) -> Option<MatchConcluded> {
        self.concluded.pop_front()
    }

    /// Throw away the current match and start a new one with the same
    /// settings and difficulty. Voids outstanding AI tickets.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let size = self.config.board_size();
        self.epoch += 1;
        self.ai = SideBoard::random(size, rng);
        self.targeting = Targeting::new(self.difficulty);
        if self.auto_place {
            self.player = SideBoard::random(size, rng);
            self.state = MatchState::PlayerTurn;
            self.last_event = "Fleets deployed. Your turn.".to_string();
        } else {
            self.player = SideBoard::empty(size);
            self.begin_placement();
        }
        info!("match reset (epoch {})", self.epoch);
    }

    /// Shots fired so far against `side`.
    pub fn shots_at(&self, side: Side) -> usize {
        let grid = &self.board(side).grid;
        grid.coords().count() - grid.targetable().count()
    }

    /// Roster entries the player has not placed yet.
    pub fn unplaced(&self) -> Vec<ShipDef> {
        roster()
            .filter(|(id, _)| !self.player.fleet.contains(*id))
            .map(|(_, def)| def)
            .collect()
    }
}
