//! Ship definitions, placed ships and the fleet that owns them.

use alloc::vec::Vec;
use core::fmt;

use crate::common::Coord;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn rotated(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Coordinate `i` cells along this orientation from `origin`.
    pub fn step(self, origin: Coord, i: usize) -> Coord {
        match self {
            Orientation::Horizontal => (origin.0, origin.1 + i),
            Orientation::Vertical => (origin.0 + i, origin.1),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => f.pad("horizontal"),
            Orientation::Vertical => f.pad("vertical"),
        }
    }
}

/// Identifier of a ship within one fleet. Matches the ship's roster index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub usize);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShipDef {
    name: &'static str,
    length: usize,
}

impl ShipDef {
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

/// A ship placed on a grid, with its damage state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Ship {
    id: ShipId,
    name: &'static str,
    cells: Vec<Coord>,
    hits: usize,
    sunk: bool,
}

impl Ship {
    /// Build an undamaged ship. `cells` must hold exactly `def.length()`
    /// coordinates; the placement engine guarantees this.
    pub(crate) fn new(id: ShipId, def: ShipDef, cells: Vec<Coord>) -> Self {
        debug_assert_eq!(cells.len(), def.length());
        Self {
            id,
            name: def.name(),
            cells,
            hits: 0,
            sunk: false,
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn length(&self) -> usize {
        self.cells.len()
    }

    /// Occupied coordinates, bow to stern.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    /// Count one more hit. Returns `true` when this hit sinks the ship.
    pub(crate) fn register_hit(&mut self) -> bool {
        if self.sunk {
            return false;
        }
        self.hits += 1;
        self.sunk = self.hits == self.length();
        self.sunk
    }

    pub fn summary(&self) -> ShipSummary {
        ShipSummary {
            id: self.id,
            name: self.name,
            length: self.length(),
            hits: self.hits,
            sunk: self.sunk,
        }
    }
}

/// Damage report for one ship, without its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShipSummary {
    pub id: ShipId,
    pub name: &'static str,
    pub length: usize,
    pub hits: usize,
    pub sunk: bool,
}

/// Ships of one side, keyed by id and kept in id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    pub fn new() -> Self {
        Self { ships: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn get(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|s| s.id == id)
    }

    pub fn contains(&self, id: ShipId) -> bool {
        self.get(id).is_some()
    }

    /// Add a ship. The caller has already checked the id is free.
    pub(crate) fn insert(&mut self, ship: Ship) {
        let pos = self
            .ships
            .iter()
            .position(|s| s.id > ship.id)
            .unwrap_or(self.ships.len());
        self.ships.insert(pos, ship);
    }

    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter()
    }

    /// `true` once every entry of `roster` has a ship in this fleet.
    pub fn is_complete(&self, roster: &[ShipDef]) -> bool {
        (0..roster.len()).all(|i| self.contains(ShipId(i)))
    }

    /// `true` when every ship is sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// Lengths of ships still afloat.
    pub fn remaining_lengths(&self) -> Vec<usize> {
        self.ships
            .iter()
            .filter(|s| !s.is_sunk())
            .map(Ship::length)
            .collect()
    }

    pub fn summaries(&self) -> Vec<ShipSummary> {
        self.ships.iter().map(Ship::summary).collect()
    }
}
