//! Random and manual ship placement.

use alloc::vec::Vec;
use log::debug;
use rand::Rng;

use crate::common::{ConfigError, Coord, PlacementError};
use crate::config::{check_board_size, roster, ROSTER};
use crate::grid::{Cell, Grid};
use crate::ship::{Fleet, Orientation, Ship, ShipDef, ShipId};

/// Coordinates a ship of `length` would cover from (`row`, `col`), cut
/// short where it runs off a `size`-wide board. Used for hover previews.
pub fn placement_preview(
    row: usize,
    col: usize,
    length: usize,
    orientation: Orientation,
    size: usize,
) -> Vec<Coord> {
    (0..length)
        .map(|i| orientation.step((row, col), i))
        .take_while(|&(r, c)| r < size && c < size)
        .collect()
}

/// Check bounds and emptiness of a placement without touching the grid.
pub fn can_place(
    grid: &Grid,
    row: usize,
    col: usize,
    length: usize,
    orientation: Orientation,
) -> bool {
    check_placement(grid, row, col, length, orientation).is_ok()
}

fn check_placement(
    grid: &Grid,
    row: usize,
    col: usize,
    length: usize,
    orientation: Orientation,
) -> Result<Vec<Coord>, PlacementError> {
    let cells = placement_preview(row, col, length, orientation, grid.size());
    if length == 0 || cells.len() < length {
        return Err(PlacementError::OutOfBounds);
    }
    if cells.iter().any(|&(r, c)| grid.get(r, c) != Some(Cell::Empty)) {
        return Err(PlacementError::Overlap);
    }
    Ok(cells)
}

/// Place ship `id` of type `def` at (`row`, `col`). Nothing changes on error.
pub fn place_specific(
    grid: &mut Grid,
    fleet: &mut Fleet,
    id: ShipId,
    def: ShipDef,
    row: usize,
    col: usize,
    orientation: Orientation,
) -> Result<ShipId, PlacementError> {
    if fleet.contains(id) {
        return Err(PlacementError::AlreadyPlaced);
    }
    let cells = check_placement(grid, row, col, def.length(), orientation)?;
    for &(r, c) in &cells {
        grid.set(r, c, Cell::Occupied(id));
    }
    debug!(
        "placed {} {} at ({}, {}) {}",
        def.name(),
        id,
        row,
        col,
        orientation
    );
    fleet.insert(Ship::new(id, def, cells));
    Ok(id)
}

/// Seed a fresh grid and fleet with the whole roster at random positions.
pub fn place_random<R: Rng + ?Sized>(
    size: usize,
    rng: &mut R,
) -> Result<(Grid, Fleet), ConfigError> {
    check_board_size(size)?;
    Ok(seed_fleet(size, rng))
}

/// Rejection sampling over origin and orientation, one roster ship at a
/// time. Only called with sizes that passed `check_board_size`.
pub(crate) fn seed_fleet<R: Rng + ?Sized>(size: usize, rng: &mut R) -> (Grid, Fleet) {
    let mut grid = Grid::new(size);
    let mut fleet = Fleet::new();
    for (id, def) in roster() {
        loop {
            let orientation = if rng.random::<bool>() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let row = rng.random_range(0..size);
            let col = rng.random_range(0..size);
            if place_specific(&mut grid, &mut fleet, id, def, row, col, orientation).is_ok() {
                break;
            }
        }
    }
    (grid, fleet)
}

/// Randomly place every roster ship missing from `fleet`, in roster order.
///
/// Each ship is drawn uniformly from the placements still legal, so a
/// crowded manual layout fails with `NoRoom` instead of spinning. On error
/// `grid` and `fleet` are left as they were.
pub fn place_remaining<R: Rng + ?Sized>(
    grid: &mut Grid,
    fleet: &mut Fleet,
    rng: &mut R,
) -> Result<(), PlacementError> {
    let mut next_grid = grid.clone();
    let mut next_fleet = fleet.clone();
    for (id, def) in roster() {
        if next_fleet.contains(id) {
            continue;
        }
        let options = legal_placements(&next_grid, def.length());
        if options.is_empty() {
            return Err(PlacementError::NoRoom);
        }
        let (row, col, orientation) = options[rng.random_range(0..options.len())];
        place_specific(&mut next_grid, &mut next_fleet, id, def, row, col, orientation)?;
    }
    debug_assert!(next_fleet.is_complete(&ROSTER));
    *grid = next_grid;
    *fleet = next_fleet;
    Ok(())
}

fn legal_placements(grid: &Grid, length: usize) -> Vec<(usize, usize, Orientation)> {
    let mut out = Vec::new();
    for (row, col) in grid.coords() {
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            if can_place(grid, row, col, length, orientation) {
                out.push((row, col, orientation));
            }
        }
    }
    out
}
