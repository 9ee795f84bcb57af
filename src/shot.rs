//! Shot resolution against one side's grid and fleet.

use log::{debug, warn};

use crate::common::{Outcome, ShotError};
use crate::grid::{Cell, Grid};
use crate::ship::Fleet;

/// Fire at (`row`, `col`).
///
/// A rejected shot leaves `grid` and `fleet` untouched. On a sinking hit
/// every cell of the ship is rewritten to [`Cell::Sunk`].
pub fn resolve_shot(
    grid: &mut Grid,
    fleet: &mut Fleet,
    row: usize,
    col: usize,
) -> Result<Outcome, ShotError> {
    let cell = grid
        .get(row, col)
        .ok_or(ShotError::OutOfBounds { row, col })?;
    match cell {
        Cell::Miss | Cell::Hit | Cell::Sunk => Err(ShotError::AlreadyTargeted),
        Cell::Empty => {
            grid.set(row, col, Cell::Miss);
            Ok(Outcome::Miss)
        }
        Cell::Occupied(id) => {
            grid.set(row, col, Cell::Hit);
            let Some(ship) = fleet.get_mut(id) else {
                // Grid and fleet disagree; keep the hit marker and report a plain hit.
                warn!("cell ({}, {}) names ship {} missing from fleet", row, col, id);
                return Ok(Outcome::Hit { sunk: None });
            };
            if ship.register_hit() {
                for &(r, c) in ship.cells() {
                    grid.set(r, c, Cell::Sunk);
                }
                debug!("{} {} sunk at ({}, {})", ship.name(), id, row, col);
                Ok(Outcome::Hit { sunk: Some(id) })
            } else {
                Ok(Outcome::Hit { sunk: None })
            }
        }
    }
}

/// `true` once every ship in `fleet` is sunk.
pub fn fleet_defeated(fleet: &Fleet) -> bool {
    fleet.all_sunk()
}
