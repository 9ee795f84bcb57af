//! Square cell matrix holding the status of every cell on one side's board.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::common::Coord;
use crate::ship::ShipId;

/// Status of a single cell.
///
/// Cells only ever move forward: `Empty → Miss` or
/// `Occupied → Hit → Sunk`. `Miss`, `Hit` and `Sunk` accept no further shots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    Empty,
    Occupied(ShipId),
    Miss,
    Hit,
    Sunk,
}

impl Cell {
    /// `true` while the cell has not been fired at.
    pub fn is_targetable(self) -> bool {
        matches!(self, Cell::Empty | Cell::Occupied(_))
    }

    /// Ship standing on this cell, if it is intact.
    pub fn ship(self) -> Option<ShipId> {
        match self {
            Cell::Occupied(id) => Some(id),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(_) => 'S',
            Cell::Miss => 'o',
            Cell::Hit => 'X',
            Cell::Sunk => '#',
        }
    }
}

/// `size × size` grid stored row-major.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-`Empty` grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Cell at (`row`, `col`), or `None` off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if self.in_bounds(row, col) {
            Some(self.cells[row * self.size + col])
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        debug_assert!(self.in_bounds(row, col));
        let idx = row * self.size + col;
        self.cells[idx] = cell;
    }

    /// `true` if (`row`, `col`) is on the board and not yet fired at.
    pub fn is_targetable(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(Cell::is_targetable)
    }

    /// Every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let size = self.size;
        (0..size * size).map(move |idx| (idx / size, idx % size))
    }

    /// Coordinates still open to fire, row-major.
    pub fn targetable(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords()
            .filter(move |&(r, c)| self.cells[r * self.size + c].is_targetable())
    }

    /// Coordinates whose cell equals `cell`, row-major.
    pub fn find(&self, cell: Cell) -> impl Iterator<Item = Coord> + '_ {
        self.coords()
            .filter(move |&(r, c)| self.cells[r * self.size + c] == cell)
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }

    /// In-bounds orthogonal neighbours of (`row`, `col`): up, down, left, right.
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<Coord> {
        let mut out = Vec::with_capacity(4);
        if row > 0 {
            out.push((row - 1, col));
        }
        if row + 1 < self.size {
            out.push((row + 1, col));
        }
        if col > 0 {
            out.push((row, col - 1));
        }
        if col + 1 < self.size {
            out.push((row, col + 1));
        }
        out
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid<{}>:", self.size)?;
        fmt::Display::fmt(self, f)?;
        writeln!(f)
    }
}

/// Fully revealed rendering: `.` water, `S` ship, `o` miss, `X` hit, `#` sunk.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.rows().enumerate() {
            for cell in row {
                write!(f, "{} ", cell.symbol())?;
            }
            if r + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
