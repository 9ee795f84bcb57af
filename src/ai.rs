// Targeting strategies for the computer side.
//
// Strategies read the opponent's real grid but treat `Occupied` exactly like
// `Empty`: the only things they learn from are misses, hits, sunk cells and
// the lengths of ships still afloat.

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;
use core::{fmt, str::FromStr};
use log::trace;
use rand::{rngs::SmallRng, Rng};

use crate::{
    common::{Coord, Outcome},
    grid::{Cell, Grid},
    ship::{Fleet, Orientation},
};

/// Difficulty tier of the computer opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when parsing an unknown difficulty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDifficulty;

impl fmt::Display for UnknownDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "difficulty must be one of easy, medium, hard")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownDifficulty {}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "e" => Ok(Difficulty::Easy),
            "medium" | "m" => Ok(Difficulty::Medium),
            "hard" | "h" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty),
        }
    }
}

/// Hunt/target memory of the medium strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuntMemory {
    queue: VecDeque<Coord>,
    history: Vec<Coord>,
}

impl HuntMemory {
    /// Pending targets, front is tried first.
    pub fn queue(&self) -> impl Iterator<Item = &Coord> {
        self.queue.iter()
    }

    /// Hits on the ship currently being chased, oldest first.
    pub fn history(&self) -> &[Coord] {
        &self.history
    }

    /// `true` while the strategy is hunting (no open lead).
    pub fn is_hunting(&self) -> bool {
        self.queue.is_empty() && self.history.is_empty()
    }
}

/// Active strategy together with whatever memory it keeps between shots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targeting {
    Easy,
    Medium(HuntMemory),
    Hard,
}

impl Targeting {
    /// Fresh strategy state for `difficulty`.
    pub fn new(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Targeting::Easy,
            Difficulty::Medium => Targeting::Medium(HuntMemory::default()),
            Difficulty::Hard => Targeting::Hard,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        match self {
            Targeting::Easy => Difficulty::Easy,
            Targeting::Medium(_) => Difficulty::Medium,
            Targeting::Hard => Difficulty::Hard,
        }
    }

    /// Pick the next cell to fire at on `grid`. `None` means nothing is left
    /// to target and the caller must hand the turn back without firing.
    pub fn choose_move(&mut self, grid: &Grid, fleet: &Fleet, rng: &mut SmallRng) -> Option<Coord> {
        let choice = match self {
            Targeting::Easy => random_targetable(grid, rng),
            Targeting::Medium(memory) => medium_move(grid, memory, rng),
            Targeting::Hard => hard_move(grid, &fleet.remaining_lengths(), rng),
        };
        trace!("{} strategy chose {:?}", self.difficulty(), choice);
        choice
    }

    /// Learn from the outcome of this strategy's own shot at `coord`.
    /// `grid` is the board after the shot was applied.
    pub fn update_memory(&mut self, grid: &Grid, coord: Coord, outcome: Outcome) {
        if let Targeting::Medium(memory) = self {
            medium_update(grid, memory, coord, outcome);
        }
    }
}

/// Uniform choice among all cells not yet fired at.
pub fn random_targetable<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<Coord> {
    let candidates: Vec<Coord> = grid.targetable().collect();
    pick(&candidates, rng)
}

fn pick<R: Rng + ?Sized>(candidates: &[Coord], rng: &mut R) -> Option<Coord> {
    if candidates.is_empty() {
        None
    } else {
        Some(candidates[rng.random_range(0..candidates.len())])
    }
}

fn medium_move(grid: &Grid, memory: &mut HuntMemory, rng: &mut SmallRng) -> Option<Coord> {
    while let Some((r, c)) = memory.queue.pop_front() {
        if grid.is_targetable(r, c) {
            return Some((r, c));
        }
    }

    // Every ship of length >= 2 covers at least one cell with an even
    // coordinate sum, so hunting on that checkerboard loses nothing.
    let parity: Vec<Coord> = grid
        .targetable()
        .filter(|&(r, c)| (r + c) % 2 == 0)
        .collect();
    pick(&parity, rng).or_else(|| random_targetable(grid, rng))
}

fn medium_update(grid: &Grid, memory: &mut HuntMemory, coord: Coord, outcome: Outcome) {
    match outcome {
        Outcome::Miss => {}
        Outcome::Hit { sunk: Some(_) } => {
            memory.queue.clear();
            memory.history.clear();
        }
        Outcome::Hit { sunk: None } => {
            memory.history.push(coord);
            let mut candidates = line_extensions(grid, &memory.history);
            if candidates.is_empty() {
                candidates = grid
                    .neighbors(coord.0, coord.1)
                    .into_iter()
                    .filter(|&(r, c)| grid.is_targetable(r, c))
                    .collect();
            }
            for cell in candidates.into_iter().rev() {
                memory.queue.push_front(cell);
            }
        }
    }
}

/// Legal cells just past either end of the line formed by the last two hits.
fn line_extensions(grid: &Grid, history: &[Coord]) -> Vec<Coord> {
    let [.., (r1, c1), (r2, c2)] = history else {
        return Vec::new();
    };
    let (ends, orientation) = if r1 == r2 {
        let cols = history.iter().filter(|h| h.0 == *r1).map(|h| h.1);
        (min_max(cols), Orientation::Horizontal)
    } else if c1 == c2 {
        let rows = history.iter().filter(|h| h.1 == *c1).map(|h| h.0);
        (min_max(rows), Orientation::Vertical)
    } else {
        return Vec::new();
    };
    let Some((lo, hi)) = ends else {
        return Vec::new();
    };

    let at = |i: usize| match orientation {
        Orientation::Horizontal => (*r1, i),
        Orientation::Vertical => (i, *c1),
    };
    let mut out = Vec::with_capacity(2);
    if lo > 0 {
        out.push(at(lo - 1));
    }
    out.push(at(hi + 1));
    out.retain(|&(r, c)| grid.is_targetable(r, c));
    out
}

fn min_max(values: impl Iterator<Item = usize>) -> Option<(usize, usize)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Per-cell count of admissible placements of the remaining ships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heatmap {
    size: usize,
    scores: Vec<u32>,
}

impl Heatmap {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> u32 {
        if row < self.size && col < self.size {
            self.scores[row * self.size + col]
        } else {
            0
        }
    }

    pub fn max(&self) -> u32 {
        self.scores.iter().copied().max().unwrap_or(0)
    }

    /// Rows of scores, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.scores.chunks(self.size.max(1))
    }
}

/// Count, for every cell, how many placements of the `remaining` ship
/// lengths could cover it.
///
/// A placement is admissible when it stays on the board, crosses no `Miss`
/// or `Sunk` cell, and covers every `Hit` on the board. The last rule
/// assumes all open hits belong to one ship; with two wounded ships on the
/// board no placement qualifies and the map goes flat.
pub fn heatmap(grid: &Grid, remaining: &[usize]) -> Heatmap {
    let size = grid.size();
    let mut scores = vec![0u32; size * size];
    let hits: Vec<Coord> = grid.find(Cell::Hit).collect();

    for &len in remaining.iter().filter(|&&len| len > 0 && len <= size) {
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            for origin in grid.coords() {
                let (end_r, end_c) = orientation.step(origin, len - 1);
                if end_r >= size || end_c >= size {
                    continue;
                }
                let covers = |&(hr, hc): &Coord| match orientation {
                    Orientation::Horizontal => hr == origin.0 && hc >= origin.1 && hc <= end_c,
                    Orientation::Vertical => hc == origin.1 && hr >= origin.0 && hr <= end_r,
                };
                if !hits.iter().all(covers) {
                    continue;
                }
                let blocked = (0..len)
                    .map(|i| orientation.step(origin, i))
                    .any(|(r, c)| matches!(grid.get(r, c), Some(Cell::Miss | Cell::Sunk)));
                if blocked {
                    continue;
                }
                for (r, c) in (0..len).map(|i| orientation.step(origin, i)) {
                    if grid.get(r, c) != Some(Cell::Hit) {
                        scores[r * size + c] += 1;
                    }
                }
            }
        }
    }

    Heatmap { size, scores }
}

/// Hottest legal cell of the heatmap, ties to the first in row-major order.
/// Falls back to a uniform random legal cell when the map is all zeros.
pub fn hard_move<R: Rng + ?Sized>(grid: &Grid, remaining: &[usize], rng: &mut R) -> Option<Coord> {
    let heat = heatmap(grid, remaining);
    let mut best: Option<(Coord, u32)> = None;
    for (r, c) in grid.targetable() {
        let score = heat.get(r, c);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some(((r, c), score));
        }
    }
    match best {
        Some((coord, score)) if score > 0 => Some(coord),
        _ => random_targetable(grid, rng),
    }
}
