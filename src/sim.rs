//! Headless runs of a targeting strategy against a random fleet.

use alloc::vec::Vec;
use log::{debug, warn};
use rand::rngs::SmallRng;

use crate::{
    ai::{Difficulty, Targeting},
    config::GameConfig,
    placement::seed_fleet,
    shot::{fleet_defeated, resolve_shot},
};

/// Shot counts of a batch of simulated games.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct SimReport {
    pub difficulty: Difficulty,
    pub board_size: usize,
    pub games: usize,
    pub min_shots: usize,
    pub max_shots: usize,
    pub mean_shots: f64,
    pub shots: Vec<usize>,
}

/// Let `difficulty` fire at a freshly seeded fleet until it is destroyed or
/// the board runs out. Returns the number of shots fired.
pub fn simulate_game(difficulty: Difficulty, config: &GameConfig, rng: &mut SmallRng) -> usize {
    let (mut grid, mut fleet) = seed_fleet(config.board_size(), rng);
    let mut targeting = Targeting::new(difficulty);
    let mut shots = 0;

    while !fleet_defeated(&fleet) {
        let Some((r, c)) = targeting.choose_move(&grid, &fleet, rng) else {
            break;
        };
        match resolve_shot(&mut grid, &mut fleet, r, c) {
            Ok(outcome) => {
                shots += 1;
                targeting.update_memory(&grid, (r, c), outcome);
            }
            Err(err) => {
                warn!("{} strategy picked ({}, {}): {}", difficulty, r, c, err);
                break;
            }
        }
    }
    debug!("{} strategy finished in {} shots", difficulty, shots);
    shots
}

/// Play `games` simulated games and summarise the shot counts.
pub fn simulate(
    difficulty: Difficulty,
    config: &GameConfig,
    games: usize,
    rng: &mut SmallRng,
) -> SimReport {
    let shots: Vec<usize> = (0..games)
        .map(|_| simulate_game(difficulty, config, rng))
        .collect();
    let total: usize = shots.iter().sum();
    SimReport {
        difficulty,
        board_size: config.board_size(),
        games,
        min_shots: shots.iter().copied().min().unwrap_or(0),
        max_shots: shots.iter().copied().max().unwrap_or(0),
        mean_shots: if games == 0 {
            0.0
        } else {
            total as f64 / games as f64
        },
        shots,
    }
}
