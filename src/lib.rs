#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod ai;
mod common;
mod config;
mod game;
mod grid;
#[cfg(feature = "std")]
mod logging;
mod placement;
#[cfg(feature = "std")]
pub mod runner;
#[cfg(feature = "std")]
pub mod scoreboard;
mod ship;
mod shot;
pub mod sim;
#[cfg(feature = "std")]
pub mod ui;

pub use ai::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use grid::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with, LOG_ENV};
pub use placement::*;
#[cfg(feature = "std")]
pub use runner::{AiTurnDriver, TurnEnd};
#[cfg(feature = "std")]
pub use scoreboard::{Scoreboard, Tally};
pub use ship::*;
pub use shot::*;
pub use sim::{simulate, simulate_game, SimReport};
