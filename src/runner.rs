#![cfg(feature = "std")]

//! Paced execution of the computer's turn.
//!
//! A hit lets the computer fire again. The driver waits between chained
//! shots so a front end can show each result, and it stops as soon as its
//! ticket is voided by a reset.

use std::time::Duration;

use log::{debug, warn};
use rand::rngs::SmallRng;
use tokio::sync::Mutex;

use crate::game::{AiShot, Match, MatchError, MatchState, Side};

/// How an AI turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEnd {
    /// The turn passed back to the player.
    Handed,
    GameOver { winner: Side },
    /// The match was reset while the turn was pending.
    Cancelled,
}

pub struct AiTurnDriver {
    delay: Duration,
}

impl AiTurnDriver {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Play the computer's turn to its end. `observe` sees the match right
    /// after every shot, while the lock is held.
    ///
    /// The lock is released during the pause, so another task may reset the
    /// match; the next step then finds a stale ticket and returns
    /// [`TurnEnd::Cancelled`] without firing.
    pub async fn run<F>(
        &self,
        game: &Mutex<Match>,
        rng: &mut SmallRng,
        mut observe: F,
    ) -> anyhow::Result<TurnEnd>
    where
        F: FnMut(&Match, &AiShot),
    {
        let ticket = {
            let guard = game.lock().await;
            match guard.ai_ticket() {
                Some(ticket) => ticket,
                None => return Ok(end_of(guard.state())),
            }
        };

        loop {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let mut guard = game.lock().await;
            let shot = match guard.ai_fire(ticket, rng) {
                Ok(shot) => shot,
                Err(MatchError::StaleTurn) => {
                    debug!("dropping AI continuation after reset");
                    return Ok(TurnEnd::Cancelled);
                }
                Err(err) => {
                    warn!("AI turn aborted: {}", err);
                    return Err(err.into());
                }
            };
            observe(&guard, &shot);
            if guard.state() != MatchState::AiTurn {
                return Ok(end_of(guard.state()));
            }
        }
    }
}

fn end_of(state: MatchState) -> TurnEnd {
    match state {
        MatchState::GameOver { winner } => TurnEnd::GameOver { winner },
        MatchState::PlayerTurn => TurnEnd::Handed,
        MatchState::Placement | MatchState::AiTurn => TurnEnd::Cancelled,
    }
}
