//! Match session and the settled outcome record
//!
//! A `Match` lives from matchmaking until settlement. Settling consumes it and
//! produces an `OutcomeRecord`, which the reward reveal reads until the player
//! leaves the stats screen.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::catalog::{Opponent, Region};
use crate::consts::BALLS_PER_MATCH;
use crate::economy::{OutcomeKind, Pool, Settlement, compute_pool, settle};

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum MatchError {
    #[error("pool already doubled")]
    AlreadyDoubled,
    #[error("match is over")]
    MatchOver,
    #[error("stadium out of range (got={got}, count={count})")]
    StadiumOutOfRange { got: usize, count: usize },
}

/// Runs scored at one stadium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StadiumScore {
    pub player: u32,
    pub opponent: u32,
}

/// An in-progress brawl
#[derive(Debug, Clone)]
pub struct Match {
    pub opponent: Opponent,
    pub region: &'static Region,
    doubled: bool,
    balls_played: u8,
    scores: Vec<StadiumScore>,
}

impl Match {
    pub fn new(opponent: Opponent, region: &'static Region) -> Self {
        Self {
            opponent,
            region,
            doubled: false,
            balls_played: 0,
            scores: vec![StadiumScore::default(); region.stadium_count as usize],
        }
    }

    pub fn is_doubled(&self) -> bool {
        self.doubled
    }

    pub fn balls_played(&self) -> u8 {
        self.balls_played
    }

    pub fn is_over(&self) -> bool {
        self.balls_played >= BALLS_PER_MATCH
    }

    pub fn scores(&self) -> &[StadiumScore] {
        &self.scores
    }

    /// Current pool for this match
    pub fn pool(&self) -> Pool {
        compute_pool(self.region.entry_fee, self.doubled)
    }

    /// Whether the stake can still be doubled
    pub fn can_double(&self) -> Result<(), MatchError> {
        if self.is_over() {
            return Err(MatchError::MatchOver);
        }
        if self.doubled {
            return Err(MatchError::AlreadyDoubled);
        }
        Ok(())
    }

    /// Double the stake. Allowed once, while the match is still running.
    pub fn double_pool(&mut self) -> Result<(), MatchError> {
        self.can_double()?;
        self.doubled = true;
        Ok(())
    }

    /// Record one ball at a stadium. Returns true when this was the last ball.
    pub fn play_ball(
        &mut self,
        stadium: usize,
        player_runs: u32,
        opponent_runs: u32,
    ) -> Result<bool, MatchError> {
        if self.is_over() {
            return Err(MatchError::MatchOver);
        }
        let count = self.scores.len();
        let Some(score) = self.scores.get_mut(stadium) else {
            return Err(MatchError::StadiumOutOfRange {
                got: stadium,
                count,
            });
        };
        score.player = score.player.saturating_add(player_runs);
        score.opponent = score.opponent.saturating_add(opponent_runs);
        self.balls_played += 1;
        Ok(self.is_over())
    }

    /// Outcome of a completed match: whoever took more stadiums wins.
    pub fn decide(&self) -> OutcomeKind {
        let (won, lost) = self
            .scores
            .iter()
            .fold((0u32, 0u32), |(won, lost), s| match s.player.cmp(&s.opponent) {
                std::cmp::Ordering::Greater => (won + 1, lost),
                std::cmp::Ordering::Less => (won, lost + 1),
                std::cmp::Ordering::Equal => (won, lost),
            });
        match won.cmp(&lost) {
            std::cmp::Ordering::Greater => OutcomeKind::Victory,
            std::cmp::Ordering::Less => OutcomeKind::Defeat,
            std::cmp::Ordering::Equal => OutcomeKind::Draw,
        }
    }

    /// Consume the match and compute its rewards.
    pub fn settle<R: Rng + ?Sized>(
        self,
        outcome: OutcomeKind,
        declared_balls: Option<u8>,
        rng: &mut R,
    ) -> OutcomeRecord {
        // declared_balls only means something for a declare
        let declared_balls = match outcome {
            OutcomeKind::Declared => declared_balls,
            _ => None,
        };
        let pool = self.pool();
        let settlement = settle(outcome, pool.playable_pool, self.region, declared_balls, rng);
        OutcomeRecord::new(outcome, declared_balls, settlement)
    }
}

/// Which reveal steps have already credited the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RevealLedger {
    /// Index of the step currently on screen
    pub step: usize,
    /// Steps `0..disclosed` have been credited
    pub disclosed: usize,
    /// When continue unlocks for the current step, once it is disclosed
    pub cta_ready_at: Option<u64>,
    /// Sequence finished (advanced past the end or skipped)
    pub finished: bool,
}

/// Settled result of one match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub outcome: OutcomeKind,
    /// Balls played at the moment of a declare
    pub declared_balls: Option<u8>,
    pub settlement: Settlement,
    pub ledger: RevealLedger,
}

impl OutcomeRecord {
    pub fn new(outcome: OutcomeKind, declared_balls: Option<u8>, settlement: Settlement) -> Self {
        Self {
            outcome,
            declared_balls,
            settlement,
            ledger: RevealLedger::default(),
        }
    }
}
