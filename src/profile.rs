//! Player profile and its reducer
//!
//! Every balance change goes through [`Profile::apply`] with a
//! [`ProfileCommand`], so there is exactly one mutation path to audit.
//! Rewards saturate; spends fail instead of going below zero.

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::consts::*;
use crate::economy::OutcomeKind;

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum ProfileError {
    #[error("not enough coins (needed={needed}, available={available})")]
    InsufficientCoins { needed: u64, available: u64 },
    #[error("not enough energy (needed={needed}, available={available})")]
    InsufficientEnergy { needed: u64, available: u64 },
}

/// A single change to the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProfileCommand {
    /// Credit rewards disclosed by the reveal sequence
    ApplyReward { coins: u64, energy: u64, gems: u64 },
    /// Count a finished match and award xp. Only a victory counts as a win.
    RecordMatchResult { outcome: OutcomeKind },
    /// Debit coins (entry fees, pool doubling)
    SpendCoins { amount: u64 },
    /// Debit energy (card upgrades)
    SpendEnergy { amount: u64 },
}

/// Coin, energy and gem balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Balances {
    pub coins: u64,
    pub energy: u64,
    pub gems: u64,
}

/// Session-lifetime player state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub coins: u64,
    pub gems: u64,
    pub energy: u64,
    pub level: u32,
    /// XP towards the next level
    pub xp: u64,
    pub wins: u32,
    pub matches_played: u32,
}

impl Default for Profile {
    fn default() -> Self {
        Self::new("Player")
    }
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coins: STARTING_COINS,
            gems: STARTING_GEMS,
            energy: STARTING_ENERGY,
            level: 1,
            xp: 0,
            wins: 0,
            matches_played: 0,
        }
    }

    pub fn balances(&self) -> Balances {
        Balances {
            coins: self.coins,
            energy: self.energy,
            gems: self.gems,
        }
    }

    /// Apply a command. On error the profile is left untouched.
    pub fn apply(&mut self, command: ProfileCommand) -> Result<(), ProfileError> {
        match command {
            ProfileCommand::ApplyReward {
                coins,
                energy,
                gems,
            } => {
                self.coins = self.coins.saturating_add(coins);
                self.energy = self.energy.saturating_add(energy);
                self.gems = self.gems.saturating_add(gems);
                log::debug!("Reward applied: +{coins} coins, +{energy} energy, +{gems} gems");
            }
            ProfileCommand::RecordMatchResult { outcome } => {
                self.matches_played = self.matches_played.saturating_add(1);
                if outcome.is_victory() {
                    self.wins = self.wins.saturating_add(1);
                }
                let xp = match outcome {
                    OutcomeKind::Victory => XP_VICTORY,
                    OutcomeKind::Draw => XP_DRAW,
                    OutcomeKind::Defeat | OutcomeKind::Declared => XP_LOSS,
                };
                self.gain_xp(xp);
            }
            ProfileCommand::SpendCoins { amount } => {
                if amount > self.coins {
                    return Err(ProfileError::InsufficientCoins {
                        needed: amount,
                        available: self.coins,
                    });
                }
                self.coins -= amount;
            }
            ProfileCommand::SpendEnergy { amount } => {
                if amount > self.energy {
                    return Err(ProfileError::InsufficientEnergy {
                        needed: amount,
                        available: self.energy,
                    });
                }
                self.energy -= amount;
            }
        }
        Ok(())
    }

    fn gain_xp(&mut self, xp: u64) {
        self.xp += xp;
        while self.xp >= XP_PER_LEVEL {
            self.xp -= XP_PER_LEVEL;
            self.level += 1;
            log::info!("Level up! Now level {}", self.level);
        }
    }

    /// Matches won as a fraction of matches played
    pub fn win_rate(&self) -> f64 {
        if self.matches_played == 0 {
            0.0
        } else {
            self.wins as f64 / self.matches_played as f64
        }
    }
}
