//! Cricket Brawl - match economy and reward reveal core
//!
//! Core modules:
//! - `economy`: Entry fee pool, outcome settlement and declare refunds (pure policies)
//! - `catalog`: Static region catalog and opponent roster
//! - `session`: Active match and the settled outcome record
//! - `profile`: Player profile and the command reducer that mutates it
//! - `reveal`: Post-match reward reveal state machine
//! - `app`: Top-level navigation controller
//! - `settings`: Player preferences (reveal pacing, audio)

pub mod app;
pub mod catalog;
pub mod economy;
pub mod profile;
pub mod reveal;
pub mod session;
pub mod settings;

pub use app::{App, AppError, Screen};
pub use profile::{Profile, ProfileCommand, ProfileError};
pub use settings::{RevealPacing, Settings};

/// Game configuration constants
pub mod consts {
    /// Balls (rounds of play) in a full match
    pub const BALLS_PER_MATCH: u8 = 6;

    /// House cut taken from the pooled entry fees, in percent
    pub const HOUSE_CUT_PERCENT: u64 = 10;

    /// Share of the playable pool paid out on a draw, in percent
    pub const DRAW_PAYOUT_PERCENT: u64 = 50;
    /// Energy awarded on a draw
    pub const DRAW_ENERGY_REWARD: u64 = 1;

    /// Energy awarded on victory when the region doesn't set a rate
    pub const DEFAULT_ENERGY_REWARD: u64 = 2;
    /// Chance of a gem drop on victory (uniform draw must be strictly below)
    pub const GEM_DROP_CHANCE: f64 = 0.1;
    /// Gems awarded when the drop hits
    pub const GEM_DROP_AMOUNT: u64 = 5;

    /// XP per match result
    pub const XP_VICTORY: u64 = 30;
    pub const XP_DRAW: u64 = 15;
    pub const XP_LOSS: u64 = 5;
    /// XP needed per level
    pub const XP_PER_LEVEL: u64 = 100;

    /// Reveal pacing defaults (milliseconds)
    pub const REVEAL_ENTRY_DELAY_MS: u64 = 400;
    pub const REVEAL_CTA_DELAY_MS: u64 = 3000;
    pub const REVEAL_TRANSITION_MS: u64 = 350;

    /// Starting balances for a fresh profile
    pub const STARTING_COINS: u64 = 1000;
    pub const STARTING_GEMS: u64 = 10;
    pub const STARTING_ENERGY: u64 = 5;
}
