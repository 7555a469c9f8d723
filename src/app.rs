//! Top-level navigation controller
//!
//! Owns the profile, the active match, the last outcome record and the mounted
//! reward reveal. Screens call into it; it decides where navigation goes next.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::catalog::{self, Opponent, Region};
use crate::economy::OutcomeKind;
use crate::profile::{Profile, ProfileCommand, ProfileError};
use crate::reveal::{Clock, RevealController, RevealError, RevealEvent, SystemClock};
use crate::session::{Match, MatchError, OutcomeRecord};
use crate::settings::Settings;

/// App screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Home,
    Collections,
    Store,
    Leaderboard,
    Friends,
    Profile,
    /// Opponent found, waiting for the player to commit
    Matchmaking,
    Gameplay,
    /// Reward reveal
    Rewards,
    /// Post-match summary
    Stats,
}

impl Screen {
    /// Screens reachable from each other by plain navigation
    pub fn is_browsable(&self) -> bool {
        matches!(
            self,
            Screen::Home
                | Screen::Collections
                | Screen::Store
                | Screen::Leaderboard
                | Screen::Friends
                | Screen::Profile
        )
    }
}

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum AppError {
    #[error("unknown region: {0}")]
    UnknownRegion(String),
    #[error("region {region} needs level {required} (player is level {level})")]
    RegionLocked {
        region: String,
        required: u32,
        level: u32,
    },
    #[error("can't navigate from {from:?} to {to:?}")]
    InvalidNavigation { from: Screen, to: Screen },
    #[error("no opponent found yet")]
    NoPendingMatch,
    #[error("no active match")]
    NoActiveMatch,
    #[error("no outcome to reveal")]
    NoOutcome,
    #[error(transparent)]
    Match(#[from] MatchError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Reveal(#[from] RevealError),
}

/// Opponent and region picked by matchmaking
#[derive(Debug, Clone)]
pub struct PendingMatch {
    pub region: &'static Region,
    pub opponent: Opponent,
}

pub struct App<C: Clock = SystemClock> {
    profile: Profile,
    settings: Settings,
    clock: C,
    rng: Pcg32,
    screen: Screen,
    pending: Option<PendingMatch>,
    active: Option<Match>,
    last_outcome: Option<OutcomeRecord>,
    reveal: Option<RevealController>,
}

impl App<SystemClock> {
    /// App with the wall clock and loaded settings
    pub fn with_system_clock(profile: Profile, seed: u64) -> Self {
        Self::new(profile, Settings::load(), SystemClock::new(), seed)
    }
}

impl<C: Clock> App<C> {
    pub fn new(profile: Profile, settings: Settings, clock: C, seed: u64) -> Self {
        Self {
            profile,
            settings,
            clock,
            rng: Pcg32::seed_from_u64(seed),
            screen: Screen::Home,
            pending: None,
            active: None,
            last_outcome: None,
            reveal: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        settings.save();
        self.settings = settings;
    }

    pub fn pending_match(&self) -> Option<&PendingMatch> {
        self.pending.as_ref()
    }

    pub fn active_match(&self) -> Option<&Match> {
        self.active.as_ref()
    }

    pub fn last_outcome(&self) -> Option<&OutcomeRecord> {
        self.last_outcome.as_ref()
    }

    pub fn reveal(&self) -> Option<&RevealController> {
        self.reveal.as_ref()
    }

    /// Plain navigation between browsing screens (or out of matchmaking)
    pub fn navigate(&mut self, to: Screen) -> Result<(), AppError> {
        let from = self.screen;
        let allowed = to.is_browsable() && (from.is_browsable() || from == Screen::Matchmaking);
        if !allowed {
            log::warn!("Navigation refused: {from:?} -> {to:?}");
            return Err(AppError::InvalidNavigation { from, to });
        }
        if from == Screen::Matchmaking {
            log::info!("Matchmaking cancelled");
            self.pending = None;
        }
        self.screen = to;
        Ok(())
    }

    /// Pick an opponent for a region and show the matchmaking screen.
    pub fn find_match(&mut self, region_id: &str) -> Result<&PendingMatch, AppError> {
        if !self.screen.is_browsable() {
            return Err(AppError::InvalidNavigation {
                from: self.screen,
                to: Screen::Matchmaking,
            });
        }
        let region = catalog::region(region_id)
            .ok_or_else(|| AppError::UnknownRegion(region_id.to_string()))?;
        if !region.is_unlocked(self.profile.level) {
            return Err(AppError::RegionLocked {
                region: region.id.to_string(),
                required: region.level_gate,
                level: self.profile.level,
            });
        }

        let opponent = catalog::pick_opponent(&mut self.rng, self.profile.level);
        log::info!(
            "Matched against {} (level {}, power {}) in {}",
            opponent.name,
            opponent.level,
            opponent.power,
            region.name
        );
        self.screen = Screen::Matchmaking;
        Ok(&*self.pending.insert(PendingMatch { region, opponent }))
    }

    /// Commit to the pending match: pay the entry fee and start play.
    pub fn start_match(&mut self) -> Result<(), AppError> {
        let PendingMatch { region, opponent } = match (self.screen, self.pending.as_ref()) {
            (Screen::Matchmaking, Some(pending)) => pending.clone(),
            _ => return Err(AppError::NoPendingMatch),
        };
        self.profile.apply(ProfileCommand::SpendCoins {
            amount: region.entry_fee,
        })?;
        self.pending = None;
        self.active = Some(Match::new(opponent, region));
        self.screen = Screen::Gameplay;
        log::info!("Match started in {} (entry fee {})", region.name, region.entry_fee);
        Ok(())
    }

    /// Double the stake for another entry fee.
    pub fn double_pool(&mut self) -> Result<(), AppError> {
        let active = self.active.as_mut().ok_or(AppError::NoActiveMatch)?;
        active.can_double()?;
        self.profile.apply(ProfileCommand::SpendCoins {
            amount: active.region.entry_fee,
        })?;
        active.double_pool()?;
        log::info!("Pool doubled: {}", active.pool().playable_pool);
        Ok(())
    }

    /// Play one ball. Returns the outcome once the last ball ends the match.
    pub fn play_ball(
        &mut self,
        stadium: usize,
        player_runs: u32,
        opponent_runs: u32,
    ) -> Result<Option<OutcomeKind>, AppError> {
        let active = self.active.as_mut().ok_or(AppError::NoActiveMatch)?;
        if !active.play_ball(stadium, player_runs, opponent_runs)? {
            return Ok(None);
        }
        let outcome = active.decide();
        self.complete_match(outcome, None)?;
        Ok(Some(outcome))
    }

    /// Forfeit the running match for a partial refund.
    pub fn declare(&mut self) -> Result<(), AppError> {
        let balls = self
            .active
            .as_ref()
            .ok_or(AppError::NoActiveMatch)?
            .balls_played();
        self.complete_match(OutcomeKind::Declared, Some(balls))
    }

    /// Gameplay finished: settle, record the result and start the reveal.
    pub fn complete_match(
        &mut self,
        outcome: OutcomeKind,
        declared_balls: Option<u8>,
    ) -> Result<(), AppError> {
        let active = self.active.take().ok_or(AppError::NoActiveMatch)?;
        let region = active.region;
        let record = active.settle(outcome, declared_balls, &mut self.rng);
        self.profile.apply(ProfileCommand::RecordMatchResult { outcome })?;
        log::info!(
            "Match settled in {}: {} -> {} coins, {} energy, {} gems",
            region.name,
            outcome.as_str(),
            record.settlement.payout,
            record.settlement.energy_reward,
            record.settlement.gem_reward
        );

        self.last_outcome = Some(record);
        self.screen = Screen::Rewards;
        self.mount_reveal()
    }

    /// Mount a fresh reveal controller over the last outcome.
    fn mount_reveal(&mut self) -> Result<(), AppError> {
        let record = self.last_outcome.as_ref().ok_or(AppError::NoOutcome)?;
        if let Some(mut old) = self.reveal.take() {
            old.teardown();
        }
        let mut reveal = RevealController::new(
            record,
            self.profile.balances(),
            self.settings.effective_reveal_pacing(),
        );
        reveal.mount(record, self.clock.now_ms());
        self.reveal = Some(reveal);
        Ok(())
    }

    /// Re-create the reveal, as a screen re-render would.
    pub fn remount_reveal(&mut self) -> Result<(), AppError> {
        if self.screen != Screen::Rewards {
            return Err(AppError::NoOutcome);
        }
        self.mount_reveal()
    }

    /// Advance reveal timers and apply any disclosed rewards.
    pub fn update(&mut self) -> Result<Vec<RevealEvent>, AppError> {
        let now = self.clock.now_ms();
        let (Some(reveal), Some(record)) = (self.reveal.as_mut(), self.last_outcome.as_mut())
        else {
            return Ok(Vec::new());
        };
        let events = reveal.tick(record, now);
        for event in &events {
            if let RevealEvent::Disclosed {
                command: Some(command),
                ..
            } = event
            {
                self.profile.apply(*command)?;
            }
        }
        Ok(events)
    }

    /// Continue button on the rewards screen.
    pub fn continue_reveal(&mut self) -> Result<(), AppError> {
        let now = self.clock.now_ms();
        let (Some(reveal), Some(record)) = (self.reveal.as_mut(), self.last_outcome.as_mut())
        else {
            return Err(AppError::NoOutcome);
        };
        if let Some(RevealEvent::Completed { .. }) = reveal.advance(record, now)? {
            self.finish_reveal();
        }
        Ok(())
    }

    /// Skip button on the rewards screen. Undisclosed rewards are forfeited.
    pub fn skip_reveal(&mut self) -> Result<(), AppError> {
        let (Some(reveal), Some(record)) = (self.reveal.as_mut(), self.last_outcome.as_mut())
        else {
            return Err(AppError::NoOutcome);
        };
        reveal.skip(record);
        self.finish_reveal();
        Ok(())
    }

    fn finish_reveal(&mut self) {
        if let Some(mut reveal) = self.reveal.take() {
            reveal.teardown();
        }
        self.screen = Screen::Stats;
        log::info!("Rewards done, showing stats");
    }

    /// Leave the stats screen; the outcome record is discarded.
    pub fn leave_stats(&mut self) -> Result<(), AppError> {
        if self.screen != Screen::Stats {
            return Err(AppError::InvalidNavigation {
                from: self.screen,
                to: Screen::Home,
            });
        }
        self.last_outcome = None;
        self.screen = Screen::Home;
        Ok(())
    }
}
