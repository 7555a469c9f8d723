//! Reward reveal state machine
//!
//! Discloses rewards one step at a time:
//!
//! ```text
//! Idle -> Entering -> Hidden -> Revealing -> Disclosed -> WaitingCta
//!                       ^                                     |
//!                       +------------- Advancing <------------+   (more steps)
//!                                                             +-> Done
//! ```
//!
//! A step credits the profile at the moment it is revealed, and only if the
//! outcome record's ledger says it hasn't been credited yet. The ledger lives in
//! the record, not here, so a remounted controller picks up where the last one
//! stopped.

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use super::step::{RevealStep, StepKind, build_steps};
use crate::profile::{Balances, ProfileCommand};
use crate::session::OutcomeRecord;
use crate::settings::RevealPacing;

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum RevealError {
    #[error("continue is locked for another {remaining_ms}ms")]
    CtaLocked { remaining_ms: u64 },
    #[error("no step is waiting for continue")]
    NotWaiting,
    #[error("reveal already finished")]
    Finished,
}

/// Current phase of the reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealPhase {
    /// Not mounted (or torn down); no timers pending
    Idle,
    /// Waiting out the entry delay
    Entering { until: u64 },
    /// Step content hidden, about to reveal
    Hidden,
    /// Step content becoming visible
    Revealing,
    /// Step shown and credited
    Disclosed,
    /// Continue button locked until `ready_at`
    WaitingCta { ready_at: u64 },
    /// Current step hidden, next one shows at `until`
    Advancing { until: u64 },
    /// Sequence over
    Done,
}

/// Something the caller must act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEvent {
    /// A step was revealed for the first time; apply `command` to the profile
    Disclosed {
        step: usize,
        command: Option<ProfileCommand>,
    },
    /// Continue button became interactable
    CtaReady { step: usize },
    /// Sequence finished; navigate on
    Completed { skipped: bool },
}

/// What the rewards screen should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepView {
    pub index: usize,
    pub total: usize,
    pub kind: StepKind,
    pub amount: u64,
    /// Balance counter animates from here...
    pub counter_from: u64,
    /// ...to here
    pub counter_to: u64,
    pub cta_enabled: bool,
}

pub struct RevealController {
    steps: Vec<RevealStep>,
    pacing: RevealPacing,
    /// Profile balances when mounted
    baseline: Balances,
    /// Steps already credited when mounted (already inside `baseline`)
    credited_at_mount: usize,
    phase: RevealPhase,
    step: usize,
    cta_ready: bool,
}

impl RevealController {
    /// Build an unmounted controller for `record`.
    pub fn new(record: &OutcomeRecord, baseline: Balances, pacing: RevealPacing) -> Self {
        Self {
            steps: build_steps(&record.settlement),
            pacing,
            baseline,
            credited_at_mount: record.ledger.disclosed,
            phase: RevealPhase::Idle,
            step: record.ledger.step,
            cta_ready: false,
        }
    }

    /// Start (or resume) the sequence at `now`.
    pub fn mount(&mut self, record: &OutcomeRecord, now: u64) {
        self.step = record.ledger.step;
        self.credited_at_mount = record.ledger.disclosed;
        self.cta_ready = false;
        self.phase = if record.ledger.finished || self.step >= self.steps.len() {
            RevealPhase::Done
        } else if self.step < record.ledger.disclosed {
            // Remounted while this step was on screen; its reward is already in
            RevealPhase::WaitingCta {
                ready_at: record
                    .ledger
                    .cta_ready_at
                    .unwrap_or(now.saturating_add(self.pacing.cta_delay_ms)),
            }
        } else {
            RevealPhase::Entering {
                until: now.saturating_add(self.pacing.entry_delay_ms),
            }
        };
        log::debug!("Reveal mounted at step {} ({:?})", self.step, self.phase);
    }

    /// Clear pending timers. Later ticks do nothing.
    pub fn teardown(&mut self) {
        self.phase = RevealPhase::Idle;
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn steps(&self) -> &[RevealStep] {
        &self.steps
    }

    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn is_done(&self) -> bool {
        self.phase == RevealPhase::Done
    }

    /// Run every transition due at `now`.
    pub fn tick(&mut self, record: &mut OutcomeRecord, now: u64) -> Vec<RevealEvent> {
        let mut events = Vec::new();
        // Time the current transition fired, so deadlines don't drift with tick rate
        let mut at = now;

        loop {
            match self.phase {
                RevealPhase::Idle | RevealPhase::Done => break,
                RevealPhase::Entering { until } => {
                    if now < until {
                        break;
                    }
                    at = until;
                    self.phase = RevealPhase::Hidden;
                }
                RevealPhase::Hidden => {
                    self.phase = RevealPhase::Revealing;
                }
                RevealPhase::Revealing => {
                    if self.step >= record.ledger.disclosed {
                        record.ledger.disclosed = self.step + 1;
                        let command = self.steps[self.step].command();
                        log::debug!("Disclosed step {}: {:?}", self.step, self.steps[self.step]);
                        events.push(RevealEvent::Disclosed {
                            step: self.step,
                            command,
                        });
                    }
                    self.phase = RevealPhase::Disclosed;
                }
                RevealPhase::Disclosed => {
                    let ready_at = at.saturating_add(self.pacing.cta_delay_ms);
                    record.ledger.cta_ready_at = Some(ready_at);
                    self.phase = RevealPhase::WaitingCta { ready_at };
                }
                RevealPhase::WaitingCta { ready_at } => {
                    if !self.cta_ready && now >= ready_at {
                        self.cta_ready = true;
                        events.push(RevealEvent::CtaReady { step: self.step });
                    }
                    break;
                }
                RevealPhase::Advancing { until } => {
                    if now < until {
                        break;
                    }
                    at = until;
                    self.phase = RevealPhase::Hidden;
                }
            }
        }

        events
    }

    /// Press continue. Refused while the CTA timer is pending.
    pub fn advance(
        &mut self,
        record: &mut OutcomeRecord,
        now: u64,
    ) -> Result<Option<RevealEvent>, RevealError> {
        let ready_at = match self.phase {
            RevealPhase::WaitingCta { ready_at } => ready_at,
            RevealPhase::Done => return Err(RevealError::Finished),
            _ => return Err(RevealError::NotWaiting),
        };
        if now < ready_at {
            return Err(RevealError::CtaLocked {
                remaining_ms: ready_at - now,
            });
        }

        if self.step + 1 < self.steps.len() {
            self.step += 1;
            record.ledger.step = self.step;
            record.ledger.cta_ready_at = None;
            self.cta_ready = false;
            self.phase = RevealPhase::Advancing {
                until: now.saturating_add(self.pacing.transition_ms),
            };
            Ok(None)
        } else {
            record.ledger.finished = true;
            self.phase = RevealPhase::Done;
            log::debug!("Reveal complete");
            Ok(Some(RevealEvent::Completed { skipped: false }))
        }
    }

    /// Leave immediately. Steps not yet disclosed are not credited.
    pub fn skip(&mut self, record: &mut OutcomeRecord) -> Option<RevealEvent> {
        if record.ledger.finished {
            return None;
        }
        record.ledger.finished = true;
        self.phase = RevealPhase::Done;
        log::debug!(
            "Reveal skipped with {}/{} steps disclosed",
            record.ledger.disclosed,
            self.steps.len()
        );
        Some(RevealEvent::Completed { skipped: true })
    }

    /// Current step as the screen should show it, if visible.
    pub fn view(&self) -> Option<StepView> {
        match self.phase {
            RevealPhase::Revealing | RevealPhase::Disclosed | RevealPhase::WaitingCta { .. } => {}
            _ => return None,
        }
        let step = self.steps.get(self.step)?;
        let balance = step.balance_in(&self.baseline);
        let counter_from = if self.step < self.credited_at_mount {
            balance.saturating_sub(step.amount)
        } else {
            balance
        };
        Some(StepView {
            index: self.step,
            total: self.steps.len(),
            kind: step.kind,
            amount: step.amount,
            counter_from,
            counter_to: counter_from.saturating_add(step.amount),
            cta_enabled: self.cta_ready,
        })
    }
}
