//! Post-match reward reveal
//!
//! A timed state machine over the steps of an outcome record, driven by
//! timestamps from a [`Clock`] so pacing never depends on real waits.

pub mod clock;
pub mod controller;
pub mod step;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{RevealController, RevealError, RevealEvent, RevealPhase, StepView};
pub use step::{RevealStep, StepKind, build_steps};
