//! Match economy policies
//!
//! Everything here is pure and total: no profile access, no logging, no errors.
//! Callers apply the results through `ProfileCommand`s.

pub mod pool;
pub mod refund;
pub mod settle;

pub use pool::{Pool, compute_pool};
pub use refund::{refund_factor, refund_percent};
pub use settle::{OutcomeKind, Settlement, settle, settle_with_draw};

/// `floor(amount * percent / 100)`, exact over the whole `u64` range.
///
/// Saturates only if `percent > 100` pushes the result past `u64::MAX`.
pub fn percent_of(amount: u64, percent: u64) -> u64 {
    let exact = amount as u128 * percent as u128 / 100;
    u64::try_from(exact).unwrap_or(u64::MAX)
}
