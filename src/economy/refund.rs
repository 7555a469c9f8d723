//! Declare (voluntary forfeit) refund schedule
//!
//! Forfeiting early returns more of the pool than forfeiting late. Anything off
//! the table, including a full match or a negative count, refunds nothing.

/// Refund share in percent for a declare after `balls_played` balls.
pub fn refund_percent(balls_played: i32) -> u64 {
    match balls_played {
        0 | 1 => 50,
        2 => 45,
        3 => 40,
        4 => 30,
        5 => 20,
        _ => 0,
    }
}

/// Refund share as a fraction in `[0, 0.5]`.
pub fn refund_factor(balls_played: i32) -> f64 {
    refund_percent(balls_played) as f64 / 100.0
}
