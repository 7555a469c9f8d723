//! Entry fee pooling and house cut

use serde::{Deserialize, Serialize};

use super::percent_of;
use crate::consts::HOUSE_CUT_PERCENT;

/// Wagered pool for a single match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// Both combatants' entry fees
    pub total_pool: u64,
    /// Total after the house cut, doubled if the player opted in
    pub playable_pool: u64,
}

/// Pool both entry fees, take the house cut, then apply the doubling opt-in.
pub fn compute_pool(entry_fee: u64, is_doubled: bool) -> Pool {
    let total_pool = entry_fee.saturating_mul(2);
    // floor(total * 0.9) in integers
    let mut playable_pool = percent_of(total_pool, 100 - HOUSE_CUT_PERCENT);
    if is_doubled {
        playable_pool = playable_pool.saturating_mul(2);
    }
    Pool {
        total_pool,
        playable_pool,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pool_basic() {
        let pool = compute_pool(100, false);
        assert_eq!(pool.total_pool, 200);
        assert_eq!(pool.playable_pool, 180);
    }

    #[test]
    fn test_pool_doubled_after_cut() {
        let pool = compute_pool(200, true);
        assert_eq!(pool.total_pool, 400);
        assert_eq!(pool.playable_pool, 720);
    }

    #[test]
    fn test_pool_floors_odd_totals() {
        // 2 * 7 = 14, 14 * 0.9 = 12.6
        assert_eq!(compute_pool(7, false).playable_pool, 12);
        assert_eq!(compute_pool(7, true).playable_pool, 24);
        assert_eq!(compute_pool(0, true).playable_pool, 0);
    }

    #[test]
    fn test_pool_exact_for_huge_fees() {
        let pool = compute_pool(u64::MAX / 4, false);
        assert_eq!(pool.playable_pool, 8_301_034_833_169_298_225);
        // total saturates, the cut still floors from the saturated total
        let pool = compute_pool(u64::MAX, true);
        assert_eq!(pool.total_pool, u64::MAX);
        assert_eq!(pool.playable_pool, u64::MAX);
    }

    proptest! {
        #[test]
        fn prop_playable_pool_matches_formula(fee in any::<u64>()) {
            let total = (fee as u128 * 2).min(u64::MAX as u128);
            let expected = total * 9 / 10;
            let doubled = (expected * 2).min(u64::MAX as u128);
            prop_assert_eq!(compute_pool(fee, false).total_pool as u128, total);
            prop_assert_eq!(compute_pool(fee, false).playable_pool as u128, expected);
            prop_assert_eq!(compute_pool(fee, true).playable_pool as u128, doubled);
        }
    }
}
