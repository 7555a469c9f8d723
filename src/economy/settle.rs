//! Outcome settlement
//!
//! Turns a match outcome and the playable pool into coin, energy and gem
//! rewards. Victory is the only stochastic branch (the gem drop).

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::percent_of;
use super::refund::refund_percent;
use crate::catalog::Region;
use crate::consts::*;

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeKind {
    Victory,
    Defeat,
    Draw,
    /// Voluntary forfeit mid-match
    Declared,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Victory => "victory",
            OutcomeKind::Defeat => "defeat",
            OutcomeKind::Draw => "draw",
            OutcomeKind::Declared => "declared",
        }
    }

    pub fn is_victory(&self) -> bool {
        matches!(self, OutcomeKind::Victory)
    }
}

/// Rewards computed for one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settlement {
    pub payout: u64,
    pub energy_reward: u64,
    pub gem_reward: u64,
}

/// Settle with an explicit gem draw in `[0, 1)`.
///
/// The draw only matters for `Victory`. `declared_balls` only matters for
/// `Declared`; `None` refunds nothing.
pub fn settle_with_draw(
    outcome: OutcomeKind,
    playable_pool: u64,
    region: &Region,
    declared_balls: Option<u8>,
    gem_draw: f64,
) -> Settlement {
    match outcome {
        OutcomeKind::Victory => Settlement {
            payout: playable_pool,
            energy_reward: region.victory_energy(),
            gem_reward: if gem_draw < GEM_DROP_CHANCE {
                GEM_DROP_AMOUNT
            } else {
                0
            },
        },
        OutcomeKind::Defeat => Settlement::default(),
        OutcomeKind::Draw => Settlement {
            payout: percent_of(playable_pool, DRAW_PAYOUT_PERCENT),
            energy_reward: DRAW_ENERGY_REWARD,
            gem_reward: 0,
        },
        OutcomeKind::Declared => {
            let percent = declared_balls.map_or(0, |balls| refund_percent(balls as i32));
            Settlement {
                payout: percent_of(playable_pool, percent),
                energy_reward: 0,
                gem_reward: 0,
            }
        }
    }
}

/// Settle a match, drawing the gem roll from `rng` on victory.
pub fn settle<R: Rng + ?Sized>(
    outcome: OutcomeKind,
    playable_pool: u64,
    region: &Region,
    declared_balls: Option<u8>,
    rng: &mut R,
) -> Settlement {
    let gem_draw = if outcome.is_victory() {
        rng.random::<f64>()
    } else {
        1.0
    };
    settle_with_draw(outcome, playable_pool, region, declared_balls, gem_draw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::economy::compute_pool;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn region_with_energy(energy_reward: Option<u64>) -> Region {
        Region {
            energy_reward,
            ..catalog::region("lahore").unwrap().clone()
        }
    }

    #[test]
    fn test_victory_takes_pool() {
        let region = region_with_energy(Some(3));
        let s = settle_with_draw(OutcomeKind::Victory, 180, &region, None, 0.5);
        assert_eq!(
            s,
            Settlement {
                payout: 180,
                energy_reward: 3,
                gem_reward: 0
            }
        );
    }

    #[test]
    fn test_victory_gem_threshold_is_strict() {
        let region = region_with_energy(None);
        let hit = settle_with_draw(OutcomeKind::Victory, 10, &region, None, 0.099_999);
        assert_eq!(hit.gem_reward, GEM_DROP_AMOUNT);
        let miss = settle_with_draw(OutcomeKind::Victory, 10, &region, None, 0.1);
        assert_eq!(miss.gem_reward, 0);
        assert_eq!(miss.energy_reward, DEFAULT_ENERGY_REWARD);
    }

    #[test]
    fn test_declared_without_balls_refunds_nothing() {
        let region = region_with_energy(Some(3));
        let s = settle_with_draw(OutcomeKind::Declared, 720, &region, None, 0.0);
        assert_eq!(s, Settlement::default());
    }

    #[test]
    fn test_declared_after_six_refunds_nothing() {
        let region = region_with_energy(Some(3));
        let s = settle_with_draw(OutcomeKind::Declared, 720, &region, Some(6), 0.0);
        assert_eq!(s.payout, 0);
    }

    #[test]
    fn test_floors_exact_near_u64_max() {
        let region = region_with_energy(None);
        let s = settle_with_draw(OutcomeKind::Draw, u64::MAX - 1, &region, None, 0.0);
        assert_eq!(s.payout, 9_223_372_036_854_775_807);
        let s = settle_with_draw(OutcomeKind::Declared, u64::MAX, &region, Some(5), 0.0);
        assert_eq!(s.payout, (u64::MAX as u128 * 20 / 100) as u64);
    }

    #[test]
    fn test_scenario_victory_fee_100() {
        let region = region_with_energy(Some(3));
        let pool = compute_pool(100, false);
        assert_eq!(pool.total_pool, 200);
        assert_eq!(pool.playable_pool, 180);
        let mut rng = Pcg32::seed_from_u64(1);
        let s = settle(OutcomeKind::Victory, pool.playable_pool, &region, None, &mut rng);
        assert_eq!(s.payout, 180);
        assert_eq!(s.energy_reward, 3);
        assert!(s.gem_reward == 0 || s.gem_reward == 5);
    }

    #[test]
    fn test_scenario_declared_doubled_fee_200() {
        let region = region_with_energy(Some(3));
        let pool = compute_pool(200, true);
        assert_eq!(pool.total_pool, 400);
        assert_eq!(pool.playable_pool, 720);
        let mut rng = Pcg32::seed_from_u64(1);
        let s = settle(
            OutcomeKind::Declared,
            pool.playable_pool,
            &region,
            Some(3),
            &mut rng,
        );
        assert_eq!(s.payout, 288);
        assert_eq!(s.energy_reward, 0);
        assert_eq!(s.gem_reward, 0);
    }

    #[test]
    fn test_scenario_draw_fee_50() {
        let region = region_with_energy(None);
        let pool = compute_pool(50, false);
        assert_eq!(pool.playable_pool, 90);
        let mut rng = Pcg32::seed_from_u64(1);
        let s = settle(OutcomeKind::Draw, pool.playable_pool, &region, None, &mut rng);
        assert_eq!(
            s,
            Settlement {
                payout: 45,
                energy_reward: 1,
                gem_reward: 0
            }
        );
    }

    #[test]
    fn test_gem_rate_over_many_victories() {
        let region = region_with_energy(Some(3));
        let mut rng = Pcg32::seed_from_u64(2024);
        const N: u32 = 100_000;
        let hits = (0..N)
            .filter(|_| settle(OutcomeKind::Victory, 100, &region, None, &mut rng).gem_reward > 0)
            .count();
        let rate = hits as f64 / N as f64;
        assert!((rate - 0.10).abs() <= 0.01, "gem rate {rate}");
    }

    proptest! {
        #[test]
        fn prop_victory_pays_whole_pool(pool in any::<u64>(), draw in 0.0f64..1.0) {
            let region = region_with_energy(Some(3));
            let s = settle_with_draw(OutcomeKind::Victory, pool, &region, None, draw);
            prop_assert_eq!(s.payout, pool);
        }

        #[test]
        fn prop_draw_pays_half(pool in any::<u64>()) {
            let region = region_with_energy(Some(3));
            let s = settle_with_draw(OutcomeKind::Draw, pool, &region, None, 0.0);
            prop_assert_eq!(s.payout, pool / 2);
        }

        #[test]
        fn prop_declared_pays_refund_floor(pool in any::<u64>(), balls in 0u8..=10) {
            let region = region_with_energy(Some(3));
            let s = settle_with_draw(OutcomeKind::Declared, pool, &region, Some(balls), 0.0);
            let expected = pool as u128 * refund_percent(balls as i32) as u128 / 100;
            prop_assert_eq!(s.payout as u128, expected);
            prop_assert!(s.payout <= pool / 2);
        }

        #[test]
        fn prop_defeat_pays_nothing(pool in any::<u64>(), draw in 0.0f64..1.0) {
            let region = region_with_energy(Some(3));
            let s = settle_with_draw(OutcomeKind::Defeat, pool, &region, None, draw);
            prop_assert_eq!(s, Settlement::default());
        }
    }
}
