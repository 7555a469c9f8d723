//! Static game catalog
//!
//! Regions and the matchmaking roster are read-only mock data compiled into the
//! binary. Matches reference regions by id.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_ENERGY_REWARD;

/// A playable region (a country's set of stadiums)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub id: &'static str,
    pub name: &'static str,
    pub country: &'static str,
    /// Entry fee per combatant, in coins
    pub entry_fee: u64,
    /// Energy awarded on victory (None falls back to the default)
    pub energy_reward: Option<u64>,
    pub stadium_count: u8,
    /// Minimum player level to enter
    pub level_gate: u32,
}

impl Region {
    /// Energy granted for a victory in this region
    pub fn victory_energy(&self) -> u64 {
        self.energy_reward.unwrap_or(DEFAULT_ENERGY_REWARD)
    }

    pub fn is_unlocked(&self, player_level: u32) -> bool {
        player_level >= self.level_gate
    }
}

pub const REGIONS: &[Region] = &[
    Region {
        id: "mumbai",
        name: "Mumbai",
        country: "India",
        entry_fee: 50,
        energy_reward: None,
        stadium_count: 3,
        level_gate: 1,
    },
    Region {
        id: "lahore",
        name: "Lahore",
        country: "Pakistan",
        entry_fee: 100,
        energy_reward: Some(3),
        stadium_count: 3,
        level_gate: 2,
    },
    Region {
        id: "london",
        name: "London",
        country: "England",
        entry_fee: 200,
        energy_reward: Some(3),
        stadium_count: 3,
        level_gate: 4,
    },
    Region {
        id: "melbourne",
        name: "Melbourne",
        country: "Australia",
        entry_fee: 500,
        energy_reward: Some(4),
        stadium_count: 3,
        level_gate: 7,
    },
    Region {
        id: "cape-town",
        name: "Cape Town",
        country: "South Africa",
        entry_fee: 1000,
        energy_reward: Some(5),
        stadium_count: 3,
        level_gate: 10,
    },
];

/// Look up a region by id
pub fn region(id: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.id == id)
}

/// Opponent faced in a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opponent {
    pub name: String,
    pub level: u32,
    /// Squad power rating
    pub power: u32,
}

const ROSTER: &[&str] = &[
    "Gully Kings",
    "Spin Doctors",
    "Boundary Riders",
    "Yorker Squad",
    "Silly Point XI",
    "Night Watchmen",
    "Googly Gang",
    "Duckworth Lewis",
];

/// Levels an opponent may sit above or below the player
const OPPONENT_LEVEL_SPREAD: u32 = 2;

/// Pick a mock opponent near the player's level.
pub fn pick_opponent<R: Rng + ?Sized>(rng: &mut R, player_level: u32) -> Opponent {
    let name = ROSTER[rng.random_range(0..ROSTER.len())];
    let low = player_level.saturating_sub(OPPONENT_LEVEL_SPREAD).max(1);
    let high = player_level.saturating_add(OPPONENT_LEVEL_SPREAD);
    let level = rng.random_range(low..=high);
    let power = level * 100 + rng.random_range(0..100);
    Opponent {
        name: name.to_string(),
        level,
        power,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_region_lookup() {
        assert_eq!(region("lahore").map(|r| r.entry_fee), Some(100));
        assert!(region("atlantis").is_none());
    }

    #[test]
    fn test_region_ids_unique() {
        for (i, a) in REGIONS.iter().enumerate() {
            assert!(REGIONS[i + 1..].iter().all(|b| b.id != a.id), "{}", a.id);
        }
    }

    #[test]
    fn test_victory_energy_fallback() {
        let mumbai = region("mumbai").unwrap();
        assert_eq!(mumbai.energy_reward, None);
        assert_eq!(mumbai.victory_energy(), DEFAULT_ENERGY_REWARD);
        assert_eq!(region("lahore").unwrap().victory_energy(), 3);
    }

    #[test]
    fn test_level_gate() {
        let london = region("london").unwrap();
        assert!(!london.is_unlocked(3));
        assert!(london.is_unlocked(4));
    }

    #[test]
    fn test_opponent_near_player_level() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let opp = pick_opponent(&mut rng, 1);
            assert!((1..=3).contains(&opp.level), "{opp:?}");
            let opp = pick_opponent(&mut rng, 10);
            assert!((8..=12).contains(&opp.level), "{opp:?}");
            assert!(opp.power >= opp.level * 100 && opp.power < (opp.level + 1) * 100);
        }
    }

    #[test]
    fn test_opponent_deterministic_with_seed() {
        let a = pick_opponent(&mut Pcg32::seed_from_u64(42), 5);
        let b = pick_opponent(&mut Pcg32::seed_from_u64(42), 5);
        assert_eq!(a, b);
    }
}
