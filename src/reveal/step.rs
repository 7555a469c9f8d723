//! Reveal steps derived from a settlement

use serde::{Deserialize, Serialize};

use crate::economy::Settlement;
use crate::profile::{Balances, ProfileCommand};

/// What a reveal step shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    Coins,
    Energy,
    Gems,
    /// "Match completed" placeholder when nothing was won
    Match,
}

/// One disclosed reward category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealStep {
    pub kind: StepKind,
    pub amount: u64,
}

impl RevealStep {
    /// Profile credit for this step (None for the placeholder)
    pub fn command(&self) -> Option<ProfileCommand> {
        let (coins, energy, gems) = match self.kind {
            StepKind::Coins => (self.amount, 0, 0),
            StepKind::Energy => (0, self.amount, 0),
            StepKind::Gems => (0, 0, self.amount),
            StepKind::Match => return None,
        };
        Some(ProfileCommand::ApplyReward {
            coins,
            energy,
            gems,
        })
    }

    /// Balance this step credits, read from `balances`
    pub fn balance_in(&self, balances: &Balances) -> u64 {
        match self.kind {
            StepKind::Coins => balances.coins,
            StepKind::Energy => balances.energy,
            StepKind::Gems => balances.gems,
            StepKind::Match => 0,
        }
    }
}

/// Non-zero rewards in coins → energy → gems order, or a single placeholder.
pub fn build_steps(settlement: &Settlement) -> Vec<RevealStep> {
    let steps: Vec<RevealStep> = [
        (StepKind::Coins, settlement.payout),
        (StepKind::Energy, settlement.energy_reward),
        (StepKind::Gems, settlement.gem_reward),
    ]
    .into_iter()
    .filter(|&(_, amount)| amount > 0)
    .map(|(kind, amount)| RevealStep { kind, amount })
    .collect();

    if steps.is_empty() {
        vec![RevealStep {
            kind: StepKind::Match,
            amount: 0,
        }]
    } else {
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_in_fixed_order() {
        let steps = build_steps(&Settlement {
            payout: 500,
            energy_reward: 2,
            gem_reward: 5,
        });
        let kinds: Vec<StepKind> = steps.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![StepKind::Coins, StepKind::Energy, StepKind::Gems]);
    }

    #[test]
    fn test_zero_rewards_skipped() {
        let steps = build_steps(&Settlement {
            payout: 45,
            energy_reward: 1,
            gem_reward: 0,
        });
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].kind, StepKind::Energy);
    }

    #[test]
    fn test_defeat_gets_placeholder() {
        let steps = build_steps(&Settlement::default());
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].kind, StepKind::Match);
        assert_eq!(steps[0].command(), None);
    }

    #[test]
    fn test_step_command() {
        let step = RevealStep {
            kind: StepKind::Gems,
            amount: 5,
        };
        assert_eq!(
            step.command(),
            Some(ProfileCommand::ApplyReward {
                coins: 0,
                energy: 0,
                gems: 5
            })
        );
    }
}
