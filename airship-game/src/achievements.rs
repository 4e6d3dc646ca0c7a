//! Achievement rules evaluated against the resource ledger.
use std::collections::BTreeSet;

use crate::constants::{
    ADVENTURE_MASTER_THRESHOLD, RES_ADVENTURE_POINTS, RES_BITCOIN, WHALE_THRESHOLD_BTC,
};
use crate::state::Ledger;

/// A display-ready achievement definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

struct AchievementRule {
    achievement: Achievement,
    resource: &'static str,
    minimum: f64,
}

const RULES: &[AchievementRule] = &[
    AchievementRule {
        achievement: Achievement {
            id: "bitcoin_whale",
            title: "🐋 Bitcoin Whale",
            description: "Accumulated 1 full Bitcoin!",
        },
        resource: RES_BITCOIN,
        minimum: WHALE_THRESHOLD_BTC,
    },
    AchievementRule {
        achievement: Achievement {
            id: "adventure_master",
            title: "⭐ Adventure Master",
            description: "Earned 100 Adventure Points!",
        },
        resource: RES_ADVENTURE_POINTS,
        minimum: ADVENTURE_MASTER_THRESHOLD,
    },
];

/// Pure sweep over the rule table: returns achievements whose threshold the
/// ledger now meets and that are absent from `earned`, in table order. The
/// caller records the ids and renders notifications; `earned` is not
/// mutated here.
#[must_use]
pub fn check_achievements(ledger: &Ledger, earned: &BTreeSet<String>) -> Vec<Achievement> {
    RULES
        .iter()
        .filter(|rule| {
            ledger.amount(rule.resource) >= rule.minimum && !earned.contains(rule.achievement.id)
        })
        .map(|rule| rule.achievement)
        .collect()
}
