//! Mutable game state: the resource ledger and narrative position.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::constants::{
    RES_ADVENTURE_POINTS, RES_BITCOIN, RES_CASH, START_ADVENTURE_POINTS, START_BITCOIN,
    START_CASH, START_LOCATION, START_STORY,
};
use crate::data::{FlagValue, Requirements, StoryData};

/// Mapping of resource names to current numeric values.
///
/// Keys are open-ended and created on first write; entries are never
/// removed. Values are not clamped, so balances may go negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger(BTreeMap<String, f64>);

impl Default for Ledger {
    fn default() -> Self {
        let mut resources = BTreeMap::new();
        resources.insert(String::from(RES_CASH), START_CASH);
        resources.insert(String::from(RES_BITCOIN), START_BITCOIN);
        resources.insert(String::from(RES_ADVENTURE_POINTS), START_ADVENTURE_POINTS);
        Self(resources)
    }
}

impl Ledger {
    /// Create a ledger with no entries at all (useful for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Current value of a resource; missing keys read as zero.
    #[must_use]
    pub fn amount(&self, key: &str) -> f64 {
        self.0.get(key).copied().unwrap_or(0.0)
    }

    /// Whether a key has ever been written.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Apply an additive delta, initializing a missing key to the delta.
    /// Returns the new value.
    pub fn credit(&mut self, key: &str, delta: f64) -> f64 {
        let value = self.0.entry(key.to_string()).or_insert(0.0);
        *value += delta;
        *value
    }

    /// Whether every listed requirement key's current value meets its
    /// minimum threshold. Vacuously true for an empty requirement set.
    #[must_use]
    pub fn meets(&self, requirements: &Requirements) -> bool {
        requirements
            .iter()
            .all(|(key, minimum)| self.amount(key) >= *minimum)
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

/// Category of audited resource loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossKind {
    BitcoinLoss,
}

/// Append-only audit record written whenever a decision decreases the
/// bitcoin balance. Never read back into engine logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossEvent {
    pub kind: LossKind,
    /// Absolute magnitude of the decrease.
    pub amount: f64,
    /// Wall-clock milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
    /// The node the decision was applied from (pre-transition).
    pub story_id: String,
}

fn default_story() -> String {
    String::from(START_STORY)
}

fn default_locations() -> BTreeSet<String> {
    let mut locations = BTreeSet::new();
    locations.insert(String::from(START_LOCATION));
    locations
}

/// Full player state. Every persisted field carries a serde default so a
/// saved blob missing a field restores to the initial value for that field
/// while present fields overwrite (shallow merge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default)]
    pub ledger: Ledger,
    /// Non-numeric flags set by decisions; last write wins.
    #[serde(default)]
    pub flags: BTreeMap<String, FlagValue>,
    #[serde(default = "default_story")]
    pub current_story: String,
    /// Ids of decisions that advanced the story, in play order.
    #[serde(default)]
    pub completed_events: Vec<String>,
    #[serde(default = "default_locations")]
    pub unlocked_locations: BTreeSet<String>,
    #[serde(default)]
    pub achievements: BTreeSet<String>,
    #[serde(default)]
    pub unlocked_skills: BTreeSet<String>,
    #[serde(default)]
    pub loss_events: Vec<LossEvent>,
    #[serde(skip)]
    pub data: Option<StoryData>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            ledger: Ledger::default(),
            flags: BTreeMap::new(),
            current_story: default_story(),
            completed_events: Vec::new(),
            unlocked_locations: default_locations(),
            achievements: BTreeSet::new(),
            unlocked_skills: BTreeSet::new(),
            loss_events: Vec::new(),
            data: None,
        }
    }
}

impl GameState {
    /// Start a fresh game over the given story table.
    #[must_use]
    pub fn new(data: StoryData) -> Self {
        Self::default().rehydrate(data)
    }

    /// Reattach the story table after a restore. Saved blobs never carry
    /// content; the caller supplies it fresh.
    #[must_use]
    pub fn rehydrate(mut self, data: StoryData) -> Self {
        self.data = Some(data);
        self
    }

    /// Insert a skill id. Returns true only on the absence-to-presence
    /// transition; re-unlocking is a no-op.
    pub fn unlock_skill(&mut self, skill_id: &str) -> bool {
        self.unlocked_skills.insert(skill_id.to_string())
    }
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FLOAT_EPSILON;

    #[test]
    fn default_snapshot_matches_campaign_start() {
        let state = GameState::default();
        assert!((state.ledger.amount("cash") - 1_200.0).abs() < FLOAT_EPSILON);
        assert!((state.ledger.amount("bitcoin") - 0.15).abs() < FLOAT_EPSILON);
        assert!((state.ledger.amount("adventurePoints") - 45.0).abs() < FLOAT_EPSILON);
        assert!(!state.ledger.contains("reputation"));
        assert_eq!(state.current_story, "laptop_crisis");
        assert!(state.unlocked_locations.contains("bangkok"));
        assert!(state.achievements.is_empty());
    }

    #[test]
    fn credit_initializes_then_increments() {
        let mut ledger = Ledger::default();
        assert!((ledger.credit("reputation", 5.0) - 5.0).abs() < FLOAT_EPSILON);
        assert!((ledger.credit("reputation", -10.0) + 5.0).abs() < FLOAT_EPSILON);
        assert!((ledger.amount("reputation") + 5.0).abs() < FLOAT_EPSILON);
    }

    #[test]
    fn requirements_treat_missing_keys_as_zero() {
        let ledger = Ledger::default();
        let mut requirements = Requirements::new();
        requirements.insert(String::from("reputation"), 1.0);
        assert!(!ledger.meets(&requirements));

        requirements.clear();
        requirements.insert(String::from("cash"), 1_000.0);
        assert!(ledger.meets(&requirements));
        assert!(ledger.meets(&Requirements::new()));
    }

    #[test]
    fn restore_merges_missing_fields_onto_defaults() {
        // A blob written before achievements or loss events existed.
        let blob = r#"{
            "ledger": { "cash": 10.0, "bitcoin": 2.0 },
            "current_story": "btc_volatility",
            "completed_events": ["btc_collateral"]
        }"#;
        let state: GameState = serde_json::from_str(blob).unwrap();
        assert_eq!(state.current_story, "btc_volatility");
        assert!((state.ledger.amount("cash") - 10.0).abs() < FLOAT_EPSILON);
        // The saved ledger replaces the default wholesale.
        assert!(!state.ledger.contains("adventurePoints"));
        assert_eq!(state.completed_events, vec![String::from("btc_collateral")]);
        // Absent fields keep their defaults.
        assert!(state.achievements.is_empty());
        assert!(state.loss_events.is_empty());
        assert!(state.unlocked_locations.contains("bangkok"));
    }

    #[test]
    fn unlock_skill_is_idempotent() {
        let mut state = GameState::default();
        assert!(state.unlock_skill("risk_management"));
        assert!(!state.unlock_skill("risk_management"));
        assert_eq!(state.unlocked_skills.len(), 1);
    }

    #[test]
    fn save_roundtrip_preserves_state() {
        let mut state = GameState::default();
        state.ledger.credit("debt", 800.0);
        state.flags.insert(
            String::from("workingConditions"),
            FlagValue::Text(String::from("limited")),
        );
        state.loss_events.push(LossEvent {
            kind: LossKind::BitcoinLoss,
            amount: 0.032,
            timestamp_ms: 1_700_000_000_000,
            story_id: String::from("btc_volatility"),
        });

        let blob = serde_json::to_string(&state).unwrap();
        assert!(blob.contains("\"bitcoin_loss\""), "loss kind wire name");
        let restored: GameState = serde_json::from_str(&blob).unwrap();
        assert_eq!(restored, state);
    }
}
