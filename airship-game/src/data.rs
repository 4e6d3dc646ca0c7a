//! Authored story content: nodes, decisions, and their consequences.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display category for a decision. Purely cosmetic; the engine never
/// branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DecisionKind {
    Safe,
    Risky,
    #[default]
    Neutral,
    Negative,
}

impl DecisionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Risky => "risky",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

/// A non-numeric flag stored on the game state. Flags overwrite on each
/// write instead of accumulating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Toggle(bool),
    Text(String),
}

/// Minimum ledger thresholds gating a decision's selectability.
pub type Requirements = BTreeMap<String, f64>;

/// One effect applied when a decision is chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Consequence {
    /// Additive numeric delta. A missing ledger key is initialized to the
    /// delta, so first writes read as "set" and later ones as "increment".
    Resource { key: String, amount: f64 },
    /// Overwrite a named flag outright.
    Flag { key: String, value: FlagValue },
    /// Append location ids to the unlocked-location set.
    UnlockLocations { ids: Vec<String> },
    /// Insert a skill id; re-unlocking an already-held skill is a no-op.
    UnlockSkill { id: String },
}

/// A selectable transition out of a story node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub kind: DecisionKind,
    #[serde(default)]
    pub requirements: Requirements,
    #[serde(default)]
    pub consequences: Vec<Consequence>,
    /// Destination node. Absent means the decision is terminal for this
    /// path: the current-node pointer does not move.
    #[serde(default)]
    pub next_story: Option<String>,
}

/// A narrative node with display text and its ordered decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub decisions: Vec<Decision>,
}

/// Container for all authored story content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StoryData {
    pub stories: Vec<Story>,
}

impl StoryData {
    /// Create empty story data (useful for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            stories: Vec::new(),
        }
    }

    /// Load story data from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid story data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create story data from pre-parsed stories.
    #[must_use]
    pub fn from_stories(stories: Vec<Story>) -> Self {
        Self { stories }
    }

    /// Load the campaign shipped with this crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled asset fails to parse, which would
    /// indicate a packaging bug.
    pub fn bundled() -> Result<Self, serde_json::Error> {
        Self::from_json(include_str!("../assets/stories.json"))
    }

    /// Look up a story node by id.
    #[must_use]
    pub fn get(&self, story_id: &str) -> Option<&Story> {
        self.stories.iter().find(|story| story.id == story_id)
    }

    /// Content lint: transitions whose target node is not authored.
    ///
    /// The shipped campaign deliberately leaves some branches dangling;
    /// reaching one ends the campaign for that playthrough. Returns
    /// `(story id, decision id, missing target)` triples in authored order.
    #[must_use]
    pub fn dangling_transitions(&self) -> Vec<(String, String, String)> {
        let mut dangling = Vec::new();
        for story in &self.stories {
            for decision in &story.decisions {
                if let Some(target) = &decision.next_story
                    && self.get(target).is_none()
                {
                    dangling.push((story.id.clone(), decision.id.clone(), target.clone()));
                }
            }
        }
        dangling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_data_from_json() {
        let json = r#"{
            "stories": [
                {
                    "id": "test1",
                    "title": "Test Story",
                    "text": "A test node",
                    "decisions": [
                        {
                            "id": "go",
                            "title": "Go",
                            "description": "Move along",
                            "kind": "risky",
                            "requirements": { "cash": 100 },
                            "consequences": [
                                { "type": "resource", "key": "cash", "amount": -100 },
                                { "type": "flag", "key": "brave", "value": true },
                                { "type": "unlock_skill", "id": "navigation" }
                            ],
                            "next_story": "test2"
                        }
                    ]
                }
            ]
        }"#;

        let data = StoryData::from_json(json).unwrap();
        assert_eq!(data.stories.len(), 1);
        let decision = &data.get("test1").unwrap().decisions[0];
        assert_eq!(decision.kind, DecisionKind::Risky);
        assert_eq!(decision.requirements.get("cash"), Some(&100.0));
        assert_eq!(decision.consequences.len(), 3);
        assert!(matches!(
            &decision.consequences[1],
            Consequence::Flag { key, value: FlagValue::Toggle(true) } if key == "brave"
        ));
        assert_eq!(decision.next_story.as_deref(), Some("test2"));
    }

    #[test]
    fn dangling_transitions_reported_in_order() {
        let json = r#"{
            "stories": [
                {
                    "id": "a",
                    "title": "A",
                    "text": "",
                    "decisions": [
                        { "id": "to_b", "title": "", "description": "", "next_story": "b" },
                        { "id": "to_ghost", "title": "", "description": "", "next_story": "ghost" },
                        { "id": "stay", "title": "", "description": "" }
                    ]
                },
                { "id": "b", "title": "B", "text": "", "decisions": [] }
            ]
        }"#;
        let data = StoryData::from_json(json).unwrap();
        let dangling = data.dangling_transitions();
        assert_eq!(dangling.len(), 1);
        assert_eq!(
            dangling[0],
            (
                String::from("a"),
                String::from("to_ghost"),
                String::from("ghost")
            )
        );
    }

    #[test]
    fn kind_labels_match_wire_names() {
        for kind in [
            DecisionKind::Safe,
            DecisionKind::Risky,
            DecisionKind::Neutral,
            DecisionKind::Negative,
        ] {
            let wire = serde_json::to_string(&kind).unwrap();
            assert_eq!(wire, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn flag_values_accept_text_and_toggle() {
        let toggle: FlagValue = serde_json::from_str("true").unwrap();
        let text: FlagValue = serde_json::from_str("\"limited\"").unwrap();
        assert_eq!(toggle, FlagValue::Toggle(true));
        assert_eq!(text, FlagValue::Text(String::from("limited")));
    }
}
