//! Decision selection and application: the narrative state machine.
//!
//! States are story-node ids; transitions are decisions, each a directed
//! edge to its `next_story` (or a self-loop when absent). All operations run
//! to completion synchronously, and validation happens before any mutation
//! so a failed apply leaves the state untouched.
use thiserror::Error;

use crate::constants::RES_BITCOIN;
use crate::data::{Consequence, Decision, Story};
use crate::state::{GameState, Ledger, LossEvent, LossKind, now_millis};

/// Failure modes for engine operations. None are retryable: the unknown-id
/// variants indicate a content-authoring or caller bug, and a requirement
/// failure means the UI raced a prior mutation and should re-render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown story id '{0}'")]
    UnknownStory(String),
    #[error("story '{story}' has no decision '{decision}'")]
    UnknownDecision { story: String, decision: String },
    #[error("requirements not met for decision '{decision}' in story '{story}'")]
    RequirementNotMet { story: String, decision: String },
}

/// A decision paired with its current selectability.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionView {
    pub decision: Decision,
    pub selectable: bool,
}

/// Snapshot returned by [`GameState::apply_decision`] for the presentation
/// layer to render. The engine performs no rendering or timed effects.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionOutcome {
    /// Ledger state after the decision.
    pub ledger: Ledger,
    /// Node id after any transition.
    pub current_story: String,
    /// Skills that went from absent to present, for notifications.
    pub unlocked_skills: Vec<String>,
    /// Loss record appended by this decision, if any.
    pub loss: Option<LossEvent>,
}

impl GameState {
    fn story(&self, story_id: &str) -> Result<&Story, EngineError> {
        self.data
            .as_ref()
            .and_then(|data| data.get(story_id))
            .ok_or_else(|| EngineError::UnknownStory(story_id.to_string()))
    }

    /// The decisions attached to a node, in authored order, each tagged
    /// with whether its requirements are met by the current ledger.
    /// Read-only.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownStory`] when the node is not authored
    /// (or no story table is attached).
    pub fn available_decisions(&self, story_id: &str) -> Result<Vec<DecisionView>, EngineError> {
        let story = self.story(story_id)?;
        Ok(story
            .decisions
            .iter()
            .map(|decision| DecisionView {
                selectable: self.ledger.meets(&decision.requirements),
                decision: decision.clone(),
            })
            .collect())
    }

    /// Apply a decision: credit its resource deltas, overwrite flags,
    /// unlock locations and skills, audit bitcoin losses, and advance the
    /// current-node pointer when the decision names a destination.
    ///
    /// Requirements are re-validated here, not just at render time, so a
    /// selection that went stale between render and click fails cleanly
    /// instead of mutating the ledger.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownStory`] / [`EngineError::UnknownDecision`] for
    /// bad ids, [`EngineError::RequirementNotMet`] for a stale selection.
    /// On any error the state is unchanged.
    pub fn apply_decision(
        &mut self,
        story_id: &str,
        decision_id: &str,
    ) -> Result<DecisionOutcome, EngineError> {
        let decision = self
            .story(story_id)?
            .decisions
            .iter()
            .find(|decision| decision.id == decision_id)
            .ok_or_else(|| EngineError::UnknownDecision {
                story: story_id.to_string(),
                decision: decision_id.to_string(),
            })?
            .clone();

        if !self.ledger.meets(&decision.requirements) {
            return Err(EngineError::RequirementNotMet {
                story: story_id.to_string(),
                decision: decision_id.to_string(),
            });
        }

        let mut unlocked_skills = Vec::new();
        let mut bitcoin_delta = 0.0;
        for consequence in &decision.consequences {
            match consequence {
                Consequence::Resource { key, amount } => {
                    self.ledger.credit(key, *amount);
                    if key == RES_BITCOIN {
                        bitcoin_delta += *amount;
                    }
                }
                Consequence::Flag { key, value } => {
                    self.flags.insert(key.clone(), value.clone());
                }
                Consequence::UnlockLocations { ids } => {
                    for location in ids {
                        self.unlocked_locations.insert(location.clone());
                    }
                }
                Consequence::UnlockSkill { id } => {
                    if self.unlock_skill(id) {
                        unlocked_skills.push(id.clone());
                    }
                }
            }
        }

        let loss = (bitcoin_delta < 0.0).then(|| LossEvent {
            kind: LossKind::BitcoinLoss,
            amount: bitcoin_delta.abs(),
            timestamp_ms: now_millis(),
            story_id: story_id.to_string(),
        });
        if let Some(event) = &loss {
            self.loss_events.push(event.clone());
        }

        if let Some(next) = &decision.next_story {
            log::debug!("story transition {story_id} -> {next} via {decision_id}");
            self.current_story = next.clone();
            self.completed_events.push(decision.id.clone());
        }

        Ok(DecisionOutcome {
            ledger: self.ledger.clone(),
            current_story: self.current_story.clone(),
            unlocked_skills,
            loss,
        })
    }
}
