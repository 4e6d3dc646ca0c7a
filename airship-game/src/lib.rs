//! Airship Freedom Game Engine
//!
//! Platform-agnostic core logic for the Airship Freedom branching-narrative
//! game. This crate owns the resource ledger, the story state machine, and
//! the achievement/progression rules, without UI or platform-specific
//! dependencies. Rendering, persistence backends, and timers are external
//! collaborators reached through the traits below.

pub mod achievements;
pub mod constants;
pub mod data;
pub mod decisions;
pub mod progression;
pub mod skills;
pub mod state;

// Re-export commonly used types
pub use achievements::{Achievement, check_achievements};
pub use constants::BTC_PRICE_USD;
pub use data::{
    Consequence, Decision, DecisionKind, FlagValue, Requirements, Story, StoryData,
};
pub use decisions::{DecisionOutcome, DecisionView, EngineError};
pub use progression::{
    AIRSHIPS, AirshipTier, LOCATIONS, Location, best_airship, location, reachable_locations,
    total_wealth,
};
pub use skills::{SKILLS, Skill};
pub use state::{GameState, Ledger, LossEvent, LossKind};

/// Trait for abstracting story-content loading.
/// Platform-specific implementations should provide this.
pub trait StoryLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the authored story table from the platform-specific source.
    ///
    /// # Errors
    ///
    /// Returns an error if the story data cannot be loaded.
    fn load_story_data(&self) -> Result<StoryData, Self::Error>;
}

/// Trait for abstracting save/load operations.
/// Platform-specific implementations should provide this.
pub trait GameStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save game state.
    ///
    /// # Errors
    ///
    /// Returns an error if the game state cannot be saved.
    fn save_game(&self, save_name: &str, game_state: &GameState) -> Result<(), Self::Error>;

    /// Load game state.
    ///
    /// # Errors
    ///
    /// Returns an error if the game state cannot be loaded.
    fn load_game(&self, save_name: &str) -> Result<Option<GameState>, Self::Error>;

    /// Delete saved game.
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_save(&self, save_name: &str) -> Result<(), Self::Error>;
}

/// Main game engine for managing game instances.
pub struct GameEngine<L, S>
where
    L: StoryLoader,
    S: GameStorage,
{
    story_loader: L,
    storage: S,
}

impl<L, S> GameEngine<L, S>
where
    L: StoryLoader,
    S: GameStorage,
{
    /// Create a new game engine with the provided loader and storage.
    pub const fn new(story_loader: L, storage: S) -> Self {
        Self {
            story_loader,
            storage,
        }
    }

    /// Start a fresh game over freshly loaded story content.
    ///
    /// # Errors
    ///
    /// Returns an error if the story data cannot be loaded.
    pub fn create_game(&self) -> Result<GameState, L::Error> {
        let data = self.story_loader.load_story_data()?;
        Ok(GameState::new(data))
    }

    /// Save a game state.
    ///
    /// # Errors
    ///
    /// Returns an error if the game state cannot be saved.
    pub fn save_game(&self, save_name: &str, game_state: &GameState) -> Result<(), S::Error> {
        self.storage.save_game(save_name, game_state)
    }

    /// Load a game state. Fields absent in the saved blob keep their
    /// defaults; the story table is reattached fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the game state cannot be loaded or rehydrated.
    pub fn load_game(&self, save_name: &str) -> Result<Option<GameState>, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
        S::Error: Into<anyhow::Error>,
    {
        if let Some(game_state) = self.storage.load_game(save_name).map_err(Into::into)? {
            let data = self.story_loader.load_story_data().map_err(Into::into)?;
            Ok(Some(game_state.rehydrate(data)))
        } else {
            Ok(None)
        }
    }

    /// Delete a saved game.
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    pub fn delete_save(&self, save_name: &str) -> Result<(), S::Error> {
        self.storage.delete_save(save_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Copy, Default)]
    struct FixtureLoader;

    impl StoryLoader for FixtureLoader {
        type Error = Infallible;

        fn load_story_data(&self) -> Result<StoryData, Self::Error> {
            Ok(StoryData::bundled().unwrap_or_else(|_| StoryData::empty()))
        }
    }

    #[derive(Clone, Default)]
    struct MemoryStorage {
        saves: Rc<RefCell<HashMap<String, GameState>>>,
    }

    impl GameStorage for MemoryStorage {
        type Error = Infallible;

        fn save_game(&self, save_name: &str, game_state: &GameState) -> Result<(), Self::Error> {
            self.saves
                .borrow_mut()
                .insert(save_name.to_string(), game_state.clone());
            Ok(())
        }

        fn load_game(&self, save_name: &str) -> Result<Option<GameState>, Self::Error> {
            Ok(self.saves.borrow().get(save_name).cloned())
        }

        fn delete_save(&self, save_name: &str) -> Result<(), Self::Error> {
            self.saves.borrow_mut().remove(save_name);
            Ok(())
        }
    }

    #[test]
    fn engine_creates_and_roundtrips_state() {
        let engine = GameEngine::new(FixtureLoader, MemoryStorage::default());
        let mut state = engine.create_game().unwrap();
        assert_eq!(state.current_story, "laptop_crisis");

        state.ledger.credit("debt", 800.0);
        state.current_story = String::from("btc_volatility");
        engine.save_game("slot-one", &state).unwrap();

        let loaded = engine.load_game("slot-one").unwrap().expect("save exists");
        assert_eq!(loaded.current_story, "btc_volatility");
        assert!(loaded.data.is_some(), "load reattaches story content");
        assert!(engine.load_game("missing-slot").unwrap().is_none());
    }

    #[test]
    fn delete_save_removes_slot() {
        let engine = GameEngine::new(FixtureLoader, MemoryStorage::default());
        let state = engine.create_game().unwrap();
        engine.save_game("slot", &state).unwrap();
        engine.delete_save("slot").unwrap();
        assert!(engine.load_game("slot").unwrap().is_none());
    }
}
