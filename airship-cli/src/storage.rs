//! Content loading and save-file persistence for the terminal front-end.
use std::fs;
use std::io;
use std::path::PathBuf;

use airship_game::{GameState, GameStorage, StoryData, StoryLoader};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("bundled story content failed to parse: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serves the campaign compiled into the engine crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledLoader;

impl StoryLoader for BundledLoader {
    type Error = LoaderError;

    fn load_story_data(&self) -> Result<StoryData, Self::Error> {
        Ok(StoryData::bundled()?)
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("save file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("save file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// One JSON file per save slot under a configurable directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn slot_path(&self, save_name: &str) -> PathBuf {
        self.dir.join(format!("{save_name}.json"))
    }
}

impl GameStorage for FileStorage {
    type Error = StorageError;

    fn save_game(&self, save_name: &str, game_state: &GameState) -> Result<(), Self::Error> {
        fs::create_dir_all(&self.dir)?;
        let blob = serde_json::to_string_pretty(game_state)?;
        fs::write(self.slot_path(save_name), blob)?;
        Ok(())
    }

    fn load_game(&self, save_name: &str) -> Result<Option<GameState>, Self::Error> {
        match fs::read_to_string(self.slot_path(save_name)) {
            Ok(blob) => Ok(Some(serde_json::from_str(&blob)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn delete_save(&self, save_name: &str) -> Result<(), Self::Error> {
        match fs::remove_file(self.slot_path(save_name)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
