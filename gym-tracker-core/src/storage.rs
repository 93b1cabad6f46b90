//! Per-user flat-file storage.
//!
//! # Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── last_user                 # text file with the last active username
//! └── users/
//!     └── <username>/
//!         ├── exercises.json    # exercise log
//!         ├── diet.json         # diet log
//!         └── goal.txt          # free-text goal
//! ```
//!
//! Nothing is cached: every load re-reads from disk and every save rewrites
//! the whole file.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::StorageError;
use crate::models::{ExerciseEntry, MealEntry};
use crate::username::Username;

const USERS_DIR: &str = "users";
const LAST_USER_FILE: &str = "last_user";
const EXERCISES_FILE: &str = "exercises.json";
const DIET_FILE: &str = "diet.json";
const GOAL_FILE: &str = "goal.txt";

/// Root of the on-disk store.
#[derive(Debug, Clone)]
pub struct TrackerStore {
    data_dir: PathBuf,
}

impl TrackerStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn users_dir(&self) -> PathBuf {
        self.data_dir.join(USERS_DIR)
    }

    fn last_user_path(&self) -> PathBuf {
        self.data_dir.join(LAST_USER_FILE)
    }

    /// Returns the repository scoped to a single user.
    pub fn user(&self, username: &Username) -> UserRepository {
        UserRepository {
            username: username.clone(),
            dir: self.users_dir().join(username.as_str()),
        }
    }

    /// Lists every user that has an exercise log, in lexicographic order.
    ///
    /// Returns an empty set if nothing has been stored yet.
    pub fn list_users(&self) -> Result<BTreeSet<Username>, StorageError> {
        let users_dir = self.users_dir();
        let entries = match fs::read_dir(&users_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(e) => return Err(StorageError::io(users_dir, e)),
        };

        let mut users = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(&users_dir, e))?;
            let path = entry.path();
            if !path.join(EXERCISES_FILE).is_file() {
                continue;
            }

            let name = entry.file_name();
            match name.to_str().map(Username::parse) {
                Some(Ok(username)) => {
                    users.insert(username);
                }
                _ => tracing::warn!("Skipping unrecognized user directory {}", path.display()),
            }
        }

        tracing::debug!("Found {} user(s) in {}", users.len(), users_dir.display());
        Ok(users)
    }

    /// Loads the most recently active username, or an empty string if unset.
    pub fn load_last_user(&self) -> Result<String, StorageError> {
        Ok(read_text(&self.last_user_path())?
            .map(|s| s.trim().to_string())
            .unwrap_or_default())
    }

    pub fn save_last_user(&self, username: &Username) -> Result<(), StorageError> {
        write_atomic(&self.last_user_path(), username.as_str().as_bytes())
    }
}

/// Storage for one user's logs and goal.
#[derive(Debug, Clone)]
pub struct UserRepository {
    username: Username,
    dir: PathBuf,
}

impl UserRepository {
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Checks if the user has any stored logs.
    pub fn exists(&self) -> bool {
        self.dir.join(EXERCISES_FILE).is_file()
    }

    /// Loads the exercise and diet logs.
    ///
    /// A user with no stored data gets two empty logs rather than an error.
    pub fn load(&self) -> Result<(Vec<ExerciseEntry>, Vec<MealEntry>), StorageError> {
        let exercises = self.load_exercises()?;
        let diet = self.load_diet()?;
        tracing::debug!(
            "Loaded {} exercise(s) and {} meal(s) for {}",
            exercises.len(),
            diet.len(),
            self.username
        );
        Ok((exercises, diet))
    }

    pub fn load_exercises(&self) -> Result<Vec<ExerciseEntry>, StorageError> {
        Ok(read_json(&self.dir.join(EXERCISES_FILE))?.unwrap_or_default())
    }

    pub fn load_diet(&self) -> Result<Vec<MealEntry>, StorageError> {
        Ok(read_json(&self.dir.join(DIET_FILE))?.unwrap_or_default())
    }

    /// Rewrites both logs.
    ///
    /// Each file is replaced atomically, so a failed save leaves the previous
    /// contents readable.
    pub fn save(&self, exercises: &[ExerciseEntry], diet: &[MealEntry]) -> Result<(), StorageError> {
        write_json(&self.dir.join(EXERCISES_FILE), exercises)?;
        write_json(&self.dir.join(DIET_FILE), diet)?;
        tracing::debug!(
            "Saved {} exercise(s) and {} meal(s) for {}",
            exercises.len(),
            diet.len(),
            self.username
        );
        Ok(())
    }

    /// Loads the user's goal, or an empty string if unset.
    pub fn load_goal(&self) -> Result<String, StorageError> {
        Ok(read_text(&self.dir.join(GOAL_FILE))?
            .map(|s| s.trim().to_string())
            .unwrap_or_default())
    }

    pub fn save_goal(&self, goal: &str) -> Result<(), StorageError> {
        write_atomic(&self.dir.join(GOAL_FILE), goal.as_bytes())
    }
}

fn read_text(path: &Path) -> Result<Option<String>, StorageError> {
    match fs::read_to_string(path) {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StorageError::io(path, e)),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    match read_text(path)? {
        Some(contents) => serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StorageError::Parse {
                path: path.to_path_buf(),
                source,
            }),
        None => Ok(None),
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomic(path, &bytes)
}

/// Writes to a temporary file next to `path` and renames it into place.
///
/// Creates the parent directory if it doesn't exist.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(dir, e))?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| StorageError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| StorageError::io(path, e.error))?;

    Ok(())
}
