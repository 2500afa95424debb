use crate::calendar::DateKey;
use crate::errors::AppError;
use crate::models::{Filter, Habit, HabitData, SCHEMA_VERSION};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{error, warn};

/// Fixed key of the single slot the tracker persists into.
pub const STORAGE_KEY: &str = "habit_tracker_v1";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document is not an object")]
    NotObject,
    #[error("`habits` is not an array")]
    HabitsNotArray,
}

#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn ensure_parent(&self) -> Result<(), std::io::Error> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent).await,
            _ => Ok(()),
        }
    }

    /// Reads the stored document. Anything missing or malformed yields the
    /// default state; the file itself is left untouched.
    pub async fn load(&self) -> HabitData {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return HabitData::default(),
            Err(err) => {
                warn!(path = %self.path.display(), "failed to read habit data: {err}");
                return HabitData::default();
            }
        };

        match decode_document(&bytes) {
            Ok(data) => data,
            Err(err) => {
                warn!(path = %self.path.display(), "ignoring stored habit data: {err}");
                HabitData::default()
            }
        }
    }

    /// Overwrites the slot with `data` via a temp file and rename.
    pub async fn save(&self, data: &HabitData) -> Result<(), AppError> {
        let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, payload)
            .await
            .map_err(|err| self.save_failed(err))?;
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|err| self.save_failed(err))?;
        Ok(())
    }

    fn save_failed(&self, err: std::io::Error) -> AppError {
        error!(path = %self.path.display(), "failed to persist habit data: {err}");
        AppError::internal(err)
    }
}

pub fn decode_document(bytes: &[u8]) -> Result<HabitData, LoadError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let Some(object) = value.as_object() else {
        return Err(LoadError::NotObject);
    };
    let Some(habits) = object.get("habits").and_then(Value::as_array) else {
        return Err(LoadError::HabitsNotArray);
    };
    let habits = habits
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| decode_habit(index, entry))
        .collect();

    // A newer version is kept so saving never relabels the file as older.
    let version = object
        .get("version")
        .and_then(Value::as_u64)
        .map_or(SCHEMA_VERSION, |version| u32::try_from(version).unwrap_or(u32::MAX));
    if version > SCHEMA_VERSION {
        warn!(version, "habit data was written by a newer schema; loading best-effort");
    }

    let filter = object
        .get("filter")
        .and_then(Value::as_str)
        .and_then(Filter::parse)
        .unwrap_or_default();

    Ok(HabitData {
        version: version.max(SCHEMA_VERSION),
        habits,
        filter,
    })
}

/// Decodes one stored habit. Entries without an id or name are dropped;
/// every other field falls back to its default, and unreadable completion
/// dates are skipped.
fn decode_habit(index: usize, entry: &Value) -> Option<Habit> {
    let text = |key: &str| entry.get(key).and_then(Value::as_str).map(str::to_string);
    let id = text("id").filter(|id| !id.is_empty());
    let name = text("name").filter(|name| !name.trim().is_empty());
    let (Some(id), Some(name)) = (id, name) else {
        warn!(index, "dropping stored habit without id or name");
        return None;
    };

    let mut completions = BTreeSet::new();
    let stored = entry.get("completions").and_then(Value::as_array);
    for raw in stored.into_iter().flatten() {
        match raw.as_str().and_then(|day| day.parse::<DateKey>().ok()) {
            Some(day) => {
                completions.insert(day);
            }
            None => warn!(%id, "dropping unreadable completion date {raw}"),
        }
    }

    Some(Habit {
        id,
        name,
        created_at: text("createdAt").unwrap_or_default(),
        archived: entry.get("archived").and_then(Value::as_bool).unwrap_or(false),
        completions,
    })
}
