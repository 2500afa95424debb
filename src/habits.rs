//! Mutations on [`HabitData`].
//!
//! Every operation reports whether it changed anything. An unknown id is a
//! silent no-op so stale pages never produce errors.

use crate::calendar::DateKey;
use crate::models::{Filter, Habit, HabitData};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Type a habit first.")]
    Empty,
    #[error("That habit already exists.")]
    Duplicate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitAction {
    Toggle,
    Archive,
    Restore,
    Delete,
}

impl HabitAction {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "toggle" => Some(Self::Toggle),
            "archive" => Some(Self::Archive),
            "restore" => Some(Self::Restore),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Toggle => "toggle",
            Self::Archive => "archive",
            Self::Restore => "restore",
            Self::Delete => "delete",
        }
    }
}

/// Trims and collapses runs of whitespace into single spaces.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes `raw` and checks it against existing names, ignoring case.
pub fn validate_new_name(raw: &str, habits: &[Habit]) -> Result<String, NameError> {
    let name = normalize_name(raw);
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    let lowered = name.to_lowercase();
    if habits.iter().any(|habit| habit.name.to_lowercase() == lowered) {
        return Err(NameError::Duplicate);
    }
    Ok(name)
}

/// Inserts a new habit at the head of the list. `name` must already be
/// validated.
pub fn add_habit(data: &mut HabitData, name: String, now: DateTime<Utc>) -> &Habit {
    data.habits.insert(0, Habit::new(name, now));
    &data.habits[0]
}

pub fn toggle_done(data: &mut HabitData, id: &str, today: DateKey) -> bool {
    let Some(habit) = find_mut(data, id) else {
        return false;
    };
    if !habit.completions.remove(&today) {
        habit.completions.insert(today);
    }
    true
}

pub fn set_archived(data: &mut HabitData, id: &str, archived: bool) -> bool {
    let Some(habit) = find_mut(data, id) else {
        return false;
    };
    if habit.archived == archived {
        return false;
    }
    habit.archived = archived;
    true
}

pub fn delete_habit(data: &mut HabitData, id: &str) -> bool {
    let before = data.habits.len();
    data.habits.retain(|habit| habit.id != id);
    data.habits.len() != before
}

/// Removes every habit. The filter is left alone.
pub fn clear_habits(data: &mut HabitData) -> bool {
    if data.habits.is_empty() {
        return false;
    }
    data.habits.clear();
    true
}

pub fn set_filter(data: &mut HabitData, filter: Filter) -> bool {
    if data.filter == filter {
        return false;
    }
    data.filter = filter;
    true
}

pub fn apply_action(data: &mut HabitData, action: HabitAction, id: &str, today: DateKey) -> bool {
    match action {
        HabitAction::Toggle => toggle_done(data, id, today),
        HabitAction::Archive => set_archived(data, id, true),
        HabitAction::Restore => set_archived(data, id, false),
        HabitAction::Delete => delete_habit(data, id),
    }
}

fn find_mut<'a>(data: &'a mut HabitData, id: &str) -> Option<&'a mut Habit> {
    data.habits.iter_mut().find(|habit| habit.id == id)
}
