use crate::calendar::DateKey;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub created_at: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub completions: BTreeSet<DateKey>,
}

impl Habit {
    pub fn new(name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            archived: false,
            completions: BTreeSet::new(),
        }
    }

    pub fn is_done_on(&self, day: DateKey) -> bool {
        self.completions.contains(&day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    Active,
    All,
    Archived,
}

impl Filter {
    /// Chip order on the page.
    pub const CHIPS: [Filter; 3] = [Filter::Active, Filter::All, Filter::Archived];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "active" => Some(Self::Active),
            "all" => Some(Self::All),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::All => "all",
            Self::Archived => "archived",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::All => "All",
            Self::Archived => "Archived",
        }
    }

    pub fn includes(self, habit: &Habit) -> bool {
        match self {
            Self::All => true,
            Self::Archived => habit.archived,
            Self::Active => !habit.archived,
        }
    }
}

/// The persisted document and the in-memory state it is loaded into.
/// Loading goes through `storage::decode_document`, which tolerates
/// partially malformed documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitData {
    pub version: u32,
    pub habits: Vec<Habit>,
    pub filter: Filter,
}

impl Default for HabitData {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            habits: Vec::new(),
            filter: Filter::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddHabitForm {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct HabitActionForm {
    pub action: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FilterForm {
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClearForm {
    pub confirm: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddHabitRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub filter: String,
}

#[derive(Debug, Deserialize)]
pub struct ClearRequest {
    #[serde(default)]
    pub confirm: bool,
}

/// One habit as shown on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitCard {
    pub id: String,
    pub name: String,
    pub created_label: String,
    pub streak: u32,
    pub streak_label: String,
    pub done_today: bool,
    pub archived: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitListResponse {
    pub filter: Filter,
    pub today: String,
    pub habits: Vec<HabitCard>,
}
