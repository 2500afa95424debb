use crate::calendar::DateKey;
use crate::models::{Habit, HabitCard, HabitData, HabitListResponse};
use crate::streak::{streak_at, streak_label};
use chrono::{DateTime, Local};

pub fn build_view_at(today: DateKey, data: &HabitData) -> HabitListResponse {
    let habits = data
        .habits
        .iter()
        .filter(|habit| data.filter.includes(habit))
        .map(|habit| to_card(today, habit))
        .collect();

    HabitListResponse {
        filter: data.filter,
        today: today.to_string(),
        habits,
    }
}

fn to_card(today: DateKey, habit: &Habit) -> HabitCard {
    let streak = streak_at(today, &habit.completions);
    HabitCard {
        id: habit.id.clone(),
        name: habit.name.clone(),
        created_label: format_created(&habit.created_at),
        streak,
        streak_label: streak_label(streak),
        done_today: habit.is_done_on(today),
        archived: habit.archived,
    }
}

/// `Oct 16, 2026` in local time, or `Unknown` for an unreadable timestamp.
pub fn format_created(created_at: &str) -> String {
    match DateTime::parse_from_rfc3339(created_at) {
        Ok(timestamp) => timestamp
            .with_timezone(&Local)
            .format("%b %-d, %Y")
            .to_string(),
        Err(_) => "Unknown".to_string(),
    }
}
