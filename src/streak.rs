use crate::calendar::DateKey;
use std::collections::BTreeSet;

/// Consecutive completed days ending at `today`; zero when `today` itself
/// is not completed.
pub fn streak_at(today: DateKey, completions: &BTreeSet<DateKey>) -> u32 {
    let mut streak = 0;
    let mut cursor = Some(today);
    while let Some(day) = cursor {
        if !completions.contains(&day) {
            break;
        }
        streak += 1;
        cursor = day.yesterday();
    }
    streak
}

pub fn streak_label(streak: u32) -> String {
    if streak == 1 {
        "1 day".to_string()
    } else {
        format!("{streak} days")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()
    }

    fn set(offsets: &[i64]) -> BTreeSet<DateKey> {
        offsets
            .iter()
            .map(|offset| DateKey::from_date(today() - Duration::days(*offset)))
            .collect()
    }

    #[test]
    fn three_consecutive_days_ending_today() {
        let today = DateKey::from_date(today());
        assert_eq!(streak_at(today, &set(&[0, 1, 2])), 3);
    }

    #[test]
    fn missing_today_is_zero() {
        let today = DateKey::from_date(today());
        assert_eq!(streak_at(today, &set(&[1, 2])), 0);
        assert_eq!(streak_at(today, &BTreeSet::new()), 0);
    }

    #[test]
    fn stops_at_first_gap_across_year_boundary() {
        let today = DateKey::from_date(today());
        // 2026-01-02, 2026-01-01, 2025-12-31, gap, 2025-12-29
        assert_eq!(streak_at(today, &set(&[0, 1, 2, 4])), 3);
    }

    #[test]
    fn future_dates_do_not_count() {
        let today = DateKey::from_date(today());
        assert_eq!(streak_at(today, &set(&[-1, 0])), 1);
    }

    #[test]
    fn label_pluralizes() {
        assert_eq!(streak_label(0), "0 days");
        assert_eq!(streak_label(1), "1 day");
        assert_eq!(streak_label(12), "12 days");
    }
}
