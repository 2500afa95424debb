//! Local calendar dates used as completion keys.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar day in local time, serialized as `YYYY-MM-DD`.
///
/// Both toggling and the streak walk go through this type, so a completion
/// recorded just before midnight is the same key the streak looks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The previous calendar day, `None` only at chrono's minimum date.
    pub fn yesterday(self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map(Self)
    }
}

impl TryFrom<String> for DateKey {
    type Error = chrono::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateKey> for String {
    fn from(value: DateKey) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> DateKey {
        DateKey::from_date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(day(2026, 1, 5).to_string(), "2026-01-05");
    }

    #[test]
    fn yesterday_crosses_month_and_year() {
        assert_eq!(day(2026, 3, 1).yesterday(), Some(day(2026, 2, 28)));
        assert_eq!(day(2026, 1, 1).yesterday(), Some(day(2025, 12, 31)));
    }

    #[test]
    fn parses_and_rejects() {
        assert_eq!("2026-10-16".parse::<DateKey>().unwrap(), day(2026, 10, 16));
        assert!("16/10/2026".parse::<DateKey>().is_err());
        assert!("".parse::<DateKey>().is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&day(2026, 2, 3)).unwrap();
        assert_eq!(json, "\"2026-02-03\"");
        let back: DateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, day(2026, 2, 3));
    }
}
