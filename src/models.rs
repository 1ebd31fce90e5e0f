// Data models for TaskMaster

use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar date format used by tasks (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time-of-day format used by tasks (`HH:MM`, 24-hour)
pub const TIME_FORMAT: &str = "%H:%M";

/// Time assumed for tasks without one when ordering a day
pub const MIDNIGHT: &str = "00:00";

/// Identifier handed out by the store when a task is created
pub type TaskId = String;

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl Task {
    /// Time used for display ordering
    pub fn sort_time(&self) -> &str {
        self.time.as_deref().unwrap_or(MIDNIGHT)
    }

    /// True if date and time (when present) are well formed
    pub fn is_well_formed(&self) -> bool {
        is_valid_date(&self.date) && self.time.as_deref().is_none_or(is_valid_time)
    }
}

/// UI language selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ar];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// Right-to-left script
    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Ar)
    }

    /// The other language, as flipped by the language switch
    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Ar,
            Language::Ar => Language::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ar" => Ok(Language::Ar),
            other => Err(format!("unsupported language: {} (expected en or ar)", other)),
        }
    }
}

/// Strict `YYYY-MM-DD` that is also a real calendar date
pub fn is_valid_date(s: &str) -> bool {
    s.len() == 10
        && NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(|d| d.format(DATE_FORMAT).to_string() == s)
            .unwrap_or(false)
}

/// Strict 24-hour `HH:MM`
pub fn is_valid_time(s: &str) -> bool {
    s.len() == 5
        && NaiveTime::parse_from_str(s, TIME_FORMAT)
            .map(|t| t.format(TIME_FORMAT).to_string() == s)
            .unwrap_or(false)
}

/// Today's date on the local clock, in task date format
pub fn today() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

/// Current local time of day, in task time format
pub fn now_hhmm() -> String {
    Local::now().format(TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(time: Option<&str>) -> Task {
        Task {
            id: "t1".to_string(),
            text: "Buy milk".to_string(),
            completed: false,
            date: "2025-06-01".to_string(),
            time: time.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_dates() {
        assert!(is_valid_date("2025-06-01"));
        assert!(is_valid_date("2024-02-29"));

        assert!(!is_valid_date("2025-6-1"));
        assert!(!is_valid_date("2025-02-30"));
        assert!(!is_valid_date("2023-02-29"));
        assert!(!is_valid_date("01/06/2025"));
        assert!(!is_valid_date(""));
    }

    #[test]
    fn test_valid_times() {
        assert!(is_valid_time("00:00"));
        assert!(is_valid_time("07:30"));
        assert!(is_valid_time("23:59"));

        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("7:30"));
        assert!(!is_valid_time("07:60"));
        assert!(!is_valid_time("07:30:00"));
    }

    #[test]
    fn test_today_and_now_are_well_formed() {
        assert!(is_valid_date(&today()));
        assert!(is_valid_time(&now_hhmm()));
    }

    #[test]
    fn test_sort_time_defaults_to_midnight() {
        assert_eq!(task(None).sort_time(), "00:00");
        assert_eq!(task(Some("09:15")).sort_time(), "09:15");
    }

    #[test]
    fn test_task_serialization_omits_missing_time() {
        let json = serde_json::to_string(&task(None)).unwrap();
        assert!(!json.contains("time"));

        let json = serde_json::to_string(&task(Some("08:00"))).unwrap();
        assert!(json.contains("\"time\":\"08:00\""));
    }

    #[test]
    fn test_task_deserialization_defaults() {
        let task: Task = serde_json::from_str(r#"{"id":"a","text":"x","date":"2025-06-01"}"#).unwrap();
        assert!(!task.completed);
        assert!(task.time.is_none());
        assert!(task.is_well_formed());
    }

    #[test]
    fn test_language_serialization() {
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
        assert_eq!(serde_json::to_string(&Language::Ar).unwrap(), "\"ar\"");
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn test_language_parse() {
        assert_eq!("ar".parse::<Language>().unwrap(), Language::Ar);
        assert_eq!(" EN ".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_toggle_and_direction() {
        assert_eq!(Language::En.toggled(), Language::Ar);
        assert_eq!(Language::Ar.toggled(), Language::En);
        assert!(Language::Ar.is_rtl());
        assert!(!Language::En.is_rtl());
    }
}
