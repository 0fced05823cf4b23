//! Event model and calendar helpers

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::util::{local_id, unix_timestamp_millis};

/// A scheduled event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Record identifier (local-synthetic until remotely persisted)
    pub id: String,
    /// Event title
    pub title: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Start time, 24h `HH:MM`
    pub time: String,
    /// Reminder instant as an RFC 3339 timestamp, when a reminder is set
    #[serde(default)]
    pub reminder_at: Option<String>,
    /// Optional free-form notes
    #[serde(default)]
    pub notes: Option<String>,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
}

impl Event {
    /// Create a new event for the given local date and time.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id: local_id("event-"),
            title: title.into(),
            date: date.into(),
            time: time.into(),
            reminder_at: None,
            notes: None,
            created_at: unix_timestamp_millis(),
        }
    }

    /// Parse the stored reminder timestamp. Returns `None` when no reminder
    /// is set or the stored value does not parse.
    #[must_use]
    pub fn reminder_instant(&self) -> Option<DateTime<Utc>> {
        let raw = self.reminder_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|instant| instant.with_timezone(&Utc))
    }

    /// Compute the reminder instant for a local date and time pair. Returns
    /// `None` when the pair does not parse or the local time does not exist
    /// (DST gaps).
    #[must_use]
    pub fn reminder_instant_for(date: &str, time: &str) -> Option<String> {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
        let time = NaiveTime::parse_from_str(time, "%H:%M").ok()?;
        let local = Local.from_local_datetime(&date.and_time(time)).earliest()?;
        Some(local.with_timezone(&Utc).to_rfc3339())
    }
}

/// Format a date as the `YYYY-MM-DD` key used to group events.
#[must_use]
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The Monday of the week containing `date`.
#[must_use]
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Offset a date by a signed number of days.
#[must_use]
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// The seven days of the week containing `date`, Monday first.
#[must_use]
pub fn week_of(date: NaiveDate) -> Vec<NaiveDate> {
    let monday = start_of_week(date);
    (0..7).map(|offset| add_days(monday, offset)).collect()
}

/// Group events by date key. Within a date, events keep their list order.
#[must_use]
pub fn events_by_date(events: &[Event]) -> BTreeMap<String, Vec<Event>> {
    let mut grouped: BTreeMap<String, Vec<Event>> = BTreeMap::new();
    for event in events {
        grouped
            .entry(event.date.clone())
            .or_default()
            .push(event.clone());
    }
    grouped
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_event_new() {
        let event = Event::new("Standup", "2025-06-02", "09:30");
        assert!(event.id.starts_with("event-"));
        assert_eq!(event.date, "2025-06-02");
        assert_eq!(event.time, "09:30");
        assert_eq!(event.reminder_at, None);
    }

    #[test]
    fn test_reminder_instant_round_trip() {
        let mut event = Event::new("Standup", "2025-06-02", "09:30");
        event.reminder_at = Some("2025-06-02T07:30:00+00:00".to_string());
        let instant = event.reminder_instant().unwrap();
        assert_eq!(instant.to_rfc3339(), "2025-06-02T07:30:00+00:00");
    }

    #[test]
    fn test_reminder_instant_unparseable() {
        let mut event = Event::new("Standup", "2025-06-02", "09:30");
        event.reminder_at = Some("not-a-timestamp".to_string());
        assert_eq!(event.reminder_instant(), None);
    }

    #[test]
    fn test_reminder_instant_for_invalid_inputs() {
        assert_eq!(Event::reminder_instant_for("2025-13-40", "09:30"), None);
        assert_eq!(Event::reminder_instant_for("2025-06-02", "25:99"), None);
    }

    #[test]
    fn test_reminder_instant_for_parses_back() {
        let raw = Event::reminder_instant_for("2025-06-02", "09:30").unwrap();
        assert!(DateTime::parse_from_rfc3339(&raw).is_ok());
    }

    #[test]
    fn test_date_key() {
        assert_eq!(date_key(date(2025, 6, 2)), "2025-06-02");
    }

    #[test]
    fn test_start_of_week_is_monday() {
        // 2025-06-02 is a Monday.
        assert_eq!(start_of_week(date(2025, 6, 2)), date(2025, 6, 2));
        assert_eq!(start_of_week(date(2025, 6, 5)), date(2025, 6, 2));
        assert_eq!(start_of_week(date(2025, 6, 8)), date(2025, 6, 2));
    }

    #[test]
    fn test_add_days_crosses_month() {
        assert_eq!(add_days(date(2025, 6, 30), 1), date(2025, 7, 1));
        assert_eq!(add_days(date(2025, 6, 1), -1), date(2025, 5, 31));
    }

    #[test]
    fn test_week_of() {
        let week = week_of(date(2025, 6, 5));
        assert_eq!(week.len(), 7);
        assert_eq!(week[0], date(2025, 6, 2));
        assert_eq!(week[6], date(2025, 6, 8));
    }

    #[test]
    fn test_events_by_date_groups_and_keeps_order() {
        let mut a = Event::new("First", "2025-06-02", "09:00");
        a.id = "event-1".to_string();
        let mut b = Event::new("Second", "2025-06-02", "10:00");
        b.id = "event-2".to_string();
        let mut c = Event::new("Other day", "2025-06-03", "09:00");
        c.id = "event-3".to_string();

        let grouped = events_by_date(&[a, b, c]);
        assert_eq!(grouped.len(), 2);
        let monday = &grouped["2025-06-02"];
        assert_eq!(monday.len(), 2);
        assert_eq!(monday[0].title, "First");
        assert_eq!(monday[1].title, "Second");
        assert_eq!(grouped["2025-06-03"].len(), 1);
    }
}
