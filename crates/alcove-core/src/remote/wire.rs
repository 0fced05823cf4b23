//! Wire records exchanged with the remote store and their mappings to the
//! workspace models. Mapping functions are pure so they can be tested
//! without a server.

use serde::{Deserialize, Serialize};

use crate::models::{Event, Link, Note, Profile};

/// A link row as the remote returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Payload for creating or replacing a link, keyed by URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkUpsert {
    pub name: String,
    pub url: String,
    pub pinned: bool,
    pub order: i64,
}

/// A note row as the remote returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub folder: String,
    #[serde(default)]
    pub updated_at: i64,
}

/// Payload for creating or updating a note
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteUpsert {
    pub title: String,
    pub body: String,
    pub folder: String,
}

/// An event row as the remote returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub reminder_at: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: i64,
}

/// Payload for creating or updating an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventUpsert {
    pub title: String,
    pub date: String,
    pub time: String,
    pub reminder_at: Option<String>,
    pub notes: Option<String>,
}

/// The profile row as the remote returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Payload for creating or replacing the profile singleton
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpsert {
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

pub fn link_from_record(record: LinkRecord) -> Link {
    Link {
        id: record.id,
        name: record.name,
        url: record.url,
        pinned: record.pinned,
        order: Some(record.order),
    }
}

pub fn link_to_upsert(link: &Link) -> LinkUpsert {
    LinkUpsert {
        name: link.name.clone(),
        url: link.url.clone(),
        pinned: link.pinned,
        order: link.order.unwrap_or(0),
    }
}

pub fn note_from_record(record: NoteRecord) -> Note {
    Note {
        id: record.id,
        title: record.title,
        body: record.body,
        folder: if record.folder.trim().is_empty() {
            "General".to_string()
        } else {
            record.folder
        },
        updated_at: record.updated_at,
    }
}

pub fn note_to_upsert(note: &Note) -> NoteUpsert {
    NoteUpsert {
        title: note.title.clone(),
        body: note.body.clone(),
        folder: note.folder.clone(),
    }
}

pub fn event_from_record(record: EventRecord) -> Event {
    Event {
        id: record.id,
        title: record.title,
        date: record.date,
        time: record.time,
        reminder_at: record.reminder_at,
        notes: record.notes,
        created_at: record.created_at,
    }
}

pub fn event_to_upsert(event: &Event) -> EventUpsert {
    EventUpsert {
        title: event.title.clone(),
        date: event.date.clone(),
        time: event.time.clone(),
        reminder_at: event.reminder_at.clone(),
        notes: event.notes.clone(),
    }
}

pub fn profile_from_record(record: ProfileRecord) -> Profile {
    Profile {
        name: record.name,
        email: record.email,
        avatar_url: record.avatar_url,
    }
}

pub fn profile_to_upsert(profile: &Profile) -> ProfileUpsert {
    ProfileUpsert {
        name: profile.name.clone(),
        email: profile.email.clone(),
        avatar_url: profile.avatar_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn link_record_maps_order_to_some() {
        let link = link_from_record(LinkRecord {
            id: "rec-1".to_string(),
            user_id: "user-a".to_string(),
            name: "YouTube".to_string(),
            url: "https://youtube.com".to_string(),
            pinned: true,
            order: 5,
            updated_at: 0,
        });
        assert_eq!(link.order, Some(5));
        assert!(link.pinned);
    }

    #[test]
    fn link_upsert_defaults_missing_order_to_zero() {
        let link = Link {
            id: "link-1".to_string(),
            name: "Claude".to_string(),
            url: "https://claude.ai".to_string(),
            pinned: false,
            order: None,
        };
        let upsert = link_to_upsert(&link);
        assert_eq!(upsert.order, 0);
    }

    #[test]
    fn note_record_blank_folder_becomes_general() {
        let note = note_from_record(NoteRecord {
            id: "rec-2".to_string(),
            user_id: String::new(),
            title: "Title".to_string(),
            body: "Body".to_string(),
            folder: "  ".to_string(),
            updated_at: 42,
        });
        assert_eq!(note.folder, "General");
        assert_eq!(note.updated_at, 42);
    }

    #[test]
    fn event_mapping_preserves_reminder() {
        let record = EventRecord {
            id: "rec-3".to_string(),
            user_id: String::new(),
            title: "Standup".to_string(),
            date: "2025-06-02".to_string(),
            time: "09:30".to_string(),
            reminder_at: Some("2025-06-02T07:30:00+00:00".to_string()),
            notes: None,
            created_at: 1,
        };
        let event = event_from_record(record);
        assert_eq!(
            event.reminder_at.as_deref(),
            Some("2025-06-02T07:30:00+00:00")
        );
        let upsert = event_to_upsert(&event);
        assert_eq!(
            upsert.reminder_at.as_deref(),
            Some("2025-06-02T07:30:00+00:00")
        );
    }

    #[test]
    fn record_payloads_tolerate_missing_fields() {
        let record: LinkRecord = serde_json::from_str(
            r#"{"id":"rec-9","name":"Maps","url":"https://maps.google.com"}"#,
        )
        .unwrap();
        assert!(!record.pinned);
        assert_eq!(record.order, 0);
    }
}
