//! Note model

use serde::{Deserialize, Serialize};

use crate::util::{local_id, unix_timestamp_millis};

/// Canonical folder taxonomy offered by the UI. Folder values are free
/// text; unknown folders round-trip unchanged.
pub const NOTE_FOLDERS: [&str; 4] = ["General", "Ideas", "Clients", "Personal"];

/// A note in the workspace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Record identifier (local-synthetic until remotely persisted)
    pub id: String,
    /// Note title; `Untitled` when created without one
    pub title: String,
    /// Free-form body text
    pub body: String,
    /// Folder name
    pub folder: String,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
}

impl Note {
    /// Create a new note. A blank title becomes `Untitled`; a blank folder
    /// lands in `General`.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        folder: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let title = title.trim();
        let folder = folder.into();
        let folder = folder.trim();

        Self {
            id: local_id("note-"),
            title: if title.is_empty() {
                "Untitled".to_string()
            } else {
                title.to_string()
            },
            body: body.into(),
            folder: if folder.is_empty() {
                NOTE_FOLDERS[0].to_string()
            } else {
                folder.to_string()
            },
            updated_at: unix_timestamp_millis(),
        }
    }

    /// Stamp the note as updated now.
    pub fn touch(&mut self) {
        self.updated_at = unix_timestamp_millis();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_new() {
        let note = Note::new("Meeting notes", "Discuss roadmap", "Clients");
        assert!(note.id.starts_with("note-"));
        assert_eq!(note.title, "Meeting notes");
        assert_eq!(note.folder, "Clients");
        assert!(note.updated_at > 0);
    }

    #[test]
    fn test_blank_title_becomes_untitled() {
        let note = Note::new("   ", "body text", "Ideas");
        assert_eq!(note.title, "Untitled");
    }

    #[test]
    fn test_blank_folder_defaults_to_general() {
        let note = Note::new("Title", "", "  ");
        assert_eq!(note.folder, "General");
    }

    #[test]
    fn test_unknown_folder_round_trips() {
        let note = Note::new("Title", "", "Side Projects");
        let raw = serde_json::to_string(&note).unwrap();
        let parsed: Note = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.folder, "Side Projects");
    }

    #[test]
    fn test_touch_advances_timestamp() {
        let mut note = Note::new("Title", "", "General");
        let before = note.updated_at;
        note.updated_at = before - 10;
        note.touch();
        assert!(note.updated_at >= before);
    }
}
