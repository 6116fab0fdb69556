//! Core data structures for the livingnotes crate.
//!
//! `Note` is the complete record the applet works with. `RawNote` is what
//! comes out of stored text before normalization: every known field is
//! optional and keys this crate does not know about are carried along.
use log::warn;
use rand::Rng;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::now_millis;

pub const PRIORITY_LOW: &str = "LOW";
pub const PRIORITY_MED: &str = "MED";
pub const PRIORITY_HIGH: &str = "HIGH";

/// Priority used when the caller does not supply one
pub const DEFAULT_PRIORITY: &str = PRIORITY_MED;
pub const DEFAULT_STATUS: &str = "ACTIVE";
pub const DEFAULT_TITLE: &str = "New note";
pub const DEFAULT_WIDTH: f64 = 240.0;
pub const DEFAULT_HEIGHT: f64 = 180.0;

/// Upper bound (exclusive) of the random part of a note identifier
const ID_RANDOM_RANGE: u32 = 1_000_000;

/// On-canvas location of a note
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// On-canvas dimensions of a note
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Default for Size {
    fn default() -> Self {
        Size {
            w: DEFAULT_WIDTH,
            h: DEFAULT_HEIGHT,
        }
    }
}

/// Represents a single note in the applet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier, never changed after creation
    pub id: String,
    pub title: String,
    pub body: String,
    /// Epoch milliseconds
    pub created_at: i64,
    /// Epoch milliseconds of the last content change
    pub updated_at: i64,
    /// Reminder time in epoch milliseconds, 0 when unset
    pub due_at: i64,
    /// Open priority tag, see the `PRIORITY_*` constants
    pub priority: String,
    pub status: String,
    pub last_viewed_at: i64,
    /// Notifications are suppressed until this time, 0 when unset
    pub snooze_until: i64,
    pub tags: Vec<String>,
    pub position: Position,
    pub size: Size,
    pub pinned: bool,
    /// Color override, empty for the theme default
    pub user_color: String,
    /// Keys written by other versions of the applet
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Note {
    /// Marks the note's content as changed now
    pub fn touch(&mut self) {
        self.updated_at = now_millis();
    }
}

/// A note as read from storage, before defaults are filled in.
///
/// An explicit `null` in the stored text is indistinguishable from a missing
/// key, and so is a known key holding a value of the wrong type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNote {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_viewed_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snooze_until: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for RawNote {
    fn from(mut object: Map<String, Value>) -> Self {
        RawNote {
            id: take_field(&mut object, "id"),
            title: take_field(&mut object, "title"),
            body: take_field(&mut object, "body"),
            created_at: take_field(&mut object, "createdAt"),
            updated_at: take_field(&mut object, "updatedAt"),
            due_at: take_field(&mut object, "dueAt"),
            priority: take_field(&mut object, "priority"),
            status: take_field(&mut object, "status"),
            last_viewed_at: take_field(&mut object, "lastViewedAt"),
            snooze_until: take_field(&mut object, "snoozeUntil"),
            tags: take_field(&mut object, "tags"),
            position: take_field(&mut object, "position"),
            size: take_field(&mut object, "size"),
            pinned: take_field(&mut object, "pinned"),
            user_color: take_field(&mut object, "userColor"),
            extra: object,
        }
    }
}

impl<'de> Deserialize<'de> for RawNote {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Map::<String, Value>::deserialize(deserializer).map(RawNote::from)
    }
}

/// Removes `key` from `object` and converts it, dropping values of the wrong
/// type so the rest of the record survives
fn take_field<T: DeserializeOwned>(object: &mut Map<String, Value>, key: &str) -> Option<T> {
    match object.remove(key)? {
        Value::Null => None,
        value => match serde_json::from_value(value) {
            Ok(field) => Some(field),
            Err(e) => {
                warn!("Ignoring note field {} with unexpected type: {}", key, e);
                None
            }
        },
    }
}

impl From<Note> for RawNote {
    fn from(note: Note) -> Self {
        RawNote {
            id: Some(note.id),
            title: Some(note.title),
            body: Some(note.body),
            created_at: Some(note.created_at),
            updated_at: Some(note.updated_at),
            due_at: Some(note.due_at),
            priority: Some(note.priority),
            status: Some(note.status),
            last_viewed_at: Some(note.last_viewed_at),
            snooze_until: Some(note.snooze_until),
            tags: Some(note.tags),
            position: Some(note.position),
            size: Some(note.size),
            pinned: Some(note.pinned),
            user_color: Some(note.user_color),
            extra: note.extra,
        }
    }
}

impl From<RawNote> for Note {
    fn from(raw: RawNote) -> Self {
        normalize_note(Some(raw))
    }
}

/// Builds an identifier of the form `note-<millis>-<random>`.
///
/// Two notes created in the same millisecond collide with probability
/// 1 in 1,000,000.
fn generate_note_id(now: i64) -> String {
    let suffix = rand::rng().random_range(0..ID_RANDOM_RANGE);
    format!("note-{}-{}", now, suffix)
}

/// Creates a new note stamped with the current time.
///
/// `default_priority` is used when present and non-empty, otherwise the note
/// gets [`DEFAULT_PRIORITY`].
pub fn create_note(default_priority: Option<&str>) -> Note {
    let now = now_millis();
    let priority = default_priority
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PRIORITY);

    Note {
        id: generate_note_id(now),
        title: DEFAULT_TITLE.to_string(),
        body: String::new(),
        created_at: now,
        updated_at: now,
        due_at: 0,
        priority: priority.to_string(),
        status: DEFAULT_STATUS.to_string(),
        last_viewed_at: now,
        snooze_until: 0,
        tags: Vec::new(),
        position: Position::default(),
        size: Size::default(),
        pinned: false,
        user_color: String::new(),
        extra: Map::new(),
    }
}

/// Fills in every missing field of `raw` from a freshly created note.
///
/// Any field present in `raw` wins, including empty strings, `false`, `0`
/// and empty tag lists. `None` yields a fresh default note.
pub fn normalize_note(raw: Option<RawNote>) -> Note {
    let base = create_note(Some(DEFAULT_PRIORITY));
    let Some(raw) = raw else {
        return base;
    };

    let RawNote {
        id,
        title,
        body,
        created_at,
        updated_at,
        due_at,
        priority,
        status,
        last_viewed_at,
        snooze_until,
        tags,
        position,
        size,
        pinned,
        user_color,
        extra,
    } = raw;

    Note {
        id: id.unwrap_or(base.id),
        title: title.unwrap_or(base.title),
        body: body.unwrap_or(base.body),
        created_at: created_at.unwrap_or(base.created_at),
        updated_at: updated_at.unwrap_or(base.updated_at),
        due_at: due_at.unwrap_or(0),
        priority: priority.unwrap_or(base.priority),
        status: status.unwrap_or(base.status),
        last_viewed_at: last_viewed_at.unwrap_or(base.last_viewed_at),
        snooze_until: snooze_until.unwrap_or(0),
        tags: tags.unwrap_or_default(),
        position: position.unwrap_or_default(),
        size: size.unwrap_or_default(),
        pinned: pinned.unwrap_or(base.pinned),
        user_color: user_color.unwrap_or(base.user_color),
        extra,
    }
}

/// Normalizes every raw note, preserving order
pub fn normalize_list(notes: Vec<RawNote>) -> Vec<Note> {
    notes.into_iter().map(|raw| normalize_note(Some(raw))).collect()
}
