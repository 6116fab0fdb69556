//! Conversion between the persisted notes text and note lists, plus pure
//! list transformations.
//!
//! None of the list helpers mutate their input: each one clones the slice it
//! is given and returns the new list. An id that matches no note is a no-op.
use log::{debug, error, warn};
use serde_json::Value;

use crate::{normalize_list, Note, RawNote, Result};

/// Stored text representing an empty notes list
const EMPTY_NOTES: &str = "[]";

/// Parses stored notes text, reporting failures.
///
/// Empty text is an empty list. Only text that is not a JSON array fails;
/// entries that are not objects are skipped and wrong-typed fields inside a
/// record are dropped, keeping the rest of the list.
pub fn try_parse_notes(text: &str) -> Result<Vec<RawNote>> {
    let text = if text.is_empty() { EMPTY_NOTES } else { text };
    let values: Vec<Value> = serde_json::from_str(text)?;

    let notes: Vec<RawNote> = values
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| match value {
            Value::Object(object) => Some(RawNote::from(object)),
            other => {
                warn!("Skipping stored note {} that is not an object: {}", idx, other);
                None
            }
        })
        .collect();
    debug!("Parsed {} stored notes", notes.len());
    Ok(notes)
}

/// Parses stored notes text into raw, unnormalized records.
///
/// Never fails: malformed text is logged and treated as no notes.
pub fn parse_notes(text: &str) -> Vec<RawNote> {
    try_parse_notes(text).unwrap_or_else(|e| {
        warn!("Failed to parse notes JSON, resetting: {}", e);
        Vec::new()
    })
}

/// Parses and normalizes stored notes text in one step
pub fn load_notes(text: &str) -> Vec<Note> {
    normalize_list(parse_notes(text))
}

/// Serializes a notes list, reporting failures
pub fn try_stringify_notes(notes: &[Note]) -> Result<String> {
    Ok(serde_json::to_string(notes)?)
}

/// Serializes a notes list into its stored text form.
///
/// `parse_notes` followed by `normalize_list` gives back an equal list.
pub fn stringify_notes(notes: &[Note]) -> String {
    try_stringify_notes(notes).unwrap_or_else(|e| {
        error!("Failed to serialize notes: {}", e);
        EMPTY_NOTES.to_string()
    })
}

/// Linear lookup by id
pub fn find_note<'a>(notes: &'a [Note], id: &str) -> Option<&'a Note> {
    notes.iter().find(|n| n.id == id)
}

/// Replaces the note with the same id in place, or inserts `note` at the
/// front when no note has its id. The replacement is whole-record, never a
/// field merge.
pub fn upsert(notes: &[Note], note: Note) -> Vec<Note> {
    let mut list = notes.to_vec();
    match list.iter().position(|n| n.id == note.id) {
        Some(idx) => list[idx] = note,
        None => list.insert(0, note),
    }
    list
}

/// Returns every note whose id differs from `id`, order preserved
pub fn remove(notes: &[Note], id: &str) -> Vec<Note> {
    notes.iter().filter(|n| n.id != id).cloned().collect()
}

/// Applies `update` to a copy of the note with the given id
fn update_note<F>(notes: &[Note], id: &str, update: F) -> Vec<Note>
where
    F: FnOnce(&mut Note),
{
    let mut list = notes.to_vec();
    if let Some(note) = list.iter_mut().find(|n| n.id == id) {
        update(note);
    } else {
        debug!("No note with id {}, list left unchanged", id);
    }
    list
}

/// Records that a note was viewed at `time`. `updated_at` is not touched.
pub fn update_last_viewed(notes: &[Note], id: &str, time: i64) -> Vec<Note> {
    update_note(notes, id, |note| note.last_viewed_at = time)
}

/// Flips the pinned flag of a note and stamps `updated_at` with now
pub fn toggle_pinned(notes: &[Note], id: &str) -> Vec<Note> {
    update_note(notes, id, |note| {
        note.pinned = !note.pinned;
        note.touch();
    })
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use serde_json::json;

    use super::*;
    use crate::{create_note, normalize_note, NotesError};

    fn note_with(id: &str, title: &str) -> Note {
        normalize_note(Some(RawNote {
            id: Some(id.to_string()),
            title: Some(title.to_string()),
            ..Default::default()
        }))
    }

    fn ids(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_round_trip() {
        let mut first = create_note(Some("HIGH"));
        first.tags = vec!["a".to_string(), "b".to_string()];
        first.position.x = 10.5;
        first.due_at = 1_700_000_000_000;
        first.extra.insert("theme".to_string(), json!("dark"));
        let list = vec![first, create_note(None), note_with("c", "")];

        let text = stringify_notes(&list);
        assert_eq!(load_notes(&text), list);

        let raws: Vec<RawNote> = list.iter().cloned().map(RawNote::from).collect();
        assert_eq!(parse_notes(&text), raws);
    }

    #[test]
    fn test_parse_empty_and_malformed() {
        assert!(parse_notes("").is_empty());
        assert!(parse_notes("[]").is_empty());
        assert!(parse_notes("not json").is_empty());
        assert!(parse_notes("{\"id\": \"a\"}").is_empty());
        assert!(matches!(
            try_parse_notes("not json"),
            Err(NotesError::Serialization(_))
        ));

        let absent: Option<String> = None;
        assert!(parse_notes(absent.as_deref().unwrap_or_default()).is_empty());
    }

    #[test]
    fn test_parse_keeps_partial_records_raw() {
        let notes = parse_notes(r#"[{"id":"a","title":"x"},{}]"#);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id.as_deref(), Some("a"));
        assert_eq!(notes[0].tags, None);
        assert_eq!(notes[1], RawNote::default());
    }

    #[test]
    fn test_parse_keeps_records_with_wrong_typed_fields() {
        let text = r#"[{"id":"a","title":"keep me"},{"id":"b","pinned":"yes"},{"id":"c","tags":[1,2]}]"#;

        let raws = parse_notes(text);
        assert_eq!(raws.len(), 3);
        assert_eq!(raws[1].pinned, None);
        assert_eq!(raws[2].tags, None);

        let notes = load_notes(text);
        assert_eq!(ids(&notes), vec!["a", "b", "c"]);
        assert_eq!(notes[0].title, "keep me");
        assert!(!notes[1].pinned);
        assert!(notes[2].tags.is_empty());
    }

    #[test]
    fn test_parse_skips_non_object_entries() {
        let notes = load_notes(r#"[1, "text", {"id":"a"}, null]"#);
        assert_eq!(ids(&notes), vec!["a"]);
    }

    #[test]
    fn test_stringify_empty() {
        assert_eq!(stringify_notes(&[]), "[]");
    }

    #[test]
    fn test_upsert_inserts_at_front() {
        let n = note_with("a", "first");
        assert_eq!(upsert(&[], n.clone()), vec![n]);

        let list = vec![note_with("b", ""), note_with("c", "")];
        let result = upsert(&list, note_with("a", ""));
        assert_eq!(ids(&result), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_upsert_replaces_whole_record() {
        let mut old = note_with("a", "old");
        old.tags = vec!["kept?".to_string()];
        old.pinned = true;
        let list = vec![note_with("x", ""), old, note_with("y", "")];

        let replacement = note_with("a", "new");
        let result = upsert(&list, replacement.clone());

        assert_eq!(ids(&result), vec!["x", "a", "y"]);
        assert_eq!(result[1], replacement);
        assert_eq!(list[1].title, "old");
    }

    #[test]
    fn test_remove() {
        let list = vec![note_with("a", ""), note_with("b", "")];

        assert_eq!(ids(&remove(&list, "b")), vec!["a"]);
        assert_eq!(remove(&list, "z"), list);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_update_last_viewed() {
        let mut note = note_with("a", "");
        note.updated_at = 5;
        note.last_viewed_at = 5;
        let list = vec![note, note_with("b", "")];
        let before = list.clone();

        let result = update_last_viewed(&list, "a", 42);
        assert_eq!(result[0].last_viewed_at, 42);
        assert_eq!(result[0].updated_at, 5);
        assert_eq!(result[1], list[1]);
        assert_eq!(list, before);

        assert_eq!(update_last_viewed(&list, "z", 42), list);
    }

    #[test]
    fn test_toggle_pinned_twice() {
        let mut note = note_with("a", "");
        note.updated_at = 0;
        let list = vec![note];

        let once = toggle_pinned(&list, "a");
        assert!(once[0].pinned);
        assert!(once[0].updated_at > 0);

        thread::sleep(Duration::from_millis(5));
        let twice = toggle_pinned(&once, "a");
        assert!(!twice[0].pinned);
        assert!(twice[0].updated_at > once[0].updated_at);

        assert!(!list[0].pinned);
        assert_eq!(list[0].updated_at, 0);
    }

    #[test]
    fn test_toggle_pinned_unknown_id() {
        let list = vec![note_with("a", "")];
        assert_eq!(toggle_pinned(&list, "z"), list);
    }

    #[test]
    fn test_find_note() {
        let list = vec![note_with("a", "first"), note_with("b", "second")];
        assert_eq!(find_note(&list, "b").map(|n| n.title.as_str()), Some("second"));
        assert!(find_note(&list, "z").is_none());
    }
}
