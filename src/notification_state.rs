//! Persisted notification state.
//!
//! The state is owned by the notification and snooze logic; here it is only
//! an opaque string-keyed JSON object that must survive a round trip.
use log::error;
use serde_json::{Map, Value};

use crate::{NotesError, Result};

/// Opaque string-keyed notification state
pub type NotificationState = Map<String, Value>;

const EMPTY_STATE: &str = "{}";

/// Parses stored notification state, reporting failures.
///
/// Empty text is an empty state. Valid JSON that is not an object is an
/// `InvalidFormat` error.
pub fn try_parse_notification_state(text: &str) -> Result<NotificationState> {
    let text = if text.is_empty() { EMPTY_STATE } else { text };
    match serde_json::from_str::<Value>(text)? {
        Value::Object(state) => Ok(state),
        other => Err(NotesError::InvalidFormat {
            message: format!("notification state must be an object, found {}", other),
        }),
    }
}

/// Parses stored notification state. Any failure silently yields an empty
/// state.
pub fn parse_notification_state(text: &str) -> NotificationState {
    try_parse_notification_state(text).unwrap_or_default()
}

/// Serializes notification state into its stored text form
pub fn stringify_notification_state(state: &NotificationState) -> String {
    serde_json::to_string(state).unwrap_or_else(|e| {
        error!("Failed to serialize notification state: {}", e);
        EMPTY_STATE.to_string()
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_round_trip() {
        let mut state = NotificationState::new();
        state.insert("note-1-2".to_string(), json!({"lastNotified": 1700000000000_i64}));
        state.insert("muted".to_string(), json!(true));
        state.insert("order".to_string(), json!([3, 1, 2]));

        let text = stringify_notification_state(&state);
        assert_eq!(parse_notification_state(&text), state);
    }

    #[test]
    fn test_empty_and_malformed() {
        assert!(parse_notification_state("").is_empty());
        assert!(parse_notification_state("not json").is_empty());
        assert!(parse_notification_state("[1, 2]").is_empty());
        assert!(matches!(
            try_parse_notification_state("[1, 2]"),
            Err(NotesError::InvalidFormat { .. })
        ));
        assert_eq!(stringify_notification_state(&NotificationState::new()), "{}");
    }
}
