//! Instance-state snapshots for widgets.
//!
//! Hosts that destroy and recreate widgets (window recreation, process
//! restart, document reload) can capture a widget's transient state into
//! an [`InstanceState`] snapshot and feed it back to a freshly built
//! widget of the same type. Snapshots are tagged with the widget type so
//! a stale or misrouted snapshot is rejected with a typed error instead
//! of silently corrupting the new widget.
//!
//! ```ignore
//! let snapshot = checkbox.save_instance_state()?;
//!
//! // ... widget destroyed and rebuilt ...
//!
//! rebuilt.restore_instance_state(&snapshot)?;
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A serialized snapshot of a widget's transient state.
///
/// The snapshot is an opaque JSON document tagged with the widget type
/// that produced it. Widgets that compose another widget embed the inner
/// widget's fields in their own snapshot payload, so a single
/// `InstanceState` always captures the full chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceState {
    /// The widget type tag, checked on restore.
    widget: String,
    /// The widget-defined payload.
    state: serde_json::Value,
}

impl InstanceState {
    /// Capture a snapshot from a serializable payload.
    pub fn encode<T: Serialize>(
        widget_type: &str,
        payload: &T,
    ) -> Result<Self, InstanceStateError> {
        let state = serde_json::to_value(payload)
            .map_err(|e| InstanceStateError::serialization(widget_type, e))?;
        Ok(Self {
            widget: widget_type.to_string(),
            state,
        })
    }

    /// Decode the snapshot payload, verifying the widget type tag.
    ///
    /// Returns [`InstanceStateErrorKind::TypeMismatch`] when the snapshot
    /// was produced by a different widget type, and
    /// [`InstanceStateErrorKind::InvalidValue`] when the payload does not
    /// deserialize into `T`.
    pub fn decode<T: DeserializeOwned>(&self, widget_type: &str) -> Result<T, InstanceStateError> {
        if self.widget != widget_type {
            return Err(InstanceStateError::type_mismatch(widget_type, &self.widget));
        }
        serde_json::from_value(self.state.clone())
            .map_err(|e| InstanceStateError::invalid_value(widget_type, e))
    }

    /// The widget type tag this snapshot carries.
    pub fn widget_type(&self) -> &str {
        &self.widget
    }

    /// Persist the snapshot to a file as JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), InstanceStateError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| InstanceStateError::serialization(&self.widget, e))?;
        fs::write(path, json).map_err(|e| InstanceStateError::io(path, e))
    }

    /// Load a snapshot previously written by [`save_to_file`](Self::save_to_file).
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, InstanceStateError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| InstanceStateError::io(path, e))?;
        serde_json::from_str(&json)
            .map_err(|e| InstanceStateError::invalid_value(&path.display().to_string(), e))
    }
}

/// Error type for instance-state capture and restore.
#[derive(Debug)]
pub struct InstanceStateError {
    kind: InstanceStateErrorKind,
    context: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// The kind of instance-state error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceStateErrorKind {
    /// The snapshot was produced by a different widget type.
    TypeMismatch,
    /// The snapshot payload did not hold a valid state for the widget.
    InvalidValue,
    /// The widget state failed to serialize.
    Serialization,
    /// Reading or writing a snapshot file failed.
    Io,
}

impl InstanceStateError {
    fn type_mismatch(expected: &str, found: &str) -> Self {
        Self {
            kind: InstanceStateErrorKind::TypeMismatch,
            context: format!("expected `{expected}`, snapshot is `{found}`"),
            source: None,
        }
    }

    fn invalid_value(context: &str, source: serde_json::Error) -> Self {
        Self {
            kind: InstanceStateErrorKind::InvalidValue,
            context: context.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Build an invalid-value error with a widget-supplied message, for
    /// payloads that deserialize but carry an out-of-range value.
    pub fn invalid_value_message(widget_type: &str, message: impl Into<String>) -> Self {
        Self {
            kind: InstanceStateErrorKind::InvalidValue,
            context: format!("{widget_type}: {}", message.into()),
            source: None,
        }
    }

    fn serialization(context: &str, source: serde_json::Error) -> Self {
        Self {
            kind: InstanceStateErrorKind::Serialization,
            context: context.to_string(),
            source: Some(Box::new(source)),
        }
    }

    fn io(path: &Path, source: io::Error) -> Self {
        Self {
            kind: InstanceStateErrorKind::Io,
            context: path.display().to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the kind of error.
    pub fn kind(&self) -> InstanceStateErrorKind {
        self.kind
    }
}

impl fmt::Display for InstanceStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            InstanceStateErrorKind::TypeMismatch => {
                write!(f, "instance state type mismatch: {}", self.context)
            }
            InstanceStateErrorKind::InvalidValue => {
                write!(f, "invalid instance state for {}", self.context)
            }
            InstanceStateErrorKind::Serialization => {
                write!(f, "failed to serialize instance state for {}", self.context)
            }
            InstanceStateErrorKind::Io => {
                write!(f, "instance state I/O error: {}", self.context)
            }
        }
    }
}

impl std::error::Error for InstanceStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        value: i32,
        label: String,
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let payload = Payload {
            value: -2,
            label: "all".to_string(),
        };
        let snapshot = InstanceState::encode("test_widget", &payload).unwrap();
        assert_eq!(snapshot.widget_type(), "test_widget");

        let decoded: Payload = snapshot.decode("test_widget").unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_type_mismatch() {
        let payload = Payload {
            value: 0,
            label: String::new(),
        };
        let snapshot = InstanceState::encode("widget_a", &payload).unwrap();
        let err = snapshot.decode::<Payload>("widget_b").unwrap_err();
        assert_eq!(err.kind(), InstanceStateErrorKind::TypeMismatch);
    }

    #[test]
    fn test_invalid_payload() {
        #[derive(Serialize)]
        struct Other {
            unrelated: bool,
        }
        let snapshot = InstanceState::encode("w", &Other { unrelated: true }).unwrap();
        let err = snapshot.decode::<Payload>("w").unwrap_err();
        assert_eq!(err.kind(), InstanceStateErrorKind::InvalidValue);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        let payload = Payload {
            value: -1,
            label: "multiple".to_string(),
        };
        let snapshot = InstanceState::encode("test_widget", &payload).unwrap();
        snapshot.save_to_file(&path).unwrap();

        let loaded = InstanceState::load_from_file(&path).unwrap();
        assert_eq!(loaded, snapshot);
        let decoded: Payload = loaded.decode("test_widget").unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_load_missing_file() {
        let err = InstanceState::load_from_file("/nonexistent/snapshot.json").unwrap_err();
        assert_eq!(err.kind(), InstanceStateErrorKind::Io);
    }
}
