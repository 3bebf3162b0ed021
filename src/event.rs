//! Per-call parameters and correlation ids.

use crate::formatter::FieldOptions;
use std::path::PathBuf;
use uuid::Uuid;

/// Optional overrides for one logging call.
///
/// Every field defaults to "use the facade's configuration":
/// - `event_id`: absent or empty means a fresh UUIDv4 is generated
/// - `file`: absent or empty means the configured default file
/// - `compact`: absent means the configured compact flag
/// - `fields`: absent means the configured field set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    pub event_id: Option<String>,
    pub file: Option<PathBuf>,
    pub compact: Option<bool>,
    pub fields: Option<FieldOptions>,
}

impl LogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Links this call to earlier events that returned `id`.
    pub fn event_id(mut self, id: impl Into<String>) -> Self {
        self.event_id = Some(id.into());
        self
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = Some(compact);
        self
    }

    pub fn fields(mut self, fields: FieldOptions) -> Self {
        self.fields = Some(fields);
        self
    }
}

/// Returns the caller's id unchanged, or a fresh one when it is absent or empty.
pub fn resolve_event_id(requested: Option<&str>) -> String {
    match requested {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}
