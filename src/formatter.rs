// formatter.rs
// Purpose: Compose the bracketed metadata prefix written ahead of every file line

use crate::severity::Severity;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of every compact priority tag, brackets included.
pub const COMPACT_TAG_WIDTH: usize = 7;

/// Local date-time with offset, e.g. `2024-03-01T09:15:02+01:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// A metadata field that can appear in a line prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Priority,
    CorrelationId,
    Timestamp,
}

/// The set of fields rendered into a prefix. Membership only; render order is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Field>", into = "Vec<Field>")]
pub struct FieldOptions {
    priority: bool,
    correlation_id: bool,
    timestamp: bool,
}

impl FieldOptions {
    pub const fn all() -> Self {
        Self {
            priority: true,
            correlation_id: true,
            timestamp: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            priority: false,
            correlation_id: false,
            timestamp: false,
        }
    }

    pub fn contains(&self, field: Field) -> bool {
        match field {
            Field::Priority => self.priority,
            Field::CorrelationId => self.correlation_id,
            Field::Timestamp => self.timestamp,
        }
    }

    pub fn insert(&mut self, field: Field) {
        *self.slot(field) = true;
    }

    pub fn remove(&mut self, field: Field) {
        *self.slot(field) = false;
    }

    pub fn with(mut self, field: Field) -> Self {
        self.insert(field);
        self
    }

    pub fn without(mut self, field: Field) -> Self {
        self.remove(field);
        self
    }

    pub fn is_empty(&self) -> bool {
        !(self.priority || self.correlation_id || self.timestamp)
    }

    fn slot(&mut self, field: Field) -> &mut bool {
        match field {
            Field::Priority => &mut self.priority,
            Field::CorrelationId => &mut self.correlation_id,
            Field::Timestamp => &mut self.timestamp,
        }
    }
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self::all()
    }
}

impl From<Vec<Field>> for FieldOptions {
    fn from(fields: Vec<Field>) -> Self {
        fields
            .into_iter()
            .fold(FieldOptions::none(), |set, field| set.with(field))
    }
}

impl From<FieldOptions> for Vec<Field> {
    fn from(options: FieldOptions) -> Self {
        [Field::Priority, Field::CorrelationId, Field::Timestamp]
            .into_iter()
            .filter(|field| options.contains(*field))
            .collect()
    }
}

/// Priority tag for `severity`.
///
/// Compact tags are right-padded to [`COMPACT_TAG_WIDTH`] so columns line up across levels.
pub fn priority_tag(severity: Severity, compact: bool) -> String {
    if compact {
        let tag = format!("[{}]", severity.compact_label());
        format!("{tag:<width$}", width = COMPACT_TAG_WIDTH)
    } else {
        format!("[{}]", severity.label())
    }
}

pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Builds the prefix block for one line.
///
/// Enabled fields are bracketed, emitted in the order priority, correlation id, timestamp,
/// joined by one space, and followed by one trailing space. No enabled fields means an
/// empty prefix. An empty correlation id counts as absent.
pub fn render_prefix<Tz>(
    severity: Severity,
    correlation_id: Option<&str>,
    at: &DateTime<Tz>,
    options: &FieldOptions,
    compact: bool,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut parts: Vec<String> = Vec::with_capacity(3);

    if options.contains(Field::Priority) {
        parts.push(priority_tag(severity, compact));
    }
    if options.contains(Field::CorrelationId) {
        if let Some(id) = correlation_id.filter(|id| !id.is_empty()) {
            parts.push(format!("[{id}]"));
        }
    }
    if options.contains(Field::Timestamp) {
        parts.push(format!("[{}]", format_timestamp(at)));
    }

    if parts.is_empty() {
        String::new()
    } else {
        let mut prefix = parts.join(" ");
        prefix.push(' ');
        prefix
    }
}

pub fn render_line(prefix: &str, message: &str) -> String {
    format!("{prefix}{message}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn fixed_time() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-03-01T09:15:02+01:00").unwrap()
    }

    #[test]
    fn compact_warning_is_padded() {
        assert_eq!(priority_tag(Severity::Warning, true), "[WARN] ");
        assert_eq!(priority_tag(Severity::Warning, false), "[WARNING]");
    }

    #[test]
    fn compact_tags_share_one_width() {
        for severity in Severity::ALL {
            assert_eq!(priority_tag(severity, true).len(), COMPACT_TAG_WIDTH);
        }
    }

    #[test]
    fn all_fields_render_in_fixed_order() {
        let prefix = render_prefix(
            Severity::Error,
            Some("E1"),
            &fixed_time(),
            &FieldOptions::all(),
            false,
        );
        assert_eq!(prefix, "[ERROR] [E1] [2024-03-01T09:15:02+01:00] ");
        assert_eq!(
            render_line(&prefix, "boom"),
            "[ERROR] [E1] [2024-03-01T09:15:02+01:00] boom"
        );
    }

    #[test]
    fn no_fields_means_no_prefix() {
        let prefix = render_prefix(
            Severity::Info,
            Some("abc"),
            &fixed_time(),
            &FieldOptions::none(),
            true,
        );
        assert_eq!(prefix, "");
        assert_eq!(render_line(&prefix, "raw"), "raw");
    }

    #[test]
    fn empty_correlation_id_is_omitted() {
        let options = FieldOptions::none()
            .with(Field::Priority)
            .with(Field::CorrelationId);
        let prefix = render_prefix(Severity::Info, Some(""), &fixed_time(), &options, false);
        assert_eq!(prefix, "[INFO] ");
        let prefix = render_prefix(Severity::Info, None, &fixed_time(), &options, false);
        assert_eq!(prefix, "[INFO] ");
    }

    #[test]
    fn timestamp_is_fixed_width() {
        let utc = Utc::now();
        let local = chrono::Local::now();
        assert_eq!(format_timestamp(&utc).len(), 25);
        assert_eq!(format_timestamp(&local).len(), 25);
    }

    #[test]
    fn field_options_serialize_as_list() {
        let options = FieldOptions::all().without(Field::Timestamp);
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"["priority","correlation_id"]"#);
        let back: FieldOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
