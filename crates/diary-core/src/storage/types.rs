//! Core data types for the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File extension used for entry files.
pub const ENTRY_EXTENSION: &str = "diary";

/// Build the entry filename for a timestamp id.
pub fn entry_filename(id: i64) -> String {
    format!("{}.{}", id, ENTRY_EXTENSION)
}

/// Metadata describing one stored entry, without its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDescriptor {
    /// Millisecond timestamp assigned at creation
    pub id: i64,

    /// User-facing title
    pub title: String,

    /// When this entry was created
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,

    /// When this entry was last edited
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::option"
    )]
    pub modified: Option<DateTime<Utc>>,

    /// Name of the entry file under `entries/`
    pub filename: String,
}

impl EntryDescriptor {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        date: DateTime<Utc>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            date,
            modified: None,
            filename: filename.into(),
        }
    }
}

/// The whole metadata index: `{ "entries": [...] }` in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDocument {
    pub entries: Vec<EntryDescriptor>,
}

impl MetadataDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, filename: &str) -> Option<&EntryDescriptor> {
        self.entries.iter().find(|e| e.filename == filename)
    }

    pub fn find_mut(&mut self, filename: &str) -> Option<&mut EntryDescriptor> {
        self.entries.iter_mut().find(|e| e.filename == filename)
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.find(filename).is_some()
    }

    /// Append a descriptor, keeping creation order.
    pub fn push(&mut self, descriptor: EntryDescriptor) {
        self.entries.push(descriptor);
    }

    /// Drop every descriptor for `filename`, returning how many were removed.
    pub fn remove(&mut self, filename: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.filename != filename);
        before - self.entries.len()
    }

    /// Largest id in the index, if any.
    pub fn max_id(&self) -> Option<i64> {
        self.entries.iter().map(|e| e.id).max()
    }

    /// Descriptors ordered newest first by creation date.
    ///
    /// Equal dates keep their creation order.
    pub fn sorted_descending(&self) -> Vec<EntryDescriptor> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }
}

/// ISO 8601 timestamps with millisecond precision and a `Z` suffix.
mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(D::Error::custom)
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => serializer.serialize_some(&format(dt)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            raw.map(|value| parse(&value).map_err(D::Error::custom))
                .transpose()
        }
    }
}
