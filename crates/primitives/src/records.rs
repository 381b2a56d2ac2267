//! Record snapshots and changesets.

use std::collections::{btree_map, BTreeMap};

use serde::{Deserialize, Serialize};

use crate::field::RecordField;

/// A single published record value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordValue {
    /// Published value, empty when the record is unset.
    pub value: String,

    /// Seconds until an L2-originated write is reflected through the
    /// root-chain-anchored read path. Informational only, never consulted by
    /// the diff engine.
    #[serde(rename = "countdown", default)]
    pub sync_delay_secs: u64,
}

impl RecordValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            sync_delay_secs: 0,
        }
    }

    pub fn with_delay(value: impl Into<String>, sync_delay_secs: u64) -> Self {
        Self {
            value: value.into(),
            sync_delay_secs,
        }
    }
}

/// Last-known-published state of a name's records.
///
/// Fetched from the record service keyed by `(node, address)` and replaced
/// wholesale after every successful publish. Fields without an entry read as
/// empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordSnapshot {
    entries: BTreeMap<RecordField, RecordValue>,
}

impl RecordSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: RecordField, value: RecordValue) {
        self.entries.insert(field, value);
    }

    pub fn get(&self, field: RecordField) -> Option<&RecordValue> {
        self.entries.get(&field)
    }

    /// Published value for `field`, empty string when unset.
    pub fn value(&self, field: RecordField) -> &str {
        self.entries
            .get(&field)
            .map(|entry| entry.value.as_str())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordField, &RecordValue)> {
        self.entries.iter().map(|(field, value)| (*field, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(RecordField, RecordValue)> for RecordSnapshot {
    fn from_iter<T: IntoIterator<Item = (RecordField, RecordValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// The minimal set of record edits to publish.
///
/// A field is present iff its resolved draft value differs from the
/// baseline, with the redirect-coupling exception applied by the diff
/// engine. Empty string values mean "clear this record".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Changeset {
    entries: BTreeMap<RecordField, String>,
}

impl Changeset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        self.entries.insert(field, value.into());
    }

    pub fn remove(&mut self, field: RecordField) -> Option<String> {
        self.entries.remove(&field)
    }

    pub fn get(&self, field: RecordField) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: RecordField) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RecordField, &str)> {
        self.entries
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Changeset {
    type Item = (RecordField, String);
    type IntoIter = btree_map::IntoIter<RecordField, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(RecordField, String)> for Changeset {
    fn from_iter<T: IntoIterator<Item = (RecordField, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reads_missing_fields_as_empty() {
        let snapshot: RecordSnapshot =
            [(RecordField::Twitter, RecordValue::new("alice"))].into_iter().collect();

        assert_eq!(snapshot.value(RecordField::Twitter), "alice");
        assert_eq!(snapshot.value(RecordField::Github), "");
        assert!(snapshot.get(RecordField::Github).is_none());
    }

    #[test]
    fn snapshot_keeps_sync_delay() {
        let snapshot: RecordSnapshot =
            [(RecordField::Url, RecordValue::with_delay("https://a.com", 3600))]
                .into_iter()
                .collect();

        assert_eq!(snapshot.get(RecordField::Url).unwrap().sync_delay_secs, 3600);
    }

    #[test]
    fn changeset_set_overwrites() {
        let mut changeset = Changeset::new();
        changeset.set(RecordField::Email, "a@b.c");
        changeset.set(RecordField::Email, "d@e.f");

        assert_eq!(changeset.len(), 1);
        assert_eq!(changeset.get(RecordField::Email), Some("d@e.f"));
    }

    #[test]
    fn record_value_countdown_wire_name() {
        let parsed: RecordValue =
            serde_json::from_str(r#"{"value":"alice","countdown":120}"#).unwrap();
        assert_eq!(parsed.value, "alice");
        assert_eq!(parsed.sync_delay_secs, 120);
    }
}
