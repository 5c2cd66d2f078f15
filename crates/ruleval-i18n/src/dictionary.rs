//! Nested locale dictionaries.
//!
//! A dictionary maps a locale code to a tree of [`Entry`] values. Leaves are
//! message templates such as `"The :attribute field is required."`, inner
//! nodes group further keys (`between.numeric`, `attributes.email`, ...).

use crate::error::{I18nError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const ENGLISH: &str = include_str!("../lang/en.json");

/// A node of a locale dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    /// A message template or display label.
    Text(String),
    /// A nested group of entries.
    Group(BTreeMap<String, Entry>),
}

impl Entry {
    /// Create a leaf entry.
    pub fn text(value: impl Into<String>) -> Self {
        Entry::Text(value.into())
    }

    /// Create an empty group.
    pub fn group() -> Self {
        Entry::Group(BTreeMap::new())
    }

    /// Get the leaf text, if this entry is a leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Entry::Text(text) => Some(text),
            Entry::Group(_) => None,
        }
    }

    /// Get the children, if this entry is a group.
    pub fn as_group(&self) -> Option<&BTreeMap<String, Entry>> {
        match self {
            Entry::Group(children) => Some(children),
            Entry::Text(_) => None,
        }
    }

    /// Whether this entry counts as a translation. Empty leaves do not.
    pub fn is_filled(&self) -> bool {
        match self {
            Entry::Text(text) => !text.is_empty(),
            Entry::Group(_) => true,
        }
    }

    /// Get a direct child. Empty leaves are treated as missing.
    pub fn child(&self, segment: &str) -> Option<&Entry> {
        self.as_group()?
            .get(segment)
            .filter(|entry| entry.is_filled())
    }

    /// Descend a dotted key path (`"between.numeric"`).
    ///
    /// Returns `None` as soon as one segment is missing.
    pub fn path(&self, key: &str) -> Option<&Entry> {
        key.split('.')
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Set the entry at a dotted key path, creating groups on the way.
    ///
    /// A leaf found in the middle of the path is replaced by a group.
    pub fn insert(&mut self, key: &str, entry: Entry) {
        let mut node = self;
        for segment in key.split('.') {
            if !matches!(node, Entry::Group(_)) {
                *node = Entry::group();
            }
            let Entry::Group(children) = node else {
                unreachable!("node was just made a group")
            };
            node = children
                .entry(segment.to_string())
                .or_insert_with(Entry::group);
        }
        *node = entry;
    }

    /// Deep-merge `other` into this entry. Groups merge key by key, anything
    /// else is overwritten by `other`.
    pub fn merge(&mut self, other: Entry) {
        match (self, other) {
            (Entry::Group(mine), Entry::Group(theirs)) => {
                for (key, value) in theirs {
                    match mine.get_mut(&key) {
                        Some(existing) => existing.merge(value),
                        None => {
                            mine.insert(key, value);
                        }
                    }
                }
            }
            (slot, other) => *slot = other,
        }
    }
}

/// Locale code to dictionary tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    locales: BTreeMap<String, Entry>,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled English messages under the `en` locale.
    pub fn english() -> Self {
        let root: Entry = serde_json::from_str(ENGLISH).expect("bundled en.json is valid");
        let mut dictionary = Self::new();
        dictionary.locales.insert("en".to_string(), root);
        dictionary
    }

    /// Parse a dictionary keyed by locale code:
    ///
    /// ```json
    /// { "en": { "required": "..." }, "de": { "required": "..." } }
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let dictionary: Dictionary = serde_json::from_str(json)?;
        for (locale, root) in &dictionary.locales {
            if root.as_group().is_none() {
                return Err(I18nError::InvalidDictionary(format!(
                    "locale `{}` must map to an object",
                    locale
                )));
            }
        }
        Ok(dictionary)
    }

    /// Read a dictionary keyed by locale code from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = read(path.as_ref())?;
        Self::from_json_str(&json)
    }

    /// Read a single locale's tree from a JSON file and merge it into
    /// `locale`.
    pub fn load_locale_file(&mut self, locale: &str, path: impl AsRef<Path>) -> Result<()> {
        let json = read(path.as_ref())?;
        let root: Entry = serde_json::from_str(&json)?;
        self.merge_locale(locale, root)
    }

    /// Replace the tree of `locale`.
    pub fn insert_locale(&mut self, locale: impl Into<String>, root: Entry) -> Result<()> {
        let locale = locale.into();
        ensure_group(&locale, &root)?;
        self.locales.insert(locale, root);
        Ok(())
    }

    /// Deep-merge `root` into the tree of `locale`, creating it if needed.
    pub fn merge_locale(&mut self, locale: impl Into<String>, root: Entry) -> Result<()> {
        let locale = locale.into();
        ensure_group(&locale, &root)?;
        self.locales
            .entry(locale)
            .or_insert_with(Entry::group)
            .merge(root);
        Ok(())
    }

    /// Set a single dotted key of `locale`.
    pub fn set(&mut self, locale: &str, key: &str, text: impl Into<String>) {
        self.locales
            .entry(locale.to_string())
            .or_insert_with(Entry::group)
            .insert(key, Entry::text(text));
    }

    /// Get the tree of a locale.
    pub fn locale(&self, locale: &str) -> Option<&Entry> {
        self.locales.get(locale)
    }

    /// Check whether a locale is loaded.
    pub fn contains_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Resolve a dotted key within one locale.
    pub fn lookup(&self, locale: &str, key: &str) -> Option<&Entry> {
        self.locale(locale)?.path(key)
    }

    /// Loaded locale codes, sorted.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }
}

fn ensure_group(locale: &str, root: &Entry) -> Result<()> {
    if root.as_group().is_some() {
        Ok(())
    } else {
        Err(I18nError::InvalidDictionary(format!(
            "locale `{}` must map to an object",
            locale
        )))
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| I18nError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn english_dictionary_loads() {
        let dict = Dictionary::english();
        assert!(dict.contains_locale("en"));
        assert_eq!(
            dict.lookup("en", "required").and_then(Entry::as_text),
            Some("The :attribute field is required.")
        );
        assert_eq!(
            dict.lookup("en", "between.string").and_then(Entry::as_text),
            Some("The :attribute must be between :min and :max characters.")
        );
    }

    #[test]
    fn lookup_stops_at_missing_segment() {
        let dict = Dictionary::english();
        assert!(dict.lookup("en", "between.file").is_none());
        assert!(dict.lookup("en", "required.numeric").is_none());
        assert!(dict.lookup("fr", "required").is_none());
    }

    #[test]
    fn group_lookup_returns_group() {
        let dict = Dictionary::english();
        let between = dict.lookup("en", "between").unwrap();
        assert!(between.as_group().is_some());
    }

    #[test]
    fn empty_leaf_counts_as_missing() {
        let mut dict = Dictionary::new();
        dict.set("en", "required", "");
        assert!(dict.lookup("en", "required").is_none());
    }

    #[test]
    fn set_creates_nested_groups() {
        let mut dict = Dictionary::new();
        dict.set("de", "attributes.email", "E-Mail-Adresse");
        assert_eq!(
            dict.lookup("de", "attributes.email").and_then(Entry::as_text),
            Some("E-Mail-Adresse")
        );
    }

    #[test]
    fn merge_overrides_single_keys() {
        let mut dict = Dictionary::english();
        let overrides: Entry =
            serde_json::from_str(r#"{"between": {"string": "Between :min and :max."}}"#).unwrap();
        dict.merge_locale("en", overrides).unwrap();

        assert_eq!(
            dict.lookup("en", "between.string").and_then(Entry::as_text),
            Some("Between :min and :max.")
        );
        // Siblings survive the merge
        assert!(dict.lookup("en", "between.numeric").is_some());
        assert!(dict.lookup("en", "required").is_some());
    }

    #[test]
    fn from_json_str_rejects_leaf_locale() {
        let err = Dictionary::from_json_str(r#"{"en": "nope"}"#).unwrap_err();
        assert!(matches!(err, I18nError::InvalidDictionary(_)));
    }

    #[test]
    fn from_json_str_reads_multiple_locales() {
        let dict = Dictionary::from_json_str(
            r#"{"en": {"required": "Required."}, "nl": {"required": "Verplicht."}}"#,
        )
        .unwrap();
        assert_eq!(dict.locales().collect::<Vec<_>>(), vec!["en", "nl"]);
    }

    #[test]
    fn load_locale_file_merges() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"required": "Champ :attribute obligatoire."}}"#).unwrap();

        let mut dict = Dictionary::new();
        dict.load_locale_file("fr", file.path()).unwrap();
        assert_eq!(
            dict.lookup("fr", "required").and_then(Entry::as_text),
            Some("Champ :attribute obligatoire.")
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Dictionary::from_json_file("/definitely/not/here.json").unwrap_err();
        match err {
            I18nError::Io { path, .. } => assert!(path.ends_with("here.json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
