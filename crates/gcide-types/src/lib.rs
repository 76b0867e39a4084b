//! Shared types for turning the GCIDE corpus into a lookup dictionary.
//!
//! The builder produces three pieces of state while it walks the source
//! files:
//!
//! - [`Dictionary`]: entry name to accumulated HTML fragment.
//! - [`Index`]: entry name to the aliases found in its entry tags.
//! - [`UnknownEntities`]: every entity marker that no table could resolve.
//!
//! All three keep first-insertion order so repeated runs over the same
//! corpus produce byte-identical output. The [`markup`] module holds the
//! small element tree the extractor and post-processor rewrite.
//!
//! ```rust
//! use gcide_types::{Dictionary, Index};
//!
//! let mut dict = Dictionary::new();
//! let mut index = Index::new();
//! dict.append("Cat", "<def>A feline.</def>");
//! index.push_alias("Cat", "Cat");
//! index.push_alias("Cat", "Cat");
//! index.dedup();
//! assert_eq!(dict.get("Cat"), Some("<def>A feline.</def>"));
//! assert_eq!(index.aliases("Cat"), ["Cat".to_string()]);
//! ```

pub mod markup;

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

pub use markup::{Element, Node};

/// Entry name to HTML fragment, in first-insertion order.
///
/// Content seen before the first entry tag of a walk goes to a separate
/// unattributed bucket rather than a magic key, so no headword can collide
/// with it.
#[derive(Clone, Debug, Default)]
pub struct Dictionary {
    entries: Vec<(String, String)>,
    slots: HashMap<String, usize>,
    unattributed: String,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty slot for `name` if it does not exist yet.
    pub fn ensure(&mut self, name: &str) {
        self.slot_mut(name);
    }

    /// Append `fragment` to the entry `name`, creating it when absent.
    pub fn append(&mut self, name: &str, fragment: &str) {
        self.slot_mut(name).push_str(fragment);
    }

    /// Append content that belongs to no entry yet.
    pub fn append_unattributed(&mut self, fragment: &str) {
        self.unattributed.push_str(fragment);
    }

    /// Content collected before any entry tag.
    /// Drop the unattributed bucket, returning what it held.
    pub fn discard_unattributed(&mut self) -> String {
        std::mem::take(&mut self.unattributed)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.slots
            .get(name)
            .map(|idx| self.entries[*idx].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(name, fragment)| (name.as_str(), fragment.as_str()))
    }

    /// Iterate entries with mutable access to each fragment.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut String)> + '_ {
        self.entries
            .iter_mut()
            .map(|(name, fragment)| (name.as_str(), fragment))
    }

    fn slot_mut(&mut self, name: &str) -> &mut String {
        let idx = match self.slots.get(name) {
            Some(idx) => *idx,
            None => {
                let idx = self.entries.len();
                self.entries.push((name.to_string(), String::new()));
                self.slots.insert(name.to_string(), idx);
                idx
            }
        };
        &mut self.entries[idx].1
    }
}

impl Serialize for Dictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, fragment) in &self.entries {
            map.serialize_entry(name, fragment)?;
        }
        map.end()
    }
}

/// Entry name to alias list, in first-insertion order.
#[derive(Clone, Debug, Default)]
pub struct Index {
    entries: Vec<(String, Vec<String>)>,
    slots: HashMap<String, usize>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty alias list for `name` if it does not exist yet.
    pub fn ensure(&mut self, name: &str) {
        self.slot_mut(name);
    }

    /// Append an alias verbatim; duplicates are kept until [`Index::dedup`].
    pub fn push_alias(&mut self, name: &str, alias: &str) {
        self.slot_mut(name).push(alias.to_string());
    }

    /// Aliases recorded for `name`, or an empty slice.
    pub fn aliases(&self, name: &str) -> &[String] {
        static EMPTY: [String; 0] = [];
        self.slots
            .get(name)
            .map(|idx| self.entries[*idx].1.as_slice())
            .unwrap_or(&EMPTY)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.entries
            .iter()
            .map(|(name, aliases)| (name.as_str(), aliases.as_slice()))
    }

    /// Remove repeated aliases, keeping the first occurrence of each.
    pub fn dedup(&mut self) {
        for (_, aliases) in &mut self.entries {
            let mut seen = HashSet::new();
            aliases.retain(|alias| seen.insert(alias.clone()));
        }
    }

    fn slot_mut(&mut self, name: &str) -> &mut Vec<String> {
        let idx = match self.slots.get(name) {
            Some(idx) => *idx,
            None => {
                let idx = self.entries.len();
                self.entries.push((name.to_string(), Vec::new()));
                self.slots.insert(name.to_string(), idx);
                idx
            }
        };
        &mut self.entries[idx].1
    }
}

impl Serialize for Index {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, aliases) in &self.entries {
            map.serialize_entry(name, aliases)?;
        }
        map.end()
    }
}

/// Distinct entity names no lookup table could resolve.
#[derive(Clone, Debug, Default)]
pub struct UnknownEntities {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl UnknownEntities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name`; returns `true` the first time it is seen.
    pub fn record(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        self.order.push(name.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }
}

impl fmt::Display for UnknownEntities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.order.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_appends_in_order() {
        let mut dict = Dictionary::new();
        dict.append("Cat", "one ");
        dict.append("Dog", "bark");
        dict.append("Cat", "two");
        assert_eq!(dict.get("Cat"), Some("one two"));
        let names: Vec<&str> = dict.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Cat", "Dog"]);
    }

    #[test]
    fn unattributed_content_is_not_an_entry() {
        let mut dict = Dictionary::new();
        dict.append_unattributed("preamble");
        assert!(dict.is_empty());
        assert_eq!(dict.discard_unattributed(), "preamble");
        assert_eq!(dict.discard_unattributed(), "");
    }

    #[test]
    fn index_dedup_keeps_first_occurrence() {
        let mut index = Index::new();
        for alias in ["Colour", "Color", "Colour", "Color", "Colored"] {
            index.push_alias("Color", alias);
        }
        index.dedup();
        assert_eq!(index.aliases("Color"), ["Colour", "Color", "Colored"]);
        assert!(index.aliases("missing").is_empty());
    }

    #[test]
    fn unknown_entities_record_once() {
        let mut unknown = UnknownEntities::new();
        assert!(unknown.record("zzz"));
        assert!(!unknown.record("zzz"));
        assert!(unknown.record("yyy"));
        assert_eq!(unknown.len(), 2);
        assert_eq!(unknown.to_string(), "zzz, yyy");
    }

    #[test]
    fn serializes_as_ordered_maps() {
        let mut dict = Dictionary::new();
        dict.append("b", "2");
        dict.append("a", "1");
        let json = serde_json::to_string(&dict).unwrap();
        assert_eq!(json, r#"{"b":"2","a":"1"}"#);

        let mut index = Index::new();
        index.push_alias("b", "B");
        let json = serde_json::to_string(&index).unwrap();
        assert_eq!(json, r#"{"b":["B"]}"#);
    }
}
