use std::collections::BTreeMap;

use serde::Serialize;

/// Occurrence counts keyed by segment type label or by character.
///
/// Keys with a zero count are never stored: a key is either absent or has
/// been observed at least once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyMap {
    counts: BTreeMap<String, u64>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every `char` of `text` once, skipping ASCII spaces.
    pub fn from_chars(text: &str) -> Self {
        let mut map = FrequencyMap::new();
        let mut buf = [0u8; 4];
        for c in text.chars().filter(|c| *c != ' ') {
            map.add(c.encode_utf8(&mut buf));
        }
        map
    }

    pub fn add(&mut self, key: &str) {
        self.add_n(key, 1);
    }

    pub fn add_n(&mut self, key: &str, n: u64) {
        if n == 0 {
            return;
        }
        match self.counts.get_mut(key) {
            Some(count) => *count += n,
            None => {
                self.counts.insert(key.to_string(), n);
            }
        }
    }

    /// Per-key addition of `other` into `self`.
    pub fn merge(&mut self, other: &FrequencyMap) {
        for (key, count) in other.iter() {
            self.add_n(key, count);
        }
    }

    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Entries by count, highest first. Equal counts keep key order.
    pub fn sorted_by_count(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    /// Entries by key, last key first.
    pub fn sorted_by_key_desc(&self) -> Vec<(&str, u64)> {
        self.counts.iter().rev().map(|(k, v)| (k.as_str(), *v)).collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut map = FrequencyMap::new();
        for key in iter {
            map.add(key.as_ref());
        }
        map
    }
}

impl<S: AsRef<str>> Extend<S> for FrequencyMap {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for key in iter {
            self.add(key.as_ref());
        }
    }
}
