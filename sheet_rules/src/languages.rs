//! Language slots derived from the Mind stat.
//!
//! A character knows `1 + (Mind - 1) / 3` languages. Entries beyond that are
//! kept as overflow (overrides, granted languages) rather than dropped.

use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// Number of language slots for a Mind value.
pub fn capacity(mind: i32) -> usize {
    1 + ((mind.max(1) - 1) / 3) as usize
}

/// One language entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub text: String,
    /// Feature-granted entries cannot be edited.
    pub read_only: bool,
}

impl LanguageEntry {
    pub fn editable(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            read_only: false,
        }
    }

    pub fn granted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            read_only: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Rebuild language entries for a new capacity.
///
/// Non-empty entries keep their order and fill the first `capacity` slots,
/// padded with empty slots; the rest follow as overflow. An entry is read-only
/// when its text matches one of `granted`.
pub fn recompute_slots<'a>(
    current: impl IntoIterator<Item = &'a str>,
    capacity: usize,
    granted: &[&str],
) -> Vec<LanguageEntry> {
    let mut entries: Vec<LanguageEntry> = current
        .into_iter()
        .filter(|text| !text.is_empty())
        .map(|text| LanguageEntry {
            text: text.to_string(),
            read_only: granted.iter().any(|language| *language == text),
        })
        .collect();
    if entries.len() < capacity {
        entries.resize_with(capacity, LanguageEntry::default);
    }
    entries
}

/// A character's language list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSlots {
    capacity: usize,
    entries: Vec<LanguageEntry>,
}

impl LanguageSlots {
    /// Empty slots for the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: vec![LanguageEntry::default(); capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> &[LanguageEntry] {
        &self.entries
    }

    /// Entries beyond capacity.
    pub fn overflow(&self) -> &[LanguageEntry] {
        self.entries.get(self.capacity..).unwrap_or(&[])
    }

    /// Re-layout entries for a new capacity. See [`recompute_slots`].
    pub fn recompute(&mut self, capacity: usize, granted: &[&str]) {
        let current: Vec<String> = self.entries.drain(..).map(|entry| entry.text).collect();
        self.entries = recompute_slots(current.iter().map(String::as_str), capacity, granted);
        self.capacity = capacity;
    }

    /// Add a user language, filling the first empty editable slot or appending.
    ///
    /// Returns the index of the entry.
    pub fn add_override(&mut self, text: &str) -> Result<usize, SheetError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SheetError::input("override language cannot be empty"));
        }

        let slot = self
            .entries
            .iter()
            .position(|entry| entry.is_empty() && !entry.read_only);
        let index = match slot {
            Some(index) => {
                self.entries[index] = LanguageEntry::editable(text);
                index
            }
            None => {
                self.entries.push(LanguageEntry::editable(text));
                self.entries.len() - 1
            }
        };
        Ok(index)
    }

    /// Append a read-only, feature-granted language.
    ///
    /// Returns `false` when an entry with the same text already exists.
    pub fn grant(&mut self, language: &str) -> bool {
        if self.entries.iter().any(|entry| entry.text == language) {
            return false;
        }
        self.entries.push(LanguageEntry::granted(language));
        true
    }

    /// Replace the text of an editable entry.
    pub fn set(&mut self, index: usize, text: &str) -> Result<(), SheetError> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or_else(|| SheetError::not_found("language slot", (index + 1).to_string()))?;
        if entry.read_only {
            return Err(SheetError::input(format!(
                "'{}' was granted by a feature and cannot be edited",
                entry.text
            )));
        }
        entry.text = text.trim().to_string();
        Ok(())
    }
}
