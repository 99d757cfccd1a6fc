//! The ordered list of features attached to a character.

use serde::{Deserialize, Serialize};

use super::SpecialEffect;
use crate::error::SheetError;
use crate::stats::Stat;

/// Where an attached feature came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureOrigin {
    /// Attached from the catalog; its special effect applies.
    Predefined,
    /// Entered by the user; never has a special effect.
    Custom,
}

/// A feature attached to a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachedFeature {
    pub name: String,
    /// Stats raised by one point each. Empty means no stat increase.
    pub increased: Vec<Stat>,
    pub description: String,
    pub origin: FeatureOrigin,
    /// Special effect snapshot taken from the catalog at attach time.
    pub special: Option<SpecialEffect>,
}

impl AttachedFeature {
    /// A user-defined feature raising `stat`, or nothing for `None`.
    pub fn custom(
        name: impl Into<String>,
        stat: Option<Stat>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            increased: stat.into_iter().collect(),
            description: description.into(),
            origin: FeatureOrigin::Custom,
            special: None,
        }
    }

    /// Short bonus annotation, e.g. `+1 Mind` or `N/A`.
    pub fn bonus_label(&self) -> String {
        if self.increased.is_empty() {
            return "N/A".to_string();
        }
        self.increased
            .iter()
            .map(|stat| format!("+1 {stat}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Stat bonus and description text.
    pub fn describe(&self) -> String {
        let bonus = if self.increased.is_empty() {
            "No Stat Increase".to_string()
        } else {
            self.bonus_label()
        };
        format!(
            "Stat Increase: {bonus}\n\nDescription:\n{}",
            self.description
        )
    }

    pub fn unlocks_mana(&self) -> bool {
        self.origin == FeatureOrigin::Predefined
            && matches!(self.special, Some(SpecialEffect::UnlockMana))
    }

    fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

/// Attached features in attachment order. No two share a name, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureLedger {
    entries: Vec<AttachedFeature>,
}

impl FeatureLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&AttachedFeature> {
        self.entries.iter().find(|feature| feature.matches(name))
    }

    /// Append a feature, rejecting name collisions.
    pub fn push(&mut self, feature: AttachedFeature) -> Result<&AttachedFeature, SheetError> {
        if self.contains(&feature.name) {
            return Err(SheetError::Duplicate { name: feature.name });
        }
        let index = self.entries.len();
        self.entries.push(feature);
        Ok(&self.entries[index])
    }

    /// Remove a feature by name.
    pub fn remove(&mut self, name: &str) -> Result<AttachedFeature, SheetError> {
        let index = self
            .entries
            .iter()
            .position(|feature| feature.matches(name))
            .ok_or_else(|| SheetError::not_found("feature", name.trim()))?;
        Ok(self.entries.remove(index))
    }

    /// Formatted stat bonus and description of an attached feature.
    pub fn describe(&self, name: &str) -> Result<String, SheetError> {
        self.get(name)
            .map(AttachedFeature::describe)
            .ok_or_else(|| SheetError::not_found("feature", name.trim()))
    }

    /// Whether any attached predefined feature unlocks Mana.
    pub fn unlocks_mana(&self) -> bool {
        self.entries.iter().any(AttachedFeature::unlocks_mana)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttachedFeature> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[AttachedFeature] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
