//! Feature definitions and the registry that looks them up.

use serde::{Deserialize, Serialize};

use super::catalog::builtin_definitions;
use crate::error::{CatalogError, SheetError};
use crate::stats::Stat;

/// Which stats a feature raises when attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatIncrease {
    /// Always raises this stat.
    Fixed(Stat),
    /// The caller picks exactly one of these.
    ChooseOne(Vec<Stat>),
    /// Raises every listed stat together.
    GrantAll(Vec<Stat>),
}

impl StatIncrease {
    fn stats(&self) -> &[Stat] {
        match self {
            StatIncrease::Fixed(stat) => std::slice::from_ref(stat),
            StatIncrease::ChooseOne(stats) | StatIncrease::GrantAll(stats) => stats,
        }
    }
}

/// Extra mechanics a predefined feature unlocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialEffect {
    /// Adds the Mana resource.
    UnlockMana,
    /// Adds a read-only language entry.
    GrantLanguage(String),
}

/// A named feature in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDefinition {
    pub name: String,
    pub stat_increase: StatIncrease,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub special: Option<SpecialEffect>,
}

impl FeatureDefinition {
    /// Stats the caller may pick for an instance of this feature, in catalog order.
    pub fn allowed_stat_choices(&self) -> Vec<Stat> {
        self.stat_increase.stats().to_vec()
    }

    /// Resolve a caller's choice into the stats that will actually be raised.
    ///
    /// `Fixed` and `GrantAll` features accept no explicit choice.
    pub fn resolve_choice(&self, choice: Option<Stat>) -> Result<Vec<Stat>, SheetError> {
        let allowed = self.stat_increase.stats();
        if let Some(stat) = choice {
            if !allowed.contains(&stat) {
                return Err(SheetError::input(format!(
                    "{} cannot increase {stat}; choose one of {}",
                    self.name,
                    join_stats(allowed)
                )));
            }
        }

        match (&self.stat_increase, choice) {
            (StatIncrease::Fixed(stat), _) => Ok(vec![*stat]),
            (StatIncrease::ChooseOne(_), Some(stat)) => Ok(vec![stat]),
            (StatIncrease::ChooseOne(stats), None) => Err(SheetError::input(format!(
                "please select a stat for {}: {}",
                self.name,
                join_stats(stats)
            ))),
            (StatIncrease::GrantAll(stats), _) => Ok(stats.clone()),
        }
    }

    /// The language this feature grants, if any.
    pub fn granted_language(&self) -> Option<&str> {
        match &self.special {
            Some(SpecialEffect::GrantLanguage(language)) => Some(language),
            _ => None,
        }
    }

    pub fn unlocks_mana(&self) -> bool {
        matches!(self.special, Some(SpecialEffect::UnlockMana))
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.stat_increase.stats().is_empty() {
            return Err(CatalogError::EmptyStatList(self.name.clone()));
        }
        Ok(())
    }
}

fn join_stats(stats: &[Stat]) -> String {
    stats
        .iter()
        .map(Stat::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "feature")]
    features: Vec<FeatureDefinition>,
}

/// The catalog of predefined features. Names are unique, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRegistry {
    definitions: Vec<FeatureDefinition>,
}

impl Default for FeatureRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FeatureRegistry {
    /// The five built-in features.
    pub fn builtin() -> Self {
        Self {
            definitions: builtin_definitions(),
        }
    }

    /// A registry with no definitions.
    pub fn empty() -> Self {
        Self {
            definitions: Vec::new(),
        }
    }

    /// Parse a catalog from TOML (`[[feature]]` tables).
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let mut registry = Self::empty();
        registry.extend_from_toml_str(source)?;
        Ok(registry)
    }

    /// Merge TOML definitions into this registry. Nothing is added if any entry is invalid.
    pub fn extend_from_toml_str(&mut self, source: &str) -> Result<usize, CatalogError> {
        let file: CatalogFile = toml::from_str(source)?;
        let mut merged = self.clone();
        for definition in file.features {
            merged.insert(definition)?;
        }
        let added = merged.definitions.len() - self.definitions.len();
        *self = merged;
        tracing::debug!(added, total = self.definitions.len(), "extended feature catalog");
        Ok(added)
    }

    /// Add one definition.
    pub fn insert(&mut self, definition: FeatureDefinition) -> Result<(), CatalogError> {
        definition.validate()?;
        if self.lookup(&definition.name).is_some() {
            return Err(CatalogError::DuplicateName(definition.name));
        }
        self.definitions.push(definition);
        Ok(())
    }

    /// Find a definition by name, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<&FeatureDefinition> {
        let name = name.trim();
        self.definitions
            .iter()
            .find(|definition| definition.name.eq_ignore_ascii_case(name))
    }

    /// Stats the caller may pick for `definition`.
    pub fn allowed_stat_choices(&self, definition: &FeatureDefinition) -> Vec<Stat> {
        definition.allowed_stat_choices()
    }

    /// Every language granted by any definition in the catalog.
    pub fn granted_languages(&self) -> Vec<&str> {
        self.definitions
            .iter()
            .filter_map(FeatureDefinition::granted_language)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let registry = FeatureRegistry::builtin();
        let names: Vec<_> = registry.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Veteran", "Knave", "Scholar", "Charlatan", "Wanderer"]
        );
        assert!(registry.lookup("scholar").unwrap().unlocks_mana());
        assert_eq!(registry.granted_languages(), vec!["Primordial"]);
        assert!(registry.lookup("Bard").is_none());
    }

    #[test]
    fn test_allowed_choices() {
        let registry = FeatureRegistry::builtin();
        let veteran = registry.lookup("Veteran").unwrap();
        assert_eq!(
            registry.allowed_stat_choices(veteran),
            vec![Stat::Might, Stat::Agility]
        );
        let knave = registry.lookup("Knave").unwrap();
        assert_eq!(knave.allowed_stat_choices(), vec![Stat::Agility]);
        let wanderer = registry.lookup("Wanderer").unwrap();
        assert_eq!(wanderer.allowed_stat_choices(), Stat::ALL.to_vec());
    }

    #[test]
    fn test_resolve_fixed() {
        let registry = FeatureRegistry::builtin();
        let knave = registry.lookup("Knave").unwrap();
        assert_eq!(knave.resolve_choice(None).unwrap(), vec![Stat::Agility]);
        assert_eq!(
            knave.resolve_choice(Some(Stat::Agility)).unwrap(),
            vec![Stat::Agility]
        );
        assert!(matches!(
            knave.resolve_choice(Some(Stat::Mind)),
            Err(SheetError::Input(_))
        ));
    }

    #[test]
    fn test_resolve_choose_one() {
        let registry = FeatureRegistry::builtin();
        let veteran = registry.lookup("Veteran").unwrap();
        assert_eq!(
            veteran.resolve_choice(Some(Stat::Might)).unwrap(),
            vec![Stat::Might]
        );
        assert!(veteran.resolve_choice(None).is_err());
        assert!(veteran.resolve_choice(Some(Stat::Will)).is_err());
    }

    #[test]
    fn test_resolve_grant_all() {
        let registry = FeatureRegistry::builtin();
        let wanderer = registry.lookup("Wanderer").unwrap();
        assert_eq!(wanderer.resolve_choice(None).unwrap(), Stat::ALL.to_vec());
        assert_eq!(
            wanderer.resolve_choice(Some(Stat::Mind)).unwrap(),
            Stat::ALL.to_vec()
        );
    }

    #[test]
    fn test_extend_from_toml() {
        let mut registry = FeatureRegistry::builtin();
        let added = registry
            .extend_from_toml_str(
                r#"
                [[feature]]
                name = "Sellsword"
                description = "Fights for coin."
                stat_increase = { choose_one = ["Might", "Will"] }
                special = { grant_language = "Tradespeak" }

                [[feature]]
                name = "Hedge Witch"
                stat_increase = { fixed = "Mind" }
                special = "unlock_mana"
                "#,
            )
            .unwrap();
        assert_eq!(added, 2);
        assert_eq!(registry.len(), 7);

        let sellsword = registry.lookup("sellsword").unwrap();
        assert_eq!(
            sellsword.stat_increase,
            StatIncrease::ChooseOne(vec![Stat::Might, Stat::Will])
        );
        assert_eq!(sellsword.granted_language(), Some("Tradespeak"));
        assert!(registry.lookup("Hedge Witch").unwrap().unlocks_mana());
        assert_eq!(
            registry.granted_languages(),
            vec!["Primordial", "Tradespeak"]
        );
    }

    #[test]
    fn test_extend_rejects_duplicates_atomically() {
        let mut registry = FeatureRegistry::builtin();
        let err = registry
            .extend_from_toml_str(
                r#"
                [[feature]]
                name = "Tinker"
                stat_increase = { fixed = "Mind" }

                [[feature]]
                name = "KNAVE"
                stat_increase = { fixed = "Agility" }
                "#,
            )
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName(name) if name == "KNAVE"));
        assert_eq!(registry.len(), 5);
        assert!(registry.lookup("Tinker").is_none());
    }

    #[test]
    fn test_catalog_validation() {
        let err = FeatureRegistry::from_toml_str(
            r#"
            [[feature]]
            name = "Nobody"
            stat_increase = { grant_all = [] }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::EmptyStatList(_)));

        let err = FeatureRegistry::from_toml_str("feature = 3").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
