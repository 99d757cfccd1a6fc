//! The character document: the allocation wizard and the finalized stat block.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SheetError;
use crate::events::SheetEvent;
use crate::features::{AttachedFeature, FeatureLedger, FeatureOrigin, FeatureRegistry, SpecialEffect};
use crate::languages::{capacity, LanguageSlots};
use crate::resources::{ResourceAdjustment, ResourceKind, Resources};
use crate::stats::{AllocationPhase, BaseStats, Stat, StatAllocation};

/// Unique identifier for a character sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    /// Create a new random character ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Character creation, from point allocation to the finalized sheet.
#[derive(Debug, Clone)]
pub enum Creation {
    Allocating(StatAllocation),
    Finalized(Box<CharacterSheet>),
}

impl Default for Creation {
    fn default() -> Self {
        Self::new()
    }
}

impl Creation {
    pub fn new() -> Self {
        Creation::Allocating(StatAllocation::new())
    }

    pub fn phase(&self) -> AllocationPhase {
        match self {
            Creation::Allocating(_) => AllocationPhase::Allocating,
            Creation::Finalized(_) => AllocationPhase::Finalized,
        }
    }

    pub fn allocation(&self) -> Option<&StatAllocation> {
        match self {
            Creation::Allocating(allocation) => Some(allocation),
            Creation::Finalized(_) => None,
        }
    }

    pub fn sheet(&self) -> Option<&CharacterSheet> {
        match self {
            Creation::Allocating(_) => None,
            Creation::Finalized(sheet) => Some(sheet),
        }
    }

    pub fn sheet_mut(&mut self) -> Option<&mut CharacterSheet> {
        match self {
            Creation::Allocating(_) => None,
            Creation::Finalized(sheet) => Some(sheet),
        }
    }

    /// Spend or refund a point. Always `false` once finalized.
    pub fn allocate(&mut self, stat: Stat, delta: i32) -> bool {
        match self {
            Creation::Allocating(allocation) => allocation.allocate(stat, delta),
            Creation::Finalized(_) => false,
        }
    }

    /// Lock in the allocation and build the stat block.
    ///
    /// Fails, leaving the allocation untouched, while points remain unspent.
    pub fn finalize(&mut self, registry: FeatureRegistry) -> Result<(), SheetError> {
        let stats = match self {
            Creation::Allocating(allocation) => allocation.finalize()?,
            Creation::Finalized(_) => {
                return Err(SheetError::validation("the character is already finalized"))
            }
        };
        *self = Creation::Finalized(Box::new(CharacterSheet::new(stats, registry)));
        Ok(())
    }
}

/// A finalized character: the stat block.
///
/// Base stats are the single source of truth. Resources and language slots are
/// recomputed from them after every stat change and are never set directly.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterSheet {
    id: CharacterId,
    player_name: String,
    stats: BaseStats,
    resources: Resources,
    features: FeatureLedger,
    languages: LanguageSlots,
    #[serde(skip)]
    registry: FeatureRegistry,
    #[serde(skip)]
    events: Vec<SheetEvent>,
}

impl CharacterSheet {
    /// Build a stat block from finalized stats. Resources start full.
    pub fn new(stats: BaseStats, registry: FeatureRegistry) -> Self {
        let id = CharacterId::new();
        tracing::debug!(%id, ?stats, "character finalized");
        Self {
            id,
            player_name: String::new(),
            stats,
            resources: Resources::at_max(&stats),
            features: FeatureLedger::new(),
            languages: LanguageSlots::new(capacity(stats.mind)),
            registry,
            events: vec![SheetEvent::Finalized { id }],
        }
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn stats(&self) -> &BaseStats {
        &self.stats
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn features(&self) -> &FeatureLedger {
        &self.features
    }

    pub fn languages(&self) -> &LanguageSlots {
        &self.languages
    }

    pub fn registry(&self) -> &FeatureRegistry {
        &self.registry
    }

    pub fn set_player_name(&mut self, name: &str) {
        self.player_name = name.trim().to_string();
        self.events.push(SheetEvent::PlayerRenamed {
            name: self.player_name.clone(),
        });
    }

    /// Attach a catalog feature, raising the chosen stat(s) and applying its special effect.
    pub fn attach_feature(
        &mut self,
        name: &str,
        choice: Option<Stat>,
    ) -> Result<AttachedFeature, SheetError> {
        let definition = self
            .registry
            .lookup(name)
            .ok_or_else(|| SheetError::not_found("feature", name.trim()))?;
        if self.features.contains(&definition.name) {
            return Err(SheetError::Duplicate {
                name: definition.name.clone(),
            });
        }

        let feature = AttachedFeature {
            name: definition.name.clone(),
            increased: definition.resolve_choice(choice)?,
            description: definition.description.clone(),
            origin: FeatureOrigin::Predefined,
            special: definition.special.clone(),
        };
        self.attach(feature)
    }

    /// Attach a user-defined feature. Custom features never have special effects.
    pub fn attach_custom_feature(
        &mut self,
        name: &str,
        stat: Option<Stat>,
        description: &str,
    ) -> Result<AttachedFeature, SheetError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SheetError::validation("custom feature name cannot be empty"));
        }
        self.attach(AttachedFeature::custom(name, stat, description.trim()))
    }

    fn attach(&mut self, feature: AttachedFeature) -> Result<AttachedFeature, SheetError> {
        self.features.push(feature.clone())?;

        for stat in &feature.increased {
            self.stats.adjust(*stat, 1);
        }

        if feature.origin == FeatureOrigin::Predefined {
            match &feature.special {
                Some(SpecialEffect::UnlockMana) => {
                    if self.resources.unlock_mana(&self.stats) {
                        let max = ResourceKind::Mana.maximum(&self.stats);
                        self.events.push(SheetEvent::ManaUnlocked { max });
                    }
                }
                Some(SpecialEffect::GrantLanguage(language)) => {
                    if self.languages.grant(language) {
                        self.events.push(SheetEvent::LanguageGranted {
                            language: language.clone(),
                        });
                    }
                }
                None => {}
            }
        }

        tracing::debug!(id = %self.id, feature = %feature.name, bonus = %feature.bonus_label(), "attached feature");
        self.events.push(SheetEvent::FeatureAttached {
            name: feature.name.clone(),
        });
        self.refresh();
        Ok(feature)
    }

    /// Detach a feature, reverting its stat increase.
    ///
    /// Mana is torn down once no attached feature unlocks it. Granted languages
    /// are left in place.
    pub fn detach_feature(&mut self, name: &str) -> Result<AttachedFeature, SheetError> {
        let removed = self.features.remove(name)?;

        for stat in &removed.increased {
            self.stats.adjust(*stat, -1);
        }

        if removed.unlocks_mana() && !self.features.unlocks_mana() {
            self.resources.remove_mana();
            self.events.push(SheetEvent::ManaRemoved);
        }

        tracing::debug!(id = %self.id, feature = %removed.name, "detached feature");
        self.events.push(SheetEvent::FeatureDetached {
            name: removed.name.clone(),
        });
        self.refresh();
        Ok(removed)
    }

    /// Formatted stat bonus and description of an attached feature.
    pub fn describe_feature(&self, name: &str) -> Result<String, SheetError> {
        self.features.describe(name)
    }

    /// Manually adjust a resource's current value; out-of-range requests are clamped.
    pub fn adjust_resource(
        &mut self,
        kind: ResourceKind,
        adjustment: ResourceAdjustment,
    ) -> Result<u32, SheetError> {
        let current = self.resources.adjust(kind, adjustment)?;
        tracing::debug!(id = %self.id, %kind, ?adjustment, current, "adjusted resource");
        self.events
            .push(SheetEvent::ResourceAdjusted { kind, current });
        Ok(current)
    }

    /// Add a language beyond the Mind-derived slots (or into an empty one).
    pub fn add_language_override(&mut self, text: &str) -> Result<usize, SheetError> {
        let index = self.languages.add_override(text)?;
        self.events.push(SheetEvent::LanguagesChanged);
        Ok(index)
    }

    /// Edit the language at `index`. Feature-granted entries are read-only.
    pub fn set_language(&mut self, index: usize, text: &str) -> Result<(), SheetError> {
        self.languages.set(index, text)?;
        self.events.push(SheetEvent::LanguagesChanged);
        Ok(())
    }

    /// Take all notifications queued since the last call.
    pub fn drain_events(&mut self) -> Vec<SheetEvent> {
        std::mem::take(&mut self.events)
    }

    fn refresh(&mut self) {
        self.resources.recompute(&self.stats);
        let granted = self.registry.granted_languages();
        self.languages.recompute(capacity(self.stats.mind), &granted);

        self.events.push(SheetEvent::StatsChanged { stats: self.stats });
        self.events.push(SheetEvent::ResourcesRecomputed);
        self.events.push(SheetEvent::LanguagesChanged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finalized(stats: BaseStats) -> CharacterSheet {
        let mut sheet = CharacterSheet::new(stats, FeatureRegistry::builtin());
        sheet.drain_events();
        sheet
    }

    #[test]
    fn test_new_sheet_starts_full() {
        let sheet = finalized(BaseStats::new(3, 2, 4, 3));
        assert_eq!(sheet.resources().health.current(), 9);
        assert_eq!(sheet.resources().stamina.current(), 2);
        assert_eq!(sheet.resources().grit.current(), 6);
        assert!(sheet.resources().mana.is_none());
        assert_eq!(sheet.languages().capacity(), 2);
        assert!(sheet.player_name().is_empty());
    }

    #[test]
    fn test_creation_finalize_transition() {
        let mut creation = Creation::new();
        assert_eq!(creation.phase(), AllocationPhase::Allocating);
        assert!(creation.finalize(FeatureRegistry::builtin()).is_err());
        assert_eq!(creation.phase(), AllocationPhase::Allocating);

        for _ in 0..8 {
            assert!(creation.allocate(Stat::Will, 1));
        }
        creation.finalize(FeatureRegistry::builtin()).unwrap();
        assert_eq!(creation.phase(), AllocationPhase::Finalized);
        assert!(!creation.allocate(Stat::Will, -1));
        assert!(creation.finalize(FeatureRegistry::builtin()).is_err());

        let sheet = creation.sheet_mut().unwrap();
        assert_eq!(sheet.stats().will, 9);
        let events = sheet.drain_events();
        assert!(matches!(events.as_slice(), [SheetEvent::Finalized { .. }]));
    }

    #[test]
    fn test_attach_fixed_feature() {
        let mut sheet = finalized(BaseStats::new(3, 2, 2, 1));
        let feature = sheet.attach_feature("knave", None).unwrap();
        assert_eq!(feature.name, "Knave");
        assert_eq!(feature.increased, vec![Stat::Agility]);
        assert_eq!(sheet.stats().agility, 3);
        assert_eq!(sheet.resources().stamina.max(), 3);
        // current is never raised by a recompute
        assert_eq!(sheet.resources().stamina.current(), 2);
    }

    #[test]
    fn test_attach_duplicate_leaves_state_unchanged() {
        let mut sheet = finalized(BaseStats::new(3, 2, 2, 1));
        sheet.attach_feature("Veteran", Some(Stat::Might)).unwrap();
        let stats = *sheet.stats();
        sheet.drain_events();

        let err = sheet.attach_feature("VETERAN", Some(Stat::Agility)).unwrap_err();
        assert_eq!(
            err,
            SheetError::Duplicate {
                name: "Veteran".into()
            }
        );
        let err = sheet
            .attach_custom_feature("veteran", Some(Stat::Will), "")
            .unwrap_err();
        assert!(matches!(err, SheetError::Duplicate { .. }));

        assert_eq!(*sheet.stats(), stats);
        assert_eq!(sheet.features().len(), 1);
        assert!(sheet.drain_events().is_empty());
    }

    #[test]
    fn test_attach_rejects_bad_choice() {
        let mut sheet = finalized(BaseStats::new(3, 2, 2, 1));
        assert!(matches!(
            sheet.attach_feature("Veteran", None),
            Err(SheetError::Input(_))
        ));
        assert!(matches!(
            sheet.attach_feature("Veteran", Some(Stat::Mind)),
            Err(SheetError::Input(_))
        ));
        assert!(matches!(
            sheet.attach_feature("Bard", None),
            Err(SheetError::NotFound { .. })
        ));
        assert!(sheet.features().is_empty());
        assert_eq!(*sheet.stats(), BaseStats::new(3, 2, 2, 1));
    }

    #[test]
    fn test_grant_all_feature_raises_every_stat() {
        let mut sheet = finalized(BaseStats::new(3, 2, 2, 1));
        let feature = sheet.attach_feature("Wanderer", None).unwrap();
        assert_eq!(feature.bonus_label(), "+1 Might, +1 Agility, +1 Mind, +1 Will");
        assert_eq!(*sheet.stats(), BaseStats::new(4, 3, 3, 2));

        sheet.detach_feature("Wanderer").unwrap();
        assert_eq!(*sheet.stats(), BaseStats::new(3, 2, 2, 1));
    }

    #[test]
    fn test_custom_feature() {
        let mut sheet = finalized(BaseStats::new(3, 2, 2, 1));
        assert!(matches!(
            sheet.attach_custom_feature("  ", Some(Stat::Might), "x"),
            Err(SheetError::Validation(_))
        ));

        let feature = sheet
            .attach_custom_feature(" Ironhide ", Some(Stat::Might), " Tough skin. ")
            .unwrap();
        assert_eq!(feature.name, "Ironhide");
        assert_eq!(sheet.stats().might, 4);
        assert_eq!(sheet.resources().health.max(), 12);
        assert_eq!(
            sheet.describe_feature("ironhide").unwrap(),
            "Stat Increase: +1 Might\n\nDescription:\nTough skin."
        );

        sheet.attach_custom_feature("Lucky", None, "").unwrap();
        assert_eq!(*sheet.stats(), BaseStats::new(4, 2, 2, 1));
        assert_eq!(sheet.features().get("lucky").unwrap().bonus_label(), "N/A");
    }

    #[test]
    fn test_custom_feature_named_like_catalog_has_no_special() {
        let mut sheet = finalized(BaseStats::new(3, 2, 2, 1));
        sheet
            .attach_custom_feature("Scholar", Some(Stat::Mind), "homebrew")
            .unwrap();
        assert!(sheet.resources().mana.is_none());
        assert_eq!(sheet.stats().mind, 3);
    }

    #[test]
    fn test_detach_unknown_feature() {
        let mut sheet = finalized(BaseStats::new(3, 2, 2, 1));
        assert!(matches!(
            sheet.detach_feature("Knave"),
            Err(SheetError::NotFound { .. })
        ));
        assert!(sheet.describe_feature("Knave").is_err());
    }

    #[test]
    fn test_detach_clamps_current_down() {
        let mut sheet = finalized(BaseStats::new(3, 2, 2, 1));
        sheet.attach_feature("Veteran", Some(Stat::Might)).unwrap();
        sheet
            .adjust_resource(ResourceKind::Health, ResourceAdjustment::Reset)
            .unwrap();
        assert_eq!(sheet.resources().health.current(), 12);

        sheet.detach_feature("veteran").unwrap();
        assert_eq!(sheet.resources().health.max(), 9);
        assert_eq!(sheet.resources().health.current(), 9);
    }

    #[test]
    fn test_mana_unlock_events() {
        let mut sheet = finalized(BaseStats::new(3, 2, 2, 1));
        sheet.attach_feature("Scholar", None).unwrap();
        let events = sheet.drain_events();
        assert!(events.contains(&SheetEvent::ManaUnlocked { max: 9 }));
        assert!(events.contains(&SheetEvent::FeatureAttached {
            name: "Scholar".into()
        }));

        sheet.detach_feature("Scholar").unwrap();
        let events = sheet.drain_events();
        assert!(events.contains(&SheetEvent::ManaRemoved));
        assert!(sheet
            .adjust_resource(ResourceKind::Mana, ResourceAdjustment::Increment)
            .is_err());
    }

    #[test]
    fn test_mana_survives_while_another_feature_unlocks_it() {
        let mut registry = FeatureRegistry::builtin();
        registry
            .extend_from_toml_str(
                r#"
                [[feature]]
                name = "Hedge Witch"
                stat_increase = { fixed = "Will" }
                special = "unlock_mana"
                "#,
            )
            .unwrap();
        let mut sheet = CharacterSheet::new(BaseStats::new(3, 2, 2, 1), registry);

        sheet.attach_feature("Scholar", None).unwrap();
        sheet.attach_feature("Hedge Witch", None).unwrap();
        sheet.detach_feature("Scholar").unwrap();
        assert_eq!(sheet.resources().mana.map(|m| m.max()), Some(6));

        sheet.detach_feature("Hedge Witch").unwrap();
        assert!(sheet.resources().mana.is_none());
    }

    #[test]
    fn test_languages_follow_mind() {
        let mut sheet = finalized(BaseStats::new(1, 1, 3, 7));
        sheet.set_language(0, "Common").unwrap();
        assert_eq!(sheet.languages().capacity(), 1);

        sheet.attach_feature("Scholar", None).unwrap();
        assert_eq!(sheet.languages().capacity(), 2);
        let texts: Vec<_> = sheet
            .languages()
            .entries()
            .iter()
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Common", ""]);

        sheet.add_language_override("Elvish").unwrap();
        sheet.add_language_override("Orcish").unwrap();
        sheet.detach_feature("Scholar").unwrap();
        let texts: Vec<_> = sheet
            .languages()
            .entries()
            .iter()
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Common", "Elvish", "Orcish"]);
        assert_eq!(sheet.languages().overflow().len(), 2);
    }

    #[test]
    fn test_player_name() {
        let mut sheet = finalized(BaseStats::new(3, 2, 2, 1));
        sheet.set_player_name("  Ada ");
        assert_eq!(sheet.player_name(), "Ada");
        assert_eq!(
            sheet.drain_events(),
            vec![SheetEvent::PlayerRenamed { name: "Ada".into() }]
        );
    }

    #[test]
    fn test_sheet_serializes_without_registry() {
        let sheet = finalized(BaseStats::new(3, 2, 2, 1));
        let json = serde_json::to_value(&sheet).unwrap();
        assert_eq!(json["stats"]["might"], 3);
        assert_eq!(json["resources"]["health"]["max"], 9);
        assert!(json.get("registry").is_none());
        assert!(json.get("events").is_none());
    }
}
