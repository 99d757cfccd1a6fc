//! Notifications queued by [`CharacterSheet`](crate::CharacterSheet) after each
//! accepted mutation. Presentation layers drain them to decide what to re-render.

use crate::character::CharacterId;
use crate::resources::ResourceKind;
use crate::stats::BaseStats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetEvent {
    /// Allocation was locked in and the stat block created.
    Finalized { id: CharacterId },
    PlayerRenamed { name: String },
    StatsChanged { stats: BaseStats },
    /// Resource maximums were recomputed from the current stats.
    ResourcesRecomputed,
    ResourceAdjusted { kind: ResourceKind, current: u32 },
    ManaUnlocked { max: u32 },
    ManaRemoved,
    FeatureAttached { name: String },
    FeatureDetached { name: String },
    LanguageGranted { language: String },
    LanguagesChanged,
}

