//! Derived resources: current/maximum pairs computed from base stats.
//!
//! Maximums are always recomputed from [`BaseStats`] and never set directly.
//! Formulas:
//! - Health = 3 × Might
//! - Stamina = Agility
//! - Grit = 2 × Will
//! - Mana = 3 × Mind (only once unlocked)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SheetError;
use crate::stats::{BaseStats, Stat};

/// The derived resources a character can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Health,
    Stamina,
    Grit,
    /// Optional; present only while a feature unlocks it.
    Mana,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Health,
        ResourceKind::Stamina,
        ResourceKind::Grit,
        ResourceKind::Mana,
    ];

    /// The base stat this resource is computed from.
    pub fn source_stat(&self) -> Stat {
        match self {
            ResourceKind::Health => Stat::Might,
            ResourceKind::Stamina => Stat::Agility,
            ResourceKind::Grit => Stat::Will,
            ResourceKind::Mana => Stat::Mind,
        }
    }

    pub fn multiplier(&self) -> i32 {
        match self {
            ResourceKind::Health => 3,
            ResourceKind::Stamina => 1,
            ResourceKind::Grit => 2,
            ResourceKind::Mana => 3,
        }
    }

    /// Maximum value for this resource given the base stats.
    pub fn maximum(&self, stats: &BaseStats) -> u32 {
        (stats.get(self.source_stat()) * self.multiplier()).max(0) as u32
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Health => "Health",
            ResourceKind::Stamina => "Stamina",
            ResourceKind::Grit => "Grit",
            ResourceKind::Mana => "Mana",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SheetError::input(format!("'{wanted}' is not a resource")))
    }
}

/// Manual adjustments to a resource's current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceAdjustment {
    /// +1, capped at the maximum.
    Increment,
    /// -1, floored at zero.
    Decrement,
    /// Refill to the maximum.
    Reset,
}

/// A current/maximum pair. Invariant: `current <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMeter {
    current: u32,
    max: u32,
}

impl ResourceMeter {
    /// A meter filled to `max`.
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Set a new maximum, lowering `current` if it no longer fits.
    ///
    /// `current` is never raised here.
    pub fn set_max(&mut self, max: u32) {
        self.max = max;
        self.current = self.current.min(max);
    }

    pub fn apply(&mut self, adjustment: ResourceAdjustment) -> u32 {
        self.current = match adjustment {
            ResourceAdjustment::Increment => (self.current + 1).min(self.max),
            ResourceAdjustment::Decrement => self.current.saturating_sub(1),
            ResourceAdjustment::Reset => self.max,
        };
        self.current
    }
}

/// All derived resources of a finalized character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub health: ResourceMeter,
    pub stamina: ResourceMeter,
    pub grit: ResourceMeter,
    pub mana: Option<ResourceMeter>,
}

impl Resources {
    /// Full resources for the given stats, with Mana locked.
    pub fn at_max(stats: &BaseStats) -> Self {
        Self {
            health: ResourceMeter::full(ResourceKind::Health.maximum(stats)),
            stamina: ResourceMeter::full(ResourceKind::Stamina.maximum(stats)),
            grit: ResourceMeter::full(ResourceKind::Grit.maximum(stats)),
            mana: None,
        }
    }

    pub fn get(&self, kind: ResourceKind) -> Option<&ResourceMeter> {
        match kind {
            ResourceKind::Health => Some(&self.health),
            ResourceKind::Stamina => Some(&self.stamina),
            ResourceKind::Grit => Some(&self.grit),
            ResourceKind::Mana => self.mana.as_ref(),
        }
    }

    fn get_mut(&mut self, kind: ResourceKind) -> Option<&mut ResourceMeter> {
        match kind {
            ResourceKind::Health => Some(&mut self.health),
            ResourceKind::Stamina => Some(&mut self.stamina),
            ResourceKind::Grit => Some(&mut self.grit),
            ResourceKind::Mana => self.mana.as_mut(),
        }
    }

    /// Present resources in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &ResourceMeter)> + '_ {
        ResourceKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|meter| (kind, meter)))
    }

    /// Recompute every present maximum from `stats`, clamping current values down.
    pub fn recompute(&mut self, stats: &BaseStats) {
        for kind in ResourceKind::ALL {
            if let Some(meter) = self.get_mut(kind) {
                meter.set_max(kind.maximum(stats));
            }
        }
    }

    /// Unlock Mana at full. Returns `false` if it was already unlocked.
    pub fn unlock_mana(&mut self, stats: &BaseStats) -> bool {
        if self.mana.is_some() {
            return false;
        }
        self.mana = Some(ResourceMeter::full(ResourceKind::Mana.maximum(stats)));
        true
    }

    /// Remove Mana entirely, discarding its state.
    pub fn remove_mana(&mut self) -> Option<ResourceMeter> {
        self.mana.take()
    }

    /// Apply a manual adjustment and return the new current value.
    pub fn adjust(
        &mut self,
        kind: ResourceKind,
        adjustment: ResourceAdjustment,
    ) -> Result<u32, SheetError> {
        self.get_mut(kind)
            .map(|meter| meter.apply(adjustment))
            .ok_or_else(|| SheetError::not_found("resource", kind.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_formulas() {
        let stats = BaseStats::new(3, 2, 4, 3);
        let resources = Resources::at_max(&stats);
        assert_eq!(resources.health.max(), 9);
        assert_eq!(resources.stamina.max(), 2);
        assert_eq!(resources.grit.max(), 6);
        assert!(resources.mana.is_none());
        assert_eq!(ResourceKind::Mana.maximum(&stats), 12);
    }

    #[test]
    fn test_recompute_clamps_down_only() {
        let mut meter = ResourceMeter::full(9);
        meter.set_max(6);
        assert_eq!(meter.current(), 6);
        meter.set_max(12);
        assert_eq!(meter.current(), 6);
        assert_eq!(meter.max(), 12);
    }

    #[test]
    fn test_manual_adjustments_clamp() {
        let mut meter = ResourceMeter::full(2);
        assert_eq!(meter.apply(ResourceAdjustment::Increment), 2);
        assert_eq!(meter.apply(ResourceAdjustment::Decrement), 1);
        assert_eq!(meter.apply(ResourceAdjustment::Decrement), 0);
        assert_eq!(meter.apply(ResourceAdjustment::Decrement), 0);
        assert_eq!(meter.apply(ResourceAdjustment::Reset), 2);
    }

    #[test]
    fn test_mana_lifecycle() {
        let stats = BaseStats::new(1, 1, 2, 1);
        let mut resources = Resources::at_max(&stats);
        assert!(resources
            .adjust(ResourceKind::Mana, ResourceAdjustment::Reset)
            .is_err());

        assert!(resources.unlock_mana(&stats));
        assert!(!resources.unlock_mana(&stats));
        assert_eq!(resources.mana.map(|m| m.max()), Some(6));
        assert_eq!(resources.iter().count(), 4);

        assert!(resources.remove_mana().is_some());
        assert_eq!(resources.iter().count(), 3);
    }

    #[test]
    fn test_resource_kind_parsing() {
        assert_eq!("grit".parse::<ResourceKind>().unwrap(), ResourceKind::Grit);
        assert!("luck".parse::<ResourceKind>().is_err());
    }

    proptest! {
        #[test]
        fn prop_recompute_never_raises_current(
            start in 0u32..40,
            spent in 0u32..40,
            new_max in 0u32..40,
        ) {
            let mut meter = ResourceMeter::full(start);
            for _ in 0..spent {
                meter.apply(ResourceAdjustment::Decrement);
            }
            let before = meter.current();
            meter.set_max(new_max);
            prop_assert!(meter.current() <= meter.max());
            prop_assert!(meter.current() <= before);
        }
    }
}
