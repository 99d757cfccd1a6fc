//! Base stats and the point-allocation phase.

mod allocation;

pub use allocation::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SheetError;

/// Lowest value a base stat may hold.
pub const STAT_FLOOR: i32 = 1;

/// The four base stats every character has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stat {
    Might,
    Agility,
    Mind,
    Will,
}

impl Stat {
    /// All stats in display order.
    pub const ALL: [Stat; 4] = [Stat::Might, Stat::Agility, Stat::Mind, Stat::Will];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Might => "Might",
            Stat::Agility => "Agility",
            Stat::Mind => "Mind",
            Stat::Will => "Will",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stat {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Stat::ALL
            .into_iter()
            .find(|stat| stat.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SheetError::input(format!("'{wanted}' is not a stat")))
    }
}

/// Parse a stat choice where "None" means no stat increase.
pub fn parse_stat_choice(s: &str) -> Result<Option<Stat>, SheetError> {
    if s.trim().eq_ignore_ascii_case("none") {
        Ok(None)
    } else {
        s.parse().map(Some)
    }
}

/// Base stat values for a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub might: i32,
    pub agility: i32,
    pub mind: i32,
    pub will: i32,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            might: STAT_FLOOR,
            agility: STAT_FLOOR,
            mind: STAT_FLOOR,
            will: STAT_FLOOR,
        }
    }
}

impl BaseStats {
    pub fn new(might: i32, agility: i32, mind: i32, will: i32) -> Self {
        Self {
            might,
            agility,
            mind,
            will,
        }
    }

    /// Value of a single stat.
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Might => self.might,
            Stat::Agility => self.agility,
            Stat::Mind => self.mind,
            Stat::Will => self.will,
        }
    }

    fn get_mut(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Might => &mut self.might,
            Stat::Agility => &mut self.agility,
            Stat::Mind => &mut self.mind,
            Stat::Will => &mut self.will,
        }
    }

    /// Iterate `(stat, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        Stat::ALL.into_iter().map(move |stat| (stat, self.get(stat)))
    }

    /// Points spent above the per-stat floor.
    pub fn points_above_floor(&self) -> u32 {
        self.iter()
            .map(|(_, value)| (value - STAT_FLOOR).max(0) as u32)
            .sum()
    }

    /// Change a stat outside the point budget, as feature attach/detach does.
    ///
    /// Decrements never take a stat below [`STAT_FLOOR`]; the value actually
    /// applied is returned.
    pub fn adjust(&mut self, stat: Stat, delta: i32) -> i32 {
        let value = self.get_mut(stat);
        let target = *value + delta;
        let clamped = if delta < 0 { target.max(STAT_FLOOR) } else { target };
        if clamped != target {
            tracing::warn!(%stat, current = *value, delta, "stat already at floor, clamping");
        }
        let applied = clamped - *value;
        *value = clamped;
        applied
    }
}
