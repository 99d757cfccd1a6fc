//! Point-budget allocation during character creation.

use serde::{Deserialize, Serialize};

use super::{BaseStats, Stat, STAT_FLOOR};
use crate::error::SheetError;

/// Points a new character distributes above the per-stat floor.
pub const TOTAL_POINTS: u32 = 8;

/// Phases of character creation. The only transition is `Allocating -> Finalized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AllocationPhase {
    #[default]
    Allocating,
    Finalized,
}

/// The allocation point pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointBudget {
    pub total: u32,
    pub remaining: u32,
}

impl Default for PointBudget {
    fn default() -> Self {
        Self {
            total: TOTAL_POINTS,
            remaining: TOTAL_POINTS,
        }
    }
}

/// Stats under allocation, before the character is finalized.
///
/// Invariant: `budget.remaining + stats.points_above_floor() == budget.total`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatAllocation {
    stats: BaseStats,
    budget: PointBudget,
}

impl StatAllocation {
    /// Start with every stat at the floor and the full budget unspent.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &BaseStats {
        &self.stats
    }

    pub fn budget(&self) -> PointBudget {
        self.budget
    }

    pub fn remaining(&self) -> u32 {
        self.budget.remaining
    }

    /// Spend (`+1`) or refund (`-1`) a point on `stat`.
    ///
    /// Returns `false` and changes nothing when the budget is empty, the stat is
    /// already at the floor, or `delta` is not `±1`.
    pub fn allocate(&mut self, stat: Stat, delta: i32) -> bool {
        let accepted = match delta {
            1 if self.budget.remaining > 0 => {
                self.budget.remaining -= 1;
                self.stats.adjust(stat, 1);
                true
            }
            -1 if self.stats.get(stat) > STAT_FLOOR => {
                self.budget.remaining += 1;
                self.stats.adjust(stat, -1);
                true
            }
            _ => false,
        };

        if accepted {
            tracing::debug!(%stat, delta, remaining = self.budget.remaining, "allocated stat point");
        }
        accepted
    }

    /// Lock in the base stats. Fails while any point is unspent.
    pub fn finalize(&self) -> Result<BaseStats, SheetError> {
        if self.budget.remaining != 0 {
            return Err(SheetError::validation(format!(
                "please allocate all stat points before proceeding ({} left)",
                self.budget.remaining
            )));
        }
        Ok(self.stats)
    }
}
