//! # Sheet Rules
//!
//! The rules crate for the Flutter character sheet builder - base stats and the
//! point budget, derived resources, the feature catalog and ledger, and language
//! slots. This crate is the single source of truth for a character and performs
//! no I/O; presentation layers drive it and drain its [`SheetEvent`]s.
//!
//! ## Lifecycle
//!
//! - **Allocating**: a [`StatAllocation`] distributes the point budget across the
//!   four base stats.
//! - **Finalized**: once every point is spent, [`Creation::finalize`] produces a
//!   [`CharacterSheet`] whose stats only change through attached features.

pub mod character;
pub mod error;
pub mod events;
pub mod features;
pub mod languages;
pub mod resources;
pub mod stats;

pub use character::*;
pub use error::*;
pub use events::*;
pub use features::*;
pub use languages::*;
pub use resources::*;
pub use stats::*;
