//! Features: the predefined catalog and the features attached to a character.
//!
//! - **registry**: named feature definitions, built in or loaded from TOML
//! - **ledger**: the ordered features currently attached to a character

mod catalog;
mod ledger;
mod registry;

pub use ledger::*;
pub use registry::*;
