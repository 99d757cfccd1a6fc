//! Terminal session for the Flutter character sheet builder.
//!
//! The session is the presentation layer over `sheet_rules`: it reads one
//! command per line, applies it to the character, and re-renders the
//! allocation screen or stat block after every action. Rejected actions are
//! reported as notices and never end the session.

pub mod command;
pub mod config;
pub mod render;
pub mod session;

pub use command::Command;
pub use config::{CliArgs, OutputFormat, SessionConfig};
pub use session::{Flow, Session};
