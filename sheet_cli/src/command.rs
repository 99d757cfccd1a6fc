//! Session commands, parsed from one input line each.

use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use sheet_rules::{parse_stat_choice, ResourceAdjustment, ResourceKind, SheetError, Stat};

/// A stat choice where `None` means no stat increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatChoice(pub Option<Stat>);

impl FromStr for StatChoice {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_stat_choice(s).map(StatChoice)
    }
}

#[derive(Debug, Parser)]
#[command(multicall = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Spend a point on a stat
    Allocate { stat: Stat },

    /// Refund a point from a stat
    Deallocate { stat: Stat },

    /// Lock in the stats and open the stat block
    Finalize,

    /// Set the player name
    Name {
        #[arg(num_args = 0.., trailing_var_arg = true)]
        name: Vec<String>,
    },

    /// List the predefined features
    Catalog,

    /// Attach a predefined feature
    Feature {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
        /// Stat to increase when the feature offers a choice
        #[arg(long)]
        stat: Option<Stat>,
    },

    /// Attach a custom feature
    Custom {
        #[arg(long, required = true, num_args = 1..)]
        name: Vec<String>,
        /// Might, Agility, Mind, Will or None
        #[arg(long, default_value = "Might")]
        stat: StatChoice,
        #[arg(long = "desc", num_args = 0..)]
        description: Vec<String>,
    },

    /// Detach a feature
    Remove {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Show an attached feature's bonus and description
    Describe {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Adjust a resource's current value
    Resource {
        kind: ResourceKind,
        action: ResourceAction,
    },

    /// Edit the language list
    #[command(subcommand)]
    Language(LanguageCommand),

    /// Show the character
    Show,

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum LanguageCommand {
    /// Set the text of language slot N (1-based)
    Set {
        slot: usize,
        #[arg(num_args = 0.., trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Add a language beyond the Mind-derived slots
    Add {
        #[arg(num_args = 0.., trailing_var_arg = true)]
        text: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceAction {
    Inc,
    Dec,
    Reset,
}

impl From<ResourceAction> for ResourceAdjustment {
    fn from(action: ResourceAction) -> Self {
        match action {
            ResourceAction::Inc => ResourceAdjustment::Increment,
            ResourceAction::Dec => ResourceAdjustment::Decrement,
            ResourceAction::Reset => ResourceAdjustment::Reset,
        }
    }
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse_line(line: &str) -> Result<Option<Command>, clap::Error> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return Ok(None);
        }
        Line::try_parse_from(words).map(|line| Some(line.command))
    }
}

/// Join words back into free text.
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}
