//! Command-line configuration for the sheet session.

use std::path::{Path, PathBuf};

use clap::Parser;
use sheet_rules::{CatalogError, FeatureRegistry};
use thiserror::Error;

/// Build a Flutter character sheet interactively.
///
/// Commands are read one per line from stdin; type `help` for the list.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "sheet")]
#[command(about = "Interactive Flutter character sheet builder", long_about = None)]
#[command(version)]
pub struct CliArgs {
    /// TOML file with extra feature definitions to add to the built-in catalog
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Player name to set once the stat block is created
    #[arg(long)]
    pub player: Option<String>,

    /// Render the character as JSON instead of a text sheet
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// How the character is rendered after each action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Everything a session needs to start.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub registry: FeatureRegistry,
    pub player: Option<String>,
    pub format: OutputFormat,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            registry: FeatureRegistry::builtin(),
            player: None,
            format: OutputFormat::Text,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read feature catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid feature catalog {path}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },
}

impl SessionConfig {
    /// Resolve the session configuration from parsed arguments.
    pub fn from_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut registry = FeatureRegistry::builtin();
        if let Some(path) = &args.catalog {
            load_catalog(&mut registry, path)?;
        }

        Ok(Self {
            registry,
            player: args.player.clone(),
            format: if args.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
        })
    }
}

fn load_catalog(registry: &mut FeatureRegistry, path: &Path) -> Result<(), ConfigError> {
    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let added = registry
        .extend_from_toml_str(&source)
        .map_err(|source| ConfigError::Catalog {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(path = %path.display(), added, "loaded feature catalog");
    Ok(())
}
