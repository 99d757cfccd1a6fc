//! The interactive session: owns the character and re-renders it after every action.

use std::io::{self, BufRead, Write};

use sheet_rules::{AllocationPhase, CharacterSheet, Creation, SheetError, Stat};

use crate::command::{join_words, Command, LanguageCommand};
use crate::config::{OutputFormat, SessionConfig};
use crate::render::{render_allocation, render_catalog, render_sheet};

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

enum Reply {
    /// State changed (or was requested); re-render the character.
    Render,
    Text(String),
}

pub struct Session<W> {
    creation: Creation,
    config: SessionConfig,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(config: SessionConfig, out: W) -> Self {
        Self {
            creation: Creation::new(),
            config,
            out,
        }
    }

    pub fn creation(&self) -> &Creation {
        &self.creation
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Render the first screen, then execute lines from `input` until it ends or `quit`.
    pub fn run<R: BufRead>(&mut self, input: R) -> io::Result<()> {
        self.render()?;
        for line in input.lines() {
            if self.execute_line(&line?)? == Flow::Quit {
                break;
            }
        }
        self.out.flush()
    }

    /// Parse and execute one input line. Parse errors and help are printed, not returned.
    pub fn execute_line(&mut self, line: &str) -> io::Result<Flow> {
        match Command::parse_line(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Ok(Flow::Continue),
            Err(err) => {
                writeln!(self.out, "{}", err.render())?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> io::Result<Flow> {
        if command == Command::Quit {
            return Ok(Flow::Quit);
        }

        match self.apply(command) {
            Ok(Reply::Render) => self.render()?,
            Ok(Reply::Text(text)) => writeln!(self.out, "{text}")?,
            Err(err) => {
                tracing::info!(kind = ?err.kind(), %err, "action rejected");
                writeln!(self.out, "[{}] {err}", err.kind().title())?;
            }
        }
        Ok(Flow::Continue)
    }

    fn apply(&mut self, command: Command) -> Result<Reply, SheetError> {
        match command {
            Command::Allocate { stat } => self.allocate(stat, 1),
            Command::Deallocate { stat } => self.allocate(stat, -1),
            Command::Finalize => {
                self.creation.finalize(self.config.registry.clone())?;
                if let Some(player) = self.config.player.clone() {
                    self.sheet_mut()?.set_player_name(&player);
                }
                Ok(Reply::Render)
            }
            Command::Name { name } => {
                self.sheet_mut()?.set_player_name(&join_words(&name));
                Ok(Reply::Render)
            }
            Command::Catalog => Ok(Reply::Text(render_catalog(&self.config.registry))),
            Command::Feature { name, stat } => {
                self.sheet_mut()?.attach_feature(&join_words(&name), stat)?;
                Ok(Reply::Render)
            }
            Command::Custom {
                name,
                stat,
                description,
            } => {
                self.sheet_mut()?.attach_custom_feature(
                    &join_words(&name),
                    stat.0,
                    &join_words(&description),
                )?;
                Ok(Reply::Render)
            }
            Command::Remove { name } => {
                self.sheet_mut()?.detach_feature(&join_words(&name))?;
                Ok(Reply::Render)
            }
            Command::Describe { name } => {
                let sheet = self.sheet_mut()?;
                let name = join_words(&name);
                let text = sheet.describe_feature(&name)?;
                let title = sheet
                    .features()
                    .get(&name)
                    .map(|feature| feature.name.clone())
                    .unwrap_or(name);
                Ok(Reply::Text(format!("Feature: {title}\n{text}")))
            }
            Command::Resource { kind, action } => {
                self.sheet_mut()?.adjust_resource(kind, action.into())?;
                Ok(Reply::Render)
            }
            Command::Language(LanguageCommand::Set { slot, text }) => {
                let index = slot
                    .checked_sub(1)
                    .ok_or_else(|| SheetError::not_found("language slot", slot.to_string()))?;
                self.sheet_mut()?.set_language(index, &join_words(&text))?;
                Ok(Reply::Render)
            }
            Command::Language(LanguageCommand::Add { text }) => {
                self.sheet_mut()?.add_language_override(&join_words(&text))?;
                Ok(Reply::Render)
            }
            Command::Show => Ok(Reply::Render),
            Command::Quit => Ok(Reply::Text(String::new())),
        }
    }

    fn allocate(&mut self, stat: Stat, delta: i32) -> Result<Reply, SheetError> {
        let Some(allocation) = self.creation.allocation() else {
            return Err(SheetError::validation("stats are already finalized"));
        };
        let reason = if delta > 0 {
            "no points left to spend".to_string()
        } else {
            format!("{stat} cannot go below {}", allocation.stats().get(stat))
        };
        if self.creation.allocate(stat, delta) {
            Ok(Reply::Render)
        } else {
            Err(SheetError::validation(reason))
        }
    }

    fn sheet_mut(&mut self) -> Result<&mut CharacterSheet, SheetError> {
        self.creation
            .sheet_mut()
            .ok_or_else(|| SheetError::validation("finalize the stats first"))
    }

    fn render(&mut self) -> io::Result<()> {
        let text = match &mut self.creation {
            Creation::Allocating(allocation) => match self.config.format {
                OutputFormat::Text => render_allocation(allocation),
                OutputFormat::Json => serde_json::to_string_pretty(allocation)?,
            },
            Creation::Finalized(sheet) => {
                for event in sheet.drain_events() {
                    tracing::debug!(id = %sheet.id(), ?event, "sheet event");
                }
                match self.config.format {
                    OutputFormat::Text => render_sheet(sheet),
                    OutputFormat::Json => serde_json::to_string_pretty(&**sheet)?,
                }
            }
        };
        writeln!(self.out, "{text}")
    }

    /// The current phase of the wizard.
    pub fn phase(&self) -> AllocationPhase {
        self.creation.phase()
    }
}
