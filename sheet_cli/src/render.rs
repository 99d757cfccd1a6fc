//! Text rendering of the allocation screen, the stat block, and the catalog.

use std::fmt::Write;

use sheet_rules::{
    CharacterSheet, FeatureRegistry, SpecialEffect, StatAllocation, StatIncrease,
};

const LABEL_WIDTH: usize = 10;

pub fn render_allocation(allocation: &StatAllocation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Allocate Your Stats");
    let _ = writeln!(out, "Points Left: {}", allocation.remaining());
    for (stat, value) in allocation.stats().iter() {
        let _ = writeln!(out, "  {:<LABEL_WIDTH$}{value}", format!("{stat}:"));
    }
    out
}

pub fn render_sheet(sheet: &CharacterSheet) -> String {
    let mut out = String::new();
    let name = if sheet.player_name().is_empty() {
        "(unnamed)"
    } else {
        sheet.player_name()
    };
    let _ = writeln!(out, "Player Name: {name}");

    for (stat, value) in sheet.stats().iter() {
        let _ = writeln!(out, "  {:<LABEL_WIDTH$}{value}", format!("{stat}:"));
    }

    let _ = writeln!(out);
    for (kind, meter) in sheet.resources().iter() {
        let _ = writeln!(
            out,
            "  {:<LABEL_WIDTH$}{}/{}",
            format!("{kind}:"),
            meter.current(),
            meter.max()
        );
    }

    let languages = sheet.languages();
    let _ = writeln!(out);
    let _ = writeln!(out, "Languages (up to {}):", languages.capacity());
    for (index, entry) in languages.entries().iter().enumerate() {
        let marker = if entry.read_only { " (granted)" } else { "" };
        let _ = writeln!(out, "  {}. {}{marker}", index + 1, entry.text);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Features:");
    if sheet.features().is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for feature in sheet.features().iter() {
        let _ = writeln!(out, "  {:<24}{}", feature.name, feature.bonus_label());
    }
    out
}

pub fn render_catalog(registry: &FeatureRegistry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Predefined Features:");
    for definition in registry.iter() {
        let choices = definition
            .allowed_stat_choices()
            .iter()
            .map(|stat| stat.as_str())
            .collect::<Vec<_>>();
        let bonus = match &definition.stat_increase {
            StatIncrease::Fixed(stat) => format!("+1 {stat}"),
            StatIncrease::ChooseOne(_) => format!("+1 one of {}", choices.join("/")),
            StatIncrease::GrantAll(_) => format!("+1 each of {}", choices.join("/")),
        };
        let special = match &definition.special {
            Some(SpecialEffect::UnlockMana) => ", unlocks Mana".to_string(),
            Some(SpecialEffect::GrantLanguage(language)) => format!(", grants {language}"),
            None => String::new(),
        };
        let _ = writeln!(out, "  {:<24}{bonus}{special}", definition.name);
    }
    out
}
