use std::collections::HashSet;
use std::fmt;

use crate::data::army::ARMY_MAX_SIZE;
use crate::data::loader::GameData;
use crate::data::monster::{split_leveled_name, AbilityKind, Rarity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    /// One line per error, "context: message".
    pub fn summary(&self) -> String {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == ValidationSeverity::Error)
            .map(|diag| format!("{}: {}", diag.context, diag.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Check bootstrap data before any catalog is built from it.
pub fn validate_game_data(data: &GameData) -> ValidationReport {
    let mut report = ValidationReport::default();

    if data.monsters.is_empty() {
        report.push(ValidationSeverity::Error, "monsters", "monster roster is empty");
    }
    if data.quests.is_empty() {
        report.push(ValidationSeverity::Error, "quests", "quest table is empty");
    }

    let mut seen = HashSet::new();
    for (index, entry) in data.monsters.iter().enumerate() {
        let context = format!("monsters[{index}] name='{}'", entry.name);
        if entry.name.trim().is_empty() {
            report.push(ValidationSeverity::Error, context.clone(), "missing non-empty 'name'");
        }
        if !seen.insert(entry.name.as_str()) {
            report.push(ValidationSeverity::Error, context.clone(), "duplicate name");
        }
        check_stats(&mut report, &context, entry.hp, entry.damage);
        if entry.cost < 0 {
            report.push(ValidationSeverity::Error, context, "cost must not be negative");
        }
    }

    let mut hero_names = HashSet::new();
    for (index, entry) in data.heroes.iter().enumerate() {
        let context = format!("heroes[{index}] name='{}'", entry.name);
        if entry.name.trim().is_empty() {
            report.push(ValidationSeverity::Error, context.clone(), "missing non-empty 'name'");
        }
        if !hero_names.insert(entry.name.as_str()) || seen.contains(entry.name.as_str()) {
            report.push(ValidationSeverity::Error, context.clone(), "duplicate name");
        }
        check_stats(&mut report, &context, entry.hp, entry.damage);
        if entry.rarity == Rarity::NoHero {
            report.push(ValidationSeverity::Error, context.clone(), "hero needs a rarity");
        }
        if entry.ability.kind == AbilityKind::Nothing {
            report.push(ValidationSeverity::Warning, context, "hero has no ability");
        }
    }

    for (index, names) in data.quests.iter().enumerate() {
        let context = format!("quests[{index}]");
        if names.is_empty() {
            report.push(ValidationSeverity::Error, context.clone(), "quest lineup is empty");
        }
        if names.len() > ARMY_MAX_SIZE {
            report.push(
                ValidationSeverity::Error,
                context.clone(),
                format!("lineup has {} monsters, at most {ARMY_MAX_SIZE} allowed", names.len()),
            );
        }
        for name in names {
            if !resolvable(name, &seen, &hero_names) {
                report.push(
                    ValidationSeverity::Error,
                    context.clone(),
                    format!("unknown monster '{name}'"),
                );
            }
        }
    }

    report
}

fn check_stats(report: &mut ValidationReport, context: &str, hp: i32, damage: i32) {
    if hp <= 0 {
        report.push(ValidationSeverity::Error, context, "hp must be positive");
    }
    if damage < 0 {
        report.push(ValidationSeverity::Error, context, "damage must not be negative");
    }
}

fn resolvable(name: &str, monsters: &HashSet<&str>, heroes: &HashSet<&str>) -> bool {
    if monsters.contains(name) {
        return true;
    }
    match split_leveled_name(name) {
        (base, Some(level)) => level > 0 && heroes.contains(base),
        _ => false,
    }
}
