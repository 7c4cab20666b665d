//! Trip facts: the planning request the scheduler works from.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::time::TimeOfDay;

pub const MIN_DURATION_MINUTES: u32 = 30;
pub const MAX_DURATION_MINUTES: u32 = 1440;
pub const DEFAULT_DURATION_MINUTES: u32 = 180;

/// Language used for every user-visible string the planner emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

/// Who is visiting, as classified from free-form input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyType {
    Family,
    Solo,
    Couple,
    Friends,
    Group,
    Other(String),
}

impl PartyType {
    /// Classifies free text ("en famille", "solo", "with friends", ...).
    pub fn from_free_text(text: &str) -> Self {
        let lower = text.trim().to_lowercase();
        let has = |keys: &[&str]| keys.iter().any(|k| lower.contains(*k));
        if has(&["famil", "child", "kid", "enfant"]) {
            PartyType::Family
        } else if has(&["solo", "alone", "seul"]) {
            PartyType::Solo
        } else if has(&["couple", "partner", "conjoint"]) {
            PartyType::Couple
        } else if has(&["friend", "ami"]) {
            PartyType::Friends
        } else if has(&["group", "groupe", "school", "scolaire"]) {
            PartyType::Group
        } else {
            PartyType::Other(text.trim().to_string())
        }
    }
}

impl fmt::Display for PartyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartyType::Family => f.write_str("family"),
            PartyType::Solo => f.write_str("solo"),
            PartyType::Couple => f.write_str("couple"),
            PartyType::Friends => f.write_str("friends"),
            PartyType::Group => f.write_str("group"),
            PartyType::Other(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetLevel {
    Low,
    Standard,
    Premium,
}

impl BudgetLevel {
    pub fn from_free_text(text: &str) -> Self {
        let lower = text.trim().to_lowercase();
        let has = |keys: &[&str]| keys.iter().any(|k| lower.contains(*k));
        if has(&["low", "cheap", "économique", "economique", "pas cher", "petit", "serré", "tight", "gratuit"]) {
            BudgetLevel::Low
        } else if has(&["premium", "high", "luxe", "vip", "élevé", "eleve", "unlimited"]) {
            BudgetLevel::Premium
        } else {
            BudgetLevel::Standard
        }
    }
}

/// Ticket the visitor holds or intends to buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketType {
    #[default]
    Standard,
    /// Combined pass: palace (timed entry), Trianon estate and gardens.
    Passport,
}

/// The planning request. Built once per request and not mutated while scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripFacts {
    /// Visit date; `None` means the scheduler's reference date (today).
    pub date: Option<NaiveDate>,
    /// Arrival time; `None` means the scheduler's default start.
    pub start_time: Option<TimeOfDay>,
    pub duration_minutes: u32,
    pub party_type: Option<PartyType>,
    pub budget_level: Option<BudgetLevel>,
    pub ticket: TicketType,
    /// Timed palace entry printed on the ticket, if any.
    pub palace_entry: Option<TimeOfDay>,
    /// Free-text preferences as the visitor wrote them.
    pub notes: String,
    pub language: Language,
}

impl Default for TripFacts {
    fn default() -> Self {
        Self {
            date: None,
            start_time: None,
            duration_minutes: DEFAULT_DURATION_MINUTES,
            party_type: None,
            budget_level: None,
            ticket: TicketType::Standard,
            palace_entry: None,
            notes: String::new(),
            language: Language::default(),
        }
    }
}

impl TripFacts {
    /// Rejects durations outside `[MIN_DURATION_MINUTES, MAX_DURATION_MINUTES]`.
    pub fn validate(&self) -> Result<(), PlanError> {
        validate_duration(self.duration_minutes)
    }

    /// Signals derived from the structured fields and the free-text notes.
    pub fn preferences(&self) -> Preferences {
        let mut prefs = Preferences::from_notes(&self.notes);
        if self.party_type == Some(PartyType::Family) {
            prefs.family = true;
        }
        if self.budget_level == Some(BudgetLevel::Low) {
            prefs.low_budget = true;
        }
        if self.ticket == TicketType::Passport {
            prefs.passport = true;
        }
        if self.palace_entry.is_some() {
            prefs.palace_entry = self.palace_entry;
        }
        prefs
    }
}

pub fn validate_duration(minutes: u32) -> Result<(), PlanError> {
    if (MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
        Ok(())
    } else {
        Err(PlanError::DurationOutOfRange(minutes))
    }
}

/// Boolean preference signals read from the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub family: bool,
    pub low_budget: bool,
    pub stroller: bool,
    pub passport: bool,
    pub palace_entry: Option<TimeOfDay>,
}

impl Preferences {
    /// Keyword scan over free text, French and English.
    pub fn from_notes(notes: &str) -> Self {
        let q = notes.to_lowercase();
        let has = |keys: &[&str]| keys.iter().any(|k| q.contains(*k));
        Self {
            family: has(&["child", "kids", "enfant", "famille", "family"]),
            low_budget: has(&["budget", "cheap", "économique", "pas cher"]),
            stroller: has(&["stroller", "poussette"]),
            passport: has(&["passeport", "passport"]),
            palace_entry: entry_slot(&q),
        }
    }
}

/// Finds a timed entry such as "entry 15:00", "entrée à 15h" or "slot 12h30".
fn entry_slot(lower: &str) -> Option<TimeOfDay> {
    for marker in ["entry", "entrée", "entree", "slot", "créneau", "creneau"] {
        let Some(pos) = lower.find(marker) else {
            continue;
        };
        let rest = &lower[pos + marker.len()..];
        let candidate: String = rest
            .trim_start_matches(|c: char| c.is_whitespace() || c == ':' || c == 'à' || c == 'a' || c == 't')
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == ':' || *c == 'h')
            .collect();
        if candidate.is_empty() {
            continue;
        }
        if let Ok(time) = TimeOfDay::parse_loose(&candidate) {
            return Some(time);
        }
    }
    None
}
