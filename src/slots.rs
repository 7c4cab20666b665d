//! Missing-information tracking for the planning dialogue.
//!
//! Facts arrive over several conversation turns. `PartialFacts` holds what is
//! known so far; `missing_fields` and `is_ready` decide whether the planner
//! can run or which question to ask next.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::facts::{
    BudgetLevel, DEFAULT_DURATION_MINUTES, Language, PartyType, TicketType, TripFacts, validate_duration,
};
use crate::time::TimeOfDay;

/// A fact the dialogue may still need to ask for, in asking priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactField {
    Date,
    StartTime,
    Duration,
    PartyType,
    Budget,
}

impl FactField {
    pub const PRIORITY: [FactField; 5] = [
        FactField::Date,
        FactField::StartTime,
        FactField::Duration,
        FactField::PartyType,
        FactField::Budget,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FactField::Date => "date",
            FactField::StartTime => "start_time",
            FactField::Duration => "duration",
            FactField::PartyType => "party_type",
            FactField::Budget => "budget",
        }
    }
}

impl fmt::Display for FactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facts collected so far in a conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialFacts {
    pub date: Option<NaiveDate>,
    pub start_time: Option<TimeOfDay>,
    pub duration_minutes: Option<u32>,
    pub party_type: Option<PartyType>,
    pub budget_level: Option<BudgetLevel>,
    pub ticket: Option<TicketType>,
    pub palace_entry: Option<TimeOfDay>,
    #[serde(default)]
    pub notes: String,
    pub language: Option<Language>,
    /// The visitor said they do not want to give more details.
    #[serde(default)]
    pub declined_more: bool,
}

impl PartialFacts {
    fn has(&self, field: FactField) -> bool {
        match field {
            FactField::Date => self.date.is_some(),
            FactField::StartTime => self.start_time.is_some(),
            FactField::Duration => self.duration_minutes.is_some(),
            FactField::PartyType => self.party_type.is_some(),
            FactField::Budget => self.budget_level.is_some(),
        }
    }

    /// Folds a later turn's facts into these. Values present in `update` win;
    /// notes are appended and a decline is sticky.
    pub fn merge(&mut self, update: PartialFacts) {
        self.date = update.date.or(self.date);
        self.start_time = update.start_time.or(self.start_time);
        self.duration_minutes = update.duration_minutes.or(self.duration_minutes);
        self.party_type = update.party_type.or(self.party_type.take());
        self.budget_level = update.budget_level.or(self.budget_level);
        self.ticket = update.ticket.or(self.ticket);
        self.palace_entry = update.palace_entry.or(self.palace_entry);
        let notes = update.notes.trim();
        if !notes.is_empty() {
            if !self.notes.is_empty() {
                self.notes.push(' ');
            }
            self.notes.push_str(notes);
        }
        self.language = update.language.or(self.language);
        self.declined_more |= update.declined_more;
    }

    /// Builds the planning request; absent fields take their defaults.
    pub fn to_trip_facts(&self) -> Result<TripFacts, PlanError> {
        let duration_minutes = self.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
        validate_duration(duration_minutes)?;
        Ok(TripFacts {
            date: self.date,
            start_time: self.start_time,
            duration_minutes,
            party_type: self.party_type.clone(),
            budget_level: self.budget_level,
            ticket: self.ticket.unwrap_or_default(),
            palace_entry: self.palace_entry,
            notes: self.notes.clone(),
            language: self.language.unwrap_or_default(),
        })
    }
}

/// Fields still unknown, always in `FactField::PRIORITY` order.
pub fn missing_fields(facts: &PartialFacts) -> Vec<FactField> {
    FactField::PRIORITY
        .into_iter()
        .filter(|field| !facts.has(*field))
        .collect()
}

/// Whether enough is known to plan.
///
/// True with every field present, with date, start time and duration plus one
/// of party type or budget, or once the visitor declined to say more.
pub fn is_ready(facts: &PartialFacts) -> bool {
    if facts.declined_more {
        return true;
    }
    let core = facts.has(FactField::Date) && facts.has(FactField::StartTime) && facts.has(FactField::Duration);
    core && (facts.has(FactField::PartyType) || facts.has(FactField::Budget))
}
