//! Opening-hours rule table for the estate's areas.
//!
//! Every area has its own hours, last admission and closing weekdays. The
//! table is plain data built once at startup; every predicate here is a pure
//! function over it. Area ids are a closed enum, so a lookup can never miss.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{ParseError, RuleTableError};
use crate::facts::Language;
use crate::time::TimeOfDay;

/// Gardens close early on evenings with a night-fountain show.
pub const GARDENS_EARLY_CLOSE: TimeOfDay = TimeOfDay::hm(17, 30);

/// First departure of the Little Train towards the Trianon estate.
pub const LITTLE_TRAIN_FIRST_DEPARTURE: TimeOfDay = TimeOfDay::hm(11, 10);

/// The building whose closing day closes the paid part of the estate.
pub const PRIMARY_AREA: AreaId = AreaId::Palace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaId {
    Gardens,
    Palace,
    GrandTrianon,
    QueensHamlet,
    PetitTrianon,
    GalleryOfCoaches,
    GalleryOfSculptures,
}

impl AreaId {
    pub const ALL: [AreaId; 7] = [
        AreaId::Gardens,
        AreaId::Palace,
        AreaId::GrandTrianon,
        AreaId::QueensHamlet,
        AreaId::PetitTrianon,
        AreaId::GalleryOfCoaches,
        AreaId::GalleryOfSculptures,
    ];

    const fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AreaId::Gardens => "gardens",
            AreaId::Palace => "palace",
            AreaId::GrandTrianon => "grand_trianon",
            AreaId::QueensHamlet => "queens_hamlet",
            AreaId::PetitTrianon => "petit_trianon",
            AreaId::GalleryOfCoaches => "gallery_of_coaches",
            AreaId::GalleryOfSculptures => "gallery_of_sculptures",
        }
    }

    pub fn display_name(self, language: Language) -> &'static str {
        match (self, language) {
            (AreaId::Gardens, Language::Fr) => "Jardins – Parterres & Orangerie",
            (AreaId::Gardens, Language::En) => "Gardens – Parterres & Orangery",
            (AreaId::Palace, Language::Fr) => "Château – Incontournables (Galerie des Glaces…)",
            (AreaId::Palace, Language::En) => "Palace – Highlights (Hall of Mirrors etc.)",
            (AreaId::GrandTrianon, _) => "Grand Trianon",
            (AreaId::QueensHamlet, Language::Fr) => "Hameau de la Reine",
            (AreaId::QueensHamlet, Language::En) => "Queen's Hamlet",
            (AreaId::PetitTrianon, _) => "Petit Trianon",
            (AreaId::GalleryOfCoaches, Language::Fr) => "Galerie des Carrosses (gratuit)",
            (AreaId::GalleryOfCoaches, Language::En) => "Gallery of Coaches (free)",
            (AreaId::GalleryOfSculptures, Language::Fr) => "Galerie des Sculptures et des Moulages (gratuit)",
            (AreaId::GalleryOfSculptures, Language::En) => "Gallery of Sculptures & Mouldings (free)",
        }
    }

    /// Name handed to the geocoder when routing between areas.
    pub fn place_name(self) -> &'static str {
        match self {
            AreaId::Gardens => "Jardins du Château de Versailles, Versailles, France",
            AreaId::Palace => "Château de Versailles, Versailles, France",
            AreaId::GrandTrianon => "Grand Trianon, Versailles, France",
            AreaId::QueensHamlet => "Hameau de la Reine, Versailles, France",
            AreaId::PetitTrianon => "Petit Trianon, Versailles, France",
            AreaId::GalleryOfCoaches => "Galerie des Carrosses, Versailles, France",
            AreaId::GalleryOfSculptures => "Petite Écurie du Roi, Versailles, France",
        }
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AreaId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AreaId::ALL
            .into_iter()
            .find(|area| area.as_str() == s.trim())
            .ok_or_else(|| ParseError::UnknownArea(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
    Indoor,
    Outdoor,
}

/// Static temporal constraints for one area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaRule {
    pub area_id: AreaId,
    pub opens_at: TimeOfDay,
    pub closes_at: TimeOfDay,
    pub last_admission_at: TimeOfDay,
    pub closed_weekdays: Vec<Weekday>,
    pub default_dwell_minutes: u32,
    pub setting: Setting,
    /// Entry without a ticket.
    pub free_access: bool,
}

impl AreaRule {
    fn new(
        area_id: AreaId,
        hours: (TimeOfDay, TimeOfDay, TimeOfDay),
        closed_weekdays: &[Weekday],
        default_dwell_minutes: u32,
        setting: Setting,
        free_access: bool,
    ) -> Self {
        let (opens_at, last_admission_at, closes_at) = hours;
        Self {
            area_id,
            opens_at,
            closes_at,
            last_admission_at,
            closed_weekdays: closed_weekdays.to_vec(),
            default_dwell_minutes,
            setting,
            free_access,
        }
    }

    pub fn is_outdoor(&self) -> bool {
        self.setting == Setting::Outdoor
    }
}

/// The estate's areas, in `AreaId::ALL` order.
pub fn estate_rules() -> Vec<AreaRule> {
    use AreaId::*;
    use Setting::*;

    let palace_hours = (TimeOfDay::hm(9, 0), TimeOfDay::hm(17, 45), TimeOfDay::hm(18, 30));
    let trianon_hours = (TimeOfDay::hm(12, 0), TimeOfDay::hm(17, 45), TimeOfDay::hm(18, 30));
    let gallery_hours = (TimeOfDay::hm(9, 0), TimeOfDay::hm(18, 0), TimeOfDay::hm(18, 30));
    let gardens_hours = (TimeOfDay::hm(8, 0), TimeOfDay::hm(20, 0), TimeOfDay::hm(20, 30));
    let mondays = [Weekday::Mon];

    vec![
        AreaRule::new(Gardens, gardens_hours, &[], 35, Outdoor, false),
        AreaRule::new(Palace, palace_hours, &mondays, 60, Indoor, false),
        AreaRule::new(GrandTrianon, trianon_hours, &mondays, 40, Indoor, false),
        AreaRule::new(QueensHamlet, trianon_hours, &mondays, 35, Outdoor, false),
        AreaRule::new(PetitTrianon, trianon_hours, &mondays, 30, Indoor, false),
        AreaRule::new(GalleryOfCoaches, gallery_hours, &[], 30, Indoor, true),
        AreaRule::new(GalleryOfSculptures, gallery_hours, &[], 25, Indoor, true),
    ]
}

/// Dated exceptions to the weekly rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteCalendar {
    /// Evenings with a night-fountain show; gardens close at `GARDENS_EARLY_CLOSE`.
    pub night_fountain_dates: BTreeSet<NaiveDate>,
    /// Days when garden entry is paid (musical fountains and gardens).
    pub paid_garden_dates: BTreeSet<NaiveDate>,
}

static SHARED: LazyLock<RuleTable> = LazyLock::new(RuleTable::estate);

#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: Vec<AreaRule>,
    calendar: SiteCalendar,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::estate()
    }
}

impl RuleTable {
    /// Builds a table from arbitrary rules; every area must appear exactly once.
    pub fn new(rules: Vec<AreaRule>, calendar: SiteCalendar) -> Result<Self, RuleTableError> {
        let mut slots: Vec<Option<AreaRule>> = vec![None; AreaId::ALL.len()];
        for rule in rules {
            let area = rule.area_id;
            if !(rule.opens_at <= rule.last_admission_at && rule.last_admission_at <= rule.closes_at) {
                return Err(RuleTableError::InvalidHours(area));
            }
            let slot = &mut slots[area.index()];
            if slot.is_some() {
                return Err(RuleTableError::DuplicateArea(area));
            }
            *slot = Some(rule);
        }

        let rules = slots
            .into_iter()
            .zip(AreaId::ALL)
            .map(|(slot, area)| slot.ok_or(RuleTableError::MissingArea(area)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules, calendar })
    }

    /// The estate's table with an empty calendar.
    pub fn estate() -> Self {
        Self {
            rules: estate_rules(),
            calendar: SiteCalendar::default(),
        }
    }

    /// Process-wide table, built on first use and never mutated.
    pub fn shared() -> &'static RuleTable {
        &SHARED
    }

    pub fn with_calendar(mut self, calendar: SiteCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn calendar(&self) -> &SiteCalendar {
        &self.calendar
    }

    pub fn rule(&self, area: AreaId) -> &AreaRule {
        &self.rules[area.index()]
    }

    pub fn rules(&self) -> &[AreaRule] {
        &self.rules
    }

    /// Closing time on `date`, including dated early closures.
    pub fn closes_at(&self, area: AreaId, date: NaiveDate) -> TimeOfDay {
        let close = self.rule(area).closes_at;
        if area == AreaId::Gardens && self.calendar.night_fountain_dates.contains(&date) {
            close.min(GARDENS_EARLY_CLOSE)
        } else {
            close
        }
    }

    /// Last admission on `date`; never later than that day's closing time.
    pub fn last_admission_at(&self, area: AreaId, date: NaiveDate) -> TimeOfDay {
        self.rule(area).last_admission_at.min(self.closes_at(area, date))
    }

    /// Entering exactly at the cutoff is allowed.
    pub fn last_admission_ok(&self, area: AreaId, time: TimeOfDay) -> bool {
        time <= self.rule(area).last_admission_at
    }

    pub fn is_closed_day(&self, area: AreaId, date: NaiveDate) -> bool {
        self.rule(area).closed_weekdays.contains(&date.weekday())
    }

    pub fn is_open(&self, area: AreaId, date: NaiveDate, time: TimeOfDay) -> bool {
        let rule = self.rule(area);
        !self.is_closed_day(area, date) && rule.opens_at <= time && time <= self.closes_at(area, date)
    }

    /// Whether the primary building, and with it the paid estate, is shut all day.
    pub fn is_closure_day(&self, date: NaiveDate) -> bool {
        self.is_closed_day(PRIMARY_AREA, date)
    }

    /// Areas a visitor can still enter on a closure day: outdoor or free, not closed that weekday.
    pub fn always_open_areas(&self, date: NaiveDate) -> Vec<AreaId> {
        self.rules
            .iter()
            .filter(|rule| !self.is_closed_day(rule.area_id, date))
            .filter(|rule| rule.is_outdoor() || rule.free_access)
            .map(|rule| rule.area_id)
            .collect()
    }

    pub fn is_paid_garden_day(&self, date: NaiveDate) -> bool {
        self.calendar.paid_garden_dates.contains(&date)
    }
}

/// `RuleTable::is_open` on the shared table.
pub fn is_open(area: AreaId, date: NaiveDate, time: TimeOfDay) -> bool {
    RuleTable::shared().is_open(area, date, time)
}

/// `RuleTable::last_admission_ok` on the shared table.
pub fn last_admission_ok(area: AreaId, time: TimeOfDay) -> bool {
    RuleTable::shared().last_admission_ok(area, time)
}

/// `RuleTable::is_closed_day` on the shared table.
pub fn is_closed_day(area: AreaId, date: NaiveDate) -> bool {
    RuleTable::shared().is_closed_day(area, date)
}
