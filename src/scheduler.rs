//! Itinerary scheduler (rule-driven, deterministic).
//!
//! Given trip facts and a weather signal, produces a time-ordered list of
//! stops that respects every area's opening hours, last admission and closing
//! days. The walk keeps a single minute cursor that only moves forward, so
//! stop start times are non-decreasing by construction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::PlanError;
use crate::facts::{Language, Preferences, TripFacts};
use crate::messages;
use crate::rules::{AreaId, LITTLE_TRAIN_FIRST_DEPARTURE, RuleTable};
use crate::time::TimeOfDay;
use crate::weather::{WeatherLabel, WeatherSignal};

/// Entry slots at or after this time put the Trianon estate before the palace.
pub const LATE_ENTRY_FROM: TimeOfDay = TimeOfDay::hm(15, 0);

/// Entry slots inside this window keep the palace early and Trianon last.
pub const MIDDAY_ENTRY_WINDOW: (TimeOfDay, TimeOfDay) = (TimeOfDay::hm(12, 30), TimeOfDay::hm(14, 30));

#[derive(Debug, Clone)]
pub struct ScheduleOptions {
    /// Date used when the facts carry none.
    pub reference_date: NaiveDate,
    /// Start used when the facts carry none.
    pub default_start: TimeOfDay,
    /// Minutes cut from outdoor stops under a heat precaution.
    pub heat_dwell_reduction_minutes: u32,
    /// Outdoor stops shorter than this are left alone under a heat precaution.
    pub heat_reduction_min_dwell: u32,
    /// Walking time inserted between consecutive stops.
    pub transfer_minutes: u32,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            reference_date: chrono::Local::now().date_naive(),
            default_start: TimeOfDay::hm(14, 0),
            heat_dwell_reduction_minutes: 10,
            heat_reduction_min_dwell: 25,
            transfer_minutes: 0,
        }
    }
}

/// Area ordering policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitOrder {
    /// Gardens, then the palace, then the Trianon estate.
    GardensFirst,
    /// Combined pass with a late palace slot: gardens, Trianon, then the palace.
    LateEntry,
    /// Combined pass with a midday palace slot: gardens, palace, Trianon at the end of the day.
    MiddayEntry,
    /// Primary building closed: only always-open areas.
    ClosureDay,
}

const TRIANON_BLOCK: [AreaId; 3] = [AreaId::GrandTrianon, AreaId::QueensHamlet, AreaId::PetitTrianon];

impl VisitOrder {
    /// Picks the ordering from the ticket signals.
    pub fn select(prefs: &Preferences) -> Self {
        let Some(entry) = prefs.palace_entry.filter(|_| prefs.passport) else {
            return VisitOrder::GardensFirst;
        };
        let (midday_from, midday_to) = MIDDAY_ENTRY_WINDOW;
        if entry >= LATE_ENTRY_FROM {
            VisitOrder::LateEntry
        } else if midday_from <= entry && entry <= midday_to {
            VisitOrder::MiddayEntry
        } else {
            VisitOrder::GardensFirst
        }
    }

    /// Areas in visiting order. Empty for `ClosureDay`, whose list comes from the rule table.
    pub fn areas(self) -> Vec<AreaId> {
        let mut areas = vec![AreaId::Gardens];
        match self {
            VisitOrder::GardensFirst | VisitOrder::MiddayEntry => {
                areas.push(AreaId::Palace);
                areas.extend(TRIANON_BLOCK);
            }
            VisitOrder::LateEntry => {
                areas.extend(TRIANON_BLOCK);
                areas.push(AreaId::Palace);
            }
            VisitOrder::ClosureDay => return Vec::new(),
        }
        areas
    }
}

/// One itinerary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    pub area_id: AreaId,
    pub window_start: TimeOfDay,
    pub window_end: TimeOfDay,
    pub transport_hint: Option<String>,
    pub notes: Option<String>,
}

impl Stop {
    pub fn dwell_minutes(&self) -> u32 {
        self.window_end.minutes() - self.window_start.minutes()
    }

    pub fn display_name(&self, language: Language) -> &'static str {
        self.area_id.display_name(language)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketLine {
    pub name: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub visit_order: VisitOrder,
    pub stops: Vec<Stop>,
    pub warnings: Vec<String>,
    pub alternatives: Vec<String>,
    pub tickets: Vec<TicketLine>,
    pub summary: String,
}

/// A stop before it is placed on the clock.
#[derive(Debug, Clone)]
struct PlannedStop {
    area: AreaId,
    dwell: u32,
    notes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    ClosedDay,
    OutOfTime,
}

/// Mutable state of one schedule walk.
struct Walk<'a> {
    rules: &'a RuleTable,
    date: NaiveDate,
    cursor: u32,
    end: u32,
    transfer: u32,
    stops: Vec<Stop>,
}

impl Walk<'_> {
    fn has_time_left(&self) -> bool {
        self.cursor < self.end
    }

    fn contains(&self, area: AreaId) -> bool {
        self.stops.iter().any(|stop| stop.area_id == area)
    }

    /// Places a stop at the earliest admissible time, clipped to the area's closing time.
    fn place(
        &mut self,
        planned: &PlannedStop,
        anchor: Option<TimeOfDay>,
        transport_hint: Option<String>,
    ) -> Result<(), Skip> {
        let area = planned.area;
        if self.rules.is_closed_day(area, self.date) {
            return Err(Skip::ClosedDay);
        }

        let rule = self.rules.rule(area);
        let mut start = self.cursor.max(rule.opens_at.minutes());
        if let Some(anchor) = anchor {
            start = start.max(anchor.minutes());
        }
        if start >= self.end || start > self.rules.last_admission_at(area, self.date).minutes() {
            return Err(Skip::OutOfTime);
        }

        let close = self.rules.closes_at(area, self.date).minutes();
        let end = (start + planned.dwell).min(close);
        if end <= start {
            return Err(Skip::OutOfTime);
        }

        let notes = (!planned.notes.is_empty()).then(|| planned.notes.join(" "));
        self.stops.push(Stop {
            area_id: area,
            window_start: clock(start),
            window_end: clock(end),
            transport_hint,
            notes,
        });
        self.cursor = end + self.transfer;
        Ok(())
    }
}

fn clock(minutes: u32) -> TimeOfDay {
    TimeOfDay::from_minutes(minutes).unwrap_or(TimeOfDay::LAST_MINUTE)
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    rules: RuleTable,
    options: ScheduleOptions,
}

impl Scheduler {
    pub fn new(rules: RuleTable, options: ScheduleOptions) -> Self {
        Self { rules, options }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn options(&self) -> &ScheduleOptions {
        &self.options
    }

    /// Resolves the date the facts refer to.
    pub fn visit_date(&self, facts: &TripFacts) -> NaiveDate {
        facts.date.unwrap_or(self.options.reference_date)
    }

    /// Resolves the start time the facts refer to.
    pub fn start_time(&self, facts: &TripFacts) -> TimeOfDay {
        facts.start_time.unwrap_or(self.options.default_start)
    }

    pub fn schedule(&self, facts: &TripFacts, weather: &WeatherSignal) -> Result<ScheduleResult, PlanError> {
        facts.validate()?;

        let date = self.visit_date(facts);
        let start = self.start_time(facts);
        let language = facts.language;
        let mut walk = Walk {
            rules: &self.rules,
            date,
            cursor: start.minutes(),
            end: start.minutes() + facts.duration_minutes,
            transfer: self.options.transfer_minutes,
            stops: Vec::new(),
        };

        if self.rules.is_closure_day(date) {
            return Ok(self.schedule_closure_day(walk, start, language));
        }

        let prefs = facts.preferences();
        let visit_order = VisitOrder::select(&prefs);
        let mut warnings = Vec::new();

        let mut areas = visit_order.areas();
        if weather.prefer_indoor {
            // Stable partition: indoor areas keep their relative order.
            areas.sort_by_key(|area| self.rules.rule(*area).is_outdoor());
        }

        let (planned, pruned) = self.adjust_for_weather(&areas, visit_order, weather, &prefs, language);
        if pruned {
            warnings.push(messages::outdoor_pruned_warning(language).to_string());
        }

        for stop in &planned {
            let anchor = (stop.area == AreaId::Palace).then_some(prefs.palace_entry).flatten();
            let earliest = walk.cursor.max(self.rules.rule(stop.area).opens_at.minutes());
            let hint = (stop.area == AreaId::GrandTrianon
                && earliest >= LITTLE_TRAIN_FIRST_DEPARTURE.minutes())
            .then(|| messages::little_train_hint(language).to_string());

            match walk.place(stop, anchor, hint) {
                Ok(()) => debug!(area = %stop.area, cursor = walk.cursor, "stop placed"),
                Err(Skip::ClosedDay) => {
                    debug!(area = %stop.area, "area closed on visit date");
                    warnings.push(messages::area_closed_warning(stop.area, language));
                }
                Err(Skip::OutOfTime) => {
                    debug!(area = %stop.area, cursor = walk.cursor, end = walk.end, "stop skipped");
                    warnings.push(messages::area_skipped_warning(stop.area, language));
                }
            }
        }

        let mut extras = Vec::new();
        if prefs.family || pruned {
            extras.push(AreaId::GalleryOfCoaches);
        }
        if prefs.low_budget || pruned {
            extras.push(AreaId::GalleryOfSculptures);
        }
        for area in extras {
            if walk.contains(area) || !walk.has_time_left() {
                continue;
            }
            let extra = PlannedStop {
                area,
                dwell: self.rules.rule(area).default_dwell_minutes,
                notes: Vec::new(),
            };
            if walk.place(&extra, None, None).is_ok() {
                debug!(area = %area, "supplementary stop placed");
            }
        }

        if weather.heat_precaution {
            warnings.push(messages::heat_warning(language).to_string());
        }
        if self.rules.is_paid_garden_day(date) {
            warnings.push(messages::paid_gardens_warning(language).to_string());
        }

        let (ticket_name, ticket_notes) = if prefs.passport {
            messages::passport_ticket(language)
        } else {
            messages::economy_ticket(language)
        };
        let tickets = vec![TicketLine {
            name: ticket_name.to_string(),
            notes: Some(ticket_notes.to_string()),
        }];

        let alternatives = vec![
            messages::rain_plan_alternative(language).to_string(),
            messages::little_train_alternative(language).to_string(),
        ];

        let summary = [
            Some(messages::intro(language)),
            messages::weather_line(weather.label, language),
            Some(messages::hours_reminder(language)),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

        info!(%date, start = %start, stops = walk.stops.len(), ?visit_order, "itinerary scheduled");

        Ok(ScheduleResult {
            date,
            start_time: start,
            visit_order,
            stops: walk.stops,
            warnings,
            alternatives,
            tickets,
            summary,
        })
    }

    /// Primary building closed: walk the always-open areas at default dwell, no weather changes.
    fn schedule_closure_day(&self, mut walk: Walk<'_>, start: TimeOfDay, language: Language) -> ScheduleResult {
        for area in self.rules.always_open_areas(walk.date) {
            let planned = PlannedStop {
                area,
                dwell: self.rules.rule(area).default_dwell_minutes,
                notes: Vec::new(),
            };
            if let Err(skip) = walk.place(&planned, None, None) {
                debug!(area = %area, ?skip, "closure-day stop skipped");
            }
        }

        info!(date = %walk.date, stops = walk.stops.len(), "closure-day itinerary scheduled");

        ScheduleResult {
            date: walk.date,
            start_time: start,
            visit_order: VisitOrder::ClosureDay,
            stops: walk.stops,
            warnings: vec![messages::closure_day_warning(language).to_string()],
            alternatives: Vec::new(),
            tickets: Vec::new(),
            summary: messages::closure_day_summary(language).to_string(),
        }
    }

    /// Applies rain pruning and heat reductions. Returns the stops and whether any outdoor stop was pruned.
    fn adjust_for_weather(
        &self,
        areas: &[AreaId],
        visit_order: VisitOrder,
        weather: &WeatherSignal,
        prefs: &Preferences,
        language: Language,
    ) -> (Vec<PlannedStop>, bool) {
        let rainy = weather.prefer_indoor && weather.label.is_rainy();
        let mut pruned = false;
        let mut planned = Vec::with_capacity(areas.len());

        for &area in areas {
            let rule = self.rules.rule(area);
            let mut dwell = rule.default_dwell_minutes;
            let mut notes = Vec::new();

            if rainy && rule.is_outdoor() {
                pruned = true;
                if area == AreaId::Gardens || weather.label == WeatherLabel::HeavyRain {
                    continue;
                }
                dwell /= 2;
                notes.push(messages::shortened_note(language).to_string());
            }

            if weather.heat_precaution
                && rule.is_outdoor()
                && dwell >= self.options.heat_reduction_min_dwell
            {
                dwell = dwell.saturating_sub(self.options.heat_dwell_reduction_minutes);
            }

            match area {
                AreaId::Gardens => notes.push(messages::gardens_note(language).to_string()),
                AreaId::Palace => {
                    if let Some(entry) = prefs.palace_entry {
                        notes.push(messages::palace_entry_note(entry, language));
                    }
                }
                AreaId::GrandTrianon if visit_order == VisitOrder::MiddayEntry => {
                    notes.push(messages::trianon_end_of_day_note(language).to_string());
                }
                _ => {}
            }
            if prefs.stroller && rule.is_outdoor() {
                notes.push(messages::stroller_note(language).to_string());
            }

            planned.push(PlannedStop { area, dwell, notes });
        }

        (planned, pruned)
    }
}

/// Schedules with the estate's rule table and default options.
pub fn schedule(facts: &TripFacts, weather: &WeatherSignal) -> Result<ScheduleResult, PlanError> {
    Scheduler::default().schedule(facts, weather)
}
