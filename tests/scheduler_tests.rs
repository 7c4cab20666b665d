//! Scheduler tests
//!
//! Tests for visit ordering, weather pruning, hour clipping, closure days
//! and derived outputs.

mod fixtures;

use estate_planner::error::PlanError;
use estate_planner::facts::{BudgetLevel, Language, PartyType, TicketType, TripFacts};
use estate_planner::messages;
use estate_planner::rules::{AreaId, RuleTable, SiteCalendar};
use estate_planner::scheduler::{ScheduleOptions, ScheduleResult, Scheduler, Stop, VisitOrder, schedule};
use estate_planner::time::TimeOfDay;
use estate_planner::weather::{WeatherLabel, WeatherSignal};

use fixtures::{monday, tuesday};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Builder for trip facts with sensible defaults (Tuesday, 14:00, 3 hours).
#[derive(Clone, Debug)]
struct Trip {
    facts: TripFacts,
}

impl Trip {
    fn new() -> Self {
        Self {
            facts: TripFacts {
                date: Some(tuesday()),
                start_time: Some(TimeOfDay::hm(14, 0)),
                language: Language::En,
                ..TripFacts::default()
            },
        }
    }

    fn on(mut self, date: chrono::NaiveDate) -> Self {
        self.facts.date = Some(date);
        self
    }

    fn at(mut self, h: u16, m: u16) -> Self {
        self.facts.start_time = Some(TimeOfDay::hm(h, m));
        self
    }

    fn minutes(mut self, duration: u32) -> Self {
        self.facts.duration_minutes = duration;
        self
    }

    fn party(mut self, party: PartyType) -> Self {
        self.facts.party_type = Some(party);
        self
    }

    fn budget(mut self, budget: BudgetLevel) -> Self {
        self.facts.budget_level = Some(budget);
        self
    }

    fn passport(mut self, entry_h: u16, entry_m: u16) -> Self {
        self.facts.ticket = TicketType::Passport;
        self.facts.palace_entry = Some(TimeOfDay::hm(entry_h, entry_m));
        self
    }

    fn notes(mut self, notes: &str) -> Self {
        self.facts.notes = notes.to_string();
        self
    }

    fn build(self) -> TripFacts {
        self.facts
    }
}

fn weather(label: WeatherLabel) -> WeatherSignal {
    WeatherSignal::from_label(label, Language::En)
}

fn pleasant() -> WeatherSignal {
    weather(WeatherLabel::Pleasant)
}

fn run(facts: &TripFacts, signal: &WeatherSignal) -> ScheduleResult {
    schedule(facts, signal).expect("schedule should succeed")
}

fn areas(result: &ScheduleResult) -> Vec<AreaId> {
    result.stops.iter().map(|s| s.area_id).collect()
}

fn stop(result: &ScheduleResult, area: AreaId) -> &Stop {
    result
        .stops
        .iter()
        .find(|s| s.area_id == area)
        .unwrap_or_else(|| panic!("no stop for {area}"))
}

fn window(stop: &Stop) -> (String, String) {
    (stop.window_start.to_string(), stop.window_end.to_string())
}

fn w(start: &str, end: &str) -> (String, String) {
    (start.to_string(), end.to_string())
}

// ============================================================================
// Default Ordering
// ============================================================================

#[test]
fn test_default_afternoon_visit() {
    let result = run(&Trip::new().build(), &pleasant());

    assert_eq!(result.visit_order, VisitOrder::GardensFirst);
    assert_eq!(
        areas(&result),
        vec![
            AreaId::Gardens,
            AreaId::Palace,
            AreaId::GrandTrianon,
            AreaId::QueensHamlet,
            AreaId::PetitTrianon
        ]
    );
    assert_eq!(window(&result.stops[0]), w("14:00", "14:35"));
    assert_eq!(window(&result.stops[1]), w("14:35", "15:35"));
    assert_eq!(window(&result.stops[2]), w("15:35", "16:15"));
    assert_eq!(window(&result.stops[3]), w("16:15", "16:50"));
    // starts before the requested end, so it is kept in full
    assert_eq!(window(&result.stops[4]), w("16:50", "17:20"));
    assert!(result.warnings.is_empty());
}

#[test]
fn test_morning_start_waits_for_trianon_opening() {
    let result = run(&Trip::new().at(9, 0).minutes(480).build(), &pleasant());

    assert_eq!(window(stop(&result, AreaId::Gardens)), w("09:00", "09:35"));
    assert_eq!(window(stop(&result, AreaId::Palace)), w("09:35", "10:35"));
    assert_eq!(window(stop(&result, AreaId::GrandTrianon)), w("12:00", "12:40"));
}

#[test]
fn test_little_train_hint_on_grand_trianon() {
    let result = run(&Trip::new().build(), &pleasant());
    let trianon = stop(&result, AreaId::GrandTrianon);
    assert_eq!(
        trianon.transport_hint.as_deref(),
        Some(messages::little_train_hint(Language::En))
    );
    assert!(stop(&result, AreaId::Palace).transport_hint.is_none());
}

#[test]
fn test_gardens_carry_note() {
    let result = run(&Trip::new().build(), &pleasant());
    let gardens = stop(&result, AreaId::Gardens);
    assert_eq!(gardens.notes.as_deref(), Some(messages::gardens_note(Language::En)));
}

#[test]
fn test_starts_are_non_decreasing() {
    let result = run(&Trip::new().at(8, 0).minutes(720).notes("family").build(), &pleasant());
    for pair in result.stops.windows(2) {
        assert!(pair[0].window_start <= pair[1].window_start);
        assert!(pair[0].window_end <= pair[1].window_start);
    }
}

// ============================================================================
// Supplementary Stops
// ============================================================================

#[test]
fn test_family_gets_gallery_of_coaches() {
    let result = run(
        &Trip::new().at(10, 0).minutes(480).party(PartyType::Family).build(),
        &pleasant(),
    );
    assert_eq!(areas(&result).last(), Some(&AreaId::GalleryOfCoaches));
    assert_eq!(window(stop(&result, AreaId::GalleryOfCoaches)), w("13:45", "14:15"));
    assert!(!areas(&result).contains(&AreaId::GalleryOfSculptures));
}

#[test]
fn test_low_budget_gets_gallery_of_sculptures() {
    let result = run(
        &Trip::new().at(10, 0).minutes(480).budget(BudgetLevel::Low).build(),
        &pleasant(),
    );
    assert_eq!(areas(&result).last(), Some(&AreaId::GalleryOfSculptures));
}

#[test]
fn test_no_supplementary_stop_without_time_left() {
    let result = run(&Trip::new().party(PartyType::Family).build(), &pleasant());
    assert!(!areas(&result).contains(&AreaId::GalleryOfCoaches));
}

// ============================================================================
// Passport Ordering
// ============================================================================

#[test]
fn test_late_entry_moves_palace_last() {
    let result = run(
        &Trip::new().at(12, 0).minutes(360).passport(15, 0).build(),
        &pleasant(),
    );

    assert_eq!(result.visit_order, VisitOrder::LateEntry);
    assert_eq!(
        areas(&result),
        vec![
            AreaId::Gardens,
            AreaId::GrandTrianon,
            AreaId::QueensHamlet,
            AreaId::PetitTrianon,
            AreaId::Palace
        ]
    );
    let palace = stop(&result, AreaId::Palace);
    assert_eq!(window(palace), w("15:00", "16:00"));
    assert!(palace.notes.as_deref().unwrap_or_default().contains("15:00"));
}

#[test]
fn test_midday_entry_anchors_palace() {
    let result = run(
        &Trip::new().at(10, 0).minutes(480).passport(13, 0).build(),
        &pleasant(),
    );

    assert_eq!(result.visit_order, VisitOrder::MiddayEntry);
    assert_eq!(window(stop(&result, AreaId::Gardens)), w("10:00", "10:35"));
    assert_eq!(window(stop(&result, AreaId::Palace)), w("13:00", "14:00"));
    let trianon = stop(&result, AreaId::GrandTrianon);
    assert_eq!(window(trianon), w("14:00", "14:40"));
    assert!(
        trianon
            .notes
            .as_deref()
            .unwrap_or_default()
            .contains(messages::trianon_end_of_day_note(Language::En))
    );
}

#[test]
fn test_passport_from_notes() {
    let result = run(
        &Trip::new().at(12, 0).minutes(360).notes("We have the Passport, entry 15:30").build(),
        &pleasant(),
    );
    assert_eq!(result.visit_order, VisitOrder::LateEntry);
    assert_eq!(stop(&result, AreaId::Palace).window_start, TimeOfDay::hm(15, 30));
    assert_eq!(result.tickets[0].name, messages::passport_ticket(Language::En).0);
}

// ============================================================================
// Weather
// ============================================================================

#[test]
fn test_rain_risk_prunes_gardens_and_shortens_hamlet() {
    let result = run(&Trip::new().build(), &weather(WeatherLabel::RainRisk));

    assert_eq!(
        areas(&result),
        vec![
            AreaId::Palace,
            AreaId::GrandTrianon,
            AreaId::PetitTrianon,
            AreaId::QueensHamlet,
            AreaId::GalleryOfCoaches,
            AreaId::GalleryOfSculptures
        ]
    );
    let hamlet = stop(&result, AreaId::QueensHamlet);
    assert_eq!(hamlet.dwell_minutes(), 17);
    assert!(
        hamlet
            .notes
            .as_deref()
            .unwrap_or_default()
            .contains(messages::shortened_note(Language::En))
    );
    assert_eq!(
        result.warnings,
        vec![messages::outdoor_pruned_warning(Language::En).to_string()]
    );
}

#[test]
fn test_heavy_rain_removes_all_outdoor_stops() {
    let result = run(&Trip::new().build(), &weather(WeatherLabel::HeavyRain));

    assert_eq!(
        areas(&result),
        vec![
            AreaId::Palace,
            AreaId::GrandTrianon,
            AreaId::PetitTrianon,
            AreaId::GalleryOfCoaches,
            AreaId::GalleryOfSculptures
        ]
    );
    assert_eq!(window(stop(&result, AreaId::GalleryOfSculptures)), w("16:40", "17:05"));
}

#[test]
fn test_heat_shortens_outdoor_stops() {
    let result = run(&Trip::new().build(), &weather(WeatherLabel::Heat));

    assert_eq!(stop(&result, AreaId::Gardens).dwell_minutes(), 25);
    assert_eq!(stop(&result, AreaId::QueensHamlet).dwell_minutes(), 25);
    assert_eq!(stop(&result, AreaId::Palace).dwell_minutes(), 60);
    assert!(
        result
            .warnings
            .contains(&messages::heat_warning(Language::En).to_string())
    );
}

#[test]
fn test_unknown_weather_changes_nothing() {
    let facts = Trip::new().build();
    let unknown = run(&facts, &WeatherSignal::unknown(Language::En));
    let fair = run(&facts, &pleasant());
    assert_eq!(unknown.stops, fair.stops);
    assert_eq!(unknown.warnings, fair.warnings);
}

#[test]
fn test_windy_changes_nothing_but_summary() {
    let facts = Trip::new().build();
    let windy = run(&facts, &weather(WeatherLabel::Windy));
    let fair = run(&facts, &pleasant());
    assert_eq!(windy.stops, fair.stops);
    assert_ne!(windy.summary, fair.summary);
}

// ============================================================================
// Hours
// ============================================================================

#[test]
fn test_entry_at_last_admission_is_clipped_to_close() {
    let result = run(&Trip::new().at(17, 45).minutes(60).build(), &weather(WeatherLabel::HeavyRain));

    assert_eq!(areas(&result), vec![AreaId::Palace]);
    assert_eq!(window(&result.stops[0]), w("17:45", "18:30"));
    assert_eq!(result.warnings.len(), 3, "pruning warning plus two Trianon skips");
}

#[test]
fn test_night_fountain_evening_closes_gardens_early() {
    let calendar = SiteCalendar {
        night_fountain_dates: [tuesday()].into_iter().collect(),
        ..SiteCalendar::default()
    };
    let scheduler = Scheduler::new(RuleTable::estate().with_calendar(calendar), ScheduleOptions::default());
    let result = scheduler
        .schedule(&Trip::new().at(17, 0).build(), &pleasant())
        .unwrap();

    assert_eq!(window(stop(&result, AreaId::Gardens)), w("17:00", "17:30"));
    assert_eq!(window(stop(&result, AreaId::Palace)), w("17:30", "18:30"));
    assert_eq!(areas(&result).len(), 2);
    assert_eq!(
        result.warnings,
        vec![
            messages::area_skipped_warning(AreaId::GrandTrianon, Language::En),
            messages::area_skipped_warning(AreaId::QueensHamlet, Language::En),
            messages::area_skipped_warning(AreaId::PetitTrianon, Language::En),
        ]
    );
}

#[test]
fn test_paid_garden_day_warns() {
    let calendar = SiteCalendar {
        paid_garden_dates: [tuesday()].into_iter().collect(),
        ..SiteCalendar::default()
    };
    let scheduler = Scheduler::new(RuleTable::estate().with_calendar(calendar), ScheduleOptions::default());
    let result = scheduler.schedule(&Trip::new().build(), &pleasant()).unwrap();
    assert!(
        result
            .warnings
            .contains(&messages::paid_gardens_warning(Language::En).to_string())
    );
}

#[test]
fn test_transfer_minutes_space_out_stops() {
    let options = ScheduleOptions {
        transfer_minutes: 10,
        ..ScheduleOptions::default()
    };
    let result = Scheduler::new(RuleTable::estate(), options)
        .schedule(&Trip::new().build(), &pleasant())
        .unwrap();
    assert_eq!(window(&result.stops[1]), w("14:45", "15:45"));
}

// ============================================================================
// Closure Day
// ============================================================================

#[test]
fn test_monday_only_always_open_areas() {
    let result = run(&Trip::new().on(monday()).at(10, 0).build(), &weather(WeatherLabel::HeavyRain));

    assert_eq!(result.visit_order, VisitOrder::ClosureDay);
    assert_eq!(
        areas(&result),
        vec![AreaId::Gardens, AreaId::GalleryOfCoaches, AreaId::GalleryOfSculptures]
    );
    assert_eq!(window(&result.stops[0]), w("10:00", "10:35"));
    assert_eq!(
        result.warnings,
        vec![messages::closure_day_warning(Language::En).to_string()]
    );
    assert!(result.tickets.is_empty());
    assert_eq!(result.summary, messages::closure_day_summary(Language::En));
}

// ============================================================================
// Derived Outputs
// ============================================================================

#[test]
fn test_economy_ticket_and_alternatives() {
    let result = run(&Trip::new().build(), &pleasant());
    assert_eq!(result.tickets.len(), 1);
    assert_eq!(result.tickets[0].name, messages::economy_ticket(Language::En).0);
    assert_eq!(
        result.alternatives,
        vec![
            messages::rain_plan_alternative(Language::En).to_string(),
            messages::little_train_alternative(Language::En).to_string(),
        ]
    );
}

#[test]
fn test_summary_includes_weather_line() {
    let fair = run(&Trip::new().build(), &pleasant());
    assert_eq!(
        fair.summary,
        format!(
            "{} {}",
            messages::intro(Language::En),
            messages::hours_reminder(Language::En)
        )
    );

    let rain = run(&Trip::new().build(), &weather(WeatherLabel::RainRisk));
    assert!(rain.summary.contains(
        messages::weather_line(WeatherLabel::RainRisk, Language::En).unwrap()
    ));
}

#[test]
fn test_french_is_the_default_language() {
    let facts = TripFacts {
        language: Language::Fr,
        ..Trip::new().build()
    };
    let result = run(&facts, &WeatherSignal::from_label(WeatherLabel::Pleasant, Language::Fr));
    assert_eq!(result.tickets[0].name, "Combinaison économique");
    assert!(result.summary.starts_with(messages::intro(Language::Fr)));
}

// ============================================================================
// Validation & Determinism
// ============================================================================

#[test]
fn test_duration_out_of_range_is_rejected() {
    let short = Trip::new().minutes(29).build();
    assert_eq!(schedule(&short, &pleasant()), Err(PlanError::DurationOutOfRange(29)));
    let long = Trip::new().minutes(1441).build();
    assert_eq!(schedule(&long, &pleasant()), Err(PlanError::DurationOutOfRange(1441)));
}

#[test]
fn test_missing_date_and_start_use_options() {
    let options = ScheduleOptions {
        reference_date: tuesday(),
        default_start: TimeOfDay::hm(14, 0),
        ..ScheduleOptions::default()
    };
    let facts = TripFacts {
        language: Language::En,
        ..TripFacts::default()
    };
    let result = Scheduler::new(RuleTable::estate(), options)
        .schedule(&facts, &pleasant())
        .unwrap();
    assert_eq!(result.date, tuesday());
    assert_eq!(result.start_time, TimeOfDay::hm(14, 0));
    assert_eq!(result, run(&Trip::new().build(), &pleasant()));
}

#[test]
fn test_schedule_is_idempotent() {
    let facts = Trip::new().at(11, 0).minutes(420).party(PartyType::Family).build();
    let signal = weather(WeatherLabel::Mixed);
    assert_eq!(run(&facts, &signal), run(&facts, &signal));
}
