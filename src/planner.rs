//! End-to-end planning: forecast, weather signal, schedule and route.
//!
//! Collaborator failures never fail a plan here. A missing forecast plans
//! without weather constraints and a failed route leaves the itinerary
//! without geometry; both add a warning in the visitor's language.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::SiteLocation;
use crate::error::{PlanError, RouteError};
use crate::facts::TripFacts;
use crate::messages;
use crate::route::{CompositeRoute, Place, RouteComposer, TravelProfile};
use crate::scheduler::{ScheduleResult, Scheduler};
use crate::session::ConversationState;
use crate::time::MINUTES_PER_DAY;
use crate::traits::{ForecastProvider, SegmentRouter};
use crate::weather::{
    WeatherSignal, WeatherThresholds, classify_or_unknown, hours_after_midnight, hours_in_window,
};

/// A finished plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub schedule: ScheduleResult,
    pub weather: WeatherSignal,
    /// Walking route through the stops; `None` when routing failed or there is a single stop.
    pub route: Option<CompositeRoute>,
}

pub struct Planner<F, R> {
    scheduler: Scheduler,
    forecast: F,
    composer: RouteComposer<R>,
    site: SiteLocation,
    thresholds: WeatherThresholds,
    profile: TravelProfile,
}

impl<F: ForecastProvider, R: SegmentRouter> Planner<F, R> {
    pub fn new(scheduler: Scheduler, forecast: F, router: R) -> Self {
        Self {
            scheduler,
            forecast,
            composer: RouteComposer::new(router),
            site: SiteLocation::default(),
            thresholds: WeatherThresholds::default(),
            profile: TravelProfile::Walking,
        }
    }

    pub fn with_site(mut self, site: SiteLocation) -> Self {
        self.site = site;
        self
    }

    pub fn with_thresholds(mut self, thresholds: WeatherThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_profile(mut self, profile: TravelProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Places used when a live location arrives before any route exists.
    pub fn with_default_places(mut self, places: Vec<Place>) -> Self {
        self.composer = self.composer.with_default_places(places);
        self
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn composer(&self) -> &RouteComposer<R> {
        &self.composer
    }

    /// Forecast for the visit window, classified; `Unknown` when the fetch failed.
    ///
    /// A window running past midnight also reads the next day's forecast.
    pub fn weather_for(&self, facts: &TripFacts) -> WeatherSignal {
        let date = self.scheduler.visit_date(facts);
        let start = self.scheduler.start_time(facts);
        let duration = facts.duration_minutes;
        let (lat, lon) = (self.site.lat, self.site.lon);

        let forecast = self.forecast.hourly(lat, lon, date).and_then(|hourly| {
            let mut window = hours_in_window(&hourly, start, duration);
            if start.minutes() + duration >= MINUTES_PER_DAY {
                if let Some(next) = date.succ_opt() {
                    let next_hourly = self.forecast.hourly(lat, lon, next)?;
                    window.extend(hours_after_midnight(&next_hourly, start, duration));
                }
            }
            Ok(window)
        });
        classify_or_unknown(forecast, &self.thresholds, facts.language)
    }

    pub fn plan(&self, facts: &TripFacts) -> Result<Itinerary, PlanError> {
        facts.validate()?;

        let weather = self.weather_for(facts);
        let mut schedule = self.scheduler.schedule(facts, &weather)?;
        if weather.is_unknown() {
            schedule
                .warnings
                .insert(0, messages::weather_unavailable_warning(facts.language).to_string());
        }

        let places: Vec<Place> = schedule
            .stops
            .iter()
            .map(|stop| Place::named(stop.area_id.place_name()))
            .collect();

        let route = if places.len() < 2 {
            None
        } else {
            match self.composer.compose(&places, self.profile) {
                Ok(route) => Some(route),
                Err(err) => {
                    warn!(error = %err, "route composition failed, returning itinerary without route");
                    schedule
                        .warnings
                        .push(messages::route_unavailable_warning(facts.language).to_string());
                    None
                }
            }
        };

        info!(
            date = %schedule.date,
            weather = weather.label.as_str(),
            stops = schedule.stops.len(),
            routed = route.is_some(),
            "plan ready"
        );

        Ok(Itinerary {
            schedule,
            weather,
            route,
        })
    }

    /// Reconnects an itinerary's route to a live position.
    pub fn recompute_from_location(
        &self,
        lat: f64,
        lon: f64,
        itinerary: &Itinerary,
    ) -> Result<CompositeRoute, RouteError> {
        let existing = itinerary.route.clone().unwrap_or_default();
        self.composer
            .recompute_from_location(lat, lon, &existing, self.profile)
    }

    /// Recomputes from `fix`, or from the last location stored in the
    /// conversation when the request carries none. A new fix is stored.
    pub fn recompute_for_conversation(
        &self,
        state: &mut ConversationState,
        fix: Option<(f64, f64)>,
        itinerary: &Itinerary,
    ) -> Result<CompositeRoute, RouteError> {
        if fix.is_some() {
            state.last_location = fix;
        }
        let (lat, lon) = state.last_location.ok_or(RouteError::NoLiveLocation)?;
        self.recompute_from_location(lat, lon, itinerary)
    }
}
