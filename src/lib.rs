//! estate-planner core
//!
//! Rule-driven visit scheduling and multi-stop route composition for a
//! historic estate, with the external geocoding, routing and forecast
//! services behind traits.

pub mod config;
pub mod error;
pub mod facts;
pub mod haversine;
pub mod mapbox;
pub mod messages;
pub mod nominatim;
pub mod open_meteo;
pub mod openrouteservice;
pub mod osrm;
pub mod planner;
pub mod polyline;
pub mod providers;
pub mod route;
pub mod rules;
pub mod scheduler;
pub mod session;
pub mod slots;
pub mod time;
pub mod traits;
pub mod weather;

pub use error::{PlanError, ProviderError, RouteError};
pub use route::{CompositeRoute, Place, RouteComposer, TravelProfile};
pub use scheduler::{ScheduleResult, Scheduler, schedule};
pub use weather::{WeatherSignal, classify, classify as classify_weather};
