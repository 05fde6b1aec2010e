//! Domain logic for livability scoring: categories, distance decay,
//! tag-based classification, and score aggregation.
//!
//! Everything in this crate is pure — no I/O, no clocks beyond the
//! result timestamp. The async fetch pipeline lives in `huni-engine`.

pub mod category;
pub mod classify;
pub mod config;
pub mod facility;
pub mod geo;
pub mod score;

pub use category::Category;
pub use classify::classify;
pub use config::{contribution, CategoryConfig};
pub use facility::{resolve_name, CustomPoi, Facility};
pub use geo::distance_meters;
pub use score::{LivabilityResult, Location, ScoreBoard, Subscores};
