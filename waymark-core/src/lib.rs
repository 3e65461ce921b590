//! Core domain types for the Waymark itinerary engine.
//!
//! The engine turns an ordered list of places into a travel-distance estimate
//! and a tiered, group-scaled cost budget. Everything here is a pure function
//! over a snapshot of [`Place`] values except the road-network lookups made
//! through a [`RouteProvider`], which may fail and are recovered per segment.
//!
//! # Examples
//!
//! ```
//! use waymark_core::{BudgetModel, EngineConfig, ItineraryAggregator, Place};
//!
//! let config = EngineConfig::default();
//! let places = vec![
//!     Place::new("1", "Fort", 26.91, 75.82).with_entrance_fee(100.0),
//!     Place::new("2", "Palace", 26.92, 75.82).with_entrance_fee(200.0),
//! ];
//!
//! let model = BudgetModel::from_config(&config);
//! let breakdown = model.compute_budget_for_tier(&places, 12.5, "moderate", 2)?;
//! assert!(breakdown.grand_total > 0.0);
//!
//! let stats = ItineraryAggregator::from_config(&config).compute_stats(&places)?;
//! assert_eq!(stats.place_count, 2);
//! # Ok::<(), waymark_core::InputError>(())
//! ```

#![forbid(unsafe_code)]

pub mod budget;
pub mod config;
pub mod distance;
mod error;
pub mod geodesic;
mod place;
pub mod routing;
pub mod stats;
#[doc(hidden)]
pub mod test_support;
pub mod tier;
mod waypoint;

pub use budget::{BudgetBreakdown, BudgetModel, BudgetParameters, TierBudget};
pub use config::{ConfigError, EngineConfig};
pub use distance::{
    BlockingError, DEFAULT_MAX_CONCURRENT_SEGMENTS, DEFAULT_SEGMENT_TIMEOUT, DistanceConfig,
    DistanceEstimator, DistanceResult, SegmentDistance, SegmentSource, waypoints_from_places,
};
pub use error::InputError;
pub use geodesic::{compute_geodesic_segment, polyline_length_km};
pub use place::{DEFAULT_REVIEW_RATING, DEFAULT_TIME_NEEDED_HRS, MAX_REVIEW_RATING, Place};
pub use routing::{RouteError, RouteGeometry, RouteProvider};
pub use stats::{
    DefaultBudgetSummary, ItineraryAggregator, ItineraryStats, SummaryBreakdown,
    SummaryPercentages, SummaryRates,
};
pub use tier::{BudgetTier, TierTable, TierTableError};
pub use waypoint::{Waypoint, WaypointError};
