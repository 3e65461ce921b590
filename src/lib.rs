//! Facade crate for the Waymark itinerary engine.
//!
//! This crate re-exports the core domain types and exposes the HTTP route
//! provider and snapshot loaders behind the `http` feature.

#![forbid(unsafe_code)]

pub use waymark_core::{
    BudgetBreakdown, BudgetModel, BudgetParameters, BudgetTier, DefaultBudgetSummary,
    DistanceConfig, DistanceEstimator, DistanceResult, EngineConfig, InputError,
    ItineraryAggregator, ItineraryStats, Place, RouteError, RouteProvider, TierBudget, TierTable,
    Waypoint, compute_geodesic_segment,
};

#[cfg(feature = "http")]
pub use waymark_data::{
    HttpRouteProvider, HttpRouteProviderConfig, LoadError, read_places, read_tier_table,
};
