//! Data access for the Waymark engine.
//!
//! Responsibilities:
//! - Provide an HTTP [`RouteProvider`](waymark_core::RouteProvider) backed by
//!   the OSRM Route API.
//! - Load place snapshots and tier tables from JSON files.
//!
//! Boundaries:
//! - Do not encode budget or distance rules (live in `waymark-core`).
//! - Keep blocking I/O off async executors; the HTTP client is async.
//!
//! Invariants:
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod routing;
pub mod snapshot;

pub use routing::{
    DEFAULT_PROFILE, DEFAULT_USER_AGENT, HttpRouteProvider, HttpRouteProviderConfig,
    ProviderBuildError,
};
pub use snapshot::{LoadError, read_places, read_tier_table};
