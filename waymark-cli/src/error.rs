//! Error types emitted by the Waymark CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use waymark_core::{BlockingError, InputError};
use waymark_data::{LoadError, ProviderBuildError};

/// Errors emitted by the Waymark CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// Two options that cannot be combined were both supplied.
    #[error("--{first} cannot be combined with --{second}")]
    ConflictingOptions {
        /// Option that was supplied first.
        first: &'static str,
        /// Option that conflicts with it.
        second: &'static str,
    },
    /// A timeout option was set to zero seconds.
    #[error("--{field} must be at least one second")]
    ZeroTimeout {
        /// Option name.
        field: &'static str,
    },
    /// The concurrent lookup cap was set to zero.
    #[error("--{field} must be at least 1")]
    ZeroConcurrency {
        /// Option name.
        field: &'static str,
    },
    /// Only one half of the starting coordinate was supplied.
    #[error("starting location needs both latitude and longitude (missing --{missing})")]
    IncompleteStart {
        /// Option that was not supplied.
        missing: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option that named the path.
        field: &'static str,
        /// Missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option that named the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option that named the path.
        field: &'static str,
        /// Path that could not be inspected.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The itinerary file could not be loaded.
    #[error("failed to load itinerary: {0}")]
    LoadItinerary(#[source] LoadError),
    /// The tier table file could not be loaded.
    #[error("failed to load tier table: {0}")]
    LoadTiers(#[source] LoadError),
    /// Building the HTTP route provider failed.
    #[error("failed to build route provider for {base_url}: {source}")]
    BuildRouteProvider {
        /// Base URL the provider was configured with.
        base_url: String,
        /// Construction failure.
        #[source]
        source: ProviderBuildError,
    },
    /// The itinerary or request parameters were rejected by the engine.
    #[error(transparent)]
    Input(#[from] InputError),
    /// Distance estimation could not be driven to completion.
    #[error("failed to run distance estimation: {0}")]
    Blocking(#[from] BlockingError),
    /// Serialising the command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
