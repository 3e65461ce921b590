//! JSON loaders for place snapshots and tier tables.
//!
//! An itinerary file is a JSON array of place objects in visiting order. A
//! tier file is a JSON array of tier objects, cheapest first; it is validated
//! with [`TierTable::new`] so malformed tables are rejected at load time.

mod fs;

use std::io::BufReader;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::de::DeserializeOwned;
use thiserror::Error;
use waymark_core::{BudgetTier, Place, TierTable, TierTableError};

pub use fs::{file_is_file, open_utf8_file};

/// Errors raised while loading a snapshot file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to read {path}")]
    Io {
        /// File that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file was not valid JSON of the expected shape.
    #[error("failed to decode {path}")]
    Decode {
        /// File that failed.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The tier table failed validation.
    #[error("invalid tier table in {path}")]
    InvalidTiers {
        /// File that failed.
        path: Utf8PathBuf,
        /// Validation error.
        #[source]
        source: TierTableError,
    },
}

/// Read an itinerary's places from a JSON array.
///
/// # Errors
///
/// Returns [`LoadError::Io`] when the file cannot be read and
/// [`LoadError::Decode`] when it is not an array of places.
pub fn read_places(path: &Utf8Path) -> Result<Vec<Place>, LoadError> {
    let places: Vec<Place> = read_json(path)?;
    debug!("loaded {} places from {path}", places.len());
    Ok(places)
}

/// Read and validate a tier table from a JSON array.
///
/// # Errors
///
/// As [`read_places`], plus [`LoadError::InvalidTiers`] when the tiers do not
/// form a valid table.
pub fn read_tier_table(path: &Utf8Path) -> Result<TierTable, LoadError> {
    let tiers: Vec<BudgetTier> = read_json(path)?;
    TierTable::new(tiers).map_err(|source| LoadError::InvalidTiers {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, LoadError> {
    let file = open_utf8_file(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
