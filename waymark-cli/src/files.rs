//! Input checks, loaders and JSON output shared by every command.

use std::io::Write;

use camino::Utf8Path;
use serde::Serialize;
use waymark_core::{Place, TierTable};
use waymark_data::snapshot::file_is_file;
use waymark_data::{read_places, read_tier_table};

use crate::CliError;

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub(crate) fn load_itinerary(path: &Utf8Path) -> Result<Vec<Place>, CliError> {
    read_places(path).map_err(CliError::LoadItinerary)
}

pub(crate) fn load_tiers(path: &Utf8Path) -> Result<TierTable, CliError> {
    read_tier_table(path).map_err(CliError::LoadTiers)
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
