//! Test helpers for composing itinerary files and stub route providers.

use std::cell::Cell;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;
use waymark_core::RouteProvider;

use crate::CliError;
use crate::routing::{RouteProviderBuilder, RoutingConfig};

/// Three Jaipur sights: fees total 300, visits total 5 hours.
pub(super) const JAIPUR_ITINERARY: &str = r#"[
    {
        "id": "amber",
        "name": "Amber Fort",
        "state": "Rajasthan",
        "category": "Fort",
        "latitude": 26.9855,
        "longitude": 75.8513,
        "entranceFee": 100,
        "timeNeededHrs": 2.5,
        "reviewRating": 4.6
    },
    {
        "id": "hawa",
        "name": "Hawa Mahal",
        "state": "Rajasthan",
        "category": "Palace",
        "lat": 26.9239,
        "lon": 75.8267,
        "entranceFee": 50,
        "timeNeededHrs": 1.0,
        "reviewRating": 4.4
    },
    {
        "id": "jal",
        "name": "Jal Mahal",
        "state": "Rajasthan",
        "category": "Palace",
        "latitude": 26.9533,
        "longitude": 75.8466,
        "entranceFee": 150,
        "timeNeededHrs": 1.5,
        "reviewRating": 4.2
    }
]"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture");
}

/// Temporary directory holding a command's input files.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        write_utf8(&path, contents.as_bytes());
        path
    }
}

/// Hands out a fixed provider and counts how often it was asked to.
pub(super) struct StubRouteProviderBuilder {
    provider: Arc<dyn RouteProvider>,
    calls: Cell<usize>,
}

impl StubRouteProviderBuilder {
    pub(super) fn new(provider: impl RouteProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
            calls: Cell::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl RouteProviderBuilder for StubRouteProviderBuilder {
    fn build(&self, _config: &RoutingConfig) -> Result<Arc<dyn RouteProvider>, CliError> {
        self.calls.set(self.calls.get() + 1);
        Ok(Arc::clone(&self.provider))
    }
}
