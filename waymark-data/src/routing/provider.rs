//! HTTP-based `RouteProvider` using OSRM's Route API.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use thiserror::Error;
use url::Url;
use waymark_core::{RouteError, RouteGeometry, RouteProvider, Waypoint};

use super::osrm::RouteResponse;

/// Error type for [`HttpRouteProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// The base URL could not be parsed or cannot carry a path.
    #[error("invalid routing base URL '{url}': {message}")]
    InvalidBaseUrl {
        /// Rejected URL.
        url: String,
        /// Parser error description.
        message: String,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "waymark-routing/0.1";

/// Default OSRM routing profile.
pub const DEFAULT_PROFILE: &str = "driving";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for [`HttpRouteProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRouteProviderConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// OSRM profile segment, e.g. `"driving"`.
    pub profile: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpRouteProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_owned(),
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpRouteProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP route provider using the OSRM Route API.
///
/// Each lookup issues one `GET` request for the full GeoJSON geometry of the
/// fastest route between the two waypoints. Transport failures, non-success
/// statuses, OSRM error codes and empty geometries are all reported as
/// [`RouteError`] values; the provider never panics on a bad response.
#[derive(Debug, Clone)]
pub struct HttpRouteProvider {
    client: Client,
    base_url: String,
    config: HttpRouteProviderConfig,
}

impl HttpRouteProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRouteProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn with_config(config: HttpRouteProviderConfig) -> Result<Self, ProviderBuildError> {
        let parsed =
            Url::parse(&config.base_url).map_err(|err| ProviderBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                message: err.to_string(),
            })?;
        if parsed.cannot_be_a_base() {
            return Err(ProviderBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                message: "URL cannot carry a path".to_owned(),
            });
        }
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            config,
        })
    }

    /// The configuration in force.
    #[must_use]
    pub const fn config(&self) -> &HttpRouteProviderConfig {
        &self.config
    }

    /// Build the OSRM Route API URL for one segment.
    ///
    /// The URL format is:
    /// `{base_url}/route/v1/{profile}/{lon},{lat};{lon},{lat}?overview=full&geometries=geojson`.
    fn build_route_url(&self, from: Waypoint, to: Waypoint) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url,
            self.config.profile,
            from.longitude(),
            from.latitude(),
            to.longitude(),
            to.latitude()
        )
    }

    /// Convert a reqwest error to a `RouteError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RouteError {
        if error.is_timeout() {
            return RouteError::Timeout {
                timeout_ms: u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX),
            };
        }

        if let Some(status) = error.status() {
            return RouteError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        RouteError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Convert an OSRM response to a path geometry.
fn convert_response(response: RouteResponse) -> Result<RouteGeometry, RouteError> {
    if !response.is_ok() {
        return Err(RouteError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let geometry = response
        .into_first_geometry()
        .ok_or(RouteError::EmptyGeometry)?;
    if geometry.0.len() < 2 {
        return Err(RouteError::EmptyGeometry);
    }
    Ok(geometry)
}

#[async_trait]
impl RouteProvider for HttpRouteProvider {
    async fn route_geometry(
        &self,
        from: Waypoint,
        to: Waypoint,
    ) -> Result<RouteGeometry, RouteError> {
        let url = self.build_route_url(from, to);
        debug!("requesting route geometry from {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let route_response: RouteResponse =
            response.json().await.map_err(|err| RouteError::ParseError {
                message: err.to_string(),
            })?;

        convert_response(route_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn pune_to_mumbai() -> (Waypoint, Waypoint) {
        (
            Waypoint::new(18.52, 73.85).expect("valid"),
            Waypoint::new(19.07, 72.87).expect("valid"),
        )
    }

    #[rstest]
    fn build_route_url_formats_coordinates(pune_to_mumbai: (Waypoint, Waypoint)) {
        let provider =
            HttpRouteProvider::new("http://osrm.example.com").expect("provider should build");
        let (from, to) = pune_to_mumbai;

        let url = provider.build_route_url(from, to);

        assert_eq!(
            url,
            "http://osrm.example.com/route/v1/driving/73.85,18.52;72.87,19.07?overview=full&geometries=geojson"
        );
    }

    #[rstest]
    fn build_route_url_strips_trailing_slash(pune_to_mumbai: (Waypoint, Waypoint)) {
        let provider =
            HttpRouteProvider::new("http://osrm.example.com/").expect("provider should build");
        let (from, to) = pune_to_mumbai;

        let url = provider.build_route_url(from, to);

        assert!(url.starts_with("http://osrm.example.com/route/"));
        assert!(!url.contains("//route"));
    }

    #[rstest]
    fn build_route_url_uses_profile(pune_to_mumbai: (Waypoint, Waypoint)) {
        let config = HttpRouteProviderConfig::new("http://osrm.example.com").with_profile("foot");
        let provider = HttpRouteProvider::with_config(config).expect("provider should build");
        let (from, to) = pune_to_mumbai;

        assert!(
            provider
                .build_route_url(from, to)
                .contains("/route/v1/foot/")
        );
    }

    #[rstest]
    #[case("not a url")]
    #[case("mailto:routing@example.com")]
    fn rejects_invalid_base_url(#[case] base_url: &str) {
        let err = HttpRouteProvider::new(base_url).expect_err("invalid base URL");
        assert!(matches!(err, ProviderBuildError::InvalidBaseUrl { .. }));
    }

    #[rstest]
    fn convert_response_handles_success() {
        let response: RouteResponse = serde_json::from_str(
            r#"{"code": "Ok", "routes": [{"geometry": {"coordinates": [[1.0, 2.0], [3.0, 4.0]]}}]}"#,
        )
        .expect("should deserialise");

        let line = convert_response(response).expect("should convert");

        assert_eq!(line.0.len(), 2);
    }

    #[rstest]
    fn convert_response_handles_service_error() {
        let response = RouteResponse {
            code: "NoRoute".to_owned(),
            message: Some("Impossible route".to_owned()),
            routes: Vec::new(),
        };

        let err = convert_response(response).expect_err("should fail");

        assert_eq!(
            err,
            RouteError::ServiceError {
                code: "NoRoute".to_owned(),
                message: "Impossible route".to_owned(),
            }
        );
    }

    #[rstest]
    #[case::no_routes(r#"{"code": "Ok", "routes": []}"#)]
    #[case::single_vertex(r#"{"code": "Ok", "routes": [{"geometry": {"coordinates": [[1.0, 2.0]]}}]}"#)]
    fn convert_response_rejects_missing_geometry(#[case] json: &str) {
        let response: RouteResponse = serde_json::from_str(json).expect("should deserialise");

        let err = convert_response(response).expect_err("should fail");

        assert_eq!(err, RouteError::EmptyGeometry);
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpRouteProviderConfig::new("http://example.com")
            .with_profile("bike")
            .with_timeout(Duration::from_secs(3))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.profile, "bike");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }
}
