//! Free-text location resolution.
//!
//! Turns a city name or ZIP code into a lat/lng anchor point. Resolution is
//! best-effort by contract: one attempt, short timeout, `None` on any
//! failure. Callers treat an unresolved anchor as "skip this anchor" -
//! discovery legitimately returns partial (or empty) results when anchors
//! fail.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use crate::config::SecretString;

/// A resolved geographic point used as a search center and
/// distance-filter origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub lat: f64,
    pub lng: f64,

    /// Best-effort locality name, if the geocoder returned one
    pub locality: Option<String>,

    /// Best-effort postal code, if the geocoder returned one
    pub postal_code: Option<String>,
}

impl Anchor {
    /// Create an anchor from coordinates.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            locality: None,
            postal_code: None,
        }
    }
}

/// Resolves free text (city or ZIP) to an anchor point.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a location term to an anchor, or `None` if it can't be
    /// resolved for any reason (missing credential, transport failure,
    /// empty result set).
    async fn resolve(&self, target: &str) -> Option<Anchor>;
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    results: Vec<TextSearchResult>,
}

#[derive(Debug, Deserialize)]
struct TextSearchResult {
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Option<Location>,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: Option<f64>,
    lng: Option<f64>,
}

/// Geocoder backed by the Google Places text-search endpoint.
///
/// Uses Places text search rather than the dedicated Geocoding API so a
/// deployment only needs one API enabled. Takes the first result's location
/// as the anchor; text search doesn't reliably return address components,
/// so locality and postal code stay unset.
pub struct GooglePlacesGeocoder {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    endpoint: String,
}

impl GooglePlacesGeocoder {
    const DEFAULT_ENDPOINT: &'static str =
        "https://maps.googleapis.com/maps/api/place/textsearch/json";

    /// Create a geocoder. A `None` key disables resolution entirely.
    pub fn new(api_key: Option<SecretString>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key,
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Point at a different endpoint (test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Geocoder for GooglePlacesGeocoder {
    async fn resolve(&self, target: &str) -> Option<Anchor> {
        let api_key = self.api_key.as_ref()?;
        if target.is_empty() {
            return None;
        }

        let response = match self
            .client
            .get(&self.endpoint)
            .query(&[("query", target), ("key", api_key.expose())])
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::warn!(location = target, status = %response.status(), "geocode request rejected");
                return None;
            }
            Err(err) => {
                tracing::warn!(location = target, error = %err, "geocode request failed");
                return None;
            }
        };

        let body: TextSearchResponse = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(location = target, error = %err, "geocode response malformed");
                return None;
            }
        };

        let location = body
            .results
            .into_iter()
            .next()?
            .geometry?
            .location?;

        match (location.lat, location.lng) {
            (Some(lat), Some(lng)) => Some(Anchor::new(lat, lng)),
            _ => None,
        }
    }
}

/// In-memory geocoder for tests.
#[derive(Default)]
pub struct MockGeocoder {
    anchors: RwLock<HashMap<String, Anchor>>,
}

impl MockGeocoder {
    /// Create an empty mock (resolves nothing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an anchor for a location term.
    pub fn with_anchor(self, target: impl Into<String>, anchor: Anchor) -> Self {
        self.anchors.write().unwrap().insert(target.into(), anchor);
        self
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn resolve(&self, target: &str) -> Option<Anchor> {
        self.anchors.read().unwrap().get(target).cloned()
    }
}
