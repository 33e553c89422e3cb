//! Google Places text-search adapter.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::config::{PipelineConfig, SecretString};
use crate::error::{ProviderError, ProviderResult};
use crate::geo::{haversine_miles, Anchor, Geocoder};
use crate::types::{Candidate, QuerySpec, Source};

use super::{
    educationality_from_types, radius_meters, search_limiter, SearchRateLimiter, VenueProvider,
    TOPIC_TERMS,
};

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    name: Option<String>,
    formatted_address: Option<String>,
    place_id: Option<String>,
    geometry: Option<Geometry>,
    #[serde(default)]
    types: Vec<String>,
    rating: Option<f64>,
    user_ratings_total: Option<u64>,
    business_status: Option<String>,
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

/// Venue discovery backed by Google Places text search.
pub struct GooglePlacesProvider {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    geocoder: Arc<dyn Geocoder>,
    limiter: Option<Arc<SearchRateLimiter>>,
    endpoint: String,
}

impl GooglePlacesProvider {
    const DEFAULT_ENDPOINT: &'static str =
        "https://maps.googleapis.com/maps/api/place/textsearch/json";

    /// Create an adapter from pipeline config and an anchor geocoder.
    pub fn new(config: &PipelineConfig, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(config.request_timeout)
                .build()
                .unwrap_or_default(),
            api_key: config.google_api_key.clone(),
            geocoder,
            limiter: config.requests_per_second.map(search_limiter),
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Point at a different endpoint (test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn search_once(
        &self,
        api_key: &SecretString,
        anchor: &Anchor,
        term: &str,
        radius_m: u32,
    ) -> ProviderResult<Vec<PlaceResult>> {
        let location = format!("{},{}", anchor.lat, anchor.lng);
        let radius = radius_m.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("query", term),
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("key", api_key.expose()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                status: response.status().as_u16(),
            });
        }

        let body: TextSearchResponse = response.json().await?;
        Ok(body.results)
    }

    /// Map one provider record to a candidate.
    ///
    /// Drops records with no name and records whose coordinates are missing
    /// (no coordinates means no radius check). Candidates past the radius
    /// are dropped here too - the hard filter.
    fn map_place(
        place: PlaceResult,
        anchor: &Anchor,
        anchor_term: &str,
        query_term: &str,
        radius_miles: f64,
    ) -> Option<Candidate> {
        let name = place.name?;
        let location = place.geometry.as_ref()?.location.as_ref()?;
        let (lat, lng) = (location.lat?, location.lng?);

        let distance = haversine_miles(anchor.lat, anchor.lng, lat, lng);
        if distance > radius_miles {
            return None;
        }

        // Category comes from Google's own types, never from the query term
        let category = place.types.first().cloned();
        let educationality = educationality_from_types(&place.types);

        let mut raw = Map::new();
        if let Some(rating) = place.rating {
            raw.insert("rating".into(), Value::from(rating));
        }
        if let Some(total) = place.user_ratings_total {
            raw.insert("user_ratings_total".into(), Value::from(total));
        }
        if let Some(status) = place.business_status {
            raw.insert("business_status".into(), Value::from(status));
        }

        let mut candidate = Candidate::new(name, Source::Google)
            .with_coords(lat, lng)
            .with_city(anchor_term)
            .with_distance_miles((distance * 100.0).round() / 100.0)
            .with_educationality(educationality)
            .with_types(place.types);
        candidate.place_id = place.place_id;
        candidate.address = place.formatted_address;
        candidate.category = category;
        candidate.query_term = Some(query_term.to_string());
        candidate.raw = raw;
        Some(candidate)
    }
}

#[async_trait]
impl VenueProvider for GooglePlacesProvider {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn discover(&self, query: &QuerySpec) -> Vec<Candidate> {
        let Some(api_key) = self.api_key.clone() else {
            return vec![];
        };

        let radius_m = radius_meters(query.radius_miles);
        let mut out = Vec::new();

        for target in query.anchor_terms() {
            let Some(anchor) = self.geocoder.resolve(target).await else {
                tracing::warn!(anchor = %target, "anchor did not resolve, skipping");
                continue;
            };

            for term in TOPIC_TERMS {
                if let Some(limiter) = &self.limiter {
                    limiter.until_ready().await;
                }

                match self.search_once(&api_key, &anchor, term, radius_m).await {
                    Ok(places) => {
                        out.extend(places.into_iter().filter_map(|place| {
                            Self::map_place(place, &anchor, target, term, query.radius_miles)
                        }));
                    }
                    Err(err) => {
                        tracing::warn!(anchor = %target, term, error = %err, "google search failed, skipping");
                    }
                }
            }
        }

        out
    }
}
