//! Yelp Fusion business-search adapter.

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

/// Yelp caps the search radius at 40000 meters.
const MAX_RADIUS_METERS: u32 = 40_000;

const RESULT_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    businesses: Vec<Business>,
}

#[derive(Debug, Deserialize)]
struct Business {
    id: Option<String>,
    name: Option<String>,
    url: Option<String>,
    phone: Option<String>,
    coordinates: Option<Coordinates>,
    location: Option<BusinessLocation>,
    #[serde(default)]
    categories: Vec<Category>,
    rating: Option<f64>,
    review_count: Option<u64>,
    price: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Coordinates {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct BusinessLocation {
    city: Option<String>,
    state: Option<String>,
    #[serde(default)]
    display_address: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Category {
    alias: Option<String>,
    title: Option<String>,
}

/// Venue discovery backed by Yelp Fusion business search.
pub struct YelpProvider {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    geocoder: Arc<dyn Geocoder>,
    limiter: Option<Arc<SearchRateLimiter>>,
    endpoint: String,
}

impl YelpProvider {
    const DEFAULT_ENDPOINT: &'static str = "https://api.yelp.com/v3/businesses/search";

    /// Create an adapter from pipeline config and an anchor geocoder.
    pub fn new(config: &PipelineConfig, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(config.request_timeout)
                .build()
                .unwrap_or_default(),
            api_key: config.yelp_api_key.clone(),
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
    ) -> ProviderResult<Vec<Business>> {
        let latitude = anchor.lat.to_string();
        let longitude = anchor.lng.to_string();
        let radius = radius_m.min(MAX_RADIUS_METERS).to_string();
        let limit = RESULT_LIMIT.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .bearer_auth(api_key.expose())
            .query(&[
                ("term", term),
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("radius", radius.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                status: response.status().as_u16(),
            });
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.businesses)
    }

    /// Map one business to a candidate; same drop rules as the Google
    /// adapter (no name or no coordinates means no candidate, out-of-radius
    /// is hard-filtered).
    fn map_business(
        business: Business,
        anchor: &Anchor,
        query_term: &str,
        radius_miles: f64,
    ) -> Option<Candidate> {
        let name = business.name?;
        let coordinates = business.coordinates.as_ref()?;
        let (lat, lng) = (coordinates.latitude?, coordinates.longitude?);

        let distance = haversine_miles(anchor.lat, anchor.lng, lat, lng);
        if distance > radius_miles {
            return None;
        }

        // Yelp's own category aliases classify the business
        let types: Vec<String> = business
            .categories
            .iter()
            .filter_map(|category| category.alias.clone())
            .collect();
        let category = types.first().cloned();
        let educationality = educationality_from_types(&types);

        let mut raw = Map::new();
        if let Some(rating) = business.rating {
            raw.insert("rating".into(), Value::from(rating));
        }
        if let Some(count) = business.review_count {
            raw.insert("review_count".into(), Value::from(count));
        }
        if let Some(price) = business.price {
            raw.insert("price".into(), Value::from(price));
        }
        if let Some(titles) = business
            .categories
            .iter()
            .map(|category| category.title.clone())
            .collect::<Option<Vec<_>>>()
            .filter(|titles| !titles.is_empty())
        {
            raw.insert("category_titles".into(), Value::from(titles));
        }

        let mut candidate = Candidate::new(name, Source::Yelp)
            .with_coords(lat, lng)
            .with_distance_miles((distance * 100.0).round() / 100.0)
            .with_educationality(educationality)
            .with_types(types);
        candidate.yelp_id = business.id;
        candidate.website_url = business.url;
        candidate.phone = business.phone.filter(|phone| !phone.is_empty());
        candidate.category = category;
        candidate.query_term = Some(query_term.to_string());
        if let Some(location) = business.location {
            candidate.city = location.city;
            candidate.state = location.state;
            if !location.display_address.is_empty() {
                candidate.address = Some(location.display_address.join(", "));
            }
        }
        candidate.raw = raw;
        Some(candidate)
    }
}

#[async_trait]
impl VenueProvider for YelpProvider {
    fn name(&self) -> &'static str {
        "yelp"
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
                    Ok(businesses) => {
                        out.extend(businesses.into_iter().filter_map(|business| {
                            Self::map_business(business, &anchor, term, query.radius_miles)
                        }));
                    }
                    Err(err) => {
                        tracing::warn!(anchor = %target, term, error = %err, "yelp search failed, skipping");
                    }
                }
            }
        }

        out
    }
}
