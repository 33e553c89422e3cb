//! Venue Discovery & Ranking Pipeline
//!
//! Finds candidate meeting venues for small educational seminars: queries
//! external place-search providers, merges and deduplicates their results,
//! filters out geographically or semantically irrelevant records, and ranks
//! what's left by a composite, explainable suitability score.
//!
//! # Design Philosophy
//!
//! The pipeline is a library, not a service. It consumes a [`QuerySpec`]
//! and hands back a ranked `Vec<Candidate>`; HTTP transport, persistence,
//! and presentation belong to the caller. Partial failure is the normal
//! operating mode: a provider without a credential contributes nothing, a
//! failed search request is logged and skipped, and an empty ranked list is
//! a legitimate answer rather than an error.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use venue_pipeline::{
//!     GooglePlacesGeocoder, GooglePlacesProvider, Pipeline, PipelineConfig,
//!     QuerySpec, YelpProvider,
//! };
//!
//! let config = PipelineConfig::from_env();
//! let geocoder = Arc::new(GooglePlacesGeocoder::new(
//!     config.google_api_key.clone(),
//!     config.request_timeout,
//! ));
//!
//! let pipeline = Pipeline::new()
//!     .with_provider(GooglePlacesProvider::new(&config, geocoder.clone()))
//!     .with_provider(YelpProvider::new(&config, geocoder));
//!
//! let query = QuerySpec::new()
//!     .with_cities(["Greenville, NC"])
//!     .with_radius_miles(6.0)
//!     .with_state("NC")
//!     .with_attendees(30);
//!
//! let ranked = pipeline.run(&query).await;
//! ```
//!
//! # Modules
//!
//! - [`types`] - query spec and candidate records
//! - [`geo`] - geocoding and great-circle distance
//! - [`providers`] - place-search adapters (Google Places, Yelp Fusion)
//! - [`merge`] - identity-key dedupe across providers
//! - [`filter`] - geography + keyword-blocklist relevance gate
//! - [`scoring`] - weighted composite suitability score
//! - [`enrich`] - pluggable contact/room enrichment seam
//! - [`pipeline`] - the orchestrator tying the stages together
//! - [`testing`] - mock implementations for tests

pub mod config;
pub mod enrich;
pub mod error;
pub mod filter;
pub mod geo;
pub mod merge;
pub mod pipeline;
pub mod providers;
pub mod scoring;
pub mod testing;
pub mod types;

// Re-export core types at crate root
pub use config::{PipelineConfig, SecretString};
pub use enrich::{Enricher, StubEnricher};
pub use error::{ProviderError, ProviderResult};
pub use filter::{filter_candidates, passes_blocklist};
pub use geo::{haversine_miles, Anchor, Geocoder, GooglePlacesGeocoder, MockGeocoder};
pub use merge::{identity_key, merge_all, merge_candidates};
pub use pipeline::Pipeline;
pub use providers::{
    educationality_from_types, GooglePlacesProvider, VenueProvider, YelpProvider, TOPIC_TERMS,
};
pub use scoring::{score, CapacityTarget, Score};
pub use types::{
    Amenities, AvailabilityStatus, Candidate, QuerySpec, Room, ScoreComponents, Source,
};
