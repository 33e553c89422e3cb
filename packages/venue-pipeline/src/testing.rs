//! Testing utilities including mock implementations.
//!
//! Useful for exercising the pipeline without real geocoding or place-search
//! calls. The geocoder mock lives next to its trait in [`crate::geo`].

use async_trait::async_trait;

use crate::providers::VenueProvider;
use crate::types::{Candidate, QuerySpec, Source};

/// A provider that returns a fixed candidate list for every query.
pub struct StaticProvider {
    name: &'static str,
    candidates: Vec<Candidate>,
}

impl StaticProvider {
    /// Create a provider that always discovers `candidates`.
    pub fn new(name: &'static str, candidates: Vec<Candidate>) -> Self {
        Self { name, candidates }
    }

    /// Create a provider that always discovers nothing, like an adapter
    /// with no credential.
    pub fn empty(name: &'static str) -> Self {
        Self::new(name, vec![])
    }
}

#[async_trait]
impl VenueProvider for StaticProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn discover(&self, _query: &QuerySpec) -> Vec<Candidate> {
        self.candidates.clone()
    }
}

/// A plausible raw library candidate for tests.
pub fn sample_library(source: Source) -> Candidate {
    let mut candidate = Candidate::new("Sheppard Memorial Library", source)
        .with_address("530 Evans St, Greenville, NC 27858")
        .with_city("Greenville")
        .with_coords(35.6100, -77.3700)
        .with_distance_miles(1.2)
        .with_category("library")
        .with_types(["library", "point_of_interest"])
        .with_educationality(1.0);
    match source {
        Source::Google => candidate.place_id = Some("ChIJsheppard".into()),
        Source::Yelp => candidate.yelp_id = Some("sheppard-memorial-library".into()),
        Source::Merged => {}
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider_returns_fixture() {
        let provider = StaticProvider::new("fixture", vec![sample_library(Source::Google)]);
        let query = QuerySpec::new().with_cities(["Greenville, NC"]);

        let found = provider.discover(&query).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Sheppard Memorial Library");
    }

    #[tokio::test]
    async fn test_empty_provider() {
        let provider = StaticProvider::empty("disabled");
        assert!(provider.discover(&QuerySpec::new()).await.is_empty());
    }
}
