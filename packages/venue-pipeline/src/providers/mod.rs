//! Place-search provider adapters.
//!
//! Each adapter maps one external place-search service onto the common
//! [`Candidate`] shape. Discovery is infallible at the trait boundary: a
//! missing credential yields an empty list, and any single failed search
//! request is logged and skipped so the remaining anchor/term combinations
//! still run.

pub mod google;
pub mod yelp;

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::types::{Candidate, QuerySpec};

pub use google::GooglePlacesProvider;
pub use yelp::YelpProvider;

/// Search terms that bias discovery toward seminar-friendly venue types.
///
/// These are query bias only. The final `category` always comes from the
/// provider's own returned type metadata, never from which term found it.
pub const TOPIC_TERMS: [&str; 5] = [
    "library",
    "community college",
    "technical school",
    "senior center",
    "community center",
];

/// Meters per statute mile, for providers that take a radius in meters.
pub(crate) const METERS_PER_MILE: f64 = 1609.34;

pub(crate) fn radius_meters(radius_miles: f64) -> u32 {
    (radius_miles * METERS_PER_MILE) as u32
}

/// Derive a provisional topic-fit ("educationality") score from a
/// provider's type list.
///
/// Deliberately conservative: nothing is treated like a library unless the
/// provider actually says so. The precedence below is a content policy
/// (libraries are maximally relevant for seminars) and the checks run in
/// exactly this order:
/// library 1.0, university/college 0.9, school/academy/technical 0.85,
/// community/civic center 0.6, place of worship 0.7, everything else 0.5.
///
/// Types are lowercased and stripped of underscores first so Google's
/// `community_center` and Yelp's `communitycenters` alias both land in the
/// same tier, and `libraries` still counts as a library type.
pub fn educationality_from_types(types: &[String]) -> f64 {
    if types.is_empty() {
        return 0.5;
    }

    let normalized: Vec<String> = types
        .iter()
        .map(|t| t.to_lowercase().replace('_', ""))
        .collect();
    let any = |predicate: fn(&str) -> bool| normalized.iter().any(|t| predicate(t));

    if any(|t| t.contains("librar")) {
        return 1.0;
    }

    if any(|t| t.contains("university") || t.contains("college")) {
        return 0.9;
    }

    if any(|t| {
        t.contains("school")
            || t.contains("academy")
            || t.contains("polytechnic")
            || t.contains("technical")
    }) {
        return 0.85;
    }

    if any(|t| {
        t.contains("communitycenter")
            || t.contains("communitycentre")
            || t.contains("civiccenter")
            || t.contains("civiccentre")
            || t.contains("townhall")
    }) {
        return 0.6;
    }

    if any(|t| t.contains("church") || t.contains("placeofworship")) {
        return 0.7;
    }

    0.5
}

/// A place-search provider that can discover venue candidates for a query.
#[async_trait]
pub trait VenueProvider: Send + Sync {
    /// Short provider identifier for logs.
    fn name(&self) -> &'static str;

    /// Discover candidates within the query's radius of each anchor.
    ///
    /// Never fails: partial and empty results are expected outcomes.
    async fn discover(&self, query: &QuerySpec) -> Vec<Candidate>;
}

pub(crate) type SearchRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Build a per-second limiter for outbound search requests.
pub(crate) fn search_limiter(requests_per_second: u32) -> Arc<SearchRateLimiter> {
    let quota = Quota::per_second(NonZeroU32::new(requests_per_second).unwrap_or(nonzero!(1u32)));
    Arc::new(RateLimiter::direct(quota))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_library_outranks_everything() {
        assert_eq!(
            educationality_from_types(&types(&["library", "university", "church"])),
            1.0
        );
    }

    #[test]
    fn test_university_and_college() {
        assert_eq!(educationality_from_types(&types(&["university"])), 0.9);
        assert_eq!(
            educationality_from_types(&types(&["community_college"])),
            0.9
        );
    }

    #[test]
    fn test_school_terms() {
        assert_eq!(educationality_from_types(&types(&["school"])), 0.85);
        assert_eq!(
            educationality_from_types(&types(&["technical_institute"])),
            0.85
        );
    }

    #[test]
    fn test_school_checked_before_community_center() {
        // A type list carrying both resolves at the school tier
        assert_eq!(
            educationality_from_types(&types(&["community_center", "driving_school"])),
            0.85
        );
    }

    #[test]
    fn test_civic_centers() {
        assert_eq!(educationality_from_types(&types(&["civic_center"])), 0.6);
        assert_eq!(educationality_from_types(&types(&["town_hall"])), 0.6);
    }

    #[test]
    fn test_worship() {
        assert_eq!(
            educationality_from_types(&types(&["place_of_worship"])),
            0.7
        );
    }

    #[test]
    fn test_yelp_style_aliases_match_same_tiers() {
        assert_eq!(educationality_from_types(&types(&["libraries"])), 1.0);
        assert_eq!(
            educationality_from_types(&types(&["communitycenters"])),
            0.6
        );
        assert_eq!(educationality_from_types(&types(&["churches"])), 0.7);
    }

    #[test]
    fn test_unrecognized_and_empty_default_to_neutral() {
        assert_eq!(educationality_from_types(&types(&["restaurant"])), 0.5);
        assert_eq!(educationality_from_types(&[]), 0.5);
    }

    #[test]
    fn test_radius_meters() {
        assert_eq!(radius_meters(6.0), 9656);
    }
}
