//! Merge/dedupe engine.
//!
//! Coalesces candidate lists from all providers into one list with a single
//! record per physical venue. Identity is a derived key: normalized name
//! plus the best available secondary key (address, else a ~11m coordinate
//! bucket, else city). Known limitation: name normalization does not unify
//! abbreviation variants ("St" vs "Street"), so the same venue listed under
//! materially different names stays as two records.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

use crate::types::{Amenities, AvailabilityStatus, Candidate, Source};

static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[.,\-()'"&/]"#).unwrap());
static CORPORATE_SUFFIXES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(inc|llc|co|corp|the|center|centre|community)\b").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize free text for identity comparison: lowercase, punctuation to
/// spaces, corporate/filler word tokens removed, whitespace collapsed.
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let no_punctuation = PUNCTUATION.replace_all(&lower, " ");
    let no_suffixes = CORPORATE_SUFFIXES.replace_all(&no_punctuation, "");
    WHITESPACE.replace_all(&no_suffixes, " ").trim().to_string()
}

/// Bucket coordinates to a ~11m grid so near-identical points coalesce.
fn coord_bucket(candidate: &Candidate) -> Option<String> {
    match (candidate.lat, candidate.lng) {
        (Some(lat), Some(lng)) => Some(format!("{lat:.4}:{lng:.4}")),
        _ => None,
    }
}

/// The (name, secondary) tuple deciding whether two records are the same
/// physical venue. Secondary key priority: address, coordinate bucket, city.
pub fn identity_key(candidate: &Candidate) -> (String, String) {
    let name = normalize(&candidate.name);

    if let Some(address) = candidate.address.as_deref().map(normalize) {
        if !address.is_empty() {
            return (name, address);
        }
    }
    if let Some(bucket) = coord_bucket(candidate) {
        return (name, bucket);
    }
    let city = candidate.city.as_deref().map(normalize).unwrap_or_default();
    (name, city)
}

fn merge_option<T>(kept: &mut Option<T>, other: Option<T>) {
    if kept.is_none() {
        *kept = other;
    }
}

/// Fold `incoming` into `kept` (the first-seen record).
///
/// First-seen populated fields win ties; absent fields are backfilled. A
/// populated field is never replaced by an absent one. Provider IDs are
/// unioned so a merged record stays traceable to every contributing source.
fn merge_pair(kept: &mut Candidate, incoming: Candidate) {
    if kept.source != incoming.source {
        kept.source = Source::Merged;
    }

    merge_option(&mut kept.place_id, incoming.place_id);
    merge_option(&mut kept.yelp_id, incoming.yelp_id);
    merge_option(&mut kept.address, incoming.address);
    merge_option(&mut kept.city, incoming.city);
    merge_option(&mut kept.state, incoming.state);
    merge_option(&mut kept.category, incoming.category);
    merge_option(&mut kept.query_term, incoming.query_term);
    merge_option(&mut kept.website_url, incoming.website_url);
    merge_option(&mut kept.booking_url, incoming.booking_url);
    merge_option(&mut kept.phone, incoming.phone);
    merge_option(&mut kept.contact_name, incoming.contact_name);
    merge_option(&mut kept.contact_email, incoming.contact_email);
    merge_option(&mut kept.parking_notes, incoming.parking_notes);

    if kept.lat.is_none() || kept.lng.is_none() {
        kept.lat = incoming.lat;
        kept.lng = incoming.lng;
    }

    // Closer anchor wins when both records report a distance
    kept.distance_miles = match (kept.distance_miles, incoming.distance_miles) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };

    if kept.types.is_empty() {
        kept.types = incoming.types;
    }
    if kept.educationality == 0.0 {
        kept.educationality = incoming.educationality;
    }
    if kept.rooms.is_empty() {
        kept.rooms = incoming.rooms;
    }
    if kept.availability_status == AvailabilityStatus::Unknown {
        kept.availability_status = incoming.availability_status;
    }
    if kept.amenities == Amenities::default() {
        kept.amenities = incoming.amenities;
    }

    for (key, value) in incoming.raw {
        kept.raw.entry(key).or_insert(value);
    }
}

/// Merge two candidate lists into one record per unique identity key.
///
/// Seeding order only decides which record's populated fields win ties.
/// Output order is first-seen insertion order; callers wanting a ranking
/// must sort explicitly downstream.
pub fn merge_candidates(first: Vec<Candidate>, second: Vec<Candidate>) -> Vec<Candidate> {
    merge_all([first, second])
}

/// Merge any number of provider lists, seeded in the order given.
pub fn merge_all(lists: impl IntoIterator<Item = Vec<Candidate>>) -> Vec<Candidate> {
    let mut merged: IndexMap<(String, String), Candidate> = IndexMap::new();

    for list in lists {
        for candidate in list {
            match merged.entry(identity_key(&candidate)) {
                indexmap::map::Entry::Occupied(mut entry) => {
                    merge_pair(entry.get_mut(), candidate);
                }
                indexmap::map::Entry::Vacant(entry) => {
                    entry.insert(candidate);
                }
            }
        }
    }

    merged.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Source;
    use std::collections::HashSet;

    fn google_library() -> Candidate {
        let mut candidate = Candidate::new("Sheppard Memorial Library, Inc.", Source::Google)
            .with_address("530 Evans St, Greenville, NC 27858")
            .with_coords(35.6100, -77.3700)
            .with_distance_miles(1.2)
            .with_educationality(1.0)
            .with_types(["library"]);
        candidate.place_id = Some("ChIJgoogle".into());
        candidate.website_url = Some("https://sheppardlibrary.org".into());
        candidate
    }

    fn yelp_library() -> Candidate {
        let mut candidate = Candidate::new("Sheppard Memorial Library", Source::Yelp)
            .with_address("530 Evans St., Greenville, NC 27858")
            .with_coords(35.6101, -77.3701)
            .with_distance_miles(0.9);
        candidate.yelp_id = Some("sheppard-memorial".into());
        candidate.phone = Some("+12523294580".into());
        candidate
    }

    #[test]
    fn test_normalize_strips_suffixes_and_punctuation() {
        assert_eq!(
            normalize("The Sheppard Memorial Library, Inc."),
            "sheppard memorial library"
        );
        assert_eq!(normalize("Jaycee Park Community Center"), "jaycee park");
    }

    #[test]
    fn test_same_venue_collides_across_providers() {
        let merged = merge_candidates(vec![google_library()], vec![yelp_library()]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source, Source::Merged);
    }

    #[test]
    fn test_merge_keeps_every_provider_id() {
        let merged = merge_candidates(vec![google_library()], vec![yelp_library()]);
        assert_eq!(merged[0].place_id.as_deref(), Some("ChIJgoogle"));
        assert_eq!(merged[0].yelp_id.as_deref(), Some("sheppard-memorial"));
    }

    #[test]
    fn test_merge_backfills_without_overwriting() {
        // Google record has website but no phone; Yelp has phone but no
        // (distinct) website. Merged record carries both.
        let merged = merge_candidates(vec![google_library()], vec![yelp_library()]);
        assert_eq!(
            merged[0].website_url.as_deref(),
            Some("https://sheppardlibrary.org")
        );
        assert_eq!(merged[0].phone.as_deref(), Some("+12523294580"));
    }

    #[test]
    fn test_merge_keeps_minimum_distance() {
        let merged = merge_candidates(vec![google_library()], vec![yelp_library()]);
        assert_eq!(merged[0].distance_miles, Some(0.9));
    }

    #[test]
    fn test_first_seen_wins_field_ties() {
        let mut a = Candidate::new("Town Hall", Source::Google).with_city("Greenville");
        a.phone = Some("111".into());
        let mut b = Candidate::new("Town Hall", Source::Yelp).with_city("Greenville");
        b.phone = Some("222".into());

        let merged = merge_candidates(vec![a], vec![b]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].phone.as_deref(), Some("111"));
    }

    #[test]
    fn test_idempotence_merging_list_with_itself() {
        let list = vec![google_library(), yelp_library()];
        let once: HashSet<_> = merge_all([list.clone()])
            .iter()
            .map(identity_key)
            .collect();
        let twice: HashSet<_> = merge_candidates(list.clone(), list)
            .iter()
            .map(identity_key)
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_backfills_availability_and_amenities() {
        let a = Candidate::new("Town Hall", Source::Google).with_city("Greenville");
        let mut b = Candidate::new("Town Hall", Source::Yelp).with_city("Greenville");
        b.availability_status = AvailabilityStatus::Available;
        b.amenities = Amenities {
            wifi: true,
            ..Default::default()
        };

        let merged = merge_candidates(vec![a], vec![b]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].availability_status, AvailabilityStatus::Available);
        assert!(merged[0].amenities.wifi);
    }

    #[test]
    fn test_coord_bucket_fallback_when_no_address() {
        let a = Candidate::new("Pavilion", Source::Google).with_coords(35.61231, -77.36641);
        let b = Candidate::new("Pavilion", Source::Yelp).with_coords(35.61233, -77.36642);
        // Rounds to the same 4-decimal bucket
        let merged = merge_candidates(vec![a], vec![b]);
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_city_fallback_when_no_address_or_coords() {
        let a = Candidate::new("Pavilion", Source::Google).with_city("Greenville");
        let b = Candidate::new("Pavilion", Source::Yelp).with_city("Greenville");
        assert_eq!(merge_candidates(vec![a], vec![b]).len(), 1);
    }

    #[test]
    fn test_different_normalized_names_stay_separate() {
        // Known limitation: abbreviation variants do not unify, so these two
        // records for the same building remain distinct.
        let a = Candidate::new("Main St Library", Source::Google)
            .with_address("100 Main St, Greenville, NC");
        let b = Candidate::new("Main Street Public Library", Source::Yelp)
            .with_address("100 Main St, Greenville, NC");
        assert_eq!(merge_candidates(vec![a], vec![b]).len(), 2);
    }

    #[test]
    fn test_output_preserves_first_seen_order() {
        let a1 = Candidate::new("Alpha Hall", Source::Google).with_city("Greenville");
        let a2 = Candidate::new("Beta Hall", Source::Google).with_city("Greenville");
        let b1 = Candidate::new("Beta Hall", Source::Yelp).with_city("Greenville");
        let b2 = Candidate::new("Gamma Hall", Source::Yelp).with_city("Greenville");

        let merged = merge_candidates(vec![a1, a2], vec![b1, b2]);
        let names: Vec<_> = merged.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Alpha Hall", "Beta Hall", "Gamma Hall"]);
    }
}
