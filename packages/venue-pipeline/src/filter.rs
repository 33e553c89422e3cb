//! Relevance filter: the geography + keyword-blocklist gate.
//!
//! Two independent predicates; a candidate must pass both to stay in the
//! pipeline. Both are permissive by default - geography never filters on
//! constraints the query didn't supply, and the keyword list is a denylist,
//! so unknown venue types pass.

use regex::Regex;

use crate::types::{Candidate, QuerySpec};

/// Substrings denoting categorically wrong venue types, matched
/// case-insensitively against a candidate's name + category + type list.
///
/// Chosen to stay narrow: "senior apartments" is out while "senior center"
/// (a topic term) passes.
const KEYWORD_BLOCKLIST: &[&str] = &[
    // senior / assisted-living housing
    "senior living",
    "senior housing",
    "senior apartments",
    "assisted living",
    "independent living",
    "retirement",
    "nursing home",
    "memory care",
    // medical / rehab facilities
    "rehab",
    "hospital",
    "clinic",
    "hospice",
    "medical center",
    "urgent care",
    // residential
    "apartment",
    "condo",
    // HOA / property management offices
    "homeowners",
    "property management",
    // K-12 schools and daycare
    "elementary school",
    "middle school",
    "high school",
    "daycare",
    "day care",
    "child care",
    "preschool",
    // death care
    "funeral",
    "mortuary",
    "cremat",
    "cemetery",
    // trivially-sized installations
    "little free library",
];

/// True when the candidate's classification text trips no blocklist term.
pub fn passes_blocklist(candidate: &Candidate) -> bool {
    let text = candidate.classification_text();
    !KEYWORD_BLOCKLIST.iter().any(|term| text.contains(term))
}

/// Geography predicate compiled once per query.
struct GeographyFilter {
    state_pattern: Option<Regex>,
    zips: Vec<String>,
    city_terms: Vec<String>,
}

impl GeographyFilter {
    fn new(query: &QuerySpec) -> Self {
        // Word-boundary match so a state code like "NC" can't hide inside
        // "Concord"
        let state_pattern = query.state.as_deref().and_then(|state| {
            Regex::new(&format!(r"\b{}\b", regex::escape(&state.to_lowercase()))).ok()
        });

        // "Greenville, NC" constrains on "greenville"
        let city_terms = query
            .cities
            .iter()
            .map(|city| {
                city.split(',')
                    .next()
                    .unwrap_or(city)
                    .trim()
                    .to_lowercase()
            })
            .filter(|city| !city.is_empty())
            .collect();

        Self {
            state_pattern,
            zips: query.zips.clone(),
            city_terms,
        }
    }

    fn city_matches(&self, address_text: &str) -> bool {
        self.city_terms
            .iter()
            .any(|city| address_text.contains(city.as_str()))
    }

    fn passes(&self, candidate: &Candidate) -> bool {
        let text = candidate.address_text();

        let state_matched = match &self.state_pattern {
            Some(pattern) => {
                if !pattern.is_match(&text) {
                    return false;
                }
                true
            }
            None => false,
        };

        if !self.zips.is_empty() {
            let zip_hit = self.zips.iter().any(|zip| text.contains(zip.as_str()));
            return zip_hit || (state_matched && self.city_matches(&text));
        }

        if !self.city_terms.is_empty() {
            return self.city_matches(&text);
        }

        true
    }
}

/// Apply both predicates, keeping only candidates that pass.
pub fn filter_candidates(candidates: Vec<Candidate>, query: &QuerySpec) -> Vec<Candidate> {
    let geography = GeographyFilter::new(query);
    candidates
        .into_iter()
        .filter(|candidate| {
            if !geography.passes(candidate) {
                tracing::debug!(name = %candidate.name, "dropped: outside requested geography");
                return false;
            }
            if !passes_blocklist(candidate) {
                tracing::debug!(name = %candidate.name, "dropped: blocklisted venue type");
                return false;
            }
            true
        })
        .collect()
}
