//! Candidate types - the pipeline's working unit.
//!
//! A `Candidate` moves through the pipeline as: raw provider record →
//! possibly merged with a same-identity record from another provider →
//! possibly dropped by the relevance filter → enriched with defaults →
//! scored and ranked. The ranked output is a terminal snapshot; nothing
//! downstream mutates it further.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Which provider a candidate record originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Google,
    Yelp,
    /// Coalesced from more than one provider during merge
    Merged,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Google => f.write_str("google"),
            Source::Yelp => f.write_str("yelp"),
            Source::Merged => f.write_str("merged"),
        }
    }
}

/// Booking availability for a venue, as far as we know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Available,
    Maybe,
    NotAvailable,
    #[default]
    Unknown,
}

/// Amenities relevant to hosting a seminar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenities {
    #[serde(default)]
    pub projector: bool,
    #[serde(default)]
    pub screen_tv: bool,
    #[serde(default)]
    pub wifi: bool,
    #[serde(default)]
    pub tables_chairs: bool,
}

impl Amenities {
    /// How many amenities are present.
    pub fn count(&self) -> u32 {
        [self.projector, self.screen_tv, self.wifi, self.tables_chairs]
            .iter()
            .filter(|present| **present)
            .count() as u32
    }
}

/// A bookable space within a venue.
///
/// Created by the enrichment collaborator; read by capacity-fit scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub room_name: Option<String>,
    pub capacity_classroom: Option<u32>,
    pub capacity_theater: Option<u32>,
    pub fees_hour: Option<f64>,
    pub fees_day: Option<f64>,
    pub deposit: Option<f64>,
    pub rental_policy_url: Option<String>,
}

/// Per-component score values, serialized as a name → value mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub educationality: f64,
    pub availability: f64,
    pub capacity_fit: f64,
    pub amenities: f64,
    pub logistics: f64,
}

/// A venue record at any pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Venue name (the one required field)
    pub name: String,

    /// Google place ID, if Google contributed this record
    pub place_id: Option<String>,

    /// Yelp business ID, if Yelp contributed this record
    pub yelp_id: Option<String>,

    /// Free-text address as the provider formatted it
    pub address: Option<String>,

    pub city: Option<String>,
    pub state: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,

    /// Great-circle distance from the search anchor, in miles
    pub distance_miles: Option<f64>,

    /// Best-guess venue type from the provider's own metadata,
    /// never from the search term that found it
    pub category: Option<String>,

    /// Raw type/category list from the provider
    #[serde(default)]
    pub types: Vec<String>,

    /// Which topic-bias search term surfaced this record (debugging aid)
    pub query_term: Option<String>,

    pub source: Source,

    /// Provisional topic-fit score derived from provider types, in [0,1]
    #[serde(default)]
    pub educationality: f64,

    // Enrichment fields, default-filled by the enricher when absent
    pub website_url: Option<String>,
    pub booking_url: Option<String>,
    pub phone: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub parking_notes: Option<String>,
    #[serde(default)]
    pub disclosure_needed: bool,
    #[serde(default = "default_true")]
    pub image_allowed: bool,
    #[serde(default)]
    pub availability_status: AvailabilityStatus,
    #[serde(default)]
    pub amenities: Amenities,
    #[serde(default)]
    pub rooms: Vec<Room>,

    // Scoring fields, populated by the scoring engine
    #[serde(default)]
    pub score_total: f64,
    pub score_components: Option<ScoreComponents>,
    pub reason_text: Option<String>,

    /// 1-based position after the final sort
    pub rank: Option<u32>,

    /// Provider fields not yet promoted to first-class attributes
    /// (rating, business_status, price, ...)
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub raw: Map<String, Value>,
}

impl Candidate {
    /// Create a bare candidate with just a name and source.
    pub fn new(name: impl Into<String>, source: Source) -> Self {
        Self {
            name: name.into(),
            place_id: None,
            yelp_id: None,
            address: None,
            city: None,
            state: None,
            lat: None,
            lng: None,
            distance_miles: None,
            category: None,
            types: vec![],
            query_term: None,
            source,
            educationality: 0.0,
            website_url: None,
            booking_url: None,
            phone: None,
            contact_name: None,
            contact_email: None,
            parking_notes: None,
            disclosure_needed: false,
            image_allowed: true,
            availability_status: AvailabilityStatus::Unknown,
            amenities: Amenities::default(),
            rooms: vec![],
            score_total: 0.0,
            score_components: None,
            reason_text: None,
            rank: None,
            raw: Map::new(),
        }
    }

    /// Set the address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Set the city.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Set coordinates.
    pub fn with_coords(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the raw provider type list.
    pub fn with_types(mut self, types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.types = types.into_iter().map(|t| t.into()).collect();
        self
    }

    /// Set the computed anchor distance.
    pub fn with_distance_miles(mut self, distance: f64) -> Self {
        self.distance_miles = Some(distance);
        self
    }

    /// Set the provisional topic-fit score.
    pub fn with_educationality(mut self, educationality: f64) -> Self {
        self.educationality = educationality;
        self
    }

    /// Text the relevance filter matches geography constraints against:
    /// address, city, and state joined, lowercased.
    pub fn address_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(address) = &self.address {
            parts.push(address);
        }
        if let Some(city) = &self.city {
            parts.push(city);
        }
        if let Some(state) = &self.state {
            parts.push(state);
        }
        parts.join(" ").to_lowercase()
    }

    /// Text the keyword blocklist matches against: name, category, and the
    /// raw type list joined, lowercased. Underscored provider types are
    /// flattened to spaces so "assisted_living_facility" matches the same
    /// terms "Assisted Living Facility" would.
    pub fn classification_text(&self) -> String {
        let mut parts: Vec<&str> = vec![&self.name];
        if let Some(category) = &self.category {
            parts.push(category);
        }
        for t in &self.types {
            parts.push(t);
        }
        parts.join(" ").to_lowercase().replace('_', " ")
    }
}

fn default_true() -> bool {
    true
}
