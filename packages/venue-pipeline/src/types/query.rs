//! The pipeline's input: a structured venue search request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A venue search request.
///
/// Discovery anchors on `cities` when any are given, otherwise on `zips`.
/// With no location terms at all, discovery returns nothing; with no
/// `state`/`zips`/`cities` constraints the relevance filter passes every
/// candidate through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuerySpec {
    /// City names to anchor discovery on (e.g. "Greenville, NC")
    #[serde(default)]
    pub cities: Vec<String>,

    /// ZIP codes to anchor discovery on, used when `cities` is empty
    #[serde(default)]
    pub zips: Vec<String>,

    /// Search radius around each anchor, in statute miles
    pub radius_miles: f64,

    /// Two-letter state code for strict geographic filtering
    pub state: Option<String>,

    /// Expected attendee count, consumed by capacity-fit scoring
    pub attendees: Option<u32>,

    /// Start of the desired date window
    pub window_start: Option<NaiveDate>,

    /// End of the desired date window
    pub window_end: Option<NaiveDate>,

    /// Preferred time slots like "11:00" or "18:30"
    #[serde(default)]
    pub preferred_slots: Vec<String>,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            cities: vec![],
            zips: vec![],
            radius_miles: 6.0,
            state: None,
            attendees: None,
            window_start: None,
            window_end: None,
            preferred_slots: vec![],
        }
    }
}

impl QuerySpec {
    /// Create an empty query with the default 6-mile radius.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the city anchors.
    pub fn with_cities(mut self, cities: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.cities = cities.into_iter().map(|c| c.into()).collect();
        self
    }

    /// Set the ZIP code anchors.
    pub fn with_zips(mut self, zips: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.zips = zips.into_iter().map(|z| z.into()).collect();
        self
    }

    /// Set the search radius in miles.
    pub fn with_radius_miles(mut self, radius: f64) -> Self {
        self.radius_miles = radius;
        self
    }

    /// Set the state code for strict geographic filtering.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Set the expected attendee count.
    pub fn with_attendees(mut self, attendees: u32) -> Self {
        self.attendees = Some(attendees);
        self
    }

    /// Set the desired date window.
    pub fn with_window(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.window_start = Some(start);
        self.window_end = Some(end);
        self
    }

    /// The anchor terms discovery should geocode: cities first, else ZIPs.
    pub fn anchor_terms(&self) -> &[String] {
        if !self.cities.is_empty() {
            &self.cities
        } else {
            &self.zips
        }
    }

    /// Whether the query carries any location term at all.
    pub fn has_location(&self) -> bool {
        !self.cities.is_empty() || !self.zips.is_empty()
    }
}
