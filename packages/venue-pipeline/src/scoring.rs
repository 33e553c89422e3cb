//! Composite suitability scoring.
//!
//! Five weighted components, each normalized to [0,1]. The weights and the
//! fallback rules encode the domain's ranking policy - change them and the
//! product changes, so they are spelled out as constants and preserved
//! exactly.

use crate::types::{AvailabilityStatus, Candidate, ScoreComponents};

const EDUCATIONALITY_WEIGHT: f64 = 0.35;
const AVAILABILITY_WEIGHT: f64 = 0.25;
const CAPACITY_WEIGHT: f64 = 0.20;
const AMENITIES_WEIGHT: f64 = 0.15;
const LOGISTICS_WEIGHT: f64 = 0.05;

/// A venue counts as "close" for logistics scoring under this distance.
const NEARBY_MILES: f64 = 6.0;

/// Theater-style seating clears capacity at this headcount.
const THEATER_MIN: u32 = 26;

/// Classroom-capacity range a room should fall in to fully fit the seminar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityTarget {
    pub min: u32,
    pub max: u32,
}

impl Default for CapacityTarget {
    fn default() -> Self {
        Self { min: 20, max: 30 }
    }
}

impl CapacityTarget {
    /// Derive the target range from an expected attendee count.
    ///
    /// Two thirds of the headcount to the headcount itself, with the upper
    /// bound never dropping below the default 30. At the canonical 30
    /// attendees this reproduces the default [20, 30] range.
    pub fn for_attendees(attendees: Option<u32>) -> Self {
        match attendees {
            Some(n) if n > 0 => Self {
                min: n * 2 / 3,
                max: n.max(30),
            },
            _ => Self::default(),
        }
    }
}

/// A scored candidate's breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    /// Weighted sum, rounded to 4 decimal places
    pub total: f64,
    /// Fixed-format explanation, one component per token
    pub reason: String,
    pub components: ScoreComponents,
}

/// Category fallback used when a candidate carries no provider-derived
/// educationality signal.
fn category_weight(category: &str) -> f64 {
    match category {
        "library" => 1.0,
        "community_college" => 0.9,
        "tech_school" => 0.85,
        "senior_center" => 0.8,
        "community_center" => 0.6,
        "hotel_conference" | "golf_banquet" => 0.4,
        _ => 0.5,
    }
}

fn educationality_score(candidate: &Candidate) -> f64 {
    if candidate.educationality != 0.0 {
        return candidate.educationality;
    }
    let category = candidate
        .category
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    category_weight(&category)
}

fn availability_score(status: AvailabilityStatus) -> f64 {
    match status {
        AvailabilityStatus::Available => 1.0,
        AvailabilityStatus::Maybe => 0.6,
        AvailabilityStatus::NotAvailable => 0.0,
        AvailabilityStatus::Unknown => 0.5,
    }
}

/// Best room wins: 1.0 for a classroom capacity inside the target range,
/// else 0.7 for theater seating of at least [`THEATER_MIN`], else 0.0.
/// No rooms at all scores 0.0.
fn capacity_score(candidate: &Candidate, target: CapacityTarget) -> f64 {
    let upper = target.max.max(30);
    candidate
        .rooms
        .iter()
        .map(|room| {
            let classroom = room.capacity_classroom.unwrap_or(0);
            let theater = room.capacity_theater.unwrap_or(0);
            if classroom >= target.min && classroom <= upper {
                1.0
            } else if theater >= THEATER_MIN {
                0.7
            } else {
                0.0
            }
        })
        .fold(0.0, f64::max)
}

fn amenities_score(candidate: &Candidate) -> f64 {
    (0.25 * f64::from(candidate.amenities.count())).min(1.0)
}

fn logistics_score(candidate: &Candidate) -> f64 {
    let mut score: f64 = 0.6;
    if candidate.parking_notes.is_some() {
        score += 0.2;
    }
    // Missing distance counts as far
    if candidate.distance_miles.is_some_and(|d| d <= NEARBY_MILES) {
        score += 0.2;
    }
    score.min(1.0)
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Score a candidate. Deterministic: the same input always yields
/// bit-identical output.
pub fn score(candidate: &Candidate, target: CapacityTarget) -> Score {
    let components = ScoreComponents {
        educationality: educationality_score(candidate),
        availability: availability_score(candidate.availability_status),
        capacity_fit: capacity_score(candidate, target),
        amenities: amenities_score(candidate),
        logistics: logistics_score(candidate),
    };

    let total = round4(
        components.educationality * EDUCATIONALITY_WEIGHT
            + components.availability * AVAILABILITY_WEIGHT
            + components.capacity_fit * CAPACITY_WEIGHT
            + components.amenities * AMENITIES_WEIGHT
            + components.logistics * LOGISTICS_WEIGHT,
    );

    let reason = format!(
        "Edu:{:.2} Avail:{:.2} Cap:{:.2} Ams:{:.2} Log:{:.2}",
        components.educationality,
        components.availability,
        components.capacity_fit,
        components.amenities,
        components.logistics
    );

    Score {
        total,
        reason,
        components,
    }
}
