//! Venue enrichment seam.
//!
//! A real enricher would crawl the venue's website for contact, booking,
//! and room details; that is an external collaborator and out of scope
//! here. The stub fills deterministic defaults so scoring always has the
//! fields it reads.

use async_trait::async_trait;

use crate::types::{Candidate, Room};

/// Augments a candidate with contact/booking/room details.
///
/// Implementations may be slow and asynchronous (site crawls, phone
/// calls); the pipeline awaits them one candidate at a time.
#[async_trait]
pub trait Enricher: Send + Sync {
    async fn enrich(&self, candidate: Candidate) -> Candidate;
}

/// Pass-through enricher that only guarantees defaults.
///
/// Adds one sample meeting room when the provider returned none, so
/// capacity-fit scoring has something to evaluate.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubEnricher;

impl StubEnricher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Enricher for StubEnricher {
    async fn enrich(&self, mut candidate: Candidate) -> Candidate {
        if candidate.rooms.is_empty() {
            candidate.rooms = vec![Room {
                room_name: Some("Main Meeting Room".to_string()),
                capacity_classroom: Some(24),
                capacity_theater: Some(40),
                fees_hour: Some(50.0),
                fees_day: Some(300.0),
                deposit: Some(0.0),
                rental_policy_url: None,
            }];
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Source;

    #[tokio::test]
    async fn test_stub_adds_sample_room_when_missing() {
        let candidate = Candidate::new("Bare Hall", Source::Google);
        let enriched = StubEnricher::new().enrich(candidate).await;

        assert_eq!(enriched.rooms.len(), 1);
        assert_eq!(enriched.rooms[0].capacity_classroom, Some(24));
        assert_eq!(enriched.rooms[0].fees_day, Some(300.0));
    }

    #[tokio::test]
    async fn test_stub_keeps_existing_rooms() {
        let mut candidate = Candidate::new("Furnished Hall", Source::Google);
        candidate.rooms = vec![Room {
            room_name: Some("Auditorium".to_string()),
            capacity_theater: Some(120),
            ..Default::default()
        }];

        let enriched = StubEnricher::new().enrich(candidate).await;
        assert_eq!(enriched.rooms.len(), 1);
        assert_eq!(enriched.rooms[0].room_name.as_deref(), Some("Auditorium"));
    }

    #[tokio::test]
    async fn test_stub_preserves_enrichment_defaults() {
        let candidate = Candidate::new("Bare Hall", Source::Google);
        let enriched = StubEnricher::new().enrich(candidate).await;

        assert!(!enriched.disclosure_needed);
        assert!(enriched.image_allowed);
        assert!(enriched.contact_name.is_none());
        assert!(enriched.contact_email.is_none());
        assert!(enriched.parking_notes.is_none());
    }
}
