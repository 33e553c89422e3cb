//! Core data types for the venue pipeline.

pub mod candidate;
pub mod query;

pub use candidate::{Amenities, AvailabilityStatus, Candidate, Room, ScoreComponents, Source};
pub use query::QuerySpec;
