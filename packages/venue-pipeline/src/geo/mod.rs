//! Geographic primitives: anchor resolution and distance.

pub mod distance;
pub mod geocoder;

pub use distance::haversine_miles;
pub use geocoder::{Anchor, Geocoder, GooglePlacesGeocoder, MockGeocoder};
