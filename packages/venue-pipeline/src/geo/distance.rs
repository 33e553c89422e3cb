//! Great-circle distance via the haversine formula.

/// Mean Earth radius in statute miles.
const EARTH_RADIUS_MILES: f64 = 3958.7613;

/// Great-circle distance between two points, in statute miles.
///
/// Pure and total for finite inputs, antipodal points included.
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    // Clamp guards against rounding pushing the argument past 1.0
    2.0 * EARTH_RADIUS_MILES * a.sqrt().min(1.0).asin()
}
