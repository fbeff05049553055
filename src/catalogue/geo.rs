use geo_types::Coord;

const R_EARTH_M: f64 = 6_371_000.0;

/// Great-circle distance in meters between two points on a spherical Earth.
///
/// Coordinates follow the `geo_types` convention: `x` is longitude and `y` is
/// latitude, both in degrees.
pub fn haversine_distance(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let (lat1, lat2) = (from.y.to_radians(), to.y.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (to.x - from.x).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // clamp guards asin against rounding just above 1 for antipodal points
    2.0 * R_EARTH_M * a.sqrt().min(1.0).asin()
}
