//! Great-circle initial bearing toward the Kaaba.

pub const KAABA_LAT: f64 = 21.4225;
pub const KAABA_LON: f64 = 39.8262;

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Initial great-circle bearing from (`latitude`, `longitude`) to the
/// Kaaba, in degrees clockwise from true north, normalized to
/// `[0, 360)`. Standing at the Kaaba itself yields 0 rather than NaN.
pub fn qibla_bearing(latitude: f64, longitude: f64) -> f64 {
    let phi1 = latitude.to_radians();
    let phi2 = KAABA_LAT.to_radians();
    let delta_lon = (KAABA_LON - longitude).to_radians();

    let x = delta_lon.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lon.cos();

    x.atan2(y).to_degrees().rem_euclid(360.0)
}

/// Nearest of the eight compass points, each owning a 45° slice
/// centered on it.
pub fn direction_label(bearing: f64) -> &'static str {
    let idx = (bearing.rem_euclid(360.0) / 45.0).round() as usize % 8;
    COMPASS_POINTS[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearing_due_north_from_same_meridian() {
        // South of the Kaaba on its own meridian: straight north.
        assert!(qibla_bearing(10.0, KAABA_LON).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_due_south_from_same_meridian() {
        assert!((qibla_bearing(35.0, KAABA_LON) - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_bearing_from_new_york() {
        // Well-known value: roughly 58.5°, i.e. northeast, not the
        // rhumb-line southeast people expect.
        let b = qibla_bearing(40.7128, -74.0060);
        assert!((b - 58.48).abs() < 0.1, "got {}", b);
    }

    #[test]
    fn test_bearing_from_jakarta_points_west() {
        let b = qibla_bearing(-6.2, 106.8);
        assert!((b - 295.1).abs() < 0.5, "got {}", b);
    }

    #[test]
    fn test_bearing_at_kaaba_is_zero_not_nan() {
        let b = qibla_bearing(KAABA_LAT, KAABA_LON);
        assert!(b.is_finite());
        assert_eq!(b, 0.0);
    }

    #[test]
    fn test_bearing_always_normalized() {
        for &(lat, lon) in &[
            (31.5497, 74.3436),
            (-33.8688, 151.2093),
            (51.5074, -0.1278),
            (64.1466, -21.9426),
            (-54.8019, -68.3030),
        ] {
            let b = qibla_bearing(lat, lon);
            assert!((0.0..360.0).contains(&b), "({}, {}) gave {}", lat, lon, b);
        }
    }

    #[test]
    fn test_direction_label_slices() {
        assert_eq!(direction_label(0.0), "N");
        assert_eq!(direction_label(22.4), "N");
        assert_eq!(direction_label(22.5), "NE");
        assert_eq!(direction_label(90.0), "E");
        assert_eq!(direction_label(255.9), "W");
        assert_eq!(direction_label(337.5), "N");
        assert_eq!(direction_label(359.9), "N");
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn bearing_always_in_range(lat in -89.0f64..89.0, lon in -180.0f64..180.0) {
                let b = qibla_bearing(lat, lon);
                prop_assert!(b.is_finite(), "({}, {}) gave non-finite {}", lat, lon, b);
                prop_assert!((0.0..360.0).contains(&b),
                    "({}, {}) gave out-of-range {}", lat, lon, b);
            }

            #[test]
            fn label_always_a_compass_point(bearing in 0.0f64..360.0) {
                let label = direction_label(bearing);
                prop_assert!(COMPASS_POINTS.contains(&label));
            }
        }
    }
}
