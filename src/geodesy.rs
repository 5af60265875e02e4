// Geodesy - locator to position, great-circle distance and bearing
//
// The resolver only consumes these results, so they sit behind a trait.
// `SphericalEarth` is the built-in implementation: Maidenhead decoding to the
// centre of the square, haversine distance on a 6371 km sphere.
//
// Coordinates are (longitude, latitude) in degrees, East and North positive.

use serde::Serialize;

use crate::error::GeodesyError;
use crate::locator::is_valid_locator;

/// Mean earth radius in km
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance in km and initial bearing in degrees from true north
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GreatCircle {
    pub distance_km: f64,
    pub azimuth: f64,
}

impl GreatCircle {
    /// The other way round the globe
    pub fn long_path(&self) -> GreatCircle {
        GreatCircle {
            distance_km: 2.0 * std::f64::consts::PI * EARTH_RADIUS_KM - self.distance_km,
            azimuth: (self.azimuth + 180.0) % 360.0,
        }
    }
}

pub trait Geodesy {
    /// Centre of the locator's square as (longitude, latitude)
    fn locator_to_coordinates(&self, locator: &str) -> Result<(f64, f64), GeodesyError>;

    /// Short-path distance and initial azimuth from point 1 to point 2
    fn great_circle(&self, lon1: f64, lat1: f64, lon2: f64, lat2: f64)
        -> Result<GreatCircle, GeodesyError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SphericalEarth;

impl Geodesy for SphericalEarth {
    fn locator_to_coordinates(&self, locator: &str) -> Result<(f64, f64), GeodesyError> {
        if !is_valid_locator(locator) {
            return Err(GeodesyError::InvalidLocator(locator.to_string()));
        }

        let bytes = locator.as_bytes();
        let mut lon = -180.0;
        let mut lat = -90.0;
        let mut lon_span = 360.0;
        let mut lat_span = 180.0;

        for (pair, chunk) in bytes.chunks(2).enumerate() {
            let (divisions, base) = match pair {
                0 => (18.0, b'A'),
                p if p % 2 == 1 => (10.0, b'0'),
                _ => (24.0, b'A'),
            };
            lon_span /= divisions;
            lat_span /= divisions;
            lon += f64::from(chunk[0].to_ascii_uppercase() - base) * lon_span;
            lat += f64::from(chunk[1].to_ascii_uppercase() - base) * lat_span;
        }

        Ok((lon + lon_span / 2.0, lat + lat_span / 2.0))
    }

    fn great_circle(
        &self,
        lon1: f64,
        lat1: f64,
        lon2: f64,
        lat2: f64,
    ) -> Result<GreatCircle, GeodesyError> {
        for (lon, lat) in [(lon1, lat1), (lon2, lat2)] {
            if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
                return Err(GeodesyError::OutOfRange { lon, lat });
            }
        }

        let phi1 = lat1.to_radians();
        let phi2 = lat2.to_radians();
        let d_phi = (lat2 - lat1).to_radians();
        let d_lambda = (lon2 - lon1).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        let y = d_lambda.sin() * phi2.cos();
        let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
        let azimuth = (y.atan2(x).to_degrees() + 360.0) % 360.0;

        Ok(GreatCircle {
            distance_km: EARTH_RADIUS_KM * c,
            azimuth,
        })
    }
}
