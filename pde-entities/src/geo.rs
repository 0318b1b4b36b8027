use std::{f64::consts::PI, fmt, str::FromStr};

use itertools::Itertools as _;
use thiserror::Error;

pub const LAT_DEG_MIN: f64 = -90.0;
pub const LAT_DEG_MAX: f64 = 90.0;
pub const LNG_DEG_MIN: f64 = -180.0;
pub const LNG_DEG_MAX: f64 = 180.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeoPointError {
    #[error("Invalid longitude degrees: {0}")]
    Longitude(f64),
    #[error("Invalid latitude degrees: {0}")]
    Latitude(f64),
    #[error("Failed to parse coordinate '{0}', expected 'longitude,latitude'")]
    Parse(String),
}

/// A geographical position in degrees.
///
/// The order of the components is always `[longitude, latitude]`,
/// both in the string representation and in the constructors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    lng: f64,
    lat: f64,
}

impl GeoPoint {
    pub fn try_from_lng_lat_deg(lng: f64, lat: f64) -> Result<Self, GeoPointError> {
        if !(LNG_DEG_MIN..=LNG_DEG_MAX).contains(&lng) {
            return Err(GeoPointError::Longitude(lng));
        }
        if !(LAT_DEG_MIN..=LAT_DEG_MAX).contains(&lat) {
            return Err(GeoPointError::Latitude(lat));
        }
        Ok(Self { lng, lat })
    }

    /// Create a point from degrees that are known to be in range.
    pub fn from_lng_lat_deg(lng: f64, lat: f64) -> Self {
        debug_assert!((LNG_DEG_MIN..=LNG_DEG_MAX).contains(&lng));
        debug_assert!((LAT_DEG_MIN..=LAT_DEG_MAX).contains(&lat));
        Self { lng, lat }
    }

    pub const fn lng(self) -> f64 {
        self.lng
    }

    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub fn to_lat_lng_rad(self) -> (f64, f64) {
        (self.lat.to_radians(), self.lng.to_radians())
    }

    /// Calculate the great-circle distance on the surface
    /// of the earth using a special case of the Vincenty
    /// formula for numerical accuracy.
    /// Reference: https://en.wikipedia.org/wiki/Great-circle_distance
    pub fn distance(p1: GeoPoint, p2: GeoPoint) -> Distance {
        let (lat1_rad, lng1_rad) = p1.to_lat_lng_rad();
        let (lat2_rad, lng2_rad) = p2.to_lat_lng_rad();

        let (lat1_sin, lat1_cos) = (lat1_rad.sin(), lat1_rad.cos());
        let (lat2_sin, lat2_cos) = (lat2_rad.sin(), lat2_rad.cos());

        let dlng = (lng1_rad - lng2_rad).abs();
        let (dlng_sin, dlng_cos) = (dlng.sin(), dlng.cos());

        let nom1 = lat2_cos * dlng_sin;
        let nom2 = lat1_cos * lat2_sin - lat1_sin * lat2_cos * dlng_cos;

        let nom = (nom1 * nom1 + nom2 * nom2).sqrt();
        let denom = lat1_sin * lat2_sin + lat1_cos * lat2_cos * dlng_cos;

        Distance::from_meters(MEAN_EARTH_RADIUS.to_meters() * nom.atan2(denom))
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lng, self.lat)
    }
}

impl FromStr for GeoPoint {
    type Err = GeoPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((lng_str, lat_str)) = s.split(',').collect_tuple() else {
            return Err(GeoPointError::Parse(s.to_owned()));
        };
        match (lng_str.trim().parse::<f64>(), lat_str.trim().parse::<f64>()) {
            (Ok(lng), Ok(lat)) => Self::try_from_lng_lat_deg(lng, lat),
            _ => Err(GeoPointError::Parse(s.to_owned())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Distance(pub f64);

impl Distance {
    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub const fn to_meters(self) -> f64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}

impl std::ops::Add for Distance {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

pub const MEAN_EARTH_RADIUS: Distance = Distance::from_meters(6_371_200.0);

/// A disk-shaped region on the surface of the earth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: GeoPoint,
    pub radius: Distance,
}

impl Circle {
    pub const fn new(center: GeoPoint, radius: Distance) -> Self {
        Self { center, radius }
    }

    pub fn contains_point(&self, pt: GeoPoint) -> bool {
        GeoPoint::distance(self.center, pt) <= self.radius
    }

    /// Two filled disks overlap if the distance of their
    /// centers does not exceed the sum of their radii.
    pub fn intersects(&self, other: &Circle) -> bool {
        GeoPoint::distance(self.center, other.center) <= self.radius + other.radius
    }

    pub fn bounding_bbox(&self) -> MapBbox {
        MapBbox::centered_around(self.center, self.radius)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapBbox {
    sw: GeoPoint,
    ne: GeoPoint,
}

impl MapBbox {
    pub const fn new(sw: GeoPoint, ne: GeoPoint) -> Self {
        Self { sw, ne }
    }

    pub fn whole_world() -> Self {
        Self::new(
            GeoPoint::from_lng_lat_deg(LNG_DEG_MIN, LAT_DEG_MIN),
            GeoPoint::from_lng_lat_deg(LNG_DEG_MAX, LAT_DEG_MAX),
        )
    }

    /// The smallest box that covers all points within
    /// the given distance around the center.
    ///
    /// The longitude range of the resulting box is inverse
    /// if it wraps around the antimeridian.
    pub fn centered_around(center: GeoPoint, radius: Distance) -> Self {
        let angle_rad = radius.to_meters() / MEAN_EARTH_RADIUS.to_meters();
        if angle_rad >= PI {
            return Self::whole_world();
        }
        let dlat_deg = angle_rad.to_degrees();
        let sw_lat = center.lat() - dlat_deg;
        let ne_lat = center.lat() + dlat_deg;
        if sw_lat <= LAT_DEG_MIN || ne_lat >= LAT_DEG_MAX {
            // Covers a pole
            return Self::new(
                GeoPoint::from_lng_lat_deg(LNG_DEG_MIN, sw_lat.max(LAT_DEG_MIN)),
                GeoPoint::from_lng_lat_deg(LNG_DEG_MAX, ne_lat.min(LAT_DEG_MAX)),
            );
        }
        let dlng_deg = (angle_rad.sin() / center.lat().to_radians().cos())
            .min(1.0)
            .asin()
            .to_degrees();
        let mut sw_lng = center.lng() - dlng_deg;
        if sw_lng < LNG_DEG_MIN {
            sw_lng += 360.0;
        }
        let mut ne_lng = center.lng() + dlng_deg;
        if ne_lng > LNG_DEG_MAX {
            ne_lng -= 360.0;
        }
        Self::new(
            GeoPoint::from_lng_lat_deg(sw_lng, sw_lat),
            GeoPoint::from_lng_lat_deg(ne_lng, ne_lat),
        )
    }

    pub const fn south_west(&self) -> GeoPoint {
        self.sw
    }

    pub const fn north_east(&self) -> GeoPoint {
        self.ne
    }

    pub fn is_valid(&self) -> bool {
        self.sw.lat() <= self.ne.lat()
    }

    /// The longitude range wraps around the antimeridian.
    pub fn is_inverse(&self) -> bool {
        self.sw.lng() > self.ne.lng()
    }

    pub fn contains_point(&self, pt: GeoPoint) -> bool {
        debug_assert!(self.is_valid());
        if pt.lat() < self.sw.lat() || pt.lat() > self.ne.lat() {
            return false;
        }
        if self.is_inverse() {
            // inverse (exclusive)
            !(pt.lng() > self.ne.lng() && pt.lng() < self.sw.lng())
        } else {
            // regular (inclusive)
            pt.lng() >= self.sw.lng() && pt.lng() <= self.ne.lng()
        }
    }
}

impl fmt::Display for MapBbox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.sw, self.ne)
    }
}
