//! Geographic coordinate type and distance functions.
//!
//! Coordinates are WGS-84 degrees stored as `f64`.  Road graphs span whole
//! regions, and the heuristic compares distances of hundreds of kilometres
//! against sums of many short edges, so single precision is not enough.
//!
//! Two metrics are provided:
//!
//! | Function                  | Model                | Valid for              |
//! |---------------------------|----------------------|------------------------|
//! | [`GeoPoint::haversine_m`] | great circle         | any pair of points     |
//! | [`GeoPoint::planar_m`]    | equirectangular      | adjacent nodes only    |

/// Mean Earth radius in metres (IUGG).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    ///
    /// This is the shortest distance along the sphere surface, so it never
    /// exceeds the length of any road between the two points.
    pub fn haversine_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        // Clamp: rounding can push `a` a hair above 1 for antipodal points.
        2.0 * a.clamp(0.0, 1.0).sqrt().asin() * EARTH_RADIUS_M
    }

    /// Equirectangular (planar) approximation in metres.
    ///
    /// Treats the small lat/lon delta as Cartesian, shrinking the longitude
    /// component by `cos(mean latitude)`.  Error is well below 0.1 % for
    /// points a few hundred metres apart; do not use it across long
    /// distances.
    pub fn planar_m(self, other: GeoPoint) -> f64 {
        let mean_lat = ((self.lat + other.lat) * 0.5).to_radians();
        let dx = (other.lon - self.lon).to_radians() * mean_lat.cos();
        let dy = (other.lat - self.lat).to_radians();
        dx.hypot(dy) * EARTH_RADIUS_M
    }

    /// `true` if both components are finite and within the WGS-84 range.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

impl std::str::FromStr for GeoPoint {
    type Err = String;

    /// Parse `"lat,lon"` (whitespace around either number is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"lat,lon\", got {s:?}"))?;
        let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude {lat:?}: {e}"))?;
        let lon: f64 = lon.trim().parse().map_err(|e| format!("bad longitude {lon:?}: {e}"))?;
        let p = GeoPoint::new(lat, lon);
        if !p.is_valid() {
            return Err(format!("coordinate {p} out of range"));
        }
        Ok(p)
    }
}
