//! Geographic and screen-space points used by piling and navigation

/// LatLng represents a geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// ScreenPoint is a layer pixel position under the current view transform
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// LatLngBounds is a geographic rectangle (south-west, north-east corners)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        ScreenPoint { x, y }
    }

    /// Euclidean pixel distance
    pub fn distance_to(&self, other: &ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Arithmetic mean of a set of points, `None` when empty
    pub fn mean<I>(points: I) -> Option<ScreenPoint>
    where
        I: IntoIterator<Item = ScreenPoint>,
    {
        let mut sum = ScreenPoint::default();
        let mut n = 0usize;
        for p in points {
            sum.x += p.x;
            sum.y += p.y;
            n += 1;
        }
        if n == 0 {
            return None;
        }
        Some(ScreenPoint::new(sum.x / n as f64, sum.y / n as f64))
    }
}

impl LatLngBounds {
    /// Calculates the bounds of a set of coordinates
    ///
    /// Returns `None` for an empty set.
    pub fn from_points<'a, I>(points: I) -> Option<LatLngBounds>
    where
        I: IntoIterator<Item = &'a LatLng>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = LatLngBounds {
            south_west: first,
            north_east: first,
        };
        for pt in iter {
            bounds.extend(pt);
        }
        Some(bounds)
    }

    /// Grows the bounds to include `pt`
    pub fn extend(&mut self, pt: &LatLng) {
        self.south_west.lat = self.south_west.lat.min(pt.lat);
        self.south_west.lng = self.south_west.lng.min(pt.lng);
        self.north_east.lat = self.north_east.lat.max(pt.lat);
        self.north_east.lng = self.north_east.lng.max(pt.lng);
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }
}
