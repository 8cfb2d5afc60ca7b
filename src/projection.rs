//! Map view collaborators
//!
//! The piling engine only needs to turn coordinates into layer pixels and
//! back, and to know the zoom level. [`MercatorView`] is a plain spherical
//! Mercator implementation with 256px tiles, enough to drive the engine
//! from the command line and in tests.

use crate::cluster::{LatLng, LatLngBounds, ScreenPoint};
use std::f64::consts::PI;

/// Converts between geographic coordinates and layer pixels of a view
pub trait Projection {
    /// Projects a coordinate to a layer pixel under the current view
    fn project(&self, pt: &LatLng) -> ScreenPoint;

    /// Reverse of [`Projection::project`]
    fn unproject(&self, pt: &ScreenPoint) -> LatLng;

    /// Current integer zoom level
    fn zoom(&self) -> i32;

    /// Largest zoom level at which `bounds` fits inside the view
    fn bounds_zoom(&self, bounds: &LatLngBounds) -> i32;
}

/// A projection the slideshow can also move around
pub trait MapView: Projection {
    fn set_view(&mut self, center: LatLng, zoom: i32);

    fn pan_to(&mut self, center: LatLng);
}

/// Spherical Mercator earth radius in meters
const MERCATOR_R: f64 = 6378137.0;
/// Latitude where the square Mercator world ends
const MAX_LATITUDE: f64 = 85.0511287798;
const TILE_SIZE: f64 = 256.0;

/// Spherical Mercator view of a fixed pixel size
#[derive(Debug, Clone, PartialEq)]
pub struct MercatorView {
    center: LatLng,
    zoom: i32,
    min_zoom: i32,
    max_zoom: i32,
    width: f64,
    height: f64,
}

impl MercatorView {
    pub fn new(center: LatLng, zoom: i32, width: f64, height: f64) -> Self {
        MercatorView {
            center,
            zoom,
            min_zoom: 0,
            max_zoom: 18,
            width,
            height,
        }
    }

    /// Restricts zoom to `[min_zoom, max_zoom]`, clamping the current zoom
    pub fn with_zoom_limits(mut self, min_zoom: i32, max_zoom: i32) -> Self {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
        self
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    /// Absolute pixel position of a coordinate at `zoom`
    fn world_pixel(pt: &LatLng, zoom: i32) -> ScreenPoint {
        let scale = TILE_SIZE * 2f64.powi(zoom);
        let lat = pt.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let sin_lat = (lat * PI / 180.0).sin();
        let x = MERCATOR_R * pt.lng * PI / 180.0;
        let y = MERCATOR_R * ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / 2.0;
        let k = 0.5 / (PI * MERCATOR_R);
        ScreenPoint::new(scale * (k * x + 0.5), scale * (-k * y + 0.5))
    }

    fn world_latlng(px: &ScreenPoint, zoom: i32) -> LatLng {
        let scale = TILE_SIZE * 2f64.powi(zoom);
        let k = 0.5 / (PI * MERCATOR_R);
        let x = (px.x / scale - 0.5) / k;
        let y = (px.y / scale - 0.5) / -k;
        LatLng::new(
            (2.0 * (y / MERCATOR_R).exp().atan() - PI / 2.0) * 180.0 / PI,
            x * 180.0 / PI / MERCATOR_R,
        )
    }

    /// Top-left pixel of the view, layer points are relative to it
    fn pixel_origin(&self) -> ScreenPoint {
        let c = Self::world_pixel(&self.center, self.zoom);
        ScreenPoint::new(c.x - self.width / 2.0, c.y - self.height / 2.0)
    }
}

impl Projection for MercatorView {
    fn project(&self, pt: &LatLng) -> ScreenPoint {
        let px = Self::world_pixel(pt, self.zoom);
        let origin = self.pixel_origin();
        ScreenPoint::new(px.x - origin.x, px.y - origin.y)
    }

    fn unproject(&self, pt: &ScreenPoint) -> LatLng {
        let origin = self.pixel_origin();
        Self::world_latlng(&ScreenPoint::new(pt.x + origin.x, pt.y + origin.y), self.zoom)
    }

    fn zoom(&self) -> i32 {
        self.zoom
    }

    fn bounds_zoom(&self, bounds: &LatLngBounds) -> i32 {
        let fits = |zoom: i32| {
            let sw = Self::world_pixel(&bounds.south_west, zoom);
            let ne = Self::world_pixel(&bounds.north_east, zoom);
            (ne.x - sw.x).abs() <= self.width && (sw.y - ne.y).abs() <= self.height
        };
        let mut zoom = self.min_zoom;
        while zoom < self.max_zoom && fits(zoom + 1) {
            zoom += 1;
        }
        zoom
    }
}

impl MapView for MercatorView {
    fn set_view(&mut self, center: LatLng, zoom: i32) {
        self.center = center;
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    fn pan_to(&mut self, center: LatLng) {
        self.center = center;
    }
}
