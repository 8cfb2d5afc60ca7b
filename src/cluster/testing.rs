//! Test double for the projection: one pixel per degree at zoom 0

use super::point::{LatLng, LatLngBounds, ScreenPoint};
use crate::projection::{MapView, Projection};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FlatView {
    pub center: LatLng,
    pub zoom: i32,
    /// Answer of `bounds_zoom`, whatever the bounds
    pub fit_zoom: i32,
}

impl FlatView {
    pub fn at_zoom(zoom: i32) -> Self {
        FlatView {
            center: LatLng::new(0.0, 0.0),
            zoom,
            fit_zoom: zoom,
        }
    }

    fn scale(&self) -> f64 {
        2f64.powi(self.zoom)
    }
}

impl Projection for FlatView {
    fn project(&self, pt: &LatLng) -> ScreenPoint {
        ScreenPoint::new(pt.lng * self.scale(), -pt.lat * self.scale())
    }

    fn unproject(&self, pt: &ScreenPoint) -> LatLng {
        LatLng::new(-pt.y / self.scale(), pt.x / self.scale())
    }

    fn zoom(&self) -> i32 {
        self.zoom
    }

    fn bounds_zoom(&self, _bounds: &LatLngBounds) -> i32 {
        self.fit_zoom
    }
}

impl MapView for FlatView {
    fn set_view(&mut self, center: LatLng, zoom: i32) {
        self.center = center;
        self.zoom = zoom;
    }

    fn pan_to(&mut self, center: LatLng) {
        self.center = center;
    }
}
