use std::fmt;

use super::icon::PileIcon;
use super::point::{LatLng, LatLngBounds, ScreenPoint};
use crate::projection::Projection;

/// Stable identity of a marker, chosen by whoever owns the marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

/// Marker is a point on the map as seen by the piling engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub position: LatLng,
}

/// Identity of a pile, unique per engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PileId(pub u64);

impl fmt::Display for PileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Marker {
    pub fn new(id: u64, position: LatLng) -> Self {
        Marker {
            id: MarkerId(id),
            position,
        }
    }
}

/// Pile is a group of markers drawn as one symbol at their mean screen position
#[derive(Debug, Clone)]
pub struct Pile {
    id: PileId,
    /// Members in the order they joined, never empty while the pile is live
    members: Vec<Marker>,
    centroid: ScreenPoint,
    position: LatLng,
    pub(crate) shown: bool,
}

impl Pile {
    /// Starts a pile holding a single marker
    pub(crate) fn new<P: Projection + ?Sized>(id: PileId, marker: Marker, view: &P) -> Self {
        Pile {
            id,
            members: vec![marker],
            centroid: view.project(&marker.position),
            position: marker.position,
            shown: false,
        }
    }

    pub fn id(&self) -> PileId {
        self.id
    }

    pub fn members(&self) -> &[Marker] {
        &self.members
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Oldest member of the pile
    pub fn first(&self) -> Option<&Marker> {
        self.members.first()
    }

    /// Mean layer position of the members
    pub fn centroid(&self) -> ScreenPoint {
        self.centroid
    }

    /// Geographic position of the centroid
    pub fn position(&self) -> LatLng {
        self.position
    }

    /// Whether the pile symbol itself is drawn
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn icon(&self) -> PileIcon {
        PileIcon::for_size(self.size())
    }

    pub fn has_marker(&self, id: MarkerId) -> bool {
        self.members.iter().any(|m| m.id == id)
    }

    /// Distance from `point` to the centroid if it is within `radius`
    pub fn in_bounds(&self, point: &ScreenPoint, radius: f64) -> Option<f64> {
        let dist = self.centroid.distance_to(point);
        (dist < radius).then_some(dist)
    }

    /// Geographic bounds of the members
    pub fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(self.members.iter().map(|m| &m.position))
    }

    /// Adds a marker, moving the centroid by weighted average
    ///
    /// `point` is the marker's projection under the current view.
    pub(crate) fn add_marker<P: Projection + ?Sized>(
        &mut self,
        marker: Marker,
        point: ScreenPoint,
        view: &P,
    ) {
        let w = self.members.len() as f64;
        self.members.push(marker);
        self.centroid = ScreenPoint::new(
            (self.centroid.x * w + point.x) / (w + 1.0),
            (self.centroid.y * w + point.y) / (w + 1.0),
        );
        self.position = view.unproject(&self.centroid);
    }

    /// Removes a marker and recomputes the centroid from the remaining members
    ///
    /// Returns the removed marker, or `None` if it was not a member.
    pub(crate) fn remove_marker<P: Projection + ?Sized>(
        &mut self,
        id: MarkerId,
        view: &P,
    ) -> Option<Marker> {
        let at = self.members.iter().position(|m| m.id == id)?;
        let removed = self.members.remove(at);
        self.reset_position(view);
        Some(removed)
    }

    fn reset_position<P: Projection + ?Sized>(&mut self, view: &P) {
        let avg = ScreenPoint::mean(self.members.iter().map(|m| view.project(&m.position)));
        if let Some(avg) = avg {
            self.centroid = avg;
            self.position = view.unproject(&avg);
        }
    }
}
