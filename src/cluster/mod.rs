//! Package cluster implements screen-space piling of (lat, lon) markers
pub mod distance;
pub mod icon;
pub mod leafpile;
pub mod options;
pub mod pile;
pub mod point;

#[cfg(test)]
mod pile_test;
#[cfg(test)]
mod point_test;
#[cfg(test)]
pub(crate) mod testing;

pub use distance::{DEGREE_RAD, EARTH_R, distance_spherical, lat_leg, lng_leg};
pub use icon::PileIcon;
pub use leafpile::{Layer, Leafpile, PileClick, PopupTarget, SetView};
pub use options::PileOptions;
pub use pile::{Marker, MarkerId, Pile, PileId};
pub use point::{LatLng, LatLngBounds, ScreenPoint};
