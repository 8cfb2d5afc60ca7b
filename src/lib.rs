//! Marker piling and compass navigation for slide maps
//!
//! Markers close to each other on screen are gathered into piles that are
//! rebuilt whenever the view changes, and every slide position gets a
//! compass of its nearest neighbors for arrow-key navigation.

pub mod cluster;
pub mod compass;
pub mod error;
pub mod projection;
pub mod slideshow;


pub use cluster::{
    LatLng, LatLngBounds, Layer, Leafpile, Marker, MarkerId, Pile, PileClick, PileId, PileOptions,
    PopupTarget, ScreenPoint, SetView,
};
pub use compass::{Direction, NavigationIndex, Neighbor, build_navigation_index};
pub use error::{PileError, PileResult};
pub use projection::{MapView, MercatorView, Projection};
pub use slideshow::{Arrow, Slide, SlideMapper, SlideOptions, Transition};
