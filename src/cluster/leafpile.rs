//! Greedy screen-space piling of map markers
//!
//! Every marker joins the nearest live pile whose centroid lies within the
//! piling radius, or starts a new pile. The result depends on insertion
//! order; it is a valid partition, not an optimal one.
//!
//! Piles are rebuilt from scratch whenever the view changes, so pile ids
//! are not stable across zoom levels.

use std::collections::{BTreeMap, HashMap};

use bitvec::prelude::*;
use tracing::{debug, trace};

use super::options::{PileOptions, check_radius};
use super::pile::{Marker, MarkerId, Pile, PileId};
use super::point::LatLng;
use crate::error::{PileError, PileResult};
use crate::projection::Projection;

/// Something handed to the piling layer
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Marker(Marker),
    /// Any non-point layer (polylines, tiles, ...), named by kind
    Other { kind: String },
}

/// View change requested by a pile click
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetView {
    pub center: LatLng,
    pub zoom: i32,
}

/// Result of clicking a pile
///
/// The engine never moves the view itself. The caller applies
/// [`PileClick::command`] (or drops it) and then reports the view change.
#[derive(Debug, Clone, PartialEq)]
pub struct PileClick {
    pub pile: PileId,
    pub markers: Vec<Marker>,
    /// More than one member, the default reason to zoom in
    pub zooming: bool,
    zoom_to: Option<SetView>,
}

impl PileClick {
    /// Drops the zoom command of this click
    pub fn cancel_zoom(&mut self) {
        self.zoom_to = None;
    }

    pub fn command(&self) -> Option<SetView> {
        self.zoom_to
    }
}

/// Where a marker's popup should open
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PopupTarget {
    /// The marker is drawn on its own
    Marker(LatLng),
    /// The marker is hidden inside a pile
    Pile { pile: PileId, position: LatLng },
}

/// Piling layer for a map view
///
/// Markers can be added before a view is attached; they are filed once
/// [`Leafpile::attach`] is called.
#[derive(Debug)]
pub struct Leafpile<P> {
    options: PileOptions,
    view: Option<P>,
    /// Registered markers in insertion order
    markers: Vec<Marker>,
    /// Raw marker drawn on the map, parallel to `markers`
    shown: BitVec,
    /// Position of each marker in `markers`
    slots: HashMap<MarkerId, usize>,
    piles: BTreeMap<PileId, Pile>,
    next_pile: u64,
    enabled: bool,
    /// Piling was switched off by zooming in, not by the user
    zoom_disabled: bool,
}

impl<P: Projection> Leafpile<P> {
    pub fn new(options: PileOptions) -> PileResult<Self> {
        options.validate()?;
        let enabled = options.auto_enable && options.radius > 0.0;
        Ok(Leafpile {
            options,
            view: None,
            markers: Vec::new(),
            shown: BitVec::new(),
            slots: HashMap::new(),
            piles: BTreeMap::new(),
            next_pile: 0,
            enabled,
            zoom_disabled: false,
        })
    }

    pub fn options(&self) -> &PileOptions {
        &self.options
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_attached(&self) -> bool {
        self.view.is_some()
    }

    pub fn view(&self) -> Option<&P> {
        self.view.as_ref()
    }

    /// Mutable access to the attached view
    ///
    /// Call [`Leafpile::on_view_changed`] after moving the view.
    pub fn view_mut(&mut self) -> Option<&mut P> {
        self.view.as_mut()
    }

    /// Attaches a view and files every registered marker under it
    pub fn attach(&mut self, view: P) {
        let zoom = view.zoom();
        self.view = Some(view);
        if self.enabled && zoom > self.options.max_zoom_level {
            self.enabled = false;
            self.zoom_disabled = true;
        }
        debug!(
            zoom,
            enabled = self.enabled,
            markers = self.markers.len(),
            "attached view"
        );
        self.rebuild();
    }

    /// Takes everything off the map and returns the view
    ///
    /// Registered markers are kept for the next attach.
    pub fn detach(&mut self) -> Option<P> {
        self.piles.clear();
        self.shown.fill(false);
        self.view.take()
    }

    /// Registered markers in insertion order
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Piles drawn on the map, in creation order
    ///
    /// A marker standing alone is not a pile unless `single_piles` is set.
    pub fn piles(&self) -> impl Iterator<Item = &Pile> {
        self.piles.values().filter(|p| p.is_shown())
    }

    /// Every pile, including hidden one-member piles later markers may join
    pub(crate) fn all_piles(&self) -> impl Iterator<Item = &Pile> {
        self.piles.values()
    }

    pub fn pile(&self, id: PileId) -> Option<&Pile> {
        self.piles.get(&id).filter(|p| p.is_shown())
    }

    /// Drawn pile holding the marker
    pub fn pile_of(&self, id: MarkerId) -> Option<&Pile> {
        self.piles().find(|p| p.has_marker(id))
    }

    /// Whether the raw marker is drawn on the map
    pub fn is_shown(&self, id: MarkerId) -> bool {
        self.index_of(id).is_some_and(|i| self.shown[i])
    }

    /// Where a popup for the marker should open
    pub fn popup_target(&self, id: MarkerId) -> Option<PopupTarget> {
        let marker = self.markers[self.index_of(id)?];
        if self.is_shown(id) {
            return Some(PopupTarget::Marker(marker.position));
        }
        self.pile_of(id).map(|pile| PopupTarget::Pile {
            pile: pile.id(),
            position: pile.position(),
        })
    }

    /// Adds a layer, only markers are accepted
    pub fn add_layer(&mut self, layer: Layer) -> PileResult<()> {
        match layer {
            Layer::Marker(marker) => {
                self.add_marker(marker);
                Ok(())
            }
            Layer::Other { kind } => Err(PileError::NotAMarker(kind)),
        }
    }

    pub fn remove_layer(&mut self, layer: &Layer) -> PileResult<Option<Marker>> {
        match layer {
            Layer::Marker(marker) => Ok(self.remove_marker(marker.id)),
            Layer::Other { kind } => Err(PileError::NotAMarker(kind.clone())),
        }
    }

    /// Registers a marker and files it into a pile or onto the map
    ///
    /// Adding an id that is already registered moves that marker.
    pub fn add_marker(&mut self, marker: Marker) {
        if self.slots.contains_key(&marker.id) {
            self.remove_marker(marker.id);
        }
        let at = self.markers.len();
        self.markers.push(marker);
        self.shown.push(false);
        self.slots.insert(marker.id, at);
        if self.view.is_none() {
            return;
        }

        if self.enabled {
            self.pile_marker(at);
        } else {
            self.shown.set(at, true);
        }
    }

    /// Unregisters a marker and takes it out of its pile
    pub fn remove_marker(&mut self, id: MarkerId) -> Option<Marker> {
        let at = self.slots.remove(&id)?;
        let marker = self.markers.remove(at);
        self.shown.remove(at);
        for (i, m) in self.markers.iter().enumerate().skip(at) {
            self.slots.insert(m.id, i);
        }
        if self.enabled {
            self.unpile(id);
        }
        Some(marker)
    }

    /// Changes the piling radius and re-piles everything
    ///
    /// A radius of `0` disables piling. Fails without changing anything when
    /// the view is zoomed in past `max_zoom_level`.
    pub fn set_radius(&mut self, radius: f64) -> PileResult<()> {
        check_radius(radius)?;
        if radius == 0.0 {
            self.disable();
            return Ok(());
        }
        self.check_zoom()?;

        self.options.radius = radius;
        if self.view.is_none() {
            return Ok(());
        }
        self.enabled = true;
        self.zoom_disabled = false;
        debug!(radius, "piling radius changed");
        self.rebuild();
        Ok(())
    }

    /// Removes every pile and every marker
    pub fn clear(&mut self) {
        self.piles.clear();
        self.markers.clear();
        self.shown.clear();
        self.slots.clear();
    }

    /// Turns piling on
    ///
    /// Fails without changing anything when the view is zoomed in past
    /// `max_zoom_level`.
    pub fn enable(&mut self) -> PileResult<()> {
        if self.enabled {
            return Ok(());
        }
        self.check_zoom()?;
        self.enabled = true;
        self.zoom_disabled = false;
        debug!("piling enabled");
        self.rebuild();
        Ok(())
    }

    /// Turns piling off and draws every marker on its own
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        self.zoom_disabled = false;
        debug!("piling disabled");
        self.rebuild();
    }

    /// Reacts to a settled pan or zoom of the attached view
    pub fn on_view_changed(&mut self) {
        let Some(zoom) = self.view.as_ref().map(|v| v.zoom()) else {
            return;
        };
        let max = self.options.max_zoom_level;

        if self.enabled && zoom > max {
            self.disable();
            self.zoom_disabled = true;
        } else if zoom <= max && self.zoom_disabled {
            if let Err(err) = self.enable() {
                debug!(%err, "could not re-enable piling");
            }
        } else if self.enabled {
            self.rebuild();
        }
    }

    /// Builds the click message for a pile
    ///
    /// Piles with more than one member (or any pile with `single_piles`)
    /// request a view fitting all members, zooming in by at most
    /// `max_zoom_change` levels.
    pub fn click_pile(&self, id: PileId) -> PileResult<PileClick> {
        let view = self.view.as_ref().ok_or(PileError::NotAttached)?;
        let pile = self.pile(id).ok_or(PileError::UnknownPile(id))?;
        let markers = pile.members().to_vec();
        let zooming = markers.len() > 1;

        let zoom_to = if zooming || self.options.single_piles {
            pile.bounds().map(|bounds| SetView {
                center: bounds.center(),
                zoom: view
                    .bounds_zoom(&bounds)
                    .min(view.zoom() + self.options.max_zoom_change),
            })
        } else {
            None
        };

        Ok(PileClick {
            pile: id,
            markers,
            zooming,
            zoom_to,
        })
    }

    fn index_of(&self, id: MarkerId) -> Option<usize> {
        self.slots.get(&id).copied()
    }

    fn check_zoom(&self) -> PileResult<()> {
        let max = self.options.max_zoom_level;
        match self.view.as_ref().map(|v| v.zoom()) {
            Some(zoom) if zoom > max => {
                debug!(zoom, max, "rejected piling change while zoomed in");
                Err(PileError::ZoomedPastPiling { zoom, max })
            }
            _ => Ok(()),
        }
    }

    /// Throws away all piles and files every marker again in insertion order
    fn rebuild(&mut self) {
        self.piles.clear();
        self.shown.fill(false);
        if self.view.is_none() {
            return;
        }

        if !self.enabled {
            self.shown.fill(true);
            return;
        }
        for at in 0..self.markers.len() {
            self.pile_marker(at);
        }
        debug!(
            markers = self.markers.len(),
            piles = self.piles().count(),
            "re-piled markers"
        );
    }

    /// Puts the marker at `at` into the nearest pile within the radius, or
    /// a new one
    fn pile_marker(&mut self, at: usize) {
        let Some(view) = self.view.as_ref() else {
            return;
        };
        let marker = self.markers[at];
        let point = view.project(&marker.position);

        // first pile found wins ties, hidden one-member piles included
        let mut nearest: Option<(PileId, f64)> = None;
        for pile in self.all_piles() {
            if let Some(dist) = pile.in_bounds(&point, self.options.radius) {
                if nearest.is_none_or(|(_, least)| dist < least) {
                    nearest = Some((pile.id(), dist));
                }
            }
        }

        if let Some(pile) = nearest.and_then(|(id, _)| self.piles.get_mut(&id)) {
            if !self.options.single_piles && pile.size() == 1 {
                if let Some(first) = pile.first() {
                    set_flag(&self.slots, &mut self.shown, first.id, false);
                }
                pile.shown = true;
            }
            pile.add_marker(marker, point, view);
            trace!(marker = marker.id.0, pile = %pile.id(), size = pile.size(), "joined pile");
            return;
        }

        let id = PileId(self.next_pile);
        self.next_pile += 1;
        let mut pile = Pile::new(id, marker, view);
        if self.options.single_piles {
            pile.shown = true;
        } else {
            self.shown.set(at, true);
        }
        trace!(marker = marker.id.0, pile = %id, "new pile");
        self.piles.insert(id, pile);
    }

    /// Takes a marker out of every pile that holds it
    ///
    /// The marker itself must already be unregistered.
    fn unpile(&mut self, id: MarkerId) {
        let Some(view) = self.view.as_ref() else {
            return;
        };
        let mut emptied = Vec::new();
        for pile in self.piles.values_mut() {
            if pile.remove_marker(id, view).is_none() {
                continue;
            }
            match pile.size() {
                0 => emptied.push(pile.id()),
                1 if !self.options.single_piles => {
                    pile.shown = false;
                    if let Some(first) = pile.first() {
                        set_flag(&self.slots, &mut self.shown, first.id, true);
                    }
                }
                _ => {}
            }
        }
        for pile in emptied {
            self.piles.remove(&pile);
        }
    }
}

fn set_flag(slots: &HashMap<MarkerId, usize>, flags: &mut BitVec, id: MarkerId, value: bool) {
    if let Some(&i) = slots.get(&id) {
        flags.set(i, value);
    }
}
