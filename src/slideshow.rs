//! Slideshow of map slides
//!
//! [`SlideMapper`] keeps the ordered slides, the current position, and
//! wires the piling layer and the compass to user input. Rendering of the
//! slides themselves is left to the host.

use tracing::debug;

use crate::cluster::{
    LatLng, Leafpile, Marker, MarkerId, PileClick, PileId, PileOptions, PopupTarget, SetView,
};
use crate::compass::{Direction, NavigationIndex};
use crate::error::PileResult;
use crate::projection::MapView;

/// One slide: a map position and its content
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub position: LatLng,
    /// Popup content of the slide's marker
    pub popup: String,
    /// Slide body
    pub html: String,
}

impl Slide {
    pub fn new(lat: f64, lng: f64, popup: impl Into<String>, html: impl Into<String>) -> Self {
        Slide {
            position: LatLng::new(lat, lng),
            popup: popup.into(),
            html: html.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlideOptions {
    pub center: LatLng,
    pub zoom: i32,
    pub min_zoom: i32,
    pub max_zoom: i32,
    /// Pile markers when the slideshow starts
    pub cluster: bool,
    /// Piling stops past this zoom level
    pub max_cluster_zoom: i32,
    /// Arrow keys follow the compass instead of slide order
    pub explore: bool,
    pub piles: PileOptions,
}

impl Default for SlideOptions {
    fn default() -> Self {
        SlideOptions {
            center: LatLng::new(40.423, -98.7372),
            zoom: 4,
            min_zoom: 2,
            max_zoom: 10,
            cluster: true,
            max_cluster_zoom: 9,
            explore: false,
            piles: PileOptions::default(),
        }
    }
}

impl SlideOptions {
    /// Pile options with the slideshow's own switches applied
    pub fn pile_options(&self) -> PileOptions {
        PileOptions {
            auto_enable: self.cluster,
            max_zoom_level: self.max_cluster_zoom,
            ..self.piles.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Left,
    Right,
    Up,
    Down,
}

impl Arrow {
    pub fn direction(self) -> Direction {
        match self {
            Arrow::Left => Direction::West,
            Arrow::Right => Direction::East,
            Arrow::Up => Direction::North,
            Arrow::Down => Direction::South,
        }
    }
}

/// A completed move between slides
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: Option<usize>,
    pub to: usize,
    /// Moving to a later slide
    pub forward: bool,
    /// Where the new slide's popup opens
    pub popup: Option<PopupTarget>,
}

/// Visibility of the previous/next controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub prev: bool,
    pub next: bool,
}

#[derive(Debug)]
pub struct SlideMapper<V> {
    options: SlideOptions,
    slides: Vec<Slide>,
    current: Option<usize>,
    piles: Leafpile<V>,
    compass: Option<NavigationIndex>,
}

impl<V: MapView> SlideMapper<V> {
    /// Centers `view` as configured and attaches the piling layer to it
    pub fn new(mut view: V, options: SlideOptions) -> PileResult<Self> {
        let mut piles = Leafpile::new(options.pile_options())?;
        view.set_view(options.center, options.zoom);
        piles.attach(view);
        let compass = options.explore.then(NavigationIndex::new);
        Ok(SlideMapper {
            options,
            slides: Vec::new(),
            current: None,
            piles,
            compass,
        })
    }

    pub fn options(&self) -> &SlideOptions {
        &self.options
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.current?)
    }

    pub fn piles(&self) -> &Leafpile<V> {
        &self.piles
    }

    pub fn compass(&self) -> Option<&NavigationIndex> {
        self.compass.as_ref()
    }

    pub fn view(&self) -> Option<&V> {
        self.piles.view()
    }

    /// Appends a slide, the first one becomes current
    pub fn add(&mut self, slide: Slide) -> usize {
        let index = self.slides.len();
        let position = slide.position;
        self.slides.push(slide);
        self.piles.add_marker(Marker::new(index as u64, position));
        if let Some(compass) = self.compass.as_mut() {
            compass.push(position);
        }

        if index == 0 {
            self.current = Some(0);
            self.pan_to(position);
        }
        index
    }

    pub fn add_all<I: IntoIterator<Item = Slide>>(&mut self, slides: I) {
        for slide in slides {
            self.add(slide);
        }
    }

    /// Moves to slide `index`
    ///
    /// Out of range indices and the current slide are ignored.
    pub fn move_to(&mut self, index: usize) -> Option<Transition> {
        if index >= self.slides.len() || self.current == Some(index) {
            return None;
        }
        let from = self.current;
        self.current = Some(index);
        self.pan_to(self.slides[index].position);
        debug!(?from, to = index, "moved slide");

        Some(Transition {
            from,
            to: index,
            forward: from.is_none_or(|f| index > f),
            popup: self.piles.popup_target(MarkerId(index as u64)),
        })
    }

    pub fn next(&mut self) -> Option<Transition> {
        self.move_to(self.current.map_or(0, |i| i + 1))
    }

    pub fn prev(&mut self) -> Option<Transition> {
        match self.current {
            None => self.move_to(0),
            Some(0) => None,
            Some(i) => self.move_to(i - 1),
        }
    }

    pub fn controls(&self) -> Controls {
        match self.current {
            None => Controls {
                prev: false,
                next: false,
            },
            Some(i) => Controls {
                prev: i > 0,
                next: i + 1 < self.slides.len(),
            },
        }
    }

    /// Routes an arrow key
    ///
    /// In explore mode the compass decides, and an arrow with no neighbor
    /// does nothing. Otherwise left and right step through the slides.
    pub fn key(&mut self, arrow: Arrow) -> Option<Transition> {
        let explored = match (self.compass.as_ref(), self.current) {
            (Some(compass), Some(current)) => Some(compass.neighbor(current, arrow.direction())),
            _ => None,
        };
        if let Some(target) = explored {
            return self.move_to(target?.index);
        }
        match arrow {
            Arrow::Left => self.prev(),
            Arrow::Right => self.next(),
            Arrow::Up | Arrow::Down => None,
        }
    }

    /// A click on a slide's own marker
    pub fn click_marker(&mut self, id: MarkerId) -> Option<Transition> {
        self.move_to(usize::try_from(id.0).ok()?)
    }

    /// A click on a pile
    ///
    /// `on_click` sees the click first and may cancel its zoom. The view
    /// change, if any, is applied once the click has been handled.
    pub fn click_pile<F>(&mut self, id: PileId, on_click: F) -> PileResult<Option<SetView>>
    where
        F: FnOnce(&mut PileClick),
    {
        let mut click = self.piles.click_pile(id)?;
        on_click(&mut click);
        let Some(command) = click.command() else {
            return Ok(None);
        };
        self.set_view(command.center, command.zoom);
        Ok(Some(command))
    }

    /// Moves the map and re-piles for the new view
    pub fn set_view(&mut self, center: LatLng, zoom: i32) {
        if let Some(view) = self.piles.view_mut() {
            view.set_view(center, zoom);
        }
        self.piles.on_view_changed();
    }

    pub fn set_radius(&mut self, radius: f64) -> PileResult<()> {
        self.piles.set_radius(radius)
    }

    pub fn enable_piles(&mut self) -> PileResult<()> {
        self.piles.enable()
    }

    pub fn disable_piles(&mut self) {
        self.piles.disable();
    }

    fn pan_to(&mut self, center: LatLng) {
        if let Some(view) = self.piles.view_mut() {
            view.pan_to(center);
        }
        self.piles.on_view_changed();
    }
}
