//! Compass navigation over slide positions
//!
//! For every point the index keeps the nearest other point to the north,
//! south, east and west. A point is "north" of another when moving there
//! takes longer along the latitude axis than along the longitude axis and
//! it has the greater latitude; ties between the two axes count as
//! east/west.

use crate::cluster::{LatLng, lat_leg, lng_leg};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Nearest point in one direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    /// Distance in kilometers along the deciding axis
    pub distance: f64,
}

/// Up to four neighbors of one point
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Compass([Option<Neighbor>; 4]);

impl Compass {
    pub fn get(&self, dir: Direction) -> Option<Neighbor> {
        self.0[dir.slot()]
    }

    /// Takes `candidate` if the slot is empty or the candidate is strictly nearer
    fn offer(&mut self, dir: Direction, candidate: Neighbor) {
        let slot = &mut self.0[dir.slot()];
        if slot.is_none_or(|current| candidate.distance < current.distance) {
            *slot = Some(candidate);
        }
    }
}

/// Per-point compass, indexed by insertion order
#[derive(Debug, Clone, Default)]
pub struct NavigationIndex {
    points: Vec<LatLng>,
    compasses: Vec<Compass>,
}

impl NavigationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn compass(&self, index: usize) -> Option<&Compass> {
        self.compasses.get(index)
    }

    pub fn neighbor(&self, index: usize, dir: Direction) -> Option<Neighbor> {
        self.compasses.get(index)?.get(dir)
    }

    /// Appends a point and links it with every point already indexed
    ///
    /// Each relation found is written to both ends: the new point learns
    /// its neighbor and the other point may learn the new one in the
    /// opposite direction, each only if it is nearer than what they had.
    ///
    /// Returns the index of the new point.
    pub fn push(&mut self, point: LatLng) -> usize {
        let i = self.points.len();
        let mut compass = Compass::default();

        for (j, other) in self.points.iter().enumerate() {
            let lat_dist = lat_leg(&point, other);
            let lng_dist = lng_leg(&point, other);

            let (dir, distance) = if lat_dist > lng_dist {
                let dir = if other.lat > point.lat {
                    Direction::North
                } else {
                    Direction::South
                };
                (dir, lat_dist)
            } else {
                let dir = if other.lng < point.lng {
                    Direction::West
                } else {
                    Direction::East
                };
                (dir, lng_dist)
            };

            compass.offer(dir, Neighbor { index: j, distance });
            self.compasses[j].offer(dir.opposite(), Neighbor { index: i, distance });
        }

        self.points.push(point);
        self.compasses.push(compass);
        i
    }
}

/// Builds the compass index of a sequence of points, in order
pub fn build_navigation_index<'a, I>(points: I) -> NavigationIndex
where
    I: IntoIterator<Item = &'a LatLng>,
{
    let mut index = NavigationIndex::new();
    for point in points {
        index.push(*point);
    }
    index
}
