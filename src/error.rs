//! Errors raised by the piling engine and its option checks.

use thiserror::Error;

use crate::cluster::PileId;

pub type PileResult<T> = Result<T, PileError>;

/// Errors of the piling engine.
///
/// None of these leave the engine half-updated: a failed call has not
/// touched the pile index or the registered markers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PileError {
    /// Only point markers can be piled
    #[error("only markers can be piled, got a {0} layer")]
    NotAMarker(String),
    /// An option value is out of range
    #[error("invalid value {value} for option `{name}`")]
    InvalidOption { name: &'static str, value: f64 },
    /// The view is zoomed in past the piling threshold
    #[error("zoom level {zoom} is past the piling limit {max}")]
    ZoomedPastPiling { zoom: i32, max: i32 },
    /// The engine has no view attached
    #[error("no map view attached")]
    NotAttached,
    /// No live pile has this id
    #[error("unknown pile {0}")]
    UnknownPile(PileId),
}
