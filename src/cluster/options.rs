use crate::error::{PileError, PileResult};

/// Default piling radius in pixels
pub const DEFAULT_RADIUS: f64 = 60.0;

/// Options of a piling engine
#[derive(Debug, Clone, PartialEq)]
pub struct PileOptions {
    /// Screen-space piling radius in pixels. `0` disables piling.
    pub radius: f64,
    /// Maximum number of zoom levels a pile click may zoom in by
    pub max_zoom_change: i32,
    /// Piling is switched off while the view is zoomed in past this level
    pub max_zoom_level: i32,
    /// Start with piling enabled
    pub auto_enable: bool,
    /// Keep size-1 piles as piles instead of showing the raw marker
    pub single_piles: bool,
}

impl Default for PileOptions {
    fn default() -> Self {
        PileOptions {
            radius: DEFAULT_RADIUS,
            max_zoom_change: 2,
            max_zoom_level: 8,
            auto_enable: true,
            single_piles: false,
        }
    }
}

impl PileOptions {
    /// Rejects values that cannot be coerced into something meaningful
    pub fn validate(&self) -> PileResult<()> {
        check_radius(self.radius)?;
        if self.max_zoom_change < 0 {
            return Err(PileError::InvalidOption {
                name: "max_zoom_change",
                value: f64::from(self.max_zoom_change),
            });
        }
        Ok(())
    }
}

pub(crate) fn check_radius(radius: f64) -> PileResult<()> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(PileError::InvalidOption {
            name: "radius",
            value: radius,
        });
    }
    Ok(())
}
