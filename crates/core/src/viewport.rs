//! The visible drawing area an engine simulates within.

use crate::error::EngineError;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Width and height in CSS pixels. Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    width: f64,
    height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Result<Self, EngineError> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(Self { width, height })
        } else {
            Err(EngineError::InvalidViewport { width, height })
        }
    }

    /// Builds a viewport from integer pixel dimensions (CLI, replay files).
    pub fn from_pixels(width: usize, height: usize) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        Self::new(width as f64, height as f64)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    pub fn center(&self) -> DVec2 {
        self.size() * 0.5
    }

    /// The box `[inset, size - inset)` on each axis. An axis too small for
    /// the inset collapses to its midpoint.
    pub fn inset_bounds(&self, inset: f64) -> (DVec2, DVec2) {
        let axis = |len: f64| {
            if len > 2.0 * inset {
                (inset, len - inset)
            } else {
                (len * 0.5, len * 0.5)
            }
        };
        let (x0, x1) = axis(self.width);
        let (y0, y1) = axis(self.height);
        (DVec2::new(x0, y0), DVec2::new(x1, y1))
    }

    /// Screen wrapping with an off-screen margin `m`: a coordinate at or past
    /// `len + m` reappears at `-m`, one below `-m` reappears at `len + m`.
    pub fn wrap(&self, p: DVec2, margin: f64) -> DVec2 {
        DVec2::new(
            wrap_axis(p.x, self.width, margin),
            wrap_axis(p.y, self.height, margin),
        )
    }
}

fn wrap_axis(v: f64, len: f64, margin: f64) -> f64 {
    if v >= len + margin {
        -margin
    } else if v < -margin {
        len + margin
    } else {
        v
    }
}
