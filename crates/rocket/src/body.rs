//! Kinematic state of the rocket.

use glam::DVec2;
use serde_json::{json, Value};

/// Position, velocity and heading (radians, 0 = facing +x).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: DVec2,
    pub velocity: DVec2,
    pub heading: f64,
}

impl Body {
    /// A body at rest facing +x.
    pub fn at_rest(position: DVec2) -> Self {
        Self {
            position,
            velocity: DVec2::ZERO,
            heading: 0.0,
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    pub fn to_json(&self) -> Value {
        json!({
            "x": self.position.x,
            "y": self.position.y,
            "vx": self.velocity.x,
            "vy": self.velocity.y,
            "heading": self.heading,
        })
    }
}
