//! Host input delivered to engines between frames.

use serde::{Deserialize, Serialize};

/// An input event. Coordinates are in the engine's own space (viewport
/// pixels for the rocket, canvas-local pixels for the particle art).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Input {
    PointerMove { x: f64, y: f64 },
    PointerLeave,
    Resize { width: f64, height: f64 },
}

/// An input to be delivered right before step number `at_step` runs
/// (0 = before the first step). Used by replay files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledInput {
    pub at_step: usize,
    pub input: Input,
}
