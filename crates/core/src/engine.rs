//! The `Engine` trait implemented by every animation in folio.
//!
//! The trait is object-safe so hosts can hold a `Box<dyn Engine>` and switch
//! animations at runtime.

use crate::error::EngineError;
use crate::input::Input;
use crate::scene::Scene;
use serde_json::Value;

/// A step-based animation.
///
/// One call to [`step`](Engine::step) advances exactly one rendered frame.
/// Inputs arrive between steps through [`apply`](Engine::apply); a step only
/// ever reads the latest applied state, so the host needs no locking.
pub trait Engine {
    /// Advance the animation by one frame.
    fn step(&mut self) -> Result<(), EngineError>;

    /// Deliver a host input (pointer, resize). Applied before the next step.
    fn apply(&mut self, input: &Input) -> Result<(), EngineError>;

    /// Drawable nodes for the current state.
    fn scene(&self) -> Scene;

    /// Compact machine-readable snapshot of the simulation state, for traces.
    fn state(&self) -> Value;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Type, default, range and description of every parameter.
    fn param_schema(&self) -> Value;
}
