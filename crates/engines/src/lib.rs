#![deny(unsafe_code)]
//! Engine registry plus the output side of folio: scene rasterizing,
//! PNG/SVG snapshots and the SVG bar chart.
//!
//! The CLI and the WASM bindings both dispatch through [`EngineKind`] so the
//! name-to-engine mapping lives in one place.

pub mod bar_chart;
pub mod pixel;
pub mod svg;

#[cfg(feature = "png")]
pub mod snapshot;

use folio_core::{Engine, EngineError, Input, Scene};
use folio_particles::ParticleArt;
use folio_rocket::Rocket;
use serde_json::Value;

const ENGINE_NAMES: &[&str] = &["rocket", "particles"];

/// Every animation folio knows how to run.
pub enum EngineKind {
    /// Rocket steering through gravity wells.
    Rocket(Rocket),
    /// Pointer-orbiting particle art.
    Particles(ParticleArt),
}

impl EngineKind {
    /// Constructs an engine by name. `width`/`height` are the viewport for
    /// the rocket and the canvas width for the particle art.
    pub fn from_name(
        name: &str,
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, EngineError> {
        match name {
            "rocket" => Ok(EngineKind::Rocket(Rocket::from_json(
                width, height, seed, params,
            )?)),
            "particles" => Ok(EngineKind::Particles(ParticleArt::from_json(
                width, height, seed, params,
            )?)),
            _ => Err(EngineError::UnknownEngine(name.to_string())),
        }
    }

    pub fn list_engines() -> &'static [&'static str] {
        ENGINE_NAMES
    }

    pub fn name(&self) -> &'static str {
        match self {
            EngineKind::Rocket(_) => "rocket",
            EngineKind::Particles(_) => "particles",
        }
    }

    /// The engine's own regenerate action for a canvas of `width`, if it has
    /// one. Returns the replacement engine; the caller decides how to swap it in.
    pub fn next_generation(&mut self, width: f64) -> Option<Result<EngineKind, EngineError>> {
        match self {
            EngineKind::Rocket(_) => None,
            EngineKind::Particles(e) => Some(e.next_generation(width).map(EngineKind::Particles)),
        }
    }
}

impl Engine for EngineKind {
    fn step(&mut self) -> Result<(), EngineError> {
        match self {
            EngineKind::Rocket(e) => e.step(),
            EngineKind::Particles(e) => e.step(),
        }
    }

    fn apply(&mut self, input: &Input) -> Result<(), EngineError> {
        match self {
            EngineKind::Rocket(e) => e.apply(input),
            EngineKind::Particles(e) => e.apply(input),
        }
    }

    fn scene(&self) -> Scene {
        match self {
            EngineKind::Rocket(e) => e.scene(),
            EngineKind::Particles(e) => e.scene(),
        }
    }

    fn state(&self) -> Value {
        match self {
            EngineKind::Rocket(e) => e.state(),
            EngineKind::Particles(e) => e.state(),
        }
    }

    fn params(&self) -> Value {
        match self {
            EngineKind::Rocket(e) => e.params(),
            EngineKind::Particles(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EngineKind::Rocket(e) => e.param_schema(),
            EngineKind::Particles(e) => e.param_schema(),
        }
    }
}
