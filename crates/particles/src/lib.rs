#![deny(unsafe_code)]
//! Particle art: coloured particles orbiting the pointer, each pulsing in
//! size and lightness.
//!
//! Clicking the art on the page regenerates it. Here that is
//! [`ParticleArt::next_generation`], which derives a fresh seed from the
//! current engine's PRNG; the host swaps the result in with
//! [`Controller::replace`](folio_core::Controller::replace), which cancels
//! the old loop before the new one starts.

use folio_core::params::{param_f64, param_usize, require_non_negative};
use folio_core::{Engine, EngineError, Hsla, Input, Node, Scene, Srgb, Xorshift64};
use glam::DVec2;
use serde_json::{json, Value};

/// Canvas height is fixed; width follows the container.
pub const CANVAS_HEIGHT: f64 = 400.0;
const MAX_CANVAS_WIDTH: f64 = 800.0;
const CONTAINER_PADDING: f64 = 40.0;

const DEFAULT_PARTICLE_COUNT: usize = 50;
const DEFAULT_PULSE_RATE: f64 = 0.05;
const DEFAULT_PULSE_AMPLITUDE: f64 = 3.0;
const DEFAULT_MIN_RADIUS: f64 = 1.0;

const SIZE_RANGE: (f64, f64) = (2.0, 10.0);
const ORBIT_RANGE: (f64, f64) = (50.0, 150.0);
const SPEED_RANGE: (f64, f64) = (0.02, 0.07);
const SATURATION: f64 = 70.0;

const TITLE: &str = "Move mouse to interact with particles / Click to regenerate";
const TITLE_Y: f64 = 30.0;
const TITLE_SIZE: f64 = 16.0;
const BACKGROUND: Srgb = Srgb {
    r: 0x66 as f64 / 255.0,
    g: 0x7e as f64 / 255.0,
    b: 0xea as f64 / 255.0,
};

/// Canvas width for a container of the given client width.
pub fn canvas_width(container_width: f64) -> f64 {
    (container_width - CONTAINER_PADDING).min(MAX_CANVAS_WIDTH).max(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleParams {
    pub particle_count: usize,
    /// Phase advance of the size pulse per frame.
    pub pulse_rate: f64,
    /// Peak size deviation from the base size.
    pub pulse_amplitude: f64,
    pub min_radius: f64,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            pulse_rate: DEFAULT_PULSE_RATE,
            pulse_amplitude: DEFAULT_PULSE_AMPLITUDE,
            min_radius: DEFAULT_MIN_RADIUS,
        }
    }
}

impl ParticleParams {
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        let p = Self {
            particle_count: param_usize(params, "particle_count", DEFAULT_PARTICLE_COUNT)?,
            pulse_rate: param_f64(params, "pulse_rate", DEFAULT_PULSE_RATE)?,
            pulse_amplitude: param_f64(params, "pulse_amplitude", DEFAULT_PULSE_AMPLITUDE)?,
            min_radius: param_f64(params, "min_radius", DEFAULT_MIN_RADIUS)?,
        };
        require_non_negative("pulse_rate", p.pulse_rate)?;
        require_non_negative("pulse_amplitude", p.pulse_amplitude)?;
        require_non_negative("min_radius", p.min_radius)?;
        Ok(p)
    }
}

/// One orbiting particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub base_size: f64,
    pub hue: f64,
    pub angle: f64,
    pub distance: f64,
    pub speed: f64,
    pub size_phase: f64,
}

impl Particle {
    fn sample(rng: &mut Xorshift64) -> Self {
        Self {
            base_size: rng.next_range(SIZE_RANGE.0, SIZE_RANGE.1),
            hue: rng.next_range(0.0, 360.0),
            angle: rng.next_angle(),
            distance: rng.next_range(ORBIT_RANGE.0, ORBIT_RANGE.1),
            speed: rng.next_range(SPEED_RANGE.0, SPEED_RANGE.1),
            size_phase: rng.next_angle(),
        }
    }

    /// Current deviation of size from the base, in [-amplitude, amplitude].
    fn pulse(&self, amplitude: f64) -> f64 {
        self.size_phase.sin() * amplitude
    }

    fn node(&self, orbit_center: DVec2, params: &ParticleParams) -> Node {
        let v = self.pulse(params.pulse_amplitude);
        let radius = (self.base_size + v).max(params.min_radius);
        let fill = Hsla {
            h: self.hue,
            s: SATURATION,
            l: 50.0 + v * 10.0,
            a: 0.5 + (v / 6.0) * 0.3,
        };
        Node::circle("particle", orbit_center + DVec2::from_angle(self.angle) * self.distance, radius)
            .with_fill(fill)
    }
}

/// The particle-art animation.
pub struct ParticleArt {
    width: f64,
    particles: Vec<Particle>,
    pointer: DVec2,
    params: ParticleParams,
    rng: Xorshift64,
}

impl ParticleArt {
    /// A fresh particle set for a canvas of `width` x [`CANVAS_HEIGHT`].
    pub fn new(width: f64, seed: u64, params: ParticleParams) -> Result<Self, EngineError> {
        if !(width.is_finite() && width > 0.0) {
            return Err(EngineError::InvalidViewport {
                width,
                height: CANVAS_HEIGHT,
            });
        }
        let mut rng = Xorshift64::new(seed);
        let particles = (0..params.particle_count)
            .map(|_| Particle::sample(&mut rng))
            .collect();
        Ok(Self {
            width,
            particles,
            pointer: DVec2::new(width / 2.0, CANVAS_HEIGHT / 2.0),
            params,
            rng,
        })
    }

    /// `width` is the canvas width; the height argument is accepted for
    /// registry symmetry and ignored, as the canvas height is fixed.
    pub fn from_json(
        width: usize,
        _height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, EngineError> {
        if width == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        Self::new(width as f64, seed, ParticleParams::from_json(params)?)
    }

    /// A new particle set for a canvas of `width`, seeded from this engine's
    /// PRNG. The host passes the container's current canvas width, which may
    /// have changed since this set was built.
    pub fn next_generation(&mut self, width: f64) -> Result<Self, EngineError> {
        let seed = self.rng.next_u64();
        Self::new(width, seed, self.params)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> DVec2 {
        self.pointer
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, CANVAS_HEIGHT / 2.0)
    }
}

impl Engine for ParticleArt {
    fn step(&mut self) -> Result<(), EngineError> {
        let pulse_rate = self.params.pulse_rate;
        for p in &mut self.particles {
            p.angle += p.speed;
            p.size_phase += pulse_rate;
        }
        Ok(())
    }

    fn apply(&mut self, input: &Input) -> Result<(), EngineError> {
        match *input {
            Input::PointerMove { x, y } => self.pointer = DVec2::new(x, y),
            Input::PointerLeave => self.pointer = self.center(),
            Input::Resize { .. } => {}
        }
        Ok(())
    }

    fn scene(&self) -> Scene {
        let mut scene = Scene::new(self.width, CANVAS_HEIGHT);
        scene.background = Some(BACKGROUND);
        for p in &self.particles {
            scene.push(p.node(self.pointer, &self.params));
        }
        scene.push(
            Node::label("title", DVec2::new(self.width / 2.0, TITLE_Y), TITLE, TITLE_SIZE)
                .bold()
                .with_fill(Srgb { r: 1.0, g: 1.0, b: 1.0 }),
        );
        scene
    }

    fn state(&self) -> Value {
        json!({
            "pointer": {"x": self.pointer.x, "y": self.pointer.y},
            "particles": self.particles.len(),
            "first_angle": self.particles.first().map(|p| p.angle),
        })
    }

    fn params(&self) -> Value {
        json!({
            "particle_count": self.params.particle_count,
            "pulse_rate": self.params.pulse_rate,
            "pulse_amplitude": self.params.pulse_amplitude,
            "min_radius": self.params.min_radius,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "particle_count": {
                "type": "integer",
                "default": DEFAULT_PARTICLE_COUNT,
                "min": 0,
                "max": 2000,
                "description": "Number of orbiting particles"
            },
            "pulse_rate": {
                "type": "number",
                "default": DEFAULT_PULSE_RATE,
                "min": 0.0,
                "max": 1.0,
                "description": "Size pulse phase advance per frame"
            },
            "pulse_amplitude": {
                "type": "number",
                "default": DEFAULT_PULSE_AMPLITUDE,
                "min": 0.0,
                "max": 10.0,
                "description": "Peak size deviation; also drives lightness and alpha"
            },
            "min_radius": {
                "type": "number",
                "default": DEFAULT_MIN_RADIUS,
                "min": 0.0,
                "max": 10.0,
                "description": "Smallest drawn radius"
            }
        })
    }
}
