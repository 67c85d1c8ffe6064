#![deny(unsafe_code)]
//! Rocket engine: a single rocket steering toward the pointer through a
//! field of gravity wells.
//!
//! The pointer is drawn as a "black hole" (glow, accretion disk, core) but
//! exerts no force; only the wells do. Wells are regenerated from the
//! engine's PRNG whenever the viewport is resized.

pub mod attractor;
pub mod body;
pub mod params;
pub mod steering;
pub mod tick;

use attractor::{place_attractors, Attractor};
use body::Body;
use folio_core::{Engine, EngineError, Input, Node, Scene, Viewport, Xorshift64};
use glam::DVec2;
use params::RocketParams;
use serde_json::{json, Value};

/// Size of the rocket sprite, centred on the body position.
const ROCKET_WIDTH: f64 = 60.0;
const ROCKET_HEIGHT: f64 = 20.0;
/// Extra radius of the accretion disk beyond the black hole.
const ACCRETION_PADDING: f64 = 15.0;
/// Child elements the page stylesheet draws the rocket from.
pub const ROCKET_PARTS: [&str; 7] = [
    "rocket-body",
    "rocket-nose",
    "rocket-fin",
    "rocket-wing",
    "rocket-window",
    "rocket-flame",
    "rocket-flame-inner",
];

/// The rocket animation.
pub struct Rocket {
    body: Body,
    attractors: Vec<Attractor>,
    pointer: DVec2,
    viewport: Viewport,
    params: RocketParams,
    rng: Xorshift64,
    fallbacks: usize,
}

impl Rocket {
    /// Rocket at rest at the viewport centre, pointer at the centre, wells
    /// sampled from `seed`.
    pub fn new(viewport: Viewport, seed: u64, params: RocketParams) -> Result<Self, EngineError> {
        params.validate()?;
        let mut rng = Xorshift64::new(seed);
        let placement = place_attractors(&viewport, &mut rng, &params);
        Ok(Self {
            body: Body::at_rest(viewport.center()),
            attractors: placement.attractors,
            pointer: viewport.center(),
            viewport,
            params,
            rng,
            fallbacks: placement.fallbacks,
        })
    }

    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, EngineError> {
        Self::new(
            Viewport::from_pixels(width, height)?,
            seed,
            RocketParams::from_json(params)?,
        )
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn attractors(&self) -> &[Attractor] {
        &self.attractors
    }

    pub fn pointer(&self) -> DVec2 {
        self.pointer
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Wells in the current set that were placed overlapping after running
    /// out of attempts.
    pub fn placement_fallbacks(&self) -> usize {
        self.fallbacks
    }

    /// New viewport: all wells are regenerated, and a rocket left beyond the
    /// right or bottom edge is moved back to the centre.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let placement = place_attractors(&viewport, &mut self.rng, &self.params);
        self.attractors = placement.attractors;
        self.fallbacks = placement.fallbacks;
        let p = self.body.position;
        if p.x > viewport.width() || p.y > viewport.height() {
            self.body.position = viewport.center();
        }
    }

    fn black_hole_nodes(&self) -> [Node; 3] {
        let core = self.params.black_hole_size / 2.0;
        [
            Node::circle("black-hole-glow", self.pointer, self.params.black_hole_size),
            Node::circle(
                "black-hole-accretion",
                self.pointer,
                core + ACCRETION_PADDING,
            ),
            Node::circle("black-hole", self.pointer, core),
        ]
    }
}

impl Engine for Rocket {
    fn step(&mut self) -> Result<(), EngineError> {
        self.body = tick::tick(
            &self.body,
            &self.attractors,
            self.pointer,
            &self.viewport,
            &self.params,
        );
        Ok(())
    }

    fn apply(&mut self, input: &Input) -> Result<(), EngineError> {
        match *input {
            Input::PointerMove { x, y } => self.pointer = DVec2::new(x, y),
            // The page keeps the black hole where the cursor left it.
            Input::PointerLeave => {}
            Input::Resize { width, height } => self.resize(Viewport::new(width, height)?),
        }
        Ok(())
    }

    /// Rocket first, then the black hole, then the wells, so later nodes
    /// stack on top when the page sets no z-index.
    fn scene(&self) -> Scene {
        let mut scene = Scene::new(self.viewport.width(), self.viewport.height());
        scene.push(
            Node::sprite(
                "rocket",
                self.body.position,
                ROCKET_WIDTH,
                ROCKET_HEIGHT,
                self.body.heading,
            )
            .with_parts(&ROCKET_PARTS),
        );
        for node in self.black_hole_nodes() {
            scene.push(node);
        }
        for well in &self.attractors {
            scene.push(Node::circle("gravity-well", well.center, well.radius));
        }
        scene
    }

    fn state(&self) -> Value {
        json!({
            "body": self.body.to_json(),
            "pointer": {"x": self.pointer.x, "y": self.pointer.y},
            "wells": self.attractors.iter().map(Attractor::to_json).collect::<Vec<_>>(),
            "placement_fallbacks": self.fallbacks,
        })
    }

    fn params(&self) -> Value {
        self.params.to_json()
    }

    fn param_schema(&self) -> Value {
        RocketParams::schema()
    }
}
