//! Tunable constants of the rocket simulation.

use folio_core::params::{param_f64, param_usize, require_in_half_open, require_non_negative};
use folio_core::EngineError;
use serde_json::{json, Value};

const DEFAULT_ACCELERATION: f64 = 0.5;
const DEFAULT_MAX_SPEED: f64 = 8.0;
const DEFAULT_TURN_RATE: f64 = 0.15;
const DEFAULT_DAMPING: f64 = 0.97;
const DEFAULT_GRAVITY_STRENGTH: f64 = 0.4;
const DEFAULT_REPULSION_FACTOR: f64 = 3.0;
const DEFAULT_ATTRACTION_FACTOR: f64 = 0.5;
const DEFAULT_INFLUENCE_FACTOR: f64 = 4.0;
const DEFAULT_SAFETY_MARGIN: f64 = 30.0;
const DEFAULT_WELL_COUNT: usize = 6;
const DEFAULT_WELL_RADIUS_MIN: f64 = 35.0;
const DEFAULT_WELL_RADIUS_MAX: f64 = 60.0;
const DEFAULT_MIN_WELL_DISTANCE: f64 = 150.0;
const DEFAULT_SPAWN_INSET: f64 = 100.0;
const DEFAULT_PLACEMENT_ATTEMPTS: usize = 50;
const DEFAULT_WRAP_MARGIN: f64 = 50.0;
const DEFAULT_BLACK_HOLE_SIZE: f64 = 80.0;
const DEFAULT_DISTANCE_EPSILON: f64 = 1e-9;

/// Simulation constants. [`Default`] reproduces the portfolio page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocketParams {
    /// Thrust added along the heading every tick.
    pub acceleration: f64,
    pub max_speed: f64,
    /// Fraction of the heading error corrected per tick, in (0, 1].
    pub turn_rate: f64,
    /// Velocity multiplier per tick, in (0, 1].
    pub damping: f64,
    pub gravity_strength: f64,
    /// Scale of the push-out force inside the safety threshold.
    pub repulsion_factor: f64,
    /// Scale of the pull inside the influence range.
    pub attraction_factor: f64,
    /// Influence range as a multiple of the well radius.
    pub influence_factor: f64,
    /// Added to the radius to get the safety threshold.
    pub safety_margin: f64,
    pub well_count: usize,
    pub well_radius_min: f64,
    pub well_radius_max: f64,
    pub min_well_distance: f64,
    /// Wells spawn at least this far from every viewport edge.
    pub spawn_inset: f64,
    pub placement_attempts: usize,
    /// How far off-screen the rocket travels before wrapping.
    pub wrap_margin: f64,
    /// Diameter of the black hole drawn at the pointer.
    pub black_hole_size: f64,
    /// Wells closer than this to the rocket are skipped.
    pub distance_epsilon: f64,
}

impl Default for RocketParams {
    fn default() -> Self {
        Self {
            acceleration: DEFAULT_ACCELERATION,
            max_speed: DEFAULT_MAX_SPEED,
            turn_rate: DEFAULT_TURN_RATE,
            damping: DEFAULT_DAMPING,
            gravity_strength: DEFAULT_GRAVITY_STRENGTH,
            repulsion_factor: DEFAULT_REPULSION_FACTOR,
            attraction_factor: DEFAULT_ATTRACTION_FACTOR,
            influence_factor: DEFAULT_INFLUENCE_FACTOR,
            safety_margin: DEFAULT_SAFETY_MARGIN,
            well_count: DEFAULT_WELL_COUNT,
            well_radius_min: DEFAULT_WELL_RADIUS_MIN,
            well_radius_max: DEFAULT_WELL_RADIUS_MAX,
            min_well_distance: DEFAULT_MIN_WELL_DISTANCE,
            spawn_inset: DEFAULT_SPAWN_INSET,
            placement_attempts: DEFAULT_PLACEMENT_ATTEMPTS,
            wrap_margin: DEFAULT_WRAP_MARGIN,
            black_hole_size: DEFAULT_BLACK_HOLE_SIZE,
            distance_epsilon: DEFAULT_DISTANCE_EPSILON,
        }
    }
}

impl RocketParams {
    /// Reads overrides from a JSON object and validates the result.
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        let p = Self {
            acceleration: param_f64(params, "acceleration", DEFAULT_ACCELERATION)?,
            max_speed: param_f64(params, "max_speed", DEFAULT_MAX_SPEED)?,
            turn_rate: param_f64(params, "turn_rate", DEFAULT_TURN_RATE)?,
            damping: param_f64(params, "damping", DEFAULT_DAMPING)?,
            gravity_strength: param_f64(params, "gravity_strength", DEFAULT_GRAVITY_STRENGTH)?,
            repulsion_factor: param_f64(params, "repulsion_factor", DEFAULT_REPULSION_FACTOR)?,
            attraction_factor: param_f64(params, "attraction_factor", DEFAULT_ATTRACTION_FACTOR)?,
            influence_factor: param_f64(params, "influence_factor", DEFAULT_INFLUENCE_FACTOR)?,
            safety_margin: param_f64(params, "safety_margin", DEFAULT_SAFETY_MARGIN)?,
            well_count: param_usize(params, "well_count", DEFAULT_WELL_COUNT)?,
            well_radius_min: param_f64(params, "well_radius_min", DEFAULT_WELL_RADIUS_MIN)?,
            well_radius_max: param_f64(params, "well_radius_max", DEFAULT_WELL_RADIUS_MAX)?,
            min_well_distance: param_f64(params, "min_well_distance", DEFAULT_MIN_WELL_DISTANCE)?,
            spawn_inset: param_f64(params, "spawn_inset", DEFAULT_SPAWN_INSET)?,
            placement_attempts: param_usize(params, "placement_attempts", DEFAULT_PLACEMENT_ATTEMPTS)?,
            wrap_margin: param_f64(params, "wrap_margin", DEFAULT_WRAP_MARGIN)?,
            black_hole_size: param_f64(params, "black_hole_size", DEFAULT_BLACK_HOLE_SIZE)?,
            distance_epsilon: param_f64(params, "distance_epsilon", DEFAULT_DISTANCE_EPSILON)?,
        };
        p.validate()?;
        Ok(p)
    }

    /// Rejects values that would break the simulation's invariants.
    pub fn validate(&self) -> Result<(), EngineError> {
        require_in_half_open("turn_rate", self.turn_rate, 0.0, 1.0)?;
        require_in_half_open("damping", self.damping, 0.0, 1.0)?;
        require_in_half_open("max_speed", self.max_speed, 0.0, f64::MAX)?;
        for (name, v) in [
            ("acceleration", self.acceleration),
            ("gravity_strength", self.gravity_strength),
            ("repulsion_factor", self.repulsion_factor),
            ("attraction_factor", self.attraction_factor),
            ("influence_factor", self.influence_factor),
            ("safety_margin", self.safety_margin),
            ("well_radius_min", self.well_radius_min),
            ("min_well_distance", self.min_well_distance),
            ("spawn_inset", self.spawn_inset),
            ("wrap_margin", self.wrap_margin),
            ("black_hole_size", self.black_hole_size),
            ("distance_epsilon", self.distance_epsilon),
        ] {
            require_non_negative(name, v)?;
        }
        if !(self.well_radius_max.is_finite() && self.well_radius_max > self.well_radius_min) {
            return Err(EngineError::invalid_param(
                "well_radius_max",
                format!(
                    "{} must be greater than well_radius_min ({})",
                    self.well_radius_max, self.well_radius_min
                ),
            ));
        }
        if self.placement_attempts == 0 {
            return Err(EngineError::invalid_param(
                "placement_attempts",
                "at least one attempt is required",
            ));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Value {
        json!({
            "acceleration": self.acceleration,
            "max_speed": self.max_speed,
            "turn_rate": self.turn_rate,
            "damping": self.damping,
            "gravity_strength": self.gravity_strength,
            "repulsion_factor": self.repulsion_factor,
            "attraction_factor": self.attraction_factor,
            "influence_factor": self.influence_factor,
            "safety_margin": self.safety_margin,
            "well_count": self.well_count,
            "well_radius_min": self.well_radius_min,
            "well_radius_max": self.well_radius_max,
            "min_well_distance": self.min_well_distance,
            "spawn_inset": self.spawn_inset,
            "placement_attempts": self.placement_attempts,
            "wrap_margin": self.wrap_margin,
            "black_hole_size": self.black_hole_size,
            "distance_epsilon": self.distance_epsilon,
        })
    }

    pub fn schema() -> Value {
        json!({
            "acceleration": number(DEFAULT_ACCELERATION, 0.0, 5.0, "Forward thrust added along the heading each tick"),
            "max_speed": number(DEFAULT_MAX_SPEED, 0.0, 50.0, "Hard cap on speed, applied before damping"),
            "turn_rate": number(DEFAULT_TURN_RATE, 0.0, 1.0, "Fraction of the heading error corrected per tick"),
            "damping": number(DEFAULT_DAMPING, 0.0, 1.0, "Velocity multiplier applied every tick"),
            "gravity_strength": number(DEFAULT_GRAVITY_STRENGTH, 0.0, 5.0, "Base strength of well forces"),
            "repulsion_factor": number(DEFAULT_REPULSION_FACTOR, 0.0, 10.0, "Push-out scale inside the safety threshold"),
            "attraction_factor": number(DEFAULT_ATTRACTION_FACTOR, 0.0, 10.0, "Pull scale inside the influence range"),
            "influence_factor": number(DEFAULT_INFLUENCE_FACTOR, 0.0, 10.0, "Influence range as a multiple of the well radius"),
            "safety_margin": number(DEFAULT_SAFETY_MARGIN, 0.0, 200.0, "Distance beyond the radius where forces turn repulsive"),
            "well_count": {
                "type": "integer",
                "default": DEFAULT_WELL_COUNT,
                "min": 0,
                "max": 64,
                "description": "Number of gravity wells"
            },
            "well_radius_min": number(DEFAULT_WELL_RADIUS_MIN, 0.0, 200.0, "Smallest well radius"),
            "well_radius_max": number(DEFAULT_WELL_RADIUS_MAX, 0.0, 200.0, "Largest well radius (exclusive)"),
            "min_well_distance": number(DEFAULT_MIN_WELL_DISTANCE, 0.0, 1000.0, "Minimum distance between well centres"),
            "spawn_inset": number(DEFAULT_SPAWN_INSET, 0.0, 500.0, "Distance from the viewport edge where wells may not spawn"),
            "placement_attempts": {
                "type": "integer",
                "default": DEFAULT_PLACEMENT_ATTEMPTS,
                "min": 1,
                "max": 10000,
                "description": "Samples per well before an overlapping position is accepted"
            },
            "wrap_margin": number(DEFAULT_WRAP_MARGIN, 0.0, 500.0, "Off-screen distance travelled before wrapping"),
            "black_hole_size": number(DEFAULT_BLACK_HOLE_SIZE, 0.0, 400.0, "Diameter of the pointer black hole"),
            "distance_epsilon": number(DEFAULT_DISTANCE_EPSILON, 0.0, 1.0, "Wells closer than this are ignored to keep forces finite"),
        })
    }
}

fn number(default: f64, min: f64, max: f64, description: &str) -> Value {
    json!({
        "type": "number",
        "default": default,
        "min": min,
        "max": max,
        "description": description,
    })
}
