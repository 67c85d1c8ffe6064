//! Replay file for an animation run.
//!
//! A [`Seed`] pins down everything that influences a run: engine, viewport,
//! parameter overrides, PRNG seed, step count and the scripted inputs. Feeding
//! the same seed to the same binary reproduces the run bit for bit.

use crate::error::EngineError;
use crate::input::ScheduledInput;
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub engine: String,
    pub width: usize,
    pub height: usize,
    #[serde(default = "empty_object")]
    pub params: serde_json::Value,
    pub seed: u64,
    #[serde(default)]
    pub steps: usize,
    #[serde(default)]
    pub inputs: Vec<ScheduledInput>,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Seed {
    /// A seed with no params, no steps and no inputs.
    pub fn new(engine: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            engine: engine.to_string(),
            width,
            height,
            params: empty_object(),
            seed,
            steps: 0,
            inputs: Vec::new(),
        }
    }

    pub fn viewport(&self) -> Result<Viewport, EngineError> {
        Viewport::from_pixels(self.width, self.height)
    }

    /// Checks dimensions and that inputs are listed in step order.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.viewport()?;
        if self.params.as_object().is_none() {
            return Err(EngineError::ParamTypeMismatch {
                name: "params".into(),
                expected: "object".into(),
                got: "non-object".into(),
            });
        }
        if self
            .inputs
            .windows(2)
            .any(|pair| pair[0].at_step > pair[1].at_step)
        {
            return Err(EngineError::invalid_param(
                "inputs",
                "scheduled inputs must be sorted by at_step",
            ));
        }
        Ok(())
    }

    /// Inputs due right before step `step` runs.
    pub fn inputs_at(&self, step: usize) -> impl Iterator<Item = &ScheduledInput> + '_ {
        self.inputs.iter().filter(move |s| s.at_step == step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Input;
    use serde_json::json;

    #[test]
    fn new_has_empty_params_and_no_inputs() {
        let s = Seed::new("rocket", 1280, 720, 42);
        assert_eq!(s.params, json!({}));
        assert_eq!(s.steps, 0);
        assert!(s.inputs.is_empty());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let s: Seed = serde_json::from_value(json!({
            "engine": "particles",
            "width": 800,
            "height": 400,
            "seed": 7
        }))
        .unwrap();
        assert_eq!(s.params, json!({}));
        assert_eq!(s.steps, 0);
    }

    #[test]
    fn round_trips_with_inputs() {
        let mut s = Seed::new("rocket", 1024, 768, 3);
        s.steps = 120;
        s.params = json!({"turn_rate": 0.2});
        s.inputs.push(ScheduledInput {
            at_step: 10,
            input: Input::PointerMove { x: 40.0, y: 50.0 },
        });
        let text = serde_json::to_string_pretty(&s).unwrap();
        let back: Seed = serde_json::from_str(&text).unwrap();
        assert_eq!(s, back);
    }

    #[test]
    fn validate_rejects_zero_size() {
        assert!(Seed::new("rocket", 0, 10, 1).validate().is_err());
    }

    #[test]
    fn validate_rejects_unsorted_inputs() {
        let mut s = Seed::new("rocket", 100, 100, 1);
        s.inputs = vec![
            ScheduledInput {
                at_step: 5,
                input: Input::PointerLeave,
            },
            ScheduledInput {
                at_step: 2,
                input: Input::PointerLeave,
            },
        ];
        assert!(s.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_object_params() {
        let mut s = Seed::new("rocket", 100, 100, 1);
        s.params = json!([1, 2]);
        assert!(s.validate().is_err());
    }

    #[test]
    fn inputs_at_selects_matching_step() {
        let mut s = Seed::new("rocket", 100, 100, 1);
        s.inputs = vec![
            ScheduledInput {
                at_step: 0,
                input: Input::PointerMove { x: 1.0, y: 1.0 },
            },
            ScheduledInput {
                at_step: 3,
                input: Input::PointerLeave,
            },
        ];
        assert_eq!(s.inputs_at(3).count(), 1);
        assert_eq!(s.inputs_at(1).count(), 0);
    }
}
