//! Drives an engine from a [`Seed`] the same way the browser does: through a
//! [`Controller`], one scheduled frame per step, with scripted inputs applied
//! between frames.

use folio_core::{Controller, EngineError, ManualScheduler, Seed};
use folio_engines::EngineKind;

/// Runs `seed.steps` frames, calling `on_step(step, engine)` after each one
/// (steps counted from 1). Inputs scheduled at step `n` are applied before
/// frame `n + 1` runs; inputs at `seed.steps` land after the last frame.
pub fn replay<F, Err>(seed: &Seed, mut on_step: F) -> Result<EngineKind, Err>
where
    F: FnMut(usize, &EngineKind) -> Result<(), Err>,
    Err: From<EngineError>,
{
    seed.validate()?;
    let engine = EngineKind::from_name(&seed.engine, seed.width, seed.height, seed.seed, &seed.params)?;
    let mut controller = Controller::new(engine);
    let mut scheduler = ManualScheduler::new();
    controller.start(&mut scheduler)?;

    for step in 0..seed.steps {
        for scheduled in seed.inputs_at(step) {
            controller.apply(&scheduled.input)?;
        }
        let fired = scheduler
            .fire()
            .ok_or_else(|| EngineError::Scheduler(format!("no frame pending at step {step}")))?;
        controller.on_frame(fired, &mut scheduler)?;
        on_step(step + 1, controller.engine())?;
    }
    for scheduled in seed.inputs_at(seed.steps) {
        controller.apply(&scheduled.input)?;
    }

    controller.stop(&mut scheduler)?;
    Ok(controller.into_engine())
}
