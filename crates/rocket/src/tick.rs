//! One frame of rocket motion.
//!
//! [`tick`] is a pure function of the body, the wells, the pointer target and
//! the viewport. It draws no random numbers, so identical inputs always give
//! bit-identical trajectories.

use crate::attractor::Attractor;
use crate::body::Body;
use crate::params::RocketParams;
use crate::steering::{bearing, steer};
use folio_core::Viewport;
use glam::DVec2;

/// Scales `v` down to `max` length if it is longer, keeping its direction.
pub fn clamp_speed(v: DVec2, max: f64) -> DVec2 {
    let speed = v.length();
    if speed > max {
        v / speed * max
    } else {
        v
    }
}

/// Advances `body` by one frame.
///
/// Order per frame: steer toward the pointer, thrust along the new heading,
/// add well forces, cap speed, damp, integrate position (one time unit per
/// frame), wrap around the screen edges.
pub fn tick(
    body: &Body,
    attractors: &[Attractor],
    pointer: DVec2,
    viewport: &Viewport,
    params: &RocketParams,
) -> Body {
    let heading = steer(body.heading, bearing(body.position, pointer), params.turn_rate);

    let mut velocity = body.velocity + DVec2::from_angle(heading) * params.acceleration;
    for well in attractors {
        velocity += well.force_on(body.position, params);
    }
    velocity = clamp_speed(velocity, params.max_speed) * params.damping;

    let position = viewport.wrap(body.position + velocity, params.wrap_margin);

    Body {
        position,
        velocity,
        heading,
    }
}
