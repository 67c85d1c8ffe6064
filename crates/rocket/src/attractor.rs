//! Gravity wells and their placement.
//!
//! Each well pulls the rocket in when it passes within the influence range
//! and pushes it back out once it crosses the safety threshold, so the rocket
//! slingshots around wells instead of falling into them.

use crate::params::RocketParams;
use folio_core::{Viewport, Xorshift64};
use glam::DVec2;
use serde_json::{json, Value};

/// A static circular well.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attractor {
    pub center: DVec2,
    pub radius: f64,
}

impl Attractor {
    pub fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Distance beyond which the well exerts no force.
    pub fn influence_range(&self, params: &RocketParams) -> f64 {
        self.radius * params.influence_factor
    }

    /// Distance inside which the force turns repulsive.
    pub fn safety_threshold(&self, params: &RocketParams) -> f64 {
        self.radius + params.safety_margin
    }

    /// Velocity change this well applies to a body at `position`.
    ///
    /// Positive magnitudes point toward the centre. The pull grows linearly
    /// from zero at the influence boundary; the push grows linearly as the
    /// body goes deeper past the safety threshold. A body within
    /// `distance_epsilon` of the centre gets no force, since no direction is
    /// defined there.
    pub fn force_on(&self, position: DVec2, params: &RocketParams) -> DVec2 {
        let offset = self.center - position;
        let d = offset.length();
        let range = self.influence_range(params);
        if !(d > params.distance_epsilon) || d >= range {
            return DVec2::ZERO;
        }
        let safe = self.safety_threshold(params);
        let magnitude = if d < safe {
            -params.gravity_strength * params.repulsion_factor * (1.0 - d / safe)
        } else {
            params.gravity_strength * params.attraction_factor * (1.0 - d / range)
        };
        offset / d * magnitude
    }

    pub fn to_json(&self) -> Value {
        json!({"x": self.center.x, "y": self.center.y, "radius": self.radius})
    }
}

/// Result of [`place_attractors`].
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub attractors: Vec<Attractor>,
    /// Wells that ran out of attempts and were accepted while overlapping.
    pub fallbacks: usize,
}

/// Samples `params.well_count` wells inside `viewport` inset by
/// `params.spawn_inset`, rejecting centres closer than
/// `params.min_well_distance` to an already placed well.
///
/// After `params.placement_attempts` rejected samples the last one is kept
/// anyway and counted in [`Placement::fallbacks`]; a crowded viewport still
/// gets its full set of wells.
pub fn place_attractors(
    viewport: &Viewport,
    rng: &mut Xorshift64,
    params: &RocketParams,
) -> Placement {
    let (min, max) = viewport.inset_bounds(params.spawn_inset);
    let mut attractors: Vec<Attractor> = Vec::with_capacity(params.well_count);
    let mut fallbacks = 0;

    for _ in 0..params.well_count {
        let radius = rng.next_range(params.well_radius_min, params.well_radius_max);
        let mut center = rng.next_point(min, max);
        let mut attempts = 1;
        while !is_clear(center, &attractors, params.min_well_distance) {
            if attempts >= params.placement_attempts {
                fallbacks += 1;
                break;
            }
            center = rng.next_point(min, max);
            attempts += 1;
        }
        attractors.push(Attractor::new(center, radius));
    }

    Placement {
        attractors,
        fallbacks,
    }
}

fn is_clear(candidate: DVec2, placed: &[Attractor], min_distance: f64) -> bool {
    placed
        .iter()
        .all(|a| a.center.distance(candidate) >= min_distance)
}

/// Smallest centre-to-centre distance in `attractors`, if there are two or more.
pub fn min_separation(attractors: &[Attractor]) -> Option<f64> {
    let mut best: Option<f64> = None;
    for (i, a) in attractors.iter().enumerate() {
        for b in &attractors[i + 1..] {
            let d = a.center.distance(b.center);
            best = Some(best.map_or(d, |m| m.min(d)));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well() -> Attractor {
        Attractor::new(DVec2::new(500.0, 500.0), 40.0)
    }

    #[test]
    fn no_force_outside_influence_range() {
        let p = RocketParams::default();
        let f = well().force_on(DVec2::new(500.0 + 160.0, 500.0), &p);
        assert_eq!(f, DVec2::ZERO);
    }

    #[test]
    fn attraction_points_at_center_and_fades_with_distance() {
        let p = RocketParams::default();
        let near = well().force_on(DVec2::new(400.0, 500.0), &p);
        let far = well().force_on(DVec2::new(360.0, 500.0), &p);
        assert!(near.x > 0.0 && near.y == 0.0, "{near:?}");
        assert!(far.x > 0.0 && far.x < near.x, "near {near:?} far {far:?}");
        // d = 100, range = 160: 0.4 * 0.5 * (1 - 100/160)
        assert!((near.x - 0.4 * 0.5 * (1.0 - 100.0 / 160.0)).abs() < 1e-12);
    }

    #[test]
    fn repulsion_inside_safety_threshold() {
        let p = RocketParams::default();
        // safety = 70; d = 35
        let f = well().force_on(DVec2::new(465.0, 500.0), &p);
        assert!(f.x < 0.0, "expected push away from the well, got {f:?}");
        assert!((f.x + 0.4 * 3.0 * (1.0 - 35.0 / 70.0)).abs() < 1e-12);
    }

    #[test]
    fn coincident_body_gets_finite_zero_force() {
        let p = RocketParams::default();
        let f = well().force_on(DVec2::new(500.0, 500.0), &p);
        assert!(f.is_finite());
        assert_eq!(f, DVec2::ZERO);
    }

    #[test]
    fn placement_yields_requested_count_inside_inset() {
        let vp = Viewport::new(1600.0, 1000.0).unwrap();
        let p = RocketParams::default();
        let mut rng = Xorshift64::new(42);
        let placed = place_attractors(&vp, &mut rng, &p);
        assert_eq!(placed.attractors.len(), 6);
        for a in &placed.attractors {
            assert!(a.center.x >= 100.0 && a.center.x < 1500.0);
            assert!(a.center.y >= 100.0 && a.center.y < 900.0);
            assert!(a.radius >= 35.0 && a.radius < 60.0);
        }
    }

    #[test]
    fn roomy_viewport_respects_min_separation() {
        let vp = Viewport::new(1920.0, 1080.0).unwrap();
        let p = RocketParams::default();
        let mut rng = Xorshift64::new(7);
        let placed = place_attractors(&vp, &mut rng, &p);
        assert_eq!(placed.fallbacks, 0);
        assert!(min_separation(&placed.attractors).unwrap() >= 150.0);
    }

    #[test]
    fn crowded_viewport_falls_back_to_overlap() {
        // Inset collapses to a single point, so every well after the first
        // exhausts its attempts.
        let vp = Viewport::new(150.0, 150.0).unwrap();
        let p = RocketParams::default();
        let mut rng = Xorshift64::new(1);
        let placed = place_attractors(&vp, &mut rng, &p);
        assert_eq!(placed.attractors.len(), 6);
        assert_eq!(placed.fallbacks, 5);
    }

    #[test]
    fn placement_is_deterministic_per_seed() {
        let vp = Viewport::new(1280.0, 720.0).unwrap();
        let p = RocketParams::default();
        let a = place_attractors(&vp, &mut Xorshift64::new(5), &p);
        let b = place_attractors(&vp, &mut Xorshift64::new(5), &p);
        assert_eq!(a, b);
    }

    #[test]
    fn min_separation_needs_two_wells() {
        assert_eq!(min_separation(&[well()]), None);
        let pair = [well(), Attractor::new(DVec2::new(503.0, 504.0), 1.0)];
        assert_eq!(min_separation(&pair), Some(5.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn no_fallback_means_invariant_holds(
                seed: u64,
                w in 300.0_f64..3000.0,
                h in 300.0_f64..3000.0,
                count in 0_usize..12,
            ) {
                let vp = Viewport::new(w, h).unwrap();
                let p = RocketParams { well_count: count, ..RocketParams::default() };
                let placed = place_attractors(&vp, &mut Xorshift64::new(seed), &p);
                prop_assert_eq!(placed.attractors.len(), count);
                if placed.fallbacks == 0 {
                    if let Some(d) = min_separation(&placed.attractors) {
                        prop_assert!(d >= p.min_well_distance, "min separation {d}");
                    }
                }
            }

            #[test]
            fn force_is_always_finite(
                x in -100.0_f64..1100.0,
                y in -100.0_f64..1100.0,
            ) {
                let p = RocketParams::default();
                let f = well().force_on(DVec2::new(x, y), &p);
                prop_assert!(f.is_finite());
            }
        }
    }
}
