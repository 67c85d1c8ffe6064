//! Heading control: the rocket turns toward its target by a fixed fraction
//! of the remaining angle each tick, which bends its path into curves
//! instead of snapping.

use glam::DVec2;
use std::f64::consts::{PI, TAU};

/// Maps an angle into (-pi, pi] by adding or removing whole turns.
pub fn normalize_angle(mut angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    // Large inputs would need many loop iterations; fold them first.
    if angle.abs() > 4.0 * TAU {
        angle %= TAU;
    }
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

/// Angle of the ray from `from` to `to`. Zero when the points coincide.
pub fn bearing(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// New heading after one tick of turning toward `desired`.
pub fn steer(heading: f64, desired: f64, turn_rate: f64) -> f64 {
    heading + normalize_angle(desired - heading) * turn_rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn normalize_keeps_values_already_in_range() {
        for a in [0.0, 1.0, -1.0, PI, -PI + 1e-12, 3.0] {
            assert_eq!(normalize_angle(a), a);
        }
    }

    #[test]
    fn minus_pi_maps_to_plus_pi() {
        assert_eq!(normalize_angle(-PI), PI);
    }

    #[test]
    fn just_over_pi_wraps_negative() {
        let a = normalize_angle(PI + 0.25);
        assert!((a - (-PI + 0.25)).abs() < 1e-12, "{a}");
    }

    #[test]
    fn huge_angles_are_folded() {
        let a = normalize_angle(1e6);
        assert!(a > -PI && a <= PI, "{a}");
    }

    #[test]
    fn non_finite_angle_maps_to_zero() {
        assert_eq!(normalize_angle(f64::NAN), 0.0);
        assert_eq!(normalize_angle(f64::INFINITY), 0.0);
    }

    #[test]
    fn bearing_straight_down_is_half_pi() {
        let b = bearing(DVec2::new(100.0, 100.0), DVec2::new(100.0, 200.0));
        assert!((b - FRAC_PI_2).abs() < 1e-15);
    }

    #[test]
    fn steer_takes_the_short_way_round() {
        // From just below +pi to just above -pi is a small positive turn.
        let h = steer(PI - 0.1, -PI + 0.1, 0.5);
        assert!((h - PI).abs() < 1e-12, "{h}");
    }

    #[test]
    fn full_turn_rate_snaps_to_target() {
        let h = steer(0.0, 1.2, 1.0);
        assert!((h - 1.2).abs() < 1e-15);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn result_lies_in_half_open_range(a in -1e3_f64..1e3) {
                let n = normalize_angle(a);
                prop_assert!(n > -PI && n <= PI, "normalize({a}) = {n}");
            }

            #[test]
            fn difference_is_invariant_under_whole_turns(
                a in -50.0_f64..50.0,
                b in -50.0_f64..50.0,
                k in -20_i32..20,
                j in -20_i32..20,
            ) {
                let base = normalize_angle(a - b);
                let shifted = normalize_angle((a + k as f64 * TAU) - (b + j as f64 * TAU));
                // Same point on the circle; allow for the (-pi, pi] seam.
                let gap = normalize_angle(base - shifted).abs();
                prop_assert!(gap < 1e-9, "base {base} vs shifted {shifted}");
            }
        }
    }
}
