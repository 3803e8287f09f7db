//! Wheel geometry and spin trajectory math, shared by the server (to
//! pick outcomes consistent with what clients will draw) and the
//! client (to animate toward the server's landing angle).
//!
//! Conventions: the wheel is split into `items.len()` equal segments in
//! list order, clockwise from the fixed pointer anchored at the top
//! (screen angle 0). Positive rotation turns the wheel clockwise.

use rand::Rng;

pub const FULL_TURN: f64 = 360.0;

/// Shared by the server's spin window timer and the client animation.
pub const SPIN_DURATION_MS: u32 = 5000;

/// Full extra revolutions added on top of the minimal forward delta so
/// the wheel visibly spins before landing.
pub const EXTRA_SPINS: f64 = 3.0;

pub fn segment_angle(count: usize) -> f64 {
    FULL_TURN / count as f64
}

/// Wheel-space angle currently sitting under the pointer when the
/// wheel is rotated clockwise by `rotation` degrees.
pub fn pointer_angle(rotation: f64) -> f64 {
    (FULL_TURN - rotation.rem_euclid(FULL_TURN)).rem_euclid(FULL_TURN)
}

/// Index of the segment under the pointer at `rotation`, if any.
pub fn segment_at(rotation: f64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let idx = (pointer_angle(rotation) / segment_angle(count)) as usize;
    // guards against float edge cases at exactly 360 / count
    Some(idx.min(count - 1))
}

pub fn item_at_rotation<'a>(items: &'a [String], rotation: f64) -> Option<&'a str> {
    segment_at(rotation, items.len()).map(|i| items[i].as_str())
}

/// Picks a spin outcome: a landing angle drawn uniformly from
/// [0, 360), with the winning index derived from the pointer mapping
/// of that angle. Deriving rather than picking the index first means
/// the pair cannot disagree even when the angle rounds onto a segment
/// divider; equal segments keep the selection uniform across items.
/// Returns `None` for an empty wheel.
pub fn spin_outcome<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Option<(usize, f64)> {
    if count == 0 {
        return None;
    }
    let target = rng.gen_range(0.0..FULL_TURN);
    let index = segment_at(target, count)?;
    Some((index, target))
}

/// Minimal non-negative forward delta from the wheel's current angle
/// (mod one turn) to the target angle.
pub fn forward_delta(start: f64, target: f64) -> f64 {
    (target - start.rem_euclid(FULL_TURN)).rem_euclid(FULL_TURN)
}

/// Where the animation must stop: the current on-screen rotation plus
/// the minimal forward delta plus the fixed extra revolutions. The
/// start is deliberately not reset to zero so consecutive spins stay
/// visually continuous.
pub fn end_rotation(start: f64, target: f64) -> f64 {
    start + forward_delta(start, target) + EXTRA_SPINS * FULL_TURN
}

/// Cubic ease-in over the first half of progress, cubic ease-out over
/// the second: the wheel accelerates, then decelerates to a stop.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Displayed rotation at `progress` in [0, 1]. Clamps to exactly `end`
/// once progress reaches 1 so the final frame lands on the server's
/// angle with no drift.
pub fn rotation_at(start: f64, end: f64, progress: f64) -> f64 {
    if progress >= 1.0 {
        return end;
    }
    start + (end - start) * ease_in_out_cubic(progress.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn minimal_forward_delta_and_end_rotation() {
        // startRotation = 40, targetRotation = 55
        assert_eq!(forward_delta(40.0, 55.0), 15.0);
        let end = end_rotation(40.0, 55.0);
        assert_eq!(end, 1135.0);
        assert_eq!(end.rem_euclid(FULL_TURN), 55.0);
    }

    #[test]
    fn delta_wraps_backward_targets_forward() {
        // target is "behind" the start, so the wheel goes most of a turn
        assert_eq!(forward_delta(300.0, 10.0), 70.0);
        assert_eq!(forward_delta(10.0, 10.0), 0.0);
        // multi-revolution and negative starts normalize first
        assert_eq!(forward_delta(760.0, 55.0), 15.0);
        assert_eq!(forward_delta(-20.0, 10.0), 30.0);
    }

    #[test]
    fn pointer_maps_rotation_to_segment() {
        let wheel = items(&["A", "B", "C", "D"]);
        // pointer angle = (360 - 10) mod 360 = 350 -> segment D [270, 360)
        assert_eq!(item_at_rotation(&wheel, 10.0), Some("D"));
        assert_eq!(item_at_rotation(&wheel, 0.0), Some("A"));
        assert_eq!(item_at_rotation(&wheel, 90.0), Some("D"));
        assert_eq!(item_at_rotation(&wheel, 271.0), Some("A"));
        assert_eq!(item_at_rotation(&wheel, 370.0), Some("D"));
        assert_eq!(item_at_rotation(&[], 10.0), None);
    }

    #[test]
    fn final_frame_lands_on_the_declared_item() {
        let wheel = items(&["A", "B", "C", "D"]);
        let end = end_rotation(40.0, 55.0);
        let landed = rotation_at(40.0, end, 1.0);
        assert_eq!(landed, 1135.0);
        // 1135 mod 360 = 55 -> pointer angle 305 -> segment D
        assert_eq!(item_at_rotation(&wheel, landed), Some("D"));
        assert_eq!(item_at_rotation(&wheel, 55.0), Some("D"));
    }

    #[test]
    fn spin_outcome_always_agrees_with_pointer_mapping() {
        let mut rng = StdRng::seed_from_u64(7);
        for count in 1..=9 {
            for _ in 0..500 {
                let (index, target) = spin_outcome(count, &mut rng).unwrap();
                assert!((0.0..FULL_TURN).contains(&target));
                assert_eq!(segment_at(target, count), Some(index));
            }
        }
        assert!(spin_outcome(0, &mut rng).is_none());
    }

    #[test]
    fn outcome_on_a_divider_angle_matches_the_derived_index() {
        // a generator pinned to zero lands exactly on the divider at 0°
        let mut rng = rand::rngs::mock::StepRng::new(0, 0);
        let (index, target) = spin_outcome(7, &mut rng).unwrap();
        assert_eq!(target, 0.0);
        assert_eq!(segment_at(target, 7), Some(index));
    }

    #[test]
    fn divider_angles_map_to_exactly_one_segment() {
        // 360/7 does not divide evenly, so divider angles round; the
        // mapping must still land every divider in a valid segment
        for count in [3usize, 6, 7, 9, 11] {
            let wheel: Vec<String> = (0..count).map(|i| format!("item-{i}")).collect();
            for k in 0..count {
                let target =
                    (FULL_TURN - k as f64 * segment_angle(count)).rem_euclid(FULL_TURN);
                let index = segment_at(target, count).unwrap();
                assert!(index < count, "divider {k} of {count}");
                assert_eq!(item_at_rotation(&wheel, target), Some(wheel[index].as_str()));
            }
        }
    }

    #[test]
    fn easing_is_anchored_and_monotonic() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);

        let mut prev = 0.0;
        for step in 1..=100 {
            let eased = ease_in_out_cubic(step as f64 / 100.0);
            assert!(eased >= prev);
            prev = eased;
        }
    }

    #[test]
    fn rotation_clamps_outside_the_window() {
        assert_eq!(rotation_at(40.0, 1135.0, -0.5), 40.0);
        assert_eq!(rotation_at(40.0, 1135.0, 0.0), 40.0);
        assert_eq!(rotation_at(40.0, 1135.0, 1.0), 1135.0);
        assert_eq!(rotation_at(40.0, 1135.0, 1.5), 1135.0);
    }
}
