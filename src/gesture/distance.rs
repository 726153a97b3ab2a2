/// Accumulates continuous scroll distance and emits discrete unit steps.
///
/// Sub-threshold motion is carried forward in the remainder, so the total
/// number of emitted steps matches the total scrolled distance regardless of
/// how finely the input is chopped up.
#[derive(Debug)]
pub struct ScrollDistanceHelper {
    unit_distance: f64,
    remainder: f64,
}

impl ScrollDistanceHelper {
    pub fn new(unit_distance: f64) -> Self {
        Self {
            unit_distance: unit_distance.max(f64::EPSILON),
            remainder: 0.0,
        }
    }

    /// Add scrolled distance, invoking `on_step` once per completed unit step
    /// with the step direction (`1` or `-1`).
    pub fn add(&mut self, distance: f64, mut on_step: impl FnMut(i32)) {
        self.remainder += distance;
        while self.remainder.abs() >= self.unit_distance {
            let direction = if self.remainder > 0.0 { 1 } else { -1 };
            self.remainder -= f64::from(direction) * self.unit_distance;
            on_step(direction);
        }
    }

    /// Zero the remainder without emitting steps. Called when a swipe session
    /// ends so stale motion never leaks into the next session.
    pub fn reset(&mut self) {
        self.remainder = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_steps(helper: &mut ScrollDistanceHelper, distance: f64) -> Vec<i32> {
        let mut steps = Vec::new();
        helper.add(distance, |direction| steps.push(direction));
        steps
    }

    #[test]
    fn emits_one_step_per_unit_distance() {
        let mut helper = ScrollDistanceHelper::new(10.0);
        assert_eq!(collect_steps(&mut helper, 35.0), vec![1, 1, 1]);
    }

    #[test]
    fn fractional_motion_accumulates_across_calls() {
        let mut helper = ScrollDistanceHelper::new(10.0);
        let mut total = 0;
        for _ in 0..25 {
            helper.add(1.0, |_| total += 1);
        }
        assert_eq!(total, 2);

        // the 0.5 remainder rolls into the next call
        helper.add(0.5, |_| total += 1);
        helper.add(4.5, |_| total += 1);
        assert_eq!(total, 3);
    }

    #[test]
    fn negative_distance_emits_negative_steps() {
        let mut helper = ScrollDistanceHelper::new(10.0);
        assert_eq!(collect_steps(&mut helper, -21.0), vec![-1, -1]);
    }

    #[test]
    fn direction_reversal_consumes_remainder_first() {
        let mut helper = ScrollDistanceHelper::new(10.0);
        assert_eq!(collect_steps(&mut helper, 8.0), Vec::<i32>::new());
        // -8 cancels the +8 remainder, then another -12 crosses one unit down
        assert_eq!(collect_steps(&mut helper, -20.0), vec![-1]);
    }

    #[test]
    fn reset_discards_accumulated_remainder() {
        let mut helper = ScrollDistanceHelper::new(10.0);
        assert_eq!(collect_steps(&mut helper, 9.5), Vec::<i32>::new());
        helper.reset();
        assert_eq!(collect_steps(&mut helper, 9.9), Vec::<i32>::new());
        assert_eq!(collect_steps(&mut helper, 0.1), vec![1]);
    }

    #[test]
    fn signed_step_total_tracks_input_within_one_unit() {
        let mut helper = ScrollDistanceHelper::new(7.0);
        let inputs = [3.0, -10.5, 22.0, 0.25, -1.75, 40.0, -6.0];
        let mut signed_steps = 0.0;
        for input in inputs {
            helper.add(input, |direction| signed_steps += f64::from(direction) * 7.0);
        }
        let total: f64 = inputs.iter().sum();
        assert!((total - signed_steps).abs() < 7.0);
    }
}
