//! Bobbing target indicator, advanced by the fixed presentation tick.

const STEPS: i32 = 10;
const CONTROL: [f64; 4] = [0.0, 0.0, 1.0, 1.0];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetMarker {
    phase: i32,
    heading: i32,
}

impl Default for TargetMarker {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetMarker {
    pub fn new() -> Self {
        Self {
            phase: 0,
            heading: 1,
        }
    }

    /// Moves one step along the curve, reversing at either end. The marker
    /// rests on the endpoint for one extra tick when it turns.
    pub fn tick(&mut self) {
        let next = self.phase + self.heading;
        if !(0..=STEPS).contains(&next) {
            self.heading = -self.heading;
            return;
        }
        self.phase = next;
    }

    pub fn t(&self) -> f64 {
        self.phase as f64 / STEPS as f64
    }

    /// Height on the cubic Bezier through `CONTROL`, in `[0, 1]`.
    pub fn height(&self) -> f64 {
        bezier(self.t())
    }
}

fn bezier(t: f64) -> f64 {
    let u = 1.0 - t;
    u * u * u * CONTROL[0]
        + 3.0 * u * u * t * CONTROL[1]
        + 3.0 * u * t * t * CONTROL[2]
        + t * t * t * CONTROL[3]
}
