pub mod geom;
pub mod intent;
pub mod layer;
pub mod simulation;
pub mod timer;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::geom::Rect;
    use crate::intent::Intent;
    use crate::simulation::Simulation;

    /// Default test step: 60 Hz.
    pub const TEST_DT: f32 = 1.0 / 60.0;

    /// Run `n` ticks with the same intent, returning all accumulated events.
    pub fn run_ticks<S: Simulation>(
        sim: &mut S,
        n: usize,
        dt: f32,
        intent: &Intent,
    ) -> Vec<S::Event> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(sim.tick(dt, intent));
        }
        all_events
    }

    /// Run `n` ticks with no input held.
    pub fn run_idle_ticks<S: Simulation>(sim: &mut S, n: usize, dt: f32) -> Vec<S::Event> {
        run_ticks(sim, n, dt, &Intent::default())
    }

    /// A row of `count` square tiles of side `tile` whose tops sit on `y`,
    /// starting at `x`.
    pub fn flat_floor(x: f32, y: f32, count: usize, tile: f32) -> Vec<Rect> {
        (0..count)
            .map(|i| Rect::new(x + i as f32 * tile, y, tile, tile))
            .collect()
    }

    /// Number of whole ticks of length `dt` that fit in `secs`.
    pub fn ticks_for(secs: f32, dt: f32) -> usize {
        (secs / dt).floor() as usize
    }

    /// Run ticks until `stop` returns true, up to `max_ticks`. Returns the
    /// number of ticks run.
    pub fn run_until<S: Simulation>(
        sim: &mut S,
        max_ticks: usize,
        dt: f32,
        intent: &Intent,
        mut stop: impl FnMut(&S, &[S::Event]) -> bool,
    ) -> usize {
        for i in 0..max_ticks {
            let events = sim.tick(dt, intent);
            if stop(sim, &events) {
                return i + 1;
            }
        }
        max_ticks
    }

}
