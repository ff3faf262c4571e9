use crate::intent::Intent;

/// Seam between a host loop and a simulation.
///
/// The host owns timing, input polling and rendering; the simulation only
/// advances its own state by `dt` seconds per call and reports what
/// happened.
pub trait Simulation {
    /// Discrete occurrences reported back to the host each tick.
    type Event;

    /// Advance one tick. Every rate-based quantity is scaled by `dt`.
    fn tick(&mut self, dt: f32, intent: &Intent) -> Vec<Self::Event>;

    /// Simulation clock in seconds since creation. Kept in `f64` so long
    /// sessions do not lose sub-tick resolution.
    fn elapsed(&self) -> f64;

    /// Preferred host tick rate in Hz.
    fn tick_rate(&self) -> f32 {
        60.0
    }
}
