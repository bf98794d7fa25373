//=========================================================================
// Frame Clock
//=========================================================================
//
// Fixed-rate pacing for the game loop.
//
// The loop calls `tick(target_fps)` once per frame; the clock sleeps for
// whatever remains of the frame budget and reports the real elapsed time
// since the previous tick. A scripted `ManualClock` stands in for the
// wall clock in tests so scene runs are deterministic and instant.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread;
use std::time::{Duration, Instant};

//=== Clock Trait =========================================================

/// Frame pacing source.
///
/// `tick` blocks until the current frame's budget (`1 / target_fps`
/// seconds since the previous tick) has elapsed, then returns the actual
/// time the frame took. A `target_fps` of zero disables pacing.
pub trait Clock {
    /// Waits out the remainder of the frame and returns the frame's real
    /// duration.
    fn tick(&mut self, target_fps: u32) -> Duration;

    /// Time elapsed since the previous `tick` without waiting.
    fn elapsed(&self) -> Duration;
}

//=== SystemClock =========================================================

/// Wall-clock pacing via `thread::sleep`.
#[derive(Debug)]
pub struct SystemClock {
    last_tick: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn tick(&mut self, target_fps: u32) -> Duration {
        if target_fps > 0 {
            let frame_duration = Duration::from_secs_f64(1.0 / target_fps as f64);
            let elapsed = self.last_tick.elapsed();
            if elapsed < frame_duration {
                thread::sleep(frame_duration - elapsed);
            }
        }

        let now = Instant::now();
        let frame = now - self.last_tick;
        self.last_tick = now;
        frame
    }

    fn elapsed(&self) -> Duration {
        self.last_tick.elapsed()
    }
}

//=== ManualClock =========================================================

/// A clock that never sleeps and advances by a fixed step per tick.
///
/// Used in tests and headless runs where wall-clock pacing is noise.
#[derive(Debug)]
pub struct ManualClock {
    step: Duration,
    ticks: u64,
}

impl ManualClock {
    /// A clock advancing `step` per tick.
    pub fn new(step: Duration) -> Self {
        Self { step, ticks: 0 }
    }

    /// Number of ticks taken so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Clock for ManualClock {
    fn tick(&mut self, _target_fps: u32) -> Duration {
        self.ticks += 1;
        self.step
    }

    fn elapsed(&self) -> Duration {
        self.step
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
