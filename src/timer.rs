//! Host wall-clock timer, independent of device timestamps. Grounded in
//! `measureme::counters::WallTime` (`start: Instant`), with `start`/`stop`
//! reshaped into an explicit state machine per SPEC_FULL.md §4.6.

use crate::error::ProfError;
use std::time::Instant;

enum State {
    NotStarted,
    Running { start: Instant },
    Stopped { start: Instant, stop: Instant },
}

/// Optional host-side stopwatch a `Profile` may use alongside device
/// timestamps.
pub struct WallTimer {
    state: State,
}

impl Default for WallTimer {
    fn default() -> Self {
        WallTimer {
            state: State::NotStarted,
        }
    }
}

impl WallTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.state = State::Running {
            start: Instant::now(),
        };
    }

    /// Idempotent: stopping an already-stopped timer keeps the original
    /// stop instant rather than extending the measured interval.
    pub fn stop(&mut self) {
        if let State::Running { start } = self.state {
            self.state = State::Stopped {
                start,
                stop: Instant::now(),
            };
        }
    }

    /// Seconds elapsed since `start()`, or between `start()` and `stop()`
    /// if stopped. Fails if `start()` was never called.
    pub fn elapsed(&self) -> Result<f64, ProfError> {
        match self.state {
            State::NotStarted => Err(ProfError::precondition(
                "time_elapsed() called before start()",
            )),
            State::Running { start } => Ok(start.elapsed().as_secs_f64()),
            State::Stopped { start, stop } => Ok(stop.duration_since(start).as_secs_f64()),
        }
    }

    pub fn is_started(&self) -> bool {
        !matches!(self.state, State::NotStarted)
    }
}
