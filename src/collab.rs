//! The only interface the profiling core consumes from a device wrapper
//! layer: a queue that can be iterated for completed events, and an event
//! that can report its display name and four profiling timestamps.
//!
//! Concrete device/platform/context wrapper objects are out of scope for
//! this crate (base spec §1): any wrapper implementing [`DeviceQueue`]
//! and [`DeviceEvent`] can be profiled.

use crate::error::ProfError;
use std::borrow::Cow;

/// Which of the four device timestamps to query for an event.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum ProfilingInfoKind {
    Queued,
    Submit,
    Start,
    End,
}

/// A completed unit of device work.
pub trait DeviceEvent {
    /// Display name: the event's explicit name, falling back to a
    /// command-type string when the event was never given one.
    fn final_name(&self) -> Cow<'_, str>;

    /// Nanosecond device timestamp for the given profiling milestone, or
    /// an error if the underlying query fails.
    fn profiling_info(&self, kind: ProfilingInfoKind) -> Result<u64, ProfError>;
}

/// A command queue that has already executed its events and can report
/// them for profiling.
pub trait DeviceQueue {
    type Event: DeviceEvent;

    /// Iterates the queue's completed events in arrival order.
    fn events(&self) -> Box<dyn Iterator<Item = Self::Event> + '_>;
}

/// An in-memory test double satisfying the [`DeviceQueue`]/[`DeviceEvent`]
/// contract, for unit and integration tests. The Rust analogue of
/// `cf4ocl`'s `tests/lib/ocl_stub/ocl_impl.h`.
pub mod testing {
    use super::*;

    /// A single fabricated device event: a name and four timestamps.
    #[derive(Clone, Debug)]
    pub struct StubEvent {
        pub name: String,
        pub t_queued: u64,
        pub t_submit: u64,
        pub t_start: u64,
        pub t_end: u64,
    }

    impl StubEvent {
        /// Convenience constructor for tests that only care about the
        /// start/end interval; queued/submit collapse onto start.
        pub fn interval(name: &str, t_start: u64, t_end: u64) -> Self {
            StubEvent {
                name: name.to_string(),
                t_queued: t_start,
                t_submit: t_start,
                t_start,
                t_end,
            }
        }

        /// An event whose `profiling_info` query always fails, for
        /// exercising ingest's error path.
        pub fn failing(name: &str) -> Self {
            StubEvent {
                name: name.to_string(),
                t_queued: 0,
                t_submit: 0,
                t_start: 0,
                t_end: u64::MAX,
            }
        }
    }

    impl DeviceEvent for StubEvent {
        fn final_name(&self) -> Cow<'_, str> {
            Cow::Borrowed(&self.name)
        }

        fn profiling_info(&self, kind: ProfilingInfoKind) -> Result<u64, ProfError> {
            if self.t_end == u64::MAX {
                return Err(ProfError::info_unavailable(format!(
                    "no profiling info available for event '{}'",
                    self.name
                )));
            }
            Ok(match kind {
                ProfilingInfoKind::Queued => self.t_queued,
                ProfilingInfoKind::Submit => self.t_submit,
                ProfilingInfoKind::Start => self.t_start,
                ProfilingInfoKind::End => self.t_end,
            })
        }
    }

    /// A fabricated command queue: just an ordered list of events.
    #[derive(Clone, Debug, Default)]
    pub struct StubQueue {
        events: Vec<StubEvent>,
    }

    impl StubQueue {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push(mut self, event: StubEvent) -> Self {
            self.events.push(event);
            self
        }
    }

    impl DeviceQueue for StubQueue {
        type Event = StubEvent;

        fn events(&self) -> Box<dyn Iterator<Item = StubEvent> + '_> {
            Box::new(self.events.iter().cloned())
        }
    }
}
