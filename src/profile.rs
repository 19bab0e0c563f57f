//! `Profile`: the root object. Owns every profiling record for one
//! profiling session and drives the `register -> ingest -> aggregate ->
//! overlap -> report/export` pipeline described in base spec §2.

use crate::aggregate::{self, AggregateEntry, AggregateResult};
use crate::collab::{DeviceEvent, DeviceQueue, ProfilingInfoKind};
use crate::error::ProfError;
use crate::event::{EventInstant, EventRecord, EventSeq, InstantKind, NameId, NameKind};
use crate::export;
use crate::interner::Interner;
use crate::overlap::{self, OverlapMatrix};
use crate::queue::QueueRegistry;
use crate::report::{self, ReportData};
use crate::timer::WallTimer;
use std::io::Write as IoWrite;
use std::path::Path;
use std::sync::Arc;

/// Totals produced by [`Profile::calculate`].
#[derive(Clone, Copy, Debug, Default)]
struct Totals {
    total_events_time: u64,
    total_events_eff_time: u64,
    total_overlap: u64,
}

enum Stage {
    /// Accepting queue registrations.
    Open,
    /// `calculate` has run; read-only from here on.
    Calculated {
        aggregate: AggregateResult,
        matrix: OverlapMatrix,
        totals: Totals,
    },
}

/// Owns the queue registry, the ingested event/instant lists, and (after
/// [`Profile::calculate`]) the aggregate and overlap results.
pub struct Profile<Q: DeviceQueue> {
    queues: QueueRegistry<Q>,
    event_names: Interner<NameKind>,
    events: Vec<EventRecord>,
    instants: Vec<EventInstant>,
    num_events: u32,
    start_time: u64,
    timer: WallTimer,
    stage: Stage,
}

impl<Q: DeviceQueue> Default for Profile<Q> {
    fn default() -> Self {
        Profile {
            queues: QueueRegistry::new(),
            event_names: Interner::new(),
            events: Vec::new(),
            instants: Vec::new(),
            num_events: 0,
            start_time: u64::MAX,
            timer: WallTimer::new(),
            stage: Stage::Open,
        }
    }
}

impl<Q: DeviceQueue> Profile<Q> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `queue` under `name`. Precondition: `calculate` has not
    /// yet run.
    pub fn add_queue(&mut self, name: &str, queue: Arc<Q>) -> Result<(), ProfError> {
        self.queues.register(name, queue)
    }

    pub fn start(&mut self) {
        self.timer.start();
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }

    pub fn time_elapsed(&self) -> Result<f64, ProfError> {
        self.timer.elapsed()
    }

    /// Runs ingest, aggregation, and the overlap sweep, in that order.
    /// Idempotent-rejected: a second call fails with
    /// [`crate::error::ProfErrorKind::Precondition`].
    pub fn calculate(&mut self) -> Result<(), ProfError> {
        if matches!(self.stage, Stage::Calculated { .. }) {
            return Err(ProfError::precondition(
                "calculate() has already been run on this profile",
            ));
        }

        self.queues.seal();
        self.ingest()?;

        let agg = aggregate::aggregate(&self.event_names, &self.instants);
        let overlap = overlap::compute(&self.instants, self.event_names.len());

        let totals = Totals {
            total_events_time: agg.total_events_time,
            total_overlap: overlap.total_overlap,
            total_events_eff_time: agg.total_events_time.saturating_sub(overlap.total_overlap),
        };

        self.stage = Stage::Calculated {
            aggregate: agg,
            matrix: overlap.matrix,
            totals,
        };

        Ok(())
    }

    fn ingest(&mut self) -> Result<(), ProfError> {
        let registrations: Vec<_> = self.queues.iter().map(|(id, q)| (id, q.clone())).collect();

        for (queue_id, queue) in registrations {
            for event in queue.events() {
                let event_id = EventSeq({
                    self.num_events += 1;
                    self.num_events
                });

                let name = event.final_name();
                let name_id = self.event_names.intern(&name);

                let t_queued = event.profiling_info(ProfilingInfoKind::Queued)?;
                let t_submit = event.profiling_info(ProfilingInfoKind::Submit)?;
                let t_start = event.profiling_info(ProfilingInfoKind::Start)?;
                let t_end = event.profiling_info(ProfilingInfoKind::End)?;

                if t_start < self.start_time {
                    self.start_time = t_start;
                }

                self.instants.push(EventInstant {
                    name: name_id,
                    queue: queue_id,
                    event_id,
                    instant: t_start,
                    kind: InstantKind::Start,
                });
                self.instants.push(EventInstant {
                    name: name_id,
                    queue: queue_id,
                    event_id,
                    instant: t_end,
                    kind: InstantKind::End,
                });

                self.events.push(EventRecord {
                    event_id,
                    name: name_id,
                    queue: queue_id,
                    t_queued,
                    t_submit,
                    t_start,
                    t_end,
                });
            }
        }

        Ok(())
    }

    fn require_calculated(&self, op: &str) -> Result<(), ProfError> {
        if matches!(self.stage, Stage::Open) {
            return Err(ProfError::precondition(format!(
                "{} requires calculate() to have run",
                op
            )));
        }
        Ok(())
    }

    /// Aggregate statistics for `event_name`, or `None` if that name was
    /// never observed. Requires `calculate` to have run.
    pub fn get_aggregate(&self, event_name: &str) -> Result<Option<AggregateEntry>, ProfError> {
        self.require_calculated("get_aggregate")?;
        let Stage::Calculated { aggregate, .. } = &self.stage else {
            unreachable!()
        };
        // Looking the name up requires an id; a name never interned has
        // no entry, which is exactly the `None` case callers expect.
        Ok(self.name_id(event_name).and_then(|id| aggregate.entries.get(&id).copied()))
    }

    fn name_id(&self, name: &str) -> Option<NameId> {
        self.event_names.ids().find(|&id| self.event_names.name_of(id) == name)
    }

    pub fn print_info(
        &self,
        sink: &mut dyn std::fmt::Write,
        sort: crate::aggregate::AggregateSort,
    ) -> Result<(), ProfError> {
        self.require_calculated("print_info")?;
        let Stage::Calculated { aggregate, matrix, totals } = &self.stage else {
            unreachable!()
        };
        let elapsed_wall_seconds = if self.timer.is_started() {
            Some(self.timer.elapsed()?)
        } else {
            None
        };
        let data = ReportData {
            elapsed_wall_seconds,
            total_events_time: totals.total_events_time,
            total_events_eff_time: totals.total_events_eff_time,
            names: &self.event_names,
            entries: &aggregate.entries,
            matrix,
        };
        report::print(sink, &data, sort).map_err(|e| {
            ProfError::stream_write(format!("failed writing profiling report: {}", e))
        })
    }

    pub fn export_info<W: IoWrite>(&self, sink: &mut W) -> Result<(), ProfError> {
        self.require_calculated("export_info")?;
        let opts = export::options();
        export::export(
            sink,
            &self.events,
            self.queues.names(),
            &self.event_names,
            self.start_time,
            &opts,
        )
    }

    pub fn export_info_file(&self, path: impl AsRef<Path>) -> Result<(), ProfError> {
        self.require_calculated("export_info_file")?;
        let opts = export::options();
        export::export_to_file(
            path,
            &self.events,
            self.queues.names(),
            &self.event_names,
            self.start_time,
            &opts,
        )
    }

    /// True once `calculate` has run.
    pub fn is_calculated(&self) -> bool {
        matches!(self.stage, Stage::Calculated { .. })
    }

    pub fn num_events(&self) -> u32 {
        self.num_events
    }

    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    pub fn total_events_time(&self) -> Result<u64, ProfError> {
        self.require_calculated("total_events_time")?;
        let Stage::Calculated { totals, .. } = &self.stage else {
            unreachable!()
        };
        Ok(totals.total_events_time)
    }

    pub fn total_events_eff_time(&self) -> Result<u64, ProfError> {
        self.require_calculated("total_events_eff_time")?;
        let Stage::Calculated { totals, .. } = &self.stage else {
            unreachable!()
        };
        Ok(totals.total_events_eff_time)
    }

    /// Total time subtracted out by overlapping events:
    /// `total_events_time - total_events_eff_time`.
    pub fn total_overlap(&self) -> Result<u64, ProfError> {
        self.require_calculated("total_overlap")?;
        let Stage::Calculated { totals, .. } = &self.stage else {
            unreachable!()
        };
        Ok(totals.total_overlap)
    }
}
