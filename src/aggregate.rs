//! Per-event-name aggregate statistics. Grounded in `cl4_prof_calc_agg`
//! (`profiler.c`): sort instants by `(event_id, START<END)`, walk in
//! matched pairs, accumulate durations per name.

use crate::event::{EventInstant, NameId};
use crate::interner::Interner;
use rustc_hash::FxHashMap;

/// Absolute and relative time spent in events of one name.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AggregateEntry {
    pub name: NameId,
    pub absolute_time: u64,
    pub relative_time: f64,
}

/// Sort order for presenting aggregate entries. `Time` is descending by
/// construction (base spec's design notes canonicalize the original's
/// `(x<y)?1:(x>y)?-1:0` comparator this way).
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum AggregateSort {
    Name,
    Time,
}

/// Result of running the aggregator over a profile's instant list.
pub struct AggregateResult {
    pub entries: FxHashMap<NameId, AggregateEntry>,
    pub total_events_time: u64,
}

/// Computes per-name aggregates and the grand total. `instants` need not
/// be pre-sorted; this function sorts its own working copy.
pub fn aggregate(names: &Interner<crate::event::NameKind>, instants: &[EventInstant]) -> AggregateResult {
    let mut entries: FxHashMap<NameId, AggregateEntry> = names
        .ids()
        .map(|id| {
            (
                id,
                AggregateEntry {
                    name: id,
                    absolute_time: 0,
                    relative_time: 0.0,
                },
            )
        })
        .collect();

    let mut sorted: Vec<&EventInstant> = instants.iter().collect();
    sorted.sort_by(|a, b| a.cmp_by_id(b));

    let mut total_events_time: u64 = 0;
    for pair in sorted.chunks_exact(2) {
        let start = pair[0];
        let end = pair[1];
        debug_assert_eq!(start.event_id, end.event_id);
        let duration = end.instant - start.instant;
        total_events_time += duration;
        if let Some(entry) = entries.get_mut(&start.name) {
            entry.absolute_time += duration;
        }
    }

    for entry in entries.values_mut() {
        entry.relative_time = if total_events_time == 0 {
            0.0
        } else {
            entry.absolute_time as f64 / total_events_time as f64
        };
    }

    AggregateResult {
        entries,
        total_events_time,
    }
}

/// Returns `entries` sorted per `sort`: `Name` lexicographic ascending by
/// resolved name, `Time` by `absolute_time` descending.
pub fn sorted_entries<'a>(
    names: &'a Interner<crate::event::NameKind>,
    entries: &'a FxHashMap<NameId, AggregateEntry>,
    sort: AggregateSort,
) -> Vec<&'a AggregateEntry> {
    let mut v: Vec<&AggregateEntry> = entries.values().collect();
    match sort {
        AggregateSort::Name => v.sort_by(|a, b| names.name_of(a.name).cmp(names.name_of(b.name))),
        AggregateSort::Time => v.sort_by(|a, b| b.absolute_time.cmp(&a.absolute_time)),
    }
    v
}
