//! Human-readable summary printer. Grounded in `cl4_prof_print_info`
//! (`profiler.c`): fixed-width columns, scientific-notation absolute
//! times, and a descending-by-default "TIME" sort.

use crate::aggregate::{sorted_entries, AggregateEntry, AggregateSort};
use crate::event::{NameId, NameKind};
use crate::interner::Interner;
use crate::overlap::OverlapMatrix;
use rustc_hash::FxHashMap;
use std::fmt::Write;

/// Everything the reporter needs, borrowed from a calculated `Profile`.
pub struct ReportData<'a> {
    pub elapsed_wall_seconds: Option<f64>,
    pub total_events_time: u64,
    pub total_events_eff_time: u64,
    pub names: &'a Interner<NameKind>,
    pub entries: &'a FxHashMap<NameId, AggregateEntry>,
    pub matrix: &'a OverlapMatrix,
}

/// Writes the profiling report to `sink`, matching the original's layout:
/// wall-clock time, total events time, an aggregate table, and, only if
/// any overlaps were found, effective time, savings, and an overlap
/// table.
pub fn print(sink: &mut dyn Write, data: &ReportData<'_>, sort: AggregateSort) -> std::fmt::Result {
    writeln!(sink)?;
    writeln!(
        sink,
        "   =========================== Timing/Profiling ===========================\n"
    )?;

    if let Some(seconds) = data.elapsed_wall_seconds {
        writeln!(sink, "     Total elapsed time        : {:.6}s", seconds)?;
    }

    if data.total_events_time > 0 {
        writeln!(
            sink,
            "     Total of all events       : {:.6}s",
            data.total_events_time as f64 * 1e-9
        )?;
    }

    if !data.entries.is_empty() {
        writeln!(sink, "     Aggregate times by event  :")?;
        writeln!(
            sink,
            "       ------------------------------------------------------------------"
        )?;
        writeln!(
            sink,
            "       | Event name                     | Rel. time (%) | Abs. time (s) |"
        )?;
        writeln!(
            sink,
            "       ------------------------------------------------------------------"
        )?;
        for entry in sorted_entries(data.names, data.entries, sort) {
            writeln!(
                sink,
                "       | {:<30.30} | {:>13.4} | {:>13.4e} |",
                data.names.name_of(entry.name),
                entry.relative_time * 100.0,
                entry.absolute_time as f64 * 1e-9,
            )?;
        }
        writeln!(
            sink,
            "       ------------------------------------------------------------------"
        )?;
    }

    let pairs: Vec<_> = data.matrix.nonzero_pairs().collect();
    if !pairs.is_empty() {
        writeln!(
            sink,
            "     Tot. of all events (eff.) : {:.4e}s",
            data.total_events_eff_time as f64 * 1e-9
        )?;
        writeln!(
            sink,
            "                                 {:.4e}s saved with overlaps",
            (data.total_events_time - data.total_events_eff_time) as f64 * 1e-9
        )?;
        writeln!(sink, "     Event overlap times       :")?;
        writeln!(
            sink,
            "       ------------------------------------------------------------------"
        )?;
        writeln!(
            sink,
            "       | Event 1                | Event2                 | Overlap (s)  |"
        )?;
        writeln!(
            sink,
            "       ------------------------------------------------------------------"
        )?;
        for (i, j, overlap) in pairs {
            writeln!(
                sink,
                "       | {:<22.22} | {:<22.22} | {:>12.4e} |",
                data.names.name_of(crate::interner::Id::from_index(i)),
                data.names.name_of(crate::interner::Id::from_index(j)),
                overlap as f64 * 1e-9,
            )?;
        }
        writeln!(
            sink,
            "       ------------------------------------------------------------------"
        )?;
    }

    Ok(())
}
