//! Tabular text export, plus the process-wide default [`ExportOptions`]
//! record. Grounded in `cl4_prof_export_info`/`cl4_prof_export_info_file`
//! and the `G_LOCK_DEFINE_STATIC(export_options)` global in `profiler.c`.

use crate::error::ProfError;
use crate::event::EventRecord;
use crate::interner::Interner;
use parking_lot::Mutex;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Formatting knobs for [`export`]. Defaults match the original: a tab
/// separator, `\n` newlines, and no wrapping delimiters around queue or
/// event names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub separator: String,
    pub newline: String,
    pub queue_delim: String,
    pub evname_delim: String,
    pub zero_start: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            separator: "\t".to_string(),
            newline: "\n".to_string(),
            queue_delim: String::new(),
            evname_delim: String::new(),
            zero_start: true,
        }
    }
}

static DEFAULT_OPTIONS: Mutex<Option<ExportOptions>> = Mutex::new(None);

/// Process-wide default export options. Safe to call concurrently with
/// [`set_options`]; each call sees a consistent snapshot.
pub fn options() -> ExportOptions {
    DEFAULT_OPTIONS
        .lock()
        .clone()
        .unwrap_or_default()
}

/// Replaces the process-wide default export options.
pub fn set_options(opts: ExportOptions) {
    *DEFAULT_OPTIONS.lock() = Some(opts);
}

/// Writes one line per event, in `t_start` ascending order, to `sink`.
///
/// Line format:
/// `<queue_delim><queue><queue_delim><sep><t_start><sep><t_end><sep><evname_delim><event><evname_delim><newline>`
///
/// When `opts.zero_start` is set, the emitted `t_start`/`t_end` are
/// relative to `start_time` (the profile's earliest observed instant);
/// otherwise they are absolute device instants.
pub fn export<W: Write>(
    sink: &mut W,
    events: &[EventRecord],
    queue_names: &Interner<crate::event::QueueKind>,
    event_names: &Interner<crate::event::NameKind>,
    start_time: u64,
    opts: &ExportOptions,
) -> Result<(), ProfError> {
    let mut ordered: Vec<&EventRecord> = events.iter().collect();
    ordered.sort_by_key(|e| e.t_start);

    for event in ordered {
        let (t_start, t_end) = if opts.zero_start {
            (event.t_start - start_time, event.t_end - start_time)
        } else {
            (event.t_start, event.t_end)
        };

        write!(
            sink,
            "{qd}{queue}{qd}{sep}{t_start}{sep}{t_end}{sep}{ed}{name}{ed}{nl}",
            qd = opts.queue_delim,
            queue = queue_names.name_of(event.queue),
            sep = opts.separator,
            t_start = t_start,
            t_end = t_end,
            ed = opts.evname_delim,
            name = event_names.name_of(event.name),
            nl = opts.newline,
        )
        .map_err(|e| ProfError::stream_write(format!("failed writing profiling record: {}", e)))?;
    }

    Ok(())
}

/// Opens `path` for writing, delegates to [`export`], and closes the
/// handle on every exit path (the file is closed by `Drop` regardless of
/// whether `export` succeeds).
pub fn export_to_file(
    path: impl AsRef<Path>,
    events: &[EventRecord],
    queue_names: &Interner<crate::event::QueueKind>,
    event_names: &Interner<crate::event::NameKind>,
    start_time: u64,
    opts: &ExportOptions,
) -> Result<(), ProfError> {
    let path = path.as_ref();
    let mut file = File::create(path).map_err(|e| {
        ProfError::open_file(format!("unable to open '{}' for exporting: {}", path.display(), e))
    })?;
    export(&mut file, events, queue_names, event_names, start_time, opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventSeq;

    #[test]
    fn zero_start_shifts_timestamps_s6() {
        let mut queue_names = Interner::new();
        let mut event_names = Interner::new();
        let queue = queue_names.intern("q0");
        let name = event_names.intern("k");

        let record = EventRecord {
            event_id: EventSeq(1),
            name,
            queue,
            t_queued: 1100,
            t_submit: 1100,
            t_start: 1100,
            t_end: 1200,
        };

        let mut buf = Vec::new();
        export(
            &mut buf,
            &[record],
            &queue_names,
            &event_names,
            1000,
            &ExportOptions::default(),
        )
        .unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "q0\t100\t200\tk\n");
    }

    #[test]
    fn absolute_mode_keeps_device_instants() {
        let mut queue_names = Interner::new();
        let mut event_names = Interner::new();
        let queue = queue_names.intern("q0");
        let name = event_names.intern("k");

        let record = EventRecord {
            event_id: EventSeq(1),
            name,
            queue,
            t_queued: 1100,
            t_submit: 1100,
            t_start: 1100,
            t_end: 1200,
        };

        let mut opts = ExportOptions::default();
        opts.zero_start = false;

        let mut buf = Vec::new();
        export(&mut buf, &[record], &queue_names, &event_names, 1000, &opts).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "q0\t1100\t1200\tk\n");
    }

    #[test]
    fn custom_delimiters_wrap_names() {
        let mut queue_names = Interner::new();
        let mut event_names = Interner::new();
        let queue = queue_names.intern("q0");
        let name = event_names.intern("k");

        let record = EventRecord {
            event_id: EventSeq(1),
            name,
            queue,
            t_queued: 0,
            t_submit: 0,
            t_start: 0,
            t_end: 10,
        };

        let opts = ExportOptions {
            separator: ",".to_string(),
            newline: ";".to_string(),
            queue_delim: "\"".to_string(),
            evname_delim: "'".to_string(),
            zero_start: false,
        };

        let mut buf = Vec::new();
        export(&mut buf, &[record], &queue_names, &event_names, 0, &opts).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "\"q0\",0,10,'k';");
    }

    #[test]
    fn default_options_round_trip() {
        let custom = ExportOptions {
            separator: ";".to_string(),
            ..ExportOptions::default()
        };
        set_options(custom.clone());
        assert_eq!(options(), custom);
        set_options(ExportOptions::default());
    }
}
