//! Structured error type for the profiling engine.
//!
//! Mirrors the `GError` domain/code/message shape the original C
//! implementation used (see `gef_if_error_create_goto` call sites in its
//! profiler), but as a plain Rust enum rather than an out-parameter.

use std::fmt;

/// The kind of failure that occurred.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum ProfErrorKind {
    /// A device event's profiling-info query failed during ingest.
    InfoUnavailable,
    /// The exporter failed to write a record to its stream.
    StreamWrite,
    /// The file exporter could not open its target path.
    OpenFile,
    /// The caller violated an ordering precondition (e.g. registering a
    /// queue after `calculate`, calling `calculate` twice, reporting
    /// before `calculate`).
    Precondition,
}

/// An error produced by the profiling engine.
///
/// Carries a `domain` tag alongside `kind` so that a collaborator crate
/// embedding its own errors could attach a different domain without
/// growing this enum.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[error("[{domain}] {message}")]
pub struct ProfError {
    pub kind: ProfErrorKind,
    pub domain: &'static str,
    pub message: String,
}

const DOMAIN: &str = "profiler";

impl ProfError {
    pub fn info_unavailable(message: impl Into<String>) -> Self {
        ProfError {
            kind: ProfErrorKind::InfoUnavailable,
            domain: DOMAIN,
            message: message.into(),
        }
    }

    pub fn stream_write(message: impl Into<String>) -> Self {
        ProfError {
            kind: ProfErrorKind::StreamWrite,
            domain: DOMAIN,
            message: message.into(),
        }
    }

    pub fn open_file(message: impl Into<String>) -> Self {
        ProfError {
            kind: ProfErrorKind::OpenFile,
            domain: DOMAIN,
            message: message.into(),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        ProfError {
            kind: ProfErrorKind::Precondition,
            domain: DOMAIN,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProfErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProfErrorKind::InfoUnavailable => "info-unavailable",
            ProfErrorKind::StreamWrite => "stream-write",
            ProfErrorKind::OpenFile => "open-file",
            ProfErrorKind::Precondition => "precondition",
        };
        f.write_str(s)
    }
}

pub type Result<T> = std::result::Result<T, ProfError>;
