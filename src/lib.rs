//! A library for profiling heterogeneous-compute event streams: queues of
//! device events (OpenCL, Vulkan, CUDA-style command queues) that expose
//! `queued`/`submit`/`start`/`end` timestamps.
//!
//! The main entry point is [`Profile`]. Register the queues to be profiled
//! with [`Profile::add_queue()`], then call [`Profile::calculate()`] once
//! to ingest every queue's events and compute per-event-name aggregates and
//! the pairwise overlap matrix. After that, [`Profile::print_info()`] writes
//! a human-readable report and [`Profile::export_info()`] /
//! [`Profile::export_info_file()`] write a tabular text export.
//!
//! This crate does not implement any device backend itself: [`DeviceQueue`]
//! and [`DeviceEvent`] are the only interface it requires, so any wrapper
//! over a real device API can be profiled by implementing those two traits.
#![deny(warnings)]

#[macro_use]
extern crate log;

mod aggregate;
mod collab;
mod error;
mod event;
mod export;
mod interner;
mod overlap;
mod profile;
mod queue;
mod report;
mod timer;

pub use crate::aggregate::{AggregateEntry, AggregateSort};
pub use crate::collab::{DeviceEvent, DeviceQueue, ProfilingInfoKind};
pub use crate::error::{ProfError, ProfErrorKind};
pub use crate::export::{options as export_options, set_options as set_export_options, ExportOptions};
pub use crate::profile::Profile;

pub mod testing {
    //! In-memory [`DeviceQueue`]/[`DeviceEvent`] implementations for
    //! exercising [`crate::Profile`] without a real device backend.
    pub use crate::collab::testing::{StubEvent, StubQueue};
}
