//! Diagnostic collection and report rendering
//!
//! Validators never write reports themselves. They return [`Diagnostic`]
//! values which the run-owned [`DiagnosticCollector`] counts and buffers,
//! then hands to a [`DiagnosticReporter`] at record boundaries together with
//! the [`RecordContext`] summary of the record being reported.
//!
//! # Architecture
//!
//! - `collector`: per-run counts, the pending buffer and flush points
//! - `context`: the "For the QSO with ..." record summary
//! - `reporter`: the reporter trait, the plain/HTML [`ReportWriter`] and an
//!   in-memory [`CollectingReporter`]
//!
//! [`Diagnostic`]: crate::app::models::Diagnostic

pub mod collector;
pub mod context;
pub mod reporter;

#[cfg(test)]
pub mod tests;

pub use collector::DiagnosticCollector;
pub use context::RecordContext;
pub use reporter::{CollectingReporter, DiagnosticReporter, ReportWriter, ReportedDiagnostic};
