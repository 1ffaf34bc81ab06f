//! This crate decides whether a recorded crash looks exploitable and reports which memory the
//! crashing input controls at the fault.
//!
//! A replay backend implementing [libtracer::Tracer] drives the input back to its fault and hands
//! over the terminal pair: the actions recorded along the path in and the machine state at the
//! fault itself. A [session::CrashTriage] built from it ingests the path trace into a
//! [ingest::SymbolicWriteMap], classifies the crash with an ordered decision procedure, and
//! projects input-controlled bytes onto the stack on demand.
//!
//! ### Diagnostics
//!
//! Messages flow through the [diag::DiagnosticSink] injected per session; the default
//! [diag::TracingSink] hands them to the `tracing` subscriber. Precision losses additionally
//! aggregate as [diag::Warning] values on the session itself, so callers can judge how much to
//! trust a verdict without parsing log output.

/// Decision procedure and crash classes.
pub mod classify;

/// Diagnostic sink, levels, and degraded-precision warnings.
pub mod diag;

/// Path-trace ingest into the symbolic write map.
pub mod ingest;

/// Triage session tying replay, ingest, classification, and stack control together.
pub mod session;

/// Projection of the write map onto the stack of the terminal state.
pub mod stack;

/// Scripted tracer and sink implementations for tests and benchmarks.
pub mod test_fixture;

#[cfg(test)]
mod tests;
