use libtracer::ExprId;

/// Severity of a diagnostic message
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Debug => write!(f, "debug"),
            Level::Info => write!(f, "info"),
            Level::Warn => write!(f, "warn"),
            Level::Error => write!(f, "error"),
        }
    }
}

/// Receiver for diagnostics emitted while triaging. The sink is injected at session construction
/// so embedders control where messages go; nothing in this crate talks to a global logger
/// directly. Sinks take `&self` and may be shared across sessions.
pub trait DiagnosticSink {
    fn report(&self, level: Level, message: &str);
}

impl<D: DiagnosticSink + ?Sized> DiagnosticSink for &D {
    fn report(&self, level: Level, message: &str) {
        (**self).report(level, message);
    }
}

/// Default sink: forwards each message to the `tracing` macro matching its level.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, level: Level, message: &str) {
        match level {
            Level::Debug => tracing::debug!(target: "crash_triage", "{}", message),
            Level::Info => tracing::info!(target: "crash_triage", "{}", message),
            Level::Warn => tracing::warn!(target: "crash_triage", "{}", message),
            Level::Error => tracing::error!(target: "crash_triage", "{}", message),
        }
    }
}

/// Precision losses observed while triaging. None of these abort the run; each one is reported to
/// the session's sink and aggregated on the session so callers can judge how much to trust the
/// result.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// A write's target address was symbolic; triage continued with the tracer's best concrete
    /// candidate for it
    #[error("write target address sym:{expr} is symbolic, continuing with candidate {candidate:#x}")]
    SymbolicWriteAddress { expr: ExprId, candidate: u64 },

    /// A write's target address was symbolic with no concrete candidate; the write was dropped
    #[error("write target address sym:{expr} has no concrete candidate, dropping write")]
    UnresolvedWriteAddress { expr: ExprId },

    /// A write's data width was not a whole number of bytes; the write was dropped
    #[error("write width of {bits} bits is not byte aligned, dropping write")]
    UnalignedWriteWidth { bits: u32 },

    /// A write record carried no data at all; the record was dropped
    #[error("write record has zero width, dropping write")]
    EmptyWrite,

    /// The stack pointer itself was symbolic; stack control cannot be computed
    #[error("stack pointer is symbolic, stack control unavailable")]
    SymbolicStackPointer,
}

impl Warning {
    /// Report this warning to `sink` at [Level::Warn]
    pub(crate) fn report<D: DiagnosticSink>(&self, sink: &D) {
        sink.report(Level::Warn, &self.to_string());
    }
}
