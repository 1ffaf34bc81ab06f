use std::cell::OnceCell;

use libtracer::{CrashState, ReplayOutcome, Terminal, Tracer};

use crate::classify::{classify, CrashClass};
use crate::diag::{DiagnosticSink, Level, TracingSink, Warning};
use crate::ingest::SymbolicWriteMap;
use crate::stack::{stack_control, StackControlMap, StackControlPolicy};

/// Errors returned when establishing a triage session. [Error::NonCrashingInput] and
/// [Error::UnanalyzableCrash] are distinct on purpose: the first means the input is not worth
/// triaging, the second that this input crashed but the replay could not pin the fault down.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The recorded input never crashed the target
    #[error("input did not crash the target")]
    NonCrashingInput,

    /// The input crashed when recorded, but replay ended without reaching the fault
    #[error("replay ended without reaching a terminal crash state")]
    UnanalyzableCrash,

    /// The tracer itself failed
    #[error(transparent)]
    Tracer(#[from] libtracer::Error),
}

/// Result returned by triage APIs
pub type Result<T> = std::result::Result<T, Error>;

/// A triage run over one crashing input.
///
/// Construction consumes the tracer: it checks that the input crashed at all, replays it to the
/// terminal state, and ingests the path trace into the write map. Everything afterwards takes
/// `&self`; the only interior state is the classification cache, so sessions over different
/// inputs can run on separate threads without coordination.
pub struct CrashTriage<S, D = TracingSink> {
    state: S,
    writes: SymbolicWriteMap,
    warnings: Vec<Warning>,
    policy: StackControlPolicy,
    sink: D,
    class: OnceCell<Option<CrashClass>>,
}

impl<S: CrashState> CrashTriage<S, TracingSink> {
    /// Establish a session with diagnostics going to the `tracing` subscriber
    pub fn new<T>(tracer: T) -> Result<Self>
    where
        T: Tracer<State = S>,
    {
        Self::with_diagnostics(tracer, TracingSink)
    }
}

impl<S, D> CrashTriage<S, D>
where
    S: CrashState,
    D: DiagnosticSink,
{
    /// Establish a session, sending diagnostics to `sink`.
    ///
    /// Fails with [Error::NonCrashingInput] when the input never crashed, with
    /// [Error::UnanalyzableCrash] when replay dead-ends before the fault, and passes tracer
    /// failures through.
    pub fn with_diagnostics<T>(mut tracer: T, sink: D) -> Result<Self>
    where
        T: Tracer<State = S>,
    {
        if !tracer.crashed() {
            sink.report(Level::Error, "input did not crash the target, nothing to triage");
            return Err(Error::NonCrashingInput);
        }

        let Terminal { trace, state } = match tracer.replay()? {
            ReplayOutcome::Terminal(terminal) => terminal,
            ReplayOutcome::DeadEnd => {
                sink.report(Level::Error, "replay dead-ended before the fault");
                return Err(Error::UnanalyzableCrash);
            }
        };

        let (writes, warnings) = SymbolicWriteMap::from_trace(&state, &trace, &sink);

        Ok(Self {
            state,
            writes,
            warnings,
            policy: StackControlPolicy::default(),
            sink,
            class: OnceCell::new(),
        })
    }

    /// Override how stack control reports regions above the stack pointer
    #[must_use]
    pub fn with_stack_policy(mut self, policy: StackControlPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Classify the crash. The decision procedure runs once against the terminal state; repeated
    /// calls return the cached verdict and emit no further diagnostics. `None` means the crash
    /// shows no recognized signal and is treated as not exploitable.
    pub fn classify(&self) -> Option<CrashClass> {
        *self.class.get_or_init(|| classify(&self.state, &self.sink))
    }

    /// Whether the crash belongs to any recognized class
    pub fn exploitable(&self) -> bool {
        self.classify().is_some()
    }

    /// Attacker-influenced memory writes observed on the path into the crash
    pub fn symbolic_writes(&self) -> &SymbolicWriteMap {
        &self.writes
    }

    /// Attacker-controlled bytes at or above the stack pointer, projected from the write map on
    /// every call
    pub fn stack_control(&self) -> StackControlMap {
        stack_control(&self.state, &self.writes, self.policy, &self.sink)
    }

    /// Precision losses recorded while ingesting the path trace
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// The terminal state under triage
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Owned summary of the verdict surface, detached from the session
    pub fn report(&self) -> TriageReport {
        TriageReport {
            classification: self.classify(),
            exploitable: self.exploitable(),
            symbolic_writes: self.writes.clone(),
            warnings: self.warnings.clone(),
        }
    }
}

/// Everything a caller acts on once triage is done: the class (if any), the exploitable flag, the
/// write map, and the precision warnings accumulated along the way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriageReport {
    pub classification: Option<CrashClass>,
    pub exploitable: bool,
    pub symbolic_writes: SymbolicWriteMap,
    pub warnings: Vec<Warning>,
}

impl std::fmt::Display for TriageReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.classification {
            Some(class) => write!(f, "{class}")?,
            None => write!(f, "unclassified")?,
        }

        write!(
            f,
            " (exploitable: {exploitable}, symbolic writes: {writes}, warnings: {warnings})",
            exploitable = self.exploitable,
            writes = self.symbolic_writes.len(),
            warnings = self.warnings.len()
        )
    }
}
