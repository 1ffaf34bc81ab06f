use std::borrow::Cow;

use crate::action::{Action, ActionTrace};
use crate::value::Value;

/// Errors returned by tracer implementations. Replay that runs to completion without reaching a
/// fault is not an error; see [ReplayOutcome::DeadEnd].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("input invalid: {message}")]
    InvalidInput { message: Cow<'static, str> },

    #[error("dependency error: {message} caused by {source}")]
    DependencyError {
        message: Cow<'static, str>,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("internal error: {0}")]
    InternalError(String),
}

/// Result returned by tracer APIs
pub type Result<T> = std::result::Result<T, Error>;

/// Machine state captured at a fault. Implementations expose the few registers triage reasons
/// about, the action log of the faulting block, and best-effort concretization under the path
/// constraints that hold at the fault.
pub trait CrashState {
    /// The instruction pointer at the fault
    #[must_use]
    fn instruction_pointer(&self) -> Value;

    /// The base (frame) pointer at the fault
    #[must_use]
    fn base_pointer(&self) -> Value;

    /// The stack pointer at the fault
    #[must_use]
    fn stack_pointer(&self) -> Value;

    /// Actions recorded by the faulting block itself. This log is distinct from the path trace
    /// leading up to the fault; see [Terminal].
    #[must_use]
    fn actions(&self) -> &[Action];

    /// Pick a concrete candidate for `value` under the current constraints. Returns `None` when no
    /// candidate exists. A concrete value resolves to itself.
    fn resolve(&self, value: Value) -> Option<u64>;
}

/// The pair a successful replay produces: the actions recorded along the path into the crash and
/// the machine state at the fault itself. The two logs answer different questions and must not be
/// conflated: `trace` feeds write-map ingest while `state.actions()` feeds classification.
#[derive(Debug)]
pub struct Terminal<S> {
    /// Actions recorded along the path leading into the faulting block
    pub trace: ActionTrace,

    /// Machine state captured at the fault
    pub state: S,
}

impl<S> Terminal<S> {
    pub fn new(trace: ActionTrace, state: S) -> Self {
        Self { trace, state }
    }
}

/// Outcome of driving a recorded input back through the target
#[derive(Debug)]
pub enum ReplayOutcome<S> {
    /// Replay reached the fault and captured the terminal pair
    Terminal(Terminal<S>),

    /// Execution ended without reaching the fault the recording promised
    DeadEnd,
}

/// Interface to a concolic replay backend. See the `crash-triage` crate for the consumer side and
/// its scripted implementation used in tests.
pub trait Tracer {
    /// The state representation this tracer produces
    type State: CrashState;

    /// Whether the recorded input faulted when originally observed
    #[must_use]
    fn crashed(&self) -> bool;

    /// Re-execute the recorded input and capture the terminal pair
    fn replay(&mut self) -> Result<ReplayOutcome<Self::State>>;
}
