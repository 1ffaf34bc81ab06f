//! Scripted stand-ins for the tracer boundary. Used by the unit tests here and by the
//! integration-test and benchmark packages, which exercise the engine without a real replay
//! backend behind it.

use std::cell::RefCell;
use std::collections::BTreeMap;

use libtracer::{
    Action, ActionTrace, CrashState, Error, ExprId, ReplayOutcome, Terminal, Tracer, Value,
};

use crate::diag::{DiagnosticSink, Level};

/// [CrashState] with scripted registers, action log, and concretization table
#[derive(Clone, Debug)]
pub struct ScriptedCrashState {
    instruction_pointer: Value,
    base_pointer: Value,
    stack_pointer: Value,
    actions: Vec<Action>,
    resolutions: BTreeMap<ExprId, u64>,
}

impl Default for ScriptedCrashState {
    fn default() -> Self {
        Self {
            instruction_pointer: Value::Concrete(0x0040_1000),
            base_pointer: Value::Concrete(0x7fff_f000),
            stack_pointer: Value::Concrete(0x7fff_e000),
            actions: Vec::new(),
            resolutions: BTreeMap::new(),
        }
    }
}

impl ScriptedCrashState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instruction_pointer(mut self, value: Value) -> Self {
        self.instruction_pointer = value;
        self
    }

    pub fn with_base_pointer(mut self, value: Value) -> Self {
        self.base_pointer = value;
        self
    }

    pub fn with_stack_pointer(mut self, value: Value) -> Self {
        self.stack_pointer = value;
        self
    }

    /// Append `action` to the faulting block's own log
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Script `resolve` to offer `value` as the concrete candidate for `expr`
    pub fn with_resolution(mut self, expr: ExprId, value: u64) -> Self {
        self.resolutions.insert(expr, value);
        self
    }
}

impl CrashState for ScriptedCrashState {
    fn instruction_pointer(&self) -> Value {
        self.instruction_pointer
    }

    fn base_pointer(&self) -> Value {
        self.base_pointer
    }

    fn stack_pointer(&self) -> Value {
        self.stack_pointer
    }

    fn actions(&self) -> &[Action] {
        &self.actions
    }

    fn resolve(&self, value: Value) -> Option<u64> {
        match value {
            Value::Concrete(value) => Some(value),
            Value::Symbolic(expr) => self.resolutions.get(&expr).copied(),
        }
    }
}

/// [Tracer] that yields a canned outcome
pub struct ScriptedTracer {
    crashed: bool,
    outcome: Option<libtracer::Result<ReplayOutcome<ScriptedCrashState>>>,
}

impl ScriptedTracer {
    /// A tracer whose input crashed and whose replay reaches `state` through `trace`
    pub fn crashing(trace: ActionTrace, state: ScriptedCrashState) -> Self {
        Self {
            crashed: true,
            outcome: Some(Ok(ReplayOutcome::Terminal(Terminal::new(trace, state)))),
        }
    }

    /// A tracer whose input never crashed
    pub fn non_crashing() -> Self {
        Self {
            crashed: false,
            outcome: None,
        }
    }

    /// A tracer whose input crashed but whose replay dead-ends before the fault
    pub fn dead_end() -> Self {
        Self {
            crashed: true,
            outcome: Some(Ok(ReplayOutcome::DeadEnd)),
        }
    }

    /// A tracer whose replay fails outright with `error`
    pub fn failing(error: Error) -> Self {
        Self {
            crashed: true,
            outcome: Some(Err(error)),
        }
    }
}

impl Tracer for ScriptedTracer {
    type State = ScriptedCrashState;

    fn crashed(&self) -> bool {
        self.crashed
    }

    fn replay(&mut self) -> libtracer::Result<ReplayOutcome<ScriptedCrashState>> {
        self.outcome
            .take()
            .expect("scripted tracer has no replay outcome left")
    }
}

/// [DiagnosticSink] that records every message for later assertions. Pass it by reference so the
/// recording stays inspectable after the session takes its copy of the sink.
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: RefCell<Vec<(Level, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded so far, in emission order
    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.borrow().clone()
    }

    /// Number of messages recorded at `level`
    pub fn count_at(&self, level: Level) -> usize {
        self.messages
            .borrow()
            .iter()
            .filter(|(recorded, _)| *recorded == level)
            .count()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, level: Level, message: &str) {
        self.messages.borrow_mut().push((level, message.to_owned()));
    }
}
