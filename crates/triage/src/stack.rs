use std::collections::BTreeMap;

use libtracer::{CrashState, Value};

use crate::diag::{DiagnosticSink, Warning};
use crate::ingest::SymbolicWriteMap;

/// How write-map regions are projected onto the stack
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StackControlPolicy {
    /// Each region contributes at most one entry: the region unchanged when it lies entirely
    /// above the stack pointer, or clipped and re-keyed at the stack pointer when it spans it
    #[default]
    Exclusive,

    /// Regions entirely above the stack pointer are additionally re-added clipped at the stack
    /// pointer, over-reporting controlled bytes. Reproduces the output of older triage tooling
    /// for comparison against it.
    Overlapping,
}

/// The attacker-controlled regions at or above the stack pointer: start address to byte length.
/// Derived from a [SymbolicWriteMap] on demand; see [stack_control].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StackControlMap(BTreeMap<u64, u64>);

impl StackControlMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `len` controlled bytes at `address`, keeping the larger length when the address was
    /// already recorded. Clipped regions from distinct writes can collide at the stack pointer
    /// key; the longest run wins.
    pub fn insert_max(&mut self, address: u64, len: u64) {
        let entry = self.0.entry(address).or_insert(len);
        if len > *entry {
            *entry = len;
        }
    }

    /// Controlled byte length at `address`, if any
    #[must_use]
    pub fn get(&self, address: u64) -> Option<u64> {
        self.0.get(&address).copied()
    }

    /// Regions in ascending address order as `(address, len)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.0.iter().map(|(&address, &len)| (address, len))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(u64, u64)> for StackControlMap {
    fn from_iter<I: IntoIterator<Item = (u64, u64)>>(iter: I) -> Self {
        let mut control = Self::new();
        for (address, len) in iter {
            control.insert_max(address, len);
        }
        control
    }
}

/// Project the write map onto the stack of the terminal state.
///
/// A symbolic stack pointer makes the projection meaningless; the result is then empty and a
/// [Warning::SymbolicStackPointer] goes to the sink. Region ends saturate at the address space
/// limit. The result is recomputed from the write map on every call.
pub fn stack_control<S, D>(
    state: &S,
    writes: &SymbolicWriteMap,
    policy: StackControlPolicy,
    sink: &D,
) -> StackControlMap
where
    S: CrashState,
    D: DiagnosticSink,
{
    let mut control = StackControlMap::new();

    let sp = match state.stack_pointer() {
        Value::Concrete(sp) => sp,
        Value::Symbolic(_) => {
            Warning::SymbolicStackPointer.report(sink);
            return control;
        }
    };

    for (address, len) in writes.iter() {
        let end = address.saturating_add(len);

        match policy {
            StackControlPolicy::Exclusive => {
                if address > sp {
                    control.insert_max(address, len);
                } else if sp < end {
                    // Region spans the stack pointer: report the part from sp up
                    control.insert_max(sp, end - sp);
                }
            }
            StackControlPolicy::Overlapping => {
                if address > sp {
                    control.insert_max(address, len);
                }
                if sp <= end {
                    control.insert_max(sp, end - sp);
                }
            }
        }
    }

    control
}
