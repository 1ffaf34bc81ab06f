use std::collections::BTreeMap;

use libtracer::{ActionKind, ActionSpace, ActionTrace, CrashState, Value};

use crate::diag::{DiagnosticSink, Warning};

/// Map from start address to the maximum number of attacker-influenced bytes observed written
/// there. Built once per session from the path trace; see [SymbolicWriteMap::from_trace].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolicWriteMap(BTreeMap<u64, u64>);

impl SymbolicWriteMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `len` bytes written at `address`, keeping the larger length when the address was
    /// already recorded.
    pub fn insert_max(&mut self, address: u64, len: u64) {
        let entry = self.0.entry(address).or_insert(len);
        if len > *entry {
            *entry = len;
        }
    }

    /// Byte length recorded at `address`, if any
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

    /// Scan the path trace for memory writes of symbolic data and fold them into a write map.
    ///
    /// Register traffic, reads, and writes of concrete data are skipped outright. Malformed or
    /// partially-resolvable records degrade precision instead of aborting: each produces a
    /// [Warning], reported to `sink` and returned alongside the map, and scanning continues with
    /// the next action.
    pub fn from_trace<S, D>(state: &S, trace: &ActionTrace, sink: &D) -> (Self, Vec<Warning>)
    where
        S: CrashState,
        D: DiagnosticSink,
    {
        let mut writes = Self::new();
        let mut warnings = Vec::new();

        for action in trace {
            if action.space != ActionSpace::Memory || action.kind != ActionKind::Write {
                continue;
            }
            if !action.data.is_symbolic() {
                continue;
            }

            if action.bits % 8 != 0 {
                note(Warning::UnalignedWriteWidth { bits: action.bits }, sink, &mut warnings);
                continue;
            }
            let len = u64::from(action.bits / 8);
            if len == 0 {
                note(Warning::EmptyWrite, sink, &mut warnings);
                continue;
            }

            let address = match action.address {
                Value::Concrete(address) => address,
                Value::Symbolic(expr) => match state.resolve(action.address) {
                    Some(candidate) => {
                        note(
                            Warning::SymbolicWriteAddress { expr, candidate },
                            sink,
                            &mut warnings,
                        );
                        candidate
                    }
                    None => {
                        note(Warning::UnresolvedWriteAddress { expr }, sink, &mut warnings);
                        continue;
                    }
                },
            };

            writes.insert_max(address, len);
        }

        (writes, warnings)
    }
}

impl FromIterator<(u64, u64)> for SymbolicWriteMap {
    fn from_iter<I: IntoIterator<Item = (u64, u64)>>(iter: I) -> Self {
        let mut writes = Self::new();
        for (address, len) in iter {
            writes.insert_max(address, len);
        }
        writes
    }
}

fn note<D: DiagnosticSink>(warning: Warning, sink: &D, warnings: &mut Vec<Warning>) {
    warning.report(sink);
    warnings.push(warning);
}
