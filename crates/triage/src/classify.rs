use libtracer::{ActionKind, ActionSpace, CrashState};

use crate::diag::{DiagnosticSink, Level};

/// How a crash presents. Every class here is considered exploitable; a crash showing none of these
/// signals is reported as unclassified instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CrashClass {
    /// The instruction pointer depends on input
    IpOverwrite,

    /// The base pointer depends on input
    BpOverwrite,

    /// Input-controlled data written through an input-controlled address
    WriteWhatWhere,

    /// Fixed data written through an input-controlled address
    WriteXWhere,
}

impl std::fmt::Display for CrashClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrashClass::IpOverwrite => write!(f, "ip_overwrite"),
            CrashClass::BpOverwrite => write!(f, "bp_overwrite"),
            CrashClass::WriteWhatWhere => write!(f, "write_what_where"),
            CrashClass::WriteXWhere => write!(f, "write_x_where"),
        }
    }
}

/// Ordered decision procedure over the terminal state. The checks run in a fixed order and the
/// first match wins, so a symbolic instruction pointer always classifies as [CrashClass::IpOverwrite]
/// even when weaker signals are also present.
pub fn classify<S, D>(state: &S, sink: &D) -> Option<CrashClass>
where
    S: CrashState,
    D: DiagnosticSink,
{
    if state.instruction_pointer().is_symbolic() {
        sink.report(Level::Info, "detected instruction pointer overwrite");
        return Some(CrashClass::IpOverwrite);
    }

    if state.base_pointer().is_symbolic() {
        sink.report(Level::Info, "detected base pointer overwrite");
        return Some(CrashClass::BpOverwrite);
    }

    // Scan the faulting block's own log, in recorded order, for memory accesses through a
    // symbolic address. Reads through such an address do not decide anything; the first write
    // does, and later writes never override it.
    for action in state.actions() {
        if action.space != ActionSpace::Memory || !action.address.is_symbolic() {
            continue;
        }
        if action.kind != ActionKind::Write {
            continue;
        }

        let class = if action.data.is_symbolic() {
            sink.report(Level::Info, "detected write-what-where primitive");
            CrashClass::WriteWhatWhere
        } else {
            sink.report(Level::Info, "detected write-x-where primitive");
            CrashClass::WriteXWhere
        };
        return Some(class);
    }

    None
}
