//! This crate defines the boundary between a concolic replay backend and the crash triage engine
//! built on top of it. A tracer re-executes a recorded crashing input, records the state accesses
//! made along the way, and hands back the machine state at the fault with symbolic values tagged
//! as such.
//!
//! The engine consumes only this vocabulary, so any backend that can replay an input and report
//! which values depend on it can implement [Tracer] and [CrashState].

mod action;
mod tracer;
mod value;

pub use action::*;
pub use tracer::*;
pub use value::*;

#[cfg(test)]
mod tests;
