use libtracer::{ExprId, Value};

use crate::diag::{Level, Warning};
use crate::ingest::SymbolicWriteMap;
use crate::stack::{stack_control, StackControlPolicy};
use crate::test_fixture::{RecordingSink, ScriptedCrashState};

fn state_with_sp(sp: u64) -> ScriptedCrashState {
    ScriptedCrashState::new().with_stack_pointer(Value::Concrete(sp))
}

#[test]
fn region_above_stack_pointer_reported_unchanged() {
    let writes: SymbolicWriteMap = [(0x1000, 16)].into_iter().collect();
    let sink = RecordingSink::new();

    let control = stack_control(
        &state_with_sp(0x200),
        &writes,
        StackControlPolicy::Exclusive,
        &sink,
    );

    assert_eq!(control, [(0x1000, 16)].into_iter().collect());
}

#[test]
fn region_spanning_stack_pointer_clipped_and_rekeyed() {
    let writes: SymbolicWriteMap = [(0x1000, 16)].into_iter().collect();
    let sink = RecordingSink::new();

    let control = stack_control(
        &state_with_sp(0x1008),
        &writes,
        StackControlPolicy::Exclusive,
        &sink,
    );

    assert_eq!(control, [(0x1008, 8)].into_iter().collect());
}

#[test]
fn region_below_stack_pointer_excluded() {
    let writes: SymbolicWriteMap = [(0x1000, 16)].into_iter().collect();
    let sink = RecordingSink::new();

    let control = stack_control(
        &state_with_sp(0x1020),
        &writes,
        StackControlPolicy::Exclusive,
        &sink,
    );

    assert!(control.is_empty());
}

#[test]
fn region_starting_at_stack_pointer_kept_whole() {
    let writes: SymbolicWriteMap = [(0x1000, 16)].into_iter().collect();
    let sink = RecordingSink::new();

    let control = stack_control(
        &state_with_sp(0x1000),
        &writes,
        StackControlPolicy::Exclusive,
        &sink,
    );

    assert_eq!(control, [(0x1000, 16)].into_iter().collect());
}

#[test]
fn region_ending_exactly_at_stack_pointer() {
    let writes: SymbolicWriteMap = [(0x1000, 16)].into_iter().collect();
    let sink = RecordingSink::new();
    let state = state_with_sp(0x1010);

    let exclusive = stack_control(&state, &writes, StackControlPolicy::Exclusive, &sink);
    assert!(exclusive.is_empty());

    // The historical condition admits the zero-length clip
    let overlapping = stack_control(&state, &writes, StackControlPolicy::Overlapping, &sink);
    assert_eq!(overlapping, [(0x1010, 0)].into_iter().collect());
}

#[test]
fn overlapping_policy_reports_high_regions_twice() {
    let writes: SymbolicWriteMap = [(0x1000, 16)].into_iter().collect();
    let sink = RecordingSink::new();

    let control = stack_control(
        &state_with_sp(0x200),
        &writes,
        StackControlPolicy::Overlapping,
        &sink,
    );

    assert_eq!(control, [(0x1000, 16), (0x200, 0xe10)].into_iter().collect());
}

#[test]
fn clips_colliding_at_stack_pointer_keep_the_longest() {
    let writes: SymbolicWriteMap = [(0x1000, 16), (0x1004, 32)].into_iter().collect();
    let sink = RecordingSink::new();

    let control = stack_control(
        &state_with_sp(0x1008),
        &writes,
        StackControlPolicy::Exclusive,
        &sink,
    );

    assert_eq!(control, [(0x1008, 0x1c)].into_iter().collect());
}

#[test]
fn mixed_regions_partition_around_the_stack_pointer() {
    let writes: SymbolicWriteMap = [(0x0500, 8), (0x1000, 16), (0x2000, 4)].into_iter().collect();
    let sink = RecordingSink::new();

    let control = stack_control(
        &state_with_sp(0x1008),
        &writes,
        StackControlPolicy::Exclusive,
        &sink,
    );

    assert_eq!(control, [(0x1008, 8), (0x2000, 4)].into_iter().collect());
}

#[test]
fn region_end_saturates_at_the_address_space_limit() {
    let sp = u64::MAX - 8;
    let writes: SymbolicWriteMap = [(sp, 0x10)].into_iter().collect();
    let sink = RecordingSink::new();

    let control = stack_control(
        &state_with_sp(sp),
        &writes,
        StackControlPolicy::Exclusive,
        &sink,
    );

    assert_eq!(control, [(sp, 8)].into_iter().collect());
}

#[test]
fn symbolic_stack_pointer_yields_empty_map_and_warning() {
    let state =
        ScriptedCrashState::new().with_stack_pointer(Value::Symbolic(ExprId::new(0)));
    let writes: SymbolicWriteMap = [(0x1000, 16)].into_iter().collect();
    let sink = RecordingSink::new();

    let control = stack_control(&state, &writes, StackControlPolicy::Exclusive, &sink);

    assert!(control.is_empty());
    assert_eq!(
        sink.messages(),
        vec![(Level::Warn, Warning::SymbolicStackPointer.to_string())]
    );
}
