use crate::*;

#[test]
fn constructors_set_space_and_kind() {
    let write = Action::memory_write(Value::Concrete(0x1000), Value::Concrete(0x41), 64);
    assert_eq!(write.space, ActionSpace::Memory);
    assert_eq!(write.kind, ActionKind::Write);
    assert_eq!(write.bits, 64);

    let read = Action::memory_read(Value::Concrete(0x2000), Value::Concrete(0), 8);
    assert_eq!(read.space, ActionSpace::Memory);
    assert_eq!(read.kind, ActionKind::Read);

    let register = Action::register_write(Value::Concrete(3), Value::Concrete(0), 64);
    assert_eq!(register.space, ActionSpace::Register);
    assert_eq!(register.kind, ActionKind::Write);
}

#[test]
fn action_display() {
    let action = Action::memory_write(Value::Concrete(0x1000), Value::Concrete(0x41), 8);
    assert_eq!(action.to_string(), "mem.write [0x1000] 0x41#8");
}

#[test]
fn trace_preserves_recording_order() {
    let trace: ActionTrace = (0..4)
        .map(|i| Action::memory_write(Value::Concrete(0x1000 + i), Value::Concrete(i), 8))
        .collect();

    assert_eq!(trace.len(), 4);
    assert!(!trace.is_empty());

    let addresses: Vec<u64> = trace
        .iter()
        .filter_map(|action| action.address.as_concrete())
        .collect();
    assert_eq!(addresses, vec![0x1000, 0x1001, 0x1002, 0x1003]);
}

#[test]
fn trace_from_vec_matches_collected() {
    let actions = vec![
        Action::memory_write(Value::Concrete(0x1000), Value::Concrete(0), 8),
        Action::memory_read(Value::Concrete(0x1000), Value::Concrete(0), 8),
    ];
    let from_vec = ActionTrace::from(actions.clone());
    let collected: ActionTrace = actions.into_iter().collect();
    assert_eq!(from_vec, collected);
}
