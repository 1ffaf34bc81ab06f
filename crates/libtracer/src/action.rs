use crate::value::Value;

/// The state family an action touched
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActionSpace {
    Memory,
    Register,
}

impl std::fmt::Display for ActionSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionSpace::Memory => write!(f, "mem"),
            ActionSpace::Register => write!(f, "reg"),
        }
    }
}

/// Direction of an action
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Read,
    Write,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Read => write!(f, "read"),
            ActionKind::Write => write!(f, "write"),
        }
    }
}

/// A single state access recorded during replay. Both the target address and the data moved may be
/// symbolic. The data width is recorded in bits and is not guaranteed to be byte aligned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Action {
    pub space: ActionSpace,
    pub kind: ActionKind,
    pub address: Value,
    pub data: Value,
    pub bits: u32,
}

impl Action {
    pub fn new(space: ActionSpace, kind: ActionKind, address: Value, data: Value, bits: u32) -> Self {
        Self {
            space,
            kind,
            address,
            data,
            bits,
        }
    }

    /// A memory write of `bits` bits of `data` to `address`
    pub fn memory_write(address: Value, data: Value, bits: u32) -> Self {
        Self::new(ActionSpace::Memory, ActionKind::Write, address, data, bits)
    }

    /// A memory read of `bits` bits of `data` from `address`
    pub fn memory_read(address: Value, data: Value, bits: u32) -> Self {
        Self::new(ActionSpace::Memory, ActionKind::Read, address, data, bits)
    }

    /// A register write of `bits` bits of `data` to the register numbered by `address`
    pub fn register_write(address: Value, data: Value, bits: u32) -> Self {
        Self::new(ActionSpace::Register, ActionKind::Write, address, data, bits)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{space}.{kind} [{address}] {data}#{bits}",
            space = self.space,
            kind = self.kind,
            address = self.address,
            data = self.data,
            bits = self.bits
        )
    }
}

/// Ordered log of actions. Order is the order of occurrence during replay: consumers that look for
/// the first qualifying entry rely on it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionTrace(Vec<Action>);

impl ActionTrace {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, action: Action) {
        self.0.push(action);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Action] {
        self.0.as_slice()
    }
}

impl From<Vec<Action>> for ActionTrace {
    fn from(actions: Vec<Action>) -> Self {
        Self(actions)
    }
}

impl FromIterator<Action> for ActionTrace {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ActionTrace {
    type Item = Action;
    type IntoIter = std::vec::IntoIter<Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ActionTrace {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
