/// Handle to a symbolic expression owned by the tracer. The handle is unique per expression per
/// replay and is only meaningful to the tracer that issued it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(usize);

impl std::fmt::Debug for ExprId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ExprId")
            .field(&format!(
                "{id:#0width$x}",
                id = &self.0,
                width = 2 * std::mem::size_of::<usize>()
            ))
            .finish()
    }
}

impl std::fmt::Display for ExprId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:#0width$x}",
            self.0,
            // Each byte is represented by 2 hex characters
            width = 2 * std::mem::size_of::<usize>()
        )
    }
}

impl ExprId {
    /// Construct a new expression handle
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the raw identifier backing this handle. This identifier should be treated as an opaque
    /// value.
    pub const fn raw_id(self) -> usize {
        self.0
    }
}

/// A machine word observed during replay. Values carry their symbolicity in the type so callers
/// branch on the tag instead of probing the representation.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Fully determined value
    Concrete(u64),

    /// Value constrained but not determined by the path; the handle refers to the tracer's
    /// expression for it
    Symbolic(ExprId),
}

impl Value {
    /// Whether this value depends on replay input
    #[must_use]
    pub const fn is_symbolic(self) -> bool {
        matches!(self, Value::Symbolic(_))
    }

    /// Whether this value is fully determined
    #[must_use]
    pub const fn is_concrete(self) -> bool {
        matches!(self, Value::Concrete(_))
    }

    /// The concrete value, if this is one
    #[must_use]
    pub const fn as_concrete(self) -> Option<u64> {
        match self {
            Value::Concrete(value) => Some(value),
            Value::Symbolic(_) => None,
        }
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Concrete(value)
    }
}

impl From<ExprId> for Value {
    fn from(expr: ExprId) -> Self {
        Value::Symbolic(expr)
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Concrete(value) => f.debug_tuple("Concrete").field(&format!("{value:#x}")).finish(),
            Value::Symbolic(expr) => f.debug_tuple("Symbolic").field(expr).finish(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Concrete(value) => write!(f, "{value:#x}"),
            Value::Symbolic(expr) => write!(f, "sym:{expr}"),
        }
    }
}
