use std::sync::atomic::{AtomicU32, Ordering};

macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Get the inner u32 value.
            pub fn inner(self) -> u32 {
                self.0
            }

            /// Create an ID from a u32 value.
            pub fn new(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

define_id_type!(VariableId);
define_id_type!(ConstraintId);

// Starts high so ids handed out by `fresh` never collide with small
// literal ids built through `VariableId::new` in tests.
static NEXT_VARIABLE_ID: AtomicU32 = AtomicU32::new(1 << 16);

impl VariableId {
    /// Allocate a process-wide unique variable identity.
    ///
    /// Ids are strictly increasing in allocation order, which gives term keys
    /// a total order that is stable for the lifetime of the process.
    pub fn fresh() -> Self {
        Self(NEXT_VARIABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl std::fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c{}", self.0)
    }
}
