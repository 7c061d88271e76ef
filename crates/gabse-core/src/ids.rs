//! Identifier newtypes.
//!
//! Agents and actions are numbered by monotonically increasing counters
//! (the agent registry and the action queue respectively) and numbers are
//! never handed out twice within a run.  A stale id can therefore miss, but
//! it can never alias a newer agent or action.

use std::fmt;

macro_rules! sim_id {
    ($(#[$attr:meta])* $name:ident($inner:ty), $label:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub $inner);

        impl $name {
            /// Position in dense storage.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

sim_id! {
    /// Slot of an agent in the registry.  Removed agents keep their slot, so
    /// this counts every agent ever registered in a run.
    AgentId(u32), "agent"
}

sim_id! {
    /// Handle of one queued action, for cancellation and reporting.  A
    /// re-issued recurring action gets a fresh id.
    ActionId(u64), "action"
}
