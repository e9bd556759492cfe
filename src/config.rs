//! Table configuration.

use crate::error::{IndexError, Result};
use crate::probe::probe_bound;

/// Slot count used when nothing else is configured.
pub const DEFAULT_SLOTS: usize = 67;

/// How a lookup treats a home slot that is already occupied.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum LookupMode {
    /// Occupant, chain, then the slots that inserts homed here were
    /// relocated to.
    #[default]
    Redirected,
    /// Occupant and chain only. Tokens that were placed by probing are not
    /// found through an occupied home slot.
    Faithful,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TableConfig {
    pub slots: usize,
    pub lookup: LookupMode,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            slots: DEFAULT_SLOTS,
            lookup: LookupMode::default(),
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slots(mut self, slots: usize) -> Self {
        self.slots = slots;
        self
    }

    pub fn with_lookup(mut self, lookup: LookupMode) -> Self {
        self.lookup = lookup;
        self
    }

    /// Probe bound derived from the slot count; never configured separately.
    pub fn probe_bound(&self) -> usize {
        probe_bound(self.slots)
    }

    pub fn validate(&self) -> Result<()> {
        if self.slots == 0 {
            return Err(IndexError::InvalidCapacity { slots: self.slots });
        }
        Ok(())
    }
}
