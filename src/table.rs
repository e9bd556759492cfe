//! TokenTable: insertion and lookup policy over a `SlotStore`.
//!
//! Insert tries the home slot, then walks the bounded quadratic probe, then
//! falls back to prepending onto the home slot's chain. Lookup checks the
//! home slot's occupant and chain; when the home slot is empty it replays the
//! probe walk. A token relocated by probing leaves its home slot occupied by
//! someone else, so lookups in `LookupMode::Redirected` also consult the
//! redirects recorded at insert time.

use crate::config::{LookupMode, TableConfig};
use crate::error::{IndexError, Result};
use crate::hashing::{FirstLastHasher, SlotHasher};
use crate::probe::Probe;
use crate::slot_store::{Entry, Handle, SlotStore, SlotView};
use hashbrown::HashMap;
use log::{debug, trace};

/// Where an insert put its token.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Placement {
    /// Home slot was empty.
    Primary,
    /// Home slot was occupied; an empty slot turned up on the probe walk.
    Relocated { home: usize },
    /// Probe bound exhausted; prepended to the home slot's chain.
    Chained,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Inserted {
    pub handle: Handle,
    /// Slot whose chain now holds the token.
    pub slot: usize,
    pub placement: Placement,
    /// Probe steps taken, never more than the probe bound.
    pub probes: usize,
}

/// How a lookup reached the token.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Via {
    Occupant,
    Chain,
    Redirect,
    Probe,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Location {
    pub handle: Handle,
    pub slot: usize,
    /// Position in the slot's chain, 0 being the occupant.
    pub position: usize,
    pub via: Via,
}

pub struct TokenTable<H = FirstLastHasher> {
    config: TableConfig,
    hasher: H,
    store: SlotStore,
    // home slot -> slots that inserts homed there were relocated to
    redirects: HashMap<usize, Vec<usize>>,
}

impl TokenTable {
    /// Empty table with `DEFAULT_SLOTS` slots and the default hash policy.
    pub fn new() -> Self {
        Self::build(TableConfig::default(), FirstLastHasher)
    }

    pub fn with_config(config: TableConfig) -> Result<Self> {
        Self::with_config_and_hasher(config, FirstLastHasher)
    }
}

impl Default for TokenTable {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: SlotHasher> TokenTable<H> {
    pub fn with_hasher(hasher: H) -> Self {
        Self::build(TableConfig::default(), hasher)
    }

    pub fn with_config_and_hasher(config: TableConfig, hasher: H) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, hasher))
    }

    fn build(config: TableConfig, hasher: H) -> Self {
        Self {
            store: SlotStore::with_slots(config.slots),
            config,
            hasher,
            redirects: HashMap::new(),
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    pub fn probe_bound(&self) -> usize {
        self.config.probe_bound()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn store(&self) -> &SlotStore {
        &self.store
    }

    /// Home slot of `key` in this table.
    pub fn home_slot(&self, key: &str) -> usize {
        let slots = self.capacity();
        self.hasher.slot_of(key, slots) % slots
    }

    pub fn token(&self, handle: Handle) -> Option<&str> {
        handle.token(&self.store)
    }

    /// Index `key`.
    ///
    /// Duplicates are not rejected here: callers query with `contains`
    /// first. Inserting a token twice stores two entries and keeps every
    /// entry reachable.
    pub fn insert(&mut self, key: &str) -> Result<Inserted> {
        if key.is_empty() {
            return Err(IndexError::EmptyKey);
        }
        let home = self.home_slot(key);
        let entry = Entry::new(key, home)?;

        if !self.store.is_occupied(home) {
            let handle = self.store.place(home, entry)?;
            trace!("{key:?} placed in home slot {home}");
            return Ok(Inserted {
                handle,
                slot: home,
                placement: Placement::Primary,
                probes: 0,
            });
        }

        let slots = self.capacity();
        let mut probes = 0;
        for candidate in Probe::new(home, slots) {
            probes += 1;
            trace!("{key:?} probe {probes}: slot {candidate}");
            if self.store.is_occupied(candidate) {
                continue;
            }
            let fresh = self.reserve_redirect(home)?;
            let handle = self.store.place(candidate, entry)?;
            self.redirects.entry(home).or_insert(fresh).push(candidate);
            debug!("{key:?} relocated from slot {home} to {candidate} after {probes} probes");
            return Ok(Inserted {
                handle,
                slot: candidate,
                placement: Placement::Relocated { home },
                probes,
            });
        }

        let handle = self.store.prepend(home, entry)?;
        debug!("{key:?} chained at slot {home}: probe bound of {probes} exhausted");
        Ok(Inserted {
            handle,
            slot: home,
            placement: Placement::Chained,
            probes,
        })
    }

    /// Make room to record one more redirect from `home` without allocating
    /// afterwards. Returns the list to install when `home` has none yet.
    fn reserve_redirect(&mut self, home: usize) -> Result<Vec<usize>> {
        let slot_bytes = core::mem::size_of::<usize>();
        if let Some(slots) = self.redirects.get_mut(&home) {
            slots
                .try_reserve(1)
                .map_err(IndexError::allocation(slot_bytes))?;
            return Ok(Vec::new());
        }
        self.redirects
            .try_reserve(1)
            .map_err(|_| IndexError::Allocation {
                requested: core::mem::size_of::<(usize, Vec<usize>)>(),
            })?;
        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(1)
            .map_err(IndexError::allocation(slot_bytes))?;
        Ok(fresh)
    }

    /// Where `key` is stored, if this table's lookup path reaches it.
    pub fn locate(&self, key: &str) -> Option<Location> {
        let home = self.home_slot(key);

        if self.store.is_occupied(home) {
            if let Some(found) = self.scan_chain(home, key, Via::Occupant) {
                return Some(found);
            }
            return match self.config.lookup {
                LookupMode::Faithful => None,
                LookupMode::Redirected => self
                    .redirects
                    .get(&home)
                    .into_iter()
                    .flatten()
                    .find_map(|&slot| self.scan_chain(slot, key, Via::Redirect)),
            };
        }

        Probe::new(home, self.capacity()).find_map(|slot| {
            if self.store.occupant(slot) != Some(key) {
                return None;
            }
            let handle = self.store.occupant_handle(slot)?;
            Some(Location {
                handle,
                slot,
                position: 0,
                via: Via::Probe,
            })
        })
    }

    // Occupant first, then the rest of the chain.
    fn scan_chain(&self, slot: usize, key: &str, head: Via) -> Option<Location> {
        let (position, handle) = self.store.position_in_chain(slot, key)?;
        let via = match (head, position) {
            (Via::Occupant, 0) => Via::Occupant,
            (Via::Occupant, _) => Via::Chain,
            (other, _) => other,
        };
        Some(Location {
            handle,
            slot,
            position,
            via,
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.locate(key).is_some()
    }

    /// Occurrences of `key`: 0 or 1 while callers avoid duplicate inserts.
    pub fn count(&self, key: &str) -> usize {
        usize::from(self.contains(key))
    }

    pub fn find(&self, key: &str) -> Option<Handle> {
        self.locate(key).map(|l| l.handle)
    }

    /// Non-empty slots in index order.
    pub fn slots(&self) -> impl Iterator<Item = SlotView<'_>> {
        self.store.occupied()
    }

    /// Slots that inserts homed at `home` were relocated to, oldest first.
    pub fn redirects(&self, home: usize) -> &[usize] {
        self.redirects.get(&home).map(Vec::as_slice).unwrap_or(&[])
    }
}
