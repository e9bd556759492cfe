//! token-table: a fixed-capacity index of unique string tokens.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: index a stream of unique tokens into a table of `M` slots
//!   (67 by default) and answer membership queries against it.
//! - Layers:
//!   - `hashing`: `SlotHasher` picks a token's home slot. The default
//!     `FirstLastHasher` weights the first byte by the length and adds the
//!     last byte.
//!   - `probe`: the quadratic step `(i + i^2) mod M`, bounded to
//!     `ceil((M + 1) / 2)` steps.
//!   - `SlotStore`: entries in a `slotmap` arena; every slot owns a chain of
//!     arena keys whose head is the slot's direct occupant.
//!   - `TokenTable`: insert and lookup policy on top of the store.
//!   - `Report` and `loader`: the text dump and the line-per-token feeder.
//!
//! Insert
//! - Home slot empty: the token becomes its occupant.
//! - Home slot taken: walk the probe until an empty slot turns up and place
//!   the token there. Its home is not relabeled.
//! - Probe bound exhausted: prepend the token onto the home slot's chain.
//!   A full table degrades into longer chains rather than failing.
//!
//! Lookup
//! - Home slot taken: compare the occupant, then the chain.
//! - Home slot empty: replay the probe walk, comparing occupants.
//! - A token placed by probing sits in another slot while its home slot
//!   stays occupied, and nothing on the home slot points at it. The table
//!   records these redirects; `LookupMode::Redirected` (default) follows
//!   them, `LookupMode::Faithful` does not and leaves such tokens
//!   unreachable by key.
//!
//! Constraints
//! - Single-threaded; mutation needs `&mut self`.
//! - No deletion and no resizing. The slot count is fixed at construction
//!   and the probe bound is always derived from it.
//! - Duplicates are a caller concern: query with `contains` before
//!   `insert`. A second insert of the same token is stored, not rejected,
//!   and every entry stays reachable from exactly one slot.
//! - The empty token hashes to slot 0 and cannot be inserted.
//!
//! Errors
//! - Allocation failure while copying a token, growing a chain or
//!   recording a redirect is returned as `IndexError::Allocation`, and the
//!   table is left unchanged. Growth of the entry arena itself has no
//!   fallible path and aborts on exhaustion like any `Vec` push.
//! - Opening a missing input file yields `IndexError::Input`, which names
//!   the path.
//! - Probe overflow is not an error.

pub mod config;
pub mod error;
pub mod hashing;
pub mod loader;
pub mod logger;
pub mod probe;
pub mod report;
pub mod slot_store;
pub mod table;
mod table_proptest;

// Public surface
pub use config::{LookupMode, TableConfig, DEFAULT_SLOTS};
pub use error::{IndexError, Result};
pub use hashing::{hash_key, FirstLastHasher, SlotHasher};
pub use loader::{load_file, load_tokens, LoadSummary};
pub use probe::{probe_bound, step, Probe};
pub use report::{Report, SlotRow};
pub use slot_store::{Handle, SlotStore, SlotView};
pub use table::{Inserted, Location, Placement, TokenTable, Via};
