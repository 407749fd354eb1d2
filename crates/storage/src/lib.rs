//! Versioned block header storage for the Boreal EVM runtime.
//!
//! Persists one header per chain height and answers historical lookups over
//! a constant-size key space: there is one slot for the genesis header and
//! one for the current header, and nothing else. Per-height identity is
//! supplied by the backing versioned store, which can reconstruct its exact
//! state as of any committed height. A lookup for height `H` opens a
//! read-only snapshot view bound to `H` and reads the current-header slot
//! from it.
//!
//! The versioned store itself is an external capability, injected through
//! the [`VersionedStore`] trait; this crate only implements the indexing
//! logic and its invariants.

mod codec;
pub use codec::{decode_header, encode_header};

mod error;
pub use error::{QueryContextError, StorageError};

mod slot;
pub use slot::{MAX_HEIGHT, Slot};

mod store;
pub use store::HeaderStore;

mod traits;
pub use traits::{HeaderStorage, SlotStore, SlotView, VersionedStore};

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
