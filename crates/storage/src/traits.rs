//! Boundary capabilities consumed and exposed by the header store.

use crate::{QueryContextError, Slot, StorageError};
use alloy_consensus::Header;
use alloy_primitives::Bytes;

/// Read-only access to the header slots as of one committed height.
///
/// A view is borrowed for the duration of a single lookup and must be stable:
/// once obtained for a height, concurrent writes at later versions can never
/// change what it returns.
#[auto_impl::auto_impl(&, Arc)]
pub trait SlotView {
    /// Returns the raw bytes stored at `slot`, or `None` if the slot holds
    /// no data at this view's height.
    fn get(&self, slot: Slot) -> Option<Bytes>;
}

/// The live key-value store scoped to the current execution context.
///
/// Writes land on the version currently being built and become visible to
/// historical views once that version commits. Implementations are expected
/// to be safe to share across concurrent readers; the underlying store is
/// the sole synchronization point.
#[auto_impl::auto_impl(&, Arc)]
pub trait SlotStore: SlotView {
    /// Stores `bytes` at `slot`, replacing any previous value. Single-key
    /// and atomic at the store layer.
    fn set(&self, slot: Slot, bytes: Bytes);
}

/// The versioned store adapter: produces read-only snapshot views bound to
/// previously committed heights.
///
/// This is the external capability that carries all height information; the
/// header store's own key space is height-independent (see [`Slot`]).
#[auto_impl::auto_impl(&, Arc)]
pub trait VersionedStore {
    /// The snapshot view type produced by [`Self::view_at`].
    type View: SlotView;

    /// Opens a read-only view of the store as it existed at `height`.
    ///
    /// `prove` requests proof data alongside reads; the header store always
    /// passes `false`.
    ///
    /// # Returns
    /// * `Ok(Self::View)` bound to `height`'s committed state.
    /// * `Err(QueryContextError)` if the height was pruned or the adapter
    ///   cannot serve the request. Cancellation surfaces here too; the
    ///   header store propagates it rather than retrying.
    fn view_at(&self, height: u64, prove: bool) -> Result<Self::View, QueryContextError>;

    /// Returns the height of the most recently committed block.
    fn current_height(&self) -> u64;
}

/// Header persistence exposed to the rest of the execution environment.
///
/// Implementations must be safe to call from concurrent readers while writes
/// for the next height are in flight.
#[auto_impl::auto_impl(&, Arc)]
pub trait HeaderStorage {
    /// Persists `header` under the slot for its number in the live store.
    ///
    /// # Returns
    /// * `Ok(())` once the write is applied.
    /// * `Err(StorageError)` if the header cannot be encoded; nothing is
    ///   written in that case.
    fn store_header(&self, header: &Header) -> Result<(), StorageError>;

    /// Returns the header at the given height.
    ///
    /// Heights beyond the current committed height are clamped down to it,
    /// so a caller racing block finalization receives the newest committed
    /// header rather than a spurious not-found. The substitution is always
    /// by the minimum amount and never yields an older header.
    ///
    /// # Returns
    /// * `Ok(Header)` whose `number` equals the (post-clamp) height.
    /// * `Err(StorageError)` if the header is missing, corrupt, fails the
    ///   number check, or no snapshot view could be opened.
    fn header_by_number(&self, number: u64) -> Result<Header, StorageError>;
}
