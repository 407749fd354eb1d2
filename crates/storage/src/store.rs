//! The header store: per-height lookups over a two-slot schema.

use crate::{
    codec,
    error::StorageError,
    slot::Slot,
    traits::{HeaderStorage, SlotStore, SlotView, VersionedStore},
};
use alloy_consensus::Header;
use alloy_primitives::Bytes;
use tracing::{error, warn};

/// Stores one header per committed height and answers historical lookups.
///
/// The store writes to a constant-size key space (see [`Slot`]) and relies on
/// the injected [`VersionedStore`] to reconstruct per-height state: a lookup
/// for height `H` opens a snapshot view bound to `H` and reads
/// [`Slot::Current`] from it. The store keeps no cache and owns no locks;
/// every call re-derives its answer from the underlying stores, which makes
/// concurrent lookups and in-flight writes safe by construction.
#[derive(Debug)]
pub struct HeaderStore<S, V> {
    live: S,
    versioned: V,
}

impl<S, V> HeaderStore<S, V> {
    /// Creates a new [`HeaderStore`] over the live store and the versioned
    /// store adapter.
    pub const fn new(live: S, versioned: V) -> Self {
        Self { live, versioned }
    }
}

impl<S, V> HeaderStore<S, V>
where
    S: SlotStore,
    V: VersionedStore,
{
    /// Reads the raw header bytes for `number`, returning them along with the
    /// height they were read at (after clamping).
    ///
    /// Height 0 is served from [`Slot::Genesis`] in the live store; the
    /// genesis header is written once and never superseded, so no snapshot
    /// view is needed. All other heights are clamped to the current committed
    /// height and read from [`Slot::Current`] in a snapshot view bound to the
    /// clamped height.
    fn read_header_bytes(&self, number: u64) -> Result<(Option<Bytes>, u64), StorageError> {
        if number == 0 {
            return Ok((self.live.get(Slot::Genesis), 0));
        }

        // A caller racing block finalization may ask for a height that is
        // not committed yet. Substitute the newest committed height rather
        // than failing; the substitution is never by more than the gap to
        // the tip and never yields an older header.
        let number = number.min(self.versioned.current_height());

        let view = self.versioned.view_at(number, false).inspect_err(|err| {
            error!(target: "block_storage", height = number, ?err, "Failed to open query context");
        })?;
        Ok((view.get(Slot::Current), number))
    }
}

impl<S, V> HeaderStorage for HeaderStore<S, V>
where
    S: SlotStore,
    V: VersionedStore,
{
    fn store_header(&self, header: &Header) -> Result<(), StorageError> {
        let bytes = codec::encode_header(header).inspect_err(|err| {
            error!(target: "block_storage", number = header.number, ?err, "Failed to encode header");
        })?;
        self.live.set(Slot::for_height(header.number), bytes);
        Ok(())
    }

    fn header_by_number(&self, number: u64) -> Result<Header, StorageError> {
        let (bytes, number) = self.read_header_bytes(number)?;
        let bytes = bytes.ok_or_else(|| {
            warn!(target: "block_storage", height = number, "No header found");
            StorageError::HeaderNotFound { number }
        })?;

        let header = codec::decode_header(&bytes).inspect_err(|err| {
            error!(target: "block_storage", height = number, ?err, "Failed to decode stored header");
        })?;

        if header.number != number {
            error!(
                target: "block_storage",
                expected = number,
                found = header.number,
                "Header number mismatch"
            );
            return Err(StorageError::HeaderMismatch { expected: number, found: header.number });
        }

        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        QueryContextError,
        mock::{MockSlotStore, MockVersionedStore},
        slot::MAX_HEIGHT,
    };
    use alloy_primitives::B256;
    use std::sync::Arc;

    fn test_header(number: u64) -> Header {
        Header {
            parent_hash: B256::with_last_byte(number.wrapping_sub(1) as u8),
            number,
            gas_limit: 30_000_000,
            timestamp: 1_700_000_000 + number,
            ..Default::default()
        }
    }

    fn setup() -> (HeaderStore<Arc<MockSlotStore>, Arc<MockVersionedStore>>, Arc<MockVersionedStore>)
    {
        let versioned = Arc::new(MockVersionedStore::default());
        (HeaderStore::new(Arc::new(MockSlotStore::default()), versioned.clone()), versioned)
    }

    /// Stores a header and mirrors the committed state into the versioned
    /// store's snapshot for that height, as a commit would.
    fn commit_header(
        store: &HeaderStore<Arc<MockSlotStore>, Arc<MockVersionedStore>>,
        versioned: &MockVersionedStore,
        header: &Header,
    ) {
        store.store_header(header).expect("store header");
        versioned.commit(
            header.number,
            Slot::for_height(header.number),
            codec::encode_header(header).expect("encode header"),
        );
    }

    #[test]
    fn test_genesis_store_and_fetch() {
        let (store, versioned) = setup();
        let genesis = test_header(0);
        store.store_header(&genesis).expect("store genesis");

        let fetched = store.header_by_number(0).expect("fetch genesis");
        assert_eq!(fetched, genesis);
        // Genesis reads are satisfied from the live store alone.
        assert_eq!(versioned.views_opened(), 0);
    }

    #[test]
    fn test_genesis_missing() {
        let (store, versioned) = setup();
        let err = store.header_by_number(0).expect_err("fetch should fail");
        assert_eq!(err, StorageError::HeaderNotFound { number: 0 });
        assert_eq!(versioned.views_opened(), 0);
    }

    #[test]
    fn test_current_header_via_snapshot() {
        let (store, versioned) = setup();
        let header = test_header(5);
        commit_header(&store, &versioned, &header);

        assert_eq!(versioned.current_height(), 5);
        let fetched = store.header_by_number(5).expect("fetch header");
        assert_eq!(fetched, header);
        assert_eq!(versioned.views_opened(), 1);
    }

    #[test]
    fn test_historical_header() {
        let (store, versioned) = setup();
        for number in 1..=5 {
            commit_header(&store, &versioned, &test_header(number));
        }

        let fetched = store.header_by_number(3).expect("fetch historical header");
        assert_eq!(fetched, test_header(3));
    }

    #[test]
    fn test_future_height_clamps_to_current() {
        let (store, versioned) = setup();
        let header = test_header(5);
        commit_header(&store, &versioned, &header);

        let at_tip = store.header_by_number(5).expect("fetch at tip");
        let beyond_tip = store.header_by_number(9).expect("fetch beyond tip");
        assert_eq!(beyond_tip, at_tip);
        assert_eq!(beyond_tip.number, 5);
    }

    #[test]
    fn test_pruned_height() {
        let versioned = Arc::new(MockVersionedStore::with_pruned_below(4));
        let store = HeaderStore::new(Arc::new(MockSlotStore::default()), versioned.clone());
        commit_header(&store, &versioned, &test_header(5));

        let err = store.header_by_number(3).expect_err("fetch should fail");
        assert_eq!(
            err,
            StorageError::QueryContext(QueryContextError::Pruned { height: 3, earliest: 4 })
        );
    }

    #[test]
    fn test_missing_snapshot() {
        let (store, versioned) = setup();
        commit_header(&store, &versioned, &test_header(5));

        let err = store.header_by_number(2).expect_err("fetch should fail");
        assert!(matches!(
            err,
            StorageError::QueryContext(QueryContextError::Unavailable(_))
        ));
    }

    #[test]
    fn test_corrupt_stored_bytes() {
        let (store, versioned) = setup();
        commit_header(&store, &versioned, &test_header(5));
        versioned.commit(5, Slot::Current, vec![0xde, 0xad, 0xbe, 0xef].into());

        let err = store.header_by_number(5).expect_err("fetch should fail");
        assert!(matches!(err, StorageError::Decode(_)));
    }

    #[test]
    fn test_snapshot_number_mismatch() {
        let (store, versioned) = setup();
        // Seed the height-5 snapshot with a header claiming height 7.
        versioned.commit(
            5,
            Slot::Current,
            codec::encode_header(&test_header(7)).expect("encode header"),
        );

        let err = store.header_by_number(5).expect_err("fetch should fail");
        assert_eq!(err, StorageError::HeaderMismatch { expected: 5, found: 7 });
    }

    #[test]
    fn test_genesis_number_mismatch() {
        let (store, _) = setup();
        // Seed the genesis slot with a header claiming height 3.
        store
            .live
            .set(Slot::Genesis, codec::encode_header(&test_header(3)).expect("encode header"));

        let err = store.header_by_number(0).expect_err("fetch should fail");
        assert_eq!(err, StorageError::HeaderMismatch { expected: 0, found: 3 });
    }

    #[test]
    fn test_repeated_reads_are_identical() {
        let (store, versioned) = setup();
        commit_header(&store, &versioned, &test_header(5));

        let first = store.header_by_number(5).expect("first fetch");
        let second = store.header_by_number(5).expect("second fetch");
        assert_eq!(first, second);
    }

    #[test]
    fn test_store_rejects_unstorable_height() {
        let (store, _) = setup();
        let err = store.store_header(&test_header(MAX_HEIGHT + 1)).expect_err("store should fail");
        assert!(matches!(err, StorageError::Encode(_)));
        // Nothing was written.
        assert!(store.live.get(Slot::Current).is_none());
    }

    #[test]
    fn test_store_writes_slot_for_height() {
        let (store, _) = setup();
        store.store_header(&test_header(0)).expect("store genesis");
        store.store_header(&test_header(1)).expect("store header");

        assert!(store.live.get(Slot::Genesis).is_some());
        assert!(store.live.get(Slot::Current).is_some());
    }
}
