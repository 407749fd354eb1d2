//! In-memory stores for exercising header storage without a running chain.

use crate::{QueryContextError, Slot, SlotStore, SlotView, VersionedStore};
use alloy_primitives::Bytes;
use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        RwLock,
        atomic::{AtomicUsize, Ordering},
    },
};

/// A [`SlotStore`] backed by an in-memory map.
#[derive(Debug, Default)]
pub struct MockSlotStore {
    slots: RwLock<HashMap<Slot, Bytes>>,
}

impl SlotView for MockSlotStore {
    fn get(&self, slot: Slot) -> Option<Bytes> {
        self.slots.read().expect("slot map lock poisoned").get(&slot).cloned()
    }
}

impl SlotStore for MockSlotStore {
    fn set(&self, slot: Slot, bytes: Bytes) {
        self.slots.write().expect("slot map lock poisoned").insert(slot, bytes);
    }
}

/// An owned snapshot of the header slots at one height.
#[derive(Debug, Clone, Default)]
pub struct MockSnapshot {
    slots: HashMap<Slot, Bytes>,
}

impl SlotView for MockSnapshot {
    fn get(&self, slot: Slot) -> Option<Bytes> {
        self.slots.get(&slot).cloned()
    }
}

/// A [`VersionedStore`] serving snapshots from an in-memory map, with a
/// configurable pruning floor and a counter of opened views.
#[derive(Debug, Default)]
pub struct MockVersionedStore {
    snapshots: RwLock<BTreeMap<u64, HashMap<Slot, Bytes>>>,
    earliest: u64,
    views_opened: AtomicUsize,
}

impl MockVersionedStore {
    /// Creates a store whose snapshots below `earliest` have been pruned.
    pub fn with_pruned_below(earliest: u64) -> Self {
        Self { earliest, ..Default::default() }
    }

    /// Records `bytes` at `slot` in the snapshot for `height`, creating the
    /// snapshot if it does not exist yet. The committed height becomes
    /// visible through [`VersionedStore::current_height`].
    pub fn commit(&self, height: u64, slot: Slot, bytes: Bytes) {
        self.snapshots
            .write()
            .expect("snapshot map lock poisoned")
            .entry(height)
            .or_default()
            .insert(slot, bytes);
    }

    /// Returns how many views have been opened via [`VersionedStore::view_at`].
    pub fn views_opened(&self) -> usize {
        self.views_opened.load(Ordering::Relaxed)
    }
}

impl VersionedStore for MockVersionedStore {
    type View = MockSnapshot;

    fn view_at(&self, height: u64, _prove: bool) -> Result<Self::View, QueryContextError> {
        self.views_opened.fetch_add(1, Ordering::Relaxed);
        if height < self.earliest {
            return Err(QueryContextError::Pruned { height, earliest: self.earliest });
        }
        let snapshots = self.snapshots.read().expect("snapshot map lock poisoned");
        snapshots.get(&height).map(|slots| MockSnapshot { slots: slots.clone() }).ok_or_else(
            || QueryContextError::Unavailable(format!("no snapshot committed at height {height}")),
        )
    }

    fn current_height(&self) -> u64 {
        self.snapshots
            .read()
            .expect("snapshot map lock poisoned")
            .keys()
            .next_back()
            .copied()
            .unwrap_or(0)
    }
}
