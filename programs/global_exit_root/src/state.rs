use std::collections::BTreeMap;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

/// The exit roots a mainnet global exit root was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitRoots {
    pub mainnet_exit_root: B256,
    pub rollup_exit_root: B256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalExitRootEntry {
    pub global_exit_root: B256,
    /// Unknown for roots injected into an L2 manager.
    pub exit_roots: Option<ExitRoots>,
    pub timestamp: u64,
}

/// Append-only list of global exit roots with a root -> timestamp index.
///
/// Removal only drops a root from the index; its history entry stays.
#[derive(Debug, Clone, Default)]
pub struct GlobalExitRootHistory {
    entries: Vec<GlobalExitRootEntry>,
    timestamps: BTreeMap<B256, u64>,
}

impl GlobalExitRootHistory {
    pub fn push(&mut self, entry: GlobalExitRootEntry) {
        self.timestamps
            .insert(entry.global_exit_root, entry.timestamp);
        self.entries.push(entry);
    }

    pub fn contains(&self, root: &B256) -> bool {
        self.timestamps.contains_key(root)
    }

    pub fn timestamp_of(&self, root: &B256) -> Option<u64> {
        self.timestamps.get(root).copied()
    }

    pub fn invalidate(&mut self, root: &B256) -> bool {
        self.timestamps.remove(root).is_some()
    }

    /// Latest entry whose root has not been invalidated.
    pub fn last(&self) -> Option<&GlobalExitRootEntry> {
        self.entries
            .iter()
            .rev()
            .find(|entry| self.contains(&entry.global_exit_root))
    }

    pub fn entries(&self) -> &[GlobalExitRootEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
