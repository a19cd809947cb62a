use crate::utils::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Every blessing revealed so far, keyed by its text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Collection {
    blessings: BTreeSet<String>,
}

impl Collection {
    /// Returns `true` when the blessing was not collected before.
    pub(crate) fn collect(&mut self, blessing: &str) -> bool {
        if self.blessings.contains(blessing) {
            return false;
        }
        self.blessings.insert(blessing.to_owned())
    }

    #[cfg(test)]
    fn contains(&self, blessing: &str) -> bool {
        self.blessings.contains(blessing)
    }

    pub(crate) fn len(&self) -> usize {
        self.blessings.len()
    }
}

impl StorageKey for Collection {
    const KEY: &'static str = "lottery_collection";
}
