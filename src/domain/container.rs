//! Per-run map of contract names to live handles.

use std::collections::BTreeMap;

use crate::domain::contract::ContractHandle;
use crate::error::{Error, Result};

/// Contracts known to the current run, keyed by registry name.
///
/// Built by rehydrating registry records and then merging fresh
/// deployments over them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractContainer {
    contracts: BTreeMap<String, ContractHandle>,
}

impl ContractContainer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a handle, replacing any handle with the same name.
    pub fn insert(&mut self, handle: ContractHandle) -> Option<ContractHandle> {
        self.contracts.insert(handle.name.clone(), handle)
    }

    /// Insert only when the name is not present yet.
    pub fn insert_missing(&mut self, handle: ContractHandle) -> bool {
        if self.contracts.contains_key(&handle.name) {
            return false;
        }
        self.contracts.insert(handle.name.clone(), handle);
        true
    }

    /// Merge `other` into `self`; entries from `other` win.
    pub fn merge(&mut self, other: ContractContainer) {
        self.contracts.extend(other.contracts);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ContractHandle> {
        self.contracts.get(name)
    }

    /// Look up a handle, failing with [`Error::RegistryNotFound`] when absent.
    pub fn require(&self, name: &str) -> Result<&ContractHandle> {
        self.get(name).ok_or_else(|| Error::RegistryNotFound {
            name: name.to_string(),
        })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.contracts.contains_key(name)
    }

    /// Subset restricted to the given names, in the order given.
    pub fn select<'a, I>(&self, names: I) -> Result<Vec<ContractHandle>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .map(|name| self.require(name).cloned())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContractHandle> {
        self.contracts.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

impl FromIterator<ContractHandle> for ContractContainer {
    fn from_iter<T: IntoIterator<Item = ContractHandle>>(iter: T) -> Self {
        let mut container = Self::new();
        for handle in iter {
            container.insert(handle);
        }
        container
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;

    fn handle(name: &str, byte: u8) -> ContractHandle {
        ContractHandle::new(name, Address::repeat_byte(byte))
    }

    #[test]
    fn merge_prefers_fresh_deployments() {
        let mut rehydrated: ContractContainer = [handle("Moments", 1), handle("Clutch", 2)]
            .into_iter()
            .collect();
        let fresh: ContractContainer = [handle("Moments", 9)].into_iter().collect();

        rehydrated.merge(fresh);

        assert_eq!(rehydrated.len(), 2);
        assert_eq!(
            rehydrated.get("Moments").unwrap().address,
            Address::repeat_byte(9)
        );
        assert_eq!(rehydrated.get("Clutch").unwrap().address, Address::repeat_byte(2));
    }

    #[test]
    fn insert_missing_keeps_existing_handle() {
        let mut container = ContractContainer::new();
        assert!(container.insert_missing(handle("Reels", 1)));
        assert!(!container.insert_missing(handle("Reels", 2)));
        assert_eq!(container.get("Reels").unwrap().address, Address::repeat_byte(1));
    }

    #[test]
    fn select_fails_on_unknown_name() {
        let container: ContractContainer = [handle("Moments", 1)].into_iter().collect();
        let err = container.select(["Moments", "Swishin"]).unwrap_err();
        assert!(matches!(err, Error::RegistryNotFound { name } if name == "Swishin"));
    }

    #[test]
    fn select_preserves_requested_order() {
        let container: ContractContainer = [handle("A", 1), handle("B", 2)].into_iter().collect();
        let selected = container.select(["B", "A"]).unwrap();
        assert_eq!(selected[0].name, "B");
        assert_eq!(selected[1].name, "A");
    }
}
