//! Nullable store: thread-safe in-memory storage for testing.

use icefarm_store::{FarmStore, StoreError};
use icefarm_types::AccountId;
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory farm store for testing.
pub struct NullFarmStore {
    records: Mutex<HashMap<AccountId, Vec<u8>>>,
    meta: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl NullFarmStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            meta: Mutex::new(HashMap::new()),
        }
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl Default for NullFarmStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FarmStore for NullFarmStore {
    fn get_record(&self, account: &AccountId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.records.lock().unwrap().get(account).cloned())
    }

    fn put_record(&self, account: &AccountId, record: &[u8]) -> Result<(), StoreError> {
        self.records
            .lock()
            .unwrap()
            .insert(account.clone(), record.to_vec());
        Ok(())
    }

    fn delete_record(&self, account: &AccountId) -> Result<(), StoreError> {
        self.records
            .lock()
            .unwrap()
            .remove(account)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(account.to_string()))
    }

    fn iter_records(&self) -> Result<Vec<(AccountId, Vec<u8>)>, StoreError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().unwrap().get(key).cloned())
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.meta.lock().unwrap().insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_record() {
        let store = NullFarmStore::new();
        let alice = AccountId::new("alice");
        store.put_record(&alice, b"record").unwrap();
        assert_eq!(store.get_record(&alice).unwrap(), Some(b"record".to_vec()));
        assert_eq!(store.record_count(), 1);
    }

    #[test]
    fn test_missing_record_is_none() {
        let store = NullFarmStore::new();
        assert_eq!(store.get_record(&AccountId::new("nobody")).unwrap(), None);
    }

    #[test]
    fn test_delete_record() {
        let store = NullFarmStore::new();
        let alice = AccountId::new("alice");
        store.put_record(&alice, b"x").unwrap();
        store.delete_record(&alice).unwrap();
        assert!(store.get_record(&alice).unwrap().is_none());
        assert!(store.delete_record(&alice).is_err());
    }

    #[test]
    fn test_meta_roundtrip() {
        let store = NullFarmStore::new();
        store.put_meta(b"k", b"v").unwrap();
        assert_eq!(store.get_meta(b"k").unwrap(), Some(b"v".to_vec()));
    }
}
