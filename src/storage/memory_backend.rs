use std::{
    collections::{BTreeSet, HashMap},
    sync::{Mutex, MutexGuard},
};

use crate::{
    domain::{LimitsMap, Transaction},
    errors::{Result, TrackerError},
};

use super::RecordStore;

#[derive(Debug, Default)]
struct Records {
    transactions: HashMap<String, Vec<Transaction>>,
    limits: HashMap<String, LimitsMap>,
    registered: BTreeSet<String>,
    unavailable: BTreeSet<String>,
}

/// Process-local record store used by tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<Records>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every load for `username` fail with a store error.
    pub fn mark_unavailable(&self, username: &str) -> Result<()> {
        self.lock()?.unavailable.insert(username.to_string());
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Records>> {
        self.records
            .lock()
            .map_err(|_| TrackerError::Store("memory store lock poisoned".into()))
    }

    fn check_available(records: &Records, username: &str) -> Result<()> {
        if records.unavailable.contains(username) {
            return Err(TrackerError::Store(format!(
                "records for `{username}` are unavailable"
            )));
        }
        Ok(())
    }
}

impl RecordStore for MemoryStorage {
    fn load_transactions(&self, username: &str) -> Result<Vec<Transaction>> {
        let records = self.lock()?;
        Self::check_available(&records, username)?;
        Ok(records
            .transactions
            .get(username)
            .cloned()
            .unwrap_or_default())
    }

    fn save_transactions(&self, username: &str, transactions: &[Transaction]) -> Result<()> {
        self.lock()?
            .transactions
            .insert(username.to_string(), transactions.to_vec());
        Ok(())
    }

    fn load_limits(&self, username: &str) -> Result<LimitsMap> {
        let records = self.lock()?;
        Self::check_available(&records, username)?;
        Ok(records.limits.get(username).cloned().unwrap_or_default())
    }

    fn save_limits(&self, username: &str, limits: &LimitsMap) -> Result<()> {
        self.lock()?
            .limits
            .insert(username.to_string(), limits.clone());
        Ok(())
    }

    fn list_known_usernames(&self) -> Result<BTreeSet<String>> {
        let records = self.lock()?;
        let mut names = records.registered.clone();
        names.extend(records.transactions.keys().cloned());
        names.extend(records.unavailable.iter().cloned());
        Ok(names)
    }

    fn register_user(&self, username: &str) -> Result<()> {
        self.lock()?.registered.insert(username.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_user_has_no_records() {
        let store = MemoryStorage::new();
        assert!(store.load_transactions("ghost").unwrap().is_empty());
        assert!(store.load_limits("ghost").unwrap().is_empty());
        assert!(store.list_known_usernames().unwrap().is_empty());
    }

    #[test]
    fn registration_is_idempotent() {
        let store = MemoryStorage::new();
        store.register_user("dana").unwrap();
        store.register_user("dana").unwrap();
        store.save_transactions("eli", &[]).unwrap();
        let names: Vec<_> = store.list_known_usernames().unwrap().into_iter().collect();
        assert_eq!(names, vec!["dana".to_string(), "eli".to_string()]);
    }

    #[test]
    fn unavailable_user_fails_with_store_error() {
        let store = MemoryStorage::new();
        store.mark_unavailable("flaky").unwrap();
        let err = store.load_transactions("flaky").expect_err("marked unavailable");
        assert!(err.is_store_failure());
        assert!(store.list_known_usernames().unwrap().contains("flaky"));
    }
}
