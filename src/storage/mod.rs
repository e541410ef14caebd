pub mod json_backend;
pub mod memory_backend;

use std::collections::BTreeSet;

use crate::domain::{LimitsMap, Transaction};
use crate::errors::Result;

/// Persistence contract consumed by the session and the leaderboard.
///
/// Loads of a user with no stored data return empty values rather than errors;
/// saves replace the stored value wholesale.
pub trait RecordStore: Send + Sync {
    fn load_transactions(&self, username: &str) -> Result<Vec<Transaction>>;
    fn save_transactions(&self, username: &str, transactions: &[Transaction]) -> Result<()>;
    fn load_limits(&self, username: &str) -> Result<LimitsMap>;
    fn save_limits(&self, username: &str, limits: &LimitsMap) -> Result<()>;

    /// Every username the store holds records or a registration for.
    fn list_known_usernames(&self) -> Result<BTreeSet<String>>;

    /// Records that `username` exists. Idempotent.
    fn register_user(&self, username: &str) -> Result<()>;
}

pub use json_backend::JsonStorage;
pub use memory_backend::MemoryStorage;
