use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    core::utils::{ensure_dir, write_atomic, PathResolver},
    domain::{LimitsMap, Transaction, UserProfile},
    errors::TrackerError,
};

use super::RecordStore;
use crate::errors::Result;

const TRANSACTIONS_FILE: &str = "transactions.json";
const LIMITS_FILE: &str = "limits.json";

/// File-backed record store.
///
/// Layout under the root directory:
/// `users.json` (registry), and `users/<encoded-name>/{transactions,limits}.json`.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    users_dir: PathBuf,
    registry_file: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = PathResolver::resolve_base(root);
        ensure_dir(&root)?;
        let users_dir = PathResolver::users_dir_in(&root);
        ensure_dir(&users_dir)?;
        let registry_file = PathResolver::registry_file_in(&root);
        Ok(Self {
            users_dir,
            registry_file,
        })
    }

    pub fn user_dir(&self, username: &str) -> PathBuf {
        self.users_dir.join(encode_name(username))
    }

    pub fn transactions_path(&self, username: &str) -> PathBuf {
        self.user_dir(username).join(TRANSACTIONS_FILE)
    }

    pub fn limits_path(&self, username: &str) -> PathBuf {
        self.user_dir(username).join(LIMITS_FILE)
    }

    fn read_registry(&self) -> Result<BTreeMap<String, UserProfile>> {
        read_or_default(&self.registry_file)
    }

    /// Usernames recovered from per-user directories holding a transaction file.
    fn scan_user_dirs(&self) -> Result<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        if !self.users_dir.exists() {
            return Ok(names);
        }
        for entry in fs::read_dir(&self.users_dir)? {
            let path = entry?.path();
            if !path.join(TRANSACTIONS_FILE).is_file() {
                continue;
            }
            if let Some(name) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(decode_name)
            {
                names.insert(name);
            }
        }
        Ok(names)
    }
}

impl RecordStore for JsonStorage {
    fn load_transactions(&self, username: &str) -> Result<Vec<Transaction>> {
        check_username(username)?;
        let path = self.transactions_path(username);
        debug!(user = username, path = %path.display(), "loading transactions");
        read_or_default(&path)
    }

    fn save_transactions(&self, username: &str, transactions: &[Transaction]) -> Result<()> {
        check_username(username)?;
        let path = self.transactions_path(username);
        debug!(user = username, count = transactions.len(), "saving transactions");
        write_json(&path, &transactions)
    }

    fn load_limits(&self, username: &str) -> Result<LimitsMap> {
        check_username(username)?;
        read_or_default(&self.limits_path(username))
    }

    fn save_limits(&self, username: &str, limits: &LimitsMap) -> Result<()> {
        check_username(username)?;
        debug!(user = username, count = limits.len(), "saving limits");
        write_json(&self.limits_path(username), limits)
    }

    fn list_known_usernames(&self) -> Result<BTreeSet<String>> {
        let mut names: BTreeSet<String> = self.read_registry()?.into_keys().collect();
        names.extend(self.scan_user_dirs()?);
        Ok(names)
    }

    fn register_user(&self, username: &str) -> Result<()> {
        check_username(username)?;
        let mut registry = self.read_registry()?;
        if registry.contains_key(username) {
            return Ok(());
        }
        registry.insert(
            username.to_string(),
            UserProfile {
                created_at: Utc::now(),
            },
        );
        debug!(user = username, "registering user");
        write_json(&self.registry_file, &registry)
    }
}

fn check_username(username: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(TrackerError::Validation("username must not be empty".into()));
    }
    Ok(())
}

fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_atomic(path, &json)
}

/// Reversible, lowercase-only directory name for a username.
///
/// `[a-z0-9-]` pass through; every other byte becomes `_XX` (hex), so names
/// differing only in case never collide on case-insensitive file systems.
pub fn encode_name(username: &str) -> String {
    let mut encoded = String::with_capacity(username.len());
    for byte in username.bytes() {
        match byte {
            b'a'..=b'z' | b'0'..=b'9' | b'-' => encoded.push(byte as char),
            other => encoded.push_str(&format!("_{other:02X}")),
        }
    }
    encoded
}

/// Inverse of [`encode_name`]; `None` for names it could not have produced.
pub fn decode_name(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx] == b'_' {
            let hex = encoded.get(idx + 1..idx + 3)?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            idx += 3;
        } else {
            decoded.push(bytes[idx]);
            idx += 1;
        }
    }
    String::from_utf8(decoded).ok().filter(|name| !name.is_empty())
}
