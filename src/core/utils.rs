use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::TrackerError;

const DEFAULT_DIR_NAME: &str = ".trackr";
const USERS_DIR: &str = "users";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const REGISTRY_FILE: &str = "users.json";
pub const HOME_ENV: &str = "TRACKR_HOME";

/// Resolves the on-disk layout rooted at the application data directory.
pub struct PathResolver;

impl PathResolver {
    /// Returns the application data directory, defaulting to `~/.trackr`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(custom: Option<PathBuf>) -> PathBuf {
        custom.unwrap_or_else(Self::base_dir)
    }

    /// Directory holding one sub-directory per user.
    pub fn users_dir_in(base: &Path) -> PathBuf {
        base.join(USERS_DIR)
    }

    pub fn registry_file_in(base: &Path) -> PathBuf {
        base.join(REGISTRY_FILE)
    }

    pub fn config_dir_in(base: &Path) -> PathBuf {
        base.join(CONFIG_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        Self::config_dir_in(base).join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> Result<(), TrackerError> {
    fs::create_dir_all(path).map_err(|err| {
        TrackerError::Store(format!("cannot create `{}`: {err}", path.display()))
    })
}

/// Sibling path used to stage a write before renaming it into place.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.tmp"),
        None => "tmp".to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` to a temporary sibling and renames it over `path`.
pub fn write_atomic(path: &Path, data: &str) -> Result<(), TrackerError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("/data/limits.json")),
            PathBuf::from("/data/limits.json.tmp")
        );
        assert_eq!(tmp_path(Path::new("/data/state")), PathBuf::from("/data/state.tmp"));
    }

    #[test]
    fn write_atomic_creates_parents_and_leaves_no_tmp() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested").join("file.json");
        write_atomic(&target, "[]").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "[]");
        assert!(!tmp_path(&target).exists());
    }
}
