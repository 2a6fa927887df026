use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::error::RegistryError;
use crate::state::AchievementRecord;

/// Durable mapping from token id to record, with a secondary owner index.
/// Backing medium varies (memory, JSON file); callers only see this trait.
pub trait AchievementStore {
    /// Appends a record; refuses to overwrite an existing token id or
    /// transaction hash.
    fn append(&self, record: &AchievementRecord) -> Result<(), RegistryError>;

    fn get_by_token_id(&self, token_id: &str) -> Result<AchievementRecord, RegistryError>;

    /// All records whose owner matches `owner` case-insensitively, in
    /// insertion order. An empty result is success, not an error.
    fn get_by_owner(&self, owner: &str) -> Result<Vec<AchievementRecord>, RegistryError>;

    /// All records in insertion order.
    fn get_all(&self) -> Result<Vec<AchievementRecord>, RegistryError>;

    fn count(&self) -> Result<usize, RegistryError>;
}

fn assert_no_duplicate(
    records: &[AchievementRecord],
    record: &AchievementRecord,
) -> Result<(), RegistryError> {
    let collides = records
        .iter()
        .any(|r| r.token_id == record.token_id || r.transaction_hash == record.transaction_hash);
    if collides {
        return Err(RegistryError::Conflict {
            token_id: record.token_id.clone(),
        });
    }
    Ok(())
}

fn find_by_token_id(
    records: Vec<AchievementRecord>,
    token_id: &str,
) -> Result<AchievementRecord, RegistryError> {
    records
        .into_iter()
        .find(|r| r.token_id == token_id)
        .ok_or_else(|| RegistryError::NotFound {
            token_id: token_id.to_string(),
        })
}

fn filter_by_owner(records: Vec<AchievementRecord>, owner: &str) -> Vec<AchievementRecord> {
    records
        .into_iter()
        .filter(|r| r.owner.eq_ignore_ascii_case(owner))
        .collect()
}

// ─── In-memory store ────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<AchievementRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<AchievementRecord>>, RegistryError> {
        self.records
            .lock()
            .map_err(|_| RegistryError::StorageUnavailable {
                reason: "memory store lock poisoned".to_string(),
            })
    }
}

impl AchievementStore for MemoryStore {
    fn append(&self, record: &AchievementRecord) -> Result<(), RegistryError> {
        let mut records = self.lock()?;
        assert_no_duplicate(&records, record)?;
        records.push(record.clone());
        Ok(())
    }

    fn get_by_token_id(&self, token_id: &str) -> Result<AchievementRecord, RegistryError> {
        find_by_token_id(self.lock()?.clone(), token_id)
    }

    fn get_by_owner(&self, owner: &str) -> Result<Vec<AchievementRecord>, RegistryError> {
        Ok(filter_by_owner(self.lock()?.clone(), owner))
    }

    fn get_all(&self) -> Result<Vec<AchievementRecord>, RegistryError> {
        Ok(self.lock()?.clone())
    }

    fn count(&self) -> Result<usize, RegistryError> {
        Ok(self.lock()?.len())
    }
}

// ─── JSON-file store ────────────────────────────────────────────────────────

/// Whole-array persistence in one JSON file: read everything, modify in
/// memory, serialize everything back through a temp file and an atomic
/// rename. One in-process mutex serializes every read-modify-write cycle;
/// two OS processes racing on the same file are outside the guarantee.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// The write lock is per-instance: callers must share one store value
    /// per path, or two handles in the same process can interleave their
    /// read-modify-write cycles.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, RegistryError> {
        self.lock.lock().map_err(|_| RegistryError::StorageUnavailable {
            reason: "file store lock poisoned".to_string(),
        })
    }

    /// A missing file reads as an empty store; an unreadable or undecodable
    /// file is surfaced, never silently reset.
    fn load(&self) -> Result<Vec<AchievementRecord>, RegistryError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "store file missing, reading empty");
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            RegistryError::StorageUnavailable {
                reason: format!("read {}: {e}", self.path.display()),
            }
        })?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "store file is not a valid record array");
            RegistryError::StorageUnavailable {
                reason: format!("decode {}: {e}", self.path.display()),
            }
        })
    }

    fn store(&self, records: &[AchievementRecord]) -> Result<(), RegistryError> {
        let raw = serde_json::to_string_pretty(records).map_err(|e| {
            RegistryError::StorageUnavailable {
                reason: format!("encode records: {e}"),
            }
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).map_err(|e| RegistryError::StorageUnavailable {
            reason: format!("write {}: {e}", tmp.display()),
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| RegistryError::StorageUnavailable {
            reason: format!("rename {} -> {}: {e}", tmp.display(), self.path.display()),
        })
    }
}

impl AchievementStore for JsonFileStore {
    fn append(&self, record: &AchievementRecord) -> Result<(), RegistryError> {
        let _guard = self.guard()?;
        let mut records = self.load()?;
        assert_no_duplicate(&records, record)?;
        records.push(record.clone());
        self.store(&records)
    }

    fn get_by_token_id(&self, token_id: &str) -> Result<AchievementRecord, RegistryError> {
        let _guard = self.guard()?;
        find_by_token_id(self.load()?, token_id)
    }

    fn get_by_owner(&self, owner: &str) -> Result<Vec<AchievementRecord>, RegistryError> {
        let _guard = self.guard()?;
        Ok(filter_by_owner(self.load()?, owner))
    }

    fn get_all(&self) -> Result<Vec<AchievementRecord>, RegistryError> {
        let _guard = self.guard()?;
        self.load()
    }

    fn count(&self) -> Result<usize, RegistryError> {
        let _guard = self.guard()?;
        Ok(self.load()?.len())
    }
}
