use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),

    #[error("storage encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// In-game currency. Arithmetic on `Unlimited` does nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Balance {
    Finite(i64),
    Unlimited,
}

impl Balance {
    pub fn add(self, amount: i64) -> Self {
        match self {
            Balance::Finite(v) => Balance::Finite(v.saturating_add(amount)),
            Balance::Unlimited => Balance::Unlimited,
        }
    }

    pub fn subtract(self, amount: i64) -> Self {
        match self {
            Balance::Finite(v) => Balance::Finite(v.saturating_sub(amount)),
            Balance::Unlimited => Balance::Unlimited,
        }
    }

    pub fn set(self, amount: i64) -> Self {
        match self {
            Balance::Finite(_) => Balance::Finite(amount),
            Balance::Unlimited => Balance::Unlimited,
        }
    }

    pub fn can_afford(self, price: i64) -> bool {
        match self {
            Balance::Finite(v) => v >= price,
            Balance::Unlimited => true,
        }
    }

    pub fn display(self) -> String {
        match self {
            Balance::Finite(v) => crate::aircraft::group_thousands(v),
            Balance::Unlimited => "Infinite".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub username: String,
    // Stored as entered; the save file is local to the player's machine.
    pub password: String,
    pub role: Role,
    pub balance: Balance,
    #[serde(default)]
    pub inventory: Vec<String>,
    #[serde(default)]
    pub banned: bool,
    #[serde(default)]
    pub banned_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub active_plane: Option<String>,
}

impl AccountRecord {
    pub fn new(username: &str, password: &str, role: Role, balance: Balance) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            role,
            balance,
            inventory: Vec::new(),
            banned: false,
            banned_until: None,
            warnings: Vec::new(),
            active_plane: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn owns(&self, plane_id: &str) -> bool {
        self.inventory.iter().any(|id| id == plane_id)
    }
}

/// Keyed account storage.
pub trait AccountRepository {
    fn get(&self, username: &str) -> Option<AccountRecord>;
    fn upsert(&mut self, record: AccountRecord) -> Result<(), StoreError>;
    fn usernames(&self) -> Vec<String>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    records: BTreeMap<String, AccountRecord>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl AccountRepository for MemoryStore {
    fn get(&self, username: &str) -> Option<AccountRecord> {
        self.records.get(username).cloned()
    }

    fn upsert(&mut self, record: AccountRecord) -> Result<(), StoreError> {
        self.records.insert(record.username.clone(), record);
        Ok(())
    }

    fn usernames(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.records.clear();
        Ok(())
    }
}

/// Whole-file JSON store: everything is read on open and everything is
/// rewritten on each upsert.
pub struct JsonFileStore {
    path: PathBuf,
    records: BTreeMap<String, AccountRecord>,
}

impl JsonFileStore {
    /// A missing file is an empty store. A corrupt one is logged and
    /// replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records = match Self::read_file(&path) {
            Ok(records) => records,
            Err(StoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "account store unreadable; starting empty");
                BTreeMap::new()
            }
        };
        debug!(path = %path.display(), accounts = records.len(), "account store loaded");
        Self { path, records }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(path: &Path) -> Result<BTreeMap<String, AccountRecord>, StoreError> {
        let data = fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    fn write_file(&self) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(&self.records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl AccountRepository for JsonFileStore {
    fn get(&self, username: &str) -> Option<AccountRecord> {
        self.records.get(username).cloned()
    }

    fn upsert(&mut self, record: AccountRecord) -> Result<(), StoreError> {
        self.records.insert(record.username.clone(), record);
        self.write_file()
    }

    fn usernames(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.records.clear();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
