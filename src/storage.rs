//! # State Storage Module
//!
//! A minimal versioned key/value contract for conversation and user state,
//! plus typed accessors over it. The bot only ever talks to the
//! [`StateStore`] trait, so any backend able to read and write JSON records
//! can hold the booking state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Which identity a state record belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateScope {
    Conversation,
    User,
}

impl StateScope {
    fn prefix(self) -> &'static str {
        match self {
            StateScope::Conversation => "conversations",
            StateScope::User => "users",
        }
    }
}

/// Address of a single state record, e.g. `users/42/UserProfile`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateKey(String);

impl StateKey {
    pub fn new(scope: StateScope, id: &str, property: &str) -> Self {
        StateKey(format!("{}/{}/{}", scope.prefix(), id, property))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored record. Versions start at 1; 0 means "never written".
#[derive(Clone, Debug, PartialEq)]
pub struct StoredRecord {
    pub version: u64,
    pub updated_at: DateTime<Utc>,
    pub data: serde_json::Value,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Version conflict on {key}: expected {expected}, found {actual}")]
    VersionConflict {
        key: String,
        expected: u64,
        actual: u64,
    },

    #[error("Serialization error on {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Durable key/value persistence used by the bot
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read a record, `None` when the key has never been written
    async fn read(&self, key: &StateKey) -> Result<Option<StoredRecord>, StoreError>;

    /// Write a record and return its new version.
    ///
    /// With `expected_version` set, the write only succeeds if the stored
    /// version still matches (0 for a missing record). `None` overwrites
    /// unconditionally.
    async fn write(
        &self,
        key: &StateKey,
        data: serde_json::Value,
        expected_version: Option<u64>,
    ) -> Result<u64, StoreError>;
}

/// Process-local store, state is lost on restart
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<StateKey, StoredRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn read(&self, key: &StateKey) -> Result<Option<StoredRecord>, StoreError> {
        Ok(self.records.lock().await.get(key).cloned())
    }

    async fn write(
        &self,
        key: &StateKey,
        data: serde_json::Value,
        expected_version: Option<u64>,
    ) -> Result<u64, StoreError> {
        let mut records = self.records.lock().await;
        let current = records.get(key).map_or(0, |record| record.version);

        if let Some(expected) = expected_version {
            if expected != current {
                return Err(StoreError::VersionConflict {
                    key: key.to_string(),
                    expected,
                    actual: current,
                });
            }
        }

        let version = current + 1;
        records.insert(
            key.clone(),
            StoredRecord {
                version,
                updated_at: Utc::now(),
                data,
            },
        );

        debug!(key = %key, version, "State record written");
        Ok(version)
    }
}

/// A value read from the store together with the version it was read at
#[derive(Clone, Debug, PartialEq)]
pub struct Versioned<T> {
    pub version: u64,
    pub value: T,
}

/// Typed view over one state property in one scope
pub struct StateAccessor<T> {
    store: Arc<dyn StateStore>,
    scope: StateScope,
    property: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> StateAccessor<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(store: Arc<dyn StateStore>, scope: StateScope, property: &'static str) -> Self {
        Self {
            store,
            scope,
            property,
            _marker: PhantomData,
        }
    }

    pub fn key(&self, id: &str) -> StateKey {
        StateKey::new(self.scope, id, self.property)
    }

    /// Read the value for `id`, or the default value at version 0
    pub async fn get(&self, id: &str) -> Result<Versioned<T>, StoreError> {
        let key = self.key(id);
        match self.store.read(&key).await? {
            Some(record) => {
                let value = serde_json::from_value(record.data)
                    .map_err(|source| StoreError::Serialization {
                        key: key.to_string(),
                        source,
                    })?;
                Ok(Versioned {
                    version: record.version,
                    value,
                })
            }
            None => Ok(Versioned {
                version: 0,
                value: T::default(),
            }),
        }
    }

    pub async fn set(
        &self,
        id: &str,
        value: &T,
        expected_version: Option<u64>,
    ) -> Result<u64, StoreError> {
        let key = self.key(id);
        let data = serde_json::to_value(value).map_err(|source| StoreError::Serialization {
            key: key.to_string(),
            source,
        })?;
        self.store.write(&key, data, expected_version).await
    }
}
