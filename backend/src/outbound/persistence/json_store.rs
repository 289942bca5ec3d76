//! Whole-collection JSON record store.
//!
//! Each collection is a single JSON array rewritten in full on every change.
//! Plain reads are lock-free and tolerant: a missing or unparseable file
//! reads as an empty collection and logs a warning. Records are decoded one
//! at a time, so a single record that does not fit the expected shape is
//! skipped on read and carried through writes unchanged, in place. Writers
//! go through a per-collection async mutex, so read-modify-write cycles never
//! interleave and concurrent appends are not lost. A writer refuses to
//! replace a file that is not a JSON array.

use std::io;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use super::atomic_io::write_atomic;
use super::{Collection, StoreError};

#[derive(Default)]
struct WriterLocks {
    users: Mutex<()>,
    incidents: Mutex<()>,
    alerts: Mutex<()>,
}

impl WriterLocks {
    async fn acquire(&self, collection: Collection) -> MutexGuard<'_, ()> {
        match collection {
            Collection::Users => self.users.lock().await,
            Collection::Incidents => self.incidents.lock().await,
            Collection::Alerts => self.alerts.lock().await,
        }
    }
}

/// JSON-file record store rooted at a data directory.
pub struct JsonStore {
    root: Utf8PathBuf,
    dir: Arc<Dir>,
    locks: WriterLocks,
}

impl JsonStore {
    /// Open the data directory, creating it when missing.
    ///
    /// # Errors
    /// Returns [`StoreError::Open`] when the directory cannot be created or
    /// opened.
    pub fn open(root: &Utf8Path) -> Result<Self, StoreError> {
        let open_error = |err: io::Error| StoreError::Open {
            path: root.to_path_buf(),
            message: err.to_string(),
        };
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(open_error)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority()).map_err(open_error)?;
        Ok(Self {
            root: root.to_path_buf(),
            dir: Arc::new(dir),
            locks: WriterLocks::default(),
        })
    }

    /// Directory holding the collection files.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Every record of `collection` in stored order.
    ///
    /// Missing files read as empty. Unreadable or malformed files also read
    /// as empty, with a warning. Individual records that do not decode as `T`
    /// are left out, each with a warning.
    pub async fn read<T>(&self, collection: Collection) -> Vec<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        match self.load(collection).await {
            Ok(values) => Decoded::split(collection, values).records,
            Err(err) => {
                warn!(collection = %collection, error = %err, "treating collection as empty");
                Vec::new()
            }
        }
    }

    /// Replace `collection` with `records`.
    ///
    /// # Errors
    /// Returns [`StoreError::Write`] when serialisation or the atomic write
    /// fails.
    pub async fn write<T>(&self, collection: Collection, records: &[T]) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let _guard = self.locks.acquire(collection).await;
        self.persist(collection, records).await
    }

    /// Read-modify-write `collection` under its writer lock.
    ///
    /// `change` sees the decodable records and may edit them in place. When
    /// it returns `Err` nothing is written. Records that did not decode are
    /// written back verbatim at their original positions. A missing file
    /// starts as an empty collection; an unreadable file, or one that is not
    /// a JSON array, aborts with an error and is left as it was.
    ///
    /// # Errors
    /// Returns the error produced by `change`, or a [`StoreError`] converted
    /// into `E` when loading or persisting fails.
    pub async fn modify<T, R, E, F>(&self, collection: Collection, change: F) -> Result<R, E>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        E: From<StoreError>,
        F: FnOnce(&mut Vec<T>) -> Result<R, E> + Send,
    {
        let _guard = self.locks.acquire(collection).await;
        let mut decoded = Decoded::split(collection, self.load(collection).await?);
        let outcome = change(&mut decoded.records)?;
        let values = decoded.reassemble(collection)?;
        self.persist(collection, values.as_slice()).await?;
        Ok(outcome)
    }

    /// Whether the collection file exists.
    ///
    /// # Errors
    /// Returns [`StoreError::Read`] when existence cannot be determined.
    pub async fn exists(&self, collection: Collection) -> Result<bool, StoreError> {
        let dir = Arc::clone(&self.dir);
        let file = collection.file_name();
        run_blocking(move || match dir.metadata(file) {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(StoreError::Read {
                file,
                message: err.to_string(),
            }),
        })
        .await
    }

    /// Write `records` only when the collection file does not exist yet.
    ///
    /// Returns `true` when the file was created.
    ///
    /// # Errors
    /// Returns a [`StoreError`] when the check or the write fails.
    pub async fn create_if_missing<T>(
        &self,
        collection: Collection,
        records: &[T],
    ) -> Result<bool, StoreError>
    where
        T: Serialize,
    {
        let _guard = self.locks.acquire(collection).await;
        if self.exists(collection).await? {
            return Ok(false);
        }
        self.persist(collection, records).await?;
        debug!(collection = %collection, "collection created");
        Ok(true)
    }

    async fn load(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        let dir = Arc::clone(&self.dir);
        let file = collection.file_name();
        run_blocking(move || {
            let contents = match dir.read_to_string(file) {
                Ok(contents) => contents,
                Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
                Err(err) => {
                    return Err(StoreError::Read {
                        file,
                        message: err.to_string(),
                    });
                }
            };
            serde_json::from_str(&contents).map_err(|err| StoreError::Corrupt {
                file,
                message: err.to_string(),
            })
        })
        .await
    }

    async fn persist<T>(&self, collection: Collection, records: &[T]) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let file = collection.file_name();
        let mut contents =
            serde_json::to_vec_pretty(records).map_err(|err| StoreError::Write {
                file,
                message: err.to_string(),
            })?;
        contents.push(b'\n');
        let dir = Arc::clone(&self.dir);
        run_blocking(move || {
            write_atomic(&dir, file, &contents).map_err(|err| StoreError::Write {
                file,
                message: err.to_string(),
            })
        })
        .await
    }
}

/// A collection split into records that decoded and raw ones that did not.
struct Decoded<T> {
    records: Vec<T>,
    undecodable: Vec<(usize, Value)>,
}

impl<T: DeserializeOwned> Decoded<T> {
    fn split(collection: Collection, values: Vec<Value>) -> Self {
        let mut records = Vec::with_capacity(values.len());
        let mut undecodable = Vec::new();
        for (index, value) in values.into_iter().enumerate() {
            match T::deserialize(&value) {
                Ok(record) => records.push(record),
                Err(err) => {
                    warn!(
                        collection = %collection,
                        index,
                        error = %err,
                        "skipping undecodable record"
                    );
                    undecodable.push((index, value));
                }
            }
        }
        Self {
            records,
            undecodable,
        }
    }
}

impl<T: Serialize> Decoded<T> {
    fn reassemble(self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        let mut values = self
            .records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| StoreError::Write {
                file: collection.file_name(),
                message: err.to_string(),
            })?;
        for (index, value) in self.undecodable {
            let at = index.min(values.len());
            values.insert(at, value);
        }
        Ok(values)
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, StoreError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|err| StoreError::Task {
            message: err.to_string(),
        })?
}

#[cfg(test)]
#[path = "json_store_tests.rs"]
mod tests;
