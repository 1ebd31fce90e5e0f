// Durable key-value slots backing the task store

use eyre::{Context, Result, eyre};
use fs2::FileExt;
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// File name of the SQLite database inside the data directory
pub const SQLITE_FILE: &str = "taskmaster.db";

/// How long SQLite waits on a lock held by another process
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Capability the store persists through
///
/// A slot is a single named string value. `load` returns `None` when nothing
/// has been saved under the key yet.
pub trait SlotStorage {
    fn load(&self, key: &str) -> Result<Option<String>>;

    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: SlotStorage + ?Sized> SlotStorage for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }
}

/// Slot keys double as file names, so keep them to a safe alphabet
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(eyre!("Storage key cannot be empty"));
    }
    if key.len() > 64 {
        return Err(eyre!("Storage key too long: {} (max 64 chars)", key));
    }
    if !key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        return Err(eyre!("Invalid storage key: {} (must be alphanumeric with _/-)", key));
    }
    Ok(())
}

// ============================================================================
// File backend
// ============================================================================

/// One `<key>.json` file per slot inside a directory
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).context("Failed to create storage directory")?;
        Ok(Self { dir })
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn lock_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.lock", key))
    }

    fn lock_file(&self, key: &str) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path(key))
            .context("Failed to open slot lock file")
    }

    /// Read-only handle on an existing lock file, or None if there is none
    ///
    /// Writers create the lock file before the slot file first appears, so a
    /// missing lock file means no writer is using this directory.
    fn reader_lock(&self, key: &str) -> Result<Option<File>> {
        match File::open(self.lock_path(key)) {
            Ok(file) => Ok(Some(file)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context("Failed to open slot lock file"),
        }
    }
}

impl SlotStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let lock = self.reader_lock(key)?;
        if let Some(lock) = &lock {
            lock.lock_shared().context("Failed to acquire shared lock")?;
        }

        let content = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        debug!(path = ?path, bytes = content.len(), "Loaded slot");
        Ok(Some(content))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        let path = self.slot_path(key);
        let temp_path = path.with_extension("json.tmp");

        let lock = self.lock_file(key)?;
        lock.lock_exclusive().context("Failed to acquire file lock")?;

        let written = File::create(&temp_path)
            .and_then(|mut file| {
                file.write_all(value.as_bytes())?;
                file.sync_all()
            })
            .context("Failed to write temp slot file")
            .and_then(|()| fs::rename(&temp_path, &path).context("Failed to replace slot file"));

        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        // Lock is released when `lock` is dropped
        debug!(path = ?path, bytes = value.len(), "Saved slot");
        Ok(())
    }
}

// ============================================================================
// SQLite backend
// ============================================================================

/// Slots stored as rows of a single SQLite table
pub struct SqliteStorage {
    db: Connection,
}

impl SqliteStorage {
    /// Open or create `taskmaster.db` inside `dir`
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).context("Failed to create storage directory")?;

        let db = Connection::open(dir.join(SQLITE_FILE)).context("Failed to open SQLite database")?;
        Self::with_connection(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let db = Connection::open_in_memory().context("Failed to open in-memory SQLite database")?;
        Self::with_connection(db)
    }

    fn with_connection(db: Connection) -> Result<Self> {
        db.busy_timeout(BUSY_TIMEOUT)?;
        let storage = Self { db };
        storage.create_schema()?;
        Ok(storage)
    }

    fn create_schema(&self) -> Result<()> {
        debug!("Creating slot schema");

        self.db.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS slots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;

        Ok(())
    }
}

impl SlotStorage for SqliteStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let value = self
            .db
            .query_row("SELECT value FROM slots WHERE key = ?1", [key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(value)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.db.execute(
            "INSERT OR REPLACE INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![key, value, now_ms()],
        )?;
        Ok(())
    }
}

// ============================================================================
// Memory backend
// ============================================================================

/// In-process slots, mainly for tests
///
/// `fail_writes` makes every `save` return an error, which is how a full or
/// unavailable disk looks to the store. `fail_reads` does the same for `load`,
/// like a database locked by another process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    pub fail_writes: bool,
    pub fail_reads: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a slot, as if a previous session had saved it
    pub fn with_slot(mut self, key: &str, value: &str) -> Self {
        self.slots.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }
}

impl SlotStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            return Err(eyre!("database is locked"));
        }
        Ok(self.slots.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(eyre!("Storage unavailable"));
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
