//! # Schedule Storage
//!
//! Durable key/value persistence for the extracted schedule and its
//! metadata. Two JSON entries in the platform data directory, exactly one
//! writer (this process), no locking.
//!
//! Loading fails soft: an entry that does not parse is purged and treated
//! as absent, never surfaced to the user. The data is re-derivable by
//! re-uploading the photo, so nothing here is transactional.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{info, warn};

use crate::domain::{PrayerDay, ScheduleMetadata};

const SCHEDULE_FILE: &str = "schedule.json";
const METADATA_FILE: &str = "metadata.json";

/// Persistence boundary injected into the schedule state, so tests can
/// substitute an in-memory fake.
pub trait ScheduleStore {
    /// Returns the persisted schedule, if a non-empty one is present.
    /// Metadata is carried along when it parses; a corrupt metadata entry
    /// is discarded without taking the schedule with it.
    fn load(&self) -> Option<(Vec<PrayerDay>, Option<ScheduleMetadata>)>;

    /// Best-effort write of both entries. Errors are logged, not surfaced.
    fn save(&self, days: &[PrayerDay], metadata: Option<&ScheduleMetadata>);

    /// Removes both entries.
    fn clear(&self);
}

/// File-backed store under the platform data directory.
pub struct FileScheduleStore {
    dir: PathBuf,
}

impl FileScheduleStore {
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "prayer-times")
            .context("Could not determine platform data directory")?;
        let dir = dirs.data_dir().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
        info!("Schedule store at {}", dir.display());
        Ok(Self { dir })
    }

    /// Store rooted at an explicit directory. Used by tests.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn schedule_path(&self) -> PathBuf {
        self.dir.join(SCHEDULE_FILE)
    }

    fn metadata_path(&self) -> PathBuf {
        self.dir.join(METADATA_FILE)
    }

    /// Reads and parses one entry; purges it on a parse failure.
    fn read_entry<T: serde::de::DeserializeOwned>(&self, path: &PathBuf) -> Option<T> {
        let text = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(
                    "Discarding corrupt entry {}: {}",
                    path.display(),
                    e
                );
                let _ = fs::remove_file(path);
                None
            }
        }
    }
}

impl ScheduleStore for FileScheduleStore {
    fn load(&self) -> Option<(Vec<PrayerDay>, Option<ScheduleMetadata>)> {
        let days: Vec<PrayerDay> = self.read_entry(&self.schedule_path())?;
        if days.is_empty() {
            return None;
        }
        let metadata: Option<ScheduleMetadata> = self.read_entry(&self.metadata_path());
        Some((days, metadata))
    }

    fn save(&self, days: &[PrayerDay], metadata: Option<&ScheduleMetadata>) {
        match serde_json::to_string_pretty(days) {
            Ok(json) => {
                if let Err(e) = fs::write(self.schedule_path(), json) {
                    warn!("Failed to persist schedule: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize schedule: {}", e),
        }
        if let Some(meta) = metadata {
            match serde_json::to_string_pretty(meta) {
                Ok(json) => {
                    if let Err(e) = fs::write(self.metadata_path(), json) {
                        warn!("Failed to persist schedule metadata: {}", e);
                    }
                }
                Err(e) => warn!("Failed to serialize schedule metadata: {}", e),
            }
        }
    }

    fn clear(&self) {
        let _ = fs::remove_file(self.schedule_path());
        let _ = fs::remove_file(self.metadata_path());
        info!("Cleared persisted schedule");
    }
}

/// In-memory fake for state tests.
#[cfg(test)]
pub struct MemoryScheduleStore {
    entries: std::cell::RefCell<Option<(Vec<PrayerDay>, Option<ScheduleMetadata>)>>,
}

#[cfg(test)]
impl MemoryScheduleStore {
    pub fn new() -> Self {
        Self {
            entries: std::cell::RefCell::new(None),
        }
    }

    pub fn with_data(days: Vec<PrayerDay>, metadata: Option<ScheduleMetadata>) -> Self {
        Self {
            entries: std::cell::RefCell::new(Some((days, metadata))),
        }
    }
}

#[cfg(test)]
impl ScheduleStore for std::rc::Rc<MemoryScheduleStore> {
    fn load(&self) -> Option<(Vec<PrayerDay>, Option<ScheduleMetadata>)> {
        self.entries.borrow().clone()
    }

    fn save(&self, days: &[PrayerDay], metadata: Option<&ScheduleMetadata>) {
        *self.entries.borrow_mut() = Some((days.to_vec(), metadata.cloned()));
    }

    fn clear(&self) {
        *self.entries.borrow_mut() = None;
    }
}
