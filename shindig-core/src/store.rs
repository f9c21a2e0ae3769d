//! JSON file storage for the event record and the RSVP list.
//!
//! State is two whole files under the data directory; every operation is a
//! full read or a full rewrite. Mutations take an exclusive advisory lock
//! on `.lock` so concurrent read-modify-write cycles cannot lose updates,
//! and all writes land via a temp file and an atomic rename.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{ShindigError, ShindigResult};
use crate::event::Event;
use crate::rsvp::Rsvp;

const EVENT_FILE: &str = "event.json";
const RSVP_FILE: &str = "rsvps.json";
const LOCK_FILE: &str = ".lock";

/// Handle to the data directory. Holds no cached state; callers re-read
/// the files on every request.
#[derive(Clone)]
pub struct Store {
    data_dir: PathBuf,
}

/// Releases the advisory lock when dropped.
struct StoreLock {
    _file: File,
}

impl Store {
    pub fn open(data_dir: impl Into<PathBuf>) -> ShindigResult<Self> {
        let store = Store {
            data_dir: data_dir.into(),
        };
        fs::create_dir_all(&store.data_dir)?;
        Ok(store)
    }

    fn event_path(&self) -> PathBuf {
        self.data_dir.join(EVENT_FILE)
    }

    fn rsvp_path(&self) -> PathBuf {
        self.data_dir.join(RSVP_FILE)
    }

    /// Block until this process holds the data-directory lock.
    fn lock(&self) -> ShindigResult<StoreLock> {
        let file = File::create(self.data_dir.join(LOCK_FILE))?;
        file.lock_exclusive()?;
        Ok(StoreLock { _file: file })
    }

    fn write_atomic(&self, path: &Path, content: &str) -> ShindigResult<()> {
        let temp = path.with_extension("tmp");
        fs::write(&temp, content)?;
        fs::rename(&temp, path)?;
        Ok(())
    }

    // =========================================================================
    // Event record
    // =========================================================================

    /// Read the event record, or `None` if no event file exists yet.
    pub fn load_event(&self) -> ShindigResult<Option<Event>> {
        let path = self.event_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let event = serde_json::from_str(&content)
            .map_err(|e| ShindigError::Serialization(e.to_string()))?;

        Ok(Some(event))
    }

    /// Overwrite the event record wholesale.
    pub fn save_event(&self, event: &Event) -> ShindigResult<()> {
        let _lock = self.lock()?;
        self.write_event(event)
    }

    /// Write a default event if none exists. Returns true if one was written.
    pub fn seed_default_event(&self) -> ShindigResult<bool> {
        let _lock = self.lock()?;
        if self.event_path().exists() {
            return Ok(false);
        }
        self.write_event(&Event::default())?;
        Ok(true)
    }

    fn write_event(&self, event: &Event) -> ShindigResult<()> {
        let content = serde_json::to_string_pretty(event)
            .map_err(|e| ShindigError::Serialization(e.to_string()))?;
        self.write_atomic(&self.event_path(), &content)
    }

    // =========================================================================
    // RSVP list
    // =========================================================================

    /// Read all RSVPs in insertion order. An absent file reads as empty.
    pub fn load_rsvps(&self) -> ShindigResult<Vec<Rsvp>> {
        let path = self.rsvp_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let rsvps = serde_json::from_str(&content)
            .map_err(|e| ShindigError::Serialization(e.to_string()))?;

        Ok(rsvps)
    }

    /// Overwrite the RSVP list wholesale.
    pub fn save_rsvps(&self, rsvps: &[Rsvp]) -> ShindigResult<()> {
        let _lock = self.lock()?;
        self.write_rsvps(rsvps)
    }

    pub fn append_rsvp(&self, rsvp: Rsvp) -> ShindigResult<()> {
        let _lock = self.lock()?;
        let mut rsvps = self.load_rsvps()?;
        rsvps.push(rsvp);
        self.write_rsvps(&rsvps)
    }

    pub fn update_rsvp(&self, index: usize, rsvp: Rsvp) -> ShindigResult<()> {
        let _lock = self.lock()?;
        let mut rsvps = self.load_rsvps()?;

        let slot = rsvps
            .get_mut(index)
            .ok_or(ShindigError::InvalidIndex(index))?;
        *slot = rsvp;

        self.write_rsvps(&rsvps)
    }

    /// Remove the RSVP at `index`, returning it. Later records shift down.
    pub fn delete_rsvp(&self, index: usize) -> ShindigResult<Rsvp> {
        let _lock = self.lock()?;
        let mut rsvps = self.load_rsvps()?;

        if index >= rsvps.len() {
            return Err(ShindigError::InvalidIndex(index));
        }
        let removed = rsvps.remove(index);

        self.write_rsvps(&rsvps)?;
        Ok(removed)
    }

    fn write_rsvps(&self, rsvps: &[Rsvp]) -> ShindigResult<()> {
        let content = serde_json::to_string_pretty(rsvps)
            .map_err(|e| ShindigError::Serialization(e.to_string()))?;
        self.write_atomic(&self.rsvp_path(), &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let store = Store::open(dir.path().join("data")).expect("Should open store");
        (dir, store)
    }

    fn rsvp(name: &str, adults: u32, kids: u32, notes: &str) -> Rsvp {
        Rsvp {
            name: name.to_string(),
            adults,
            kids,
            notes: notes.to_string(),
        }
    }

    #[test]
    fn test_load_event_returns_none_when_absent() {
        let (_dir, store) = temp_store();
        assert!(store.load_event().unwrap().is_none());
    }

    #[test]
    fn test_event_roundtrip() {
        let (_dir, store) = temp_store();

        let mut event = Event::default();
        event.title = "Midsummer dinner".to_string();
        event.active = false;
        store.save_event(&event).unwrap();

        let loaded = store.load_event().unwrap().expect("Should load event");
        assert_eq!(loaded.title, "Midsummer dinner");
        assert!(!loaded.active);
    }

    #[test]
    fn test_seed_default_event_only_writes_once() {
        let (_dir, store) = temp_store();

        assert!(store.seed_default_event().unwrap());
        let mut event = store.load_event().unwrap().unwrap();
        event.title = "Edited".to_string();
        store.save_event(&event).unwrap();

        // Second seed must not clobber the edit
        assert!(!store.seed_default_event().unwrap());
        assert_eq!(store.load_event().unwrap().unwrap().title, "Edited");
    }

    #[test]
    fn test_append_grows_list_by_one() {
        let (_dir, store) = temp_store();

        store.append_rsvp(rsvp("A", 2, 1, "x")).unwrap();
        let rsvps = store.load_rsvps().unwrap();

        assert_eq!(rsvps.len(), 1);
        assert_eq!(rsvps[0], rsvp("A", 2, 1, "x"));
    }

    #[test]
    fn test_delete_removes_exactly_that_record() {
        let (_dir, store) = temp_store();
        store.append_rsvp(rsvp("A", 1, 0, "")).unwrap();
        store.append_rsvp(rsvp("B", 2, 2, "")).unwrap();
        store.append_rsvp(rsvp("C", 3, 0, "")).unwrap();

        let removed = store.delete_rsvp(1).unwrap();
        assert_eq!(removed.name, "B");

        let rsvps = store.load_rsvps().unwrap();
        assert_eq!(rsvps.len(), 2);
        assert_eq!(rsvps[0].name, "A", "Earlier record should be untouched");
        assert_eq!(rsvps[1].name, "C", "Later record should shift down intact");
        assert_eq!(rsvps[1].adults, 3);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let (_dir, store) = temp_store();
        store.append_rsvp(rsvp("A", 1, 0, "")).unwrap();
        store.append_rsvp(rsvp("B", 2, 2, "")).unwrap();

        store.update_rsvp(0, rsvp("A", 4, 1, "more of us")).unwrap();

        let rsvps = store.load_rsvps().unwrap();
        assert_eq!(rsvps[0].adults, 4);
        assert_eq!(rsvps[0].notes, "more of us");
        assert_eq!(rsvps[1].name, "B");
    }

    #[test]
    fn test_out_of_range_index_is_a_typed_error() {
        let (_dir, store) = temp_store();
        store.append_rsvp(rsvp("A", 1, 0, "")).unwrap();

        match store.delete_rsvp(5) {
            Err(ShindigError::InvalidIndex(5)) => {}
            other => panic!("Expected InvalidIndex(5), got {:?}", other),
        }
        match store.update_rsvp(1, rsvp("B", 1, 0, "")) {
            Err(ShindigError::InvalidIndex(1)) => {}
            other => panic!("Expected InvalidIndex(1), got {:?}", other),
        }

        // The stored list must be unchanged
        assert_eq!(store.load_rsvps().unwrap().len(), 1);
    }

    #[test]
    fn test_writes_leave_no_temp_file_behind() {
        let (_dir, store) = temp_store();
        store.append_rsvp(rsvp("A", 1, 0, "")).unwrap();
        store.save_event(&Event::default()).unwrap();

        let leftovers: Vec<_> = fs::read_dir(&store.data_dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty(), "Temp files should be renamed away");
    }
}
