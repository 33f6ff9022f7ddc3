//! Preference storage backends.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use boundary_types::AppId;
use tracing::debug;

use crate::document::PrefsDocument;
use crate::error::{PrefsError, PrefsResult};

/// Durable key/value preferences shared by the host and its UI.
///
/// Backends only implement `load` and `update`; the typed accessors are
/// provided on top of them.
pub trait Preferences: Send + Sync {
    /// Read the whole document. A store that was never written reads as defaults.
    fn load(&self) -> PrefsResult<PrefsDocument>;

    /// Read-modify-write the document as one step.
    fn update(&self, edit: &mut dyn FnMut(&mut PrefsDocument)) -> PrefsResult<()>;

    fn load_bounded_apps(&self) -> PrefsResult<Vec<AppId>> {
        Ok(self
            .load()?
            .bounded_apps
            .into_iter()
            .map(AppId::new)
            .collect())
    }

    fn save_bounded_apps(&self, apps: &[AppId]) -> PrefsResult<()> {
        self.update(&mut |doc| {
            doc.bounded_apps = apps.iter().map(|app| app.0.clone()).collect();
        })
    }

    fn access_duration_minutes(&self) -> PrefsResult<Option<i64>> {
        Ok(self.load()?.access_duration_minutes)
    }

    fn set_access_duration_minutes(&self, minutes: Option<i64>) -> PrefsResult<()> {
        self.update(&mut |doc| doc.access_duration_minutes = minutes)
    }

    fn last_bounded_app(&self) -> PrefsResult<Option<AppId>> {
        Ok(self.load()?.last_bounded_package.map(AppId::new))
    }

    fn set_last_bounded_app(&self, app: &AppId) -> PrefsResult<()> {
        self.update(&mut |doc| doc.last_bounded_package = Some(app.0.clone()))
    }

    fn overlay_active(&self) -> PrefsResult<bool> {
        Ok(self.load()?.is_overlay_active)
    }

    fn set_overlay_active(&self, active: bool) -> PrefsResult<()> {
        self.update(&mut |doc| doc.is_overlay_active = active)
    }
}

/// Process-local preferences, for tests and embedded use.
#[derive(Debug, Default)]
pub struct InMemoryPreferences {
    doc: Mutex<PrefsDocument>,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(doc: PrefsDocument) -> Self {
        Self {
            doc: Mutex::new(doc),
        }
    }
}

impl Preferences for InMemoryPreferences {
    fn load(&self) -> PrefsResult<PrefsDocument> {
        Ok(self
            .doc
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn update(&self, edit: &mut dyn FnMut(&mut PrefsDocument)) -> PrefsResult<()> {
        edit(&mut self.doc.lock().unwrap_or_else(PoisonError::into_inner));
        Ok(())
    }
}

/// Preferences stored as one JSON document on disk.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a reader never sees a half-written document. The file
/// and its parent directory are created on first write.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PrefsError {
        PrefsError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write(&self, doc: &PrefsDocument) -> PrefsResult<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.io_error(e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        serde_json::to_writer_pretty(&mut tmp, doc)?;
        tmp.write_all(b"\n").map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        debug!(path = %self.path.display(), "Preferences written");
        Ok(())
    }
}

impl Preferences for FilePreferences {
    fn load(&self) -> PrefsResult<PrefsDocument> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(PrefsDocument::default()),
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_slice(&bytes).map_err(|source| PrefsError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn update(&self, edit: &mut dyn FnMut(&mut PrefsDocument)) -> PrefsResult<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut doc = self.load()?;
        edit(&mut doc);
        self.write(&doc)
    }
}
