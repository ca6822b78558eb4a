//! Size-rotated trace file.
//!
//! When the live file grows past the limit it is shifted to `<file>.1`, the
//! previous `.1` to `.2`, and so on; the oldest backup beyond the retention
//! count is overwritten.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotate once the live file exceeds 5 MiB.
const DEFAULT_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Numbered backups kept after rotation.
const BACKUPS: usize = 3;

/// Append-only line writer with numbered rotation. Safe to share between
/// threads.
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    file: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limit(file_path, DEFAULT_MAX_BYTES)
    }

    pub const fn with_limit(file_path: PathBuf, max_bytes: u64) -> Self {
        Self {
            file_path,
            max_bytes,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` and a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error, or `Other` if the lock is poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace writer poisoned: {e}")))?;

        if fs::metadata(&self.file_path).is_ok_and(|m| m.len() > self.max_bytes) {
            *guard = None;
            self.rotate()?;
        }

        if guard.is_none() {
            *guard = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            );
        }
        let file = guard
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "trace file not open"))?;
        writeln!(file, "{line}")?;
        file.flush()
    }

    fn rotate(&self) -> io::Result<()> {
        for index in (1..BACKUPS).rev() {
            let from = backup_path(&self.file_path, index);
            if from.exists() {
                fs::rename(&from, backup_path(&self.file_path, index + 1))?;
            }
        }
        fs::rename(&self.file_path, backup_path(&self.file_path, 1))
    }
}

fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotates_into_numbered_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let writer = FileWriter::with_limit(path.clone(), 4);

        for line in ["first", "second", "third", "fourth", "fifth"] {
            writer.write_line(line).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "fifth\n");
        assert_eq!(fs::read_to_string(backup_path(&path, 1)).unwrap(), "fourth\n");
        assert_eq!(fs::read_to_string(backup_path(&path, 3)).unwrap(), "second\n");
        assert!(!backup_path(&path, 4).exists());
    }
}
