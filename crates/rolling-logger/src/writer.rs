//! Rolling File Writer
//!
//! Appends to `<name>.log` until it reaches the size limit, then shifts
//! `<name>.log` -> `<name>.log.1` -> `<name>.log.2` ... and drops the oldest.
//! Every line written is also kept in a bounded in-memory buffer.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::fmt::MakeWriter;

/// Rotation and buffer limits
#[derive(Debug, Clone)]
pub struct RollingConfig {
    /// Rotate once the current file would grow past this size
    pub max_file_bytes: u64,
    /// Files kept on disk, including the current one
    pub max_files: usize,
    /// Lines kept in memory for `recent_lines`
    pub buffer_lines: usize,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 1024 * 1024,
            max_files: 5,
            buffer_lines: 500,
        }
    }
}

/// Size-rotated log file
pub(crate) struct RollingFile {
    dir: PathBuf,
    name: String,
    max_file_bytes: u64,
    max_files: usize,
    file: File,
    written: u64,
}

impl RollingFile {
    pub(crate) fn open(dir: &Path, name: &str, config: &RollingConfig) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.log", name));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            dir: dir.to_path_buf(),
            name: name.to_string(),
            max_file_bytes: config.max_file_bytes,
            max_files: config.max_files.max(1),
            file,
            written,
        })
    }

    pub(crate) fn current_path(&self) -> PathBuf {
        self.numbered(0)
    }

    fn numbered(&self, n: usize) -> PathBuf {
        if n == 0 {
            self.dir.join(format!("{}.log", self.name))
        } else {
            self.dir.join(format!("{}.log.{}", self.name, n))
        }
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let oldest = self.numbered(self.max_files - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (0..self.max_files - 1).rev() {
            let from = self.numbered(n);
            if from.exists() {
                fs::rename(&from, self.numbered(n + 1))?;
            }
        }

        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.current_path())?;
        self.written = 0;
        Ok(())
    }

    pub(crate) fn write_record(&mut self, buf: &[u8]) -> io::Result<()> {
        let len = buf.len() as u64;
        if self.written > 0 && self.written + len > self.max_file_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += len;
        Ok(())
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

struct Shared {
    file: Mutex<RollingFile>,
    recent: Mutex<VecDeque<String>>,
    capacity: usize,
}

/// Cloneable handle to a rolling log file and its recent-line buffer.
///
/// Implements `MakeWriter`, so it can be handed to a `tracing_subscriber`
/// fmt layer directly.
#[derive(Clone)]
pub struct RollingLogger {
    shared: Arc<Shared>,
}

impl RollingLogger {
    pub fn new(dir: impl AsRef<Path>, name: &str, config: RollingConfig) -> io::Result<Self> {
        let file = RollingFile::open(dir.as_ref(), name, &config)?;
        Ok(Self {
            shared: Arc::new(Shared {
                file: Mutex::new(file),
                recent: Mutex::new(VecDeque::with_capacity(config.buffer_lines)),
                capacity: config.buffer_lines,
            }),
        })
    }

    /// Path of the file currently being written
    pub fn log_path(&self) -> PathBuf {
        lock(&self.shared.file).current_path()
    }

    /// Most recent lines, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        lock(&self.shared.recent).iter().cloned().collect()
    }

    fn write_record(&self, buf: &[u8]) -> io::Result<()> {
        lock(&self.shared.file).write_record(buf)?;

        if self.shared.capacity > 0 {
            let mut recent = lock(&self.shared.recent);
            for line in String::from_utf8_lossy(buf).lines().filter(|l| !l.is_empty()) {
                if recent.len() == self.shared.capacity {
                    recent.pop_front();
                }
                recent.push_back(line.to_string());
            }
        }
        Ok(())
    }
}

// Poisoned locks are recovered
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Per-event writer handed out by `MakeWriter`
pub struct RollingHandle {
    logger: RollingLogger,
}

impl Write for RollingHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.logger.write_record(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        lock(&self.logger.shared.file).flush()
    }
}

impl<'a> MakeWriter<'a> for RollingLogger {
    type Writer = RollingHandle;

    fn make_writer(&'a self) -> Self::Writer {
        RollingHandle {
            logger: self.clone(),
        }
    }
}
