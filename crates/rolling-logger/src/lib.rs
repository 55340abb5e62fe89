//! Rolling File Logger
//!
//! Installs a `tracing` subscriber (with the `log` bridge) that writes to
//! `<dir>/<app>.log`. Once the file passes a size cap it is renamed to
//! `<app>.<timestamp>-<seq>.log` and a fresh file is opened; only the newest
//! rotated files are kept. The last lines written are mirrored into a
//! circular buffer so a host can show recent activity without reading disk.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;
pub const DEFAULT_MAX_FILES: usize = 5;
pub const DEFAULT_BUFFER_LINES: usize = 500;

/// Logger errors
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("log file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
}

/// Rotation and buffering limits
#[derive(Debug, Clone)]
pub struct LoggerOptions {
    /// Size at which the active file is rotated
    pub max_bytes: u64,
    /// Rotated files kept on disk (the active file is not counted)
    pub max_files: usize,
    /// Lines kept in the in-memory ring
    pub buffer_lines: usize,
    pub level: log::LevelFilter,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_files: DEFAULT_MAX_FILES,
            buffer_lines: DEFAULT_BUFFER_LINES,
            level: log::LevelFilter::Debug,
        }
    }
}

/// Size-capped log file plus a ring of recent lines
pub struct RollingFile {
    dir: PathBuf,
    app_name: String,
    options: LoggerOptions,
    file: File,
    written: u64,
    rotations: u32,
    recent: VecDeque<String>,
}

impl RollingFile {
    pub fn open(
        dir: impl Into<PathBuf>,
        app_name: &str,
        options: LoggerOptions,
    ) -> Result<Self, LoggerError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("{}.log", app_name));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            dir,
            app_name: app_name.to_string(),
            recent: VecDeque::with_capacity(options.buffer_lines),
            options,
            file,
            written,
            rotations: 0,
        })
    }

    /// Path of the file currently being appended to
    pub fn current_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.app_name))
    }

    /// Rotated files, oldest first
    pub fn rotated_files(&self) -> io::Result<Vec<PathBuf>> {
        let prefix = format!("{}.", self.app_name);
        let active = format!("{}.log", self.app_name);

        let mut files: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .map(|name| name.starts_with(&prefix) && name.ends_with(".log") && name != active)
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        Ok(files)
    }

    pub fn recent_lines(&self) -> Vec<String> {
        self.recent.iter().cloned().collect()
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.rotations += 1;
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
        let rotated = self
            .dir
            .join(format!("{}.{}-{:04}.log", self.app_name, stamp, self.rotations));
        fs::rename(self.current_path(), &rotated)?;

        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.current_path())?;
        self.written = 0;
        self.prune()
    }

    fn prune(&self) -> io::Result<()> {
        let files = self.rotated_files()?;
        if files.len() > self.options.max_files {
            let excess = files.len() - self.options.max_files;
            for path in &files[..excess] {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    fn remember(&mut self, buf: &[u8]) {
        if self.options.buffer_lines == 0 {
            return;
        }
        for line in String::from_utf8_lossy(buf).lines() {
            if line.trim().is_empty() {
                continue;
            }
            if self.recent.len() == self.options.buffer_lines {
                self.recent.pop_front();
            }
            self.recent.push_back(line.to_string());
        }
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.options.max_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += buf.len() as u64;
        self.remember(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Cloneable handle handed to the fmt subscriber
#[derive(Clone)]
pub struct SharedWriter(Arc<Mutex<RollingFile>>);

impl SharedWriter {
    fn lock(&self) -> MutexGuard<'_, RollingFile> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flush()
    }
}

impl<'a> MakeWriter<'a> for SharedWriter {
    type Writer = SharedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

static LOGGER: OnceLock<SharedWriter> = OnceLock::new();

/// Initialize the global logger with default limits
pub fn init_logger(log_dir: PathBuf, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with(log_dir, app_name, LoggerOptions::default())
}

pub fn init_logger_with(
    log_dir: PathBuf,
    app_name: &str,
    options: LoggerOptions,
) -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let level = options.level;
    let writer = SharedWriter(Arc::new(Mutex::new(RollingFile::open(
        log_dir, app_name, options,
    )?)));

    tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_ansi(false)
        .with_target(true)
        .with_max_level(to_tracing_level(level))
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    log::set_max_level(level);

    LOGGER
        .set(writer)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::info!("{}", message);
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    tracing::error!("{}", message);
    Ok(())
}

/// Lines most recently written by the global logger (empty before init)
pub fn recent_lines() -> Vec<String> {
    LOGGER
        .get()
        .map(|writer| writer.lock().recent_lines())
        .unwrap_or_default()
}

pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

fn ensure_initialized() -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        Ok(())
    } else {
        Err(LoggerError::NotInitialized)
    }
}

fn to_tracing_level(level: log::LevelFilter) -> LevelFilter {
    match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}
