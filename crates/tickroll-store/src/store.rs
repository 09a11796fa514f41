//! On-disk sample logs.

use crate::codec::{encode_line, parse_line, tag_of};
use directories::ProjectDirs;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tickroll_types::{Granularity, Sample};

/// Errors that can occur during sample log operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to create a directory.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write a file.
    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to replace a log with its trimmed copy.
    #[error("Failed to rename '{from}' to '{to}': {source}")]
    Rename {
        /// The temporary file.
        from: PathBuf,
        /// The log being replaced.
        to: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to read directory.
    #[error("Failed to read directory '{path}': {source}")]
    ReadDir {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Result of trimming one log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrimOutcome {
    /// Lines kept.
    pub kept: usize,
    /// Lines removed.
    pub removed: usize,
}

impl TrimOutcome {
    /// Returns true if the log was rewritten.
    #[must_use]
    pub const fn rewrote(&self) -> bool {
        self.removed > 0
    }
}

/// Append-only per-instrument sample logs.
///
/// Logs live in one directory as `<instrument>.txt`. All granularities of an
/// instrument share the same file; every line carries its own tag.
#[derive(Debug, Clone)]
pub struct SampleStore {
    /// Directory holding the log files.
    root: PathBuf,
}

impl SampleStore {
    /// Creates a store rooted at the given directory.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(root: PathBuf) -> Result<Self> {
        if !root.exists() {
            fs::create_dir_all(&root).map_err(|e| StoreError::CreateDir {
                path: root.clone(),
                source: e,
            })?;
        }

        Ok(Self { root })
    }

    /// Returns the default directory for sample logs.
    ///
    /// Uses the `directories` crate to find the appropriate location:
    /// - Linux: `~/.local/share/tickroll/tickers/`
    /// - macOS: `~/Library/Application Support/tickroll/tickers/`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\tickroll\tickers\`
    ///
    /// Falls back to `~/.tickroll/tickers/` if the platform-specific location
    /// cannot be determined.
    #[must_use]
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "tickroll")
            .map_or_else(dirs_fallback, |proj_dirs| proj_dirs.data_dir().to_path_buf())
            .join("tickers")
    }

    /// Creates a store at the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn with_default_path() -> Result<Self> {
        Self::new(Self::default_path())
    }

    /// Returns the directory holding the logs.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of an instrument's log.
    ///
    /// Path separators in the id are replaced so every log stays inside the
    /// store directory.
    #[must_use]
    pub fn log_path(&self, instrument_id: &str) -> PathBuf {
        let name: String = instrument_id
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        self.root.join(format!("{name}.txt"))
    }

    /// Appends one sample to an instrument's log, creating the log if needed.
    ///
    /// The line is written with a single `write_all` on a file opened in
    /// append mode, so previously committed lines are never touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be opened or written.
    pub fn append(&self, instrument_id: &str, sample: &Sample) -> Result<()> {
        let path = self.log_path(instrument_id);
        let line = encode_line(sample);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| StoreError::WriteFile {
                path: path.clone(),
                source: e,
            })?;

        file.write_all(line.as_bytes())
            .map_err(|e| StoreError::WriteFile { path, source: e })
    }

    /// Returns up to the last `count` samples of one granularity, oldest first.
    ///
    /// A missing log yields an empty vector. Malformed lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only if an existing log cannot be read.
    pub fn read_recent(
        &self,
        instrument_id: &str,
        granularity: Granularity,
        count: usize,
    ) -> Result<Vec<Sample>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut recent = VecDeque::with_capacity(count);
        for sample in self.samples(instrument_id)? {
            if sample.granularity != granularity {
                continue;
            }
            if recent.len() == count {
                recent.pop_front();
            }
            recent.push_back(sample);
        }

        Ok(recent.into())
    }

    /// Returns every sample of one granularity, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error only if an existing log cannot be read.
    pub fn read_all(&self, instrument_id: &str, granularity: Granularity) -> Result<Vec<Sample>> {
        Ok(self
            .samples(instrument_id)?
            .into_iter()
            .filter(|s| s.granularity == granularity)
            .collect())
    }

    /// Returns the average of the last parseable line of any granularity.
    ///
    /// # Errors
    ///
    /// Returns an error only if an existing log cannot be read.
    pub fn last_average(&self, instrument_id: &str) -> Result<Option<f64>> {
        Ok(self.samples(instrument_id)?.last().map(|s| s.average))
    }

    /// Counts the parseable samples per granularity.
    ///
    /// # Errors
    ///
    /// Returns an error only if an existing log cannot be read.
    pub fn counts(&self, instrument_id: &str) -> Result<BTreeMap<Granularity, usize>> {
        let mut counts = BTreeMap::new();
        for sample in self.samples(instrument_id)? {
            *counts.entry(sample.granularity).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Lists the instrument ids that have a log in this store, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory cannot be read.
    pub fn instrument_ids(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| StoreError::ReadDir {
            path: self.root.clone(),
            source: e,
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::ReadDir {
                path: self.root.clone(),
                source: e,
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "txt")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                ids.push(stem.to_string());
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }

    /// Bounds each granularity in an instrument's log to its newest `cap` lines.
    ///
    /// Lines are grouped by their tag before counting, so a busy granularity
    /// never evicts entries of another. Retained lines keep their relative
    /// order. If no group exceeds `cap` the file is left untouched; otherwise
    /// the trimmed copy is written beside the log and renamed over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read, written or replaced.
    pub fn trim(&self, instrument_id: &str, cap: usize) -> Result<TrimOutcome> {
        let path = self.log_path(instrument_id);
        let Some(content) = self.read_log(&path)? else {
            return Ok(TrimOutcome::default());
        };

        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();

        let mut totals: HashMap<&str, usize> = HashMap::new();
        for line in &lines {
            if tag_of(line).is_none() {
                tracing::warn!(instrument = instrument_id, line, "untagged line in sample log");
            }
            *totals.entry(group_key(line)).or_insert(0) += 1;
        }

        if totals.values().all(|&n| n <= cap) {
            return Ok(TrimOutcome {
                kept: lines.len(),
                removed: 0,
            });
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut output = String::with_capacity(content.len());
        let mut kept = 0;

        for line in &lines {
            let key = group_key(line);
            let index = seen.entry(key).or_insert(0);
            let skip = totals[key].saturating_sub(cap);
            if *index >= skip {
                output.push_str(line);
                output.push('\n');
                kept += 1;
            }
            *index += 1;
        }

        let tmp = path.with_extension("txt.tmp");
        fs::write(&tmp, output).map_err(|e| StoreError::WriteFile {
            path: tmp.clone(),
            source: e,
        })?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::Rename {
            from: tmp,
            to: path.clone(),
            source: e,
        })?;

        let outcome = TrimOutcome {
            kept,
            removed: lines.len() - kept,
        };
        tracing::info!(
            instrument = instrument_id,
            kept = outcome.kept,
            removed = outcome.removed,
            "trimmed sample log"
        );
        Ok(outcome)
    }

    /// Parses every well-formed line of a log, in file order.
    fn samples(&self, instrument_id: &str) -> Result<Vec<Sample>> {
        let path = self.log_path(instrument_id);
        let Some(content) = self.read_log(&path)? else {
            return Ok(Vec::new());
        };

        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match parse_line(line) {
                Ok(sample) => Some(sample),
                Err(e) => {
                    tracing::debug!(
                        instrument = instrument_id,
                        line,
                        error = %e,
                        "skipping malformed sample line"
                    );
                    None
                }
            })
            .collect())
    }

    /// Reads a log as text, or `None` if it doesn't exist.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; affected lines then
    /// fail to parse and are skipped.
    fn read_log(&self, path: &Path) -> Result<Option<String>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadFile {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }
}

/// Retention group of a raw line: its tag, or the whole line if it has none.
fn group_key(line: &str) -> &str {
    tag_of(line).unwrap_or(line)
}

/// Fallback for determining home directory.
fn dirs_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".tickroll")
}
