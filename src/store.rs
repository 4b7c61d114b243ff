//! Diary store: persistence of the full trip collection
//!
//! The backing file is a line-oriented UTF-8 text file. One `T:` header line
//! per trip, each followed by that trip's `P:` photo lines in order. Every
//! save rewrites the whole file; every load reads it from scratch. There is
//! no append-only growth and no partial diff: the persistence policy is
//! "last full save wins".

use crate::codec;
use crate::error::{Result, TrailbookError};
use crate::model::Diary;
use anyhow::Context;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

/// File-backed storage for the diary collection
pub struct DiaryStore {
    path: PathBuf,
}

impl DiaryStore {
    /// Create a store over the given backing path
    ///
    /// The file does not need to exist yet; it is created on the first save.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailbook::store::DiaryStore;
    ///
    /// let store = DiaryStore::new("data/travel_diary.trd");
    /// ```
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// The resolved backing path
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load the entire diary from disk
    ///
    /// A missing file yields an empty diary, not an error. Lines are read in
    /// order with a current-trip cursor: a `T:` line starts a new trip, a
    /// `P:` line is appended to the cursor's photos. A photo line before any
    /// trip line, or any line that fails to decode, is skipped with a
    /// warning; no single malformed record aborts the load.
    pub fn load_all(&self) -> Result<Diary> {
        if !self.path.exists() {
            tracing::info!("No diary file at {}, starting empty", self.path.display());
            return Ok(Diary::new());
        }

        let file = fs::File::open(&self.path)
            .with_context(|| format!("Failed to open diary file {}", self.path.display()))?;
        let reader = BufReader::new(file);

        let mut diary = Diary::new();
        let mut skipped = 0usize;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line.context("Failed to read diary line")?;
            if line.is_empty() {
                continue;
            }

            if line.starts_with(codec::TRIP_MARKER) {
                match codec::decode_trip_line(&line) {
                    Ok(trip) => diary.add_trip(trip),
                    Err(e) => {
                        tracing::warn!("Skipping line {}: {}", line_no + 1, e);
                        skipped += 1;
                    }
                }
            } else if line.starts_with(codec::PHOTO_MARKER) {
                match codec::decode_photo_line(&line) {
                    Ok(photo) => {
                        let last = diary.trip_count().checked_sub(1);
                        match last.and_then(|i| diary.get_mut(i)) {
                            Some(trip) => trip.photos.push(photo),
                            None => {
                                tracing::warn!(
                                    "Skipping line {}: photo record before any trip header",
                                    line_no + 1
                                );
                                skipped += 1;
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Skipping line {}: {}", line_no + 1, e);
                        skipped += 1;
                    }
                }
            } else {
                tracing::warn!("Skipping line {}: unknown record marker", line_no + 1);
                skipped += 1;
            }
        }

        tracing::debug!(
            "Loaded {} trips from {} ({} lines skipped)",
            diary.trip_count(),
            self.path.display(),
            skipped
        );
        Ok(diary)
    }

    /// Write the entire diary to disk as a full snapshot
    ///
    /// The parent directory is created before every write; if that fails the
    /// save is abandoned and reported, never retried. An empty diary
    /// truncates the file so the snapshot on disk always matches memory.
    pub fn save_all(&self, diary: &Diary) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create data directory {}", parent.display()))
                    .map_err(|e| TrailbookError::Storage(e.to_string()))?;
            }
        }

        let mut out = String::new();
        for trip in diary.iter() {
            out.push_str(&codec::encode_trip(trip));
            out.push('\n');
            for photo in &trip.photos {
                out.push_str(&codec::encode_photo(photo));
                out.push('\n');
            }
        }

        let mut file = fs::File::create(&self.path)
            .with_context(|| format!("Failed to create diary file {}", self.path.display()))
            .map_err(|e| TrailbookError::Storage(e.to_string()))?;
        file.write_all(out.as_bytes())
            .context("Failed to write diary file")
            .map_err(|e| TrailbookError::Storage(e.to_string()))?;

        tracing::debug!(
            "Saved {} trips to {}",
            diary.trip_count(),
            self.path.display()
        );
        Ok(())
    }
}
