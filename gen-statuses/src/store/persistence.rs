//! Status persistence: the generated chunk list and the posting cursor.

use super::cursor::next_status;
use crate::text::Chunk;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// File holding the generated chunks as a JSON array.
pub const STATUSES_FILE: &str = "statuses.json";

/// File holding the index of the last posted chunk.
pub const CURSOR_FILE: &str = "last";

/// Get the default persistence directory.
pub fn default_persist_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .map(|d| d.join("gen-statuses"))
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
}

/// Generated statuses and cursor state in one directory.
#[derive(Debug, Clone)]
pub struct StatusStore {
    dir: PathBuf,
}

impl StatusStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create persist directory {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn statuses_path(&self) -> PathBuf {
        self.dir.join(STATUSES_FILE)
    }

    fn cursor_path(&self) -> PathBuf {
        self.dir.join(CURSOR_FILE)
    }

    /// Replace the stored statuses.
    pub fn save_statuses(&self, chunks: &[Chunk]) -> Result<()> {
        let file = File::create(self.statuses_path()).context("Failed to create statuses file")?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, chunks).context("Failed to write statuses JSON")?;
        Ok(())
    }

    /// Load the stored statuses.
    pub fn load_statuses(&self) -> Result<Vec<Chunk>> {
        let path = self.statuses_path();
        let file = File::open(&path)
            .with_context(|| format!("Failed to open {}; run `generate` first", path.display()))?;
        let chunks: Vec<Chunk> = serde_json::from_reader(BufReader::new(file))
            .context("Failed to parse statuses JSON")?;
        Ok(chunks)
    }

    /// Index of the last posted chunk, if anything was posted yet.
    pub fn read_cursor(&self) -> Result<Option<usize>> {
        let path = self.cursor_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).context("Failed to read cursor file")?;
        let last: usize = serde_json::from_str(content.trim()).context("Failed to parse cursor file")?;
        Ok(Some(last))
    }

    /// Record the index of the chunk that was just posted.
    pub fn write_cursor(&self, last: usize) -> Result<()> {
        fs::write(self.cursor_path(), serde_json::to_string(&last)?)
            .context("Failed to write cursor file")?;
        Ok(())
    }

    /// Load statuses and cursor and pick the next chunk to post.
    pub fn next(&self) -> Result<(usize, Chunk)> {
        let chunks = self.load_statuses()?;
        let last = self.read_cursor()?;
        let (idx, chunk) = next_status(&chunks, last)?;
        Ok((idx, chunk.clone()))
    }
}
