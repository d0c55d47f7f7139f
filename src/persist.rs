//! On-disk state of the terminal binary: the high score file and the
//! JSON-lines log of broadcast events.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::core::NetEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,
}

/// Read the stored high score. A missing file counts as 0.
pub fn load_high_score(path: &Path) -> Result<u32> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(anyhow!("high score: read {} failed: {}", path.display(), e)),
    };
    let record: HighScoreRecord = serde_json::from_str(&text)
        .map_err(|e| anyhow!("high score: invalid {}: {}", path.display(), e))?;
    Ok(record.high_score)
}

pub fn save_high_score(path: &Path, high_score: u32) -> Result<()> {
    let json = serde_json::to_string(&HighScoreRecord { high_score })?;
    fs::write(path, json)
        .map_err(|e| anyhow!("high score: write {} failed: {}", path.display(), e))
}

/// Append-only log of [`NetEvent`]s, one JSON object per line.
///
/// Stands in for the opponent transport: whatever relays versus-mode events
/// can tail this file.
pub struct EventLog {
    out: BufWriter<File>,
    buf: Vec<u8>,
}

impl EventLog {
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| anyhow!("event log: open {} failed: {}", path.display(), e))?;
        Ok(Self {
            out: BufWriter::new(file),
            buf: Vec::with_capacity(64),
        })
    }

    pub fn record(&mut self, event: &NetEvent) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, event)?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        // Flushed per event so a reader sees game over right away.
        self.out.flush()?;
        Ok(())
    }
}
