use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use log::warn;

use crate::{ScanLauncher, ScanRequest};

/// Launcher that appends every accepted request to a JSON-lines file.
pub struct LaunchLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl LaunchLog {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open launch log '{}'", path.display()))?;
        Ok(Self { path, file: Mutex::new(file) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads back every request in the log, skipping lines that don't parse.
    pub fn read_all(path: impl AsRef<Path>) -> anyhow::Result<Vec<ScanRequest>> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to read launch log '{}'", path.display()))?;
        let mut requests = Vec::new();
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(&line) {
                Ok(req) => requests.push(req),
                Err(e) => warn!("Skipping line {} of {}: {}", i + 1, path.display(), e),
            }
        }
        Ok(requests)
    }
}

impl ScanLauncher for LaunchLog {
    fn start_scan(&self, request: &ScanRequest) -> anyhow::Result<()> {
        let line = serde_json::to_string(request)?;
        let mut file = self
            .file
            .lock()
            .map_err(|_| anyhow::anyhow!("launch log lock poisoned"))?;
        writeln!(file, "{}", line)?;
        file.flush()?;
        Ok(())
    }
}
