use std::fs::File;
use std::io;
use std::io::BufRead;
use std::path::Path;

use log::warn;

/// Reads a target list, returning non-empty trimmed lines.
/// Lines starting with `#` are comments. Lines that fail to read are skipped with a warning.
pub fn read_lines(path: &str) -> io::Result<Vec<String>> {
    let file = File::open(Path::new(path))?;
    let reader = io::BufReader::new(file);
    let lines = reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    warn!("Skipping unreadable line {} of {}: {}", i + 1, path, e);
                    return None;
                }
            };
            let trimmed = line.trim().to_string();
            if trimmed.is_empty() || trimmed.starts_with('#') { None } else { Some(trimmed) }
        })
        .collect();
    Ok(lines)
}
