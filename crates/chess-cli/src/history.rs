//! Append-only FEN history log.
//!
//! One FEN per line, oldest first. A log can be resumed by loading its last
//! line.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writer that appends positions to a log file.
#[derive(Debug)]
pub struct FenLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FenLog {
    /// Opens `path` for appending, creating the file and its parent
    /// directories if needed.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(FenLog {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one position and flushes it to disk.
    pub fn append(&mut self, fen: &str) -> io::Result<()> {
        writeln!(self.writer, "{fen}")?;
        self.writer.flush()
    }

    /// Reads a log back, skipping blank lines.
    pub fn read(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
        let reader = BufReader::new(File::open(path)?);
        let mut fens = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if !line.is_empty() {
                fens.push(line.to_string());
            }
        }
        Ok(fens)
    }
}
