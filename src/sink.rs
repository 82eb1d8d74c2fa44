//! Destinations for generated Markdown.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

pub trait Sink {
    /// Appends `markdown` and returns the number of bytes written.
    fn append(&mut self, markdown: &str) -> Result<usize>;

    fn describe(&self) -> String;
}

/// Appends to a file, creating it when missing. Existing content is never truncated.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    create_dirs: bool,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSink {
            path: path.into(),
            create_dirs: false,
        }
    }

    /// Create missing parent directories before opening the file.
    pub fn create_dirs(mut self, create: bool) -> Self {
        self.create_dirs = create;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: std::io::Error) -> Error {
        Error::WriteOutput {
            path: self.path.clone(),
            source,
        }
    }
}

impl Sink for FileSink {
    fn append(&mut self, markdown: &str) -> Result<usize> {
        if self.create_dirs {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.write_error(e))?;
        file.write_all(markdown.as_bytes())
            .map_err(|e| self.write_error(e))?;
        file.flush().map_err(|e| self.write_error(e))?;

        debug!(path = %self.path.display(), bytes = markdown.len(), "appended markdown");
        Ok(markdown.len())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Writes to any stream, e.g. stdout or an in-memory buffer.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        WriterSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn append(&mut self, markdown: &str) -> Result<usize> {
        self.writer
            .write_all(markdown.as_bytes())
            .map_err(Error::Sink)?;
        self.writer.flush().map_err(Error::Sink)?;
        Ok(markdown.len())
    }

    fn describe(&self) -> String {
        "stream".to_string()
    }
}

impl Sink for String {
    fn append(&mut self, markdown: &str) -> Result<usize> {
        self.push_str(markdown);
        Ok(markdown.len())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
