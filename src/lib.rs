use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub mod config;
pub mod converter;
pub mod error;
pub mod generator;
pub mod sink;

pub use config::{ConvertOptions, Settings};
pub use error::{Error, Result, Stage};
pub use generator::headings::HeadingStyle;
pub use sink::{FileSink, Sink, WriterSink};

#[derive(Debug, Clone)]
pub struct HtmlSource {
    pub file_path: Option<PathBuf>,
    pub file_stream: Vec<u8>,
}

impl HtmlSource {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_stream = std::fs::read(path).map_err(|source| Error::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = file_stream.len(), "read input");

        Ok(HtmlSource {
            file_path: Some(path.to_path_buf()),
            file_stream,
        })
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        HtmlSource {
            file_path: None,
            file_stream: bytes.into(),
        }
    }

    pub fn decode(&self) -> Result<&str> {
        std::str::from_utf8(&self.file_stream).map_err(|source| Error::Decode {
            origin: self.origin(),
            source,
        })
    }

    fn origin(&self) -> String {
        match &self.file_path {
            Some(path) => path.display().to_string(),
            None => "<memory>".to_string(),
        }
    }
}

impl From<&str> for HtmlSource {
    fn from(html: &str) -> Self {
        HtmlSource::from_bytes(html.as_bytes())
    }
}

/// What one pipeline run did.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub input: PathBuf,
    pub output: String,
    pub bytes_read: usize,
    pub bytes_written: usize,
}

// html string -> markdown string
pub fn convert_html(html: &str, options: &ConvertOptions) -> Result<String> {
    let prepared = if options.normalize || options.selector.is_some() {
        converter::normalize::normalize(html, options.selector.as_deref())?
    } else {
        html.to_string()
    };

    generator::html2md::run(&prepared, options.heading_style)
}

pub fn convert(source: &HtmlSource, options: &ConvertOptions) -> Result<String> {
    convert_html(source.decode()?, options)
}

pub fn convert_from_path(path: impl AsRef<Path>, options: &ConvertOptions) -> Result<String> {
    let source = HtmlSource::from_path(path)?;
    convert(&source, options)
}

/// Converts `settings.input_path` and appends the result to `settings.output_path`.
pub fn run(settings: &Settings) -> Result<RunReport> {
    let mut sink = FileSink::new(&settings.output_path).create_dirs(settings.create_output_dir);
    run_with_sink(settings, &mut sink)
}

/// Same as [`run`] with the output going to `sink`.
///
/// The sink is only touched once the whole input has been read and converted.
pub fn run_with_sink(settings: &Settings, sink: &mut dyn Sink) -> Result<RunReport> {
    let source = HtmlSource::from_path(&settings.input_path)?;
    let markdown = convert(&source, &settings.conversion)?;
    let bytes_written = sink.append(&markdown)?;

    let report = RunReport {
        input: settings.input_path.clone(),
        output: sink.describe(),
        bytes_read: source.file_stream.len(),
        bytes_written,
    };
    info!(
        input = %report.input.display(),
        output = %report.output,
        bytes_read = report.bytes_read,
        bytes_written = report.bytes_written,
        "appended markdown"
    );
    Ok(report)
}
