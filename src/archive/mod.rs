//! JAR archive output
//!
//! A JAR is a zip file whose first entry is `META-INF/MANIFEST.MF`. The
//! writer here produces exactly that: the manifest, then one entry per
//! carved class.

mod manifest;

pub use manifest::{Manifest, MANIFEST_PATH};

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{ExtractError, Result};

/// Default archive name when none is configured.
pub const DEFAULT_OUTPUT: &str = "extracted_classes.jar";

/// Compression applied to archive entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Entries are stored uncompressed.
    Stored,
    /// Entries are deflated, as `jar` does by default.
    #[default]
    Deflated,
}

impl Compression {
    fn method(self) -> CompressionMethod {
        match self {
            Compression::Stored => CompressionMethod::Stored,
            Compression::Deflated => CompressionMethod::Deflated,
        }
    }
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Compression::Stored => write!(f, "stored"),
            Compression::Deflated => write!(f, "deflated"),
        }
    }
}

/// Streaming JAR writer.
///
/// Nothing is rolled back on failure; an aborted run leaves whatever was
/// already written on disk.
pub struct JarWriter {
    path: PathBuf,
    zip: ZipWriter<File>,
    options: SimpleFileOptions,
    entries: usize,
}

impl JarWriter {
    /// Create the archive at `path` and write the manifest entry.
    pub fn create(path: &Path, manifest: &Manifest, compression: Compression) -> Result<Self> {
        manifest.validate()?;

        let file = File::create(path).map_err(|e| ExtractError::output_write(path, e))?;
        let options = SimpleFileOptions::default()
            .compression_method(compression.method())
            .unix_permissions(0o644);

        let mut writer = Self {
            path: path.to_path_buf(),
            zip: ZipWriter::new(file),
            options,
            entries: 0,
        };

        writer.write_raw(MANIFEST_PATH, manifest.render().as_bytes())?;
        tracing::debug!(path = %path.display(), %compression, "created archive");

        Ok(writer)
    }

    /// Append one entry.
    pub fn add_entry(&mut self, name: &str, data: &[u8]) -> Result<()> {
        self.write_raw(name, data)?;
        self.entries += 1;
        tracing::trace!(name, len = data.len(), "wrote archive entry");
        Ok(())
    }

    /// Number of entries added so far, not counting the manifest.
    pub fn entry_count(&self) -> usize {
        self.entries
    }

    /// Path the archive is being written to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the central directory and flush the file.
    pub fn finish(self) -> Result<PathBuf> {
        let Self { path, zip, .. } = self;

        let mut file = zip
            .finish()
            .map_err(|e| ExtractError::archive(&path, e))?;
        file.flush()
            .map_err(|e| ExtractError::output_write(&path, e))?;

        Ok(path)
    }

    fn write_raw(&mut self, name: &str, data: &[u8]) -> Result<()> {
        self.zip
            .start_file(name, self.options)
            .map_err(|e| ExtractError::archive(&self.path, e))?;
        self.zip
            .write_all(data)
            .map_err(|e| ExtractError::output_write(&self.path, e))
    }
}
