//! Human-readable progress output
//!
//! Progress goes to stdout, skip warnings go to stderr.

use std::io::Write;

use super::run::{ProgressEvent, Reporter};

/// Prints progress lines to a pair of writers.
pub struct ConsoleReporter<O: Write, E: Write> {
    out: O,
    err: E,
}

impl ConsoleReporter<std::io::Stdout, std::io::Stderr> {
    /// Reporter bound to the process's stdout and stderr.
    pub fn stdio() -> Self {
        Self::new(std::io::stdout(), std::io::stderr())
    }
}

impl<O: Write, E: Write> ConsoleReporter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Give back the underlying writers.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    fn write_event(&mut self, event: &ProgressEvent) -> std::io::Result<()> {
        match event {
            ProgressEvent::ReadingInput { path } => {
                writeln!(self.out, "Reading input file: {}", path.display())
            }
            ProgressEvent::InputLoaded { size } => {
                writeln!(self.out, "Input file size: {} bytes", size)
            }
            ProgressEvent::Scanning => writeln!(self.out, "Extracting potential class data..."),
            ProgressEvent::NoMarkers { marker } => writeln!(
                self.out,
                "No potential class data found (no {} markers detected).",
                marker
            ),
            ProgressEvent::MarkersFound { occurrences } => writeln!(
                self.out,
                "Found {} occurrences of the magic number.",
                occurrences
            ),
            ProgressEvent::SegmentsFound { count } => writeln!(
                self.out,
                "Found {} potential class data segments.",
                count
            ),
            ProgressEvent::CreatingArchive { path } => {
                writeln!(self.out, "Creating JAR file: {}", path.display())
            }
            ProgressEvent::EntryAdded { name, len } => {
                writeln!(self.out, "  Added entry: {} ({} bytes)", name, len)
            }
            ProgressEvent::EntryPlanned { name, len } => {
                writeln!(self.out, "  Would add entry: {} ({} bytes)", name, len)
            }
            ProgressEvent::EntrySkipped {
                index, len, marker, ..
            } => writeln!(
                self.err,
                "  Warning: Skipping segment {} as it doesn't start with {} (length: {})",
                index, marker, len
            ),
            ProgressEvent::Finished { added, skipped } => {
                writeln!(self.out, "Finished adding entries. Total added: {}", added)?;
                if *skipped > 0 {
                    writeln!(self.out, "Skipped segments: {}", skipped)?;
                }
                Ok(())
            }
            ProgressEvent::ArchiveCreated { path } => {
                writeln!(self.out, "Successfully created JAR file: {}", path.display())
            }
        }
    }
}

impl<O: Write, E: Write> Reporter for ConsoleReporter<O, E> {
    fn report(&mut self, event: ProgressEvent) {
        // A closed stdout should not abort the extraction itself
        if let Err(e) = self.write_event(&event) {
            tracing::debug!("Failed to write progress line: {}", e);
        }
    }
}
