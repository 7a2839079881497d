//! End-to-end extraction: read, plan, write the archive

use std::path::PathBuf;

use classcarve_scan::CLASS_MAGIC;
use serde::Serialize;

use super::{read_input, Disposition, ExtractionPlan, SkipReason};
use crate::archive::{Compression, JarWriter, Manifest};
use crate::error::Result;

/// Everything needed for one extraction run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub marker: &'static [u8],
    pub manifest: Manifest,
    pub compression: Compression,
    /// Plan and report without creating the archive
    pub dry_run: bool,
}

impl ExtractOptions {
    /// Options with the class-file marker, default manifest and compression.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            marker: &CLASS_MAGIC,
            manifest: Manifest::default(),
            compression: Compression::default(),
            dry_run: false,
        }
    }
}

/// Progress notifications emitted while extracting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    ReadingInput { path: PathBuf },
    InputLoaded { size: usize },
    Scanning,
    NoMarkers { marker: String },
    MarkersFound { occurrences: usize },
    SegmentsFound { count: usize },
    CreatingArchive { path: PathBuf },
    /// Entry written to the archive
    EntryAdded { name: String, len: usize },
    /// Entry that would be written (dry run)
    EntryPlanned { name: String, len: usize },
    EntrySkipped {
        index: usize,
        len: usize,
        marker: String,
        reason: SkipReason,
    },
    Finished { added: usize, skipped: usize },
    ArchiveCreated { path: PathBuf },
}

/// Receiver for [`ProgressEvent`]s.
pub trait Reporter {
    fn report(&mut self, event: ProgressEvent);
}

impl<F: FnMut(ProgressEvent)> Reporter for F {
    fn report(&mut self, event: ProgressEvent) {
        self(event)
    }
}

/// Counts from a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractSummary {
    pub input: PathBuf,
    pub input_size: usize,
    pub occurrences: usize,
    pub segments: usize,
    pub accepted: usize,
    pub skipped: usize,
    pub accepted_bytes: usize,
    pub output: PathBuf,
}

impl ExtractSummary {
    fn new(options: &ExtractOptions, plan: &ExtractionPlan) -> Self {
        Self {
            input: options.input.clone(),
            input_size: plan.input_size(),
            occurrences: plan.occurrences(),
            segments: plan.entries().len(),
            accepted: plan.accepted_count(),
            skipped: plan.skipped_count(),
            accepted_bytes: plan.accepted_bytes(),
            output: options.output.clone(),
        }
    }
}

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// The marker never occurs; no archive was created.
    NoMarkersFound { input_size: usize },
    /// Dry run; no archive was created.
    DryRun(ExtractSummary),
    /// Archive written.
    Written(ExtractSummary),
}

/// Run a full extraction.
///
/// Input and output failures abort the run. Fragments without the marker are
/// reported and skipped; they never fail the run.
pub fn run(options: &ExtractOptions, reporter: &mut dyn Reporter) -> Result<ExtractOutcome> {
    let marker_hex = hex::encode_upper(options.marker);

    reporter.report(ProgressEvent::ReadingInput {
        path: options.input.clone(),
    });
    let buffer = read_input(&options.input)?;
    reporter.report(ProgressEvent::InputLoaded { size: buffer.len() });

    reporter.report(ProgressEvent::Scanning);
    let plan = ExtractionPlan::build(&buffer, options.marker);

    if plan.is_empty() {
        tracing::info!(input = %options.input.display(), "no marker occurrences");
        reporter.report(ProgressEvent::NoMarkers { marker: marker_hex });
        return Ok(ExtractOutcome::NoMarkersFound {
            input_size: buffer.len(),
        });
    }

    reporter.report(ProgressEvent::MarkersFound {
        occurrences: plan.occurrences(),
    });
    reporter.report(ProgressEvent::SegmentsFound {
        count: plan.entries().len(),
    });

    let summary = ExtractSummary::new(options, &plan);

    if options.dry_run {
        for entry in plan.entries() {
            match entry.disposition {
                Disposition::Accepted => reporter.report(ProgressEvent::EntryPlanned {
                    name: entry.name.clone(),
                    len: entry.fragment.len(),
                }),
                Disposition::Skipped(reason) => reporter.report(skipped_event(
                    entry.fragment.index,
                    entry.fragment.len(),
                    &marker_hex,
                    reason,
                )),
            }
        }
        reporter.report(ProgressEvent::Finished {
            added: summary.accepted,
            skipped: summary.skipped,
        });
        return Ok(ExtractOutcome::DryRun(summary));
    }

    reporter.report(ProgressEvent::CreatingArchive {
        path: options.output.clone(),
    });
    let mut jar = JarWriter::create(&options.output, &options.manifest, options.compression)?;

    let mut added = 0;
    let mut skipped = 0;
    for entry in plan.entries() {
        match entry.disposition {
            Disposition::Accepted => {
                jar.add_entry(&entry.name, entry.data())?;
                added += 1;
                reporter.report(ProgressEvent::EntryAdded {
                    name: entry.name.clone(),
                    len: entry.fragment.len(),
                });
            }
            Disposition::Skipped(reason) => {
                skipped += 1;
                tracing::debug!(
                    index = entry.fragment.index,
                    len = entry.fragment.len(),
                    "skipping segment: {}",
                    reason
                );
                reporter.report(skipped_event(
                    entry.fragment.index,
                    entry.fragment.len(),
                    &marker_hex,
                    reason,
                ));
            }
        }
    }
    reporter.report(ProgressEvent::Finished { added, skipped });

    let path = jar.finish()?;
    tracing::info!(
        output = %path.display(),
        added,
        skipped,
        "archive written"
    );
    reporter.report(ProgressEvent::ArchiveCreated { path });

    Ok(ExtractOutcome::Written(summary))
}

fn skipped_event(index: usize, len: usize, marker: &str, reason: SkipReason) -> ProgressEvent {
    ProgressEvent::EntrySkipped {
        index,
        len,
        marker: marker.to_string(),
        reason,
    }
}
