//! Extraction planning
//!
//! Turns a loaded buffer into a list of archive entries. Every carved
//! fragment gets a name derived from its 1-based segment index; fragments
//! that do not begin with the marker are kept in the plan as skipped so they
//! can be reported, and their index is never reused.

mod console;
mod report;
mod run;

pub use console::ConsoleReporter;
pub use report::{FragmentReport, ScanReport};
pub use run::{run, ExtractOptions, ExtractOutcome, ExtractSummary, ProgressEvent, Reporter};

use std::path::Path;

use classcarve_scan::{carve, find_marker_offsets, Fragment};

use crate::error::{ExtractError, Result};

/// Number of leading bytes shown in hex previews.
const PREVIEW_BYTES: usize = 8;

/// Archive entry name for the fragment at `index` (1-based).
pub fn entry_name(index: usize) -> String {
    format!("ExtractedClass_{}.class", index)
}

/// Read the whole input file into memory.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| ExtractError::input_read(path, e))
}

/// Why a fragment was left out of the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The fragment does not begin with the marker bytes.
    MissingMarker,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingMarker => write!(f, "does not start with the marker"),
        }
    }
}

/// Whether a planned entry ends up in the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Accepted,
    Skipped(SkipReason),
}

/// A carved fragment together with its archive name.
#[derive(Debug, Clone)]
pub struct PlannedEntry {
    pub name: String,
    pub fragment: Fragment,
    pub disposition: Disposition,
}

impl PlannedEntry {
    pub fn is_accepted(&self) -> bool {
        self.disposition == Disposition::Accepted
    }

    pub fn data(&self) -> &[u8] {
        &self.fragment.data
    }

    /// Uppercase hex of the first few bytes.
    pub fn preview(&self) -> String {
        hex::encode_upper(self.fragment.head(PREVIEW_BYTES))
    }
}

/// Result of scanning and segmenting one buffer.
#[derive(Debug, Clone)]
pub struct ExtractionPlan {
    input_size: usize,
    offsets: Vec<usize>,
    entries: Vec<PlannedEntry>,
}

impl ExtractionPlan {
    /// Scan `buffer` for `marker` and classify every resulting fragment.
    pub fn build(buffer: &[u8], marker: &[u8]) -> Self {
        let offsets = find_marker_offsets(buffer, marker);
        Self::from_offsets(buffer, offsets, marker)
    }

    /// Classify the fragments delimited by caller-supplied `offsets`.
    ///
    /// Offsets should be non-decreasing; empty ranges are dropped and
    /// fragments that do not begin with `marker` are planned as skipped.
    pub fn from_offsets(buffer: &[u8], offsets: Vec<usize>, marker: &[u8]) -> Self {
        let entries = carve(buffer, &offsets, marker)
            .into_iter()
            .map(|fragment| {
                let disposition = if fragment.starts_with_marker {
                    Disposition::Accepted
                } else {
                    Disposition::Skipped(SkipReason::MissingMarker)
                };

                let entry = PlannedEntry {
                    name: entry_name(fragment.index),
                    fragment,
                    disposition,
                };

                tracing::debug!(
                    index = entry.fragment.index,
                    start = entry.fragment.start,
                    end = entry.fragment.end,
                    len = entry.fragment.len(),
                    head = %entry.preview(),
                    "planned segment"
                );

                entry
            })
            .collect::<Vec<_>>();

        Self {
            input_size: buffer.len(),
            offsets,
            entries,
        }
    }

    /// Size of the scanned buffer in bytes.
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Marker offsets in the scanned buffer.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Number of marker occurrences.
    pub fn occurrences(&self) -> usize {
        self.offsets.len()
    }

    /// All planned entries, in segment order.
    pub fn entries(&self) -> &[PlannedEntry] {
        &self.entries
    }

    /// `true` when there is nothing to extract.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn accepted(&self) -> impl Iterator<Item = &PlannedEntry> {
        self.entries.iter().filter(|e| e.is_accepted())
    }

    pub fn skipped(&self) -> impl Iterator<Item = &PlannedEntry> {
        self.entries.iter().filter(|e| !e.is_accepted())
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted().count()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }

    /// Total size of accepted entries.
    pub fn accepted_bytes(&self) -> usize {
        self.accepted().map(|e| e.fragment.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classcarve_scan::CLASS_MAGIC;

    #[test]
    fn test_entry_name() {
        assert_eq!(entry_name(1), "ExtractedClass_1.class");
        assert_eq!(entry_name(42), "ExtractedClass_42.class");
    }

    #[test]
    fn test_plan_back_to_back_markers() {
        let data = [0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x01, 0xCA, 0xFE, 0xBA, 0xBE];
        let plan = ExtractionPlan::build(&data, &CLASS_MAGIC);

        assert_eq!(plan.occurrences(), 2);
        assert_eq!(plan.accepted_count(), 2);
        assert_eq!(plan.skipped_count(), 0);

        let entries = plan.entries();
        assert_eq!(entries[0].name, "ExtractedClass_1.class");
        assert_eq!(entries[0].data().len(), 6);
        assert_eq!(entries[1].name, "ExtractedClass_2.class");
        assert_eq!(entries[1].data().len(), 4);
        assert_eq!(plan.accepted_bytes(), 10);
    }

    #[test]
    fn test_plan_without_markers() {
        let plan = ExtractionPlan::build(b"nothing to see here", &CLASS_MAGIC);
        assert!(plan.is_empty());
        assert_eq!(plan.occurrences(), 0);
        assert_eq!(plan.input_size(), 19);
    }

    #[test]
    fn test_names_follow_segment_order() {
        let data = [0xCA, 0xFE, 0x00, 0xCA, 0xFE, 0x01, 0xCA, 0xFE];
        let plan = ExtractionPlan::build(&data, &[0xCA, 0xFE]);

        let names: Vec<_> = plan.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "ExtractedClass_1.class",
                "ExtractedClass_2.class",
                "ExtractedClass_3.class"
            ]
        );
        assert!(plan.entries().iter().all(|e| e.is_accepted()));
    }

    #[test]
    fn test_skipped_fragment_keeps_its_index() {
        let data = [0x00, 0x01, 0xCA, 0xFE, 0xBA, 0xBE, 0x10, 0x11];
        let plan = ExtractionPlan::from_offsets(&data, vec![0, 2], &CLASS_MAGIC);

        assert_eq!(plan.accepted_count(), 1);
        assert_eq!(plan.skipped_count(), 1);

        let skipped = plan.skipped().next().unwrap();
        assert_eq!(skipped.name, "ExtractedClass_1.class");
        assert_eq!(
            skipped.disposition,
            Disposition::Skipped(SkipReason::MissingMarker)
        );

        // Not renumbered after the skip
        let accepted = plan.accepted().next().unwrap();
        assert_eq!(accepted.name, "ExtractedClass_2.class");
        assert_eq!(accepted.data().len(), 6);
    }

    #[test]
    fn test_repeated_offsets_do_not_consume_indices() {
        let data = [0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0xCA, 0xFE, 0xBA, 0xBE];
        let plan = ExtractionPlan::from_offsets(&data, vec![0, 5, 5], &CLASS_MAGIC);

        assert_eq!(plan.entries().len(), 2);
        assert_eq!(plan.entries()[1].name, "ExtractedClass_2.class");
        assert_eq!(plan.entries()[1].fragment.range(), 5..9);
    }

    #[test]
    fn test_preview_is_uppercase_hex() {
        let mut data = CLASS_MAGIC.to_vec();
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x41, 0x12, 0x34]);
        let plan = ExtractionPlan::build(&data, &CLASS_MAGIC);

        assert_eq!(plan.entries()[0].preview(), "CAFEBABE00000041");
    }

    #[test]
    fn test_read_missing_input() {
        let result = read_input(Path::new("/nonexistent/dump.bin"));
        assert!(matches!(result, Err(ExtractError::InputRead { .. })));
    }
}
