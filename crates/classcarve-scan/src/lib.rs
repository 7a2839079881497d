//! # classcarve-scan
//!
//! Marker scanning and segmentation for carving compiled class files out of
//! arbitrary binary data.
//!
//! The crate is pure: it never touches the filesystem and operates only on
//! byte slices handed to it by the caller.
//!
//! ## Pipeline
//!
//! 1. [`find_marker_offsets`] locates every occurrence of the marker,
//!    overlapping occurrences included.
//! 2. [`segment_ranges`] turns the offsets into contiguous `[start, end)`
//!    ranges, each running up to the next occurrence or the end of the buffer.
//! 3. [`carve`] copies those ranges into owned [`Fragment`]s.
//!
//! ## Example
//!
//! ```
//! use classcarve_scan::{extract_fragments, CLASS_MAGIC};
//!
//! let data = [0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x01, 0xCA, 0xFE, 0xBA, 0xBE];
//! let fragments = extract_fragments(&data, &CLASS_MAGIC);
//!
//! assert_eq!(fragments.len(), 2);
//! assert_eq!(fragments[0].len(), 6);
//! assert_eq!(fragments[1].len(), 4);
//! assert!(fragments.iter().all(|f| f.starts_with_marker));
//! ```

pub mod scanner;
pub mod segmenter;
pub mod types;

pub use scanner::{count_marker_occurrences, find_marker_offsets, starts_with_marker};
pub use segmenter::{carve, segment_ranges};
pub use types::Fragment;

/// Leading bytes of every compiled JVM class file.
pub const CLASS_MAGIC: [u8; 4] = [0xCA, 0xFE, 0xBA, 0xBE];

/// Scan `buffer` for `marker` and carve the resulting fragments.
///
/// Returns an empty vector when the marker never occurs (or is empty).
pub fn extract_fragments(buffer: &[u8], marker: &[u8]) -> Vec<Fragment> {
    let offsets = find_marker_offsets(buffer, marker);
    if offsets.is_empty() {
        return Vec::new();
    }

    tracing::debug!(
        occurrences = offsets.len(),
        buffer_len = buffer.len(),
        "marker scan complete"
    );

    carve(buffer, &offsets, marker)
}
