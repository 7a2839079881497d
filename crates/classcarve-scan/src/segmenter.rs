//! Splitting a buffer into fragments at marker offsets

use std::ops::Range;

use crate::scanner::starts_with_marker;
use crate::types::Fragment;

/// Convert marker offsets into contiguous byte ranges.
///
/// Range `i` runs from `offsets[i]` to `offsets[i + 1]`, or to `buffer_len`
/// for the last offset. Ends are clamped to `buffer_len`, and any range with
/// `start >= end` is dropped without error, which covers repeated offsets and
/// offsets at or past the end of the buffer.
pub fn segment_ranges(offsets: &[usize], buffer_len: usize) -> Vec<Range<usize>> {
    let mut ranges = Vec::with_capacity(offsets.len());

    for (i, &start) in offsets.iter().enumerate() {
        let end = offsets
            .get(i + 1)
            .copied()
            .unwrap_or(buffer_len)
            .min(buffer_len);

        if start < end {
            ranges.push(start..end);
        } else {
            tracing::trace!(start, end, "dropping empty segment");
        }
    }

    ranges
}

/// Copy the ranges described by `offsets` out of `buffer`.
///
/// Fragments are numbered from 1 in the order they are produced, so dropped
/// empty ranges do not leave gaps in the numbering.
pub fn carve(buffer: &[u8], offsets: &[usize], marker: &[u8]) -> Vec<Fragment> {
    segment_ranges(offsets, buffer.len())
        .into_iter()
        .enumerate()
        .map(|(i, range)| {
            let data = buffer[range.clone()].to_vec();
            let starts_with_marker = starts_with_marker(&data, marker);

            tracing::trace!(
                index = i + 1,
                start = range.start,
                end = range.end,
                len = data.len(),
                "carved segment"
            );

            Fragment {
                index: i + 1,
                start: range.start,
                end: range.end,
                starts_with_marker,
                data,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CLASS_MAGIC;

    #[test]
    fn test_empty_offsets() {
        assert!(segment_ranges(&[], 100).is_empty());
        assert!(carve(&[0u8; 16], &[], &CLASS_MAGIC).is_empty());
    }

    #[test]
    fn test_single_offset_runs_to_end() {
        assert_eq!(segment_ranges(&[3], 10), vec![3..10]);
    }

    #[test]
    fn test_consecutive_ranges() {
        assert_eq!(segment_ranges(&[0, 4, 9], 12), vec![0..4, 4..9, 9..12]);
    }

    #[test]
    fn test_repeated_offset_is_dropped() {
        assert_eq!(segment_ranges(&[0, 4, 4, 8], 10), vec![0..4, 4..8, 8..10]);
    }

    #[test]
    fn test_offset_at_buffer_end_is_dropped() {
        assert_eq!(segment_ranges(&[2, 6], 6), vec![2..6]);
    }

    #[test]
    fn test_offset_past_buffer_end_is_clamped() {
        assert_eq!(segment_ranges(&[2, 20], 6), vec![2..6]);
        assert!(carve(&[0u8; 6], &[8], &CLASS_MAGIC).is_empty());
    }

    #[test]
    fn test_carve_numbers_without_gaps() {
        let mut data = CLASS_MAGIC.to_vec();
        data.extend_from_slice(&[0x00, 0x01]);
        data.extend_from_slice(&CLASS_MAGIC);

        let fragments = carve(&data, &[0, 0, 6], &CLASS_MAGIC);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].index, 1);
        assert_eq!(fragments[0].range(), 0..6);
        assert_eq!(fragments[1].index, 2);
        assert_eq!(fragments[1].range(), 6..10);
    }

    #[test]
    fn test_carve_tags_fragments_without_marker() {
        let data = [0x00, 0x01, 0xCA, 0xFE, 0xBA, 0xBE, 0x10];

        let fragments = carve(&data, &[0, 2], &CLASS_MAGIC);
        assert_eq!(fragments.len(), 2);
        assert!(!fragments[0].starts_with_marker);
        assert_eq!(fragments[0].data, vec![0x00, 0x01]);
        assert!(fragments[1].starts_with_marker);
        assert_eq!(fragments[1].len(), 5);
    }
}
