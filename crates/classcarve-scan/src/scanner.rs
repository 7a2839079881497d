//! Marker scanning over raw byte buffers

/// Find every offset at which `marker` occurs in `buffer`.
///
/// Overlapping occurrences are reported: after a match at `i` the search
/// resumes at `i + 1`, not `i + marker.len()`. The result is strictly
/// increasing.
///
/// An empty marker yields an empty result rather than matching everywhere.
pub fn find_marker_offsets(buffer: &[u8], marker: &[u8]) -> Vec<usize> {
    if marker.is_empty() || buffer.len() < marker.len() {
        return Vec::new();
    }

    buffer
        .windows(marker.len())
        .enumerate()
        .filter(|(_, window)| *window == marker)
        .map(|(offset, _)| offset)
        .collect()
}

/// Count occurrences of `marker` in `buffer` without collecting offsets.
pub fn count_marker_occurrences(buffer: &[u8], marker: &[u8]) -> usize {
    if marker.is_empty() || buffer.len() < marker.len() {
        return 0;
    }

    buffer
        .windows(marker.len())
        .filter(|window| *window == marker)
        .count()
}

/// Check whether `data` begins with `marker`.
///
/// Returns `false` for an empty marker.
pub fn starts_with_marker(data: &[u8], marker: &[u8]) -> bool {
    !marker.is_empty() && data.starts_with(marker)
}
