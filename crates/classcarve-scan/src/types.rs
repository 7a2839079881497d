//! Types produced by the segmenter

use std::ops::Range;

/// An owned copy of one carved region of the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// 1-based position among all fragments produced from the buffer.
    pub index: usize,
    /// Offset of the first byte in the source buffer.
    pub start: usize,
    /// Offset one past the last byte in the source buffer.
    pub end: usize,
    /// Whether the copied bytes begin with the marker.
    pub starts_with_marker: bool,
    /// Copied bytes, `end - start` long.
    pub data: Vec<u8>,
}

impl Fragment {
    /// Length of the fragment in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false` for fragments produced by [`crate::carve`].
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Source range this fragment was copied from.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// First `n` bytes of the fragment (fewer if it is shorter).
    pub fn head(&self, n: usize) -> &[u8] {
        &self.data[..n.min(self.data.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_is_clamped() {
        let fragment = Fragment {
            index: 1,
            start: 10,
            end: 13,
            starts_with_marker: false,
            data: vec![1, 2, 3],
        };

        assert_eq!(fragment.head(2), &[1, 2]);
        assert_eq!(fragment.head(16), &[1, 2, 3]);
        assert_eq!(fragment.range(), 10..13);
        assert_eq!(fragment.len(), 3);
    }
}
