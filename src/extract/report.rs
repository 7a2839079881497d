//! Machine-readable scan report

use serde::Serialize;

use super::ExtractionPlan;

/// Summary of a scan, suitable for `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub input: String,
    pub input_size: usize,
    /// Marker bytes as uppercase hex
    pub marker: String,
    pub offsets: Vec<usize>,
    pub accepted: usize,
    pub skipped: usize,
    pub fragments: Vec<FragmentReport>,
}

/// One planned archive entry.
#[derive(Debug, Clone, Serialize)]
pub struct FragmentReport {
    pub index: usize,
    pub name: String,
    pub start: usize,
    pub end: usize,
    pub len: usize,
    pub accepted: bool,
    /// First bytes of the fragment as uppercase hex
    pub head: String,
}

impl ScanReport {
    pub fn from_plan(input: impl Into<String>, marker: &[u8], plan: &ExtractionPlan) -> Self {
        let fragments = plan
            .entries()
            .iter()
            .map(|entry| FragmentReport {
                index: entry.fragment.index,
                name: entry.name.clone(),
                start: entry.fragment.start,
                end: entry.fragment.end,
                len: entry.fragment.len(),
                accepted: entry.is_accepted(),
                head: entry.preview(),
            })
            .collect();

        Self {
            input: input.into(),
            input_size: plan.input_size(),
            marker: hex::encode_upper(marker),
            offsets: plan.offsets().to_vec(),
            accepted: plan.accepted_count(),
            skipped: plan.skipped_count(),
            fragments,
        }
    }
}
