//! Two-section refinement output parsing.
//!
//! Grammar:
//!
//! ```text
//! output   := [prefix] "ANALYSIS:" analysis IMPROVED response
//! IMPROVED := "IMPROVED RESPONSE:" | "OPTIMIZED RESPONSE:"
//! ```
//!
//! Anything that does not contain both an analysis marker and an
//! improved-response marker is taken whole as the refined response, paired
//! with [`FALLBACK_ANALYSIS`]. A refiner that ignores the format still moves
//! the chain forward instead of failing it.

use serde::{Deserialize, Serialize};

/// Label opening the analysis section
pub const ANALYSIS_MARKER: &str = "ANALYSIS:";

/// Label opening the improved answer in chain refinement prompts
pub const IMPROVED_MARKER: &str = "IMPROVED RESPONSE:";

/// Label opening the improved answer in two-provider refinement prompts
pub const OPTIMIZED_MARKER: &str = "OPTIMIZED RESPONSE:";

/// Analysis reported when the refiner's output has no recognizable sections
pub const FALLBACK_ANALYSIS: &str =
    "Response analyzed and improved based on identified gaps and errors.";

/// Typed view of one refiner's output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinementOutput {
    pub analysis: String,
    pub response: String,
    /// True when the markers were missing and the fallback applied
    pub used_fallback: bool,
}

/// Split a refiner's output into analysis and improved response.
///
/// With both markers present the text is split at the first improved-response
/// marker: the analysis is what precedes it (every analysis label removed,
/// trimmed) and the response is what follows it (trimmed). Otherwise the raw
/// output is returned untouched as the response, with [`FALLBACK_ANALYSIS`].
///
/// A second improved-response marker does not cut the response short:
/// everything after the first marker, later markers included, is kept.
pub fn parse_refinement_output(raw: &str) -> RefinementOutput {
    let improved = [IMPROVED_MARKER, OPTIMIZED_MARKER]
        .iter()
        .filter_map(|marker| raw.find(marker).map(|idx| (idx, marker.len())))
        .min_by_key(|(idx, _)| *idx);

    match improved {
        Some((idx, marker_len)) if raw.contains(ANALYSIS_MARKER) => {
            let analysis = raw[..idx].replace(ANALYSIS_MARKER, "");
            RefinementOutput {
                analysis: analysis.trim().to_string(),
                response: raw[idx + marker_len..].trim().to_string(),
                used_fallback: false,
            }
        }
        _ => RefinementOutput {
            analysis: FALLBACK_ANALYSIS.to_string(),
            response: raw.to_string(),
            used_fallback: true,
        },
    }
}
