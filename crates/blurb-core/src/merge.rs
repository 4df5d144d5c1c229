//! Pairs completions back with the identifiers they were requested for.

/// One identifier with the completion generated for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedCompletion {
    pub identifier: String,
    pub text: String,
}

/// Pair identifiers and completions by position.
///
/// Both lists are in record order. When their lengths differ the extra
/// entries of the longer list are dropped and a warning is logged; the
/// pairing itself is never re-aligned.
pub fn merge(ids: Vec<String>, completions: Vec<String>) -> Vec<MergedCompletion> {
    if ids.len() != completions.len() {
        tracing::warn!(
            "Got {} completion(s) for {} record(s); unmatched entries are dropped",
            completions.len(),
            ids.len()
        );
    }

    ids.into_iter()
        .zip(completions)
        .map(|(identifier, text)| MergedCompletion { identifier, text })
        .collect()
}
