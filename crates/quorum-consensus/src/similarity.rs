// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Textual-overlap scoring between two response texts.
//!
//! Jaccard similarity over unique word tokens: a cheap, deterministic proxy
//! for "these two answers corroborate each other" that requires no semantic
//! understanding.

use std::collections::HashSet;

/// Computes a symmetric overlap score in `[0, 1]` between two texts.
///
/// Both texts are case-folded, stripped of characters outside a conservative
/// word-and-basic-punctuation set, and split on whitespace into unique token
/// sets; the score is intersection over union. Two texts with no tokens at
/// all score 0 (the union is treated as size 1, never dividing by zero).
pub fn score(a: &str, b: &str) -> f64 {
    let tokens_a = token_set(a);
    let tokens_b = token_set(b);
    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count().max(1);
    intersection as f64 / union as f64
}

/// Normalizes text into its unique token set.
fn token_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || "'.,!?-".contains(*c))
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
