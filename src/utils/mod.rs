//! Utility modules

pub mod fuzzy;

pub use fuzzy::{find_best_match, find_matches, similarity, FuzzyMatch};

/// Truncate to at most `max` characters, appending "..." when cut
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
