// ── Category selection resolution ──
//
// Pure functions deciding which category index a title refers to.

use crate::model::Category;

/// Index of the first category whose title matches `title`
/// case-insensitively. Blank titles never match.
pub fn find_index_by_title(categories: &[Category], title: &str) -> Option<usize> {
    if title.trim().is_empty() {
        return None;
    }
    categories.iter().position(|c| c.title_matches(title))
}

/// Selection after the first category load.
///
/// Precedence: the pending requested title, then the configured fallback
/// title, then index 0 ("All").
pub fn resolve_initial_index(
    categories: &[Category],
    pending_title: Option<&str>,
    fallback_title: Option<&str>,
) -> usize {
    pending_title
        .and_then(|t| find_index_by_title(categories, t))
        .or_else(|| fallback_title.and_then(|t| find_index_by_title(categories, t)))
        .unwrap_or(0)
}

/// Selection for a title requested once categories are loaded. Unmatched
/// titles select "All".
pub fn resolve_requested_index(categories: &[Category], title: &str) -> usize {
    find_index_by_title(categories, title).unwrap_or(0)
}
