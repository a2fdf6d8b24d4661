use serde::{Deserialize, Serialize};

use super::ids::CategoryId;

/// Id of the synthetic catalog-wide category.
pub const ALL_CATEGORY_ID: &str = "all";

/// A catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    /// The synthetic category that stands for the whole catalog.
    pub fn all(title: impl Into<String>) -> Self {
        Self::new(ALL_CATEGORY_ID, title)
    }

    /// `true` for the "All" pseudo-category, matched by id or by
    /// (case-insensitive) title.
    pub fn is_all(&self, all_title: &str) -> bool {
        self.id.as_str() == ALL_CATEGORY_ID || self.title_matches(all_title)
    }

    /// Case-insensitive title comparison, ignoring surrounding whitespace.
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.trim().to_lowercase() == title.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_recognized_by_id_or_title() {
        assert!(Category::all("All").is_all("All"));
        assert!(Category::new("c9", "all").is_all("All"));
        assert!(!Category::new("c1", "Outdoor").is_all("All"));
        assert!(Category::new("c0", "ВСЕ").is_all("Все"));
    }

    #[test]
    fn title_match_ignores_case_and_padding() {
        let c = Category::new("c1", "Outdoor");
        assert!(c.title_matches("outdoor"));
        assert!(c.title_matches("  OUTDOOR "));
        assert!(!c.title_matches("Outdoors"));
    }
}
