use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, ProductId};

/// A product as cached by the core. Owned by the backend; never edited
/// locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Price in whole currency units.
    pub cost: i64,
    pub category_id: CategoryId,
    pub is_best_seller: bool,
    pub description: String,
}
