// ── Derived view models ──
//
// Pure projections from catalog state to what a surface renders. They
// never mutate their inputs and keep source order.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::CatalogConfig;
use crate::model::{Category, CategoryId, LoadState, Product, ProductId};
use crate::store::CatalogState;

/// Reference to a product image in object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    pub bucket: String,
    pub path: String,
}

impl ImageRef {
    pub fn for_product(bucket: &str, product_id: &ProductId) -> Self {
        Self {
            bucket: bucket.to_owned(),
            path: format!("{product_id}.png"),
        }
    }

    /// Path of the public object, relative to the backend base URL.
    pub fn public_path(&self) -> String {
        format!("storage/v1/object/public/{}/{}", self.bucket, self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub id: ProductId,
    pub title: String,
    pub price: String,
    pub is_favorite: bool,
    pub is_best_seller: bool,
    pub image: ImageRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryChip {
    pub id: CategoryId,
    pub title: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub card: ProductCard,
    pub category_id: CategoryId,
    pub description: String,
}

/// Everything a catalog screen shows, projected from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogView {
    pub categories: Vec<CategoryChip>,
    pub products: Vec<ProductCard>,
    pub favorites: Vec<ProductCard>,
    pub catalog_status: LoadState,
    pub favorites_status: LoadState,
}

impl CatalogView {
    pub fn project(state: &CatalogState, config: &CatalogConfig) -> Self {
        Self {
            categories: category_chips(&state.categories, state.selected_index()),
            products: product_cards(&state.products, &state.favorite_ids, config),
            favorites: product_cards(&state.favorite_products, &state.favorite_ids, config),
            catalog_status: state.catalog_status.clone(),
            favorites_status: state.favorites_status.clone(),
        }
    }
}

pub fn format_price(cost: i64, currency_symbol: &str) -> String {
    format!("{currency_symbol}{cost}")
}

fn card(product: &Product, favorite_ids: &BTreeSet<ProductId>, config: &CatalogConfig) -> ProductCard {
    ProductCard {
        id: product.id.clone(),
        title: product.title.clone(),
        price: format_price(product.cost, &config.currency_symbol),
        is_favorite: favorite_ids.contains(&product.id),
        is_best_seller: product.is_best_seller,
        image: ImageRef::for_product(&config.image_bucket, &product.id),
    }
}

pub fn product_cards(
    products: &[Product],
    favorite_ids: &BTreeSet<ProductId>,
    config: &CatalogConfig,
) -> Vec<ProductCard> {
    products
        .iter()
        .map(|p| card(p, favorite_ids, config))
        .collect()
}

pub fn category_chips(categories: &[Category], selected_index: usize) -> Vec<CategoryChip> {
    categories
        .iter()
        .enumerate()
        .map(|(i, c)| CategoryChip {
            id: c.id.clone(),
            title: c.title.clone(),
            selected: i == selected_index,
        })
        .collect()
}

/// Detail view for `product_id`, looked up in the catalog page first and
/// then among favourite products.
pub fn product_detail(
    product_id: &ProductId,
    products: &[Product],
    favorite_products: &[Product],
    favorite_ids: &BTreeSet<ProductId>,
    config: &CatalogConfig,
) -> Option<ProductDetail> {
    let product = products
        .iter()
        .chain(favorite_products)
        .find(|p| &p.id == product_id)?;
    Some(ProductDetail {
        card: card(product, favorite_ids, config),
        category_id: product.category_id.clone(),
        description: product.description.clone(),
    })
}
