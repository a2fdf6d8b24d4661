// Catalog endpoints: categories and products.

use tracing::debug;

use super::models::{CategoryDto, ProductDto};
use super::{RestClient, eq_filter, in_filter};
use crate::error::Error;

const CATEGORIES: &str = "rest/v1/categories";
const PRODUCTS: &str = "rest/v1/products";

impl RestClient {
    /// List every category.
    ///
    /// `GET rest/v1/categories?select=id,title`
    pub async fn list_categories(&self) -> Result<Vec<CategoryDto>, Error> {
        debug!("listing categories");
        self.get(CATEGORIES, &[("select", "id,title".into())]).await
    }

    /// List products, optionally restricted to one category.
    ///
    /// `GET rest/v1/products?select=*[&category_id=eq.<id>]`
    pub async fn list_products(&self, category_id: Option<&str>) -> Result<Vec<ProductDto>, Error> {
        let mut params = vec![("select", "*".to_owned())];
        if let Some(id) = category_id {
            params.push(("category_id", eq_filter(id)));
        }
        debug!(?category_id, "listing products");
        self.get(PRODUCTS, &params).await
    }

    /// Fetch the products whose ids are in `ids`, in one request.
    ///
    /// `GET rest/v1/products?select=*&id=in.(<id1>,<id2>,...)`
    pub async fn list_products_by_ids<S: AsRef<str> + Sync>(
        &self,
        ids: &[S],
    ) -> Result<Vec<ProductDto>, Error> {
        debug!(count = ids.len(), "listing products by id");
        self.get(PRODUCTS, &[("select", "*".into()), ("id", in_filter(ids))])
            .await
    }
}
