// Favourite endpoints: the `favourite` (product_id, user_id) link table.

use tracing::debug;

use super::models::FavouriteDto;
use super::{RestClient, eq_filter};
use crate::error::Error;

const FAVOURITE: &str = "rest/v1/favourite";

impl RestClient {
    /// List the favourite rows of one user.
    ///
    /// `GET rest/v1/favourite?select=product_id&user_id=eq.<uid>`
    pub async fn list_favourites(&self, user_id: &str) -> Result<Vec<FavouriteDto>, Error> {
        debug!(user_id, "listing favourites");
        self.get(
            FAVOURITE,
            &[("select", "product_id".into()), ("user_id", eq_filter(user_id))],
        )
        .await
    }

    /// Product ids the user marked as favourite. Rows with a null
    /// `product_id` are skipped.
    pub async fn list_favourite_product_ids(&self, user_id: &str) -> Result<Vec<String>, Error> {
        let rows = self.list_favourites(user_id).await?;
        Ok(rows.into_iter().filter_map(|row| row.product_id).collect())
    }

    /// Insert a favourite row.
    ///
    /// `POST rest/v1/favourite` with `{product_id, user_id}`
    pub async fn add_favourite(&self, user_id: &str, product_id: &str) -> Result<(), Error> {
        debug!(user_id, product_id, "adding favourite");
        let body = FavouriteDto {
            product_id: Some(product_id.to_owned()),
            user_id: Some(user_id.to_owned()),
        };
        self.post_no_response(FAVOURITE, &body).await
    }

    /// Delete a favourite row.
    ///
    /// `DELETE rest/v1/favourite?product_id=eq.<pid>&user_id=eq.<uid>`
    pub async fn remove_favourite(&self, user_id: &str, product_id: &str) -> Result<(), Error> {
        debug!(user_id, product_id, "removing favourite");
        self.delete_with_params(
            FAVOURITE,
            &[
                ("product_id", eq_filter(product_id)),
                ("user_id", eq_filter(user_id)),
            ],
        )
        .await
    }
}
