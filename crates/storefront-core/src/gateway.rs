// ── Remote gateways ──
//
// The core talks to the backend only through these traits.
// `RestGateway` implements all of them on top of `storefront_api::RestClient`;
// tests substitute in-memory fakes.

use std::future::Future;

use secrecy::SecretString;
use storefront_api::{ProfileInsertDto, ProfileUpdateDto, RestClient, TransportConfig};

use crate::error::CoreError;
use crate::model::{
    Category, CategoryId, Product, ProductId, ProfileUpdate, UserId, UserProfile,
};
use crate::session::Session;

/// Read access to categories and products.
pub trait CatalogGateway: Send + Sync + 'static {
    /// Every category, without the synthetic "All" entry.
    fn fetch_categories(&self) -> impl Future<Output = Result<Vec<Category>, CoreError>> + Send;

    /// Products of one category, or of the whole catalog for `None`.
    fn fetch_products(
        &self,
        category_id: Option<&CategoryId>,
    ) -> impl Future<Output = Result<Vec<Product>, CoreError>> + Send;

    /// The products with exactly these ids, in one request.
    fn fetch_products_by_ids(
        &self,
        ids: &[ProductId],
    ) -> impl Future<Output = Result<Vec<Product>, CoreError>> + Send;
}

/// Read/write access to a user's favourite set.
pub trait FavoritesGateway: Send + Sync + 'static {
    fn fetch_favorite_ids(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<ProductId>, CoreError>> + Send;

    fn add_favorite(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn remove_favorite(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Read/write access to the profile row of a user.
pub trait ProfileGateway: Send + Sync + 'static {
    /// `None` when the user has no profile row yet.
    fn fetch_profile(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Option<UserProfile>, CoreError>> + Send;

    /// Patch an existing row; `None` when there was no row to patch.
    fn update_profile(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<Option<UserProfile>, CoreError>> + Send;

    fn create_profile(
        &self,
        user_id: &UserId,
        fields: &ProfileUpdate,
    ) -> impl Future<Output = Result<UserProfile, CoreError>> + Send;
}

// ── REST implementation ──────────────────────────────────────────────

/// Every gateway backed by the storefront REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct RestGateway {
    client: RestClient,
}

impl RestGateway {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// Build a client for `base_url`, authorised as the session's user
    /// when it carries an access token.
    pub fn connect(
        base_url: &str,
        api_key: &SecretString,
        session: &Session,
        transport: &TransportConfig,
    ) -> Result<Self, CoreError> {
        let client =
            RestClient::from_api_key(base_url, api_key, session.access_token(), transport)?;
        Ok(Self { client })
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }
}

impl CatalogGateway for RestGateway {
    async fn fetch_categories(&self) -> Result<Vec<Category>, CoreError> {
        let rows = self.client.list_categories().await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn fetch_products(
        &self,
        category_id: Option<&CategoryId>,
    ) -> Result<Vec<Product>, CoreError> {
        let rows = self
            .client
            .list_products(category_id.map(CategoryId::as_str))
            .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn fetch_products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, CoreError> {
        let rows = self.client.list_products_by_ids(ids).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }
}

impl FavoritesGateway for RestGateway {
    async fn fetch_favorite_ids(&self, user_id: &UserId) -> Result<Vec<ProductId>, CoreError> {
        let ids = self
            .client
            .list_favourite_product_ids(user_id.as_str())
            .await?;
        Ok(ids.into_iter().map(ProductId::from).collect())
    }

    async fn add_favorite(&self, user_id: &UserId, product_id: &ProductId) -> Result<(), CoreError> {
        self.client
            .add_favourite(user_id.as_str(), product_id.as_str())
            .await?;
        Ok(())
    }

    async fn remove_favorite(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<(), CoreError> {
        self.client
            .remove_favourite(user_id.as_str(), product_id.as_str())
            .await?;
        Ok(())
    }
}

impl ProfileGateway for RestGateway {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, CoreError> {
        let row = self.client.get_profile(user_id.as_str()).await?;
        Ok(row.map(UserProfile::from))
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<UserProfile>, CoreError> {
        let row = self
            .client
            .update_profile(user_id.as_str(), &ProfileUpdateDto::from(update))
            .await?;
        Ok(row.map(UserProfile::from))
    }

    async fn create_profile(
        &self,
        user_id: &UserId,
        fields: &ProfileUpdate,
    ) -> Result<UserProfile, CoreError> {
        let row = ProfileInsertDto {
            user_id: user_id.as_str().to_owned(),
            fields: ProfileUpdateDto::from(fields),
        };
        Ok(UserProfile::from(self.client.create_profile(&row).await?))
    }
}
