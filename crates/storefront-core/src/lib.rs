// storefront-core: Catalog and favourites state synchronization between
// storefront-api and view surfaces, plus profile editing.

pub mod catalog;
pub mod config;
pub mod convert;
pub mod error;
pub mod favorites;
pub mod gateway;
pub mod intent;
pub mod model;
pub mod profile;
pub mod selection;
pub mod session;
pub mod store;
pub mod stream;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::Catalog;
pub use config::CatalogConfig;
pub use error::CoreError;
pub use favorites::{ToggleOutcome, UndoToken};
pub use gateway::{CatalogGateway, FavoritesGateway, ProfileGateway, RestGateway};
pub use intent::Intent;
pub use profile::ProfileService;
pub use session::Session;
pub use store::{CatalogState, SelectionState};
pub use stream::StateStream;
pub use view::{CatalogView, CategoryChip, ImageRef, ProductCard, ProductDetail};

pub use model::{
    ALL_CATEGORY_ID, Category, CategoryId, LoadState, Product, ProductId, ProfileUpdate, UserId,
    UserProfile,
};

/// A catalog talking to the REST backend for both gateways.
pub type RestCatalog = Catalog<RestGateway, RestGateway>;
