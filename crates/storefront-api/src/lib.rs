// storefront-api: Async Rust client for the storefront REST backend.
//
// Two surfaces share one `reqwest::Client`: the resource API under
// `rest/v1/` (categories, products, favourites, profiles) and the password grant
// under `auth/v1/`. Both are keyed by the project `apikey` header.

pub mod auth;
pub mod error;
pub mod rest;
pub mod transport;

pub use auth::AuthSession;
pub use error::Error;
pub use rest::RestClient;
pub use rest::models::{
    CategoryDto, FavouriteDto, ProductDto, ProfileDto, ProfileInsertDto, ProfileUpdateDto,
};
pub use transport::{TlsMode, TransportConfig};
