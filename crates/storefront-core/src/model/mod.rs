// ── Domain model ──
//
// Canonical types the synchronization core works with. Wire types from
// `storefront-api` are converted in `crate::convert`.

pub mod category;
pub mod ids;
pub mod load_state;
pub mod product;
pub mod profile;

pub use category::{ALL_CATEGORY_ID, Category};
pub use ids::{CategoryId, ProductId, UserId};
pub use load_state::LoadState;
pub use product::Product;
pub use profile::{ProfileUpdate, UserProfile};
