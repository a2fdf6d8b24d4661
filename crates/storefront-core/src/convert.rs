// ── API-to-domain type conversions ──
//
// Bridges raw `storefront_api` wire types into `storefront_core::model`
// types. Nullable columns fall back to empty values; the core treats a
// product without a category like any other product.

use storefront_api::{CategoryDto, ProductDto, ProfileDto, ProfileUpdateDto};

use crate::model::{Category, CategoryId, Product, ProductId, ProfileUpdate, UserId, UserProfile};

impl From<CategoryDto> for Category {
    fn from(dto: CategoryDto) -> Self {
        Self {
            id: CategoryId::from(dto.id),
            title: dto.title,
        }
    }
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Self {
            id: ProductId::from(dto.id),
            title: dto.title,
            cost: dto.cost,
            category_id: CategoryId::from(dto.category_id.unwrap_or_default()),
            is_best_seller: dto.is_best_seller,
            description: dto.description.unwrap_or_default(),
        }
    }
}

impl From<ProfileDto> for UserProfile {
    fn from(dto: ProfileDto) -> Self {
        Self {
            user_id: UserId::from(dto.user_id),
            photo: dto.photo,
            firstname: dto.firstname,
            lastname: dto.lastname,
            address: dto.address,
            phone: dto.phone,
        }
    }
}

impl From<&ProfileUpdate> for ProfileUpdateDto {
    fn from(update: &ProfileUpdate) -> Self {
        Self {
            firstname: update.firstname.clone(),
            lastname: update.lastname.clone(),
            address: update.address.clone(),
            phone: update.phone.clone(),
            ..Self::default()
        }
    }
}
