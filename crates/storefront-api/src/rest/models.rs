// Wire models for the resource API.
//
// Field names follow the backend's snake_case column names. Nullable
// columns are `Option` here; `storefront-core` decides the defaults.

use serde::{Deserialize, Serialize};

/// A row of the `categories` table (`select=id,title`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: String,
    pub title: String,
}

/// A row of the `products` table (`select=*`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: String,
    pub title: String,
    pub cost: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A row of the `favourite` link table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FavouriteDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// A row of the `profiles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDto {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Columns to change on an existing profile. Absent fields are left as is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileUpdateDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A new `profiles` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInsertDto {
    pub user_id: String,
    #[serde(flatten)]
    pub fields: ProfileUpdateDto,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_tolerates_missing_optional_columns() {
        let p: ProductDto = serde_json::from_value(json!({
            "id": "p1",
            "title": "Nike Air Max",
            "cost": 752
        }))
        .unwrap();
        assert!(!p.is_best_seller);
        assert!(p.category_id.is_none());
        assert!(p.description.is_none());
    }

    #[test]
    fn favourite_serializes_only_present_fields() {
        let dto = FavouriteDto {
            product_id: Some("p1".into()),
            user_id: Some("u1".into()),
        };
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            json!({ "product_id": "p1", "user_id": "u1" })
        );

        let empty = FavouriteDto::default();
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({}));
    }

    #[test]
    fn profile_insert_flattens_present_fields() {
        let dto = ProfileInsertDto {
            user_id: "u1".into(),
            fields: ProfileUpdateDto {
                firstname: Some("Anna".into()),
                ..ProfileUpdateDto::default()
            },
        };
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            json!({ "user_id": "u1", "firstname": "Anna" })
        );
    }
}
