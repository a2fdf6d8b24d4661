// ── Identity types ──
//
// Backend ids are opaque strings (UUIDs in practice, but the core never
// parses them). Separate newtypes keep a product id from being passed
// where a category or user id is expected.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a catalog category.
    CategoryId
);

string_id!(
    /// Identifier of a product.
    ProductId
);

string_id!(
    /// Identifier of an authenticated user.
    UserId
);

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn ids_display_their_raw_value() {
        assert_eq!(ProductId::from("p1").to_string(), "p1");
        assert_eq!(CategoryId::new("all").as_str(), "all");
    }

    #[test]
    fn sets_can_be_queried_by_str() {
        let set: BTreeSet<ProductId> = ["p1", "p2"].into_iter().map(ProductId::from).collect();
        assert!(set.contains("p1"));
        assert!(!set.contains("p3"));
    }
}
