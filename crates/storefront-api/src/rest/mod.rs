// Resource API client modules
//
// Hand-written client for the backend's `rest/v1/` resource endpoints.
// Filters use the backend's operator syntax in query values
// (`eq.<value>`, `in.(<a>,<b>)`), built by the helpers below.

pub mod catalog;
pub mod client;
pub mod favourites;
pub mod models;
pub mod profiles;

pub use client::RestClient;

/// `eq.<value>` filter operand.
pub(crate) fn eq_filter(value: &str) -> String {
    format!("eq.{value}")
}

/// `in.(<a>,<b>,...)` filter operand.
pub(crate) fn in_filter<S: AsRef<str>>(values: &[S]) -> String {
    let joined = values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",");
    format!("in.({joined})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_filter_prefixes_operator() {
        assert_eq!(eq_filter("42"), "eq.42");
    }

    #[test]
    fn in_filter_joins_values() {
        assert_eq!(in_filter(&["a", "b", "c"]), "in.(a,b,c)");
        assert_eq!(in_filter::<&str>(&[]), "in.()");
    }
}
