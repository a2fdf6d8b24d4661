use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// Progress of one loading pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Error(String),
}

impl LoadState {
    /// Stable lowercase name (`idle`, `loading`, `error`) for logs.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The error message, if the last load failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn error_exposes_message() {
        let state = LoadState::Error("request timed out".into());
        assert_eq!(state.error(), Some("request timed out"));
        assert!(!state.is_loading());
        assert_eq!(state.name(), "error");
        assert_eq!(LoadState::Loading.name(), "loading");
    }

    #[test]
    fn serializes_as_tagged_union() {
        let json = serde_json::to_value(LoadState::Loading).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "loading" }));
    }
}
