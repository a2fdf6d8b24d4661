// ── Session identity ──
//
// The identity the core works on behalf of. Passed in at construction
// rather than read from shared state, so a catalog can be driven in tests
// without an authentication stack.

use secrecy::SecretString;

use crate::model::UserId;

/// The current user, or an anonymous session with favourites disabled.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user_id: Option<UserId>,
    access_token: Option<SecretString>,
}

impl Session {
    /// A session with no signed-in user.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session for `user_id`.
    pub fn user(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            access_token: None,
        }
    }

    /// Attach the user's access token (forwarded to the REST gateway).
    pub fn with_access_token(mut self, token: SecretString) -> Self {
        self.access_token = Some(token);
        self
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn access_token(&self) -> Option<&SecretString> {
        self.access_token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_has_no_user() {
        let s = Session::anonymous();
        assert!(!s.is_authenticated());
        assert!(s.user_id().is_none());
    }

    #[test]
    fn user_session_carries_id() {
        let s = Session::user("u1");
        assert!(s.is_authenticated());
        assert_eq!(s.user_id().map(UserId::as_str), Some("u1"));
    }
}
