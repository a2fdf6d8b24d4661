// ── Profile editing ──
//
// Reads and saves the signed-in user's profile row. Saving patches the
// existing row and creates one when the patch matched nothing.

use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::gateway::ProfileGateway;
use crate::model::{ProfileUpdate, UserId, UserProfile};
use crate::session::Session;

/// Profile access for one session.
pub struct ProfileService<G> {
    gateway: G,
    user_id: Option<UserId>,
}

impl<G: ProfileGateway> ProfileService<G> {
    pub fn new(session: &Session, gateway: G) -> Self {
        Self {
            gateway,
            user_id: session.user_id().cloned(),
        }
    }

    fn user(&self) -> Result<&UserId, CoreError> {
        self.user_id.as_ref().ok_or(CoreError::NotSignedIn)
    }

    /// The user's profile, or `None` when it was never saved.
    pub async fn load(&self) -> Result<Option<UserProfile>, CoreError> {
        let user = self.user()?;
        debug!(user_id = %user, "loading profile");
        self.gateway.fetch_profile(user).await
    }

    /// Apply `update`, creating the row if the user has none.
    ///
    /// A failed patch also falls through to creation; if the row did exist
    /// the insert fails and that error is returned.
    pub async fn save(&self, update: &ProfileUpdate) -> Result<UserProfile, CoreError> {
        let user = self.user()?;
        match self.gateway.update_profile(user, update).await {
            Ok(Some(profile)) => {
                info!(user_id = %user, "profile updated");
                return Ok(profile);
            }
            Ok(None) => debug!(user_id = %user, "no profile row; creating"),
            Err(e) => warn!(user_id = %user, error = %e, "profile update failed; trying insert"),
        }
        let profile = self.gateway.create_profile(user, update).await?;
        info!(user_id = %user, "profile created");
        Ok(profile)
    }
}
