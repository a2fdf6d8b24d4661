// Profile endpoints: one `profiles` row per user, keyed by `user_id`.

use tracing::debug;

use super::models::{ProfileDto, ProfileInsertDto, ProfileUpdateDto};
use super::{RestClient, eq_filter};
use crate::error::Error;

const PROFILES: &str = "rest/v1/profiles";

impl RestClient {
    /// The user's profile, or `None` when no row exists yet.
    ///
    /// `GET rest/v1/profiles?select=*&user_id=eq.<uid>`
    pub async fn get_profile(&self, user_id: &str) -> Result<Option<ProfileDto>, Error> {
        debug!(user_id, "fetching profile");
        let rows: Vec<ProfileDto> = self
            .get(
                PROFILES,
                &[("select", "*".into()), ("user_id", eq_filter(user_id))],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Patch the user's profile. Returns `None` when no row matched.
    ///
    /// `PATCH rest/v1/profiles?user_id=eq.<uid>` with `Prefer: return=representation`
    pub async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdateDto,
    ) -> Result<Option<ProfileDto>, Error> {
        debug!(user_id, "updating profile");
        let rows: Vec<ProfileDto> = self
            .patch(PROFILES, &[("user_id", eq_filter(user_id))], update)
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Insert a profile row.
    ///
    /// `POST rest/v1/profiles` with `Prefer: return=representation`
    pub async fn create_profile(&self, row: &ProfileInsertDto) -> Result<ProfileDto, Error> {
        debug!(user_id = %row.user_id, "creating profile");
        let rows: Vec<ProfileDto> = self.post_returning(PROFILES, row).await?;
        rows.into_iter().next().ok_or_else(|| Error::Deserialization {
            message: "profile insert returned no rows".into(),
            body: "[]".into(),
        })
    }
}
