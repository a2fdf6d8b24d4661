//! Sign-in handler.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{info, warn};

use storefront_api::RestClient;

use crate::cli::{GlobalOpts, SignInArgs};
use crate::config::{self, Backend};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct SignInResult {
    user_id: String,
    email: String,
    token_stored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
}

pub async fn handle(args: SignInArgs, backend: &Backend, global: &GlobalOpts) -> Result<(), CliError> {
    let client = RestClient::from_api_key(
        &backend.base_url,
        &backend.api_key,
        None,
        &backend.transport,
    )?;

    let password = match args.password {
        Some(p) => SecretString::from(p),
        None => SecretString::from(rpassword::prompt_password("Password: ")?),
    };
    if password.expose_secret().is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }

    let session = client.sign_in_with_password(&args.email, &password).await?;
    let user_id = session.user.id.clone();
    info!(%user_id, "signed in");

    let token_stored = if args.print_token {
        false
    } else {
        storefront_config::store_access_token(&backend.profile_name, &session.access_token)?;
        true
    };

    // Remember the user on the profile so later commands act as them.
    let mut cfg = config::load_config_or_default();
    if let Some(profile) = cfg.profiles.get_mut(&backend.profile_name) {
        profile.user_id = Some(user_id.clone());
        profile.email = Some(args.email.clone());
        config::save_config(&cfg)?;
    } else {
        warn!(
            profile = %backend.profile_name,
            "profile not in config; pass --user-id {user_id} to act as this user"
        );
    }

    let result = SignInResult {
        user_id,
        email: args.email,
        token_stored,
        access_token: args
            .print_token
            .then(|| session.access_token.expose_secret().to_owned()),
    };
    let out = output::render_single(
        &global.output,
        &result,
        |r| match r.access_token {
            Some(ref token) => format!("Signed in as {} ({})\n{token}", r.email, r.user_id),
            None => format!("Signed in as {} ({})", r.email, r.user_id),
        },
        |r| r.user_id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
