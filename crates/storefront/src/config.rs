//! CLI configuration: thin wrapper around `storefront_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--backend, --api-key, --user-id, ...).

use secrecy::SecretString;

use storefront_api::{TlsMode, TransportConfig};
use storefront_core::{CatalogConfig, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use storefront_config::{
    Config, Profile, config_path, load_config_or_default, save_config,
};

/// Everything needed to talk to one backend.
pub struct Backend {
    pub profile_name: String,
    pub base_url: String,
    pub api_key: SecretString,
    pub transport: TransportConfig,
    pub session: Session,
    pub catalog: CatalogConfig,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.default_profile_name().to_owned())
}

/// Build the backend description from the config file, the active
/// profile, and CLI overrides. Flags take priority over profile values.
pub fn resolve_backend(global: &GlobalOpts) -> Result<Backend, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        // An explicitly named profile must exist.
        None if global.profile.is_some() => {
            let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
            available.sort();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available.join(", "),
            });
        }
        None => Profile::default(),
    };

    // 1. Backend URL (flag > env > profile)
    let base_url = global
        .backend
        .clone()
        .unwrap_or_else(|| profile.backend.clone());
    if base_url.is_empty() {
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    }
    url::Url::parse(&base_url).map_err(|_| CliError::Validation {
        field: "backend".into(),
        reason: format!("invalid URL: {base_url}"),
    })?;

    // 2. API key (flag > env var > keyring > plaintext)
    let api_key = match global.api_key {
        Some(ref key) => SecretString::from(key.clone()),
        None => storefront_config::resolve_api_key(&profile, &profile_name)?,
    };

    // 3. Transport
    let mut transport = storefront_config::profile_to_transport_config(&profile, &cfg.defaults);
    if global.insecure {
        transport.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        transport.timeout = std::time::Duration::from_secs(secs);
    }

    // 4. Session
    let session = session_for(global, &profile, &profile_name);

    Ok(Backend {
        profile_name,
        base_url,
        api_key,
        transport,
        session,
        catalog: cfg.catalog.to_catalog_config(),
    })
}

fn session_for(global: &GlobalOpts, profile: &Profile, profile_name: &str) -> Session {
    let Some(user_id) = global.user_id.clone().or_else(|| profile.user_id.clone()) else {
        return Session::anonymous();
    };
    let token = global
        .access_token
        .clone()
        .map(SecretString::from)
        .or_else(|| storefront_config::resolve_access_token(profile_name));
    match token {
        Some(token) => Session::user(user_id).with_access_token(token),
        None => Session::user(user_id),
    }
}
