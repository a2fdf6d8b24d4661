//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use storefront_config::ConfigError;
use storefront_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the backend")]
    #[diagnostic(
        code(storefront::connection_failed),
        help(
            "Check the backend URL and your network connection.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(storefront::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(storefront::auth_failed),
        help(
            "Verify the API key for this profile, or sign in again with:\n\
             storefront sign-in --email <EMAIL>"
        )
    )]
    AuthFailed { message: String },

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(storefront::no_credentials),
        help(
            "Configure one with: storefront config init --store-key\n\
             Or set the STOREFRONT_API_KEY environment variable."
        )
    )]
    NoCredentials { profile: String },

    #[error("This command needs a signed-in user")]
    #[diagnostic(
        code(storefront::not_signed_in),
        help("Run: storefront sign-in --email <EMAIL>, or pass --user-id.")
    )]
    NotSignedIn,

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(storefront::not_found),
        help("Run: storefront {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("User '{user_id}' has no profile yet")]
    #[diagnostic(
        code(storefront::no_profile),
        help("Create one with: storefront profile update --firstname <NAME>")
    )]
    NoProfile { user_id: String },

    // ── Backend ──────────────────────────────────────────────────────
    #[error("Backend error (HTTP {status}): {message}")]
    #[diagnostic(code(storefront::api_error))]
    ApiError { status: u16, message: String },

    #[error("Unexpected response from backend: {message}")]
    #[diagnostic(code(storefront::bad_response))]
    BadResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(storefront::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(storefront::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: storefront config init --backend <URL> --name {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Profile '{name}' already exists")]
    #[diagnostic(
        code(storefront::profile_exists),
        help("Use --force to overwrite it.")
    )]
    ProfileExists { name: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(storefront::no_config),
        help(
            "Create a profile with: storefront config init --backend <URL>\n\
             Or pass --backend. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(storefront::config))]
    Config(Box<ConfigError>),

    #[error("Internal error: {0}")]
    #[diagnostic(code(storefront::internal))]
    Internal(String),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML output failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } | Self::NotSignedIn => {
                exit_code::AUTH
            }
            Self::NotFound { .. } | Self::NoProfile { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::ProfileExists { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NetworkUnreachable { reason } => CliError::ConnectionFailed { reason },
            CoreError::Timeout => CliError::Timeout,
            CoreError::Http { status: 401, message } => CliError::AuthFailed { message },
            CoreError::Http { status, message } => CliError::ApiError { status, message },
            CoreError::ParseOrData { message } => CliError::BadResponse { message },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::NotSignedIn => CliError::NotSignedIn,
            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}

impl From<storefront_api::Error> for CliError {
    fn from(err: storefront_api::Error) -> Self {
        match err {
            storefront_api::Error::Authentication { message } => CliError::AuthFailed { message },
            other => CoreError::from(other).into(),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(Box::new(other)),
        }
    }
}
