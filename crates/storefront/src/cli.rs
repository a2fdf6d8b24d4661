//! Clap derive structures for the `storefront` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// storefront -- browse the shoe store catalog from the command line
#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    version,
    about = "Browse the storefront catalog and manage favourites",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "STOREFRONT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, short = 'b', env = "STOREFRONT_BACKEND", global = true)]
    pub backend: Option<String>,

    /// Project API key
    #[arg(long, env = "STOREFRONT_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// User access token (from `sign-in`)
    #[arg(long, env = "STOREFRONT_ACCESS_TOKEN", global = true, hide_env_values = true)]
    pub access_token: Option<String>,

    /// Act as this user id (enables favourites)
    #[arg(long, short = 'u', env = "STOREFRONT_USER_ID", global = true)]
    pub user_id: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "STOREFRONT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "STOREFRONT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "STOREFRONT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List catalog categories
    #[command(alias = "cat")]
    Categories,

    /// List products of a category
    #[command(alias = "ls")]
    Products(ProductsArgs),

    /// Show one product
    Product(ProductArgs),

    /// List or toggle favourites
    #[command(alias = "fav")]
    Favorites(FavoritesArgs),

    /// Sign in with email and password
    SignIn(SignInArgs),

    /// Show or edit the signed-in user's profile
    #[command(alias = "me")]
    Profile(ProfileArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Catalog ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProductsArgs {
    /// Category title (case-insensitive); defaults to the configured
    /// fallback category
    #[arg(long, short = 'c')]
    pub category: Option<String>,
}

#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product id
    pub id: String,
}

// ── Favourites ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FavoritesArgs {
    #[command(subcommand)]
    pub command: FavoritesCommand,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// List favourite products
    #[command(alias = "ls")]
    List,

    /// Add or remove a product from favourites
    Toggle {
        /// Product id
        id: String,
    },
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SignInArgs {
    /// Account email
    #[arg(long, short = 'e')]
    pub email: String,

    /// Password (prompted when omitted)
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Print the access token instead of storing it in the keyring
    #[arg(long)]
    pub print_token: bool,
}

// ── Profile ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show the profile
    Show,

    /// Change profile fields; a profile is created if there is none
    Update(ProfileUpdateArgs),
}

#[derive(Debug, Args)]
pub struct ProfileUpdateArgs {
    #[arg(long)]
    pub firstname: Option<String>,

    #[arg(long)]
    pub lastname: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or replace a profile
    Init {
        /// Backend base URL
        #[arg(long)]
        backend: String,

        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,

        /// Environment variable holding the API key
        #[arg(long)]
        api_key_env: Option<String>,

        /// Prompt for the API key and store it in the system keyring
        #[arg(long)]
        store_key: bool,

        /// Overwrite an existing profile
        #[arg(long)]
        force: bool,
    },

    /// Display current configuration (secrets masked)
    Show,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
