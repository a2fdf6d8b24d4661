//! Command dispatch: bridges CLI args -> catalog intents -> output formatting.

pub mod auth;
pub mod catalog;
pub mod config_cmd;
pub mod favorites;
pub mod profile;

use storefront_core::{Catalog, RestCatalog, RestGateway};

use crate::cli::{Command, GlobalOpts};
use crate::config::Backend;
use crate::error::CliError;

/// Build a catalog talking to `backend` as the resolved session.
pub fn connect(backend: &Backend) -> Result<RestCatalog, CliError> {
    let gateway = RestGateway::connect(
        &backend.base_url,
        &backend.api_key,
        &backend.session,
        &backend.transport,
    )?;
    Ok(Catalog::new(
        backend.catalog.clone(),
        &backend.session,
        gateway.clone(),
        gateway,
    ))
}

/// Dispatch a catalog-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, backend: &Backend, global: &GlobalOpts) -> Result<(), CliError> {
    let catalog = connect(backend)?;
    let result = match cmd {
        Command::Categories => catalog::categories(&catalog, global).await,
        Command::Products(args) => catalog::products(&catalog, args, global).await,
        Command::Product(args) => catalog::product(&catalog, args, global).await,
        Command::Favorites(args) => favorites::handle(&catalog, args, global).await,
        // Config, Completions, SignIn and Profile are handled before dispatch
        Command::Config(_)
        | Command::Completions(_)
        | Command::SignIn(_)
        | Command::Profile(_) => unreachable!(),
    };
    catalog.shutdown().await;
    result
}

/// Load favourite ids so cards can show them. Failure only degrades the
/// listing, so it is logged rather than returned.
pub async fn load_favorites_quietly(catalog: &RestCatalog) {
    if let Err(e) = catalog.load_favorites().await {
        tracing::warn!(error = %e, "could not load favourites");
    }
}
