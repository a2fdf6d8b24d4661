//! Favourite command handlers.

use serde::Serialize;

use storefront_core::{ProductId, RestCatalog, ToggleOutcome};

use crate::cli::{FavoritesArgs, FavoritesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::catalog::ProductRow;

#[derive(Serialize)]
struct ToggleResult {
    product_id: String,
    favorite: bool,
}

pub async fn handle(
    catalog: &RestCatalog,
    args: FavoritesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if catalog.snapshot().user_id.is_none() {
        return Err(CliError::NotSignedIn);
    }

    match args.command {
        FavoritesCommand::List => {
            catalog.load_favorite_products().await?;
            let favorites = catalog.view().favorites;
            let color = output::should_color(&global.color);

            let out = output::render_list(
                &global.output,
                &favorites,
                |card| ProductRow::new(card, color),
                |card| card.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        FavoritesCommand::Toggle { id } => {
            catalog.load_favorites().await?;
            let id = ProductId::from(id);

            let now_favorite = match catalog.toggle_favorite(&id).await {
                ToggleOutcome::Committed { now_favorite } => now_favorite,
                ToggleOutcome::Reverted { error } => return Err(error.into()),
                ToggleOutcome::Ignored => return Err(CliError::NotSignedIn),
                ToggleOutcome::Discarded => {
                    return Err(CliError::Internal("session changed during toggle".into()));
                }
            };

            let result = ToggleResult {
                product_id: id.to_string(),
                favorite: now_favorite,
            };
            let out = output::render_single(
                &global.output,
                &result,
                |r| {
                    if r.favorite {
                        format!("{} added to favourites", r.product_id)
                    } else {
                        format!("{} removed from favourites", r.product_id)
                    }
                },
                |r| r.favorite.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
