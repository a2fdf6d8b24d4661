//! Catalog command handlers: categories, products, product.

use tabled::Tabled;

use storefront_core::{CategoryChip, ProductCard, ProductDetail, ProductId, RestCatalog};

use crate::cli::{GlobalOpts, ProductArgs, ProductsArgs};
use crate::error::CliError;
use crate::output;

use super::load_favorites_quietly;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "")]
    selected: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
}

#[derive(Tabled)]
pub(super) struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Best seller")]
    best_seller: String,
    #[tabled(rename = "Fav")]
    favorite: String,
}

impl ProductRow {
    pub(super) fn new(card: &ProductCard, color: bool) -> Self {
        Self {
            id: card.id.to_string(),
            title: card.title.clone(),
            price: card.price.clone(),
            best_seller: if card.is_best_seller { "yes".into() } else { String::new() },
            favorite: output::favorite_marker(card.is_favorite, color),
        }
    }
}

fn detail(d: &ProductDetail) -> String {
    [
        format!("ID:          {}", d.card.id),
        format!("Title:       {}", d.card.title),
        format!("Price:       {}", d.card.price),
        format!("Category:    {}", d.category_id),
        format!("Best seller: {}", if d.card.is_best_seller { "yes" } else { "no" }),
        format!("Favourite:   {}", if d.card.is_favorite { "yes" } else { "no" }),
        format!("Image:       {}", d.card.image.public_path()),
        String::new(),
        d.description.clone(),
    ]
    .join("\n")
    .trim_end()
    .to_owned()
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn categories(catalog: &RestCatalog, global: &GlobalOpts) -> Result<(), CliError> {
    catalog.load_categories().await?;
    let chips = catalog.view().categories;
    let color = output::should_color(&global.color);

    let out = output::render_list(
        &global.output,
        &chips,
        |c: &CategoryChip| CategoryRow {
            selected: output::selected_marker(c.selected, color),
            id: c.id.to_string(),
            title: c.title.clone(),
        },
        |c| c.title.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn products(
    catalog: &RestCatalog,
    args: ProductsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let Some(ref title) = args.category {
        catalog.set_pending_category_title(title.clone()).await?;
    }
    load_favorites_quietly(catalog).await;
    catalog.load_categories().await?;

    if let Some(title) = args.category {
        let matched = catalog
            .categories()
            .get(catalog.selected_index())
            .is_some_and(|c| c.title_matches(&title));
        if !matched {
            return Err(CliError::NotFound {
                resource_type: "category".into(),
                identifier: title,
                list_command: "categories".into(),
            });
        }
    }

    let view = catalog.view();
    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        &view.products,
        |card| ProductRow::new(card, color),
        |card| card.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn product(
    catalog: &RestCatalog,
    args: ProductArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    load_favorites_quietly(catalog).await;
    catalog.load_all_products_if_needed().await?;

    let id = ProductId::from(args.id);
    let detail_view = catalog
        .product_detail(&id)
        .ok_or_else(|| CliError::NotFound {
            resource_type: "product".into(),
            identifier: id.to_string(),
            list_command: "products".into(),
        })?;

    let out = output::render_single(&global.output, &detail_view, detail, |d| {
        d.card.id.to_string()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
