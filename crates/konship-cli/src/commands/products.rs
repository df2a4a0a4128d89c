//! Products command handler for listing the refrigerated product catalog.

use std::path::Path;

use anyhow::{Context, Result};

use konship_lib::ProductCatalog;

use crate::output::{render_catalog_text, render_json, OutputFormat};
use crate::terminal::ColorPalette;

/// Handle the products subcommand.
pub fn handle_list_products(catalog_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let catalog = load_product_catalog(catalog_path)?;
    match format {
        OutputFormat::Text => print!("{}", render_catalog_text(&catalog, &ColorPalette::detect())),
        OutputFormat::Json => render_json(&catalog.products_sorted())?,
    }
    Ok(())
}

/// Load the product catalog from `path`, or the built-in table when no path is given.
pub fn load_product_catalog(path: Option<&Path>) -> Result<ProductCatalog> {
    match path {
        Some(path) => {
            tracing::debug!("Loading product catalog from {}", path.display());
            ProductCatalog::from_path(path)
                .with_context(|| format!("failed to load product catalog from {}", path.display()))
        }
        None => Ok(ProductCatalog::builtin().clone()),
    }
}
