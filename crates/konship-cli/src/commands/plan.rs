//! Plan command handlers: run a loading plan file or the built-in demo.

use std::path::Path;

use anyhow::{Context, Result};

use konship_lib::{ContainerFactory, LoadingPlan};

use crate::commands::products::load_product_catalog;
use crate::output::{render_json, render_report_text, OutputFormat};
use crate::terminal::ColorPalette;

/// Handle the run subcommand.
pub fn handle_run(
    plan_path: &Path,
    catalog_path: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let plan = LoadingPlan::from_path(plan_path)
        .with_context(|| format!("failed to load loading plan from {}", plan_path.display()))?;
    execute_and_print(&plan, catalog_path, format)
}

/// Handle the demo subcommand.
pub fn handle_demo(catalog_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    execute_and_print(&LoadingPlan::demo(), catalog_path, format)
}

fn execute_and_print(
    plan: &LoadingPlan,
    catalog_path: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let catalog = load_product_catalog(catalog_path)?;
    let factory = ContainerFactory::with_catalog(catalog);
    tracing::info!(
        "Executing loading plan for {} ({} entries)",
        plan.ship.name,
        plan.containers.len()
    );
    let report = plan
        .execute(&factory)
        .with_context(|| format!("failed to execute loading plan for {}", plan.ship.name))?;

    match format {
        OutputFormat::Text => print!("{}", render_report_text(&report, &ColorPalette::detect())),
        OutputFormat::Json => render_json(&report)?,
    }
    Ok(())
}
