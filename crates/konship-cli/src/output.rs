//! Output formatting for loading reports and product catalogs.
//!
//! Text renderers build a `String` so they can be tested without capturing
//! stdout; the `print_*` helpers write them out.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use konship_lib::{PlanReport, PlanStep, ProductCatalog};

use crate::terminal::{format_kg, ColorPalette};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Render a plan report as text.
pub fn render_report_text(report: &PlanReport, palette: &ColorPalette) -> String {
    let p = palette;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Loading plan for {}{}{}:",
        p.white_bold, report.ship.name, p.reset
    );
    for step in &report.steps {
        let (tag, label) = match step {
            _ if step.is_rejection() => (p.tag_fail, "FAIL"),
            PlanStep::Built { .. } => (p.gray, "NEW "),
            _ => (p.tag_ok, " OK "),
        };
        let _ = writeln!(out, "  {tag}[{label}]{} {step}", p.reset);
    }

    if !report.hazards.is_empty() {
        let _ = writeln!(out, "\nHazard notices:");
        for notice in &report.hazards {
            let _ = writeln!(
                out,
                "  {}[WARN]{} {}: {}",
                p.tag_warn, p.reset, notice.serial, notice.message
            );
        }
    }

    let _ = writeln!(out, "\nManifest:");
    if report.ship.containers.is_empty() {
        let _ = writeln!(out, "  (no containers aboard)");
    }
    for container in &report.ship.containers {
        let _ = writeln!(out, "  - {container}");
    }

    if !report.ashore.is_empty() {
        let _ = writeln!(out, "\nLeft ashore:");
        for container in &report.ashore {
            let _ = writeln!(out, "  - {container}");
        }
    }

    let _ = writeln!(out, "\n{}", report.ship.description);
    let _ = writeln!(
        out,
        "{}Weight utilisation: {:.1}% ({} of {}){}",
        p.gray,
        report.ship.weight_utilization * 100.0,
        format_kg(report.ship.total_weight),
        format_kg(report.ship.max_weight),
        p.reset
    );
    out
}

/// Render a product catalog as a text table.
pub fn render_catalog_text(catalog: &ProductCatalog, palette: &ColorPalette) -> String {
    let products = catalog.products_sorted();
    if products.is_empty() {
        return "No products available in catalog.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Available products ({}):", products.len());
    let _ = writeln!(out, "{:<16} {:>14}", "Name", "Min Temp (°C)");
    for product in products {
        let _ = writeln!(
            out,
            "{:<16} {}{:>14.1}{}",
            product.name, palette.cyan, product.min_temperature, palette.reset
        );
    }
    out
}

/// Write any serializable value to stdout as pretty JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_json<T: Serialize>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
