use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use konship_cli::commands::{plan, products};
use konship_cli::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Container loading rules for cargo ships")]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Product catalog CSV to use instead of the built-in table.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the built-in demonstration plan.
    Demo,
    /// Build, load and board the containers described in a JSON loading plan.
    Run {
        /// Path to the loading plan.
        #[arg(long)]
        plan: PathBuf,
    },
    /// List the refrigerated product catalog.
    Products,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let catalog = cli.catalog.as_deref();

    match cli.command {
        Command::Demo => plan::handle_demo(catalog, cli.format),
        Command::Run { plan: plan_path } => plan::handle_run(&plan_path, catalog, cli.format),
        Command::Products => products::handle_list_products(catalog, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
