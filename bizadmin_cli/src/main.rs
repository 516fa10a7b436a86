mod commands;
mod output;

use anyhow::Result;
use bizadmin_lib::{AdminClient, Config};
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "bizadmin")]
#[command(about = "List, inspect and edit business-administration records")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API base URL (overrides BIZADMIN_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Bearer token (overrides BIZADMIN_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List one page of a resource
    List(commands::list::ListArgs),
    /// Show a single record
    Get(commands::get::GetArgs),
    /// Create a record, or update it when --id is given
    Save(commands::save::SaveArgs),
    /// Delete one or more records
    Delete(commands::delete::DeleteArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bizadmin=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let mut config = Config::from_env();
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(token) = cli.token {
        config.token = Some(token);
    }
    let client = AdminClient::new(&config)?;

    match &cli.command {
        Commands::List(args) => commands::list::run(args, &client, &format).await?,
        Commands::Get(args) => commands::get::run(args, &client, &format).await?,
        Commands::Save(args) => commands::save::run(args, &client, &format).await?,
        Commands::Delete(args) => commands::delete::run(args, &client).await?,
    }

    Ok(())
}
