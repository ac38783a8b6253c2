//! CLI administration tool for users-api.
//!
//! Inspects the route and schema tables without starting the server.
//!
//! # Usage
//!
//! ```bash
//! # Print the route table
//! cargo run --bin admin -- routes
//!
//! # Export the OpenAPI document
//! cargo run --bin admin -- openapi --pretty > openapi.json
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `users_api::config`); `API_BASE_PATH` and the
//! `API_*` document fields affect the output.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use users_api::api::routes::users_pipeline;
use users_api::config;
use users_api::pipeline::Pipeline;
use users_api::pipeline::openapi::describe;
use users_api::pipeline::router::HttpMethod;

/// CLI tool for inspecting users-api.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Print registered routes with their schemas
    Routes,

    /// Print the OpenAPI document
    Openapi {
        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    let pipeline = users_pipeline(&config.base_path).context("Invalid route declarations")?;

    match cli.command {
        Commands::Routes => print_routes(&pipeline),
        Commands::Openapi { pretty } => {
            let document = describe(&pipeline, &config.api_info());
            let output = if pretty {
                serde_json::to_string_pretty(&document)?
            } else {
                serde_json::to_string(&document)?
            };
            println!("{output}");
        }
    }

    Ok(())
}

/// Prints one line per route: method, full path, handler and schema key.
fn print_routes(pipeline: &Pipeline) {
    let base = pipeline.routes().base_path();

    println!("\n{}", "Registered routes:".bold());
    println!("{}", "─".repeat(72).dimmed());

    for route in pipeline.routes().routes() {
        let method = match route.method {
            HttpMethod::Get => route.method.as_str().green(),
            HttpMethod::Post => route.method.as_str().yellow(),
            HttpMethod::Put => route.method.as_str().blue(),
            HttpMethod::Delete => route.method.as_str().red(),
        };
        let path = format!("{base}{}", route.pattern.to_template());
        let schema = route
            .schema
            .map(|key| key.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<8} {:<28} {:<12} {}",
            method,
            if path.is_empty() { "/".to_string() } else { path },
            route.handler.operation_id().cyan(),
            schema.dimmed()
        );
    }

    println!("{}", "─".repeat(72).dimmed());
    println!(
        "{} routes, {} schemas\n",
        pipeline.routes().len(),
        pipeline.schemas().len()
    );
}
