pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "fitness-api")]
#[command(about = "Fitness tracking API server and admin utilities")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides FITNESS_API_PORT)")]
        port: Option<u16>,
    },

    #[command(about = "Issue a bearer token for an email, for manual testing")]
    Token {
        #[arg(help = "Identity (email) to embed in the token")]
        email: String,
    },

    #[command(about = "Insert event documents from a JSON array file")]
    SeedEvents {
        #[arg(help = "Path to a JSON file containing an array of event objects")]
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => commands::serve::handle(config, port).await,
        Commands::Token { email } => commands::token::handle(config, &email, output_format),
        Commands::SeedEvents { path } => commands::seed::handle(config, &path, output_format).await,
    }
}
