pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "cartwise",
    about = "Cartwise operator CLI",
    long_about = "Inspect the seeded catalog, review effective configuration, and run a scripted shopping session against the nudge engine.",
    after_help = "Examples:\n  cartwise demo\n  cartwise demo --rerank\n  cartwise catalog\n  cartwise config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run a scripted shopping session and print each scan with the nudge served")]
    Demo {
        #[arg(long, help = "Offer the ranked candidates to the configured remote reranker")]
        rerank: bool,
        #[arg(long, help = "Path to a cartwise.toml overriding the defaults")]
        config: Option<PathBuf>,
    },
    #[command(about = "List the seeded catalog with prices, diet tags, and active promotions")]
    Catalog,
    #[command(about = "Inspect effective configuration values with source attribution and redaction")]
    Config {
        #[arg(long, help = "Path to a cartwise.toml overriding the defaults")]
        config: Option<PathBuf>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Demo { rerank, config } => commands::demo::run(rerank, config.as_ref()),
        Command::Catalog => {
            commands::CommandResult { exit_code: 0, output: commands::catalog::run() }
        }
        Command::Config { config } => {
            commands::CommandResult { exit_code: 0, output: commands::config::run(config.as_ref()) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
