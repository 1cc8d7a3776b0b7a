//! Card Config CLI
//!
//! Inspect and initialise the configuration the card tools read.

use std::path::PathBuf;

use adaptive_card_schemas::CardConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "card-config")]
#[command(about = "Show, create and check card tool configuration")]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective configuration as TOML
    Show,

    /// Write a default config file
    Init {
        /// Where to write it
        #[arg(default_value = "cards.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Check the effective configuration for unusable settings
    Validate,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.config.as_ref().and_then(|p| p.to_str());

    match cli.command {
        Commands::Show => {
            let config = CardConfig::load_from(config_path)?;
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }

        Commands::Init { path, force } => {
            if path.exists() && !force {
                return Err(format!("{} already exists (use --force)", path.display()).into());
            }
            let target = path.to_str().ok_or("config path is not valid UTF-8")?;
            CardConfig::default().save(target)?;
            println!("✅ Wrote {}", path.display());
            Ok(())
        }

        Commands::Validate => {
            let config = CardConfig::load_from(config_path)?;
            let problems = config.check();

            if problems.is_empty() {
                let registry = config.build_registry();
                println!(
                    "✅ Configuration valid ({} variants, {} extension(s))",
                    registry.len(),
                    config.registry.extensions.len()
                );
                return Ok(());
            }

            println!("❌ {} problem(s):", problems.len());
            for problem in &problems {
                println!("   └─ {}", problem);
            }
            std::process::exit(1);
        }
    }
}
