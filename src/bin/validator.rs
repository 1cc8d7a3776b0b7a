//! Card Validator CLI
//!
//! Decodes card documents and checks every populated field against the
//! version the card declares.

use std::path::PathBuf;

use adaptive_card_schemas::wire::FieldRole;
use adaptive_card_schemas::workflow::MESSAGE_TYPE;
use adaptive_card_schemas::{
    validate, AdaptiveCard, CardConfig, CardError, Category, Codec, Violation, WorkflowMessage,
};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "card-validator")]
#[command(about = "Validate Adaptive Cards against their declared schema version")]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate card files (bare cards or workflow messages)
    Validate {
        /// Card JSON files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Check against this version instead of the declared one
        #[arg(short, long)]
        version: Option<String>,

        /// Print violations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the fields of a variant and the version each requires
    Fields {
        /// Wire discriminant, e.g. "Input.Text"
        discriminant: String,
    },

    /// List registered variants
    Variants {
        /// Only list one category (element, action, layout, ...)
        #[arg(long)]
        category: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

/// Returns `false` when the run should exit with a failure status
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let config_path = cli.config.as_ref().and_then(|p| p.to_str());
    let config = CardConfig::load_from(config_path)?;
    let codec = config.build_codec();

    match cli.command {
        Commands::Validate {
            files,
            version,
            json,
        } => {
            let mut report = Vec::new();
            let mut total = 0;

            for file in &files {
                let content = std::fs::read_to_string(file)?;
                let cards = decode_cards(&codec, &content)
                    .map_err(|e| format!("{}: {}", file.display(), e))?;

                for (i, card) in cards.iter().enumerate() {
                    let declared = match (&version, card.version.is_empty()) {
                        (Some(v), _) => v.clone(),
                        (None, true) => config.validation.default_version.clone(),
                        (None, false) => card.version.clone(),
                    };
                    let violations = validate(card, &declared);
                    total += violations.len();

                    let label = if cards.len() > 1 {
                        format!("{} (attachment {})", file.display(), i)
                    } else {
                        file.display().to_string()
                    };

                    if json {
                        report.push(serde_json::json!({
                            "file": label,
                            "version": declared,
                            "violations": violations,
                        }));
                    } else {
                        print_violations(&label, &declared, &violations);
                    }
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!();
                if total == 0 {
                    println!("✅ {} file(s) valid", files.len());
                } else {
                    println!("❌ {} violation(s) found", total);
                }
            }

            Ok(total == 0 || !config.validation.fail_on_violation)
        }

        Commands::Fields { discriminant } => {
            let descriptor = codec.registry().resolve_by_discriminant(&discriminant)?;
            let fields = descriptor.fields();

            println!("{} ({})", discriminant, descriptor.category());
            if fields.is_empty() {
                println!("  (no declared fields)");
            }
            for field in fields {
                match field.role {
                    FieldRole::Group => println!("  + {} fields", field.name),
                    FieldRole::Field => {
                        let marker = if field.always { " [always]" } else { "" };
                        println!("  {:<32} {}{}", field.key, field.since, marker);
                    }
                }
            }
            Ok(true)
        }

        Commands::Variants { category } => {
            let filter: Option<Category> = match category {
                Some(name) => Some(serde_json::from_value(Value::String(name))?),
                None => None,
            };

            for (discriminant, descriptor) in codec.registry().entries() {
                if filter.map_or(true, |c| c == descriptor.category()) {
                    println!("{:<32} {}", discriminant, descriptor);
                }
            }
            Ok(true)
        }
    }
}

/// A workflow message carries its cards as attachments; anything else is
/// decoded as a bare card.
fn decode_cards(codec: &Codec, content: &str) -> Result<Vec<AdaptiveCard>, CardError> {
    let tree: Value = serde_json::from_str(content)
        .map_err(|e| CardError::MalformedPayload(e.to_string()))?;

    if tree.get("type").and_then(Value::as_str) == Some(MESSAGE_TYPE) {
        let message: WorkflowMessage = codec.from_value(&tree)?;
        Ok(message.cards().cloned().collect())
    } else {
        Ok(vec![codec.from_value(&tree)?])
    }
}

fn print_violations(label: &str, declared: &str, violations: &[Violation]) {
    if violations.is_empty() {
        println!("✅ {} (version {})", label, declared);
        return;
    }

    println!("❌ {} (version {}) - {} violation(s)", label, declared, violations.len());
    for violation in violations {
        println!("   └─ {}", violation);
    }
}
