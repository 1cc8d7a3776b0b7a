//! Card Convert CLI
//!
//! Re-encodes cards in canonical form and moves them in and out of the
//! workflow envelope.

use std::path::{Path, PathBuf};

use adaptive_card_schemas::config::OutputFormat;
use adaptive_card_schemas::{AdaptiveCard, AnyVariant, CardConfig, Codec, WireValue, WorkflowMessage};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "card-convert")]
#[command(about = "Normalize Adaptive Cards and wrap them for workflow webhooks")]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit compact JSON regardless of config
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode and re-encode a payload, dropping empty fields and unknown variants
    Normalize {
        /// Input JSON file
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Accept any tagged payload, not only whole cards
        #[arg(long)]
        any: bool,
    },

    /// Wrap a card in a workflow message
    Wrap {
        /// Input card JSON file
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract the cards carried by a workflow message
    Unwrap {
        /// Input message JSON file
        input: PathBuf,

        /// Directory to write card-N.json files to (stdout if omitted)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_ref().and_then(|p| p.to_str());
    let config = CardConfig::load_from(config_path).context("Failed to load config")?;
    let codec = config.build_codec();

    let format = if cli.compact {
        OutputFormat::Compact
    } else {
        config.output.format
    };
    let out = Output { codec: &codec, format };

    match cli.command {
        Commands::Normalize { input, output, any } => {
            let bytes = read(&input)?;
            let text = if any {
                match codec.deserialize_any(&bytes).context("Failed to decode payload")? {
                    AnyVariant::Document(card) => out.render(card.as_ref())?,
                    AnyVariant::Element(v) => out.render(&v)?,
                    AnyVariant::Action(v) => out.render(&v)?,
                    AnyVariant::ActionData(v) => out.render(&v)?,
                    AnyVariant::Layout(v) => out.render(&v)?,
                    AnyVariant::Inline(v) => out.render(&v)?,
                    AnyVariant::Reference(v) => out.render(&v)?,
                }
            } else {
                let card: AdaptiveCard =
                    codec.deserialize(&bytes).context("Failed to decode card")?;
                if config.output.envelope {
                    out.render(&WorkflowMessage::wrap(card))?
                } else {
                    out.render(&card)?
                }
            };
            write(output.as_deref(), &text)
        }

        Commands::Wrap { input, output } => {
            let card: AdaptiveCard = codec
                .deserialize(&read(&input)?)
                .context("Failed to decode card")?;
            let text = out.render(&WorkflowMessage::wrap(card))?;
            write(output.as_deref(), &text)
        }

        Commands::Unwrap { input, output_dir } => {
            let message: WorkflowMessage = codec
                .deserialize(&read(&input)?)
                .context("Failed to decode workflow message")?;

            let cards: Vec<_> = message.cards().collect();
            if cards.is_empty() {
                bail!("{} carries no card attachments", input.display());
            }

            match output_dir {
                Some(dir) => {
                    std::fs::create_dir_all(&dir)?;
                    for (i, card) in cards.iter().enumerate() {
                        let path = dir.join(format!("card-{}.json", i));
                        write(Some(&path), &out.render(*card)?)?;
                    }
                    eprintln!("✅ Wrote {} card(s) to {}", cards.len(), dir.display());
                }
                None => {
                    for card in cards {
                        println!("{}", out.render(card)?);
                    }
                }
            }
            Ok(())
        }
    }
}

struct Output<'a> {
    codec: &'a Codec,
    format: OutputFormat,
}

impl Output<'_> {
    fn render<T: WireValue>(&self, value: &T) -> Result<String> {
        let text = match self.format {
            OutputFormat::Pretty => self.codec.serialize_pretty(value)?,
            OutputFormat::Compact => String::from_utf8(self.codec.serialize(value)?)?,
        };
        Ok(text)
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}
