//! Configuration for the card tools
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (cards.toml)
//! - Environment variables (CARDS__*)
//!
//! ## Example config file (cards.toml):
//! ```toml
//! [output]
//! format = "compact"
//! envelope = true
//!
//! [validation]
//! default_version = "1.5"
//! fail_on_violation = true
//!
//! [[registry.extensions]]
//! discriminant = "CustomContainer"
//! category = "element"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::codec::Codec;
use crate::registry::{Category, VariantDescriptor, VariantRegistry};
use crate::version::CardVersion;

/// Main configuration for the card tools
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CardConfig {
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Validation settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Extra variants known to the codec
    #[serde(default)]
    pub registry: RegistryConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format (pretty or compact)
    #[serde(default)]
    pub format: OutputFormat,

    /// Wrap converted cards in the workflow envelope
    #[serde(default)]
    pub envelope: bool,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Version assumed for cards that declare none
    #[serde(default = "default_version")]
    pub default_version: String,

    /// Exit non-zero when violations are found
    #[serde(default = "default_true")]
    pub fail_on_violation: bool,
}

/// Registry configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegistryConfig {
    #[serde(default)]
    pub extensions: Vec<ExtensionConfig>,
}

/// A custom variant registered at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionConfig {
    /// Wire discriminant, e.g. "CustomContainer"
    pub discriminant: String,

    /// Category the variant belongs to
    pub category: Category,
}

fn default_version() -> String {
    CardVersion::LATEST.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Pretty,
            envelope: false,
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            default_version: default_version(),
            fail_on_violation: true,
        }
    }
}

impl CardConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = ["cards.toml", ".cards.toml", "config/cards.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("io", "adaptivecards", "cards") {
            let xdg_config = config_dir.config_dir().join("cards.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (CARDS__*)
        builder = builder.add_source(
            Environment::with_prefix("CARDS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let config: CardConfig = config.try_deserialize()?;

        tracing::debug!(
            extensions = config.registry.extensions.len(),
            default_version = %config.validation.default_version,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Check settings that deserialize fine but cannot be used
    pub fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if CardVersion::parse(&self.validation.default_version).is_err() {
            problems.push(format!(
                "validation.default_version {:?} is not a MAJOR.MINOR version",
                self.validation.default_version
            ));
        }

        let builtin = VariantRegistry::builtin();
        for (i, ext) in self.registry.extensions.iter().enumerate() {
            if ext.discriminant.is_empty() {
                problems.push(format!("registry.extensions[{}] has an empty discriminant", i));
            } else if builtin.contains(&ext.discriminant) {
                problems.push(format!(
                    "registry.extensions[{}] shadows built-in variant {:?}",
                    i, ext.discriminant
                ));
            }
            if matches!(ext.category, Category::Document | Category::Record) {
                problems.push(format!(
                    "registry.extensions[{}] uses category {}, which cannot be extended",
                    i, ext.category
                ));
            }
        }

        problems
    }

    /// Registry with the built-in variants plus the configured extensions
    ///
    /// Extensions that [`CardConfig::check`] would flag are skipped with a
    /// warning. A built-in discriminant is never rebound.
    pub fn build_registry(&self) -> VariantRegistry {
        let mut registry = VariantRegistry::builtin();
        for ext in &self.registry.extensions {
            if let Some(reason) = rejection(ext, &registry) {
                tracing::warn!(
                    discriminant = %ext.discriminant,
                    category = %ext.category,
                    "skipping configured extension: {}",
                    reason
                );
                continue;
            }
            registry.register_extension(ext.discriminant.clone(), ext.category);
        }
        registry
    }

    /// Codec over [`CardConfig::build_registry`]
    pub fn build_codec(&self) -> Codec {
        Codec::new(self.build_registry())
    }
}

/// Why an extension cannot be registered over `registry`, if it cannot
fn rejection(ext: &ExtensionConfig, registry: &VariantRegistry) -> Option<&'static str> {
    if ext.discriminant.is_empty() {
        return Some("empty discriminant");
    }
    if matches!(ext.category, Category::Document | Category::Record) {
        return Some("category cannot be extended");
    }
    match registry.resolve_by_discriminant(&ext.discriminant) {
        Ok(VariantDescriptor::Extension { .. }) | Err(_) => None,
        Ok(_) => Some("shadows built-in variant"),
    }
}
