//! Adaptive Card Schemas
//!
//! A typed model of the Adaptive Cards document format with a
//! registry-driven JSON codec and a version validator.
//!
//! ## Features
//!
//! - **Typed Model**: Every element, action, layout and record as a Rust type
//! - **Polymorphic Codec**: `"type"` discriminants resolved through a registry
//! - **Extensible**: Embedders register custom variants without touching the model
//! - **Version Validation**: Reports fields newer than the card's declared version
//! - **Workflow Envelope**: Wraps cards for Teams workflow webhooks
//!
//! ## Architecture
//!
//! ```text
//! JSON ──► Codec ──► VariantRegistry ──► model::{AdaptiveCard, Element, Action, ...}
//!                                                 │
//!                                                 ▼
//!                                      validate() ──► Vec<Violation>
//! ```
//!
//! ## Example
//!
//! ```
//! use adaptive_card_schemas::{AdaptiveCard, Codec, TextBlock, V1_2};
//!
//! let mut card = AdaptiveCard::with_version(V1_2);
//! card.push(TextBlock::new("Build finished"));
//!
//! let json = Codec::shared().serialize_pretty(&card).unwrap();
//! let back: AdaptiveCard = Codec::shared().deserialize_str(&json).unwrap();
//! assert_eq!(back, card);
//! assert!(back.validate().is_empty());
//! ```

pub mod codec;
pub mod config;
pub mod enums;
pub mod error;
pub mod model;
pub mod registry;
pub mod shapes;
pub mod validate;
pub mod version;
pub mod wire;
pub mod workflow;

pub use codec::{AnyVariant, Codec};
pub use config::CardConfig;
pub use error::{CardError, Result};
pub use model::*;
pub use registry::{Category, VariantDescriptor, VariantRegistry};
pub use validate::{validate, Violation, ViolationKind};
pub use version::{CardVersion, V1_0, V1_1, V1_2, V1_3, V1_4, V1_5, V1_6};
pub use wire::{Entity, Extension, WireValue};
pub use workflow::WorkflowMessage;
