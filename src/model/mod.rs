//! Schema Model
//!
//! Every entity of the card format. Structs are declared through
//! [`entity!`](crate::wire) tables that carry the wire key and minimum version
//! of each field; categories are closed sum types with an `Extension` arm for
//! embedder-registered variants.

mod actions;
mod card;
mod common;
mod elements;
mod inlines;
mod inputs;
mod layout;
mod records;
mod references;
mod teams;

pub use actions::*;
pub use card::*;
pub use common::*;
pub use elements::*;
pub use inlines::*;
pub use inputs::*;
pub use layout::*;
pub use records::*;
pub use references::*;
pub use teams::*;
