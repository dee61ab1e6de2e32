//! Domain model types (pure).
//!
//! All types in this module are pure data; nothing here touches the
//! network or the terminal.

pub mod error;
pub mod key_action;
pub mod product;

// Re-export for convenience
pub use error::{AppError, FetchError};
pub use key_action::KeyAction;
pub use product::{parse_catalog, Product, ProductId};
