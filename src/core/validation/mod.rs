//! Validation of write payloads
//!
//! Product bodies are checked at the boundary, before a handler runs, and
//! turned into a typed [`ProductInput`](crate::core::product::ProductInput).

pub mod extractor;
pub mod validators;

pub use extractor::ValidatedProduct;
pub use validators::validate_product;
