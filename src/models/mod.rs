//! Data models for the restaurant site.
//!
//! The document types match the frontend TypeScript interfaces for seamless interoperability.

mod defaults;
mod document;
mod ids;
mod order;

pub use defaults::*;
pub use document::*;
pub use ids::*;
pub use order::*;
