//! Platform abstraction layer
//!
//! Browser bindings for the web build. Native hosts use `sim::Session`
//! directly.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebBoard;
