//! Platform abstraction layer
//!
//! Native builds drive `sim::Session` directly from `main.rs`. The browser gets
//! a `wasm-bindgen` handle around the same session, with LocalStorage for the
//! best score.

#[cfg(target_arch = "wasm32")]
pub mod web;
