//! Ambient ASCII canvas: a full-viewport grid of symbol glyphs lit by a
//! dappled-light noise field, a pointer spotlight and a highlight word that
//! reveals and dissolves cell by cell.
//!
//! `core` holds all of the frame math and runs anywhere; the remaining
//! modules bind it to a browser canvas and are only built for wasm32.

pub mod config;
pub mod constants;
pub mod core;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod handle;
#[cfg(target_arch = "wasm32")]
mod input;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
pub use handle::AmbientHandle;

pub use config::{AmbientConfig, ConfigError};
