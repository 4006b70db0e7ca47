//! Host-side glue for the `listwindow` crate.
//!
//! The `listwindow` crate is UI-agnostic and only computes windows, geometry, and scroll state.
//! This crate provides small, framework-neutral helpers that hosts commonly need on top of it:
//!
//! - Native right-to-left scroll conventions ([`SurfaceTarget`], [`canonical_offset`])
//! - A renderer that re-realizes nodes only when something visible changed ([`Renderer`])
//! - A [`Controller`] driven by `on_scroll(..)` / `tick(now_ms)` calls from a host event loop
//!
//! This crate holds no UI objects; nodes are whatever the host's [`Realize`] produces.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod render;
mod surface;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use render::{Realize, RenderPass, Renderer};
pub use surface::{NativeSurface, SurfaceTarget, canonical_offset, native_offset};
