//! A headless windowing engine for very large ordered collections.
//!
//! For host-side glue (native scroll conventions, realize-driven rendering, a tick-driven
//! controller), see the `listwindow-adapter` crate.
//!
//! Instead of materializing every item, the engine computes, for the current scroll position, the
//! minimal contiguous index range that must be realized, assigns every realized item an absolute
//! position, and tracks the scroll state (direction, in-motion flag, requested vs. observed
//! offset) that a host surface needs to avoid re-realizing unchanged items.
//!
//! It is UI-agnostic. A host is expected to provide:
//! - the viewport extent along the scroll axis
//! - observed scroll offsets (normalized into the canonical convention, see [`RtlOffsetType`])
//! - a [`Timer`] used to debounce the in-motion flag
//! - optionally a [`ScrollTarget`] that receives programmatic scroll writes
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod align;
mod cache;
mod config;
mod debounce;
mod engine;
mod error;
mod metrics;
mod normalize;
mod range;
mod state;
mod timer;
mod types;


pub use align::offset_for_index;
pub use config::{InitialOffset, ItemSize, ListConfig, resolve_orientation};
pub use engine::{ListWindow, OnScrollStateChanged, OnWindowChanged, ScrollTarget};
pub use error::{ConfigError, Error, MeasureError};
pub use metrics::{FixedSize, ItemMetadata, Metrics, VariableSize, VariableSizeState};
pub use normalize::{RtlOffsetType, denormalize, normalize};
pub use range::{overscan_amounts, resolve_range};
pub use state::{ScrollObservation, ScrollState, ScrollUpdate, ScrollWrite};
pub use timer::{ManualTimer, Timer, TimerId};
pub use types::{
    Align, Edge, Geometry, Layout, RenderWindow, ScrollDirection, VirtualItem, WritingDirection,
};
