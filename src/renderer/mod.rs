//! Rendering boundary
//!
//! The simulation never waits on drawing. Each frame the shell builds a
//! [`Snapshot`] and hands it to a [`RenderSink`].

pub mod snapshot;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use snapshot::{CatView, PlayerView, PuddleView, RenderSink, SlashView, Snapshot};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSink;
