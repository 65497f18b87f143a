//! Platform abstraction layer
//!
//! Turns browser/native key events into simulation input.

pub mod input;

pub use input::{Direction, HeldKeys};
