//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`] under the selected
//! [`crate::types::ControlScheme`], and labels key presses for the debug readout.

pub mod map;

pub use ascii_arcade_types as types;

pub use map::{describe_key, handle_key_event, should_quit};
