//! ASCII Arcade (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof:
//! `ascii_arcade::{core, engine, input, term, adapter, types}`. The
//! implementation lives in dedicated crates under `crates/`.

pub use ascii_arcade_adapter as adapter;
pub use ascii_arcade_core as core;
pub use ascii_arcade_engine as engine;
pub use ascii_arcade_input as input;
pub use ascii_arcade_term as term;
pub use ascii_arcade_types as types;

pub mod demo;
pub mod logging;
