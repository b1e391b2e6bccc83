//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It renders the
//! composited canvas into a simple framebuffer that is diff-flushed to the
//! terminal through crossterm.
//!
//! Goals:
//! - Keep `core` and `engine` free of I/O
//! - Map compositor style classes to terminal colours in one place ([`Theme`])
//! - Redraw only what changed between frames

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod theme;

pub use ascii_arcade_core as core;
pub use ascii_arcade_engine as engine;
pub use ascii_arcade_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, RemoteStatusView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use theme::{ClassStyle, Theme};
