//! Text-grid compositor - pure, deterministic, and testable
//!
//! This crate holds the character-grid rendering stack. It has **zero
//! dependencies** on terminals, networking, or I/O.
//!
//! # Module Structure
//!
//! - [`text`]: [`TextArea`], a fixed-size character grid with a bottom-left origin
//! - [`rich`]: [`RichTextArea`], a grid with per-cell style classes
//! - [`sprite`]: [`Sprite`], a styled grid with a pivot and rendering flags
//! - [`entity`]: [`Entity`], a shared sprite at a world position, with collision tests
//! - [`canvas`]: [`Canvas`], background plus ordered entities, composited on demand
//! - [`markup`]: serialization of a composited grid into `<span>` runs
//!
//! # Error Model
//!
//! Nothing here panics on bad coordinates. Out-of-bounds reads and writes
//! return `None` or `false`, and blank input is a no-op.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use ascii_arcade_core::{Canvas, Sprite};
//! use ascii_arcade_types::Vector;
//!
//! let mut canvas = Canvas::new(5, 1);
//! let ship = Arc::new(Sprite::glyph('>').filled(["blue-glow"]));
//! let id = canvas.put_sprite(ship, Vector::ZERO);
//!
//! assert_eq!(canvas.bake(), "<span class=\"blue-glow\">></span>    ");
//!
//! canvas.get_mut(id).unwrap().translate(Vector::RIGHT * 2.0);
//! assert_eq!(canvas.bake(), "  <span class=\"blue-glow\">></span>  ");
//! ```

pub mod canvas;
pub mod entity;
pub mod markup;
pub mod rich;
pub mod sprite;
pub mod text;

pub use ascii_arcade_types as types;

// Re-export commonly used types for convenience
pub use canvas::{Canvas, EntityId};
pub use entity::Entity;
pub use rich::{class_set, ClassSet, RichTextArea};
pub use sprite::{Sprite, SpriteConfig};
pub use text::TextArea;
