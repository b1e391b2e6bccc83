//! Sprite - a small styled grid with a pivot and rendering flags

use crate::rich::RichTextArea;
use crate::text::TextArea;
use crate::types::Vector;

/// How a sprite combines with whatever is already on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteConfig {
    /// Whitespace glyphs in the sprite leave the destination glyph and its
    /// classes untouched.
    pub transparent_whitespace: bool,
    /// Sprite classes are merged into the destination classes instead of
    /// replacing them.
    pub transparent_styling: bool,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            transparent_whitespace: true,
            transparent_styling: false,
        }
    }
}

/// A [`RichTextArea`] with a center point used when it is placed.
///
/// The center is subtracted from the target position to find the sprite's
/// bottom-left anchor. Sprites are built once and shared read-only between
/// entities.
///
/// # Examples
///
/// ```
/// use ascii_arcade_core::Sprite;
/// use ascii_arcade_types::Vector;
///
/// let cross = Sprite::new(3, 3, " | -+- | ")
///     .with_center(Vector::ONE)
///     .filled(["red-glow"]);
/// assert_eq!(cross.size(), Vector::new(3.0, 3.0));
/// assert_eq!(cross.area().spans().len(), 9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    area: RichTextArea,
    center: Vector,
    config: SpriteConfig,
}

impl Sprite {
    /// Build a sprite from its glyphs, top row first.
    pub fn new(width: usize, height: usize, text: &str) -> Self {
        Self {
            area: RichTextArea::from_text_area(TextArea::from_text(width, height, text)),
            center: Vector::ZERO,
            config: SpriteConfig::default(),
        }
    }

    /// A single-cell sprite.
    pub fn glyph(ch: char) -> Self {
        Self::new(1, 1, ch.encode_utf8(&mut [0; 4]))
    }

    pub fn with_center(mut self, center: Vector) -> Self {
        self.center = center;
        self
    }

    pub fn with_config(mut self, config: SpriteConfig) -> Self {
        self.config = config;
        self
    }

    /// Style every cell with `classes`.
    pub fn filled<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.area.fill(classes);
        self
    }

    /// Style one cell with `classes`. Out-of-range positions are ignored.
    pub fn styled<I, S>(mut self, position: Vector, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.area.style(position, classes);
        self
    }

    pub fn area(&self) -> &RichTextArea {
        &self.area
    }

    pub fn text(&self) -> &TextArea {
        self.area.text()
    }

    pub fn size(&self) -> Vector {
        self.area.text().size()
    }

    pub fn center(&self) -> Vector {
        self.center
    }

    pub fn config(&self) -> SpriteConfig {
        self.config
    }

    /// Whether the glyph at sprite-local `position` is see-through.
    pub fn is_transparent_at(&self, position: Vector) -> bool {
        self.config.transparent_whitespace
            && self
                .area
                .text()
                .get(position)
                .is_some_and(char::is_whitespace)
    }
}
