//! Sprite sheet - the shared, read-only sprites the game draws with.

use std::sync::Arc;

use crate::core::Sprite;
use crate::types::Vector;

pub const SHUTTLE_CLASS: &str = "blue-glow";
pub const BULLET_CLASS: &str = "blue-glow";
pub const ASTEROID_CLASS: &str = "red-glow";
pub const STAR_CLASS: &str = "dim";

/// Asteroid sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsteroidKind {
    /// 1x1 rock
    Small,
    /// 3x3 rock
    Large,
}

impl AsteroidKind {
    pub fn hit_points(self) -> u8 {
        match self {
            AsteroidKind::Small => 1,
            AsteroidKind::Large => 3,
        }
    }

    /// Points awarded for destroying one.
    pub fn points(self) -> u32 {
        match self {
            AsteroidKind::Small => 10,
            AsteroidKind::Large => 50,
        }
    }

    /// Leftward speed range in cells per second.
    pub fn speed_range(self) -> (f64, f64) {
        match self {
            AsteroidKind::Small => (4.0, 7.0),
            AsteroidKind::Large => (2.5, 4.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AsteroidKind::Small => "small",
            AsteroidKind::Large => "large",
        }
    }
}

/// One instance of every sprite; entities share these through `Arc`.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub shuttle: Arc<Sprite>,
    pub bullet: Arc<Sprite>,
    pub small_asteroid: Arc<Sprite>,
    pub large_asteroid: Arc<Sprite>,
}

impl SpriteSheet {
    pub fn new() -> Self {
        Self {
            shuttle: Arc::new(Sprite::glyph('>').filled([SHUTTLE_CLASS])),
            bullet: Arc::new(Sprite::glyph('-').filled([BULLET_CLASS])),
            small_asteroid: Arc::new(Sprite::glyph('@').filled([ASTEROID_CLASS])),
            large_asteroid: Arc::new(
                Sprite::new(3, 3, ".-.(@)'-'")
                    .with_center(Vector::ONE)
                    .filled([ASTEROID_CLASS]),
            ),
        }
    }

    pub fn asteroid(&self, kind: AsteroidKind) -> &Arc<Sprite> {
        match kind {
            AsteroidKind::Small => &self.small_asteroid,
            AsteroidKind::Large => &self.large_asteroid,
        }
    }
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::new()
    }
}
