//! Entity - a sprite at a world position

use std::sync::Arc;

use crate::sprite::Sprite;
use crate::types::Vector;

/// A shared [`Sprite`] placed at a world position.
///
/// Many entities can point at the same sprite; the sprite is never mutated
/// through an entity.
#[derive(Debug, Clone)]
pub struct Entity {
    sprite: Arc<Sprite>,
    position: Vector,
}

impl Entity {
    pub fn new(sprite: Arc<Sprite>, position: Vector) -> Self {
        Self { sprite, position }
    }

    pub fn sprite(&self) -> &Arc<Sprite> {
        &self.sprite
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn set_position(&mut self, position: Vector) {
        self.position = position;
    }

    pub fn translate(&mut self, offset: Vector) {
        self.position += offset;
    }

    /// The sprite's placement anchor in world space, always a whole cell.
    pub fn bottom_left(&self) -> Vector {
        (self.position.round() - self.sprite.center()).round()
    }

    /// Inclusive upper corner of the sprite's bounding box in world space.
    pub fn top_right(&self) -> Vector {
        self.bottom_left() + self.sprite.size() - Vector::ONE
    }

    pub fn global_to_sprite_space(&self, global: Vector) -> Vector {
        global - self.bottom_left()
    }

    /// Glyph-exact collision test.
    ///
    /// Walks every cell of `other`'s sprite and reports a hit on the first
    /// cell that lands inside this entity's bounding box where neither side
    /// is transparent whitespace.
    pub fn is_colliding_with(&self, other: &Entity) -> bool {
        let lower = self.bottom_left();
        let upper = self.top_right();
        let origin = other.bottom_left();
        let other_sprite = other.sprite.as_ref();
        let size = other_sprite.text();

        for y in 0..size.height() {
            for x in 0..size.width() {
                let local = Vector::cell(x as i64, y as i64);
                if other_sprite.is_transparent_at(local) {
                    continue;
                }
                let world = origin + local;
                if !world.within(lower, upper) {
                    continue;
                }
                if self.sprite.is_transparent_at(self.global_to_sprite_space(world)) {
                    continue;
                }
                return true;
            }
        }
        false
    }
}

/// Two entities are equal when they share the same sprite instance and
/// position.
impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.sprite, &other.sprite) && self.position == other.position
    }
}
