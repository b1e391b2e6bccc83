//! Canvas - a background grid plus an ordered list of entities
//!
//! Baking never touches the canvas itself: [`Canvas::compose`] copies the
//! background (buffer and spans) and composites every entity onto the copy,
//! then [`Canvas::bake`] serializes the copy into markup.

use std::sync::Arc;

use crate::entity::Entity;
use crate::markup;
use crate::rich::RichTextArea;
use crate::sprite::Sprite;
use crate::types::Vector;

/// Stable handle to an entity placed on a [`Canvas`].
///
/// Handles stay valid when other entities are removed, unlike draw-order
/// indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A static background plus entities drawn over it in insertion order.
#[derive(Debug, Clone)]
pub struct Canvas {
    text_area: RichTextArea,
    entities: Vec<(EntityId, Entity)>,
    next_id: u64,
}

impl Canvas {
    /// A canvas with a blank, unstyled background.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_text_area(RichTextArea::new(width, height))
    }

    pub fn with_text_area(text_area: RichTextArea) -> Self {
        Self {
            text_area,
            entities: Vec::new(),
            next_id: 0,
        }
    }

    pub fn text_area(&self) -> &RichTextArea {
        &self.text_area
    }

    pub fn text_area_mut(&mut self) -> &mut RichTextArea {
        &mut self.text_area
    }

    pub fn size(&self) -> Vector {
        self.text_area.text().size()
    }

    /// Append `entity` on top of everything placed so far.
    pub fn put(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push((id, entity));
        id
    }

    pub fn put_sprite(&mut self, sprite: Arc<Sprite>, position: Vector) -> EntityId {
        self.put(Entity::new(sprite, position))
    }

    /// Remove an entity, keeping the draw order of the rest.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.index_of(id)?;
        Some(self.entities.remove(index).1)
    }

    /// Current draw-order position of `id`.
    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|(eid, _)| *eid == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|(eid, _)| *eid == id)
            .map(|(_, e)| e)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities
            .iter_mut()
            .find(|(eid, _)| *eid == id)
            .map(|(_, e)| e)
    }

    /// Entities in draw order.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(id, e)| (*id, e))
    }

    /// Keep only the entities for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(EntityId, &Entity) -> bool) {
        self.entities.retain(|(id, e)| keep(*id, e));
    }

    /// Drop every entity. The background is kept.
    pub fn clear_entities(&mut self) {
        self.entities.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Composite every entity onto a copy of the background.
    pub fn compose(&self) -> RichTextArea {
        let mut baked = self.text_area.clone();
        for (_, entity) in &self.entities {
            composite(&mut baked, entity);
        }
        baked
    }

    /// Composite and serialize to markup.
    ///
    /// Calling this repeatedly without changing the canvas yields the same
    /// string.
    pub fn bake(&self) -> String {
        markup::serialize(&self.compose())
    }
}

fn composite(dest: &mut RichTextArea, entity: &Entity) {
    let sprite = entity.sprite();
    let config = sprite.config();
    let source = sprite.area();
    let glyphs = source.text();
    let anchor = entity.bottom_left();

    // Buffer rows are stored top first; row r sits at local y = height-1-r.
    for r in 0..glyphs.height() {
        let line: String = glyphs.row(r).iter().collect();
        let local_y = (glyphs.height() - 1 - r) as i64;
        dest.text_mut().place(
            anchor + Vector::cell(0, local_y),
            &line,
            config.transparent_whitespace,
        );
    }

    for (&index, classes) in source.spans() {
        let glyph = glyphs.char_at(index).unwrap_or(' ');
        if config.transparent_whitespace && glyph.is_whitespace() {
            continue;
        }
        let target = anchor + glyphs.as_vector(index);
        if !dest.text().contains(target) {
            continue;
        }
        let dest_index = dest.text().as_index(target) as usize;
        if config.transparent_styling {
            dest.union_at(dest_index, classes.iter().cloned());
        } else {
            dest.replace_at(dest_index, classes.clone());
        }
    }
}
