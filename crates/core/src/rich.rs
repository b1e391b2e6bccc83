//! RichTextArea - a TextArea with per-cell style classes

use std::collections::{BTreeMap, BTreeSet};

use crate::text::TextArea;
use crate::types::Vector;

/// A set of class names attached to one cell.
///
/// Duplicates are suppressed and iteration is in sorted order, which is the
/// order names appear in baked markup.
pub type ClassSet = BTreeSet<String>;

/// Build a [`ClassSet`] from anything yielding string-like items.
pub fn class_set<I, S>(classes: I) -> ClassSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    classes.into_iter().map(Into::into).collect()
}

/// A [`TextArea`] plus a sparse map from buffer index to [`ClassSet`].
///
/// Every key in the span map is a valid index into the buffer. A missing key
/// means the cell is unstyled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichTextArea {
    text: TextArea,
    spans: BTreeMap<usize, ClassSet>,
}

impl RichTextArea {
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_text_area(TextArea::new(width, height))
    }

    pub fn from_text_area(text: TextArea) -> Self {
        Self {
            text,
            spans: BTreeMap::new(),
        }
    }

    pub fn text(&self) -> &TextArea {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut TextArea {
        &mut self.text
    }

    /// Styled cells in ascending index order.
    pub fn spans(&self) -> &BTreeMap<usize, ClassSet> {
        &self.spans
    }

    pub fn classes_at(&self, index: usize) -> Option<&ClassSet> {
        self.spans.get(&index)
    }

    fn span_index(&self, position: Vector) -> Option<usize> {
        usize::try_from(self.text.as_index(position))
            .ok()
            .filter(|&i| i < self.text.len())
    }

    /// Merge `classes` into the cell at `position`.
    ///
    /// Returns `false` when `position` maps outside the buffer. The check is
    /// on the flat index, so a column past the right edge styles the start
    /// of the row below.
    pub fn style<I, S>(&mut self, position: Vector, classes: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.span_index(position) {
            Some(i) => {
                self.union_at(i, classes);
                true
            }
            None => false,
        }
    }

    /// Replace the classes of the cell at `position`. Same bounds rule as
    /// [`style`](Self::style).
    pub fn restyle<I, S>(&mut self, position: Vector, classes: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.span_index(position) {
            Some(i) => {
                self.spans.insert(i, class_set(classes));
                true
            }
            None => false,
        }
    }

    /// Style every cell, row by row from the bottom.
    pub fn fill<I, S>(&mut self, classes: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let classes = class_set(classes);
        for y in 0..self.text.height() {
            for x in 0..self.text.width() {
                if !self.style(Vector::cell(x as i64, y as i64), classes.iter().cloned()) {
                    return false;
                }
            }
        }
        true
    }

    pub(crate) fn union_at<I, S>(&mut self, index: usize, classes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spans
            .entry(index)
            .or_default()
            .extend(classes.into_iter().map(Into::into));
    }

    pub(crate) fn replace_at(&mut self, index: usize, classes: ClassSet) {
        self.spans.insert(index, classes);
    }
}
