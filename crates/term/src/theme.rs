//! Theme: style classes from the compositor mapped to terminal cell styles.
//!
//! A class only overrides the attributes it sets, so classes stack. Class sets
//! iterate in sorted order and are applied in that order; later classes win.

use std::collections::HashMap;

use crate::core::ClassSet;
use crate::fb::{CellStyle, Rgb};

/// Style changes contributed by one class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassStyle {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub bold: Option<bool>,
    pub dim: Option<bool>,
}

impl ClassStyle {
    pub const fn glow(fg: Rgb) -> Self {
        Self {
            fg: Some(fg),
            bg: None,
            bold: Some(true),
            dim: None,
        }
    }

    pub fn apply(&self, mut style: CellStyle) -> CellStyle {
        if let Some(fg) = self.fg {
            style.fg = fg;
        }
        if let Some(bg) = self.bg {
            style.bg = bg;
        }
        if let Some(bold) = self.bold {
            style.bold = bold;
        }
        if let Some(dim) = self.dim {
            style.dim = dim;
        }
        style
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    base: CellStyle,
    classes: HashMap<String, ClassStyle>,
}

impl Theme {
    /// A theme with no classes: every cell gets `base`.
    pub fn empty(base: CellStyle) -> Self {
        Self {
            base,
            classes: HashMap::new(),
        }
    }

    pub fn with_class(mut self, name: impl Into<String>, style: ClassStyle) -> Self {
        self.classes.insert(name.into(), style);
        self
    }

    pub fn base(&self) -> CellStyle {
        self.base
    }

    pub fn class(&self, name: &str) -> Option<&ClassStyle> {
        self.classes.get(name)
    }

    /// Resolve the style of a cell carrying `classes`. Unknown classes are
    /// ignored.
    pub fn resolve<'a, I>(&self, classes: I) -> CellStyle
    where
        I: IntoIterator<Item = &'a String>,
    {
        classes
            .into_iter()
            .filter_map(|name| self.classes.get(name.as_str()))
            .fold(self.base, |style, class| class.apply(style))
    }

    pub fn resolve_set(&self, classes: Option<&ClassSet>) -> CellStyle {
        match classes {
            Some(set) => self.resolve(set),
            None => self.base,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::empty(CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(10, 10, 20),
            bold: false,
            dim: false,
        })
        .with_class("blue-glow", ClassStyle::glow(Rgb::new(90, 170, 255)))
        .with_class("red-glow", ClassStyle::glow(Rgb::new(255, 90, 80)))
        .with_class("green-glow", ClassStyle::glow(Rgb::new(100, 230, 120)))
        .with_class("yellow-glow", ClassStyle::glow(Rgb::new(250, 220, 90)))
        .with_class(
            "dim",
            ClassStyle {
                fg: Some(Rgb::new(120, 120, 140)),
                dim: Some(true),
                ..ClassStyle::default()
            },
        )
    }
}
