//! The calibration frame: a styled cross sprite plus labels clipped at each
//! corner of the grid. Handy for checking a front-end's orientation and
//! clipping against known markup.

use std::sync::Arc;

use crate::core::{Canvas, Sprite};
use crate::types::{Vector, WINDOW_HEIGHT, WINDOW_WIDTH};

pub const CROSS_CLASS: &str = "red-glow";

/// A 3×3 cross pivoting on its middle cell.
pub fn cross_sprite() -> Sprite {
    Sprite::new(3, 3, " | -+- | ")
        .with_center(Vector::ONE)
        .filled([CROSS_CLASS])
}

/// Build the calibration canvas.
///
/// The cross sits with its centre at (1, 1). The labels `-1`, `2-`, `-3`
/// and `4` are placed so that only the digits land on the grid, one in each
/// corner, and the bottom-left cell is styled.
pub fn calibration_canvas() -> Canvas {
    let size = Vector::cell(WINDOW_WIDTH as i64, WINDOW_HEIGHT as i64);
    let mut canvas = Canvas::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    canvas.put_sprite(Arc::new(cross_sprite()), Vector::ONE);

    let background = canvas.text_area_mut();
    background.style(Vector::ZERO, [CROSS_CLASS]);

    let text = background.text_mut();
    text.place(Vector::ZERO - Vector::RIGHT, "-1", false);
    text.place(Vector::new(size.x - 1.0, 0.0), "2-", false);
    text.place(Vector::new(-1.0, size.y - 1.0), "-3", false);
    text.place(size - Vector::ONE, "4", false);
    canvas
}
