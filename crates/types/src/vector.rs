//! 2D vector used for grid positions, world positions and sizes.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// An immutable 2D point.
///
/// Components are real numbers so entities can move by fractional amounts
/// per frame; they are rounded to whole cells wherever a vector is mapped
/// onto a grid.
///
/// # Examples
///
/// ```
/// use ascii_arcade_types::Vector;
///
/// let p = Vector::new(2.0, 3.0) + Vector::UP;
/// assert_eq!(p, Vector::new(2.0, 4.0));
/// assert!(p.within(Vector::ZERO, Vector::new(5.0, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector::new(0.0, 0.0);
    pub const ONE: Vector = Vector::new(1.0, 1.0);

    pub const UP: Vector = Vector::new(0.0, 1.0);
    pub const DOWN: Vector = Vector::new(0.0, -1.0);
    pub const LEFT: Vector = Vector::new(-1.0, 0.0);
    pub const RIGHT: Vector = Vector::new(1.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build from whole-cell coordinates.
    pub fn cell(x: i64, y: i64) -> Self {
        Self::new(x as f64, y as f64)
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    pub fn ceil(self) -> Self {
        Self::new(self.x.ceil(), self.y.ceil())
    }

    /// Round each component to the nearest whole number, halves toward +∞.
    ///
    /// ```
    /// use ascii_arcade_types::Vector;
    ///
    /// assert_eq!(Vector::new(0.5, -0.5).round(), Vector::new(1.0, 0.0));
    /// assert_eq!(Vector::new(1.4, -1.6).round(), Vector::new(1.0, -2.0));
    /// ```
    pub fn round(self) -> Self {
        Self::new(round_half_up(self.x), round_half_up(self.y))
    }

    /// Whether this point lies in the rectangle spanned by `lower` and
    /// `upper`, both corners inclusive.
    pub fn within(self, lower: Vector, upper: Vector) -> bool {
        self.x >= lower.x && self.x <= upper.x && self.y >= lower.y && self.y <= upper.y
    }
}

/// Rounds `v` to the nearest integer with ties going up.
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, factor: f64) -> Vector {
        self.scale(factor)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.scale(-1.0)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Vector) {
        *self = *self - rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_returns_new_values() {
        let a = Vector::new(1.0, 2.0);
        let b = Vector::new(0.5, -1.0);

        assert_eq!(a + b, Vector::new(1.5, 1.0));
        assert_eq!(a - b, Vector::new(0.5, 3.0));
        assert_eq!(a * 2.0, Vector::new(2.0, 4.0));
        assert_eq!(-a, Vector::new(-1.0, -2.0));

        // Operands are untouched.
        assert_eq!(a, Vector::new(1.0, 2.0));
        assert_eq!(b, Vector::new(0.5, -1.0));
    }

    #[test]
    fn within_is_inclusive() {
        let lower = Vector::ZERO;
        let upper = Vector::new(4.0, 2.0);
        assert!(Vector::new(0.0, 0.0).within(lower, upper));
        assert!(Vector::new(4.0, 2.0).within(lower, upper));
        assert!(!Vector::new(4.1, 2.0).within(lower, upper));
        assert!(!Vector::new(-0.1, 0.0).within(lower, upper));
    }

    #[test]
    fn floor_and_ceil() {
        let v = Vector::new(1.2, -1.2);
        assert_eq!(v.floor(), Vector::new(1.0, -2.0));
        assert_eq!(v.ceil(), Vector::new(2.0, -1.0));
    }
}
