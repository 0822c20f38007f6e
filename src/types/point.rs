//! A coordinate in canvas space.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A coordinate in canvas space (origin top-left, y grows downwards).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

impl Point {
  pub const fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }
}

impl Add for Point {
  type Output = Point;

  fn add(self, rhs: Point) -> Point {
    Point::new(self.x + rhs.x, self.y + rhs.y)
  }
}

impl Sub for Point {
  type Output = Point;

  fn sub(self, rhs: Point) -> Point {
    Point::new(self.x - rhs.x, self.y - rhs.y)
  }
}
