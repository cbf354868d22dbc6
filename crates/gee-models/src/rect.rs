//! Pixel-space rectangles produced by the region detector.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Axis-aligned rectangle in frame-pixel coordinates.
///
/// Width and height are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Rectangle {
    /// Left edge x-coordinate
    pub x: u32,
    /// Top edge y-coordinate
    pub y: u32,
    /// Rectangle width
    pub width: u32,
    /// Rectangle height
    pub height: u32,
}

impl Rectangle {
    /// Create a rectangle, rejecting zero-sized ones.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> ModelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ModelError::invalid_rectangle(format!(
                "zero-sized rectangle {}x{} at ({}, {})",
                width, height, x, y
            )));
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Build from signed detector output.
    ///
    /// Returns `None` for negative coordinates or non-positive sizes.
    pub fn from_signed(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if x < 0 || y < 0 || width <= 0 || height <= 0 {
            return None;
        }
        Some(Self {
            x: x as u32,
            y: y as u32,
            width: width as u32,
            height: height as u32,
        })
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Area in pixels.
    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True if `other` lies strictly inside `self` on all four sides.
    ///
    /// Shared edges do not count as containment.
    pub fn strictly_contains(&self, other: &Rectangle) -> bool {
        self.x < other.x
            && self.y < other.y
            && self.right() > other.right()
            && self.bottom() > other.bottom()
    }

    /// True if the rectangle fits inside a `width` x `height` frame.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width as u64 && self.bottom() <= height as u64
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.width, self.height)
    }
}

/// A detector hit: rectangle plus detector weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Detection {
    pub rect: Rectangle,
    /// Detector confidence (SVM margin for HOG)
    pub weight: f64,
}

impl Detection {
    pub fn new(rect: Rectangle, weight: f64) -> Self {
        Self { rect, weight }
    }
}
