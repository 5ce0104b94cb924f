//! Angle and projection helpers.
//!
//! Screen coordinates grow downward, so both functions flip the y axis to
//! work with angles the way they read on a conventional Cartesian grid.

use std::f32::consts::TAU;

/// A point in arena units.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Angle in radians from `origin` to `destination`, in `[0, 2π)`.
///
/// `(0,0) -> (1,-1)` is a quarter-pi (up and to the right on screen), not
/// 1.75π. Identical points yield `0.0`.
pub fn angle_to(origin: Point, destination: Point) -> f32 {
    let dx = destination.x - origin.x;
    let dy = destination.y - origin.y;
    let angle = (-dy).atan2(dx).rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if angle >= TAU {
        0.0
    } else {
        angle
    }
}

/// Move `pos` by `distance` along `angle`, compensating for screen y.
pub fn project(pos: Point, angle: f32, distance: f32) -> Point {
    Point {
        x: pos.x + angle.cos() * distance,
        y: pos.y - angle.sin() * distance,
    }
}

pub fn distance(a: Point, b: Point) -> f32 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Width and height of an axis-aligned box, in whole arena units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }
}

/// Integer screen-space rectangle (top-left corner plus size).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Rect anchored at `pos`; fractional coordinates truncate toward zero.
    pub fn at(pos: Point, size: Size) -> Self {
        Self {
            x: pos.x as i32,
            y: pos.y as i32,
            w: size.w,
            h: size.h,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
