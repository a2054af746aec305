// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 The cutcell developers
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

/// A point (or displacement) with three coordinate slots.
///
/// Geometry of every geometric dimension is carried in the same type.
/// Coordinates beyond the active dimension are zero, so norms, distances
/// and cross products computed over all three slots are valid in 1d and
/// 2d as well.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub coords: [f64; 3],
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point { coords: [x, y, z] }
    }

    pub fn origin() -> Self {
        Point { coords: [0.0; 3] }
    }

    pub fn x(&self) -> f64 {
        self.coords[0]
    }

    pub fn y(&self) -> f64 {
        self.coords[1]
    }

    pub fn z(&self) -> f64 {
        self.coords[2]
    }

    pub fn dot(&self, other: Point) -> f64 {
        self.coords[0] * other.coords[0]
            + self.coords[1] * other.coords[1]
            + self.coords[2] * other.coords[2]
    }

    pub fn cross(&self, other: Point) -> Point {
        Point::new(
            self.coords[1] * other.coords[2] - self.coords[2] * other.coords[1],
            self.coords[2] * other.coords[0] - self.coords[0] * other.coords[2],
            self.coords[0] * other.coords[1] - self.coords[1] * other.coords[0],
        )
    }

    pub fn squared_norm(&self) -> f64 {
        self.dot(*self)
    }

    pub fn norm(&self) -> f64 {
        self.squared_norm().sqrt()
    }

    pub fn squared_distance(&self, other: Point) -> f64 {
        (*self - other).squared_norm()
    }

    /// Componentwise closeness, used when merging intersection points.
    pub fn close_to(&self, other: Point, tol: f64) -> bool {
        (self.coords[0] - other.coords[0]).abs() <= tol
            && (self.coords[1] - other.coords[1]).abs() <= tol
            && (self.coords[2] - other.coords[2]).abs() <= tol
    }
}

impl Index<usize> for Point {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.coords[i]
    }
}

impl IndexMut<usize> for Point {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.coords[i]
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(
            self.coords[0] + rhs.coords[0],
            self.coords[1] + rhs.coords[1],
            self.coords[2] + rhs.coords[2],
        )
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(
            self.coords[0] - rhs.coords[0],
            self.coords[1] - rhs.coords[1],
            self.coords[2] - rhs.coords[2],
        )
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.coords[0], -self.coords[1], -self.coords[2])
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, s: f64) -> Point {
        Point::new(self.coords[0] * s, self.coords[1] * s, self.coords[2] * s)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, s: f64) -> Point {
        Point::new(self.coords[0] / s, self.coords[1] / s, self.coords[2] / s)
    }
}
