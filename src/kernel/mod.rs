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

//! Orientation kernels.
//!
//! Every sidedness decision in this crate goes through the two primitives
//! below. Their contract is stronger than "approximately right": the sign
//! of the returned value is the true geometric orientation of the input
//! points, and the value is exactly zero precisely on degenerate input.
//! The magnitude is a usable approximation of the signed (doubled or
//! six-fold) simplex measure, which intersection construction exploits
//! when interpolating crossing points.
//!
//! Two implementations are provided. [`FilteredKernel`] evaluates the
//! determinant in floating point behind a forward error bound and falls
//! back to exact rational arithmetic only when the bound cannot certify
//! the sign. [`RationalKernel`] always takes the exact path; it is slower
//! and exists to cross-check the filter.

use std::ops::{Mul, Sub};

use crate::geometry::Point;

pub mod filtered;
pub mod rational;

pub use filtered::FilteredKernel;
pub use rational::RationalKernel;

/// The injected orientation primitives.
pub trait OrientationKernel {
    /// Twice the signed area of the triangle `(a, b, c)`.
    ///
    /// Returns a positive value if the triangle winds counter-clockwise,
    /// a negative value if it winds clockwise, and exactly zero if the
    /// three points are collinear. Only the first two coordinate slots
    /// participate.
    fn orient2d(&self, a: Point, b: Point, c: Point) -> f64;

    /// Six times the signed volume of the tetrahedron `(a, b, c, d)`.
    ///
    /// Returns a positive value if `d` lies on the side of plane `(a, b, c)`
    /// from which the triangle winds counter-clockwise, a negative value on
    /// the opposite side, and exactly zero if the four points are coplanar.
    fn orient3d(&self, a: Point, b: Point, c: Point, d: Point) -> f64;
}

/// 2x2 determinant over any scalar with owned ring operations, shared by
/// the floating point and rational evaluators.
pub(crate) fn det2<T>(r0: [T; 2], r1: [T; 2]) -> T
where
    T: Clone + Mul<Output = T> + Sub<Output = T>,
{
    let [a, b] = r0;
    let [c, d] = r1;
    a * d - b * c
}

/// 3x3 determinant by cofactor expansion along the first row.
pub(crate) fn det3<T>(r0: [T; 3], r1: [T; 3], r2: [T; 3]) -> T
where
    T: Clone + Mul<Output = T> + Sub<Output = T> + std::ops::Add<Output = T>,
{
    let m0 = det2([r1[1].clone(), r1[2].clone()], [r2[1].clone(), r2[2].clone()]);
    let m1 = det2([r1[0].clone(), r1[2].clone()], [r2[0].clone(), r2[2].clone()]);
    let m2 = det2([r1[0].clone(), r1[1].clone()], [r2[0].clone(), r2[1].clone()]);
    let [a, b, c] = r0;
    a * m0 - b * m1 + c * m2
}
