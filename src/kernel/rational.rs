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

use std::cmp::Ordering;

use rug::Rational;

use crate::geometry::Point;
use crate::kernel::{det2, det3, OrientationKernel};

/// Orientation kernel that evaluates every determinant in arbitrary
/// precision rational arithmetic. Each f64 coordinate converts to a
/// rational exactly, so the computed determinant is the true one.
#[derive(Clone, Copy, Debug, Default)]
pub struct RationalKernel;

impl OrientationKernel for RationalKernel {
    fn orient2d(&self, a: Point, b: Point, c: Point) -> f64 {
        signed_estimate(orient2d_exact(a, b, c))
    }

    fn orient3d(&self, a: Point, b: Point, c: Point, d: Point) -> f64 {
        signed_estimate(orient3d_exact(a, b, c, d))
    }
}

pub(crate) fn orient2d_exact(a: Point, b: Point, c: Point) -> Rational {
    let acx = rational(a[0]) - rational(c[0]);
    let acy = rational(a[1]) - rational(c[1]);
    let bcx = rational(b[0]) - rational(c[0]);
    let bcy = rational(b[1]) - rational(c[1]);
    det2([acx, acy], [bcx, bcy])
}

pub(crate) fn orient3d_exact(a: Point, b: Point, c: Point, d: Point) -> Rational {
    let row = |p: Point| {
        [
            rational(p[0]) - rational(a[0]),
            rational(p[1]) - rational(a[1]),
            rational(p[2]) - rational(a[2]),
        ]
    };
    det3(row(b), row(c), row(d))
}

/// Rounds an exact determinant to f64 without losing its sign: values too
/// small for f64 still come back as signed subnormals, and only an exact
/// zero becomes 0.0.
pub(crate) fn signed_estimate(det: Rational) -> f64 {
    let estimate = det.to_f64();
    if estimate != 0.0 {
        return estimate;
    }
    match det.cmp0() {
        Ordering::Equal => 0.0,
        Ordering::Greater => f64::MIN_POSITIVE,
        Ordering::Less => -f64::MIN_POSITIVE,
    }
}

fn rational(x: f64) -> Rational {
    match Rational::from_f64(x) {
        Some(r) => r,
        None => panic!("orientation predicate called with non-finite coordinate {x}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collinear_is_exactly_zero() {
        let k = RationalKernel;
        // collinear but awkwardly scaled
        let a = Point::new(1e-3, 1e-3, 0.0);
        let b = Point::new(3e-3, 3e-3, 0.0);
        let c = Point::new(0.125, 0.125, 0.0);
        assert_eq!(k.orient2d(a, b, c), 0.0);
    }

    #[test]
    fn sign_survives_cancellation() {
        let k = RationalKernel;
        // c sits a single ulp off the line through a and b
        let a = Point::new(0.0, 0.0, 0.0);
        let b = Point::new(1.0, 1.0, 0.0);
        let y = 0.5 + f64::EPSILON;
        let c = Point::new(0.5, y, 0.0);
        assert!(k.orient2d(a, b, c) > 0.0);
        let c = Point::new(0.5, 0.5 - f64::EPSILON / 2.0, 0.0);
        assert!(k.orient2d(a, b, c) < 0.0);
    }

    #[test]
    fn coplanar_is_exactly_zero() {
        let k = RationalKernel;
        let a = Point::new(0.0, 0.0, 0.25);
        let b = Point::new(1.0, 0.0, 0.25);
        let c = Point::new(0.0, 1.0, 0.25);
        let d = Point::new(0.375, 0.4375, 0.25);
        assert_eq!(k.orient3d(a, b, c, d), 0.0);
        let above = Point::new(0.375, 0.4375, 0.25 + 1e-300);
        assert!(k.orient3d(a, b, c, above) > 0.0);
    }

    #[test]
    #[should_panic(expected = "non-finite")]
    fn rejects_nan() {
        let k = RationalKernel;
        let a = Point::new(f64::NAN, 0.0, 0.0);
        k.orient2d(a, Point::origin(), Point::origin());
    }
}
