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

//! Statically filtered orientation kernel.
//!
//! The determinant is first evaluated in plain f64. A forward error bound
//! in the style of Shewchuk's adaptive predicates (the stage A filter)
//! certifies the sign whenever the magnitude clears `bound * permanent`,
//! where the permanent is the same expression with every subtraction of
//! products replaced by an addition of their absolute values. Inputs that
//! fail the filter, which in mesh intersection means nearly or exactly
//! degenerate configurations, are re-evaluated exactly in rational
//! arithmetic.
//!
//! Coordinates must be finite and the intermediate products must not
//! overflow; within that range the returned sign is exact.

use crate::geometry::Point;
use crate::kernel::rational::{orient2d_exact, orient3d_exact, signed_estimate};
use crate::kernel::OrientationKernel;

// Half an ulp of 1.0, the epsilon of Shewchuk's error analysis.
const EPSILON: f64 = f64::EPSILON / 2.0;
const ORIENT2D_BOUND: f64 = (3.0 + 16.0 * EPSILON) * EPSILON;
const ORIENT3D_BOUND: f64 = (7.0 + 56.0 * EPSILON) * EPSILON;

/// The default orientation kernel: fast f64 evaluation with an exact
/// rational fallback when the error bound cannot certify the sign.
#[derive(Clone, Copy, Debug, Default)]
pub struct FilteredKernel;

impl OrientationKernel for FilteredKernel {
    fn orient2d(&self, a: Point, b: Point, c: Point) -> f64 {
        let detleft = (a[0] - c[0]) * (b[1] - c[1]);
        let detright = (a[1] - c[1]) * (b[0] - c[0]);
        let det = detleft - detright;

        let detsum = detleft.abs() + detright.abs();
        if det.abs() >= ORIENT2D_BOUND * detsum {
            return det;
        }

        signed_estimate(orient2d_exact(a, b, c))
    }

    fn orient3d(&self, a: Point, b: Point, c: Point, d: Point) -> f64 {
        let bax = b[0] - a[0];
        let bay = b[1] - a[1];
        let baz = b[2] - a[2];
        let cax = c[0] - a[0];
        let cay = c[1] - a[1];
        let caz = c[2] - a[2];
        let dax = d[0] - a[0];
        let day = d[1] - a[1];
        let daz = d[2] - a[2];

        let caydaz = cay * daz;
        let cazday = caz * day;
        let caxdaz = cax * daz;
        let cazdax = caz * dax;
        let caxday = cax * day;
        let caydax = cay * dax;

        let det =
            bax * (caydaz - cazday) - bay * (caxdaz - cazdax) + baz * (caxday - caydax);

        let permanent = (caydaz.abs() + cazday.abs()) * bax.abs()
            + (caxdaz.abs() + cazdax.abs()) * bay.abs()
            + (caxday.abs() + caydax.abs()) * baz.abs();
        if det.abs() >= ORIENT3D_BOUND * permanent {
            return det;
        }

        signed_estimate(orient3d_exact(a, b, c, d))
    }
}
