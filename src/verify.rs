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

//! Optional exact-arithmetic cross-validation.
//!
//! Behind the `verify` cargo feature, every triangulation is checked for
//! degenerate simplices and pairwise interior overlap with the
//! [`RationalKernel`](crate::kernel::RationalKernel), and the net cut-cell
//! quadrature weights are checked against the bounds the inclusion-exclusion
//! identity guarantees. A violation panics: these conditions cannot occur
//! unless the predicate logic itself is wrong. With the feature disabled
//! every function here is an empty inline stub.

#[cfg(feature = "verify")]
mod enabled {
    use crate::geometry::util::{dominant_plane, flatten};
    use crate::geometry::{Point, Polyhedron, EPS_LARGE};
    use crate::kernel::{OrientationKernel, RationalKernel};

    /// Panics if the polyhedron contains a degenerate simplex or two
    /// simplices whose interiors overlap (detected via strict containment
    /// of one centroid in another simplex).
    pub fn check_triangulation(_points: &[Point], poly: &Polyhedron, gdim: usize) {
        let k = RationalKernel;
        for s in poly {
            assert!(
                s.measure() > 0.0,
                "verify: triangulation produced a degenerate simplex {s:?}"
            );
        }
        for (i, a) in poly.iter().enumerate() {
            for b in poly.iter().skip(i + 1) {
                let overlap = strictly_contains(&k, a, b.centroid(), gdim)
                    || strictly_contains(&k, b, a.centroid(), gdim);
                assert!(
                    !overlap,
                    "verify: triangulation simplices overlap:\n{a:?}\n{b:?}"
                );
            }
        }
    }

    /// Panics if a net cut-cell weight sum escapes the interval the
    /// inclusion-exclusion identity allows, `[0, cell measure]`, widened
    /// by a roundoff margin.
    pub fn check_net_weight(sum: f64, cell_measure: f64) {
        let slack = EPS_LARGE * (1.0 + cell_measure);
        assert!(
            sum >= -slack && sum <= cell_measure + slack,
            "verify: net quadrature weight {sum} outside [0, {cell_measure}]"
        );
    }

    fn strictly_contains<K: OrientationKernel>(
        k: &K,
        simplex: &crate::geometry::Simplex,
        x: Point,
        gdim: usize,
    ) -> bool {
        let p = simplex.points();
        match simplex.tdim() {
            1 => {
                let axis = crate::geometry::util::major_axis(p);
                let (lo, hi) = if p[0][axis] <= p[1][axis] {
                    (p[0][axis], p[1][axis])
                } else {
                    (p[1][axis], p[0][axis])
                };
                lo < x[axis] && x[axis] < hi
            }
            2 => {
                let (p0, p1, p2, x) = if gdim == 3 {
                    let n = (p[1] - p[0]).cross(p[2] - p[0]);
                    let (i, j) = dominant_plane(n);
                    (
                        flatten(p[0], i, j),
                        flatten(p[1], i, j),
                        flatten(p[2], i, j),
                        flatten(x, i, j),
                    )
                } else {
                    (p[0], p[1], p[2], x)
                };
                let o01 = k.orient2d(p0, p1, x);
                let o12 = k.orient2d(p1, p2, x);
                let o20 = k.orient2d(p2, p0, x);
                (o01 > 0.0 && o12 > 0.0 && o20 > 0.0) || (o01 < 0.0 && o12 < 0.0 && o20 < 0.0)
            }
            3 => {
                let o0 = k.orient3d(p[0], p[1], p[2], x);
                let o1 = k.orient3d(p[0], p[1], p[3], x);
                let o2 = k.orient3d(p[0], p[2], p[3], x);
                let o3 = k.orient3d(p[1], p[2], p[3], x);
                let reference = k.orient3d(p[0], p[1], p[2], p[3]);
                reference != 0.0
                    && reference * o0 > 0.0
                    && reference * o1 < 0.0
                    && reference * o2 > 0.0
                    && reference * o3 < 0.0
            }
            _ => false,
        }
    }
}

#[cfg(feature = "verify")]
pub use enabled::{check_net_weight, check_triangulation};

#[cfg(not(feature = "verify"))]
#[inline(always)]
pub fn check_triangulation(
    _points: &[crate::geometry::Point],
    _poly: &crate::geometry::Polyhedron,
    _gdim: usize,
) {
}

#[cfg(not(feature = "verify"))]
#[inline(always)]
pub fn check_net_weight(_sum: f64, _cell_measure: f64) {}
