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

//! Signed-stage inclusion-exclusion over intersection polyhedra.
//!
//! The measure of a union of regions is the alternating sum of the
//! measures of the intersections of its subsets. The stages realize that
//! sum without enumerating subsets twice: stage 0 holds the given regions,
//! and stage `s` holds each stage `s - 1` polyhedron intersected with
//! every initial polyhedron of strictly smaller index than any it already
//! contains. Each stage contributes quadrature weights with the sign
//! `(-1)^s`, times a caller factor that is `+1` for overlap rules and
//! `-1` for the interface variant, where the union is subtracted from an
//! own-measure term instead of standing alone.

use crate::geometry::Polyhedron;
use crate::intersection::intersect;
use crate::kernel::OrientationKernel;
use crate::quadrature::{compute_quadrature_rule, QuadratureRule};
use crate::triangulation::triangulate;

/// Accumulates the signed quadrature of the union of `initial` into `out`.
///
/// Empty and degenerate intersection fragments are dropped silently;
/// exact zero-measure coincidences are routine at shared mesh boundaries
/// and must not contribute.
pub(crate) fn accumulate_union<K: OrientationKernel>(
    out: &mut QuadratureRule,
    kernel: &K,
    initial: &[Polyhedron],
    gdim: usize,
    tdim: usize,
    order: usize,
    factor: f64,
) {
    // stage 0: the regions themselves, tagged with their index so later
    // stages only descend to smaller indices and no pair is counted twice
    let mut previous: Vec<(usize, Polyhedron)> = Vec::with_capacity(initial.len());
    let mut sign = factor;
    for (m, poly) in initial.iter().enumerate() {
        if poly.is_empty() {
            continue;
        }
        accumulate_polyhedron(out, poly, gdim, order, sign);
        previous.push((m, poly.clone()));
    }

    for _stage in 1..initial.len() {
        sign = -sign;
        let mut next: Vec<(usize, Polyhedron)> = Vec::new();
        for (lowest, poly) in &previous {
            for m in 0..*lowest {
                if initial[m].is_empty() {
                    continue;
                }
                let inter = intersect_polyhedra(kernel, poly, &initial[m], gdim, tdim);
                if inter.is_empty() {
                    continue;
                }
                accumulate_polyhedron(out, &inter, gdim, order, sign);
                next.push((m, inter));
            }
        }
        if next.is_empty() {
            break;
        }
        previous = next;
    }
}

fn accumulate_polyhedron(
    out: &mut QuadratureRule,
    poly: &Polyhedron,
    gdim: usize,
    order: usize,
    sign: f64,
) {
    for simplex in poly {
        out.append_scaled(&compute_quadrature_rule(simplex, gdim, order), sign);
    }
}

/// Intersects two simplicial decompositions piecewise. Both inputs have
/// disjoint interiors, so the pairwise pieces do too.
fn intersect_polyhedra<K: OrientationKernel>(
    kernel: &K,
    a: &Polyhedron,
    b: &Polyhedron,
    gdim: usize,
    tdim: usize,
) -> Polyhedron {
    let mut result = Polyhedron::new(tdim);
    for sa in a {
        for sb in b {
            let points = intersect(kernel, sa, sb, gdim);
            if points.is_empty() {
                continue;
            }
            for piece in &triangulate(kernel, &points, gdim, tdim) {
                result.push(piece.clone());
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Simplex};
    use crate::kernel::FilteredKernel;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Polyhedron {
        let mut poly = Polyhedron::new(2);
        let (a, b, c, d) = (
            Point::new(x0, y0, 0.0),
            Point::new(x1, y0, 0.0),
            Point::new(x1, y1, 0.0),
            Point::new(x0, y1, 0.0),
        );
        poly.push(Simplex::triangle(a, b, c));
        poly.push(Simplex::triangle(a, c, d));
        poly
    }

    #[test]
    fn union_of_overlapping_squares() {
        let k = FilteredKernel;
        // two unit squares overlapping in a 0.5 x 1 strip: union 1.5
        let initial = [square(0.0, 0.0, 1.0, 1.0), square(0.5, 0.0, 1.5, 1.0)];
        let mut rule = QuadratureRule::new(2);
        accumulate_union(&mut rule, &k, &initial, 2, 2, 2, 1.0);
        assert!((rule.sum_weights() - 1.5).abs() < 1e-13);
    }

    #[test]
    fn triple_overlap_counted_once() {
        let k = FilteredKernel;
        // three staggered squares all containing [0.5, 1] x [0, 1]
        let initial = [
            square(0.0, 0.0, 1.0, 1.0),
            square(0.25, 0.0, 1.25, 1.0),
            square(0.5, 0.0, 1.5, 1.0),
        ];
        let mut rule = QuadratureRule::new(2);
        accumulate_union(&mut rule, &k, &initial, 2, 2, 2, 1.0);
        assert!((rule.sum_weights() - 1.5).abs() < 1e-13);
    }

    #[test]
    fn disjoint_regions_just_add() {
        let k = FilteredKernel;
        let initial = [square(0.0, 0.0, 1.0, 1.0), square(2.0, 0.0, 3.0, 1.0)];
        let mut rule = QuadratureRule::new(2);
        accumulate_union(&mut rule, &k, &initial, 2, 2, 1, -1.0);
        assert!((rule.sum_weights() + 2.0).abs() < 1e-13);
    }
}
