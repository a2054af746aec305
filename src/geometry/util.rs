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

use crate::geometry::Point;

/// Removes near-duplicate points, keeping the first occurrence.
///
/// Two points are duplicates when every coordinate differs by at most
/// `tol`. Quadratic in the number of points, which stays small here:
/// the point sets come from simplex-simplex intersections.
pub fn unique_points(points: &[Point], tol: f64) -> Vec<Point> {
    let mut unique: Vec<Point> = Vec::with_capacity(points.len());
    'candidates: for p in points {
        for q in &unique {
            if p.close_to(*q, tol) {
                continue 'candidates;
            }
        }
        unique.push(*p);
    }
    unique
}

/// The coordinate axis along which the point set extends the most.
pub fn major_axis(points: &[Point]) -> usize {
    let mut lo = [f64::INFINITY; 3];
    let mut hi = [f64::NEG_INFINITY; 3];
    for p in points {
        for i in 0..3 {
            lo[i] = lo[i].min(p[i]);
            hi[i] = hi[i].max(p[i]);
        }
    }
    let ext = [hi[0] - lo[0], hi[1] - lo[1], hi[2] - lo[2]];
    let mut axis = 0;
    for i in 1..3 {
        if ext[i] > ext[axis] {
            axis = i;
        }
    }
    axis
}

/// The two coordinate axes spanning the projection plane for a plane with
/// normal `n`: the axis with the largest normal component is dropped, so
/// projecting along it is a bijection on the plane.
pub fn dominant_plane(n: Point) -> (usize, usize) {
    let ax = n[0].abs();
    let ay = n[1].abs();
    let az = n[2].abs();
    if az >= ax && az >= ay {
        (0, 1)
    } else if ay >= ax {
        (0, 2)
    } else {
        (1, 2)
    }
}

/// Projects a point to the axis plane spanned by `i` and `j`, placing the
/// two kept coordinates in the first two slots.
pub fn flatten(p: Point, i: usize, j: usize) -> Point {
    Point::new(p[i], p[j], 0.0)
}

/// Inverse of [`flatten`] for points on the plane through `p_ref` with
/// normal `n`: restores the dropped coordinate from the plane equation.
/// The caller must have chosen `(i, j)` via [`dominant_plane`], so the
/// divisor is the largest component of `n`.
pub fn lift(p2: Point, i: usize, j: usize, n: Point, p_ref: Point) -> Point {
    let d = 3 - i - j;
    let mut p = Point::origin();
    p[i] = p2[0];
    p[j] = p2[1];
    p[d] = (n.dot(p_ref) - n[i] * p2[0] - n[j] * p2[1]) / n[d];
    p
}
