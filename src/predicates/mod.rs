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

//! Collision predicates for simplex pairs.
//!
//! A collision is a non-empty intersection of the two simplices as closed
//! point sets, so touching at a single vertex counts. Every sidedness
//! decision goes through the orientation kernel; the only raw coordinate
//! comparisons left are interval tests along a single axis and squared
//! distance bounds for points already known to be collinear, both of
//! which are exact.
//!
//! [`collides`] dispatches on the topological dimensions of its operands
//! and the geometric dimension. The predicate is symmetric, so operands
//! arrive in either order.

mod tet_tet;

pub use tet_tet::collides_tetrahedron_tetrahedron_3d;

use crate::geometry::util::{dominant_plane, flatten};
use crate::geometry::{Point, Simplex};
use crate::kernel::OrientationKernel;

pub(crate) fn unsupported_dimensions(function: &str, d0: usize, d1: usize, gdim: usize) -> ! {
    panic!("{function}: unsupported dimension combination (d0 = {d0}, d1 = {d1}, gdim = {gdim})");
}

const TRIANGLE_EDGES: [(usize, usize); 3] = [(0, 1), (1, 2), (2, 0)];
const TETRAHEDRON_FACES: [(usize, usize, usize); 4] = [(1, 2, 3), (0, 2, 3), (0, 1, 3), (0, 1, 2)];

/// Do two simplices collide?
///
/// Dispatches on `(tdim(a), tdim(b), gdim)`. Panics on a dimension
/// combination outside `0 <= tdim <= gdim <= 3`.
pub fn collides<K: OrientationKernel>(k: &K, a: &Simplex, b: &Simplex, gdim: usize) -> bool {
    let (a, b) = if a.tdim() >= b.tdim() { (a, b) } else { (b, a) };
    let p = a.points();
    let q = b.points();

    match (a.tdim(), b.tdim(), gdim) {
        (0, 0, 1..=3) => collides_point_point(p[0], q[0], gdim),
        (1, 0, 1) => collides_segment_point_1d(p[0][0], p[1][0], q[0][0]),
        (1, 0, 2) => collides_segment_point_2d(k, p[0], p[1], q[0]),
        (1, 0, 3) => collides_segment_point_3d(k, p[0], p[1], q[0]),
        (1, 1, 1) => collides_segment_segment_1d(p[0][0], p[1][0], q[0][0], q[1][0]),
        (1, 1, 2) => collides_segment_segment_2d(k, p[0], p[1], q[0], q[1]),
        (1, 1, 3) => collides_segment_segment_3d(k, p[0], p[1], q[0], q[1]),
        (2, 0, 2) => collides_triangle_point_2d(k, p[0], p[1], p[2], q[0]),
        (2, 0, 3) => collides_triangle_point_3d(k, p[0], p[1], p[2], q[0]),
        (2, 1, 2) => collides_triangle_segment_2d(k, p[0], p[1], p[2], q[0], q[1]),
        (2, 1, 3) => collides_triangle_segment_3d(k, p[0], p[1], p[2], q[0], q[1]),
        (2, 2, 2) => collides_triangle_triangle_2d(k, p[0], p[1], p[2], q[0], q[1], q[2]),
        (2, 2, 3) => collides_triangle_triangle_3d(k, p[0], p[1], p[2], q[0], q[1], q[2]),
        (3, 0, 3) => collides_tetrahedron_point_3d(k, p[0], p[1], p[2], p[3], q[0]),
        (3, 1, 3) => collides_tetrahedron_segment_3d(k, p[0], p[1], p[2], p[3], q[0], q[1]),
        (3, 2, 3) => collides_tetrahedron_triangle_3d(k, p[0], p[1], p[2], p[3], q[0], q[1], q[2]),
        (3, 3, 3) => collides_tetrahedron_tetrahedron_3d(
            [p[0], p[1], p[2], p[3]],
            [q[0], q[1], q[2], q[3]],
        ),
        (d0, d1, gdim) => unsupported_dimensions("collides", d0, d1, gdim),
    }
}

pub fn collides_point_point(p: Point, q: Point, gdim: usize) -> bool {
    (0..gdim).all(|i| p[i] == q[i])
}

pub fn collides_segment_point_1d(p0: f64, p1: f64, point: f64) -> bool {
    let (a, b) = if p0 <= p1 { (p0, p1) } else { (p1, p0) };
    a <= point && point <= b
}

/// Point on a closed segment: collinear, and no farther from either
/// endpoint than the endpoints are from each other.
pub fn collides_segment_point_2d<K: OrientationKernel>(
    k: &K,
    p0: Point,
    p1: Point,
    point: Point,
) -> bool {
    if k.orient2d(p0, p1, point) != 0.0 {
        return false;
    }
    let length2 = p0.squared_distance(p1);
    point.squared_distance(p0) <= length2 && point.squared_distance(p1) <= length2
}

/// Same as the 2d test; collinearity in 3d holds exactly when it holds in
/// all three axis plane projections.
pub fn collides_segment_point_3d<K: OrientationKernel>(
    k: &K,
    p0: Point,
    p1: Point,
    point: Point,
) -> bool {
    for (i, j) in [(0, 1), (0, 2), (1, 2)] {
        if k.orient2d(flatten(p0, i, j), flatten(p1, i, j), flatten(point, i, j)) != 0.0 {
            return false;
        }
    }
    let length2 = p0.squared_distance(p1);
    point.squared_distance(p0) <= length2 && point.squared_distance(p1) <= length2
}

pub fn collides_segment_segment_1d(p0: f64, p1: f64, q0: f64, q1: f64) -> bool {
    let (a0, b0) = if p0 <= p1 { (p0, p1) } else { (p1, p0) };
    let (a1, b1) = if q0 <= q1 { (q0, q1) } else { (q1, q0) };
    b0 >= a1 && b1 >= a0
}

pub fn collides_segment_segment_2d<K: OrientationKernel>(
    k: &K,
    p0: Point,
    p1: Point,
    q0: Point,
    q1: Point,
) -> bool {
    // touching configurations: an endpoint of one lies on the other
    if collides_segment_point_2d(k, p0, p1, q0)
        || collides_segment_point_2d(k, p0, p1, q1)
        || collides_segment_point_2d(k, q0, q1, p0)
        || collides_segment_point_2d(k, q0, q1, p1)
    {
        return true;
    }

    // proper crossing: each segment strictly straddles the other's line
    let oq0 = k.orient2d(p0, p1, q0);
    let oq1 = k.orient2d(p0, p1, q1);
    let op0 = k.orient2d(q0, q1, p0);
    let op1 = k.orient2d(q0, q1, p1);
    oq0 * oq1 < 0.0 && op0 * op1 < 0.0
}

pub fn collides_segment_segment_3d<K: OrientationKernel>(
    k: &K,
    p0: Point,
    p1: Point,
    q0: Point,
    q1: Point,
) -> bool {
    if collides_segment_point_3d(k, p0, p1, q0)
        || collides_segment_point_3d(k, p0, p1, q1)
        || collides_segment_point_3d(k, q0, q1, p0)
        || collides_segment_point_3d(k, q0, q1, p1)
    {
        return true;
    }

    // skew segments cannot meet
    if k.orient3d(p0, p1, q0, q1) != 0.0 {
        return false;
    }

    // coplanar: decide in the projection plane spanned by both directions
    let n = (p1 - p0).cross(q1 - q0);
    if n == Point::origin() {
        // parallel and not collinear (collinear was caught above)
        return false;
    }
    let (i, j) = dominant_plane(n);
    collides_segment_segment_2d(
        k,
        flatten(p0, i, j),
        flatten(p1, i, j),
        flatten(q0, i, j),
        flatten(q1, i, j),
    )
}

/// Point in a closed triangle: on the same side of every edge as the
/// triangle winds, with either winding accepted. A degenerate triangle
/// collapses to its edges.
pub fn collides_triangle_point_2d<K: OrientationKernel>(
    k: &K,
    p0: Point,
    p1: Point,
    p2: Point,
    point: Point,
) -> bool {
    let orientation = k.orient2d(p0, p1, p2);
    if orientation == 0.0 {
        return collides_segment_point_2d(k, p0, p1, point)
            || collides_segment_point_2d(k, p1, p2, point)
            || collides_segment_point_2d(k, p2, p0, point);
    }

    let o01 = k.orient2d(p0, p1, point);
    let o12 = k.orient2d(p1, p2, point);
    let o20 = k.orient2d(p2, p0, point);
    if orientation > 0.0 {
        o01 >= 0.0 && o12 >= 0.0 && o20 >= 0.0
    } else {
        o01 <= 0.0 && o12 <= 0.0 && o20 <= 0.0
    }
}

pub fn collides_triangle_point_3d<K: OrientationKernel>(
    k: &K,
    p0: Point,
    p1: Point,
    p2: Point,
    point: Point,
) -> bool {
    if k.orient3d(p0, p1, p2, point) != 0.0 {
        return false;
    }

    let n = (p1 - p0).cross(p2 - p0);
    if n == Point::origin() {
        // degenerate triangle
        return collides_segment_point_3d(k, p0, p1, point)
            || collides_segment_point_3d(k, p1, p2, point)
            || collides_segment_point_3d(k, p2, p0, point);
    }

    let (i, j) = dominant_plane(n);
    collides_triangle_point_2d(
        k,
        flatten(p0, i, j),
        flatten(p1, i, j),
        flatten(p2, i, j),
        flatten(point, i, j),
    )
}

pub fn collides_triangle_segment_2d<K: OrientationKernel>(
    k: &K,
    p0: Point,
    p1: Point,
    p2: Point,
    q0: Point,
    q1: Point,
) -> bool {
    if collides_triangle_point_2d(k, p0, p1, p2, q0)
        || collides_triangle_point_2d(k, p0, p1, p2, q1)
    {
        return true;
    }
    let p = [p0, p1, p2];
    TRIANGLE_EDGES
        .iter()
        .any(|&(i, j)| collides_segment_segment_2d(k, p[i], p[j], q0, q1))
}

pub fn collides_triangle_segment_3d<K: OrientationKernel>(
    k: &K,
    p0: Point,
    p1: Point,
    p2: Point,
    q0: Point,
    q1: Point,
) -> bool {
    // endpoint in the triangle
    if collides_triangle_point_3d(k, p0, p1, p2, q0)
        || collides_triangle_point_3d(k, p0, p1, p2, q1)
    {
        return true;
    }

    // segment against the triangle edges
    let p = [p0, p1, p2];
    if TRIANGLE_EDGES
        .iter()
        .any(|&(i, j)| collides_segment_segment_3d(k, p[i], p[j], q0, q1))
    {
        return true;
    }

    // proper piercing: endpoints strictly straddle the plane and the line
    // of the segment passes the three directed edges consistently
    let o0 = k.orient3d(p0, p1, p2, q0);
    let o1 = k.orient3d(p0, p1, p2, q1);
    if o0 * o1 < 0.0 {
        let s01 = k.orient3d(q0, p0, p1, q1);
        let s12 = k.orient3d(q0, p1, p2, q1);
        let s20 = k.orient3d(q0, p2, p0, q1);
        return (s01 >= 0.0 && s12 >= 0.0 && s20 >= 0.0)
            || (s01 <= 0.0 && s12 <= 0.0 && s20 <= 0.0);
    }

    false
}

pub fn collides_triangle_triangle_2d<K: OrientationKernel>(
    k: &K,
    p0: Point,
    p1: Point,
    p2: Point,
    q0: Point,
    q1: Point,
    q2: Point,
) -> bool {
    let p = [p0, p1, p2];
    let q = [q0, q1, q2];

    // vertex containment either way round covers nested triangles
    if q
        .iter()
        .any(|&v| collides_triangle_point_2d(k, p0, p1, p2, v))
        || p
            .iter()
            .any(|&v| collides_triangle_point_2d(k, q0, q1, q2, v))
    {
        return true;
    }

    // otherwise any overlap shows up as an edge crossing
    for &(i, j) in &TRIANGLE_EDGES {
        for &(r, s) in &TRIANGLE_EDGES {
            if collides_segment_segment_2d(k, p[i], p[j], q[r], q[s]) {
                return true;
            }
        }
    }
    false
}

pub fn collides_triangle_triangle_3d<K: OrientationKernel>(
    k: &K,
    p0: Point,
    p1: Point,
    p2: Point,
    q0: Point,
    q1: Point,
    q2: Point,
) -> bool {
    let p = [p0, p1, p2];
    let q = [q0, q1, q2];

    if q
        .iter()
        .any(|&v| collides_triangle_point_3d(k, p0, p1, p2, v))
        || p
            .iter()
            .any(|&v| collides_triangle_point_3d(k, q0, q1, q2, v))
    {
        return true;
    }

    // an overlap without vertex containment crosses an edge through the
    // other triangle; the segment test covers both edge-edge contact and
    // piercing
    TRIANGLE_EDGES
        .iter()
        .any(|&(i, j)| collides_triangle_segment_3d(k, p0, p1, p2, q[i], q[j]))
        || TRIANGLE_EDGES
            .iter()
            .any(|&(i, j)| collides_triangle_segment_3d(k, q0, q1, q2, p[i], p[j]))
}

/// Point in a closed tetrahedron: for every face, the point is on the
/// same side as the opposite vertex or on the face plane itself.
pub fn collides_tetrahedron_point_3d<K: OrientationKernel>(
    k: &K,
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    point: Point,
) -> bool {
    let orientation = k.orient3d(p0, p1, p2, p3);
    if orientation == 0.0 {
        // flat tetrahedron: its point set is the union of its faces
        let p = [p0, p1, p2, p3];
        return TETRAHEDRON_FACES
            .iter()
            .any(|&(i, j, l)| collides_triangle_point_3d(k, p[i], p[j], p[l], point));
    }

    // signs fixed by expanding each face determinant against the
    // reference orientation
    orientation * k.orient3d(p0, p1, p2, point) >= 0.0
        && orientation * k.orient3d(p0, p1, p3, point) <= 0.0
        && orientation * k.orient3d(p0, p2, p3, point) >= 0.0
        && orientation * k.orient3d(p1, p2, p3, point) <= 0.0
}

pub fn collides_tetrahedron_segment_3d<K: OrientationKernel>(
    k: &K,
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    q0: Point,
    q1: Point,
) -> bool {
    if collides_tetrahedron_point_3d(k, p0, p1, p2, p3, q0)
        || collides_tetrahedron_point_3d(k, p0, p1, p2, p3, q1)
    {
        return true;
    }

    let p = [p0, p1, p2, p3];
    TETRAHEDRON_FACES
        .iter()
        .any(|&(i, j, l)| collides_triangle_segment_3d(k, p[i], p[j], p[l], q0, q1))
}

pub fn collides_tetrahedron_triangle_3d<K: OrientationKernel>(
    k: &K,
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    q0: Point,
    q1: Point,
    q2: Point,
) -> bool {
    // a triangle inside the tetrahedron has its vertices inside; anything
    // else that intersects crosses a face
    if [q0, q1, q2]
        .iter()
        .any(|&v| collides_tetrahedron_point_3d(k, p0, p1, p2, p3, v))
    {
        return true;
    }

    let p = [p0, p1, p2, p3];
    TETRAHEDRON_FACES
        .iter()
        .any(|&(i, j, l)| collides_triangle_triangle_3d(k, p[i], p[j], p[l], q0, q1, q2))
}
