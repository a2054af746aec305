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

//! Convex triangulation of intersection point sets.
//!
//! The input is an unordered cloud that is (up to [`EPS`]) the vertex set
//! of a convex polytope, exactly what intersection construction emits.
//! The output decomposes that polytope into simplices of the requested
//! topological dimension. Degenerate simplices are dropped, so a cloud
//! that spans less than `tdim` dimensions triangulates to an empty
//! polyhedron, never to zero-measure junk.

use ahash::AHashSet;

use crate::geometry::util::{dominant_plane, flatten, major_axis, unique_points};
use crate::geometry::{Point, Polyhedron, Simplex, EPS, EPS_LARGE};
use crate::kernel::OrientationKernel;

/// Triangulates the convex hull of `points` into simplices of dimension
/// `tdim`.
///
/// Panics when `(tdim, gdim)` is not one of the supported combinations
/// (points and segments in any dimension, triangles in 2d or 3d,
/// tetrahedra in 3d), and when a 1d triangulation is asked of points that
/// are not collinear.
pub fn triangulate<K: OrientationKernel>(
    k: &K,
    points: &[Point],
    gdim: usize,
    tdim: usize,
) -> Polyhedron {
    let points = unique_points(points, EPS);
    let poly = match (tdim, gdim) {
        (0, 1..=3) => {
            let mut poly = Polyhedron::new(0);
            if let Some(&p) = points.first() {
                poly.push(Simplex::point(p));
            }
            poly
        }
        (1, 1..=3) => triangulate_interval(k, &points, gdim),
        (2, 2) | (2, 3) => {
            let mut poly = Polyhedron::new(2);
            for [a, b, c] in planar_fan(k, &points) {
                poly.push(Simplex::triangle(a, b, c));
            }
            poly
        }
        (3, 3) => triangulate_hull(k, &points),
        (tdim, gdim) => panic!(
            "triangulate: unsupported dimension combination (tdim = {tdim}, gdim = {gdim})"
        ),
    };
    crate::verify::check_triangulation(&points, &poly, gdim);
    poly
}

/// 1d case: the points must be collinear and the result is the single
/// segment between the two extremes along the axis of largest extent.
fn triangulate_interval<K: OrientationKernel>(
    k: &K,
    points: &[Point],
    gdim: usize,
) -> Polyhedron {
    let mut poly = Polyhedron::new(1);
    if points.len() < 2 {
        return poly;
    }

    if points.len() > 2 {
        let p0 = points[0];
        let p1 = points[1];
        let scale = EPS_LARGE * (1.0 + p0.squared_distance(p1));
        for &w in &points[2..] {
            let collinear = match gdim {
                1 => true,
                2 => k.orient2d(p0, p1, w).abs() <= scale,
                _ => [(0, 1), (0, 2), (1, 2)].iter().all(|&(i, j)| {
                    k.orient2d(flatten(p0, i, j), flatten(p1, i, j), flatten(w, i, j))
                        .abs()
                        <= scale
                }),
            };
            assert!(
                collinear,
                "triangulate: points of a 1d triangulation are not collinear"
            );
        }
    }

    let axis = major_axis(points);
    let mut lo = points[0];
    let mut hi = points[0];
    for &p in &points[1..] {
        if p[axis] < lo[axis] {
            lo = p;
        }
        if p[axis] > hi[axis] {
            hi = p;
        }
    }
    if lo[axis] < hi[axis] {
        poly.push(Simplex::segment(lo, hi));
    }
    poly
}

/// Fan triangulation of a planar convex cloud, valid in 2d (third slot
/// zero) and for points spanning a plane in 3d. Returns vertex triples
/// of the original points.
fn planar_fan<K: OrientationKernel>(k: &K, points: &[Point]) -> Vec<[Point; 3]> {
    if points.len() < 3 {
        return Vec::new();
    }

    // plane normal from the widest-spanning triple anchored at point 0
    let mut normal = Point::origin();
    let mut best = 0.0;
    for i in 1..points.len() {
        for j in (i + 1)..points.len() {
            let n = (points[i] - points[0]).cross(points[j] - points[0]);
            let norm2 = n.squared_norm();
            if norm2 > best {
                best = norm2;
                normal = n;
            }
        }
    }
    if normal == Point::origin() {
        // collinear cloud spans no area
        return Vec::new();
    }
    let (si, sj) = dominant_plane(normal);
    let flat: Vec<Point> = points.iter().map(|&p| flatten(p, si, sj)).collect();

    // order the remaining points by angle around the centroid, measured
    // from the direction of point 0; angles live in [0, 2pi) so the
    // sorted sequence is the cyclic walk around the hull cut at point 0
    let mut centroid = Point::origin();
    for &p in &flat {
        centroid = centroid + p;
    }
    centroid = centroid / flat.len() as f64;

    let r = flat[0] - centroid;
    let mut order: Vec<(f64, usize)> = (1..flat.len())
        .map(|i| {
            let v = flat[i] - centroid;
            let cross = r[0] * v[1] - r[1] * v[0];
            let mut angle = cross.atan2(r.dot(v));
            if angle < 0.0 {
                angle += std::f64::consts::TAU;
            }
            (angle, i)
        })
        .collect();
    order.sort_by(|a, b| a.0.total_cmp(&b.0));

    // fan from point 0 over angularly consecutive pairs
    let mut triangles = Vec::with_capacity(order.len().saturating_sub(1));
    for w in order.windows(2) {
        let (i, j) = (w[0].1, w[1].1);
        if k.orient2d(flat[0], flat[i], flat[j]) != 0.0 {
            triangles.push([points[0], points[i], points[j]]);
        }
    }
    triangles
}

/// 3d case: enumerate vertex triples, keep those that span a hull face
/// (every other point on one side of their plane), triangulate faces
/// with more than three coplanar vertices as planar fans, and cone every
/// face triangle to the centroid of the cloud.
fn triangulate_hull<K: OrientationKernel>(k: &K, points: &[Point]) -> Polyhedron {
    let mut poly = Polyhedron::new(3);
    let n = points.len();
    if n < 4 {
        return poly;
    }

    let mut center = Point::origin();
    for &p in points {
        center = center + p;
    }
    center = center / n as f64;

    let mut checked: AHashSet<[usize; 3]> = AHashSet::default();

    for i in 0..n - 2 {
        for j in (i + 1)..n - 1 {
            for l in (j + 1)..n {
                if checked.contains(&[i, j, l]) {
                    continue;
                }
                if collinear_3d(k, points[i], points[j], points[l]) {
                    continue;
                }

                let mut above = false;
                let mut below = false;
                let mut coplanar = vec![i, j, l];
                for m in 0..n {
                    if m == i || m == j || m == l {
                        continue;
                    }
                    let o = k.orient3d(points[i], points[j], points[l], points[m]);
                    if o > 0.0 {
                        above = true;
                    } else if o < 0.0 {
                        below = true;
                    } else {
                        coplanar.push(m);
                    }
                    if above && below {
                        break;
                    }
                }
                if above && below {
                    // points on both sides: not a face of the hull
                    continue;
                }

                if coplanar.len() == 3 {
                    push_cone(k, &mut poly, points[i], points[j], points[l], center);
                } else {
                    // a face with extra coplanar vertices is handled once
                    coplanar.sort_unstable();
                    mark_triples(&mut checked, &coplanar);
                    let face: Vec<Point> = coplanar.iter().map(|&m| points[m]).collect();
                    for [a, b, c] in planar_fan(k, &face) {
                        push_cone(k, &mut poly, a, b, c, center);
                    }
                }
            }
        }
    }
    poly
}

fn push_cone<K: OrientationKernel>(
    k: &K,
    poly: &mut Polyhedron,
    a: Point,
    b: Point,
    c: Point,
    apex: Point,
) {
    if k.orient3d(a, b, c, apex) != 0.0 {
        poly.push(Simplex::tetrahedron(a, b, c, apex));
    }
}

fn mark_triples(checked: &mut AHashSet<[usize; 3]>, sorted: &[usize]) {
    for a in 0..sorted.len() - 2 {
        for b in (a + 1)..sorted.len() - 1 {
            for c in (b + 1)..sorted.len() {
                checked.insert([sorted[a], sorted[b], sorted[c]]);
            }
        }
    }
}

fn collinear_3d<K: OrientationKernel>(k: &K, a: Point, b: Point, c: Point) -> bool {
    [(0, 1), (0, 2), (1, 2)].iter().all(|&(i, j)| {
        k.orient2d(flatten(a, i, j), flatten(b, i, j), flatten(c, i, j)) == 0.0
    })
}
