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

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use cutcell::geometry::{Point, Simplex};
use cutcell::kernel::FilteredKernel;
use cutcell::predicates::{
    collides, collides_segment_point_2d, collides_tetrahedron_tetrahedron_3d,
    collides_triangle_point_2d,
};

fn p2(x: f64, y: f64) -> Point {
    Point::new(x, y, 0.0)
}

fn random_point(rng: &mut StdRng, gdim: usize) -> Point {
    let mut p = Point::origin();
    for d in 0..gdim {
        p[d] = rng.random_range(-1.0..1.0);
    }
    p
}

fn random_simplex(rng: &mut StdRng, tdim: usize, gdim: usize) -> Simplex {
    let pts: Vec<Point> = (0..=tdim).map(|_| random_point(rng, gdim)).collect();
    Simplex::from_points(&pts)
}

#[test]
fn collision_is_symmetric_in_2d() {
    let k = FilteredKernel;
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..300 {
        let d0 = rng.random_range(0..=2);
        let d1 = rng.random_range(0..=2);
        let a = random_simplex(&mut rng, d0, 2);
        let b = random_simplex(&mut rng, d1, 2);
        assert_eq!(
            collides(&k, &a, &b, 2),
            collides(&k, &b, &a, 2),
            "asymmetric for {a:?} vs {b:?}"
        );
    }
}

#[test]
fn collision_is_symmetric_in_3d() {
    let k = FilteredKernel;
    let mut rng = StdRng::seed_from_u64(12);
    for _ in 0..200 {
        let d0 = rng.random_range(2..=3);
        let d1 = rng.random_range(0..=3);
        let a = random_simplex(&mut rng, d0, 3);
        let b = random_simplex(&mut rng, d1, 3);
        assert_eq!(
            collides(&k, &a, &b, 3),
            collides(&k, &b, &a, 3),
            "asymmetric for {a:?} vs {b:?}"
        );
    }
}

#[test]
fn segments_are_closed_at_their_endpoints() {
    let k = FilteredKernel;
    let p0 = p2(0.1, 0.2);
    let p1 = p2(0.9, 0.7);
    assert!(collides_segment_point_2d(&k, p0, p1, p0));
    assert!(collides_segment_point_2d(&k, p0, p1, p1));
}

#[test]
fn triangle_point_containment() {
    let k = FilteredKernel;
    let (a, b, c) = (p2(0.0, 0.0), p2(1.0, 0.0), p2(0.0, 1.0));
    assert!(collides_triangle_point_2d(&k, a, b, c, p2(0.25, 0.25)));
    assert!(!collides_triangle_point_2d(&k, a, b, c, p2(1.0, 1.0)));
    // vertices and edges are part of the triangle
    assert!(collides_triangle_point_2d(&k, a, b, c, a));
    assert!(collides_triangle_point_2d(&k, a, b, c, p2(0.5, 0.5)));
}

#[test]
fn tetrahedra_separate_and_touch() {
    let unit = [
        Point::origin(),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
        Point::new(0.0, 0.0, 1.0),
    ];
    // identical
    assert!(collides_tetrahedron_tetrahedron_3d(unit, unit));

    // well separated
    let shift = Point::new(5.0, 0.0, 0.0);
    let far = unit.map(|p| p + shift);
    assert!(!collides_tetrahedron_tetrahedron_3d(unit, far));
    assert!(!collides_tetrahedron_tetrahedron_3d(far, unit));

    // sharing the face z = 0, extruded to opposite sides
    let mirrored = [
        unit[0],
        unit[1],
        unit[2],
        Point::new(0.0, 0.0, -1.0),
    ];
    assert!(collides_tetrahedron_tetrahedron_3d(unit, mirrored));

    // touching at a single vertex
    let at_apex = unit.map(|p| p + Point::new(0.0, 0.0, 1.0));
    assert!(collides_tetrahedron_tetrahedron_3d(unit, at_apex));

    // interpenetrating
    let nudged = unit.map(|p| p + Point::new(0.1, 0.1, 0.1));
    assert!(collides_tetrahedron_tetrahedron_3d(unit, nudged));
}

#[test]
fn dispatch_matches_the_specialized_routines() {
    let k = FilteredKernel;
    let tri = Simplex::triangle(p2(0.0, 0.0), p2(1.0, 0.0), p2(0.0, 1.0));
    let inside = Simplex::point(p2(0.25, 0.25));
    let outside = Simplex::point(p2(1.0, 1.0));
    assert!(collides(&k, &tri, &inside, 2));
    assert!(collides(&k, &inside, &tri, 2));
    assert!(!collides(&k, &tri, &outside, 2));
}

#[test]
#[should_panic(expected = "unsupported dimension combination")]
fn triangles_in_1d_are_rejected() {
    let k = FilteredKernel;
    let tri = Simplex::triangle(p2(0.0, 0.0), p2(1.0, 0.0), p2(0.0, 1.0));
    collides(&k, &tri, &tri, 1);
}
