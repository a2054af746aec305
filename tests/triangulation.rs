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

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use cutcell::geometry::{Point, Simplex};
use cutcell::intersection::intersect;
use cutcell::kernel::FilteredKernel;
use cutcell::triangulation::triangulate;

fn p2(x: f64, y: f64) -> Point {
    Point::new(x, y, 0.0)
}

/// Shoelace area of a polygon given in traversal order.
fn shoelace(points: &[Point]) -> f64 {
    let n = points.len();
    let mut twice = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        twice += a[0] * b[1] - b[0] * a[1];
    }
    0.5 * twice.abs()
}

#[test]
fn fan_preserves_the_area_of_random_convex_polygons() {
    let k = FilteredKernel;
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..50 {
        let n = rng.random_range(4..10);
        let radius: f64 = rng.random_range(0.5..2.0);
        let mut angles: Vec<f64> = (0..n)
            .map(|_| rng.random_range(0.0..std::f64::consts::TAU))
            .collect();
        angles.sort_by(f64::total_cmp);
        angles.dedup();
        let polygon: Vec<Point> = angles
            .iter()
            .map(|t| p2(radius * t.cos(), radius * t.sin()))
            .collect();
        if polygon.len() < 3 {
            continue;
        }

        // points on a circle are in convex position, so the hull area is
        // the shoelace area of the angularly ordered polygon
        let expected = shoelace(&polygon);
        let mut shuffled = polygon.clone();
        for i in (1..shuffled.len()).rev() {
            shuffled.swap(i, rng.random_range(0..=i));
        }
        let poly = triangulate(&k, &shuffled, 2, 2);
        assert_relative_eq!(poly.measure(), expected, max_relative = 1e-12);
    }
}

#[test]
fn fan_covers_the_polygon_when_the_anchor_is_not_extreme() {
    let k = FilteredKernel;
    // the first point sits between its angular neighbours, so the fan
    // must wrap around it rather than start from an extreme direction
    let points = [p2(1.0, 0.1), p2(0.0, 1.0), p2(-1.0, 0.0), p2(0.0, -1.0)];
    let poly = triangulate(&k, &points, 2, 2);
    assert_eq!(poly.len(), 2);
    assert_relative_eq!(poly.measure(), shoelace(&points), max_relative = 1e-13);
    assert_relative_eq!(poly.measure(), 2.0, max_relative = 1e-13);
}

#[test]
fn hull_triangulation_recovers_the_cube_volume() {
    let k = FilteredKernel;
    let mut corners = Vec::new();
    for x in [0.0, 1.0] {
        for y in [0.0, 1.0] {
            for z in [0.0, 1.0] {
                corners.push(Point::new(x, y, z));
            }
        }
    }
    let poly = triangulate(&k, &corners, 3, 3);
    assert_relative_eq!(poly.measure(), 1.0, max_relative = 1e-13);

    // interior points change nothing but the cone apex
    corners.push(Point::new(0.5, 0.25, 0.5));
    let poly = triangulate(&k, &corners, 3, 3);
    assert_relative_eq!(poly.measure(), 1.0, max_relative = 1e-13);
}

#[test]
fn hull_triangulation_recovers_the_octahedron_volume() {
    let k = FilteredKernel;
    let points = [
        Point::new(1.0, 0.0, 0.0),
        Point::new(-1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
        Point::new(0.0, -1.0, 0.0),
        Point::new(0.0, 0.0, 1.0),
        Point::new(0.0, 0.0, -1.0),
    ];
    let poly = triangulate(&k, &points, 3, 3);
    assert_relative_eq!(poly.measure(), 4.0 / 3.0, max_relative = 1e-13);
}

#[test]
fn identical_triangle_intersection_triangulates_to_itself() {
    let k = FilteredKernel;
    let tri = Simplex::triangle(p2(0.0, 0.0), p2(1.0, 0.0), p2(0.0, 1.0));
    let points = intersect(&k, &tri, &tri, 2);
    let poly = triangulate(&k, &points, 2, 2);
    assert_eq!(poly.len(), 1);
    assert_relative_eq!(poly.measure(), tri.measure(), max_relative = 1e-14);
}

#[test]
fn interval_triangulation_returns_the_extremes() {
    let k = FilteredKernel;
    let points = [
        p2(0.25, 0.25),
        p2(1.0, 1.0),
        p2(0.0, 0.0),
        p2(0.5, 0.5),
    ];
    let poly = triangulate(&k, &points, 2, 1);
    assert_eq!(poly.len(), 1);
    let segment = &poly.simplices()[0];
    let ends = segment.points();
    assert!(ends.contains(&p2(0.0, 0.0)) && ends.contains(&p2(1.0, 1.0)));
}

#[test]
#[should_panic(expected = "not collinear")]
fn interval_triangulation_rejects_planar_clouds() {
    let k = FilteredKernel;
    let points = [p2(0.0, 0.0), p2(1.0, 0.0), p2(0.0, 1.0)];
    triangulate(&k, &points, 2, 1);
}

#[test]
fn planar_cloud_in_3d_is_fanned_in_its_plane() {
    let k = FilteredKernel;
    // unit square tilted into the plane z = x
    let points = [
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.0, 0.0, 1.0),
        Point::new(1.0, 1.0, 1.0),
        Point::new(0.0, 1.0, 0.0),
    ];
    let poly = triangulate(&k, &points, 3, 2);
    assert_eq!(poly.len(), 2);
    assert_relative_eq!(poly.measure(), 2.0_f64.sqrt(), max_relative = 1e-14);
}
