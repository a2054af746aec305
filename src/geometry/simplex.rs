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

use smallvec::SmallVec;

use crate::geometry::Point;

/// A simplex of topological dimension 0 to 3: point, segment, triangle or
/// tetrahedron. Vertex order is preserved but carries no orientation
/// contract; predicates that care about orientation normalize themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct Simplex {
    points: SmallVec<[Point; 4]>,
}

impl Simplex {
    pub fn point(a: Point) -> Self {
        Simplex {
            points: SmallVec::from_slice(&[a]),
        }
    }

    pub fn segment(a: Point, b: Point) -> Self {
        Simplex {
            points: SmallVec::from_slice(&[a, b]),
        }
    }

    pub fn triangle(a: Point, b: Point, c: Point) -> Self {
        Simplex {
            points: SmallVec::from_slice(&[a, b, c]),
        }
    }

    pub fn tetrahedron(a: Point, b: Point, c: Point, d: Point) -> Self {
        Simplex {
            points: SmallVec::from_slice(&[a, b, c, d]),
        }
    }

    /// Builds a simplex from 1 to 4 vertices.
    ///
    /// Panics if the slice length is not in that range.
    pub fn from_points(points: &[Point]) -> Self {
        assert!(
            (1..=4).contains(&points.len()),
            "a simplex has 1 to 4 vertices, got {}",
            points.len()
        );
        Simplex {
            points: SmallVec::from_slice(points),
        }
    }

    pub fn tdim(&self) -> usize {
        self.points.len() - 1
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn centroid(&self) -> Point {
        let mut c = Point::origin();
        for p in &self.points {
            c = c + *p;
        }
        c / self.points.len() as f64
    }

    /// Length, area or volume. Points have measure zero. The formulas run
    /// over all three coordinate slots, so a triangle embedded in 3d gets
    /// its true area and a 2d triangle (zero third slot) the usual one.
    pub fn measure(&self) -> f64 {
        let p = &self.points;
        match self.tdim() {
            0 => 0.0,
            1 => (p[1] - p[0]).norm(),
            2 => 0.5 * (p[1] - p[0]).cross(p[2] - p[0]).norm(),
            3 => {
                let det = (p[1] - p[0]).cross(p[2] - p[0]).dot(p[3] - p[0]);
                det.abs() / 6.0
            }
            _ => unreachable!(),
        }
    }

    /// The facets of the simplex, one topological dimension down.
    /// Facet `k` is the simplex with vertex `k` removed.
    pub fn facets(&self) -> Vec<Simplex> {
        let n = self.points.len();
        let mut facets = Vec::with_capacity(n);
        for k in 0..n {
            let mut pts: SmallVec<[Point; 4]> = SmallVec::new();
            for (i, p) in self.points.iter().enumerate() {
                if i != k {
                    pts.push(*p);
                }
            }
            facets.push(Simplex { points: pts });
        }
        facets
    }

    /// Unit normal of facet `k`, pointing away from the removed vertex,
    /// which for a cell of a mesh is the outward direction.
    ///
    /// Only meaningful when the simplex is full-dimensional in `gdim`
    /// (segment in 1d, triangle in 2d, tetrahedron in 3d).
    pub fn facet_normal(&self, k: usize, gdim: usize) -> Point {
        let p = &self.points;
        let n = match (self.tdim(), gdim) {
            (1, 1) => p[1 - k] - p[k],
            (2, 2) => {
                // facet k is the edge without vertex k
                let (a, b) = match k {
                    0 => (p[1], p[2]),
                    1 => (p[0], p[2]),
                    _ => (p[0], p[1]),
                };
                let d = b - a;
                let mut n = Point::new(-d[1], d[0], 0.0);
                if n.dot(p[k] - a) > 0.0 {
                    n = -n;
                }
                n
            }
            (3, 3) => {
                let (a, b, c) = match k {
                    0 => (p[1], p[2], p[3]),
                    1 => (p[0], p[2], p[3]),
                    2 => (p[0], p[1], p[3]),
                    _ => (p[0], p[1], p[2]),
                };
                let mut n = (b - a).cross(c - a);
                if n.dot(p[k] - a) > 0.0 {
                    n = -n;
                }
                n
            }
            (tdim, gdim) => panic!(
                "facet_normal: simplex of tdim = {tdim} is not full-dimensional in gdim = {gdim}"
            ),
        };
        n / n.norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures() {
        let seg = Simplex::segment(Point::new(1.0, 0.0, 0.0), Point::new(4.0, 4.0, 0.0));
        assert_eq!(seg.measure(), 5.0);

        let tri = Simplex::triangle(
            Point::origin(),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        );
        assert_eq!(tri.measure(), 0.5);

        let tet = Simplex::tetrahedron(
            Point::origin(),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        );
        assert!((tet.measure() - 1.0 / 6.0).abs() < 1e-15);
    }

    #[test]
    fn facet_normals_point_outward() {
        let tri = Simplex::triangle(
            Point::origin(),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        );
        // facet 2 is the edge on the x axis; outward is -y
        let n = tri.facet_normal(2, 2);
        assert_eq!(n, Point::new(0.0, -1.0, 0.0));
        // facet 0 is the slanted edge; outward has positive x and y
        let n = tri.facet_normal(0, 2);
        assert!(n[0] > 0.0 && n[1] > 0.0);
        assert!((n.norm() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn tetrahedron_facets_drop_one_vertex() {
        let tet = Simplex::tetrahedron(
            Point::origin(),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        );
        let facets = tet.facets();
        assert_eq!(facets.len(), 4);
        for f in &facets {
            assert_eq!(f.tdim(), 2);
        }
        assert!(!facets[0].points().contains(&Point::origin()));
    }
}
