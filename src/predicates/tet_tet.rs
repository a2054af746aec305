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

//! Tetrahedron-tetrahedron overlap test after Ganovelli, Ponchio and
//! Rocchini, "Fast tetrahedron-tetrahedron overlap algorithm", Journal of
//! Graphics Tools 7(2), 2002.
//!
//! A separating plane, if one exists, can be chosen through a face of
//! either tetrahedron or through an edge of the first one. The algorithm
//! classifies the vertices of each tetrahedron against the face planes of
//! the other into bit masks, short-circuits on a separating face or a
//! contained vertex, and finally searches for a separating plane through
//! each edge of the first tetrahedron using the signed distances already
//! computed for the two faces meeting at that edge.
//!
//! Unlike the other predicates this test runs on raw floating point plane
//! evaluations, and a degenerate (flat) tetrahedron yields zero normals
//! that are not handled specially. The vertex classification uses strict
//! inequalities, so closed-set semantics are preserved: tetrahedra that
//! only touch are reported as colliding.

use crate::geometry::Point;

// face f of a tetrahedron: vertices (i, j, k), opposite vertex o
const FACES: [(usize, usize, usize, usize); 4] =
    [(0, 1, 2, 3), (0, 1, 3, 2), (0, 2, 3, 1), (1, 2, 3, 0)];

// vertex index pairs of the six edges of a tetrahedron
const EDGES: [(usize, usize); 6] = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

/// Closed-set overlap test for two tetrahedra.
pub fn collides_tetrahedron_tetrahedron_3d(a: [Point; 4], b: [Point; 4]) -> bool {
    // Phase 1: face planes of a against the vertices of b. Signed
    // distances are kept for the edge phase.
    let mut coord = [[0.0f64; 4]; 4];
    let mut masks = [0u8; 4];
    for (f, &(i, j, l, o)) in FACES.iter().enumerate() {
        let n = outward_normal(a[i], a[j], a[l], a[o]);
        for t in 0..4 {
            coord[f][t] = (b[t] - a[i]).dot(n);
        }
        masks[f] = outside_mask(&coord[f]);
        if masks[f] == 0x0f {
            return false;
        }
    }
    // a vertex of b with a clear bit in every mask lies inside a
    if masks[0] | masks[1] | masks[2] | masks[3] != 0x0f {
        return true;
    }

    // Phase 2: face planes of b against the vertices of a.
    let mut masks_b = [0u8; 4];
    for (f, &(i, j, l, o)) in FACES.iter().enumerate() {
        let n = outward_normal(b[i], b[j], b[l], b[o]);
        let mut c = [0.0f64; 4];
        for t in 0..4 {
            c[t] = (a[t] - b[i]).dot(n);
        }
        masks_b[f] = outside_mask(&c);
        if masks_b[f] == 0x0f {
            return false;
        }
    }
    if masks_b[0] | masks_b[1] | masks_b[2] | masks_b[3] != 0x0f {
        return true;
    }

    // Phase 3: planes through the edges of a. Every edge is shared by a
    // pair of faces, and all face pairs of a tetrahedron are adjacent.
    for f0 in 0..4 {
        for f1 in (f0 + 1)..4 {
            if separating_plane_through_edge(&coord, &masks, f0, f1) {
                return false;
            }
        }
    }
    true
}

fn outward_normal(p0: Point, p1: Point, p2: Point, opposite: Point) -> Point {
    let mut n = (p1 - p0).cross(p2 - p0);
    if n.dot(opposite - p0) > 0.0 {
        n = -n;
    }
    n
}

fn outside_mask(coord: &[f64; 4]) -> u8 {
    let mut mask = 0u8;
    for (t, c) in coord.iter().enumerate() {
        if *c > 0.0 {
            mask |= 1 << t;
        }
    }
    mask
}

/// Is there a separating plane through the edge shared by faces `f0` and
/// `f1`? Works in the 2d frame given by the signed distances to the two
/// face planes: the edge region of the first tetrahedron is the (-,-)
/// quadrant, and a plane through the edge separates unless some edge of
/// the second tetrahedron crosses that quadrant.
fn separating_plane_through_edge(
    coord: &[[f64; 4]; 4],
    masks: &[u8; 4],
    f0: usize,
    f1: usize,
) -> bool {
    let c0 = &coord[f0];
    let c1 = &coord[f1];
    let mut mask0 = masks[f0];
    let mut mask1 = masks[f1];

    // a vertex inside both planes already sits in the edge region
    if mask0 | mask1 != 0x0f {
        return false;
    }
    // drop vertices outside both planes from the first mask; the update
    // order follows the published code
    mask0 &= mask0 ^ mask1;
    mask1 &= mask0 ^ mask1;

    for &(i, j) in &EDGES {
        // the edge runs from the (+,-) into the (-,+) quadrant; it dips
        // through (-,-) exactly when it passes the origin clockwise
        if mask0 & (1 << i) != 0
            && mask1 & (1 << j) != 0
            && c0[i] * c1[j] - c0[j] * c1[i] < 0.0
        {
            return false;
        }
        if mask0 & (1 << j) != 0
            && mask1 & (1 << i) != 0
            && c0[j] * c1[i] - c0[i] * c1[j] < 0.0
        {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_tet() -> [Point; 4] {
        [
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        ]
    }

    fn translated(t: [Point; 4], d: Point) -> [Point; 4] {
        [t[0] + d, t[1] + d, t[2] + d, t[3] + d]
    }

    #[test]
    fn identical_tetrahedra_collide() {
        assert!(collides_tetrahedron_tetrahedron_3d(unit_tet(), unit_tet()));
    }

    #[test]
    fn distant_tetrahedra_do_not() {
        let b = translated(unit_tet(), Point::new(5.0, 0.0, 0.0));
        assert!(!collides_tetrahedron_tetrahedron_3d(unit_tet(), b));
        assert!(!collides_tetrahedron_tetrahedron_3d(b, unit_tet()));
    }

    #[test]
    fn face_contact_counts_as_collision() {
        // mirror through the plane x = 0: shares the face x = 0
        let a = unit_tet();
        let b = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(-1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        ];
        assert!(collides_tetrahedron_tetrahedron_3d(a, b));
    }

    #[test]
    fn vertex_contact_counts_as_collision() {
        let a = unit_tet();
        // touches a only at the origin
        let b = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(-1.0, 0.0, 0.0),
            Point::new(0.0, -1.0, 0.0),
            Point::new(0.0, 0.0, -1.0),
        ];
        assert!(collides_tetrahedron_tetrahedron_3d(a, b));
    }

    #[test]
    fn overlap_without_vertex_containment_is_detected() {
        // a thin needle skewers the unit tetrahedron from below: no
        // vertex of either lies inside the other, so both face phases
        // fall through and only the edge-plane phase can decide
        let a = unit_tet();
        let needle = [
            Point::new(0.25, 0.25, -1.0),
            Point::new(0.25, 0.35, 2.0),
            Point::new(0.15, 0.2, 2.0),
            Point::new(0.35, 0.2, 2.0),
        ];
        assert!(collides_tetrahedron_tetrahedron_3d(a, needle));
        assert!(collides_tetrahedron_tetrahedron_3d(needle, a));

        // shifting the needle clear of the tetrahedron separates them
        let off = translated(needle, Point::new(2.0, 0.0, 0.0));
        assert!(!collides_tetrahedron_tetrahedron_3d(a, off));
        assert!(!collides_tetrahedron_tetrahedron_3d(off, a));
    }

    #[test]
    fn vertex_order_does_not_matter() {
        let a = unit_tet();
        let shuffled = [a[2], a[0], a[3], a[1]];
        let b = translated(unit_tet(), Point::new(0.25, 0.25, 0.25));
        let c = translated(unit_tet(), Point::new(2.0, 2.0, 2.0));
        assert!(collides_tetrahedron_tetrahedron_3d(shuffled, b));
        assert!(!collides_tetrahedron_tetrahedron_3d(shuffled, c));
    }
}
