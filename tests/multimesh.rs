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

use std::sync::Arc;

use approx::assert_relative_eq;

use cutcell::geometry::Point;
use cutcell::mesh::Mesh;
use cutcell::multimesh::{CellState, MultiMesh, MultiMeshError};

fn p2(x: f64, y: f64) -> Point {
    Point::new(x, y, 0.0)
}

fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64, nx: usize, ny: usize) -> Arc<Mesh> {
    Arc::new(Mesh::rectangle(p2(x0, y0), p2(x1, y1), nx, ny))
}

/// The area a part contributes after cutting: its uncut cells plus the
/// net cut cell quadrature.
fn visible_area(mm: &MultiMesh, part: usize) -> f64 {
    let mesh = mm.part(part);
    let uncut: f64 = mm
        .uncut_cells(part)
        .iter()
        .map(|&c| mesh.cell_measure(c))
        .sum();
    let cut: f64 = mm
        .quadrature_rules_cut_cells(part)
        .values()
        .map(|rule| rule.sum_weights())
        .sum();
    uncut + cut
}

#[test]
fn add_rejects_mismatched_parts() {
    let mut mm = MultiMesh::new();
    mm.add(rectangle(0.0, 0.0, 1.0, 1.0, 1, 1)).unwrap();
    assert_eq!(
        mm.add(Arc::new(Mesh::unit_cube(1, 1, 1))).unwrap_err(),
        MultiMeshError::DimensionMismatch {
            part: 1,
            gdim: 3,
            expected: 2
        }
    );
    assert_eq!(
        mm.add(Arc::new(Mesh::unit_interval(4))).unwrap_err(),
        MultiMeshError::DimensionMismatch {
            part: 1,
            gdim: 1,
            expected: 2
        }
    );
    // a facet mesh has tdim < gdim and cannot be a part at all
    assert_eq!(
        mm.add(Arc::new(Mesh::unit_square(1, 1).boundary())).unwrap_err(),
        MultiMeshError::NotFullDimensional {
            part: 1,
            gdim: 2,
            tdim: 1
        }
    );
}

#[test]
#[should_panic(expected = "before build")]
fn reads_before_build_panic() {
    let mut mm = MultiMesh::new();
    mm.add(rectangle(0.0, 0.0, 1.0, 1.0, 1, 1)).unwrap();
    mm.cut_cells(0);
}

#[test]
fn disjoint_parts_stay_uncut() {
    let mut mm = MultiMesh::new();
    mm.add(rectangle(0.0, 0.0, 1.0, 1.0, 2, 2)).unwrap();
    mm.add(rectangle(5.0, 5.0, 6.0, 6.0, 2, 2)).unwrap();
    mm.build(2);

    for part in 0..2 {
        assert_eq!(mm.uncut_cells(part).len(), mm.part(part).num_cells());
        assert!(mm.cut_cells(part).is_empty());
        assert!(mm.covered_cells(part).is_empty());
        assert!(mm.quadrature_rules_cut_cells(part).is_empty());
        assert_relative_eq!(visible_area(&mm, part), 1.0, max_relative = 1e-13);
    }
}

#[test]
fn fully_covered_part_is_classified_covered() {
    let mut mm = MultiMesh::new();
    // the lower part sits strictly inside the upper one, away from its
    // boundary, so every lower cell is covered and none contributes
    mm.add(rectangle(0.25, 0.25, 0.75, 0.75, 1, 1)).unwrap();
    mm.add(rectangle(0.0, 0.0, 1.0, 1.0, 1, 1)).unwrap();
    mm.build(1);

    assert_eq!(mm.covered_cells(0).len(), mm.part(0).num_cells());
    assert!(mm.cut_cells(0).is_empty());
    assert!(mm.uncut_cells(0).is_empty());
    assert!(mm.quadrature_rules_cut_cells(0).is_empty());
    for state in mm.cell_states(0) {
        assert_eq!(*state, CellState::Covered);
    }
    // the top part is never cut by anything
    assert_eq!(mm.uncut_cells(1).len(), mm.part(1).num_cells());
}

#[test]
fn exact_self_coverage_cancels() {
    // the same single-triangle mesh twice: the lower copy's cut cell
    // rule must integrate to zero
    let vertices = vec![p2(0.0, 0.0), p2(1.0, 0.0), p2(0.0, 1.0)];
    let cells = vec![vec![0, 1, 2]];
    let tri = Arc::new(Mesh::new(2, 2, vertices, cells).unwrap());

    let mut mm = MultiMesh::new();
    mm.add(tri.clone()).unwrap();
    mm.add(tri).unwrap();
    mm.build(2);

    assert_eq!(mm.cut_cells(0).to_vec(), vec![0]);
    let rule = &mm.quadrature_rules_cut_cells(0)[&0];
    assert!(rule.sum_weights().abs() < 1e-13);
    // and the overlap rule carries the full triangle measure
    let overlap = &mm.quadrature_rules_overlap(0)[&0];
    assert_relative_eq!(overlap.sum_weights(), 0.5, max_relative = 1e-13);
}

#[test]
fn two_overlapping_squares_partition_their_union() {
    let mut mm = MultiMesh::new();
    mm.add(rectangle(0.0, 0.0, 1.0, 1.0, 2, 2)).unwrap();
    mm.add(rectangle(0.5, 0.0, 1.5, 1.0, 2, 2)).unwrap();
    mm.build(3);

    // the top part keeps its full area, the bottom one loses the overlap
    assert_relative_eq!(visible_area(&mm, 1), 1.0, max_relative = 1e-12);
    assert_relative_eq!(visible_area(&mm, 0), 0.5, max_relative = 1e-12);

    // net weights of a cut cell never exceed its measure
    for (&cell, rule) in mm.quadrature_rules_cut_cells(0) {
        let measure = mm.part(0).cell_measure(cell);
        assert!(rule.sum_weights() <= measure + 1e-12);
        assert!(rule.sum_weights() >= -1e-12);
    }
}

#[test]
fn three_parts_tile_the_union() {
    let mut mm = MultiMesh::new();
    mm.add(rectangle(0.0, 0.0, 1.0, 1.0, 2, 2)).unwrap();
    mm.add(rectangle(0.5, 0.0, 1.5, 1.0, 2, 2)).unwrap();
    mm.add(rectangle(0.25, 0.25, 0.75, 0.75, 2, 2)).unwrap();
    mm.build(2);

    // the union is the 1.5 x 1 rectangle (part 2 lies inside it)
    let total: f64 = (0..3).map(|part| visible_area(&mm, part)).sum();
    assert_relative_eq!(total, 1.5, max_relative = 1e-11);
}

#[test]
fn interface_length_matches_the_cutting_boundary() {
    let mut mm = MultiMesh::new();
    mm.add(rectangle(0.0, 0.0, 1.0, 1.0, 1, 1)).unwrap();
    mm.add(rectangle(0.25, 0.25, 0.75, 0.75, 1, 1)).unwrap();
    mm.build(2);

    // part 1's whole boundary (perimeter 2) runs inside part 0
    let mut total = 0.0;
    for rules in mm.quadrature_rules_interface(0).values() {
        for rule in rules {
            total += rule.sum_weights();
        }
    }
    assert_relative_eq!(total, 2.0, max_relative = 1e-12);

    // normals are unit vectors aligned with the quadrature points
    for (cell, rules) in mm.quadrature_rules_interface(0) {
        let normals = &mm.facet_normals(0)[cell];
        assert_eq!(rules.len(), normals.len());
        for (rule, nrm) in rules.iter().zip(normals) {
            assert_eq!(nrm.len(), 2 * rule.num_points());
            for pair in nrm.chunks_exact(2) {
                let norm = (pair[0] * pair[0] + pair[1] * pair[1]).sqrt();
                assert_relative_eq!(norm, 1.0, max_relative = 1e-14);
            }
        }
    }
}

#[test]
fn interface_subtracts_segments_covered_by_higher_parts() {
    let mut mm = MultiMesh::new();
    mm.add(rectangle(0.0, 0.0, 2.0, 1.0, 1, 1)).unwrap();
    mm.add(rectangle(0.5, 0.25, 1.5, 0.75, 1, 1)).unwrap();
    mm.add(rectangle(1.0, 0.0, 2.0, 1.0, 1, 1)).unwrap();
    mm.build(2);

    // part 1's boundary has perimeter 3; the half with x >= 1 is covered
    // by part 2 and must not appear in part 0's interface with part 1
    let mut part1_interface = 0.0;
    for (cell, rules) in mm.quadrature_rules_interface(0) {
        let cutting = &mm.collision_map_cut_cells(0)[cell];
        for (entry, rule) in cutting.iter().zip(rules) {
            if entry.0 == 1 {
                part1_interface += rule.sum_weights();
            }
        }
    }
    assert_relative_eq!(part1_interface, 1.5, max_relative = 1e-12);
}

#[test]
fn rebuild_after_clear_reproduces_the_classification() {
    let mut mm = MultiMesh::new();
    mm.add(rectangle(0.0, 0.0, 1.0, 1.0, 2, 2)).unwrap();
    mm.add(rectangle(0.5, 0.0, 1.5, 1.0, 2, 2)).unwrap();
    mm.build(2);
    let cut_before: Vec<usize> = mm.cut_cells(0).to_vec();
    let area_before = visible_area(&mm, 0);

    mm.clear();
    assert!(!mm.is_built());
    mm.build(2);
    assert_eq!(mm.cut_cells(0), cut_before.as_slice());
    assert_relative_eq!(visible_area(&mm, 0), area_before, max_relative = 1e-14);
}
