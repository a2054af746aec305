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

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};

use cutcell::geometry::{Point, Simplex};
use cutcell::intersection::intersect;
use cutcell::kernel::FilteredKernel;
use cutcell::mesh::Mesh;
use cutcell::multimesh::MultiMesh;
use cutcell::predicates::collides;
use cutcell::triangulation::triangulate;

fn overlapping_tetrahedra() -> (Simplex, Simplex) {
    let a = Simplex::tetrahedron(
        Point::origin(),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
        Point::new(0.0, 0.0, 1.0),
    );
    let shift = Point::new(0.3, 0.2, 0.1);
    let p = a.points();
    let b = Simplex::tetrahedron(p[0] + shift, p[1] + shift, p[2] + shift, p[3] + shift);
    (a, b)
}

fn bench_predicates(c: &mut Criterion) {
    let k = FilteredKernel;
    let (a, b) = overlapping_tetrahedra();
    c.bench_function("collides_tet_tet", |bench| {
        bench.iter(|| collides(&k, black_box(&a), black_box(&b), 3))
    });
}

fn bench_intersection(c: &mut Criterion) {
    let k = FilteredKernel;
    let (a, b) = overlapping_tetrahedra();
    c.bench_function("intersect_tet_tet", |bench| {
        bench.iter(|| intersect(&k, black_box(&a), black_box(&b), 3))
    });
    c.bench_function("intersect_and_triangulate_tet_tet", |bench| {
        bench.iter(|| {
            let points = intersect(&k, black_box(&a), black_box(&b), 3);
            triangulate(&k, &points, 3, 3)
        })
    });
}

fn bench_multimesh_build(c: &mut Criterion) {
    let below = Arc::new(Mesh::unit_square(8, 8));
    let above = Arc::new(Mesh::rectangle(
        Point::new(0.3, 0.3, 0.0),
        Point::new(1.3, 1.3, 0.0),
        8,
        8,
    ));
    c.bench_function("multimesh_build_8x8", |bench| {
        bench.iter(|| {
            let mut mm = MultiMesh::new();
            mm.add(below.clone()).unwrap();
            mm.add(above.clone()).unwrap();
            mm.build(2);
            black_box(mm.cut_cells(0).len())
        })
    });
}

criterion_group!(
    benches,
    bench_predicates,
    bench_intersection,
    bench_multimesh_build
);
criterion_main!(benches);
