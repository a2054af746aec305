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

//! A minimal simplicial mesh: vertex coordinates and cell connectivity.
//!
//! The multimesh engine only needs geometric access to cells, so this
//! carrier stores plain arrays and hands out cells as [`Simplex`] values.
//! Constructors validate their input and return a [`MeshError`] instead of
//! trusting the caller; everything downstream then treats the mesh as
//! well-formed.

use ahash::AHashMap;
use num_traits::ToPrimitive;
use smallvec::SmallVec;
use thiserror::Error;

use crate::geometry::{Point, Simplex};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("unsupported mesh dimensions (gdim = {gdim}, tdim = {tdim})")]
    UnsupportedDimensions { gdim: usize, tdim: usize },
    #[error("cell {cell} has {got} vertices, expected {expected}")]
    CellArity {
        cell: usize,
        expected: usize,
        got: usize,
    },
    #[error("cell {cell} refers to vertex {index}, mesh has {num_vertices}")]
    VertexIndex {
        cell: usize,
        index: usize,
        num_vertices: usize,
    },
    #[error("coordinate {index} is not a finite number")]
    NonFiniteCoordinate { index: usize },
}

/// A conforming simplicial mesh of topological dimension `tdim` embedded
/// in `gdim` coordinates. Cells store `tdim + 1` vertex indices each.
#[derive(Clone, Debug)]
pub struct Mesh {
    gdim: usize,
    tdim: usize,
    vertices: Vec<Point>,
    cells: Vec<SmallVec<[usize; 4]>>,
}

impl Mesh {
    /// Builds a mesh from vertex coordinates and per-cell vertex indices.
    pub fn new(
        gdim: usize,
        tdim: usize,
        vertices: Vec<Point>,
        cells: Vec<Vec<usize>>,
    ) -> Result<Self, MeshError> {
        if !(1..=3).contains(&gdim) || tdim > gdim {
            return Err(MeshError::UnsupportedDimensions { gdim, tdim });
        }
        let arity = tdim + 1;
        let mut stored = Vec::with_capacity(cells.len());
        for (c, cell) in cells.into_iter().enumerate() {
            if cell.len() != arity {
                return Err(MeshError::CellArity {
                    cell: c,
                    expected: arity,
                    got: cell.len(),
                });
            }
            for &v in &cell {
                if v >= vertices.len() {
                    return Err(MeshError::VertexIndex {
                        cell: c,
                        index: v,
                        num_vertices: vertices.len(),
                    });
                }
            }
            stored.push(SmallVec::from_slice(&cell));
        }
        Ok(Mesh {
            gdim,
            tdim,
            vertices,
            cells: stored,
        })
    }

    /// Builds a mesh from a flat coordinate buffer, `gdim` values per
    /// vertex, and a flat connectivity buffer, `tdim + 1` indices per
    /// cell. Accepts any numeric coordinate type that converts to `f64`.
    pub fn from_coordinates<T: ToPrimitive>(
        gdim: usize,
        tdim: usize,
        coordinates: &[T],
        cells: &[usize],
    ) -> Result<Self, MeshError> {
        if !(1..=3).contains(&gdim) || tdim > gdim {
            return Err(MeshError::UnsupportedDimensions { gdim, tdim });
        }
        let mut vertices = Vec::with_capacity(coordinates.len() / gdim);
        for (v, chunk) in coordinates.chunks_exact(gdim).enumerate() {
            let mut p = Point::origin();
            for (d, x) in chunk.iter().enumerate() {
                let x = x
                    .to_f64()
                    .filter(|x| x.is_finite())
                    .ok_or(MeshError::NonFiniteCoordinate { index: v * gdim + d })?;
                p[d] = x;
            }
            vertices.push(p);
        }
        let cells = cells.chunks_exact(tdim + 1).map(<[usize]>::to_vec).collect();
        Mesh::new(gdim, tdim, vertices, cells)
    }

    pub fn gdim(&self) -> usize {
        self.gdim
    }

    pub fn tdim(&self) -> usize {
        self.tdim
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn vertex(&self, i: usize) -> Point {
        self.vertices[i]
    }

    pub fn cell_vertex_indices(&self, i: usize) -> &[usize] {
        &self.cells[i]
    }

    /// The cell as an ordered simplex of its vertex coordinates.
    pub fn cell_simplex(&self, i: usize) -> Simplex {
        let pts: SmallVec<[Point; 4]> =
            self.cells[i].iter().map(|&v| self.vertices[v]).collect();
        Simplex::from_points(&pts)
    }

    pub fn cell_measure(&self, i: usize) -> f64 {
        self.cell_simplex(i).measure()
    }

    /// The vertex index lists of the facets of cell `i`, facet `k`
    /// omitting local vertex `k`, matching [`Simplex::facets`].
    pub fn cell_facet_indices(&self, i: usize) -> Vec<SmallVec<[usize; 3]>> {
        let cell = &self.cells[i];
        (0..cell.len())
            .map(|k| {
                cell.iter()
                    .enumerate()
                    .filter(|&(l, _)| l != k)
                    .map(|(_, &v)| v)
                    .collect()
            })
            .collect()
    }

    /// Extracts the boundary: the facets incident to exactly one cell, as
    /// a mesh of one lower topological dimension over the same vertex
    /// coordinates.
    ///
    /// Panics on a mesh of topological dimension zero.
    pub fn boundary(&self) -> Mesh {
        assert!(self.tdim >= 1, "boundary: mesh has no facets");

        // count facets under a sorted key; keep the first-seen vertex order
        let mut counts: AHashMap<SmallVec<[usize; 3]>, (usize, SmallVec<[usize; 3]>)> =
            AHashMap::default();
        for c in 0..self.num_cells() {
            for facet in self.cell_facet_indices(c) {
                let mut key = facet.clone();
                key.sort_unstable();
                counts
                    .entry(key)
                    .and_modify(|e| e.0 += 1)
                    .or_insert((1, facet));
            }
        }

        let mut cells: Vec<Vec<usize>> = counts
            .into_values()
            .filter(|(count, _)| *count == 1)
            .map(|(_, facet)| facet.to_vec())
            .collect();
        // hash map order is arbitrary; fix it for reproducible builds
        cells.sort();

        Mesh::new(self.gdim, self.tdim - 1, self.vertices.clone(), cells)
            .expect("boundary facets are valid cells of the same vertex set")
    }
}

/// Uniform meshes of simple domains, used by tests and benchmarks.
impl Mesh {
    /// The interval [0, 1] split into `n` segments.
    pub fn unit_interval(n: usize) -> Mesh {
        assert!(n >= 1);
        let vertices = (0..=n)
            .map(|i| Point::new(i as f64 / n as f64, 0.0, 0.0))
            .collect();
        let cells = (0..n).map(|i| vec![i, i + 1]).collect();
        Mesh::new(1, 1, vertices, cells).expect("valid interval mesh")
    }

    /// The unit square as `nx` by `ny` quads, each split into two
    /// triangles along the diagonal of positive slope.
    pub fn unit_square(nx: usize, ny: usize) -> Mesh {
        Mesh::rectangle(Point::origin(), Point::new(1.0, 1.0, 0.0), nx, ny)
    }

    /// An axis-aligned rectangle with corners `p0` and `p1`, triangulated
    /// like [`Mesh::unit_square`].
    pub fn rectangle(p0: Point, p1: Point, nx: usize, ny: usize) -> Mesh {
        assert!(nx >= 1 && ny >= 1);
        let mut vertices = Vec::with_capacity((nx + 1) * (ny + 1));
        for j in 0..=ny {
            for i in 0..=nx {
                vertices.push(Point::new(
                    p0[0] + (p1[0] - p0[0]) * i as f64 / nx as f64,
                    p0[1] + (p1[1] - p0[1]) * j as f64 / ny as f64,
                    0.0,
                ));
            }
        }
        let v = |i: usize, j: usize| j * (nx + 1) + i;
        let mut cells = Vec::with_capacity(2 * nx * ny);
        for j in 0..ny {
            for i in 0..nx {
                cells.push(vec![v(i, j), v(i + 1, j), v(i + 1, j + 1)]);
                cells.push(vec![v(i, j), v(i + 1, j + 1), v(i, j + 1)]);
            }
        }
        Mesh::new(2, 2, vertices, cells).expect("valid rectangle mesh")
    }

    /// The unit cube as `nx` by `ny` by `nz` hexahedra, each split into
    /// six tetrahedra along the main diagonal (Kuhn subdivision), which
    /// makes neighbouring cells conform.
    pub fn unit_cube(nx: usize, ny: usize, nz: usize) -> Mesh {
        assert!(nx >= 1 && ny >= 1 && nz >= 1);
        let mut vertices = Vec::with_capacity((nx + 1) * (ny + 1) * (nz + 1));
        for l in 0..=nz {
            for j in 0..=ny {
                for i in 0..=nx {
                    vertices.push(Point::new(
                        i as f64 / nx as f64,
                        j as f64 / ny as f64,
                        l as f64 / nz as f64,
                    ));
                }
            }
        }
        let v = |i: usize, j: usize, l: usize| (l * (ny + 1) + j) * (nx + 1) + i;

        // each tetrahedron walks from (0,0,0) to (1,1,1) along one of the
        // six axis orders
        const ORDERS: [[usize; 3]; 6] = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];
        let mut cells = Vec::with_capacity(6 * nx * ny * nz);
        for l in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    for order in &ORDERS {
                        let mut corner = [i, j, l];
                        let mut tet = vec![v(corner[0], corner[1], corner[2])];
                        for &axis in order {
                            corner[axis] += 1;
                            tet.push(v(corner[0], corner[1], corner[2]));
                        }
                        cells.push(tet);
                    }
                }
            }
        }
        Mesh::new(3, 3, vertices, cells).expect("valid cube mesh")
    }
}
