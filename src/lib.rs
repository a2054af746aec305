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

//! Exact-predicate geometric intersection for overlapping simplicial meshes.
//!
//! The crate is organized bottom up:
//!
//! - [`kernel`]: the orientation primitives every sidedness decision goes
//!   through, with a filtered fast path and an exact rational fallback.
//! - [`predicates`]: boolean collision tests between points, segments,
//!   triangles and tetrahedra in one to three geometric dimensions.
//! - [`intersection`]: construction of the intersection point set of two
//!   colliding simplices.
//! - [`triangulation`]: simplicial decomposition of the convex point
//!   clouds the intersection construction emits.
//! - [`quadrature`]: integration rules over simplices.
//! - [`mesh`]: a minimal simplicial mesh carrier with boundary extraction.
//! - [`multimesh`]: classification of cells across a stack of overlapping
//!   meshes and inclusion-exclusion quadrature over the cut cells.
//!
//! Everything is plain single-threaded computation over value types; the
//! only stateful object is [`multimesh::MultiMesh`], whose caches are
//! rebuilt wholesale by [`multimesh::MultiMesh::build`].

pub mod geometry;
pub mod intersection;
pub mod kernel;
pub mod mesh;
pub mod multimesh;
pub mod predicates;
pub mod quadrature;
pub mod triangulation;
pub mod verify;

pub use geometry::{Point, Polyhedron, Simplex};
pub use kernel::{FilteredKernel, OrientationKernel, RationalKernel};
pub use mesh::Mesh;
pub use multimesh::MultiMesh;
pub use quadrature::QuadratureRule;
