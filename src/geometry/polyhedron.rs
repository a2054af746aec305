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

use crate::geometry::Simplex;

/// A region represented as a collection of simplices of one topological
/// dimension, the output format of convex triangulation. Simplices are
/// expected to have disjoint interiors; the collection may be empty.
#[derive(Clone, Debug, Default)]
pub struct Polyhedron {
    tdim: usize,
    simplices: Vec<Simplex>,
}

impl Polyhedron {
    pub fn new(tdim: usize) -> Self {
        Polyhedron {
            tdim,
            simplices: Vec::new(),
        }
    }

    pub fn tdim(&self) -> usize {
        self.tdim
    }

    /// Adds a simplex. Panics if its dimension does not match.
    pub fn push(&mut self, simplex: Simplex) {
        assert_eq!(
            simplex.tdim(),
            self.tdim,
            "polyhedron of tdim = {} cannot hold a simplex of tdim = {}",
            self.tdim,
            simplex.tdim()
        );
        self.simplices.push(simplex);
    }

    pub fn simplices(&self) -> &[Simplex] {
        &self.simplices
    }

    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Simplex> {
        self.simplices.iter()
    }

    /// Total measure of the simplices.
    pub fn measure(&self) -> f64 {
        self.simplices.iter().map(Simplex::measure).sum()
    }
}

impl<'a> IntoIterator for &'a Polyhedron {
    type Item = &'a Simplex;
    type IntoIter = std::slice::Iter<'a, Simplex>;

    fn into_iter(self) -> Self::IntoIter {
        self.simplices.iter()
    }
}
