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

use crate::geometry::aabb::Aabb;

/// An AABB tree over indexed boxes, built by recursive median split along
/// the longest axis of the enclosing box. Used as the broad phase of cell
/// collision detection; leaves carry the cell (or facet) index.
#[derive(Debug)]
pub struct AabbTree {
    root: Option<Box<Node>>,
}

#[derive(Debug)]
enum Node {
    Leaf {
        aabb: Aabb,
        index: usize,
    },
    Split {
        aabb: Aabb,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn aabb(&self) -> &Aabb {
        match self {
            Node::Leaf { aabb, .. } => aabb,
            Node::Split { aabb, .. } => aabb,
        }
    }
}

impl AabbTree {
    /// Builds a tree over `(aabb, index)` pairs. An empty input gives an
    /// empty tree, which collides with nothing.
    pub fn build(mut items: Vec<(Aabb, usize)>) -> Self {
        if items.is_empty() {
            return AabbTree { root: None };
        }
        AabbTree {
            root: Some(Self::build_node(&mut items)),
        }
    }

    fn build_node(items: &mut [(Aabb, usize)]) -> Box<Node> {
        if items.len() == 1 {
            let (aabb, index) = items[0];
            return Box::new(Node::Leaf { aabb, index });
        }

        let mut bounds = items[0].0;
        for (aabb, _) in items[1..].iter() {
            bounds = bounds.union(aabb);
        }

        let axis = bounds.longest_axis();
        items.sort_by(|a, b| a.0.center(axis).total_cmp(&b.0.center(axis)));

        let mid = items.len() / 2;
        let (left_items, right_items) = items.split_at_mut(mid);
        let left = Self::build_node(left_items);
        let right = Self::build_node(right_items);

        Box::new(Node::Split {
            aabb: bounds,
            left,
            right,
        })
    }

    /// Collects the indices of all leaves whose box intersects `query`.
    pub fn query(&self, query: &Aabb, out: &mut Vec<usize>) {
        if let Some(root) = &self.root {
            Self::query_node(root, query, out);
        }
    }

    fn query_node(node: &Node, query: &Aabb, out: &mut Vec<usize>) {
        if !node.aabb().intersects(query) {
            return;
        }
        match node {
            Node::Leaf { index, .. } => out.push(*index),
            Node::Split { left, right, .. } => {
                Self::query_node(left, query, out);
                Self::query_node(right, query, out);
            }
        }
    }

    /// Collects all index pairs `(i, j)` with a leaf `i` of `self` whose
    /// box intersects a leaf `j` of `other`, by simultaneous descent.
    pub fn collisions(&self, other: &AabbTree, out: &mut Vec<(usize, usize)>) {
        if let (Some(a), Some(b)) = (&self.root, &other.root) {
            Self::collide_nodes(a, b, out);
        }
    }

    fn collide_nodes(a: &Node, b: &Node, out: &mut Vec<(usize, usize)>) {
        if !a.aabb().intersects(b.aabb()) {
            return;
        }
        match (a, b) {
            (Node::Leaf { index: i, .. }, Node::Leaf { index: j, .. }) => {
                out.push((*i, *j));
            }
            (Node::Leaf { .. }, Node::Split { left, right, .. }) => {
                Self::collide_nodes(a, left, out);
                Self::collide_nodes(a, right, out);
            }
            (Node::Split { left, right, .. }, _) => {
                Self::collide_nodes(left, b, out);
                Self::collide_nodes(right, b, out);
            }
        }
    }
}
