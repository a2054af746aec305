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

//! Cell classification and cut-cell quadrature over a stack of
//! overlapping meshes.
//!
//! Parts are ordered by priority: a part with a higher index cuts and
//! covers the parts below it. [`MultiMesh::build`] classifies every cell
//! of every part as uncut, cut or covered, and constructs for every cut
//! cell a quadrature rule for the visible portion of the cell (its own
//! measure minus the union of the overlaps with higher parts) and, per
//! cutting cell, an interface rule over the portion of the cutting cell's
//! boundary that runs through it.
//!
//! All built state lives in per-part caches that [`MultiMesh::build`]
//! replaces wholesale and [`MultiMesh::clear`] drops. There is no partial
//! invalidation: reads are only valid after a completed build.

mod inclusion_exclusion;

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, info_span};

use crate::geometry::{Aabb, AabbTree, Simplex};
use crate::kernel::{FilteredKernel, OrientationKernel};
use crate::mesh::Mesh;
use crate::predicates::collides;
use crate::quadrature::{compute_quadrature_rule, QuadratureRule};
use crate::triangulation::triangulate;
use crate::verify;
use self::inclusion_exclusion::accumulate_union;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MultiMeshError {
    #[error("part {part} is not full-dimensional (gdim = {gdim}, tdim = {tdim})")]
    NotFullDimensional {
        part: usize,
        gdim: usize,
        tdim: usize,
    },
    #[error("part {part} has gdim = {gdim}, earlier parts have gdim = {expected}")]
    DimensionMismatch {
        part: usize,
        gdim: usize,
        expected: usize,
    },
}

/// Classification of a cell relative to the higher-priority parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    /// No higher part touches the cell.
    Uncut,
    /// A higher part's boundary runs through the cell.
    Cut,
    /// The cell lies entirely inside some higher part.
    Covered,
}

#[derive(Debug, Default)]
struct PartData {
    states: Vec<CellState>,
    uncut_cells: Vec<usize>,
    cut_cells: Vec<usize>,
    covered_cells: Vec<usize>,
    /// cut cell -> cutting `(part, cell)` pairs, ascending.
    collision_map: AHashMap<usize, Vec<(usize, usize)>>,
    /// cut cell -> signed quadrature of the union of its overlaps.
    overlap_rules: AHashMap<usize, QuadratureRule>,
    /// cut cell -> quadrature of the cell minus its overlaps.
    cut_rules: AHashMap<usize, QuadratureRule>,
    /// cut cell -> one interface rule per collision map entry.
    interface_rules: AHashMap<usize, Vec<QuadratureRule>>,
    /// cut cell -> flat facet normals aligned with the interface rules.
    facet_normals: AHashMap<usize, Vec<Vec<f64>>>,
}

/// A prioritized stack of overlapping full-dimensional meshes.
pub struct MultiMesh<K: OrientationKernel = FilteredKernel> {
    kernel: K,
    parts: Vec<Arc<Mesh>>,
    data: Vec<PartData>,
}

impl MultiMesh<FilteredKernel> {
    pub fn new() -> Self {
        MultiMesh::with_kernel(FilteredKernel)
    }
}

impl Default for MultiMesh<FilteredKernel> {
    fn default() -> Self {
        MultiMesh::new()
    }
}

impl<K: OrientationKernel> MultiMesh<K> {
    /// A multimesh whose geometric decisions run through `kernel`.
    pub fn with_kernel(kernel: K) -> Self {
        MultiMesh {
            kernel,
            parts: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Appends a part on top of the existing ones. Invalidates any built
    /// state.
    pub fn add(&mut self, mesh: Arc<Mesh>) -> Result<usize, MultiMeshError> {
        let part = self.parts.len();
        if mesh.tdim() != mesh.gdim() {
            return Err(MultiMeshError::NotFullDimensional {
                part,
                gdim: mesh.gdim(),
                tdim: mesh.tdim(),
            });
        }
        if let Some(first) = self.parts.first() {
            if mesh.gdim() != first.gdim() {
                return Err(MultiMeshError::DimensionMismatch {
                    part,
                    gdim: mesh.gdim(),
                    expected: first.gdim(),
                });
            }
        }
        self.clear();
        self.parts.push(mesh);
        Ok(part)
    }

    pub fn num_parts(&self) -> usize {
        self.parts.len()
    }

    pub fn part(&self, i: usize) -> &Mesh {
        &self.parts[i]
    }

    pub fn is_built(&self) -> bool {
        self.data.len() == self.parts.len() && !self.parts.is_empty()
    }

    /// Drops all built state.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Classifies every cell and builds the cut-cell and interface
    /// quadrature rules at polynomial exactness `order`.
    pub fn build(&mut self, order: usize) {
        assert!(order >= 1, "build: quadrature order must be >= 1");
        let span = info_span!("multimesh_build", parts = self.parts.len(), order);
        let _guard = span.enter();

        self.clear();
        if self.parts.is_empty() {
            return;
        }

        let cell_trees: Vec<AabbTree> = self.parts.iter().map(|m| cell_tree(m)).collect();
        let boundaries: Vec<Mesh> = self.parts.iter().map(|m| m.boundary()).collect();
        let boundary_trees: Vec<AabbTree> = boundaries.iter().map(cell_tree).collect();

        self.build_collision_maps(&cell_trees, &boundaries, &boundary_trees);
        self.build_quadrature_rules_cut_cells(order);
        self.build_quadrature_rules_interface(&boundaries, order);
    }

    pub fn cell_states(&self, part: usize) -> &[CellState] {
        &self.built(part).states
    }

    pub fn uncut_cells(&self, part: usize) -> &[usize] {
        &self.built(part).uncut_cells
    }

    pub fn cut_cells(&self, part: usize) -> &[usize] {
        &self.built(part).cut_cells
    }

    pub fn covered_cells(&self, part: usize) -> &[usize] {
        &self.built(part).covered_cells
    }

    /// For each cut cell, the cutting `(part, cell)` pairs in ascending
    /// order.
    pub fn collision_map_cut_cells(&self, part: usize) -> &AHashMap<usize, Vec<(usize, usize)>> {
        &self.built(part).collision_map
    }

    /// For each cut cell, the quadrature of the cell minus the union of
    /// its overlaps with higher parts.
    pub fn quadrature_rules_cut_cells(&self, part: usize) -> &AHashMap<usize, QuadratureRule> {
        &self.built(part).cut_rules
    }

    /// For each cut cell, the signed quadrature of the union of its
    /// overlaps with higher parts.
    pub fn quadrature_rules_overlap(&self, part: usize) -> &AHashMap<usize, QuadratureRule> {
        &self.built(part).overlap_rules
    }

    /// For each cut cell, one interface rule per collision map entry: the
    /// portion of the cutting cell's boundary inside this cell, minus the
    /// portions covered by cutting cells of still higher parts.
    pub fn quadrature_rules_interface(
        &self,
        part: usize,
    ) -> &AHashMap<usize, Vec<QuadratureRule>> {
        &self.built(part).interface_rules
    }

    /// Outward unit normals of the cutting cells' boundary facets, one
    /// flat `gdim`-vector per interface quadrature point, aligned with
    /// [`MultiMesh::quadrature_rules_interface`].
    pub fn facet_normals(&self, part: usize) -> &AHashMap<usize, Vec<Vec<f64>>> {
        &self.built(part).facet_normals
    }

    fn built(&self, part: usize) -> &PartData {
        assert!(self.is_built(), "multimesh read before build()");
        &self.data[part]
    }

    /// Classifies cells by exact re-checks of the bounding box candidate
    /// pairs: a cell touched by a higher part's boundary is cut, a cell
    /// inside a higher part's domain without touching its boundary is
    /// covered, and covered wins over cut.
    fn build_collision_maps(
        &mut self,
        cell_trees: &[AabbTree],
        boundaries: &[Mesh],
        boundary_trees: &[AabbTree],
    ) {
        let gdim = self.parts[0].gdim();
        for i in 0..self.parts.len() {
            let part = &self.parts[i];
            let simplices: Vec<Simplex> =
                (0..part.num_cells()).map(|c| part.cell_simplex(c)).collect();

            let mut domain_hits: AHashMap<usize, Vec<(usize, usize)>> = AHashMap::default();
            let mut covered: AHashSet<usize> = AHashSet::default();

            for j in (i + 1)..self.parts.len() {
                let cutter = &self.parts[j];

                let mut candidates = Vec::new();
                cell_trees[i].collisions(&cell_trees[j], &mut candidates);
                let mut in_domain: AHashSet<usize> = AHashSet::default();
                for (c, t) in candidates {
                    let cutting = cutter.cell_simplex(t);
                    if collides(&self.kernel, &simplices[c], &cutting, gdim) {
                        domain_hits.entry(c).or_default().push((j, t));
                        in_domain.insert(c);
                    }
                }

                let mut candidates = Vec::new();
                cell_trees[i].collisions(&boundary_trees[j], &mut candidates);
                let mut on_boundary: AHashSet<usize> = AHashSet::default();
                for (c, f) in candidates {
                    let facet = boundaries[j].cell_simplex(f);
                    if collides(&self.kernel, &simplices[c], &facet, gdim) {
                        on_boundary.insert(c);
                    }
                }

                for &c in &in_domain {
                    if !on_boundary.contains(&c) {
                        covered.insert(c);
                    }
                }
            }

            let mut data = PartData::default();
            for c in 0..part.num_cells() {
                let state = if covered.contains(&c) {
                    data.covered_cells.push(c);
                    CellState::Covered
                } else if let Some(mut cutting) = domain_hits.remove(&c) {
                    cutting.sort_unstable();
                    data.collision_map.insert(c, cutting);
                    data.cut_cells.push(c);
                    CellState::Cut
                } else {
                    data.uncut_cells.push(c);
                    CellState::Uncut
                };
                data.states.push(state);
            }
            debug!(
                part = i,
                uncut = data.uncut_cells.len(),
                cut = data.cut_cells.len(),
                covered = data.covered_cells.len(),
                "classified cells"
            );
            self.data.push(data);
        }
    }

    /// For every cut cell C with cutting cells T_1..T_k, the net rule is
    /// the full-cell quadrature minus the inclusion-exclusion quadrature
    /// of the union of the C with T_m intersections.
    fn build_quadrature_rules_cut_cells(&mut self, order: usize) {
        let gdim = self.parts[0].gdim();
        let tdim = self.parts[0].tdim();
        for i in 0..self.parts.len() {
            let part = &self.parts[i];
            let mut overlap_rules = AHashMap::default();
            let mut cut_rules = AHashMap::default();
            for (&cell, cutting) in &self.data[i].collision_map {
                let cell_simplex = part.cell_simplex(cell);

                let initial: Vec<_> = cutting
                    .iter()
                    .map(|&(j, t)| {
                        let points = crate::intersection::intersect(
                            &self.kernel,
                            &cell_simplex,
                            &self.parts[j].cell_simplex(t),
                            gdim,
                        );
                        triangulate(&self.kernel, &points, gdim, tdim)
                    })
                    .collect();

                let mut overlap = QuadratureRule::new(gdim);
                accumulate_union(&mut overlap, &self.kernel, &initial, gdim, tdim, order, 1.0);

                let mut net = compute_quadrature_rule(&cell_simplex, gdim, order);
                net.append_scaled(&overlap, -1.0);
                verify::check_net_weight(net.sum_weights(), cell_simplex.measure());

                overlap_rules.insert(cell, overlap);
                cut_rules.insert(cell, net);
            }
            debug!(part = i, rules = cut_rules.len(), "built cut cell rules");
            self.data[i].overlap_rules = overlap_rules;
            self.data[i].cut_rules = cut_rules;
        }
    }

    /// The interface of cutting cell T inside cut cell C is the portion
    /// of part j's boundary facets of T that runs through C, minus the
    /// portions covered by cutting cells of parts above j. The same
    /// inclusion-exclusion machinery runs one topological dimension
    /// lower, with the union entering negatively against the own-measure
    /// term of each facet fragment.
    fn build_quadrature_rules_interface(&mut self, boundaries: &[Mesh], order: usize) {
        let gdim = self.parts[0].gdim();
        let tdim = self.parts[0].tdim();

        // facet-of-boundary membership by sorted vertex key, per part
        let boundary_keys: Vec<AHashSet<SmallVec<[usize; 3]>>> = boundaries
            .iter()
            .map(|b| {
                (0..b.num_cells())
                    .map(|c| {
                        let mut key: SmallVec<[usize; 3]> =
                            SmallVec::from_slice(b.cell_vertex_indices(c));
                        key.sort_unstable();
                        key
                    })
                    .collect()
            })
            .collect();

        for i in 0..self.parts.len() {
            let part = &self.parts[i];
            let mut interface_rules = AHashMap::default();
            let mut facet_normals = AHashMap::default();
            for (&cell, cutting) in &self.data[i].collision_map {
                let cell_simplex = part.cell_simplex(cell);
                let mut rules: Vec<QuadratureRule> = Vec::with_capacity(cutting.len());
                let mut normals: Vec<Vec<f64>> = Vec::with_capacity(cutting.len());

                for &(j, t) in cutting {
                    let mut rule = QuadratureRule::new(gdim);
                    let mut nrm: Vec<f64> = Vec::new();
                    let t_simplex = self.parts[j].cell_simplex(t);
                    let t_facets = t_simplex.facets();

                    // only cells of parts above j can cover part j's boundary
                    let higher: Vec<&(usize, usize)> =
                        cutting.iter().filter(|&&(jj, _)| jj > j).collect();

                    for (f, facet_indices) in
                        self.parts[j].cell_facet_indices(t).into_iter().enumerate()
                    {
                        let mut key = facet_indices.clone();
                        key.sort_unstable();
                        if !boundary_keys[j].contains(&key) {
                            continue;
                        }

                        let facet = &t_facets[f];
                        let points =
                            crate::intersection::intersect(&self.kernel, &cell_simplex, facet, gdim);
                        let fragments = triangulate(&self.kernel, &points, gdim, tdim - 1);
                        if fragments.is_empty() {
                            continue;
                        }

                        let before = rule.num_points();
                        for piece in &fragments {
                            rule.append_scaled(&compute_quadrature_rule(piece, gdim, order), 1.0);
                            let initial: Vec<_> = higher
                                .iter()
                                .map(|&&(jj, tt)| {
                                    let pts = crate::intersection::intersect(
                                        &self.kernel,
                                        piece,
                                        &self.parts[jj].cell_simplex(tt),
                                        gdim,
                                    );
                                    triangulate(&self.kernel, &pts, gdim, tdim - 1)
                                })
                                .collect();
                            accumulate_union(
                                &mut rule,
                                &self.kernel,
                                &initial,
                                gdim,
                                tdim - 1,
                                order,
                                -1.0,
                            );
                        }

                        let normal = t_simplex.facet_normal(f, gdim);
                        for _ in before..rule.num_points() {
                            for d in 0..gdim {
                                nrm.push(normal[d]);
                            }
                        }
                    }

                    rules.push(rule);
                    normals.push(nrm);
                }

                interface_rules.insert(cell, rules);
                facet_normals.insert(cell, normals);
            }
            debug!(
                part = i,
                cells = interface_rules.len(),
                "built interface rules"
            );
            self.data[i].interface_rules = interface_rules;
            self.data[i].facet_normals = facet_normals;
        }
    }
}

fn cell_tree(mesh: &Mesh) -> AabbTree {
    AabbTree::build(
        (0..mesh.num_cells())
            .map(|c| (Aabb::from_simplex(&mesh.cell_simplex(c)), c))
            .collect(),
    )
}
