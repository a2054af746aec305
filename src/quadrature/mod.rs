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

//! Quadrature rules over simplices.
//!
//! Segments get Gauss-Legendre rules; triangles and tetrahedra get
//! collapsed (Duffy) tensor products of them, with the per-direction point
//! counts raised to absorb the polynomial degree of the collapse Jacobian.
//! The weights of every rule sum to the measure of the simplex, which is
//! the property the inclusion-exclusion construction in
//! [`multimesh`](crate::multimesh) rests on.
//!
//! Legendre nodes are computed by Newton iteration and memoized process
//! wide, keyed by point count.

use std::sync::{Arc, Mutex};

use ahash::AHashMap;
use once_cell::sync::Lazy;

use crate::geometry::{Point, Simplex};

/// Integration points and weights over a region of geometric dimension
/// `gdim`. Coordinates are stored flat, `gdim` values per point, in the
/// order of the weights. Weights may be negative: a rule is also the
/// carrier of signed inclusion-exclusion contributions.
#[derive(Clone, Debug, Default)]
pub struct QuadratureRule {
    gdim: usize,
    points: Vec<f64>,
    weights: Vec<f64>,
}

impl QuadratureRule {
    pub fn new(gdim: usize) -> Self {
        QuadratureRule {
            gdim,
            points: Vec::new(),
            weights: Vec::new(),
        }
    }

    pub fn gdim(&self) -> usize {
        self.gdim
    }

    pub fn num_points(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Flat coordinates, `gdim` per point.
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn point(&self, i: usize) -> Point {
        let mut p = Point::origin();
        for d in 0..self.gdim {
            p[d] = self.points[i * self.gdim + d];
        }
        p
    }

    pub fn push(&mut self, point: Point, weight: f64) {
        for d in 0..self.gdim {
            self.points.push(point[d]);
        }
        self.weights.push(weight);
    }

    /// Appends all points of `other` with weights multiplied by `factor`.
    ///
    /// Panics if the geometric dimensions differ.
    pub fn append_scaled(&mut self, other: &QuadratureRule, factor: f64) {
        assert_eq!(
            self.gdim, other.gdim,
            "append_scaled: geometric dimensions differ"
        );
        self.points.extend_from_slice(&other.points);
        self.weights.extend(other.weights.iter().map(|w| w * factor));
    }

    /// The signed measure the rule integrates: the sum of its weights.
    pub fn sum_weights(&self) -> f64 {
        self.weights.iter().sum()
    }
}

/// Builds a quadrature rule over `simplex` exact for polynomials of
/// degree `order`.
///
/// Panics if `order` is zero or the simplex dimension is not 0 to 3.
pub fn compute_quadrature_rule(simplex: &Simplex, gdim: usize, order: usize) -> QuadratureRule {
    assert!(order >= 1, "compute_quadrature_rule: order must be >= 1");
    let p = simplex.points();
    let mut rule = QuadratureRule::new(gdim);
    match simplex.tdim() {
        0 => {
            rule.push(p[0], 1.0);
        }
        1 => {
            let length = simplex.measure();
            for &(t, w) in gauss_legendre_01(points_for_degree(order)).iter() {
                rule.push(p[0] + (p[1] - p[0]) * t, w * length);
            }
        }
        2 => {
            // collapsed product on the reference triangle: (u, v) =
            // (x, y (1 - x)), Jacobian (1 - x), so the x direction carries
            // one extra polynomial degree
            let scale = 2.0 * simplex.measure();
            let gx = gauss_legendre_01(points_for_degree(order + 1));
            let gy = gauss_legendre_01(points_for_degree(order));
            for &(x, wx) in gx.iter() {
                for &(y, wy) in gy.iter() {
                    let (u, v) = (x, y * (1.0 - x));
                    rule.push(
                        p[0] + (p[1] - p[0]) * u + (p[2] - p[0]) * v,
                        wx * wy * (1.0 - x) * scale,
                    );
                }
            }
        }
        3 => {
            // doubly collapsed product, Jacobian (1 - x)^2 (1 - y)
            let scale = 6.0 * simplex.measure();
            let gx = gauss_legendre_01(points_for_degree(order + 2));
            let gy = gauss_legendre_01(points_for_degree(order + 1));
            let gz = gauss_legendre_01(points_for_degree(order));
            for &(x, wx) in gx.iter() {
                for &(y, wy) in gy.iter() {
                    for &(z, wz) in gz.iter() {
                        let u = x;
                        let v = y * (1.0 - x);
                        let w = z * (1.0 - x) * (1.0 - y);
                        let jac = (1.0 - x) * (1.0 - x) * (1.0 - y);
                        rule.push(
                            p[0] + (p[1] - p[0]) * u + (p[2] - p[0]) * v + (p[3] - p[0]) * w,
                            wx * wy * wz * jac * scale,
                        );
                    }
                }
            }
        }
        tdim => panic!("compute_quadrature_rule: unsupported simplex dimension {tdim}"),
    }
    rule
}

/// Gauss points needed for exactness at polynomial degree `deg`:
/// an `n`-point rule is exact up to degree `2n - 1`.
fn points_for_degree(deg: usize) -> usize {
    deg / 2 + 1
}

static NODE_CACHE: Lazy<Mutex<AHashMap<usize, Arc<Vec<(f64, f64)>>>>> =
    Lazy::new(|| Mutex::new(AHashMap::default()));

/// The `n`-point Gauss-Legendre rule on [0, 1], memoized.
fn gauss_legendre_01(n: usize) -> Arc<Vec<(f64, f64)>> {
    let mut cache = NODE_CACHE.lock().unwrap();
    cache
        .entry(n)
        .or_insert_with(|| Arc::new(compute_gauss_legendre_01(n)))
        .clone()
}

fn compute_gauss_legendre_01(n: usize) -> Vec<(f64, f64)> {
    let mut rule = vec![(0.0, 0.0); n];
    let m = n.div_ceil(2);
    for i in 0..m {
        // Tricomi's estimate of the i-th root, then Newton on P_n
        let mut x = (std::f64::consts::PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
        let mut dp = 0.0;
        for _ in 0..100 {
            let (p, d) = legendre(n, x);
            dp = d;
            let dx = p / dp;
            x -= dx;
            if dx.abs() <= 1e-15 {
                break;
            }
        }
        let w = 2.0 / ((1.0 - x * x) * dp * dp);
        // roots come out in descending order; map [-1, 1] -> [0, 1] and
        // fill symmetrically
        rule[i] = (0.5 * (1.0 - x), 0.5 * w);
        rule[n - 1 - i] = (0.5 * (1.0 + x), 0.5 * w);
    }
    rule
}

/// Legendre polynomial `P_n` and its derivative at `x`, by the three-term
/// recurrence.
fn legendre(n: usize, x: f64) -> (f64, f64) {
    let mut p1 = 1.0;
    let mut p2 = 0.0;
    for j in 0..n {
        let p3 = p2;
        p2 = p1;
        p1 = ((2 * j + 1) as f64 * x * p2 - j as f64 * p3) / (j + 1) as f64;
    }
    let dp = n as f64 * (x * p1 - p2) / (x * x - 1.0);
    (p1, dp)
}
