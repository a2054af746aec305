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

//! The two tolerances used by intersection construction and triangulation.
//!
//! Collision predicates never consult either constant. Sidedness decisions
//! go through an [`OrientationKernel`](crate::kernel::OrientationKernel),
//! which is sign-exact. The constants below only enter where a point set is
//! post-processed (duplicate merging) or where a branch must be taken before
//! an ill-conditioned formula (near-coplanar classification).

/// Merge tolerance for points produced by intersection construction.
///
/// Two points whose coordinates differ by at most this much per axis are
/// treated as the same point.
pub const EPS: f64 = 3.0e-16;

/// Topological classification tolerance.
///
/// Orientation values smaller than this in magnitude send intersection
/// construction down the collinear/coplanar branch, which recurses in a
/// lower geometric dimension instead of evaluating a parametric formula
/// whose denominator is about to cancel.
pub const EPS_LARGE: f64 = 1.0e-14;
