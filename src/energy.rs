// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of a working pixel
//!
//! Two measures feed the cost matrix.  The *pixel energy* is the
//! greyscale gradient at a pixel, plus a penalty if the pixel is
//! protected.  The *forward-looking cost* is the edge that removing a
//! pixel would create between the neighbours that close over it, as
//! described by Rubinstein, Shamir & Avidan (2008):
//!
//!  CU(x,y) = D[(x−1,y),(x+1,y)]
//!  CL(x,y) = CU(x,y) + D[(x,y−1),(x−1,y)]
//!  CR(x,y) = CU(x,y) + D[(x,y−1),(x+1,y)]
//!
//! Every term that would need a neighbour past the live width is
//! dropped.

use crate::cq;
use crate::workingstate::WorkingState;

#[inline]
fn delta(a: u32, b: u32) -> u64 {
    (a as i64 - b as i64).abs() as u64
}

/// Gradient energy of the working pixel at `(x, y)`.  The right-hand
/// neighbour is used horizontally (the left at the last live column)
/// and the one below vertically (the one above on the last row).
pub fn pixel_energy(state: &WorkingState, (x, y): (u32, u32)) -> u64 {
    let grey = &state.greyscale;
    let here = grey[(x, y)];
    let nx = cq!(x + 1 < state.width, x + 1, x - 1);
    let ny = cq!(y + 1 < state.height(), y + 1, y - 1);
    let protection = cq!(state.mask[(x, y)], state.protection, 0);
    delta(here, grey[(nx, y)]) + delta(here, grey[(x, ny)]) + protection
}

/// The new-edge cost of arriving at `(x, y)` from each of the three
/// cells above it.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct ForwardCost {
    pub left: u64,
    pub up: u64,
    pub right: u64,
}

/// Forward-looking cost for a pixel *not* in the first row.
pub fn forward_cost(state: &WorkingState, (x, y): (u32, u32)) -> ForwardCost {
    debug_assert!(y > 0);
    let grey = &state.greyscale;
    let has_left = x > 0;
    let has_right = x + 1 < state.width;
    let above = grey[(x, y - 1)];

    let up = cq!(
        has_left && has_right,
        delta(grey[(x + 1, y)], grey[(x - 1, y)]),
        0
    );
    ForwardCost {
        left: up + cq!(has_left, delta(above, grey[(x - 1, y)]), 0),
        up,
        right: up + cq!(has_right, delta(above, grey[(x + 1, y)]), 0),
    }
}
