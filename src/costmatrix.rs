// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The cumulative cost matrix
//!
//! For every live working cell, the cheapest forward-energy cost of
//! any seam from the top row down to that cell, and the column in the
//! row above that the cheapest seam came through:
//!
//! ```text
//!                      ⎧ M(x−1,y−1) + CL(x,y)
//! M(x,y) = E(x,y) + min⎨ M(x,y−1)   + CU(x,y)
//!                      ⎩ M(x+1,y−1) + CR(x,y)
//! ```
//!
//! Ties go to the left parent, then the right, then straight up.
//!
//! Each row depends on the whole of the row above it, so rows are
//! filled strictly top to bottom.

use crate::energy::{forward_cost, pixel_energy};
use crate::twodmap::{EnergyAndBackPointer, TwoDimensionalMap};
use crate::workingstate::WorkingState;

/// Cumulative cost and back-pointer for every working cell.  Allocated
/// at the source width; only the first `state.width` cells of each row
/// are meaningful after a build.
pub type CostMatrix = TwoDimensionalMap<EnergyAndBackPointer<u64>>;

// The cheapest way into `(x, y)` from the row above.
fn cheapest_parent(
    state: &WorkingState,
    costs: &CostMatrix,
    (x, y): (u32, u32),
) -> EnergyAndBackPointer<u64> {
    let forward = forward_cost(state, (x, y));
    let above = |px: u32| costs[(px, y - 1)].energy;

    let up = EnergyAndBackPointer {
        energy: above(x).saturating_add(forward.up),
        parent: x,
    };
    let left = if x > 0 {
        Some(EnergyAndBackPointer {
            energy: above(x - 1).saturating_add(forward.left),
            parent: x - 1,
        })
    } else {
        None
    };
    let right = if x + 1 < state.width {
        Some(EnergyAndBackPointer {
            energy: above(x + 1).saturating_add(forward.right),
            parent: x + 1,
        })
    } else {
        None
    };

    let best = [left, right]
        .iter()
        .flatten()
        .map(|c| c.energy)
        .fold(up.energy, u64::min);

    // Evaluation order is the tie-break.
    [left, right]
        .iter()
        .flatten()
        .find(|c| c.energy == best)
        .cloned()
        .unwrap_or(up)
}

/// Rebuild `costs` over the live width of `state`.
pub fn build_cost_matrix(state: &WorkingState, costs: &mut CostMatrix) {
    debug_assert_eq!(costs.dimensions(), state.greyscale.dimensions());
    for x in 0..state.width {
        costs[(x, 0)] = EnergyAndBackPointer {
            energy: pixel_energy(state, (x, 0)),
            parent: x,
        };
    }

    for y in 1..state.height() {
        for x in 0..state.width {
            let parent = cheapest_parent(state, costs, (x, y));
            costs[(x, y)] = EnergyAndBackPointer {
                energy: parent.energy.saturating_add(pixel_energy(state, (x, y))),
                parent: parent.parent,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twodmap::ProtectionMask;

    fn state(width: u32, height: u32, grey: &[u32]) -> WorkingState {
        let greyscale = TwoDimensionalMap::from_vec(width, height, grey.to_vec()).unwrap();
        WorkingState::new(greyscale, ProtectionMask::new(width, height))
    }

    fn parents(costs: &CostMatrix, y: u32, width: u32) -> Vec<u32> {
        (0..width).map(|x| costs[(x, y)].parent).collect()
    }

    #[test]
    fn uniform_ties_prefer_left_then_right() {
        let state = state(4, 3, &[5; 12]);
        let mut costs = CostMatrix::new(4, 3);
        build_cost_matrix(&state, &mut costs);
        assert!(costs.as_slice().iter().all(|c| c.energy == 0));
        // Column 0 has no left parent, so the right one wins the tie.
        assert_eq!(parents(&costs, 1, 4), vec![1, 0, 1, 2]);
        assert_eq!(parents(&costs, 2, 4), vec![1, 0, 1, 2]);
    }

    #[test]
    fn cheapest_parent_is_chosen() {
        let grey = [
            0, 0, 9, 9,
            0, 0, 9, 9,
            0, 0, 9, 9,
        ];
        let state = state(4, 3, &grey);
        let mut costs = CostMatrix::new(4, 3);
        build_cost_matrix(&state, &mut costs);

        // First row is bare pixel energy.
        let top: Vec<u64> = (0..4).map(|x| costs[(x, 0)].energy).collect();
        assert_eq!(top, vec![0, 9, 0, 0]);

        // Column 2: straight down and down-right both cost 9, left
        // costs 27.  Right beats up on the tie.
        assert_eq!(costs[(2, 1)].parent, 3);
        assert_eq!(costs[(2, 1)].energy, 9);
        // Column 1 crosses the 0/9 edge however it arrives; left is
        // cheapest.
        assert_eq!(costs[(1, 1)].parent, 0);
        assert_eq!(costs[(1, 1)].energy, 18);
        assert_eq!(costs[(0, 2)].energy, 0);
        assert_eq!(costs[(0, 2)].parent, 0);
    }

    #[test]
    fn only_the_live_width_is_considered() {
        let mut state = state(4, 2, &[1, 1, 1, 200, 1, 1, 1, 200]);
        state.width = 3;
        let mut costs = CostMatrix::new(4, 2);
        build_cost_matrix(&state, &mut costs);
        // Column 2 is the last live column; it may not look right.
        assert_eq!(costs[(2, 1)].parent, 1);
        assert_eq!(costs[(2, 1)].energy, 0);
    }
}
