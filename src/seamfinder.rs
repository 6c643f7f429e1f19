// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Trace the cheapest seam out of a built cost matrix.

use crate::costmatrix::CostMatrix;
use crate::workingstate::WorkingState;

/// One top-to-bottom seam, one entry per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seam {
    /// Working-array columns, valid at the width the seam was found at.
    pub columns: Vec<u32>,
    /// The same pixels as source-image columns.
    pub original: Vec<u32>,
}

impl Seam {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Find the x coordinate of the bottommost cell with the least
/// cumulative cost (leftmost on a tie), then follow the back-pointers
/// up to the first row.
pub fn trace_seam(state: &WorkingState, costs: &CostMatrix) -> Seam {
    let height = state.height();
    let bottom = height - 1;

    let mut seam_col = (0..state.width)
        .min_by_key(|x| costs[(*x, bottom)].energy)
        .unwrap_or(0);

    let mut columns = vec![0; height as usize];
    let mut original = vec![0; height as usize];
    for y in (0..height).rev() {
        columns[y as usize] = seam_col;
        original[y as usize] = state.indices[(seam_col, y)];
        seam_col = costs[(seam_col, y)].parent;
    }
    Seam { columns, original }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costmatrix::build_cost_matrix;
    use crate::twodmap::{ProtectionMask, TwoDimensionalMap};

    fn state(width: u32, height: u32, grey: &[u32]) -> WorkingState {
        let greyscale = TwoDimensionalMap::from_vec(width, height, grey.to_vec()).unwrap();
        WorkingState::new(greyscale, ProtectionMask::new(width, height))
    }

    fn traced(state: &WorkingState) -> Seam {
        let mut costs = CostMatrix::new(state.greyscale.width, state.height());
        build_cost_matrix(state, &mut costs);
        trace_seam(state, &costs)
    }

    #[test]
    fn uniform_image_zigzags_from_the_left() {
        let seam = traced(&state(4, 4, &[7; 16]));
        assert_eq!(seam.columns, vec![1, 0, 1, 0]);
        assert_eq!(seam.original, vec![1, 0, 1, 0]);
    }

    #[test]
    fn seam_follows_a_dark_valley() {
        let grey = [
            9, 9, 0, 9, 9, //
            9, 9, 9, 0, 9, //
            9, 9, 9, 0, 9, //
            9, 9, 0, 9, 9,
        ];
        let seam = traced(&state(5, 4, &grey));
        assert_eq!(seam.len(), 4);
        for pair in seam.columns.windows(2) {
            assert!((pair[0] as i64 - pair[1] as i64).abs() <= 1);
        }
        assert!(seam.columns.iter().all(|x| *x < 5));
    }

    #[test]
    fn original_columns_come_through_the_index_map() {
        let mut state = state(4, 2, &[3; 8]);
        state.indices[(1, 0)] = 2;
        state.indices[(0, 1)] = 1;
        let seam = traced(&state);
        assert_eq!(seam.columns, vec![1, 0]);
        assert_eq!(seam.original, vec![2, 1]);
    }

    #[test]
    fn a_tall_image_does_not_recurse() {
        let height = 20_000;
        let state = state(3, height, &vec![1; 3 * height as usize]);
        let seam = traced(&state);
        assert_eq!(seam.len(), height as usize);
    }
}
