// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The shrinking working arrays.
//!
//! Three grids travel together through the carve: the greyscale
//! field the energies are computed from, the index map that remembers
//! which source column each working cell came from, and the protection
//! mask.  They are allocated once at the source width and shrunk in
//! place; `width` says how much of each row is still live, and all
//! three grids always agree on it.

use crate::seamfinder::Seam;
use crate::twodmap::{ProtectionMask, TwoDimensionalMap};

#[derive(Debug, Clone)]
pub struct WorkingState {
    pub greyscale: TwoDimensionalMap<u32>,
    pub indices: TwoDimensionalMap<u32>,
    pub mask: ProtectionMask,
    /// The live width of every row of the three grids.
    pub width: u32,
    /// The energy added for a protected pixel.
    pub protection: u64,
}

impl WorkingState {
    /// Seed a fresh working state: the index map starts as the identity.
    /// The greyscale field and the mask must be the same size.
    pub fn new(greyscale: TwoDimensionalMap<u32>, mask: ProtectionMask) -> Self {
        debug_assert_eq!(greyscale.dimensions(), mask.dimensions());
        let (width, height) = greyscale.dimensions();
        let indices = TwoDimensionalMap::from_fn(width, height, |x, _| x);
        let protection = protection_energy(&greyscale);
        WorkingState {
            greyscale,
            indices,
            mask,
            width,
            protection,
        }
    }

    pub fn height(&self) -> u32 {
        self.greyscale.height
    }

    /// The live part of row `y` of the index map.
    pub fn index_row(&self, y: u32) -> &[u32] {
        &self.indices.row(y)[..self.width as usize]
    }

    /// Cut one seam out of all three grids; the live width drops by one.
    pub fn delete_seam(&mut self, seam: &Seam) {
        debug_assert_eq!(seam.len(), self.height() as usize);
        debug_assert!(self.width > 0);
        for (y, &x) in seam.columns.iter().enumerate() {
            let at = (x, y as u32);
            self.greyscale.remove_from_row(at, self.width);
            self.indices.remove_from_row(at, self.width);
            self.mask.remove_from_row(at, self.width);
        }
        self.width -= 1;
    }
}

/// Strictly more than any seam can accumulate without touching a
/// protected pixel.  Per row a seam collects at most `2 * max` of
/// gradient energy and `2 * max` of forward cost.
fn protection_energy(greyscale: &TwoDimensionalMap<u32>) -> u64 {
    let max = greyscale.as_slice().iter().cloned().max().unwrap_or(0) as u64;
    4 * max * greyscale.height as u64 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> WorkingState {
        let greyscale = TwoDimensionalMap::from_fn(4, 2, |x, y| 10 * y + x);
        let mask = TwoDimensionalMap::from_fn(4, 2, |x, _| x == 3);
        WorkingState::new(greyscale, mask)
    }

    #[test]
    fn indices_start_as_identity() {
        let state = state();
        assert_eq!(state.width, 4);
        assert_eq!(state.index_row(0), &[0, 1, 2, 3]);
        assert_eq!(state.index_row(1), &[0, 1, 2, 3]);
    }

    #[test]
    fn protection_outweighs_every_unprotected_seam() {
        // max intensity 13, two rows.
        assert_eq!(state().protection, 4 * 13 * 2 + 1);
    }

    #[test]
    fn deleting_a_seam_keeps_the_grids_aligned() {
        let mut state = state();
        state.delete_seam(&Seam {
            columns: vec![1, 3],
            original: vec![1, 3],
        });
        assert_eq!(state.width, 3);
        assert_eq!(state.index_row(0), &[0, 2, 3]);
        assert_eq!(state.index_row(1), &[0, 1, 2]);
        assert_eq!(&state.greyscale.row(0)[..3], &[0, 2, 3]);
        assert_eq!(&state.greyscale.row(1)[..3], &[10, 11, 12]);
        assert_eq!(&state.mask.row(0)[..3], &[false, false, true]);
        assert_eq!(&state.mask.row(1)[..3], &[false, false, false]);

        state.delete_seam(&Seam {
            columns: vec![0, 0],
            original: vec![0, 0],
        });
        assert_eq!(state.width, 2);
        assert_eq!(state.index_row(0), &[2, 3]);
        assert_eq!(state.index_row(1), &[1, 2]);
    }
}
