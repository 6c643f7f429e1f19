// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A dense, addressable two-dimensional field.
//!
//! Every grid the carver keeps (the greyscale field, the index map,
//! the protection mask, the cost matrix) is one of these.  The width
//! stored here is the *allocated* stride and never changes; the
//! carving loop tracks how much of each row is still live and passes
//! that along separately.

use std::ops::{Index, IndexMut};

use crate::error::CarveError;
use crate::pointops::generate;

/// A row-major grid of `width` by `height` values.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    pub width: u32,
    pub height: u32,
    data: Vec<P>,
}

/// `true` marks a pixel that seams must avoid.
pub type ProtectionMask = TwoDimensionalMap<bool>;

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// A grid filled with `P::default()`.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            data: vec![P::default(); width as usize * height as usize],
        }
    }

    /// Wrap existing row-major data; the length must be exactly
    /// `width * height`.
    pub fn from_vec(width: u32, height: u32, data: Vec<P>) -> Option<Self> {
        if data.len() == width as usize * height as usize {
            Some(TwoDimensionalMap {
                width,
                height,
                data,
            })
        } else {
            None
        }
    }

    /// Fill a grid by calling `f(x, y)` once per cell.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        P: Send,
        F: Fn(u32, u32) -> P + Sync,
    {
        TwoDimensionalMap {
            width,
            height,
            data: generate(width, height, f),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.
    #[inline]
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// The whole allocated row `y`, live part and dead tail alike.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Delete the cell at `x` from the first `live` cells of row `y`,
    /// sliding everything to its right one place left.  The last live
    /// cell is left behind as a stale duplicate; callers shrink their
    /// live width to match.
    pub fn remove_from_row(&mut self, (x, y): (u32, u32), live: u32) {
        debug_assert!(x < live && live <= self.width);
        let start = self.get_index(0, y);
        let (x, live) = (x as usize, live as usize);
        self.data
            .copy_within(start + x + 1..start + live, start + x);
    }

    /// The raw row-major cells.
    pub fn as_slice(&self) -> &[P] {
        &self.data
    }
}

impl ProtectionMask {
    /// Check that a mask covers an image of the given size exactly.
    pub fn check_fits(&self, width: u32, height: u32) -> Result<(), CarveError> {
        if self.dimensions() == (width, height) {
            Ok(())
        } else {
            Err(CarveError::MaskMismatch {
                mask_width: self.width,
                mask_height: self.height,
                width,
                height,
            })
        }
    }

    pub fn protected_count(&self) -> usize {
        self.data.iter().filter(|p| **p).count()
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}

/// One cell of the cost matrix: the cheapest cumulative cost of any
/// seam ending here, and the column in the row above it came from.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct EnergyAndBackPointer<P: Default + Copy> {
    pub energy: P,
    pub parent: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_checks_length() {
        assert!(TwoDimensionalMap::from_vec(3, 2, vec![0u32; 6]).is_some());
        assert!(TwoDimensionalMap::from_vec(3, 2, vec![0u32; 5]).is_none());
    }

    #[test]
    fn from_fn_addresses_by_x_then_y() {
        let map = TwoDimensionalMap::from_fn(4, 3, |x, y| y * 10 + x);
        assert_eq!(map[(0, 0)], 0);
        assert_eq!(map[(3, 0)], 3);
        assert_eq!(map[(2, 1)], 12);
        assert_eq!(map.row(2), &[20, 21, 22, 23]);
    }

    #[test]
    fn removing_from_a_row_shifts_only_that_row() {
        let mut map = TwoDimensionalMap::from_fn(5, 2, |x, y| y * 10 + x);
        map.remove_from_row((1, 0), 5);
        assert_eq!(&map.row(0)[..4], &[0, 2, 3, 4]);
        assert_eq!(map.row(1), &[10, 11, 12, 13, 14]);

        // Only the live prefix takes part.
        map.remove_from_row((0, 1), 3);
        assert_eq!(map.row(1), &[11, 12, 12, 13, 14]);
    }

    #[test]
    fn removing_the_last_live_cell_is_a_no_op_on_data() {
        let mut map = TwoDimensionalMap::from_fn(3, 1, |x, _| x);
        map.remove_from_row((2, 0), 3);
        assert_eq!(map.row(0), &[0, 1, 2]);
    }

    #[test]
    fn masks_must_match_the_image() {
        let mask = ProtectionMask::new(4, 3);
        assert!(mask.check_fits(4, 3).is_ok());
        assert_eq!(
            mask.check_fits(3, 4),
            Err(CarveError::MaskMismatch {
                mask_width: 4,
                mask_height: 3,
                width: 3,
                height: 4
            })
        );
    }
}
