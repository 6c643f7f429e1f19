// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Construction-time failures.  Once a carver exists, nothing it does
//! can fail.

use failure::Fail;

/// Everything that can go wrong while setting up a carve.
#[derive(Debug, Fail, Clone, PartialEq, Eq)]
pub enum CarveError {
    /// The source must be at least 2x2.
    #[fail(display = "image is too small to carve: {}x{}", width, height)]
    TooSmall { width: u32, height: u32 },

    /// More seams than half the source width.
    #[fail(
        display = "too many seams requested: {} (at most {} for this image)",
        requested, limit
    )]
    TooManySeams { requested: u32, limit: u32 },

    /// A channel weight outside 0..=100.
    #[fail(display = "invalid {} weight: {} (must be 0..=100)", channel, value)]
    InvalidWeight { channel: &'static str, value: u32 },

    #[fail(display = "the weight divisor must be positive")]
    ZeroDivisor,

    #[fail(
        display = "mask is {}x{} but the image is {}x{}",
        mask_width, mask_height, width, height
    )]
    MaskMismatch {
        mask_width: u32,
        mask_height: u32,
        width: u32,
        height: u32,
    },
}
