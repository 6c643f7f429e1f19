// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// #![deny(missing_docs)]

//! Seamcarve - content-aware width resizing.
//!
//! Removes (or duplicates) the vertical seams that disturb the image
//! least, using the forward-energy cost of Rubinstein, Shamir &
//! Avidan (2008), while steering around any region marked in a
//! protection mask.

extern crate image;

/// The edge cases of the carving recurrences are a table of
/// "if at the border use this, otherwise use that."  `rustfmt` smears
/// an `if` expression across five lines; this keeps each rule on one.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}

pub mod error;
pub use error::CarveError;

pub mod weights;
pub use weights::RgbWeights;

pub mod twodmap;
pub use twodmap::{ProtectionMask, TwoDimensionalMap};

pub mod pointops;
pub use pointops::{change_hue, greyscale, nearest_neighbor};

pub mod workingstate;
pub mod energy;
pub mod costmatrix;
pub mod seamfinder;

pub mod seamcarver;
pub use seamcarver::{ResizeMode, SeamsCarver};
