// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - the resize driver
//!
//! Everything happens in `SeamsCarver::new`: validate, pick a mode,
//! find the seams, and resample the image and mask through the final
//! index map.  The accessors only hand back what was computed.
//!
//! Shrinking is adaptive: every seam is found on the image as the
//! previous seams left it, and each one is cut out of the working
//! arrays before the next search.
//!
//! Enlarging runs the very same removal loop, but on a scratch copy,
//! only to learn which source pixels the first `n` seams would claim.
//! Each of those is then duplicated in place in the original; the
//! original arrays are never cut.

use crate::cq;
use crate::costmatrix::{build_cost_matrix, CostMatrix};
use crate::error::CarveError;
use crate::pointops::intensity_field;
use crate::seamfinder::{trace_seam, Seam};
use crate::twodmap::{ProtectionMask, TwoDimensionalMap};
use crate::weights::RgbWeights;
use crate::workingstate::WorkingState;
use image::{GenericImageView, ImageBuffer, Pixel, Primitive};
use log::{debug, info};

/// Which way the width is going.  Decided once, at construction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResizeMode {
    Shrink,
    Enlarge,
    Identity,
}

impl ResizeMode {
    fn select(in_width: u32, out_width: u32) -> Self {
        if out_width > in_width {
            ResizeMode::Enlarge
        } else if out_width < in_width {
            ResizeMode::Shrink
        } else {
            ResizeMode::Identity
        }
    }
}

/// A finished carve of one image to one target width.
pub struct SeamsCarver<'a, I, P, S>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    image: &'a I,
    mode: ResizeMode,
    seams: Vec<Seam>,
    mask: ProtectionMask,
    output: ImageBuffer<P, Vec<S>>,
}

impl<'a, I, P, S> SeamsCarver<'a, I, P, S>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    /// Carve `image` to `out_width` columns, steering seams around the
    /// pixels set in `mask`.  The image must be at least 2x2, the mask
    /// the same size as the image, and at most half the width may be
    /// removed or added.
    pub fn new(
        image: &'a I,
        out_width: u32,
        weights: RgbWeights,
        mask: &ProtectionMask,
    ) -> Result<Self, CarveError> {
        weights.validate()?;
        let (in_width, height) = image.dimensions();
        if in_width < 2 || height < 2 {
            return Err(CarveError::TooSmall {
                width: in_width,
                height,
            });
        }
        let num_seams = cq!(
            out_width > in_width,
            out_width - in_width,
            in_width - out_width
        );
        if num_seams > in_width / 2 {
            return Err(CarveError::TooManySeams {
                requested: num_seams,
                limit: in_width / 2,
            });
        }
        mask.check_fits(in_width, height)?;

        let mode = ResizeMode::select(in_width, out_width);
        info!(
            "seam carving {}x{} to width {}: {:?}, {} seams",
            in_width, height, out_width, mode, num_seams
        );

        let (seams, indices) = match mode {
            ResizeMode::Identity => (
                Vec::new(),
                TwoDimensionalMap::from_fn(in_width, height, |x, _| x),
            ),
            ResizeMode::Shrink => {
                let mut state = WorkingState::new(intensity_field(image, &weights), mask.clone());
                let seams = find_seams(&mut state, num_seams);
                let indices = TwoDimensionalMap::from_fn(out_width, height, |x, y| {
                    state.index_row(y)[x as usize]
                });
                (seams, indices)
            }
            ResizeMode::Enlarge => {
                let mut scratch =
                    WorkingState::new(intensity_field(image, &weights), mask.clone());
                let seams = find_seams(&mut scratch, num_seams);
                let indices = duplicate_seams(&seams, in_width, out_width, height);
                (seams, indices)
            }
        };

        let output = ImageBuffer::from_fn(out_width, height, |x, y| {
            image.get_pixel(indices[(x, y)], y)
        });
        let mask = TwoDimensionalMap::from_fn(out_width, height, |x, y| {
            mask[(indices[(x, y)], y)]
        });
        info!("seam carving done");

        Ok(SeamsCarver {
            image,
            mode,
            seams,
            mask,
            output,
        })
    }

    pub fn mode(&self) -> ResizeMode {
        self.mode
    }

    /// The resized image: target width by source height.
    pub fn resize(&self) -> &ImageBuffer<P, Vec<S>> {
        &self.output
    }

    /// Give up the carver and keep the resized image.
    pub fn into_resized(self) -> ImageBuffer<P, Vec<S>> {
        self.output
    }

    /// The protection mask, carried through the same seams as the
    /// image.
    pub fn mask_after_carving(&self) -> &ProtectionMask {
        &self.mask
    }

    /// Every seam found, in the order found.
    pub fn seams(&self) -> &[Seam] {
        &self.seams
    }

    /// A copy of the source with every seam painted in `color`.  Only a
    /// shrink removes exactly these pixels; for an enlargement they are
    /// the pixels that were doubled.
    pub fn show_seams(&self, color: P) -> ImageBuffer<P, Vec<S>> {
        let (width, height) = self.image.dimensions();
        let mut out = ImageBuffer::from_fn(width, height, |x, y| self.image.get_pixel(x, y));
        for seam in &self.seams {
            for (y, &x) in seam.original.iter().enumerate() {
                out.put_pixel(x, y as u32, color);
            }
        }
        out
    }
}

// The adaptive removal loop, shared by both directions.
fn find_seams(state: &mut WorkingState, count: u32) -> Vec<Seam> {
    let mut costs = CostMatrix::new(state.greyscale.width, state.height());
    let mut seams = Vec::with_capacity(count as usize);
    for n in 0..count {
        build_cost_matrix(state, &mut costs);
        let seam = trace_seam(state, &costs);
        state.delete_seam(&seam);
        debug!("seam {} of {}, working width now {}", n + 1, count, state.width);
        seams.push(seam);
    }
    seams
}

/// Build the enlarged index map: each row of the source, with every
/// column a seam passed through emitted twice.
fn duplicate_seams(
    seams: &[Seam],
    in_width: u32,
    out_width: u32,
    height: u32,
) -> TwoDimensionalMap<u32> {
    let mut indices = TwoDimensionalMap::new(out_width, height);
    for y in 0..height {
        // One row of the seam batch, sorted so it can be consumed left
        // to right.
        let mut claimed: Vec<u32> = seams.iter().map(|s| s.original[y as usize]).collect();
        claimed.sort();
        let mut claimed = claimed.into_iter().peekable();

        let mut out_x = 0;
        for x in 0..in_width {
            indices[(out_x, y)] = x;
            out_x += 1;
            while claimed.peek() == Some(&x) {
                indices[(out_x, y)] = x;
                out_x += 1;
                claimed.next();
            }
        }
        debug_assert_eq!(out_x, out_width);
    }
    indices
}
