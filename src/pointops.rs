// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Point operations
//!
//! Per-pixel transforms where every output pixel depends only on the
//! (immutable) source, plus the generation primitive they share.
//! Because the writes are disjoint, the primitive can split the output
//! into row bands and fill each band on its own thread; build with
//! the `threaded` feature to do so.

use crate::cq;
use crate::error::CarveError;
use crate::twodmap::TwoDimensionalMap;
use crate::weights::RgbWeights;
use image::{GenericImageView, ImageBuffer, Pixel, Primitive, Rgb, RgbImage};
use itertools::iproduct;
use num_traits::NumCast;

/// Build a `width * height` row-major vector by calling `f(x, y)` once
/// for every cell.
#[cfg(not(feature = "threaded"))]
pub fn generate<T, F>(width: u32, height: u32, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(u32, u32) -> T + Sync,
{
    iproduct!(0..height, 0..width)
        .map(|(y, x)| f(x, y))
        .collect()
}

/// Build a `width * height` row-major vector by calling `f(x, y)` once
/// for every cell, one band of rows per CPU.
#[cfg(feature = "threaded")]
pub fn generate<T, F>(width: u32, height: u32, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(u32, u32) -> T + Sync,
{
    let (w, h) = (width as usize, height as usize);
    if w == 0 || h == 0 {
        return Vec::new();
    }
    let cpus = num_cpus::get().max(1);
    let rows_per_band = (h + cpus - 1) / cpus;
    let f = &f;

    let bands = crossbeam::scope(|scope| {
        let handles: Vec<_> = (0..h)
            .step_by(rows_per_band)
            .map(|first_row| {
                let last_row = (first_row + rows_per_band).min(h);
                scope.spawn(move |_| {
                    iproduct!(first_row..last_row, 0..w)
                        .map(|(y, x)| f(x as u32, y as u32))
                        .collect::<Vec<T>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<Vec<_>>()
    });

    let mut out = Vec::with_capacity(w * h);
    match bands {
        Ok(bands) => {
            for band in bands {
                match band {
                    Ok(band) => out.extend(band),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
        }
        Err(panic) => std::panic::resume_unwind(panic),
    }
    out
}

#[inline]
fn channel<S: Primitive>(s: S) -> u32 {
    NumCast::from(s).unwrap_or(0)
}

/// The `[r, g, b]` channels of any pixel, widened to `u32`.
pub fn rgb_channels<P, S>(pixel: &P) -> [u32; 3]
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let rgb = pixel.to_rgb();
    let c = rgb.channels();
    [channel(c[0]), channel(c[1]), channel(c[2])]
}

/// The greyscale intensity field of an image: one weighted grey value
/// per pixel, in the image's own channel range.
pub fn intensity_field<I, P, S>(image: &I, weights: &RgbWeights) -> TwoDimensionalMap<u32>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    // Snapshot the channels: `I` need not be `Sync`.
    let rgb: Vec<[u32; 3]> = iproduct!(0..height, 0..width)
        .map(|(y, x)| rgb_channels(&image.get_pixel(x, y)))
        .collect();
    TwoDimensionalMap::from_fn(width, height, |x, y| {
        weights.grey(rgb[y as usize * width as usize + x as usize])
    })
}

fn image_from_cells(width: u32, height: u32, cells: &[[u8; 3]]) -> RgbImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        Rgb(cells[y as usize * width as usize + x as usize])
    })
}

#[inline]
fn saturate(value: u32) -> u8 {
    cq!(value > 255, 255, value as u8)
}

/// Convert to grey: every channel becomes the weighted mean of the
/// source channels.
pub fn greyscale(image: &RgbImage, weights: &RgbWeights) -> Result<RgbImage, CarveError> {
    weights.validate()?;
    let (width, height) = image.dimensions();
    let cells = generate(width, height, |x, y| {
        let c = image.get_pixel(x, y).channels();
        let grey = saturate(weights.grey([c[0] as u32, c[1] as u32, c[2] as u32]));
        [grey, grey, grey]
    });
    Ok(image_from_cells(width, height, &cells))
}

/// Tint: scale each channel by its weight relative to the heaviest
/// weight.
pub fn change_hue(image: &RgbImage, weights: &RgbWeights) -> Result<RgbImage, CarveError> {
    weights.validate()?;
    let (width, height) = image.dimensions();
    let max = weights.max_weight();
    let scale = |weight: u32, value: u8| -> u8 {
        saturate((weight * value as u32).checked_div(max).unwrap_or(0))
    };
    let cells = generate(width, height, |x, y| {
        let c = image.get_pixel(x, y).channels();
        [
            scale(weights.red, c[0]),
            scale(weights.green, c[1]),
            scale(weights.blue, c[2]),
        ]
    });
    Ok(image_from_cells(width, height, &cells))
}

/// Resize by picking, for every output pixel, the source pixel nearest
/// its scaled position.
pub fn nearest_neighbor(
    image: &RgbImage,
    out_width: u32,
    out_height: u32,
) -> Result<RgbImage, CarveError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 || out_width == 0 || out_height == 0 {
        return Err(CarveError::TooSmall {
            width: width.min(out_width),
            height: height.min(out_height),
        });
    }
    let x_ratio = width as f32 / out_width as f32;
    let y_ratio = height as f32 / out_height as f32;
    let cells = generate(out_width, out_height, |x, y| {
        let sx = ((x as f32 * x_ratio).round() as u32).min(width - 1);
        let sy = ((y as f32 * y_ratio).round() as u32).min(height - 1);
        let c = image.get_pixel(sx, sy).channels();
        [c[0], c[1], c[2]]
    });
    Ok(image_from_cells(out_width, out_height, &cells))
}
