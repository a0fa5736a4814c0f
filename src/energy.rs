// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The energy of a pixel is the dual-gradient of its four cardinal
//! neighbors: the colour distance between the pixels left and right
//! of it, plus the colour distance between the pixels above and below
//! it, square-rooted.  Borders wrap toroidally, so the left neighbor
//! of the first column is the last column and so on; there are no
//! special edge cases, and a 1×1 image has zero energy.

use crate::error::Result;
use crate::pixelbuffer::PixelBuffer;
use crate::twodmap::EnergyMap;
use image::Rgba;
use itertools::iproduct;
use num_traits::{cast, pow};
use std::iter::zip;

// Takes the colour channels (R,G,B) from two pixels and maps the
// difference between each channel, squares it, and then sums them
// all up.  This is the rusty expression of:
//
//        |Δx|² = (Δrx)²+(Δgx)²+(Δbx)²
//
// Alpha never enters the gradient.
#[inline]
fn energy_of_pair(p1: &Rgba<u8>, p2: &Rgba<u8>) -> u32 {
    zip(&p1.0[..3], &p2.0[..3])
        .map(|(c1, c2)| pow(i32::from(*c1) - i32::from(*c2), 2) as u32)
        .sum()
}

// Unchecked: the caller guarantees (x, y) is inside the image.
#[inline]
pub(crate) fn pixel_energy(image: &PixelBuffer, x: u32, y: u32) -> f64 {
    let (left, right, up, down) = (
        image.neighbor(x, y, -1, 0),
        image.neighbor(x, y, 1, 0),
        image.neighbor(x, y, 0, -1),
        image.neighbor(x, y, 0, 1),
    );
    f64::from(energy_of_pair(&left, &right) + energy_of_pair(&up, &down)).sqrt()
}

/// The dual-gradient energy of the pixel at column `x`, row `y`.
pub fn energy_at(image: &PixelBuffer, x: u32, y: u32) -> Result<f64> {
    image.check(x, y)?;
    Ok(pixel_energy(image, x, y))
}

/// Compute the energy of every pixel in an image.  This is the only
/// full pass; after it, the editors patch the map in place.
pub fn calculate_energy(image: &PixelBuffer) -> EnergyMap {
    let (width, height) = image.dimensions();
    let mut emap = EnergyMap::new(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        emap[(x, y)] = pixel_energy(image, x, y);
    }
    emap
}

/// Recompute a single cell of the map against the image.
#[inline]
pub(crate) fn refresh(energy: &mut EnergyMap, image: &PixelBuffer, x: u32, y: u32) {
    energy[(x, y)] = pixel_energy(image, x, y);
}

/// Render an energy map as an opaque greyscale image, one grey level
/// per unit of energy, clamped at white.
pub fn energy_image(energy: &EnergyMap) -> PixelBuffer {
    let (width, height) = energy.dimensions();
    let mut out = PixelBuffer::blank(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        let level: u8 = cast(energy[(x, y)].round().clamp(0.0, 255.0)).unwrap_or(u8::MAX);
        out.set(x, y, Rgba([level, level, level, 255]));
    }
    out
}
