// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Owned RGBA raster
//!
//! The carver owns exactly one of these at a time and replaces it
//! wholesale on every resize.  Under the hood it is an
//! `image::RgbaImage`, so anything the image crate can decode can be
//! handed straight in, and the result can be handed straight back out
//! to an encoder.

use crate::error::{Result, SeamError};
use image::{Rgba, RgbaImage};
use std::convert::TryFrom;
use std::fmt;

/// The two directions an image can be resized in.  `Horizontal` is
/// the x axis (width), `Vertical` the y axis (height).  Shrinking
/// horizontally removes a vertical seam, and vice versa.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The other one.
    pub fn turn(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        })
    }
}

/// Toroidal wrap: fold any signed coordinate back into `[0, extent)`,
/// so that one past the last column is the first column and one
/// before the first row is the last row.  Every border rule in the
/// crate goes through here.  `extent` must be non-zero.
#[inline]
pub fn wrap(coord: i64, extent: u32) -> u32 {
    coord.rem_euclid(i64::from(extent)) as u32
}

/// A non-empty RGBA image, stored row-major, four bytes per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes.  The buffer must hold exactly
    /// `width * height * 4` bytes, and neither dimension may be zero.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        let found = pixels.len();
        let invalid = SeamError::InvalidBuffer {
            width,
            height,
            expected,
            found,
        };
        if width == 0 || height == 0 || found != expected {
            return Err(invalid);
        }
        RgbaImage::from_raw(width, height, pixels)
            .map(|image| PixelBuffer { image })
            .ok_or(invalid)
    }

    /// A buffer of transparent black, used as the target of every copy.
    pub(crate) fn blank(width: u32, height: u32) -> Self {
        PixelBuffer {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// The pixel bytes, row-major RGBA.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.image.into_raw()
    }

    /// Fail unless `(x, y)` names a pixel of this image.
    pub fn check(&self, x: u32, y: u32) -> Result<()> {
        let (width, height) = self.dimensions();
        if x < width && y < height {
            Ok(())
        } else {
            Err(SeamError::InvalidCoordinates {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Bounds-checked read of a single pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Result<Rgba<u8>> {
        self.check(x, y)?;
        Ok(self.get(x, y))
    }

    /// Bounds-checked write of a single pixel.
    pub fn put_pixel(&mut self, x: u32, y: u32, pixel: Rgba<u8>) -> Result<()> {
        self.check(x, y)?;
        self.set(x, y, pixel);
        Ok(())
    }

    // Unchecked accessors for the inner loops.  Callers have already
    // validated their coordinates.
    #[inline]
    pub(crate) fn get(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    #[inline]
    pub(crate) fn set(&mut self, x: u32, y: u32, pixel: Rgba<u8>) {
        self.image.put_pixel(x, y, pixel)
    }

    /// The pixel `(dx, dy)` away from `(x, y)`, wrapping toroidally at
    /// every edge.
    #[inline]
    pub(crate) fn neighbor(&self, x: u32, y: u32, dx: i64, dy: i64) -> Rgba<u8> {
        let (width, height) = self.dimensions();
        self.get(
            wrap(i64::from(x) + dx, width),
            wrap(i64::from(y) + dy, height),
        )
    }
}

impl TryFrom<RgbaImage> for PixelBuffer {
    type Error = SeamError;

    fn try_from(image: RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(SeamError::InvalidBuffer {
                width,
                height,
                expected: 0,
                found: 0,
            });
        }
        Ok(PixelBuffer { image })
    }
}
