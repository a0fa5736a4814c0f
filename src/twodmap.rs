// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::cq;
use itertools::iproduct;
use std::ops::{Index, IndexMut};

/// An addressable two-dimensional field, the same shape as an image:
/// plain `f64`s for the energy map, energy plus a back pointer for
/// the seam search.  Addressed `(x, y)`, like the image crate.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    pub width: u32,
    pub height: u32,
    data: Vec<P>,
}

/// The energy matrix, kept the same shape as the image it describes.
pub type EnergyMap = TwoDimensionalMap<f64>;

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map of default values.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            data: vec![P::default(); width as usize * height as usize],
        }
    }

    /// Adopt a row-major vector.  Returns `None` if the vector is the
    /// wrong size for the dimensions.
    pub fn from_vec(width: u32, height: u32, data: Vec<P>) -> Option<Self> {
        cq!(
            data.len() == width as usize * height as usize,
            Some(TwoDimensionalMap {
                width,
                height,
                data
            }),
            None
        )
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major view of every cell.
    pub fn as_slice(&self) -> &[P] {
        &self.data
    }

    /// Bounds-checked read.
    pub fn get(&self, x: u32, y: u32) -> Option<P> {
        cq!(
            x < self.width && y < self.height,
            Some(self[(x, y)]),
            None
        )
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.  This
    // particular variant is the same one used in image.rs.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// A copy one column narrower, with the cell at `(seam[y], y)`
    /// dropped from every row and the rest of the row closed up.
    /// `seam` must hold one in-range column per row.
    pub fn without_vertical_seam(&self, seam: &[u32]) -> Self {
        let data = iproduct!(0..self.height, 0..self.width)
            .filter(|&(y, x)| x != seam[y as usize])
            .map(|(y, x)| self[(x, y)])
            .collect();
        TwoDimensionalMap {
            width: self.width - 1,
            height: self.height,
            data,
        }
    }

    /// A copy one row shorter, with the cell at `(x, seam[x])` dropped
    /// from every column and the cells below it moved up.
    pub fn without_horizontal_seam(&self, seam: &[u32]) -> Self {
        let data = iproduct!(0..self.height - 1, 0..self.width)
            .map(|(y, x)| self[(x, cq!(y < seam[x as usize], y, y + 1))])
            .collect();
        TwoDimensionalMap {
            width: self.width,
            height: self.height - 1,
            data,
        }
    }

    /// A copy one column wider, with a default cell opened at
    /// `(seam[y], y)` in every row.  `seam[y]` may equal the width,
    /// which appends to the row.
    pub fn with_vertical_gap(&self, seam: &[u32]) -> Self {
        let data = iproduct!(0..self.height, 0..=self.width)
            .map(|(y, x)| {
                let s = seam[y as usize];
                if x < s {
                    self[(x, y)]
                } else if x == s {
                    P::default()
                } else {
                    self[(x - 1, y)]
                }
            })
            .collect();
        TwoDimensionalMap {
            width: self.width + 1,
            height: self.height,
            data,
        }
    }

    /// A copy one row taller, with a default cell opened at
    /// `(x, seam[x])` in every column.
    pub fn with_horizontal_gap(&self, seam: &[u32]) -> Self {
        let data = iproduct!(0..=self.height, 0..self.width)
            .map(|(y, x)| {
                let s = seam[x as usize];
                if y < s {
                    self[(x, y)]
                } else if y == s {
                    P::default()
                } else {
                    self[(x, y - 1)]
                }
            })
            .collect();
        TwoDimensionalMap {
            width: self.width,
            height: self.height + 1,
            data,
        }
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

/// One cell of the seam search: the cheapest path cost to reach this
/// cell, and the cross-axis coordinate of the cell it came from.
#[derive(Default, Debug, Copy, Clone)]
pub(crate) struct EnergyAndBackPointer<P: Default + Copy> {
    pub energy: P,
    pub parent: u32,
}
