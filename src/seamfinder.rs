// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest seam through an energy map
//!
//! A dynamic-programming shortest path: every cell of the search map
//! holds the cheapest cumulative energy of any 8-connected path that
//! reaches it from the starting edge, plus a back pointer to the cell
//! it came from.  The cheapest cell on the far edge is then walked
//! back to the start.  Ties go to the first candidate in scan order
//! (left, middle, right; or up, middle, down), which keeps the output
//! stable on flat energy fields.

use crate::cq;
use crate::twodmap::{EnergyAndBackPointer, EnergyMap, TwoDimensionalMap};

/// One cross-axis coordinate per along-axis position; consecutive
/// entries never differ by more than one.
pub type Seam = Vec<u32>;

/// This trait defines how we will return seams from an image.  It's a
/// primitive interface, just enough to make room for multiple seam
/// carvers as well as caching.
pub trait SeamFinder {
    /// The cheapest left-to-right seam: one row index per column.
    fn find_horizontal_seam(&self) -> Seam;

    /// The cheapest top-to-bottom seam: one column index per row.
    fn find_vertical_seam(&self) -> Seam;
}

impl SeamFinder for EnergyMap {
    fn find_horizontal_seam(&self) -> Seam {
        energy_to_horizontal_seam(self)
    }

    fn find_vertical_seam(&self) -> Seam {
        energy_to_vertical_seam(self)
    }
}

type SearchMap = TwoDimensionalMap<EnergyAndBackPointer<f64>>;

/// Given an energy map, return the list of x-coordinates that, when
/// mapped with the range (0..height), give the XY coordinates for each
/// pixel in the seam to be removed.
pub fn energy_to_vertical_seam(energy: &EnergyMap) -> Seam {
    let (width, height) = energy.dimensions();
    if width == 0 || height == 0 {
        return Seam::new();
    }
    let mut target = SearchMap::new(width, height);

    // Populate the first row with their native energies.
    for x in 0..width {
        target[(x, 0)].energy = energy[(x, 0)];
    }

    let maxwidth = width - 1;
    // For every subsequent row, populate the target cell with the sum
    // of the *lowest adjacent upper energy* and the *x coordinate of
    // that energy*.  `min_by` keeps the first of equal minima.
    for y in 1..height {
        for x in 0..width {
            let range = cq!(x == 0, 0, x - 1)..=cq!(x == maxwidth, maxwidth, x + 1);
            let parent_x = range
                .min_by(|a, b| target[(*a, y - 1)].energy.total_cmp(&target[(*b, y - 1)].energy))
                .unwrap_or(x);
            target[(x, y)] = EnergyAndBackPointer {
                energy: energy[(x, y)] + target[(parent_x, y - 1)].energy,
                parent: parent_x,
            };
        }
    }

    // Find the x coordinate of the bottommost seam with the least energy.
    let mut seam_col = (0..width)
        .min_by(|a, b| target[(*a, height - 1)].energy.total_cmp(&target[(*b, height - 1)].energy))
        .unwrap_or(0);
    // Working backwards, generate a vec of x coordinates that map to
    // the seam, reverse and return.
    (0..height)
        .rev()
        .fold(Seam::with_capacity(height as usize), |mut acc, y| {
            acc.push(seam_col);
            seam_col = target[(seam_col, y)].parent;
            acc
        })
        .into_iter()
        .rev()
        .collect()
}

/// Given an energy map, return the list of y-coordinates that, when
/// mapped with the range (0..width), give the XY coordinates for each
/// pixel in the seam to be removed.
pub fn energy_to_horizontal_seam(energy: &EnergyMap) -> Seam {
    let (width, height) = energy.dimensions();
    if width == 0 || height == 0 {
        return Seam::new();
    }
    let mut target = SearchMap::new(width, height);

    // Populate the first column with their native energies.
    for y in 0..height {
        target[(0, y)].energy = energy[(0, y)];
    }

    let maxheight = height - 1;
    // For every subsequent column, populate the target cell with the sum
    // of the *lowest adjacent leftward energy* and the *y coordinate of
    // that energy*
    for x in 1..width {
        for y in 0..height {
            let range = cq!(y == 0, 0, y - 1)..=cq!(y == maxheight, maxheight, y + 1);
            let parent_y = range
                .min_by(|a, b| target[(x - 1, *a)].energy.total_cmp(&target[(x - 1, *b)].energy))
                .unwrap_or(y);
            target[(x, y)] = EnergyAndBackPointer {
                energy: energy[(x, y)] + target[(x - 1, parent_y)].energy,
                parent: parent_y,
            };
        }
    }

    // Find the y coordinate of the rightmost seam with the least
    // energy.
    let mut seam_row = (0..height)
        .min_by(|a, b| target[(width - 1, *a)].energy.total_cmp(&target[(width - 1, *b)].energy))
        .unwrap_or(0);
    (0..width)
        .rev()
        .fold(Seam::with_capacity(width as usize), |mut acc, x| {
            acc.push(seam_row);
            seam_row = target[(x, seam_row)].parent;
            acc
        })
        .into_iter()
        .rev()
        .collect()
}
