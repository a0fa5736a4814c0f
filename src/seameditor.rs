// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Remove and insert seams
//!
//! Each editor takes the current image, its energy map and a seam, and
//! returns a new image one pixel narrower (or wider, or shorter, or
//! taller) together with an energy map that is already correct for
//! it.  The energy map is never recalculated in full: cells are moved
//! to their new coordinates, and only the cells whose neighbors
//! actually changed are recomputed.
//!
//! For a vertical seam those are:
//!
//! - the two cells on either side of the seam in every row, whose
//!   left/right neighbors are now different pixels (this also covers
//!   the up/down neighbors that shift where the seam steps sideways);
//! - the whole first and last row, which are each other's wrap-around
//!   neighbors, and whose seam positions can be arbitrarily far apart;
//! - the whole first and last column, whose wrap-around partner moves
//!   when the width changes.
//!
//! Horizontal seams are the same table with rows and columns swapped.
//! That comes to O(width + height) recomputed cells per edit.

use crate::energy::refresh;
use crate::error::{Result, SeamError};
use crate::pixelbuffer::{wrap, Axis, PixelBuffer};
use crate::twodmap::EnergyMap;
use image::Rgba;
use std::convert::TryFrom;

/// A freshly edited image and the energy map that goes with it.
pub type Edited = (PixelBuffer, EnergyMap);

/// Check that a seam has `len` entries, each below `bound`, and that no
/// two consecutive entries are more than one pixel apart.
pub fn validate_seam(seam: &[u32], len: usize, bound: u32) -> Result<()> {
    if seam.len() != len {
        return Err(SeamError::InvalidSeamLength {
            expected: len,
            found: seam.len(),
        });
    }
    if let Some(index) = seam.iter().position(|&s| s >= bound) {
        return Err(SeamError::bad_seam(
            index,
            format!("{} is outside [0, {})", seam[index], bound),
        ));
    }
    if let Some(index) = seam.windows(2).position(|w| w[0].max(w[1]) - w[0].min(w[1]) > 1) {
        return Err(SeamError::bad_seam(
            index + 1,
            format!("step from {} to {}", seam[index], seam[index + 1]),
        ));
    }
    Ok(())
}

// The midpoint of two pixels, channel by channel, alpha included.
// Halves round up.
fn blend(a: Rgba<u8>, b: Rgba<u8>) -> Rgba<u8> {
    let mut out = [0u8; 4];
    for (o, (ca, cb)) in out.iter_mut().zip(a.0.iter().zip(b.0.iter())) {
        *o = u8::try_from((u16::from(*ca) + u16::from(*cb) + 1) / 2).unwrap_or(u8::MAX);
    }
    Rgba(out)
}

fn refresh_rows(energy: &mut EnergyMap, image: &PixelBuffer, rows: [u32; 2]) {
    for y in rows.iter() {
        for x in 0..image.width() {
            refresh(energy, image, x, *y);
        }
    }
}

fn refresh_columns(energy: &mut EnergyMap, image: &PixelBuffer, columns: [u32; 2]) {
    for x in columns.iter() {
        for y in 0..image.height() {
            refresh(energy, image, *x, y);
        }
    }
}

/// Remove a top-to-bottom seam: one column index per row.
pub fn remove_vertical_seam(
    image: &PixelBuffer,
    energy: &EnergyMap,
    seam: &[u32],
) -> Result<Edited> {
    let (width, height) = image.dimensions();
    validate_seam(seam, height as usize, width)?;
    if width == 1 {
        return Err(SeamError::DegenerateDimension {
            axis: Axis::Horizontal,
            extent: width,
            requested: 1,
        });
    }

    let newwidth = width - 1;
    let mut carved = PixelBuffer::blank(newwidth, height);
    for y in 0..height {
        let s = seam[y as usize];
        for x in 0..newwidth {
            carved.set(x, y, image.get(if x < s { x } else { x + 1 }, y));
        }
    }

    let mut energies = energy.without_vertical_seam(seam);
    refresh_rows(&mut energies, &carved, [0, height - 1]);
    refresh_columns(&mut energies, &carved, [0, newwidth - 1]);
    for y in 0..height {
        let s = i64::from(seam[y as usize]);
        refresh(&mut energies, &carved, wrap(s - 1, newwidth), y);
        refresh(&mut energies, &carved, wrap(s, newwidth), y);
    }

    tracing::trace!(?seam, "removed vertical seam");
    Ok((carved, energies))
}

/// Remove a left-to-right seam: one row index per column.
pub fn remove_horizontal_seam(
    image: &PixelBuffer,
    energy: &EnergyMap,
    seam: &[u32],
) -> Result<Edited> {
    let (width, height) = image.dimensions();
    validate_seam(seam, width as usize, height)?;
    if height == 1 {
        return Err(SeamError::DegenerateDimension {
            axis: Axis::Vertical,
            extent: height,
            requested: 1,
        });
    }

    let newheight = height - 1;
    let mut carved = PixelBuffer::blank(width, newheight);
    for x in 0..width {
        let s = seam[x as usize];
        for y in 0..newheight {
            carved.set(x, y, image.get(x, if y < s { y } else { y + 1 }));
        }
    }

    let mut energies = energy.without_horizontal_seam(seam);
    refresh_columns(&mut energies, &carved, [0, width - 1]);
    refresh_rows(&mut energies, &carved, [0, newheight - 1]);
    for x in 0..width {
        let s = i64::from(seam[x as usize]);
        refresh(&mut energies, &carved, x, wrap(s - 1, newheight));
        refresh(&mut energies, &carved, x, wrap(s, newheight));
    }

    tracing::trace!(?seam, "removed horizontal seam");
    Ok((carved, energies))
}

/// Insert a top-to-bottom seam.  `seam[y]` is the column the new pixel
/// takes in row `y`; everything from there rightward moves over by
/// one.  A column equal to the current width appends to the row.  The
/// new pixel is the average of the pixels that end up either side of
/// it, wrapping at the edges.
pub fn insert_vertical_seam(
    image: &PixelBuffer,
    energy: &EnergyMap,
    seam: &[u32],
) -> Result<Edited> {
    let (width, height) = image.dimensions();
    validate_seam(seam, height as usize, width + 1)?;

    let newwidth = width + 1;
    let mut grown = PixelBuffer::blank(newwidth, height);
    for y in 0..height {
        let s = seam[y as usize];
        for x in 0..newwidth {
            let pixel = if x < s {
                image.get(x, y)
            } else if x > s {
                image.get(x - 1, y)
            } else {
                let s = i64::from(s);
                blend(image.get(wrap(s - 1, width), y), image.get(wrap(s, width), y))
            };
            grown.set(x, y, pixel);
        }
    }

    let mut energies = energy.with_vertical_gap(seam);
    refresh_rows(&mut energies, &grown, [0, height - 1]);
    refresh_columns(&mut energies, &grown, [0, newwidth - 1]);
    for y in 0..height {
        let s = i64::from(seam[y as usize]);
        for dx in -1..=1 {
            refresh(&mut energies, &grown, wrap(s + dx, newwidth), y);
        }
    }

    tracing::trace!(?seam, "inserted vertical seam");
    Ok((grown, energies))
}

/// Insert a left-to-right seam.  `seam[x]` is the row the new pixel
/// takes in column `x`; everything from there downward moves down by
/// one.
pub fn insert_horizontal_seam(
    image: &PixelBuffer,
    energy: &EnergyMap,
    seam: &[u32],
) -> Result<Edited> {
    let (width, height) = image.dimensions();
    validate_seam(seam, width as usize, height + 1)?;

    let newheight = height + 1;
    let mut grown = PixelBuffer::blank(width, newheight);
    for x in 0..width {
        let s = seam[x as usize];
        for y in 0..newheight {
            let pixel = if y < s {
                image.get(x, y)
            } else if y > s {
                image.get(x, y - 1)
            } else {
                let s = i64::from(s);
                blend(image.get(x, wrap(s - 1, height)), image.get(x, wrap(s, height)))
            };
            grown.set(x, y, pixel);
        }
    }

    let mut energies = energy.with_horizontal_gap(seam);
    refresh_columns(&mut energies, &grown, [0, width - 1]);
    refresh_rows(&mut energies, &grown, [0, newheight - 1]);
    for x in 0..width {
        let s = i64::from(seam[x as usize]);
        for dy in -1..=1 {
            refresh(&mut energies, &grown, x, wrap(s + dy, newheight));
        }
    }

    tracing::trace!(?seam, "inserted horizontal seam");
    Ok((grown, energies))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::calculate_energy;
    use crate::seamfinder::SeamFinder;

    // A small linear congruential generator, so the "noisy" test
    // images are the same on every run.
    fn noise(width: u32, height: u32, mut state: u32) -> PixelBuffer {
        let data = (0..width * height * 4)
            .map(|_| {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                (state >> 16) as u8
            })
            .collect();
        PixelBuffer::from_raw(width, height, data).unwrap()
    }

    fn row(image: &PixelBuffer, y: u32) -> Vec<Rgba<u8>> {
        (0..image.width()).map(|x| image.get(x, y)).collect()
    }

    fn column(image: &PixelBuffer, x: u32) -> Vec<Rgba<u8>> {
        (0..image.height()).map(|y| image.get(x, y)).collect()
    }

    #[test]
    fn seams_are_validated() {
        assert_eq!(
            validate_seam(&[0, 1], 3, 4),
            Err(SeamError::InvalidSeamLength {
                expected: 3,
                found: 2
            })
        );
        assert!(matches!(
            validate_seam(&[0, 1, 4], 3, 4),
            Err(SeamError::InvalidSeam { index: 2, .. })
        ));
        assert!(matches!(
            validate_seam(&[0, 2, 2], 3, 4),
            Err(SeamError::InvalidSeam { index: 1, .. })
        ));
        assert_eq!(validate_seam(&[3, 2, 3], 3, 4), Ok(()));
    }

    #[test]
    fn removing_a_vertical_seam_deletes_one_pixel_per_row() {
        let image = noise(7, 5, 1);
        let energy = calculate_energy(&image);
        let seam = vec![3, 2, 2, 1, 0];
        let (carved, _) = remove_vertical_seam(&image, &energy, &seam).unwrap();
        assert_eq!(carved.dimensions(), (6, 5));
        for y in 0..5 {
            let mut expected = row(&image, y);
            expected.remove(seam[y as usize] as usize);
            assert_eq!(row(&carved, y), expected);
        }
    }

    #[test]
    fn removing_a_horizontal_seam_deletes_one_pixel_per_column() {
        let image = noise(5, 6, 2);
        let energy = calculate_energy(&image);
        let seam = vec![5, 4, 4, 5, 5];
        let (carved, _) = remove_horizontal_seam(&image, &energy, &seam).unwrap();
        assert_eq!(carved.dimensions(), (5, 5));
        for x in 0..5 {
            let mut expected = column(&image, x);
            expected.remove(seam[x as usize] as usize);
            assert_eq!(column(&carved, x), expected);
        }
    }

    #[test]
    fn patched_energy_matches_a_full_recalculation() {
        let mut image = noise(9, 8, 3);
        let mut energy = calculate_energy(&image);
        for _ in 0..4 {
            let seam = energy.find_vertical_seam();
            let (i, e) = remove_vertical_seam(&image, &energy, &seam).unwrap();
            assert_eq!(e, calculate_energy(&i));
            let seam = e.find_horizontal_seam();
            let (i, e) = remove_horizontal_seam(&i, &e, &seam).unwrap();
            assert_eq!(e, calculate_energy(&i));
            image = i;
            energy = e;
        }
        assert_eq!(image.dimensions(), (5, 4));
    }

    #[test]
    fn edge_seams_keep_the_wrap_consistent() {
        let image = noise(6, 6, 4);
        let energy = calculate_energy(&image);

        let seams = [
            vec![0; 6],
            vec![5; 6],
            vec![0, 1, 2, 3, 4, 5],
            vec![5, 4, 3, 2, 1, 0],
        ];
        for seam in seams.iter() {
            let (i, e) = remove_vertical_seam(&image, &energy, seam).unwrap();
            assert_eq!(e, calculate_energy(&i));
            let (i, e) = remove_horizontal_seam(&image, &energy, seam).unwrap();
            assert_eq!(e, calculate_energy(&i));
            let (i, e) = insert_vertical_seam(&image, &energy, seam).unwrap();
            assert_eq!(e, calculate_energy(&i));
            let (i, e) = insert_horizontal_seam(&image, &energy, seam).unwrap();
            assert_eq!(e, calculate_energy(&i));
        }

        // Appending past the last column or row.
        let (i, e) = insert_vertical_seam(&image, &energy, &[6, 6, 5, 5, 6, 6]).unwrap();
        assert_eq!(e, calculate_energy(&i));
        let (i, e) = insert_horizontal_seam(&image, &energy, &[6; 6]).unwrap();
        assert_eq!(e, calculate_energy(&i));
    }

    #[test]
    fn inserted_pixels_average_their_neighbors() {
        #[rustfmt::skip]
        let data = vec![
            0, 0, 0, 0,       100, 50, 10, 255,   201, 3, 20, 255,
            10, 10, 10, 10,   20, 20, 20, 20,     30, 30, 30, 30,
        ];
        let image = PixelBuffer::from_raw(3, 2, data).unwrap();
        let energy = calculate_energy(&image);
        let (grown, e) = insert_vertical_seam(&image, &energy, &[1, 0]).unwrap();
        assert_eq!(grown.dimensions(), (4, 2));
        assert_eq!(e, calculate_energy(&grown));

        // Row 0: between (0, 0, 0, 0) and (100, 50, 10, 255); halves round up.
        assert_eq!(grown.get(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(grown.get(1, 0), Rgba([50, 25, 5, 128]));
        assert_eq!(grown.get(2, 0), Rgba([100, 50, 10, 255]));
        assert_eq!(grown.get(3, 0), Rgba([201, 3, 20, 255]));
        // Row 1: at the front, so between the last and first pixels.
        assert_eq!(grown.get(0, 1), Rgba([20, 20, 20, 20]));
        assert_eq!(grown.get(1, 1), Rgba([10, 10, 10, 10]));
        assert_eq!(grown.get(3, 1), Rgba([30, 30, 30, 30]));
    }

    #[test]
    fn insertion_then_removal_restores_the_image() {
        let image = noise(6, 5, 5);
        let energy = calculate_energy(&image);
        let seam = vec![1, 2, 3, 3, 2];
        let (grown, e) = insert_vertical_seam(&image, &energy, &seam).unwrap();
        let (back, e) = remove_vertical_seam(&grown, &e, &seam).unwrap();
        assert_eq!(back, image);
        assert_eq!(e, energy);
    }

    #[test]
    fn single_pixel_axes_cannot_shrink() {
        let image = noise(1, 3, 6);
        let energy = calculate_energy(&image);
        assert!(matches!(
            remove_vertical_seam(&image, &energy, &[0, 0, 0]),
            Err(SeamError::DegenerateDimension {
                axis: Axis::Horizontal,
                ..
            })
        ));
        let (carved, e) = remove_horizontal_seam(&image, &energy, &[1]).unwrap();
        assert_eq!(carved.dimensions(), (1, 2));
        assert_eq!(e, calculate_energy(&carved));
    }

    #[test]
    fn wrong_length_seams_are_rejected() {
        let image = noise(4, 4, 7);
        let energy = calculate_energy(&image);
        assert!(matches!(
            remove_vertical_seam(&image, &energy, &[0, 0, 0]),
            Err(SeamError::InvalidSeamLength { .. })
        ));
        assert!(matches!(
            insert_horizontal_seam(&image, &energy, &[0; 5]),
            Err(SeamError::InvalidSeamLength { .. })
        ));
    }
}
