// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - the retargeter
//!
//! `SeamCarver` owns one image and its energy map and keeps the two in
//! step.  Shrinking finds the cheapest seam and removes it, once per
//! pixel.  Growing needs seams chosen against an image that still had
//! them, so the carver records every seam it removes and grows by
//! putting the most recent ones back, newest first.  A grow with
//! nothing suitable on record is refused rather than guessed at.

use crate::energy::{calculate_energy, energy_image, refresh};
use crate::error::{Result, SeamError};
use crate::pixelbuffer::{wrap, Axis, PixelBuffer};
use crate::retargeter::Retargeter;
use crate::seameditor::{self, Edited};
use crate::seamfinder::{Seam, SeamFinder};
use crate::twodmap::EnergyMap;
use image::Rgba;

/// The default colour for seam previews: opaque red.
pub const SEAM_MARKER: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// A struct for holding the image to be carved.
#[derive(Debug, Clone)]
pub struct SeamCarver {
    image: PixelBuffer,
    energy: EnergyMap,
    // Every removal, tagged with the axis it shrank.
    history: Vec<(Axis, Seam)>,
    marker: Rgba<u8>,
}

impl SeamCarver {
    /// Creates a new SeamCarver from a private copy of `image`, and
    /// computes its energy map.
    pub fn new(image: &PixelBuffer) -> Self {
        let image = image.clone();
        let energy = calculate_energy(&image);
        SeamCarver {
            image,
            energy,
            history: Vec::new(),
            marker: SEAM_MARKER,
        }
    }

    /// Use `marker` instead of red when drawing seams.
    pub fn with_marker(mut self, marker: Rgba<u8>) -> Self {
        self.marker = marker;
        self
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

    pub fn energy_map(&self) -> &EnergyMap {
        &self.energy
    }

    /// The stored energy of the pixel at column `x`, row `y`.
    pub fn energy_at(&self, x: u32, y: u32) -> Result<f64> {
        self.image.check(x, y)?;
        Ok(self.energy[(x, y)])
    }

    pub fn into_image(self) -> PixelBuffer {
        self.image
    }

    /// How many removals are on record for growing back.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn clear_history(&mut self) {
        self.history.clear()
    }

    fn commit(&mut self, (image, energy): Edited) {
        self.image = image;
        self.energy = energy;
    }

    /// Remove the given top-to-bottom seam, and record it.
    pub fn remove_vertical_seam(&mut self, seam: &[u32]) -> Result<()> {
        let edited = seameditor::remove_vertical_seam(&self.image, &self.energy, seam)?;
        self.commit(edited);
        self.history.push((Axis::Horizontal, seam.to_vec()));
        Ok(())
    }

    /// Remove the given left-to-right seam, and record it.
    pub fn remove_horizontal_seam(&mut self, seam: &[u32]) -> Result<()> {
        let edited = seameditor::remove_horizontal_seam(&self.image, &self.energy, seam)?;
        self.commit(edited);
        self.history.push((Axis::Vertical, seam.to_vec()));
        Ok(())
    }

    /// Insert an arbitrary top-to-bottom seam.  The recorded removals
    /// no longer describe this image afterwards, so they are dropped.
    pub fn insert_vertical_seam(&mut self, seam: &[u32]) -> Result<()> {
        let edited = seameditor::insert_vertical_seam(&self.image, &self.energy, seam)?;
        self.commit(edited);
        self.history.clear();
        Ok(())
    }

    /// Insert an arbitrary left-to-right seam, dropping the record.
    pub fn insert_horizontal_seam(&mut self, seam: &[u32]) -> Result<()> {
        let edited = seameditor::insert_horizontal_seam(&self.image, &self.energy, seam)?;
        self.commit(edited);
        self.history.clear();
        Ok(())
    }

    /// Paint the current cheapest vertical seam onto the image in the
    /// marker colour, and return it.  This overwrites the image's own
    /// pixels: the preview is not undoable, and the energy around the
    /// painted pixels is recomputed to match.  Draw from a clone of
    /// the carver to preview without damage.
    pub fn draw_vertical_seam(&mut self) -> Seam {
        let seam = self.find_vertical_seam();
        self.paint(seam.iter().enumerate().map(|(y, &x)| (x, y as u32)));
        seam
    }

    /// As `draw_vertical_seam`, for the cheapest horizontal seam.
    pub fn draw_horizontal_seam(&mut self) -> Seam {
        let seam = self.find_horizontal_seam();
        self.paint(seam.iter().enumerate().map(|(x, &y)| (x as u32, y)));
        seam
    }

    fn paint(&mut self, points: impl Iterator<Item = (u32, u32)>) {
        let points: Vec<(u32, u32)> = points.collect();
        for &(x, y) in points.iter() {
            self.image.set(x, y, self.marker);
        }
        let (width, height) = self.dimensions();
        for &(x, y) in points.iter() {
            for &(dx, dy) in [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)].iter() {
                let (nx, ny) = (
                    wrap(i64::from(x) + dx, width),
                    wrap(i64::from(y) + dy, height),
                );
                refresh(&mut self.energy, &self.image, nx, ny);
            }
        }
    }

    fn extent(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.width(),
            Axis::Vertical => self.height(),
        }
    }

    fn check_shrink(&self, axis: Axis, n: u32) -> Result<()> {
        let extent = self.extent(axis);
        if n >= extent && n > 0 {
            return Err(SeamError::DegenerateDimension {
                axis,
                extent,
                requested: n,
            });
        }
        Ok(())
    }

    fn check_replay(&self, axis: Axis, n: u32) -> Result<()> {
        let recorded = self
            .history
            .iter()
            .rev()
            .take_while(|(shrunk, _)| *shrunk == axis)
            .count();
        if recorded < n as usize {
            return Err(SeamError::unsupported(format!(
                "growing the {} axis by {} needs that many recorded removals \
                 on top of the history; {} available",
                axis,
                n,
                recorded
            )));
        }
        Ok(())
    }

    fn carve_once(&mut self, axis: Axis) -> Result<()> {
        match axis {
            Axis::Horizontal => {
                let seam = self.find_vertical_seam();
                self.remove_vertical_seam(&seam)?;
            }
            Axis::Vertical => {
                let seam = self.find_horizontal_seam();
                self.remove_horizontal_seam(&seam)?;
            }
        }
        tracing::debug!(%axis, width = self.width(), height = self.height(), "carved seam");
        Ok(())
    }

    fn replay_once(&mut self) -> Result<()> {
        let (axis, seam) = self
            .history
            .pop()
            .ok_or_else(|| SeamError::unsupported("no recorded seams to put back"))?;
        let edited = match axis {
            Axis::Horizontal => seameditor::insert_vertical_seam(&self.image, &self.energy, &seam)?,
            Axis::Vertical => seameditor::insert_horizontal_seam(&self.image, &self.energy, &seam)?,
        };
        self.commit(edited);
        tracing::debug!(%axis, width = self.width(), height = self.height(), "restored seam");
        Ok(())
    }

    /// Given a desired new width and height, repeatedly carve (or put
    /// back) seams until the image is that size.  Growth can only come
    /// from the removal record; the whole request is checked before
    /// anything changes.  While both axes need shrinking, width and
    /// height are carved alternately.
    #[tracing::instrument(skip(self))]
    pub fn carve_to(&mut self, width: u32, height: u32) -> Result<()> {
        let (current_width, current_height) = self.dimensions();
        if width == 0 {
            return Err(SeamError::DegenerateDimension {
                axis: Axis::Horizontal,
                extent: current_width,
                requested: current_width,
            });
        }
        if height == 0 {
            return Err(SeamError::DegenerateDimension {
                axis: Axis::Vertical,
                extent: current_height,
                requested: current_height,
            });
        }

        let (mut grow_width, mut grow_height) = (
            width.saturating_sub(current_width),
            height.saturating_sub(current_height),
        );
        let mut replays = 0;
        for (axis, _) in self.history.iter().rev() {
            match axis {
                _ if grow_width == 0 && grow_height == 0 => break,
                Axis::Horizontal if grow_width > 0 => grow_width -= 1,
                Axis::Vertical if grow_height > 0 => grow_height -= 1,
                _ => break,
            }
            replays += 1;
        }
        if grow_width > 0 || grow_height > 0 {
            return Err(SeamError::unsupported(format!(
                "cannot grow {}x{} to {}x{} from the removals on record",
                current_width, current_height, width, height
            )));
        }

        for _ in 0..replays {
            self.replay_once()?;
        }

        let mut direction = Axis::Horizontal;
        while self.width() > width && self.height() > height {
            self.carve_once(direction)?;
            direction = direction.turn();
        }
        while self.width() > width {
            self.carve_once(Axis::Horizontal)?;
        }
        while self.height() > height {
            self.carve_once(Axis::Vertical)?;
        }
        Ok(())
    }
}

impl SeamFinder for SeamCarver {
    fn find_horizontal_seam(&self) -> Seam {
        self.energy.find_horizontal_seam()
    }

    fn find_vertical_seam(&self) -> Seam {
        self.energy.find_vertical_seam()
    }
}

impl Retargeter for SeamCarver {
    #[tracing::instrument(skip(self))]
    fn shrink_horizontal(&mut self, n: u32) -> Result<()> {
        self.check_shrink(Axis::Horizontal, n)?;
        for _ in 0..n {
            self.carve_once(Axis::Horizontal)?;
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn shrink_vertical(&mut self, n: u32) -> Result<()> {
        self.check_shrink(Axis::Vertical, n)?;
        for _ in 0..n {
            self.carve_once(Axis::Vertical)?;
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn grow_horizontal(&mut self, n: u32) -> Result<()> {
        self.check_replay(Axis::Horizontal, n)?;
        for _ in 0..n {
            self.replay_once()?;
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn grow_vertical(&mut self, n: u32) -> Result<()> {
        self.check_replay(Axis::Vertical, n)?;
        for _ in 0..n {
            self.replay_once()?;
        }
        Ok(())
    }

    fn image_data(&self) -> &PixelBuffer {
        &self.image
    }

    fn energy_image(&self) -> PixelBuffer {
        energy_image(&self.energy)
    }

    fn retarget(&mut self, width: u32, height: u32) -> Result<()> {
        self.carve_to(width, height)
    }
}
