// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::error::{Result, SeamError};
use crate::pixelbuffer::{Axis, PixelBuffer};

/// Something that can resize an image one axis at a time while
/// deciding for itself which pixels to give up or duplicate.  Seam
/// carving is one such strategy; the trait leaves room for others.
pub trait Retargeter {
    /// Make the image `n` pixels narrower.
    fn shrink_horizontal(&mut self, n: u32) -> Result<()>;

    /// Make the image `n` pixels shorter.
    fn shrink_vertical(&mut self, n: u32) -> Result<()>;

    /// Make the image `n` pixels wider.
    fn grow_horizontal(&mut self, n: u32) -> Result<()>;

    /// Make the image `n` pixels taller.
    fn grow_vertical(&mut self, n: u32) -> Result<()>;

    /// The current image.
    fn image_data(&self) -> &PixelBuffer;

    /// A greyscale picture of whatever the strategy considers
    /// important.
    fn energy_image(&self) -> PixelBuffer;

    /// Reach `width` × `height` by growing or shrinking each axis in
    /// turn.  Growth goes first.
    ///
    /// A zero target is refused before anything is touched, as is any
    /// call while the image is empty.  Beyond that the default can
    /// only check one step at a time: if the second growth is refused
    /// the first has already happened.  Strategies whose growth can be
    /// refused should override this and check both axes up front.
    fn retarget(&mut self, width: u32, height: u32) -> Result<()> {
        let (current_width, current_height) = self.image_data().dimensions();
        for &(axis, extent, target) in &[
            (Axis::Horizontal, current_width, width),
            (Axis::Vertical, current_height, height),
        ] {
            if target == 0 || extent == 0 {
                return Err(SeamError::DegenerateDimension {
                    axis,
                    extent,
                    requested: extent.saturating_sub(target).max(1),
                });
            }
        }
        if width > current_width {
            self.grow_horizontal(width - current_width)?;
        }
        if height > current_height {
            self.grow_vertical(height - current_height)?;
        }
        if width < current_width {
            self.shrink_horizontal(current_width - width)?;
        }
        if height < current_height {
            self.shrink_vertical(current_height - height)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Crops and pads with transparent black; refuses to grow taller.
    struct Cropper {
        image: PixelBuffer,
        calls: Vec<&'static str>,
    }

    impl Cropper {
        fn new(width: u32, height: u32) -> Self {
            Cropper {
                image: PixelBuffer::blank(width, height),
                calls: Vec::new(),
            }
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.image = PixelBuffer::blank(width, height);
        }
    }

    impl Retargeter for Cropper {
        fn shrink_horizontal(&mut self, n: u32) -> Result<()> {
            self.calls.push("shrink_horizontal");
            let (width, height) = self.image.dimensions();
            self.resize(width - n, height);
            Ok(())
        }

        fn shrink_vertical(&mut self, n: u32) -> Result<()> {
            self.calls.push("shrink_vertical");
            let (width, height) = self.image.dimensions();
            self.resize(width, height - n);
            Ok(())
        }

        fn grow_horizontal(&mut self, n: u32) -> Result<()> {
            self.calls.push("grow_horizontal");
            let (width, height) = self.image.dimensions();
            self.resize(width + n, height);
            Ok(())
        }

        fn grow_vertical(&mut self, _n: u32) -> Result<()> {
            self.calls.push("grow_vertical");
            Err(SeamError::unsupported("cropping cannot add rows"))
        }

        fn image_data(&self) -> &PixelBuffer {
            &self.image
        }

        fn energy_image(&self) -> PixelBuffer {
            self.image.clone()
        }
    }

    #[test]
    fn growth_runs_before_shrinking() {
        let mut cropper = Cropper::new(4, 4);
        cropper.retarget(6, 2).unwrap();
        assert_eq!(cropper.image_data().dimensions(), (6, 2));
        assert_eq!(cropper.calls, vec!["grow_horizontal", "shrink_vertical"]);
    }

    #[test]
    fn zero_targets_are_refused_up_front() {
        let mut cropper = Cropper::new(4, 4);
        assert_eq!(
            cropper.retarget(6, 0),
            Err(SeamError::DegenerateDimension {
                axis: Axis::Vertical,
                extent: 4,
                requested: 4,
            })
        );
        assert!(matches!(
            cropper.retarget(0, 2),
            Err(SeamError::DegenerateDimension {
                axis: Axis::Horizontal,
                ..
            })
        ));
        assert!(cropper.calls.is_empty());
        assert_eq!(cropper.image_data().dimensions(), (4, 4));
    }

    #[test]
    fn a_refused_second_growth_keeps_the_first() {
        let mut cropper = Cropper::new(4, 4);
        assert!(matches!(
            cropper.retarget(5, 5),
            Err(SeamError::UnsupportedOperation(_))
        ));
        assert_eq!(cropper.calls, vec!["grow_horizontal", "grow_vertical"]);
        assert_eq!(cropper.image_data().dimensions(), (5, 4));
    }
}
