// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image resizing by seam carving.
//!
//! Hand a `SeamCarver` an RGBA `PixelBuffer`, then shrink or grow it
//! one axis at a time.  Each step removes (or puts back) the
//! 8-connected path of pixels with the least dual-gradient energy,
//! and patches the energy map locally instead of recomputing it.
//!
//! ```
//! use seamshift::{PixelBuffer, Retargeter, SeamCarver};
//!
//! let image = PixelBuffer::from_raw(3, 3, vec![128; 36]).unwrap();
//! let mut carver = SeamCarver::new(&image);
//! carver.shrink_horizontal(1).unwrap();
//! assert_eq!(carver.image_data().dimensions(), (2, 3));
//! ```

mod ternary;

pub mod energy;
pub mod error;
pub mod pixelbuffer;
pub mod retargeter;
pub mod seamcarver;
pub mod seameditor;
pub mod seamfinder;
pub mod twodmap;

pub use energy::{calculate_energy, energy_at, energy_image};
pub use error::{Result, SeamError};
pub use pixelbuffer::{Axis, PixelBuffer};
pub use retargeter::Retargeter;
pub use seamcarver::{SeamCarver, SEAM_MARKER};
pub use seamfinder::{energy_to_horizontal_seam, energy_to_vertical_seam, Seam, SeamFinder};
pub use twodmap::{EnergyMap, TwoDimensionalMap};
