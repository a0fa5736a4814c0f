// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors
//!
//! Every failure here is a broken caller contract: a coordinate off
//! the edge of the image, a seam of the wrong shape, a shrink past a
//! single pixel.  None of them are transient, and nothing in the crate
//! retries.  Operations validate before touching anything, so a carver
//! that returns an error is exactly as it was before the call.

use crate::pixelbuffer::Axis;

/// The result type for everything fallible in this crate.
pub type Result<T> = std::result::Result<T, SeamError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SeamError {
    /// A pixel or energy lookup fell outside `[0, width) × [0, height)`.
    #[error("invalid pixel coordinates ({x}, {y}) for a {width}x{height} image")]
    InvalidCoordinates {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// A seam's length did not match the dimension it has to cross.
    #[error("invalid seam length: expected {expected}, found {found}")]
    InvalidSeamLength { expected: usize, found: usize },

    /// A seam entry was out of range, or jumped more than one pixel.
    #[error("invalid seam at position {index}: {reason}")]
    InvalidSeam { index: usize, reason: String },

    /// A shrink would take an axis below one pixel.
    #[error("cannot remove {requested} seam(s) along the {axis} axis of extent {extent}")]
    DegenerateDimension {
        axis: Axis,
        extent: u32,
        requested: u32,
    },

    /// The request cannot be honored without inventing seams.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Raw pixel data that does not describe a non-empty RGBA image.
    #[error("invalid {width}x{height} RGBA buffer: expected {expected} bytes, found {found}")]
    InvalidBuffer {
        width: u32,
        height: u32,
        expected: usize,
        found: usize,
    },
}

impl SeamError {
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedOperation(msg.into())
    }

    pub(crate) fn bad_seam(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidSeam {
            index,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = SeamError::InvalidCoordinates {
            x: 7,
            y: 1,
            width: 3,
            height: 3,
        };
        assert!(err.to_string().contains("(7, 1)"));

        let err = SeamError::DegenerateDimension {
            axis: Axis::Horizontal,
            extent: 1,
            requested: 1,
        };
        assert!(err.to_string().contains("horizontal axis"));

        assert!(SeamError::unsupported("no history")
            .to_string()
            .starts_with("unsupported operation:"));
    }
}
