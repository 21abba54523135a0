//! Atlas error types

use crate::rect::Rect;

/// Result type for atlas operations
pub type AtlasResult<T> = Result<T, AtlasError>;

/// Errors that can occur during atlas allocation and uploads
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    /// Requested region is zero-sized or larger than the atlas surface
    #[error("invalid region size {width}x{height} for a {atlas_width}x{atlas_height} atlas")]
    InvalidRegionSize {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Fixed atlas width
        atlas_width: u32,
        /// Fixed atlas height
        atlas_height: u32,
    },

    /// Atlas dimensions cannot hold the reserved white corner
    #[error("atlas size {width}x{height} is too small for the white-pixel reservation")]
    AtlasTooSmall {
        /// Requested atlas width
        width: u32,
        /// Requested atlas height
        height: u32,
    },

    /// Pixel buffer length does not match the target region
    #[error("pixel buffer holds {actual} bytes but the region needs {expected}")]
    UploadSizeMismatch {
        /// Required length: `width * height * 4`
        expected: usize,
        /// Length of the buffer actually provided
        actual: usize,
    },

    /// Upload region extends past the backing texture
    #[error("upload region {region:?} exceeds the {width}x{height} backing texture")]
    UploadOutOfBounds {
        /// Offending region
        region: Rect,
        /// Backing texture width
        width: u32,
        /// Backing texture height
        height: u32,
    },

    /// Shelf placement failed to converge
    ///
    /// Unreachable when request dimensions pass validation; exists so the
    /// bounded retry loop never degenerates into an infinite search.
    #[error("shelf placement did not converge after {iterations} iterations")]
    PlacementOverflow {
        /// Number of shelf advances attempted
        iterations: u32,
    },
}
