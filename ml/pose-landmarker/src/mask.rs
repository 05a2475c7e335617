//! Per-pose segmentation masks.

use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{PoseLandmarkerError, Result};

/// A per-pose segmentation mask.
///
/// Each pixel holds the confidence in `[0, 1]` that it belongs to the pose's
/// silhouette.
///
/// # Storage Format
///
/// Values are stored row-major in a reference-counted `Arc<[f32]>`. For a
/// pixel at `(x, y)` the index is `y * width + x`. Cloning a mask shares the
/// buffer instead of copying it, so masks can be handed from producer to
/// result to consumer without per-frame pixel copies.
///
/// # Example
///
/// ```
/// use pose_landmarker::SegmentationMask;
///
/// let mask = SegmentationMask::from_data(2, 2, vec![0.0, 0.9, 0.8, 0.1]).unwrap();
/// assert_eq!(mask.get(1, 0), Some(0.9));
/// assert_eq!(mask.coverage(0.5), 0.5);
///
/// let shared = mask.clone();
/// assert!(shared.shares_buffer_with(&mask));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MaskRepr"))]
pub struct SegmentationMask {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// Confidence values, row-major order.
    data: Arc<[f32]>,
}

impl SegmentationMask {
    /// Creates a mask from an owned buffer.
    ///
    /// The values are copied once into a new shared buffer. Producers that
    /// already hold an `Arc<[f32]>` can use [`from_shared`](Self::from_shared)
    /// to avoid the copy.
    ///
    /// # Errors
    ///
    /// Returns [`PoseLandmarkerError::MaskSizeMismatch`] if `data.len()` is
    /// not `width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        Self::from_shared(width, height, Arc::from(data))
    }

    /// Creates a mask around a buffer the producer already shares.
    ///
    /// # Errors
    ///
    /// Returns [`PoseLandmarkerError::MaskSizeMismatch`] if `data.len()` is
    /// not `width * height`.
    pub fn from_shared(width: u32, height: u32, data: Arc<[f32]>) -> Result<Self> {
        let expected = (width as usize).checked_mul(height as usize);
        if expected != Some(data.len()) {
            return Err(PoseLandmarkerError::mask_size_mismatch(
                width,
                height,
                expected.unwrap_or(usize::MAX),
                data.len(),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Returns the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of pixels.
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Returns the raw confidence values.
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Gets the confidence at the specified pixel.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.data.get(idx).copied()
    }

    /// Fraction of pixels whose confidence is at or above `threshold`.
    ///
    /// Returns `0.0` for an empty mask.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn coverage(&self, threshold: f32) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        let covered = self.data.iter().filter(|&&v| v >= threshold).count();
        covered as f32 / self.data.len() as f32
    }

    /// Thresholds the mask into a binary `u8` image (`255` inside, `0` outside).
    #[must_use]
    pub fn to_binary(&self, threshold: f32) -> Vec<u8> {
        self.data
            .iter()
            .map(|&v| if v >= threshold { 255 } else { 0 })
            .collect()
    }

    /// Returns `true` if both masks point at the same pixel buffer.
    #[must_use]
    pub fn shares_buffer_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

/// Wire form of a mask; deserialization goes through the size check.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct MaskRepr {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

#[cfg(feature = "serde")]
impl TryFrom<MaskRepr> for SegmentationMask {
    type Error = PoseLandmarkerError;

    fn try_from(repr: MaskRepr) -> Result<Self> {
        Self::from_data(repr.width, repr.height, repr.data)
    }
}
