//! Error types for pose-landmarker crate.

use std::fmt;

use thiserror::Error;

/// The landmark collection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Normalized pose landmarks.
    Landmarks,
    /// World-coordinate pose landmarks.
    WorldLandmarks,
    /// Auxiliary (non-skeletal) landmarks.
    AuxiliaryLandmarks,
    /// Per-pose segmentation masks.
    SegmentationMasks,
}

impl Collection {
    /// Returns the collection name as used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Landmarks => "landmarks",
            Self::WorldLandmarks => "world_landmarks",
            Self::AuxiliaryLandmarks => "auxiliary_landmarks",
            Self::SegmentationMasks => "segmentation_masks",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coordinate field of a raw landmark record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The `x` coordinate.
    X,
    /// The `y` coordinate.
    Y,
    /// The `z` coordinate.
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        })
    }
}

/// Errors that can occur while assembling pose landmark results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoseLandmarkerError {
    /// A raw landmark record lacks one of its coordinates.
    #[error("{collection}[{pose}][{landmark}] is missing coordinate `{field}`")]
    MissingCoordinate {
        /// Collection holding the malformed record.
        collection: Collection,
        /// Pose index within the collection.
        pose: usize,
        /// Landmark index within the pose.
        landmark: usize,
        /// The absent coordinate.
        field: Axis,
    },

    /// A collection's pose count disagrees with the landmark pose count.
    #[error("{collection} has {actual} poses, expected {expected}")]
    PoseCountMismatch {
        /// The misaligned collection.
        collection: Collection,
        /// Pose count of the normalized landmarks.
        expected: usize,
        /// Pose count of the misaligned collection.
        actual: usize,
    },

    /// A mask buffer does not match its declared dimensions.
    #[error("mask buffer for {width}x{height} has {actual} values, expected {expected}")]
    MaskSizeMismatch {
        /// Mask width in pixels.
        width: u32,
        /// Mask height in pixels.
        height: u32,
        /// Expected number of values (`width * height`).
        expected: usize,
        /// Actual number of values.
        actual: usize,
    },
}

impl PoseLandmarkerError {
    /// Creates a missing coordinate error.
    #[must_use]
    pub const fn missing_coordinate(
        collection: Collection,
        pose: usize,
        landmark: usize,
        field: Axis,
    ) -> Self {
        Self::MissingCoordinate {
            collection,
            pose,
            landmark,
            field,
        }
    }

    /// Creates a pose count mismatch error.
    #[must_use]
    pub const fn pose_count_mismatch(
        collection: Collection,
        expected: usize,
        actual: usize,
    ) -> Self {
        Self::PoseCountMismatch {
            collection,
            expected,
            actual,
        }
    }

    /// Creates a mask size mismatch error.
    #[must_use]
    pub const fn mask_size_mismatch(
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    ) -> Self {
        Self::MaskSizeMismatch {
            width,
            height,
            expected,
            actual,
        }
    }
}

/// Result type for pose-landmarker operations.
pub type Result<T> = std::result::Result<T, PoseLandmarkerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_missing_coordinate() {
        let err =
            PoseLandmarkerError::missing_coordinate(Collection::WorldLandmarks, 1, 12, Axis::Y);
        let msg = err.to_string();
        assert!(msg.contains("world_landmarks[1][12]"));
        assert!(msg.contains("`y`"));
    }

    #[test]
    fn error_pose_count_mismatch() {
        let err = PoseLandmarkerError::pose_count_mismatch(Collection::AuxiliaryLandmarks, 2, 3);
        let msg = err.to_string();
        assert!(msg.contains("auxiliary_landmarks"));
        assert!(msg.contains("3 poses"));
        assert!(msg.contains("expected 2"));
    }

    #[test]
    fn error_mask_size_mismatch() {
        let err = PoseLandmarkerError::mask_size_mismatch(4, 2, 8, 7);
        let msg = err.to_string();
        assert!(msg.contains("4x2"));
        assert!(msg.contains("7 values"));
    }

    #[test]
    fn collection_names() {
        assert_eq!(Collection::Landmarks.as_str(), "landmarks");
        assert_eq!(Collection::SegmentationMasks.to_string(), "segmentation_masks");
    }
}
