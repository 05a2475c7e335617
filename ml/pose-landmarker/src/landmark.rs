//! Landmark point types for pose estimation results.
//!
//! Points are immutable once created: coordinates are read through
//! accessors and there are no setters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A landmark in normalized image coordinates.
///
/// `x` and `y` are normalized to `[0, 1]` by the image width and height.
/// `z` is the landmark depth with the hip midpoint as origin, on roughly the
/// same scale as `x`; smaller values are closer to the camera. Values are
/// stored exactly as produced and may fall outside `[0, 1]` for keypoints
/// that lie beyond the frame.
///
/// # Example
///
/// ```
/// use pose_landmarker::NormalizedLandmark;
///
/// let nose = NormalizedLandmark::new(0.5, 0.25, -0.1);
/// assert_eq!(nose.x(), 0.5);
/// assert_eq!(nose.visibility(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NormalizedLandmark {
    x: f32,
    y: f32,
    z: f32,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    visibility: Option<f32>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    presence: Option<f32>,
}

impl NormalizedLandmark {
    /// Creates a landmark without visibility or presence scores.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility: None,
            presence: None,
        }
    }

    /// Creates a landmark with optional visibility and presence scores.
    #[must_use]
    pub const fn with_scores(
        x: f32,
        y: f32,
        z: f32,
        visibility: Option<f32>,
        presence: Option<f32>,
    ) -> Self {
        Self {
            x,
            y,
            z,
            visibility,
            presence,
        }
    }

    /// Normalized x coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Normalized y coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Relative depth.
    #[must_use]
    pub const fn z(&self) -> f32 {
        self.z
    }

    /// Likelihood that the landmark is visible (not occluded), if reported.
    #[must_use]
    pub const fn visibility(&self) -> Option<f32> {
        self.visibility
    }

    /// Likelihood that the landmark is present in the frame, if reported.
    #[must_use]
    pub const fn presence(&self) -> Option<f32> {
        self.presence
    }

    /// Returns `true` if the visibility score is at or above `threshold`.
    ///
    /// Landmarks without a visibility score are treated as visible.
    #[must_use]
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility.map_or(true, |v| v >= threshold)
    }

    /// Returns the pixel coordinates for a given image size.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_pixels(&self, width: u32, height: u32) -> (f32, f32) {
        (self.x * width as f32, self.y * height as f32)
    }
}

/// A landmark in world coordinates.
///
/// Coordinates are in meters with the origin at the center between the hips.
///
/// # Example
///
/// ```
/// use pose_landmarker::Landmark;
///
/// let hip = Landmark::new(0.0, 0.0, 0.0);
/// let knee = Landmark::new(0.0, 0.3, 0.4);
/// assert!((hip.distance(&knee) - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Landmark {
    x: f32,
    y: f32,
    z: f32,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    visibility: Option<f32>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    presence: Option<f32>,
}

impl Landmark {
    /// Creates a landmark without visibility or presence scores.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility: None,
            presence: None,
        }
    }

    /// Creates a landmark with optional visibility and presence scores.
    #[must_use]
    pub const fn with_scores(
        x: f32,
        y: f32,
        z: f32,
        visibility: Option<f32>,
        presence: Option<f32>,
    ) -> Self {
        Self {
            x,
            y,
            z,
            visibility,
            presence,
        }
    }

    /// X coordinate in meters.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Y coordinate in meters.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Z coordinate in meters.
    #[must_use]
    pub const fn z(&self) -> f32 {
        self.z
    }

    /// Likelihood that the landmark is visible (not occluded), if reported.
    #[must_use]
    pub const fn visibility(&self) -> Option<f32> {
        self.visibility
    }

    /// Likelihood that the landmark is present in the frame, if reported.
    #[must_use]
    pub const fn presence(&self) -> Option<f32> {
        self.presence
    }

    /// Euclidean distance to another landmark, in meters.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx.mul_add(dx, dy.mul_add(dy, dz * dz)).sqrt()
    }
}
