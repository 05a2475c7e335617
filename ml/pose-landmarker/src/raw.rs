//! Raw landmark records as emitted by the inference graph.
//!
//! Every field is optional, matching the wire messages the producer fills
//! in. Conversion into [`NormalizedLandmark`]/[`Landmark`] requires `x`, `y`
//! and `z`; visibility and presence pass through when set.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Axis, Collection, PoseLandmarkerError, Result};
use crate::{Landmark, NormalizedLandmark};

/// A raw normalized landmark record.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawNormalizedLandmark {
    /// Normalized x coordinate.
    pub x: Option<f32>,
    /// Normalized y coordinate.
    pub y: Option<f32>,
    /// Relative depth.
    pub z: Option<f32>,
    /// Visibility score.
    pub visibility: Option<f32>,
    /// Presence score.
    pub presence: Option<f32>,
}

/// A raw world landmark record.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RawLandmark {
    /// X coordinate in meters.
    pub x: Option<f32>,
    /// Y coordinate in meters.
    pub y: Option<f32>,
    /// Z coordinate in meters.
    pub z: Option<f32>,
    /// Visibility score.
    pub visibility: Option<f32>,
    /// Presence score.
    pub presence: Option<f32>,
}

/// The raw normalized landmarks of one pose.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawNormalizedLandmarkList {
    /// Landmarks in keypoint order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub landmark: Vec<RawNormalizedLandmark>,
}

/// The raw world landmarks of one pose.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawLandmarkList {
    /// Landmarks in keypoint order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub landmark: Vec<RawLandmark>,
}

fn require(value: Option<f32>, at: (Collection, usize, usize), field: Axis) -> Result<f32> {
    let (collection, pose, landmark) = at;
    value.ok_or_else(|| {
        PoseLandmarkerError::missing_coordinate(collection, pose, landmark, field)
    })
}

impl RawNormalizedLandmark {
    /// Creates a record with all three coordinates set.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            visibility: None,
            presence: None,
        }
    }

    /// Converts the record into a [`NormalizedLandmark`].
    ///
    /// `collection`, `pose` and `landmark` locate the record for the error
    /// raised when a coordinate is missing.
    ///
    /// # Errors
    ///
    /// Returns [`PoseLandmarkerError::MissingCoordinate`] if `x`, `y` or `z`
    /// is absent.
    pub fn to_landmark(
        &self,
        collection: Collection,
        pose: usize,
        landmark: usize,
    ) -> Result<NormalizedLandmark> {
        let at = (collection, pose, landmark);
        Ok(NormalizedLandmark::with_scores(
            require(self.x, at, Axis::X)?,
            require(self.y, at, Axis::Y)?,
            require(self.z, at, Axis::Z)?,
            self.visibility,
            self.presence,
        ))
    }
}

impl RawLandmark {
    /// Creates a record with all three coordinates set.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            visibility: None,
            presence: None,
        }
    }

    /// Converts the record into a [`Landmark`].
    ///
    /// # Errors
    ///
    /// Returns [`PoseLandmarkerError::MissingCoordinate`] if `x`, `y` or `z`
    /// is absent.
    pub fn to_landmark(
        &self,
        collection: Collection,
        pose: usize,
        landmark: usize,
    ) -> Result<Landmark> {
        let at = (collection, pose, landmark);
        Ok(Landmark::with_scores(
            require(self.x, at, Axis::X)?,
            require(self.y, at, Axis::Y)?,
            require(self.z, at, Axis::Z)?,
            self.visibility,
            self.presence,
        ))
    }
}

impl RawNormalizedLandmarkList {
    /// Creates a list from records.
    #[must_use]
    pub const fn new(landmark: Vec<RawNormalizedLandmark>) -> Self {
        Self { landmark }
    }

    /// Creates a list from `(x, y, z)` triples.
    #[must_use]
    pub fn from_triples(points: &[(f32, f32, f32)]) -> Self {
        Self::new(
            points
                .iter()
                .map(|&(x, y, z)| RawNormalizedLandmark::new(x, y, z))
                .collect(),
        )
    }

    /// Converts every record of pose `pose` in `collection`.
    pub(crate) fn to_landmarks(
        &self,
        collection: Collection,
        pose: usize,
    ) -> Result<Vec<NormalizedLandmark>> {
        self.landmark
            .iter()
            .enumerate()
            .map(|(i, raw)| raw.to_landmark(collection, pose, i))
            .collect()
    }
}

impl RawLandmarkList {
    /// Creates a list from records.
    #[must_use]
    pub const fn new(landmark: Vec<RawLandmark>) -> Self {
        Self { landmark }
    }

    /// Creates a list from `(x, y, z)` triples.
    #[must_use]
    pub fn from_triples(points: &[(f32, f32, f32)]) -> Self {
        Self::new(
            points
                .iter()
                .map(|&(x, y, z)| RawLandmark::new(x, y, z))
                .collect(),
        )
    }

    /// Converts every record of pose `pose` in `collection`.
    pub(crate) fn to_landmarks(
        &self,
        collection: Collection,
        pose: usize,
    ) -> Result<Vec<Landmark>> {
        self.landmark
            .iter()
            .enumerate()
            .map(|(i, raw)| raw.to_landmark(collection, pose, i))
            .collect()
    }
}
