//! The aggregate pose landmark detection result.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{Landmark, NormalizedLandmark, PoseLandmark, SegmentationMask};

/// Common interface of per-frame vision task results.
pub trait TaskResult {
    /// Capture timestamp of the source frame, in milliseconds.
    fn timestamp_ms(&self) -> u64;
}

/// Pose landmarks detected in one frame.
///
/// Built once per frame by [`ResultAssembler`](crate::ResultAssembler) and
/// read-only afterwards. Collections are indexed by pose: entry `i` of
/// [`landmarks`](Self::landmarks), [`world_landmarks`](Self::world_landmarks),
/// [`auxiliary_landmarks`](Self::auxiliary_landmarks) and
/// [`segmentation_masks`](Self::segmentation_masks) all describe the same
/// detected pose.
///
/// # Example
///
/// ```
/// use pose_landmarker::{assemble, PoseLandmark, RawLandmarkList, RawNormalizedLandmarkList};
///
/// let result = assemble(
///     vec![RawNormalizedLandmarkList::from_triples(&[(0.5, 0.2, 0.0)])],
///     vec![RawLandmarkList::from_triples(&[(0.0, -0.6, 0.1)])],
///     vec![RawNormalizedLandmarkList::default()],
///     None,
///     1000,
/// )
/// .unwrap();
///
/// assert_eq!(result.timestamp_ms(), 1000);
/// assert_eq!(result.pose_count(), 1);
/// assert_eq!(result.landmark(0, PoseLandmark::Nose).map(|lm| lm.x()), Some(0.5));
/// assert!(result.segmentation_masks().is_none());
/// ```
///
/// The collections cannot be modified through the result:
///
/// ```compile_fail
/// use pose_landmarker::{assemble, NormalizedLandmark, RawNormalizedLandmarkList};
///
/// let result = assemble(
///     vec![RawNormalizedLandmarkList::default()],
///     vec![Default::default()],
///     vec![RawNormalizedLandmarkList::default()],
///     None,
///     0,
/// )
/// .unwrap();
/// result.landmarks()[0].push(NormalizedLandmark::new(0.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PoseLandmarkerResult {
    timestamp_ms: u64,
    landmarks: Vec<Vec<NormalizedLandmark>>,
    world_landmarks: Vec<Vec<Landmark>>,
    auxiliary_landmarks: Vec<Vec<NormalizedLandmark>>,
    segmentation_masks: Option<Vec<SegmentationMask>>,
}

impl PoseLandmarkerResult {
    pub(crate) const fn from_parts(
        timestamp_ms: u64,
        landmarks: Vec<Vec<NormalizedLandmark>>,
        world_landmarks: Vec<Vec<Landmark>>,
        auxiliary_landmarks: Vec<Vec<NormalizedLandmark>>,
        segmentation_masks: Option<Vec<SegmentationMask>>,
    ) -> Self {
        Self {
            timestamp_ms,
            landmarks,
            world_landmarks,
            auxiliary_landmarks,
            segmentation_masks,
        }
    }

    /// Capture timestamp of the source frame, in milliseconds.
    #[must_use]
    pub const fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    /// Normalized landmarks of each detected pose.
    #[must_use]
    pub fn landmarks(&self) -> &[Vec<NormalizedLandmark>] {
        &self.landmarks
    }

    /// World-coordinate landmarks of each detected pose.
    #[must_use]
    pub fn world_landmarks(&self) -> &[Vec<Landmark>] {
        &self.world_landmarks
    }

    /// Auxiliary landmarks of each detected pose.
    #[must_use]
    pub fn auxiliary_landmarks(&self) -> &[Vec<NormalizedLandmark>] {
        &self.auxiliary_landmarks
    }

    /// Segmentation masks of each detected pose, if the producer emitted them.
    ///
    /// `None` exactly when no mask list was supplied. A supplied list is
    /// returned as given, so a zero-pose frame with masks requested yields
    /// `Some(&[])`.
    #[must_use]
    pub fn segmentation_masks(&self) -> Option<&[SegmentationMask]> {
        self.segmentation_masks.as_deref()
    }

    /// Number of detected poses.
    #[must_use]
    pub fn pose_count(&self) -> usize {
        self.landmarks.len()
    }

    /// Returns `true` if no pose was detected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Returns an index-aligned view of pose `index`.
    #[must_use]
    pub fn pose(&self, index: usize) -> Option<PoseView<'_>> {
        let landmarks = self.landmarks.get(index)?;
        Some(PoseView {
            index,
            landmarks,
            world_landmarks: self.world_landmarks.get(index).map(Vec::as_slice),
            auxiliary_landmarks: self.auxiliary_landmarks.get(index).map(Vec::as_slice),
            segmentation_mask: self
                .segmentation_masks
                .as_ref()
                .and_then(|masks| masks.get(index)),
        })
    }

    /// Iterates over all poses in index order.
    pub fn poses(&self) -> impl Iterator<Item = PoseView<'_>> + '_ {
        (0..self.pose_count()).filter_map(move |i| self.pose(i))
    }

    /// Looks up a named keypoint of pose `pose`.
    #[must_use]
    pub fn landmark(&self, pose: usize, keypoint: PoseLandmark) -> Option<&NormalizedLandmark> {
        self.landmarks.get(pose)?.get(keypoint.index())
    }

    /// Looks up a named keypoint of pose `pose` in world coordinates.
    #[must_use]
    pub fn world_landmark(&self, pose: usize, keypoint: PoseLandmark) -> Option<&Landmark> {
        self.world_landmarks.get(pose)?.get(keypoint.index())
    }
}

impl TaskResult for PoseLandmarkerResult {
    fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }
}

/// Borrowed view of a single detected pose.
///
/// World landmarks, auxiliary landmarks and the mask are `None` only when
/// the result was assembled permissively from misaligned input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseView<'a> {
    index: usize,
    landmarks: &'a [NormalizedLandmark],
    world_landmarks: Option<&'a [Landmark]>,
    auxiliary_landmarks: Option<&'a [NormalizedLandmark]>,
    segmentation_mask: Option<&'a SegmentationMask>,
}

impl<'a> PoseView<'a> {
    /// Pose index within the result.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Normalized landmarks of this pose.
    #[must_use]
    pub const fn landmarks(&self) -> &'a [NormalizedLandmark] {
        self.landmarks
    }

    /// World landmarks of this pose.
    #[must_use]
    pub const fn world_landmarks(&self) -> Option<&'a [Landmark]> {
        self.world_landmarks
    }

    /// Auxiliary landmarks of this pose.
    #[must_use]
    pub const fn auxiliary_landmarks(&self) -> Option<&'a [NormalizedLandmark]> {
        self.auxiliary_landmarks
    }

    /// Segmentation mask of this pose.
    #[must_use]
    pub const fn segmentation_mask(&self) -> Option<&'a SegmentationMask> {
        self.segmentation_mask
    }
}
