//! Assembly of raw per-frame detection output into [`PoseLandmarkerResult`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Collection, PoseLandmarkerError, Result};
use crate::{PoseLandmarkerResult, RawLandmarkList, RawNormalizedLandmarkList, SegmentationMask};

/// How the assembler treats collections whose pose counts disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AlignmentPolicy {
    /// Reject input whose world landmarks, auxiliary landmarks or masks do
    /// not have one entry per pose.
    #[default]
    Strict,
    /// Log the mismatch and build the result as given.
    Permissive,
}

/// Assembler configuration.
///
/// # Example
///
/// ```
/// use pose_landmarker::{AlignmentPolicy, AssemblerConfig};
///
/// let config = AssemblerConfig::default();
/// assert_eq!(config.alignment, AlignmentPolicy::Strict);
///
/// let lenient = AssemblerConfig::default().with_alignment(AlignmentPolicy::Permissive);
/// assert_eq!(lenient.alignment, AlignmentPolicy::Permissive);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AssemblerConfig {
    /// Pose count alignment policy.
    pub alignment: AlignmentPolicy,
}

impl AssemblerConfig {
    /// Sets the alignment policy.
    #[must_use]
    pub const fn with_alignment(mut self, alignment: AlignmentPolicy) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Builds [`PoseLandmarkerResult`]s from raw detection output.
///
/// Stateless apart from its configuration; one assembler can serve every
/// frame of a stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultAssembler {
    config: AssemblerConfig,
}

impl ResultAssembler {
    /// Creates an assembler with the given configuration.
    #[must_use]
    pub const fn new(config: AssemblerConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Assembles one frame's detection output.
    ///
    /// Each raw record is copied into an immutable point without any
    /// transformation. Masks are moved into the result; their pixel buffers
    /// are not copied.
    ///
    /// # Errors
    ///
    /// - [`PoseLandmarkerError::MissingCoordinate`] if any raw landmark lacks
    ///   `x`, `y` or `z`.
    /// - [`PoseLandmarkerError::PoseCountMismatch`] under
    ///   [`AlignmentPolicy::Strict`] if the world landmarks, auxiliary
    ///   landmarks or masks do not have one entry per pose.
    pub fn assemble(
        &self,
        landmarks: Vec<RawNormalizedLandmarkList>,
        world_landmarks: Vec<RawLandmarkList>,
        auxiliary_landmarks: Vec<RawNormalizedLandmarkList>,
        segmentation_masks: Option<Vec<SegmentationMask>>,
        timestamp_ms: u64,
    ) -> Result<PoseLandmarkerResult> {
        let poses = landmarks.len();
        let mut counts = vec![
            (Collection::WorldLandmarks, world_landmarks.len()),
            (Collection::AuxiliaryLandmarks, auxiliary_landmarks.len()),
        ];
        if let Some(masks) = &segmentation_masks {
            counts.push((Collection::SegmentationMasks, masks.len()));
        }
        self.check_alignment(poses, &counts, timestamp_ms)?;

        let landmarks = landmarks
            .into_iter()
            .enumerate()
            .map(|(pose, list)| list.to_landmarks(Collection::Landmarks, pose))
            .collect::<Result<Vec<_>>>()?;
        let world_landmarks = world_landmarks
            .into_iter()
            .enumerate()
            .map(|(pose, list)| list.to_landmarks(Collection::WorldLandmarks, pose))
            .collect::<Result<Vec<_>>>()?;
        let auxiliary_landmarks = auxiliary_landmarks
            .into_iter()
            .enumerate()
            .map(|(pose, list)| list.to_landmarks(Collection::AuxiliaryLandmarks, pose))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            timestamp_ms,
            poses,
            masks = segmentation_masks.as_ref().map(Vec::len),
            "Assembled pose landmarker result"
        );

        Ok(PoseLandmarkerResult::from_parts(
            timestamp_ms,
            landmarks,
            world_landmarks,
            auxiliary_landmarks,
            segmentation_masks,
        ))
    }

    fn check_alignment(
        &self,
        poses: usize,
        counts: &[(Collection, usize)],
        timestamp_ms: u64,
    ) -> Result<()> {
        for &(collection, actual) in counts {
            if actual == poses {
                continue;
            }
            match self.config.alignment {
                AlignmentPolicy::Strict => {
                    return Err(PoseLandmarkerError::pose_count_mismatch(
                        collection, poses, actual,
                    ));
                }
                AlignmentPolicy::Permissive => {
                    warn!(
                        timestamp_ms,
                        %collection,
                        expected = poses,
                        actual,
                        "Pose counts disagree; result is not index-aligned"
                    );
                }
            }
        }
        Ok(())
    }
}

/// Assembles one frame's detection output with the default (strict)
/// configuration.
///
/// See [`ResultAssembler::assemble`].
///
/// # Errors
///
/// Same as [`ResultAssembler::assemble`].
pub fn assemble(
    landmarks: Vec<RawNormalizedLandmarkList>,
    world_landmarks: Vec<RawLandmarkList>,
    auxiliary_landmarks: Vec<RawNormalizedLandmarkList>,
    segmentation_masks: Option<Vec<SegmentationMask>>,
    timestamp_ms: u64,
) -> Result<PoseLandmarkerResult> {
    ResultAssembler::default().assemble(
        landmarks,
        world_landmarks,
        auxiliary_landmarks,
        segmentation_masks,
        timestamp_ms,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::Axis;
    use crate::{RawLandmark, RawNormalizedLandmark};

    fn norm(points: &[(f32, f32, f32)]) -> RawNormalizedLandmarkList {
        RawNormalizedLandmarkList::from_triples(points)
    }

    fn world(points: &[(f32, f32, f32)]) -> RawLandmarkList {
        RawLandmarkList::from_triples(points)
    }

    fn mask(value: f32) -> SegmentationMask {
        SegmentationMask::from_data(2, 2, vec![value; 4]).unwrap()
    }

    #[test]
    fn single_pose_without_masks() {
        let result = assemble(
            vec![norm(&[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)])],
            vec![world(&[(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)])],
            vec![norm(&[])],
            None,
            1000,
        )
        .unwrap();

        assert_eq!(result.timestamp_ms(), 1000);
        assert_eq!(result.landmarks().len(), 1);
        assert_eq!(result.landmarks()[0].len(), 2);
        assert_eq!(result.world_landmarks()[0].len(), 2);
        assert_eq!(result.auxiliary_landmarks().len(), 1);
        assert!(result.auxiliary_landmarks()[0].is_empty());
        assert!(result.segmentation_masks().is_none());
    }

    #[test]
    fn two_poses_with_masks() {
        let result = assemble(
            vec![norm(&[(0.1, 0.1, 0.0)]), norm(&[(0.8, 0.8, 0.0)])],
            vec![world(&[(-0.5, 0.0, 0.0)]), world(&[(0.5, 0.0, 0.0)])],
            vec![norm(&[]), norm(&[])],
            Some(vec![mask(0.2), mask(0.7)]),
            33,
        )
        .unwrap();

        let masks = result.segmentation_masks().unwrap();
        assert_eq!(masks.len(), 2);
        assert_eq!(masks[1].get(0, 0), Some(0.7));
        assert_eq!(result.landmarks()[1][0].x(), 0.8);
        assert_eq!(result.world_landmarks()[1][0].x(), 0.5);
    }

    #[test]
    fn coordinates_pass_through_unchanged() {
        let result = assemble(
            vec![norm(&[(0.5, 0.25, -0.1)])],
            vec![world(&[(0.5, 0.25, -0.1)])],
            vec![norm(&[(0.5, 0.25, -0.1)])],
            None,
            0,
        )
        .unwrap();

        let lm = result.landmarks()[0][0];
        assert_eq!((lm.x(), lm.y(), lm.z()), (0.5, 0.25, -0.1));
        let wl = result.world_landmarks()[0][0];
        assert_eq!((wl.x(), wl.y(), wl.z()), (0.5, 0.25, -0.1));
        let aux = result.auxiliary_landmarks()[0][0];
        assert_eq!((aux.x(), aux.y(), aux.z()), (0.5, 0.25, -0.1));
    }

    #[test]
    fn scores_pass_through() {
        let raw = RawNormalizedLandmark {
            visibility: Some(0.3),
            presence: Some(0.95),
            ..RawNormalizedLandmark::new(0.1, 0.2, 0.3)
        };
        let result = assemble(
            vec![RawNormalizedLandmarkList::new(vec![raw])],
            vec![world(&[(0.0, 0.0, 0.0)])],
            vec![norm(&[])],
            None,
            0,
        )
        .unwrap();
        let lm = result.landmarks()[0][0];
        assert_eq!(lm.visibility(), Some(0.3));
        assert_eq!(lm.presence(), Some(0.95));
    }

    #[test]
    fn empty_frame() {
        let result = assemble(Vec::new(), Vec::new(), Vec::new(), Some(Vec::new()), 5).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.segmentation_masks(), Some(&[][..]));
    }

    #[test]
    fn masks_are_moved_not_copied() {
        let original = mask(0.4);
        let handle = original.clone();
        let result = assemble(
            vec![norm(&[])],
            vec![world(&[])],
            vec![norm(&[])],
            Some(vec![original]),
            0,
        )
        .unwrap();
        assert!(result.segmentation_masks().unwrap()[0].shares_buffer_with(&handle));
    }

    #[test]
    fn missing_coordinate_fails_whole_call() {
        let bad = RawLandmark {
            x: None,
            ..RawLandmark::new(0.0, 0.0, 0.0)
        };
        let err = assemble(
            vec![norm(&[(0.0, 0.0, 0.0)]), norm(&[(0.0, 0.0, 0.0)])],
            vec![
                world(&[(0.0, 0.0, 0.0)]),
                RawLandmarkList::new(vec![RawLandmark::new(0.0, 0.0, 0.0), bad]),
            ],
            vec![norm(&[]), norm(&[])],
            None,
            0,
        )
        .unwrap_err();

        assert_eq!(
            err,
            PoseLandmarkerError::missing_coordinate(Collection::WorldLandmarks, 1, 1, Axis::X)
        );
    }

    #[test]
    fn strict_rejects_world_mismatch() {
        let err = assemble(
            vec![norm(&[]), norm(&[])],
            vec![world(&[])],
            vec![norm(&[]), norm(&[])],
            None,
            0,
        )
        .unwrap_err();
        assert_eq!(
            err,
            PoseLandmarkerError::pose_count_mismatch(Collection::WorldLandmarks, 2, 1)
        );
    }

    #[test]
    fn strict_rejects_auxiliary_mismatch() {
        let err = assemble(vec![norm(&[])], vec![world(&[])], Vec::new(), None, 0).unwrap_err();
        assert_eq!(
            err,
            PoseLandmarkerError::pose_count_mismatch(Collection::AuxiliaryLandmarks, 1, 0)
        );
    }

    #[test]
    fn strict_rejects_mask_mismatch() {
        let err = assemble(
            vec![norm(&[])],
            vec![world(&[])],
            vec![norm(&[])],
            Some(vec![mask(0.0), mask(1.0)]),
            0,
        )
        .unwrap_err();
        assert_eq!(
            err,
            PoseLandmarkerError::pose_count_mismatch(Collection::SegmentationMasks, 1, 2)
        );
    }

    #[test]
    fn permissive_keeps_misaligned_input() {
        let assembler = ResultAssembler::new(
            AssemblerConfig::default().with_alignment(AlignmentPolicy::Permissive),
        );
        let result = assembler
            .assemble(
                vec![norm(&[(0.1, 0.1, 0.1)]), norm(&[(0.2, 0.2, 0.2)])],
                vec![world(&[(0.0, 0.0, 0.0)])],
                Vec::new(),
                Some(vec![mask(0.5)]),
                7,
            )
            .unwrap();

        assert_eq!(result.pose_count(), 2);
        assert_eq!(result.world_landmarks().len(), 1);
        assert!(result.auxiliary_landmarks().is_empty());
        let second = result.pose(1).unwrap();
        assert!(second.world_landmarks().is_none());
        assert!(second.segmentation_mask().is_none());
    }

    #[test]
    fn permissive_still_rejects_malformed_records() {
        let assembler = ResultAssembler::new(
            AssemblerConfig::default().with_alignment(AlignmentPolicy::Permissive),
        );
        let err = assembler
            .assemble(
                vec![RawNormalizedLandmarkList::new(vec![RawNormalizedLandmark::default()])],
                Vec::new(),
                Vec::new(),
                None,
                0,
            )
            .unwrap_err();
        assert!(matches!(err, PoseLandmarkerError::MissingCoordinate { .. }));
    }

    #[test]
    fn default_config_is_strict() {
        assert_eq!(
            ResultAssembler::default().config().alignment,
            AlignmentPolicy::Strict
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_deserializes_with_defaults() {
        let config: AssemblerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AssemblerConfig::default());

        let config: AssemblerConfig =
            serde_json::from_str(r#"{"alignment":"permissive"}"#).unwrap();
        assert_eq!(config.alignment, AlignmentPolicy::Permissive);
    }
}
