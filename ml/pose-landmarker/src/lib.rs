//! Pose landmark detection results for CortenForge.
//!
//! This crate turns the raw per-frame output of a pose landmark model into an
//! immutable, index-aligned result value:
//!
//! # Result Types
//!
//! - [`PoseLandmarkerResult`] - All poses detected in one frame
//! - [`PoseView`] - Borrowed view of one pose across every collection
//! - [`NormalizedLandmark`] - Keypoint in normalized image coordinates
//! - [`Landmark`] - Keypoint in world coordinates (meters)
//! - [`SegmentationMask`] - Per-pose silhouette confidence mask
//! - [`PoseLandmark`] - Named keypoint indices of the 33-point pose model
//!
//! # Assembly
//!
//! - [`RawNormalizedLandmarkList`] / [`RawLandmarkList`] - Producer records
//! - [`ResultAssembler`] - Validates and converts raw records
//! - [`AssemblerConfig`] / [`AlignmentPolicy`] - Pose count alignment rules
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It performs no
//! inference; the model runs elsewhere and hands its output here.
//!
//! # Example
//!
//! ```
//! use pose_landmarker::{
//!     assemble, RawLandmarkList, RawNormalizedLandmarkList, SegmentationMask,
//! };
//!
//! let pose = [(0.5, 0.2, -0.1), (0.52, 0.18, -0.09)];
//! let mask = SegmentationMask::from_data(2, 2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
//!
//! let result = assemble(
//!     vec![RawNormalizedLandmarkList::from_triples(&pose)],
//!     vec![RawLandmarkList::from_triples(&pose)],
//!     vec![RawNormalizedLandmarkList::default()],
//!     Some(vec![mask]),
//!     1_000,
//! )
//! .unwrap();
//!
//! let first = result.pose(0).unwrap();
//! assert_eq!(first.landmarks().len(), 2);
//! assert!(first.segmentation_mask().is_some());
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod assembler;
mod error;
mod landmark;
mod mask;
mod raw;
mod result;
mod topology;

pub use assembler::{assemble, AlignmentPolicy, AssemblerConfig, ResultAssembler};
pub use error::{Axis, Collection, PoseLandmarkerError, Result};
pub use landmark::{Landmark, NormalizedLandmark};
pub use mask::SegmentationMask;
pub use raw::{RawLandmark, RawLandmarkList, RawNormalizedLandmark, RawNormalizedLandmarkList};
pub use result::{PoseLandmarkerResult, PoseView, TaskResult};
pub use topology::{PoseLandmark, POSE_CONNECTIONS};
