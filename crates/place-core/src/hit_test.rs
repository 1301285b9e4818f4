//! Per-frame surface detection.
//!
//! The tracker asks the platform for this frame's hit-test results and keeps
//! the reticle in sync with the first one. No smoothing across frames.

use glam::{Quat, Vec3};

use crate::math::Pose;
use crate::session::SessionResources;

/// Read access to one XR frame's hit-test results.
///
/// Implemented over the browser's `XRFrame` in the web crate and by plain
/// structs in tests.
pub trait HitTestFrame {
    type Space;
    type Source;
    type Hit;

    fn hit_test_results(&self, source: &Self::Source) -> Vec<Self::Hit>;
    fn hit_pose(&self, hit: &Self::Hit, space: &Self::Space) -> Option<Pose>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfacePose {
    pub found: bool,
    pub position: Vec3,
    pub orientation: Quat,
}

impl SurfacePose {
    pub const NOT_FOUND: SurfacePose = SurfacePose {
        found: false,
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn found(pose: Pose) -> Self {
        Self {
            found: true,
            position: pose.position,
            orientation: pose.orientation,
        }
    }

    pub fn pose(&self) -> Option<Pose> {
        self.found.then(|| Pose::new(self.position, self.orientation))
    }
}

/// Visual marker at the current surface point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reticle {
    pub visible: bool,
    pub pose: Pose,
}

#[derive(Debug, Default)]
pub struct SurfaceTracker {
    reticle: Reticle,
}

impl SurfaceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reticle(&self) -> &Reticle {
        &self.reticle
    }

    /// Query the frame once. Without a frame or without a usable hit-test
    /// source this returns not-found and never touches the platform.
    pub fn update<F: HitTestFrame>(
        &mut self,
        frame: Option<&F>,
        resources: Option<&SessionResources<F::Space, F::Source>>,
    ) -> SurfacePose {
        let (Some(frame), Some((source, space))) = (frame, resources.and_then(|r| r.hit_test())) else {
            self.reticle.visible = false;
            return SurfacePose::NOT_FOUND;
        };

        let pose = frame
            .hit_test_results(source)
            .first()
            .and_then(|hit| frame.hit_pose(hit, space));

        match pose {
            Some(pose) => {
                self.reticle = Reticle {
                    visible: true,
                    pose,
                };
                SurfacePose::found(pose)
            }
            None => {
                self.reticle.visible = false;
                SurfacePose::NOT_FOUND
            }
        }
    }

    pub fn clear(&mut self) {
        self.reticle.visible = false;
    }
}
