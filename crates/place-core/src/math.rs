//! Geometry shared by the placement controllers.
//!
//! Nothing here touches a platform API. Poses arrive from the XR runtime as
//! column-major rigid transforms and are decomposed once; rays come either
//! from a controller transform or from the desktop camera.

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

/// Position and orientation of something in a reference space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Decompose a column-major 4x4 rigid transform (the layout of
    /// `XRRigidTransform.matrix`). Any scale in the matrix is discarded.
    pub fn from_cols_array(m: &[f32; 16]) -> Self {
        let (_scale, orientation, position) = Mat4::from_cols_array(m).to_scale_rotation_translation();
        Self {
            position,
            orientation: orientation.normalize(),
        }
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// Ray along the pose's forward (-Z) axis, the way a controller points.
    pub fn forward_ray(&self) -> Ray {
        Ray::new(self.position, self.orientation * Vec3::NEG_Z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Infinite horizontal plane at a fixed height; the virtual floor used when
/// no real surface detection is available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorPlane {
    pub height: f32,
}

impl FloorPlane {
    pub fn new(height: f32) -> Self {
        Self { height }
    }

    /// Intersection in front of the ray origin, or `None` when the ray runs
    /// parallel to the floor or points away from it.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        let denom = ray.direction.y;
        if denom.abs() < 1e-6 {
            return None;
        }
        let t = (self.height - ray.origin.y) / denom;
        if t < 0.0 {
            return None;
        }
        Some(ray.at(t))
    }
}

/// Clip plane in `normal . p + constant = 0` form; the renderer discards the
/// negative side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane {
    pub normal: Vec3,
    pub constant: f32,
}

impl ClipPlane {
    /// Up-facing plane offset by `height`, turned by `yaw` about the vertical.
    pub fn from_height_yaw(height: f32, yaw: f32) -> Self {
        let normal = (Quat::from_rotation_y(yaw) * Vec3::Y).normalize();
        Self {
            normal,
            constant: height,
        }
    }

    pub fn distance_to(&self, p: Vec3) -> f32 {
        self.normal.dot(p) + self.constant
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.normal.x, self.normal.y, self.normal.z, self.constant]
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera used by the desktop preview before any orbiting.
    pub fn desktop_default(aspect: f32) -> Self {
        use crate::constants::*;
        Self {
            eye: Vec3::from_array(DESKTOP_EYE),
            target: Vec3::from_array(DESKTOP_TARGET),
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: DESKTOP_FOVY_DEG.to_radians(),
            znear: DESKTOP_ZNEAR,
            zfar: DESKTOP_ZFAR,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// World-space ray from the eye through a point given in normalized
    /// device coordinates (x right, y up, both in [-1, 1]).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far: Vec3 = p_far.truncate() / p_far.w;
        Ray::new(self.eye, far - self.eye)
    }
}
