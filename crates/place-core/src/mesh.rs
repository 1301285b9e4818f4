//! What gets placed: the content behind the object handle.
//!
//! Parsing is done by the host's loader; this side only knows where a model
//! comes from, what format it claims to be, how big it is, and which
//! renderable surfaces it exposes for clipping.

use glam::Vec3;
use serde::Serialize;

use crate::constants::{PLACEHOLDER_COLOR_RGB, PLACEHOLDER_CUBE_SIZE};
use crate::math::ClipPlane;

pub const DEFAULT_MODEL_URL: &str = "https://modelviewer.dev/shared-assets/models/NeilArmstrong.glb";

const GLB_MAGIC: &[u8; 4] = b"glTF";

#[derive(Clone, Debug, PartialEq)]
pub enum MeshSource {
    Url(String),
    Bytes(Vec<u8>),
}

impl MeshSource {
    /// Pick the model from page parameters: `model` (glTF/GLB) first, then
    /// `stl`, else the bundled default. Blank values count as absent.
    pub fn from_params(model: Option<&str>, stl: Option<&str>) -> Self {
        let pick = |v: Option<&str>| v.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        let url = pick(model)
            .or_else(|| pick(stl))
            .unwrap_or_else(|| DEFAULT_MODEL_URL.to_string());
        MeshSource::Url(url)
    }

    pub fn format(&self) -> MeshFormat {
        match self {
            MeshSource::Url(url) => MeshFormat::from_url(url),
            MeshSource::Bytes(bytes) => MeshFormat::from_bytes(bytes),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            MeshSource::Url(url) => url.clone(),
            MeshSource::Bytes(bytes) => format!("<{} bytes>", bytes.len()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshFormat {
    Stl,
    Gltf,
}

impl MeshFormat {
    pub fn from_url(url: &str) -> Self {
        // ignore query/fragment so "part.stl?v=2" still reads as STL
        let path = url.split(['?', '#']).next().unwrap_or(url);
        if path.to_ascii_lowercase().ends_with(".stl") {
            MeshFormat::Stl
        } else {
            MeshFormat::Gltf
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.starts_with(GLB_MAGIC) {
            MeshFormat::Gltf
        } else {
            MeshFormat::Stl
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MeshFormat::Stl => "stl",
            MeshFormat::Gltf => "gltf",
        }
    }
}

/// Axis-aligned bounds of a loaded model in its own units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl MeshBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Uniform factor that makes the largest dimension `target` meters.
    /// Degenerate bounds are treated as one unit across.
    pub fn fit_scale(&self, target: f32) -> f32 {
        let max_dim = self.size().max_element();
        let max_dim = if max_dim.is_finite() && max_dim > 0.0 { max_dim } else { 1.0 };
        target / max_dim
    }
}

/// One renderable piece of the placed object (a mesh/material pair on the
/// host side). Clipping is assigned per surface.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pub name: String,
    pub clip_plane: Option<ClipPlane>,
}

impl Surface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clip_plane: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Placeholder { size: f32, color_rgb: [f32; 3] },
    Mesh { format: MeshFormat, fit_scale: f32 },
}

/// Content of the placed object as the host's scene graph sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub kind: NodeKind,
    pub surfaces: Vec<Surface>,
}

impl SceneNode {
    /// Small colored cube used whenever a real model is unavailable.
    /// Needs no I/O and cannot fail.
    pub fn placeholder() -> Self {
        Self {
            kind: NodeKind::Placeholder {
                size: PLACEHOLDER_CUBE_SIZE,
                color_rgb: PLACEHOLDER_COLOR_RGB,
            },
            surfaces: vec![Surface::new("placeholder-cube")],
        }
    }

    /// Node for a model the host loader produced. A loader that reports no
    /// surfaces still gets one so clipping has something to act on.
    pub fn from_mesh(format: MeshFormat, surface_count: usize, bounds: MeshBounds, fit_size: f32) -> Self {
        let surfaces = (0..surface_count.max(1))
            .map(|i| Surface::new(format!("{}-surface-{}", format.as_str(), i)))
            .collect();
        Self {
            kind: NodeKind::Mesh {
                format,
                fit_scale: bounds.fit_scale(fit_size),
            },
            surfaces,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, NodeKind::Placeholder { .. })
    }

    pub fn set_clip_plane(&mut self, plane: Option<ClipPlane>) {
        for s in &mut self.surfaces {
            s.clip_plane = plane;
        }
    }
}
