use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context};
use serde::Deserialize;

use crate::utils::Vertex;

/// Unit-quad corners in triangle-strip order: bottom-left, bottom-right,
/// top-left, top-right.
pub const QUAD_POSITIONS: [[f32; 2]; 4] = [[-0.5, -0.5], [0.5, -0.5], [-0.5, 0.5], [0.5, 0.5]];

/// TexturePacker-style atlas manifest: per-frame pixel rectangles plus the
/// sheet dimensions under `meta.size`.
#[derive(Debug, Clone, Deserialize)]
pub struct AtlasManifest {
    pub frames: HashMap<String, FrameEntry>,
    pub meta: Meta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrameEntry {
    pub frame: FrameRect,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FrameRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Meta {
    pub size: SheetSize,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SheetSize {
    pub w: f32,
    pub h: f32,
}

impl AtlasManifest {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("malformed atlas manifest")
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading atlas manifest {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn frame(&self, name: &str) -> anyhow::Result<FrameRect> {
        self.frames
            .get(name)
            .map(|entry| entry.frame)
            .ok_or_else(|| anyhow!("frame '{}' not present in atlas manifest", name))
    }

    /// UV pairs for one frame, in the same strip order as `QUAD_POSITIONS`.
    /// V runs top-down, matching both the decoded image rows and WGPU's
    /// texture origin.
    pub fn frame_uvs(&self, name: &str) -> anyhow::Result<[[f32; 2]; 4]> {
        let f = self.frame(name)?;
        let (tw, th) = (self.meta.size.w, self.meta.size.h);
        let u0 = f.x / tw;
        let u1 = (f.x + f.w) / tw;
        let v_top = f.y / th;
        let v_bottom = (f.y + f.h) / th;
        Ok([[u0, v_bottom], [u1, v_bottom], [u0, v_top], [u1, v_top]])
    }

    /// Builds the button's vertex data: two quads sharing the unit-quad
    /// positions, the first textured with `normal`, the second with
    /// `active`. The draw call selects vertices 0..4 or 4..8.
    pub fn button_vertices(&self, normal: &str, active: &str) -> anyhow::Result<Vec<Vertex>> {
        let mut vertices = Vec::with_capacity(8);
        for name in [normal, active] {
            let uvs = self.frame_uvs(name)?;
            for (position, tex_coords) in QUAD_POSITIONS.iter().zip(uvs) {
                vertices.push(Vertex {
                    position: *position,
                    tex_coords,
                });
            }
        }
        Ok(vertices)
    }
}
