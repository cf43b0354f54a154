use std::path::Path;

use glam::IVec3;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::obj::{self, MeshError};
use crate::render::RenderBackend;

/// Lifecycle of the static mesh. `Failed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshState {
    Shown,
    Hidden,
    Failed,
}

/// Static triangle mesh loaded once from an OBJ file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticMesh {
    vertices: Vec<IVec3>,
    color: Color,
    state: MeshState,
}

impl StaticMesh {
    /// Loads the mesh, degrading to the `Failed` state instead of erroring.
    pub fn load<P: AsRef<Path>>(path: P, scale: f32, color: Color) -> Self {
        let path = path.as_ref();
        let result = obj::load_vertices(path, scale).and_then(|vertices| {
            if vertices.is_empty() {
                Err(MeshError::EmptyResource {
                    path: path.to_path_buf(),
                })
            } else {
                Ok(vertices)
            }
        });
        Self::from_result(result, color)
    }

    /// Builds the mesh from an already attempted load.
    pub fn from_result(result: Result<Vec<IVec3>, MeshError>, color: Color) -> Self {
        match result {
            Ok(vertices) if !vertices.is_empty() => {
                info!("3D object loaded - {} vertices available", vertices.len());
                Self {
                    vertices,
                    color,
                    state: MeshState::Hidden,
                }
            }
            Ok(_) => {
                warn!("mesh creation failed: no vertex coordinates found");
                Self::failed(color)
            }
            Err(err @ MeshError::EmptyResource { .. }) => {
                warn!("mesh creation failed: {err}");
                Self::failed(color)
            }
            Err(err @ MeshError::ResourceMissing { .. }) => {
                error!("ERROR: {err}");
                Self::failed(color)
            }
        }
    }

    fn failed(color: Color) -> Self {
        Self {
            vertices: Vec::new(),
            color,
            state: MeshState::Failed,
        }
    }

    pub fn state(&self) -> MeshState {
        self.state
    }

    pub fn load_failed(&self) -> bool {
        self.state == MeshState::Failed
    }

    pub fn is_visible(&self) -> bool {
        self.state == MeshState::Shown
    }

    pub fn vertices(&self) -> &[IVec3] {
        &self.vertices
    }

    pub fn toggle_visibility(&mut self) {
        self.state = match self.state {
            MeshState::Shown => MeshState::Hidden,
            MeshState::Hidden => MeshState::Shown,
            MeshState::Failed => MeshState::Failed,
        };
    }

    pub fn draw(&self, backend: &mut dyn RenderBackend) {
        if self.is_visible() {
            backend.draw_triangles(self.color, &self.vertices);
        }
    }
}
