use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::obj::IMPORT_SCALE;

/// Fixed settings of the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// OBJ file loaded as the static mesh, relative to the working directory.
    pub mesh_path: PathBuf,
    pub import_scale: f32,
    pub mesh_color: Color,
    pub background: Color,
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            mesh_path: PathBuf::from("assets/slime.obj"),
            import_scale: IMPORT_SCALE,
            mesh_color: Color::YELLOW,
            background: Color::DEFAULT_BACKGROUND,
            window_title: "Scene Viewer".to_string(),
            window_width: 1280,
            window_height: 768,
        }
    }
}
