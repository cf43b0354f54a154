//! Interactive 3D scene viewer.
//!
//! A fixed camera pans over a ground grid, coordinate axes, a static mesh
//! loaded from an OBJ file and procedurally spawned boxes that fall under
//! gravity. The scene loop only talks to [`render::RenderBackend`], so the
//! whole simulation runs headless against the recording backend as well as
//! in a wgpu window.

pub mod app;
pub mod camera;
pub mod color;
pub mod config;
pub mod input;
pub mod mesh;
pub mod obj;
pub mod overlay;
pub mod random;
pub mod render;
pub mod scene;
pub mod solid;

pub use app::{run_interactive, ViewerApp, WindowInitError};
pub use camera::{Camera, PanDirection};
pub use color::Color;
pub use config::ViewerConfig;
pub use input::{InputSnapshot, InputState, KeyCode, MouseButton, Trigger};
pub use mesh::{MeshState, StaticMesh};
pub use obj::{load_vertices, parse_vertices, MeshError};
pub use overlay::{Axes, Grid, Visibility};
pub use random::Randomizer;
pub use render::{RecordingBackend, RenderBackend, Renderer};
pub use scene::{help_text, print_help, LoopControl, SceneLoop, SceneState};
pub use solid::{ProceduralSolid, SolidRegistry};
