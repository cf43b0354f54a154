//! Rendering interface used by the scene loop, plus its implementations.
//!
//! The scene only ever talks to [`RenderBackend`]. The wgpu renderer drives
//! a real window, the [`RecordingBackend`] replays scripted input and keeps
//! the issued draw calls for inspection.

use anyhow::Result;
use glam::{IVec3, Mat4};

use crate::color::Color;
use crate::input::InputSnapshot;

pub mod common;
pub mod native;
pub mod recording;

pub use common::{Primitive, ViewParams};
pub use native::{Renderer, WindowBackend};
pub use recording::{DrawCall, RecordingBackend};

/// Everything the scene loop needs from the platform.
pub trait RenderBackend {
    /// Samples the keyboard and mouse state for this tick.
    fn poll_input(&mut self) -> InputSnapshot;

    /// Starts a new frame, clearing color and depth.
    fn clear(&mut self, background: Color);

    /// Publishes the camera transform used by subsequent draws.
    fn set_view(&mut self, view: Mat4);

    fn draw_lines(&mut self, color: Color, vertices: &[IVec3]);

    fn draw_triangles(&mut self, color: Color, vertices: &[IVec3]);

    fn draw_quad_strip(&mut self, color: Color, vertices: &[IVec3]);

    /// Makes the assembled frame visible in one step.
    fn present_frame(&mut self) -> Result<()>;
}
