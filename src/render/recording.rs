use std::collections::VecDeque;

use anyhow::Result;
use glam::{IVec3, Mat4};

use super::common::Primitive;
use super::RenderBackend;
use crate::color::Color;
use crate::input::{InputSnapshot, Trigger};

/// One primitive submission as seen by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub primitive: Primitive,
    pub color: Color,
    pub vertices: Vec<IVec3>,
}

/// Headless backend that replays scripted input and records draw calls.
///
/// Once the script runs out every poll returns an empty snapshot.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    script: VecDeque<InputSnapshot>,
    background: Option<Color>,
    view: Option<Mat4>,
    pending: Vec<DrawCall>,
    last_frame: Vec<DrawCall>,
    frames_presented: u64,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: impl IntoIterator<Item = InputSnapshot>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Queues one snapshot for a future poll.
    pub fn push_input(&mut self, snapshot: InputSnapshot) {
        self.script.push_back(snapshot);
    }

    /// Queues a press followed by a release of `trigger`.
    pub fn push_press(&mut self, trigger: Trigger) {
        self.push_input(InputSnapshot::new().with(trigger));
        self.push_input(InputSnapshot::new());
    }

    pub fn remaining_inputs(&self) -> usize {
        self.script.len()
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn view(&self) -> Option<Mat4> {
        self.view
    }

    /// Draw calls of the most recently presented frame.
    pub fn last_frame(&self) -> &[DrawCall] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    fn record(&mut self, primitive: Primitive, color: Color, vertices: &[IVec3]) {
        self.pending.push(DrawCall {
            primitive,
            color,
            vertices: vertices.to_vec(),
        });
    }
}

impl RenderBackend for RecordingBackend {
    fn poll_input(&mut self) -> InputSnapshot {
        self.script.pop_front().unwrap_or_default()
    }

    fn clear(&mut self, background: Color) {
        self.background = Some(background);
        self.pending.clear();
    }

    fn set_view(&mut self, view: Mat4) {
        self.view = Some(view);
    }

    fn draw_lines(&mut self, color: Color, vertices: &[IVec3]) {
        self.record(Primitive::Lines, color, vertices);
    }

    fn draw_triangles(&mut self, color: Color, vertices: &[IVec3]) {
        self.record(Primitive::Triangles, color, vertices);
    }

    fn draw_quad_strip(&mut self, color: Color, vertices: &[IVec3]) {
        self.record(Primitive::QuadStrip, color, vertices);
    }

    fn present_frame(&mut self) -> Result<()> {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
        Ok(())
    }
}
