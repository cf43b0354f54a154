use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::render::RenderBackend;

/// Length of each axis, from the origin.
pub const AXIS_LENGTH: i32 = 75;
/// Spacing between neighbouring grid lines.
pub const GRID_STEP: i32 = 10;
/// Number of grid steps on each side of the origin.
pub const GRID_UNITS: i32 = 50;
const GRID_EXTENT: i32 = GRID_STEP * GRID_UNITS;
// Keeps grid lines off the axes so both stay visible.
const GRID_MICRO_OFFSET: i32 = 1;

/// Whether an entity takes part in rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Shown,
    Hidden,
}

impl Visibility {
    pub fn toggled(self) -> Self {
        match self {
            Self::Shown => Self::Hidden,
            Self::Hidden => Self::Shown,
        }
    }

    pub fn is_shown(self) -> bool {
        self == Self::Shown
    }
}

/// Red X, green Y and blue Z axes drawn from the origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Axes {
    visibility: Visibility,
}

impl Axes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn show(&mut self) {
        self.visibility = Visibility::Shown;
    }

    pub fn hide(&mut self) {
        self.visibility = Visibility::Hidden;
    }

    pub fn toggle_visibility(&mut self) {
        self.visibility = self.visibility.toggled();
    }

    pub fn draw(&self, backend: &mut dyn RenderBackend) {
        if !self.visibility.is_shown() {
            return;
        }
        let axes = [
            (Color::RED, IVec3::X),
            (Color::FOREST_GREEN, IVec3::Y),
            (Color::ROYAL_BLUE, IVec3::Z),
        ];
        for (color, direction) in axes {
            backend.draw_lines(color, &[IVec3::ZERO, direction * AXIS_LENGTH]);
        }
    }
}

/// Flat ground grid on the `y = 0` plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    color: Color,
    visibility: Visibility,
    lines: Vec<IVec3>,
}

impl Grid {
    pub fn new() -> Self {
        Self::with_color(Color::WHITE_SMOKE)
    }

    pub fn with_color(color: Color) -> Self {
        Self {
            color,
            visibility: Visibility::Shown,
            lines: grid_lines(),
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn show(&mut self) {
        self.visibility = Visibility::Shown;
    }

    pub fn hide(&mut self) {
        self.visibility = Visibility::Hidden;
    }

    pub fn toggle_visibility(&mut self) {
        self.visibility = self.visibility.toggled();
    }

    /// Line endpoints, two per segment.
    pub fn lines(&self) -> &[IVec3] {
        &self.lines
    }

    pub fn draw(&self, backend: &mut dyn RenderBackend) {
        if self.visibility.is_shown() {
            backend.draw_lines(self.color, &self.lines);
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

fn grid_lines() -> Vec<IVec3> {
    let mut lines = Vec::new();
    for i in (-GRID_EXTENT..=GRID_EXTENT).step_by(GRID_STEP as usize) {
        let offset = i + GRID_MICRO_OFFSET;
        lines.extend_from_slice(&[
            IVec3::new(offset, 0, GRID_EXTENT),
            IVec3::new(offset, 0, -GRID_EXTENT),
            IVec3::new(GRID_EXTENT, 0, offset),
            IVec3::new(-GRID_EXTENT, 0, offset),
        ]);
    }
    lines
}
