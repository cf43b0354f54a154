use std::ops::Range;

use glam::IVec3;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::overlay::Visibility;
use crate::random::Randomizer;
use crate::render::RenderBackend;

pub const SIZE_RANGE: Range<i32> = 3..7;
pub const HEIGHT_RANGE: Range<i32> = 40..60;
pub const RADIAL_RANGE: Range<i32> = 5..15;
/// Distance fallen per tick while gravity applies.
pub const GRAVITY_OFFSET: i32 = 1;

/// Corner selectors `(i, j, k)` in quad-strip order: bottom face, top face,
/// then the first two bottom corners again to close the strip.
const STRIP_CORNERS: [(i32, i32, i32); 10] = [
    (0, 0, 1),
    (0, 0, 0),
    (1, 0, 1),
    (1, 0, 0),
    (1, 1, 1),
    (1, 1, 0),
    (0, 1, 1),
    (0, 1, 0),
    (0, 0, 1),
    (0, 0, 0),
];

/// Size and placement of a generated box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolidDimensions {
    pub size: i32,
    pub height: i32,
    pub radial: i32,
}

impl SolidDimensions {
    pub fn random(rando: &mut Randomizer) -> Self {
        Self {
            size: rando.random_int(SIZE_RANGE),
            height: rando.random_int(HEIGHT_RANGE),
            radial: rando.random_int(RADIAL_RANGE),
        }
    }
}

/// Axis-aligned box that falls until it touches the ground.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProceduralSolid {
    vertices: [IVec3; 10],
    color: Color,
    visibility: Visibility,
    spawned_with_gravity: bool,
}

impl ProceduralSolid {
    /// Generates a box with random dimensions and color.
    pub fn spawn(rando: &mut Randomizer, gravity: bool) -> Self {
        let color = rando.random_color();
        let dimensions = SolidDimensions::random(rando);
        Self::from_dimensions(dimensions, color, gravity)
    }

    pub fn from_dimensions(dimensions: SolidDimensions, color: Color, gravity: bool) -> Self {
        let SolidDimensions {
            size,
            height,
            radial,
        } = dimensions;
        let vertices = STRIP_CORNERS.map(|(i, j, k)| {
            IVec3::new(i * size + radial, j * size + height, k * size + radial)
        });
        Self {
            vertices,
            color,
            visibility: Visibility::Shown,
            spawned_with_gravity: gravity,
        }
    }

    pub fn vertices(&self) -> &[IVec3] {
        &self.vertices
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Gravity flag that was current when the solid was spawned.
    pub fn spawned_with_gravity(&self) -> bool {
        self.spawned_with_gravity
    }

    pub fn toggle_visibility(&mut self) {
        self.visibility = self.visibility.toggled();
    }

    pub fn lowest_y(&self) -> i32 {
        self.vertices.iter().map(|v| v.y).min().unwrap_or_default()
    }

    /// True once any corner is at or below the ground plane.
    pub fn ground_collision_detected(&self) -> bool {
        self.vertices.iter().any(|v| v.y <= 0)
    }

    /// Moves the solid one step down if it is shown, gravity is on and it
    /// has not landed yet. Contact is judged before moving.
    pub fn update_position(&mut self, gravity: bool) {
        if self.visibility.is_shown() && gravity && !self.ground_collision_detected() {
            for vertex in &mut self.vertices {
                vertex.y -= GRAVITY_OFFSET;
            }
        }
    }

    pub fn draw(&self, backend: &mut dyn RenderBackend) {
        if self.visibility.is_shown() {
            backend.draw_quad_strip(self.color, &self.vertices);
        }
    }
}

/// Insertion-ordered collection of spawned solids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolidRegistry {
    solids: Vec<ProceduralSolid>,
}

impl SolidRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, rando: &mut Randomizer, gravity: bool) -> &ProceduralSolid {
        self.push(ProceduralSolid::spawn(rando, gravity))
    }

    pub fn push(&mut self, solid: ProceduralSolid) -> &ProceduralSolid {
        self.solids.push(solid);
        &self.solids[self.solids.len() - 1]
    }

    pub fn clear(&mut self) {
        self.solids.clear();
    }

    pub fn len(&self) -> usize {
        self.solids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProceduralSolid> {
        self.solids.iter()
    }

    pub fn update_all(&mut self, gravity: bool) {
        for solid in &mut self.solids {
            solid.update_position(gravity);
        }
    }

    pub fn draw_all(&self, backend: &mut dyn RenderBackend) {
        for solid in &self.solids {
            solid.draw(backend);
        }
    }
}
