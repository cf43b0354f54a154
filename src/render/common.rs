use std::f32::consts::FRAC_PI_4;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::{IVec3, Mat4};

use crate::color::Color;

const NEAR_PLANE: f32 = 1.0;
const FAR_PLANE: f32 = 1024.0;

/// Primitive kinds the scene submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Lines,
    Triangles,
    QuadStrip,
}

/// Camera parameters consumed by the renderer's uniform buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewParams {
    pub view: Mat4,
    pub projection: Mat4,
}

impl ViewParams {
    /// 45 degree perspective matching the window aspect ratio.
    pub fn perspective(view: Mat4, width: u32, height: u32) -> Self {
        let aspect = if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        };
        Self {
            view,
            projection: Mat4::perspective_rh(FRAC_PI_4, aspect.max(0.01), NEAR_PLANE, FAR_PLANE),
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Vertex layout shared by every pipeline.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ColoredVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl ColoredVertex {
    pub fn new(position: IVec3, color: Color) -> Self {
        Self {
            position: position.as_vec3().to_array(),
            color: color.to_rgb_f32(),
        }
    }
}

/// GPU topology a batch is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    LineList,
    TriangleList,
}

/// Contiguous run of vertices sharing a topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub topology: Topology,
    pub range: Range<u32>,
}

/// CPU-side assembly of one frame, in submission order.
#[derive(Debug, Clone, Default)]
pub struct FrameBuilder {
    vertices: Vec<ColoredVertex>,
    batches: Vec<Batch>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.batches.clear();
    }

    pub fn vertices(&self) -> &[ColoredVertex] {
        &self.vertices
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn push(&mut self, primitive: Primitive, color: Color, vertices: &[IVec3]) {
        match primitive {
            Primitive::Lines => {
                let usable = vertices.len() - vertices.len() % 2;
                self.append(Topology::LineList, color, &vertices[..usable]);
            }
            Primitive::Triangles => {
                let usable = vertices.len() - vertices.len() % 3;
                self.append(Topology::TriangleList, color, &vertices[..usable]);
            }
            Primitive::QuadStrip => {
                let triangles = quad_strip_to_triangles(vertices);
                self.append(Topology::TriangleList, color, &triangles);
            }
        }
    }

    fn append(&mut self, topology: Topology, color: Color, vertices: &[IVec3]) {
        if vertices.is_empty() {
            return;
        }
        let start = self.vertices.len() as u32;
        self.vertices
            .extend(vertices.iter().map(|&v| ColoredVertex::new(v, color)));
        let end = self.vertices.len() as u32;
        // Merge with the previous batch so a frame needs few pipeline switches.
        match self.batches.last_mut() {
            Some(last) if last.topology == topology && last.range.end == start => {
                last.range.end = end;
            }
            _ => self.batches.push(Batch {
                topology,
                range: start..end,
            }),
        }
    }
}

/// Expands a quad strip into a triangle list.
///
/// Quad `i` uses strip vertices `2i, 2i+1, 2i+3, 2i+2`. A trailing odd
/// vertex is ignored.
pub fn quad_strip_to_triangles(strip: &[IVec3]) -> Vec<IVec3> {
    let pairs = strip.len() / 2;
    let mut triangles = Vec::with_capacity(pairs.saturating_sub(1) * 6);
    for quad in 0..pairs.saturating_sub(1) {
        let a = strip[2 * quad];
        let b = strip[2 * quad + 1];
        let c = strip[2 * quad + 3];
        let d = strip[2 * quad + 2];
        triangles.extend_from_slice(&[a, b, c, a, c, d]);
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(len: i32) -> Vec<IVec3> {
        (0..len).map(|i| IVec3::new(i, 0, 0)).collect()
    }

    #[test]
    fn quad_strip_expands_to_two_triangles_per_quad() {
        let triangles = quad_strip_to_triangles(&strip(6));
        let xs: Vec<i32> = triangles.iter().map(|v| v.x).collect();
        assert_eq!(xs, vec![0, 1, 3, 0, 3, 2, 2, 3, 5, 2, 5, 4]);
    }

    #[test]
    fn degenerate_strips_produce_nothing() {
        assert!(quad_strip_to_triangles(&strip(0)).is_empty());
        assert!(quad_strip_to_triangles(&strip(3)).is_empty());
        assert_eq!(quad_strip_to_triangles(&strip(5)).len(), 6);
    }

    #[test]
    fn frame_builder_merges_adjacent_batches() {
        let mut frame = FrameBuilder::new();
        frame.push(Primitive::Lines, Color::RED, &strip(2));
        frame.push(Primitive::Lines, Color::ROYAL_BLUE, &strip(3));
        frame.push(Primitive::Triangles, Color::YELLOW, &strip(4));
        frame.push(Primitive::QuadStrip, Color::WHITE_SMOKE, &strip(4));
        frame.push(Primitive::Lines, Color::RED, &strip(2));

        assert_eq!(
            frame.batches(),
            &[
                Batch {
                    topology: Topology::LineList,
                    range: 0..4,
                },
                Batch {
                    topology: Topology::TriangleList,
                    range: 4..13,
                },
                Batch {
                    topology: Topology::LineList,
                    range: 13..15,
                },
            ]
        );
        assert_eq!(frame.vertices()[2].color, Color::ROYAL_BLUE.to_rgb_f32());

        frame.clear();
        assert!(frame.vertices().is_empty());
        assert!(frame.batches().is_empty());
    }

    #[test]
    fn projection_handles_zero_height() {
        let params = ViewParams::perspective(Mat4::IDENTITY, 1280, 0);
        assert!(params.view_proj().is_finite());
    }
}
