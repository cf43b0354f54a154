use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Distance covered by one pan command.
pub const MOVEMENT_UNIT: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanDirection {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl PanDirection {
    /// World-space offset applied to both eye and target.
    pub fn offset(self) -> Vec3 {
        match self {
            Self::Forward => Vec3::new(-MOVEMENT_UNIT, 0.0, 0.0),
            Self::Backward => Vec3::new(MOVEMENT_UNIT, 0.0, 0.0),
            Self::Left => Vec3::new(0.0, 0.0, MOVEMENT_UNIT),
            Self::Right => Vec3::new(0.0, 0.0, -MOVEMENT_UNIT),
            Self::Up => Vec3::new(0.0, MOVEMENT_UNIT, 0.0),
            Self::Down => Vec3::new(0.0, -MOVEMENT_UNIT, 0.0),
        }
    }
}

/// Look-at camera that only ever pans.
///
/// The view matrix is derived from `(eye, target, up)` and recomputed after
/// every move. `up` must not be parallel to the viewing direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    eye: Vec3,
    target: Vec3,
    up: Vec3,
    view: Mat4,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            eye,
            target,
            up,
            view: Mat4::look_at_rh(eye, target, up),
        }
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// View transform for the current pose.
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn pan(&mut self, direction: PanDirection) {
        let offset = direction.offset();
        self.eye += offset;
        self.target += offset;
        self.view = Mat4::look_at_rh(self.eye, self.target, self.up);
    }

    pub fn move_forward(&mut self) {
        self.pan(PanDirection::Forward);
    }

    pub fn move_backward(&mut self) {
        self.pan(PanDirection::Backward);
    }

    pub fn move_left(&mut self) {
        self.pan(PanDirection::Left);
    }

    pub fn move_right(&mut self) {
        self.pan(PanDirection::Right);
    }

    pub fn move_up(&mut self) {
        self.pan(PanDirection::Up);
    }

    pub fn move_down(&mut self) {
        self.pan(PanDirection::Down);
    }
}

impl Default for Camera {
    /// Elevated three-quarter view looking at the origin area.
    fn default() -> Self {
        Self::new(
            Vec3::new(200.0, 175.0, 25.0),
            Vec3::new(0.0, 25.0, 0.0),
            Vec3::Y,
        )
    }
}
