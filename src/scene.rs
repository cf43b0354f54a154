use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use log::{debug, info};

use crate::camera::Camera;
use crate::color::Color;
use crate::config::ViewerConfig;
use crate::input::{Action, InputSnapshot, DEFAULT_BINDINGS};
use crate::mesh::StaticMesh;
use crate::overlay::{Axes, Grid};
use crate::random::Randomizer;
use crate::render::RenderBackend;
use crate::solid::SolidRegistry;

/// Whether the loop should keep running after the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Everything the update phase mutates and the render phase reads.
#[derive(Debug, Clone)]
pub struct SceneState {
    pub camera: Camera,
    pub axes: Axes,
    pub grid: Grid,
    pub mesh: StaticMesh,
    pub solids: SolidRegistry,
    pub gravity: bool,
    pub background: Color,
    pub debug_marker: bool,
    default_background: Color,
}

impl SceneState {
    pub fn new(mesh: StaticMesh, background: Color) -> Self {
        Self {
            camera: Camera::default(),
            axes: Axes::new(),
            grid: Grid::new(),
            mesh,
            solids: SolidRegistry::new(),
            gravity: true,
            background,
            debug_marker: false,
            default_background: background,
        }
    }

    /// Loads the static mesh named by the configuration.
    pub fn from_config(config: &ViewerConfig) -> Self {
        let mesh = StaticMesh::load(&config.mesh_path, config.import_scale, config.mesh_color);
        Self::new(mesh, config.background)
    }

    /// Restores the background and shows both overlays.
    pub fn reset(&mut self) {
        self.background = self.default_background;
        self.axes.show();
        self.grid.show();
    }

    fn apply(&mut self, action: Action, rando: &mut Randomizer) -> LoopControl {
        match action {
            Action::Exit => return LoopControl::Exit,
            Action::Help => print_help(),
            Action::Reset => self.reset(),
            Action::ToggleAxes => self.axes.toggle_visibility(),
            Action::RandomBackground => self.background = rando.random_color(),
            Action::ToggleGrid => self.grid.toggle_visibility(),
            Action::ToggleMesh => self.mesh.toggle_visibility(),
            Action::PanForward => self.camera.move_forward(),
            Action::PanBackward => self.camera.move_backward(),
            Action::PanLeft => self.camera.move_left(),
            Action::PanRight => self.camera.move_right(),
            Action::PanUp => self.camera.move_up(),
            Action::PanDown => self.camera.move_down(),
            Action::ToggleDebugMarker => self.debug_marker = !self.debug_marker,
            Action::SpawnSolid => {
                let solid = self.solids.spawn(rando, self.gravity);
                debug!("spawned solid at height {}", solid.lowest_y());
            }
            Action::ClearSolids => {
                debug!("clearing {} solid(s)", self.solids.len());
                self.solids.clear();
            }
            Action::ToggleGravity => {
                self.gravity = !self.gravity;
                info!("gravity {}", if self.gravity { "on" } else { "off" });
            }
        }
        LoopControl::Continue
    }
}

/// Applies every binding that fires this tick, then steps the physics.
///
/// `previous` must be the snapshot of the prior tick; the caller swaps it
/// only after this returns.
pub fn update_phase(
    state: &mut SceneState,
    rando: &mut Randomizer,
    previous: &InputSnapshot,
    current: &InputSnapshot,
) -> LoopControl {
    let mut control = LoopControl::Continue;
    for binding in DEFAULT_BINDINGS
        .iter()
        .filter(|binding| binding.fires(previous, current))
    {
        if state.apply(binding.action, rando) == LoopControl::Exit {
            control = LoopControl::Exit;
        }
    }
    state.solids.update_all(state.gravity);
    control
}

/// Issues one complete frame: grid, axes, mesh, then solids in spawn order.
pub fn render_phase(state: &SceneState, backend: &mut dyn RenderBackend) -> Result<()> {
    backend.clear(state.background);
    backend.set_view(state.camera.view_matrix());
    state.grid.draw(backend);
    state.axes.draw(backend);
    state.mesh.draw(backend);
    state.solids.draw_all(backend);
    backend.present_frame()
}

/// Drives update and render phases tick by tick.
#[derive(Debug)]
pub struct SceneLoop {
    state: SceneState,
    randomizer: Randomizer,
    previous: InputSnapshot,
    updates: u64,
    frames: u64,
}

impl SceneLoop {
    pub fn new(config: &ViewerConfig) -> Self {
        Self::with_state(SceneState::from_config(config), Randomizer::new())
    }

    pub fn with_state(state: SceneState, randomizer: Randomizer) -> Self {
        Self {
            state,
            randomizer,
            previous: InputSnapshot::new(),
            updates: 0,
            frames: 0,
        }
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SceneState {
        &mut self.state
    }

    pub fn updates(&self) -> u64 {
        self.updates
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn update(&mut self, current: InputSnapshot) -> LoopControl {
        self.updates += 1;
        if self.state.debug_marker {
            timestamp("update", self.updates);
        }
        let control = update_phase(
            &mut self.state,
            &mut self.randomizer,
            &self.previous,
            &current,
        );
        self.previous = current;
        control
    }

    pub fn render(&mut self, backend: &mut dyn RenderBackend) -> Result<()> {
        self.frames += 1;
        if self.state.debug_marker {
            timestamp("render", self.frames);
        }
        render_phase(&self.state, backend)
    }

    /// Polls input, updates, renders. An exit request still finishes the
    /// current frame.
    pub fn tick(&mut self, backend: &mut dyn RenderBackend) -> Result<LoopControl> {
        let input = backend.poll_input();
        let control = self.update(input);
        self.render(backend)?;
        Ok(control)
    }
}

fn timestamp(source: &str, counter: u64) {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    info!("{}", marker_message(source, counter, now));
}

/// Debug marker line with a UTC wall clock down to a tenth of a millisecond.
pub fn marker_message(source: &str, counter: u64, since_epoch: Duration) -> String {
    let secs = since_epoch.as_secs() % 86_400;
    format!(
        "TSTAMP from <{source}> on iteration <{counter}>: {:02}:{:02}:{:02}.{:04}",
        secs / 3600,
        secs / 60 % 60,
        secs % 60,
        since_epoch.subsec_micros() / 100
    )
}

/// Command reference built from the binding table.
pub fn help_text() -> String {
    let mut text = String::from("\n      COMMANDS\n");
    for binding in &DEFAULT_BINDINGS {
        text.push_str(&format!(" ({}) - {}\n", binding.label(), binding.description));
    }
    text
}

pub fn print_help() {
    print!("{}", help_text());
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;

    use crate::input::{KeyCode, MouseButton, Trigger};
    use crate::mesh::MeshState;
    use crate::render::{Primitive, RecordingBackend};

    fn key(ch: char) -> InputSnapshot {
        InputSnapshot::new().with_key(KeyCode::Character(ch))
    }

    fn scene() -> SceneLoop {
        let mesh = StaticMesh::from_result(
            Ok(vec![IVec3::ZERO, IVec3::X, IVec3::Y]),
            Color::YELLOW,
        );
        SceneLoop::with_state(
            SceneState::new(mesh, Color::DEFAULT_BACKGROUND),
            Randomizer::seeded(5),
        )
    }

    #[test]
    fn toggles_fire_once_per_press() {
        let mut scene = scene();
        for _ in 0..5 {
            scene.update(key('K'));
        }
        assert!(!scene.state().axes.visibility().is_shown());
        scene.update(InputSnapshot::new());
        scene.update(key('K'));
        assert!(scene.state().axes.visibility().is_shown());
    }

    #[test]
    fn pan_fires_every_held_tick() {
        let mut scene = scene();
        let start = scene.state().camera.eye();
        for _ in 0..4 {
            scene.update(key('W'));
        }
        assert_eq!(scene.state().camera.eye().x, start.x - 4.0);
    }

    #[test]
    fn previous_snapshot_is_the_prior_tick() {
        let mut state = scene().state().clone();
        let mut rando = Randomizer::seeded(1);
        let held = key('V');
        // Comparing a snapshot against itself never produces an edge.
        update_phase(&mut state, &mut rando, &held, &held);
        assert!(state.grid.visibility().is_shown());
        update_phase(&mut state, &mut rando, &InputSnapshot::new(), &held);
        assert!(!state.grid.visibility().is_shown());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut scene = scene();
        scene.update(key('B').with_key(KeyCode::Character('K')).with_key(KeyCode::Character('V')));
        assert!(!scene.state().grid.visibility().is_shown());
        scene.update(key('R'));
        let state = scene.state();
        assert_eq!(state.background, Color::DEFAULT_BACKGROUND);
        assert!(state.axes.visibility().is_shown());
        assert!(state.grid.visibility().is_shown());
    }

    #[test]
    fn spawn_uses_gravity_from_before_the_toggle() {
        let mut scene = scene();
        scene.update(
            InputSnapshot::new()
                .with_button(MouseButton::LEFT)
                .with_key(KeyCode::Character('G')),
        );
        let state = scene.state();
        assert!(!state.gravity);
        let solid = state.solids.iter().next().unwrap();
        assert!(solid.spawned_with_gravity());
    }

    #[test]
    fn exit_is_level_triggered_and_finishes_the_frame() {
        let escape = Trigger::Key(KeyCode::from_name("Escape").unwrap());
        let mut backend = RecordingBackend::with_script([
            InputSnapshot::new().with(escape),
            InputSnapshot::new().with(escape),
        ]);
        let mut scene = scene();
        assert_eq!(scene.tick(&mut backend).unwrap(), LoopControl::Exit);
        assert_eq!(backend.frames_presented(), 1);
        assert_eq!(scene.tick(&mut backend).unwrap(), LoopControl::Exit);
    }

    #[test]
    fn render_order_is_fixed() {
        let mut scene = scene();
        let mut backend = RecordingBackend::new();
        backend.push_input(key('O'));
        backend.push_press(Trigger::Mouse(MouseButton::LEFT));
        for _ in 0..3 {
            scene.tick(&mut backend).unwrap();
        }
        assert_eq!(scene.state().mesh.state(), MeshState::Shown);
        let primitives: Vec<Primitive> = backend
            .last_frame()
            .iter()
            .map(|call| call.primitive)
            .collect();
        assert_eq!(
            primitives,
            vec![
                Primitive::Lines,
                Primitive::Lines,
                Primitive::Lines,
                Primitive::Lines,
                Primitive::Triangles,
                Primitive::QuadStrip,
            ]
        );
        assert_eq!(backend.last_frame()[0].color, Color::WHITE_SMOKE);
        assert_eq!(backend.view(), Some(scene.state().camera.view_matrix()));
        assert_eq!(scene.updates(), 3);
        assert_eq!(scene.frames(), 3);
    }

    #[test]
    fn background_key_draws_the_next_random_color() {
        let expected = Randomizer::seeded(5).random_color();
        let mut scene = scene();
        let mut backend = RecordingBackend::new();
        backend.push_press(Trigger::Key(KeyCode::Character('B')));
        scene.tick(&mut backend).unwrap();
        assert_eq!(scene.state().background, expected);
        assert_eq!(backend.background(), Some(expected));

        scene.tick(&mut backend).unwrap();
        assert_eq!(scene.state().background, expected, "released key draws nothing");
    }

    #[test]
    fn markers_carry_sub_second_time() {
        let at = Duration::new(86_400 * 3 + 13 * 3600 + 7 * 60 + 9, 123_456_789);
        assert_eq!(
            marker_message("update", 42, at),
            "TSTAMP from <update> on iteration <42>: 13:07:09.1234"
        );
        let later = at + Duration::from_micros(300);
        assert_ne!(
            marker_message("render", 1, at),
            marker_message("render", 1, later)
        );
    }

    #[test]
    fn debug_marker_toggles() {
        let mut scene = scene();
        scene.update(key('L'));
        assert!(scene.state().debug_marker);
        scene.update(InputSnapshot::new());
        scene.update(key('L'));
        assert!(!scene.state().debug_marker);
    }

    #[test]
    fn help_lists_every_binding() {
        let text = help_text();
        assert_eq!(text.lines().filter(|line| line.starts_with(" (")).count(), 17);
        assert!(text.contains(" (G) - toggle gravity"));
        assert!(text.contains(" (Mouse2) - clear all solids"));
    }
}
