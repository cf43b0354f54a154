use glam::IVec3;
use scene_viewer::render::Primitive;
use scene_viewer::{
    Color, InputSnapshot, LoopControl, MeshState, MouseButton, RecordingBackend, Randomizer,
    SceneLoop, SceneState, StaticMesh, Trigger,
};

const SPAWN: Trigger = Trigger::Mouse(MouseButton::LEFT);
const CLEAR: Trigger = Trigger::Mouse(MouseButton::RIGHT);

fn gravity() -> Trigger {
    Trigger::from_name("G").unwrap()
}

fn scene(seed: u64) -> SceneLoop {
    let mesh = StaticMesh::from_result(
        Ok(vec![IVec3::ZERO, IVec3::new(50, 0, 0), IVec3::new(0, 50, 0)]),
        Color::YELLOW,
    );
    SceneLoop::with_state(
        SceneState::new(mesh, Color::DEFAULT_BACKGROUND),
        Randomizer::seeded(seed),
    )
}

fn run(scene: &mut SceneLoop, backend: &mut RecordingBackend, ticks: usize) {
    for _ in 0..ticks {
        assert_eq!(scene.tick(backend).unwrap(), LoopControl::Continue);
    }
}

fn lowest(scene: &SceneLoop) -> Vec<i32> {
    scene.state().solids.iter().map(|s| s.lowest_y()).collect()
}

#[test]
fn spawn_three_then_clear() {
    let mut scene = scene(1);
    let mut backend = RecordingBackend::new();
    for _ in 0..3 {
        backend.push_press(SPAWN);
    }
    run(&mut scene, &mut backend, 6);
    assert_eq!(scene.state().solids.len(), 3);

    backend.push_press(CLEAR);
    run(&mut scene, &mut backend, 2);
    assert!(scene.state().solids.is_empty());
    assert!(backend
        .last_frame()
        .iter()
        .all(|call| call.primitive != Primitive::QuadStrip));
}

#[test]
fn solids_fall_until_they_touch_the_ground() {
    let mut scene = scene(2);
    let mut backend = RecordingBackend::new();
    backend.push_press(SPAWN);
    run(&mut scene, &mut backend, 1);
    let start = lowest(&scene)[0];
    assert!((39..59).contains(&start), "fell once on the spawn tick");

    run(&mut scene, &mut backend, start as usize);
    assert_eq!(lowest(&scene), vec![0]);
    assert!(scene.state().solids.iter().all(|s| s.ground_collision_detected()));

    let landed: Vec<IVec3> = scene.state().solids.iter().next().unwrap().vertices().to_vec();
    run(&mut scene, &mut backend, 5);
    assert_eq!(
        scene.state().solids.iter().next().unwrap().vertices(),
        landed.as_slice()
    );
}

#[test]
fn gravity_off_freezes_solids_mid_fall() {
    let mut scene = scene(3);
    let mut backend = RecordingBackend::new();
    backend.push_press(SPAWN);
    run(&mut scene, &mut backend, 5);
    let before = lowest(&scene);

    backend.push_press(gravity());
    run(&mut scene, &mut backend, 10);
    assert!(!scene.state().gravity);
    assert_eq!(lowest(&scene), before);

    backend.push_press(gravity());
    run(&mut scene, &mut backend, 3);
    assert!(scene.state().gravity);
    assert_eq!(lowest(&scene)[0], before[0] - 3);
}

#[test]
fn holding_a_toggle_fires_once() {
    let mut scene = scene(4);
    let held = InputSnapshot::new().with(SPAWN);
    let mut backend = RecordingBackend::with_script(std::iter::repeat(held).take(20));
    run(&mut scene, &mut backend, 20);
    assert_eq!(scene.state().solids.len(), 1);
}

#[test]
fn every_tick_presents_one_frame_in_draw_order() {
    let mut scene = scene(5);
    let mut backend = RecordingBackend::new();
    backend.push_press(Trigger::from_name("O").unwrap());
    backend.push_press(SPAWN);
    backend.push_press(SPAWN);
    run(&mut scene, &mut backend, 8);
    assert_eq!(backend.frames_presented(), 8);

    let frame = backend.last_frame();
    let order: Vec<Primitive> = frame.iter().map(|call| call.primitive).collect();
    assert_eq!(order[..4], [Primitive::Lines; 4]);
    assert_eq!(order[4], Primitive::Triangles);
    assert_eq!(order[5..], [Primitive::QuadStrip; 2]);
    assert_eq!(frame[4].color, Color::YELLOW);
    assert_eq!(backend.background(), Some(Color::DEFAULT_BACKGROUND));
}

#[test]
fn hidden_overlays_and_panning() {
    let mut scene = scene(6);
    let mut backend = RecordingBackend::new();
    backend.push_press(Trigger::from_name("V").unwrap());
    backend.push_press(Trigger::from_name("K").unwrap());
    let forward = InputSnapshot::new().with(Trigger::from_name("W").unwrap());
    for _ in 0..3 {
        backend.push_input(forward.clone());
    }
    let initial = scene.state().camera.clone();
    run(&mut scene, &mut backend, 7);

    assert!(backend.last_frame().is_empty());
    let camera = &scene.state().camera;
    assert_eq!(camera.eye().x, initial.eye().x - 3.0);
    assert_eq!(camera.target().x, initial.target().x - 3.0);
    assert_eq!(backend.view(), Some(camera.view_matrix()));
}

#[test]
fn mesh_toggle_on_a_failed_mesh_draws_nothing() {
    let mut scene = SceneLoop::with_state(
        SceneState::new(
            StaticMesh::from_result(Ok(Vec::new()), Color::YELLOW),
            Color::DEFAULT_BACKGROUND,
        ),
        Randomizer::seeded(7),
    );
    let mut backend = RecordingBackend::new();
    backend.push_press(Trigger::from_name("O").unwrap());
    backend.push_press(Trigger::from_name("O").unwrap());
    backend.push_press(Trigger::from_name("O").unwrap());
    for _ in 0..6 {
        scene.tick(&mut backend).unwrap();
        assert_eq!(scene.state().mesh.state(), MeshState::Failed);
        assert!(backend
            .last_frame()
            .iter()
            .all(|call| call.primitive != Primitive::Triangles));
    }
}
