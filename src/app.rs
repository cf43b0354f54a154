use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};
use pollster::block_on;
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::ViewerConfig;
use crate::input::{InputState, KeyCode, MouseButton};
use crate::render::{Renderer, WindowBackend};
use crate::scene::{LoopControl, SceneLoop};

/// The windowing system could not be brought up.
#[derive(Debug, Error)]
#[error("failed to initialize {stage}: {message}")]
pub struct WindowInitError {
    stage: &'static str,
    message: String,
}

impl WindowInitError {
    pub fn from_panic(stage: &'static str, panic: Box<dyn Any + Send>) -> Self {
        Self {
            stage,
            message: panic_message(panic),
        }
    }

    pub fn from_error(stage: &'static str, err: impl fmt::Display) -> Self {
        Self {
            stage,
            message: err.to_string(),
        }
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    match panic.downcast::<String>() {
        Ok(msg) => *msg,
        Err(panic) => match panic.downcast::<&'static str>() {
            Ok(msg) => (*msg).to_string(),
            Err(_) => "unknown panic".into(),
        },
    }
}

/// Window application: forwards events into the input board and runs one
/// scene tick per redraw.
pub struct ViewerApp {
    config: ViewerConfig,
    scene: SceneLoop,
    input: Arc<InputState>,
    renderer: Option<Renderer>,
    last_error: Option<anyhow::Error>,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig, scene: SceneLoop) -> Self {
        Self {
            config,
            scene,
            input: Arc::new(InputState::new()),
            renderer: None,
            last_error: None,
        }
    }

    pub fn scene(&self) -> &SceneLoop {
        &self.scene
    }

    fn create_renderer(&self, event_loop: &ActiveEventLoop) -> Result<Renderer> {
        let attributes = Window::default_attributes()
            .with_title(self.config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window_width as f64,
                self.config.window_height as f64,
            ));
        let window = event_loop
            .create_window(attributes)
            .map_err(|err| WindowInitError::from_error("window", err))?;
        block_on(Renderer::new(Arc::new(window))).context("failed to create renderer")
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.last_error = Some(err);
        event_loop.exit();
    }

    fn handle_mouse_button(&self, state: ElementState, button: WinitMouseButton) {
        let index = match button {
            WinitMouseButton::Left => 0,
            WinitMouseButton::Right => 1,
            WinitMouseButton::Middle => 2,
            WinitMouseButton::Back => 3,
            WinitMouseButton::Forward => 4,
            WinitMouseButton::Other(value) => value.min(u8::MAX as u16) as u8,
        };
        let button = MouseButton::new(index);
        match state {
            ElementState::Pressed => self.input.set_mouse_button_down(button),
            ElementState::Released => self.input.set_mouse_button_up(button),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let mut backend = WindowBackend::new(renderer, &self.input);
        match self.scene.tick(&mut backend) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => {
                info!("exit requested after {} tick(s)", self.scene.updates());
                event_loop.exit();
            }
            Err(err) => self.fail(event_loop, err),
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        match self.create_renderer(event_loop) {
            Ok(renderer) => {
                renderer.window().request_redraw();
                self.renderer = Some(renderer);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.renderer.as_ref().map(Renderer::window_id) != Some(id) {
            return;
        }
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let Some(key) = map_keycode(code) else {
                    return;
                };
                match event.state {
                    ElementState::Pressed => self.input.set_key_down(key),
                    ElementState::Released => self.input.set_key_up(key),
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_button(state, button);
            }
            WindowEvent::Focused(false) => self.input.release_all(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(renderer) = &self.renderer {
            renderer.window().request_redraw();
        }
    }
}

/// Opens the window and runs the scene until it exits. Returns the scene so
/// the caller can report its final state.
pub fn run_interactive(config: ViewerConfig) -> Result<SceneLoop> {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let event_loop = panic::catch_unwind(AssertUnwindSafe(EventLoop::new));
    panic::set_hook(default_hook);
    let event_loop = event_loop
        .map_err(|panic| WindowInitError::from_panic("event loop", panic))?
        .map_err(|err| WindowInitError::from_error("event loop", err))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let scene = SceneLoop::new(&config);
    let mut app = ViewerApp::new(config, scene);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated abnormally")?;

    if let Some(err) = app.last_error {
        return Err(err);
    }
    if app.renderer.is_none() {
        warn!("event loop finished before a window was created");
    }
    Ok(app.scene)
}

fn map_keycode(code: WinitKeyCode) -> Option<KeyCode> {
    use WinitKeyCode as Key;
    Some(match code {
        Key::Escape => KeyCode::Escape,
        Key::KeyA => KeyCode::Character('A'),
        Key::KeyB => KeyCode::Character('B'),
        Key::KeyC => KeyCode::Character('C'),
        Key::KeyD => KeyCode::Character('D'),
        Key::KeyE => KeyCode::Character('E'),
        Key::KeyF => KeyCode::Character('F'),
        Key::KeyG => KeyCode::Character('G'),
        Key::KeyH => KeyCode::Character('H'),
        Key::KeyI => KeyCode::Character('I'),
        Key::KeyJ => KeyCode::Character('J'),
        Key::KeyK => KeyCode::Character('K'),
        Key::KeyL => KeyCode::Character('L'),
        Key::KeyM => KeyCode::Character('M'),
        Key::KeyN => KeyCode::Character('N'),
        Key::KeyO => KeyCode::Character('O'),
        Key::KeyP => KeyCode::Character('P'),
        Key::KeyQ => KeyCode::Character('Q'),
        Key::KeyR => KeyCode::Character('R'),
        Key::KeyS => KeyCode::Character('S'),
        Key::KeyT => KeyCode::Character('T'),
        Key::KeyU => KeyCode::Character('U'),
        Key::KeyV => KeyCode::Character('V'),
        Key::KeyW => KeyCode::Character('W'),
        Key::KeyX => KeyCode::Character('X'),
        Key::KeyY => KeyCode::Character('Y'),
        Key::KeyZ => KeyCode::Character('Z'),
        _ => return None,
    })
}
