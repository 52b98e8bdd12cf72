use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::utils::{Position, Size};
use crate::PickEngine;

pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Sprite Pick".to_string(),
            width: 350,
            height: 350,
        }
    }
}

/// Everything the demo needs: window settings, atlas asset paths, and the
/// button's placement in world units.
pub struct DemoConfig {
    pub window: WindowConfig,
    pub atlas_manifest: PathBuf,
    pub atlas_image: PathBuf,
    pub button_position: Position,
    pub button_size: Size,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            atlas_manifest: PathBuf::from("assets/textures/button.json"),
            atlas_image: PathBuf::from("assets/textures/button.png"),
            button_position: Position { x: 100.0, y: 100.0 },
            button_size: Size {
                width: 114.0,
                height: 38.0,
            },
        }
    }
}

pub struct PickApp {
    config: DemoConfig,
    engine: Option<PickEngine<'static>>,
    window: Option<Arc<Window>>,
}

impl PickApp {
    pub fn new(config: DemoConfig) -> Self {
        Self {
            config,
            engine: None,
            window: None,
        }
    }
}

impl ApplicationHandler<()> for PickApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let window_attributes = Window::default_attributes()
            .with_title(&self.config.window.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        if let Ok(window) = event_loop.create_window(window_attributes) {
            let window = Arc::new(window);
            let size = window.inner_size();
            let surface = instance
                .create_surface(window.clone())
                .expect("Failed to create surface");
            let mut engine = PickEngine::new(surface, instance, size);

            if let Err(err) = engine.load_button(
                &self.config.atlas_manifest,
                &self.config.atlas_image,
                self.config.button_position,
                self.config.button_size,
            ) {
                log::error!("failed to load button sprite: {err:#}");
                event_loop.exit();
                return;
            }

            window.request_redraw();
            self.engine = Some(engine);
            self.window = Some(window);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.handle_cursor_moved(Position {
                        x: position.x as f32,
                        y: position.y as f32,
                    });
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(engine) = &mut self.engine {
                    match state {
                        ElementState::Pressed => engine.handle_mouse_press(),
                        ElementState::Released => engine.handle_mouse_release(),
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(engine) = &mut self.engine {
                    match engine.render() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            let size = engine.size;
                            engine.resize(&size);
                        }
                        Err(err) => log::warn!("surface error: {err:?}"),
                    }
                    // Immediate redraw loop, one paint per frame swap.
                    if let Some(window) = &self.window {
                        window.request_redraw();
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(&new_size);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            _ => (),
        }
    }
}

pub fn run_app(config: DemoConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = PickApp::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
