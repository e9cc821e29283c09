//! Platform layer: windowing & event loop driving the mesh renderer.
//!
//! - Window and GPU state are created lazily on `resumed`.
//! - Continuous redraw while the window is open; the model spins around Y.
//! - Surface loss is recovered in place, anything else ends the loop with an error.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Result, anyhow};
use asset::{FlatVertex, flatten::Bounds, texture::TextureData};
use corelib::{Vec3, camera::Camera, transform::Transform, vec3};
use renderer::GpuState;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

/// Window and presentation settings.
#[derive(Clone, Debug)]
pub struct ViewerOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub backends: wgpu::Backends,
    pub show_fps: bool,
    /// Model spin around Y, radians per second.
    pub spin_speed: f32,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            title: "Svarog OBJ Viewer".to_owned(),
            width: 1280,
            height: 720,
            backends: wgpu::Backends::all(),
            show_fps: false,
            spin_speed: 0.5,
        }
    }
}

/// Open a window and draw `vertices` with `texture` until it is closed.
pub fn run_viewer(options: ViewerOptions, vertices: Vec<FlatVertex>, texture: TextureData) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| anyhow!("Failed to create event loop: {e}"))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut viewer = Viewer::new(options, vertices, texture);
    event_loop
        .run_app(&mut viewer)
        .map_err(|e| anyhow!("Event loop error: {e:?}"))?;

    match viewer.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct Viewer {
    options: ViewerOptions,
    vertices: Vec<FlatVertex>,
    texture: TextureData,
    model: Transform,
    camera: Camera,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    start: Instant,
    fps: FpsCounter,
    error: Option<anyhow::Error>,
}

impl Viewer {
    fn new(options: ViewerOptions, vertices: Vec<FlatVertex>, texture: TextureData) -> Self {
        let (center, radius) = match Bounds::from_vertices(&vertices) {
            Some(b) => (Vec3::from_array(b.center()), b.radius()),
            None => (Vec3::ZERO, 1.0),
        };
        let aspect = options.width as f32 / options.height.max(1) as f32;
        let camera = Camera::framing(Vec3::ZERO, radius, 60f32.to_radians(), aspect);
        let now = Instant::now();

        Self {
            options,
            vertices,
            texture,
            model: Transform::recentered(center),
            camera,
            window: None,
            gpu: None,
            start: now,
            fps: FpsCounter::new(now),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(self.options.title.clone())
            .with_inner_size(PhysicalSize::new(self.options.width, self.options.height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| anyhow!("Failed to create window: {e}"))?,
        );
        log::info!(
            "Window created: {}x{}",
            window.inner_size().width,
            window.inner_size().height
        );

        let gpu = pollster::block_on(GpuState::new(
            window.clone(),
            self.options.backends,
            &self.vertices,
            &self.texture,
        ))?;
        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(gpu);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let now = Instant::now();
        let t = now.duration_since(self.start).as_secs_f32();
        self.model = self
            .model
            .with_rotation(vec3(0.0, self.options.spin_speed * t, 0.0));

        match gpu.render(&self.model, &self.camera) {
            Ok(()) => {}
            Err(e) if GpuState::is_surface_lost(&e) => {
                log::warn!("Surface lost/outdated, reconfiguring");
                gpu.recreate_surface();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow!("GPU out of memory"));
                return;
            }
            Err(e) => log::warn!("Frame skipped: {e:?}"),
        }

        if self.options.show_fps {
            if let Some(fps) = self.fps.tick(now) {
                log::info!("FPS: {:.1} ({} vertices)", fps, gpu.vertex_count());
            }
        }
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting event loop.");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                log::info!("Escape pressed. Exiting event loop.");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                log::debug!("Resized: {}x{}", new_size.width, new_size.height);
                if let Some(gpu) = self.gpu.as_mut() {
                    gpu.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Frames-per-second over roughly one-second windows.
#[derive(Debug)]
struct FpsCounter {
    window_start: Instant,
    frames: u32,
}

impl FpsCounter {
    const WINDOW: Duration = Duration::from_secs(1);

    fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
        }
    }

    /// Count a frame; returns the rate once a full window has elapsed.
    fn tick(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let elapsed = now.duration_since(self.window_start);
        if elapsed < Self::WINDOW {
            return None;
        }
        let fps = self.frames as f32 / elapsed.as_secs_f32();
        self.window_start = now;
        self.frames = 0;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_reports_once_per_window() {
        let t0 = Instant::now();
        let mut fps = FpsCounter::new(t0);
        for i in 1..60 {
            assert!(fps.tick(t0 + Duration::from_millis(i * 16)).is_none());
        }
        let rate = fps.tick(t0 + Duration::from_secs(1)).expect("window elapsed");
        assert!((rate - 60.0).abs() < 1e-3);
        assert!(fps.tick(t0 + Duration::from_millis(1010)).is_none());
    }

    #[test]
    fn viewer_recenters_and_frames_mesh() {
        let verts = vec![
            FlatVertex::new([10.0, 0.0, 0.0], [0.0, 0.0]),
            FlatVertex::new([12.0, 0.0, 0.0], [1.0, 0.0]),
            FlatVertex::new([11.0, 2.0, 0.0], [0.0, 1.0]),
        ];
        let viewer = Viewer::new(ViewerOptions::default(), verts, TextureData::checkerboard(8, 4));
        let centered = viewer.model.matrix().transform_point3(vec3(11.0, 1.0, 0.0));
        assert!(centered.abs_diff_eq(Vec3::ZERO, 1e-6));
        assert_eq!(viewer.camera.target, Vec3::ZERO);
        assert!(viewer.camera.eye.length() > 1.0);
    }
}
