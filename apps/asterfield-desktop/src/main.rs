use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use asterfield_common::{Color, FieldConfig, Rect};
use asterfield_input::{Action, ActionState, ControlState};
use asterfield_kernel::Simulation;
use asterfield_render::{Painter, rotated_rect_corners};
use asterfield_tools::{FrameTimer, draw_debug_overlay};
use clap::Parser;
use egui::Context as EguiContext;
use egui::{Align2, Color32, FontId, Pos2, Shape, Stroke, StrokeKind};
use glam::Vec2;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "asterfield-desktop", about = "Asteroid field desktop viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// RNG seed for field generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of asteroids to generate
    #[arg(long)]
    asteroids: Option<usize>,

    /// Number of stars to generate
    #[arg(long)]
    stars: Option<usize>,
}

impl Cli {
    fn field_config(&self) -> FieldConfig {
        let mut config = FieldConfig::default();
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(n) = self.asteroids {
            config.asteroid_count = n;
        }
        if let Some(n) = self.stars {
            config.star_count = n;
        }
        config
    }
}

const TICK_RATE: f64 = 1.0 / 60.0;
/// Longest frame fed to the tick accumulator; longer stalls are dropped.
const MAX_FRAME: f64 = 0.25;

fn action_for(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::KeyW => Some(Action::Thrust),
        KeyCode::KeyA => Some(Action::RotateLeft),
        KeyCode::KeyD => Some(Action::RotateRight),
        KeyCode::F1 => Some(Action::ToggleDebug),
        _ => None,
    }
}

fn color32(c: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn pos2(v: Vec2) -> Pos2 {
    Pos2::new(v.x, v.y)
}

fn egui_rect(r: Rect) -> egui::Rect {
    egui::Rect::from_min_size(Pos2::new(r.x, r.y), egui::vec2(r.width, r.height))
}

/// `Painter` backed by an egui layer. Screen coordinates map to egui points.
struct EguiPainter {
    inner: egui::Painter,
}

impl Painter for EguiPainter {
    fn rotated_rect(&mut self, center: Vec2, size: Vec2, rotation_degrees: f32, color: Color) {
        let points = rotated_rect_corners(center, size, rotation_degrees)
            .into_iter()
            .map(pos2)
            .collect();
        self.inner
            .add(Shape::convex_polygon(points, color32(color), Stroke::NONE));
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        let points = vec![pos2(a), pos2(b), pos2(c)];
        self.inner
            .add(Shape::convex_polygon(points, color32(color), Stroke::NONE));
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.inner
            .line_segment([pos2(from), pos2(to)], Stroke::new(1.0, color32(color)));
    }

    fn rect_outline(&mut self, rect: Rect, thickness: f32, color: Color) {
        self.inner.rect_stroke(
            egui_rect(rect),
            0.0,
            Stroke::new(thickness, color32(color)),
            StrokeKind::Inside,
        );
    }

    fn filled_rect(&mut self, rect: Rect, color: Color) {
        self.inner.rect_filled(egui_rect(rect), 0.0, color32(color));
    }

    fn text(&mut self, text: &str, position: Vec2, font_size: f32, color: Color) {
        self.inner.text(
            pos2(position),
            Align2::LEFT_TOP,
            text,
            FontId::proportional(font_size),
            color32(color),
        );
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.inner.circle_filled(pos2(center), radius, color32(color));
    }
}

/// Window, surface and egui backends, created once the event loop resumes.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext, screen: Vec2) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Asterfield")
            .with_inner_size(LogicalSize::new(screen.x as f64, screen.y as f64))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow!("no compatible GPU adapter"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("asterfield_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create device")?;

        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow!("surface reports no formats"))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            width = config.width,
            height = config.height,
            "GPU initialized"
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
    }
}

struct DesktopApp {
    sim: Simulation,
    actions: ActionState,
    timer: FrameTimer,
    last_frame: Instant,
    accumulator: f64,
    egui_ctx: EguiContext,
    gpu: Option<Gpu>,
}

impl DesktopApp {
    fn new(sim: Simulation) -> Self {
        Self {
            sim,
            actions: ActionState::new(),
            timer: FrameTimer::default(),
            last_frame: Instant::now(),
            accumulator: 0.0,
            egui_ctx: EguiContext::default(),
            gpu: None,
        }
    }

    /// Run as many fixed ticks as the elapsed time covers.
    fn advance(&mut self) {
        let now = Instant::now();
        let frame = now - self.last_frame;
        self.last_frame = now;
        self.timer.record(frame);

        self.accumulator += frame.as_secs_f64().min(MAX_FRAME);
        while self.accumulator >= TICK_RATE {
            let controls = ControlState::sample(&self.actions);
            self.sim.tick(&controls, TICK_RATE as f32);
            self.actions.end_frame();
            self.accumulator -= TICK_RATE;
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool, event_loop: &ActiveEventLoop) {
        if key == KeyCode::Escape && pressed {
            event_loop.exit();
            return;
        }
        let Some(action) = action_for(key) else {
            return;
        };
        if pressed {
            self.actions.press(action);
        } else {
            self.actions.release(action);
        }
    }

    fn redraw(&mut self) {
        self.advance();

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let sim = &self.sim;
        let fps = self.timer.fps();
        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            let mut painter = EguiPainter {
                inner: ctx.layer_painter(egui::LayerId::background()),
            };
            sim.render(&mut painter);
            draw_debug_overlay(sim, fps, &mut painter);
        });
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("field_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("field_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for DesktopApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::new(event_loop, &self.egui_ctx, self.sim.config().screen_size) {
            Ok(gpu) => {
                self.gpu = Some(gpu);
                self.last_frame = Instant::now();
            }
            Err(e) => {
                tracing::error!("failed to initialize graphics: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
            }
            WindowEvent::Focused(false) => {
                // Key releases are not delivered while unfocused.
                for action in Action::ALL {
                    self.actions.release(action);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => {
                self.handle_key(key, state == ElementState::Pressed, event_loop);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("asterfield-desktop starting");

    let sim = Simulation::new(cli.field_config())?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DesktopApp::new(sim);
    event_loop.run_app(&mut app)?;

    tracing::info!(
        ticks = app.sim.tick_count(),
        avg_frame = ?app.timer.average(),
        "asterfield-desktop exiting"
    );
    Ok(())
}
