use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec2;
use instant::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId, WindowLevel};

use crate::neko::{Neko, Viewport};
#[cfg(windows)]
use crate::platform;
use crate::pointer::{self, PointerFeed, PointerSender};
use crate::render::instance::SpriteInstance;
use crate::render::texture::SpriteSheet;
use crate::render::GpuState;
use crate::schedule::TickGate;

/// Environment variable naming the sprite sheet to load.
pub const SHEET_ENV: &str = "NEKO_SHEET";
/// Sheet used when `NEKO_SHEET` is unset.
const DEFAULT_SHEET: &str = "assets/neko.gif";
/// How often to log FPS (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

struct FrameStats {
    frame_count: u64,
    last_log_time: Instant,
    frame_time_sum: f64,
    frame_time_max: f64,
    frames_since_log: u32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frame_count: 0,
            last_log_time: Instant::now(),
            frame_time_sum: 0.0,
            frame_time_max: 0.0,
            frames_since_log: 0,
        }
    }

    fn record_frame(&mut self, dt: f64, ticks: u64) {
        self.frame_count += 1;
        self.frames_since_log += 1;
        self.frame_time_sum += dt;
        self.frame_time_max = self.frame_time_max.max(dt);

        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed >= FPS_LOG_INTERVAL {
            let avg_ms = (self.frame_time_sum / self.frames_since_log as f64) * 1000.0;
            let fps = self.frames_since_log as f64 / elapsed;
            log::info!(
                "FPS: {:.0} | avg: {:.2}ms | max: {:.2}ms | frames: {} | ticks: {}",
                fps,
                avg_ms,
                self.frame_time_max * 1000.0,
                self.frame_count,
                ticks,
            );
            self.last_log_time = Instant::now();
            self.frame_time_sum = 0.0;
            self.frame_time_max = 0.0;
            self.frames_since_log = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Top-level application state.
struct App {
    sheet: SpriteSheet,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,

    // Animation engine and its tick scheduler
    neko: Neko,
    gate: TickGate,

    // Pointer subscription: the sender is the handle we hand out and must
    // release on teardown; the feed is read once per tick.
    pointer_tx: Option<PointerSender>,
    pointer: PointerFeed,

    last_frame_time: Option<Instant>,
    frame_stats: FrameStats,

    // Viewport dimensions
    screen_w: u32,
    screen_h: u32,

    // Latest render instruction, redrawn every frame between ticks
    instance: SpriteInstance,

    torn_down: bool,
    error: Option<Box<dyn Error>>,
}

impl App {
    fn new(sheet: SpriteSheet) -> Self {
        let (pointer_tx, pointer) = pointer::channel(Vec2::ZERO);
        let neko = Neko::new();
        let instance = SpriteInstance::from(&neko.render());
        Self {
            sheet,
            window: None,
            gpu: None,
            neko,
            gate: TickGate::default(),
            pointer_tx: Some(pointer_tx),
            pointer,
            last_frame_time: None,
            frame_stats: FrameStats::new(),
            screen_w: 0,
            screen_h: 0,
            instance,
            torn_down: false,
            error: None,
        }
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            width: self.screen_w as f32,
            height: self.screen_h as f32,
        }
    }

    fn publish_pointer(&self, x: f32, y: f32) {
        if let Some(tx) = &self.pointer_tx {
            tx.send(Vec2::new(x, y));
        }
    }

    /// Run one engine tick if the gate allows it.
    fn maybe_tick(&mut self, now: Instant) {
        if !self.gate.poll(now) {
            return;
        }
        let pointer = self.pointer.latest();
        let viewport = self.viewport();
        let out = self.neko.tick(pointer, viewport);
        log::trace!(
            "tick {}: {:?} tile {:?} at {:?}",
            self.neko.tick_count(),
            self.neko.state(),
            out.tile_offset(),
            out.screen
        );
        self.instance = SpriteInstance::from(&out);
    }

    /// Stop ticking, drop the pointer subscription and detach from the screen.
    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.gate.stop();
        self.pointer_tx = None;
        self.gpu = None;
        self.window = None;
        log::info!("Overlay detached");
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: Box<dyn Error>) {
        log::error!("{error}");
        self.error = Some(error);
        self.teardown();
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // A removed overlay is never re-attached.
        if self.window.is_some() || self.torn_down {
            return;
        }

        let Some(monitor) = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
        else {
            self.fail(event_loop, "no monitor found".into());
            return;
        };
        let screen_size = monitor.size();

        // Start hidden so DWM doesn't cache stale frame state before the
        // overlay styles are applied.
        let attrs = WindowAttributes::default()
            .with_title("neko")
            .with_decorations(false)
            .with_visible(false)
            .with_window_level(WindowLevel::AlwaysOnTop)
            .with_inner_size(screen_size)
            .with_position(winit::dpi::PhysicalPosition::new(0, 0));
        // On Windows transparency comes from DirectComposition instead.
        #[cfg(not(windows))]
        let attrs = attrs.with_transparent(true);

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, e.into());
                return;
            }
        };

        #[cfg(windows)]
        platform::win32::setup_overlay(&window);

        let size = window.inner_size();
        self.screen_w = size.width;
        self.screen_h = size.height;

        log::info!(
            "Overlay window created: {}x{} on {:?}",
            size.width,
            size.height,
            monitor.name().unwrap_or_default()
        );

        let gpu = match GpuState::new(window.clone(), &self.sheet) {
            Ok(gpu) => gpu,
            Err(e) => {
                self.fail(event_loop, e.into());
                return;
            }
        };
        self.gpu = Some(gpu);
        log::info!("wgpu + sprite pipeline initialized");

        event_loop.set_control_flow(ControlFlow::Poll);
        window.set_visible(true);
        self.window = Some(window);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // The overlay is click-through, so keyboard and cursor are polled globally.
        #[cfg(windows)]
        {
            if platform::win32::is_escape_pressed() {
                log::info!("ESC pressed, exiting");
                self.teardown();
                event_loop.exit();
                return;
            }
            let (x, y) = platform::win32::get_mouse_pos();
            self.publish_pointer(x, y);
        }
        #[cfg(not(windows))]
        let _ = event_loop;

        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                log::info!("Close requested, exiting");
                self.teardown();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                    self.screen_w = new_size.width;
                    self.screen_h = new_size.height;
                }
            }
            #[cfg(not(windows))]
            WindowEvent::CursorMoved { position, .. } => {
                self.publish_pointer(position.x as f32, position.y as f32);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                if let Some(last) = self.last_frame_time {
                    let dt = now.duration_since(last).as_secs_f64();
                    self.frame_stats.record_frame(dt, self.gate.ticks());
                }
                self.last_frame_time = Some(now);

                self.maybe_tick(now);

                if let Some(gpu) = &mut self.gpu {
                    gpu.update_instances(std::slice::from_ref(&self.instance));
                    gpu.render_frame();
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}

/// Load the sprite sheet, create the event loop and run until the overlay closes.
pub fn run() -> Result<(), Box<dyn Error>> {
    let sheet_path = std::env::var_os(SHEET_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SHEET));
    let sheet = SpriteSheet::open(&sheet_path)?;
    log::info!(
        "Loaded sprite sheet {} ({}x{})",
        sheet_path.display(),
        sheet.width,
        sheet.height
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(sheet);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
