//! Runnable host: a winit window driving the presentation device.
//!
//! Feeds a synthetic RGB565 test pattern into logical screen 0, or with
//! `--overlay` shows a synthetic planar-YUV feed through the overlay path
//! (screen count 0). Suspend/resume maps onto the device's surface-lost
//! cycle.

use std::time::Instant;

use raw_window_handle::{HasRawDisplayHandle, HasRawWindowHandle};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use kinescope_core::{LogicalScreen, VideoError, VideoSettings};
use kinescope_device_glow::{
    DeviceState, DirSourceProvider, PlatformProfile, SourceProvider, VideoDevice,
};
use kinescope_pixels::OverlayFrame;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("[kinescope host] error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), VideoError> {
    let overlay_mode = std::env::args().any(|arg| arg == "--overlay");

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("kinescope")
        .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0))
        .build(&event_loop)
        .map_err(|e| VideoError::other(format!("window creation failed: {e}")))?;

    let mut settings = VideoSettings::default();
    settings.screen_count = if overlay_mode { 0 } else { 1 };

    let mut device = VideoDevice::new(PlatformProfile::desktop_core(), settings);
    let provider = DirSourceProvider::new(".");

    let mut screen = LogicalScreen::new(
        device.settings().pix_width,
        device.settings().pix_height,
    );
    let mut overlay = OverlaySource::new(320, 240);
    let start = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::Resumed => {
                init_device(&mut device, &window, &provider, control_flow);
            }

            Event::Suspended => device.notify_surface_lost(),

            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    device.release(false);
                    *control_flow = ControlFlow::Exit;
                }

                WindowEvent::Resized(_) => {
                    // The device is sized at init; rebuild it around the new
                    // surface and debounce one frame of window-manager churn.
                    if device.state() == DeviceState::Active {
                        device.notify_surface_lost();
                    }
                    init_device(&mut device, &window, &provider, control_flow);
                    device.set_refresh_window_delay(1);
                }

                _ => {}
            },

            Event::MainEventsCleared => window.request_redraw(),

            Event::RedrawRequested(_) => {
                let time = start.elapsed().as_secs_f32();
                if overlay_mode {
                    overlay.advance(time);
                    device.update_overlay_yuv420(&overlay.frame());
                } else {
                    draw_test_pattern(&mut screen, time);
                    device.update_screen(0, &screen);
                }
                device.present();
            }

            _ => {}
        }
    });
}

fn init_device(
    device: &mut VideoDevice,
    window: &Window,
    provider: &dyn SourceProvider,
    control_flow: &mut ControlFlow,
) {
    if device.state() == DeviceState::Active {
        return;
    }
    let size = window.inner_size();
    if let Err(err) = device.init(
        window.raw_display_handle(),
        window.raw_window_handle(),
        (size.width.max(1), size.height.max(1)),
        provider,
    ) {
        log::error!("device init failed: {err}");
        *control_flow = ControlFlow::Exit;
    }
}

fn draw_test_pattern(screen: &mut LogicalScreen, time: f32) {
    let (width, height) = screen.size;
    let shift = (time * 60.0) as i32;
    for y in 0..height {
        let row = (y * screen.pitch) as usize;
        for x in 0..width {
            let r = (((x + shift) >> 3) & 0x1F) as u16;
            let g = ((y >> 2) & 0x3F) as u16;
            let b = ((x >> 4) & 0x1F) as u16;
            screen.framebuffer[row + x as usize] = (r << 11) | (g << 5) | b;
        }
    }
}

/// Synthetic 4:2:0 source: a luma gradient that scrolls with time over flat
/// chroma, enough to exercise the packing and upload path.
struct OverlaySource {
    width: usize,
    height: usize,
    y: Vec<u8>,
    u: Vec<u8>,
    v: Vec<u8>,
}

impl OverlaySource {
    fn new(width: usize, height: usize) -> Self {
        OverlaySource {
            width,
            height,
            y: vec![0; width * height],
            u: vec![96; (width / 2) * (height / 2)],
            v: vec![160; (width / 2) * (height / 2)],
        }
    }

    fn advance(&mut self, time: f32) {
        let shift = (time * 120.0) as usize;
        for row in 0..self.height {
            for col in 0..self.width {
                self.y[row * self.width + col] = ((col + row + shift) & 0xFF) as u8;
            }
        }
    }

    fn frame(&self) -> OverlayFrame<'_> {
        OverlayFrame {
            width: self.width,
            height: self.height,
            y: &self.y,
            u: &self.u,
            v: &self.v,
            stride_y: self.width,
            stride_u: self.width / 2,
            stride_v: self.width / 2,
        }
    }
}
