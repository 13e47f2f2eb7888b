//! kinescope presentation device (glow/OpenGL backend)
//
// This crate contains **only** the presentation runtime:
// - display/config/context/surface lifecycle with ordered version fallback
// - screen + overlay textures and the shared vertex buffer
// - the shader catalog and per-frame draw/swap sequence
//
// It does NOT contain windowing, input, audio, or production of the logical
// screens' pixels (the host provides those).
#![allow(clippy::missing_safety_doc)]

use std::ffi::CString;
use std::fmt;
use std::num::NonZeroU32;

use glow::HasContext;
use glutin::config::{ColorBufferType, ConfigSurfaceTypes, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::{Display, DisplayApiPreference};
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, WindowSurface};
use raw_window_handle::{RawDisplayHandle, RawWindowHandle};

use kinescope_core::{
    DisplayMode, LogicalScreen, ScanlineInfo, VideoSettings, WindowState, SCREEN_COUNT,
    SCREEN_YSIZE,
};
use kinescope_layout::{
    build_vertices, start_vertices, LayoutParams, RenderVertex, ViewportLayout,
};
use kinescope_pixels::{
    pack_yuv420, pack_yuv422, pack_yuv444, OverlayFrame, VIDEO_BUFFER_LEN, VIDEO_TEXTURE_H,
    VIDEO_TEXTURE_W,
};

pub mod profile;
pub mod shaders;

pub use kinescope_core::VideoError;
pub use profile::{ContextFlavor, GlslProfile, OverlayFormat, PlatformProfile};
pub use shaders::{
    DirSourceProvider, GlowShaderBackend, ShaderBackend, ShaderCatalog, ShaderEntry,
    SourceProvider, BASE_SHADER_LIST, MAX_SHADERS,
};

/// Device lifecycle. GPU handles are valid only in `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    Uninitialized,
    Active,
    SurfaceLost,
}

/// The presentation device: owns the graphics context/surface, the vertex
/// buffer, the screen and overlay textures, and the active shader.
///
/// Single-threaded by contract — every method must be called on the thread
/// that owns the context, and callers serialize all entry points.
pub struct VideoDevice {
    profile: PlatformProfile,
    settings: VideoSettings,
    state: DeviceState,

    gl_display: Option<Display>,
    gl_surface: Option<Surface<WindowSurface>>,
    gl_context: Option<PossiblyCurrentContext>,
    gl: Option<glow::Context>,

    vao: Option<glow::NativeVertexArray>,
    vbo: Option<glow::NativeBuffer>,
    screen_textures: [Option<glow::NativeTexture>; SCREEN_COUNT],
    overlay_texture: Option<glow::NativeTexture>,
    overlay_buffer: Vec<u32>,

    catalog: ShaderCatalog<glow::NativeProgram>,
    layout: Option<ViewportLayout>,
    last_shader_id: i32,
    window_refresh_delay: i32,
    displays: Vec<DisplayMode>,
    scanlines: Vec<ScanlineInfo>,
}

impl fmt::Debug for VideoDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VideoDevice")
            .field("state", &self.state)
            .field("settings", &self.settings)
            .field("layout", &self.layout)
            .field("displays", &self.displays)
            .field("shader_count", &self.catalog.len())
            .finish_non_exhaustive()
    }
}

impl VideoDevice {
    pub fn new(profile: PlatformProfile, settings: VideoSettings) -> Self {
        VideoDevice {
            profile,
            settings,
            state: DeviceState::Uninitialized,
            gl_display: None,
            gl_surface: None,
            gl_context: None,
            gl: None,
            vao: None,
            vbo: None,
            screen_textures: [None; SCREEN_COUNT],
            overlay_texture: None,
            overlay_buffer: Vec::new(),
            catalog: ShaderCatalog::new(),
            layout: None,
            last_shader_id: -1,
            window_refresh_delay: 0,
            displays: Vec::new(),
            scanlines: Vec::new(),
        }
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    pub fn settings(&self) -> &VideoSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut VideoSettings {
        &mut self.settings
    }

    pub fn layout(&self) -> Option<&ViewportLayout> {
        self.layout.as_ref()
    }

    /// Display modes published at init; always a single entry.
    pub fn displays(&self) -> &[DisplayMode] {
        &self.displays
    }

    pub fn shader_count(&self) -> usize {
        self.catalog.len()
    }

    /// Current surface extent, queried from the windowing system.
    pub fn window_size(&self) -> Option<(u32, u32)> {
        let surface = self.gl_surface.as_ref()?;
        Some((surface.width()?, surface.height()?))
    }

    /// Brings the device to `Active`: display connection, config negotiation,
    /// surface, context (ordered version fallback), GL objects sized by the
    /// computed layout, and the shader catalog. On failure everything already
    /// created is released and the device stays `Uninitialized`.
    pub fn init(
        &mut self,
        display_handle: RawDisplayHandle,
        window_handle: RawWindowHandle,
        surface_size: (u32, u32),
        provider: &dyn SourceProvider,
    ) -> Result<(), VideoError> {
        if self.state == DeviceState::Active {
            return Ok(());
        }

        match self.try_init(display_handle, window_handle, surface_size, provider) {
            Ok(()) => {
                self.state = DeviceState::Active;
                Ok(())
            }
            Err(err) => {
                self.release(true);
                Err(err)
            }
        }
    }

    fn try_init(
        &mut self,
        display_handle: RawDisplayHandle,
        window_handle: RawWindowHandle,
        surface_size: (u32, u32),
        provider: &dyn SourceProvider,
    ) -> Result<(), VideoError> {
        let display = unsafe { Display::new(display_handle, DisplayApiPreference::Egl) }
            .map_err(|e| VideoError::Display(format!("could not connect to display: {e}")))?;

        let template = ConfigTemplateBuilder::new()
            .with_buffer_type(ColorBufferType::Rgb {
                r_size: 8,
                g_size: 8,
                b_size: 8,
            })
            .with_surface_type(ConfigSurfaceTypes::WINDOW)
            .compatible_with_native_window(window_handle)
            .build();
        let config = unsafe { display.find_configs(template) }
            .map_err(|e| VideoError::Display(format!("config enumeration failed: {e}")))?
            .next()
            .ok_or_else(|| VideoError::Display("no framebuffer configs found".to_string()))?;

        let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            window_handle,
            NonZeroU32::new(surface_size.0).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(surface_size.1).unwrap_or(NonZeroU32::MIN),
        );
        let surface = unsafe { display.create_window_surface(&config, &surface_attrs) }
            .map_err(|e| VideoError::Surface(e.to_string()))?;

        // Walk the profile's context-version list; first success wins,
        // exhausting the list is fatal.
        let mut created = None;
        for &(major, minor) in &self.profile.context_versions {
            let api = match self.profile.flavor {
                ContextFlavor::OpenGl => ContextApi::OpenGl(Some(Version::new(major, minor))),
                ContextFlavor::Gles => ContextApi::Gles(Some(Version::new(major, minor))),
            };
            let context_attrs = ContextAttributesBuilder::new()
                .with_context_api(api)
                .build(Some(window_handle));
            match unsafe { display.create_context(&config, &context_attrs) } {
                Ok(context) => {
                    created = Some(context);
                    break;
                }
                Err(err) => {
                    log::warn!("context {major}.{minor} creation failed, trying next: {err}")
                }
            }
        }
        let context = created
            .ok_or_else(|| VideoError::Context("every context version attempt failed".to_string()))?
            .make_current(&surface)
            .map_err(|e| VideoError::Context(format!("make_current failed: {e}")))?;

        let gl = unsafe {
            glow::Context::from_loader_function(|symbol| match CString::new(symbol) {
                Ok(symbol) => display.get_proc_address(symbol.as_c_str()),
                Err(_) => std::ptr::null(),
            })
        };

        self.gl_display = Some(display);
        self.gl_surface = Some(surface);
        self.gl_context = Some(context);
        self.gl = Some(gl);

        self.enumerate_displays();
        self.setup_rendering()?;
        self.load_shaders(provider)?;

        if let Some(layout) = self.layout.as_ref() {
            log::info!(
                "device active: viewport {}x{} at ({}, {}), {} shaders",
                layout.viewport_size.0,
                layout.viewport_size.1,
                layout.viewport_pos.0,
                layout.viewport_pos.1,
                self.catalog.len()
            );
        }
        Ok(())
    }

    fn enumerate_displays(&mut self) {
        let (width, height) = self.window_size().unwrap_or((0, 0));
        self.displays = vec![DisplayMode {
            width: width as i32,
            height: height as i32,
            refresh_rate: self.settings.refresh_rate,
        }];
    }

    fn setup_rendering(&mut self) -> Result<(), VideoError> {
        let display_size = self
            .displays
            .first()
            .map(|d| (d.width, d.height))
            .unwrap_or((0, 0));

        // Explicit fullscreen size wins; otherwise draw at the display size.
        let mut output_size = (self.settings.fs_width, self.settings.fs_height);
        if output_size.0 <= 0 || output_size.1 <= 0 {
            output_size = display_size;
        }

        let max_pix_width = if self.settings.max_pix_width > 0 {
            self.settings.max_pix_width
        } else {
            self.profile.default_max_pix_width
        };
        let screens = vec![(self.settings.pix_width, self.settings.pix_height); SCREEN_COUNT];
        let layout = kinescope_layout::compute(&LayoutParams {
            output_size,
            screens: &screens,
            max_pix_width: (max_pix_width > 0).then_some(max_pix_width),
        })
        .map_err(|e| VideoError::Layout(e.to_string()))?;

        let Some(gl) = self.gl.as_ref() else {
            return Err(VideoError::other("setup_rendering without a context"));
        };

        unsafe {
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.disable(glow::DEPTH_TEST);
            gl.disable(glow::DITHER);
            gl.disable(glow::BLEND);
            gl.disable(glow::SCISSOR_TEST);
            gl.disable(glow::CULL_FACE);

            let vao = gl
                .create_vertex_array()
                .map_err(|e| VideoError::GlCreate(format!("create_vertex_array failed: {e}")))?;
            self.vao = Some(vao);
            gl.bind_vertex_array(Some(vao));

            let vbo = gl
                .create_buffer()
                .map_err(|e| VideoError::GlCreate(format!("create_buffer failed: {e}")))?;
            self.vbo = Some(vbo);
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));

            let verts = build_vertices(&layout, self.profile.vertex_layout);
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&verts),
                glow::DYNAMIC_DRAW,
            );

            let stride = std::mem::size_of::<RenderVertex>() as i32;
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(1, 4, glow::UNSIGNED_BYTE, true, stride, 12);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(2, 2, glow::FLOAT, false, stride, 16);
            gl.enable_vertex_attrib_array(2);

            gl.viewport(
                layout.viewport_pos.0,
                layout.viewport_pos.1,
                layout.viewport_size.0,
                layout.viewport_size.1,
            );

            gl.active_texture(glow::TEXTURE0);
            for slot in self.screen_textures.iter_mut() {
                let tex = gl
                    .create_texture()
                    .map_err(|e| VideoError::GlCreate(format!("create_texture failed: {e}")))?;
                *slot = Some(tex);
                gl.bind_texture(glow::TEXTURE_2D, Some(tex));
                gl.tex_image_2d(
                    glow::TEXTURE_2D,
                    0,
                    glow::RGB as i32,
                    layout.texture_size.0 as i32,
                    layout.texture_size.1 as i32,
                    0,
                    glow::RGB,
                    glow::UNSIGNED_SHORT_5_6_5,
                    None,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_MIN_FILTER,
                    glow::NEAREST as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_MAG_FILTER,
                    glow::NEAREST as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_WRAP_S,
                    glow::CLAMP_TO_EDGE as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_WRAP_T,
                    glow::CLAMP_TO_EDGE as i32,
                );
            }

            let overlay = gl
                .create_texture()
                .map_err(|e| VideoError::GlCreate(format!("create_texture failed: {e}")))?;
            self.overlay_texture = Some(overlay);
            gl.bind_texture(glow::TEXTURE_2D, Some(overlay));
            let fmt = self.profile.overlay_format;
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                fmt.internal_format,
                VIDEO_TEXTURE_W as i32,
                VIDEO_TEXTURE_H as i32,
                0,
                fmt.format,
                fmt.ty,
                None,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
        }

        self.overlay_buffer = vec![0u32; VIDEO_BUFFER_LEN];

        let scanline_count = self.settings.pix_width.max(SCREEN_YSIZE) as usize;
        if self.scanlines.len() != scanline_count {
            self.scanlines = vec![ScanlineInfo::default(); scanline_count];
        }

        self.settings.window_state = WindowState::Active;
        self.settings.dim_max = 1.0;
        self.settings.dim_percent = 1.0;
        self.settings.viewport_x = layout.viewport_pos.0;
        self.settings.viewport_y = layout.viewport_pos.1;
        self.settings.viewport_w = layout.view_scale.0;
        self.settings.viewport_h = layout.view_scale.1;

        self.last_shader_id = -1;
        self.layout = Some(layout);
        Ok(())
    }

    fn load_shaders(&mut self, provider: &dyn SourceProvider) -> Result<(), VideoError> {
        {
            let Some(gl) = self.gl.as_ref() else {
                return Err(VideoError::other("shader load without a context"));
            };
            let mut backend = GlowShaderBackend::new(gl);
            self.catalog.load_all(
                &mut backend,
                provider,
                &self.profile.glsl,
                self.profile.flavor,
            )?;
        }

        self.settings.shader_support = self.catalog.shader_support();
        self.settings.shader_id = self.catalog.sanitize_index(self.settings.shader_id);

        // Without shader-effect support the per-frame path never rebinds a
        // program, so the fallback has to be bound here, once.
        if !self.settings.shader_support {
            if let (Some(gl), Some(entry)) = (self.gl.as_ref(), self.catalog.entry(0)) {
                unsafe { gl.use_program(Some(entry.program)) };
            }
        }

        let linear = self
            .catalog
            .entry(self.settings.shader_id as usize)
            .map(|e| e.linear)
            .unwrap_or(false);
        // Multi-screen play always smooths regardless of the entry's choice.
        self.set_linear(linear || self.settings.screen_count > 1);
        Ok(())
    }

    /// Applies linear/nearest filtering to every screen texture.
    pub fn set_linear(&self, linear: bool) {
        let Some(gl) = self.gl.as_ref() else { return };
        let filter = if linear { glow::LINEAR } else { glow::NEAREST } as i32;
        unsafe {
            for tex in self.screen_textures.iter().flatten() {
                gl.bind_texture(glow::TEXTURE_2D, Some(*tex));
                gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, filter);
                gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, filter);
            }
        }
    }

    /// Uploads one logical screen's framebuffer rows into its texture.
    /// No-op unless `Active`.
    pub fn update_screen(&mut self, index: usize, screen: &LogicalScreen) {
        if self.state != DeviceState::Active {
            return;
        }
        let Some(tex) = self.screen_textures.get(index).copied().flatten() else {
            return;
        };
        let Some(gl) = self.gl.as_ref() else { return };

        let height = screen.size.1.min(SCREEN_YSIZE);
        let needed = (screen.pitch * height) as usize;
        if screen.framebuffer.len() < needed {
            log::warn!("screen {index}: framebuffer shorter than pitch x height, upload skipped");
            return;
        }

        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(tex));
            gl.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                0,
                0,
                screen.pitch,
                height,
                glow::RGB,
                glow::UNSIGNED_SHORT_5_6_5,
                glow::PixelUnpackData::Slice(bytemuck::cast_slice(&screen.framebuffer)),
            );
        }
    }

    /// Uploads every active screen in one call.
    pub fn update_screens(&mut self, screens: &[LogicalScreen]) {
        let count = self.settings.screen_count.clamp(0, SCREEN_COUNT as i32) as usize;
        for (index, screen) in screens.iter().enumerate().take(count) {
            self.update_screen(index, screen);
        }
    }

    pub fn update_overlay_yuv420(&mut self, frame: &OverlayFrame<'_>) {
        if self.state != DeviceState::Active {
            return;
        }
        pack_yuv420(
            &mut self.overlay_buffer,
            frame,
            self.profile.channel_offsets,
            self.settings.shader_support,
        );
        self.upload_overlay();
    }

    pub fn update_overlay_yuv422(&mut self, frame: &OverlayFrame<'_>) {
        if self.state != DeviceState::Active {
            return;
        }
        pack_yuv422(
            &mut self.overlay_buffer,
            frame,
            self.profile.channel_offsets,
            self.settings.shader_support,
        );
        self.upload_overlay();
    }

    pub fn update_overlay_yuv444(&mut self, frame: &OverlayFrame<'_>) {
        if self.state != DeviceState::Active {
            return;
        }
        pack_yuv444(
            &mut self.overlay_buffer,
            frame,
            self.profile.channel_offsets,
            self.settings.shader_support,
        );
        self.upload_overlay();
    }

    /// Uploads pre-packed 32-bit pixels (splash/still image) into the
    /// overlay texture. No-op unless `Active`.
    pub fn update_overlay_image(&mut self, width: i32, height: i32, pixels: &[u8]) {
        if self.state != DeviceState::Active {
            return;
        }
        let (Some(gl), Some(tex)) = (self.gl.as_ref(), self.overlay_texture) else {
            return;
        };
        let width = width.clamp(0, VIDEO_TEXTURE_W as i32);
        let height = height.clamp(0, VIDEO_TEXTURE_H as i32);
        if pixels.len() < (width * height * 4) as usize {
            log::warn!("overlay image shorter than {width}x{height} pixels, upload skipped");
            return;
        }
        let fmt = self.profile.overlay_format;
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(tex));
            gl.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                0,
                0,
                width,
                height,
                fmt.format,
                fmt.ty,
                glow::PixelUnpackData::Slice(pixels),
            );
        }
    }

    fn upload_overlay(&self) {
        let (Some(gl), Some(tex)) = (self.gl.as_ref(), self.overlay_texture) else {
            return;
        };
        if self.overlay_buffer.len() < VIDEO_BUFFER_LEN {
            return;
        }
        let fmt = self.profile.overlay_format;
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(tex));
            gl.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                0,
                0,
                VIDEO_TEXTURE_W as i32,
                VIDEO_TEXTURE_H as i32,
                fmt.format,
                fmt.ty,
                glow::PixelUnpackData::Slice(bytemuck::cast_slice(&self.overlay_buffer)),
            );
        }
    }

    /// Delays drawing/swapping for `frames` presents, debouncing
    /// window-manager reconfiguration.
    pub fn set_refresh_window_delay(&mut self, frames: i32) {
        self.window_refresh_delay = frames.max(0);
    }

    /// Draws the composited frame and swaps buffers. No-op unless `Active`;
    /// a swap failure is logged and the frame dropped, never fatal.
    pub fn present(&mut self) {
        if self.state != DeviceState::Active {
            return;
        }

        if self.last_shader_id != self.settings.shader_id {
            self.settings.shader_id = self.catalog.sanitize_index(self.settings.shader_id);
            self.last_shader_id = self.settings.shader_id;
            let selected = self
                .catalog
                .entry(self.settings.shader_id as usize)
                .map(|e| (e.linear, e.program));
            if let Some((linear, program)) = selected {
                self.set_linear(linear);
                if self.settings.shader_support {
                    if let Some(gl) = self.gl.as_ref() {
                        unsafe { gl.use_program(Some(program)) };
                    }
                }
            }
        }

        if self.window_refresh_delay > 0 {
            self.window_refresh_delay -= 1;
            return;
        }

        let Some(gl) = self.gl.as_ref() else { return };
        unsafe {
            gl.clear(glow::COLOR_BUFFER_BIT);

            if self.settings.shader_support {
                if let (Some(entry), Some(layout)) = (
                    self.catalog.entry(self.settings.shader_id as usize),
                    self.layout.as_ref(),
                ) {
                    set_uniform_vec2(gl, entry.program, "textureSize", layout.texture_size);
                    set_uniform_vec2(gl, entry.program, "pixelSize", layout.pixel_size);
                    set_uniform_vec2(gl, entry.program, "viewSize", layout.view_size);
                    if let Some(loc) = gl.get_uniform_location(entry.program, "screenDim") {
                        gl.uniform_1_f32(
                            Some(&loc),
                            self.settings.dim_max * self.settings.dim_percent,
                        );
                    }
                }
            }

            let screen_count = self.settings.screen_count.clamp(0, SCREEN_COUNT as i32) as usize;
            let starts = start_vertices(screen_count, self.profile.vertex_layout);
            if screen_count == 0 {
                if let Some(tex) = self.overlay_texture {
                    gl.bind_texture(glow::TEXTURE_2D, Some(tex));
                    gl.draw_arrays(glow::TRIANGLES, starts[0], 6);
                }
            } else {
                for (index, &start) in starts.iter().enumerate().take(screen_count) {
                    if let Some(tex) = self.screen_textures[index] {
                        gl.bind_texture(glow::TEXTURE_2D, Some(tex));
                        gl.draw_arrays(glow::TRIANGLES, start, 6);
                    }
                }
            }
        }

        if let (Some(surface), Some(context)) = (&self.gl_surface, &self.gl_context) {
            if let Err(err) = surface.swap_buffers(context) {
                log::warn!("buffer swap failed, frame dropped: {err}");
            }
        }
    }

    /// Tears the device down. Safe to call from any state and idempotent:
    /// every teardown step checks a live handle first. With `is_refresh` the
    /// display enumeration and scanline buffer survive for the next `init`;
    /// without it the device is fully reset.
    pub fn release(&mut self, is_refresh: bool) {
        if let Some(gl) = self.gl.take() {
            let mut backend = GlowShaderBackend::new(&gl);
            self.catalog.release(&mut backend);
            unsafe {
                for slot in self.screen_textures.iter_mut() {
                    if let Some(tex) = slot.take() {
                        gl.delete_texture(tex);
                    }
                }
                if let Some(tex) = self.overlay_texture.take() {
                    gl.delete_texture(tex);
                }
                if let Some(vao) = self.vao.take() {
                    gl.delete_vertex_array(vao);
                }
                if let Some(vbo) = self.vbo.take() {
                    gl.delete_buffer(vbo);
                }
            }
        }

        // Reverse creation order: context, then surface, then display.
        self.gl_context = None;
        self.gl_surface = None;
        self.gl_display = None;

        self.overlay_buffer = Vec::new();
        self.layout = None;
        self.last_shader_id = -1;
        self.state = DeviceState::Uninitialized;

        if !is_refresh {
            self.displays.clear();
            self.scanlines = Vec::new();
        }
    }

    /// External notification that the window/surface is gone (backgrounded,
    /// destroyed). Releases GPU state but keeps CPU-side buffers for the
    /// re-init that follows when the window returns. Safe to call
    /// repeatedly.
    pub fn notify_surface_lost(&mut self) {
        self.release(true);
        self.state = DeviceState::SurfaceLost;
        self.settings.window_state = WindowState::Inactive;
    }
}

impl Drop for VideoDevice {
    fn drop(&mut self) {
        self.release(false);
    }
}

unsafe fn set_uniform_vec2(
    gl: &glow::Context,
    program: glow::NativeProgram,
    name: &str,
    value: (f32, f32),
) {
    if let Some(loc) = gl.get_uniform_location(program, name) {
        gl.uniform_2_f32(Some(&loc), value.0, value.1);
    }
}
