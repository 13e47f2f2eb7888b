/// Maximum number of simultaneously active logical screens (player viewports).
pub const SCREEN_COUNT: usize = 4;

/// Fixed vertical resolution of a logical screen's framebuffer.
pub const SCREEN_YSIZE: i32 = 240;

/// Nominal minimum active width of a logical screen.
pub const DEFAULT_PIXWIDTH: i32 = 424;

/// One player's independent game framebuffer: packed RGB565 rows, `pitch`
/// pixels per row. The presentation device only reads the dimensions at
/// layout time and the pixel data at texture-upload time.
#[derive(Debug, Clone)]
pub struct LogicalScreen {
    pub size: (i32, i32),
    pub pitch: i32,
    pub framebuffer: Vec<u16>,
}

impl LogicalScreen {
    pub fn new(width: i32, height: i32) -> Self {
        let mut screen = LogicalScreen {
            size: (0, 0),
            pitch: 0,
            framebuffer: Vec::new(),
        };
        screen.set_size(width, height);
        screen
    }

    /// Resizes the framebuffer. Row pitch is aligned up to 16 pixels so rows
    /// stay upload-friendly; pixel contents are reset to black.
    pub fn set_size(&mut self, width: i32, height: i32) {
        let width = width.max(1);
        let height = height.max(1);
        self.size = (width, height);
        self.pitch = (width + 15) & !15;
        self.framebuffer = vec![0u16; (self.pitch * height) as usize];
    }
}

/// A caller-visible display mode record, published by the device at init.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMode {
    pub width: i32,
    pub height: i32,
    pub refresh_rate: i32,
}

/// Per-scanline start/deform vectors consumed by the software renderer.
/// The device allocates one entry per output scanline and keeps the buffer
/// alive across a refresh-style release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanlineInfo {
    pub start: (i32, i32),
    pub deform: (i32, i32),
}
