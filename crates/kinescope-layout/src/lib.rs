//! Pure display/viewport layout computation.
//
// This crate contains **only** geometry: given an output surface size and the
// logical screens' pixel dimensions, it computes the aspect-preserving
// viewport rectangle, the shared texture-atlas tier, and the fixed
// start-vertex tables used by the draw sequence. No GPU calls.

pub mod vertex;

pub use vertex::{build_vertices, RenderVertex};

/// Small texture-atlas tier: shared by all screens when every screen's pixel
/// height fits in 256 rows.
pub const ATLAS_SMALL: (f32, f32) = (512.0, 256.0);

/// Large texture-atlas tier for taller screens.
pub const ATLAS_LARGE: (f32, f32) = (1024.0, 512.0);

/// Aspect-ratio comparison tolerance before either axis is shrunk.
const ASPECT_TOLERANCE: f32 = 0.1;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    #[error("degenerate size: output {output_w}x{output_h}, screen height {screen_h}")]
    DegenerateSize {
        output_w: i32,
        output_h: i32,
        screen_h: i32,
    },
}

/// Which fixed vertex buffer the device uses.
///
/// `Legacy` is the 24-vertex buffer (fullscreen, a two-screen pair, and the
/// overlay quad); `Extended` is the 60-vertex buffer that adds the
/// three/four-screen quadrant quads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexLayoutKind {
    Legacy,
    Extended,
}

impl VertexLayoutKind {
    pub fn vertex_count(self) -> usize {
        match self {
            VertexLayoutKind::Legacy => 24,
            VertexLayoutKind::Extended => 60,
        }
    }
}

/// One logical screen's *active* pixel extent after width rounding/clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenExtent {
    pub width: i32,
    pub height: i32,
}

/// Inputs to [`compute`]. `screens` carries one `(nominal minimum width,
/// pixel height)` entry per configured screen slot and must not be empty;
/// the *active* screen count only matters later, at draw time.
#[derive(Debug, Clone)]
pub struct LayoutParams<'a> {
    pub output_size: (i32, i32),
    pub screens: &'a [(i32, i32)],
    /// Upper clamp on active screen width; `None` leaves widths unclamped.
    pub max_pix_width: Option<i32>,
}

/// Derived layout, immutable once computed. Recomputed whenever the output
/// surface size, screen count, or per-screen pixel size changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportLayout {
    /// Integer pixel rectangle handed to the graphics viewport call.
    pub viewport_pos: (i32, i32),
    pub viewport_size: (i32, i32),
    /// Drawn view extent in output pixels (at most one axis shrunk).
    pub view_size: (f32, f32),
    /// Reciprocal view size, consumed by screen-space shader effects.
    pub view_scale: (f32, f32),
    /// Screen 0's active pixel extent.
    pub pixel_size: (f32, f32),
    /// Shared texture-atlas tier for all screen textures and the overlay.
    pub texture_size: (f32, f32),
    pub screens: Vec<ScreenExtent>,
}

/// Computes the viewport layout. Pure and deterministic; callable whenever
/// geometry changes (display reconfiguration, screen-count change).
pub fn compute(params: &LayoutParams<'_>) -> Result<ViewportLayout, LayoutError> {
    let (out_w, out_h) = params.output_size;
    if out_w <= 0 || out_h <= 0 || params.screens.is_empty() {
        return Err(LayoutError::DegenerateSize {
            output_w: out_w,
            output_h: out_h,
            screen_h: params.screens.first().map_or(0, |s| s.1),
        });
    }

    let mut view = (out_w as f32, out_h as f32);
    let view_aspect = view.0 / view.1;

    let mut max_pix_height = 0;
    let mut screens = Vec::with_capacity(params.screens.len());
    for &(min_width, pix_height) in params.screens {
        if pix_height <= 0 {
            return Err(LayoutError::DegenerateSize {
                output_w: out_w,
                output_h: out_h,
                screen_h: pix_height,
            });
        }
        if pix_height > max_pix_height {
            max_pix_height = pix_height;
        }

        // Active width follows the output aspect, rounded up to a multiple
        // of 4, never narrower than the nominal width.
        let mut width = ((view_aspect * pix_height as f32 + 3.0) as i32) & !3;
        if width < min_width {
            width = min_width;
        }
        if let Some(max_width) = params.max_pix_width {
            if max_width > 0 && width > max_width {
                width = max_width;
            }
        }

        screens.push(ScreenExtent {
            width,
            height: pix_height,
        });
    }

    let pixel_size = (screens[0].width as f32, screens[0].height as f32);
    let pix_aspect = pixel_size.0 / pixel_size.1;

    let mut viewport_pos = (0i32, 0i32);
    let mut viewport_size = (out_w, out_h);

    if view.0 / view.1 <= pix_aspect + ASPECT_TOLERANCE {
        if pix_aspect - ASPECT_TOLERANCE > view.0 / view.1 {
            // Output too tall for the content: shrink the vertical extent and
            // center it (bars above and below).
            view.1 = (pixel_size.1 / pixel_size.0) * view.0;
            viewport_pos.1 = (out_h >> 1) - (view.1 * 0.5) as i32;
            viewport_size.1 = view.1 as i32;
        }
    } else {
        // Output too wide: shrink the horizontal extent and center it
        // (bars left and right).
        view.0 = pix_aspect * view.1;
        viewport_pos.0 = (out_w >> 1) - (view.0 * 0.5) as i32;
        viewport_size.0 = view.0 as i32;
    }

    let texture_size = if max_pix_height <= 256 {
        ATLAS_SMALL
    } else {
        ATLAS_LARGE
    };

    Ok(ViewportLayout {
        viewport_pos,
        viewport_size,
        view_size: view,
        view_scale: (1.0 / view.0, 1.0 / view.1),
        pixel_size,
        texture_size,
        screens,
    })
}

// Start offsets of each screen's 6-vertex quad inside the fixed vertex
// buffers. Index 0 of the 0P tables is the overlay quad.
const START_LEGACY_0P: [i32; 1] = [18];
const START_LEGACY_1P: [i32; 1] = [0];
const START_LEGACY_2P: [i32; 2] = [6, 12];

const START_EXT_0P: [i32; 1] = [54];
const START_EXT_1P: [i32; 1] = [0];
const START_EXT_2P: [i32; 2] = [18, 24];
const START_EXT_3P: [i32; 3] = [30, 36, 42];
const START_EXT_4P: [i32; 4] = [30, 36, 42, 48];

/// Fixed lookup of per-screen quad start offsets, selected by the active
/// screen count. Screen count 0 yields the overlay quad's offset. The legacy
/// buffer has no three/four-screen quads and clamps to its two-screen table.
pub fn start_vertices(screen_count: usize, kind: VertexLayoutKind) -> &'static [i32] {
    match kind {
        VertexLayoutKind::Legacy => match screen_count {
            0 => &START_LEGACY_0P,
            1 => &START_LEGACY_1P,
            _ => &START_LEGACY_2P,
        },
        VertexLayoutKind::Extended => match screen_count {
            0 => &START_EXT_0P,
            1 => &START_EXT_1P,
            2 => &START_EXT_2P,
            3 => &START_EXT_3P,
            _ => &START_EXT_4P,
        },
    }
}
