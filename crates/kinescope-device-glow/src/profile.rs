//! Platform family configuration.
//
// The two target families differ in packed-pixel channel order, context
// flavor/version preferences, GLSL dialect preamble, and overlay upload
// formats. All of it is plain data injected at device construction; nothing
// in the device logic branches on a compile-time target.

use kinescope_layout::VertexLayoutKind;
use kinescope_pixels::ChannelOffsets;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextFlavor {
    OpenGl,
    Gles,
}

/// Format/type constants handed to the overlay texture upload boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayFormat {
    pub internal_format: i32,
    pub format: u32,
    pub ty: u32,
}

/// Preamble pieces wrapped around every shader source: version/feature line,
/// engine defines, and per-stage precision qualifiers.
#[derive(Debug, Clone)]
pub struct GlslProfile {
    /// Path segment under `Data/Shaders/` the source provider resolves.
    pub tier: String,
    pub version_line: String,
    pub defines: String,
    pub vs_precision: String,
    pub fs_precision: String,
}

#[derive(Debug, Clone)]
pub struct PlatformProfile {
    pub channel_offsets: ChannelOffsets,
    pub flavor: ContextFlavor,
    /// Context versions to try at init, in order; first success wins.
    pub context_versions: Vec<(u8, u8)>,
    pub vertex_layout: VertexLayoutKind,
    pub glsl: GlslProfile,
    pub overlay_format: OverlayFormat,
    /// Platform clamp on active screen width; 0 leaves widths unclamped.
    /// The settings record's own `max_pix_width` takes precedence.
    pub default_max_pix_width: i32,
}

impl PlatformProfile {
    /// Desktop-class targets: core-profile OpenGL, reversed-component
    /// overlay uploads.
    pub fn desktop_core() -> Self {
        PlatformProfile {
            channel_offsets: ChannelOffsets::BGRA,
            flavor: ContextFlavor::OpenGl,
            context_versions: vec![(4, 3), (3, 3)],
            vertex_layout: VertexLayoutKind::Extended,
            glsl: GlslProfile {
                tier: "GL3".to_string(),
                version_line: "#version 330 core\n#define in_V in\n#define in_F in\n"
                    .to_string(),
                defines: "#define EXTENDED_QUADS (1)\n".to_string(),
                vs_precision: String::new(),
                fs_precision: String::new(),
            },
            overlay_format: OverlayFormat {
                internal_format: glow::RGB as i32,
                format: glow::BGRA,
                ty: glow::UNSIGNED_INT_8_8_8_8_REV,
            },
            default_max_pix_width: 0,
        }
    }

    /// Mobile-class targets: GLES with plain byte-order uploads and a width
    /// clamp that keeps the software renderer affordable.
    pub fn gles() -> Self {
        PlatformProfile {
            channel_offsets: ChannelOffsets::RGBA,
            flavor: ContextFlavor::Gles,
            context_versions: vec![(2, 0), (3, 0), (3, 1)],
            vertex_layout: VertexLayoutKind::Extended,
            glsl: GlslProfile {
                tier: "GL3".to_string(),
                version_line: "#version 100\n\
                               #extension GL_OES_standard_derivatives : enable\n\
                               #define in_V attribute\n\
                               #define out varying\n\
                               #define in_F varying\n"
                    .to_string(),
                defines: "#define EXTENDED_QUADS (1)\n".to_string(),
                vs_precision: "precision highp float;\n".to_string(),
                fs_precision: "precision highp float;\n".to_string(),
            },
            overlay_format: OverlayFormat {
                internal_format: glow::RGBA as i32,
                format: glow::RGBA,
                ty: glow::UNSIGNED_BYTE,
            },
            default_max_pix_width: 510,
        }
    }
}
