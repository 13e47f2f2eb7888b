//! Fixed vertex buffer construction.
//
// The device draws every configuration from one prebuilt vertex buffer:
// 6-vertex (two-triangle) quads at the offsets reported by
// `start_vertices`. Screen quads sample the atlas sub-region actually
// occupied by a logical screen; the overlay quad samples its full texture.

use bytemuck::{Pod, Zeroable};

use crate::{ViewportLayout, VertexLayoutKind};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RenderVertex {
    pub pos: [f32; 3],
    pub color: [u8; 4],
    pub tex: [f32; 2],
}

/// Quad in normalized device coordinates: `(left, top)` to `(right, bottom)`
/// with y pointing up, texture coordinates `(0, 0)` at the top-left growing
/// to `(u_max, v_max)` at the bottom-right.
fn quad(
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
    u_max: f32,
    v_max: f32,
    offset: (f32, f32),
) -> [RenderVertex; 6] {
    let v = |x: f32, y: f32, u: f32, t: f32| RenderVertex {
        pos: [x + offset.0, y + offset.1, 0.0],
        color: [0xFF; 4],
        tex: [u, t],
    };

    let tl = v(left, top, 0.0, 0.0);
    let tr = v(right, top, u_max, 0.0);
    let bl = v(left, bottom, 0.0, v_max);
    let br = v(right, bottom, u_max, v_max);

    [tl, tr, bl, tr, br, bl]
}

/// Builds the fixed vertex buffer for a computed layout.
///
/// Screen quads get a half-pixel position correction (`0.5 / view_size`) and
/// a texture extent equal to screen 0's share of the atlas; the overlay quad
/// covers its texture fully and needs no correction.
pub fn build_vertices(layout: &ViewportLayout, kind: VertexLayoutKind) -> Vec<RenderVertex> {
    let half_pixel = (0.5 / layout.view_size.0, -0.5 / layout.view_size.1);
    let u_max = layout.pixel_size.0 / layout.texture_size.0;
    let v_max = layout.pixel_size.1 / layout.texture_size.1;

    let screen_quad = |left: f32, top: f32, right: f32, bottom: f32| {
        quad(left, top, right, bottom, u_max, v_max, half_pixel)
    };

    let mut verts = Vec::with_capacity(kind.vertex_count());

    // Quad 0: single-screen fullscreen.
    verts.extend(screen_quad(-1.0, 1.0, 1.0, -1.0));
    // Quads 1-2: two-screen pair, top and bottom halves.
    verts.extend(screen_quad(-1.0, 1.0, 1.0, 0.0));
    verts.extend(screen_quad(-1.0, 0.0, 1.0, -1.0));

    if kind == VertexLayoutKind::Extended {
        // Quads 3-4: the extended buffer's own two-screen pair.
        verts.extend(screen_quad(-1.0, 1.0, 1.0, 0.0));
        verts.extend(screen_quad(-1.0, 0.0, 1.0, -1.0));
        // Quads 5-8: quadrants for three- and four-screen play.
        verts.extend(screen_quad(-1.0, 1.0, 0.0, 0.0));
        verts.extend(screen_quad(0.0, 1.0, 1.0, 0.0));
        verts.extend(screen_quad(-1.0, 0.0, 0.0, -1.0));
        verts.extend(screen_quad(0.0, 0.0, 1.0, -1.0));
    }

    // Final quad: the overlay, scaled to its whole texture.
    verts.extend(quad(-1.0, 1.0, 1.0, -1.0, 1.0, 1.0, (0.0, 0.0)));

    verts
}
