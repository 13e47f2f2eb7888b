use kinescope_layout::{
    build_vertices, compute, start_vertices, LayoutParams, VertexLayoutKind, ATLAS_SMALL,
};

/// Two-screen split on a 1080p output: widths track the output aspect
/// (428 = 1920/1080 * 240 rounded up to a multiple of 4), the shared atlas
/// stays at the small tier for 240-row screens, and the draw sequence uses
/// the fixed extended two-screen offsets.
#[test]
fn two_screen_1080p_scenario() {
    let layout = compute(&LayoutParams {
        output_size: (1920, 1080),
        screens: &[(424, 240), (424, 240)],
        max_pix_width: None,
    })
    .unwrap();

    assert_eq!(layout.screens[0].width, 428);
    assert_eq!(layout.screens[1].width, 428);
    assert_eq!(layout.texture_size, ATLAS_SMALL);

    // Aspects agree within tolerance, so the full output is used.
    assert_eq!(layout.viewport_pos, (0, 0));
    assert_eq!(layout.viewport_size, (1920, 1080));

    let starts = start_vertices(2, VertexLayoutKind::Extended);
    assert_eq!(starts, &[18, 24]);
}

/// The same scenario with the caller-tunable width clamp engaged: the
/// content aspect drops below the output aspect and the horizontal extent
/// shrinks, centered, leaving bars at the sides.
#[test]
fn clamped_two_screen_scenario_produces_side_bars() {
    let layout = compute(&LayoutParams {
        output_size: (1920, 1080),
        screens: &[(424, 240), (424, 240)],
        max_pix_width: Some(400),
    })
    .unwrap();

    assert_eq!(layout.screens[0].width, 400);
    assert!(layout.viewport_size.0 < 1920);
    assert_eq!(layout.viewport_size.1, 1080);
    assert!(layout.viewport_pos.0 > 0);
    assert_eq!(layout.viewport_pos.1, 0);
}

/// Every draw offset a screen count can select must address a full quad
/// inside the built vertex buffer.
#[test]
fn start_vertices_stay_inside_the_built_buffers() {
    let layout = compute(&LayoutParams {
        output_size: (1920, 1080),
        screens: &[(424, 240); 4],
        max_pix_width: None,
    })
    .unwrap();

    for kind in [VertexLayoutKind::Legacy, VertexLayoutKind::Extended] {
        let verts = build_vertices(&layout, kind);
        assert_eq!(verts.len(), kind.vertex_count());
        for count in 0..=4 {
            for &start in start_vertices(count, kind) {
                assert!(
                    (start as usize) + 6 <= verts.len(),
                    "offset {start} out of range for {kind:?} with {count} screens"
                );
            }
        }
    }
}

/// The settings write-back scalars are reciprocals of the drawn view, which
/// shaders multiply against to reach screen space.
#[test]
fn reciprocal_scalars_match_the_drawn_view() {
    let layout = compute(&LayoutParams {
        output_size: (1366, 768),
        screens: &[(424, 240)],
        max_pix_width: Some(510),
    })
    .unwrap();

    assert!((layout.view_scale.0 - 1.0 / layout.view_size.0).abs() < f32::EPSILON);
    assert!((layout.view_scale.1 - 1.0 / layout.view_size.1).abs() < f32::EPSILON);
}
