use kinescope_pixels::{
    pack, pack_yuv420, pack_yuv444, ChannelOffsets, OverlayFrame, Subsampling, VIDEO_BUFFER_LEN,
    VIDEO_TEXTURE_W,
};

fn buffer() -> Vec<u32> {
    vec![0u32; VIDEO_BUFFER_LEN]
}

/// 4:2:0 golden value: a 4x4 frame of constant luma with matching 2x2
/// chroma. The chroma-resolution region carries the platform-specific packed
/// combination of (Y, U, V) with full alpha under both channel presets.
#[test]
fn yuv420_golden_combination_under_both_presets() {
    let y = [0x55u8; 16];
    let u = [0x66u8; 4];
    let v = [0x77u8; 4];
    let frame = OverlayFrame {
        width: 4,
        height: 4,
        y: &y,
        u: &u,
        v: &v,
        stride_y: 4,
        stride_u: 2,
        stride_v: 2,
    };

    let mut dst = buffer();
    pack_yuv420(&mut dst, &frame, ChannelOffsets::BGRA, true);
    assert_eq!(dst[0], 0xFF55_6677);
    assert_eq!(dst[VIDEO_TEXTURE_W + 1], 0xFF55_6677);
    // Luma-only outside the chroma region.
    assert_eq!(dst[3], 0xFF55_0000);
    assert_eq!(dst[3 * VIDEO_TEXTURE_W], 0xFF55_0000);

    let mut dst = buffer();
    pack_yuv420(&mut dst, &frame, ChannelOffsets::RGBA, true);
    assert_eq!(dst[0], 0xFF77_6655);
    assert_eq!(dst[3], 0xFF00_0055);
}

#[test]
fn grayscale_fallback_has_equal_channels_and_full_alpha() {
    let y = [0x42u8; 16];
    let u = [0x00u8; 4];
    let v = [0xFFu8; 4];
    let frame = OverlayFrame {
        width: 4,
        height: 4,
        y: &y,
        u: &u,
        v: &v,
        stride_y: 4,
        stride_u: 2,
        stride_v: 2,
    };

    for subsampling in [Subsampling::Yuv420, Subsampling::Yuv422, Subsampling::Yuv444] {
        let mut dst = buffer();
        pack(&mut dst, &frame, subsampling, ChannelOffsets::BGRA, false);
        assert_eq!(dst[0], 0xFF42_4242, "{subsampling:?}");
        assert_eq!(dst[3 * VIDEO_TEXTURE_W + 3], 0xFF42_4242);
    }
}

#[test]
fn yuv444_fills_the_whole_active_region() {
    let y: Vec<u8> = (0..64u8).collect();
    let u = vec![0x11u8; 64];
    let v = vec![0x22u8; 64];
    let frame = OverlayFrame {
        width: 8,
        height: 8,
        y: &y,
        u: &u,
        v: &v,
        stride_y: 8,
        stride_u: 8,
        stride_v: 8,
    };

    let mut dst = buffer();
    pack_yuv444(&mut dst, &frame, ChannelOffsets::BGRA, true);

    for row in 0..8 {
        for col in 0..8 {
            let luma = y[row * 8 + col] as u32;
            let expected = 0xFF00_0000 | (luma << 16) | (0x11 << 8) | 0x22;
            assert_eq!(dst[row * VIDEO_TEXTURE_W + col], expected, "({col},{row})");
        }
    }
}

/// A frame narrower than the destination leaves the pitch remainder alone,
/// keeping partial frames positioned top-left inside the fixed-size buffer.
#[test]
fn destination_pitch_skip_preserves_surroundings() {
    let y = [0x80u8; 6 * 2];
    let u = [0x80u8; 3];
    let v = [0x80u8; 3];
    let frame = OverlayFrame {
        width: 6,
        height: 2,
        y: &y,
        u: &u,
        v: &v,
        stride_y: 6,
        stride_u: 3,
        stride_v: 3,
    };

    let mut dst = vec![0xAAAA_AAAAu32; VIDEO_BUFFER_LEN];
    pack_yuv420(&mut dst, &frame, ChannelOffsets::RGBA, true);

    for row in 0..2 {
        assert_ne!(dst[row * VIDEO_TEXTURE_W], 0xAAAA_AAAA);
        assert_eq!(dst[row * VIDEO_TEXTURE_W + 6], 0xAAAA_AAAA, "row {row}");
    }
    assert_eq!(dst[2 * VIDEO_TEXTURE_W], 0xAAAA_AAAA);
}
