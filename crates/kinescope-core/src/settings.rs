use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VideoError;
use crate::screen::{DEFAULT_PIXWIDTH, SCREEN_YSIZE};

/// Window/session lifecycle as seen by the host engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowState {
    Uninitialized,
    Active,
    Inactive,
}

/// The mutable video settings record shared with the rest of the host engine.
///
/// The presentation device reads the geometry/screen-count fields and writes
/// back the computed viewport and shader-support fields. `viewport_w` and
/// `viewport_h` hold the *reciprocal* view size consumed by screen-space
/// shader effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    pub pix_width: i32,
    pub pix_height: i32,
    pub refresh_rate: i32,
    pub screen_count: i32,
    pub window_state: WindowState,
    pub shader_id: i32,
    pub shader_support: bool,
    pub dim_max: f32,
    pub dim_percent: f32,
    pub viewport_x: i32,
    pub viewport_y: i32,
    pub viewport_w: f32,
    pub viewport_h: f32,
    pub fs_width: i32,
    pub fs_height: i32,
    /// Caller-tunable clamp on the active screen width; 0 leaves the
    /// platform profile's default in effect.
    pub max_pix_width: i32,
}

impl Default for VideoSettings {
    fn default() -> Self {
        VideoSettings {
            pix_width: DEFAULT_PIXWIDTH,
            pix_height: SCREEN_YSIZE,
            refresh_rate: 60,
            screen_count: 1,
            window_state: WindowState::Uninitialized,
            shader_id: 0,
            shader_support: false,
            dim_max: 1.0,
            dim_percent: 1.0,
            viewport_x: 0,
            viewport_y: 0,
            viewport_w: 0.0,
            viewport_h: 0.0,
            fs_width: 0,
            fs_height: 0,
            max_pix_width: 0,
        }
    }
}

impl VideoSettings {
    pub fn from_json_path(path: &Path) -> Result<Self, VideoError> {
        let text = fs::read_to_string(path).map_err(|source| VideoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| VideoError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_json_string(&self) -> Result<String, VideoError> {
        serde_json::to_string_pretty(self).map_err(|source| VideoError::Json {
            path: Default::default(),
            source,
        })
    }
}
