#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

pub mod error;
pub mod screen;
pub mod settings;

pub use error::VideoError;
pub use screen::{
    DisplayMode, LogicalScreen, ScanlineInfo, DEFAULT_PIXWIDTH, SCREEN_COUNT, SCREEN_YSIZE,
};
pub use settings::{VideoSettings, WindowState};
