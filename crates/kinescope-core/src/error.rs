use std::fmt;
use std::path::PathBuf;

/// Engine-level errors used across kinescope crates.
///
/// Contract rule: this type lives in `kinescope-core` and is re-exported by
/// backend crates.
#[derive(Debug)]
pub enum VideoError {
    // ---- Settings / config ----
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    // ---- Context / surface acquisition (fatal init failures) ----
    Display(String),
    Surface(String),
    Context(String),

    // ---- Backend object creation / shader build ----
    GlCreate(String),
    VertexCompile(String),
    FragmentCompile(String),
    Link(String),

    // ---- Viewport computation preconditions ----
    Layout(String),

    // ---- Fallback ----
    Other(String),
}

impl VideoError {
    pub fn other<T: Into<String>>(s: T) -> Self {
        VideoError::Other(s.into())
    }
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::Io { path, source } => {
                write!(f, "io error at {}: {}", path.display(), source)
            }
            VideoError::Json { path, source } => {
                write!(f, "json parse error at {}: {}", path.display(), source)
            }

            VideoError::Display(msg) => write!(f, "display connection failed: {msg}"),
            VideoError::Surface(msg) => write!(f, "surface creation failed: {msg}"),
            VideoError::Context(msg) => write!(f, "context creation failed: {msg}"),

            VideoError::GlCreate(msg) => write!(f, "backend object creation failed: {msg}"),
            VideoError::VertexCompile(msg) => write!(f, "vertex shader compile error: {msg}"),
            VideoError::FragmentCompile(msg) => write!(f, "fragment shader compile error: {msg}"),
            VideoError::Link(msg) => write!(f, "program link error: {msg}"),

            VideoError::Layout(msg) => write!(f, "viewport layout error: {msg}"),

            VideoError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for VideoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VideoError::Io { source, .. } => Some(source),
            VideoError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}
