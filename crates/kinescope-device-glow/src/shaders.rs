//! Shader catalog: ordered named programs with an always-linking fallback.

use std::fmt;
use std::path::PathBuf;

use glow::HasContext;
use kinescope_core::VideoError;

use crate::profile::{ContextFlavor, GlslProfile};

/// Catalog capacity; loads past this are silently dropped.
pub const MAX_SHADERS: usize = 32;

/// The fixed load order. A name whose source is missing is simply omitted.
pub const BASE_SHADER_LIST: &[(&str, bool)] = &[
    ("None", false),
    ("Clean", true),
    ("CRT-Yeetron", true),
    ("CRT-Yee64", true),
    ("YUV-420", true),
    ("YUV-422", true),
    ("YUV-444", true),
    ("RGB-Image", true),
];

// Embedded pass-through pair used when nothing external loads. No external
// source, no conditional features; it must always link.
const FALLBACK_VERT: &str = r#"
in_V vec3 in_pos;
in_V vec4 in_color;
in_V vec2 in_UV;
out vec4 ex_color;
out vec2 ex_UV;

void main()
{
    gl_Position = vec4(in_pos, 1.0);
    ex_color    = in_color;
    ex_UV       = in_UV;
}
"#;

const FALLBACK_FRAG_DESKTOP: &str = r#"
in_F vec2 ex_UV;
in_F vec4 ex_color;

uniform sampler2D texDiffuse;

out vec4 out_color;

void main()
{
    out_color = texture(texDiffuse, ex_UV);
}
"#;

const FALLBACK_FRAG_GLES: &str = r#"
in_F vec2 ex_UV;
in_F vec4 ex_color;

uniform sampler2D texDiffuse;

void main()
{
    gl_FragColor = texture2D(texDiffuse, ex_UV);
}
"#;

/// Boundary contract for fetching shader source text. Absence of a file is
/// not fatal; the catalog omits the entry.
pub trait SourceProvider {
    fn fetch_source(&self, logical_path: &str) -> Option<Vec<u8>>;
}

/// Resolves logical shader paths under a data root on disk.
#[derive(Debug, Clone)]
pub struct DirSourceProvider {
    root: PathBuf,
}

impl DirSourceProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirSourceProvider { root: root.into() }
    }
}

impl SourceProvider for DirSourceProvider {
    fn fetch_source(&self, logical_path: &str) -> Option<Vec<u8>> {
        std::fs::read(self.root.join(logical_path)).ok()
    }
}

/// Compile/link seam between the catalog and the graphics backend. The glow
/// device implements it; contract tests drive the catalog with a counting
/// mock instead.
pub trait ShaderBackend {
    type Program: Copy + PartialEq + fmt::Debug;

    fn compile(&mut self, vert: &str, frag: &str) -> Result<Self::Program, VideoError>;
    fn delete(&mut self, program: Self::Program);
}

pub struct GlowShaderBackend<'a> {
    gl: &'a glow::Context,
}

impl<'a> GlowShaderBackend<'a> {
    pub fn new(gl: &'a glow::Context) -> Self {
        GlowShaderBackend { gl }
    }
}

impl fmt::Debug for GlowShaderBackend<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlowShaderBackend").finish_non_exhaustive()
    }
}

impl ShaderBackend for GlowShaderBackend<'_> {
    type Program = glow::NativeProgram;

    fn compile(&mut self, vert: &str, frag: &str) -> Result<Self::Program, VideoError> {
        unsafe { compile_program(self.gl, vert, frag) }
    }

    fn delete(&mut self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }
}

// Attribute slots are fixed across every program so the one vertex buffer
// serves them all.
const ATTRIB_BINDINGS: &[(u32, &str)] = &[(0, "in_pos"), (1, "in_color"), (2, "in_UV")];

pub unsafe fn compile_program(
    gl: &glow::Context,
    vert_src: &str,
    frag_src: &str,
) -> Result<glow::NativeProgram, VideoError> {
    let vs = gl
        .create_shader(glow::VERTEX_SHADER)
        .map_err(|e| VideoError::GlCreate(format!("create_shader(VS) failed: {e:?}")))?;
    gl.shader_source(vs, vert_src);
    gl.compile_shader(vs);
    if !gl.get_shader_compile_status(vs) {
        let log = gl.get_shader_info_log(vs);
        gl.delete_shader(vs);
        return Err(VideoError::VertexCompile(log));
    }

    let fs = gl
        .create_shader(glow::FRAGMENT_SHADER)
        .map_err(|e| VideoError::GlCreate(format!("create_shader(FS) failed: {e:?}")))?;
    gl.shader_source(fs, frag_src);
    gl.compile_shader(fs);
    if !gl.get_shader_compile_status(fs) {
        let log = gl.get_shader_info_log(fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);
        return Err(VideoError::FragmentCompile(log));
    }

    let program = gl
        .create_program()
        .map_err(|e| VideoError::GlCreate(format!("create_program failed: {e:?}")))?;
    gl.attach_shader(program, vs);
    gl.attach_shader(program, fs);
    for &(index, name) in ATTRIB_BINDINGS {
        gl.bind_attrib_location(program, index, name);
    }
    gl.link_program(program);

    gl.detach_shader(program, vs);
    gl.detach_shader(program, fs);
    gl.delete_shader(vs);
    gl.delete_shader(fs);

    if !gl.get_program_link_status(program) {
        let log = gl.get_program_info_log(program);
        gl.delete_program(program);
        return Err(VideoError::Link(log));
    }

    Ok(program)
}

#[derive(Debug, Clone)]
pub struct ShaderEntry<P> {
    pub name: String,
    pub linear: bool,
    pub program: P,
}

/// Append-only, capacity-capped collection of linked programs.
///
/// Exactly one entry is selected at a time while the device is active; the
/// selection index lives in the settings record so it survives re-init.
#[derive(Debug)]
pub struct ShaderCatalog<P> {
    entries: Vec<ShaderEntry<P>>,
    shader_support: bool,
}

impl<P: Copy + PartialEq + fmt::Debug> Default for ShaderCatalog<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Copy + PartialEq + fmt::Debug> ShaderCatalog<P> {
    pub fn new() -> Self {
        ShaderCatalog {
            entries: Vec::new(),
            shader_support: false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> Option<&ShaderEntry<P>> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[ShaderEntry<P>] {
        &self.entries
    }

    /// Whether shader-effect support is available this session. False after
    /// the embedded fallback had to stand in; downstream uniform writes are
    /// skipped for the whole session in that case.
    pub fn shader_support(&self) -> bool {
        self.shader_support
    }

    /// Loads one named program. A second load of the same name and any load
    /// past capacity are no-ops; missing source or a failed build omits the
    /// entry without error.
    pub fn load<B: ShaderBackend<Program = P>>(
        &mut self,
        backend: &mut B,
        provider: &dyn SourceProvider,
        glsl: &GlslProfile,
        name: &str,
        linear: bool,
    ) {
        if self.entries.iter().any(|e| e.name == name) {
            return;
        }
        if self.entries.len() >= MAX_SHADERS {
            return;
        }

        // Every program shares the stock vertex stage; only the fragment
        // stage is per-name.
        let vs_path = format!("Data/Shaders/{}/None.vs", glsl.tier);
        let fs_path = format!("Data/Shaders/{}/{}.fs", glsl.tier, name);
        let Some(vs_body) = provider.fetch_source(&vs_path) else {
            return;
        };
        let Some(fs_body) = provider.fetch_source(&fs_path) else {
            return;
        };

        let vert = assemble(glsl, &glsl.vs_precision, &vs_body);
        let frag = assemble(glsl, &glsl.fs_precision, &fs_body);
        match backend.compile(&vert, &frag) {
            Ok(program) => self.entries.push(ShaderEntry {
                name: name.to_string(),
                linear,
                program,
            }),
            Err(err) => log::warn!("shader '{name}' failed to build: {err}"),
        }
    }

    /// Loads the fixed list, then falls back to the embedded pass-through
    /// pair when nothing loaded, downgrading shader-effect support.
    pub fn load_all<B: ShaderBackend<Program = P>>(
        &mut self,
        backend: &mut B,
        provider: &dyn SourceProvider,
        glsl: &GlslProfile,
        flavor: ContextFlavor,
    ) -> Result<(), VideoError> {
        self.shader_support = true;

        for &(name, linear) in BASE_SHADER_LIST {
            self.load(backend, provider, glsl, name, linear);
        }

        if self.entries.is_empty() {
            self.load_fallback(backend, glsl, flavor)?;
        }
        Ok(())
    }

    fn load_fallback<B: ShaderBackend<Program = P>>(
        &mut self,
        backend: &mut B,
        glsl: &GlslProfile,
        flavor: ContextFlavor,
    ) -> Result<(), VideoError> {
        log::warn!("no shaders loaded; using the embedded pass-through fallback");

        let frag_body = match flavor {
            ContextFlavor::OpenGl => FALLBACK_FRAG_DESKTOP,
            ContextFlavor::Gles => FALLBACK_FRAG_GLES,
        };
        let vert = format!("{}{}{}", glsl.version_line, glsl.defines, FALLBACK_VERT);
        let frag = format!("{}{}{}", glsl.version_line, glsl.defines, frag_body);

        let program = backend.compile(&vert, &frag)?;
        self.entries.push(ShaderEntry {
            name: "None".to_string(),
            linear: false,
            program,
        });
        self.shader_support = false;
        Ok(())
    }

    /// Clamps a persisted selection index to the catalog's current extent.
    pub fn sanitize_index(&self, id: i32) -> i32 {
        if id < 0 || id as usize >= self.entries.len() {
            0
        } else {
            id
        }
    }

    /// Deletes every program and empties the catalog.
    pub fn release<B: ShaderBackend<Program = P>>(&mut self, backend: &mut B) {
        for entry in self.entries.drain(..) {
            backend.delete(entry.program);
        }
        self.shader_support = false;
    }
}

fn assemble(glsl: &GlslProfile, precision: &str, body: &[u8]) -> String {
    let body = String::from_utf8_lossy(body);
    let mut src = String::with_capacity(
        glsl.version_line.len() + glsl.defines.len() + precision.len() + body.len(),
    );
    src.push_str(&glsl.version_line);
    src.push_str(&glsl.defines);
    src.push_str(precision);
    src.push_str(&body);
    src
}
