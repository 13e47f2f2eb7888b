use std::collections::HashSet;

use kinescope_core::VideoError;
use kinescope_device_glow::{
    PlatformProfile, ShaderBackend, ShaderCatalog, SourceProvider, BASE_SHADER_LIST, MAX_SHADERS,
};

/// Counting backend: programs are plain ids, so every create/delete is
/// observable without a graphics context.
struct MockBackend {
    next_id: u32,
    live: HashSet<u32>,
    created: u32,
    deleted: u32,
    fail_compile: bool,
}

impl MockBackend {
    fn new() -> Self {
        MockBackend {
            next_id: 0,
            live: HashSet::new(),
            created: 0,
            deleted: 0,
            fail_compile: false,
        }
    }

    fn failing() -> Self {
        MockBackend {
            fail_compile: true,
            ..MockBackend::new()
        }
    }
}

impl ShaderBackend for MockBackend {
    type Program = u32;

    fn compile(&mut self, _vert: &str, _frag: &str) -> Result<u32, VideoError> {
        if self.fail_compile {
            return Err(VideoError::Link("forced link failure".to_string()));
        }
        self.next_id += 1;
        self.created += 1;
        self.live.insert(self.next_id);
        Ok(self.next_id)
    }

    fn delete(&mut self, program: u32) {
        self.live.remove(&program);
        self.deleted += 1;
    }
}

/// Provider with a source for every path.
struct AnyProvider;

impl SourceProvider for AnyProvider {
    fn fetch_source(&self, _logical_path: &str) -> Option<Vec<u8>> {
        Some(b"void main() {}".to_vec())
    }
}

/// Provider with no sources at all.
struct EmptyProvider;

impl SourceProvider for EmptyProvider {
    fn fetch_source(&self, _logical_path: &str) -> Option<Vec<u8>> {
        None
    }
}

fn profile() -> PlatformProfile {
    PlatformProfile::desktop_core()
}

#[test]
fn loading_the_same_name_twice_yields_one_entry() {
    let profile = profile();
    let mut backend = MockBackend::new();
    let mut catalog: ShaderCatalog<u32> = ShaderCatalog::new();

    catalog.load(&mut backend, &AnyProvider, &profile.glsl, "Clean", true);
    catalog.load(&mut backend, &AnyProvider, &profile.glsl, "Clean", true);

    assert_eq!(catalog.len(), 1);
    assert_eq!(backend.created, 1);
}

#[test]
fn loads_past_capacity_are_silently_dropped() {
    let profile = profile();
    let mut backend = MockBackend::new();
    let mut catalog: ShaderCatalog<u32> = ShaderCatalog::new();

    for i in 0..MAX_SHADERS + 8 {
        let name = format!("Shader-{i}");
        catalog.load(&mut backend, &AnyProvider, &profile.glsl, &name, false);
    }

    assert_eq!(catalog.len(), MAX_SHADERS);
    assert_eq!(backend.created as usize, MAX_SHADERS);
}

#[test]
fn zero_loads_synthesize_exactly_one_fallback() {
    let profile = profile();
    let mut backend = MockBackend::new();
    let mut catalog: ShaderCatalog<u32> = ShaderCatalog::new();

    catalog
        .load_all(&mut backend, &EmptyProvider, &profile.glsl, profile.flavor)
        .expect("embedded fallback must build");

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.entry(0).unwrap().name, "None");
    assert!(!catalog.entry(0).unwrap().linear);
    assert!(
        !catalog.shader_support(),
        "fallback session must disable shader-effect support"
    );
}

#[test]
fn full_load_keeps_the_fixed_order_and_enables_support() {
    let profile = profile();
    let mut backend = MockBackend::new();
    let mut catalog: ShaderCatalog<u32> = ShaderCatalog::new();

    catalog
        .load_all(&mut backend, &AnyProvider, &profile.glsl, profile.flavor)
        .unwrap();

    assert_eq!(catalog.len(), BASE_SHADER_LIST.len());
    assert!(catalog.shader_support());
    for (entry, &(name, linear)) in catalog.entries().iter().zip(BASE_SHADER_LIST) {
        assert_eq!(entry.name, name);
        assert_eq!(entry.linear, linear);
    }
}

#[test]
fn a_failed_build_omits_the_entry_without_error() {
    let profile = profile();
    let mut backend = MockBackend::failing();
    let mut catalog: ShaderCatalog<u32> = ShaderCatalog::new();

    catalog.load(&mut backend, &AnyProvider, &profile.glsl, "Clean", true);

    assert!(catalog.is_empty());
    assert_eq!(backend.created, 0);
}

#[test]
fn release_deletes_every_program() {
    let profile = profile();
    let mut backend = MockBackend::new();
    let mut catalog: ShaderCatalog<u32> = ShaderCatalog::new();

    catalog
        .load_all(&mut backend, &AnyProvider, &profile.glsl, profile.flavor)
        .unwrap();
    let created = backend.created;
    assert!(created > 0);

    catalog.release(&mut backend);
    assert!(catalog.is_empty());
    assert_eq!(backend.deleted, created);
    assert!(backend.live.is_empty(), "no live programs may remain");

    // A second release finds nothing left to delete.
    catalog.release(&mut backend);
    assert_eq!(backend.deleted, created);
}

#[test]
fn sanitize_index_clamps_out_of_range_selections() {
    let profile = profile();
    let mut backend = MockBackend::new();
    let mut catalog: ShaderCatalog<u32> = ShaderCatalog::new();
    catalog
        .load_all(&mut backend, &AnyProvider, &profile.glsl, profile.flavor)
        .unwrap();

    assert_eq!(catalog.sanitize_index(-1), 0);
    assert_eq!(catalog.sanitize_index(2), 2);
    assert_eq!(catalog.sanitize_index(catalog.len() as i32), 0);
}
