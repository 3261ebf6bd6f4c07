//! Common utilities for material pipeline integration tests.
//!
//! This module provides shared test infrastructure that can be reused
//! across different backend implementations.

use std::sync::Arc;

use camelot_core::texture::{CpuTexture, TextureType};
use camelot_graphics::{
    BackendType, Material, NagaCompiler, ProgramDescriptor, ProgramManager, ProgramStage,
    RenderSystem, RenderSystemParameters, Shader, Texture, TextureManager, WgpuBackendType,
};

/// Full-screen triangle strip with one sampled texture and a `tint` uniform.
pub const TEXTURED_WGSL: &str = r#"
@group(0) @binding(0) var diffuse: texture_2d<f32>;
@group(0) @binding(1) var diffuse_sampler: sampler;
@group(0) @binding(2) var<uniform> tint: vec4<f32>;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
}

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VertexOutput {
    let uv = vec2<f32>(f32(index & 1u), f32(index >> 1u));
    var out: VertexOutput;
    out.position = vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
    out.uv = uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(diffuse, diffuse_sampler, in.uv) * tint;
}
"#;

// ============================================================================
// Backend Enumeration
// ============================================================================

/// Available render-system backends for testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Dummy backend (no actual GPU operations).
    Dummy,
    /// WebGPU backend (via wgpu).
    WebGpu,
}

impl Backend {
    /// Check if this backend is compiled in.
    pub fn is_available(&self) -> bool {
        match self {
            Backend::Dummy => true,
            #[cfg(feature = "wgpu-backend")]
            Backend::WebGpu => true,
            #[cfg(not(feature = "wgpu-backend"))]
            Backend::WebGpu => false,
        }
    }

    pub fn to_parameters(self) -> RenderSystemParameters {
        match self {
            Backend::Dummy => RenderSystemParameters::default().with_backend(BackendType::Dummy),
            Backend::WebGpu => RenderSystemParameters::default()
                .with_backend(BackendType::Wgpu)
                .with_wgpu_backend(WgpuBackendType::Auto),
        }
    }
}

/// Install the test logger once per test binary.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// Test Context
// ============================================================================

/// Render system plus the caches a material needs.
pub struct TestContext {
    #[allow(dead_code)]
    pub backend: Backend,
    pub render_system: RenderSystem,
    pub textures: Arc<TextureManager>,
    pub programs: ProgramManager,
}

impl TestContext {
    /// Create a new test context for the given backend.
    ///
    /// Returns `None` if the backend cannot be brought up.
    pub fn new(backend: Backend) -> Option<Self> {
        init_logger();
        if !backend.is_available() {
            return None;
        }

        let render_system = RenderSystem::start_up(backend.to_parameters()).ok()?;
        Some(Self {
            backend,
            render_system,
            textures: Arc::new(TextureManager::new()),
            programs: ProgramManager::new(NagaCompiler::new()),
        })
    }

    /// Insert a solid-colour RGBA texture into the cache.
    pub fn add_solid_texture(&self, name: &str, width: u32, height: u32) -> Arc<Texture> {
        self.textures.insert(solid_texture(name, width, height))
    }

    /// Shader with one technique for the active render system: a single pass
    /// with a `diffuse` slot and the textured programs.
    pub fn textured_shader(&self, texture_name: &str) -> Shader {
        let vertex = self
            .programs
            .load(ProgramDescriptor::new("textured_vs", TEXTURED_WGSL, "vs_main", ProgramStage::Vertex))
            .expect("vertex program compiles");
        let fragment = self
            .programs
            .load(ProgramDescriptor::new(
                "textured_fs",
                TEXTURED_WGSL,
                "fs_main",
                ProgramStage::Fragment,
            ))
            .expect("fragment program compiles");

        let mut shader = Shader::new("textured");
        let pass = shader
            .add_technique(self.render_system.name(), self.render_system.renderer())
            .add_pass();
        pass.set_vertex_program(Some(vertex));
        pass.set_fragment_program(Some(fragment));
        pass.create_texture_slot("diffuse")
            .set_texture_name(texture_name, TextureType::Type2D);
        shader
    }

    /// Material wrapping [`textured_shader`](Self::textured_shader).
    #[allow(dead_code)]
    pub fn textured_material(&self, name: &str, texture_name: &str) -> Material {
        let mut material = Material::new(name);
        material.set_shader(self.textured_shader(texture_name));
        material
    }
}

/// Solid mid-grey RGBA8 texture.
pub fn solid_texture(name: &str, width: u32, height: u32) -> Texture {
    let data = vec![128u8; (width * height * 4) as usize];
    Texture::from_cpu(CpuTexture::from_rgba8(name, width, height, data))
}
