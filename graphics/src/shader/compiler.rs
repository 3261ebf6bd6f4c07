//! Program compiler interface and the naga-based implementation.

use crate::error::GraphicsError;

use super::program::{
    GlobalKind, GpuProgram, ProgramDescriptor, ProgramGlobal, ProgramLanguage, ProgramStage,
};

/// Turns program descriptors into compiled programs.
///
/// Failures are returned to the caller as [`GraphicsError::CompileFailed`];
/// compilers never retry.
pub trait ProgramCompiler: Send + Sync {
    /// Compiler name for logging.
    fn name(&self) -> &str;

    /// Whether this compiler accepts `language`.
    fn supports(&self, language: ProgramLanguage) -> bool;

    /// Compile one program.
    fn compile(&self, descriptor: &ProgramDescriptor) -> Result<GpuProgram, GraphicsError>;
}

/// Compiles WGSL and GLSL programs with naga.
#[derive(Debug, Clone, Copy, Default)]
pub struct NagaCompiler;

impl NagaCompiler {
    pub fn new() -> Self {
        Self
    }

    fn parse(&self, descriptor: &ProgramDescriptor) -> Result<naga::Module, GraphicsError> {
        let source = descriptor.source.as_str();
        match descriptor.language {
            ProgramLanguage::Wgsl => naga::front::wgsl::parse_str(source)
                .map_err(|e| compile_error(descriptor, e.emit_to_string(source))),
            ProgramLanguage::Glsl => {
                let options = naga::front::glsl::Options {
                    stage: naga_stage(descriptor.stage),
                    defines: naga::FastHashMap::default(),
                };
                let mut frontend = naga::front::glsl::Frontend::default();
                frontend.parse(&options, source).map_err(|errors| {
                    compile_error(descriptor, format!("GLSL parse error:\n{errors}"))
                })
            }
            other => Err(compile_error(
                descriptor,
                format!("unsupported language '{other}'"),
            )),
        }
    }
}

impl ProgramCompiler for NagaCompiler {
    fn name(&self) -> &str {
        "naga"
    }

    fn supports(&self, language: ProgramLanguage) -> bool {
        matches!(language, ProgramLanguage::Wgsl | ProgramLanguage::Glsl)
    }

    fn compile(&self, descriptor: &ProgramDescriptor) -> Result<GpuProgram, GraphicsError> {
        let module = self.parse(descriptor)?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| compile_error(descriptor, format!("validation error: {e}")))?;

        let stage = naga_stage(descriptor.stage);
        let entry = module
            .entry_points
            .iter()
            .find(|ep| ep.name == descriptor.entry_point);
        match entry {
            None => {
                return Err(compile_error(
                    descriptor,
                    format!("entry point '{}' not found", descriptor.entry_point),
                ));
            }
            Some(ep) if ep.stage != stage => {
                return Err(compile_error(
                    descriptor,
                    format!(
                        "entry point '{}' is a {:?} entry point, expected {:?}",
                        ep.name, ep.stage, stage
                    ),
                ));
            }
            Some(_) => {}
        }

        let globals = collect_globals(&module);
        log::debug!(
            "Compiled program '{}' ({} {:?}, {} globals)",
            descriptor.label,
            descriptor.language,
            descriptor.stage,
            globals.len()
        );
        Ok(GpuProgram::new(descriptor.clone(), globals))
    }
}

fn compile_error(descriptor: &ProgramDescriptor, details: String) -> GraphicsError {
    GraphicsError::CompileFailed {
        label: descriptor.label.clone(),
        details,
    }
}

fn naga_stage(stage: ProgramStage) -> naga::ShaderStage {
    match stage {
        ProgramStage::Vertex => naga::ShaderStage::Vertex,
        ProgramStage::Fragment => naga::ShaderStage::Fragment,
        ProgramStage::Compute => naga::ShaderStage::Compute,
    }
}

fn collect_globals(module: &naga::Module) -> Vec<ProgramGlobal> {
    module
        .global_variables
        .iter()
        .filter_map(|(_, var)| {
            let name = var.name.clone()?;
            let kind = match var.space {
                naga::AddressSpace::Uniform => GlobalKind::Uniform,
                naga::AddressSpace::Storage { .. } => GlobalKind::Storage,
                naga::AddressSpace::Handle => match module.types[var.ty].inner {
                    naga::TypeInner::Image { .. } => GlobalKind::Texture,
                    naga::TypeInner::Sampler { .. } => GlobalKind::Sampler,
                    _ => GlobalKind::Other,
                },
                _ => GlobalKind::Other,
            };
            Some(ProgramGlobal {
                name,
                kind,
                binding: var.binding.as_ref().map(|b| (b.group, b.binding)),
            })
        })
        .collect()
}
