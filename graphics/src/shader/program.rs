//! Program descriptors and compiled program records.

use std::fmt;

/// Programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramStage {
    Vertex,
    Fragment,
    Compute,
}

/// Source language of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProgramLanguage {
    #[default]
    Wgsl,
    Glsl,
    Hlsl,
    Cg,
}

impl fmt::Display for ProgramLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Wgsl => "wgsl",
            Self::Glsl => "glsl",
            Self::Hlsl => "hlsl",
            Self::Cg => "cg",
        };
        f.write_str(name)
    }
}

/// Target profile (e.g. `vs_5_0`, `ps_2_0`). Empty means any profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ProgramProfile(String);

impl ProgramProfile {
    pub fn new(profile: impl Into<String>) -> Self {
        Self(profile.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_any(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything needed to compile one program.
///
/// Descriptors are compared by value; two identical descriptors share one
/// compiled program in the [`ProgramManager`](super::ProgramManager).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProgramDescriptor {
    pub label: String,
    pub source: String,
    pub entry_point: String,
    pub language: ProgramLanguage,
    pub stage: ProgramStage,
    pub profile: ProgramProfile,
}

impl ProgramDescriptor {
    /// Create a WGSL descriptor with no profile.
    pub fn new(
        label: impl Into<String>,
        source: impl Into<String>,
        entry_point: impl Into<String>,
        stage: ProgramStage,
    ) -> Self {
        Self {
            label: label.into(),
            source: source.into(),
            entry_point: entry_point.into(),
            language: ProgramLanguage::Wgsl,
            stage,
            profile: ProgramProfile::default(),
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: ProgramLanguage) -> Self {
        self.language = language;
        self
    }

    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = ProgramProfile::new(profile);
        self
    }
}

/// Kind of a global resource declared by a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalKind {
    Uniform,
    Storage,
    Texture,
    Sampler,
    Other,
}

/// A named global resource declared by a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramGlobal {
    pub name: String,
    pub kind: GlobalKind,
    /// `(group, binding)` when the global is bound to a resource slot.
    pub binding: Option<(u32, u32)>,
}

/// A compiled and validated program.
#[derive(Debug, Clone)]
pub struct GpuProgram {
    descriptor: ProgramDescriptor,
    globals: Vec<ProgramGlobal>,
}

impl GpuProgram {
    pub fn new(descriptor: ProgramDescriptor, globals: Vec<ProgramGlobal>) -> Self {
        Self {
            descriptor,
            globals,
        }
    }

    pub fn descriptor(&self) -> &ProgramDescriptor {
        &self.descriptor
    }

    pub fn label(&self) -> &str {
        &self.descriptor.label
    }

    pub fn stage(&self) -> ProgramStage {
        self.descriptor.stage
    }

    pub fn entry_point(&self) -> &str {
        &self.descriptor.entry_point
    }

    /// Global resources in declaration order.
    pub fn globals(&self) -> &[ProgramGlobal] {
        &self.globals
    }

    /// Whether the program declares a global called `name`.
    pub fn declares_global(&self, name: &str) -> bool {
        self.globals.iter().any(|g| g.name == name)
    }

    /// Names of the texture globals, which texture slots bind to.
    pub fn texture_names(&self) -> impl Iterator<Item = &str> {
        self.globals
            .iter()
            .filter(|g| g.kind == GlobalKind::Texture)
            .map(|g| g.name.as_str())
    }
}

static_assertions::assert_impl_all!(GpuProgram: Send, Sync);
