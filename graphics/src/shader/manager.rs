//! Compiled program cache.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::GraphicsError;

use super::compiler::{NagaCompiler, ProgramCompiler};
use super::program::{GpuProgram, ProgramDescriptor};

/// Caches compiled programs by descriptor.
///
/// Passes hold the returned `Arc<GpuProgram>`; the manager only guarantees
/// that an identical descriptor is compiled once. Failed compilations are
/// returned to the caller and not cached, so a later call compiles again.
pub struct ProgramManager {
    compiler: Box<dyn ProgramCompiler>,
    programs: RwLock<HashMap<ProgramDescriptor, Arc<GpuProgram>>>,
}

impl ProgramManager {
    pub fn new(compiler: impl ProgramCompiler + 'static) -> Self {
        Self {
            compiler: Box::new(compiler),
            programs: RwLock::new(HashMap::new()),
        }
    }

    /// The compiler programs are built with.
    pub fn compiler(&self) -> &dyn ProgramCompiler {
        self.compiler.as_ref()
    }

    /// Return the cached program for `descriptor`, compiling it on first use.
    pub fn load(&self, descriptor: ProgramDescriptor) -> Result<Arc<GpuProgram>, GraphicsError> {
        if let Some(program) = self.programs.read().get(&descriptor) {
            log::trace!("Program cache hit: '{}'", descriptor.label);
            return Ok(Arc::clone(program));
        }

        let program = Arc::new(self.compiler.compile(&descriptor)?);
        let mut programs = self.programs.write();
        let entry = programs.entry(descriptor).or_insert(program);
        Ok(Arc::clone(entry))
    }

    /// Look up a compiled program without compiling.
    pub fn get(&self, descriptor: &ProgramDescriptor) -> Option<Arc<GpuProgram>> {
        self.programs.read().get(descriptor).cloned()
    }

    /// Number of cached programs.
    pub fn len(&self) -> usize {
        self.programs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.read().is_empty()
    }

    /// Drop every cached program. Passes keep the programs they hold.
    pub fn clear(&self) {
        self.programs.write().clear();
    }
}

impl Default for ProgramManager {
    fn default() -> Self {
        Self::new(NagaCompiler::new())
    }
}

impl std::fmt::Debug for ProgramManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgramManager")
            .field("compiler", &self.compiler.name())
            .field("programs", &self.len())
            .finish()
    }
}

static_assertions::assert_impl_all!(ProgramManager: Send, Sync);
