//! GPU programs and the program compiler interface.
//!
//! A [`ProgramDescriptor`] names everything needed to build one programmable
//! stage: source, entry point, language, stage and profile. A
//! [`ProgramCompiler`] turns it into a [`GpuProgram`]; the
//! [`ProgramManager`] caches compiled programs so passes can share them.
//!
//! # Example
//!
//! ```ignore
//! let programs = ProgramManager::new(NagaCompiler::new());
//! let fragment = programs.load(
//!     ProgramDescriptor::new("textured_fs", WGSL_SOURCE, "fs_main", ProgramStage::Fragment),
//! )?;
//! pass.set_fragment_program(Some(fragment));
//! ```

mod compiler;
mod manager;
mod program;

pub use compiler::{NagaCompiler, ProgramCompiler};
pub use manager::ProgramManager;
pub use program::{
    GlobalKind, GpuProgram, ProgramDescriptor, ProgramGlobal, ProgramLanguage, ProgramProfile,
    ProgramStage,
};
