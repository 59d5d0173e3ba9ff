//! WGSL program construction with CPU-side diagnostics.
//!
//! Sources are parsed and validated with naga before any GPU module exists,
//! so a bad shader surfaces as a [`ShaderError`] instead of a device panic.
//! [`compile_program`] collects the errors of both stages in a [`ProgramError`].

mod compile;
mod error;

use std::fmt;

pub use compile::{
    compile, compile_program, link, CompiledStage, LinkedProgram, ProgramModules, UniformBinding,
};
pub use error::{ProgramError, ShaderError, ShaderErrorKind, INFO_LOG_CAPACITY};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}
