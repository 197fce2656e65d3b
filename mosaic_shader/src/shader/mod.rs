//! Shader builder module
//!
//! Passes append fragments and resource bindings to a `ShaderBuilder`,
//! which is then frozen into a `ShaderResult`.

mod binding;
mod builder;
mod ident;
mod params;
mod result;
mod signature;

pub use binding::{
    ShaderVa, ShaderVar, ShaderDesc, ShaderConst,
    BufferVar, DescBinding, MemoryQualifiers,
};
pub use builder::{ShaderBuilder, FailureReason};
pub use ident::Ident;
pub use params::ShaderParams;
pub use result::ShaderResult;
pub use signature::ShaderSig;
