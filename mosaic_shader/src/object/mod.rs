//! Shader object module
//!
//! Persistent, caller-owned resources that passes reuse across frames and
//! builder resets.

mod shader_object;

pub use shader_object::{
    ShaderObjectStore, ShaderObjectHandle, ShaderObjectKey, ShaderObjectType,
};
