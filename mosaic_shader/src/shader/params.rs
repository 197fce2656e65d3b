/// Shader builder parameters

use std::fmt;
use std::sync::Arc;
use crate::gpu::{Gpu, GlslVersion};

/// Parameters a `ShaderBuilder` is created (or reset) with
///
/// `ShaderParams::default()` gives id 0, no GPU, frame index 0, an
/// unspecified GLSL version and compile-time constants.
#[derive(Clone, Default)]
pub struct ShaderParams {
    /// Abstract identifier, unique among builders that will be composed into
    /// one program. Used to namespace generated symbols.
    pub id: u8,

    /// Optional GPU used to check capabilities. Never mutated.
    pub gpu: Option<Arc<dyn Gpu>>,

    /// Frame index for temporal effects (dithering, PRNG seeding). 0 keeps
    /// rendering deterministic; otherwise increment once per frame.
    pub index: u8,

    /// Explicit capabilities. When `glsl.version` is nonzero this overrides
    /// the GPU's own descriptor.
    pub glsl: GlslVersion,

    /// Route every non-`compile_time` constant through a runtime variable,
    /// avoiding recompilation when constant values change.
    pub dynamic_constants: bool,
}

impl ShaderParams {
    /// Capabilities in effect: explicit `glsl`, else the GPU's, else
    /// `GlslVersion::FALLBACK`
    pub fn effective_glsl(&self) -> GlslVersion {
        if self.glsl.is_specified() {
            return self.glsl;
        }
        match &self.gpu {
            Some(gpu) => *gpu.glsl(),
            None => GlslVersion::FALLBACK,
        }
    }
}

impl PartialEq for ShaderParams {
    fn eq(&self, other: &Self) -> bool {
        let same_gpu = match (&self.gpu, &other.gpu) {
            (None, None) => true,
            (Some(a), Some(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            _ => false,
        };
        same_gpu
            && self.id == other.id
            && self.index == other.index
            && self.glsl == other.glsl
            && self.dynamic_constants == other.dynamic_constants
    }
}

impl fmt::Debug for ShaderParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderParams")
            .field("id", &self.id)
            .field("gpu", &self.gpu.as_ref().map(|gpu| gpu.name().to_string()))
            .field("index", &self.index)
            .field("glsl", &self.glsl)
            .field("dynamic_constants", &self.dynamic_constants)
            .finish()
    }
}
