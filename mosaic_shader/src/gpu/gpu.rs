/// GPU boundary traits and descriptor types
///
/// Backends (out of scope for this crate) implement these traits to hand
/// capability information and opaque resource handles to shader builders.
/// Builders only read from them; resource creation and destruction remain
/// the backend's business.

use crate::gpu::GlslVersion;

/// Texture and storage image formats a descriptor may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    R8_UNORM,
    R8G8B8A8_UNORM,
    R16_UNORM,
    R16G16B16A16_SFLOAT,
    R32_SFLOAT,
    R32G32B32A32_SFLOAT,
}

/// Static information about a backend texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    /// Depth for 3D textures, 1 otherwise
    pub depth: u32,
    pub format: TextureFormat,
    /// Can be bound as a storage image
    pub storable: bool,
}

/// Capability query object for a GPU
///
/// Only used to gate feature availability; builders never mutate it.
pub trait Gpu: Send + Sync {
    /// Shading-language capabilities of this device
    fn glsl(&self) -> &GlslVersion;

    /// Human-readable device name (diagnostics only)
    fn name(&self) -> &str {
        "gpu"
    }
}

/// Backend texture handle
///
/// Implemented by backend-specific texture types. The texture is released
/// by the backend when the last handle is dropped.
pub trait Texture: Send + Sync {
    fn info(&self) -> &TextureInfo;
}

/// Backend buffer handle
pub trait Buffer: Send + Sync {
    /// Size in bytes
    fn size(&self) -> u64;
}

// ===== DESCRIPTORS =====

/// Kind of GPU-visible resource bound by a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescType {
    /// Sampled texture (combined image sampler)
    SampledTex,
    /// Storage image
    StorageImg,
    /// Uniform buffer
    BufUniform,
    /// Shader storage buffer
    BufStorage,
}

impl DescType {
    /// Whether this descriptor holds a buffer (and thus buffer variables)
    pub fn is_buffer(&self) -> bool {
        matches!(self, DescType::BufUniform | DescType::BufStorage)
    }

    /// Whether memory qualifiers apply to this descriptor
    pub fn is_storage(&self) -> bool {
        matches!(self, DescType::StorageImg | DescType::BufStorage)
    }
}

/// Access mode of a storage descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DescAccess {
    #[default]
    ReadWrite,
    ReadOnly,
    WriteOnly,
}

/// Descriptor declaration (the binding index is assigned by the backend)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Desc {
    pub name: String,
    pub desc_type: DescType,
    pub access: DescAccess,
}
