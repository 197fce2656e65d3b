/// Mock GPU for unit tests (no device required)
///
/// Provides capability descriptors and opaque texture/buffer handles so
/// builders and shader object stores can be exercised without a backend.

#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use crate::gpu::{Gpu, GlslVersion, GlslExtensions, Texture, TextureInfo, TextureFormat, Buffer};

// ============================================================================
// Mock GPU
// ============================================================================

#[cfg(test)]
#[derive(Debug)]
pub struct MockGpu {
    pub glsl: GlslVersion,
}

#[cfg(test)]
impl MockGpu {
    /// Desktop GLSL 450 with compute, 32 KiB shared memory, 1024 threads
    pub fn with_compute() -> Self {
        Self {
            glsl: GlslVersion {
                version: 450,
                gles: false,
                vulkan: true,
                compute: true,
                max_shmem_size: 32 * 1024,
                max_group_threads: 1024,
                max_group_size: [1024, 1024, 64],
                extensions: GlslExtensions::SUBGROUP | GlslExtensions::TEXTURE_GATHER,
            },
        }
    }

    /// GLSL ES 300 without compute
    pub fn without_compute() -> Self {
        Self {
            glsl: GlslVersion {
                version: 300,
                gles: true,
                ..GlslVersion::default()
            },
        }
    }

    pub fn shared(self) -> Arc<dyn Gpu> {
        Arc::new(self)
    }
}

#[cfg(test)]
impl Gpu for MockGpu {
    fn glsl(&self) -> &GlslVersion {
        &self.glsl
    }

    fn name(&self) -> &str {
        "mock"
    }
}

// ============================================================================
// Mock Texture
// ============================================================================

#[cfg(test)]
#[derive(Debug)]
pub struct MockTexture {
    pub info: TextureInfo,
}

#[cfg(test)]
impl MockTexture {
    pub fn new(width: u32, height: u32) -> Arc<dyn Texture> {
        Arc::new(Self {
            info: TextureInfo {
                width,
                height,
                depth: 1,
                format: TextureFormat::R16G16B16A16_SFLOAT,
                storable: true,
            },
        })
    }
}

#[cfg(test)]
impl Texture for MockTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

// ============================================================================
// Mock Buffer
// ============================================================================

#[cfg(test)]
#[derive(Debug)]
pub struct MockBuffer {
    pub size: u64,
}

#[cfg(test)]
impl MockBuffer {
    pub fn new(size: u64) -> Arc<dyn Buffer> {
        Arc::new(Self { size })
    }
}

#[cfg(test)]
impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.size
    }
}
