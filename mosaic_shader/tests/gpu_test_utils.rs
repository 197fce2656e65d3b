#![allow(dead_code)]
//! GPU test utilities - software capability descriptors and resource handles
//!
//! Integration tests only see the public API, so the crate's internal mock
//! GPU is not available here. These types play the role of a backend: they
//! report capabilities and hand out opaque texture/buffer handles.

use mosaic_shader::mosaic::gpu::{
    Buffer, GlslExtensions, GlslVersion, Gpu, Texture, TextureFormat, TextureInfo,
};
use std::sync::Arc;

/// Software GPU reporting a fixed capability descriptor
pub struct SoftGpu {
    glsl: GlslVersion,
}

impl Gpu for SoftGpu {
    fn glsl(&self) -> &GlslVersion {
        &self.glsl
    }

    fn name(&self) -> &str {
        "soft"
    }
}

/// Vulkan-class device: GLSL 450, compute, 16 KiB shared memory
pub fn compute_gpu() -> Arc<dyn Gpu> {
    Arc::new(SoftGpu {
        glsl: GlslVersion {
            version: 450,
            gles: false,
            vulkan: true,
            compute: true,
            max_shmem_size: 16 * 1024,
            max_group_threads: 512,
            max_group_size: [512, 512, 64],
            extensions: GlslExtensions::SUBGROUP,
        },
    })
}

/// GLES 3.0 device without compute support
pub fn gles_gpu() -> Arc<dyn Gpu> {
    Arc::new(SoftGpu {
        glsl: GlslVersion {
            version: 300,
            gles: true,
            ..GlslVersion::default()
        },
    })
}

struct SoftTexture {
    info: TextureInfo,
}

impl Texture for SoftTexture {
    fn info(&self) -> &TextureInfo {
        &self.info
    }
}

pub fn texture(width: u32, height: u32) -> Arc<dyn Texture> {
    Arc::new(SoftTexture {
        info: TextureInfo {
            width,
            height,
            depth: 1,
            format: TextureFormat::R8G8B8A8_UNORM,
            storable: false,
        },
    })
}

struct SoftBuffer {
    size: u64,
}

impl Buffer for SoftBuffer {
    fn size(&self) -> u64 {
        self.size
    }
}

pub fn buffer(size: u64) -> Arc<dyn Buffer> {
    Arc::new(SoftBuffer { size })
}
