/// GLSL capability descriptor
///
/// An immutable snapshot of what the target shading environment supports.
/// Supplied by the GPU layer (or filled in by hand) and never mutated by
/// builders.

use bitflags::bitflags;

bitflags! {
    /// Optional shading-language extensions available on the target
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GlslExtensions: u32 {
        /// Subgroup (wave) operations
        const SUBGROUP = 1 << 0;
        /// textureGather and friends
        const TEXTURE_GATHER = 1 << 1;
        /// Storage images without an explicit format qualifier
        const SHADER_IMAGE_FORMAT = 1 << 2;
        /// 16-bit float arithmetic
        const FLOAT16 = 1 << 3;
        /// Explicit attribute / uniform locations
        const EXPLICIT_LOCATION = 1 << 4;
    }
}

/// Shading-language version and feature set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlslVersion {
    /// GLSL version number (e.g. 130, 450). 0 means "unspecified"
    pub version: u32,
    /// Target is GLSL ES
    pub gles: bool,
    /// Target is Vulkan-flavored GLSL
    pub vulkan: bool,
    /// Compute shaders are supported
    pub compute: bool,
    /// Maximum shared memory per work group in bytes (0 = no limit known)
    pub max_shmem_size: usize,
    /// Maximum invocations per work group (0 = no limit known)
    pub max_group_threads: u32,
    /// Maximum work group size per dimension (0 = no limit known)
    pub max_group_size: [u32; 3],
    /// Available extensions
    pub extensions: GlslExtensions,
}

impl GlslVersion {
    /// Fallback when neither the params nor a GPU specify anything:
    /// desktop GLSL 130, no compute.
    pub const FALLBACK: GlslVersion = GlslVersion {
        version: 130,
        gles: false,
        vulkan: false,
        compute: false,
        max_shmem_size: 0,
        max_group_threads: 0,
        max_group_size: [0; 3],
        extensions: GlslExtensions::empty(),
    };

    /// `true` once a version number has been filled in
    pub fn is_specified(&self) -> bool {
        self.version != 0
    }

    /// Check whether a work group of `bw` x `bh` invocations fits the limits
    pub fn fits_group(&self, bw: u32, bh: u32) -> bool {
        let [max_w, max_h, _] = self.max_group_size;
        if max_w != 0 && bw > max_w {
            return false;
        }
        if max_h != 0 && bh > max_h {
            return false;
        }
        self.max_group_threads == 0 || bw.saturating_mul(bh) <= self.max_group_threads
    }
}
