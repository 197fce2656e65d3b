/*!
# Mosaic Shader

Shader composition and code generation for GPU rendering passes.

Independent passes (color decoding, debanding, tone mapping, scaling,
dithering...) each append a self-contained GLSL fragment plus the resources
that fragment needs to a `ShaderBuilder`. Finalizing the builder yields a
`ShaderResult`: one callable function with a well-defined signature and the
full resource manifest a backend needs to compile, bind and dispatch it.

## Architecture

- **GlslVersion / Gpu**: capability descriptor supplied by the backend
- **ShaderBuilder**: mutable accumulator with a sticky failure state
- **ShaderResult**: immutable snapshot produced by `finalize`
- **ShaderObjectStore**: persistent per-pass resources kept across frames

Window creation, device setup and the final program linking are left to the
caller's backend.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod gpu;
pub mod shader;
pub mod object;

// Main mosaic namespace module
pub mod mosaic {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging hub
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, format_entry};
    }

    // GPU boundary types
    pub mod gpu {
        pub use crate::gpu::*;
    }

    // Builder, bindings and results
    pub mod shader {
        pub use crate::shader::*;
    }

    // Shader object store
    pub mod object {
        pub use crate::object::*;
    }
}

// Re-export math library at crate root
pub use glam;
