/// GPU boundary module - capability descriptors, opaque resource handles
/// and variable layout rules shared by builders and backends

pub mod glsl;
pub mod gpu;
pub mod var;
pub mod vertex;
#[cfg(test)]
pub mod mock_gpu;

pub use glsl::*;
pub use gpu::*;
pub use var::*;
pub use vertex::*;
