/// Resource manifest records
///
/// Each record pairs a type/shape declaration with either inline raw data
/// (vertex attributes, variables, constants) or a backend resource handle
/// plus access qualifiers (descriptors). Raw data always follows the host
/// layout (`gpu::host_layout`) and is uploaded byte-for-byte by backends.

use std::fmt;
use std::sync::Arc;
use bitflags::bitflags;
use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use crate::error::{Error, Result};
use crate::gpu::{
    self, Buffer, Desc, DescAccess, DescType, Texture, Var, VarLayout, VarType,
    VertexAttrib, VertexFormat,
};

// ===== VERTEX ATTRIBUTES =====

/// Vertex attribute with per-corner data
///
/// The four values are bound to the four corner vertices in row-wise order
/// starting from the top left:
///
/// ```text
///   data[0] data[1]
///   data[2] data[3]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderVa {
    pub attr: VertexAttrib,
    pub data: [Vec<u8>; 4],
}

impl ShaderVa {
    /// `vec2` attribute spanning the rectangle `min..max`
    pub fn vec2_rect(name: &str, min: Vec2, max: Vec2) -> Self {
        let corners = [
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(min.x, max.y),
            Vec2::new(max.x, max.y),
        ];
        Self {
            attr: VertexAttrib {
                name: name.to_string(),
                format: VertexFormat::Vec2,
            },
            data: corners.map(|corner| bytemuck::bytes_of(&corner).to_vec()),
        }
    }

    /// Every corner carries exactly one vertex worth of data
    pub fn is_valid(&self) -> bool {
        let size = self.attr.format.size_bytes();
        !self.attr.name.is_empty() && self.data.iter().all(|corner| corner.len() == size)
    }
}

// ===== VARIABLES =====

/// Shader variable (uniform / push constant) with raw host data
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderVar {
    pub var: Var,
    /// Raw data, laid out as per `gpu::host_layout`
    pub data: Vec<u8>,
    /// The value is expected to change frequently
    pub dynamic: bool,
}

impl ShaderVar {
    pub fn new(var: Var, data: Vec<u8>) -> Self {
        Self { var, data, dynamic: false }
    }

    pub fn float(name: &str, value: f32) -> Self {
        Self::new(Var::float(name), bytemuck::bytes_of(&value).to_vec())
    }

    pub fn vec2(name: &str, value: Vec2) -> Self {
        Self::new(Var::vec2(name), bytemuck::bytes_of(&value).to_vec())
    }

    pub fn vec3(name: &str, value: Vec3) -> Self {
        Self::new(Var::vec3(name), bytemuck::bytes_of(&value).to_vec())
    }

    pub fn vec4(name: &str, value: Vec4) -> Self {
        Self::new(Var::vec4(name), bytemuck::bytes_of(&value).to_vec())
    }

    /// Column-major 3x3 matrix
    pub fn mat3(name: &str, value: Mat3) -> Self {
        Self::new(Var::mat3(name), bytemuck::bytes_of(&value).to_vec())
    }

    /// Column-major 4x4 matrix
    pub fn mat4(name: &str, value: Mat4) -> Self {
        Self::new(Var::mat4(name), bytemuck::bytes_of(&value).to_vec())
    }

    pub fn int(name: &str, value: i32) -> Self {
        Self::new(Var::int(name), bytemuck::bytes_of(&value).to_vec())
    }

    pub fn uint(name: &str, value: u32) -> Self {
        Self::new(Var::uint(name), bytemuck::bytes_of(&value).to_vec())
    }

    /// Mark the variable as frequently changing
    pub fn dynamic(mut self) -> Self {
        self.dynamic = true;
        self
    }

    /// Declared shape is valid and the data matches its host size
    pub fn is_valid(&self) -> bool {
        self.var.is_valid() && self.data.len() == self.var.host_size()
    }
}

// ===== DESCRIPTORS =====

bitflags! {
    /// Memory qualifiers for storage images and buffers
    ///
    /// All descriptors are implicitly `restrict`; there is no way to
    /// express aliasing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MemoryQualifiers: u16 {
        /// Synchronization across shader invocations
        const COHERENT = 1 << 0;
        /// Every write is visible automatically
        const VOLATILE = 1 << 1;
    }
}

/// Named field inside a uniform or storage buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferVar {
    pub var: Var,
    /// Device-side placement inside the buffer
    pub layout: VarLayout,
}

/// Resource bound to a descriptor
///
/// Compared by handle identity: two bindings are equal when they reference
/// the same backend object.
#[derive(Clone)]
pub enum DescBinding {
    Texture(Arc<dyn Texture>),
    Buffer(Arc<dyn Buffer>),
}

impl PartialEq for DescBinding {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DescBinding::Texture(a), DescBinding::Texture(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (DescBinding::Buffer(a), DescBinding::Buffer(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for DescBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescBinding::Texture(tex) => write!(f, "Texture({:?})", tex.info()),
            DescBinding::Buffer(buf) => write!(f, "Buffer({} bytes)", buf.size()),
        }
    }
}

/// Descriptor: a GPU-visible texture or buffer with access qualifiers
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderDesc {
    pub desc: Desc,
    pub binding: DescBinding,
    /// Buffer fields, in declaration order. Empty for textures
    pub buffer_vars: Vec<BufferVar>,
    /// Must stay empty for sampled textures and uniform buffers
    pub memory: MemoryQualifiers,
}

impl ShaderDesc {
    fn new(name: &str, desc_type: DescType, access: DescAccess, binding: DescBinding) -> Self {
        Self {
            desc: Desc {
                name: name.to_string(),
                desc_type,
                access,
            },
            binding,
            buffer_vars: Vec::new(),
            memory: MemoryQualifiers::empty(),
        }
    }

    pub fn sampled_texture(name: &str, texture: Arc<dyn Texture>) -> Self {
        Self::new(name, DescType::SampledTex, DescAccess::ReadOnly, DescBinding::Texture(texture))
    }

    pub fn storage_image(name: &str, texture: Arc<dyn Texture>, access: DescAccess) -> Self {
        Self::new(name, DescType::StorageImg, access, DescBinding::Texture(texture))
    }

    pub fn uniform_buffer(name: &str, buffer: Arc<dyn Buffer>) -> Self {
        Self::new(name, DescType::BufUniform, DescAccess::ReadOnly, DescBinding::Buffer(buffer))
    }

    pub fn storage_buffer(name: &str, buffer: Arc<dyn Buffer>, access: DescAccess) -> Self {
        Self::new(name, DescType::BufStorage, access, DescBinding::Buffer(buffer))
    }

    /// Set memory qualifiers
    pub fn with_memory(mut self, memory: MemoryQualifiers) -> Self {
        self.memory = memory;
        self
    }

    /// Append a field after the last one
    ///
    /// Uniform buffers use std140 rules, storage buffers std430.
    ///
    /// # Errors
    ///
    /// - `InvalidResource` if this descriptor is not a buffer
    /// - `InvalidLayout` if the variable shape is invalid, the name is taken
    ///   or the buffer would exceed the address space
    pub fn push_buffer_var(&mut self, var: Var) -> Result<VarLayout> {
        var.check()?;
        let offset = self.buffer_size();
        let layout = match self.desc.desc_type {
            DescType::BufUniform => gpu::std140_layout(offset, &var),
            DescType::BufStorage => gpu::std430_layout(offset, &var),
            other => {
                return Err(Error::InvalidResource(format!(
                    "descriptor '{}' of type {:?} cannot hold buffer variables",
                    self.desc.name, other
                )));
            }
        };
        if layout.offset < offset || layout.offset.checked_add(layout.size).is_none() {
            return Err(Error::InvalidLayout(format!(
                "field '{}' does not fit in buffer '{}' after {} bytes", var.name, self.desc.name, offset
            )));
        }
        if self.buffer_vars.iter().any(|bv| bv.var.name == var.name) {
            return Err(Error::InvalidLayout(format!(
                "duplicate field '{}' in buffer '{}'", var.name, self.desc.name
            )));
        }
        self.buffer_vars.push(BufferVar { var, layout });
        Ok(layout)
    }

    /// Bytes spanned by the declared buffer fields
    pub fn buffer_size(&self) -> usize {
        self.buffer_vars.last().map(|bv| bv.layout.end()).unwrap_or(0)
    }

    /// Descriptor type and bound handle agree, textures carry no fields and
    /// memory qualifiers only appear on storage descriptors
    pub fn is_valid(&self) -> bool {
        let kind_matches = match (&self.binding, self.desc.desc_type) {
            (DescBinding::Texture(_), DescType::SampledTex | DescType::StorageImg) => true,
            (DescBinding::Buffer(_), DescType::BufUniform | DescType::BufStorage) => true,
            _ => false,
        };
        kind_matches
            && !self.desc.name.is_empty()
            && (self.desc.desc_type.is_buffer() || self.buffer_vars.is_empty())
            && (self.desc.desc_type.is_storage() || self.memory.is_empty())
    }
}

// ===== CONSTANTS =====

/// Compile-time constant (may be lowered to a specialization constant)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderConst {
    pub const_type: VarType,
    pub name: String,
    /// Raw scalar data (4 bytes)
    pub data: Vec<u8>,
    /// Must stay a true constant even with `dynamic_constants` set, e.g.
    /// because it sizes an array
    pub compile_time: bool,
}

impl ShaderConst {
    pub fn float(name: &str, value: f32) -> Self {
        Self::scalar(name, VarType::Float, bytemuck::bytes_of(&value).to_vec())
    }

    pub fn int(name: &str, value: i32) -> Self {
        Self::scalar(name, VarType::Sint, bytemuck::bytes_of(&value).to_vec())
    }

    pub fn uint(name: &str, value: u32) -> Self {
        Self::scalar(name, VarType::Uint, bytemuck::bytes_of(&value).to_vec())
    }

    fn scalar(name: &str, const_type: VarType, data: Vec<u8>) -> Self {
        Self {
            const_type,
            name: name.to_string(),
            data,
            compile_time: false,
        }
    }

    /// Force this constant to stay compile-time
    pub fn compile_time(mut self) -> Self {
        self.compile_time = true;
        self
    }

    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && self.data.len() == self.const_type.size()
    }

    /// Runtime variable carrying the same value (used for dynamic constants)
    pub(crate) fn to_dynamic_var(&self) -> ShaderVar {
        let var = Var {
            name: self.name.clone(),
            var_type: self.const_type,
            dim_v: 1,
            dim_m: 1,
            dim_a: 1,
        };
        ShaderVar::new(var, self.data.clone()).dynamic()
    }
}

#[cfg(test)]
#[path = "binding_tests.rs"]
mod tests;
