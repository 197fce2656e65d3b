/// Shader variable types and memory layouts
///
/// A `Var` describes the type and shape of a value shared between host and
/// shader (uniforms, buffer fields, constants). The layout helpers compute
/// where that value lives in host memory and in std140 / std430 buffers.
///
/// Layout rules:
/// - Scalars align to 4, vec2 to 8, vec3 and vec4 to 16
/// - Matrices and arrays are sequences of column vectors; in std140 every
///   column is padded to 16 bytes, in std430 to the vector alignment
/// - Host layout is tightly packed (4-byte aligned)

use crate::error::{Error, Result};

/// Scalar base type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarType {
    Sint,
    Uint,
    Float,
}

impl VarType {
    /// Size in bytes of one scalar
    pub fn size(&self) -> usize {
        4
    }

    fn scalar_name(&self) -> &'static str {
        match self {
            VarType::Sint => "int",
            VarType::Uint => "uint",
            VarType::Float => "float",
        }
    }

    fn vector_prefix(&self) -> &'static str {
        match self {
            VarType::Sint => "ivec",
            VarType::Uint => "uvec",
            VarType::Float => "vec",
        }
    }
}

/// A typed, shaped shader variable
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Var {
    pub name: String,
    pub var_type: VarType,
    /// Vector components (1..=4)
    pub dim_v: u32,
    /// Matrix columns (1 for non-matrices)
    pub dim_m: u32,
    /// Array length (1 for non-arrays)
    pub dim_a: u32,
}

impl Var {
    fn new(name: &str, var_type: VarType, dim_v: u32, dim_m: u32) -> Self {
        Self {
            name: name.to_string(),
            var_type,
            dim_v,
            dim_m,
            dim_a: 1,
        }
    }

    pub fn float(name: &str) -> Self { Self::new(name, VarType::Float, 1, 1) }
    pub fn vec2(name: &str) -> Self { Self::new(name, VarType::Float, 2, 1) }
    pub fn vec3(name: &str) -> Self { Self::new(name, VarType::Float, 3, 1) }
    pub fn vec4(name: &str) -> Self { Self::new(name, VarType::Float, 4, 1) }
    pub fn mat2(name: &str) -> Self { Self::new(name, VarType::Float, 2, 2) }
    pub fn mat3(name: &str) -> Self { Self::new(name, VarType::Float, 3, 3) }
    pub fn mat4(name: &str) -> Self { Self::new(name, VarType::Float, 4, 4) }
    pub fn int(name: &str) -> Self { Self::new(name, VarType::Sint, 1, 1) }
    pub fn ivec2(name: &str) -> Self { Self::new(name, VarType::Sint, 2, 1) }
    pub fn uint(name: &str) -> Self { Self::new(name, VarType::Uint, 1, 1) }

    /// Turn this variable into an array of `len` elements
    pub fn array(mut self, len: u32) -> Self {
        self.dim_a = len;
        self
    }

    /// Dimensions are within the ranges GLSL can express
    ///
    /// Integer matrices do not exist in GLSL.
    pub fn is_valid(&self) -> bool {
        (1..=4).contains(&self.dim_v)
            && (1..=4).contains(&self.dim_m)
            && self.dim_a >= 1
            && (self.dim_m == 1 || (self.var_type == VarType::Float && self.dim_v >= 2))
            && !self.name.is_empty()
            && self.padded_size().is_some()
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::InvalidLayout(format!(
                "variable '{}' has invalid shape {:?} {}x{}[{}]",
                self.name, self.var_type, self.dim_v, self.dim_m, self.dim_a
            )))
        }
    }

    /// GLSL type name, without array suffix (`vec3`, `mat4`, `mat2x3`, `uint`...)
    pub fn glsl_type_name(&self) -> String {
        if self.dim_m > 1 {
            if self.dim_m == self.dim_v {
                format!("mat{}", self.dim_m)
            } else {
                format!("mat{}x{}", self.dim_m, self.dim_v)
            }
        } else if self.dim_v == 1 {
            self.var_type.scalar_name().to_string()
        } else {
            format!("{}{}", self.var_type.vector_prefix(), self.dim_v)
        }
    }

    /// GLSL declaration fragment: `vec3 name` or `float name[8]`
    pub fn glsl_decl(&self) -> String {
        if self.dim_a > 1 {
            format!("{} {}[{}]", self.glsl_type_name(), self.name, self.dim_a)
        } else {
            format!("{} {}", self.glsl_type_name(), self.name)
        }
    }

    /// Number of column vectors (matrix columns times array length)
    fn columns(&self) -> usize {
        (self.dim_m as usize).saturating_mul(self.dim_a as usize)
    }

    /// Worst-case buffer footprint (every column padded to 16 bytes), or
    /// `None` if it does not fit in `usize`
    fn padded_size(&self) -> Option<usize> {
        (self.dim_m as usize).checked_mul(self.dim_a as usize)?.checked_mul(16)
    }

    /// Size in bytes of one column vector
    fn vec_size(&self) -> usize {
        self.var_type.size() * self.dim_v as usize
    }

    /// Alignment of one column vector (vec3 behaves as vec4)
    fn vec_align(&self) -> usize {
        match self.dim_v {
            1 => self.var_type.size(),
            2 => self.var_type.size() * 2,
            _ => self.var_type.size() * 4,
        }
    }

    /// Size in bytes of the tightly packed host representation
    pub fn host_size(&self) -> usize {
        self.vec_size().saturating_mul(self.columns())
    }
}

/// Placement of a variable inside a block of memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VarLayout {
    /// Byte offset of the first column
    pub offset: usize,
    /// Byte distance between consecutive columns / array elements
    pub stride: usize,
    /// Total bytes covered (stride times columns)
    pub size: usize,
}

impl VarLayout {
    /// First byte after this variable
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.size)
    }
}

fn align_up(value: usize, align: usize) -> usize {
    value.saturating_add(align - 1) & !(align - 1)
}

/// Tightly packed host layout, as used for raw variable data
pub fn host_layout(offset: usize, var: &Var) -> VarLayout {
    let stride = var.vec_size();
    VarLayout {
        offset: align_up(offset, var.var_type.size()),
        stride,
        size: stride.saturating_mul(var.columns()),
    }
}

/// std140 layout (uniform buffers)
pub fn std140_layout(offset: usize, var: &Var) -> VarLayout {
    let vec_size = var.vec_size();
    if var.columns() > 1 {
        let stride = align_up(vec_size, 16);
        VarLayout {
            offset: align_up(offset, 16),
            stride,
            size: stride.saturating_mul(var.columns()),
        }
    } else {
        VarLayout {
            offset: align_up(offset, var.vec_align()),
            stride: vec_size,
            size: vec_size,
        }
    }
}

/// std430 layout (storage buffers)
pub fn std430_layout(offset: usize, var: &Var) -> VarLayout {
    let vec_size = var.vec_size();
    let align = var.vec_align();
    let stride = if var.columns() > 1 { align_up(vec_size, align) } else { vec_size };
    VarLayout {
        offset: align_up(offset, align),
        stride,
        size: stride.saturating_mul(var.columns()),
    }
}

#[cfg(test)]
#[path = "var_tests.rs"]
mod tests;
