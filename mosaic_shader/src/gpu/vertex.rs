/// Vertex attribute description

/// Vertex attribute format (32-bit float components)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    Float,
    Vec2,
    Vec3,
    Vec4,
}

impl VertexFormat {
    /// Number of float components
    pub fn components(&self) -> usize {
        match self {
            VertexFormat::Float => 1,
            VertexFormat::Vec2 => 2,
            VertexFormat::Vec3 => 3,
            VertexFormat::Vec4 => 4,
        }
    }

    /// Size in bytes of one vertex's data
    pub fn size_bytes(&self) -> usize {
        self.components() * 4
    }
}

/// Vertex attribute, excluding location and offset (assigned by the backend)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAttrib {
    pub name: String,
    pub format: VertexFormat,
}
